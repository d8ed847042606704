pub mod connection_string;
pub mod credential;
pub mod sas_token_generator;

pub use connection_string::{ConnectionStringParser, ParsedConnection};
pub use credential::Credential;
pub use sas_token_generator::SasTokenGenerator;
