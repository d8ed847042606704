use std::fmt;
use zeroize::ZeroizeOnDrop;

/// Shared access key pair for a Notification Hubs namespace.
///
/// Holds the access policy name and the secret key value. The key value is
/// wiped from memory when the credential is dropped and is redacted from
/// `Debug` output; it is never serialized or logged.
#[derive(Clone, ZeroizeOnDrop)]
pub struct Credential {
    key_name: String,
    key_value: String,
}

impl Credential {
    pub fn new(key_name: String, key_value: String) -> Self {
        Self {
            key_name,
            key_value,
        }
    }

    /// Name of the shared access policy the key belongs to.
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    pub(crate) fn key_value(&self) -> &str {
        &self.key_value
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("key_name", &self.key_name)
            .field("key_value", &"<redacted>")
            .finish()
    }
}
