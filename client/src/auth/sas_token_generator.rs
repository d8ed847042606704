use crate::auth::credential::Credential;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Token validity window in seconds. Expiry is an absolute Unix timestamp;
/// an expired token surfaces as an authorization failure from the service.
const TOKEN_VALIDITY_SECS: i64 = 3600;

/// Generator for Notification Hubs Shared Access Signature (SAS) tokens.
///
/// Creates time-limited authorization tokens by HMAC-SHA256 signing the
/// target resource URI with a shared access key. A token proves the holder
/// had access to the key at signing time without transmitting the key
/// itself.
///
/// Signing is stateless and per-call: there is no token cache, no refresh
/// machinery and no shared mutable state, so a generator can be called
/// concurrently from any number of tasks.
///
/// # Examples
///
/// ```no_run
/// use notihub::auth::{Credential, SasTokenGenerator};
///
/// let credential = Credential::new("key1".to_string(), "secretkey".to_string());
/// let generator = SasTokenGenerator::new(credential);
/// let token = generator.generate_sas_token("sb://ns.example.net/");
/// ```
#[derive(Clone, Debug)]
pub struct SasTokenGenerator {
    credential: Credential,
}

impl SasTokenGenerator {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }

    /// Generates a SAS token authorizing access to `resource_uri`.
    ///
    /// The token is valid for one hour from the moment of the call and is a
    /// complete `Authorization` header value:
    ///
    /// `SharedAccessSignature sr=<audience>&sig=<signature>&se=<expiry>&skn=<key-name>`
    ///
    /// The resource URI is lower-cased and then percent-encoded; that
    /// encoded form is both the signed audience and the `sr` parameter.
    /// The signature is the base64 HMAC-SHA256 of `<audience>\n<expiry>`
    /// keyed with the raw bytes of the shared access key.
    pub fn generate_sas_token(&self, resource_uri: &str) -> String {
        self.generate_with_expiry(resource_uri, Utc::now().timestamp() + TOKEN_VALIDITY_SECS)
    }

    fn generate_with_expiry(&self, resource_uri: &str, expiry_timestamp: i64) -> String {
        let audience = resource_uri.to_lowercase();
        let encoded_audience = urlencoding::encode(&audience);
        let string_to_sign = format!("{encoded_audience}\n{expiry_timestamp}");

        let mut mac = HmacSha256::new_from_slice(self.credential.key_value().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(string_to_sign.as_bytes());
        let signature_base64 = general_purpose::STANDARD.encode(mac.finalize().into_bytes());

        format!(
            "SharedAccessSignature sr={}&sig={}&se={}&skn={}",
            encoded_audience,
            urlencoding::encode(&signature_base64),
            expiry_timestamp,
            self.credential.key_name()
        )
    }
}
