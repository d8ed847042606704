use serde::{Deserialize, Serialize};
use std::collections::HashMap;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A device registration record stored by the hub.
///
/// An installation describes one device's push channel, its platform, the
/// tags it is subscribed to and any per-installation message templates.
/// Field names follow the service's camelCase JSON; optional and empty
/// fields are omitted from serialized payloads.
///
/// # Examples
///
/// ```no_run
/// use notihub::model::Installation;
///
/// let mut installation = Installation::new(
///     "1a2b3c".to_string(),
///     "apns".to_string(),
///     "<device-token>".to_string(),
/// );
/// installation.tags.push("sports".to_string());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    /// Caller-chosen identifier, unique per device registration
    pub installation_id: String,
    /// Optional user the device belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Last time the device was seen, reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_active_on: Option<String>,
    /// When the registration expires, reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_time: Option<String>,
    /// Last modification time, reported by the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Platform of the push channel (e.g. `apns`, `gcm`, `wns`)
    pub platform: String,
    /// Platform-specific push handle (device token, registration id, channel URI)
    pub push_channel: String,
    /// Set by the service when the platform reports the channel as expired
    #[serde(default, skip_serializing_if = "is_false")]
    pub expired_push_channel: bool,
    /// Tags used for targeted sends
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Named message templates registered for this installation
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub templates: HashMap<String, InstallationTemplate>,
}

impl Installation {
    /// Creates an installation with the required fields; everything else
    /// starts empty.
    pub fn new(installation_id: String, platform: String, push_channel: String) -> Self {
        Self {
            installation_id,
            platform,
            push_channel,
            ..Default::default()
        }
    }
}

/// A message template attached to an installation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallationTemplate {
    /// Template body with `$(property)` placeholders
    pub body: String,
    /// Platform headers sent with messages rendered from this template
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// JSON-Patch operation kinds accepted by the installations endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOperation {
    Add,
    Remove,
    Replace,
}

/// A single JSON-Patch entry for partial installation updates.
///
/// Serializes to the `application/json-patch+json` shape the service
/// expects, e.g. `{"op":"add","path":"/tags","value":"sports"}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InstallationPatch {
    pub op: PatchOperation,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl InstallationPatch {
    pub fn add(path: String, value: String) -> Self {
        Self {
            op: PatchOperation::Add,
            path,
            value: Some(value),
        }
    }

    pub fn replace(path: String, value: String) -> Self {
        Self {
            op: PatchOperation::Replace,
            path,
            value: Some(value),
        }
    }

    pub fn remove(path: String) -> Self {
        Self {
            op: PatchOperation::Remove,
            path,
            value: None,
        }
    }
}

/// A notification payload plus the platform metadata needed to deliver it.
///
/// The body is passed through to the platform notification service
/// untouched; `headers` is an explicit mapping merged into the outgoing
/// request for platform-specific options such as `apns-topic` or
/// `apns-priority`.
#[derive(Clone, Debug)]
pub struct NotificationRequest {
    /// Raw message body forwarded to the platform notification service
    pub message: String,
    /// Additional platform headers merged into the request
    pub headers: HashMap<String, String>,
    /// Target platform format (e.g. `apple`, `gcm`, `windows`)
    pub platform: String,
    /// MIME type of `message`
    pub content_type: String,
}

impl NotificationRequest {
    pub fn new(message: String, platform: String, content_type: String) -> Self {
        Self {
            message,
            headers: HashMap::new(),
            platform,
            content_type,
        }
    }
}

/// Identifiers returned by the service for a send operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotificationResponse {
    /// `TrackingId` response header, used when raising support requests
    pub tracking_id: Option<String>,
    /// `x-ms-correlation-request-id` response header
    pub correlation_id: Option<String>,
    /// Scheduled notification id parsed from the `Location` header;
    /// only populated for scheduled sends
    pub notification_id: Option<String>,
}

/// Result of an installation create or update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstallationResponse {
    /// `Content-Location` response header pointing at the installation
    pub content_location: Option<String>,
}
