//! REST client for Azure Notification Hubs.
//!
//! Send operations live in `notifications`, installation management in
//! `installations`; both are inherent methods on [`NotificationHubClient`].

mod installations;
mod notifications;

use crate::auth::{ConnectionStringParser, Credential, SasTokenGenerator};
use crate::error::NotificationHubError;
use std::time::Duration;

const API_VERSION_MESSAGES: &str = "2015-01";
const API_VERSION_SCHEDULED: &str = "2015-04";
const API_VERSION_INSTALLATIONS: &str = "2015-01";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

const DEVICE_HANDLE_HEADER: &str = "ServiceBusNotification-DeviceHandle";
const FORMAT_HEADER: &str = "ServiceBusNotification-Format";
const TAGS_HEADER: &str = "ServiceBusNotification-Tags";
const SCHEDULE_TIME_HEADER: &str = "ServiceBusNotification-ScheduleTime";
const TRACKING_ID_HEADER: &str = "TrackingId";
const CORRELATION_ID_HEADER: &str = "x-ms-correlation-request-id";
const CONTENT_LOCATION_HEADER: &str = "Content-Location";

/// Client for a single Azure Notification Hub.
///
/// Holds the hub name, the namespace endpoint and the SAS credential; every
/// operation signs a fresh `Authorization` header immediately before the
/// request goes out. The client carries no mutable state and clones cheaply,
/// so one instance can be shared across tasks.
///
/// # Examples
///
/// ```no_run
/// use notihub::hub::NotificationHubClient;
///
/// let client = NotificationHubClient::from_connection_string(
///     "Endpoint=sb://ns.servicebus.windows.net/;SharedAccessKeyName=key1;SharedAccessKey=secret",
///     "my-hub",
/// )?;
/// ```
#[derive(Clone, Debug)]
pub struct NotificationHubClient {
    hub_name: String,
    host_name: String,
    token_generator: SasTokenGenerator,
    http_client: reqwest::Client,
}

impl NotificationHubClient {
    /// Builds a client by parsing a namespace connection string.
    ///
    /// # Errors
    ///
    /// Returns the parse errors of
    /// [`ConnectionStringParser::parse`](crate::auth::ConnectionStringParser::parse),
    /// or [`NotificationHubError::ClientCreation`] if the HTTP client cannot
    /// be constructed.
    pub fn from_connection_string(
        connection_string: &str,
        hub_name: &str,
    ) -> Result<Self, NotificationHubError> {
        let parsed = ConnectionStringParser::parse(connection_string)?;
        let credential = Credential::new(parsed.key_name, parsed.key_value);
        Self::new(hub_name, &parsed.endpoint, credential)
    }

    /// Builds a client from an already-separated endpoint and credential.
    pub fn new(
        hub_name: &str,
        endpoint: &str,
        credential: Credential,
    ) -> Result<Self, NotificationHubError> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NotificationHubError::ClientCreation(e.to_string()))?;

        Ok(Self {
            hub_name: hub_name.to_string(),
            host_name: endpoint.to_string(),
            token_generator: SasTokenGenerator::new(credential),
            http_client,
        })
    }

    pub fn hub_name(&self) -> &str {
        &self.hub_name
    }

    /// The namespace endpoint as given in the connection string,
    /// e.g. `sb://ns.servicebus.windows.net/`.
    pub fn host_name(&self) -> &str {
        &self.host_name
    }

    /// Base URL for requests: the `sb://` scheme swapped for `https://`.
    fn request_host(&self) -> String {
        self.host_name.replace("sb://", "https://")
    }

    /// Audience the token is signed for: the `http://` form of the
    /// namespace host. The service accepts that audience for every entity
    /// below the namespace.
    fn signature_host(&self) -> String {
        self.host_name.replace("sb://", "http://")
    }

    /// Fresh `Authorization` header value, generated per request.
    fn authorization(&self) -> String {
        self.token_generator.generate_sas_token(&self.signature_host())
    }

    /// Converts a non-success response into an [`NotificationHubError::ApiError`],
    /// consuming the body as the error message.
    async fn error_from_response(
        operation: &str,
        response: reqwest::Response,
    ) -> NotificationHubError {
        let status = response.status().as_u16();
        let tracking_id = header_value(&response, TRACKING_ID_HEADER);
        let message = response.text().await.unwrap_or_default();
        NotificationHubError::ApiError {
            operation: operation.to_string(),
            status,
            message,
            tracking_id,
        }
    }
}

fn header_value(response: &reqwest::Response, name: &str) -> Option<String> {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
}
