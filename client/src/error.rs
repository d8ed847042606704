use thiserror::Error;

/// Errors surfaced by connection-string parsing, client construction and
/// Notification Hubs REST operations.
///
/// Parsing and request errors are returned synchronously to the caller;
/// nothing is swallowed or retried inside the library. Callers are expected
/// to branch on the variant when they need different handling per kind.
#[derive(Debug, Error)]
pub enum NotificationHubError {
    /// A connection-string segment did not contain a `=` separator.
    #[error("failed parsing connection string: segment '{segment}' has no '=' separator")]
    MalformedConnectionString { segment: String },

    /// A required connection-string field was absent or had an empty value.
    #[error("connection string key '{field}' must not be empty")]
    MissingConnectionStringField { field: &'static str },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    ClientCreation(String),

    /// The request never produced a service response (connect, timeout, TLS).
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status code.
    ///
    /// `tracking_id` carries the `TrackingId` response header when present,
    /// which Azure support uses to locate the failed operation.
    #[error("Notification Hubs API error during {operation}: HTTP {status} - {message}")]
    ApiError {
        operation: String,
        status: u16,
        message: String,
        tracking_id: Option<String>,
    },

    /// A response body could not be decoded as the expected JSON shape.
    #[error("JSON parsing failed: {0}")]
    JsonParsingFailed(String),
}
