use crate::error::NotificationHubError;
use std::fmt;

const ENDPOINT_KEY: &str = "Endpoint";
const SHARED_ACCESS_KEY_NAME_KEY: &str = "SharedAccessKeyName";
const SHARED_ACCESS_KEY_KEY: &str = "SharedAccessKey";

/// Connection settings extracted from a Notification Hubs connection string.
///
/// Produced by [`ConnectionStringParser::parse`] and consumed immediately to
/// build a [`crate::auth::Credential`] and a hub client; it has no lifecycle
/// of its own. `Debug` output redacts the key value.
#[derive(Clone)]
pub struct ParsedConnection {
    /// Namespace endpoint, e.g. `sb://my-namespace.servicebus.windows.net/`
    pub endpoint: String,
    /// Name of the shared access policy
    pub key_name: String,
    /// The shared access key itself
    pub key_value: String,
}

impl fmt::Debug for ParsedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedConnection")
            .field("endpoint", &self.endpoint)
            .field("key_name", &self.key_name)
            .field("key_value", &"<redacted>")
            .finish()
    }
}

/// Parser for `Key=Value;`-style Notification Hubs connection strings.
pub struct ConnectionStringParser;

impl ConnectionStringParser {
    /// Parses a semicolon-delimited connection string.
    ///
    /// Recognized keys, matched case-insensitively: `Endpoint`,
    /// `SharedAccessKeyName` and `SharedAccessKey`. Unrecognized keys are
    /// ignored so connection strings with newer fields keep parsing. Only
    /// the first `=` of a segment separates key from value; the value keeps
    /// any further `=` characters verbatim (access keys are base64 and
    /// commonly end in `=`).
    ///
    /// # Errors
    ///
    /// - [`NotificationHubError::MalformedConnectionString`] for a segment
    ///   without a `=` separator.
    /// - [`NotificationHubError::MissingConnectionStringField`] when one of
    ///   the three recognized keys is absent or has an empty value.
    pub fn parse(connection_string: &str) -> Result<ParsedConnection, NotificationHubError> {
        let mut endpoint = String::new();
        let mut key_name = String::new();
        let mut key_value = String::new();

        for segment in connection_string.split(';') {
            let Some((key, value)) = segment.split_once('=') else {
                return Err(NotificationHubError::MalformedConnectionString {
                    segment: segment.to_string(),
                });
            };

            if key.eq_ignore_ascii_case(ENDPOINT_KEY) {
                endpoint = value.to_string();
            } else if key.eq_ignore_ascii_case(SHARED_ACCESS_KEY_NAME_KEY) {
                key_name = value.to_string();
            } else if key.eq_ignore_ascii_case(SHARED_ACCESS_KEY_KEY) {
                key_value = value.to_string();
            }
        }

        if endpoint.is_empty() {
            return Err(NotificationHubError::MissingConnectionStringField {
                field: ENDPOINT_KEY,
            });
        }

        if key_name.is_empty() {
            return Err(NotificationHubError::MissingConnectionStringField {
                field: SHARED_ACCESS_KEY_NAME_KEY,
            });
        }

        if key_value.is_empty() {
            return Err(NotificationHubError::MissingConnectionStringField {
                field: SHARED_ACCESS_KEY_KEY,
            });
        }

        Ok(ParsedConnection {
            endpoint,
            key_name,
            key_value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_connection_string() {
        let connection_string =
            "Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1;SharedAccessKey=secretkey";
        let parsed = ConnectionStringParser::parse(connection_string).unwrap();
        assert_eq!(parsed.endpoint, "sb://ns.example.net/");
        assert_eq!(parsed.key_name, "key1");
        assert_eq!(parsed.key_value, "secretkey");
    }

    #[test]
    fn test_parse_accepts_any_segment_order() {
        let connection_string =
            "SharedAccessKey=secretkey;Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1";
        let parsed = ConnectionStringParser::parse(connection_string).unwrap();
        assert_eq!(parsed.endpoint, "sb://ns.example.net/");
        assert_eq!(parsed.key_name, "key1");
        assert_eq!(parsed.key_value, "secretkey");
    }

    #[test]
    fn test_parse_matches_keys_case_insensitively() {
        let connection_string =
            "endpoint=sb://ns.example.net/;SHAREDACCESSKEYNAME=key1;sharedaccesskey=secretkey";
        let parsed = ConnectionStringParser::parse(connection_string).unwrap();
        assert_eq!(parsed.endpoint, "sb://ns.example.net/");
        assert_eq!(parsed.key_name, "key1");
        assert_eq!(parsed.key_value, "secretkey");
    }

    #[test]
    fn test_parse_keeps_equals_signs_inside_values() {
        let connection_string =
            "Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1;SharedAccessKey=c2VjcmV0a2V5==";
        let parsed = ConnectionStringParser::parse(connection_string).unwrap();
        assert_eq!(parsed.key_value, "c2VjcmV0a2V5==");
    }

    #[test]
    fn test_parse_ignores_unrecognized_keys() {
        let connection_string = "Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1;SharedAccessKey=secretkey;EntityPath=myhub";
        let parsed = ConnectionStringParser::parse(connection_string).unwrap();
        assert_eq!(parsed.endpoint, "sb://ns.example.net/");
    }

    #[test]
    fn test_parse_missing_shared_access_key() {
        let connection_string = "Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        assert!(matches!(
            err,
            NotificationHubError::MissingConnectionStringField {
                field: "SharedAccessKey"
            }
        ));
    }

    #[test]
    fn test_parse_missing_endpoint() {
        let connection_string = "SharedAccessKeyName=key1;SharedAccessKey=secretkey";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        assert!(matches!(
            err,
            NotificationHubError::MissingConnectionStringField { field: "Endpoint" }
        ));
    }

    #[test]
    fn test_parse_missing_key_name() {
        let connection_string = "Endpoint=sb://ns.example.net/;SharedAccessKey=secretkey";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        assert!(matches!(
            err,
            NotificationHubError::MissingConnectionStringField {
                field: "SharedAccessKeyName"
            }
        ));
    }

    #[test]
    fn test_parse_empty_value_counts_as_missing() {
        let connection_string = "Endpoint=sb://ns.example.net/;SharedAccessKeyName=;SharedAccessKey=secretkey";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        assert!(matches!(
            err,
            NotificationHubError::MissingConnectionStringField {
                field: "SharedAccessKeyName"
            }
        ));
    }

    #[test]
    fn test_parse_segment_without_separator() {
        let connection_string = "Endpoint=sb://ns.example.net/;garbage;SharedAccessKey=secretkey";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        match err {
            NotificationHubError::MalformedConnectionString { segment } => {
                assert_eq!(segment, "garbage");
            }
            other => panic!("expected MalformedConnectionString, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_input_is_malformed() {
        let err = ConnectionStringParser::parse("").unwrap_err();
        assert!(matches!(
            err,
            NotificationHubError::MalformedConnectionString { .. }
        ));
    }

    #[test]
    fn test_parse_trailing_semicolon_is_malformed() {
        let connection_string =
            "Endpoint=sb://ns.example.net/;SharedAccessKeyName=key1;SharedAccessKey=secretkey;";
        let err = ConnectionStringParser::parse(connection_string).unwrap_err();
        match err {
            NotificationHubError::MalformedConnectionString { segment } => {
                assert_eq!(segment, "");
            }
            other => panic!("expected MalformedConnectionString, got {other:?}"),
        }
    }
}
