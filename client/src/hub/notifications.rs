use super::{
    API_VERSION_MESSAGES, API_VERSION_SCHEDULED, CORRELATION_ID_HEADER, DEVICE_HANDLE_HEADER,
    FORMAT_HEADER, NotificationHubClient, SCHEDULE_TIME_HEADER, TAGS_HEADER, TRACKING_ID_HEADER,
    header_value,
};
use crate::error::NotificationHubError;
use crate::model::{NotificationRequest, NotificationResponse};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, LOCATION};

impl NotificationHubClient {
    /// Sends a notification directly to a single device, bypassing tag
    /// routing. `device_token` is the platform push handle (APNs device
    /// token, FCM registration id, WNS channel URI).
    pub async fn send_direct_notification(
        &self,
        request: &NotificationRequest,
        device_token: &str,
    ) -> Result<NotificationResponse, NotificationHubError> {
        let url = format!(
            "{}{}/messages/?api-version={API_VERSION_MESSAGES}&direct=true",
            self.request_host(),
            self.hub_name()
        );
        log::debug!("Sending direct notification via {url}");

        let builder = self
            .notification_builder(&url, request)
            .header(DEVICE_HANDLE_HEADER, device_token);
        self.dispatch("send_direct_notification", builder).await
    }

    /// Sends a notification routed by the hub. With `tags` set, delivery is
    /// restricted to installations matching the tag expression (e.g.
    /// `"sports && !digest"`); without it the notification goes to every
    /// registered device of the requested platform.
    pub async fn send_notification(
        &self,
        request: &NotificationRequest,
        tags: Option<&str>,
    ) -> Result<NotificationResponse, NotificationHubError> {
        let url = format!(
            "{}{}/messages/?api-version={API_VERSION_MESSAGES}",
            self.request_host(),
            self.hub_name()
        );
        log::debug!("Sending notification via {url}");

        let mut builder = self.notification_builder(&url, request);
        if let Some(tag_expression) = tags {
            builder = builder.header(TAGS_HEADER, tag_expression);
        }
        self.dispatch("send_notification", builder).await
    }

    /// Enqueues a notification for delivery at `schedule_time` (UTC, at most
    /// seven days ahead per service limits). The returned
    /// [`NotificationResponse::notification_id`] can be passed to
    /// [`cancel_scheduled_notification`](Self::cancel_scheduled_notification).
    pub async fn schedule_notification(
        &self,
        request: &NotificationRequest,
        schedule_time: DateTime<Utc>,
        tags: Option<&str>,
    ) -> Result<NotificationResponse, NotificationHubError> {
        let url = format!(
            "{}{}/schedulednotifications/?api-version={API_VERSION_SCHEDULED}",
            self.request_host(),
            self.hub_name()
        );
        log::debug!("Scheduling notification via {url}");

        let mut builder = self.notification_builder(&url, request).header(
            SCHEDULE_TIME_HEADER,
            schedule_time.format("%Y-%m-%dT%H:%M:%S").to_string(),
        );
        if let Some(tag_expression) = tags {
            builder = builder.header(TAGS_HEADER, tag_expression);
        }
        self.dispatch("schedule_notification", builder).await
    }

    /// Cancels a previously scheduled notification. Cancelling is best
    /// effort; a notification already handed to the platform service is
    /// delivered regardless.
    pub async fn cancel_scheduled_notification(
        &self,
        notification_id: &str,
    ) -> Result<(), NotificationHubError> {
        let url = format!(
            "{}{}/schedulednotifications/{}?api-version={API_VERSION_SCHEDULED}",
            self.request_host(),
            self.hub_name(),
            urlencoding::encode(notification_id)
        );
        log::debug!("Cancelling scheduled notification via {url}");

        let response = self
            .http_client
            .delete(&url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("cancel_scheduled_notification", response).await);
        }
        Ok(())
    }

    /// Common POST assembly shared by the send operations: body, content
    /// type, a fresh SAS token and the caller's platform headers.
    fn notification_builder(
        &self,
        url: &str,
        request: &NotificationRequest,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, request.content_type.as_str())
            .header(AUTHORIZATION, self.authorization())
            .header(FORMAT_HEADER, request.platform.as_str())
            .body(request.message.clone());

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder
    }

    /// Sends a prepared request and maps the `201 Created` response into a
    /// [`NotificationResponse`]. Any other status becomes an
    /// [`NotificationHubError::ApiError`]; the caller owns retry policy.
    async fn dispatch(
        &self,
        operation: &str,
        builder: reqwest::RequestBuilder,
    ) -> Result<NotificationResponse, NotificationHubError> {
        let response = builder
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if response.status() != StatusCode::CREATED {
            return Err(Self::error_from_response(operation, response).await);
        }

        Ok(NotificationResponse {
            tracking_id: header_value(&response, TRACKING_ID_HEADER),
            correlation_id: header_value(&response, CORRELATION_ID_HEADER),
            notification_id: notification_id_from_location(&response),
        })
    }
}

/// Extracts the notification id from a `Location` header of the form
/// `https://host/hub/schedulednotifications/{id}?api-version=...`.
fn notification_id_from_location(response: &reqwest::Response) -> Option<String> {
    let location = header_value(response, LOCATION.as_str())?;
    let path = location.split('?').next().unwrap_or("");
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}
