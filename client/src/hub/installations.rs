use super::{API_VERSION_INSTALLATIONS, CONTENT_LOCATION_HEADER, NotificationHubClient, header_value};
use crate::error::NotificationHubError;
use crate::model::{Installation, InstallationPatch, InstallationResponse};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

impl NotificationHubClient {
    /// Fetches a single installation by id.
    pub async fn get_installation(
        &self,
        installation_id: &str,
    ) -> Result<Installation, NotificationHubError> {
        let url = self.installation_url(installation_id);
        log::debug!("Fetching installation from {url}");

        let response = self
            .http_client
            .get(&url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("get_installation", response).await);
        }

        response
            .json::<Installation>()
            .await
            .map_err(|e| NotificationHubError::JsonParsingFailed(e.to_string()))
    }

    /// Creates the installation, or overwrites it completely if the id
    /// already exists.
    pub async fn create_or_update_installation(
        &self,
        installation: &Installation,
    ) -> Result<InstallationResponse, NotificationHubError> {
        let url = self.installation_url(&installation.installation_id);
        log::debug!("Upserting installation via {url}");

        let response = self
            .http_client
            .put(&url)
            .header(AUTHORIZATION, self.authorization())
            .json(installation)
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(
                Self::error_from_response("create_or_update_installation", response).await,
            );
        }

        Ok(InstallationResponse {
            content_location: header_value(&response, CONTENT_LOCATION_HEADER),
        })
    }

    /// Applies a JSON-Patch document to an existing installation, e.g. to
    /// add a tag or swap the push channel without resending the whole
    /// record.
    pub async fn patch_installation(
        &self,
        installation_id: &str,
        patches: &[InstallationPatch],
    ) -> Result<InstallationResponse, NotificationHubError> {
        let url = self.installation_url(installation_id);
        log::debug!("Patching installation via {url}");

        let body = serde_json::to_vec(patches)
            .map_err(|e| NotificationHubError::JsonParsingFailed(e.to_string()))?;

        let response = self
            .http_client
            .patch(&url)
            .header(CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .header(AUTHORIZATION, self.authorization())
            .body(body)
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("patch_installation", response).await);
        }

        Ok(InstallationResponse {
            content_location: header_value(&response, CONTENT_LOCATION_HEADER),
        })
    }

    /// Deletes an installation. Deleting an unknown id is an error at the
    /// service level and is surfaced as such.
    pub async fn delete_installation(
        &self,
        installation_id: &str,
    ) -> Result<(), NotificationHubError> {
        let url = self.installation_url(installation_id);
        log::debug!("Deleting installation via {url}");

        let response = self
            .http_client
            .delete(&url)
            .header(AUTHORIZATION, self.authorization())
            .send()
            .await
            .map_err(|e| NotificationHubError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("delete_installation", response).await);
        }
        Ok(())
    }

    fn installation_url(&self, installation_id: &str) -> String {
        format!(
            "{}{}/installations/{}?api-version={API_VERSION_INSTALLATIONS}",
            self.request_host(),
            self.hub_name(),
            urlencoding::encode(installation_id)
        )
    }
}
