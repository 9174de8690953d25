use crate::error::{ApiError, AuthError};
use crate::model::{Credential, DateWindow, Resolution, TimeSeriesRequestBody};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client as HttpClient;
use serde_derive::Deserialize;

/// Body of a successful `GET /token` call.
#[derive(Deserialize)]
struct TokenResponse {
    result: Option<String>,
}

/// Raw HTTP access to the Eloverblik customer API.
///
/// Does not interpret meter data; it only moves bytes and maps statuses to
/// the auth and API error kinds.
pub struct Client {
    http_client: HttpClient,
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exchanges the long-lived refresh token for a short-lived data access token.
    pub async fn fetch_access_token(&self, refresh_token: &str) -> Result<Credential, AuthError> {
        let url = format!("{}/token", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .bearer_auth(refresh_token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let token = serde_json::from_str::<TokenResponse>(&body)
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?
            .result
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| AuthError::MalformedResponse("missing 'result' token".to_string()))?;
        Ok(Credential::new(token))
    }

    /// Requests time series for `metering_points` and returns the raw body.
    pub async fn fetch_time_series(
        &self,
        credential: &Credential,
        metering_points: &[String],
        window: DateWindow,
        resolution: Resolution,
    ) -> Result<String, ApiError> {
        let url = format!(
            "{}/meterdata/gettimeseries/{}/{}/{}",
            self.base_url,
            window.from.format("%Y-%m-%d"),
            window.to.format("%Y-%m-%d"),
            resolution
        );
        let response = self
            .http_client
            .post(&url)
            .bearer_auth(credential.as_str())
            .json(&TimeSeriesRequestBody::new(metering_points))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::status(status));
        }
        Ok(response.text().await?)
    }
}
