//! HTTP Backend Client
//!
//! Implementation of `CourseBackend` against the platform's REST API.

use async_trait::async_trait;
use serde::Serialize;

use atelier_core::{
    BackendError, Course, CourseBackend, CoursePurchase, Result, ShoppingItem, UserProfile,
};

/// Backend client configuration
#[derive(Clone, Debug)]
pub struct BackendConfig {
    /// API base URL; empty means same-origin relative requests
    pub base_url: String,

    /// Request timeout in seconds (native builds only; the browser owns
    /// timeouts on wasm)
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub fn from_env() -> Self {
        let base_url = std::env::var("ATELIER_API_URL").unwrap_or_default();

        Self {
            base_url,
            ..Default::default()
        }
    }
}

/// HTTP client for the platform backend
pub struct HttpBackend {
    client: reqwest::Client,
    config: BackendConfig,
}

#[derive(Serialize)]
struct CreateSessionRequest<'a> {
    items: &'a [ShoppingItem],
    success_url: &'a str,
    cancel_url: &'a str,
}

#[derive(Serialize)]
struct ConfirmSessionRequest<'a> {
    session_id: &'a str,
    course_id: &'a str,
}

#[derive(Serialize)]
struct PaypalCreateRequest<'a> {
    course_id: &'a str,
    session_id: &'a str,
}

#[derive(Serialize)]
struct PaypalConfirmRequest<'a> {
    session_id: &'a str,
}

impl HttpBackend {
    /// Create a new client for a specific API base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::from_config(BackendConfig {
            base_url: base_url.into(),
            ..Default::default()
        })
    }

    /// Create from configuration
    pub fn from_config(config: BackendConfig) -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_default();

        #[cfg(target_arch = "wasm32")]
        let client = reqwest::Client::new();

        Self { client, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_config(BackendConfig::from_env())
    }

    /// Create for same-origin requests (the wasm frontend default)
    pub fn same_origin() -> Self {
        Self::from_config(BackendConfig::default())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Convert a non-success response into a `Rejected` error, surfacing
    /// the backend's own `{"error": ...}` message when it sends one
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body["error"].as_str().map(str::to_string))
            .unwrap_or_else(|| format!("request failed with status {}", status));

        tracing::warn!(status = %status, message = %message, "backend rejected request");
        Err(BackendError::Rejected(message))
    }

    async fn post_unit<T: Serialize>(&self, path: &str, body: &T) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response).await?;
        response.json().await.map_err(malformed)
    }
}

fn transport(err: reqwest::Error) -> BackendError {
    BackendError::Transport(err.to_string())
}

fn malformed(err: reqwest::Error) -> BackendError {
    BackendError::Rejected(format!("invalid response body: {}", err))
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl CourseBackend for HttpBackend {
    async fn create_checkout_session(
        &self,
        items: &[ShoppingItem],
        success_url: &str,
        cancel_url: &str,
    ) -> Result<String> {
        let body = CreateSessionRequest {
            items,
            success_url,
            cancel_url,
        };

        let response = self
            .client
            .post(self.url("/api/checkout/session"))
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        let response = Self::check(response).await?;

        // The provider session payload passes through as a raw JSON
        // string; the flow layer parses and validates it.
        response.text().await.map_err(transport)
    }

    async fn confirm_checkout_session(&self, session_id: &str, course_id: &str) -> Result<()> {
        self.post_unit(
            "/api/checkout/confirm",
            &ConfirmSessionRequest {
                session_id,
                course_id,
            },
        )
        .await
    }

    async fn create_paypal_payment(&self, course_id: &str, session_id: &str) -> Result<()> {
        self.post_unit(
            "/api/paypal/create",
            &PaypalCreateRequest {
                course_id,
                session_id,
            },
        )
        .await
    }

    async fn confirm_paypal_payment(&self, session_id: &str) -> Result<()> {
        self.post_unit("/api/paypal/confirm", &PaypalConfirmRequest { session_id })
            .await
    }

    async fn get_purchased_courses(&self) -> Result<Vec<CoursePurchase>> {
        self.get_json("/api/purchases").await
    }

    async fn has_purchased_course(&self, course_id: &str) -> Result<bool> {
        self.get_json(&format!("/api/purchases/{}", course_id)).await
    }

    async fn get_courses(&self) -> Result<Vec<Course>> {
        self.get_json("/api/courses").await
    }

    async fn get_course(&self, course_id: &str) -> Result<Option<Course>> {
        let response = self
            .client
            .get(self.url(&format!("/api/courses/{}", course_id)))
            .send()
            .await
            .map_err(transport)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(response).await?;
        response.json().await.map_err(malformed)
    }

    async fn get_caller_user_profile(&self) -> Result<Option<UserProfile>> {
        self.get_json("/api/profile").await
    }

    async fn save_caller_user_profile(&self, profile: &UserProfile) -> Result<()> {
        let response = self
            .client
            .put(self.url("/api/profile"))
            .json(profile)
            .send()
            .await
            .map_err(transport)?;
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_url_joining() {
        let backend = HttpBackend::new("http://localhost:3000");
        assert_eq!(
            backend.url("/api/purchases"),
            "http://localhost:3000/api/purchases"
        );

        let same_origin = HttpBackend::same_origin();
        assert_eq!(same_origin.url("/api/purchases"), "/api/purchases");
    }
}
