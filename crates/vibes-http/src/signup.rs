//! Early-access signup submission.

use tracing::{info, instrument};

use vibes_core::error::InvalidInputError;
use vibes_core::signup::SIGNUP_PATH;
use vibes_core::{Result, SignupForm, SignupRequest};

use crate::client::ApiClient;
use crate::request::{RequestBody, RequestOptions};

impl ApiClient {
    /// Post a validated signup to `/early-access/signup`.
    ///
    /// Returns the server's response body as-is.
    #[instrument(skip(self, request), fields(category = %request.category))]
    pub async fn submit_signup(&self, request: &SignupRequest) -> Result<serde_json::Value> {
        let response = self
            .post(SIGNUP_PATH, RequestBody::json(request)?, RequestOptions::new())
            .await?;
        info!("early-access signup accepted");
        Ok(response)
    }

    /// Validate `form` and submit it. Nothing is sent if validation fails.
    pub async fn submit_signup_form(&self, form: &SignupForm) -> Result<serde_json::Value> {
        let request = form.validate().map_err(InvalidInputError::from)?;
        self.submit_signup(&request).await
    }
}
