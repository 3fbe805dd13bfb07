//! Authentication operations

use secrecy::SecretString;
use tracing::{info, instrument};

use super::json_body;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, User};

impl ApiClient {
    /// Log in and persist the returned token and privilege flag
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the credentials or the
    /// session cannot be persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> ApiResult<User> {
        let response: LoginResponse = self
            .call(&self.endpoints().login(), RequestOptions::post(json_body(request)?))
            .await?;
        self.persist_session(response).await
    }

    /// Create an account and start a session for it
    ///
    /// # Errors
    ///
    /// Returns an error if registration fails or the session cannot be
    /// persisted.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<User> {
        let response: LoginResponse = self
            .call(&self.endpoints().register(), RequestOptions::post(json_body(request)?))
            .await?;
        self.persist_session(response).await
    }

    /// The account behind the current token
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails.
    pub async fn me(&self) -> ApiResult<User> {
        self.call(&self.endpoints().me(), RequestOptions::get()).await
    }

    /// End the local session
    ///
    /// Clears token and privilege flag without announcing an invalidation.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store cannot be cleared.
    pub async fn logout(&self) -> ApiResult<()> {
        self.session().clear().await?;
        info!("Logged out");
        Ok(())
    }

    async fn persist_session(&self, response: LoginResponse) -> ApiResult<User> {
        self.session()
            .start(SecretString::from(response.token), response.user.is_admin)
            .await?;
        info!(user_id = response.user.id, "Session started");
        Ok(response.user)
    }
}
