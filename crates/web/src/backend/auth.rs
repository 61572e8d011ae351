//! Auth service operations.
//!
//! Login is a two-step exchange: `POST /auth/login` yields the bearer token,
//! then `GET /auth/me` with that token yields the profile (including the raw
//! role tag). The combined result is what the session guard persists.

use tracing::instrument;

use super::{
    BackendClient, BackendError, LoginResponse, ProfileResponse, SignupResponse, UserCountResponse,
};

impl BackendClient {
    /// Exchange credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for bad credentials, `Http` for transport
    /// failures.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, BackendError> {
        let response = self
            .http()
            .post(self.url("/auth/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Fetch the profile behind a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn profile(&self, token: &str) -> Result<ProfileResponse, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/auth/me"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the backend refuses the signup (e.g. email
    /// already registered).
    #[instrument(skip(self, password))]
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignupResponse, BackendError> {
        let response = self
            .http()
            .post(self.url("/auth/signup"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Total registered users (admin dashboard stat).
    ///
    /// # Errors
    ///
    /// Returns an error if the token is missing/rejected or the request
    /// fails.
    #[instrument(skip(self, token))]
    pub async fn user_count(&self, token: &str) -> Result<u64, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/auth/user-count"))
            .bearer_auth(token)
            .send()
            .await?;

        let body: UserCountResponse = Self::decode(response).await?;
        Ok(body.user_count)
    }
}
