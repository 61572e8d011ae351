//! Communication service operations.
//!
//! Public submission plus the admin inbox. Replying is at-most-once per
//! message: the UI hides the reply affordance once `replied` is set, and
//! the backend is the actual enforcement authority.

use tracing::instrument;

use clotho_core::MessageId;

use super::{BackendClient, BackendError, Message, NewMessage};

impl BackendClient {
    /// Submit a contact-form message (public, no bearer).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects the
    /// payload.
    #[instrument(skip(self, message))]
    pub async fn send_message(&self, message: &NewMessage) -> Result<(), BackendError> {
        let response = self
            .http()
            .post(self.url("/api/communication/send"))
            .json(message)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    /// All messages for the admin inbox.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` when the bearer lacks the admin role.
    #[instrument(skip(self, token))]
    pub async fn list_messages(&self, token: &str) -> Result<Vec<Message>, BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .get(self.url("/api/communication/all"))
            .bearer_auth(token)
            .send()
            .await?;

        Self::decode(response).await
    }

    /// Reply to one message (admin only).
    ///
    /// # Errors
    ///
    /// Returns `Rejected` when the message was already replied to.
    #[instrument(skip(self, token, reply))]
    pub async fn reply_to_message(
        &self,
        token: &str,
        id: MessageId,
        reply: &str,
    ) -> Result<(), BackendError> {
        let token = Self::bearer(token)?;
        let response = self
            .http()
            .post(self.url(&format!("/api/communication/reply/{id}")))
            .bearer_auth(token)
            .json(&serde_json::json!({ "replyMessage": reply }))
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
