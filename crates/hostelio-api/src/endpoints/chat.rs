// Chat endpoints

use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{ChatRecord, SendMessageRequest, SendMessageResponse};

impl ApiClient {
    /// Send a message to another user.
    ///
    /// `POST chat/send-message/{receiver_id}`
    pub async fn send_message(&self, receiver_id: &str, message: &str) -> Result<ChatRecord, Error> {
        let url = self.endpoint(&["chat", "send-message", receiver_id], false)?;
        debug!(receiver_id, "sending message");
        let resp: SendMessageResponse = self.post(url, &SendMessageRequest { message }).await?;
        Ok(resp.data)
    }

    /// The full conversation with another user, newest first.
    ///
    /// `GET chat/get-all-send-received-messages-with/{other_user_id}`
    ///
    /// The backend answers 404 when the conversation is empty; that is
    /// returned here as an empty list.
    pub async fn conversation_with(&self, other_user_id: &str) -> Result<Vec<ChatRecord>, Error> {
        let url = self.endpoint(
            &["chat", "get-all-send-received-messages-with", other_user_id],
            false,
        )?;
        match self.get(url).await {
            Err(Error::NotFound { .. }) => Ok(Vec::new()),
            other => other,
        }
    }
}
