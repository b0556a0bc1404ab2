//! REST client for the chat API.

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::error::ClientError;
use crate::message::{ChannelInfo, Message};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBody<'a> {
    message: &'a str,
    created_at: i64,
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ClientError> {
        let base =
            Url::parse(base_url).map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base, token })
    }

    /// `{base}/chat/v1/server/{server}/channel/{channel}` plus `tail`
    fn channel_url(
        &self,
        server_id: &str,
        channel_id: &str,
        tail: &[&str],
    ) -> Result<Url, ClientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(["chat", "v1", "server", server_id, "channel", channel_id])
            .extend(tail);
        Ok(url)
    }

    /// `{base}/chat/v1/server/{server}/channel/{channel}/messages[/{message}]`
    pub(crate) fn messages_url(
        &self,
        server_id: &str,
        channel_id: &str,
        message_id: Option<&str>,
    ) -> Result<Url, ClientError> {
        match message_id {
            Some(id) => self.channel_url(server_id, channel_id, &["messages", id]),
            None => self.channel_url(server_id, channel_id, &["messages"]),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(
        &self,
        method: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> Result<Response, ClientError> {
        debug!(method, %url, "request");
        let response = self.authorize(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    pub async fn fetch_channel(
        &self,
        server_id: &str,
        channel_id: &str,
    ) -> Result<ChannelInfo, ClientError> {
        let url = self.channel_url(server_id, channel_id, &[])?;
        let response = self.send("GET", &url, self.http.get(url.clone())).await?;
        response.json::<ChannelInfo>().await.map_err(ClientError::Decode)
    }

    pub async fn fetch_messages(
        &self,
        server_id: &str,
        channel_id: &str,
    ) -> Result<Vec<Message>, ClientError> {
        let url = self.messages_url(server_id, channel_id, None)?;
        let response = self.send("GET", &url, self.http.get(url.clone())).await?;
        response
            .json::<Vec<Message>>()
            .await
            .map_err(ClientError::Decode)
    }

    pub async fn update_message(
        &self,
        server_id: &str,
        channel_id: &str,
        message_id: &str,
        created_at: i64,
        text: &str,
    ) -> Result<(), ClientError> {
        let url = self.messages_url(server_id, channel_id, Some(message_id))?;
        let body = UpdateBody {
            message: text,
            created_at,
        };
        self.send("PATCH", &url, self.http.patch(url.clone()).json(&body))
            .await?;
        Ok(())
    }

    pub async fn delete_message(
        &self,
        server_id: &str,
        channel_id: &str,
        message_id: &str,
        created_at: i64,
    ) -> Result<(), ClientError> {
        let url = self.messages_url(server_id, channel_id, Some(message_id))?;
        let request = self
            .http
            .delete(url.clone())
            .query(&[("createdAt", created_at)]);
        self.send("DELETE", &url, request).await?;
        Ok(())
    }
}
