//! Notion database query client.
//!
//! Talks to `POST /v1/databases/{id}/query` and turns error bodies into
//! [`GalleryError::Upstream`] carrying Notion's own message.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::NotionConfig;
use crate::database::RecordSource;
use crate::error::{GalleryError, Result};
use crate::model::{QueryPage, QueryRequest};

/// Notion API client bound to one database.
#[derive(Clone)]
pub struct NotionClient {
    client: reqwest::Client,
    query_url: String,
    token: String,
    version: String,
}

impl NotionClient {
    pub fn new(config: &NotionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            query_url: format!(
                "{}/v1/databases/{}/query",
                config.api_url, config.database_id
            ),
            token: config.token.clone(),
            version: config.version.clone(),
        })
    }
}

/// Error object Notion returns with non-2xx statuses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[async_trait]
impl RecordSource for NotionClient {
    async fn query(&self, request: &QueryRequest) -> Result<QueryPage> {
        let response = self
            .client
            .post(&self.query_url)
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.text().await {
                Ok(body) => match serde_json::from_str::<ErrorBody>(&body) {
                    Ok(err) if !err.message.is_empty() => err.message,
                    _ => format!("Notion API returned {}: {}", status, body),
                },
                Err(e) => format!("Notion API returned {} (body unreadable: {})", status, e),
            };
            return Err(GalleryError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
