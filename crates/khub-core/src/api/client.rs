use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use tracing::{debug, warn};

use super::HubApi;
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::models::hub::{CreateHub, HubCreated, HubList};
use crate::models::message::ChatRequest;
use crate::models::upload::UploadBody;
use crate::models::{ChatReply, Hub, Upload, UploadReceipt};

/// reqwest-backed [`HubApi`]. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpHubApi {
    config: ClientConfig,
    client: Client,
}

impl HttpHubApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn check(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl HubApi for HttpHubApi {
    async fn list_hubs(&self) -> ApiResult<Vec<Hub>> {
        let url = self.config.endpoint("/hubs");
        debug!(%url, "listing hubs");

        let response = self.client.get(&url).send().await?;
        let list: HubList = Self::check(response).await?.json().await?;
        Ok(list.hubs)
    }

    async fn create_hub(&self, name: &str) -> ApiResult<Option<String>> {
        let url = self.config.endpoint("/hubs");
        debug!(%url, hub = name, "creating hub");

        let response = self
            .client
            .post(&url)
            .json(&CreateHub { name })
            .send()
            .await?;
        let response = Self::check(response).await?;

        // Body is not part of the contract beyond success; tolerate anything.
        let created = response.json::<HubCreated>().await.unwrap_or_default();
        Ok(created.message)
    }

    async fn upload(&self, upload: &Upload) -> ApiResult<UploadReceipt> {
        let url = self.config.endpoint("/upload");
        let file_name = upload.file_name();
        let kind = upload.kind();
        if kind.is_none() {
            warn!(file = %file_name, "uploading file with an extension the backend may not ingest");
        }

        let data = tokio::fs::read(&upload.path)
            .await
            .map_err(|source| ApiError::Io {
                path: upload.path.display().to_string(),
                source,
            })?;
        debug!(%url, hub = %upload.hub_name, file = %file_name, bytes = data.len(), "uploading document");

        let mut part = Part::bytes(data).file_name(file_name);
        if let Some(kind) = kind {
            part = part.mime_str(kind.mime_type())?;
        }
        let form = Form::new()
            .text("hub_name", upload.hub_name.clone())
            .part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check(response).await?;

        let body = response.json::<UploadBody>().await.unwrap_or(UploadBody {
            error: None,
            receipt: UploadReceipt::default(),
        });
        match body.error {
            Some(error) => Err(ApiError::Backend(error)),
            None => Ok(body.receipt),
        }
    }

    async fn chat(&self, hub_name: &str, message: &str) -> ApiResult<ChatReply> {
        let url = self.config.endpoint("/chat");
        debug!(%url, hub = hub_name, "sending chat message");

        let response = self
            .client
            .post(&url)
            .json(&ChatRequest { hub_name, message })
            .send()
            .await?;
        let reply: ChatReply = Self::check(response).await?.json().await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wiremock::matchers::{body_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn api_for(server: &MockServer) -> HttpHubApi {
        let config = ClientConfig::new(format!("{}/api/v1", server.uri())).unwrap();
        HttpHubApi::new(config)
    }

    #[tokio::test]
    async fn test_list_hubs() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/hubs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "hubs": ["FinanceDocs", "Recipes"] })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let hubs = api_for(&server).await.list_hubs().await.unwrap();
        assert_eq!(hubs, vec![Hub::new("FinanceDocs"), Hub::new("Recipes")]);
    }

    #[tokio::test]
    async fn test_create_hub_sends_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/hubs"))
            .and(body_json(serde_json::json!({ "name": "Legal" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "message": "Hub 'Legal' created successfully" }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let message = api_for(&server).await.create_hub("Legal").await.unwrap();
        assert_eq!(message.as_deref(), Some("Hub 'Legal' created successfully"));
    }

    #[tokio::test]
    async fn test_create_hub_tolerates_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/hubs"))
            .respond_with(ResponseTemplate::new(201).set_body_string("ok"))
            .mount(&server)
            .await;

        let message = api_for(&server).await.create_hub("Legal").await.unwrap();
        assert!(message.is_none());
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .and(body_json(serde_json::json!({ "hub_name": "Recipes", "message": "Hello" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "response": "Hi there", "context": ["excerpt"] }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let reply = api_for(&server).await.chat("Recipes", "Hello").await.unwrap();
        assert_eq!(reply.response, "Hi there");
        assert_eq!(reply.context, vec!["excerpt".to_string()]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_string("collection missing"))
            .mount(&server)
            .await;

        let err = api_for(&server).await.chat("Nope", "Hello").await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "collection missing");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_upload_sends_multipart_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/upload"))
            .and(body_string_contains("name=\"hub_name\""))
            .and(body_string_contains("FinanceDocs"))
            .and(body_string_contains("filename=\"notes.txt\""))
            .and(body_string_contains("quarterly numbers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "message": "Successfully processed notes.txt", "chunks": 1 }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("notes.txt");
        let mut file = std::fs::File::create(&file_path).unwrap();
        writeln!(file, "quarterly numbers").unwrap();

        let receipt = api_for(&server)
            .await
            .upload(&Upload::new("FinanceDocs", &file_path))
            .await
            .unwrap();
        assert_eq!(receipt.chunks, Some(1));
    }

    #[tokio::test]
    async fn test_upload_error_body_is_a_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({ "error": "Unsupported file type: png" }),
            ))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file_path = dir.path().join("photo.png");
        std::fs::write(&file_path, b"\x89PNG").unwrap();

        let err = api_for(&server)
            .await
            .upload(&Upload::new("FinanceDocs", &file_path))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Backend(ref msg) if msg.contains("png")));
    }

    #[tokio::test]
    async fn test_upload_missing_file_issues_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/upload"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = api_for(&server)
            .await
            .upload(&Upload::new("FinanceDocs", "/definitely/not/here.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Io { .. }));
    }
}
