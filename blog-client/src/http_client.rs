use crate::error::BlogClientError;
use crate::models::{CreatePostRequest, ErrorResponse, Post, PostsResponse, UpdatePostRequest};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub async fn list_posts(&self) -> Result<Vec<Post>, BlogClientError> {
        let response = self.client.get(self.url("/posts")).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json::<PostsResponse>().await?.posts),
            status => Err(Self::error_from(status, response).await),
        }
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, BlogClientError> {
        let url = self.url(&format!("/posts/{}", id));
        let response = self.client.get(&url).send().await?;
        self.handle_post_response(response).await
    }

    pub async fn create_post(&self, req: &CreatePostRequest) -> Result<Post, BlogClientError> {
        let response = self.client.post(self.url("/posts")).json(req).send().await?;
        self.handle_post_response(response).await
    }

    /// Sends a raw JSON body, for requests the typed models cannot express.
    pub async fn create_post_raw(
        &self,
        body: &serde_json::Value,
    ) -> Result<Post, BlogClientError> {
        let response = self.client.post(self.url("/posts")).json(body).send().await?;
        self.handle_post_response(response).await
    }

    pub async fn update_post(
        &self,
        id: &str,
        req: &UpdatePostRequest,
    ) -> Result<(), BlogClientError> {
        let url = self.url(&format!("/posts/{}", id));
        let response = self.client.put(&url).json(req).send().await?;
        Self::handle_empty_response(response).await
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), BlogClientError> {
        let url = self.url(&format!("/posts/{}", id));
        let response = self.client.delete(&url).send().await?;
        Self::handle_empty_response(response).await
    }

    async fn handle_post_response(&self, response: Response) -> Result<Post, BlogClientError> {
        match response.status() {
            StatusCode::OK | StatusCode::CREATED => Ok(response.json::<Post>().await?),
            status => Err(Self::error_from(status, response).await),
        }
    }

    async fn handle_empty_response(response: Response) -> Result<(), BlogClientError> {
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            status => Err(Self::error_from(status, response).await),
        }
    }

    async fn error_from(status: StatusCode, response: Response) -> BlogClientError {
        let error_text = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text),
            Err(e) => return BlogClientError::HttpError(e),
        };

        tracing::debug!("HTTP {}: {}", status, error_text);

        match status {
            StatusCode::NOT_FOUND => BlogClientError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::UNSUPPORTED_MEDIA_TYPE => {
                BlogClientError::InvalidRequest(error_text)
            }
            _ => BlogClientError::TransportError(format!("HTTP {}: {}", status, error_text)),
        }
    }
}
