use crate::data::post_repository::PostRepository;
use crate::domain::post::{CreatePostRequest, PostResponse, UpdatePostRequest};
use crate::domain::{Author, DomainError, NewPost, PostPatch};
use std::sync::Arc;

pub struct BlogService {
    post_repo: Arc<dyn PostRepository>,
}

fn required_field(value: Option<String>, field: &str) -> Result<String, DomainError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        Some(_) => Err(DomainError::ValidationError(format!(
            "`{}` cannot be empty",
            field
        ))),
        None => Err(DomainError::ValidationError(format!(
            "Missing `{}` in request body",
            field
        ))),
    }
}

fn optional_field(value: Option<String>, field: &str) -> Result<Option<String>, DomainError> {
    value.map(|v| required_field(Some(v), field)).transpose()
}

impl BlogService {
    pub fn new(post_repo: Arc<dyn PostRepository>) -> Self {
        Self { post_repo }
    }

    pub async fn list_posts(&self) -> Result<Vec<PostResponse>, DomainError> {
        let posts = self.post_repo.list().await?;

        tracing::debug!("Listed {} posts", posts.len());

        Ok(posts.into_iter().map(PostResponse::from).collect())
    }

    pub async fn get_post(&self, id: &str) -> Result<PostResponse, DomainError> {
        self.post_repo
            .find_by_id(id)
            .await?
            .map(PostResponse::from)
            .ok_or_else(|| DomainError::PostNotFound(id.to_string()))
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<PostResponse, DomainError> {
        let new_post = NewPost {
            title: required_field(req.title, "title")?,
            content: required_field(req.content, "content")?,
            author: req.author.map(Author::from).unwrap_or_default(),
        };

        let post = self.post_repo.create(new_post).await?;

        tracing::info!("Post created: id={}", post.id);

        Ok(PostResponse::from(post))
    }

    pub async fn update_post(&self, id: &str, req: UpdatePostRequest) -> Result<(), DomainError> {
        if let Some(body_id) = &req.id {
            if body_id != id {
                return Err(DomainError::ValidationError(format!(
                    "Request path id ({}) and request body id ({}) must match",
                    id, body_id
                )));
            }
        }

        let patch = PostPatch {
            title: optional_field(req.title, "title")?,
            content: optional_field(req.content, "content")?,
            author: req.author.map(Author::from),
        };

        if patch.is_empty() {
            return Err(DomainError::ValidationError(
                "Request body must contain at least one of `title`, `content`, `author`"
                    .to_string(),
            ));
        }

        match self.post_repo.update_by_id(id, patch).await? {
            Some(_) => {
                tracing::info!("Post updated: id={}", id);
                Ok(())
            }
            None => Err(DomainError::PostNotFound(id.to_string())),
        }
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), DomainError> {
        if self.post_repo.delete_by_id(id).await? {
            tracing::info!("Post deleted: id={}", id);
        } else {
            tracing::debug!("Delete of absent post id={}", id);
        }

        Ok(())
    }
}
