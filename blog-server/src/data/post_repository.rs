use crate::domain::{DomainError, NewPost, Post, PostPatch};
use async_trait::async_trait;
use bson::doc;
use bson::oid::ObjectId;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

pub const POSTS_COLLECTION: &str = "blogposts";

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn create(&self, new_post: NewPost) -> Result<Post, DomainError>;
    async fn insert_many(&self, new_posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError>;
    async fn find_one(&self) -> Result<Option<Post>, DomainError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError>;
    async fn list(&self) -> Result<Vec<Post>, DomainError>;
    async fn count(&self) -> Result<u64, DomainError>;
    async fn update_by_id(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError>;
    /// Returns whether a post was removed. Missing ids are not an error.
    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError>;
    async fn clear(&self) -> Result<(), DomainError>;
}

/// Ids that are not valid ObjectIds can never match a stored post.
pub(crate) fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

pub struct MongoPostRepository {
    collection: Collection<Post>,
}

impl MongoPostRepository {
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(POSTS_COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let post = Post::new(new_post);

        self.collection.insert_one(&post).await.map_err(|e| {
            tracing::error!("Failed to create post: {}", e);
            DomainError::from(e)
        })?;

        Ok(post)
    }

    async fn insert_many(&self, new_posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        if new_posts.is_empty() {
            return Ok(Vec::new());
        }

        let posts: Vec<Post> = new_posts.into_iter().map(Post::new).collect();

        self.collection.insert_many(&posts).await.map_err(|e| {
            tracing::error!("Failed to insert {} posts: {}", posts.len(), e);
            DomainError::from(e)
        })?;

        Ok(posts)
    }

    async fn find_one(&self) -> Result<Option<Post>, DomainError> {
        Ok(self.collection.find_one(doc! {}).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self.collection.find_one(doc! { "_id": oid }).await?)
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        let posts = self
            .collection
            .find(doc! {})
            .await?
            .try_collect::<Vec<Post>>()
            .await?;

        Ok(posts)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn update_by_id(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        // `$set` with an empty document is rejected by the server
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }

        let set = patch.to_set_document()?;

        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": oid }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update post {}: {}", id, e);
                DomainError::from(e)
            })?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        let result = self
            .collection
            .delete_one(doc! { "_id": oid })
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete post {}: {}", id, e);
                DomainError::from(e)
            })?;

        Ok(result.deleted_count > 0)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        tracing::warn!("Dropping collection {}", POSTS_COLLECTION);
        self.collection.drop().await?;
        Ok(())
    }
}
