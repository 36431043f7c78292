use super::post_repository::{parse_id, PostRepository};
use crate::domain::{DomainError, NewPost, Post, PostPatch};
use async_trait::async_trait;
use bson::oid::ObjectId;
use indexmap::IndexMap;
use tokio::sync::RwLock;

/// Process-local post store. Keeps insertion order for listing.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<IndexMap<ObjectId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, new_post: NewPost) -> Result<Post, DomainError> {
        let post = Post::new(new_post);
        self.posts.write().await.insert(post.id, post.clone());
        Ok(post)
    }

    async fn insert_many(&self, new_posts: Vec<NewPost>) -> Result<Vec<Post>, DomainError> {
        let posts: Vec<Post> = new_posts.into_iter().map(Post::new).collect();

        let mut store = self.posts.write().await;
        for post in &posts {
            store.insert(post.id, post.clone());
        }

        Ok(posts)
    }

    async fn find_one(&self) -> Result<Option<Post>, DomainError> {
        Ok(self.posts.read().await.values().next().cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        Ok(self.posts.read().await.get(&oid).cloned())
    }

    async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.read().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.posts.read().await.len() as u64)
    }

    async fn update_by_id(&self, id: &str, patch: PostPatch) -> Result<Option<Post>, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(None);
        };

        let mut store = self.posts.write().await;
        Ok(store.get_mut(&oid).map(|post| {
            post.apply(patch);
            post.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, DomainError> {
        let Some(oid) = parse_id(id) else {
            return Ok(false);
        };

        Ok(self.posts.write().await.shift_remove(&oid).is_some())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.posts.write().await.clear();
        Ok(())
    }
}
