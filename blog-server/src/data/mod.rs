pub mod memory_repository;
pub mod post_repository;

pub use memory_repository::InMemoryPostRepository;
pub use post_repository::{MongoPostRepository, PostRepository};
