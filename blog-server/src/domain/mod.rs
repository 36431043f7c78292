pub mod error;
pub mod post;

pub use error::DomainError;
pub use post::{Author, NewPost, Post, PostPatch};
