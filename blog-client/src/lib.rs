//! Typed HTTP client for the blog post API.

pub mod error;
pub mod http_client;
pub mod models;

pub use error::BlogClientError;
pub use http_client::HttpClient;
pub use models::{Author, AuthorName, CreatePostRequest, Post, UpdatePostRequest};
