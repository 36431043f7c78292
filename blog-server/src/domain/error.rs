use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl DomainError {
    pub fn to_status_code(&self) -> u16 {
        match self {
            Self::PostNotFound(_) => 404,
            Self::ValidationError(_) => 400,
            Self::StoreError(_) => 500,
        }
    }
}

impl From<mongodb::error::Error> for DomainError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::StoreError(err.to_string())
    }
}

impl From<bson::ser::Error> for DomainError {
    fn from(err: bson::ser::Error) -> Self {
        Self::StoreError(err.to_string())
    }
}
