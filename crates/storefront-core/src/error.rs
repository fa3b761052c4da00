use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorefrontError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid user id '{0}': must be an integer")]
    InvalidUserId(String),

    #[error("user not found: {0}")]
    UserNotFound(i32),

    #[error("user service unavailable: {0}")]
    Upstream(String),

    #[error("user service deadline exceeded")]
    Timeout,

    #[error("user service returned an unreadable payload: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
