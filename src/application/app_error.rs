use thiserror::Error;

/// Errors this crate can produce.
///
/// Everything here surfaces at plan construction (deserialization) time. The
/// comparison builder itself never fails: unknown catalog keys and missing
/// limits resolve to defaults instead.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid plan slug: {0}")]
    InvalidSlug(String),
}

pub type AppResult<T> = Result<T, AppError>;
