use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Not found")]
    NotFound,

    #[error("Not signed in")]
    Unauthorized,

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("Invalid location: {0}")]
    Location(String),
}
