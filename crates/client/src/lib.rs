pub mod api;
pub mod dashboard;
pub mod detail;
pub mod directory;
pub mod error;
pub mod location;
pub mod render;
pub mod session;
pub mod traits;
pub mod verification;

#[cfg(test)]
mod testing;

pub use api::ApiClient;
pub use error::{ClientError, Result};
pub use traits::DirectoryBackend;
