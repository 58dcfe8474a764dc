mod error;
mod notifications_repository;
mod timeline_repository;

pub use error::*;
pub use notifications_repository::*;
pub use timeline_repository::*;
