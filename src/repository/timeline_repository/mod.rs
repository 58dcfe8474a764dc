mod dto;
mod entity;
mod timeline_repository;
mod timeline_repository_impl;

pub use dto::*;
pub use timeline_repository::*;
pub use timeline_repository_impl::*;
