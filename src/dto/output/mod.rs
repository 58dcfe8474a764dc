mod comment;
mod notification;
mod timeline_item;

pub use comment::*;
pub use notification::*;
pub use timeline_item::*;
