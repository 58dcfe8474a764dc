mod inserted_timeline_item;

pub use inserted_timeline_item::*;
