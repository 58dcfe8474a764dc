mod inserted_timeline_item_entity;

pub use inserted_timeline_item_entity::*;
