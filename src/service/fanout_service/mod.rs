mod event_dispatcher;
mod fanout_service;
mod fanout_service_impl;
mod mentions;

pub use event_dispatcher::*;
pub use fanout_service::*;
pub use fanout_service_impl::*;
pub use mentions::collect_mentions;
