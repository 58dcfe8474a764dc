pub mod background_tasks;
pub mod broker;
pub mod fanout_service;
pub mod notifications_service;
