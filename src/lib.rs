pub mod app;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod host_table;
pub mod invocation;
pub mod listing;
pub mod runner;
pub mod users;
