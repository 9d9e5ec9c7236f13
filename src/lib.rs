pub mod config;
pub mod main_module;
pub mod shared;
pub mod tasks;
pub mod tests;
pub mod urls;
pub mod web_server;
