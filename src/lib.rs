pub mod backend;
pub mod chat;
pub mod config;
pub mod session;
pub mod web_server;
