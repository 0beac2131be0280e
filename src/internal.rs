pub mod auth;
pub mod client;
pub mod config;
pub mod entrance;
pub mod error;
pub mod remote_file;
pub mod webdav;
