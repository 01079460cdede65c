pub mod client;
pub mod connection;
pub mod migrations;
mod record;
