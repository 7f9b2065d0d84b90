#![deny(rust_2018_idioms)]

pub mod commands;
pub mod config;
pub mod permissions;
pub mod player;
pub mod registry;
pub mod server;
pub mod store;
