// src/lib.rs
pub mod config;
pub mod errors;
pub mod bundler;
pub mod transpiler;
pub mod client;
pub mod models;
pub mod banner;
pub mod api;
