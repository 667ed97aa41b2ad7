// src/api/handlers/mod.rs
mod health;
mod transpile;

pub use health::health_check;
pub use transpile::transpile;
