//! Monsters, battles between them, and the HTTP API around both.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod repository;
#[cfg(test)]
mod utils;
