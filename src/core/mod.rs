//! Core translation engine module

pub mod batch;
pub mod cache;
pub mod chain;
pub mod client;
pub mod config;
pub mod detector;
pub mod dictionary;
pub mod errors;
pub mod models;
pub mod rate_limiter;
pub mod timestamp;
