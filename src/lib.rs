pub mod client;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod export;
pub mod handler;
pub mod model;
pub mod pipeline;
pub mod tracing;
pub mod utils;

pub use error::Result;
