#![allow(unexpected_cfgs)]

// Public modules that tests can access
pub mod controllers;
pub mod error;
pub mod http_models;
pub mod middleware;
pub mod models;
pub mod optimizer;

// Public but internal modules (needed for tests and main)
pub mod global;
pub mod log;

#[cfg(not(tarpaulin_include))]
pub mod swagger;

// Re-export commonly used items
pub use error::ApiResult;
