//! Face registry service library
//!
//! Registers faces under a name and identifies unknown faces by the nearest
//! stored embedding.

pub mod config;
pub mod engine;
pub mod service;
pub mod storage;
pub mod api;
pub mod utils;

pub use config::Config;
