//! API module - REST handlers

pub mod rest;
pub mod dto;
pub mod error;

pub use rest::{create_rest_router, AppState};
