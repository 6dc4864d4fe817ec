//! Utility functions

pub mod math;
pub mod net;
