//! HTTP endpoint handlers.

pub mod input;
pub mod system;
