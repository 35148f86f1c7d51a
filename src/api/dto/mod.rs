//! Data Transfer Objects for request deserialization.

pub mod input_dto;

pub use input_dto::*;
