//! Infrastructure layer: repository implementations, history files and wire DTOs.

pub mod dto;
pub mod history;
pub mod repository;
