//! Data Transfer Objects for the REST API.

pub mod time_dto;

pub use time_dto::{CurrentTimeResponse, MessageResponse, RequestLogsResponse};
