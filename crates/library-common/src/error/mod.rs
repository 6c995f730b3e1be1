//! Error types and response codes

mod app_error;
pub mod codes;

pub use app_error::{AppError, AppResult};
