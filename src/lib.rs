pub mod error;
pub mod models;
pub mod modules;
pub mod proxy;

pub use error::{AppError, AppResult};
