pub mod entities;
pub mod error;
pub mod health;
pub mod response;
pub mod zip;

pub use error::AppError;
