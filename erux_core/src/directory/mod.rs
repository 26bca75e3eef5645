pub mod dto;
pub mod handler;
pub mod schedule;

pub use handler::{DirectoryError, UserDirectory};
