pub mod access;
pub mod assistant;
pub mod directory;
pub mod feed;
pub mod helpers;
pub mod reports;
