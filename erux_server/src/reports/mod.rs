pub mod delivery;
pub mod dto;
pub mod handler;
