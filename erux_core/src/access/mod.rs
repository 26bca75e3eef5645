pub mod compliance;
pub mod dto;
pub mod history;

pub use dto::{AccessEvent, AccessStatus, EmergencyEvent};
pub use history::{AccessLog, EmergencyLog};
