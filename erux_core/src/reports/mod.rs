pub mod dto;
pub mod handler;
pub mod schedule;

pub use schedule::{ReportFormat, ReportSchedule, ScheduleError, ScheduleRequest};
