pub mod detection;
pub mod generator;

pub use detection::DetectionBanner;
pub use generator::MockEventGenerator;
