use std::time::{Duration, Instant};

pub const IDLE_PLACEHOLDER: &str = "Detectando...";
pub const DETECTION_HOLD: Duration = Duration::from_millis(2500);

/// Name shown on the kiosk info panel. A detected subject stays visible for
/// [`DETECTION_HOLD`], then the panel goes back to the idle placeholder.
#[derive(Debug, Clone)]
pub struct DetectionBanner {
    current: Option<(String, Instant)>,
    hold: Duration,
}

impl DetectionBanner {
    pub fn new(hold: Duration) -> Self {
        Self {
            current: None,
            hold,
        }
    }

    pub fn detect(&mut self, name: &str, at: Instant) {
        self.current = Some((name.to_string(), at));
    }

    pub fn current(&self, now: Instant) -> &str {
        match &self.current {
            Some((name, since)) if now.saturating_duration_since(*since) < self.hold => name,
            _ => IDLE_PLACEHOLDER,
        }
    }

    pub fn is_idle(&self, now: Instant) -> bool {
        self.current(now) == IDLE_PLACEHOLDER
    }
}

impl Default for DetectionBanner {
    fn default() -> Self {
        Self::new(DETECTION_HOLD)
    }
}
