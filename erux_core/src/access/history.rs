use std::collections::VecDeque;

use serde::Serialize;

use super::dto::{AccessEvent, EmergencyEvent};

pub const ACCESS_LOG_CAPACITY: usize = 50;

/// Newest-first access log (max 50).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessLog(VecDeque<AccessEvent>);

impl AccessLog {
    pub fn push(&mut self, event: AccessEvent) {
        self.0.push_front(event);
        self.0.truncate(ACCESS_LOG_CAPACITY); // drop oldest
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AccessEvent> {
        self.0.iter()
    }

    pub fn latest(&self, count: usize) -> impl Iterator<Item = &AccessEvent> {
        self.0.iter().take(count)
    }

    pub fn to_vec(&self) -> Vec<AccessEvent> {
        self.0.iter().cloned().collect()
    }
}

/// Newest-first, append-only list of declared emergencies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmergencyLog(Vec<EmergencyEvent>);

impl EmergencyLog {
    pub fn record(&mut self, event: EmergencyEvent) {
        self.0.insert(0, event);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_vec(&self) -> Vec<EmergencyEvent> {
        self.0.clone()
    }
}
