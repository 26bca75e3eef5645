use std::fmt::Display;

use chrono::{DateTime, TimeZone, Timelike};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::access::dto::{AccessEvent, AccessStatus};
use crate::directory::handler::UserDirectory;
use crate::helpers::utils::{avatar_url, format_clock, format_day};

pub const UNKNOWN_SUBJECT: &str = "Usuario Desconocido";
pub const MOCK_NAMES: [&str; 5] = [
    "Ana Torres",
    "Carlos Gomez",
    "Sofia Rossi",
    "Luis Fernandez",
    UNKNOWN_SUBJECT,
];

/// Subject that sometimes shows up after hours.
pub const LATE_SUBJECT: &str = "Carlos Gomez";
pub const LATE_PROBABILITY: f64 = 0.3;
pub const LATE_HOUR: u32 = 19;

/// Synthesizes access attempts for the kiosk without any sensor input.
pub struct MockEventGenerator {
    rng: StdRng,
    sequence: u64,
}

impl MockEventGenerator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Same seed and same clock readings give the same events.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self { rng, sequence: 0 }
    }

    pub fn next_event<Tz>(&mut self, now: DateTime<Tz>, directory: &UserDirectory) -> AccessEvent
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let name = MOCK_NAMES
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(UNKNOWN_SUBJECT);

        let status = if name == UNKNOWN_SUBJECT {
            AccessStatus::Denied
        } else {
            AccessStatus::Granted
        };

        let is_late_attempt = name == LATE_SUBJECT && self.rng.gen_bool(LATE_PROBABILITY);
        let event_time = if is_late_attempt {
            now.with_hour(LATE_HOUR).unwrap_or_else(|| {
                log::warn!(
                    "{}:00 does not exist on {}, keeping the current time for {}",
                    LATE_HOUR,
                    format_day(&now),
                    name
                );
                now.clone()
            })
        } else {
            now.clone()
        };

        let subject_id = if name == UNKNOWN_SUBJECT {
            None
        } else {
            directory.find_by_name(name).map(|u| u.id.clone())
        };

        self.sequence += 1;
        let millis = now.timestamp_millis().max(0) as u64;

        AccessEvent {
            id: millis * 1000 + self.sequence % 1000,
            name: name.to_string(),
            time: format_clock(&event_time),
            date: format_day(&now),
            status,
            avatar: avatar_url(name),
            subject_id,
        }
    }
}

impl Default for MockEventGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::compliance::{find_subject, is_late};
    use crate::access::history::AccessLog;
    use chrono::{Duration, Utc};

    fn morning() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 10, 15, 30).unwrap()
    }

    #[test]
    fn test_status_follows_name() {
        let directory = UserDirectory::with_default_roster();
        let mut generator = MockEventGenerator::seeded(7);

        for _ in 0..200 {
            let event = generator.next_event(morning(), &directory);
            assert!(MOCK_NAMES.contains(&event.name.as_str()));
            if event.name == UNKNOWN_SUBJECT {
                assert_eq!(event.status, AccessStatus::Denied);
                assert!(event.subject_id.is_none());
            } else {
                assert_eq!(event.status, AccessStatus::Granted);
                assert!(event.subject_id.is_some());
            }
        }
    }

    #[test]
    fn test_only_late_subject_is_shifted() {
        let directory = UserDirectory::with_default_roster();
        let mut generator = MockEventGenerator::seeded(11);
        let mut late_seen = 0;

        for _ in 0..500 {
            let event = generator.next_event(morning(), &directory);
            assert_eq!(event.date, "16/10/2026");
            if event.time == "19:15:30" {
                assert_eq!(event.name, LATE_SUBJECT);
                late_seen += 1;
            } else {
                assert_eq!(event.time, "10:15:30");
            }
        }

        // ~500 * 1/5 * 0.3 = 30 expected
        assert!(late_seen > 5 && late_seen < 80, "late_seen = {}", late_seen);
    }

    /// Zone where the late hour is skipped, as on a daylight-saving jump.
    #[derive(Debug, Clone, Copy)]
    struct SkipsLateHour;

    impl TimeZone for SkipsLateHour {
        type Offset = chrono::FixedOffset;

        fn from_offset(_offset: &Self::Offset) -> Self {
            SkipsLateHour
        }

        fn offset_from_local_date(
            &self,
            _local: &chrono::NaiveDate,
        ) -> chrono::LocalResult<Self::Offset> {
            chrono::LocalResult::Single(chrono::FixedOffset::east_opt(0).unwrap())
        }

        fn offset_from_local_datetime(
            &self,
            local: &chrono::NaiveDateTime,
        ) -> chrono::LocalResult<Self::Offset> {
            if local.hour() == LATE_HOUR {
                chrono::LocalResult::None
            } else {
                chrono::LocalResult::Single(chrono::FixedOffset::east_opt(0).unwrap())
            }
        }

        fn offset_from_utc_date(&self, _utc: &chrono::NaiveDate) -> Self::Offset {
            chrono::FixedOffset::east_opt(0).unwrap()
        }

        fn offset_from_utc_datetime(&self, _utc: &chrono::NaiveDateTime) -> Self::Offset {
            chrono::FixedOffset::east_opt(0).unwrap()
        }
    }

    #[test]
    fn test_missing_late_hour_keeps_current_time() {
        let directory = UserDirectory::with_default_roster();
        let mut generator = MockEventGenerator::seeded(11);
        let now = morning().with_timezone(&SkipsLateHour);
        let mut late_subject_seen = 0;

        for _ in 0..500 {
            let event = generator.next_event(now, &directory);
            assert_eq!(event.time, "10:15:30");
            if event.name == LATE_SUBJECT {
                late_subject_seen += 1;
            }
        }

        assert!(late_subject_seen > 0);
    }

    #[test]
    fn test_seeded_generators_agree() {
        let directory = UserDirectory::with_default_roster();
        let mut a = MockEventGenerator::seeded(2026);
        let mut b = MockEventGenerator::seeded(2026);

        for step in 0..50 {
            let now = morning() + Duration::seconds(step * 8);
            assert_eq!(a.next_event(now, &directory), b.next_event(now, &directory));
        }
    }

    #[test]
    fn test_ids_are_unique_within_a_tick() {
        let directory = UserDirectory::with_default_roster();
        let mut generator = MockEventGenerator::seeded(1);
        let first = generator.next_event(morning(), &directory);
        let second = generator.next_event(morning(), &directory);
        assert_ne!(first.id, second.id);
    }

    fn count_late(seed: u64) -> usize {
        let directory = UserDirectory::with_default_roster();
        let mut generator = MockEventGenerator::seeded(seed);
        let mut log = AccessLog::default();
        let mut late = 0;

        for step in 0..100 {
            let now = morning() + Duration::seconds(step * 8);
            let event = generator.next_event(now, &directory);
            if is_late(&event, find_subject(&event, directory.list())) {
                late += 1;
            }
            log.push(event);
        }

        assert_eq!(log.len(), 50);
        late
    }

    #[test]
    fn test_hundred_events_reproducible_late_count() {
        for seed in [0, 42, 9000] {
            assert_eq!(count_late(seed), count_late(seed));
        }
    }
}
