use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const ALWAYS_ALLOWED_LABEL: &str = "Acceso Total";
pub const UNRESTRICTED_LABEL: &str = "Temporal";
pub const DEFAULT_SCHEDULE_LABEL: &str = "Diurno (8:00-18:00)";

static HOUR_WINDOW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{1,2}):[0-9]{2}-([0-9]{1,2}):[0-9]{2}")
        .expect("hour window pattern is valid")
});

/// Access policy of a registered user, parsed once from its label.
///
/// On the wire the policy is always its original label, e.g.
/// `"Diurno (8:00-18:00)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SchedulePolicy {
    AlwaysAllowed,
    Unrestricted,
    HourWindow { label: String, start: u32, end: u32 },
    Unspecified(String),
}

impl SchedulePolicy {
    pub fn parse(label: &str) -> Self {
        match label {
            ALWAYS_ALLOWED_LABEL => SchedulePolicy::AlwaysAllowed,
            UNRESTRICTED_LABEL => SchedulePolicy::Unrestricted,
            _ => match Self::window_bounds(label) {
                Some((start, end)) => SchedulePolicy::HourWindow {
                    label: label.to_string(),
                    start,
                    end,
                },
                None => SchedulePolicy::Unspecified(label.to_string()),
            },
        }
    }

    fn window_bounds(label: &str) -> Option<(u32, u32)> {
        let captures = HOUR_WINDOW.captures(label)?;
        let start = captures.get(1)?.as_str().parse::<u32>().ok()?;
        let end = captures.get(2)?.as_str().parse::<u32>().ok()?;
        Some((start, end))
    }

    pub fn label(&self) -> &str {
        match self {
            SchedulePolicy::AlwaysAllowed => ALWAYS_ALLOWED_LABEL,
            SchedulePolicy::Unrestricted => UNRESTRICTED_LABEL,
            SchedulePolicy::HourWindow { label, .. } => label,
            SchedulePolicy::Unspecified(label) => label,
        }
    }

    /// Whether an access at `hour` complies with the policy. Minutes are not
    /// considered and windows do not wrap midnight, so a window whose start
    /// is not before its end admits no hour at all.
    pub fn permits_hour(&self, hour: u32) -> bool {
        match self {
            SchedulePolicy::AlwaysAllowed
            | SchedulePolicy::Unrestricted
            | SchedulePolicy::Unspecified(_) => true,
            SchedulePolicy::HourWindow { start, end, .. } => hour >= *start && hour < *end,
        }
    }
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        SchedulePolicy::parse(DEFAULT_SCHEDULE_LABEL)
    }
}

impl From<String> for SchedulePolicy {
    fn from(label: String) -> Self {
        SchedulePolicy::parse(&label)
    }
}

impl From<SchedulePolicy> for String {
    fn from(policy: SchedulePolicy) -> Self {
        policy.label().to_string()
    }
}

impl fmt::Display for SchedulePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(SchedulePolicy::parse("Acceso Total"), SchedulePolicy::AlwaysAllowed);
        assert_eq!(SchedulePolicy::parse("Temporal"), SchedulePolicy::Unrestricted);
        // sentinels are exact labels
        assert_eq!(
            SchedulePolicy::parse("acceso total"),
            SchedulePolicy::Unspecified("acceso total".to_string())
        );
    }

    #[test]
    fn test_parse_hour_window_ignores_minutes() {
        assert_eq!(
            SchedulePolicy::parse("Diurno (8:00-18:00)"),
            SchedulePolicy::HourWindow {
                label: "Diurno (8:00-18:00)".to_string(),
                start: 8,
                end: 18,
            }
        );
        assert_eq!(
            SchedulePolicy::parse("Turno 07:45-15:30"),
            SchedulePolicy::HourWindow {
                label: "Turno 07:45-15:30".to_string(),
                start: 7,
                end: 15,
            }
        );
    }

    #[test]
    fn test_parse_malformed_is_unspecified() {
        for label in ["Diurno", "8-18", "8:00 - 18:00", "", "Nocturno (18h-8h)"] {
            assert_eq!(
                SchedulePolicy::parse(label),
                SchedulePolicy::Unspecified(label.to_string())
            );
        }
    }

    #[test]
    fn test_day_window_boundaries() {
        let policy = SchedulePolicy::parse("08:00-18:00");
        assert!(!policy.permits_hour(7));
        for hour in 8..=17 {
            assert!(policy.permits_hour(hour), "hour {} should comply", hour);
        }
        assert!(!policy.permits_hour(18));
        assert!(!policy.permits_hour(23));
    }

    #[test]
    fn test_overnight_window_does_not_wrap() {
        let policy = SchedulePolicy::parse("Nocturno (22:00-06:00)");
        for hour in [23, 2, 12] {
            assert!(!policy.permits_hour(hour), "hour {} should violate", hour);
        }
        let evening = SchedulePolicy::parse("Nocturno (18:00-8:00)");
        assert!((0..24).all(|hour| !evening.permits_hour(hour)));
    }

    #[test]
    fn test_empty_window_admits_nothing() {
        let policy = SchedulePolicy::parse("9:00-9:30");
        assert!((0..24).all(|hour| !policy.permits_hour(hour)));
    }

    #[test]
    fn test_open_policies_always_permit() {
        for policy in [
            SchedulePolicy::AlwaysAllowed,
            SchedulePolicy::Unrestricted,
            SchedulePolicy::Unspecified("Libre".to_string()),
        ] {
            assert!((0..24).all(|hour| policy.permits_hour(hour)));
        }
    }

    #[test]
    fn test_window_digits_are_ascii() {
        let label = "Turno \u{0668}:\u{0660}\u{0660}-\u{0661}\u{0668}:\u{0660}\u{0660} / 8:00-18:00";
        assert_eq!(
            SchedulePolicy::parse(label),
            SchedulePolicy::HourWindow {
                label: label.to_string(),
                start: 8,
                end: 18,
            }
        );
    }

    #[test]
    fn test_serde_uses_label() {
        let policy = SchedulePolicy::parse("Diurno (8:00-18:00)");
        let json = serde_json::to_string(&policy).unwrap();
        assert_eq!(json, "\"Diurno (8:00-18:00)\"");

        let back: SchedulePolicy = serde_json::from_str("\"Temporal\"").unwrap();
        assert_eq!(back, SchedulePolicy::Unrestricted);
    }
}
