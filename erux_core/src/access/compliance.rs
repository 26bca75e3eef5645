//! Late-arrival classification.
//!
//! An event is a violation when its hour falls outside the schedule window
//! of the registered user it belongs to. Anything that cannot be resolved
//! (no user, open policy, no window in the label, unreadable clock) is
//! compliant.

use super::dto::AccessEvent;
use crate::directory::dto::RegisteredUser;

/// Registered user an event belongs to. Events produced with a resolved
/// subject id are matched by id; older or external events fall back to the
/// display name.
pub fn find_subject<'a>(
    event: &AccessEvent,
    users: &'a [RegisteredUser],
) -> Option<&'a RegisteredUser> {
    match &event.subject_id {
        Some(id) => users.iter().find(|u| &u.id == id),
        None => users.iter().find(|u| u.name == event.name),
    }
}

pub fn is_late(event: &AccessEvent, user: Option<&RegisteredUser>) -> bool {
    let Some(user) = user else {
        return false;
    };

    match event.hour() {
        Some(hour) => !user.schedule.permits_hour(hour),
        None => false,
    }
}

/// Late arrivals among `events`, in the order given.
pub fn late_arrivals<'a, I>(events: I, users: &[RegisteredUser]) -> Vec<AccessEvent>
where
    I: IntoIterator<Item = &'a AccessEvent>,
{
    events
        .into_iter()
        .filter(|event| is_late(event, find_subject(event, users)))
        .cloned()
        .collect()
}
