use crate::models::{DayEntry, Person, RevealPhase};
use crate::unlock::UnlockRule;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    #[error("day {0} does not exist")]
    UnknownDay(u8),
    #[error("day {0} cannot be opened yet")]
    Locked(u8),
    #[error("day {0} is already being revealed")]
    InProgress(u8),
}

/// What `Hidden -> Revealing` needs before it can settle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealStep {
    /// Existing gift or cached message is enough.
    Ready,
    NeedsMessage { person: Person, day: u8 },
}

pub fn phase_of(entry: &DayEntry, in_flight: bool) -> RevealPhase {
    if entry.is_opened {
        RevealPhase::Revealed
    } else if in_flight {
        RevealPhase::Revealing
    } else {
        RevealPhase::Hidden
    }
}

pub fn begin(entry: &DayEntry, rule: &UnlockRule, today: NaiveDate) -> Result<RevealStep, RevealError> {
    if entry.is_opened {
        return Ok(RevealStep::Ready);
    }
    if !rule.can_open(entry.day, today) {
        return Err(RevealError::Locked(entry.day));
    }
    if entry.has_content() {
        return Ok(RevealStep::Ready);
    }
    Ok(RevealStep::NeedsMessage {
        person: entry.person,
        day: entry.day,
    })
}

/// Settles the entry as `Revealed`. Returns whether anything changed.
///
/// A message is only cached on an entry with no gift and no prior message.
pub fn finish(entry: &mut DayEntry, message: Option<String>) -> bool {
    let mut changed = false;
    if let Some(message) = message {
        if !entry.has_content() {
            entry.generated_message = Some(message);
            changed = true;
        }
    }
    if !entry.is_opened {
        entry.is_opened = true;
        changed = true;
    }
    changed
}
