use crate::models::{DayEntry, Person};
use crate::shuffle::shuffle_with;
use rand::Rng;

/// Entered texts with surrounding whitespace removed, so blank inputs count as "no gift".
pub fn clean_gift_texts(gifts: &[String]) -> Vec<String> {
    gifts.iter().map(|gift| gift.trim().to_string()).collect()
}

/// Current gift texts of `target`'s days, in calendar order.
pub fn gift_drafts(days: &[DayEntry], target: Person) -> Vec<String> {
    days.iter()
        .filter(|entry| entry.person == target)
        .map(|entry| entry.gift_content.clone())
        .collect()
}

pub fn assign_gifts(days: &[DayEntry], target: Person, gifts: &[String], shuffle: bool) -> Vec<DayEntry> {
    assign_gifts_with(days, target, gifts, shuffle, &mut rand::thread_rng())
}

/// Distributes `gifts` over `target`'s days in calendar order, optionally shuffled first.
///
/// Missing texts leave empty content; surplus texts are dropped. Other days
/// are returned unchanged.
pub fn assign_gifts_with<R: Rng + ?Sized>(
    days: &[DayEntry],
    target: Person,
    gifts: &[String],
    shuffle: bool,
    rng: &mut R,
) -> Vec<DayEntry> {
    let ordered = if shuffle {
        shuffle_with(gifts, rng)
    } else {
        gifts.to_vec()
    };
    let mut next = ordered.into_iter();

    days.iter()
        .map(|entry| {
            if entry.person != target {
                return entry.clone();
            }
            DayEntry {
                gift_content: next.next().unwrap_or_default(),
                ..entry.clone()
            }
        })
        .collect()
}
