//! Consecutive-day streaks.

use std::collections::BTreeSet;

use jiff::civil::Date;

/// Days in a row with activity, walking back from `as_of` until the first
/// empty day.
pub fn current_streak(active_days: &BTreeSet<Date>, as_of: Date) -> u32 {
    let mut streak = 0;
    let mut cursor = as_of;
    while active_days.contains(&cursor) {
        streak += 1;
        match cursor.yesterday() {
            Ok(previous) => cursor = previous,
            Err(_) => break,
        }
    }
    streak
}

/// Longest run of consecutive active days.
pub fn longest_streak(active_days: &BTreeSet<Date>) -> u32 {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<Date> = None;
    for day in active_days {
        current = match previous {
            Some(prev) if prev.tomorrow().is_ok_and(|next| next == *day) => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(*day);
    }
    longest
}
