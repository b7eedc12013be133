/// Current-streak calculation
///
/// The streak is the length of the unbroken run of consecutive calendar days
/// with a completion, ending at `today` or, when `today` has no completion
/// yet, at `today - 1`. The single grace step means a streak survives until
/// the current day is actually missed rather than resetting the moment
/// midnight passes; any gap earlier than that ends the run immediately.

use std::collections::HashSet;
use chrono::{Duration, NaiveDate};

/// Compute the current streak for one habit's completion dates
///
/// Pure and total: no side effects, and it cannot fail for any input. The
/// caller is responsible for passing one habit's dates only.
pub fn current_streak(completed: &[NaiveDate], today: NaiveDate) -> u32 {
    if completed.is_empty() {
        return 0;
    }

    let days: HashSet<NaiveDate> = completed.iter().copied().collect();

    // Grace step: applied at most once, and only for today itself.
    let mut cursor = today;
    if !days.contains(&cursor) {
        cursor = cursor - Duration::days(1);
    }

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = cursor - Duration::days(1);
    }

    streak
}
