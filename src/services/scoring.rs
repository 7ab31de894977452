use crate::types::{MAX_STARS, MIN_STARS};

/// Stars for one answer: 3 on the first try, 2 on the second, 1 afterwards, 0 when wrong.
pub fn stars(attempt_number: i32, is_correct: bool) -> i32 {
    if !is_correct {
        return MIN_STARS;
    }

    match attempt_number {
        1 => MAX_STARS,
        2 => 2,
        _ => 1,
    }
}
