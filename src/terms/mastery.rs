//! Mastery rule
//!
//! A term's mastery level is a pure function of its cumulative study counts:
//!
//! | level    | accuracy | times studied |
//! |----------|----------|---------------|
//! | mastered | >= 90%   | >= 5          |
//! | familiar | >= 70%   | >= 3          |
//! | learning | any      | >= 1          |
//! | new      | -        | 0             |
//!
//! Thresholds are inclusive and accuracy covers the full history.

use super::models::MasteryLevel;

const MASTERED_ACCURACY: f64 = 0.90;
const MASTERED_MIN_STUDIES: u32 = 5;
const FAMILIAR_ACCURACY: f64 = 0.70;
const FAMILIAR_MIN_STUDIES: u32 = 3;

/// Derive the mastery level from cumulative counts
pub fn mastery_level(times_studied: u32, times_correct: u32) -> MasteryLevel {
    let accuracy = if times_studied == 0 {
        0.0
    } else {
        times_correct as f64 / times_studied as f64
    };

    if accuracy >= MASTERED_ACCURACY && times_studied >= MASTERED_MIN_STUDIES {
        MasteryLevel::Mastered
    } else if accuracy >= FAMILIAR_ACCURACY && times_studied >= FAMILIAR_MIN_STUDIES {
        MasteryLevel::Familiar
    } else if times_studied >= 1 {
        MasteryLevel::Learning
    } else {
        MasteryLevel::New
    }
}
