// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The SM-2 scheduling arithmetic: pure functions, no state, no failure.
//!
//! The constants here are the classic published values. Do not tune them:
//! every downstream scheduling expectation is pinned to these exact numbers.

use crate::error::Fallible;
use crate::error::fail;

/// The easiness factor assigned to a card that has never been reviewed.
pub const INITIAL_EASINESS: f64 = 2.5;

/// The hard floor for the easiness factor.
pub const MIN_EASINESS: f64 = 1.3;

/// A reviewer's recall rating: 0 is a total blackout, 5 is perfect recall.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Quality(u8);

impl Quality {
    pub fn new(value: u8) -> Fallible<Self> {
        if value > 5 {
            return fail(&format!(
                "quality rating {value} is out of range: must be between 0 and 5."
            ));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// A rating of 3 or above counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= 3
    }
}

/// The number of days until the next review after a successful one.
///
/// The first two successful reviews use fixed gaps of one and six days;
/// after that the previous interval is stretched by the easiness factor.
pub fn next_interval(repetitions: u32, easiness: f64, previous_interval: u32) -> u32 {
    match repetitions {
        0 => 1,
        1 => 6,
        _ => (previous_interval as f64 * easiness).round() as u32,
    }
}

/// The updated easiness factor after a review, floored at [`MIN_EASINESS`].
///
/// Perfect recall adds exactly 0.1; anything less subtracts an amount that
/// grows quadratically as the rating drops.
pub fn next_easiness(easiness: f64, quality: Quality) -> f64 {
    let q = quality.value() as f64;
    let updated = easiness + 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
    updated.max(MIN_EASINESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quality(value: u8) -> Quality {
        Quality::new(value).unwrap()
    }

    #[test]
    fn test_first_two_intervals_are_fixed() {
        for easiness in [1.3, 2.0, 2.5, 3.0] {
            for previous in [0, 1, 10, 100] {
                assert_eq!(next_interval(0, easiness, previous), 1);
                assert_eq!(next_interval(1, easiness, previous), 6);
            }
        }
    }

    #[test]
    fn test_later_intervals_scale_by_easiness() {
        assert_eq!(next_interval(2, 2.5, 6), 15);
        assert_eq!(next_interval(3, 1.3, 10), 13);
        // Rounds to nearest, not truncates: 6 * 2.58 = 15.48.
        assert_eq!(next_interval(2, 2.58, 6), 15);
        // 6 * 2.6 = 15.6.
        assert_eq!(next_interval(2, 2.6, 6), 16);
    }

    #[test]
    fn test_perfect_recall_adds_a_tenth() {
        let updated = next_easiness(2.5, quality(5));
        assert!((updated - 2.6).abs() < 1e-9);
    }

    #[test]
    fn test_blackout_is_the_steepest_decrease() {
        // 2.5 + 0.1 - 5 * (0.08 + 5 * 0.02) = 1.7.
        let updated = next_easiness(2.5, quality(0));
        assert!((updated - 1.7).abs() < 1e-9);
    }

    #[test]
    fn test_easiness_never_falls_below_floor() {
        for value in 0..=5 {
            for easiness in [1.3, 1.5, 2.0, 2.5] {
                assert!(next_easiness(easiness, quality(value)) >= MIN_EASINESS);
            }
        }
    }

    #[test]
    fn test_easiness_is_monotonic_in_quality() {
        for easiness in [1.3, 2.0, 2.5, 3.0] {
            for value in 1..=5 {
                let higher = next_easiness(easiness, quality(value));
                let lower = next_easiness(easiness, quality(value - 1));
                assert!(higher >= lower);
            }
        }
    }

    #[test]
    fn test_quality_rejects_out_of_range() {
        assert!(Quality::new(5).is_ok());
        assert!(Quality::new(6).is_err());
        assert!(Quality::new(255).is_err());
    }

    #[test]
    fn test_pass_threshold() {
        assert!(!quality(2).is_pass());
        assert!(quality(3).is_pass());
    }
}
