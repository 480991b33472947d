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

use serde::Deserialize;
use serde::Serialize;

use crate::sm2::INITIAL_EASINESS;
use crate::sm2::Quality;
use crate::sm2::next_easiness;
use crate::sm2::next_interval;
use crate::types::timestamp::Timestamp;

/// A single learnable fact: a prompt side, an answer side, and the
/// scheduling state that decides when the card next comes up for review.
///
/// Field names are serialized in camelCase so deck files keep the layout
/// the original JSON decks used.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub front: String,
    pub back: String,
    /// How easy this card has been historically. Higher means longer gaps
    /// between reviews. Never falls below 1.3.
    pub easiness: f64,
    /// Days until the next review after the current repetition streak.
    /// Zero before the first successful review.
    pub interval: u32,
    /// Consecutive successful reviews. Resets to zero on a fail.
    pub repetitions: u32,
    /// The earliest instant the card is eligible for review again.
    pub next_review: Timestamp,
}

impl Card {
    /// A fresh card, due immediately.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            easiness: INITIAL_EASINESS,
            interval: 0,
            repetitions: 0,
            next_review: Timestamp::now(),
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review <= now
    }

    /// Apply a review outcome and reschedule the card.
    ///
    /// A pass extends the streak and grows the interval; a fail resets the
    /// streak and brings the card back tomorrow. The easiness factor is
    /// updated either way, and the card is always rescheduled relative to
    /// `now`, even on a fail.
    pub fn review(&mut self, quality: Quality, now: Timestamp) {
        self.easiness = next_easiness(self.easiness, quality);
        if quality.is_pass() {
            self.interval = next_interval(self.repetitions, self.easiness, self.interval);
            self.repetitions += 1;
        } else {
            self.repetitions = 0;
            self.interval = 1;
        }
        self.next_review = now.plus_days(self.interval as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_fresh_card_defaults() {
        let card = Card::new("bonjour", "hello");
        assert_eq!(card.easiness, 2.5);
        assert_eq!(card.interval, 0);
        assert_eq!(card.repetitions, 0);
        assert!(card.is_due(Timestamp::now()));
    }

    #[test]
    fn test_first_two_passes() -> Fallible<()> {
        let now = Timestamp::now();
        let mut card = Card::new("bonjour", "hello");

        card.review(Quality::new(4)?, now);
        assert_eq!(card.repetitions, 1);
        assert_eq!(card.interval, 1);
        // At quality 4 the penalty term exactly cancels the 0.1 bonus.
        assert!((card.easiness - 2.5).abs() < 1e-9);
        assert_eq!(card.next_review, now.plus_days(1));

        card.review(Quality::new(5)?, now);
        assert_eq!(card.repetitions, 2);
        assert_eq!(card.interval, 6);
        assert!(card.easiness > 2.5);
        assert_eq!(card.next_review, now.plus_days(6));
        Ok(())
    }

    #[test]
    fn test_fail_resets_the_streak() -> Fallible<()> {
        let now = Timestamp::now();
        let mut card = Card::new("bonjour", "hello");
        card.review(Quality::new(5)?, now);
        card.review(Quality::new(5)?, now);
        card.review(Quality::new(4)?, now);
        assert_eq!(card.repetitions, 3);

        let easiness_before = card.easiness;
        card.review(Quality::new(1)?, now);
        assert_eq!(card.repetitions, 0);
        assert_eq!(card.interval, 1);
        assert_eq!(card.next_review, now.plus_days(1));
        assert!(card.easiness < easiness_before);
        assert!(card.easiness >= 1.3);
        Ok(())
    }

    #[test]
    fn test_repeated_blackouts_floor_easiness() -> Fallible<()> {
        let now = Timestamp::now();
        let mut card = Card::new("bonjour", "hello");
        for _ in 0..10 {
            card.review(Quality::new(0)?, now);
        }
        assert_eq!(card.easiness, 1.3);
        Ok(())
    }

    #[test]
    fn test_serde_round_trip() -> Fallible<()> {
        let now = Timestamp::now();
        let mut card = Card::new("bonjour", "hello");
        card.review(Quality::new(4)?, now);
        let json = serde_json::to_string(&card).unwrap();
        // The persisted layout uses camelCase field names.
        assert!(json.contains("nextReview"));
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
        Ok(())
    }
}
