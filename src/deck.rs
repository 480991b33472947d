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

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Error;
use crate::error::Fallible;
use crate::error::fail;
use crate::sm2::Quality;
use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// A named, ordered collection of cards.
///
/// The deck exclusively owns its cards, and one session holds the only
/// reference to the deck for the duration of a run. Persistence is a
/// whole-file overwrite of `<name>.json`, so there must be no concurrent
/// writers.
pub struct Deck {
    name: String,
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Append a new card with default scheduling state.
    ///
    /// Blank fronts and backs are rejected; duplicates are allowed.
    pub fn add_card(&mut self, front: &str, back: &str) -> Fallible<()> {
        let front = front.trim();
        let back = back.trim();
        if front.is_empty() {
            return fail("card front must not be empty.");
        }
        if back.is_empty() {
            return fail("card back must not be empty.");
        }
        self.cards.push(Card::new(front, back));
        Ok(())
    }

    /// The first card in insertion order that is due at `now`.
    ///
    /// This is a linear scan. Decks reviewed interactively are small enough
    /// that a queue keyed on the due time would not pay for itself.
    pub fn next_due(&self, now: Timestamp) -> Option<&Card> {
        self.cards.iter().find(|card| card.is_due(now))
    }

    pub fn next_due_index(&self, now: Timestamp) -> Option<usize> {
        self.cards.iter().position(|card| card.is_due(now))
    }

    /// Review the card at `index` and reschedule it.
    pub fn review_card(&mut self, index: usize, quality: Quality, now: Timestamp) -> Fallible<()> {
        match self.cards.get_mut(index) {
            Some(card) => {
                card.review(quality, now);
                Ok(())
            }
            None => fail("no card at the given index."),
        }
    }

    pub fn file_path(directory: &Path, name: &str) -> PathBuf {
        directory.join(format!("{name}.json"))
    }

    /// Persist the deck, overwriting `<directory>/<name>.json`.
    pub fn save(&self, directory: &Path) -> Fallible<()> {
        let path = Self::file_path(directory, &self.name);
        log::debug!("Saving {} cards to {}.", self.cards.len(), path.display());
        let json = serde_json::to_string_pretty(&self.cards)
            .map_err(|e| Error::Storage(format!("could not serialize deck {}: {e}", self.name)))?;
        fs::write(&path, json)
            .map_err(|e| Error::Storage(format!("could not write {}: {e}", path.display())))?;
        Ok(())
    }

    /// Load a deck by name. A missing file is an empty deck, not an error.
    pub fn load(directory: &Path, name: &str) -> Fallible<Self> {
        let path = Self::file_path(directory, name);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("No deck file at {}, starting empty.", path.display());
                return Ok(Self::new(name));
            }
            Err(e) => {
                return Err(Error::Storage(format!(
                    "could not read {}: {e}",
                    path.display()
                )));
            }
        };
        let cards: Vec<Card> = serde_json::from_str(&data).map_err(|e| {
            Error::Storage(format!("deck file {} is corrupt: {e}", path.display()))
        })?;
        log::debug!("Loaded {} cards from {}.", cards.len(), path.display());
        Ok(Self {
            name: name.to_string(),
            cards,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_add_card_rejects_blank_fields() {
        let mut deck = Deck::new("french");
        assert!(deck.add_card("", "hello").is_err());
        assert!(deck.add_card("bonjour", "   ").is_err());
        assert!(deck.is_empty());
        assert!(deck.add_card("bonjour", "hello").is_ok());
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_duplicates_are_allowed() {
        let mut deck = Deck::new("french");
        deck.add_card("bonjour", "hello").unwrap();
        deck.add_card("bonjour", "hello").unwrap();
        assert_eq!(deck.len(), 2);
    }

    #[test]
    fn test_next_due_is_earliest_inserted() {
        let now = Timestamp::now();
        let mut deck = Deck::new("french");
        deck.add_card("un", "one").unwrap();
        deck.add_card("deux", "two").unwrap();
        deck.add_card("trois", "three").unwrap();
        // Push the first card into the future; the second and third stay due.
        deck.cards[0].next_review = now.plus_days(3);
        let due = deck.next_due(now).unwrap();
        assert_eq!(due.front, "deux");
        assert_eq!(deck.next_due_index(now), Some(1));
    }

    #[test]
    fn test_next_due_none_when_nothing_is_due() {
        let now = Timestamp::now();
        let mut deck = Deck::new("french");
        assert!(deck.next_due(now).is_none());
        deck.add_card("un", "one").unwrap();
        deck.cards[0].next_review = now.plus_days(1);
        assert!(deck.next_due(now).is_none());
    }

    #[test]
    fn test_review_reschedules_in_place() -> Fallible<()> {
        let now = Timestamp::now();
        let mut deck = Deck::new("french");
        deck.add_card("un", "one")?;
        deck.review_card(0, Quality::new(4)?, now)?;
        assert_eq!(deck.cards()[0].repetitions, 1);
        assert!(deck.next_due(now).is_none());
        assert!(deck.review_card(7, Quality::new(4)?, now).is_err());
        Ok(())
    }

    #[test]
    fn test_save_load_round_trip() -> Fallible<()> {
        let dir = tempdir()?;
        let now = Timestamp::now();
        let mut deck = Deck::new("french");
        deck.add_card("bonjour", "hello")?;
        deck.add_card("chat", "cat")?;
        deck.review_card(0, Quality::new(3)?, now)?;
        deck.save(dir.path())?;

        let loaded = Deck::load(dir.path(), "french")?;
        assert_eq!(loaded.name(), "french");
        assert_eq!(loaded.cards(), deck.cards());
        Ok(())
    }

    #[test]
    fn test_load_missing_file_is_an_empty_deck() -> Fallible<()> {
        let dir = tempdir()?;
        let deck = Deck::load(dir.path(), "nonexistent")?;
        assert_eq!(deck.name(), "nonexistent");
        assert!(deck.is_empty());
        Ok(())
    }

    #[test]
    fn test_load_corrupt_file_is_a_storage_error() -> Fallible<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("broken.json"), "not json at all")?;
        let result = Deck::load(dir.path(), "broken");
        assert!(matches!(result, Err(Error::Storage(_))));
        Ok(())
    }
}
