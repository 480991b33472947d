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

//! lexideck: an AI-assisted language-learning flashcard CLI.
//!
//! This library provides:
//! - The SM-2 spaced repetition scheduling arithmetic
//! - Card and deck state, with JSON persistence
//! - A client for a local text generation endpoint, used to draft new
//!   vocabulary and grammar cards
//! - The interactive review session

pub mod cli;
pub mod deck;
pub mod error;
pub mod generate;
pub mod llm;
pub mod session;
pub mod sm2;
pub mod types;

// Re-exports for convenience
pub use deck::Deck;
pub use error::{Error, Fallible, fail};
pub use sm2::Quality;
pub use types::card::Card;
pub use types::timestamp::Timestamp;
