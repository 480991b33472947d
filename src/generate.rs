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

//! Prompt templates for card generation, and the parser that turns the
//! model's pipe-separated output lines back into cards.

/// A candidate card parsed from the model's output.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedCard {
    pub front: String,
    pub back: String,
    /// An example sentence, if the model supplied one.
    pub example: Option<String>,
}

impl GeneratedCard {
    /// The text to put on the card's front. Example sentences ride along
    /// under the headword.
    pub fn front_text(&self) -> String {
        match &self.example {
            Some(example) => format!("{}\nExample: {}", self.front, example),
            None => self.front.clone(),
        }
    }
}

pub fn vocabulary_prompt(language: &str, topic: &str, count: usize) -> String {
    format!(
        "Generate {count} vocabulary words or phrases in {language} related to the topic \"{topic}\".\n\
         For each word or phrase, provide:\n\
         1. The word or phrase in {language}\n\
         2. Its English translation\n\
         3. A brief example sentence in {language}\n\
         Format each entry as: \"{language} word/phrase | English translation | Example sentence\""
    )
}

pub fn grammar_prompt(language: &str, grammar_point: &str, count: usize) -> String {
    format!(
        "Create {count} grammar exercise flashcards for {language} focusing on \"{grammar_point}\".\n\
         For each flashcard, provide:\n\
         1. A sentence in English that tests the grammar point\n\
         2. The correct translation in {language}\n\
         Format each entry as: \"English sentence | Correct {language} translation\""
    )
}

/// Parse pipe-separated card lines out of the model's response.
///
/// Models pad their answers with prose, so only lines containing a `|`
/// separator are considered. Lines with a blank front or back are skipped,
/// never fatal.
pub fn parse_generated_cards(response: &str) -> Vec<GeneratedCard> {
    let mut cards = Vec::new();
    for line in response.lines() {
        if !line.contains('|') {
            continue;
        }
        let parts: Vec<&str> = line.split('|').map(str::trim).collect();
        if parts.len() < 2 || parts[0].is_empty() || parts[1].is_empty() {
            log::debug!("Skipping improperly formatted line: {line}");
            continue;
        }
        let example = parts
            .get(2)
            .filter(|example| !example.is_empty())
            .map(|example| example.to_string());
        cards.push(GeneratedCard {
            front: parts[0].to_string(),
            back: parts[1].to_string(),
            example,
        });
    }
    cards
}
