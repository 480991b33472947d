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

//! The interactive session: a menu loop over one deck. The deck is saved
//! after every mutation, so quitting at any point loses nothing.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;
use std::path::Path;
use std::path::PathBuf;

use crate::deck::Deck;
use crate::error::Fallible;
use crate::generate::grammar_prompt;
use crate::generate::parse_generated_cards;
use crate::generate::vocabulary_prompt;
use crate::llm::LlmClient;
use crate::llm::LlmConfig;
use crate::sm2::Quality;
use crate::types::timestamp::Timestamp;

enum MenuChoice {
    Review,
    AddCard,
    GenerateVocabulary,
    GenerateGrammar,
    Exit,
}

pub async fn run(directory: PathBuf, deck_name: Option<String>, config: LlmConfig) -> Fallible<()> {
    let name = match deck_name {
        Some(name) => name,
        None => ask("Enter the name of your flashcard deck:")?,
    };
    let mut deck = Deck::load(&directory, &name)?;
    println!("Loaded deck: {} with {} cards.", deck.name(), deck.len());
    let client = LlmClient::new(config)?;
    loop {
        match read_menu_choice()? {
            MenuChoice::Review => review_cards(&mut deck, &directory)?,
            MenuChoice::AddCard => add_card(&mut deck, &directory)?,
            MenuChoice::GenerateVocabulary => {
                generate_vocabulary(&mut deck, &directory, &client).await?
            }
            MenuChoice::GenerateGrammar => {
                generate_grammar(&mut deck, &directory, &client).await?
            }
            MenuChoice::Exit => break,
        }
    }
    println!("Goodbye!");
    Ok(())
}

fn read_menu_choice() -> Fallible<MenuChoice> {
    println!();
    println!("--- Main Menu ---");
    println!("1. Review cards");
    println!("2. Add new card");
    println!("3. Generate vocabulary cards");
    println!("4. Generate grammar exercise cards");
    println!("5. Exit");
    loop {
        let input = ask("Choose an option:")?;
        match input.as_str() {
            "1" => return Ok(MenuChoice::Review),
            "2" => return Ok(MenuChoice::AddCard),
            "3" => return Ok(MenuChoice::GenerateVocabulary),
            "4" => return Ok(MenuChoice::GenerateGrammar),
            "5" => return Ok(MenuChoice::Exit),
            _ => println!("Invalid option. Please try again."),
        }
    }
}

/// Review due cards until none are left, saving after each one.
fn review_cards(deck: &mut Deck, directory: &Path) -> Fallible<()> {
    loop {
        let now = Timestamp::now();
        let index = match deck.next_due_index(now) {
            Some(index) => index,
            None => {
                println!("No cards due for review. Great job!");
                return Ok(());
            }
        };
        {
            let card = &deck.cards()[index];
            println!();
            println!("Front: {}", card.front);
            ask("Your answer (press Enter to see the back):")?;
            println!("Back: {}", card.back);
        }
        let quality = read_quality()?;
        deck.review_card(index, quality, now)?;
        deck.save(directory)?;
    }
}

fn read_quality() -> Fallible<Quality> {
    loop {
        let input = ask("Rate your recall (0-5, 0 = total blackout, 5 = perfect recall):")?;
        match input.parse::<u8>() {
            Ok(value) => match Quality::new(value) {
                Ok(quality) => return Ok(quality),
                Err(e) => println!("{e}"),
            },
            Err(_) => println!("Invalid input. Please enter a number between 0 and 5."),
        }
    }
}

fn add_card(deck: &mut Deck, directory: &Path) -> Fallible<()> {
    let front = ask("Enter the front of the card:")?;
    let back = ask("Enter the back of the card:")?;
    match deck.add_card(&front, &back) {
        Ok(()) => {
            deck.save(directory)?;
            println!("Card added successfully!");
        }
        Err(e) => println!("{e}"),
    }
    Ok(())
}

async fn generate_vocabulary(
    deck: &mut Deck,
    directory: &Path,
    client: &LlmClient,
) -> Fallible<()> {
    let language = ask("Enter the target language:")?;
    let topic = ask("Enter the vocabulary topic:")?;
    let count = read_count()?;
    let prompt = vocabulary_prompt(&language, &topic, count);
    generate_cards(deck, directory, client, &prompt, "vocabulary").await
}

async fn generate_grammar(deck: &mut Deck, directory: &Path, client: &LlmClient) -> Fallible<()> {
    let language = ask("Enter the target language:")?;
    let grammar_point = ask("Enter the grammar point to focus on:")?;
    let count = read_count()?;
    let prompt = grammar_prompt(&language, &grammar_point, count);
    generate_cards(deck, directory, client, &prompt, "grammar exercise").await
}

/// Ask the model for cards and add every well-formed one to the deck. A
/// failed generation leaves the deck untouched and keeps the session alive.
async fn generate_cards(
    deck: &mut Deck,
    directory: &Path,
    client: &LlmClient,
    prompt: &str,
    kind: &str,
) -> Fallible<()> {
    println!("Generating, this can take a while...");
    let response = match client.generate(prompt).await {
        Ok(response) => response,
        Err(e) => {
            println!("{e}");
            return Ok(());
        }
    };
    log::debug!("Generator output:\n{response}");
    let mut added = 0;
    for card in parse_generated_cards(&response) {
        if deck.add_card(&card.front_text(), &card.back).is_ok() {
            added += 1;
        }
    }
    deck.save(directory)?;
    println!("{added} {kind} cards added successfully!");
    Ok(())
}

fn read_count() -> Fallible<usize> {
    loop {
        let input = ask("How many cards do you want to generate?")?;
        match input.parse::<usize>() {
            Ok(count) if count > 0 => return Ok(count),
            _ => println!("Invalid input. Please enter a positive number."),
        }
    }
}

fn ask(question: &str) -> Fallible<String> {
    print!("{question} ");
    stdout().flush()?;
    let mut input = String::new();
    stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
