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

use std::io;

use thiserror::Error;

pub type Fallible<T> = Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied malformed input: an out-of-range quality rating,
    /// a blank card field, and the like. Reported before any state mutates.
    #[error("validation error: {0}")]
    Validation(String),
    /// Reading or writing persisted deck state failed for a reason other
    /// than the file not existing.
    #[error("storage error: {0}")]
    Storage(String),
    /// The text generation endpoint could not be reached, rejected the
    /// request, or returned an unreadable response.
    #[error("generation error: {0}")]
    Generation(String),
    /// Terminal input/output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Shorthand for failing with a validation error.
pub fn fail<T>(message: &str) -> Fallible<T> {
    Err(Error::Validation(message.to_string()))
}
