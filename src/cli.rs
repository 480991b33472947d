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

use std::path::PathBuf;

use clap::Parser;

use crate::error::Fallible;
use crate::error::fail;
use crate::llm::LlmConfig;
use crate::session;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The name of the deck to open. Prompted for interactively if omitted.
    deck: Option<String>,
    /// Directory where deck files live. Defaults to the current directory.
    #[arg(long)]
    directory: Option<String>,
}

pub async fn entrypoint() -> Fallible<()> {
    let cli = Cli::parse();
    let directory: PathBuf = match cli.directory {
        Some(dir) => PathBuf::from(dir),
        None => std::env::current_dir()?,
    };
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let config = LlmConfig::from_env();
    session::run(directory, cli.deck, config).await
}
