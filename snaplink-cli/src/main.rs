// Copyright 2025 Snaplink (https://github.com/snaplink-dev/snaplink)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Snaplink CLI
//!
//! Command-line front end for temporary short links and ephemeral notes.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use snaplink_core::{
    decode_note, encode_note, link_from_key, note_link, note_token_from_link, StoreConfig,
};
use snaplink_store::{LinkStore, ShortenerClient};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;

/// Shown when a note link cannot be decoded
const BROKEN_NOTE_MESSAGE: &str = "This note appears to be broken or invalid.";

#[derive(Parser)]
#[command(name = "snaplink")]
#[command(about = "Snaplink - temporary short links and ephemeral notes", long_about = None)]
struct Cli {
    /// Directory holding the local link list
    #[arg(short, long, default_value = "./snaplink-data")]
    data_dir: PathBuf,

    /// Base URL of the shortener API
    #[arg(long)]
    api_url: Option<String>,

    /// Domain used when printing short links
    #[arg(long)]
    domain: Option<String>,

    /// Output as JSON (machine-readable)
    #[arg(long)]
    json: bool,

    /// Verbose mode
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL into a temporary link
    Shorten {
        /// Destination URL (scheme optional)
        url: String,
    },

    /// List the stored temporary links
    List,

    /// Remove the stored link at the given position (0-based)
    Remove { index: usize },

    /// Ephemeral note operations
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Encode note text into a shareable note link (reads stdin when omitted)
    Encode {
        /// Note text
        text: Option<String>,

        /// Origin placed in front of the note fragment
        #[arg(long, default_value = "https://snpl.ink")]
        origin: String,
    },

    /// Decode and print the note inside a link or bare token
    Open {
        /// Note link (`.../note#token`) or bare token
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    // Note commands are pure and never touch the store
    if let Commands::Note { command } = &cli.command {
        return handle_note_command(command, cli.json);
    }

    let mut config = StoreConfig {
        data_dir: cli.data_dir.clone(),
        ..StoreConfig::default()
    };
    if let Some(api_url) = &cli.api_url {
        config.api_base = api_url.clone();
    }
    if let Some(domain) = &cli.domain {
        config.domain = domain.clone();
    }

    let client = Arc::new(ShortenerClient::new(
        config.api_base.clone(),
        config.link_ttl(),
        config.request_timeout(),
    ));
    let store = LinkStore::open(config, client).context("failed to open link store")?;

    match cli.command {
        Commands::Shorten { url } => {
            let record = store.create(&url).await?;
            let short = link_from_key(&store.config().domain, &record.key);

            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "url": record.url,
                        "key": record.key,
                        "short": short,
                        "favicon": record.favicon,
                    })
                );
            } else {
                println!("{short} -> {}", record.url);
            }
        }

        Commands::List => {
            let links = store.list().await;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&links)?);
            } else if links.is_empty() {
                println!("No temporary links stored.");
            } else {
                for (index, link) in links.iter().enumerate() {
                    let short = link_from_key(&store.config().domain, &link.key);
                    println!("{index}. {short} -> {}", link.url);
                }
                let minutes = store.config().link_ttl_secs / 60;
                println!("These links will automatically be deleted after {minutes} minutes.");
            }
        }

        Commands::Remove { index } => {
            let remaining = store.remove(index).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&remaining)?);
            } else {
                println!("Removed link {index}; {} remaining.", remaining.len());
            }
        }

        Commands::Note { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn handle_note_command(command: &NoteCommands, json: bool) -> Result<()> {
    match command {
        NoteCommands::Encode { text, origin } => {
            let text = match text {
                Some(text) => text.clone(),
                None => {
                    let mut buffer = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buffer)
                        .context("failed to read note text from stdin")?;
                    buffer
                }
            };

            let token = encode_note(&text);
            let link = note_link(origin, &token);

            if json {
                println!("{}", serde_json::json!({ "token": token, "link": link }));
            } else {
                println!("{link}");
            }
        }

        NoteCommands::Open { link } => {
            let note = note_token_from_link(link)
                .and_then(|token| decode_note(&token));

            let Ok(note) = note else {
                bail!(BROKEN_NOTE_MESSAGE);
            };

            if json {
                println!("{}", serde_json::json!({ "note": note }));
            } else {
                println!("{note}");
            }
        }
    }

    Ok(())
}
