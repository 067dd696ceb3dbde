//! CLI for the Winks link collection.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use winks_core::config;
use winks_core::library::Library;
use winks_core::link_meta::LinkId;
use winks_core::pin::PinGate;
use winks_core::store::AnyStore;

use commands::{
    run_add, run_classification_delete, run_classification_list, run_completions, run_edit,
    run_import, run_list, run_man, run_migrate, run_pin_hash, run_remove, run_tag_delete,
    run_tag_list, EditArgs, ListArgs, NewLink,
};

/// Top-level CLI for Winks.
#[derive(Debug, Parser)]
#[command(name = "winks")]
#[command(about = "Winks: a personal link collection with tags and classifications", long_about = None)]
pub struct Cli {
    /// Use the seeded in-memory demo collection instead of the configured store.
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Add a link.
    Add {
        title: String,
        /// Link URL; `https://` is added when no scheme is given.
        url: String,
        /// Classification (defaults to the first known one).
        #[arg(long, short = 'c')]
        classification: Option<String>,
        /// Tags, repeatable or comma-separated (`-t 设计,工具`).
        #[arg(long = "tag", short = 't', value_name = "TAGS")]
        tags: Vec<String>,
    },

    /// Edit a link. Unspecified fields keep their current value.
    Edit {
        id: LinkId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        url: Option<String>,
        #[arg(long, short = 'c')]
        classification: Option<String>,
        /// Replacement tags, repeatable or comma-separated.
        #[arg(long = "tag", short = 't', value_name = "TAGS")]
        tags: Vec<String>,
        /// PIN, when one is configured.
        #[arg(long)]
        pin: Option<String>,
    },

    /// List links, newest first.
    List {
        /// Only links in this classification (`全部` for all).
        #[arg(long, short = 'c')]
        classification: Option<String>,
        /// Only links carrying this tag (`全部` for all).
        #[arg(long, short = 't')]
        tag: Option<String>,
        /// Print JSON instead of a table.
        #[arg(long)]
        json: bool,
    },

    /// Remove a link by its ID.
    Remove {
        id: LinkId,
        #[arg(long)]
        pin: Option<String>,
    },

    /// List or delete tags.
    #[command(subcommand)]
    Tag(VocabularyCommand),

    /// List or delete classifications.
    #[command(subcommand)]
    Classification(VocabularyCommand),

    /// Import rows exported from the hosted table (JSON array) into SQLite.
    Import {
        /// Path to the JSON export.
        path: PathBuf,
    },

    /// Rewrite legacy rows in the SQLite store into the metadata envelope.
    Migrate,

    /// Print the digest to put in `pin_sha256` for a PIN.
    PinHash { pin: String },

    /// Generate shell completions.
    Completions { shell: Shell },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum VocabularyCommand {
    /// Show every name in use.
    List,
    /// Delete a name and rewrite the links that use it.
    Delete {
        name: String,
        #[arg(long)]
        pin: Option<String>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let demo = cli.demo;

        match cli.command {
            CliCommand::Add {
                title,
                url,
                classification,
                tags,
            } => {
                let (mut library, _) = open_library(demo).await?;
                let link = NewLink {
                    title,
                    url,
                    classification,
                    tags,
                };
                run_add(&mut library, link).await?;
            }
            CliCommand::Edit {
                id,
                title,
                url,
                classification,
                tags,
                pin,
            } => {
                let (mut library, gate) = open_library(demo).await?;
                gate.verify(pin.as_deref())?;
                let args = EditArgs {
                    title,
                    url,
                    classification,
                    tags,
                };
                run_edit(&mut library, id, args).await?;
            }
            CliCommand::List {
                classification,
                tag,
                json,
            } => {
                let (library, _) = open_library(demo).await?;
                let args = ListArgs {
                    classification,
                    tag,
                    json,
                };
                run_list(&library, &args)?;
            }
            CliCommand::Remove { id, pin } => {
                let (mut library, gate) = open_library(demo).await?;
                gate.verify(pin.as_deref())?;
                run_remove(&mut library, id).await?;
            }
            CliCommand::Tag(VocabularyCommand::List) => {
                let (library, _) = open_library(demo).await?;
                run_tag_list(&library);
            }
            CliCommand::Tag(VocabularyCommand::Delete { name, pin }) => {
                let (mut library, gate) = open_library(demo).await?;
                gate.verify(pin.as_deref())?;
                run_tag_delete(&mut library, &name).await?;
            }
            CliCommand::Classification(VocabularyCommand::List) => {
                let (library, _) = open_library(demo).await?;
                run_classification_list(&library);
            }
            CliCommand::Classification(VocabularyCommand::Delete { name, pin }) => {
                let (mut library, gate) = open_library(demo).await?;
                gate.verify(pin.as_deref())?;
                run_classification_delete(&mut library, &name).await?;
            }
            CliCommand::Import { path } => {
                let (store, _) = open_store(demo).await?;
                run_import(&store, &path).await?;
            }
            CliCommand::Migrate => {
                let (store, _) = open_store(demo).await?;
                run_migrate(&store).await?;
            }
            CliCommand::PinHash { pin } => run_pin_hash(&pin),
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }

        Ok(())
    }
}

/// Load config and open the configured store (or the demo store).
async fn open_store(demo: bool) -> Result<(AnyStore, PinGate)> {
    let cfg = config::load_or_init()?;
    tracing::debug!(
        backend = ?cfg.backend,
        demo,
        pin = cfg.pin_sha256.is_some(),
        "loaded config"
    );
    let store = AnyStore::open(&cfg, demo).await?;
    Ok((store, PinGate::new(cfg.pin_sha256.as_deref())))
}

async fn open_library(demo: bool) -> Result<(Library<AnyStore>, PinGate)> {
    let (store, gate) = open_store(demo).await?;
    let library = Library::load(store).await?;
    Ok((library, gate))
}

#[cfg(test)]
mod tests;
