//! Reqtab - Main Entry Point
//!
//! Command line maintenance over a collections document: normalise every
//! table in place, or print the raw JSON view of one table.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use reqtab_application::{Editor, EditorPorts};
use reqtab_domain::collection::owner_of;
use reqtab_domain::{EditorSettings, TableKind};
use reqtab_infrastructure::{
    ArboardClipboard, ConsolePrompt, JsonFileCollectionStore, SettingsRepository, SystemClock,
    TracingNotifier,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "reqtab", version, about)]
struct Cli {
    /// Settings file to use instead of the platform config directory.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute positions and blank rows of every table and save the file.
    Normalize {
        /// Collections file; defaults to the configured data file.
        file: Option<PathBuf>,
    },
    /// Print the raw JSON view of one table of a request.
    Raw {
        /// Collections file; defaults to the configured data file.
        file: Option<PathBuf>,
        /// Request id.
        #[arg(long)]
        request: String,
        /// Table to print: params, headers or body.
        #[arg(long, default_value = "params")]
        table: TableKind,
    },
}

fn open_editor(settings: EditorSettings, file: Option<PathBuf>) -> Result<Editor, Box<dyn std::error::Error>> {
    let path = file
        .or_else(|| settings.data_file.clone())
        .ok_or("no collections file given and no data directory available")?;
    debug!(path = %path.display(), "using collections file");

    let ports = EditorPorts {
        store: Arc::new(JsonFileCollectionStore::new(path)),
        notifier: Arc::new(TracingNotifier::new()),
        clipboard: Arc::new(ArboardClipboard::new()),
        prompt: Arc::new(ConsolePrompt::new()),
        clock: Arc::new(SystemClock::new()),
    };
    let mut editor = Editor::new(settings, ports);
    editor.load()?;
    Ok(editor)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let repository = cli
        .settings
        .map_or_else(SettingsRepository::new, SettingsRepository::with_path);
    let settings = repository.load()?;

    match cli.command {
        Command::Normalize { file } => {
            let mut editor = open_editor(settings, file)?;
            editor.save()?;
            let requests: usize = editor.collections().iter().map(|c| c.requests.len()).sum();
            info!(collections = editor.collections().len(), requests, "normalized");
            println!(
                "normalized {} collection(s), {requests} request(s)",
                editor.collections().len()
            );
        }
        Command::Raw {
            file,
            request,
            table,
        } => {
            let mut editor = open_editor(settings, file)?;
            let collection_id = owner_of(editor.collections(), &request)
                .ok_or_else(|| format!("request {request} not found"))?;
            editor.activate(&collection_id, &request)?;
            println!("{}", editor.raw_table(table)?);
        }
    }

    Ok(())
}
