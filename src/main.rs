use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use std::path::PathBuf;

use treequill::config::Config;
use treequill::editor::engine::Engine;
use treequill::file::store::FileStore;
use treequill::input::{CommandHandler, Flow};
use treequill::logging::init_logging;

/// TreeQuill - edit a JSON document by key path, with undo
#[derive(Parser)]
#[command(name = "treequill")]
#[command(version)]
#[command(about = "A path-addressed JSON document editor", long_about = None)]
struct Cli {
    /// Document file (default: from config, else the platform data directory)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/treequill/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Run a single command and exit, e.g. `treequill add . name Alice`
    command: Vec<String>,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    let store_path = cli
        .file
        .clone()
        .unwrap_or_else(|| config.resolved_store_path());
    let store = FileStore::new(store_path).with_options(config.save_options());
    let engine = Engine::with_store(store).with_history_limit(config.history_limit);
    let mut handler = CommandHandler::new(engine, config.indent_size);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut err = stderr.lock();

    if !cli.command.is_empty() {
        let flow = handler
            .execute_args(&cli.command, &mut out, &mut err)
            .context("Failed to write output")?;
        return Ok(if flow == Flow::Failed {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    // Only prompt when a person is typing
    let stdin = io::stdin();
    let prompt = stdin.is_terminal().then_some(config.prompt.as_str());
    handler
        .run(stdin.lock(), &mut out, &mut err, prompt)
        .context("Failed to run command loop")?;

    Ok(ExitCode::SUCCESS)
}
