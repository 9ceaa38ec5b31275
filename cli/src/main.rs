use clap::{Parser, Subcommand};
use datitos_common::Config;
use datitos_parser::Parser as DatitosParser;
use datitos_runtime::{Runtime, Severity};
use std::path::PathBuf;

mod console;
mod egg;
mod input;
mod view;

use egg::EggDetector;
use input::{Action, Command};
use view::View;

/// Datitos - a terminal encyclopedia presentation engine

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a document with a scripted input string
    Run {
        /// Path to the document to present
        document_path: PathBuf,
        /// Comma-separated list of inputs (e.g. "right,ctrl+3,-> genesis,q")
        input_string: String,
        /// Startup fragment (e.g. "#genesis")
        #[arg(long)]
        fragment: Option<String>,
        /// Directory containing a datitos.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Present a document interactively
    Console {
        /// Path to the document to present
        document_path: PathBuf,
        /// Startup fragment (e.g. "#genesis")
        #[arg(long)]
        fragment: Option<String>,
        /// Directory containing a datitos.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() {
    let cli = Args::parse();

    match cli.command {
        Commands::Run {
            document_path,
            input_string,
            fragment,
            config,
        } => {
            let mut runtime = boot(&document_path, config, fragment.as_deref());
            run_scripted(&mut runtime, &input_string);
        }
        Commands::Console {
            document_path,
            fragment,
            config,
        } => {
            let runtime = boot(&document_path, config, fragment.as_deref());
            console::Console::start(runtime);
        }
    }
}

/// Reads, parses and starts a document, reporting warnings the same way for
/// both modes. Any failure here is fatal; nothing after startup is.
fn boot(document_path: &PathBuf, config_path: Option<PathBuf>, fragment: Option<&str>) -> Runtime {
    let document = match std::fs::read_to_string(document_path) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Error reading document file: {}", err);
            std::process::exit(1);
        }
    };

    let mut parser = DatitosParser::with_file(document_path.clone());
    let (database, warnings) = match parser.parse(&document) {
        Ok(parsed) => parsed,
        Err(err) => {
            println!("{}", err);
            std::process::exit(1);
        }
    };

    for warning in warnings {
        let file_name = warning
            .file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("document.datitos");
        println!(
            "{}:{}: WARNING: {}",
            file_name, warning.line, warning.message
        );
    }

    let config = match config_path {
        Some(path) => match Config::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    let mut runtime = Runtime::with_config(database, config);
    if let Err(err) = runtime.run(fragment) {
        println!("{}", err);
        std::process::exit(1);
    }
    runtime
}

fn run_scripted(runtime: &mut Runtime, input_string: &str) {
    let mut view = View::scripted();
    let mut egg = EggDetector::new();
    view::render_pending(runtime, &mut view);

    let tokens: Vec<&str> = input_string.split(',').collect();
    let mut index = 0;
    let mut quit_requested = false;

    while index < tokens.len() {
        let trimmed = tokens[index].trim();
        index += 1;

        let Some(command) = input::parse_command(trimmed) else {
            eprintln!("Unknown command: {}", trimmed);
            break;
        };

        match command {
            Command::Quit => {
                quit_requested = true;
                break;
            }
            Command::Wait(ms) => {
                let target = runtime.now_ms() + ms;
                runtime.tick(target);
            }
            Command::Empty => {}
            other => {
                apply_command(runtime, &mut view, &mut egg, &other, trimmed);
                // A following wait token measures the gap itself; otherwise
                // the transition settles before the next input.
                let next_is_wait = tokens
                    .get(index)
                    .map(|token| {
                        matches!(
                            input::parse_command(token.trim()),
                            Some(Command::Wait(_))
                        )
                    })
                    .unwrap_or(false);
                if !next_is_wait {
                    runtime.settle();
                }
            }
        }

        view::render_pending(runtime, &mut view);
    }

    if quit_requested {
        println!("QUIT");
    }
}

/// Routes one parsed command into the controller. Shared by both modes;
/// the console intercepts `OpenSearch` before calling this.
pub(crate) fn apply_command(
    runtime: &mut Runtime,
    view: &mut View,
    egg: &mut EggDetector,
    command: &Command,
    raw_token: &str,
) {
    match command {
        Command::Menu(token) => runtime.navigate_to_name(token),
        Command::Chord(chord) => {
            if egg.observe(raw_token) {
                runtime.notify("You found the marginalia!".to_string(), Severity::Info);
            }
            match input::action_for(*chord) {
                Some(Action::JumpTo(catalog_index)) => runtime.navigate_to(catalog_index),
                Some(Action::Next) => runtime.next_section(),
                Some(Action::Previous) => runtime.previous_section(),
                Some(Action::Home) => runtime.home(),
                // Scripted search always carries its query in-line.
                Some(Action::OpenSearch) => {}
                None => {}
            }
        }
        Command::Search(query) => runtime.search(query),
        Command::ScrollUp => view.scroll_up(),
        Command::ScrollDown => view.scroll_down(runtime),
        Command::Status => view::render_status(runtime),
        Command::Wait(_) | Command::Quit | Command::Empty => {}
    }
}
