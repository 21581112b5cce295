use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use seccheat::{search, Catalog, Config, NewRecord, Record, RecordStore};

/// Environment variable holding the tracing filter (e.g. "debug")
const LOG_ENV: &str = "SECCHEAT_LOG";

#[derive(Parser, Debug)]
#[command(name = "seccheat")]
#[command(author, version, about = "Security cheat sheets: list, search and browse shell one-liners stored as JSON")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all cheat sheets
    List,

    /// Search every field of every cheat sheet (case-insensitive)
    Search {
        /// Text to look for
        keyword: String,
    },

    /// Show every field of one cheat sheet
    Show {
        /// Position as printed by `list` (starting at 1)
        index: usize,
    },

    /// Add a cheat sheet to the canonical data file
    Add {
        /// Display title
        #[arg(short, long)]
        title: String,

        /// The shell command
        #[arg(short, long)]
        command: String,

        /// What the command does
        #[arg(short, long, default_value = "")]
        description: String,

        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,

        /// Category label
        #[arg(long, default_value = "Other")]
        category: String,
    },

    /// Create the data directory and write sample cheat sheets (overwrites data.json)
    Init,

    /// Browse cheat sheets interactively
    Browse,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() {
    let args = Args::parse();
    let config = Config::load();

    let Some(command) = args.command else {
        println!("Usage: seccheat [list|search|show|add|init|browse|help]");
        return;
    };

    let result = match command {
        Command::Browse => {
            init_browser_logging(&config);
            seccheat::tui::run(config)
        }
        Command::Completion { shell } => {
            let mut cmd = Args::command();
            clap_complete::generate(shell, &mut cmd, "seccheat", &mut io::stdout());
            Ok(())
        }
        command => {
            init_cli_logging();
            run_command(command, &config)
        }
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_command(command: Command, config: &Config) -> seccheat::Result<()> {
    match command {
        Command::List => cmd_list(config),
        Command::Search { keyword } => cmd_search(config, &keyword),
        Command::Show { index } => cmd_show(config, index),
        Command::Add {
            title,
            command,
            description,
            tags,
            category,
        } => cmd_add(
            config,
            NewRecord {
                title,
                description,
                command,
                tags,
                category,
            },
        ),
        Command::Init => cmd_init(config),
        Command::Browse | Command::Completion { .. } => Ok(()),
    }
}

fn cmd_list(config: &Config) -> seccheat::Result<()> {
    let catalog = Catalog::load(&config.data_dir())?;

    if catalog.is_empty() {
        print_no_data_hint(config);
        return Ok(());
    }

    println!("{}", format!("Found {} cheat sheets:", catalog.len()).bold());
    for (i, record) in catalog.records.iter().enumerate() {
        println!("{}. {}", i + 1, record.display_title());
    }
    Ok(())
}

fn cmd_search(config: &Config, keyword: &str) -> seccheat::Result<()> {
    let catalog = Catalog::load(&config.data_dir())?;
    let results = search::filter_by_keyword(&catalog.records, keyword);

    if results.is_empty() {
        println!("No results for '{}'", keyword);
        return Ok(());
    }

    println!("{}", format!("Found {} results:", results.len()).bold());
    for record in &results {
        println!();
        println!("• {}", record.display_title().cyan());
        if let Some(command) = record.command_text() {
            println!("  Command: {}", command.green());
        }
    }
    Ok(())
}

fn cmd_show(config: &Config, index: usize) -> seccheat::Result<()> {
    let catalog = Catalog::load(&config.data_dir())?;

    let record = index
        .checked_sub(1)
        .and_then(|i| catalog.records.get(i))
        .ok_or_else(|| {
            seccheat::Error::Validation(format!(
                "No record #{} (there are {}; see `seccheat list`)",
                index,
                catalog.len()
            ))
        })?;

    print_record(record);
    Ok(())
}

fn cmd_add(config: &Config, input: NewRecord) -> seccheat::Result<()> {
    let record = input.validate()?;
    let store = RecordStore::new(&config.data_dir(), &config.data.canonical_file);
    let count = store.append(&record)?;

    println!(
        "{} Saved '{}' ({} records in {})",
        "✓".green(),
        record.display_title(),
        count,
        store.path().display()
    );
    Ok(())
}

fn cmd_init(config: &Config) -> seccheat::Result<()> {
    let summary = seccheat::init::init(config)?;

    println!(
        "{} Initialized {} sample cheat sheets",
        "✓".green(),
        summary.count
    );
    println!("   Data directory: {}", summary.data_dir.display());
    Ok(())
}

fn print_no_data_hint(config: &Config) {
    println!("No cheat sheets found. Run: seccheat init");
    println!(
        "{}",
        format!("(data directory: {})", config.data_dir().display()).dimmed()
    );
}

fn print_record(record: &Record) {
    println!("{}", record.display_title().bold());
    println!("  {} {}", "Description:".dimmed(), record.display_description());
    println!("  {} {}", "Command:".dimmed(), record.display_command().green());
    println!("  {} {}", "Tags:".dimmed(), record.tags_joined());
    println!(
        "  {} {}",
        "Category:".dimmed(),
        record.category.as_deref().unwrap_or("-")
    );
    for (key, value) in &record.extra {
        let text = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("  {} {}", format!("{}:", key).dimmed(), text);
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// CLI commands log to stderr
fn init_cli_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// The browser owns the terminal, so it only logs when a log file is configured
fn init_browser_logging(config: &Config) {
    let Some(path) = config.log_file() else {
        return;
    };

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => {
            eprintln!(
                "{} cannot open log file {}: {}",
                "Warning:".yellow(),
                path.display(),
                e
            );
        }
    }
}
