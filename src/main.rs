use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dxi::{SearchIndex, output, utils::base85};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "dxi")]
#[command(about = "Symbol search over compact documentation search indexes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search an index (interactive mode when no query is given)
    Search {
        /// Path to the index blob
        index: PathBuf,

        /// Query to search for
        query: Option<String>,

        /// Maximum number of results
        #[arg(short, long, default_value_t = 100)]
        limit: usize,

        /// Treat the input file as base85 transport text
        #[arg(long)]
        base85: bool,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },
    /// Show index statistics
    Stats {
        /// Path to the index blob
        index: PathBuf,

        /// Treat the input file as base85 transport text
        #[arg(long)]
        base85: bool,

        /// Emit JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },
    /// Decode a base85 transport payload into a raw index blob
    Unpack {
        /// Base85 text file (e.g. extracted from an inline script payload)
        input: PathBuf,

        /// Destination for the raw binary index
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            index,
            query,
            limit,
            base85,
            json,
            no_color,
        } => {
            let index = load_index(&index, base85)?;
            match query {
                Some(query) => {
                    let mut session = index.session()?;
                    let results = session.search(&query, limit)?;
                    if json {
                        output::print_matches_json(&results)?;
                    } else {
                        output::print_matches(&results, !no_color)?;
                    }
                }
                None => run_interactive(index)?,
            }
        }

        Commands::Stats {
            index,
            base85,
            json,
        } => {
            let stats = load_index(&index, base85)?.stats();
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Index Statistics");
                println!("================");
                println!();
                println!("Data size:        {}", format_size(stats.data_size));
                println!("Symbols:          {}", stats.symbol_count);
                println!("Trie region:      {}", format_size(stats.trie_bytes));
                println!("Result map:       {}", format_size(stats.map_bytes));
            }
        }

        Commands::Unpack { input, output } => {
            let text = fs::read_to_string(&input)
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let data = base85::decode(text.trim())?;
            fs::write(&output, &data)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Unpacked {} bytes to {}", data.len(), output.display());
        }
    }

    Ok(())
}

/// Open an index file, transport-decoding it first when asked to
fn load_index(path: &Path, base85: bool) -> Result<SearchIndex> {
    if base85 {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        SearchIndex::from_base85(&text)
    } else {
        SearchIndex::open(path)
    }
}

#[cfg(feature = "interactive")]
fn run_interactive(index: SearchIndex) -> Result<()> {
    dxi::tui::run(index)
}

#[cfg(not(feature = "interactive"))]
fn run_interactive(_index: SearchIndex) -> Result<()> {
    anyhow::bail!("Interactive mode requires the 'interactive' feature. Pass a query instead.")
}

/// Format byte size to human readable
fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}
