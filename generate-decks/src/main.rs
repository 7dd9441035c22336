use clap::{Parser, Subcommand};
use std::path::PathBuf;

use generate_decks::config::{self, DeckConfig};
use generate_decks::{anki_export, frequencies, lexique_filter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Filter the raw Lexique 3.83 CSV down to the declinable lemmas
    Filter {
        /// Lexique383.csv exported with comma separators
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
    /// Split the filtered lexicon into `Freq <start> - <end>.csv` chunks
    Chunk {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output_dir: PathBuf,

        /// Lemmas picked by spoken frequency in each chunk
        #[arg(long, default_value_t = config::SPOKEN_COUNT)]
        spoken_count: usize,

        /// Lemmas picked by written frequency in each chunk
        #[arg(long, default_value_t = config::WRITTEN_COUNT)]
        written_count: usize,
    },
    /// Turn one frequency chunk into Anki import files
    Export {
        /// A `Freq <start> - <end>.csv` chunk
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output_dir: PathBuf,

        /// Lemmas per deck file
        #[arg(long, default_value_t = config::CHUNK_SIZE)]
        chunk_size: usize,

        #[arg(long, default_value_t = config::OUTPUT_PREFIX.to_string())]
        output_prefix: String,

        /// Append lemmas that could not be declined to this JSONL file
        #[arg(long)]
        unresolved_report: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(config::log_env("RUST_LOG")).init();
    let args = Args::parse();

    match args.command {
        Command::Filter { input, output } => {
            println!("Filtering {}", input.display());
            println!("================================================");
            let summary = lexique_filter::filter_lexique(&input, &output)?;
            println!(
                "Kept {} of {} rows ({} lemmas) in {}",
                summary.rows_kept,
                summary.rows_read,
                summary.lemmas_kept,
                output.display()
            );
        }
        Command::Chunk {
            input,
            output_dir,
            spoken_count,
            written_count,
        } => {
            println!("Chunking {}", input.display());
            println!("================================================");
            let config = DeckConfig {
                spoken_count,
                written_count,
                ..DeckConfig::default()
            };
            let files = frequencies::write_frequency_chunks(&input, &output_dir, &config)?;
            for file in &files {
                println!("{}", file.path.display());
            }
            println!("\nDone: {} chunks generated.", files.len());
        }
        Command::Export {
            input,
            output_dir,
            chunk_size,
            output_prefix,
            unresolved_report,
        } => {
            println!("Exporting {}", input.display());
            println!("================================================");
            let config = DeckConfig {
                chunk_size,
                output_prefix,
                unresolved_report,
                ..DeckConfig::default()
            };
            let summary = anki_export::export_decks(&input, &output_dir, &config)?;
            for deck in &summary.decks {
                println!("Formatting exceptions: {}\n", deck.formatting_exceptions);
                println!("Exported {} lemmas to {}", deck.lemmas, deck.path.display());
            }
            let cards: usize = summary.decks.iter().map(|deck| deck.cards).sum();
            println!(
                "Wrote {cards} cards to {} files, {} lemmas left undeclined",
                summary.decks.len(),
                summary.unresolved.len()
            );
        }
    }

    Ok(())
}
