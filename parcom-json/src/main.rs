//! Command-line interface for the parcom-json demo grammar.
//!
//! This binary wraps the [`document`] parser and exposes a simple
//! command-line interface for parsing JSON object literals from a file,
//! printing either the parsed entries or the failure trace. With `--trace`
//! it attaches an observer that reports every grammar-rule boundary to
//! stderr.

use anyhow::{Context as _, Result};
use clap::{Parser as ClapParser, Subcommand};
use parcom::{Context, Cursor, Event, Observer};
use parcom_json::document;
use std::rc::Rc;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a JSON object literal
    Parse {
        /// Input file with a JSON object literal
        #[arg(short, long)]
        input: String,

        /// Report every grammar-rule boundary to stderr
        #[arg(short, long)]
        trace: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Parse { input: path, trace } => {
            let text =
                std::fs::read_to_string(&path).with_context(|| format!("can't open {path:?}"))?;
            let source = text.trim_end();

            let context = if trace {
                let observer: Observer = Rc::new(|event: &Event<'_>| {
                    eprintln!(
                        "{:?} {} at {} (depth {})",
                        event.phase,
                        event.name,
                        event.position,
                        event.call_stack.len()
                    );
                });
                Context::with_observer(observer)
            } else {
                Context::new()
            };

            let entries = document()
                .parse(Cursor::with_context(source, context))
                .map_err(|err| anyhow::anyhow!("{err}"))?
                .value;
            println!("{entries:#?}");
        }
    }

    Ok(())
}
