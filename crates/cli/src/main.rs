//! MapPress CLI - map-product filename classification

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use mappress_core::{Classifier, RuleSet};

// ─── CLI structure ──────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "mappress")]
#[command(author, version, about = "Map-product filename classification", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify filenames into title/description/units/legend
    Classify {
        /// Filenames or paths to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Custom rule table (JSON, as produced by `mappress rules`)
        #[arg(short, long)]
        rules: Option<PathBuf>,
        /// Emit one JSON object per input instead of text
        #[arg(short, long)]
        json: bool,
    },
    /// Dump the active rule table as JSON
    Rules {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Custom rule table to echo back (validates it)
        #[arg(short, long)]
        rules: Option<PathBuf>,
    },
}

// ─── Helpers ────────────────────────────────────────────────────────────

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn load_rules(path: Option<&PathBuf>) -> Result<RuleSet> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("cannot read rule table {}", path.display()))?;
            let rules = RuleSet::from_json(&json)
                .with_context(|| format!("invalid rule table {}", path.display()))?;
            debug!(
                fixed = rules.fixed.len(),
                parametric = rules.parametric.len(),
                "loaded custom rule table"
            );
            Ok(rules)
        }
        None => Ok(RuleSet::default()),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        // ── Classify ─────────────────────────────────────────────────
        Commands::Classify { files, rules, json } => {
            let classifier =
                Classifier::new(load_rules(rules.as_ref())?).context("cannot compile rule table")?;

            for (i, file) in files.iter().enumerate() {
                let name = file.to_string_lossy();
                let c = classifier.classify(&name);

                if json {
                    println!("{}", serde_json::to_string(&c)?);
                    continue;
                }

                if i > 0 {
                    println!();
                }
                println!("File: {}", name);
                println!("  Title: {}", c.title);
                if !c.description.is_empty() {
                    println!("  Description: {}", c.description.replace('\n', " | "));
                }
                if !c.units.is_empty() {
                    println!("  Units: {}", c.units);
                }
                match &c.legend {
                    Some(legend) => println!("  Legend: {}", legend),
                    None => println!("  Legend: (none)"),
                }
            }
        }

        // ── Rules ────────────────────────────────────────────────────
        Commands::Rules { output, rules } => {
            let table = load_rules(rules.as_ref())?;
            // Compile to catch bad parametric patterns before dumping.
            Classifier::new(table.clone()).context("cannot compile rule table")?;
            let json = table.to_json()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("cannot write {}", path.display()))?;
                    println!("Wrote rule table to {}", path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
