//! abruscheda - Personal gym plan tracker
//!
//! "la scheda" - the weekly gym sheet, minus the paper

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use abruscheda::defaults::default_collection;
use abruscheda::links;
use abruscheda::progress::compute_progress;
use abruscheda::schema::{self, EXPORT_FILENAME};
use abruscheda::store::{DEFAULT_DB_PATH, Store};
use abruscheda::tips::TipClient;
use abruscheda::tui::App;

#[derive(Parser)]
#[command(name = "abruscheda")]
#[command(author, version, about = "Personal gym plan tracker")]
struct Cli {
    /// Database file
    #[arg(long, env = "ABRUSCHEDA_DB", default_value = DEFAULT_DB_PATH, global = true)]
    db: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open TUI dashboard
    Tui,

    /// Import a workout collection (internal or simplified JSON)
    Import {
        /// Path to the .json file
        file: PathBuf,
    },

    /// Export the active collection as a simplified-schema backup
    Export {
        /// Output file
        #[arg(short, long, default_value = EXPORT_FILENAME)]
        output: PathBuf,

        /// Print to stdout instead of writing a file
        #[arg(long)]
        print: bool,
    },

    /// List days, zones and exercises with completion marks
    List,

    /// Restore the built-in default collection
    Reset {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask the AI coach for a quick tip on an exercise
    Tip {
        /// Exercise name (e.g., "Panca Piana Bilanciere")
        exercise: String,

        /// Extra context for the coach
        #[arg(short, long, default_value = "")]
        notes: String,
    },

    /// Show deep links that ask an AI assistant for a new plan
    Links {
        /// Open each link in the default browser
        #[arg(long)]
        open: bool,
    },
}

fn active_collection(store: &Store) -> Result<Vec<abruscheda::model::WorkoutDay>> {
    Ok(store
        .load_collection()?
        .filter(|days| !days.is_empty())
        .unwrap_or_else(default_collection))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let store = Store::open(&cli.db)?;

    match cli.command {
        Some(Commands::Tui) | None => {
            let mut app = App::new(store)?;
            app.run()?;
        }

        Some(Commands::Import { file }) => {
            let contents = std::fs::read_to_string(&file)
                .with_context(|| format!("could not read {}", file.display()))?;
            match schema::import_collection(&contents) {
                Ok(days) => {
                    store.save_collection(&days)?;
                    println!("Imported {} day(s) from {}:", days.len(), file.display());
                    for day in &days {
                        println!(
                            "  {} - {} ({} exercises)",
                            day.id,
                            day.title,
                            day.exercise_count()
                        );
                    }
                }
                // The persisted collection is untouched on any failure.
                Err(e) => bail!("import rejected: {e}"),
            }
        }

        Some(Commands::Export { output, print }) => {
            let days = active_collection(&store)?;
            let json = schema::export_collection(&days)?;
            if print {
                println!("{json}");
            } else {
                std::fs::write(&output, json)
                    .with_context(|| format!("could not write {}", output.display()))?;
                println!("Exported {} day(s) to {}", days.len(), output.display());
            }
        }

        Some(Commands::List) => {
            let days = active_collection(&store)?;
            let completed = store.load_completion()?;
            for day in &days {
                println!(
                    "{} - {} | {} ({}%)",
                    day.id,
                    day.title,
                    day.subtitle,
                    compute_progress(day, &completed)
                );
                for zone in &day.zones {
                    println!("  {}", zone.name);
                    for ex in &zone.exercises {
                        let mark = if completed.is_done(day.id, &ex.name) { "x" } else { " " };
                        println!("    [{}] {:35} {:18} {}", mark, ex.name, ex.sets, ex.notes);
                    }
                }
                println!();
            }
        }

        Some(Commands::Reset { yes }) => {
            if !yes && !confirm("Restore the built-in plan and drop the custom one?")? {
                println!("Aborted.");
                return Ok(());
            }
            store.clear_collection()?;
            println!("Restored the built-in default collection.");
        }

        Some(Commands::Tip { exercise, notes }) => {
            let tip = TipClient::from_env().workout_tip(&exercise, &notes);
            println!("{tip}");
        }

        Some(Commands::Links { open }) => {
            for link in links::chat_links() {
                println!("{:10} {}", link.name, link.url);
                if open {
                    links::open_link(&link);
                }
            }
        }
    }

    Ok(())
}

fn confirm(question: &str) -> Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
