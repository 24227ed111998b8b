#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use permanence::{
    io,
    model::{Role, Submission},
    store::{JsonStore, StoreConfig, SubmissionStore},
    ActiveWindow, Engine, GridConfig, WeekRange,
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI minimaliste de permanences (sans base de données)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON des soumissions
    #[arg(long, global = true, default_value = "submissions.json")]
    store: String,

    /// Étiquettes apposées aux dépôts et filtrées à la lecture
    #[arg(
        long,
        global = true,
        value_delimiter = ',',
        default_value = "scheduling,submission"
    )]
    labels: Vec<String>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Déposer une disponibilité
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// intern | senior
        #[arg(long, default_value = "intern")]
        role: Role,
        /// liste "Mon:1,Tue:3"
        #[arg(long)]
        slots: String,
        /// Horodatage RFC3339 UTC ; défaut : maintenant
        #[arg(long)]
        at: Option<String>,
    },

    /// Importer des soumissions depuis un CSV
    Import {
        #[arg(long)]
        csv: String,
    },

    /// Lister les enregistrements du dépôt
    List,

    /// Générer le planning de la semaine
    Generate {
        /// Début de fenêtre active (RFC3339 UTC)
        #[arg(long)]
        from: String,
        /// Fin de fenêtre exclue (RFC3339 UTC) ; ouverte si absente
        #[arg(long)]
        to: Option<String>,
        /// Jours de la grille, dans l'ordre
        #[arg(long, value_delimiter = ',', default_value = "Mon,Tue,Wed,Thu,Fri")]
        days: Vec<String>,
        /// Périodes de la grille, dans l'ordre
        #[arg(long, value_delimiter = ',', default_value = "1,2,3,4")]
        periods: Vec<String>,
        /// Premier jour affiché (YYYY-MM-DD)
        #[arg(long)]
        start_date: String,
        /// Dernier jour affiché (YYYY-MM-DD)
        #[arg(long)]
        end_date: String,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let store = JsonStore::open(
        &cli.store,
        StoreConfig {
            labels: cli.labels.clone(),
        },
    )?;

    let code = match cli.cmd {
        Commands::Submit {
            name,
            phone,
            role,
            slots,
            at,
        } => {
            let timestamp: DateTime<Utc> = match at {
                Some(raw) => raw.parse().context("at RFC3339")?,
                None => Utc::now(),
            };
            let availability = io::parse_slot_list(&slots)?;
            let submission = Submission {
                name,
                phone,
                role,
                availability,
                timestamp,
                origin_id: None,
            };
            let id = store.create(&submission)?;
            println!("Submission recorded with id {id}");
            0
        }
        Commands::Import { csv } => {
            let submissions = io::import_submissions_csv(csv)?;
            let total = submissions.len();
            for submission in &submissions {
                store.create(submission)?;
            }
            println!("Imported {total} submission(s)");
            0
        }
        Commands::List => {
            for record in store.list(None)? {
                match record.decode() {
                    Ok(sub) => println!(
                        "{} | {} | {} | {} slot(s)",
                        record.origin_id,
                        sub.timestamp.to_rfc3339(),
                        sub.name,
                        sub.availability.len()
                    ),
                    Err(err) => println!("{} | <undecodable: {err}>", record.origin_id),
                }
            }
            0
        }
        Commands::Generate {
            from,
            to,
            days,
            periods,
            start_date,
            end_date,
            out_csv,
            out_json,
        } => {
            let config = GridConfig::new(days, periods)?;
            let engine = Engine::new(config)?;

            let start: DateTime<Utc> = from.parse().context("from RFC3339")?;
            let window = match to {
                Some(raw) => {
                    ActiveWindow::bounded(start, raw.parse().context("to RFC3339")?)?
                }
                None => ActiveWindow::since(start),
            };

            let range = WeekRange::new(
                NaiveDate::parse_from_str(&start_date, "%Y-%m-%d").context("start-date")?,
                NaiveDate::parse_from_str(&end_date, "%Y-%m-%d").context("end-date")?,
            )?;

            let records = store.list(Some(&cli.labels))?;
            let outcome = engine.compute_raw(&records, &window);

            print!("{}", io::render_text(&outcome.grid, &range));
            println!(
                "{} uncovered cell(s), {} unplaced",
                outcome.uncovered_cells(),
                outcome.unplaced_count()
            );

            for failure in &outcome.decode_failures {
                eprintln!(
                    "Warning: could not decode submission {}: {}",
                    failure.origin_id, failure.reason
                );
            }
            if !outcome.unplaced.is_empty() {
                eprintln!("Unplaced: {}", outcome.unplaced.join(", "));
            }

            if let Some(path) = out_csv {
                io::export_grid_csv(path, &outcome.grid)?;
            }
            if let Some(path) = out_json {
                io::export_outcome_json(path, &outcome, &range)?;
            }

            // Code 2 = WARNING/INCOMPLETE
            if outcome.unplaced.is_empty() {
                0
            } else {
                2
            }
        }
    };

    std::process::exit(code);
}
