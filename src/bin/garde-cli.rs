#![forbid(unsafe_code)]
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use garde::{
    builtin_roster,
    config::{load_config, RunConfig},
    io,
    model::{Roster, Shift},
    report::{summarize, SummaryRenderer, TextSummary},
    scheduler::{FillPolicy, Scheduler, TeamPolicy},
    storage::{JsonStorage, Storage},
};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de planning des consultations (matin/soir)
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    /// Fichier JSON du roster
    #[arg(long, global = true, default_value = "roster.json")]
    roster: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Écrire le roster intégré dans le fichier roster
    Init {
        #[arg(long)]
        force: bool,
    },

    /// Écrire des CSV vides (doctors.csv, clinics.csv)
    Templates {
        #[arg(long, default_value = ".")]
        dir: String,
    },

    /// Remplacer le roster depuis deux CSV
    Import {
        #[arg(long)]
        doctors: String,
        #[arg(long)]
        clinics: String,
    },

    /// Afficher cliniciens et cliniques
    List,

    /// Générer le planning sur une période
    Generate {
        /// YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// YYYY-MM-DD (inclus)
        #[arg(long)]
        end: String,
        /// Fichier JSON de paramètres
        #[arg(long)]
        config: Option<String>,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, value_enum)]
        team_policy: Option<TeamPolicy>,
        #[arg(long, value_enum)]
        fill_policy: Option<FillPolicy>,
        #[arg(long)]
        no_double_booking: bool,
        #[arg(long)]
        out_csv: Option<String>,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        pivot_am: Option<String>,
        #[arg(long)]
        pivot_pm: Option<String>,
        #[arg(long)]
        workload_csv: Option<String>,
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

    let storage = JsonStorage::open(&cli.roster);

    let code = match cli.cmd {
        Commands::Init { force } => {
            if storage.exists() && !force {
                bail!("{} already exists (use --force)", storage.path().display());
            }
            storage.save(&builtin_roster())?;
            println!("Built-in roster written to {}", storage.path().display());
            0
        }
        Commands::Templates { dir } => {
            let (doctors, clinics) = io::write_templates(&dir)?;
            println!("{}\n{}", doctors.display(), clinics.display());
            0
        }
        Commands::Import { doctors, clinics } => {
            let roster = Roster::new(
                io::import_clinicians_csv(&doctors)
                    .with_context(|| format!("importing {doctors}"))?,
                io::import_clinics_csv(&clinics).with_context(|| format!("importing {clinics}"))?,
            );
            roster.validate()?;
            storage.save(&roster)?;
            println!(
                "{} clinician(s), {} clinic(s) imported",
                roster.clinicians.len(),
                roster.clinics.len()
            );
            0
        }
        Commands::List => {
            let roster = load_roster(&storage)?;
            for c in &roster.clinicians {
                let sup = if c.is_supervisor { " (Sup)" } else { "" };
                println!(
                    "{}{} | {} | {:?}",
                    c.name,
                    sup,
                    c.title.abbrev(),
                    c.shift_preference
                );
            }
            let clinics: Vec<&str> = roster.clinics.iter().map(|c| c.as_str()).collect();
            println!("clinics: {}", clinics.join(", "));
            0
        }
        Commands::Generate {
            start,
            end,
            config,
            seed,
            team_policy,
            fill_policy,
            no_double_booking,
            out_csv,
            out_json,
            pivot_am,
            pivot_pm,
            workload_csv,
        } => {
            let start = parse_day(&start)?;
            let end = parse_day(&end)?;
            let mut cfg = match config {
                Some(path) => load_config(path)?,
                None => RunConfig::default(),
            };
            if seed.is_some() {
                cfg.seed = seed;
            }
            if let Some(t) = team_policy {
                cfg.team_policy = t;
            }
            if let Some(f) = fill_policy {
                cfg.fill_policy = f;
            }
            if no_double_booking {
                cfg.allow_double_booking = false;
            }

            let roster = load_roster(&storage)?;
            let mut scheduler = Scheduler::new(roster, cfg.to_options())?;
            let schedule = scheduler.run(start, end);

            if let Some(path) = out_csv {
                io::export_records_csv(path, &schedule)?;
            }
            if let Some(path) = out_json {
                io::export_schedule_json(path, &schedule)?;
            }
            if let Some(path) = pivot_am {
                io::export_pivot_csv(path, &schedule, Shift::Am)?;
            }
            if let Some(path) = pivot_pm {
                io::export_pivot_csv(path, &schedule, Shift::Pm)?;
            }
            if let Some(path) = workload_csv {
                io::export_workload_csv(path, &schedule, scheduler.roster())?;
            }

            print!("{}", TextSummary.render(&summarize(&schedule, scheduler.roster())));
            if schedule.is_empty() {
                eprintln!("No shifts generated. Check date range.");
                // Code 2 = rien de généré
                2
            } else {
                0
            }
        }
    };

    std::process::exit(code);
}

// sans fichier roster, on retombe sur le roster intégré
fn load_roster(storage: &JsonStorage) -> Result<Roster> {
    if storage.exists() {
        storage.load()
    } else {
        Ok(builtin_roster())
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}
