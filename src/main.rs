//! trainplan - command-line front end.
//!
//! Usage:
//! ```bash
//! # Show today's session
//! trainplan today
//!
//! # Finish today's session and move on
//! trainplan finish
//!
//! # Month calendar (months are 1-12 on the command line)
//! trainplan calendar --year 2026 --month 10
//!
//! # Skip days 40 to 46
//! trainplan vacation 40 46
//!
//! # Override dips for week 3
//! trainplan edit dips 3 --series 4 --reps 12
//!
//! # Refresh the offline asset cache
//! trainplan cache install && trainplan cache activate
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trainplan::offline::{AssetCacheWorker, CacheStorage, HttpFetcher, ServedAsset};
use trainplan::program::{DayPlan, Exercise};
use trainplan::schedule::{DayCoordinate, MonthCursor, MonthView};
use trainplan::storage::config::{self, AppConfig};
use trainplan::storage::Database;
use trainplan::tracker::{DayCell, DayStatus, FinishOutcome, Tracker};

#[derive(Parser)]
#[command(
    name = "trainplan",
    version,
    about = "Progressive 52-week training planner",
    long_about = "Generates a progressive training program, tracks completed sessions and vacations, and keeps an offline copy of the app's assets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (config.toml and trainplan.db live here)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Offline asset cache
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },

    #[command(flatten)]
    Tracker(TrackerCommand),
}

#[derive(Subcommand)]
enum TrackerCommand {
    /// Show today's session
    Today,

    /// Finish today's session
    Finish,

    /// Show one program day
    Day {
        /// Day index (0-based)
        index: u32,
    },

    /// Show the prescriptions of one week
    Week {
        /// Week number (1-based)
        week: u32,
    },

    /// Show the first days of the program as a grid
    Strip {
        /// Number of days
        #[arg(long, default_value_t = 21)]
        days: u32,
    },

    /// Show a month calendar
    Calendar {
        /// Year (defaults to the current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month, 1-12 (defaults to the current month)
        #[arg(long)]
        month: Option<u32>,
    },

    /// Mark an inclusive range of days as vacation
    Vacation {
        /// First day index
        start: u32,
        /// Last day index
        end: u32,
    },

    /// Override series and reps of an exercise for one week
    Edit {
        /// Exercise slug or name (e.g. dips, russian-twist)
        exercise: Exercise,
        /// Week number (1-based)
        week: u32,
        /// Series (defaults to the current value)
        #[arg(long)]
        series: Option<u32>,
        /// Reps (defaults to the current value)
        #[arg(long)]
        reps: Option<u32>,
    },

    /// Remove a manual override
    ResetEdit {
        /// Exercise slug or name
        exercise: Exercise,
        /// Week number (1-based)
        week: u32,
    },
}

#[derive(Subcommand)]
enum CacheCommand {
    /// Fetch and store the configured manifest
    Install,
    /// Activate the installed generation and delete older ones
    Activate,
    /// Serve one path, cache first
    Fetch {
        /// Asset path, e.g. /index.html
        path: String,
    },
    /// Show the cache state
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Starting trainplan v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.data_dir {
        Some(dir) => config::load_config_from(dir),
        None => config::load_config(),
    }
    .context("loading configuration")?;

    let db = Database::open(&config.database_path()).context("opening database")?;

    match cli.command {
        Command::Cache { action } => run_cache(action, &config, &db, cli.json),
        Command::Tracker(command) => run_tracker(command, &config, &db, cli.json),
    }
}

fn run_tracker(command: TrackerCommand, config: &AppConfig, db: &Database, json: bool) -> anyhow::Result<()> {
    let tracker = Tracker::open(db, &config.program);

    match command {
        TrackerCommand::Today => match tracker.today()? {
            Some(today) if json => print_json(&today)?,
            Some(today) => {
                println!("{} (day {})", today.coordinate, today.index);
                print_plan(&today.plan);
                if today.done {
                    println!("Already completed");
                }
            }
            None => emit(json, &FinishOutcome::ProgramComplete, "Program complete")?,
        },
        TrackerCommand::Finish => {
            let outcome = tracker.finish_today()?;
            let text = match outcome {
                FinishOutcome::Completed(i) => format!("Day {} completed", i),
                FinishOutcome::AlreadyDone(i) => format!("Day {} was already completed", i),
                FinishOutcome::ProgramComplete => "Program complete".to_string(),
            };
            emit(json, &outcome, &text)?;
        }
        TrackerCommand::Day { index } => {
            let Some(detail) = tracker.day_detail(index)? else {
                bail!("day {} is past the end of the program", index);
            };
            if json {
                print_json(&detail)?;
            } else {
                println!("{} (day {}) - {}", detail.coordinate, detail.index, detail.status);
                print_plan(&detail.plan);
            }
        }
        TrackerCommand::Week { week } => {
            let plans = tracker.generator().generate_week(week.max(1))?;
            if json {
                print_json(&plans)?;
            } else {
                for (i, plan) in plans.iter().enumerate() {
                    let coordinate = DayCoordinate {
                        week: week.max(1),
                        weekday: i as u8 + 1,
                    };
                    println!("{}", coordinate);
                    print_plan(plan);
                }
            }
        }
        TrackerCommand::Strip { days } => {
            let cells = tracker.program_strip(days)?;
            if json {
                print_json(&cells)?;
            } else {
                for row in cells.chunks(7) {
                    let line: Vec<String> = row.iter().map(format_cell).collect();
                    println!("{}", line.join(" "));
                }
            }
        }
        TrackerCommand::Calendar { year, month } => {
            let now = MonthCursor::containing(Local::now().date_naive());
            let month0 = match month {
                Some(m) if (1..=12).contains(&m) => m - 1,
                Some(m) => bail!("month must be between 1 and 12, got {}", m),
                None => now.month0,
            };
            let cursor = MonthCursor {
                year: year.unwrap_or(now.year),
                month0,
            };

            let view = MonthView::build(cursor, config.program.index_mode(), &tracker)?;
            if json {
                print_json(&view)?;
            } else {
                print_month(&view);
            }
        }
        TrackerCommand::Vacation { start, end } => {
            let added = tracker.mark_vacation(start, end)?;
            emit(json, &added, &format!("{} new vacation days", added))?;
        }
        TrackerCommand::Edit {
            exercise,
            week,
            series,
            reps,
        } => {
            let form = tracker.begin_edit(exercise, week)?;
            let saved = tracker.save_edit(
                form.target,
                series.unwrap_or(form.series),
                reps.unwrap_or(form.reps),
            )?;
            emit(
                json,
                &saved,
                &format!(
                    "{} week {}: {} x {} ({} km)",
                    exercise, week, saved.series, saved.reps, saved.km
                ),
            )?;
        }
        TrackerCommand::ResetEdit { exercise, week } => {
            let removed = tracker.generator().overrides().clear(exercise, week)?;
            let text = if removed {
                format!("Removed override for {} week {}", exercise, week)
            } else {
                format!("No override for {} week {}", exercise, week)
            };
            emit(json, &removed, &text)?;
        }
    }

    Ok(())
}

fn run_cache(action: CacheCommand, config: &AppConfig, db: &Database, json: bool) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let manifest = config.offline.manifest();
    let fetcher = HttpFetcher::new(config.offline.origin.clone())?;
    let storage = CacheStorage::new(db.connection());
    let mut worker = AssetCacheWorker::resume(storage, fetcher, &manifest.generation)?;

    runtime.block_on(async {
        match action {
            CacheCommand::Install => {
                let stored = worker.install(&manifest).await?;
                emit(
                    json,
                    &stored,
                    &format!("Installed {} assets into {}", stored, manifest.generation),
                )?;
            }
            CacheCommand::Activate => {
                let deleted = worker.activate().await?;
                emit(
                    json,
                    &deleted,
                    &format!("Activated {}, removed {:?}", manifest.generation, deleted),
                )?;
            }
            CacheCommand::Fetch { path } => {
                let ServedAsset { asset, source } = worker.fetch(&path).await?;
                if json {
                    print_json(&serde_json::json!({
                        "path": asset.path,
                        "status": asset.status,
                        "content_type": asset.content_type,
                        "bytes": asset.body.len(),
                        "source": source,
                    }))?;
                } else {
                    println!(
                        "{} {} ({} bytes, {:?})",
                        asset.status,
                        asset.path,
                        asset.body.len(),
                        source
                    );
                }
            }
            CacheCommand::Status => {
                let status = worker.status()?;
                if json {
                    print_json(&status)?;
                } else {
                    println!("State: {}", status.state);
                    println!("Active: {}", status.active.as_deref().unwrap_or("none"));
                    for bucket in status.buckets {
                        println!("  {} ({} entries)", bucket.name, bucket.entries);
                    }
                }
            }
        }
        Ok::<(), anyhow::Error>(())
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: &str) -> anyhow::Result<()> {
    if json {
        print_json(value)
    } else {
        println!("{}", text);
        Ok(())
    }
}

fn print_plan(plan: &DayPlan) {
    match plan {
        DayPlan::Rest => println!("  Rest day"),
        DayPlan::Training {
            exercises,
            distance_km,
        } => {
            for line in exercises {
                println!("  {}: {} x {}", line.exercise, line.series, line.reps);
            }
            println!("  Run/walk: {} km", distance_km);
        }
    }
}

fn format_cell(cell: &DayCell) -> String {
    let marker = match cell.status {
        DayStatus::Vacation => 'V',
        DayStatus::Rest => 'R',
        DayStatus::Done => 'x',
        DayStatus::Pending if cell.is_today => '>',
        DayStatus::Pending => '.',
    };
    format!("{}{:<6}", marker, cell.coordinate.label())
}

fn print_month(view: &MonthView) {
    println!("{}", view.cursor.title());
    println!("Mo      Tu      We      Th      Fr      Sa      Su");

    let mut slots: Vec<String> = vec![" ".repeat(7); view.leading_blanks as usize];
    for cell in &view.cells {
        let slot = match &cell.day {
            Some(day) => format_cell(day),
            None => format!("{:>2}     ", cell.date.day()),
        };
        slots.push(slot);
    }

    for row in slots.chunks(7) {
        println!("{}", row.join(" "));
    }
}
