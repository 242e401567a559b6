use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

mod average;
mod config;
mod errors;
mod models;
mod remap;
mod report;
mod roster;
mod scale;
mod session;

use crate::config::Config;
use crate::models::{Course, CourseEdit, GradeLevel, Scale};
use crate::remap::Direction;
use crate::session::Session;

#[derive(Parser)]
#[command(name = "grade-compass")]
#[command(about = "Weighted grade averages and German/UK grade conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Course roster CSV (id,name,grade,credits)
    #[arg(long, global = true)]
    roster: Option<PathBuf>,

    /// Scale the roster is written in
    #[arg(long, global = true, value_enum)]
    scale: Option<Scale>,

    /// School year, e.g. "10. Klasse" or "Year 11"
    #[arg(long, global = true)]
    level: Option<String>,

    /// Keep off-scale grades instead of rejecting the roster
    #[arg(long, global = true)]
    lenient: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the grade table of the active scale
    Scale,
    /// Write a sample roster
    Seed {
        #[arg(long)]
        force: bool,
    },
    /// Add a course to the roster
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        grade: String,
        #[arg(long, default_value_t = 1.0)]
        credits: f64,
    },
    /// Change fields of an existing course
    Edit {
        #[arg(long)]
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        grade: Option<String>,
        #[arg(long)]
        credits: Option<f64>,
    },
    /// Remove a course from the roster
    Remove {
        #[arg(long)]
        id: Uuid,
    },
    /// Print the weighted average and its closest grade
    Average {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Translate one grade label into the other scale
    Convert {
        #[arg(long)]
        label: String,
        #[arg(long, value_enum)]
        to: Scale,
    },
    /// Rewrite the whole roster in another scale
    Switch {
        #[arg(long, value_enum)]
        to: Scale,
        /// Defaults to overwriting the roster
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown report
    Report {
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_tracing(config: &Config) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.rust_log)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn parse_level(scale: Scale, level: Option<&str>) -> anyhow::Result<Option<GradeLevel>> {
    match level {
        None => Ok(None),
        Some(text) => GradeLevel::parse(scale, text).map(Some).with_context(|| {
            let known: Vec<String> = GradeLevel::all(scale).iter().map(|l| l.to_string()).collect();
            format!("unknown school year '{text}', expected one of: {}", known.join(", "))
        }),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().context("invalid environment configuration")?;
    init_tracing(&config);

    let scale = cli.scale.unwrap_or(config.scale);
    let roster_path = cli.roster.clone().unwrap_or_else(|| config.roster.clone());
    let level = parse_level(scale, cli.level.as_deref())?;
    debug!(scale = scale.code(), roster = %roster_path.display(), "resolved settings");

    let load_session = || -> anyhow::Result<Session> {
        let courses = roster::load_or_empty(&roster_path, scale, cli.lenient)
            .with_context(|| format!("failed to load {}", roster_path.display()))?;
        Ok(Session::new(scale, level, courses))
    };

    match cli.command {
        Commands::Scale => {
            println!("{} scale (best first):", scale);
            for (label, score) in scale::entries(scale) {
                println!("- {label:<3} {score:.1}");
            }
        }
        Commands::Seed { force } => {
            if roster_path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite it",
                    roster_path.display()
                );
            }
            let courses = roster::seed_courses(scale);
            roster::save_roster(&roster_path, &courses)?;
            println!("Seeded {} courses into {}.", courses.len(), roster_path.display());
        }
        Commands::Add {
            name,
            grade,
            credits,
        } => {
            let mut session = load_session()?;
            let course = Course::new(name, grade, credits);
            roster::validate_course(&course, scale, session.courses.len() + 1, cli.lenient)?;
            let id = session.add_course(course);
            roster::save_roster(&roster_path, &session.courses)?;
            println!("Added course {id}.");
        }
        Commands::Edit {
            id,
            name,
            grade,
            credits,
        } => {
            let mut session = load_session()?;
            let edit = CourseEdit {
                name,
                grade,
                credits,
            };
            let row = session
                .courses
                .iter()
                .position(|course| course.id == id)
                .map_or(0, |index| index + 1);
            let course = session.update_course(id, edit)?;
            roster::validate_course(course, scale, row, cli.lenient)?;
            let line = format!("{} {} ({:.1} credits)", course.name, course.grade, course.credits);
            roster::save_roster(&roster_path, &session.courses)?;
            println!("Updated {line}.");
        }
        Commands::Remove { id } => {
            let mut session = load_session()?;
            let removed = session.remove_course(id)?;
            roster::save_roster(&roster_path, &session.courses)?;
            println!("Removed {} ({}).", removed.name, removed.grade);
        }
        Commands::Average { format } => {
            let session = load_session()?;
            let summary = session.summary();
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                }
                OutputFormat::Text => match summary.nearest_label {
                    Some(label) => println!(
                        "Average {:.2} ({}) across {} courses, {} left out.",
                        summary.average,
                        label,
                        summary.counted_courses,
                        summary.excluded_courses
                    ),
                    None => println!("No graded courses to average."),
                },
            }
        }
        Commands::Convert { label, to } => match Direction::between(scale, to) {
            Some(direction) => {
                let converted = remap::remap_label(&label, direction);
                println!("{label} ({scale}) -> {converted} ({})", direction.target());
            }
            None => {
                let canonical = scale::canonical_label(&label, scale)
                    .with_context(|| format!("'{label}' is not on the {scale} scale"))?;
                println!("{canonical} ({scale}) is already on the target scale");
            }
        },
        Commands::Switch { to, out } => {
            let session = load_session()?;
            let switched = session.switched_to(to);
            let out = out.unwrap_or_else(|| roster_path.clone());
            roster::save_roster(&out, &switched.courses)?;
            info!(from = scale.code(), to = to.code(), "switched roster scale");
            println!(
                "Wrote {} courses on the {} scale to {}.",
                switched.courses.len(),
                to,
                out.display()
            );
            if let Some(level) = switched.level {
                println!("School year is now {level}.");
            }
        }
        Commands::Report { out } => {
            let session = load_session()?;
            let report = report::build_report(&session, chrono::Local::now().date_naive());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
