use std::collections::HashSet;
use std::fs::read_to_string;

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    cli::ProgramCmd,
    commands::find_program,
    error::ValidationError,
    models::{ExerciseTemplate, Program, TrainingDay},
    store::ProgramStore,
    types::{OutputFmt, emit},
};

#[derive(Debug, Deserialize)]
struct ProgramToml {
    name: String,
    description: Option<String>,
    days: Vec<DayToml>,
}

#[derive(Debug, Deserialize)]
struct DayToml {
    name: String,
    exercises: Vec<ExerciseToml>,
}

#[derive(Debug, Deserialize)]
struct ExerciseToml {
    name: String,
    sets: u32,
    reps_min: u32,
    /// Defaults to `reps_min` for a fixed rep target.
    reps_max: Option<u32>,
    notes: Option<String>,
}

impl ProgramToml {
    /// Assign fresh ids and check every template.
    fn into_program(self) -> Result<Program, ValidationError> {
        let mut training_days = Vec::with_capacity(self.days.len());
        for day in self.days {
            if day.exercises.is_empty() {
                return Err(ValidationError::EmptyDay(day.name));
            }

            let mut seen = HashSet::new();
            let mut exercises = Vec::with_capacity(day.exercises.len());
            for ex in day.exercises {
                if !seen.insert(ex.name.clone()) {
                    return Err(ValidationError::DuplicateExercise {
                        day: day.name,
                        exercise: ex.name,
                    });
                }
                let template = ExerciseTemplate {
                    id: Uuid::new_v4().to_string(),
                    target_reps_max: ex.reps_max.unwrap_or(ex.reps_min),
                    name: ex.name,
                    target_sets: ex.sets,
                    target_reps_min: ex.reps_min,
                    notes: ex.notes,
                };
                template.validate()?;
                exercises.push(template);
            }

            training_days.push(TrainingDay {
                id: Uuid::new_v4().to_string(),
                name: day.name,
                exercises,
            });
        }

        Ok(Program {
            id: Uuid::new_v4().to_string(),
            name: self.name,
            description: self.description,
            created_at: Utc::now(),
            training_days,
        })
    }
}

#[derive(Serialize)]
struct ProgJson<'a> {
    idx: usize,
    name: &'a str,
    description: &'a str,
    created_at: String,
    days: Vec<&'a str>,
}

fn pretty_print(progs: &[ProgJson]) {
    if progs.is_empty() {
        println!("{}", "  (no programs found)".dimmed());
        return;
    }

    println!("{}", "Programs:".cyan().bold());

    let idx_w = progs
        .iter()
        .map(|p| p.idx.to_string().len())
        .max()
        .unwrap_or(1);

    for p in progs {
        let idx = format!("{:>width$}", p.idx, width = idx_w).yellow();
        let desc = if p.description.is_empty() {
            String::new()
        } else {
            format!("– {}", p.description).dimmed().to_string()
        };
        println!(
            " {} • {} {} {} {}",
            idx,
            p.name.bold(),
            desc,
            "|".blue(),
            format!("added {}", p.created_at).dimmed()
        );

        for (i, d) in p.days.iter().enumerate() {
            let connector = if i + 1 == p.days.len() { "└─" } else { "├─" };
            println!(
                " {}   {} {} • {}",
                " ".repeat(idx_w),
                connector,
                format!("{}", i + 1).yellow(),
                d.bold()
            );
        }
    }
}

fn print_program(program: &Program) {
    println!("{} {}", "Program:".cyan().bold(), program.name.bold());
    if let Some(desc) = &program.description {
        println!("  {}", desc.dimmed());
    }

    for (i, day) in program.training_days.iter().enumerate() {
        println!(
            "\n{} • {}",
            format!("{}", i + 1).yellow(),
            day.name.bold()
        );
        for t in &day.exercises {
            let notes = t
                .notes
                .as_deref()
                .map(|n| format!(" – {}", n).dimmed().to_string())
                .unwrap_or_default();
            println!("    {} – {} × {}{}", t.name, t.target_sets, t.rep_range(), notes);
        }
    }
}

pub async fn handle<S: ProgramStore>(cmd: ProgramCmd, store: &S, fmt: OutputFmt) -> Result<()> {
    match cmd {
        ProgramCmd::Import { files } => {
            if files.is_empty() {
                println!("{} no program file provided", "warning:".yellow().bold());
            }
            for f in files {
                match import_single_program(store, &f).await {
                    Ok(()) => {}
                    Err(e) => {
                        if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
                            if io_err.kind() == std::io::ErrorKind::NotFound {
                                println!(
                                    "{} cannot open file `{}` – file not found",
                                    "error:".red().bold(),
                                    f
                                );
                                continue;
                            }
                        }
                        return Err(e);
                    }
                }
            }
        }

        ProgramCmd::List => {
            let programs = store.fetch_all().await?;
            let progs: Vec<ProgJson> = programs
                .iter()
                .enumerate()
                .map(|(i, p)| ProgJson {
                    idx: i + 1,
                    name: &p.name,
                    description: p.description.as_deref().unwrap_or_default(),
                    created_at: p.created_at.format("%Y-%m-%d").to_string(),
                    days: p.training_days.iter().map(|d| d.name.as_str()).collect(),
                })
                .collect();

            emit(fmt, &progs, || pretty_print(&progs));
        }

        ProgramCmd::Show { program } => {
            let programs = store.fetch_all().await?;
            if let Some(p) = find_program(&programs, &program) {
                emit(fmt, p, || print_program(p));
            }
        }

        ProgramCmd::Delete { program } => {
            let programs = store.fetch_all().await?;
            if let Some(p) = find_program(&programs, &program) {
                store.delete(&p.id).await?;
                println!("{} deleted program `{}`", "ok:".green().bold(), p.name);
            }
        }
    }
    Ok(())
}

async fn import_single_program<S: ProgramStore>(store: &S, file: &str) -> Result<()> {
    let toml_str = read_to_string(file).with_context(|| format!("reading `{file}`"))?;
    let raw: ProgramToml =
        toml::from_str(&toml_str).with_context(|| format!("parsing `{file}`"))?;

    let existing = store.fetch_all().await?;
    if existing.iter().any(|p| p.name == raw.name) {
        println!(
            "{} program `{}` already exists – skipping",
            "warning:".yellow().bold(),
            raw.name
        );
        return Ok(());
    }

    let name = raw.name.clone();
    let program = match raw.into_program() {
        Ok(p) => p,
        Err(e) => {
            println!(
                "{} cannot import program `{}` – {}",
                "warning:".yellow().bold(),
                name,
                e
            );
            return Ok(());
        }
    };

    store.save(&program).await?;
    tracing::info!(program = %program.name, days = program.training_days.len(), "program imported");
    println!("{} `{}`", "ok:".green().bold(), program.name);
    Ok(())
}
