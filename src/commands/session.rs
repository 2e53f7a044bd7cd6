use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::{SessionCmd, StartArgs},
    commands::{direction_marker, find_day, find_program},
    config::Config,
    engine::SessionSummary,
    error::WorkflowError,
    models::{Program, TrainingDay, WorkoutExercise, WorkoutSession},
    store::{ProgramStore, SessionStore, SqliteStore},
    types::{OutputFmt, emit},
    utils::{format_elapsed, format_weight},
    workflow::{self, ActiveWorkout, BodyMetrics},
};

#[derive(Serialize)]
struct ShowJson<'a> {
    #[serde(flatten)]
    active: &'a ActiveWorkout,
    summary: SessionSummary,
}

pub async fn handle(
    cmd: SessionCmd,
    store: &SqliteStore,
    cfg: &Config,
    fmt: OutputFmt,
) -> Result<()> {
    match cmd {
        SessionCmd::Start(args) => {
            if let Some(active) = store.active_workout().await? {
                already_running(&active);
                return Ok(());
            }
            let Some((program, day)) = resolve_target(store, &args).await? else {
                return Ok(());
            };

            let active = workflow::start_workout(store, &program, &day, Utc::now()).await?;
            store.save_active(&active).await?;
            println!(
                "{} started `{}` – {} (id: {})",
                "ok:".green().bold(),
                program.name,
                day.name,
                active.session.id
            );
        }

        SessionCmd::Log { target, date } => {
            if let Some(active) = store.active_workout().await? {
                already_running(&active);
                return Ok(());
            }
            let day_date = match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                Ok(d) => d,
                Err(_) => {
                    println!(
                        "{} invalid date `{}` – expected YYYY-MM-DD",
                        "error:".red().bold(),
                        date
                    );
                    return Ok(());
                }
            };
            let date = day_date
                .and_hms_opt(12, 0, 0)
                .context("Invalid time of day")?
                .and_utc();

            let Some((program, day)) = resolve_target(store, &target).await? else {
                return Ok(());
            };

            let active =
                workflow::start_manual_workout(store, &program, &day, date, Utc::now()).await?;
            store.save_active(&active).await?;
            println!(
                "{} logging `{}` – {} for {}",
                "ok:".green().bold(),
                program.name,
                day.name,
                day_date
            );
        }

        SessionCmd::Show => {
            let Some(active) = require_active(store).await? else {
                return Ok(());
            };
            let json = ShowJson {
                active: &active,
                summary: active.summary(),
            };
            emit(fmt, &json, || print_active(&active, &json.summary));
        }

        SessionCmd::Set {
            exercise,
            set,
            weight,
            reps,
            done,
        } => {
            edit(store, |active| {
                active.log_set(exercise, set, weight, reps)?;
                if done {
                    active.set_completed(exercise, set, true)?;
                }
                Ok(format!(
                    "set {} of exercise {}: {} kg × {}",
                    set,
                    exercise,
                    format_weight(weight),
                    reps
                ))
            })
            .await?;
        }

        SessionCmd::Done {
            exercise,
            set,
            undo,
        } => {
            edit(store, |active| {
                active.set_completed(exercise, set, !undo)?;
                let state = if undo { "not done" } else { "done" };
                Ok(format!("set {} of exercise {} marked {}", set, exercise, state))
            })
            .await?;
        }

        SessionCmd::AddSet { exercise } => {
            edit(store, |active| {
                let n = active.add_set(exercise)?;
                Ok(format!("added set {} to exercise {}", n, exercise))
            })
            .await?;
        }

        SessionCmd::Rate {
            exercise,
            difficulty,
        } => {
            edit(store, |active| {
                active.rate(exercise, difficulty)?;
                Ok(format!("exercise {} rated {}", exercise, difficulty))
            })
            .await?;
        }

        SessionCmd::Note { exercise, note } => {
            edit(store, |active| {
                active.note(exercise, note)?;
                Ok(format!("note saved for exercise {}", exercise))
            })
            .await?;
        }

        SessionCmd::Finish {
            body_weight,
            waist,
            duration,
        } => {
            let Some(active) = require_active(store).await? else {
                return Ok(());
            };
            let metrics = BodyMetrics {
                body_weight: body_weight.or_else(|| cfg.default_body_weight()),
                waist_circumference: waist.or_else(|| cfg.default_waist()),
            };

            let session =
                match workflow::finish_workout(store, active, metrics, duration, Utc::now()).await
                {
                    Ok(s) => s,
                    Err(e) => match e.downcast_ref::<WorkflowError>() {
                        Some(reason) => {
                            println!("{} {}", "error:".red().bold(), reason);
                            return Ok(());
                        }
                        None => return Err(e),
                    },
                };
            store.clear_active().await?;

            let summary = SessionSummary::of(&session);
            emit(fmt, &session, || print_finished(&session, &summary));
        }

        SessionCmd::Cancel => {
            let Some(active) = require_active(store).await? else {
                return Ok(());
            };
            SessionStore::delete(store, &active.session.id).await?;
            store.clear_active().await?;
            println!(
                "{} session cancelled (id: {})",
                "ok:".green().bold(),
                active.session.id
            );
        }
    }

    Ok(())
}

fn already_running(active: &ActiveWorkout) {
    println!(
        "{} `{}` – {} is already in progress; finish or cancel it first",
        "error:".red().bold(),
        active.session.program_name,
        active.session.training_day_name
    );
}

async fn require_active(store: &SqliteStore) -> Result<Option<ActiveWorkout>> {
    let active = store.active_workout().await?;
    if active.is_none() {
        println!("{} no active session", "error:".red().bold());
    }
    Ok(active)
}

async fn resolve_target(
    store: &SqliteStore,
    args: &StartArgs,
) -> Result<Option<(Program, TrainingDay)>> {
    let programs = ProgramStore::fetch_all(store).await?;
    let Some(program) = find_program(&programs, &args.program) else {
        return Ok(None);
    };
    let Some(day) = find_day(program, &args.day) else {
        return Ok(None);
    };
    Ok(Some((program.clone(), day.clone())))
}

/// Apply `change` to the active workout and persist it. Input mistakes are
/// reported, not propagated.
async fn edit<F>(store: &SqliteStore, change: F) -> Result<()>
where
    F: FnOnce(&mut ActiveWorkout) -> Result<String, WorkflowError>,
{
    let Some(mut active) = require_active(store).await? else {
        return Ok(());
    };

    match change(&mut active) {
        Ok(msg) => {
            store.save_active(&active).await?;
            println!("{} {}", "ok:".green().bold(), msg);
        }
        Err(e) => println!("{} {}", "error:".red().bold(), e),
    }
    Ok(())
}

fn print_active(active: &ActiveWorkout, summary: &SessionSummary) {
    let s = &active.session;
    let when = if active.manual {
        format!("logged for {}", s.date.format("%Y-%m-%d"))
    } else {
        let secs = (Utc::now() - active.started_at).num_seconds().max(0) as u64;
        format!(
            "started {}, elapsed {}",
            active.started_at.with_timezone(&chrono::Local).format("%H:%M"),
            format_elapsed(secs)
        )
    };

    println!(
        "{} {} – {} ({})",
        "Session:".cyan().bold(),
        s.program_name.bold(),
        s.training_day_name,
        when.dimmed()
    );

    println!("\n{}", "Exercises:".cyan().bold());
    for (i, ex) in s.exercises.iter().enumerate() {
        print_exercise(i + 1, ex, None);
    }

    print_summary(summary);
}

fn print_finished(session: &WorkoutSession, summary: &SessionSummary) {
    println!(
        "{} finished `{}` – {} ({} min)",
        "ok:".green().bold(),
        session.program_name,
        session.training_day_name,
        session.duration
    );
    for (i, ex) in session.exercises.iter().enumerate() {
        print_exercise(i + 1, ex, Some(direction_marker(ex.progress_direction)));
    }
    print_summary(summary);
}

pub(crate) fn print_exercise(idx: usize, ex: &WorkoutExercise, marker: Option<String>) {
    let mut header = format!("{} • {}", format!("{:>2}", idx).yellow(), ex.name.bold());
    if let Some(m) = marker {
        header.push_str(&format!("  {}", m));
    }
    if let Some(d) = ex.difficulty {
        header.push_str(&format!("  {}", format!("[{}]", d).dimmed()));
    }
    println!("{}", header);

    for set in &ex.sets {
        let check = if set.completed {
            "✓".green().to_string()
        } else {
            "·".dimmed().to_string()
        };
        println!(
            "       {} {}  {} kg × {}",
            check,
            format!("set {}", set.set_number).dimmed(),
            format_weight(set.weight),
            set.reps
        );
    }

    if let Some(note) = &ex.notes {
        println!("       {}", format!("note: {}", note).dimmed());
    }
}

pub(crate) fn print_summary(summary: &SessionSummary) {
    println!(
        "\n{} {}/{} sets ({:.0}%) {} volume {} kg {} {} reps ({:.1}/set)",
        "Summary:".cyan().bold(),
        summary.completed_sets,
        summary.total_sets,
        summary.progress * 100.0,
        "|".blue(),
        format_weight(summary.total_volume),
        "|".blue(),
        summary.total_reps,
        summary.average_reps_per_set
    );
}
