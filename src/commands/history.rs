use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::{
    cli::HistoryCmd,
    commands::{
        direction_marker, find_program,
        session::{print_exercise, print_summary},
    },
    engine::{SessionSummary, Volume},
    models::WorkoutSession,
    store::{ProgramStore, SessionStore, SqliteStore},
    types::{OutputFmt, emit},
    utils::{format_long, format_weight},
};

#[derive(Serialize)]
struct HistJson<'a> {
    idx: usize,
    id: &'a str,
    date: String,
    program: &'a str,
    day: &'a str,
    duration: u32,
    volume: f64,
    completed_sets: usize,
    total_sets: usize,
}

#[derive(Serialize)]
struct DetailJson<'a> {
    #[serde(flatten)]
    session: &'a WorkoutSession,
    summary: SessionSummary,
}

/// Completed sessions, newest first.
async fn completed(store: &SqliteStore) -> Result<Vec<WorkoutSession>> {
    let mut sessions = store.fetch_all_sessions(true).await?;
    sessions.retain(|s| s.completed);
    Ok(sessions)
}

pub async fn handle(cmd: HistoryCmd, store: &SqliteStore, fmt: OutputFmt) -> Result<()> {
    match cmd {
        HistoryCmd::List { program, limit } => {
            let mut sessions = completed(store).await?;

            if let Some(arg) = program {
                let programs = ProgramStore::fetch_all(store).await?;
                let Some(p) = find_program(&programs, &arg) else {
                    return Ok(());
                };
                sessions.retain(|s| s.program_id == p.id);
            }

            let rows: Vec<HistJson> = sessions
                .iter()
                .take(limit)
                .enumerate()
                .map(|(i, s)| {
                    let summary = SessionSummary::of(s);
                    HistJson {
                        idx: i + 1,
                        id: &s.id,
                        date: s.date.format("%Y-%m-%d").to_string(),
                        program: &s.program_name,
                        day: &s.training_day_name,
                        duration: s.duration,
                        volume: s.volume(),
                        completed_sets: summary.completed_sets,
                        total_sets: summary.total_sets,
                    }
                })
                .collect();

            emit(fmt, &rows, || print_list(&rows));
        }

        HistoryCmd::Show { index } => {
            let sessions = completed(store).await?;
            let Some(session) = index.checked_sub(1).and_then(|i| sessions.get(i)) else {
                println!("{} no workout at index {}", "error:".red().bold(), index);
                return Ok(());
            };

            let json = DetailJson {
                session,
                summary: SessionSummary::of(session),
            };
            emit(fmt, &json, || print_detail(session, &json.summary));
        }
    }

    Ok(())
}

fn print_list(rows: &[HistJson]) {
    if rows.is_empty() {
        println!("{}", "  (no completed workouts)".dimmed());
        return;
    }

    println!("{}", "History:".cyan().bold());
    let idx_w = rows.len().to_string().len();
    for r in rows {
        let duration = if r.duration == 0 {
            "–".to_string()
        } else {
            format_long(r.duration as u64 * 60)
        };
        println!(
            " {} • {} {} – {} {} {} {} {} kg {} {}/{} sets",
            format!("{:>width$}", r.idx, width = idx_w).yellow(),
            r.date.dimmed(),
            r.program.bold(),
            r.day,
            "|".blue(),
            duration,
            "|".blue(),
            format_weight(r.volume),
            "|".blue(),
            r.completed_sets,
            r.total_sets
        );
    }
}

fn print_detail(session: &WorkoutSession, summary: &SessionSummary) {
    println!(
        "{} {} – {} ({})",
        "Workout:".cyan().bold(),
        session.program_name.bold(),
        session.training_day_name,
        session.date.format("%Y-%m-%d").to_string().dimmed()
    );

    let mut extras = Vec::new();
    if session.duration > 0 {
        extras.push(format!("duration {}", format_long(session.duration as u64 * 60)));
    }
    if let Some(bw) = session.body_weight {
        extras.push(format!("body weight {} kg", format_weight(bw)));
    }
    if let Some(w) = session.waist_circumference {
        extras.push(format!("waist {} cm", format_weight(w)));
    }
    if !extras.is_empty() {
        println!("  {}", extras.join(", ").dimmed());
    }

    println!();
    for (i, ex) in session.exercises.iter().enumerate() {
        print_exercise(i + 1, ex, Some(direction_marker(ex.progress_direction)));
    }
    print_summary(summary);
}
