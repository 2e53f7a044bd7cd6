use colored::Colorize;

use crate::models::{Program, ProgressDirection, TrainingDay};
use crate::types::best_name_suggestion;

pub mod config;
pub mod history;
pub mod program;
pub mod session;

/// `arg` as a 1-based index into `items`, otherwise an exact name.
fn pick<'a, T>(items: &'a [T], arg: &str, name: impl Fn(&T) -> &str) -> Option<&'a T> {
    if let Ok(idx) = arg.parse::<usize>() {
        return idx.checked_sub(1).and_then(|i| items.get(i));
    }
    items.iter().find(|it| name(it) == arg)
}

fn report_missing(kind: &str, arg: &str, names: &[&str]) {
    if arg.parse::<usize>().is_ok() {
        println!("{} no {} at index {}", "error:".red().bold(), kind, arg);
    } else if let Some(sug) = best_name_suggestion(arg, names) {
        println!(
            "{} no {} named `{}` -- did you mean: `{}`?",
            "error:".red().bold(),
            kind,
            arg,
            sug.green()
        );
    } else {
        println!("{} no {} named `{}`", "error:".red().bold(), kind, arg);
    }
}

/// Look up a program, printing an error (with a suggestion) when absent.
pub(crate) fn find_program<'a>(programs: &'a [Program], arg: &str) -> Option<&'a Program> {
    let found = pick(programs, arg, |p| p.name.as_str());
    if found.is_none() {
        let names: Vec<&str> = programs.iter().map(|p| p.name.as_str()).collect();
        report_missing("program", arg, &names);
    }
    found
}

pub(crate) fn find_day<'a>(program: &'a Program, arg: &str) -> Option<&'a TrainingDay> {
    let found = pick(&program.training_days, arg, |d| d.name.as_str());
    if found.is_none() {
        let names: Vec<&str> = program.training_days.iter().map(|d| d.name.as_str()).collect();
        report_missing(&format!("training day in `{}`", program.name), arg, &names);
    }
    found
}

pub(crate) fn direction_marker(direction: Option<ProgressDirection>) -> String {
    match direction {
        Some(ProgressDirection::Up) => "▲ up".green().bold().to_string(),
        Some(ProgressDirection::Down) => "▼ down".red().bold().to_string(),
        Some(ProgressDirection::Same) => "= same".yellow().to_string(),
        None => "no baseline".dimmed().to_string(),
    }
}
