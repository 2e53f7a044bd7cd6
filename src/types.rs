use serde::Serialize;
use strsim::jaro_winkler;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFmt {
    Pretty,
    Json,
}

impl OutputFmt {
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Pretty }
    }
}

/// Print `value` as JSON, or run `pretty` for the colorful form.
pub fn emit<T: Serialize + ?Sized>(fmt: OutputFmt, value: &T, pretty: impl FnOnce()) {
    match fmt {
        OutputFmt::Json => match serde_json::to_string_pretty(value) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("failed to encode JSON: {}", e),
        },
        OutputFmt::Pretty => pretty(),
    }
}

/// Return the closest of `candidates` to `input`
/// if similarity ≥ 0.80 *and* clearly better than the runner-up.
/// Otherwise return `None` (no suggestion shown).
pub fn best_name_suggestion<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let inp = input.to_lowercase();
    if inp.trim().is_empty() {
        return None;
    }

    // Collect (name, score) pairs.
    let mut scores: Vec<(&'a str, f64)> = candidates
        .iter()
        .copied()
        .map(|c| (c, jaro_winkler(&inp, &c.to_lowercase())))
        .collect();

    // Highest score first.
    scores.sort_by(|a, b| b.1.total_cmp(&a.1));

    let (best, best_score) = *scores.first()?;
    let second_score = scores.get(1).map(|(_, s)| *s).unwrap_or(0.0);

    const MIN_SCORE: f64 = 0.80;
    const GAP: f64 = 0.02;

    if best_score >= MIN_SCORE && best_score - second_score >= GAP {
        Some(best)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggests_close_match() {
        let names = ["Push", "Pull", "Legs"];
        assert_eq!(best_name_suggestion("legz", &names), Some("Legs"));
    }

    #[test]
    fn test_no_suggestion_for_unrelated_or_empty() {
        let names = ["Push", "Pull", "Legs"];
        assert_eq!(best_name_suggestion("xyzzy", &names), None);
        assert_eq!(best_name_suggestion("  ", &names), None);
        assert_eq!(best_name_suggestion("push", &[]), None);
    }

    #[test]
    fn test_output_fmt_from_flag() {
        assert_eq!(OutputFmt::from_flag(true), OutputFmt::Json);
        assert_eq!(OutputFmt::from_flag(false), OutputFmt::Pretty);
    }
}
