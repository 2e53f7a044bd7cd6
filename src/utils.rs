/// Stopwatch form, `mm:ss`. Minutes keep counting past an hour.
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Summary form: `1h 5m`, `2h`, `45m`.
pub fn format_long(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}

/// Weight without a trailing `.0`: `60`, `62.5`.
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.0}", weight)
    } else {
        format!("{}", weight)
    }
}

/// Minutes from `90` or `h:mm` (`1:30`). Used as a clap value parser.
pub fn parse_duration(input: &str) -> Result<u32, String> {
    let trimmed = input.trim();
    let invalid = || format!("`{}` is not a duration, use minutes or h:mm", input);

    match trimmed.split_once(':') {
        None => trimmed.parse().map_err(|_| invalid()),
        Some((h, m)) => {
            let hours: u32 = h.parse().map_err(|_| invalid())?;
            let minutes: u32 = m.parse().map_err(|_| invalid())?;
            if minutes >= 60 {
                return Err(invalid());
            }
            hours
                .checked_mul(60)
                .and_then(|h| h.checked_add(minutes))
                .ok_or_else(invalid)
        }
    }
}
