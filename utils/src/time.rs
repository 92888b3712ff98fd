//! Time formatting helpers for log lines and error messages.

use std::fmt::Write;

/// Format a duration in seconds using its two most significant units.
pub fn format_duration(secs: u64) -> String {
    const UNITS: [(u64, &str); 4] = [(86_400, "d"), (3_600, "h"), (60, "m"), (1, "s")];

    if secs == 0 {
        return "0s".to_string();
    }
    let mut out = String::new();
    let mut rest = secs;
    let mut written = 0;
    for (size, suffix) in UNITS {
        if written == 2 {
            break;
        }
        let count = rest / size;
        if count == 0 && written == 0 {
            continue;
        }
        if written == 1 {
            out.push(' ');
        }
        let _ = write!(out, "{}{}", count, suffix);
        rest %= size;
        written += 1;
    }
    out
}

/// Describe a deadline relative to `now` in seconds: "in 2d 3h" or "5m 0s ago".
pub fn format_deadline(now_secs: u64, deadline_secs: u64) -> String {
    if deadline_secs >= now_secs {
        format!("in {}", format_duration(deadline_secs - now_secs))
    } else {
        format!("{} ago", format_duration(now_secs - deadline_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_two_largest_units() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(61), "1m 1s");
        assert_eq!(format_duration(7 * 3600 + 120), "7h 2m");
        assert_eq!(format_duration(3 * 86400 + 5 * 3600 + 9), "3d 5h");
        assert_eq!(format_duration(86400), "1d 0h");
    }

    #[test]
    fn deadlines_read_both_ways() {
        assert_eq!(format_deadline(100, 160), "in 1m 0s");
        assert_eq!(format_deadline(160, 100), "1m 0s ago");
    }
}
