//! Compact duration text for trace lines: `850µs`, `1.2ms`, `1.5s`, `2m3.25s`.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Round to the nearest microsecond, halves away from zero.
pub fn round_to_micros(d: Duration) -> Duration {
    let micros = (d.as_nanos() + NANOS_PER_MICRO / 2) / NANOS_PER_MICRO;
    Duration::from_micros(u64::try_from(micros).unwrap_or(u64::MAX))
}

/// Render with the largest fitting unit and no trailing fractional zeros.
/// Durations of a second or more are split into hours, minutes and seconds.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_MICRO {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MILLI {
        return with_fraction(nanos, NANOS_PER_MICRO, "µs");
    }
    if nanos < NANOS_PER_SEC {
        return with_fraction(nanos, NANOS_PER_MILLI, "ms");
    }

    let total_secs = d.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = with_fraction(
        u128::from(total_secs % 60) * NANOS_PER_SEC + u128::from(d.subsec_nanos()),
        NANOS_PER_SEC,
        "s",
    );

    if hours > 0 {
        format!("{hours}h{minutes}m{seconds}")
    } else if minutes > 0 {
        format!("{minutes}m{seconds}")
    } else {
        seconds
    }
}

fn with_fraction(value: u128, unit: u128, suffix: &str) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return format!("{whole}{suffix}");
    }
    let width = unit.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    format!("{whole}.{}{suffix}", digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up_to_microseconds() {
        assert_eq!(
            round_to_micros(Duration::from_nanos(1_200_499)),
            Duration::from_micros(1200)
        );
        assert_eq!(
            round_to_micros(Duration::from_nanos(1_200_500)),
            Duration::from_micros(1201)
        );
        assert_eq!(round_to_micros(Duration::from_nanos(499)), Duration::ZERO);
    }

    #[test]
    fn formats_each_unit() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_nanos(15)), "15ns");
        assert_eq!(format_duration(Duration::from_micros(850)), "850µs");
        assert_eq!(format_duration(Duration::from_micros(1200)), "1.2ms");
        assert_eq!(format_duration(Duration::from_micros(12_345)), "12.345ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.5s");
        assert_eq!(format_duration(Duration::from_secs(2)), "2s");
    }

    #[test]
    fn keeps_leading_fraction_zeros() {
        assert_eq!(format_duration(Duration::from_micros(1005)), "1.005ms");
        assert_eq!(format_duration(Duration::from_micros(1_000_001)), "1.000001s");
    }

    #[test]
    fn splits_minutes_and_hours() {
        assert_eq!(
            format_duration(Duration::from_micros(123_000_001)),
            "2m3.000001s"
        );
        assert_eq!(format_duration(Duration::from_secs(3600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h2m5s");
    }
}
