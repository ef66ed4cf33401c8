use std::time::{Duration, Instant};

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Renders `d` as its non-zero `s`, `ms`, `us` and `ns` parts, e.g. `1s250ms3ns`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    let parts = [
        (nanos / NANOS_PER_SEC, "s"),
        (nanos / NANOS_PER_MILLI % 1000, "ms"),
        (nanos / NANOS_PER_MICRO % 1000, "us"),
        (nanos % 1000, "ns"),
    ];

    let mut out = String::new();
    for (value, unit) in parts {
        if value > 0 {
            out.push_str(&value.to_string());
            out.push_str(unit);
        }
    }
    if out.is_empty() {
        out.push_str("0ns");
    }
    out
}

/// Runs `f` `loops` times and returns the total wall-clock time.
pub fn timeit<F: FnMut()>(loops: u32, mut f: F) -> Duration {
    let start = Instant::now();
    for _ in 0..loops {
        f();
    }
    start.elapsed()
}

pub fn describe_timing(total: Duration, loops: u32) -> String {
    let loops = loops.max(1);
    let avg = total / loops;
    if loops > 1 {
        format!(
            "{} loops, {}, avg: {} per loop",
            loops,
            format_duration(total),
            format_duration(avg)
        )
    } else {
        format!("avg: {} ({} ns)", format_duration(avg), total.as_nanos())
    }
}
