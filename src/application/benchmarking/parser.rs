use crate::domain::benchmark::ParsedBench;
use crate::domain::errors::TrackError;
use regex::Regex;
use std::sync::LazyLock;

/// Grammar of one Go `testing` benchmark result line, in token order:
///
/// ```text
/// Benchmark<Name>[-<procs>]  <iterations>  <value> ns/op  [<value> B/op  <value> allocs/op]
/// ```
///
/// - the name token carries the literal `Benchmark` prefix and an optional
///   dash-suffix (GOMAXPROCS), both stripped from the parsed name
/// - the iteration count is an integer
/// - metric values may be integers or decimals, each followed by its
///   literal unit label
/// - the `B/op` / `allocs/op` pair only appears when the harness ran with
///   `-benchmem`; when absent both metrics read as 0
static BENCH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?m)^Benchmark(\S+?)(?:-\d+)?\s+(\d+)\s+([0-9]+(?:\.[0-9]+)?)\s+ns/op(?:\s+([0-9]+(?:\.[0-9]+)?)\s+B/op\s+([0-9]+(?:\.[0-9]+)?)\s+allocs/op)?",
    )
    .expect("benchmark line regex is valid")
});

/// Parse raw benchmark harness output into structured fields.
///
/// Only the first line matching the grammar is used; one benchmark result
/// per invocation is assumed. The raw text is retained verbatim on the
/// result so downstream display can show exactly what the harness printed.
pub fn parse_bench_output(raw: &str) -> Result<ParsedBench, TrackError> {
    let caps = BENCH_LINE.captures(raw).ok_or_else(|| {
        TrackError::bench_parse("no line matches `Benchmark<name> <iters> <n> ns/op ...`")
    })?;

    let name = caps[1].to_string();
    let iterations: i64 = caps[2]
        .parse()
        .map_err(|_| TrackError::bench_parse(format!("iteration count out of range: {}", &caps[2])))?;
    let ns_per_op: f64 = caps[3]
        .parse()
        .map_err(|_| TrackError::bench_parse(format!("bad ns/op value: {}", &caps[3])))?;

    let bytes_per_op: f64 = match caps.get(4) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| TrackError::bench_parse(format!("bad B/op value: {}", m.as_str())))?,
        None => 0.0,
    };
    let allocs_per_op: f64 = match caps.get(5) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| TrackError::bench_parse(format!("bad allocs/op value: {}", m.as_str())))?,
        None => 0.0,
    };

    Ok(ParsedBench {
        name,
        iterations,
        ns_per_op,
        bytes_per_op,
        allocs_per_op,
        raw: raw.to_string(),
    })
}
