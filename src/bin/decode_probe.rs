use std::env;
use std::time::Instant;

use sysinfo::{get_current_pid, ProcessRefreshKind, System};
use trellis_hmm::{Decoder, TableHmm, TableHmmBuilder};

fn main() {
    let options = match Options::parse(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            eprintln!("decode_probe: {err}");
            Options::print_help();
            std::process::exit(2);
        }
    };

    eprintln!("\n{}", "=".repeat(72));
    eprintln!("Viterbi Decode Probe: Performance and Correctness Testing");
    eprintln!("{}", "=".repeat(72));
    eprintln!();
    eprintln!("Decodes random observation sequences of increasing length and checks");
    eprintln!(
        "results against an independent backpointer baseline (up to length {}).",
        options.verify_limit
    );
    eprintln!();
    eprintln!("Metrics:");
    eprintln!("  • wall_s: Wall-clock time in seconds");
    eprintln!("  • rss_delta_kib: Memory delta in KiB");
    eprintln!("  • status: 'passed' = matches baseline, 'not_checked' = too large to verify");
    eprintln!("{}", "=".repeat(72));
    eprintln!();

    let mut sys = System::new();
    let measurements = run_decode(&options, &mut sys);

    print_summary(&measurements, &options);

    if let Err(err) = options.format.write(&measurements) {
        eprintln!("decode_probe output error: {err}");
        std::process::exit(1);
    }
}

struct Options {
    format: OutputFormat,
    verify_limit: usize,
}

impl Options {
    fn parse<I, T>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = T>,
        T: Into<String>,
    {
        let mut format = OutputFormat::Csv;
        let mut verify_limit = 512usize;

        while let Some(arg) = args.next() {
            let arg = arg.into();
            if arg == "--help" || arg == "-h" {
                Options::print_help();
                std::process::exit(0);
            } else if let Some(value) = arg.strip_prefix("--format=") {
                format = OutputFormat::from_str(value)?;
            } else if arg == "--format" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --format".to_string())?
                    .into();
                format = OutputFormat::from_str(&value)?;
            } else if let Some(value) = arg.strip_prefix("--verify-limit=") {
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else if arg == "--verify-limit" {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value after --verify-limit".to_string())?
                    .into();
                verify_limit = value
                    .parse::<usize>()
                    .map_err(|_| "verify limit must be a positive integer".to_string())?;
            } else {
                return Err(format!("unrecognized argument '{arg}'"));
            }
        }

        Ok(Self {
            format,
            verify_limit,
        })
    }

    fn print_help() {
        println!(
            "\
Usage: cargo run --bin decode_probe [-- <options>]

Options:
  --format <csv|table|json>     Output format (default: csv)
  --verify-limit <N>            Maximum sequence length to verify via baseline (default: 512)
  -h, --help                    Print this help message

Examples:
  cargo run --bin decode_probe
  cargo run --bin decode_probe -- --format table --verify-limit 256
"
        );
    }
}

#[derive(Copy, Clone)]
enum OutputFormat {
    Csv,
    Table,
    Json,
}

impl OutputFormat {
    fn from_str(value: &str) -> Result<Self, String> {
        match value {
            "csv" => Ok(Self::Csv),
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'")),
        }
    }

    fn write(self, measurements: &[Measurement]) -> Result<(), String> {
        match self {
            OutputFormat::Csv => write_csv(measurements),
            OutputFormat::Table => write_table(measurements),
            OutputFormat::Json => write_json(measurements),
        }
    }
}

#[derive(Clone)]
struct Measurement {
    scenario: &'static str,
    size_desc: String,
    wall_s: f64,
    rss_delta_kib: u64,
    verification_status: VerificationStatus,
    verification_detail: Option<String>,
}

#[derive(Clone, Copy)]
enum VerificationStatus {
    NotChecked,
    Passed,
    Failed,
}

impl VerificationStatus {
    fn label(&self) -> &'static str {
        match self {
            VerificationStatus::NotChecked => "not_checked",
            VerificationStatus::Passed => "passed",
            VerificationStatus::Failed => "failed",
        }
    }
}

fn run_decode(options: &Options, sys: &mut System) -> Vec<Measurement> {
    const LENGTHS: &[usize] = &[64, 128, 256, 512, 1024, 2048, 4096];
    let dense = demo_hmm();
    let total = LENGTHS.len();

    LENGTHS
        .iter()
        .enumerate()
        .map(|(idx, &len)| {
            eprint!("  [{}/{}] Testing obs_len {}... ", idx + 1, total, len);
            let mut prob_result = 0.0f64;
            let mut path_len_result = 0;
            let m = measure("viterbi_decode", format!("obs_len={len}"), sys, || {
                let observations = alternating_observations(len);
                let decoder = Decoder::new(table_hmm(&dense));
                let decoding = match decoder.decode(&observations) {
                    Ok(d) => d,
                    Err(err) => {
                        return (VerificationStatus::Failed, Some(format!("decode error: {err}")))
                    }
                };
                prob_result = decoding.probability;
                path_len_result = decoding.path.len();

                if len <= options.verify_limit {
                    let (baseline_prob, baseline_path) =
                        backpointer_baseline(&dense, &observations);
                    let tolerance = 1e-9 * baseline_prob.abs().max(f64::MIN_POSITIVE);
                    let passed = (decoding.probability - baseline_prob).abs() <= tolerance
                        && decoding.path == baseline_path;
                    if passed {
                        (VerificationStatus::Passed, None)
                    } else {
                        (
                            VerificationStatus::Failed,
                            Some(format!(
                                "baseline prob={baseline_prob:.6e}, got={:.6e}, path_len={}, baseline_len={}",
                                decoding.probability,
                                decoding.path.len(),
                                baseline_path.len()
                            )),
                        )
                    }
                } else {
                    (VerificationStatus::NotChecked, None)
                }
            });
            let status_icon = match m.verification_status {
                VerificationStatus::Passed => "✓",
                VerificationStatus::Failed => "✗",
                VerificationStatus::NotChecked => "○",
            };
            eprintln!(
                "{} prob={:.3e}, path_len={}, time={:.3}s, status={}",
                status_icon,
                prob_result,
                path_len_result,
                m.wall_s,
                m.verification_status.label()
            );
            m
        })
        .collect()
}

fn print_summary(measurements: &[Measurement], options: &Options) {
    let mut passed = 0;
    let mut failed = 0;
    let mut not_checked = 0;
    for m in measurements {
        match m.verification_status {
            VerificationStatus::Passed => passed += 1,
            VerificationStatus::Failed => failed += 1,
            VerificationStatus::NotChecked => not_checked += 1,
        }
    }

    eprintln!("\n{}", "=".repeat(72));
    eprintln!("Summary: {passed} passed, {failed} failed, {not_checked} not checked (length > {})", options.verify_limit);
    if failed > 0 {
        eprintln!();
        eprintln!("Failed:");
        for m in measurements {
            if matches!(m.verification_status, VerificationStatus::Failed) {
                eprintln!("  ✗ {} ({})", m.scenario, m.size_desc);
                if let Some(ref detail) = m.verification_detail {
                    eprintln!("     Error: {detail}");
                }
            }
        }
    }
    eprintln!("{}", "=".repeat(72));
    eprintln!();
}

fn measure<F>(
    scenario: &'static str,
    size_desc: String,
    sys: &mut System,
    compute: F,
) -> Measurement
where
    F: FnOnce() -> (VerificationStatus, Option<String>),
{
    let before = rss_kib(sys);
    let start = Instant::now();
    let (status, detail) = compute();
    let duration = start.elapsed();
    let after = rss_kib(sys);

    Measurement {
        scenario,
        size_desc,
        wall_s: duration.as_secs_f64(),
        rss_delta_kib: after.saturating_sub(before),
        verification_status: status,
        verification_detail: detail,
    }
}

fn write_csv(measurements: &[Measurement]) -> Result<(), String> {
    println!("scenario,size_desc,wall_s,rss_delta_kib,verification_status,verification_detail");
    for m in measurements {
        let detail = m
            .verification_detail
            .as_ref()
            .map(|s| s.replace('"', "'"))
            .unwrap_or_default();
        println!(
            "{},{},{:.3},{},{},\"{}\"",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            detail
        );
    }
    Ok(())
}

fn write_table(measurements: &[Measurement]) -> Result<(), String> {
    let mut col1 = "scenario".len();
    let mut col2 = "size".len();
    for m in measurements {
        col1 = col1.max(m.scenario.len());
        col2 = col2.max(m.size_desc.len());
    }

    println!(
        "{:<col1$}  {:<col2$}  {:>12}  {:>14}  {:>12}  {}",
        "scenario",
        "size",
        "wall_s",
        "rss_delta_kib",
        "status",
        "detail",
        col1 = col1,
        col2 = col2
    );
    println!(
        "{:-<col1$}  {:-<col2$}  {:-<12}  {:-<14}  {:-<12}  {:-<12}",
        "",
        "",
        "",
        "",
        "",
        "",
        col1 = col1,
        col2 = col2
    );
    for m in measurements {
        println!(
            "{:<col1$}  {:<col2$}  {:>12.3}  {:>14}  {:>12}  {}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            m.verification_detail
                .as_ref()
                .map(|s| s.as_str())
                .unwrap_or(""),
            col1 = col1,
            col2 = col2
        );
    }
    Ok(())
}

fn write_json(measurements: &[Measurement]) -> Result<(), String> {
    println!("[");
    for (idx, m) in measurements.iter().enumerate() {
        let detail = m.verification_detail.as_ref().map(|s| s.replace('"', "'"));
        println!(
            "  {{\"scenario\":\"{}\",\"size\":\"{}\",\"wall_s\":{:.3},\"rss_delta_kib\":{},\"verification\":{{\"status\":\"{}\",\"detail\":{}}}}}{}",
            m.scenario,
            m.size_desc,
            m.wall_s,
            m.rss_delta_kib,
            m.verification_status.label(),
            match detail {
                Some(ref d) => format!("\"{d}\""),
                None => "null".to_string(),
            },
            if idx + 1 == measurements.len() { "" } else { "," }
        );
    }
    println!("]");
    Ok(())
}

fn rss_kib(sys: &mut System) -> u64 {
    sys.refresh_processes_specifics(ProcessRefreshKind::new());
    if let Some(process) = get_current_pid().ok().and_then(|pid| sys.process(pid)) {
        process.memory()
    } else {
        0
    }
}

fn alternating_observations(len: usize) -> Vec<usize> {
    (0..len).map(|i| i % 2).collect()
}

/// Dense two-state demo model; the source of truth for both the decoder's
/// tables and the baseline below.
struct DenseHmm {
    start: Vec<f64>,
    trans: Vec<Vec<f64>>,
    emit: Vec<Vec<f64>>,
}

fn demo_hmm() -> DenseHmm {
    DenseHmm {
        start: vec![0.5, 0.5],
        trans: vec![vec![0.9, 0.1], vec![0.2, 0.8]],
        emit: vec![vec![0.8, 0.2], vec![0.3, 0.7]],
    }
}

fn table_hmm(dense: &DenseHmm) -> TableHmm<usize, usize> {
    let mut builder = TableHmmBuilder::new().states(0..dense.start.len());
    for (state, &p) in dense.start.iter().enumerate() {
        builder = builder.start(state, p);
    }
    for (from, row) in dense.trans.iter().enumerate() {
        for (to, &p) in row.iter().enumerate() {
            builder = builder.transition(from, to, p);
        }
    }
    for (state, row) in dense.emit.iter().enumerate() {
        for (symbol, &p) in row.iter().enumerate() {
            builder = builder.emission(state, symbol, p);
        }
    }
    builder.build()
}

/// Independent Viterbi: full backpointer table plus a backward pass, instead
/// of the library's forward path buffers. Same tie-break (strict `>`, state
/// order), so probability and path must agree exactly.
fn backpointer_baseline(hmm: &DenseHmm, observations: &[usize]) -> (f64, Vec<usize>) {
    let n = hmm.start.len();
    let t_len = observations.len();
    let mut dp = vec![vec![0.0f64; n]; t_len];
    let mut back = vec![vec![0usize; n]; t_len];

    for s in 0..n {
        dp[0][s] = hmm.start[s] * hmm.emit[s][observations[0]];
    }
    for t in 1..t_len {
        for to in 0..n {
            let emit = hmm.emit[to][observations[t]];
            let mut best = f64::NEG_INFINITY;
            let mut arg = 0usize;
            for from in 0..n {
                let cand = dp[t - 1][from] * hmm.trans[from][to] * emit;
                if cand > best {
                    best = cand;
                    arg = from;
                }
            }
            dp[t][to] = best;
            back[t][to] = arg;
        }
    }

    let mut best = f64::NEG_INFINITY;
    let mut best_state = 0usize;
    for s in 0..n {
        if dp[t_len - 1][s] > best {
            best = dp[t_len - 1][s];
            best_state = s;
        }
    }
    let mut path = vec![0usize; t_len];
    path[t_len - 1] = best_state;
    for t in (1..t_len).rev() {
        path[t - 1] = back[t][path[t]];
    }
    (best, path)
}
