// precompute - Offline snow pile computation
//
// Runs the same simulation the footer runs in the browser and writes the
// result as JSON, so a server can ship a ready-made pile (or a CI job can
// verify the checksum) without executing any wasm.
//
// Usage: cargo run --bin precompute -- [--cells N] [--days N]
//          [--start-ms MS] [--now-ms MS] [--drops-per-day N] [--max-drops N]
//          [--melt N] [--wind N] [--wind-dir left|right] [--salt S]
//          [--smooth R] [--out FILE]
//
// Without --days the day count is resolved from --start-ms (default: the
// footer's launch date) and --now-ms (default: the system clock).

use snowpile_engine::{
    DEFAULT_START_MS, Quality, SimConfig, WindDirection, compute_heightfield, days_since_utc,
    field,
};
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut cells = Quality::Medium.width_cells(1.0);
    let mut days: Option<u32> = None;
    let mut start_ms = DEFAULT_START_MS;
    let mut now_ms: Option<i64> = None;
    let mut cfg = SimConfig::default();
    let mut smooth_radius = 0usize;
    let mut out_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--cells" => { cells = flag_value(&args, i); i += 2; }
            "--days" => { days = Some(flag_value(&args, i)); i += 2; }
            "--start-ms" => { start_ms = flag_value(&args, i); i += 2; }
            "--now-ms" => { now_ms = Some(flag_value(&args, i)); i += 2; }
            "--drops-per-day" => { cfg.drops_per_day = flag_value(&args, i); i += 2; }
            "--max-drops" => { cfg.max_drops = flag_value(&args, i); i += 2; }
            "--melt" => { cfg.melt_rate_per_day = flag_value(&args, i); i += 2; }
            "--wind" => { cfg.wind_strength = flag_value(&args, i); i += 2; }
            "--wind-dir" => {
                cfg.wind_direction = args.get(i + 1).and_then(|s| WindDirection::parse(s));
                i += 2;
            }
            "--salt" => { cfg.seed_salt = args.get(i + 1).cloned().unwrap_or_default(); i += 2; }
            "--smooth" => { smooth_radius = flag_value(&args, i); i += 2; }
            "--out" => { out_path = args.get(i + 1).cloned(); i += 2; }
            "--help" | "-h" => {
                eprintln!("Usage: {} [--cells N] [--days N] [--start-ms MS] [--now-ms MS] [--drops-per-day N] [--max-drops N] [--melt N] [--wind N] [--wind-dir left|right] [--salt S] [--smooth R] [--out FILE]", args[0]);
                return;
            }
            _ => i += 1,
        }
    }

    cfg.width_cells = cells;
    cfg.days_since_start = days.unwrap_or_else(|| {
        let now = now_ms.unwrap_or_else(system_now_ms);
        days_since_utc(start_ms, now)
    });

    println!(
        "Simulating {} cells, day {} ({} drops/day, cap {})...",
        cfg.width_cells, cfg.days_since_start, cfg.drops_per_day, cfg.max_drops
    );

    let result = compute_heightfield(&cfg);
    let checksum = field::checksum(&result.heightfield);
    println!("  Drops simulated: {}", result.drops_simulated);
    println!("  Checksum: {}", checksum);

    let heightfield = if smooth_radius > 0 {
        println!("  Smoothing with radius {}...", smooth_radius);
        field::smooth(&result.heightfield, smooth_radius)
    } else {
        result.heightfield
    };

    let json = to_json(&cfg, result.drops_simulated, checksum, &heightfield);
    match out_path {
        Some(path) => {
            fs::write(&path, json).expect("Failed to write output file");
            println!("Wrote {}", path);
        }
        None => println!("{}", json),
    }
}

/// Parse the value following a flag, exiting with a readable message rather
/// than a panic trace on malformed input.
fn flag_value<T: std::str::FromStr>(args: &[String], i: usize) -> T {
    let flag = &args[i];
    match args.get(i + 1).map(|s| s.parse()) {
        Some(Ok(v)) => v,
        _ => {
            eprintln!("Invalid or missing value for {}", flag);
            std::process::exit(1);
        }
    }
}

fn system_now_ms() -> i64 {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System clock is before the epoch");
    elapsed.as_millis() as i64
}

// Serialize by hand; cell values are written as the f64 widening of each f32
// so a JSON consumer recovers the exact stored bits.
fn to_json(cfg: &SimConfig, drops: u32, checksum: u32, heightfield: &[f32]) -> String {
    let mut json = String::with_capacity(heightfield.len() * 12 + 128);
    json.push('{');
    let _ = write!(json, "\"cells\":{},", heightfield.len());
    let _ = write!(json, "\"days\":{},", cfg.days_since_start);
    let _ = write!(json, "\"dropsSimulated\":{},", drops);
    let _ = write!(json, "\"checksum\":{},", checksum);
    json.push_str("\"heightfield\":[");
    for (i, &v) in heightfield.iter().enumerate() {
        if i > 0 {
            json.push(',');
        }
        let _ = write!(json, "{}", f64::from(v));
    }
    json.push_str("]}");
    json
}
