//! Write synthetic measurement files in the `<x>=<y>` format so every
//! preset of `series-plot` has something to draw.
//!
//! Usage: `generate_sample [DIR]` (default `results`).

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

/// Write synthetic `<x>=<y>` measurement files for every plot preset.
#[derive(Debug, Parser)]
#[command(name = "generate_sample", version)]
struct Args {
    /// Output directory, created if missing.
    #[arg(default_value = "results")]
    dir: PathBuf,
}

/// Round-trip time of the simulated link, seconds.
const RTT: f64 = 0.1;
/// Number of round trips simulated per client.
const ROUNDS: usize = 400;
/// Bottleneck capacity in segments per round trip.
const LINK_CAPACITY: f64 = 48.0;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Per-round observations of one simulated TCP sender.
#[derive(Default)]
struct ClientTrace {
    cwnd: Vec<(f64, f64)>,
    ssthresh: Vec<(f64, f64)>,
    rto: Vec<(f64, f64)>,
    /// Segments sent per round.
    sent: Vec<(f64, f64)>,
    /// Times at which a segment was dropped.
    drops: Vec<f64>,
}

/// Tahoe-style sender: slow start, additive increase, reset to one on loss.
fn simulate_client(rng: &mut SimpleRng, start: f64, share: f64) -> ClientTrace {
    let mut trace = ClientTrace::default();
    let mut cwnd = 1.0_f64;
    let mut ssthresh = 64.0_f64;
    let mut srtt = RTT;
    let mut rttvar = RTT / 2.0;

    for round in 0..ROUNDS {
        let t = start + round as f64 * RTT;

        let sample = RTT * (1.0 + 0.5 * (cwnd / LINK_CAPACITY) + 0.1 * rng.next_f64());
        rttvar = 0.75 * rttvar + 0.25 * (srtt - sample).abs();
        srtt = 0.875 * srtt + 0.125 * sample;
        let mut rto = (srtt + 4.0 * rttvar).max(0.2);

        trace.cwnd.push((t, cwnd));
        trace.ssthresh.push((t, ssthresh));
        trace.sent.push((t, cwnd));

        let overload = (cwnd - LINK_CAPACITY * share).max(0.0) / (LINK_CAPACITY * share);
        if rng.next_f64() < 0.02 + overload {
            trace.drops.push(t + rng.next_f64() * RTT);
            ssthresh = (cwnd / 2.0).max(2.0);
            cwnd = 1.0;
            rto *= 2.0;
        } else if cwnd < ssthresh {
            cwnd = (cwnd * 2.0).min(ssthresh);
        } else {
            cwnd += 1.0;
        }
        trace.rto.push((t, rto));
    }
    trace
}

fn write_series(dir: &Path, name: &str, header: &str, points: &[(f64, f64)]) -> Result<PathBuf> {
    let path = dir.join(format!("{name}.out"));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "# {header}")?;
    for (x, y) in points {
        writeln!(out, "{x:.3}={y}")?;
    }
    out.flush()?;
    Ok(path)
}

fn main() -> Result<()> {
    let Args { dir } = Args::parse();
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let clients = [
        (65, simulate_client(&mut rng, 0.0, 0.5)),
        (66, simulate_client(&mut rng, 2.0, 0.5)),
    ];

    let mut written = Vec::new();
    for (id, trace) in &clients {
        written.push(write_series(
            &dir,
            &format!("client_congestion_window_{id}"),
            "time=congestion window (segments)",
            &trace.cwnd,
        )?);
        written.push(write_series(
            &dir,
            &format!("client_ssthresh_{id}"),
            "time=slow start threshold (segments)",
            &trace.ssthresh,
        )?);
        written.push(write_series(
            &dir,
            &format!("client_rto_{id}"),
            "time=retransmission timeout (s)",
            &trace.rto,
        )?);
    }

    // Connector view: combined traffic, every drop, drops per second.
    let mut traffic: Vec<(f64, f64)> = clients
        .iter()
        .flat_map(|(_, trace)| trace.sent.iter().copied())
        .collect();
    traffic.sort_by(|a, b| a.0.total_cmp(&b.0));
    written.push(write_series(
        &dir,
        "connector_traffic",
        "time=segments forwarded",
        &traffic,
    )?);

    let mut drops: Vec<f64> = clients
        .iter()
        .flat_map(|(_, trace)| trace.drops.iter().copied())
        .collect();
    drops.sort_by(f64::total_cmp);
    let drop_log: Vec<(f64, f64)> = drops
        .iter()
        .enumerate()
        .map(|(i, &t)| (t, (i + 1) as f64))
        .collect();
    written.push(write_series(
        &dir,
        "connector_drop",
        "time=total drops",
        &drop_log,
    )?);

    let seconds = drops.last().map_or(0, |t| *t as usize + 1);
    let mut per_sec = vec![0.0; seconds];
    for t in &drops {
        if let Some(bucket) = per_sec.get_mut(*t as usize) {
            *bucket += 1.0;
        }
    }
    let per_sec: Vec<(f64, f64)> = per_sec
        .into_iter()
        .enumerate()
        .map(|(s, n)| (s as f64, n))
        .collect();
    written.push(write_series(
        &dir,
        "connector_drops_per_sec",
        "second=drops",
        &per_sec,
    )?);

    println!("Wrote {} measurement files to {}", written.len(), dir.display());
    Ok(())
}
