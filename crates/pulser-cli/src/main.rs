use anyhow::Result;
use clap::Parser;
use log::info;
use pulser_core::prelude::*;

/// Reference clock of the target board in MHz.
const REFERENCE_MHZ: u64 = 12;
const DEFAULT_FREQ_MHZ: u64 = 60;

/// Programmable digital pulse-sequence generator.
///
/// Qualifies a trigger on the input line and emits a precisely timed
/// sequence of level transitions, each delayed from the previous one by a
/// configurable number of clock ticks. Simulates the sequencer tick by
/// tick and prints the resulting transition schedule.
#[derive(Parser)]
#[command(name = "pulser", version)]
struct Args {
    /// Clock frequency in MHz (16 - 275)
    #[arg(short = 'f', long, conflicts_with = "period")]
    freq: Option<u64>,

    /// Clock period in ns (~ 3.6 - 62.5)
    #[arg(short = 'p', long)]
    period: Option<f64>,

    /// Interpret times as nanoseconds instead of clock cycles
    #[arg(short = 'n', long)]
    ns: bool,

    /// Consecutive high samples required to qualify a trigger
    #[arg(short = 't', long, default_value_t = 1)]
    threshold: u64,

    /// Extra holdoff ticks beyond the total sequence length
    #[arg(short = 'm', long, default_value_t = DEFAULT_HOLDOFF_MARGIN)]
    margin: u64,

    /// Start the output line high instead of low
    #[arg(long)]
    start_high: bool,

    /// Qualify on a rising edge instead of a high streak
    #[arg(long)]
    rising_edge: bool,

    /// Number of ticks to simulate (default: two trigger cycles)
    #[arg(long)]
    ticks: Option<u64>,

    /// Time before each output toggle, in cycles (or ns with -n);
    /// the count must be even
    #[arg(required = true, num_args = 2..)]
    times: Vec<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let freq = match (args.freq, args.period) {
        (Some(f), _) => f,
        (None, Some(p)) => (1.0e3 / p) as u64,
        (None, None) => DEFAULT_FREQ_MHZ,
    };
    let pll = PllCoefficients::search(REFERENCE_MHZ, freq)?;
    info!(
        "pll: divr={} divf={} divq={} -> {} MHz (period {:.3} ns)",
        pll.divr, pll.divf, pll.divq, pll.fout_mhz, pll.period_ns()
    );

    let durations: Vec<u64> = if args.ns {
        // beware integer rounding for short segments at low frequencies
        args.times
            .iter()
            .map(|&t| (t as f64 * pll.fout_mhz / 1.0e3).round() as u64)
            .collect()
    } else {
        args.times.clone()
    };

    let mut config = PulserConfig::new(durations);
    config.threshold = args.threshold;
    config.holdoff_margin = args.margin;
    config.start_level = args.start_high;
    if args.rising_edge {
        config.trigger_kind = TriggerKind::RisingEdge;
    }

    let mut pulser = Pulser::new(&config)?;
    info!(
        "sequence: {} ticks over {} segments, holdoff {} ticks",
        config.total_duration(),
        config.durations.len(),
        pulser.holdoff()
    );

    let ticks = args.ticks.unwrap_or(2 * (pulser.holdoff() + 1));
    simulate(&mut pulser, &config, pll.period_ns(), ticks);

    trace_dump!();
    Ok(())
}

/// Drives the raw trigger line high for `ticks` cycles and prints every
/// transition on the qualified trigger and the output line.
fn simulate(pulser: &mut Pulser, config: &PulserConfig, period_ns: f64, ticks: u64) {
    let mut last_out = config.start_level;
    let mut last_trig = false;

    println!("{:>10}  {:>14}  event", "tick", "time");
    for tick in 0..ticks {
        let (out, trig) = pulser.tick(true);
        if trig != last_trig {
            let event = if trig { "trigger qualified" } else { "trigger re-armed" };
            print_event(tick, period_ns, event);
            last_trig = trig;
        }
        if out != last_out {
            let event = if out { "output high" } else { "output low" };
            print_event(tick, period_ns, event);
            last_out = out;
        }
    }
}

fn print_event(tick: u64, period_ns: f64, event: &str) {
    println!("{:>10}  {:>11.1} ns  {}", tick, tick as f64 * period_ns, event);
}
