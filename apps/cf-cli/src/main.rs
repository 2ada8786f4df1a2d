use clap::{Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cf_cell::{CellModel, CellParameters};
use cf_sim::{BatterySimulator, CurrentProfile, RunOptions, run_profile};

#[derive(Parser)]
#[command(name = "cellflow")]
#[command(about = "Cellflow CLI - battery cell simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Step a constant-current discharge (or charge, with negative current)
    Discharge {
        /// Applied current in amperes (positive discharges)
        #[arg(long, allow_hyphen_values = true)]
        current: f64,
        /// Total duration in seconds
        #[arg(long)]
        duration: f64,
        /// Step size in seconds
        #[arg(long, default_value_t = 1.0)]
        dt: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run a repeating stepped current profile in one pass
    Profile {
        /// Total profile duration in seconds
        #[arg(long)]
        duration: f64,
        /// Duration of each current bucket in seconds
        #[arg(long)]
        step: f64,
        /// Current levels in amperes, repeated cyclically (e.g. 1,-1,0)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        levels: Vec<f64>,
        /// Output time resolution in seconds
        #[arg(long, default_value_t = 1.0)]
        resolution: f64,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Discharge {
            current,
            duration,
            dt,
            output,
        } => cmd_discharge(current, duration, dt, output.as_deref()),
        Commands::Profile {
            duration,
            step,
            levels,
            resolution,
            output,
        } => cmd_profile(duration, step, &levels, resolution, output.as_deref()),
    }
}

fn cmd_discharge(
    current: f64,
    duration: f64,
    dt: f64,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    if !(dt > 0.0) {
        return Err("dt must be positive".into());
    }

    let mut sim = BatterySimulator::new()?;
    let mut writer = open_output(output)?;

    writeln!(writer, "time_s,current_a,voltage_v,soc")?;
    let baseline = sim.step(0.0, 0.0)?;
    write_row(&mut writer, sim.time_s(), &baseline)?;

    let steps = (duration / dt).ceil() as usize;
    let mut elapsed = 0.0;
    for _ in 0..steps {
        let step = dt.min(duration - elapsed);
        let reading = sim.step(current, step)?;
        elapsed += step;
        write_row(&mut writer, sim.time_s(), &reading)?;
    }

    Ok(())
}

fn cmd_profile(
    duration: f64,
    step: f64,
    levels: &[f64],
    resolution: f64,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let profile = CurrentProfile::stepped(duration, step, levels)?;
    let cell = CellModel::new(CellParameters::default())?;
    let opts = RunOptions {
        time_resolution: resolution,
        ..RunOptions::default()
    };

    let traj = run_profile(&cell, &profile, &opts)?;

    let mut writer = open_output(output)?;
    writeln!(writer, "time_s,current_a,voltage_v,soc")?;
    for idx in 0..traj.len() {
        writeln!(
            writer,
            "{},{},{},{}",
            traj.time[idx], traj.current[idx], traj.voltage[idx], traj.soc[idx]
        )?;
    }

    Ok(())
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>, Box<dyn Error>> {
    match path {
        Some(p) => Ok(Box::new(File::create(p)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn write_row(
    writer: &mut Box<dyn Write>,
    time_s: f64,
    reading: &cf_sim::StepReading,
) -> io::Result<()> {
    writeln!(
        writer,
        "{},{},{},{}",
        time_s, reading.current, reading.voltage, reading.soc
    )
}
