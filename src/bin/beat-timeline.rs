/*
MIT License

Copyright (c) 2024 Philipp Schuster

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/
//! Reads beat timestamps from a text file, reconstructs the tempo per
//! second, and writes it as list literal to another text file.
//!
//! Usage: `$ cargo run --features cli -- beats.txt -o timeline.txt`

use beat_timeline::stdlib::files::{read_beat_times, write_comparison_csv, write_timeline};
use beat_timeline::{
    format_timeline, StabilizationParams, TimelineBuilder, TimelineConfig, DEFAULT_CEILING_BPM,
    DIAGNOSTIC_JUMP_THRESHOLD_BPM, FINAL_JUMP_THRESHOLD_BPM,
};
use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Parser, Debug)]
#[clap(version, about)]
struct Args {
    /// Text file with beat timestamps in seconds, e.g. `[0.46 0.93 1.39]`.
    input: PathBuf,
    /// File the tempo timeline is written to.
    #[clap(short = 'o', long, default_value = "timeline.txt")]
    output: PathBuf,
    /// Maximum tempo (BPM) of both stabilization passes.
    #[clap(long, default_value_t = DEFAULT_CEILING_BPM)]
    ceiling: u32,
    /// Maximum tempo change (BPM) between two seconds of the output.
    #[clap(long, default_value_t = FINAL_JUMP_THRESHOLD_BPM)]
    jump_threshold: u32,
    /// Maximum tempo change (BPM) between two seconds of the diagnostic
    /// pass. Only relevant for `--csv`.
    #[clap(long, default_value_t = DIAGNOSTIC_JUMP_THRESHOLD_BPM)]
    diagnostic_jump_threshold: u32,
    /// Additionally writes all intermediate tempo arrays as CSV.
    #[clap(long)]
    csv: Option<PathBuf>,
    /// Increases the log level (-v: debug, -vv: trace).
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> TimelineConfig {
        TimelineConfig {
            diagnostic: StabilizationParams::new(self.ceiling, self.diagnostic_jump_threshold),
            output: StabilizationParams::new(self.ceiling, self.jump_threshold),
        }
    }

    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn init_logger(level: LevelFilter) {
    simple_logger::SimpleLogger::new()
        .with_level(level)
        .with_colors(true)
        .with_utc_timestamps()
        .init()
        .unwrap();
}

fn run(args: &Args) -> Result<(), beat_timeline::stdlib::files::TimelineFileError> {
    log::info!("Reading beats from {}", args.input.display());
    let beats = read_beat_times(&args.input)?;

    log::info!("Calculating tempo timeline");
    let timeline = TimelineBuilder::with_config(args.config()).build(&beats);
    log::debug!("Timeline: {}", format_timeline(timeline.output()));

    write_timeline(&args.output, timeline.output())?;
    log::info!(
        "Wrote tempo of {} seconds to {}",
        timeline.len(),
        args.output.display()
    );

    if let Some(csv) = &args.csv {
        write_comparison_csv(csv, &timeline)?;
        log::info!("Wrote comparison to {}", csv.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.log_level());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
