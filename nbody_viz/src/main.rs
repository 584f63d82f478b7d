//! Plays back N-body simulation traces, and produces them.

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

use std::{path::PathBuf, process};

use clap::{value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use nbody_sim::SimConfig;

use crate::{
    error::AppError,
    simulate::{simulate, SimulateArgs},
    view::{view, window_config, DEFAULT_TRACE_FILE},
};

mod error;
mod simulate;
mod view;

fn main() {
    let matches = App::new("nbody_viz")
        .about("Visualizes N-body simulation traces")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("view")
                .about("Plays back a trace file in a window")
                .arg(
                    Arg::with_name("trace")
                        .value_name("FILE")
                        .help("path to the trace file")
                        .default_value(DEFAULT_TRACE_FILE),
                ),
        )
        .subcommand(
            SubCommand::with_name("simulate")
                .about("Runs a simulation and writes a trace file")
                .arg(
                    Arg::with_name("input")
                        .short("i")
                        .long("input")
                        .value_name("FILE")
                        .help("path to the initial bodies, one `mass x y vx vy` per line")
                        .default_value("input.txt"),
                )
                .arg(
                    Arg::with_name("particles")
                        .short("n")
                        .long("particles")
                        .value_name("COUNT")
                        .help("number of bodies to read from the input (default: all)"),
                )
                .arg(
                    Arg::with_name("iterations")
                        .short("t")
                        .long("iterations")
                        .value_name("COUNT")
                        .help("number of iterations to run")
                        .default_value("25"),
                )
                .arg(
                    Arg::with_name("dt")
                        .long("dt")
                        .value_name("SECONDS")
                        .help("time step per iteration")
                        .default_value("0.01"),
                )
                .arg(
                    Arg::with_name("gravity")
                        .short("g")
                        .long("gravity")
                        .value_name("G")
                        .help("gravitational constant")
                        .default_value("1"),
                )
                .arg(
                    Arg::with_name("output")
                        .short("o")
                        .long("output")
                        .value_name("FILE")
                        .help("path to the trace file (default: viz_data_<bodies>_<iterations>.txt)"),
                )
                .arg(
                    Arg::with_name("no-trace")
                        .long("no-trace")
                        .help("run without writing a trace file")
                        .conflicts_with("output"),
                )
                .arg(
                    Arg::with_name("final")
                        .short("f")
                        .long("final")
                        .value_name("FILE")
                        .help("path to the final state (default: sim_output_<bodies>_<iterations>.txt)"),
                ),
        )
        .get_matches();

    let config = window_config();
    let result = nbody_window::init_logging(&config)
        .map_err(AppError::from)
        .and_then(|()| match matches.subcommand() {
            ("view", Some(matches)) => {
                let trace = matches.value_of("trace").unwrap_or(DEFAULT_TRACE_FILE);
                view(&config, &PathBuf::from(trace))
            }
            ("simulate", Some(matches)) => simulate(&simulate_args(matches)).map(|_| ()),
            _ => unreachable!(),
        });

    if let Err(error) = result {
        tracing::error!("{}", error);
        eprintln!("Error:\n  {}", error);
        process::exit(1);
    }
}

fn simulate_args(matches: &ArgMatches<'_>) -> SimulateArgs {
    let particles = if matches.is_present("particles") {
        Some(value_t!(matches, "particles", usize).unwrap_or_else(|e| e.exit()))
    } else {
        None
    };
    SimulateArgs {
        input: PathBuf::from(matches.value_of("input").unwrap_or("input.txt")),
        particles,
        trace: matches.value_of("output").map(PathBuf::from),
        write_trace: !matches.is_present("no-trace"),
        final_state: matches.value_of("final").map(PathBuf::from),
        config: SimConfig {
            gravity: value_t!(matches, "gravity", f64).unwrap_or_else(|e| e.exit()),
            time_step: value_t!(matches, "dt", f64).unwrap_or_else(|e| e.exit()),
            iterations: value_t!(matches, "iterations", u32).unwrap_or_else(|e| e.exit()),
        },
    }
}
