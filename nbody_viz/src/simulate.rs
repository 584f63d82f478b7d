use std::path::PathBuf;

use nbody_sim::{load_bodies, save_final_state, SimConfig, SimStats, Simulation, TraceWriter};

use crate::error::AppError;

/// Options for a simulation run.
#[derive(Debug, Clone)]
pub(crate) struct SimulateArgs {
    pub(crate) input: PathBuf,
    pub(crate) particles: Option<usize>,
    pub(crate) trace: Option<PathBuf>,
    pub(crate) write_trace: bool,
    pub(crate) final_state: Option<PathBuf>,
    pub(crate) config: SimConfig,
}

pub(crate) fn default_trace_path(bodies: usize, iterations: u32) -> PathBuf {
    PathBuf::from(format!("viz_data_{}_{}.txt", bodies, iterations))
}

pub(crate) fn default_final_state_path(bodies: usize, iterations: u32) -> PathBuf {
    PathBuf::from(format!("sim_output_{}_{}.txt", bodies, iterations))
}

/// Loads the initial bodies, runs the simulation while writing a trace (unless
/// disabled), and saves the final state.
pub(crate) fn simulate(args: &SimulateArgs) -> Result<SimStats, AppError> {
    let _span = tracing::info_span!("simulate").entered();

    let bodies = load_bodies(&args.input, args.particles)?;
    let iterations = args.config.iterations;

    let trace_path = args
        .trace
        .clone()
        .unwrap_or_else(|| default_trace_path(bodies.len(), iterations));
    let final_state_path = args
        .final_state
        .clone()
        .unwrap_or_else(|| default_final_state_path(bodies.len(), iterations));

    let mut writer = if args.write_trace {
        Some(TraceWriter::create(&trace_path)?)
    } else {
        tracing::info!("Trace output disabled");
        None
    };
    let mut simulation = Simulation::new(args.config, bodies);
    let stats = simulation
        .run(|iteration, bodies| match writer.as_mut() {
            Some(writer) => writer.write_iteration(iteration, bodies),
            None => Ok(()),
        })
        .map_err(|error| error.context(format!("failed to write {}", trace_path.display())))?;
    if let Some(writer) = writer {
        let lines = writer.lines();
        writer
            .finish()
            .map_err(|error| error.context(format!("failed to write {}", trace_path.display())))?;
        tracing::info!("Wrote {} trace lines", lines);
    }

    save_final_state(&final_state_path, simulation.bodies())?;
    Ok(stats)
}

#[cfg(test)]
mod test {
    use std::{env, fs, process};

    use nbody_trace::TraceReader;

    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_trace_path(25, 25), PathBuf::from("viz_data_25_25.txt"));
        assert_eq!(
            default_final_state_path(3, 100),
            PathBuf::from("sim_output_3_100.txt")
        );
    }

    #[test]
    fn test_simulate_writes_trace_and_final_state() {
        let dir = env::temp_dir().join(format!("nbody_viz_simulate_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        fs::write(
            &input,
            "9 0.1 0.2 0 0\n5 0.5 0.5 0.1 0\n3 0.8 0.3 0 -0.1\n1 0.4 0.9 0 0\n",
        )
        .unwrap();

        let args = SimulateArgs {
            input,
            particles: Some(3),
            trace: Some(dir.join("trace.txt")),
            write_trace: true,
            final_state: Some(dir.join("final.txt")),
            config: SimConfig {
                iterations: 5,
                ..SimConfig::default()
            },
        };
        let stats = simulate(&args).unwrap();
        assert_eq!(stats.bodies, 3);
        assert_eq!(stats.iterations, 5);

        let records: Vec<_> = TraceReader::open(dir.join("trace.txt"))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(records.len(), 15);
        assert_eq!(records[0].iteration, 1.0);
        assert_eq!(records[14].iteration, 5.0);

        let final_state = fs::read_to_string(dir.join("final.txt")).unwrap();
        assert_eq!(final_state.lines().count(), 3);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_simulate_without_trace() {
        let dir = env::temp_dir().join(format!("nbody_viz_no_trace_{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("input.txt");
        fs::write(&input, "9 0.1 0.2 0 0\n5 0.5 0.5 0.1 0\n").unwrap();

        let args = SimulateArgs {
            input,
            particles: None,
            trace: Some(dir.join("trace.txt")),
            write_trace: false,
            final_state: Some(dir.join("final.txt")),
            config: SimConfig {
                iterations: 3,
                ..SimConfig::default()
            },
        };
        let stats = simulate(&args).unwrap();
        assert_eq!(stats.iterations, 3);
        assert!(!dir.join("trace.txt").exists());
        let final_state = fs::read_to_string(dir.join("final.txt")).unwrap();
        assert_eq!(final_state.lines().count(), 2);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_simulate_missing_input() {
        let args = SimulateArgs {
            input: PathBuf::from("definitely/not/here/input.txt"),
            particles: None,
            trace: None,
            write_trace: true,
            final_state: None,
            config: SimConfig::default(),
        };
        assert!(matches!(simulate(&args), Err(AppError::Sim(_))));
    }
}
