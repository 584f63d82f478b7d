use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::{Body, SimError};

/// Integration constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Gravitational constant.
    pub gravity: f64,
    /// Time step per iteration.
    pub time_step: f64,
    /// Number of iterations to run.
    pub iterations: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            time_step: 0.01,
            iterations: 25,
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimStats {
    /// Number of bodies simulated.
    pub bodies: usize,
    /// Number of iterations run.
    pub iterations: u32,
    /// Number of worker threads available to the force pass.
    pub threads: usize,
    /// Wall clock time spent integrating, including the per-iteration callback.
    pub elapsed: Duration,
}

/// The state of an N-body system.
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimConfig,
    bodies: Vec<Body>,
    iteration: u32,
}

impl Simulation {
    /// Creates a simulation at iteration 0.
    pub fn new(config: SimConfig, bodies: Vec<Body>) -> Self {
        Self {
            config,
            bodies,
            iteration: 0,
        }
    }

    /// The integration constants.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The bodies in their current state.
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The number of iterations completed so far.
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Returns the gravitational acceleration on every body.
    ///
    /// Coincident bodies produce non-finite values.
    pub fn accelerations(&self) -> Vec<[f64; 2]> {
        let gravity = self.config.gravity;
        let bodies = &self.bodies;

        bodies
            .par_iter()
            .enumerate()
            .map(|(i, body)| {
                let mut acceleration = [0.0, 0.0];
                for (j, other) in bodies.iter().enumerate() {
                    if i == j {
                        continue;
                    }
                    let dx = other.position[0] - body.position[0];
                    let dy = other.position[1] - body.position[1];
                    let distance = dx.hypot(dy);
                    let factor = gravity * other.mass / distance.powi(3);
                    acceleration[0] += factor * dx;
                    acceleration[1] += factor * dy;
                }
                acceleration
            })
            .collect()
    }

    /// Advances every body by one time step.
    pub fn step(&mut self) {
        let dt = self.config.time_step;
        let accelerations = self.accelerations();

        for (body, acceleration) in self.bodies.iter_mut().zip(accelerations) {
            for axis in 0..2 {
                let moved = body.position[axis]
                    + body.velocity[axis] * dt
                    + acceleration[axis] * dt * dt / 2.0;
                body.position[axis] = moved % 1.0;
                body.velocity[axis] += acceleration[axis] * dt;
            }
        }

        self.iteration += 1;
    }

    /// Runs the configured number of iterations, calling `on_iteration` with
    /// the 1-based iteration number and the updated bodies after each one.
    pub fn run<F>(&mut self, mut on_iteration: F) -> Result<SimStats, SimError>
    where
        F: FnMut(u32, &[Body]) -> Result<(), SimError>,
    {
        let start = Instant::now();
        for _ in 0..self.config.iterations {
            self.step();
            tracing::trace!("Finished iteration {}", self.iteration);
            on_iteration(self.iteration, &self.bodies)?;
        }

        let stats = SimStats {
            bodies: self.bodies.len(),
            iterations: self.config.iterations,
            threads: rayon::current_num_threads(),
            elapsed: start.elapsed(),
        };
        tracing::info!(
            "threads={}, particles={}, iterations={}",
            stats.threads,
            stats.bodies,
            stats.iterations
        );
        tracing::info!("Time taken = {:.8} seconds", stats.elapsed.as_secs_f64());
        Ok(stats)
    }
}
