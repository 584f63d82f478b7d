use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Body, SimError};

/// Writes one trace line per body per iteration, in the format read by
/// `nbody_trace`: `iteration mass x y`.
#[derive(Debug)]
pub struct TraceWriter<W: Write> {
    writer: W,
    lines: usize,
}

impl TraceWriter<BufWriter<File>> {
    /// Creates or truncates a trace file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|error| SimError::from(error).file("create", path))?;
        tracing::info!("Writing trace to {}", path.display());
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceWriter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Appends the state of every body at `iteration`.
    pub fn write_iteration(&mut self, iteration: u32, bodies: &[Body]) -> Result<(), SimError> {
        for body in bodies {
            writeln!(
                self.writer,
                "{} {:.6} {:.6} {:.6}",
                iteration, body.mass, body.position[0], body.position[1]
            )?;
        }
        self.lines += bodies.len();
        Ok(())
    }

    /// The number of lines written so far.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, SimError> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Writes the final state of every body as `mass x y vx vy`, one per line.
///
/// The output can be read back with [read_bodies](crate::read_bodies) to
/// continue the simulation.
pub fn write_final_state(mut writer: impl Write, bodies: &[Body]) -> Result<(), SimError> {
    for body in bodies {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6} {:.6} {:.6}",
            body.mass, body.position[0], body.position[1], body.velocity[0], body.velocity[1]
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the final state to a file. See [write_final_state].
pub fn save_final_state(path: impl AsRef<Path>, bodies: &[Body]) -> Result<(), SimError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|error| SimError::from(error).file("create", path))?;
    write_final_state(BufWriter::new(file), bodies).map_err(|error| error.file("write", path))?;
    tracing::info!("Wrote final state to {}", path.display());
    Ok(())
}
