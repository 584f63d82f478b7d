/// Size of the drawing canvas, in canvas units.
pub const CANVAS_SIZE: [f64; 2] = [1900.0, 1000.0];

/// Canvas units per simulation unit, for x and y.
pub const TRACE_SCALE: [f64; 2] = [400.0, 300.0];

/// Maps simulation coordinates onto the canvas.
///
/// The origin lands on the canvas center and both axes are mirrored, so the
/// canvas position is `center - scale * (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    canvas_size: [f64; 2],
    scale: [f64; 2],
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(CANVAS_SIZE, TRACE_SCALE)
    }
}

impl Projection {
    /// Creates a projection for a canvas of the given size.
    pub fn new(canvas_size: [f64; 2], scale: [f64; 2]) -> Self {
        Self { canvas_size, scale }
    }

    /// The canvas size.
    pub fn canvas_size(&self) -> [f64; 2] {
        self.canvas_size
    }

    /// The canvas center, where the simulation origin is drawn.
    pub fn center(&self) -> [f64; 2] {
        [self.canvas_size[0] / 2.0, self.canvas_size[1] / 2.0]
    }

    /// Projects a simulation position to a canvas position.
    pub fn project(&self, x: f64, y: f64) -> [f64; 2] {
        let [cx, cy] = self.center();
        [cx - x * self.scale[0], cy - y * self.scale[1]]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_origin_is_center() {
        assert_eq!(Projection::default().project(0.0, 0.0), [950.0, 500.0]);
    }

    #[test]
    fn test_project_scales_and_mirrors() {
        let projection = Projection::default();
        assert_eq!(projection.project(1.0, 0.0), [550.0, 500.0]);
        assert_eq!(projection.project(0.0, 1.0), [950.0, 200.0]);
        assert_eq!(projection.project(-0.5, -0.5), [1150.0, 650.0]);
    }

    #[test]
    fn test_custom_canvas() {
        let projection = Projection::new([200.0, 100.0], [10.0, 20.0]);
        assert_eq!(projection.center(), [100.0, 50.0]);
        assert_eq!(projection.project(2.0, 1.0), [80.0, 30.0]);
    }
}
