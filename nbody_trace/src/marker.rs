use crate::{Projection, TraceRecord};

/// Bodies at least this heavy are drawn as [MarkerClass::Large].
pub const LARGE_MASS: f64 = 8.0;
/// Bodies at least this heavy are drawn as [MarkerClass::Medium].
pub const MEDIUM_MASS: f64 = 6.0;
/// Bodies at least this heavy are drawn as [MarkerClass::Small].
pub const SMALL_MASS: f64 = 4.0;

/// Size bucket of a body's marker, a step function of its mass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerClass {
    /// `mass >= 8`
    Large,
    /// `6 <= mass < 8`
    Medium,
    /// `4 <= mass < 6`
    Small,
    /// Everything lighter, including NaN masses.
    Smallest,
}

impl MarkerClass {
    /// Classifies a body by mass.
    pub fn from_mass(mass: f64) -> Self {
        if mass >= LARGE_MASS {
            MarkerClass::Large
        } else if mass >= MEDIUM_MASS {
            MarkerClass::Medium
        } else if mass >= SMALL_MASS {
            MarkerClass::Small
        } else {
            MarkerClass::Smallest
        }
    }

    /// Fill color of the marker.
    pub fn color(self) -> MarkerColor {
        match self {
            MarkerClass::Large => MarkerColor::Red,
            MarkerClass::Medium => MarkerColor::Yellow,
            MarkerClass::Small => MarkerColor::White,
            MarkerClass::Smallest => MarkerColor::Green,
        }
    }

    /// Side length of the square the marker is inscribed in, in canvas units.
    pub fn size(self) -> f64 {
        match self {
            MarkerClass::Large => 12.0,
            MarkerClass::Medium => 8.0,
            MarkerClass::Small => 6.0,
            MarkerClass::Smallest => 4.0,
        }
    }
}

/// The fixed marker palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum MarkerColor {
    Red,
    Yellow,
    White,
    Green,
}

impl MarkerColor {
    /// sRGB components.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            MarkerColor::Red => [255, 0, 0],
            MarkerColor::Yellow => [255, 255, 0],
            MarkerColor::White => [255, 255, 255],
            MarkerColor::Green => [0, 255, 0],
        }
    }
}

/// One drawn body: a filled oval inscribed in the square
/// `[corner, corner + size]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    /// Top left corner of the bounding square, in canvas units.
    pub corner: [f64; 2],
    /// Side length of the bounding square.
    pub size: f64,
    /// Size bucket the marker was drawn from.
    pub class: MarkerClass,
}

impl Marker {
    /// Builds the marker for a record.
    ///
    /// The projected position is the corner of the bounding square, not the
    /// center of the oval.
    pub fn for_record(record: &TraceRecord, projection: &Projection) -> Self {
        let class = MarkerClass::from_mass(record.mass);
        Self {
            corner: projection.project(record.x, record.y),
            size: class.size(),
            class,
        }
    }

    /// Fill color.
    pub fn color(&self) -> MarkerColor {
        self.class.color()
    }

    /// Center of the oval.
    pub fn center(&self) -> [f64; 2] {
        let half = self.size / 2.0;
        [self.corner[0] + half, self.corner[1] + half]
    }

    /// Radius of the oval.
    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }
}
