use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::vector::Vector;
use crate::error::{CollisionError, Result};

/// Position of a child inside its parent, in the order [`Bounds::quadrants`] returns them.
///
/// The y axis grows downwards, so "top" is the `[y0, middle_y]` half.
/// ```text
///  1 | 0
/// ---+---
///  2 | 3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    TopRight = 0,
    TopLeft = 1,
    BottomLeft = 2,
    BottomRight = 3,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::TopRight,
        Quadrant::TopLeft,
        Quadrant::BottomLeft,
        Quadrant::BottomRight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// Immutable axis-aligned rectangle `(x0, y0) .. (x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds", into = "RawBounds")]
pub struct Bounds {
    min: DVec2,
    max: DVec2,
}

impl Bounds {
    /// Builds a rectangle, rejecting unordered or non-finite corners.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Result<Self> {
        let finite = [x0, y0, x1, y1].iter().all(|c| c.is_finite());
        if !finite || x0 > x1 || y0 > y1 {
            return Err(CollisionError::InvalidBounds { x0, y0, x1, y1 });
        }
        Ok(Self {
            min: DVec2::new(x0, y0),
            max: DVec2::new(x1, y1),
        })
    }

    pub fn from_corners(min: DVec2, max: DVec2) -> Result<Self> {
        Self::new(min.x, min.y, max.x, max.y)
    }

    /// Box of half size `half` around `center`. Negative extents are mirrored.
    pub fn around(center: DVec2, half: DVec2) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Rectangle anchored at the origin, e.g. a viewport of the given size.
    pub fn from_size(width: f64, height: f64) -> Result<Self> {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn x0(&self) -> f64 {
        self.min.x
    }

    pub fn y0(&self) -> f64 {
        self.min.y
    }

    pub fn x1(&self) -> f64 {
        self.max.x
    }

    pub fn y1(&self) -> f64 {
        self.max.y
    }

    pub fn min(&self) -> DVec2 {
        self.min
    }

    pub fn max(&self) -> DVec2 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn middle_x(&self) -> f64 {
        self.min.x + self.width() / 2.0
    }

    pub fn middle_y(&self) -> f64 {
        self.min.y + self.height() / 2.0
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.middle_x(), self.middle_y())
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Half-open point test: the lower edges are inside, the upper edges are not.
    pub fn contains(&self, point: &Vector) -> bool {
        self.contains_point(DVec2::new(point.x(), point.y()))
    }

    pub fn contains_point(&self, p: DVec2) -> bool {
        p.x >= self.min.x && p.x < self.max.x && p.y >= self.min.y && p.y < self.max.y
    }

    /// True when the whole disc lies inside; a disc flush with an edge still counts.
    pub fn contains_circle(&self, center: DVec2, radius: f64) -> bool {
        center.x - radius >= self.min.x
            && center.y - radius >= self.min.y
            && center.x + radius <= self.max.x
            && center.y + radius <= self.max.y
    }

    /// Closed containment of another rectangle.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        other.min.x >= self.min.x
            && other.min.y >= self.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    /// Closed overlap test; rectangles sharing only an edge intersect.
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    /// Closest point of the rectangle to `p`.
    pub fn clamp_point(&self, p: DVec2) -> DVec2 {
        p.clamp(self.min, self.max)
    }

    pub fn quadrant(&self, quadrant: Quadrant) -> Bounds {
        let mid = self.center();
        let (min, max) = match quadrant {
            Quadrant::TopRight => (DVec2::new(mid.x, self.min.y), DVec2::new(self.max.x, mid.y)),
            Quadrant::TopLeft => (self.min, mid),
            Quadrant::BottomLeft => (DVec2::new(self.min.x, mid.y), DVec2::new(mid.x, self.max.y)),
            Quadrant::BottomRight => (mid, self.max),
        };
        Bounds { min, max }
    }

    /// Whether the midpoint falls strictly inside on both axes and each quadrant stays wider
    /// and taller than `min_extent`.
    pub fn can_split(&self, min_extent: f64) -> bool {
        let mid = self.center();
        self.min.x < mid.x
            && mid.x < self.max.x
            && self.min.y < mid.y
            && mid.y < self.max.y
            && mid.x - self.min.x > min_extent
            && mid.y - self.min.y > min_extent
    }

    /// The four equal children, ordered top-right, top-left, bottom-left, bottom-right.
    pub fn quadrants(&self) -> [Bounds; 4] {
        Quadrant::ALL.map(|q| self.quadrant(q))
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[({}, {}) .. ({}, {})]",
            self.min.x, self.min.y, self.max.x, self.max.y
        )
    }
}

#[derive(Serialize, Deserialize)]
struct RawBounds {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = CollisionError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Bounds::new(raw.x0, raw.y0, raw.x1, raw.y1)
    }
}

impl From<Bounds> for RawBounds {
    fn from(b: Bounds) -> Self {
        RawBounds {
            x0: b.x0(),
            y0: b.y0(),
            x1: b.x1(),
            y1: b.y1(),
        }
    }
}
