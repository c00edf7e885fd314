use zambi_core::{Rect, Vec2};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const UPPER_LEFT: usize = 0;
const UPPER_RIGHT: usize = 1;
const LOWER_RIGHT: usize = 2;
const LOWER_LEFT: usize = 3;

/// A rectangle rotated about its own center.
///
/// The corner points are derived from the base rectangle and rotation. They are recomputed
/// whenever the position changes, so reads never observe stale corners. Rotation is fixed at
/// construction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrientedRect {
    base: Rect,
    rotation: f32,
    corners: [Vec2; 4],
}

impl OrientedRect {
    /// # Panics
    ///
    /// Panics if the base rectangle has a non-positive width or height.
    pub fn new(base: Rect, rotation: f32) -> Self {
        assert!(
            base.width > 0 && base.height > 0,
            "oriented rectangle must have a positive size"
        );
        Self {
            base,
            rotation,
            corners: compute_corners(&base, rotation),
        }
    }

    pub fn axis_aligned(base: Rect) -> Self {
        Self::new(base, 0.0)
    }

    pub fn base(&self) -> Rect {
        self.base
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn width(&self) -> i32 {
        self.base.width
    }

    pub fn height(&self) -> i32 {
        self.base.height
    }

    pub fn dimensions(&self) -> Vec2 {
        Vec2::new(self.base.width as f32, self.base.height as f32)
    }

    /// Rotation pivot (center of the base rectangle).
    pub fn origin(&self) -> Vec2 {
        self.base.center()
    }

    /// Corners in clockwise order starting at the upper-left one.
    pub fn corners(&self) -> [Vec2; 4] {
        self.corners
    }

    pub fn upper_left(&self) -> Vec2 {
        self.corners[UPPER_LEFT]
    }

    pub fn upper_right(&self) -> Vec2 {
        self.corners[UPPER_RIGHT]
    }

    pub fn lower_right(&self) -> Vec2 {
        self.corners[LOWER_RIGHT]
    }

    pub fn lower_left(&self) -> Vec2 {
        self.corners[LOWER_LEFT]
    }

    /// Move by an offset, keeping size and rotation.
    pub fn offset(&mut self, dx: i32, dy: i32) {
        self.base.x += dx;
        self.base.y += dy;
        self.corners = compute_corners(&self.base, self.rotation);
    }

    pub fn set_x(&mut self, x: i32) {
        self.base.x = x;
        self.corners = compute_corners(&self.base, self.rotation);
    }

    pub fn set_y(&mut self, y: i32) {
        self.base.y = y;
        self.corners = compute_corners(&self.base, self.rotation);
    }

    /// Ordering key used to sort obstacles: truncated upper-left corner, x first.
    pub fn position_key(&self) -> (i32, i32) {
        let ul = self.upper_left();
        (ul.x as i32, ul.y as i32)
    }

    /// Whether `point` lies inside, using half-open bounds in the rectangle's local frame.
    pub fn contains(&self, point: Vec2) -> bool {
        let d = point - self.upper_left();
        let (sin, cos) = self.rotation.sin_cos();
        let u = d.x * cos + d.y * sin;
        let v = d.y * cos - d.x * sin;
        u >= 0.0 && u < self.base.width as f32 && v >= 0.0 && v < self.base.height as f32
    }

    /// Separating Axis Theorem test against another oriented rectangle.
    ///
    /// Opposite sides are parallel, so two axes per rectangle suffice. Intervals that merely
    /// touch do not count as overlapping.
    pub fn intersects(&self, other: &OrientedRect) -> bool {
        let axes = [
            self.upper_right() - self.upper_left(),
            self.upper_right() - self.lower_right(),
            other.upper_left() - other.lower_left(),
            other.upper_left() - other.upper_right(),
        ];

        axes.into_iter().all(|axis| {
            let (a_min, a_max) = project(&self.corners, axis);
            let (b_min, b_max) = project(&other.corners, axis);
            a_min < b_max && b_min < a_max
        })
    }

    /// Intersection with an axis-aligned rectangle. Empty rectangles never intersect.
    pub fn intersects_rect(&self, rect: &Rect) -> bool {
        if rect.width <= 0 || rect.height <= 0 {
            return false;
        }
        self.intersects(&OrientedRect::axis_aligned(*rect))
    }

    /// True if `a` and `b` are two adjacent corners (in either order), i.e. the segment runs
    /// along one side of this rectangle.
    pub fn corners_share_side(&self, a: Vec2, b: Vec2) -> bool {
        let c = &self.corners;
        (0..4).any(|i| {
            let next = c[(i + 1) % 4];
            (a == c[i] && b == next) || (a == next && b == c[i])
        })
    }

    /// True if `a` and `b` are opposite corners (in either order), i.e. the segment cuts
    /// diagonally through this rectangle.
    pub fn corners_are_diagonal(&self, a: Vec2, b: Vec2) -> bool {
        let c = &self.corners;
        (a == c[UPPER_LEFT] && b == c[LOWER_RIGHT])
            || (a == c[LOWER_RIGHT] && b == c[UPPER_LEFT])
            || (a == c[UPPER_RIGHT] && b == c[LOWER_LEFT])
            || (a == c[LOWER_LEFT] && b == c[UPPER_RIGHT])
    }
}

fn compute_corners(base: &Rect, rotation: f32) -> [Vec2; 4] {
    let pivot = base.center();
    let left = base.left() as f32;
    let right = base.right() as f32;
    let top = base.top() as f32;
    let bottom = base.bottom() as f32;
    [
        Vec2::new(left, top).rotate_about(pivot, rotation),
        Vec2::new(right, top).rotate_about(pivot, rotation),
        Vec2::new(right, bottom).rotate_about(pivot, rotation),
        Vec2::new(left, bottom).rotate_about(pivot, rotation),
    ]
}

fn project(corners: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    corners.iter().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), c| {
        let s = c.dot(axis);
        (lo.min(s), hi.max(s))
    })
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct OrientedRectSerde {
    base: Rect,
    rotation: f32,
}

#[cfg(feature = "serde")]
impl Serialize for OrientedRect {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        OrientedRectSerde {
            base: self.base,
            rotation: self.rotation,
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for OrientedRect {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let data = OrientedRectSerde::deserialize(deserializer)?;
        if data.base.width <= 0 || data.base.height <= 0 {
            return Err(serde::de::Error::custom(
                "oriented rectangle must have a positive size",
            ));
        }
        Ok(OrientedRect::new(data.base, data.rotation))
    }
}
