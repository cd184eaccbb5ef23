#![forbid(unsafe_code)]

//! Geometric primitives in surface points (origin at top-left, y grows down).

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared euclidean distance to `other`.
    #[inline]
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Component-wise offset.
    #[inline]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// The empty size.
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero or negative.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle for frames, visible bounds, and hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f64,
    /// Top edge (inclusive).
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    #[inline]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    #[inline]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn min_y(&self) -> f64 {
        self.y
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.mid_x(), self.mid_y())
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the half-open rectangle.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.max_x()
            && point.y >= self.y
            && point.y < self.max_y()
    }

    /// True if the two rectangles share any interior area.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.max_x()
            && other.x < self.max_x()
            && self.y < other.max_y()
            && other.y < self.max_y()
    }

    /// Translate the rectangle.
    #[inline]
    pub fn offset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Grow (negative values) or shrink (positive values) every edge.
    ///
    /// Mirrors the usual `insetBy(dx:dy:)` convention.
    #[inline]
    pub fn inset_by(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(
            self.x + dx,
            self.y + dy,
            (self.width - dx * 2.0).max(0.0),
            (self.height - dy * 2.0).max(0.0),
        )
    }
}

/// Edge insets around a container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    /// Create insets with specific values.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Insets with only top and bottom set.
    pub const fn vertical(top: f64, bottom: f64) -> Self {
        Self::new(top, 0.0, bottom, 0.0)
    }

    #[inline]
    pub fn vertical_sum(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Uniform scale followed by a translation: `p -> p * scale + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: f64,
    pub translation: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale: 1.0,
        translation: Point::ZERO,
    };

    /// Scale by `scale` around `anchor`, then shift by `offset`.
    ///
    /// Equivalent to `translate(anchor) * translate(offset) * scale * translate(-anchor)`,
    /// so `anchor` maps to `anchor + offset`.
    pub fn scaled_around(anchor: Point, offset: Point, scale: f64) -> Self {
        Self {
            scale,
            translation: Point::new(
                anchor.x + offset.x - anchor.x * scale,
                anchor.y + offset.y - anchor.y * scale,
            ),
        }
    }

    #[inline]
    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.translation.x,
            point.y * self.scale + self.translation.y,
        )
    }

    #[inline]
    pub fn apply_rect(&self, rect: Rect) -> Rect {
        let origin = self.apply(rect.origin());
        Rect::new(
            origin.x,
            origin.y,
            rect.width * self.scale,
            rect.height * self.scale,
        )
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Round `value` down to the device pixel grid (`scale` pixels per point).
#[inline]
pub fn floor_to_pixels(value: f64, scale: f64) -> f64 {
    if scale <= 0.0 {
        return value.floor();
    }
    // Tolerate representation error so exact pixel multiples are not lost.
    (value * scale + 1e-9).floor() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(r.contains(Point::new(0.0, 0.0)));
        assert!(r.contains(Point::new(9.99, 9.99)));
        assert!(!r.contains(Point::new(10.0, 5.0)));
        assert!(!r.contains(Point::new(5.0, 10.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(5.0, 5.0, 0.0, 10.0);
        assert!(!r.contains(Point::new(5.0, 6.0)));
    }

    #[test]
    fn rect_intersects_edges() {
        let a = Rect::new(0.0, 0.0, 5.0, 5.0);
        assert!(a.intersects(&Rect::new(4.0, 4.0, 5.0, 5.0)));
        // Shared edge is not an overlap.
        assert!(!a.intersects(&Rect::new(5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn inset_by_negative_grows() {
        let r = Rect::new(10.0, 10.0, 4.0, 4.0).inset_by(-4.0, -2.0);
        assert_eq!(r, Rect::new(6.0, 8.0, 12.0, 8.0));
    }

    #[test]
    fn center_and_edges() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 60.0);
        assert_eq!(r.center(), Point::new(25.0, 40.0));
    }

    #[test]
    fn scaled_around_keeps_anchor_plus_offset() {
        let anchor = Point::new(50.0, 80.0);
        let t = Transform::scaled_around(anchor, Point::new(3.0, -2.0), 2.5);
        assert_eq!(t.apply(anchor), Point::new(53.0, 78.0));
    }

    #[test]
    fn identity_transform_is_noop() {
        let r = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Transform::IDENTITY.apply_rect(r), r);
        assert!(Transform::scaled_around(Point::new(9.0, 9.0), Point::ZERO, 1.0).is_identity());
    }

    #[test]
    fn floor_to_pixels_uses_scale() {
        assert!((floor_to_pixels(129.34, 3.0) - 388.0 / 3.0).abs() < 1e-9);
        assert!((floor_to_pixels(388.0 / 3.0, 3.0) - 388.0 / 3.0).abs() < 1e-9);
        assert_eq!(floor_to_pixels(10.7, 1.0), 10.0);
        assert_eq!(floor_to_pixels(10.7, 0.0), 10.0);
    }
}
