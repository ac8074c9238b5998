//! Geometry primitives shared by every layout.
//!
//! All values are **logical points**. Backends convert to physical pixels; the
//! layout engine never sees a scale factor.
//!
//! Most algorithms in this workspace are written once against a main axis and
//! a cross axis. The [`Axis`] accessors on [`Point`], [`Size`] and
//! [`EdgeInsets`] are what make a vertical stack the transpose of a horizontal
//! one.

// ============================================================================
// Axis
// ============================================================================

/// The primary direction of a stacking or list layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Axis {
    /// Items advance left to right.
    Horizontal,
    /// Items advance top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    /// Returns the perpendicular axis.
    #[must_use]
    pub const fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

// ============================================================================
// Point
// ============================================================================

/// A position in the parent's coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    /// Horizontal offset.
    pub x: f32,
    /// Vertical offset.
    pub y: f32,
}

impl Point {
    /// A point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// The origin.
    #[must_use]
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    /// Builds a point from main and cross axis coordinates.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Coordinate along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

// ============================================================================
// Size
// ============================================================================

/// Width and height of a measured item.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    /// A size of `width` by `height`.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// An empty size.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }

    /// Whether both extents are zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }

    /// Builds a size from main and cross axis extents.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Horizontal => Self::new(main, cross),
            Axis::Vertical => Self::new(cross, main),
        }
    }

    /// Extent along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Clamps negative and NaN dimensions to zero.
    ///
    /// A misbehaving content measurement must never corrupt the frames of its
    /// siblings, so every algorithm runs child sizes through this first.
    #[must_use]
    pub const fn sanitized(self) -> Self {
        Self {
            width: clamp_dimension(self.width),
            height: clamp_dimension(self.height),
        }
    }
}

/// Negative and NaN values become zero, everything else passes through.
#[must_use]
pub const fn clamp_dimension(value: f32) -> f32 {
    if value.is_nan() || value < 0.0 {
        0.0
    } else {
        value
    }
}

// ============================================================================
// Rect
// ============================================================================

/// An item frame, a viewport, or the bounds handed to [`place`](crate::Layout::place).
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rect {
    origin: Point,
    size: Size,
}

impl Rect {
    /// A rectangle at `origin`.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// A rectangle of `size` at the origin.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self {
            origin: Point::zero(),
            size,
        }
    }

    /// Shorthand for `Rect::new(Point::new(x, y), Size::new(width, height))`.
    #[must_use]
    pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.origin
    }

    /// Extent.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Left edge.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.origin.x
    }

    /// Top edge.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.origin.y
    }

    /// Width.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.size.width
    }

    /// Height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.size.height
    }

    /// Right edge.
    #[must_use]
    pub const fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub const fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Leading edge along `axis`.
    #[must_use]
    pub const fn min_along(&self, axis: Axis) -> f32 {
        self.origin.along(axis)
    }

    /// Trailing edge along `axis`.
    #[must_use]
    pub const fn max_along(&self, axis: Axis) -> f32 {
        self.origin.along(axis) + self.size.along(axis)
    }

    /// Inset the rectangle by `insets`, never producing a negative size.
    #[must_use]
    pub fn inset_by(&self, insets: &EdgeInsets) -> Self {
        Self::new(
            Point::new(self.origin.x + insets.leading, self.origin.y + insets.top),
            Size::new(
                (self.size.width - insets.horizontal()).max(0.0),
                (self.size.height - insets.vertical()).max(0.0),
            ),
        )
    }

    /// Open-interval overlap on both axes. Touching edges do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x() < other.max_x()
            && other.x() < self.max_x()
            && self.y() < other.max_y()
            && other.y() < self.max_y()
    }

    /// Whether an item with this frame counts as visible in `viewport`.
    ///
    /// The item's trailing edges are exclusive and the viewport's trailing
    /// edges are inclusive: an item ending exactly where the viewport starts
    /// is hidden, an item starting exactly where the viewport ends is shown.
    #[must_use]
    pub fn is_visible_in(&self, viewport: &Self) -> bool {
        self.is_visible_along(viewport, Axis::Horizontal)
            && self.is_visible_along(viewport, Axis::Vertical)
    }

    /// One-axis half of [`is_visible_in`](Self::is_visible_in).
    #[must_use]
    pub fn is_visible_along(&self, viewport: &Self, axis: Axis) -> bool {
        self.min_along(axis) <= viewport.max_along(axis)
            && self.max_along(axis) > viewport.min_along(axis)
    }
}

// ============================================================================
// EdgeInsets
// ============================================================================

/// Insets applied to the four edges of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EdgeInsets {
    /// Top inset in points.
    pub top: f32,
    /// Bottom inset in points.
    pub bottom: f32,
    /// Leading inset in points (left in LTR).
    pub leading: f32,
    /// Trailing inset in points (right in LTR).
    pub trailing: f32,
}

impl EdgeInsets {
    /// Zero insets.
    pub const ZERO: Self = Self::all(0.0);

    /// Creates an [`EdgeInsets`] value with explicit edges.
    #[must_use]
    pub const fn new(top: f32, bottom: f32, leading: f32, trailing: f32) -> Self {
        Self {
            top,
            bottom,
            leading,
            trailing,
        }
    }

    /// Returns equal insets on every edge.
    #[must_use]
    pub const fn all(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns symmetric vertical and horizontal insets.
    #[must_use]
    pub const fn symmetric(vertical: f32, horizontal: f32) -> Self {
        Self::new(vertical, vertical, horizontal, horizontal)
    }

    /// Leading plus trailing.
    #[must_use]
    pub const fn horizontal(&self) -> f32 {
        self.leading + self.trailing
    }

    /// Top plus bottom.
    #[must_use]
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Total inset along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// The inset before content along `axis` (leading or top).
    #[must_use]
    pub const fn start(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.leading,
            Axis::Vertical => self.top,
        }
    }

    /// Both totals as a size.
    #[must_use]
    pub const fn total(&self) -> Size {
        Size::new(self.horizontal(), self.vertical())
    }
}

impl From<f32> for EdgeInsets {
    fn from(value: f32) -> Self {
        Self::all(value)
    }
}

// ============================================================================
// ProposalSize
// ============================================================================

/// The space a parent offers a child during measurement.
///
/// `None` on an axis means unbounded: the child reports its ideal extent.
/// `Some(f32::INFINITY)` is treated the same after [`sanitized`](Self::sanitized).
/// The answer may exceed the proposal; overflow is the parent's concern.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct ProposalSize {
    /// Width proposal: `None` = unbounded.
    pub width: Option<f32>,
    /// Height proposal: `None` = unbounded.
    pub height: Option<f32>,
}

impl ProposalSize {
    /// A proposal from optional extents; `None` leaves that axis unbounded.
    #[must_use]
    pub fn new(width: impl Into<Option<f32>>, height: impl Into<Option<f32>>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
        }
    }

    /// Unbounded on both axes - asks for ideal size.
    pub const UNSPECIFIED: Self = Self {
        width: None,
        height: None,
    };

    /// A fully bounded proposal matching `size`.
    #[must_use]
    pub const fn exact(size: Size) -> Self {
        Self {
            width: Some(size.width),
            height: Some(size.height),
        }
    }

    /// Builds a proposal from main and cross axis extents.
    #[must_use]
    pub const fn from_axes(axis: Axis, main: Option<f32>, cross: Option<f32>) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: main,
                height: cross,
            },
            Axis::Vertical => Self {
                width: cross,
                height: main,
            },
        }
    }

    /// Proposal along `axis`.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> Option<f32> {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Normalizes the proposal: infinite extents become `None` and negative
    /// or NaN extents clamp to zero.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let fix = |value: Option<f32>| match value {
            Some(v) if v.is_infinite() && v > 0.0 => None,
            Some(v) => Some(clamp_dimension(v)),
            None => None,
        };
        Self {
            width: fix(self.width),
            height: fix(self.height),
        }
    }

    /// Shrinks every bounded extent by `insets`, clamping at zero.
    #[must_use]
    pub fn inset_by(self, insets: &EdgeInsets) -> Self {
        Self {
            width: self.width.map(|w| (w - insets.horizontal()).max(0.0)),
            height: self.height.map(|h| (h - insets.vertical()).max(0.0)),
        }
    }

    /// The same proposal with a different width.
    #[must_use]
    pub const fn with_width(self, width: Option<f32>) -> Self {
        Self {
            width,
            height: self.height,
        }
    }

    /// The same proposal with a different height.
    #[must_use]
    pub const fn with_height(self, height: Option<f32>) -> Self {
        Self {
            width: self.width,
            height,
        }
    }
}

impl From<Size> for ProposalSize {
    fn from(size: Size) -> Self {
        Self::exact(size)
    }
}

// ============================================================================
// Tests
// ============================================================================
