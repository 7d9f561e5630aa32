//! Core geometry types for the rule engine

use std::fmt;

use serde::Deserialize;

use super::error::LayoutError;

/// A named reference point or dimension of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    Width,
    Height,
    #[serde(alias = "center_x")]
    HorCenter,
    #[serde(alias = "center_y")]
    VerCenter,
    /// Text baseline, only known to the host
    Baseline,
}

impl Edge {
    /// Axis a value on this edge moves along
    pub fn axis(self) -> Axis {
        match self {
            Edge::Left | Edge::Right | Edge::Width | Edge::HorCenter => Axis::Horizontal,
            Edge::Top | Edge::Bottom | Edge::Height | Edge::VerCenter | Edge::Baseline => {
                Axis::Vertical
            }
        }
    }

    /// True for `Width` and `Height`, which are sizes rather than positions
    pub fn is_dimension(self) -> bool {
        matches!(self, Edge::Width | Edge::Height)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edge::Left => write!(f, "left"),
            Edge::Right => write!(f, "right"),
            Edge::Top => write!(f, "top"),
            Edge::Bottom => write!(f, "bottom"),
            Edge::Width => write!(f, "width"),
            Edge::Height => write!(f, "height"),
            Edge::HorCenter => write!(f, "hor_center"),
            Edge::VerCenter => write!(f, "ver_center"),
            Edge::Baseline => write!(f, "baseline"),
        }
    }
}

/// Layout axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Width and height in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Space reserved around the laid-out area of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Insets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Insets {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Same inset on every side
    pub fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> i32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> i32 {
        self.top.saturating_add(self.bottom)
    }
}

/// A mutable axis-aligned rectangle in integer pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Rectangle at the origin with the given size
    pub fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Right edge x-coordinate
    pub fn x2(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge y-coordinate
    pub fn y2(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    pub fn hor_center(&self) -> i32 {
        self.x.saturating_add(self.width / 2)
    }

    pub fn ver_center(&self) -> i32 {
        self.y.saturating_add(self.height / 2)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Reposition horizontally, keeping the width
    pub fn move_x(&mut self, x: i32) {
        self.x = x;
    }

    /// Reposition vertically, keeping the height
    pub fn move_y(&mut self, y: i32) {
        self.y = y;
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x = self.x.saturating_add(dx);
        self.y = self.y.saturating_add(dy);
    }

    /// Copy of this rectangle shifted by (dx, dy)
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        let mut rect = *self;
        rect.translate(dx, dy);
        rect
    }

    /// Move the right edge to `x2`, keeping `x`
    pub fn set_x2(&mut self, x2: i32) {
        self.width = x2.saturating_sub(self.x);
    }

    /// Move the bottom edge to `y2`, keeping `y`
    pub fn set_y2(&mut self, y2: i32) {
        self.height = y2.saturating_sub(self.y);
    }

    /// Shift vertically so that a baseline `offset` pixels below the top lands on `value`
    pub fn align_baseline(&mut self, value: i32, offset: i32) {
        let current = self.y.saturating_add(offset);
        self.y = self.y.saturating_add(value.saturating_sub(current));
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let x2 = self.x2().max(other.x2());
        let y2 = self.y2().max(other.y2());
        Rect::new(x, y, x2.saturating_sub(x), y2.saturating_sub(y))
    }

    /// Read the value of an edge.
    ///
    /// `Edge::Baseline` depends on the component's content and cannot be
    /// answered from the geometry alone.
    pub fn position(&self, edge: Edge) -> Result<i32, LayoutError> {
        match edge {
            Edge::Left => Ok(self.x),
            Edge::Right => Ok(self.x2()),
            Edge::Top => Ok(self.y),
            Edge::Bottom => Ok(self.y2()),
            Edge::Width => Ok(self.width),
            Edge::Height => Ok(self.height),
            Edge::HorCenter => Ok(self.hor_center()),
            Edge::VerCenter => Ok(self.ver_center()),
            Edge::Baseline => Err(LayoutError::unsupported_edge(edge, "bare rectangle")),
        }
    }

    /// Write `value` onto an edge using the per-edge setter semantics.
    pub fn set_position(&mut self, edge: Edge, value: i32) -> Result<(), LayoutError> {
        match edge {
            Edge::Left => self.move_x(value),
            Edge::Right => self.set_x2(value),
            Edge::Top => self.move_y(value),
            Edge::Bottom => self.set_y2(value),
            Edge::Width => self.width = value,
            Edge::Height => self.height = value,
            Edge::HorCenter => self.move_x(value.saturating_sub(self.width / 2)),
            Edge::VerCenter => self.move_y(value.saturating_sub(self.height / 2)),
            Edge::Baseline => {
                return Err(LayoutError::unsupported_edge(edge, "bare rectangle"));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.x, self.y, self.width, self.height)
    }
}
