pub use kurbo::{Affine, BezPath, CubicBez, Point, Rect, Vec2};

/// Axis-aligned bounds in artwork document space.
///
/// Document space is y-up: `top >= bottom` for any non-empty box. [`Bounds::EMPTY`] is the
/// union identity, so folding any number of boxes into it yields their enclosing box.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Bounds {
    /// Inverted sentinel that acts as the identity for [`Bounds::union`].
    pub const EMPTY: Self = Self {
        left: f64::INFINITY,
        top: f64::NEG_INFINITY,
        right: f64::NEG_INFINITY,
        bottom: f64::INFINITY,
    };

    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn union(self, other: Self) -> Self {
        Self {
            left: self.left.min(other.left),
            top: self.top.max(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// True for the sentinel and for any inverted box. NaN coordinates also count as empty.
    pub fn is_empty(self) -> bool {
        !(self.left <= self.right && self.bottom <= self.top)
    }

    pub fn width(self) -> f64 {
        self.right - self.left
    }

    pub fn height(self) -> f64 {
        self.top - self.bottom
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(self.left, self.bottom, self.right, self.top)
    }

    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self {
            left: rect.x0,
            top: rect.y1,
            right: rect.x1,
            bottom: rect.y0,
        }
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Straight (non-premultiplied) RGBA8 color as stored in artwork paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn css(self) -> String {
        if self.a == 255 {
            format!("rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = f64::from(self.a) / 255.0;
            format!("rgba({}, {}, {}, {:.3})", self.r, self.g, self.b, alpha)
        }
    }
}

/// Index of an output canvas. `CanvasId(0)` is always the visible main canvas.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CanvasId(pub u32);

impl CanvasId {
    pub const MAIN: Self = Self(0);

    pub fn is_main(self) -> bool {
        self == Self::MAIN
    }
}

/// Canvas planned for the output page.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct CanvasDesc {
    pub id: CanvasId,
    pub width: f64,
    pub height: f64,
    /// Hidden canvases back fill patterns and are never displayed directly.
    pub hidden: bool,
}

/// Stable index of a function inside a [`crate::FunctionCollection`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FunctionId(pub u32);

impl FunctionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What happened to one `key:value` option handed to a function or clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamOutcome {
    Applied,
    /// The key is not recognized by the receiver.
    Unknown,
    /// The key is recognized but the value could not be used.
    Malformed,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
