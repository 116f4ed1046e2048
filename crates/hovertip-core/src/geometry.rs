#![forbid(unsafe_code)]

//! Pixel-space geometric primitives.
//!
//! All rectangles are viewport-relative (the coordinates a DOM
//! `getBoundingClientRect` style measurement produces); page coordinates
//! are obtained by adding the scroll offsets carried by [`Viewport`].

/// An axis-aligned rectangle in f64 CSS pixels.
///
/// Viewport-relative, origin at the top-left of the visible area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
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

    /// Create a rectangle from origin with the given size.
    #[inline]
    pub const fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Left edge (alias for x).
    #[inline]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Top edge (alias for y).
    #[inline]
    pub const fn top(&self) -> f64 {
        self.y
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// The rectangle's size.
    #[inline]
    pub const fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Whether either dimension collapses to nothing (unmeasured element).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// A width/height pair in f64 CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether either dimension collapses to nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl From<Rect> for Size {
    fn from(rect: Rect) -> Self {
        rect.size()
    }
}

/// Visible viewport metrics plus the current scroll offsets.
///
/// `width`/`height` describe the visible area; `scroll_x`/`scroll_y`
/// translate viewport-relative coordinates into page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Visible width in pixels.
    pub width: f64,
    /// Visible height in pixels.
    pub height: f64,
    /// Horizontal scroll offset of the page.
    pub scroll_x: f64,
    /// Vertical scroll offset of the page.
    pub scroll_y: f64,
}

impl Viewport {
    /// Create viewport metrics with no scroll offset.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Set the scroll offsets.
    #[must_use]
    pub const fn scrolled(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }

    /// Left edge of the visible area in page coordinates.
    #[inline]
    pub const fn page_left(&self) -> f64 {
        self.scroll_x
    }

    /// Top edge of the visible area in page coordinates.
    #[inline]
    pub const fn page_top(&self) -> f64 {
        self.scroll_y
    }

    /// Right edge of the visible area in page coordinates.
    #[inline]
    pub fn page_right(&self) -> f64 {
        self.scroll_x + self.width
    }

    /// Bottom edge of the visible area in page coordinates.
    #[inline]
    pub fn page_bottom(&self) -> f64 {
        self.scroll_y + self.height
    }
}
