//! Shape value model.
//!
//! Shapes are immutable value records; "mutating" a placed shape produces a
//! new record that is assigned back into its arena slot.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// A CSS-style color string, e.g. `"#818181"`.
pub type Color = String;

/// The geometric kind of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Triangle,
}

/// Border styling for a shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Border {
    /// Border width in pixels, non-negative.
    pub width: f64,
    pub color: Option<Color>,
}

impl Border {
    /// Creates a border of the given width with no color set.
    pub fn new(width: f64) -> Self {
        Self { width, color: None }
    }

    /// Sets the border color.
    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// An unplaced shape: kind, dimensions and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub size: Size,
    pub fill_color: Option<Color>,
    pub border: Border,
}

impl Shape {
    /// Creates a shape of the given kind and dimensions with default styling.
    pub fn new(kind: ShapeKind, width: f64, height: f64) -> Self {
        Self {
            kind,
            size: Size::new(width, height),
            fill_color: None,
            border: Border::new(0.0),
        }
    }

    /// Sets the fill color.
    pub fn with_fill(mut self, color: impl Into<Color>) -> Self {
        self.fill_color = Some(color.into());
        self
    }

    /// Sets the border.
    pub fn with_border(mut self, border: Border) -> Self {
        self.border = border;
        self
    }
}

/// A shape placed on the workspace, anchored by the top-left corner of its
/// bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredShape {
    #[serde(flatten)]
    pub shape: Shape,
    pub position: Point,
}

impl StoredShape {
    /// Places a shape at the given position.
    pub fn new(shape: Shape, position: Point) -> Self {
        Self { shape, position }
    }

    /// Returns the shape's bounding box as `(position, position + size)`.
    ///
    /// Already in canonical min/max order since sizes are non-negative.
    pub fn bounding_box(&self) -> Rect {
        Rect::new(
            self.position,
            self.position
                .translated(self.shape.size.width, self.shape.size.height),
        )
    }

    /// Returns a copy translated by the given deltas.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            shape: self.shape.clone(),
            position: self.position.translated(dx, dy),
        }
    }
}

/// A shape paired with its current selection state, as handed to the
/// presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableShape {
    pub shape: Shape,
    pub selected: bool,
}
