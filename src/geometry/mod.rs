//! Geometric primitives for field placement and appearance bounding boxes.
//!
//! Coordinates are PDF user space: the origin is the lower-left corner and
//! y grows upwards.

use crate::object::Object;
use serde::{Deserialize, Serialize};

/// Width and height of a drawable area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent
    pub width: f32,
    /// Vertical extent
    pub height: f32,
}

impl Size {
    /// Create a new size.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when either extent is zero, negative or not a number.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the lower-left corner
    pub x: f32,
    /// Y coordinate of the lower-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_form_appearance::geometry::Rect;
    ///
    /// let rect = Rect::new(72.0, 700.0, 122.653, 12.707);
    /// assert_eq!(rect.size().width, 122.653);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Rectangle anchored at the origin with the given size.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Size of the rectangle, independent of its position.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The same rectangle moved to the origin (used for form bounding boxes).
    pub fn at_origin(&self) -> Rect {
        Rect::from_size(self.size())
    }

    /// Serialize as a PDF rectangle array `[llx lly urx ury]`.
    pub fn to_pdf_array(&self) -> Object {
        Object::Array(vec![
            Object::Real(self.x as f64),
            Object::Real(self.y as f64),
            Object::Real(self.right() as f64),
            Object::Real(self.top() as f64),
        ])
    }

    /// Read a PDF rectangle array.
    ///
    /// Corners may come in any order; they are normalized so width and
    /// height are non-negative. Returns `None` unless the array holds four
    /// numbers.
    pub fn from_pdf_array(obj: &Object) -> Option<Rect> {
        let arr = obj.as_array()?;
        if arr.len() != 4 {
            return None;
        }
        let mut coords = [0.0f32; 4];
        for (slot, item) in coords.iter_mut().zip(arr) {
            *slot = item.as_number()? as f32;
        }
        let [x0, y0, x1, y1] = coords;
        Some(Rect::from_points(x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)))
    }
}
