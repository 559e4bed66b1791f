//! # Shapeboard Core
//!
//! Core types for the Shapeboard canvas editor: axis-aligned geometry
//! primitives and the shape value model shared by the editor state machine
//! and the persistence layer.

pub mod geometry;
pub mod shapes;

pub use geometry::{Point, Rect, Size};
pub use shapes::{Border, Color, SelectableShape, Shape, ShapeKind, StoredShape};
