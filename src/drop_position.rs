//! Drop-position resolution: pointer offset to insertion index.
//!
//! The renderer measures the task cards of the column under the pointer and
//! hands their vertical extents here, top to bottom. Offsets are relative to
//! the top of the column's content area; `ElementBounds::relative_to` and
//! `pointer_offset` convert from client coordinates.

#[cfg(test)]
#[path = "drop_position_test.rs"]
mod drop_position_test;

/// Vertical extent of one rendered task card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBounds {
    pub top: f64,
    pub height: f64,
}

impl ElementBounds {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Re-express client-space bounds relative to a container whose top edge
    /// sits at `container_top`.
    #[must_use]
    pub fn relative_to(self, container_top: f64) -> Self {
        Self { top: self.top - container_top, height: self.height }
    }

    /// Vertical midpoint of the card.
    #[must_use]
    pub fn midpoint(self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Pointer offset within a container, from client coordinates.
#[must_use]
pub fn pointer_offset(client_y: f64, container_top: f64) -> f64 {
    client_y - container_top
}

/// Index at which a dragged task would land.
///
/// Returns the position of the first card whose midpoint lies strictly below
/// the pointer, or `elements.len()` (append) when there is none. The index
/// counts the cards as rendered, so if the dragged task itself is among them
/// it is still counted.
#[must_use]
pub fn insertion_index(pointer_offset: f64, elements: &[ElementBounds]) -> usize {
    elements.iter().position(|el| pointer_offset < el.midpoint()).unwrap_or(elements.len())
}
