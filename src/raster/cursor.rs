//! Write position for one rendering pass.

use super::RasterError;

/// Cursor over a canvas divided into `letter_size` square cells.
///
/// The position is the top-left corner of the next cell. Row wrap is applied
/// lazily at the start of a write, then the overflow check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterCursor {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    letter_size: u32,
}

impl RasterCursor {
    pub fn new(width: u32, height: u32, letter_size: u32) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
            letter_size,
        }
    }

    pub fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    pub fn letter_size(&self) -> u32 {
        self.letter_size
    }

    /// Claim the next cell and return its top-left corner.
    ///
    /// # Errors
    /// [`RasterError::Overflow`] once the cursor has moved past the bottom of
    /// the canvas. The cursor does not move on error.
    pub fn next_cell(&mut self) -> Result<(u32, u32), RasterError> {
        if self.x >= self.width {
            self.x = 0;
            self.y += self.letter_size;
        }

        if self.y >= self.height {
            return Err(RasterError::Overflow { y: self.y });
        }

        let cell = (self.x, self.y);
        self.x += self.letter_size;
        Ok(cell)
    }
}
