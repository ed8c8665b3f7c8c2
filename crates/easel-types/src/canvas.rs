//! Fixed-size grid of packed colors.

use crate::Color;
use serde::Serialize;

/// Canvas width in cells.
pub const WIDTH: usize = 64;
/// Canvas height in cells.
pub const HEIGHT: usize = 36;

/// A `width * height` grid of packed colors.
///
/// Cells are stored column by column: the cell at `(x, y)` lives at flat
/// position `x * height + y`, which is the order the extractor reads the
/// guest's `image` table in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl Canvas {
    /// A blank (all black) canvas of the fixed sandbox dimensions.
    pub fn new() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            pixels: vec![Color::BLACK; WIDTH * HEIGHT],
        }
    }

    /// Wrap a column-major pixel vector.
    ///
    /// Returns `None` when `pixels.len() != width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All cells in column-major order.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| x * self.height + y)
    }

    /// Checked cell lookup.
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// The color at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`. The bounds are fixed and
    /// known to the caller; use [`Canvas::get`] for a checked lookup.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        match self.index(x, y) {
            Some(i) => self.pixels[i],
            None => panic!(
                "pixel ({x}, {y}) out of bounds for {}x{} canvas",
                self.width, self.height
            ),
        }
    }

    /// Overwrite one cell. Returns `false` if `(x, y)` is out of range.
    pub fn set(&mut self, x: usize, y: usize, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.pixels[i] = color;
                true
            }
            None => false,
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_black() {
        let canvas = Canvas::new();
        assert_eq!(canvas.pixels().len(), WIDTH * HEIGHT);
        assert!(canvas.pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn pixel_uses_column_major_layout() {
        let mut canvas = Canvas::new();
        assert!(canvas.set(2, 5, Color::from_packed(0xabcdef)));
        assert_eq!(canvas.pixels()[2 * HEIGHT + 5].packed(), 0xabcdef);
        assert_eq!(canvas.pixel(2, 5).packed(), 0xabcdef);
        assert_eq!(canvas.pixel(5, 2), Color::BLACK);
    }

    #[test]
    fn out_of_range_lookups() {
        let mut canvas = Canvas::new();
        assert_eq!(canvas.get(WIDTH, 0), None);
        assert_eq!(canvas.get(0, HEIGHT), None);
        assert!(!canvas.set(0, HEIGHT, Color::BLACK));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn pixel_panics_out_of_range() {
        Canvas::new().pixel(0, HEIGHT);
    }

    #[test]
    fn from_pixels_checks_length() {
        assert!(Canvas::from_pixels(2, 2, vec![Color::BLACK; 3]).is_none());
        assert!(Canvas::from_pixels(2, 2, vec![Color::BLACK; 4]).is_some());
    }

    #[test]
    fn set_writes_column_major() {
        let mut canvas = Canvas::new();
        assert!(canvas.set(1, 1, Color::from_packed(7)));
        assert_eq!(canvas.pixels()[HEIGHT + 1], Color::from_packed(7));
    }
}
