//! Glyph tables used by the tone and edge stages.

/// Tone ramp (10 levels), indexed by luminance bucket.
/// Ordered from darkest (space) to brightest (full square), so brighter
/// cells render as heavier glyphs.
pub const GLYPH_RAMP: [char; 10] = [' ', '.', ':', 'c', 'o', 'C', 'O', '0', '@', '■'];

/// Number of luminance buckets.
pub const RAMP_LEVELS: usize = GLYPH_RAMP.len();

/// Edge glyph for a gradient direction near 0 (vertical edge).
pub const EDGE_VERTICAL: char = '|';

/// Edge glyph for a gradient direction near π/4.
pub const EDGE_DIAGONAL_DOWN: char = '\\';

/// Edge glyph for a gradient direction near π/2 (horizontal edge).
pub const EDGE_HORIZONTAL: char = '_';

/// Edge glyph for a gradient direction near 3π/4.
pub const EDGE_DIAGONAL_UP: char = '/';
