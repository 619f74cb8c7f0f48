//! Color palette for channel prefixes
//!
//! Newly discovered channels are assigned a color tag from a fixed rotation
//! so adjacent channels stay visually distinct in console output. Tags are
//! either named colors (`"red"`) or `#RRGGBB` hex strings; they are display
//! metadata only and never affect enablement.

use serde::{Deserialize, Serialize};

/// Default rotation of nine contrast hues assigned to newly discovered
/// channels.
pub const DEFAULT_PALETTE: [&str; 9] = [
    "#008080", // teal
    "#FF00FF", // magenta
    "#800000", // maroon
    "#00FF00", // green
    "#FFA500", // orange
    "#800080", // purple
    "#0000FF", // blue
    "#FFFF00", // yellow
    "#A52A2A", // brown
];

/// Check whether a color tag is a `#RRGGBB` hex string
pub fn is_hex_color_tag(tag: &str) -> bool {
    regex::Regex::new(r"^#[0-9A-Fa-f]{6}$")
        .map(|re| re.is_match(tag))
        .unwrap_or(false)
}

/// Check whether a color tag is plausibly displayable: a `#RRGGBB` hex string
/// or a named color (purely alphabetic).
pub fn is_valid_color_tag(tag: &str) -> bool {
    if tag.is_empty() {
        return false;
    }
    is_hex_color_tag(tag) || tag.chars().all(|c| c.is_ascii_alphabetic())
}

/// Round-robin color assignment state
///
/// The cursor wraps modulo the palette length, so the same entry repeats once
/// a registry holds more channels than the palette has slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorPalette {
    options: Vec<String>,
    next_index: usize,
}

impl ColorPalette {
    /// Create a palette with the default nine-hue rotation
    pub fn new() -> Self {
        Self::with_options(DEFAULT_PALETTE.iter().map(|s| s.to_string()).collect())
    }

    /// Create a palette with a custom rotation
    pub fn with_options(options: Vec<String>) -> Self {
        Self {
            options,
            next_index: 0,
        }
    }

    /// Number of slots in the rotation
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// Check if the rotation has no slots
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Return the next color tag and advance the cursor
    pub fn next_color(&mut self) -> String {
        if self.options.is_empty() {
            return String::new();
        }
        let index = self.next_index % self.options.len();
        self.next_index = (index + 1) % self.options.len();
        self.options[index].clone()
    }

    /// Replace the rotation. The cursor is kept; `next_color` wraps it into
    /// the new range.
    pub fn set_options(&mut self, options: Vec<String>) {
        self.options = options;
    }

    /// Reposition the cursor, used after a snapshot import so subsequently
    /// auto-created channels continue the rotation instead of restarting at
    /// slot zero.
    pub fn set_cursor(&mut self, assigned_count: usize) {
        if self.options.is_empty() {
            self.next_index = 0;
        } else {
            self.next_index = assigned_count % self.options.len();
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::new()
    }
}
