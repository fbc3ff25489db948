use unicode_width::UnicodeWidthStr;

use crate::models::scene::{TextAnchor, TextMetrics, TextNode};
use crate::models::Color;

// Average advance of a proportional sans glyph, in ems per terminal column.
const EM_PER_COLUMN: f64 = 0.56;
const ASCENT_EM: f64 = 0.77;
const DESCENT_EM: f64 = 0.23;

/// Layout-only text extent; real shaping happens in the backend.
pub fn measure(content: &str, size: f64, letter_spacing: f64) -> TextMetrics {
    let columns = UnicodeWidthStr::width(content) as f64;
    let gaps = content.chars().count().saturating_sub(1) as f64;
    TextMetrics {
        advance: columns * size * EM_PER_COLUMN + gaps * letter_spacing,
        ascent: size * ASCENT_EM,
        descent: size * DESCENT_EM,
    }
}

/// Text style shared by several runs.
#[derive(Debug, Clone, Copy)]
pub struct TextStyle {
    pub size: f64,
    pub weight: u16,
    pub color: Color,
    pub letter_spacing: f64,
}

impl TextStyle {
    pub fn new(size: f64, weight: u16, color: Color) -> Self {
        Self {
            size,
            weight,
            color,
            letter_spacing: 0.0,
        }
    }

    pub fn spaced(self, letter_spacing: f64) -> Self {
        Self {
            letter_spacing,
            ..self
        }
    }

    /// Horizontally centred run whose cap top sits at `top`.
    pub fn centered(&self, content: impl Into<String>, x: f64, top: f64) -> TextNode {
        let content = content.into();
        let metrics = measure(&content, self.size, self.letter_spacing);
        TextNode {
            x,
            y: top + metrics.ascent,
            content,
            size: self.size,
            weight: self.weight,
            color: self.color,
            anchor: TextAnchor::Middle,
            letter_spacing: self.letter_spacing,
            metrics,
        }
    }

    /// Line height used when stacking runs.
    pub fn line_height(&self) -> f64 {
        self.size * (ASCENT_EM + DESCENT_EM)
    }
}
