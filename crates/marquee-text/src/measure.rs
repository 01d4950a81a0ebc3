use crate::style::TextStyle;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
    pub lines: usize,
}

/// Measures text for layout. Widths are unrounded; callers round up.
pub trait TextMeasurer {
    /// Single line, no wrapping.
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    /// Wrapped to `box_width`, lines spaced by `style.size * style.line_height`.
    fn measure_box(&self, text: &str, style: &TextStyle, box_width: f32) -> TextMetrics;
}

/// Every codepoint advances by `advance_ratio * size`. Line height of a single
/// line is exactly `size`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f32,
}

impl MonospaceMeasurer {
    pub fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }

    fn advance(&self, style: &TextStyle) -> f32 {
        style.size * self.advance_ratio
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        if text.is_empty() {
            return TextMetrics::default();
        }
        TextMetrics {
            width: text.chars().count() as f32 * self.advance(style),
            height: style.size,
            lines: 1,
        }
    }

    fn measure_box(&self, text: &str, style: &TextStyle, box_width: f32) -> TextMetrics {
        let advance = self.advance(style);
        let max_cols = if advance > 0.0 {
            ((box_width / advance).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = 0usize;
        let mut widest = 0usize;
        for paragraph in text.split('\n') {
            let mut col = 0usize;
            lines += 1;
            for word in paragraph.split_whitespace() {
                let len = word.chars().count();
                let needed = if col == 0 { len } else { col + 1 + len };
                if col > 0 && needed > max_cols {
                    widest = widest.max(col);
                    lines += 1;
                    col = len;
                } else {
                    col = needed;
                }
            }
            widest = widest.max(col);
        }
        if text.is_empty() {
            lines = 0;
        }

        TextMetrics {
            width: (widest as f32 * advance).min(box_width.max(0.0)),
            height: lines as f32 * style.size * style.line_height,
            lines,
        }
    }
}
