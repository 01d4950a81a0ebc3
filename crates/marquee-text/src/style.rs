/// Index into the host's registered faces. `FontFace::REGULAR` is always present.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct FontFace(pub u32);

impl FontFace {
    pub const REGULAR: FontFace = FontFace(0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum VAlign {
    Top,
    #[default]
    Middle,
    Bottom,
    Baseline,
}

/// Everything a measurer or canvas needs to know about a run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub font: FontFace,
    pub size: f32,
    /// Multiplier applied to `size` for wrapped lines.
    pub line_height: f32,
    pub h_align: HAlign,
    pub v_align: VAlign,
}

impl TextStyle {
    pub fn new(size: f32) -> Self {
        Self {
            font: FontFace::REGULAR,
            size,
            line_height: 1.0,
            h_align: HAlign::Left,
            v_align: VAlign::Middle,
        }
    }

    pub fn with_font(mut self, font: FontFace) -> Self {
        self.font = font;
        self
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_align(mut self, h: HAlign, v: VAlign) -> Self {
        self.h_align = h;
        self.v_align = v;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(20.0)
    }
}
