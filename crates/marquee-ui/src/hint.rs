//! Button hints shown in a frame footer, e.g. "(A) OK  (B) Back".

use marquee_core::{DrawCtx, LayoutCtx, Rect, View, ViewBase};
use marquee_text::HAlign;

use crate::label::{Label, LabelStyle};

/// Glyphs of the controller buttons in the system font's private use area.
pub mod glyph {
    pub const A: &str = "\u{E0E0}";
    pub const B: &str = "\u{E0E1}";
    pub const X: &str = "\u{E0E2}";
    pub const Y: &str = "\u{E0E3}";
    pub const PLUS: &str = "\u{E0EF}";
    pub const MINUS: &str = "\u{E0F0}";
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HintAction {
    pub glyph: &'static str,
    /// Translation key of the action name.
    pub key: String,
}

impl HintAction {
    pub fn new(glyph: &'static str, key: impl Into<String>) -> Self {
        Self {
            glyph,
            key: key.into(),
        }
    }
}

/// Right-aligned row of hints. The first action is the rightmost one.
pub struct Hint {
    base: ViewBase,
    actions: Vec<HintAction>,
    labels: Vec<Label>,
}

impl Hint {
    /// The back and OK hints.
    pub fn new() -> Self {
        Self::with_actions(vec![
            HintAction::new(glyph::A, "hints/ok"),
            HintAction::new(glyph::B, "hints/back"),
        ])
    }

    pub fn with_actions(actions: Vec<HintAction>) -> Self {
        let mut hint = Self {
            base: ViewBase::new(),
            actions: Vec::new(),
            labels: Vec::new(),
        };
        hint.set_actions(actions);
        hint
    }

    pub fn set_actions(&mut self, actions: Vec<HintAction>) {
        let id = self.base.id();
        self.labels = actions
            .iter()
            .map(|_| {
                let mut label = Label::new(LabelStyle::Hint, "", false);
                label.set_parent(Some(id));
                label.set_horizontal_align(HAlign::Right);
                label
            })
            .collect();
        self.actions = actions;
        self.base.invalidate();
    }

    pub fn actions(&self) -> &[HintAction] {
        &self.actions
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }
}

impl Default for Hint {
    fn default() -> Self {
        Self::new()
    }
}

impl View for Hint {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        for label in &self.labels {
            f(label);
        }
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let rect = self.base.rect();
        let spacing = ctx.style.hint.spacing as f32;
        let mut right = rect.right();

        for (action, label) in self.actions.iter().zip(self.labels.iter_mut()) {
            let text = format!("{}  {}", action.glyph, ctx.translator.translate(&action.key));
            label.set_text(text);
            label.measure(ctx);
            let width = label.text_width().min((right - rect.x).max(0.0));
            label.set_bounds(Rect::new(right, rect.y, width, rect.h));
            label.layout(ctx);
            right -= width + spacing;
        }

        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        for label in &mut self.labels {
            label.frame(ctx);
        }
    }
}
