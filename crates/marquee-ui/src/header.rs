use marquee_core::{DrawCtx, LayoutCtx, LayoutRole, Rect, View, ViewBase};
use marquee_text::HAlign;

use crate::label::{Label, LabelStyle};

/// Section title inside a list: a small accent bar, the title, an optional
/// right-aligned sub-label and an optional separator underneath.
pub struct Header {
    base: ViewBase,
    label: Label,
    sub_label: Option<Label>,
    separator: bool,
}

impl Header {
    pub fn new(label: impl Into<String>, separator: bool) -> Self {
        let base = ViewBase::new();
        let mut label = Label::new(LabelStyle::Regular, label, false);
        label.set_parent(Some(base.id()));
        Self {
            base,
            label,
            sub_label: None,
            separator,
        }
    }

    pub fn with_sub_label(mut self, sub_label: impl Into<String>) -> Self {
        self.set_sub_label(sub_label);
        self
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn set_label(&mut self, text: impl Into<String>) {
        self.label.set_text(text);
    }

    pub fn set_sub_label(&mut self, text: impl Into<String>) {
        let mut sub = Label::new(LabelStyle::Description, text, false);
        sub.set_parent(Some(self.base.id()));
        sub.set_horizontal_align(HAlign::Right);
        self.sub_label = Some(sub);
        self.base.invalidate();
    }
}

impl View for Header {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, _width: f32) -> f32 {
        ctx.style.header.height as f32
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::Header
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        f(&self.label);
        if let Some(sub) = &self.sub_label {
            f(sub);
        }
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let h = &ctx.style.header;
        let rect = self.base.rect();
        let height = h.height as f32;
        let text_x = rect.x + (h.rectangle_width + h.padding) as f32;

        self.label.set_font_size(h.font_size as f32);
        self.label.measure(ctx);
        let mut label_width = (rect.w - (h.rectangle_width + h.padding) as f32).max(0.0);

        if let Some(sub) = self.sub_label.as_mut() {
            sub.measure(ctx);
            let sub_width = sub.text_width().min(label_width);
            sub.set_bounds(Rect::new(rect.right(), rect.y, sub_width, height));
            sub.layout(ctx);
            label_width = (label_width - sub_width - h.padding as f32).max(0.0);
        }

        self.label
            .set_bounds(Rect::new(text_x, rect.y, label_width, height));
        self.label.layout(ctx);

        self.base.set_height(height);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let style = ctx.style;
        let h = &style.header;
        let rect = self.base.rect();

        let accent = ctx.a(ctx.theme.header_rectangle);
        ctx.canvas.fill_rect(
            Rect::new(
                rect.x,
                rect.y + h.padding as f32,
                h.rectangle_width as f32,
                (h.height as f32 - h.padding as f32 * 2.0).max(0.0),
            ),
            accent,
        );

        self.label.frame(ctx);
        if let Some(sub) = self.sub_label.as_mut() {
            sub.frame(ctx);
        }

        if self.separator {
            let color = ctx.a(ctx.theme.separator);
            ctx.canvas
                .fill_rect(Rect::new(rect.x, rect.y + rect.h + 1.0, rect.w, 1.0), color);
        }
    }
}
