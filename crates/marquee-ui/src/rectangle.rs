use marquee_core::{Color, DrawCtx, LayoutCtx, View, ViewBase};

/// A filled rectangle covering its bounds.
pub struct Rectangle {
    base: ViewBase,
    color: Color,
}

impl Rectangle {
    pub fn new(color: Color) -> Self {
        Self {
            base: ViewBase::new(),
            color,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl View for Rectangle {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn layout(&mut self, _ctx: &LayoutCtx<'_>) {
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        if self.color.3 == 0 {
            return;
        }
        let color = ctx.a(self.color);
        ctx.canvas.fill_rect(self.base.rect(), color);
    }
}
