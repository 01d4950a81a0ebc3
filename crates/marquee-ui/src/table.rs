use marquee_core::{DrawCtx, LayoutCtx, LayoutRole, Rect, Vec2, View, ViewBase};
use marquee_text::{HAlign, TextStyle, VAlign};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TableRowKind {
    Header,
    #[default]
    Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableRow {
    pub kind: TableRowKind,
    pub label: String,
    pub value: String,
}

/// Two-column key/value table. Body rows alternate backgrounds, starting
/// with a shaded one.
#[derive(Default)]
pub struct Table {
    base: ViewBase,
    rows: Vec<TableRow>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, kind: TableRowKind, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(TableRow {
            kind,
            label: label.into(),
            value: value.into(),
        });
        self.base.invalidate();
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Replaces the value of row `index`; out-of-range indices are ignored.
    pub fn set_value(&mut self, index: usize, value: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.value = value.into();
        }
    }
}

impl View for Table {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, _width: f32) -> f32 {
        (self.rows.len() as u32 * ctx.style.table.row_height) as f32
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::Table
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let h = self.preferred_height(ctx, self.base.rect().w);
        self.base.set_height(h);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let style = ctx.style;
        let t = &style.table;
        let rect = self.base.rect();
        let row_height = t.row_height as f32;
        let padding = t.padding as f32;
        let size = style.label.small_font_size as f32;

        let mut body_index = 0usize;
        for (i, row) in self.rows.iter().enumerate() {
            let y = rect.y + i as f32 * row_height;
            let color = match row.kind {
                TableRowKind::Header => ctx.theme.text,
                TableRowKind::Body => {
                    if body_index % 2 == 0 {
                        let bg = ctx.a(ctx.theme.table_even_background);
                        ctx.canvas.fill_rect(Rect::new(rect.x, y, rect.w, row_height), bg);
                    }
                    body_index += 1;
                    ctx.theme.table_body_text
                }
            };
            let color = ctx.a(color);
            let mid = y + row_height / 2.0;

            let left = TextStyle::new(size).with_align(HAlign::Left, VAlign::Middle);
            ctx.canvas
                .text(Vec2::new(rect.x + padding, mid), &row.label, &left, color);
            let right = TextStyle::new(size).with_align(HAlign::Right, VAlign::Middle);
            ctx.canvas
                .text(Vec2::new(rect.right() - padding, mid), &row.value, &right, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{Scene, SceneNode, StaticTranslator, Style, Theme};
    use marquee_text::MonospaceMeasurer;

    #[test]
    fn test_table_shades_every_other_body_row() {
        let style = Style::default();
        let theme = Theme::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::new();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };

        let mut table = Table::new();
        table.add_row(TableRowKind::Header, "Storage", "");
        table.add_row(TableRowKind::Body, "Used", "12 GB");
        table.add_row(TableRowKind::Body, "Free", "20 GB");
        table.add_row(TableRowKind::Body, "Total", "32 GB");
        table.set_value(99, "ignored");

        table.set_bounds(Rect::new(0.0, 0.0, 400.0, 0.0));
        table.layout(&ctx);
        assert_eq!(table.base().rect().h, 4.0 * 38.0);

        let mut scene = Scene::new();
        let mut dctx = DrawCtx::new(&mut scene, &style, &theme);
        table.frame(&mut dctx);

        let shaded: Vec<f32> = scene
            .nodes
            .iter()
            .filter_map(|n| match n {
                SceneNode::Fill { path, .. } => match path.segments() {
                    [marquee_core::PathSegment::Rect(r)] => Some(r.y),
                    _ => None,
                },
                _ => None,
            })
            .collect();
        assert_eq!(shaded, vec![38.0, 114.0]);
        assert!(scene.find_text("32 GB").is_some());
    }
}
