//! Scrolling list of rows, headers and tables.
//!
//! [`List`] is a viewport over a [`ListContentView`], which stacks its
//! children with the list margins and picks the spacing between each
//! adjacent pair from both children's [`LayoutRole`]s. Hosts can adjust the
//! result with [`List::set_custom_spacing`].

use marquee_core::animation::{Animated, Easing};
use marquee_core::{DrawCtx, LayoutCtx, LayoutRole, Rect, View, ViewBase, ViewId};
use web_time::Duration;

use crate::box_layout::{BoxLayout, Margins, SpacingDecision};

pub type CustomSpacing = Box<dyn Fn(&dyn View, Option<&dyn View>, u32) -> u32>;

/// Spacing after `current` when followed by `next`. First matching rule wins.
pub fn list_spacing(
    current: LayoutRole,
    next: Option<LayoutRole>,
    default: u32,
    header_padding: u32,
) -> SpacingDecision {
    use LayoutRole::*;

    match (current, next) {
        (
            Row {
                reduce_description_spacing: true,
                ..
            },
            next,
        ) => SpacingDecision::keep(if next.is_some() { default / 2 } else { default }),
        (
            Row {
                has_description: false,
                collapsed,
                ..
            },
            Some(Row { .. }),
        ) => SpacingDecision {
            spacing: 2,
            next_top_separator: Some(collapsed),
        },
        (Row { .. }, Some(Table)) => SpacingDecision::keep(default / 2),
        (Row { .. }, _) => SpacingDecision::keep(default),
        (Table | GroupSpacing, _) => SpacingDecision::keep(default / 2),
        (Header, Some(Row { .. })) => SpacingDecision::keep(1),
        (Label, Some(Header)) => SpacingDecision::keep(default),
        (Header, _) | (_, Some(Header)) => SpacingDecision::keep(header_padding),
        _ => SpacingDecision::keep(default),
    }
}

/// The stacked content of a [`List`].
pub struct ListContentView {
    inner: BoxLayout,
    custom_spacing: Option<CustomSpacing>,
}

impl ListContentView {
    pub fn new(style: &marquee_core::Style) -> Self {
        let list = &style.list;
        let mut inner = BoxLayout::new();
        inner.set_margins(Margins::new(
            list.margin_top_bottom,
            list.margin_left_right,
            list.margin_top_bottom,
            list.margin_left_right,
        ));
        inner.set_spacing(list.spacing);
        inner.set_resize(true);
        Self {
            inner,
            custom_spacing: None,
        }
    }

    pub fn layout_box(&self) -> &BoxLayout {
        &self.inner
    }

    pub fn layout_box_mut(&mut self) -> &mut BoxLayout {
        &mut self.inner
    }
}

impl View for ListContentView {
    fn base(&self) -> &ViewBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        self.inner.base_mut()
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
        self.inner.preferred_height(ctx, width)
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        self.inner.visit_children(f)
    }

    fn will_appear(&mut self, reset_state: bool) {
        self.inner.will_appear(reset_state);
    }

    fn will_disappear(&mut self, reset_state: bool) {
        self.inner.will_disappear(reset_state);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let header_padding = ctx.style.header.padding;
        let custom = self.custom_spacing.as_deref();
        let rule = |current: &dyn View, next: Option<&dyn View>, default: u32| {
            let mut decision = list_spacing(
                current.layout_role(),
                next.map(|n| n.layout_role()),
                default,
                header_padding,
            );
            if let Some(custom) = custom {
                decision.spacing = custom(current, next, decision.spacing);
            }
            decision
        };
        self.inner.stack(ctx, &rule);
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        self.inner.draw_children(ctx);
    }
}

pub struct List {
    base: ViewBase,
    content: ListContentView,
    scroll: Animated,
}

impl List {
    pub fn new() -> Self {
        let base = ViewBase::new();
        let mut content = ListContentView::new(&marquee_core::locals::style());
        content.set_parent(Some(base.id()));
        Self {
            base,
            content,
            scroll: Animated::new(0.0),
        }
    }

    pub fn add_view(&mut self, view: Box<dyn View>) {
        self.content.inner.add_view(view);
    }

    pub fn remove_view(&mut self, index: usize) -> Option<Box<dyn View>> {
        self.content.inner.remove_view(index)
    }

    pub fn clear(&mut self) {
        self.content.inner.clear();
        self.scroll.kill();
        self.scroll.set(0.0);
    }

    pub fn len(&self) -> usize {
        self.content.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.inner.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&dyn View> {
        self.content.inner.child(index)
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn View + 'static)> {
        self.content.inner.child_mut(index)
    }

    pub fn content(&self) -> &ListContentView {
        &self.content
    }

    pub fn set_margins(&mut self, top: u32, right: u32, bottom: u32, left: u32) {
        self.content
            .inner
            .set_margins(Margins::new(top, right, bottom, left));
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.content.inner.set_spacing(spacing);
    }

    /// Lets the host adjust the spacing after each child. The callback gets
    /// the child, the one after it and the spacing the built-in rules chose.
    pub fn set_custom_spacing(&mut self, f: impl Fn(&dyn View, Option<&dyn View>, u32) -> u32 + 'static) {
        self.content.custom_spacing = Some(Box::new(f));
        self.content.inner.base_mut().invalidate();
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll.get()
    }

    fn max_scroll(&self) -> f32 {
        (self.content.inner.content_height() - self.base.rect().h).max(0.0)
    }

    /// Scrolls so that `y` (relative to the content top) is at the top of the
    /// viewport, clamped to the content.
    pub fn scroll_to(&mut self, y: f32, animated: bool) {
        let target = y.clamp(0.0, self.max_scroll());
        self.scroll.kill();
        if animated {
            let ms = marquee_core::locals::style().animation_duration.highlight;
            self.scroll
                .animate_to(target, Duration::from_millis(ms), Easing::EaseInOut);
        } else {
            self.scroll.set(target);
        }
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.content.inner.focused_index()
    }

    pub fn focused_id(&self) -> Option<ViewId> {
        self.focused_index()
            .and_then(|i| self.child(i))
            .map(|c| c.id())
    }

    /// Focuses the child at `index` and centers it in the viewport.
    pub fn focus_child(&mut self, index: usize, animated: bool) -> bool {
        if !self.content.inner.focus_child(index) {
            return false;
        }
        self.center_on_focus(animated);
        true
    }

    pub fn move_focus(&mut self, delta: isize, animated: bool) -> bool {
        if !self.content.inner.move_focus(delta) {
            return false;
        }
        self.center_on_focus(animated);
        true
    }

    fn center_on_focus(&mut self, animated: bool) {
        let Some(child) = self.focused_index().and_then(|i| self.child(i)) else {
            return;
        };
        let top = self.content.base().rect().y;
        let r = child.base().rect();
        let middle = r.y - top + r.h / 2.0;
        self.scroll_to(middle - self.base.rect().h / 2.0, animated);
    }

    fn draw_scrollbar(&self, ctx: &mut DrawCtx<'_>) {
        let vp = self.base.rect();
        let content_h = self.content.inner.content_height();
        if content_h <= vp.h + 0.5 {
            return;
        }
        let thickness = ctx.style.list.scrollbar_width as f32;
        let margin = 2.0;
        let min_thumb: f32 = 24.0;

        let track_x = vp.x + vp.w - margin - thickness;
        let track_y = vp.y + margin;
        let track_h = (vp.h - 2.0 * margin).max(0.0);

        let ratio = (vp.h / content_h).clamp(0.0, 1.0);
        let thumb_h = (track_h * ratio).clamp(min_thumb.min(track_h), track_h);
        let denom = (content_h - vp.h).max(1.0);
        let t = (self.scroll.get() / denom).clamp(0.0, 1.0);
        let thumb_y = track_y + t * (track_h - thumb_h).max(0.0);

        let color = ctx.a(ctx.theme.scrollbar_thumb);
        ctx.canvas
            .fill_rect(Rect::new(track_x, thumb_y, thickness, thumb_h), color);
    }
}

impl Default for List {
    fn default() -> Self {
        Self::new()
    }
}

impl View for List {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        f(&self.content);
    }

    fn will_appear(&mut self, reset_state: bool) {
        self.content.will_appear(reset_state);
    }

    fn will_disappear(&mut self, reset_state: bool) {
        self.content.will_disappear(reset_state);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let rect = self.base.rect();
        self.content.set_bounds(Rect::new(rect.x, rect.y, rect.w, 0.0));
        self.content.layout(ctx);

        let max = self.max_scroll();
        if self.scroll.get() > max {
            self.scroll.kill();
            self.scroll.set(max);
        }
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let rect = self.base.rect();
        ctx.canvas.save();
        ctx.canvas.intersect_scissor(rect);
        ctx.canvas.translate(0.0, -self.scroll.get().round());
        self.content.frame(ctx);
        ctx.canvas.restore();

        self.draw_scrollbar(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;
    use crate::list_item::{ListItem, ListItemGroupSpacing};
    use crate::table::{Table, TableRowKind};
    use marquee_core::{Scene, SceneNode, StaticTranslator, Style, Theme, focus};
    use marquee_text::MonospaceMeasurer;

    const ROW: LayoutRole = LayoutRole::Row {
        has_description: false,
        reduce_description_spacing: false,
        collapsed: false,
    };
    const ROW_DESC: LayoutRole = LayoutRole::Row {
        has_description: true,
        reduce_description_spacing: false,
        collapsed: false,
    };
    const ROW_REDUCED: LayoutRole = LayoutRole::Row {
        has_description: true,
        reduce_description_spacing: true,
        collapsed: false,
    };
    const ROW_COLLAPSED: LayoutRole = LayoutRole::Row {
        has_description: false,
        reduce_description_spacing: false,
        collapsed: true,
    };

    fn spacing(current: LayoutRole, next: Option<LayoutRole>) -> SpacingDecision {
        list_spacing(current, next, 61, 11)
    }

    #[test]
    fn test_row_pairs() {
        assert_eq!(
            spacing(ROW, Some(ROW)),
            SpacingDecision {
                spacing: 2,
                next_top_separator: Some(false)
            }
        );
        assert_eq!(spacing(ROW_COLLAPSED, Some(ROW)).next_top_separator, Some(true));
        assert_eq!(spacing(ROW_DESC, Some(ROW)), SpacingDecision::keep(61));
        assert_eq!(spacing(ROW_REDUCED, Some(ROW)), SpacingDecision::keep(30));
        assert_eq!(spacing(ROW_REDUCED, None), SpacingDecision::keep(61));
        assert_eq!(spacing(ROW, Some(LayoutRole::Table)), SpacingDecision::keep(30));
        assert_eq!(spacing(ROW, None), SpacingDecision::keep(61));
    }

    #[test]
    fn test_reduced_spacing_wins_over_row_pair() {
        let reduced_no_desc = LayoutRole::Row {
            has_description: false,
            reduce_description_spacing: true,
            collapsed: false,
        };
        assert_eq!(spacing(reduced_no_desc, Some(ROW)), SpacingDecision::keep(30));
    }

    #[test]
    fn test_tables_groups_and_headers() {
        assert_eq!(spacing(LayoutRole::Table, Some(ROW)).spacing, 30);
        assert_eq!(spacing(LayoutRole::GroupSpacing, Some(LayoutRole::Header)).spacing, 30);
        assert_eq!(spacing(LayoutRole::Header, Some(ROW)).spacing, 1);
        assert_eq!(spacing(LayoutRole::Label, Some(LayoutRole::Header)).spacing, 61);
        assert_eq!(spacing(LayoutRole::Header, Some(LayoutRole::Label)).spacing, 11);
        assert_eq!(spacing(LayoutRole::Other, Some(LayoutRole::Header)).spacing, 11);
        assert_eq!(spacing(LayoutRole::Header, None).spacing, 11);
        assert_eq!(spacing(LayoutRole::Other, Some(ROW)).spacing, 61);
        assert_eq!(spacing(LayoutRole::Label, None).spacing, 61);
    }

    fn layout_list(list: &mut List, rect: Rect) {
        let style = Style::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::new();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };
        list.set_bounds(rect);
        list.layout(&ctx);
    }

    fn tops(list: &List) -> Vec<f32> {
        (0..list.len())
            .filter_map(|i| list.child(i).map(|c| c.base().rect().y))
            .collect()
    }

    #[test]
    fn test_list_stacks_with_role_spacing() {
        let mut list = List::new();
        list.add_view(Box::new(Header::new("General", false)));
        list.add_view(Box::new(ListItem::new("Language")));
        list.add_view(Box::new(ListItem::new("Region")));
        list.add_view(Box::new(ListItemGroupSpacing::new(true)));
        let mut table = Table::new();
        table.add_row(TableRowKind::Body, "Version", "1.0");
        list.add_view(Box::new(table));

        layout_list(&mut list, Rect::new(0.0, 0.0, 800.0, 600.0));

        // header 44 +1, row 70 +2, row 70 +61, group 1 +30, table
        assert_eq!(tops(&list), vec![38.0, 83.0, 155.0, 286.0, 317.0]);
        let row = list.child(1).map(|c| c.base().rect());
        assert_eq!(row.map(|r| (r.x, r.w)), Some((40.0, 720.0)));
        assert_eq!(list.content().layout_box().content_height(), 317.0 + 38.0 + 38.0);
    }

    #[test]
    fn test_second_row_loses_top_separator() {
        let mut list = List::new();
        list.add_view(Box::new(ListItem::new("A")));
        list.add_view(Box::new(ListItem::new("B")));
        layout_list(&mut list, Rect::new(0.0, 0.0, 800.0, 600.0));

        let top_sep = |i: usize| {
            list.child(i)
                .and_then(marquee_core::downcast_ref::<ListItem>)
                .map(ListItem::draws_top_separator)
        };
        assert_eq!(top_sep(0), Some(true));
        assert_eq!(top_sep(1), Some(false));
    }

    #[test]
    fn test_custom_spacing_overrides_rules() {
        let mut list = List::new();
        list.add_view(Box::new(ListItem::new("A")));
        list.add_view(Box::new(ListItem::new("B")));
        list.set_custom_spacing(|_, next, spacing| if next.is_some() { 100 } else { spacing });
        layout_list(&mut list, Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_eq!(tops(&list), vec![38.0, 208.0]);
    }

    #[test]
    fn test_focus_scrolls_child_into_middle() {
        let mut list = List::new();
        for i in 0..20 {
            list.add_view(Box::new(ListItem::new(format!("Row {i}"))));
        }
        layout_list(&mut list, Rect::new(0.0, 0.0, 800.0, 300.0));
        assert!(list.content().layout_box().content_height() > 300.0);

        assert!(list.focus_child(10, false));
        assert_eq!(focus::focused(), list.focused_id());
        // Row 10 top: 38 + 10 * 72, middle 35 below.
        assert_eq!(list.scroll_offset(), 38.0 + 720.0 + 35.0 - 150.0);

        assert!(list.focus_child(0, false));
        assert_eq!(list.scroll_offset(), 0.0);

        assert!(list.move_focus(1, false));
        assert_eq!(list.focused_index(), Some(1));
        assert!(list.move_focus(-1, false));
        assert_eq!(list.focused_index(), Some(0));
        assert!(!list.move_focus(-1, false));
    }

    #[test]
    fn test_headers_are_not_focusable() {
        let mut list = List::new();
        list.add_view(Box::new(Header::new("Section", false)));
        list.add_view(Box::new(ListItem::new("Row")));
        assert!(!list.focus_child(0, false));
        assert!(list.move_focus(1, false));
        assert_eq!(list.focused_index(), Some(1));
    }

    #[test]
    fn test_draw_clips_and_shows_scrollbar() {
        let mut list = List::new();
        for i in 0..20 {
            list.add_view(Box::new(ListItem::new(format!("Row {i}"))));
        }
        layout_list(&mut list, Rect::new(0.0, 0.0, 800.0, 300.0));
        list.scroll_to(1.0e6, false);
        assert_eq!(list.scroll_offset(), list.content().layout_box().content_height() - 300.0);

        let style = Style::default();
        let theme = Theme::default();
        let mut scene = Scene::new();
        let mut ctx = DrawCtx::new(&mut scene, &style, &theme);
        list.frame(&mut ctx);

        assert!(matches!(scene.nodes.get(1), Some(SceneNode::Scissor { rect }) if rect.h == 300.0));
        let thumb = scene.nodes.iter().rev().find_map(|n| match n {
            SceneNode::Fill { color, path } if *color == theme.scrollbar_thumb => Some(path.clone()),
            _ => None,
        });
        assert!(thumb.is_some());
    }
}
