//! Vertical stacking container.
//!
//! Children are stacked top to bottom inside the margins at their preferred
//! heights, separated by a spacing that can be decided per adjacent pair. A
//! child that is collapsing takes `height × collapse_state` and no spacing.
//! The stacking itself is a taffy flex column.

use marquee_core::focus;
use marquee_core::{DrawCtx, LayoutCtx, LayoutRole, Rect, View, ViewBase};
use taffy::prelude::{
    AlignItems, AvailableSpace, Display, FlexDirection, TaffyTree, auto, length, zero,
};

/// Outcome of the spacing rule for one child and the one after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpacingDecision {
    pub spacing: u32,
    /// `Some` when the next child's top separator must be switched.
    pub next_top_separator: Option<bool>,
}

impl SpacingDecision {
    pub fn keep(spacing: u32) -> Self {
        Self {
            spacing,
            next_top_separator: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margins {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

pub type SpacingRule<'a> = &'a dyn Fn(&dyn View, Option<&dyn View>, u32) -> SpacingDecision;

pub struct BoxLayout {
    base: ViewBase,
    children: Vec<Box<dyn View>>,
    margins: Margins,
    spacing: u32,
    /// Grow or shrink to the stacked content instead of keeping the given
    /// height.
    resize: bool,
    focused: Option<usize>,
    content_height: f32,
}

impl BoxLayout {
    pub fn new() -> Self {
        Self {
            base: ViewBase::new(),
            children: Vec::new(),
            margins: Margins::default(),
            spacing: 0,
            resize: false,
            focused: None,
            content_height: 0.0,
        }
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
        self.base.invalidate();
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_spacing(&mut self, spacing: u32) {
        self.spacing = spacing;
        self.base.invalidate();
    }

    pub fn spacing(&self) -> u32 {
        self.spacing
    }

    pub fn set_resize(&mut self, resize: bool) {
        self.resize = resize;
        self.base.invalidate();
    }

    pub fn add_view(&mut self, mut view: Box<dyn View>) {
        view.set_parent(Some(self.base.id()));
        self.children.push(view);
        self.base.invalidate();
    }

    /// Detaches and returns the child at `index`.
    pub fn remove_view(&mut self, index: usize) -> Option<Box<dyn View>> {
        if index >= self.children.len() {
            return None;
        }
        let mut view = self.children.remove(index);
        view.will_disappear(true);
        view.set_parent(None);
        self.focused = match self.focused {
            Some(f) if f == index => None,
            Some(f) if f > index => Some(f - 1),
            other => other,
        };
        self.base.invalidate();
        Some(view)
    }

    pub fn clear(&mut self) {
        for child in &mut self.children {
            child.will_disappear(true);
        }
        self.children.clear();
        self.focused = None;
        self.base.invalidate();
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, index: usize) -> Option<&dyn View> {
        self.children.get(index).map(|c| c.as_ref())
    }

    pub fn child_mut(&mut self, index: usize) -> Option<&mut (dyn View + 'static)> {
        self.children.get_mut(index).map(|c| c.as_mut())
    }

    /// Height of the stacked children including margins, as of the last
    /// layout.
    pub fn content_height(&self) -> f32 {
        self.content_height
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    fn focusable(view: &dyn View) -> bool {
        matches!(view.layout_role(), LayoutRole::Row { collapsed: false, .. })
            && !view.base().is_hidden()
    }

    /// Gives focus to the child at `index` if it can take it.
    pub fn focus_child(&mut self, index: usize) -> bool {
        let Some(child) = self.children.get(index) else {
            return false;
        };
        if !Self::focusable(child.as_ref()) {
            return false;
        }
        self.focused = Some(index);
        focus::set_focus(Some(child.id()));
        true
    }

    /// Moves focus to the nearest focusable child in the direction of
    /// `delta`. Returns false at either end.
    pub fn move_focus(&mut self, delta: isize) -> bool {
        let step = if delta < 0 { -1 } else { 1 };
        let len = self.children.len() as isize;
        let mut i = match self.focused {
            Some(f) => f as isize + step,
            None if step > 0 => 0,
            None => len - 1,
        };
        while (0..len).contains(&i) {
            if self.focus_child(i as usize) {
                return true;
            }
            i += step;
        }
        false
    }

    /// Stacks the children using `rule` for the spacing after each one.
    pub fn stack(&mut self, ctx: &LayoutCtx<'_>, rule: SpacingRule<'_>) {
        let rect = self.base.rect();
        let inner_width = (rect.w - (self.margins.left + self.margins.right) as f32).max(0.0);

        let decisions: Vec<SpacingDecision> = (0..self.children.len())
            .map(|i| {
                let next = self.children.get(i + 1).map(|c| c.as_ref());
                rule(self.children[i].as_ref(), next, self.spacing)
            })
            .collect();
        for (i, decision) in decisions.iter().enumerate() {
            if let (Some(draw), Some(next)) = (decision.next_top_separator, self.children.get_mut(i + 1)) {
                next.set_draw_top_separator(draw);
            }
        }

        let heights: Vec<f32> = self
            .children
            .iter_mut()
            .map(|c| c.preferred_height(ctx, inner_width))
            .collect();

        let (slots, content_height) = match self.solve(rect.w, &heights, &decisions) {
            Ok(solved) => solved,
            Err(e) => {
                log::error!("box layout {} failed: {e}", self.base.id());
                return;
            }
        };

        for ((child, slot), h) in self.children.iter_mut().zip(slots).zip(heights) {
            child.set_bounds(Rect::new(rect.x + slot.x, rect.y + slot.y, slot.w, h));
            child.layout(ctx);
        }

        self.content_height = content_height;
        if self.resize {
            self.base.set_height(content_height);
        }
        self.base.mark_laid_out();
    }

    fn solve(
        &self,
        width: f32,
        heights: &[f32],
        decisions: &[SpacingDecision],
    ) -> taffy::TaffyResult<(Vec<Rect>, f32)> {
        let mut tree: TaffyTree<()> = TaffyTree::new();
        let last = self.children.len().saturating_sub(1);

        let mut leaves = Vec::with_capacity(self.children.len());
        for (i, child) in self.children.iter().enumerate() {
            let collapse = child.base().collapse_state();
            let gap = if i == last || collapse < 1.0 {
                0.0
            } else {
                decisions[i].spacing as f32
            };
            let leaf = tree.new_leaf(taffy::Style {
                size: taffy::geometry::Size {
                    width: auto(),
                    height: length(heights[i] * collapse),
                },
                margin: taffy::geometry::Rect {
                    left: zero(),
                    right: zero(),
                    top: zero(),
                    bottom: length(gap),
                },
                flex_shrink: 0.0,
                ..Default::default()
            })?;
            leaves.push(leaf);
        }

        let m = self.margins;
        let root = tree.new_with_children(
            taffy::Style {
                display: Display::Flex,
                flex_direction: FlexDirection::Column,
                align_items: Some(AlignItems::Stretch),
                size: taffy::geometry::Size {
                    width: length(width),
                    height: auto(),
                },
                padding: taffy::geometry::Rect {
                    left: length(m.left as f32),
                    right: length(m.right as f32),
                    top: length(m.top as f32),
                    bottom: length(m.bottom as f32),
                },
                ..Default::default()
            },
            &leaves,
        )?;

        tree.compute_layout(
            root,
            taffy::geometry::Size {
                width: AvailableSpace::Definite(width),
                height: AvailableSpace::MaxContent,
            },
        )?;

        let mut slots = Vec::with_capacity(leaves.len());
        for leaf in leaves {
            let l = tree.layout(leaf)?;
            slots.push(Rect::new(l.location.x, l.location.y, l.size.width, l.size.height));
        }
        let content_height = tree.layout(root)?.size.height;
        Ok((slots, content_height))
    }

    /// Paints the children, clipping collapsing ones to their visible part.
    pub fn draw_children(&mut self, ctx: &mut DrawCtx<'_>) {
        for child in &mut self.children {
            let collapse = child.base().collapse_state();
            if collapse <= 0.0 {
                continue;
            }
            if collapse < 1.0 {
                let r = child.base().rect();
                ctx.canvas.save();
                ctx.canvas
                    .intersect_scissor(Rect::new(r.x, r.y, r.w, r.h * collapse));
                child.frame(ctx);
                ctx.canvas.restore();
            } else {
                child.frame(ctx);
            }
        }
    }

    pub fn children_will_appear(&mut self, reset_state: bool) {
        for child in &mut self.children {
            child.will_appear(reset_state);
        }
    }

    pub fn children_will_disappear(&mut self, reset_state: bool) {
        for child in &mut self.children {
            child.will_disappear(reset_state);
        }
    }
}

impl Default for BoxLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl View for BoxLayout {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
        if !self.resize {
            return self.base.rect().h;
        }
        let inner = (width - (self.margins.left + self.margins.right) as f32).max(0.0);
        let count = self.children.len();
        let mut h = (self.margins.top + self.margins.bottom) as f32;
        for (i, child) in self.children.iter_mut().enumerate() {
            let collapse = child.base().collapse_state();
            h += child.preferred_height(ctx, inner) * collapse;
            if i + 1 < count && collapse >= 1.0 {
                h += self.spacing as f32;
            }
        }
        h
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        for child in &self.children {
            f(child.as_ref());
        }
    }

    fn will_appear(&mut self, reset_state: bool) {
        self.children_will_appear(reset_state);
    }

    fn will_disappear(&mut self, reset_state: bool) {
        self.children_will_disappear(reset_state);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        self.stack(ctx, &|_, _, spacing| SpacingDecision::keep(spacing));
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        self.draw_children(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rectangle;
    use marquee_core::{Color, StaticTranslator, Style};
    use marquee_text::MonospaceMeasurer;
    use web_time::Duration;

    /// Fixed-height block.
    struct Block(Rectangle, f32);

    impl View for Block {
        fn base(&self) -> &ViewBase {
            self.0.base()
        }
        fn base_mut(&mut self) -> &mut ViewBase {
            self.0.base_mut()
        }
        fn preferred_height(&mut self, _ctx: &LayoutCtx<'_>, _width: f32) -> f32 {
            self.1
        }
        fn layout(&mut self, ctx: &LayoutCtx<'_>) {
            self.0.layout(ctx)
        }
        fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
            self.0.draw(ctx)
        }
    }

    fn block(h: f32) -> Box<dyn View> {
        Box::new(Block(Rectangle::new(Color::WHITE), h))
    }

    fn run_layout(layout: &mut BoxLayout, rect: Rect) {
        let style = Style::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::new();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };
        layout.set_bounds(rect);
        layout.layout(&ctx);
    }

    fn tops(layout: &BoxLayout) -> Vec<f32> {
        (0..layout.len())
            .filter_map(|i| layout.child(i).map(|c| c.base().rect().y))
            .collect()
    }

    #[test]
    fn test_stacks_inside_margins_with_spacing() {
        let mut layout = BoxLayout::new();
        layout.set_margins(Margins::new(10, 20, 10, 20));
        layout.set_spacing(5);
        layout.set_resize(true);
        layout.add_view(block(30.0));
        layout.add_view(block(40.0));
        layout.add_view(block(50.0));

        run_layout(&mut layout, Rect::new(0.0, 100.0, 300.0, 0.0));

        assert_eq!(tops(&layout), vec![110.0, 145.0, 190.0]);
        let first = layout.child(0).map(|c| c.base().rect());
        assert_eq!(first.map(|r| (r.x, r.w)), Some((20.0, 260.0)));
        assert_eq!(layout.content_height(), 10.0 + 30.0 + 5.0 + 40.0 + 5.0 + 50.0 + 10.0);
        assert_eq!(layout.base().rect().h, layout.content_height());
    }

    #[test]
    fn test_collapsed_child_takes_no_space() {
        let mut layout = BoxLayout::new();
        layout.set_spacing(5);
        layout.add_view(block(30.0));
        layout.add_view(block(40.0));
        layout.add_view(block(50.0));
        if let Some(c) = layout.child(1) {
            c.base().collapse(false);
        }

        run_layout(&mut layout, Rect::new(0.0, 0.0, 300.0, 500.0));
        assert_eq!(tops(&layout), vec![0.0, 35.0, 35.0]);
    }

    #[test]
    fn test_collapsing_child_shrinks_gradually() {
        let mut layout = BoxLayout::new();
        layout.add_view(block(100.0));
        layout.add_view(block(10.0));
        if let Some(c) = layout.child(0) {
            c.base().collapse(true);
        }
        marquee_core::animation::advance(Duration::from_millis(50));
        assert!(layout.needs_layout());

        run_layout(&mut layout, Rect::new(0.0, 0.0, 300.0, 500.0));
        let second = tops(&layout)[1];
        assert!(second > 0.0 && second < 100.0, "{second}");
    }

    #[test]
    fn test_remove_view_shifts_focus_index() {
        let mut layout = BoxLayout::new();
        layout.add_view(block(10.0));
        layout.add_view(block(10.0));
        assert!(layout.remove_view(5).is_none());
        let removed = layout.remove_view(0);
        assert_eq!(removed.and_then(|v| v.base().parent()), None);
        assert_eq!(layout.len(), 1);
    }
}
