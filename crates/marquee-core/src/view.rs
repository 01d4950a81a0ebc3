//! # Views
//!
//! A view is a retained object owning its children (`Box<dyn View>`). The
//! host drives three phases per frame through the root view:
//!
//! 1. animations advance (see [`crate::animation`]);
//! 2. if [`View::needs_layout`] reports dirt, [`View::layout`] runs top-down:
//!    each parent assigns child bounds with [`View::set_bounds`] and then
//!    calls the child's `layout`;
//! 3. [`View::frame`] paints, skipping hidden views and folding each view's
//!    fade alpha into the [`DrawCtx`].
//!
//! Per-view state shared by every kind of view lives in [`ViewBase`].

use std::any::Any;
use std::cell::Cell;
use std::rc::{Rc, Weak};

use marquee_text::TextMeasurer;
use web_time::Duration;

use crate::animation::{self, Animated, Easing, Tween};
use crate::i18n::Translator;
use crate::render_api::Canvas;
use crate::{Color, Rect, Style, Theme, locals};

pub type ViewId = u64;

pub type Callback = Box<dyn FnOnce()>;

fn next_view_id() -> ViewId {
    thread_local! {
        static NEXT: Cell<ViewId> = const { Cell::new(1) };
    }
    NEXT.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewAnimation {
    #[default]
    Fade,
    SlideLeft,
    SlideRight,
}

impl ViewAnimation {
    pub fn is_slide(self) -> bool {
        matches!(self, ViewAnimation::SlideLeft | ViewAnimation::SlideRight)
    }
}

/// How a list container classifies a child when choosing spacing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutRole {
    Row {
        has_description: bool,
        reduce_description_spacing: bool,
        collapsed: bool,
    },
    Table,
    GroupSpacing,
    Header,
    Label,
    Other,
}

pub struct LayoutCtx<'a> {
    pub style: &'a Style,
    pub measurer: &'a dyn TextMeasurer,
    pub translator: &'a dyn Translator,
}

pub struct DrawCtx<'a> {
    pub canvas: &'a mut dyn Canvas,
    pub style: &'a Style,
    pub theme: &'a Theme,
    alpha: f32,
}

impl<'a> DrawCtx<'a> {
    pub fn new(canvas: &'a mut dyn Canvas, style: &'a Style, theme: &'a Theme) -> Self {
        Self {
            canvas,
            style,
            theme,
            alpha: 1.0,
        }
    }

    /// Accumulated opacity of the view being drawn and all its ancestors.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// `color` faded by the accumulated opacity.
    pub fn a(&self, color: Color) -> Color {
        color.mul_alpha(self.alpha)
    }

    pub fn with_alpha<R>(&mut self, alpha: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.alpha;
        self.alpha *= alpha.clamp(0.0, 1.0);
        let r = f(self);
        self.alpha = saved;
        r
    }

    /// Like [`DrawCtx::with_alpha`], but replaces the accumulated opacity
    /// instead of multiplying it.
    pub fn with_absolute_alpha<R>(&mut self, alpha: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.alpha;
        self.alpha = alpha.clamp(0.0, 1.0);
        let r = f(self);
        self.alpha = saved;
        r
    }
}

/// Fade state, shared with the scheduler callbacks that finish show/hide.
#[derive(Debug)]
struct Visibility {
    alpha: Animated,
    hidden: Cell<bool>,
    fading: Cell<bool>,
}

#[derive(Debug)]
pub struct ViewBase {
    id: ViewId,
    parent: Option<ViewId>,
    rect: Rect,
    visibility: Rc<Visibility>,
    collapse: Animated,
    dirty: bool,
}

impl ViewBase {
    pub fn new() -> Self {
        Self {
            id: next_view_id(),
            parent: None,
            rect: Rect::default(),
            visibility: Rc::new(Visibility {
                alpha: Animated::new(1.0),
                hidden: Cell::new(false),
                fading: Cell::new(false),
            }),
            collapse: Animated::new(1.0),
            dirty: true,
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub fn parent(&self) -> Option<ViewId> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ViewId>) {
        self.parent = parent;
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn set_rect(&mut self, rect: Rect) {
        if self.rect != rect {
            self.rect = rect;
            self.dirty = true;
        }
    }

    pub fn set_height(&mut self, h: f32) {
        self.rect.h = h;
    }

    pub fn set_width(&mut self, w: f32) {
        self.rect.w = w;
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.rect.x = x;
        self.rect.y = y;
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_laid_out(&mut self) {
        self.dirty = false;
    }

    /// Dirty, or mid-collapse (height changes every frame).
    pub fn needs_layout(&self) -> bool {
        self.dirty || self.collapse.is_animating()
    }

    pub fn alpha(&self) -> f32 {
        self.visibility.alpha.get()
    }

    pub fn is_hidden(&self) -> bool {
        self.visibility.hidden.get()
    }

    /// A show or hide fade is in flight.
    pub fn is_fading(&self) -> bool {
        self.visibility.fading.get()
    }

    pub fn show(&self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        log::debug!("showing view {}", self.id);
        let vis = &self.visibility;
        vis.hidden.set(false);
        vis.alpha.kill();
        vis.fading.set(true);

        if !animated {
            vis.alpha.set(1.0);
            vis.fading.set(false);
            on_done();
            return;
        }

        let weak: Weak<Visibility> = Rc::downgrade(vis);
        animation::push(
            Tween::new(&vis.alpha, 1.0, fade_duration(animation))
                .from(0.0)
                .easing(Easing::EaseOut)
                .on_complete(move || {
                    if let Some(vis) = weak.upgrade() {
                        vis.fading.set(false);
                    }
                    on_done();
                }),
        );
    }

    pub fn hide(&self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        log::debug!("hiding view {}", self.id);
        let vis = &self.visibility;
        vis.alpha.kill();
        vis.fading.set(true);

        if !animated {
            vis.alpha.set(0.0);
            vis.hidden.set(true);
            vis.fading.set(false);
            on_done();
            return;
        }

        let weak: Weak<Visibility> = Rc::downgrade(vis);
        animation::push(
            Tween::new(&vis.alpha, 0.0, fade_duration(animation))
                .from(1.0)
                .easing(Easing::EaseOut)
                .on_complete(move || {
                    if let Some(vis) = weak.upgrade() {
                        vis.hidden.set(true);
                        vis.fading.set(false);
                    }
                    on_done();
                }),
        );
    }

    /// 1.0 when fully expanded, 0.0 when fully collapsed.
    pub fn collapse_state(&self) -> f32 {
        self.collapse.get()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapse.get() < 1.0
    }

    pub fn collapse(&self, animated: bool) {
        self.animate_collapse(0.0, animated);
    }

    pub fn expand(&self, animated: bool) {
        self.animate_collapse(1.0, animated);
    }

    fn animate_collapse(&self, target: f32, animated: bool) {
        self.collapse.kill();
        if animated {
            let ms = locals::style().animation_duration.collapse;
            self.collapse
                .animate_to(target, Duration::from_millis(ms), Easing::EaseInOut);
        } else {
            self.collapse.set(target);
        }
    }
}

impl Default for ViewBase {
    fn default() -> Self {
        Self::new()
    }
}

fn fade_duration(animation: ViewAnimation) -> Duration {
    let durations = &locals::style().animation_duration;
    let ms = if animation.is_slide() {
        durations.show_slide
    } else {
        durations.show
    };
    Duration::from_millis(ms)
}

pub trait View: Any {
    fn base(&self) -> &ViewBase;
    fn base_mut(&mut self) -> &mut ViewBase;

    /// Positions children inside the current bounds. Parents call this right
    /// after [`View::set_bounds`].
    fn layout(&mut self, ctx: &LayoutCtx<'_>);

    /// Paints at the current bounds. Called through [`View::frame`].
    fn draw(&mut self, ctx: &mut DrawCtx<'_>);

    fn id(&self) -> ViewId {
        self.base().id()
    }

    fn set_parent(&mut self, parent: Option<ViewId>) {
        self.base_mut().set_parent(parent);
    }

    fn set_bounds(&mut self, rect: Rect) {
        self.base_mut().set_rect(rect);
    }

    /// Height this view wants when given `width`. Containers use it to stack
    /// children before positioning them.
    fn preferred_height(&mut self, _ctx: &LayoutCtx<'_>, _width: f32) -> f32 {
        self.base().rect().h
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::Other
    }

    /// Only list rows draw a top separator; everything else ignores this.
    fn set_draw_top_separator(&mut self, _draw: bool) {}

    fn will_appear(&mut self, _reset_state: bool) {}

    fn will_disappear(&mut self, _reset_state: bool) {}

    fn visit_children(&self, _f: &mut dyn FnMut(&dyn View)) {}

    fn needs_layout(&self) -> bool {
        let mut dirty = self.base().needs_layout();
        if !dirty {
            self.visit_children(&mut |c| dirty |= c.needs_layout());
        }
        dirty
    }

    fn show(&mut self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        self.base().show(on_done, animated, animation);
    }

    fn hide(&mut self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        self.base().hide(on_done, animated, animation);
    }

    /// Draws unless hidden, with this view's fade alpha applied.
    fn frame(&mut self, ctx: &mut DrawCtx<'_>) {
        if self.base().is_hidden() {
            return;
        }
        let alpha = self.base().alpha();
        ctx.with_alpha(alpha, |ctx| self.draw(ctx));
    }
}

pub fn downcast_ref<T: View>(view: &dyn View) -> Option<&T> {
    (view as &dyn Any).downcast_ref::<T>()
}

pub fn downcast_mut<T: View>(view: &mut dyn View) -> Option<&mut T> {
    (view as &mut dyn Any).downcast_mut::<T>()
}
