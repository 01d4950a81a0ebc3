//! Text label with ellipsis truncation and an auto-scrolling ticker.
//!
//! A single-line label that is wider than the width its parent gave it draws
//! truncated with an ellipsis. While its parent holds focus (or always, for
//! [`LabelStyle::UnfocusedTicker`]) it instead scrolls: the text is drawn
//! twice, separated by a gap, and slid left by the ticker width, pausing
//! between passes.
//!
//! ```text
//! Idle --focus--> Waiting --wait elapsed, overflowing--> Scrolling
//!                  ^   |                                     |
//!                  |   +--wait elapsed, fits--+              |
//!                  +--------------------------+--scroll done-+
//! any --unfocus / stop--> Idle
//! ```

use std::cell::Cell;
use std::rc::Rc;

use marquee_core::animation::{self, AnimTag, Animated, Easing, Tween};
use marquee_core::focus::{self, Subscription};
use marquee_core::{
    Color, DrawCtx, LayoutCtx, LayoutRole, Rect, Style, Theme, Vec2, View, ViewBase, ViewId,
    locals,
};
use marquee_text::{FontFace, HAlign, TextStyle, VAlign, ellipsize_line};
use web_time::Duration;

/// Inserted between the two copies of the text while ticking.
pub const TICKER_GAP: &str = "          ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LabelStyle {
    Regular,
    Medium,
    Small,
    Description,
    Crash,
    ButtonPrimary,
    ButtonPrimaryDisabled,
    ButtonBorderless,
    ButtonDialog,
    ButtonBordered,
    ButtonRegular,
    ListItem,
    ListItemValue,
    ListItemValueFaint,
    Notification,
    Dialog,
    Hint,
    /// Never truncated or ticked.
    Fps,
    /// Ticks continuously, whatever has focus.
    UnfocusedTicker,
}

impl LabelStyle {
    pub fn font_size(self, style: &Style) -> f32 {
        let l = &style.label;
        let px = match self {
            LabelStyle::Regular | LabelStyle::UnfocusedTicker => l.regular_font_size,
            LabelStyle::Medium => l.medium_font_size,
            LabelStyle::Small => l.small_font_size,
            LabelStyle::Description => l.description_font_size,
            LabelStyle::Crash => l.crash_font_size,
            LabelStyle::ButtonPrimary
            | LabelStyle::ButtonPrimaryDisabled
            | LabelStyle::ButtonBorderless
            | LabelStyle::ButtonDialog
            | LabelStyle::ButtonBordered
            | LabelStyle::ButtonRegular => l.button_font_size,
            LabelStyle::ListItem | LabelStyle::Fps => l.list_item_font_size,
            LabelStyle::ListItemValue | LabelStyle::ListItemValueFaint => style.list.item.value_size,
            LabelStyle::Notification => l.notification_font_size,
            LabelStyle::Dialog => l.dialog_font_size,
            LabelStyle::Hint => l.hint_font_size,
        };
        px as f32
    }

    pub fn line_height(self, style: &Style) -> f32 {
        match self {
            LabelStyle::Notification => style.label.notification_line_height,
            _ => style.label.line_height,
        }
    }

    pub fn color(self, theme: &Theme) -> Color {
        match self {
            LabelStyle::Description => theme.description,
            LabelStyle::Crash => Color::WHITE,
            LabelStyle::ButtonPrimary => theme.button_primary_enabled_text,
            LabelStyle::ButtonPrimaryDisabled => theme.button_primary_disabled_text,
            LabelStyle::ButtonBorderless | LabelStyle::ButtonRegular => theme.button_regular_text,
            LabelStyle::ButtonBordered => theme.button_bordered_text,
            LabelStyle::ButtonDialog => theme.dialog_button,
            LabelStyle::Notification => theme.notification_text,
            LabelStyle::ListItemValue | LabelStyle::Fps => theme.list_item_value,
            LabelStyle::ListItemValueFaint => theme.list_item_faint_value,
            _ => theme.text,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAnimation {
    EaseIn,
    EaseOut,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TickerPhase {
    #[default]
    Idle,
    Waiting,
    Scrolling,
}

/// What `draw` will put on screen for a single-line label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelRendering {
    Plain,
    Ellipsis,
    Ticker,
}

#[derive(Debug)]
struct Ticker {
    offset: Animated,
    wait: AnimTag,
    phase: Cell<TickerPhase>,
    active: Cell<bool>,
    /// Extra width of the doubled text over the plain text.
    width: Cell<f32>,
    overflowing: Cell<bool>,
    owner: Cell<Option<ViewId>>,
}

impl Drop for Ticker {
    fn drop(&mut self) {
        animation::kill_by_tag(self.wait);
        self.offset.kill();
    }
}

impl Ticker {
    fn new() -> Self {
        Self {
            offset: Animated::new(0.0),
            wait: AnimTag::next(),
            phase: Cell::new(TickerPhase::Idle),
            active: Cell::new(false),
            width: Cell::new(0.0),
            overflowing: Cell::new(false),
            owner: Cell::new(None),
        }
    }

    fn start(self: &Rc<Self>) {
        self.stop();
        self.arm_wait();
    }

    fn stop(&self) {
        animation::kill_by_tag(self.wait);
        self.offset.kill();
        self.offset.set(0.0);
        self.phase.set(TickerPhase::Idle);
    }

    fn arm_wait(self: &Rc<Self>) {
        let wait = locals::style().animation_duration.ticker_wait;
        self.phase.set(TickerPhase::Waiting);
        let weak = Rc::downgrade(self);
        animation::start_timer(self.wait, Duration::from_millis(wait), move || {
            if let Some(t) = weak.upgrade() {
                t.scroll();
            }
        });
    }

    fn scroll(self: &Rc<Self>) {
        self.offset.kill();
        self.offset.set(0.0);
        if !self.active.get() {
            self.phase.set(TickerPhase::Idle);
            return;
        }
        let width = self.width.get();
        if !self.overflowing.get() || width <= 0.0 {
            self.arm_wait();
            return;
        }

        self.phase.set(TickerPhase::Scrolling);
        let per_px = locals::style().animation_duration.ticker_ms_per_px;
        let duration = Duration::from_millis((width * per_px as f32) as u64);
        let weak = Rc::downgrade(self);
        animation::push(
            Tween::new(&self.offset, width, duration)
                .easing(Easing::Linear)
                .on_complete(move || {
                    if let Some(t) = weak.upgrade()
                        && t.active.get()
                    {
                        t.arm_wait();
                    }
                }),
        );
    }

    fn on_focus_change(self: &Rc<Self>, focused: Option<ViewId>) {
        let mine = focused.is_some() && focused == self.owner.get();
        if mine {
            self.active.set(true);
            self.start();
        } else if self.active.get() {
            self.active.set(false);
            self.stop();
        }
    }
}

pub struct Label {
    base: ViewBase,
    text: String,
    text_ticker: String,
    text_ellipsis: String,
    multiline: bool,
    label_style: LabelStyle,
    h_align: HAlign,
    v_align: VAlign,
    font: FontFace,
    font_size: Option<f32>,
    custom_color: Option<Color>,

    /// Bounds as assigned by the parent, before alignment.
    anchor: Rect,
    text_width: f32,
    text_height: f32,
    bounding_box_height: f32,
    measured_size: Option<f32>,

    text_animation: Animated,
    ticker: Rc<Ticker>,
    _focus: Option<Subscription>,
}

impl Label {
    pub fn new(label_style: LabelStyle, text: impl Into<String>, multiline: bool) -> Self {
        let ticker = Rc::new(Ticker::new());
        let focus = if label_style == LabelStyle::UnfocusedTicker {
            ticker.active.set(true);
            ticker.start();
            None
        } else {
            let weak = Rc::downgrade(&ticker);
            Some(focus::subscribe(move |focused| {
                if let Some(t) = weak.upgrade() {
                    t.on_focus_change(focused);
                }
            }))
        };

        let mut label = Self {
            base: ViewBase::new(),
            text: String::new(),
            text_ticker: String::new(),
            text_ellipsis: String::new(),
            multiline,
            label_style,
            h_align: HAlign::Left,
            v_align: VAlign::Middle,
            font: FontFace::REGULAR,
            font_size: None,
            custom_color: None,
            anchor: Rect::default(),
            text_width: 0.0,
            text_height: 0.0,
            bounding_box_height: 0.0,
            measured_size: None,
            text_animation: Animated::new(1.0),
            ticker,
            _focus: focus,
        };
        label.replace_text(text.into());
        label
    }

    fn replace_text(&mut self, text: String) {
        self.text_ticker = format!("{text}{TICKER_GAP}{text}");
        self.text = text;
        self.text_ellipsis.clear();
        self.measured_size = None;
        self.base.invalidate();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text. A running ticker restarts from the beginning.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text == self.text {
            return;
        }
        self.replace_text(text);
        if self.ticker.active.get() {
            self.ticker.start();
        }
    }

    pub fn label_style(&self) -> LabelStyle {
        self.label_style
    }

    /// Ignored for [`LabelStyle::UnfocusedTicker`] labels.
    pub fn set_style(&mut self, label_style: LabelStyle) {
        if self.label_style == LabelStyle::UnfocusedTicker || self.label_style == label_style {
            return;
        }
        self.label_style = label_style;
        self.measured_size = None;
        self.base.invalidate();
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    pub fn set_horizontal_align(&mut self, align: HAlign) {
        self.h_align = align;
        self.base.invalidate();
    }

    pub fn set_vertical_align(&mut self, align: VAlign) {
        self.v_align = align;
    }

    pub fn set_font(&mut self, font: FontFace) {
        self.font = font;
        self.measured_size = None;
        self.base.invalidate();
    }

    pub fn unset_font(&mut self) {
        self.set_font(FontFace::REGULAR);
    }

    pub fn set_font_size(&mut self, size: f32) {
        if self.font_size != Some(size) {
            self.font_size = Some(size);
            self.measured_size = None;
            self.base.invalidate();
        }
    }

    pub fn set_color(&mut self, color: Color) {
        self.custom_color = Some(color);
    }

    pub fn unset_color(&mut self) {
        self.custom_color = None;
    }

    pub fn color(&self, theme: &Theme) -> Color {
        self.custom_color
            .unwrap_or_else(|| self.label_style.color(theme))
    }

    pub fn text_width(&self) -> f32 {
        self.text_width
    }

    pub fn text_height(&self) -> f32 {
        self.text_height
    }

    pub fn ellipsis_text(&self) -> &str {
        &self.text_ellipsis
    }

    fn text_style(&self, style: &Style) -> TextStyle {
        let size = self
            .font_size
            .unwrap_or_else(|| self.label_style.font_size(style));
        let line_height = if self.multiline {
            self.label_style.line_height(style)
        } else {
            1.0
        };
        TextStyle::new(size)
            .with_font(self.font)
            .with_line_height(line_height)
            .with_align(self.h_align, self.v_align)
    }

    /// Recomputes the cached single-line metrics if the text, face or size
    /// changed since the last measurement.
    pub fn measure(&mut self, ctx: &LayoutCtx<'_>) {
        let ts = self.text_style(ctx.style);
        if self.measured_size == Some(ts.size) {
            return;
        }
        self.measured_size = Some(ts.size);
        self.text_width = 0.0;
        self.text_height = 0.0;
        self.bounding_box_height = 0.0;
        self.ticker.width.set(0.0);

        if self.multiline || self.text.is_empty() {
            return;
        }

        let m = ctx.measurer.measure(&self.text, &ts);
        self.text_width = m.width.ceil();
        self.text_height = m.height.ceil();
        self.bounding_box_height = (m.height * 1.25).ceil();

        let doubled = ctx.measurer.measure(&self.text_ticker, &ts).width.ceil();
        self.ticker.width.set((doubled - self.text_width).max(0.0));
    }

    /// Width the text is drawn within: the allotted width when the text
    /// overflows it, else the text's own width.
    pub fn box_width(&self) -> f32 {
        let allotted = self.anchor.w;
        if allotted > 0.0 && allotted < self.text_width {
            allotted
        } else {
            self.text_width
        }
    }

    pub fn rendering(&self) -> LabelRendering {
        if self.multiline
            || self.label_style == LabelStyle::Fps
            || self.text_width <= self.box_width()
        {
            return LabelRendering::Plain;
        }
        if self.text_animation.get() >= 1.0 && self.ticker.active.get() {
            LabelRendering::Ticker
        } else {
            LabelRendering::Ellipsis
        }
    }

    /// Fades and scales the text in or out over the highlight duration.
    pub fn animate(&mut self, animation: LabelAnimation) {
        self.text_animation.kill();
        let (from, to) = match animation {
            LabelAnimation::EaseIn => (0.0, 1.0),
            LabelAnimation::EaseOut => (1.0, 0.0),
        };
        let ms = locals::style().animation_duration.highlight;
        let handle = self.text_animation.handle();
        animation::push(
            Tween::new(&self.text_animation, to, Duration::from_millis(ms))
                .from(from)
                .easing(Easing::EaseInOut)
                .on_complete(move || {
                    if let Some(cell) = handle.upgrade() {
                        cell.set(1.0);
                    }
                }),
        );
    }

    pub fn reset_text_animation(&mut self) {
        self.text_animation.kill();
        self.text_animation.set(1.0);
    }

    /// 1.0 when no text fade is in progress.
    pub fn text_animation(&self) -> f32 {
        self.text_animation.get()
    }

    pub fn start_ticker_animation(&mut self) {
        self.ticker.start();
    }

    pub fn stop_ticker_animation(&mut self) {
        self.ticker.stop();
    }

    /// Restarts the ticker from its initial wait if it is active.
    pub fn reset_ticker_animation(&mut self) {
        if self.ticker.active.get() {
            self.ticker.start();
        } else {
            self.ticker.stop();
        }
    }

    pub fn on_parent_focus(&mut self) {
        self.ticker.active.set(true);
        self.ticker.start();
    }

    pub fn on_parent_unfocus(&mut self) {
        self.ticker.active.set(false);
        self.ticker.stop();
    }

    pub fn is_ticker_active(&self) -> bool {
        self.ticker.active.get()
    }

    pub fn ticker_phase(&self) -> TickerPhase {
        self.ticker.phase.get()
    }

    pub fn ticker_offset(&self) -> f32 {
        self.ticker.offset.get()
    }

    pub fn ticker_width(&self) -> f32 {
        self.ticker.width.get()
    }
}

impl View for Label {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn set_parent(&mut self, parent: Option<ViewId>) {
        self.base.set_parent(parent);
        self.ticker.owner.set(parent);
    }

    fn set_bounds(&mut self, rect: Rect) {
        self.anchor = rect;
        self.base.set_rect(rect);
    }

    fn preferred_height(&mut self, ctx: &LayoutCtx<'_>, width: f32) -> f32 {
        if self.text.is_empty() {
            return 0.0;
        }
        if self.multiline {
            let ts = self.text_style(ctx.style);
            return ctx.measurer.measure_box(&self.text, &ts, width).height.ceil();
        }
        self.measure(ctx);
        self.text_height
    }

    fn layout_role(&self) -> LayoutRole {
        LayoutRole::Label
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        self.measure(ctx);
        let anchor = self.anchor;

        if self.text.is_empty() {
            self.base.set_rect(Rect::new(anchor.x, anchor.y, 0.0, anchor.h));
            self.base.mark_laid_out();
            return;
        }

        if self.multiline {
            let ts = self.text_style(ctx.style);
            let m = ctx.measurer.measure_box(&self.text, &ts, anchor.w);
            self.base.set_rect(Rect::new(anchor.x, anchor.y, anchor.w, m.height.ceil()));
            self.base.mark_laid_out();
            return;
        }

        let box_width = self.box_width();
        let x = match self.h_align {
            HAlign::Left => anchor.x,
            HAlign::Center => anchor.x - (box_width / 2.0).floor(),
            HAlign::Right => anchor.x - box_width,
        };
        self.base.set_rect(Rect::new(x, anchor.y, self.text_width, anchor.h));

        let overflowing = self.text_width > box_width;
        if overflowing {
            let ts = self.text_style(ctx.style);
            self.text_ellipsis = ellipsize_line(&self.text, box_width, |s| {
                ctx.measurer.measure(s, &ts).width
            });
        } else {
            self.text_ellipsis.clear();
        }
        self.ticker
            .overflowing
            .set(overflowing && self.label_style != LabelStyle::Fps);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        if self.text.is_empty() {
            return;
        }

        let rect = self.base.rect();
        let mut ts = self.text_style(ctx.style);
        let mut color = ctx.a(self.color(ctx.theme));

        if self.multiline {
            ts.v_align = VAlign::Top;
            ctx.canvas
                .text_box(rect.origin(), rect.w, &self.text, &ts, color);
            return;
        }

        let fade = self.text_animation.get();
        if fade < 1.0 {
            color = color.mul_alpha(fade);
            ts.size *= fade;
        }

        let rendering = self.rendering();
        let box_width = self.box_width();
        let ticker_width = self.ticker.width.get();

        let mut x = rect.x;
        let mut y = rect.y;
        let mut box_y = rect.y;
        let ticker_excess = self.text_width + ticker_width - box_width;
        match self.h_align {
            HAlign::Left => {}
            HAlign::Center => {
                x += box_width / 2.0;
                if rendering == LabelRendering::Ticker {
                    x += ticker_excess / 2.0;
                }
            }
            HAlign::Right => {
                x += box_width;
                if rendering == LabelRendering::Ticker {
                    x += ticker_excess;
                }
            }
        }
        match self.v_align {
            VAlign::Top => {}
            VAlign::Middle => {
                y += rect.h / 2.0;
                box_y = y - self.bounding_box_height / 2.0;
            }
            VAlign::Bottom | VAlign::Baseline => {
                y += rect.h;
                box_y = y - self.bounding_box_height;
            }
        }

        let text = match rendering {
            LabelRendering::Plain => self.text.as_str(),
            LabelRendering::Ellipsis => self.text_ellipsis.as_str(),
            LabelRendering::Ticker => self.text_ticker.as_str(),
        };

        if rendering == LabelRendering::Ticker {
            let box_height = rect.h.max(self.bounding_box_height);
            ctx.canvas.save();
            ctx.canvas
                .intersect_scissor(Rect::new(rect.x, box_y, box_width, box_height));
            x -= self.ticker.offset.get();
            ctx.canvas.text(Vec2::new(x, y), text, &ts, color);
            ctx.canvas.restore();
        } else {
            ctx.canvas.text(Vec2::new(x, y), text, &ts, color);
        }
    }
}
