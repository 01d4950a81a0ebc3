//! Progress bar with an optional percentage label and busy spinner.

use std::cell::Cell;
use std::f32::consts::TAU;
use std::rc::Rc;

use bitflags::bitflags;
use marquee_core::animation::{self, Animated, Easing, Tween};
use marquee_core::{DrawCtx, LayoutCtx, LineCap, Path, Rect, Vec2, View, ViewBase, locals};
use marquee_text::HAlign;
use web_time::Duration;

use crate::label::{Label, LabelStyle};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ProgressDisplayFlags: u8 {
        const PERCENTAGE = 1 << 0;
        const SPINNER = 1 << 1;
    }
}

impl Default for ProgressDisplayFlags {
    fn default() -> Self {
        Self::all()
    }
}

const SPINNER_BARS: usize = 8;

struct SpinnerState {
    /// Index of the leading bar, 0..8 over one revolution.
    head: Animated,
    running: Cell<bool>,
}

impl SpinnerState {
    fn spin(self: &Rc<Self>) {
        let ms = locals::style().animation_duration.progress;
        let weak = Rc::downgrade(self);
        animation::push(
            Tween::new(&self.head, SPINNER_BARS as f32, Duration::from_millis(ms))
                .from(0.0)
                .easing(Easing::Linear)
                .on_complete(move || {
                    if let Some(s) = weak.upgrade()
                        && s.running.get()
                    {
                        s.spin();
                    }
                }),
        );
    }

    fn stop(&self) {
        self.running.set(false);
        self.head.kill();
        self.head.set(0.0);
    }
}

/// Eight bars around a gap; the leading bar is opaque and the ones behind it
/// fade out. Spins while appeared.
pub struct ProgressSpinner {
    base: ViewBase,
    state: Rc<SpinnerState>,
}

impl ProgressSpinner {
    pub fn new() -> Self {
        Self {
            base: ViewBase::new(),
            state: Rc::new(SpinnerState {
                head: Animated::new(0.0),
                running: Cell::new(false),
            }),
        }
    }

    pub fn is_spinning(&self) -> bool {
        self.state.running.get()
    }

    /// Index of the opaque bar.
    pub fn leading_bar(&self) -> usize {
        (self.state.head.get().floor().max(0.0) as usize) % SPINNER_BARS
    }
}

impl Default for ProgressSpinner {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.state.stop();
    }
}

impl View for ProgressSpinner {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn will_appear(&mut self, _reset_state: bool) {
        if !self.state.running.get() {
            self.state.running.set(true);
            self.state.spin();
        }
    }

    fn will_disappear(&mut self, _reset_state: bool) {
        self.state.stop();
    }

    fn layout(&mut self, _ctx: &LayoutCtx<'_>) {
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let rect = self.base.rect();
        let size = rect.w.min(rect.h);
        if size <= 0.0 {
            return;
        }
        let metrics = &ctx.style.progress_spinner;
        let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
        let inner = size * metrics.center_gap_multiplier;
        let outer = size / 2.0;
        let width = size * metrics.bar_width_multiplier;
        let head = self.leading_bar();

        for i in 0..SPINNER_BARS {
            let age = (head + SPINNER_BARS - i) % SPINNER_BARS;
            let color = ctx.a(
                ctx.theme
                    .spinner_bar
                    .mul_alpha(1.0 - age as f32 / SPINNER_BARS as f32),
            );
            let (sin, cos) = (i as f32 * TAU / SPINNER_BARS as f32).sin_cos();
            let path = Path::line(
                Vec2::new(center.x + cos * inner, center.y + sin * inner),
                Vec2::new(center.x + cos * outer, center.y + sin * outer),
            );
            ctx.canvas.stroke(&path, color, width, LineCap::Round);
        }
    }
}

pub struct ProgressDisplay {
    base: ViewBase,
    label: Option<Label>,
    spinner: Option<ProgressSpinner>,
    percentage: u32,
}

impl ProgressDisplay {
    pub fn new(flags: ProgressDisplayFlags) -> Self {
        let base = ViewBase::new();
        let id = base.id();

        let label = flags.contains(ProgressDisplayFlags::PERCENTAGE).then(|| {
            let mut label = Label::new(LabelStyle::Dialog, "0%", false);
            label.set_horizontal_align(HAlign::Right);
            label.set_parent(Some(id));
            label
        });
        let spinner = flags.contains(ProgressDisplayFlags::SPINNER).then(|| {
            let mut spinner = ProgressSpinner::new();
            spinner.set_parent(Some(id));
            spinner
        });

        Self {
            base,
            label,
            spinner,
            percentage: 0,
        }
    }

    /// Updates the bar to `current / max`. Out-of-range pairs are ignored.
    pub fn set_progress(&mut self, current: i32, max: i32) {
        if max <= 0 || current < 0 || current > max {
            log::debug!("ignoring progress {current}/{max}");
            return;
        }
        self.percentage = (current as i64 * 100 / max as i64) as u32;
        if let Some(label) = self.label.as_mut() {
            label.set_text(format!("{}%", self.percentage));
        }
    }

    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    pub fn spinner(&self) -> Option<&ProgressSpinner> {
        self.spinner.as_ref()
    }
}

impl View for ProgressDisplay {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        if let Some(label) = &self.label {
            f(label);
        }
        if let Some(spinner) = &self.spinner {
            f(spinner);
        }
    }

    fn will_appear(&mut self, reset_state: bool) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.will_appear(reset_state);
        }
    }

    fn will_disappear(&mut self, reset_state: bool) {
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.will_disappear(reset_state);
        }
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let rect = self.base.rect();
        let label_width = ctx.style.progress_display.percentage_label_width as f32;

        if let Some(label) = self.label.as_mut() {
            // Right-aligned labels are anchored at their right edge.
            label.set_bounds(Rect::new(
                rect.right(),
                rect.y + rect.h / 2.0,
                label_width,
                0.0,
            ));
            label.layout(ctx);
        }
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.set_bounds(Rect::new(rect.x, rect.y, rect.h, rect.h));
            spinner.layout(ctx);
        }

        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let rect = self.base.rect();
        let mut bar_x = rect.x;
        let mut bar_width = rect.w;

        // Extra room for the round caps.
        if let Some(label) = self.label.as_mut() {
            label.frame(ctx);
            bar_width -= ctx.style.progress_display.percentage_label_width as f32 * 1.30;
        }
        if let Some(spinner) = self.spinner.as_mut() {
            spinner.frame(ctx);
            let w = spinner.base().rect().w * 1.25;
            bar_width -= w;
            bar_x += w;
        }
        let bar_width = bar_width.max(0.0);

        let y = rect.y + rect.h / 2.0;
        let stroke = rect.h / 3.0;
        let track = ctx.a(ctx.theme.list_item_separator);
        ctx.canvas.stroke(
            &Path::line(Vec2::new(bar_x, y), Vec2::new(bar_x + bar_width, y)),
            track,
            stroke,
            LineCap::Round,
        );

        if self.percentage > 0 {
            let fill = ctx.a(ctx.theme.list_item_value);
            let end = bar_x + bar_width * self.percentage as f32 / 100.0;
            ctx.canvas.stroke(
                &Path::line(Vec2::new(bar_x, y), Vec2::new(end, y)),
                fill,
                stroke,
                LineCap::Round,
            );
        }
    }
}
