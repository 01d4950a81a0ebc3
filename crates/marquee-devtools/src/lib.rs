use web_time::{Duration, Instant};

use marquee_core::{DrawCtx, LayoutCtx, Rect, View, ViewBase};
use marquee_ui::{Label, LabelStyle};

/// Smoothing factor of the frame rate average.
const EMA_ALPHA: f32 = 0.2;

const MARGIN: f32 = 8.0;

/// Frame counter and smoothed frame rate, drawn in the top left corner with
/// an FPS-styled label.
pub struct FpsOverlay {
    base: ViewBase,
    label: Label,
    enabled: bool,
    frame_count: u64,
    last_frame: Option<Instant>,
    fps_smooth: f32,
}

impl Default for FpsOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl FpsOverlay {
    pub fn new() -> Self {
        let base = ViewBase::new();
        let mut label = Label::new(LabelStyle::Fps, "FPS: 0", false);
        label.set_parent(Some(base.id()));
        Self {
            base,
            label,
            enabled: true,
            frame_count: 0,
            last_frame: None,
            fps_smooth: 0.0,
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
        log::debug!("fps overlay enabled: {}", self.enabled);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn fps(&self) -> f32 {
        self.fps_smooth
    }

    /// Records a frame that took `dt`.
    pub fn record(&mut self, dt: Duration) {
        self.frame_count += 1;
        let dt = dt.as_secs_f32();
        if dt > 0.0 {
            let fps = 1.0 / dt;
            self.fps_smooth = if self.fps_smooth == 0.0 {
                fps
            } else {
                (1.0 - EMA_ALPHA) * self.fps_smooth + EMA_ALPHA * fps
            };
        }
        self.label.set_text(format!("FPS: {:.0}", self.fps_smooth));
    }

    /// Records a frame ending now, timed against the previous call.
    pub fn record_now(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map(|prev| now.saturating_duration_since(prev))
            .unwrap_or_default();
        self.record(dt);
    }

    pub fn label(&self) -> &Label {
        &self.label
    }
}

impl View for FpsOverlay {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        f(&self.label);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let rect = self.base.rect();
        self.label
            .set_bounds(Rect::new(rect.x + MARGIN, rect.y + MARGIN, 0.0, 0.0));
        self.label.layout(ctx);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        if self.enabled {
            self.label.frame(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::{Scene, StaticTranslator, Style, Theme};
    use marquee_text::MonospaceMeasurer;

    #[test]
    fn test_fps_is_smoothed() {
        let mut overlay = FpsOverlay::new();
        overlay.record(Duration::from_millis(20));
        assert!((overlay.fps() - 50.0).abs() < 1e-3);

        overlay.record(Duration::from_millis(10));
        // 0.8 * 50 + 0.2 * 100
        assert!((overlay.fps() - 60.0).abs() < 1e-3);
        assert_eq!(overlay.frame_count(), 2);
        assert_eq!(overlay.label().text(), "FPS: 60");

        overlay.record(Duration::ZERO);
        assert!((overlay.fps() - 60.0).abs() < 1e-3);
        assert_eq!(overlay.frame_count(), 3);
    }

    #[test]
    fn test_overlay_draws_only_when_enabled() {
        let style = Style::default();
        let theme = Theme::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::english();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };

        let mut overlay = FpsOverlay::new();
        overlay.record(Duration::from_millis(20));
        overlay.set_bounds(Rect::new(0.0, 0.0, 1280.0, 720.0));
        overlay.layout(&ctx);
        assert_eq!(overlay.label().base().rect().origin().x, 8.0);

        let mut scene = Scene::new();
        let mut dctx = DrawCtx::new(&mut scene, &style, &theme);
        overlay.frame(&mut dctx);
        assert_eq!(scene.texts().collect::<Vec<_>>(), vec!["FPS: 50"]);

        overlay.toggle();
        let mut scene = Scene::new();
        let mut dctx = DrawCtx::new(&mut scene, &style, &theme);
        overlay.frame(&mut dctx);
        assert_eq!(scene.texts().count(), 0);
    }
}
