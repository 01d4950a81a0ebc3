//! Per-frame driver: advances animations, lays the tree out when something
//! asks for it, then draws.

use std::rc::Rc;

use marquee_core::animation::{self, Clock, SystemClock};
use marquee_core::{
    Canvas, DrawCtx, LayoutCtx, Rect, Scene, StaticTranslator, Style, Theme, Translator, View,
    with_style, with_theme,
};
use marquee_text::TextMeasurer;
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Index of the frame, starting at 0.
    pub frame: u64,
    pub dt: Duration,
    /// Whether `layout` ran this frame.
    pub laid_out: bool,
    /// Whether tweens are still running after this frame's advance.
    pub animating: bool,
}

pub struct FrameDriver {
    style: Rc<Style>,
    theme: Rc<Theme>,
    measurer: Box<dyn TextMeasurer>,
    translator: Box<dyn Translator>,
    clock: Box<dyn Clock>,
    last: Option<Instant>,
    size: (u32, u32),
    resized: bool,
    frames: u64,
}

impl FrameDriver {
    pub fn new(measurer: impl TextMeasurer + 'static) -> Self {
        Self {
            style: Rc::new(Style::default()),
            theme: Rc::new(Theme::default()),
            measurer: Box::new(measurer),
            translator: Box::new(StaticTranslator::english()),
            clock: Box::new(SystemClock),
            last: None,
            size: (1280, 720),
            resized: true,
            frames: 0,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self.last = None;
        self
    }

    pub fn with_translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Box::new(translator);
        self.resized = true;
        self
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = Rc::new(style);
        self.resized = true;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = Rc::new(theme);
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        if self.size != (width, height) {
            log::debug!("resized to {width}x{height}");
            self.size = (width, height);
            self.resized = true;
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Runs one frame, timing it with the driver's clock.
    pub fn frame(&mut self, root: &mut dyn View, canvas: &mut dyn Canvas) -> FrameStats {
        let now = self.clock.now();
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or_default();
        self.last = Some(now);
        self.frame_with_delta(root, canvas, dt)
    }

    pub fn frame_with_delta(
        &mut self,
        root: &mut dyn View,
        canvas: &mut dyn Canvas,
        dt: Duration,
    ) -> FrameStats {
        let style = self.style.clone();
        let theme = self.theme.clone();
        let index = self.frames;
        self.frames += 1;

        with_style(style.clone(), || {
            with_theme(theme.clone(), || {
                let animating = animation::advance(dt);

                let bounds = Rect::new(0.0, 0.0, self.size.0 as f32, self.size.1 as f32);
                let laid_out =
                    self.resized || root.base().rect() != bounds || root.needs_layout();
                if laid_out {
                    let ctx = LayoutCtx {
                        style: &style,
                        measurer: &*self.measurer,
                        translator: &*self.translator,
                    };
                    root.set_bounds(bounds);
                    root.layout(&ctx);
                    self.resized = false;
                }

                let mut ctx = DrawCtx::new(canvas, &style, &theme);
                root.frame(&mut ctx);

                FrameStats {
                    frame: index,
                    dt,
                    laid_out,
                    animating,
                }
            })
        })
    }

    /// Draws a frame into a fresh [`Scene`] cleared to the theme background.
    pub fn render(&mut self, root: &mut dyn View) -> (Scene, FrameStats) {
        let mut scene = Scene::new();
        scene.clear_color = self.theme.background;
        let stats = self.frame(root, &mut scene);
        (scene, stats)
    }
}
