//! Headless tour of the toolkit: builds a settings page inside an applet
//! frame, slides it in and logs what each frame draws.
//!
//! ```text
//! RUST_LOG=info cargo run -p showcase -- [--light] [--style style.json]
//! ```

use anyhow::{Context, Result};
use marquee_core::{
    DrawCtx, LayoutCtx, Rect, Scene, Style, Theme, View, ViewAnimation, ViewBase, downcast_mut,
};
use marquee_devtools::FpsOverlay;
use marquee_text::MonospaceMeasurer;
use marquee_ui::{
    AppletFrame, FrameDriver, Header, List, ListItem, ListItemGroupSpacing, ProgressDisplay,
    ProgressDisplayFlags, SelectListItem, Table, TableRowKind, ToggleListItem,
};
use web_time::Duration;

const FRAME: Duration = Duration::from_millis(16);

/// The applet frame with the FPS overlay on top.
struct Screen {
    base: ViewBase,
    frame: AppletFrame,
    fps: FpsOverlay,
}

impl View for Screen {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        f(&self.frame);
        f(&self.fps);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let rect = self.base.rect();
        self.frame.set_bounds(rect);
        self.frame.layout(ctx);
        self.fps.set_bounds(rect);
        self.fps.layout(ctx);
        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        self.frame.frame(ctx);
        self.fps.frame(ctx);
    }
}

fn settings_list() -> List {
    let mut list = List::new();

    list.add_view(Box::new(Header::new("Display", false)));
    let mut brightness = ListItem::new("Brightness")
        .with_description("Applies to the built-in screen only.");
    brightness.set_value("80%", false, false);
    list.add_view(Box::new(brightness));
    list.add_view(Box::new(ToggleListItem::new("Dark mode", true)));
    list.add_view(Box::new(SelectListItem::new(
        "Language",
        vec!["English".into(), "Français".into(), "日本語".into()],
        0,
    )));

    list.add_view(Box::new(ListItemGroupSpacing::new(true)));

    list.add_view(Box::new(Header::new("Storage", false).with_sub_label("2 devices")));
    let mut table = Table::new();
    table.add_row(TableRowKind::Header, "Device", "Free");
    table.add_row(TableRowKind::Body, "System memory", "12.4 GB");
    table.add_row(TableRowKind::Body, "SD card", "88.0 GB");
    list.add_view(Box::new(table));

    let mut progress = ProgressDisplay::new(ProgressDisplayFlags::default());
    progress.set_bounds(Rect::new(0.0, 0.0, 0.0, 30.0));
    progress.set_progress(42, 100);
    list.add_view(Box::new(progress));

    list
}

fn load_style(args: &[String]) -> Result<Option<Style>> {
    let Some(pos) = args.iter().position(|a| a == "--style") else {
        return Ok(None);
    };
    let path = args
        .get(pos + 1)
        .context("--style expects a path to a JSON file")?;
    let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
    let style = Style::from_json(&json).with_context(|| format!("parsing {path}"))?;
    Ok(Some(style))
}

fn log_scene(index: u64, scene: &Scene) {
    let texts: Vec<&str> = scene.texts().collect();
    log::info!(
        "frame {index}: {} nodes, texts: {}",
        scene.nodes.len(),
        texts.join(" | ")
    );
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut driver = FrameDriver::new(MonospaceMeasurer::default());
    if let Some(style) = load_style(&args)? {
        driver.set_style(style);
    }
    if args.iter().any(|a| a == "--light") {
        driver.set_theme(Theme::light());
    }

    let mut frame = AppletFrame::new(true, true);
    frame.set_title("Settings");
    frame.set_footer_text("marquee showcase");
    frame.set_on_cancel(|| {
        log::info!("back pressed");
        true
    });
    frame.set_content_view(Some(Box::new(settings_list())));

    let mut screen = Screen {
        base: ViewBase::new(),
        frame,
        fps: FpsOverlay::new(),
    };
    screen.frame.will_appear(true);
    screen.frame.show(
        Box::new(|| log::info!("frame shown")),
        true,
        ViewAnimation::SlideLeft,
    );

    for i in 0..24u64 {
        if i == 12
            && let Some(list) = screen
                .frame
                .content_view_mut()
                .and_then(|v| downcast_mut::<List>(v))
        {
            list.move_focus(1, true);
            log::info!("focused row {:?}", list.focused_index());
        }

        let mut scene = Scene::new();
        scene.clear_color = driver.theme().background;
        let stats = driver.frame_with_delta(&mut screen, &mut scene, FRAME);
        screen.fps.record(stats.dt);
        log::debug!(
            "frame {}: laid out {}, animating {}, transition {:?}",
            stats.frame,
            stats.laid_out,
            stats.animating,
            screen.frame.transition()
        );
        if i % 6 == 0 {
            log_scene(stats.frame, &scene);
        }
    }

    screen.frame.on_cancel();
    Ok(())
}
