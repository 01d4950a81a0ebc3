//! Full-screen frame for an applet page.
//!
//! ```text
//! +--------------------------------------------+
//! | [icon]  Title                              |  header
//! |--------------------------------------------|
//! |                                            |
//! |                 content                    |
//! |                                            |
//! |--------------------------------------------|
//! |   footer text              (A) OK (B) Back |  footer
//! +--------------------------------------------+
//! ```
//!
//! In the popup header style the title moves down and two subtitles split by
//! a thin divider sit under it.
//!
//! Sliding show/hide animations move the content sideways while it fades;
//! the frame tracks that in a [`FrameTransition`].

use std::cell::Cell;
use std::rc::Rc;

use marquee_core::{
    Callback, DrawCtx, LayoutCtx, Rect, View, ViewAnimation, ViewBase, locals,
};
use marquee_text::VAlign;

use crate::hint::Hint;
use crate::label::{Label, LabelStyle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    #[default]
    Regular,
    Popup,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameTransition {
    #[default]
    Steady,
    SlideIn,
    SlideOut,
}

/// Horizontal offset of the content while sliding. `content_alpha` is the
/// content's own fade progress.
pub fn content_offset(
    transition: FrameTransition,
    animation: ViewAnimation,
    content_alpha: f32,
    slide: u32,
) -> f32 {
    if transition == FrameTransition::Steady {
        return 0.0;
    }
    let mirrored = matches!(
        (transition, animation),
        (FrameTransition::SlideIn, ViewAnimation::SlideLeft)
            | (FrameTransition::SlideOut, ViewAnimation::SlideRight)
    );
    let mut progress = 1.0 - content_alpha;
    if mirrored {
        progress = 1.0 - progress;
    }
    let mut translation = (slide as f32 * progress) as i32;
    if mirrored {
        translation -= slide as i32;
    }
    -(translation as f32)
}

pub type CancelListener = Box<dyn FnMut() -> bool>;

pub struct AppletFrame {
    base: ViewBase,
    header_style: HeaderStyle,
    title: Option<Label>,
    sub_title_left: Option<Label>,
    sub_title_right: Option<Label>,
    icon: Option<Box<dyn View>>,
    footer: Label,
    hint: Hint,
    content: Option<Box<dyn View>>,
    left_padding: u32,
    right_padding: u32,
    transition: Rc<Cell<FrameTransition>>,
    animation: ViewAnimation,
    on_cancel: Option<CancelListener>,
}

impl AppletFrame {
    pub fn new(pad_left: bool, pad_right: bool) -> Self {
        let style = locals::style();
        let af = &style.applet_frame;
        let base = ViewBase::new();
        let id = base.id();

        let mut footer = Label::new(LabelStyle::UnfocusedTicker, "", false);
        footer.set_font_size(af.footer_text_size as f32);
        footer.set_parent(Some(id));

        let mut hint = Hint::new();
        hint.set_parent(Some(id));

        Self {
            base,
            header_style: HeaderStyle::Regular,
            title: None,
            sub_title_left: None,
            sub_title_right: None,
            icon: None,
            footer,
            hint,
            content: None,
            left_padding: if pad_left { af.separator_spacing } else { 0 },
            right_padding: if pad_right { af.separator_spacing } else { 0 },
            transition: Rc::new(Cell::new(FrameTransition::Steady)),
            animation: ViewAnimation::Fade,
            on_cancel: None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        let id = self.base.id();
        self.title
            .get_or_insert_with(|| {
                let mut label = Label::new(LabelStyle::UnfocusedTicker, "", false);
                label.set_parent(Some(id));
                label
            })
            .set_text(title);
        self.base.invalidate();
    }

    pub fn title(&self) -> Option<&Label> {
        self.title.as_ref()
    }

    /// Only shown with [`HeaderStyle::Popup`].
    pub fn set_subtitle(&mut self, left: impl Into<String>, right: impl Into<String>) {
        let size = locals::style().popup_frame.sub_title_font_size as f32;
        let id = self.base.id();
        for (slot, text) in [
            (&mut self.sub_title_left, left.into()),
            (&mut self.sub_title_right, right.into()),
        ] {
            slot.get_or_insert_with(|| {
                let mut label = Label::new(LabelStyle::UnfocusedTicker, "", false);
                label.set_font_size(size);
                label.set_vertical_align(VAlign::Top);
                label.set_parent(Some(id));
                label
            })
            .set_text(text);
        }
        self.base.invalidate();
    }

    pub fn subtitles(&self) -> (Option<&Label>, Option<&Label>) {
        (self.sub_title_left.as_ref(), self.sub_title_right.as_ref())
    }

    pub fn set_footer_text(&mut self, text: impl Into<String>) {
        self.footer.set_text(text);
        self.base.invalidate();
    }

    pub fn footer(&self) -> &Label {
        &self.footer
    }

    pub fn hint(&self) -> &Hint {
        &self.hint
    }

    pub fn hint_mut(&mut self) -> &mut Hint {
        &mut self.hint
    }

    /// Replaces the icon; `None` removes it.
    pub fn set_icon(&mut self, icon: Option<Box<dyn View>>) {
        self.icon = icon.map(|mut icon| {
            icon.set_parent(Some(self.base.id()));
            icon
        });
        self.base.invalidate();
    }

    pub fn icon(&self) -> Option<&dyn View> {
        self.icon.as_deref()
    }

    pub fn set_header_style(&mut self, header_style: HeaderStyle) {
        self.header_style = header_style;
        self.base.invalidate();
    }

    pub fn header_style(&self) -> HeaderStyle {
        self.header_style
    }

    /// Installs `view` as the content. A previous content view is told it
    /// disappears and is dropped.
    pub fn set_content_view(&mut self, view: Option<Box<dyn View>>) {
        if let Some(mut old) = self.content.take() {
            old.will_disappear(true);
        }
        self.content = view.map(|mut view| {
            view.set_parent(Some(self.base.id()));
            view.will_appear(true);
            view
        });
        self.transition.set(FrameTransition::Steady);
        self.base.invalidate();
    }

    /// Detaches the content without dropping it.
    pub fn take_content_view(&mut self) -> Option<Box<dyn View>> {
        let mut view = self.content.take()?;
        view.set_parent(None);
        self.transition.set(FrameTransition::Steady);
        self.base.invalidate();
        Some(view)
    }

    pub fn has_content_view(&self) -> bool {
        self.content.is_some()
    }

    pub fn content_view(&self) -> Option<&dyn View> {
        self.content.as_deref()
    }

    pub fn content_view_mut(&mut self) -> Option<&mut (dyn View + 'static)> {
        self.content.as_deref_mut()
    }

    pub fn transition(&self) -> FrameTransition {
        self.transition.get()
    }

    pub fn set_on_cancel(&mut self, f: impl FnMut() -> bool + 'static) {
        self.on_cancel = Some(Box::new(f));
    }

    /// Back button. Returns whether the cancel was handled.
    pub fn on_cancel(&mut self) -> bool {
        match self.on_cancel.as_mut() {
            Some(f) => f(),
            None => {
                log::debug!("frame {} has no cancel handler", self.base.id());
                false
            }
        }
    }

    fn has_text(label: &Option<Label>) -> bool {
        label.as_ref().is_some_and(|l| !l.text().is_empty())
    }

    fn header_height(&self, style: &marquee_core::Style) -> u32 {
        match self.header_style {
            HeaderStyle::Regular => style.applet_frame.header_height_regular,
            HeaderStyle::Popup => style.applet_frame.header_height_popup,
        }
    }
}

/// Subtitle row geometry shared by layout and draw.
struct SubtitleGeometry {
    left_padding: u32,
    separator_width: u32,
    full_width: u32,
    side_width: u32,
}

impl SubtitleGeometry {
    fn new(style: &marquee_core::Style, width: u32, has_icon: bool) -> Self {
        let pf = &style.popup_frame;
        let right_padding = pf.image_left_padding + 2;
        let left_padding = if has_icon {
            pf.sub_title_left_padding
        } else {
            right_padding
        };
        let separator_width = 1 + pf.sub_title_spacing * 2;
        let full_width = width.saturating_sub(left_padding + right_padding);
        Self {
            left_padding,
            separator_width,
            full_width,
            side_width: full_width.saturating_sub(separator_width) / 2,
        }
    }
}

impl View for AppletFrame {
    fn base(&self) -> &ViewBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ViewBase {
        &mut self.base
    }

    fn visit_children(&self, f: &mut dyn FnMut(&dyn View)) {
        for label in [&self.title, &self.sub_title_left, &self.sub_title_right]
            .into_iter()
            .flatten()
        {
            f(label);
        }
        f(&self.footer);
        f(&self.hint);
        if let Some(icon) = &self.icon {
            f(icon.as_ref());
        }
        if let Some(content) = &self.content {
            f(content.as_ref());
        }
    }

    fn will_appear(&mut self, reset_state: bool) {
        if let Some(icon) = self.icon.as_mut() {
            icon.will_appear(reset_state);
        }
        if let Some(content) = self.content.as_mut() {
            content.will_appear(reset_state);
        }
        self.hint.will_appear(reset_state);
    }

    fn will_disappear(&mut self, reset_state: bool) {
        if let Some(icon) = self.icon.as_mut() {
            icon.will_disappear(reset_state);
        }
        if let Some(content) = self.content.as_mut() {
            content.will_disappear(reset_state);
        }
        self.hint.will_disappear(reset_state);
    }

    fn show(&mut self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        self.animation = animation;
        if let Some(content) = self.content.as_mut() {
            if animated && animation.is_slide() {
                self.transition.set(FrameTransition::SlideIn);
                let transition = Rc::downgrade(&self.transition);
                content.show(
                    Box::new(move || {
                        if let Some(t) = transition.upgrade() {
                            t.set(FrameTransition::Steady);
                        }
                    }),
                    true,
                    animation,
                );
            } else if content.base().is_hidden() {
                content.show(Box::new(|| {}), animated, animation);
            }
        }
        self.base.show(on_done, animated, animation);
    }

    fn hide(&mut self, on_done: Callback, animated: bool, animation: ViewAnimation) {
        self.animation = animation;
        if let Some(content) = self.content.as_mut() {
            if animated && animation.is_slide() {
                self.transition.set(FrameTransition::SlideOut);
                let transition = Rc::downgrade(&self.transition);
                content.hide(
                    Box::new(move || {
                        if let Some(t) = transition.upgrade() {
                            t.set(FrameTransition::Steady);
                        }
                    }),
                    true,
                    animation,
                );
            } else if !content.base().is_hidden() {
                content.hide(Box::new(|| {}), animated, animation);
            }
        }
        self.base.hide(on_done, animated, animation);
    }

    fn layout(&mut self, ctx: &LayoutCtx<'_>) {
        let style = ctx.style;
        let af = &style.applet_frame;
        let pf = &style.popup_frame;
        let rect = self.base.rect();
        let (x, y) = (rect.x, rect.y);
        let width = rect.w.max(0.0) as u32;
        let height = rect.h.max(0.0) as u32;
        let regular = self.header_style == HeaderStyle::Regular;

        let has_title = Self::has_text(&self.title);
        let has_sub_left = !regular && Self::has_text(&self.sub_title_left);
        let has_sub_right = !regular && Self::has_text(&self.sub_title_right);
        let has_footer = !self.footer.text().is_empty();
        let has_icon = self.icon.is_some();

        let sub = SubtitleGeometry::new(style, width, has_icon);

        let footer_padding = af.separator_spacing + af.footer_text_spacing;
        let footer_width = width.saturating_sub(footer_padding * 2);
        let side_footer_width = footer_width.saturating_sub(af.separator_spacing) / 2;
        let hint_width = if has_footer {
            side_footer_width
        } else {
            footer_width
        };

        if has_title && let Some(title) = self.title.as_mut() {
            let (font_size, right_padding, title_y) = if regular {
                (
                    af.title_size,
                    af.image_left_padding,
                    af.header_height_regular / 2 + af.title_offset,
                )
            } else {
                (pf.header_font_size, pf.image_left_padding, pf.header_text_top_padding)
            };
            let left_padding = match (regular, has_icon) {
                (true, true) => af.title_start,
                (false, true) => pf.header_text_left_padding,
                (_, false) => right_padding,
            };
            title.set_font_size(font_size as f32);
            title.set_bounds(Rect::new(
                x + left_padding as f32,
                y + title_y as f32,
                width.saturating_sub(left_padding + right_padding) as f32,
                0.0,
            ));
            title.layout(ctx);
        }

        let sub_y = y + pf.sub_title_top_padding as f32;
        if has_sub_left && let Some(left) = self.sub_title_left.as_mut() {
            let w = if has_sub_right { sub.side_width } else { sub.full_width };
            left.set_bounds(Rect::new(x + sub.left_padding as f32, sub_y, w as f32, 0.0));
            left.layout(ctx);
        }
        if has_sub_right && let Some(right) = self.sub_title_right.as_mut() {
            let (rx, w) = if has_sub_left {
                (
                    sub.left_padding + sub.side_width + sub.separator_width,
                    sub.side_width,
                )
            } else {
                (sub.left_padding, sub.full_width)
            };
            right.set_bounds(Rect::new(x + rx as f32, sub_y, w as f32, 0.0));
            right.layout(ctx);
        }

        if has_footer {
            self.footer.set_bounds(Rect::new(
                x + footer_padding as f32,
                y + height as f32 - (af.footer_height / 2) as f32,
                side_footer_width as f32,
                0.0,
            ));
            self.footer.layout(ctx);
        }

        self.hint.set_bounds(Rect::new(
            x + width.saturating_sub(footer_padding + hint_width) as f32,
            y + height.saturating_sub(af.footer_height) as f32,
            hint_width as f32,
            af.footer_height as f32,
        ));
        self.hint.layout(ctx);

        if let Some(icon) = self.icon.as_mut() {
            let bounds = if regular {
                Rect::new(
                    x + af.image_left_padding as f32,
                    y + af.image_top_padding as f32,
                    af.image_size as f32,
                    af.image_size as f32,
                )
            } else {
                Rect::new(
                    x + (pf.edge_padding + pf.image_left_padding) as f32,
                    y + pf.image_top_padding as f32,
                    pf.image_size as f32,
                    pf.image_size as f32,
                )
            };
            icon.set_bounds(bounds);
            icon.layout(ctx);
        }

        let header_height = self.header_height(style);
        if let Some(content) = self.content.as_mut() {
            content.set_bounds(Rect::new(
                x + self.left_padding as f32,
                y + header_height as f32,
                width.saturating_sub(self.left_padding + self.right_padding) as f32,
                height.saturating_sub(af.footer_height + header_height) as f32,
            ));
            content.layout(ctx);
        }

        self.base.mark_laid_out();
    }

    fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
        let style = ctx.style;
        let af = &style.applet_frame;
        let pf = &style.popup_frame;
        let theme = ctx.theme;
        let rect = self.base.rect();
        let (x, y, w, h) = (rect.x, rect.y, rect.w, rect.h);
        let regular = self.header_style == HeaderStyle::Regular;
        let sep = af.separator_spacing as f32;
        let transition = self.transition.get();

        let has_sub_left = !regular && Self::has_text(&self.sub_title_left);
        let has_sub_right = !regular && Self::has_text(&self.sub_title_right);

        let header_line = ctx.a(theme.text);
        ctx.canvas.fill_rect(
            Rect::new(
                x + sep,
                y + self.header_height(style) as f32 - 1.0,
                w - sep * 2.0,
                1.0,
            ),
            header_line,
        );

        if Self::has_text(&self.title) {
            let content_alpha = match (&self.content, regular) {
                (Some(content), true) => content.base().alpha(),
                _ => 1.0,
            };
            if let Some(title) = self.title.as_mut() {
                title.set_color(theme.text.mul_alpha(content_alpha));
                title.frame(ctx);
            }
        }

        if has_sub_left && let Some(left) = self.sub_title_left.as_mut() {
            left.set_color(theme.description);
            left.frame(ctx);
        }

        if has_sub_left && has_sub_right {
            let sub = SubtitleGeometry::new(style, w.max(0.0) as u32, self.icon.is_some());
            // Drawn at full opacity.
            ctx.canvas.fill_rect(
                Rect::new(
                    x + (sub.left_padding + sub.side_width + pf.sub_title_spacing) as f32,
                    y + pf.sub_title_separator_top_padding as f32,
                    1.0,
                    pf.sub_title_separator_height as f32,
                ),
                theme.description,
            );
        }

        if has_sub_right && let Some(right) = self.sub_title_right.as_mut() {
            right.set_color(theme.description);
            right.frame(ctx);
        }

        if !self.footer.text().is_empty() {
            self.footer.set_color(theme.text);
            match transition {
                FrameTransition::SlideIn => {}
                FrameTransition::SlideOut => {
                    ctx.with_absolute_alpha(1.0, |ctx| self.footer.frame(ctx));
                }
                FrameTransition::Steady => self.footer.frame(ctx),
            }
        }

        self.hint.frame(ctx);

        if let Some(icon) = self.icon.as_mut() {
            icon.frame(ctx);
        }

        let separator = ctx.a(theme.separator);
        ctx.canvas.fill_rect(
            Rect::new(x + sep, y + h - af.footer_height as f32, w - sep * 2.0, 1.0),
            separator,
        );

        if let Some(content) = self.content.as_mut() {
            let dx = content_offset(
                transition,
                self.animation,
                content.base().alpha(),
                af.slide_animation,
            );
            if transition == FrameTransition::Steady {
                content.frame(ctx);
            } else {
                ctx.canvas.save();
                ctx.canvas.translate(dx, 0.0);
                content.frame(ctx);
                ctx.canvas.restore();
            }
        }
    }
}

impl Drop for AppletFrame {
    fn drop(&mut self) {
        if let Some(content) = self.content.as_mut() {
            content.will_disappear(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rectangle::Rectangle;
    use marquee_core::animation;
    use marquee_core::{Color, Scene, SceneNode, StaticTranslator, Style, Theme};
    use marquee_text::MonospaceMeasurer;
    use web_time::Duration;

    struct Tracked {
        rect: Rectangle,
        appeared: Rc<Cell<i32>>,
    }

    impl Tracked {
        fn boxed(appeared: &Rc<Cell<i32>>) -> Box<dyn View> {
            Box::new(Tracked {
                rect: Rectangle::new(Color::WHITE),
                appeared: appeared.clone(),
            })
        }
    }

    impl View for Tracked {
        fn base(&self) -> &ViewBase {
            self.rect.base()
        }
        fn base_mut(&mut self) -> &mut ViewBase {
            self.rect.base_mut()
        }
        fn layout(&mut self, ctx: &LayoutCtx<'_>) {
            self.rect.layout(ctx)
        }
        fn draw(&mut self, ctx: &mut DrawCtx<'_>) {
            self.rect.draw(ctx)
        }
        fn will_appear(&mut self, _reset_state: bool) {
            self.appeared.set(self.appeared.get() + 1);
        }
        fn will_disappear(&mut self, _reset_state: bool) {
            self.appeared.set(self.appeared.get() - 1);
        }
    }

    fn lay_out(frame: &mut AppletFrame) {
        let style = Style::default();
        let measurer = MonospaceMeasurer::default();
        let translator = StaticTranslator::english();
        let ctx = LayoutCtx {
            style: &style,
            measurer: &measurer,
            translator: &translator,
        };
        frame.set_bounds(Rect::new(0.0, 0.0, 1280.0, 720.0));
        frame.layout(&ctx);
    }

    fn draw(frame: &mut AppletFrame) -> Scene {
        let style = Style::default();
        let theme = Theme::default();
        let mut scene = Scene::new();
        let mut ctx = DrawCtx::new(&mut scene, &style, &theme);
        frame.frame(&mut ctx);
        scene
    }

    #[test]
    fn test_regular_layout() {
        let appeared = Rc::new(Cell::new(0));
        let mut frame = AppletFrame::new(true, true);
        frame.set_title("Settings");
        frame.set_footer_text("v1.0");
        frame.set_icon(Some(Box::new(Rectangle::new(Color::WHITE))));
        frame.set_content_view(Some(Tracked::boxed(&appeared)));
        lay_out(&mut frame);

        let title = frame.title().map(|t| t.base().rect());
        assert_eq!(title.map(|r| (r.x, r.y)), Some((130.0, 49.0)));
        assert_eq!(
            frame.icon().map(|i| i.base().rect()),
            Some(Rect::new(64.0, 20.0, 48.0, 48.0))
        );
        assert_eq!(
            frame.content_view().map(|c| c.base().rect()),
            Some(Rect::new(30.0, 88.0, 1220.0, 559.0))
        );
        assert_eq!(frame.hint().base().rect(), Rect::new(655.0, 647.0, 565.0, 73.0));
        assert_eq!(frame.footer().base().rect().x, 60.0);
    }

    #[test]
    fn test_popup_layout_splits_subtitles() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_header_style(HeaderStyle::Popup);
        frame.set_title("Install");
        frame.set_subtitle("Game title", "1.2 GB");
        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        lay_out(&mut frame);

        let (left, right) = frame.subtitles();
        assert_eq!(left.map(|l| (l.base().rect().x, l.base().rect().y)), Some((52.0, 94.0)));
        assert_eq!(right.map(|l| l.base().rect().x), Some(52.0 + 567.0 + 41.0));
        assert_eq!(frame.title().map(|t| t.base().rect().y), Some(62.0));
        assert_eq!(
            frame.content_view().map(|c| c.base().rect()),
            Some(Rect::new(0.0, 129.0, 1280.0, 518.0))
        );

        let scene = draw(&mut frame);
        let divider = scene.nodes.iter().any(|n| match n {
            SceneNode::Fill { path, .. } => matches!(
                path.segments(),
                [marquee_core::PathSegment::Rect(r)] if r.w == 1.0 && r.h == 20.0
            ),
            _ => false,
        });
        assert!(divider);
    }

    #[test]
    fn test_regular_header_ignores_subtitles() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_subtitle("left", "right");
        lay_out(&mut frame);
        let scene = draw(&mut frame);
        assert!(scene.find_text("left").is_none());
    }

    #[test]
    fn test_content_offset() {
        use FrameTransition::*;
        use ViewAnimation::*;
        assert_eq!(content_offset(Steady, SlideLeft, 0.3, 20), 0.0);
        assert_eq!(content_offset(SlideIn, SlideLeft, 0.0, 20), 20.0);
        assert_eq!(content_offset(SlideIn, SlideLeft, 1.0, 20), 0.0);
        assert_eq!(content_offset(SlideIn, SlideRight, 0.0, 20), -20.0);
        assert_eq!(content_offset(SlideOut, SlideLeft, 0.0, 20), -20.0);
        assert_eq!(content_offset(SlideOut, SlideRight, 0.0, 20), 20.0);
        assert_eq!(content_offset(SlideOut, SlideRight, 1.0, 20), 0.0);
    }

    #[test]
    fn test_slide_in_hides_footer_until_done() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_footer_text("Footer");
        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        lay_out(&mut frame);

        frame.show(Box::new(|| {}), true, ViewAnimation::SlideLeft);
        assert_eq!(frame.transition(), FrameTransition::SlideIn);

        animation::advance(Duration::from_millis(60));
        let scene = draw(&mut frame);
        assert!(scene.find_text("Footer").is_none());
        assert!(scene.nodes.iter().any(|n| matches!(n, SceneNode::Translate { dx, .. } if *dx > 0.0)));

        animation::advance(Duration::from_millis(65));
        assert_eq!(frame.transition(), FrameTransition::Steady);
        assert_eq!(frame.content_view().map(|c| c.base().alpha()), Some(1.0));
        let scene = draw(&mut frame);
        assert!(scene.find_text("Footer").is_some());
    }

    #[test]
    fn test_replacing_content_mid_slide_settles() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_footer_text("Footer");
        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        lay_out(&mut frame);

        frame.show(Box::new(|| {}), true, ViewAnimation::SlideLeft);
        animation::advance(Duration::from_millis(30));
        assert_eq!(frame.transition(), FrameTransition::SlideIn);

        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        assert_eq!(frame.transition(), FrameTransition::Steady);
        lay_out(&mut frame);
        animation::advance(Duration::from_secs(5));
        assert_eq!(frame.transition(), FrameTransition::Steady);
        let scene = draw(&mut frame);
        assert!(scene.find_text("Footer").is_some());

        frame.show(Box::new(|| {}), true, ViewAnimation::SlideLeft);
        animation::advance(Duration::from_millis(30));
        let taken = frame.take_content_view();
        assert!(taken.is_some());
        assert_eq!(frame.transition(), FrameTransition::Steady);
        animation::advance(Duration::from_secs(5));
        assert!(draw(&mut frame).find_text("Footer").is_some());
    }

    #[test]
    fn test_slide_out_keeps_footer_opaque() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_footer_text("Footer");
        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        lay_out(&mut frame);

        frame.hide(Box::new(|| {}), true, ViewAnimation::SlideRight);
        assert_eq!(frame.transition(), FrameTransition::SlideOut);
        animation::advance(Duration::from_millis(60));

        let scene = draw(&mut frame);
        match scene.find_text("Footer") {
            Some(SceneNode::Text { color, .. }) => assert_eq!(color.3, 255),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_title_fades_with_content() {
        let mut frame = AppletFrame::new(false, false);
        frame.set_title("Title");
        frame.set_content_view(Some(Box::new(Rectangle::new(Color::WHITE))));
        lay_out(&mut frame);
        if let Some(content) = frame.content_view() {
            content.base().hide(Box::new(|| {}), false, ViewAnimation::Fade);
        }
        let scene = draw(&mut frame);
        match scene.find_text("Title") {
            Some(SceneNode::Text { color, .. }) => assert_eq!(color.3, 0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_replacing_content_notifies_old_view() {
        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let mut frame = AppletFrame::new(false, false);
        frame.set_content_view(Some(Tracked::boxed(&first)));
        assert_eq!(first.get(), 1);

        frame.set_content_view(Some(Tracked::boxed(&second)));
        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);

        let taken = frame.take_content_view();
        assert!(taken.is_some());
        assert!(!frame.has_content_view());
        drop(frame);
        assert_eq!(second.get(), 1);

        let third = Rc::new(Cell::new(0));
        let mut frame = AppletFrame::new(false, false);
        frame.set_content_view(Some(Tracked::boxed(&third)));
        drop(frame);
        assert_eq!(third.get(), 0);
    }

    #[test]
    fn test_cancel_handler() {
        let mut frame = AppletFrame::new(false, false);
        assert!(!frame.on_cancel());
        let hits = Rc::new(Cell::new(0));
        let h = hits.clone();
        frame.set_on_cancel(move || {
            h.set(h.get() + 1);
            true
        });
        assert!(frame.on_cancel());
        assert_eq!(hits.get(), 1);
    }
}
