//! The drawing contract between views and the host renderer.
//!
//! Views paint through [`Canvas`], an immediate-mode vector API with a
//! save/restore state stack (transform and scissor). [`Scene`] implements it
//! by recording every call as a [`SceneNode`], which is what headless hosts
//! and tests use.

use smallvec::SmallVec;

use marquee_text::TextStyle;

use crate::{Color, Rect, Vec2};

/// Opaque handle to an image the host has already decoded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

#[derive(Clone, Debug, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    Rect(Rect),
    Circle { center: Vec2, radius: f32 },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    segments: SmallVec<[PathSegment; 4]>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rect(r: Rect) -> Self {
        let mut p = Self::new();
        p.segments.push(PathSegment::Rect(r));
        p
    }

    pub fn circle(center: Vec2, radius: f32) -> Self {
        let mut p = Self::new();
        p.segments.push(PathSegment::Circle { center, radius });
        p
    }

    pub fn line(from: Vec2, to: Vec2) -> Self {
        Self::new().move_to(from).line_to(to)
    }

    pub fn move_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Vec2) -> Self {
        self.segments.push(PathSegment::LineTo(p));
        self
    }

    pub fn close(mut self) -> Self {
        self.segments.push(PathSegment::Close);
        self
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }
}

pub trait Canvas {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f32, dy: f32);
    fn rotate(&mut self, radians: f32);
    /// Intersects the current scissor with `rect` (in current coordinates).
    fn intersect_scissor(&mut self, rect: Rect);
    fn fill(&mut self, path: &Path, color: Color);
    fn stroke(&mut self, path: &Path, color: Color, width: f32, cap: LineCap);
    /// Single line anchored at `origin` according to the style's alignment.
    fn text(&mut self, origin: Vec2, text: &str, style: &TextStyle, color: Color);
    /// Wrapped to `width`, top-left at `origin`.
    fn text_box(&mut self, origin: Vec2, width: f32, text: &str, style: &TextStyle, color: Color);
    fn image(&mut self, rect: Rect, image: ImageHandle, alpha: f32);

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fill(&Path::rect(rect), color);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SceneNode {
    Save,
    Restore,
    Translate { dx: f32, dy: f32 },
    Rotate { radians: f32 },
    Scissor { rect: Rect },
    Fill { path: Path, color: Color },
    Stroke { path: Path, color: Color, width: f32, cap: LineCap },
    Text { origin: Vec2, text: String, style: TextStyle, color: Color },
    TextBox { origin: Vec2, width: f32, text: String, style: TextStyle, color: Color },
    Image { rect: Rect, image: ImageHandle, alpha: f32 },
}

/// Recorded draw calls for one frame.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub clear_color: Color,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Every text run in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|n| match n {
            SceneNode::Text { text, .. } | SceneNode::TextBox { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// The first single-line text node whose content equals `text`.
    pub fn find_text(&self, text: &str) -> Option<&SceneNode> {
        self.nodes
            .iter()
            .find(|n| matches!(n, SceneNode::Text { text: t, .. } if t == text))
    }
}

impl Canvas for Scene {
    fn save(&mut self) {
        self.nodes.push(SceneNode::Save);
    }
    fn restore(&mut self) {
        self.nodes.push(SceneNode::Restore);
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        self.nodes.push(SceneNode::Translate { dx, dy });
    }
    fn rotate(&mut self, radians: f32) {
        self.nodes.push(SceneNode::Rotate { radians });
    }
    fn intersect_scissor(&mut self, rect: Rect) {
        self.nodes.push(SceneNode::Scissor { rect });
    }
    fn fill(&mut self, path: &Path, color: Color) {
        self.nodes.push(SceneNode::Fill {
            path: path.clone(),
            color,
        });
    }
    fn stroke(&mut self, path: &Path, color: Color, width: f32, cap: LineCap) {
        self.nodes.push(SceneNode::Stroke {
            path: path.clone(),
            color,
            width,
            cap,
        });
    }
    fn text(&mut self, origin: Vec2, text: &str, style: &TextStyle, color: Color) {
        self.nodes.push(SceneNode::Text {
            origin,
            text: text.to_string(),
            style: *style,
            color,
        });
    }
    fn text_box(&mut self, origin: Vec2, width: f32, text: &str, style: &TextStyle, color: Color) {
        self.nodes.push(SceneNode::TextBox {
            origin,
            width,
            text: text.to_string(),
            style: *style,
            color,
        });
    }
    fn image(&mut self, rect: Rect, image: ImageHandle, alpha: f32) {
        self.nodes.push(SceneNode::Image { rect, image, alpha });
    }
}
