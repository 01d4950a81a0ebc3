pub use crate::animation::{AnimTag, Animated, Clock, Easing, SystemClock, TestClock, Tween};
pub use crate::color::Color;
pub use crate::error::ConfigError;
pub use crate::focus::Subscription;
pub use crate::geometry::{Rect, Size, Vec2};
pub use crate::i18n::{StaticTranslator, Translator};
pub use crate::input::{InputOverlay, KeyboardKeys, NumberInputRequest, TextInputRequest, ValuePicker};
pub use crate::locals::{style, theme, with_style, with_theme};
pub use crate::render_api::{Canvas, ImageHandle, LineCap, Path, Scene, SceneNode};
pub use crate::style::Style;
pub use crate::theme::Theme;
pub use crate::view::{
    Callback, DrawCtx, LayoutCtx, LayoutRole, View, ViewAnimation, ViewBase, ViewId,
};
pub use marquee_text::{FontFace, HAlign, TextMeasurer, TextStyle, VAlign};
