//! Text measurement for the marquee layout core.
//!
//! Layout code only ever talks to a [`TextMeasurer`]. Two implementations ship
//! here: [`ShapingMeasurer`], backed by cosmic-text and the system font
//! database, and [`MonospaceMeasurer`], a deterministic fixed-advance measurer
//! for headless runs and tests.
//!
//! The codepoint helpers in [`utf8`] and the ellipsis search in [`ellipsis`]
//! share one truncation boundary, so counts and substrings always agree.

pub mod ellipsis;
mod measure;
mod shaping;
mod style;
pub mod utf8;

pub use ellipsis::{ELLIPSIS, ellipsize_line};
pub use measure::{MonospaceMeasurer, TextMeasurer, TextMetrics};
pub use shaping::ShapingMeasurer;
pub use style::{FontFace, HAlign, TextStyle, VAlign};
