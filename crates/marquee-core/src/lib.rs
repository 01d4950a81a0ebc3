//! # Views, animation and focus
//!
//! marquee is a retained-mode toolkit for fixed-resolution console-style
//! screens: a tree of boxed views, laid out top-down on demand and painted
//! every frame through a [`Canvas`].
//!
//! This crate holds the pieces every view depends on:
//!
//! - [`View`] / [`ViewBase`]: the view contract and its shared state (bounds,
//!   fade alpha, collapse state, dirtiness);
//! - [`animation`]: a thread-local tween scheduler with tag-based
//!   cancellation, driven by the host once per frame;
//! - [`focus`]: the bus on which focus changes are published;
//! - [`Style`] and [`Theme`]: named metrics and colors, installed as frame
//!   locals;
//! - [`Canvas`] and [`Scene`]: the drawing contract and a recording canvas.
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use std::time::Duration;
//! use marquee_core::animation::{self, Animated, Easing, Tween};
//!
//! let value = Animated::new(0.0);
//! let done = Rc::new(Cell::new(false));
//! let flag = done.clone();
//! animation::push(
//!     Tween::new(&value, 10.0, Duration::from_millis(100))
//!         .easing(Easing::Linear)
//!         .on_complete(move || flag.set(true)),
//! );
//!
//! animation::advance(Duration::from_millis(50));
//! assert!((value.get() - 5.0).abs() < 1e-3);
//! animation::advance(Duration::from_millis(50));
//! assert!(done.get());
//! ```

pub mod animation;
pub mod color;
pub mod error;
pub mod focus;
pub mod geometry;
pub mod i18n;
pub mod input;
pub mod locals;
pub mod prelude;
pub mod render_api;
pub mod style;
pub mod tests;
pub mod theme;
pub mod view;

pub use color::*;
pub use error::*;
pub use geometry::*;
pub use i18n::*;
pub use input::*;
pub use locals::*;
pub use render_api::*;
pub use style::*;
pub use theme::*;
pub use view::*;
