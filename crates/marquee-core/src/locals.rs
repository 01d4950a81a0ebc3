//! # Frame locals
//!
//! The active [`Style`] and [`Theme`] live on a thread-local stack for the
//! duration of a frame. The frame driver installs both before advancing
//! animations, laying out and drawing; event-time code (a view starting an
//! animation from a click) reads them through [`style`] and [`theme`] and
//! falls back to the defaults outside a frame.
//!
//! ```rust
//! use std::rc::Rc;
//! use marquee_core::*;
//!
//! with_theme(Rc::new(Theme::light()), || {
//!     assert_eq!(theme().text, Theme::light().text);
//! });
//! assert_eq!(theme().text, Theme::dark().text);
//! ```

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::{Style, Theme};

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<TypeId, Box<dyn Any>>>> = RefCell::new(Vec::new());
    static DEFAULT_STYLE: Rc<Style> = Rc::new(Style::default());
    static DEFAULT_THEME: Rc<Theme> = Rc::new(Theme::default());
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // Pops on unwind too.
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(t: TypeId, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(t, v);
        }
    });
}

fn local<T: Clone + 'static>() -> Option<T> {
    LOCALS_STACK.with(|st| {
        for frame in st.borrow().iter().rev() {
            if let Some(v) = frame.get(&TypeId::of::<T>())
                && let Some(t) = v.downcast_ref::<T>()
            {
                return Some(t.clone());
            }
        }
        None
    })
}

pub fn with_style<R>(style: Rc<Style>, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Rc<Style>>(), Box::new(style));
        f()
    })
}

pub fn with_theme<R>(theme: Rc<Theme>, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(TypeId::of::<Rc<Theme>>(), Box::new(theme));
        f()
    })
}

pub fn style() -> Rc<Style> {
    local::<Rc<Style>>().unwrap_or_else(|| DEFAULT_STYLE.with(Rc::clone))
}

pub fn theme() -> Rc<Theme> {
    local::<Rc<Theme>>().unwrap_or_else(|| DEFAULT_THEME.with(Rc::clone))
}
