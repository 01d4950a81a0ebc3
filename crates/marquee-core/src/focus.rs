//! Focus-change bus.
//!
//! The host (or a list moving its selection) publishes the newly focused view
//! with [`set_focus`]; every live [`Subscription`] is told about it. Listeners
//! are stored outside the views they belong to and are removed when the
//! subscription handle drops, so a destroyed view is never notified.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SlotMap, new_key_type};

use crate::view::ViewId;

new_key_type! {
    struct ListenerKey;
}

type Listener = Rc<dyn Fn(Option<ViewId>)>;

#[derive(Default)]
struct FocusBus {
    focused: Option<ViewId>,
    listeners: SlotMap<ListenerKey, Listener>,
}

thread_local! {
    static BUS: RefCell<FocusBus> = RefCell::new(FocusBus::default());
}

/// Keeps a focus listener registered until dropped.
#[must_use = "the listener is removed as soon as the subscription drops"]
pub struct Subscription {
    key: ListenerKey,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let removed = BUS
            .try_with(|b| b.try_borrow_mut().ok().and_then(|mut b| b.listeners.remove(self.key)))
            .ok()
            .flatten();
        drop(removed);
    }
}

pub fn subscribe(listener: impl Fn(Option<ViewId>) + 'static) -> Subscription {
    let key = BUS.with(|b| b.borrow_mut().listeners.insert(Rc::new(listener)));
    Subscription { key }
}

/// Records `view` as focused and notifies every listener.
pub fn set_focus(view: Option<ViewId>) {
    let listeners: Vec<Listener> = BUS.with(|b| {
        let mut b = b.borrow_mut();
        b.focused = view;
        b.listeners.values().cloned().collect()
    });
    log::trace!("focus -> {view:?} ({} listeners)", listeners.len());
    for listener in listeners {
        listener(view);
    }
}

pub fn focused() -> Option<ViewId> {
    BUS.with(|b| b.borrow().focused)
}

pub fn listener_count() -> usize {
    BUS.with(|b| b.borrow().listeners.len())
}
