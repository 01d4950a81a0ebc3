//! Tween scheduler.
//!
//! All animation in marquee runs on one thread-local scheduler that the host
//! drives with [`advance`] once per frame. A tween animates a shared `f32`
//! cell (see [`Animated`]) or, with no subject, acts as a plain timer.
//! Every tween carries an [`AnimTag`]; [`kill_by_tag`] cancels all tweens
//! sharing that tag without running their completion callbacks.
//!
//! Tweens never hold strong references to the views that started them:
//! subjects are weak, so a view that goes away simply stops being animated.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};
use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    Linear,
    /// Quadratic ease-in.
    EaseIn,
    /// Quadratic ease-out.
    EaseOut,
    /// Quadratic ease-in-out.
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn interpolate(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Identifies a family of tweens for cancellation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimTag(u64);

impl AnimTag {
    /// A fresh tag, unique for this thread.
    pub fn next() -> Self {
        thread_local! {
            static NEXT: Cell<u64> = const { Cell::new(1) };
        }
        NEXT.with(|n| {
            let id = n.get();
            n.set(id + 1);
            AnimTag(id)
        })
    }
}

/// An animatable value with its own tag.
///
/// Dropping it cancels every tween registered under its tag.
#[derive(Debug)]
pub struct Animated {
    tag: AnimTag,
    cell: Rc<Cell<f32>>,
}

impl Animated {
    pub fn new(value: f32) -> Self {
        Self {
            tag: AnimTag::next(),
            cell: Rc::new(Cell::new(value)),
        }
    }

    pub fn get(&self) -> f32 {
        self.cell.get()
    }

    /// Writes the value without touching running tweens.
    pub fn set(&self, value: f32) {
        self.cell.set(value);
    }

    pub fn tag(&self) -> AnimTag {
        self.tag
    }

    pub fn handle(&self) -> Weak<Cell<f32>> {
        Rc::downgrade(&self.cell)
    }

    pub fn kill(&self) {
        kill_by_tag(self.tag);
    }

    pub fn is_animating(&self) -> bool {
        is_running(self.tag)
    }

    /// Cancels anything in flight and tweens from the current value to `to`.
    pub fn animate_to(&self, to: f32, duration: Duration, easing: Easing) -> TweenKey {
        self.kill();
        push(Tween::new(self, to, duration).easing(easing))
    }
}

impl Drop for Animated {
    fn drop(&mut self) {
        kill_by_tag(self.tag);
    }
}

/// One scheduled animation or timer.
pub struct Tween {
    subject: Option<Weak<Cell<f32>>>,
    from: f32,
    to: f32,
    duration: Duration,
    easing: Easing,
    tag: AnimTag,
    on_tick: Option<Box<dyn FnMut(f32)>>,
    on_complete: Option<Box<dyn FnOnce()>>,
}

impl Tween {
    /// Animates `subject` from its current value to `to`, under its tag.
    pub fn new(subject: &Animated, to: f32, duration: Duration) -> Self {
        Self {
            subject: Some(subject.handle()),
            from: subject.get(),
            to,
            duration,
            easing: Easing::Linear,
            tag: subject.tag,
            on_tick: None,
            on_complete: None,
        }
    }

    /// A subject-less tween: completes after `duration`.
    pub fn timer(tag: AnimTag, duration: Duration) -> Self {
        Self {
            subject: None,
            from: 0.0,
            to: 1.0,
            duration,
            easing: Easing::Linear,
            tag,
            on_tick: None,
            on_complete: None,
        }
    }

    pub fn from(mut self, from: f32) -> Self {
        self.from = from;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn on_tick(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_tick = Some(Box::new(f));
        self
    }

    pub fn on_complete(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_complete = Some(Box::new(f));
        self
    }

    fn value_at(&self, elapsed: Duration) -> f32 {
        let t = if self.duration.is_zero() {
            1.0
        } else {
            (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        };
        lerp(self.from, self.to, self.easing.interpolate(t))
    }

    fn write(&self, value: f32) {
        if let Some(cell) = self.subject.as_ref().and_then(Weak::upgrade) {
            cell.set(value);
        }
    }
}

new_key_type! {
    pub struct TweenKey;
}

struct Running {
    tween: Tween,
    elapsed: Duration,
}

#[derive(Default)]
struct Scheduler {
    running: SlotMap<TweenKey, Running>,
}

thread_local! {
    static SCHEDULER: RefCell<Scheduler> = RefCell::new(Scheduler::default());
}

/// Starts a tween. The subject jumps to `from` immediately.
pub fn push(tween: Tween) -> TweenKey {
    tween.write(tween.from);
    SCHEDULER.with(|s| {
        s.borrow_mut().running.insert(Running {
            tween,
            elapsed: Duration::ZERO,
        })
    })
}

/// Starts a timer that runs `on_complete` after `duration`.
pub fn start_timer(tag: AnimTag, duration: Duration, on_complete: impl FnOnce() + 'static) -> TweenKey {
    push(Tween::timer(tag, duration).on_complete(on_complete))
}

/// Cancels every tween carrying `tag`. Completion callbacks do not run.
/// Returns how many were cancelled.
pub fn kill_by_tag(tag: AnimTag) -> usize {
    let killed: Vec<Running> = SCHEDULER
        .try_with(|s| {
            let Ok(mut s) = s.try_borrow_mut() else {
                log::warn!("kill_by_tag({tag:?}) while the scheduler is busy; ignored");
                return Vec::new();
            };
            let keys: Vec<TweenKey> = s
                .running
                .iter()
                .filter(|(_, r)| r.tween.tag == tag)
                .map(|(k, _)| k)
                .collect();
            keys.into_iter().filter_map(|k| s.running.remove(k)).collect()
        })
        .unwrap_or_default();
    // Callbacks are dropped here, outside the borrow.
    killed.len()
}

pub fn is_running(tag: AnimTag) -> bool {
    SCHEDULER.with(|s| s.borrow().running.values().any(|r| r.tween.tag == tag))
}

pub fn running_count() -> usize {
    SCHEDULER.with(|s| s.borrow().running.len())
}

/// Cancels everything. Completion callbacks do not run.
pub fn clear() {
    let drained: Vec<Running> = SCHEDULER.with(|s| s.borrow_mut().running.drain().map(|(_, r)| r).collect());
    drop(drained);
}

/// Moves every running tween forward by `dt`, writes subjects, then runs
/// tick and completion callbacks with the scheduler unlocked so they may
/// push or kill tweens. Returns whether anything is still running.
pub fn advance(dt: Duration) -> bool {
    let mut ticks: Vec<(TweenKey, f32)> = Vec::new();
    let mut finished: Vec<Tween> = Vec::new();

    SCHEDULER.with(|s| {
        let mut s = s.borrow_mut();
        let mut done = Vec::new();
        for (key, r) in s.running.iter_mut() {
            r.elapsed += dt;
            let value = r.tween.value_at(r.elapsed);
            r.tween.write(value);
            if r.elapsed >= r.tween.duration {
                done.push(key);
            } else if r.tween.on_tick.is_some() {
                ticks.push((key, value));
            }
        }
        for key in done {
            if let Some(r) = s.running.remove(key) {
                finished.push(r.tween);
            }
        }
    });

    for (key, value) in ticks {
        let taken = SCHEDULER.with(|s| {
            s.borrow_mut()
                .running
                .get_mut(key)
                .and_then(|r| r.tween.on_tick.take())
        });
        if let Some(mut cb) = taken {
            cb(value);
            SCHEDULER.with(|s| {
                if let Some(r) = s.borrow_mut().running.get_mut(key) {
                    r.tween.on_tick = Some(cb);
                }
            });
        }
    }

    for mut tween in finished {
        if let Some(mut cb) = tween.on_tick.take() {
            cb(tween.to);
        }
        if let Some(cb) = tween.on_complete.take() {
            cb();
        }
    }

    running_count() > 0
}

/// Frame time source for the host loop.
pub trait Clock {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock you advance by hand.
#[derive(Clone)]
pub struct TestClock {
    t: Rc<Cell<Instant>>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            t: Rc::new(Cell::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.t.get()
    }
}
