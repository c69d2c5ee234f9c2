//! Lifecycle callback sets and the attach-time merge.
//!
//! Every callback receives the engine first, so it can attach, pause, stop or
//! restart instances while a pass is running. The target is forwarded exactly
//! as it was handed to `attach_animation`.

use std::fmt;
use std::rc::Rc;

use crate::engine::Engine;

/// Callback fired at a lifecycle edge (start, repeat start/end, end).
pub type LifecycleFn<T> = Rc<dyn Fn(&mut Engine<T>, &T)>;

/// Callback fired once per instance per pass with the progress fraction in `[0, 1]`.
pub type UpdateFn<T> = Rc<dyn Fn(&mut Engine<T>, f32, &T)>;

/// Five optional callback slots. An empty slot is a no-op.
///
/// Used both as a template's defaults and as per-instance overrides.
pub struct AnimationEvents<T> {
    pub(crate) on_start: Option<LifecycleFn<T>>,
    pub(crate) on_each_repeat_start: Option<LifecycleFn<T>>,
    pub(crate) on_update: Option<UpdateFn<T>>,
    pub(crate) on_each_repeat_end: Option<LifecycleFn<T>>,
    pub(crate) on_end: Option<LifecycleFn<T>>,
}

impl<T> AnimationEvents<T> {
    /// An empty set: every slot is a no-op.
    pub fn new() -> Self {
        Self {
            on_start: None,
            on_each_repeat_start: None,
            on_update: None,
            on_each_repeat_end: None,
            on_end: None,
        }
    }

    pub fn on_start(mut self, f: impl Fn(&mut Engine<T>, &T) + 'static) -> Self {
        self.on_start = Some(Rc::new(f));
        self
    }

    pub fn on_each_repeat_start(mut self, f: impl Fn(&mut Engine<T>, &T) + 'static) -> Self {
        self.on_each_repeat_start = Some(Rc::new(f));
        self
    }

    pub fn on_update(mut self, f: impl Fn(&mut Engine<T>, f32, &T) + 'static) -> Self {
        self.on_update = Some(Rc::new(f));
        self
    }

    pub fn on_each_repeat_end(mut self, f: impl Fn(&mut Engine<T>, &T) + 'static) -> Self {
        self.on_each_repeat_end = Some(Rc::new(f));
        self
    }

    pub fn on_end(mut self, f: impl Fn(&mut Engine<T>, &T) + 'static) -> Self {
        self.on_end = Some(Rc::new(f));
        self
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.on_start.is_none()
            && self.on_each_repeat_start.is_none()
            && self.on_update.is_none()
            && self.on_each_repeat_end.is_none()
            && self.on_end.is_none()
    }

    /// Overlay `self` on `defaults`: a slot set here wins, an empty slot falls
    /// back to the default, a slot empty in both stays empty.
    pub fn merged_over(&self, defaults: &AnimationEvents<T>) -> AnimationEvents<T> {
        fn pick<F: ?Sized>(own: &Option<Rc<F>>, fallback: &Option<Rc<F>>) -> Option<Rc<F>> {
            own.as_ref().or(fallback.as_ref()).cloned()
        }
        AnimationEvents {
            on_start: pick(&self.on_start, &defaults.on_start),
            on_each_repeat_start: pick(&self.on_each_repeat_start, &defaults.on_each_repeat_start),
            on_update: pick(&self.on_update, &defaults.on_update),
            on_each_repeat_end: pick(&self.on_each_repeat_end, &defaults.on_each_repeat_end),
            on_end: pick(&self.on_end, &defaults.on_end),
        }
    }
}

impl<T> Default for AnimationEvents<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for AnimationEvents<T> {
    fn clone(&self) -> Self {
        Self {
            on_start: self.on_start.clone(),
            on_each_repeat_start: self.on_each_repeat_start.clone(),
            on_update: self.on_update.clone(),
            on_each_repeat_end: self.on_each_repeat_end.clone(),
            on_end: self.on_end.clone(),
        }
    }
}

impl<T> fmt::Debug for AnimationEvents<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationEvents")
            .field("on_start", &self.on_start.is_some())
            .field("on_each_repeat_start", &self.on_each_repeat_start.is_some())
            .field("on_update", &self.on_update.is_some())
            .field("on_each_repeat_end", &self.on_each_repeat_end.is_some())
            .field("on_end", &self.on_end.is_some())
            .finish()
    }
}
