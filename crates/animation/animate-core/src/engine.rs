//! Engine: template registry, live instances, and the per-frame update pass.
//!
//! Methods:
//! - create/has/remove/clear animation templates
//! - attach_animation, update_animations
//! - pause, resume, stop, restart on instance ids
//!
//! Instances live in a [`SlotMap`] and the update pass walks its dense storage
//! by position. Removing the instance at the current position swap-moves the
//! last instance into it, so the pass revisits the same position instead of
//! advancing. Callbacks run with `&mut Engine` and may attach new instances or
//! drive any instance's state while the pass is in progress.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use log::{debug, trace, warn};

use crate::config::Config;
use crate::error::AnimateError;
use crate::events::{AnimationEvents, LifecycleFn, UpdateFn};
use crate::ids::{InstanceId, TemplateId};
use crate::instance::{AnimationInstance, InstanceInfo, InstanceState};
use crate::registry::{AnimationTemplate, TemplateRegistry};
use crate::slot_map::SlotMap;
use crate::Result;

/// What the pass does after stepping one position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Step {
    Advance,
    /// The instance was removed; another one may now occupy this position.
    Revisit,
}

/// Per-pass bookkeeping shared with [`PassGuard`].
#[derive(Debug, Default)]
struct PassFlags {
    updating: Cell<bool>,
    /// Instance whose callback is currently firing.
    current: Cell<Option<InstanceId>>,
}

/// Clears the pass flags when the pass ends, including by unwinding out of a
/// panicking callback.
#[must_use = "PassGuard clears the pass flags on drop"]
struct PassGuard(Rc<PassFlags>);

impl Drop for PassGuard {
    fn drop(&mut self) {
        self.0.current.set(None);
        self.0.updating.set(false);
    }
}

/// Tween scheduler over caller-owned targets of type `T`.
///
/// `T` is an opaque reference (an `Rc`, an entity id, a key into caller
/// storage). The engine clones it to hand it to callbacks and never looks
/// inside it.
pub struct Engine<T> {
    cfg: Config,
    templates: TemplateRegistry<T>,
    instances: SlotMap<AnimationInstance<T>>,
    /// Number of update passes started so far.
    epoch: u64,
    pass: Rc<PassFlags>,
}

impl<T: Clone + 'static> Default for Engine<T> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T> fmt::Debug for Engine<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("cfg", &self.cfg)
            .field("templates", &self.templates.len())
            .field("instances", &self.instances.len())
            .field("epoch", &self.epoch)
            .field("updating", &self.pass.updating.get())
            .finish()
    }
}

impl<T: Clone + 'static> Engine<T> {
    /// Create a new engine with the given config.
    pub fn new(cfg: Config) -> Self {
        Self {
            templates: TemplateRegistry::with_capacity(cfg.initial_templates),
            instances: SlotMap::with_capacity(cfg.initial_instances),
            cfg,
            epoch: 0,
            pass: Rc::default(),
        }
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    // ----- templates -----

    /// Register a template with its default callbacks.
    pub fn create_animation(&mut self, events: AnimationEvents<T>) -> TemplateId {
        let id = self.templates.create(events);
        debug!("created animation template {id}");
        id
    }

    #[inline]
    pub fn has_animation(&self, id: TemplateId) -> bool {
        self.templates.contains(id)
    }

    /// Remove a template. Instances already attached from it keep running with
    /// the callbacks they captured at attach time.
    pub fn remove_animation(&mut self, id: TemplateId) -> bool {
        let removed = self.templates.remove(id);
        if removed {
            debug!("removed animation template {id}");
        }
        removed
    }

    /// Remove every template. Live instances are untouched.
    pub fn clear_animations(&mut self) {
        debug!("cleared {} animation templates", self.templates.len());
        self.templates.clear();
    }

    /// The registered template, if `id` has not been removed.
    #[inline]
    pub fn template(&self, id: TemplateId) -> Option<&AnimationTemplate<T>> {
        self.templates.get(id)
    }

    #[inline]
    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    // ----- instances -----

    /// Attach a live instance of `template` to `target`.
    ///
    /// `overrides` replace the template's callbacks slot by slot. `repeat == 0`
    /// repeats forever. The instance starts stepping on the next update pass,
    /// even when attached from inside a callback of the current one.
    pub fn attach_animation(
        &mut self,
        template: TemplateId,
        target: T,
        duration: f32,
        repeat: u32,
        overrides: AnimationEvents<T>,
    ) -> Result<InstanceId> {
        let defaults = self
            .templates
            .get(template)
            .ok_or(AnimateError::TemplateNotFound { id: template })?;
        if !(duration.is_finite() && duration > 0.0) {
            return Err(AnimateError::InvalidDuration { duration });
        }

        let events = overrides.merged_over(defaults.default_events());
        let instance = AnimationInstance::new(
            template,
            target,
            events,
            duration,
            repeat,
            self.epoch.wrapping_add(1),
        );
        let handle = self.instances.insert(instance);
        let id = InstanceId(handle);
        if let Some(inst) = self.instances.get_mut(handle) {
            inst.id = id;
        }
        debug!("attached {id} from template {template} (duration {duration}, repeat {repeat})");
        Ok(id)
    }

    /// Advance every live instance by `dt`, firing callbacks synchronously.
    pub fn update_animations(&mut self, dt: f32) {
        if self.pass.updating.get() {
            warn!("update_animations called from inside an animation callback; ignoring");
            return;
        }
        self.pass.updating.set(true);
        let _guard = PassGuard(self.pass.clone());
        self.epoch = self.epoch.wrapping_add(1);

        let mut position = 0;
        while position < self.instances.len() {
            if self.step_at(position, dt) == Step::Advance {
                position += 1;
            }
        }

        trace!(
            "update pass {} (dt {dt}) left {} live instances",
            self.epoch,
            self.instances.len()
        );
    }

    /// Freeze an instance's time and cycle count until [`Engine::resume`].
    pub fn pause(&mut self, id: InstanceId) {
        self.control(id, "pause", AnimationInstance::pause);
    }

    /// Continue a paused instance from where it was paused.
    pub fn resume(&mut self, id: InstanceId) {
        self.control(id, "resume", AnimationInstance::resume);
    }

    /// Request a graceful stop: `on_end` fires and the instance is removed on
    /// the next update pass.
    pub fn stop(&mut self, id: InstanceId) {
        self.control(id, "stop", AnimationInstance::stop);
    }

    /// Reset time and cycle count; `on_start` fires again on the next step.
    pub fn restart(&mut self, id: InstanceId) {
        self.control(id, "restart", AnimationInstance::restart);
    }

    #[inline]
    pub fn is_alive(&self, id: InstanceId) -> bool {
        self.instances.is_valid(id.0)
    }

    pub fn instance(&self, id: InstanceId) -> Option<InstanceInfo> {
        self.instances.get(id.0).map(AnimationInstance::info)
    }

    #[inline]
    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Ids of every live instance, in storage order.
    pub fn instance_handles(&self) -> Vec<InstanceId> {
        self.instances.iter().map(|(h, _)| InstanceId(h)).collect()
    }

    /// The instance whose callback is running, if called from inside one.
    #[inline]
    pub fn current_instance(&self) -> Option<InstanceId> {
        self.pass.current.get()
    }

    /// Number of update passes started so far.
    #[inline]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    fn control(&mut self, id: InstanceId, op: &str, apply: fn(&mut AnimationInstance<T>)) {
        match self.instances.get_mut(id.0) {
            Some(inst) => {
                apply(inst);
                trace!("{op} {id} -> {}", inst.state.name());
            }
            None => trace!("{op} ignored for stale {id}"),
        }
    }

    /// Step the instance stored at `position`.
    ///
    /// Every callback may change the instance's state through the control
    /// operations, so the instance is re-resolved by id after each one.
    fn step_at(&mut self, position: usize, dt: f32) -> Step {
        let Some(handle) = self.instances.handle_at(position) else {
            return Step::Advance;
        };
        let id = InstanceId(handle);
        self.pass.current.set(Some(id));

        // 1-4: skip, stop, advance time, start.
        let (target, on_start, on_repeat_start) = {
            let Some(inst) = self.instances.get_at_mut(position) else {
                return Step::Advance;
            };
            if inst.first_pass > self.epoch {
                return Step::Advance;
            }
            match inst.state {
                InstanceState::Paused => return Step::Advance,
                InstanceState::Stopping => {
                    self.finish(id);
                    return Step::Revisit;
                }
                InstanceState::Starting | InstanceState::Running => {}
            }
            inst.advance(dt);
            if inst.state == InstanceState::Starting {
                inst.state = InstanceState::Running;
                (
                    inst.target.clone(),
                    inst.events.on_start.clone(),
                    inst.events.on_each_repeat_start.clone(),
                )
            } else {
                (inst.target.clone(), None, None)
            }
        };
        self.fire(on_start, &target);
        self.fire(on_repeat_start, &target);

        // 5: progress.
        let Some(inst) = self.instances.get(handle) else {
            return Step::Revisit;
        };
        let progress = inst.progress();
        let on_update = inst.events.on_update.clone();
        self.fire_update(on_update, progress, &target);

        // 6: cycle completion.
        let on_repeat_end = match self.instances.get_mut(handle) {
            None => return Step::Revisit,
            Some(inst) if inst.is_cycle_complete() => {
                inst.count_cycle();
                inst.events.on_each_repeat_end.clone()
            }
            Some(_) => return Step::Advance,
        };
        self.fire(on_repeat_end, &target);

        let on_next_cycle = match self.instances.get_mut(handle) {
            None => return Step::Revisit,
            Some(inst) => {
                inst.elapsed = 0.0;
                if inst.is_finished() {
                    None
                } else if matches!(inst.state, InstanceState::Running | InstanceState::Paused) {
                    Some(inst.events.on_each_repeat_start.clone())
                } else {
                    // Restarted or stopped from its own callback: the next pass handles it.
                    Some(None)
                }
            }
        };
        match on_next_cycle {
            Some(on_repeat_start) => {
                self.fire(on_repeat_start, &target);
                Step::Advance
            }
            None => {
                self.finish(id);
                Step::Revisit
            }
        }
    }

    /// Remove `id` and fire its `on_end`.
    ///
    /// Removal happens first: by the time `on_end` runs the id is already stale.
    fn finish(&mut self, id: InstanceId) {
        let Some(inst) = self.instances.remove(id.0) else {
            return;
        };
        debug!(
            "{id} finished after {} cycles ({})",
            inst.repeat_count,
            inst.state.name()
        );
        self.pass.current.set(Some(id));
        self.fire(inst.events.on_end, &inst.target);
    }

    #[inline]
    fn fire(&mut self, callback: Option<LifecycleFn<T>>, target: &T) {
        if let Some(callback) = callback {
            callback(self, target);
        }
    }

    #[inline]
    fn fire_update(&mut self, callback: Option<UpdateFn<T>>, progress: f32, target: &T) {
        if let Some(callback) = callback {
            callback(self, progress, target);
        }
    }
}
