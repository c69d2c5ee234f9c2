//! Live animation instances and their state machine.
//!
//! `Starting → Running ⇄ Paused`, `Running → Stopping → (removed)`, and
//! `restart` returns any state to `Starting`. Callback dispatch lives in the
//! engine; this module only owns the timing and state transitions.

use serde::{Deserialize, Serialize};

use crate::events::AnimationEvents;
use crate::ids::{InstanceId, TemplateId};

/// Lifecycle state of an attached instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstanceState {
    /// Attached or restarted; `on_start` fires on the next step
    Starting,
    /// Advancing every pass
    Running,
    /// Skipped by every pass until resumed
    Paused,
    /// `on_end` fires and the instance is removed on the next pass
    Stopping,
}

impl InstanceState {
    /// Get the name of this state
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Stopping => "stopping",
        }
    }

    /// Check if the instance can be paused
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }

    /// Check if the instance can be stopped
    #[inline]
    pub fn can_stop(&self) -> bool {
        !matches!(self, Self::Stopping)
    }
}

/// Read-only snapshot of an instance for callers and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InstanceInfo {
    pub id: InstanceId,
    pub template: TemplateId,
    pub state: InstanceState,
    pub duration: f32,
    /// 0 repeats forever.
    pub repeat: u32,
    pub elapsed: f32,
    pub repeat_count: u32,
}

impl InstanceInfo {
    /// Linear progress through the current cycle.
    #[inline]
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }
}

pub(crate) struct AnimationInstance<T> {
    pub id: InstanceId,
    pub template: TemplateId,
    pub target: T,
    pub events: AnimationEvents<T>,
    pub duration: f32,
    pub repeat: u32,
    pub elapsed: f32,
    pub repeat_count: u32,
    pub state: InstanceState,
    /// State restored by `resume`.
    resume_state: InstanceState,
    /// First engine pass allowed to step this instance.
    pub first_pass: u64,
}

impl<T> AnimationInstance<T> {
    pub fn new(
        template: TemplateId,
        target: T,
        events: AnimationEvents<T>,
        duration: f32,
        repeat: u32,
        first_pass: u64,
    ) -> Self {
        Self {
            id: InstanceId::dangling(),
            template,
            target,
            events,
            duration,
            repeat,
            elapsed: 0.0,
            repeat_count: 0,
            state: InstanceState::Starting,
            resume_state: InstanceState::Starting,
            first_pass,
        }
    }

    pub fn info(&self) -> InstanceInfo {
        InstanceInfo {
            id: self.id,
            template: self.template,
            state: self.state,
            duration: self.duration,
            repeat: self.repeat,
            elapsed: self.elapsed,
            repeat_count: self.repeat_count,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.elapsed / self.duration
    }

    /// Advance time, clamped to the cycle length.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).clamp(0.0, self.duration);
    }

    #[inline]
    pub fn is_cycle_complete(&self) -> bool {
        self.elapsed == self.duration
    }

    /// Count a completed cycle. Infinite instances never count.
    #[inline]
    pub fn count_cycle(&mut self) {
        if self.repeat != 0 {
            self.repeat_count += 1;
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.repeat != 0 && self.repeat_count == self.repeat
    }

    pub fn pause(&mut self) {
        if self.state.can_pause() {
            self.resume_state = self.state;
            self.state = InstanceState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == InstanceState::Paused {
            self.state = self.resume_state;
        }
    }

    pub fn stop(&mut self) {
        if self.state.can_stop() {
            self.state = InstanceState::Stopping;
        }
    }

    pub fn restart(&mut self) {
        self.elapsed = 0.0;
        self.repeat_count = 0;
        self.state = InstanceState::Starting;
        self.resume_state = InstanceState::Starting;
    }
}
