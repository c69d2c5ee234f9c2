//! animate-core
//!
//! Frame-stepped tween scheduling for caller-owned targets. A template bundles
//! default lifecycle callbacks; attaching it to a target creates a live instance
//! addressed by a generation-checked [`InstanceId`]; one `update_animations(dt)`
//! call per frame advances every instance and fires its callbacks.
//!
//! ```
//! use animate_core::{AnimationEvents, Engine};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let width = Rc::new(Cell::new(0.0_f32));
//! let mut engine: Engine<Rc<Cell<f32>>> = Engine::default();
//! let grow = engine.create_animation(
//!     AnimationEvents::new().on_update(|_, progress, w: &Rc<Cell<f32>>| w.set(800.0 * progress)),
//! );
//! engine
//!     .attach_animation(grow, width.clone(), 2.0, 1, AnimationEvents::new())
//!     .unwrap();
//!
//! engine.update_animations(1.0);
//! assert_eq!(width.get(), 400.0);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod ids;
pub mod instance;
pub mod registry;
pub mod slot_map;

// Re-exports for consumers
pub use config::Config;
pub use engine::Engine;
pub use error::AnimateError;
pub use events::{AnimationEvents, LifecycleFn, UpdateFn};
pub use ids::{InstanceId, TemplateId};
pub use instance::{InstanceInfo, InstanceState};
pub use registry::{AnimationTemplate, TemplateRegistry};
pub use slot_map::{Handle, SlotMap};

/// Result type for fallible engine operations.
pub type Result<T> = core::result::Result<T, AnimateError>;
