//! Template registry: one entry per distinct animation kind.

use hashbrown::HashMap;

use crate::events::AnimationEvents;
use crate::ids::{IdAllocator, TemplateId};

/// A reusable bundle of default callbacks.
#[derive(Debug)]
pub struct AnimationTemplate<T> {
    id: TemplateId,
    default_events: AnimationEvents<T>,
}

impl<T> AnimationTemplate<T> {
    #[inline]
    pub fn id(&self) -> TemplateId {
        self.id
    }

    #[inline]
    pub fn default_events(&self) -> &AnimationEvents<T> {
        &self.default_events
    }
}

/// Exclusive owner of every template's default callbacks.
#[derive(Debug)]
pub struct TemplateRegistry<T> {
    ids: IdAllocator,
    templates: HashMap<TemplateId, AnimationTemplate<T>>,
}

impl<T> Default for TemplateRegistry<T> {
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<T> TemplateRegistry<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: IdAllocator::new(),
            templates: HashMap::with_capacity(capacity),
        }
    }

    /// Store a new template and return its id. Ids of removed templates are not handed out again.
    pub fn create(&mut self, default_events: AnimationEvents<T>) -> TemplateId {
        let id = self.ids.alloc_template();
        self.templates.insert(id, AnimationTemplate { id, default_events });
        id
    }

    #[inline]
    pub fn contains(&self, id: TemplateId) -> bool {
        self.templates.contains_key(&id)
    }

    #[inline]
    pub fn get(&self, id: TemplateId) -> Option<&AnimationTemplate<T>> {
        self.templates.get(&id)
    }

    /// Returns whether a template was removed.
    pub fn remove(&mut self, id: TemplateId) -> bool {
        self.templates.remove(&id).is_some()
    }

    pub fn clear(&mut self) {
        self.templates.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
