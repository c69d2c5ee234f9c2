//! Identifiers and simple allocators for core entities.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::slot_map::Handle;

/// Identifier of a registered animation template.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

/// Generation-checked identifier of a live animation instance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub struct InstanceId(pub(crate) Handle);

impl InstanceId {
    /// An id that never resolves to an instance.
    pub const fn dangling() -> Self {
        Self(Handle::dangling())
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "inst:{}", self.0)
    }
}

/// Monotonic allocator for TemplateId.
/// Removing a template never frees its id; the counter only wraps back to 0
/// after `u32::MAX` allocations.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_template: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_template(&mut self) -> TemplateId {
        let id = TemplateId(self.next_template);
        self.next_template = self.next_template.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = IdAllocator::new();
        assert_eq!(alloc.alloc_template(), TemplateId(0));
        assert_eq!(alloc.alloc_template(), TemplateId(1));
        assert_eq!(alloc.alloc_template(), TemplateId(2));
    }

    #[test]
    fn alloc_wraps_after_exhausting_u32() {
        let mut alloc = IdAllocator {
            next_template: u32::MAX,
        };
        assert_eq!(alloc.alloc_template(), TemplateId(u32::MAX));
        assert_eq!(alloc.alloc_template(), TemplateId(0));
    }

    #[test]
    fn dangling_instance_id_display() {
        let id = InstanceId::dangling();
        assert!(id.handle().is_dangling());
        assert_eq!(id.to_string(), format!("inst:{}v0", u32::MAX));
    }
}
