//! Stack-slot assignment for names referenced inside one function.

use std::collections::HashMap;

/// Bytes per slot; every value is a 32-bit word.
pub const SLOT_SIZE: i32 = 4;

/// Offsets below the frame base, handed out in first-reference order.
#[derive(Debug, Default, Clone)]
pub struct StackFrame {
    offsets: HashMap<String, i32>,
    size: i32,
}

impl StackFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot of `name` relative to `$fp`, allocating `-4`, `-8`, ... on first use.
    pub fn offset_of(&mut self, name: &str) -> i32 {
        if let Some(&off) = self.offsets.get(name) {
            return off;
        }
        self.size += SLOT_SIZE;
        let off = -self.size;
        if off < i16::MIN as i32 {
            log::warn!("stack slot for {name} at {off} exceeds the 16-bit displacement range");
        }
        log::trace!("slot {name} -> {off}($fp)");
        self.offsets.insert(name.to_string(), off);
        off
    }

    /// Bytes allocated so far.
    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn reset(&mut self) {
        self.offsets.clear();
        self.size = 0;
    }
}
