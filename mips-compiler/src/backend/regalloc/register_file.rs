//! Register descriptor: which name lives in which register.

use crate::backend::abi::Register;
use std::collections::HashMap;

/// Slots-to-name plus name-to-slot, kept as exact inverses.
///
/// `bind` and `release` are the only mutators, and each updates both
/// directions, so `content[r] == Some(v)` iff `resident[v] == r` at all times.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    content: [Option<String>; 32],
    resident: HashMap<String, Register>,
}

impl Default for RegisterFile {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterFile {
    pub fn new() -> Self {
        Self {
            content: std::array::from_fn(|_| None),
            resident: HashMap::new(),
        }
    }

    /// Name currently held by `reg`.
    pub fn content(&self, reg: Register) -> Option<&str> {
        self.content[reg.index()].as_deref()
    }

    /// Register currently holding `name`.
    pub fn slot_of(&self, name: &str) -> Option<Register> {
        self.resident.get(name).copied()
    }

    pub fn is_free(&self, reg: Register) -> bool {
        self.content[reg.index()].is_none()
    }

    pub fn len(&self) -> usize {
        self.resident.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resident.is_empty()
    }

    /// Make `name` the sole occupant of `reg`.
    ///
    /// Drops whatever `reg` held before and whatever register `name` held
    /// before. Returns the displaced occupant of `reg`, if it was a different
    /// name.
    pub fn bind(&mut self, name: &str, reg: Register) -> Option<String> {
        if let Some(old_reg) = self.resident.remove(name) {
            self.content[old_reg.index()] = None;
        }
        let displaced = self.content[reg.index()].take();
        if let Some(old) = &displaced {
            self.resident.remove(old);
        }
        self.content[reg.index()] = Some(name.to_string());
        self.resident.insert(name.to_string(), reg);
        displaced
    }

    /// Empty `reg`, returning its former occupant.
    pub fn release(&mut self, reg: Register) -> Option<String> {
        let old = self.content[reg.index()].take();
        if let Some(name) = &old {
            self.resident.remove(name);
        }
        old
    }

    /// Drop `name`'s residency, if any.
    pub fn release_name(&mut self, name: &str) -> Option<Register> {
        let reg = self.resident.remove(name)?;
        self.content[reg.index()] = None;
        Some(reg)
    }

    pub fn clear(&mut self) {
        for slot in self.content.iter_mut() {
            *slot = None;
        }
        self.resident.clear();
    }

    /// Check the bijection in both directions.
    pub fn is_consistent(&self) -> bool {
        let forward = Register::ALL.iter().all(|&r| match self.content(r) {
            Some(name) => self.resident.get(name) == Some(&r),
            None => true,
        });
        let backward = self
            .resident
            .iter()
            .all(|(name, &r)| self.content(r) == Some(name.as_str()));
        forward && backward
    }
}
