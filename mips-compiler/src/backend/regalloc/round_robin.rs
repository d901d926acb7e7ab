//! Round-robin register allocator.
//!
//! No liveness information: a miss takes the first empty pool register in
//! priority order, and when the pool is full the register under the victim
//! pointer is taken and the pointer moves on by one.

use super::{RegAllocator, RegisterFile};
use crate::backend::abi::Register;

pub struct RoundRobinAllocator {
    file: RegisterFile,
    pool: Vec<Register>,
    victim: usize,
}

impl Default for RoundRobinAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl RoundRobinAllocator {
    pub fn new() -> Self {
        Self::with_pool(Register::ALLOCATABLE.to_vec())
    }

    /// Allocator over the first `n` registers of the default pool.
    pub fn with_pool_size(n: usize) -> Self {
        let n = n.clamp(2, Register::ALLOCATABLE.len());
        Self::with_pool(Register::ALLOCATABLE[..n].to_vec())
    }

    fn with_pool(pool: Vec<Register>) -> Self {
        debug_assert!(pool.len() >= 2);
        Self {
            file: RegisterFile::new(),
            pool,
            victim: 0,
        }
    }

    fn first_free(&self) -> Option<Register> {
        self.pool.iter().copied().find(|&r| self.file.is_free(r))
    }

    /// Take the register under the victim pointer, skipping pinned ones.
    fn evict(&mut self, pinned: &[Register]) -> Register {
        // The pool always has more registers than any instruction pins.
        for _ in 0..self.pool.len() {
            let r = self.pool[self.victim];
            self.victim = (self.victim + 1) % self.pool.len();
            if !pinned.contains(&r) {
                return r;
            }
        }
        let r = self.pool[self.victim];
        self.victim = (self.victim + 1) % self.pool.len();
        r
    }
}

impl RegAllocator for RoundRobinAllocator {
    fn register_avoiding(&mut self, name: &str, pinned: &[Register]) -> Register {
        if let Some(r) = self.file.slot_of(name) {
            return r;
        }
        if let Some(r) = self.first_free() {
            self.file.bind(name, r);
            return r;
        }
        let r = self.evict(pinned);
        if let Some(old) = self.file.bind(name, r) {
            log::trace!("evict {old} from {r} for {name}");
        }
        r
    }

    fn alias(&mut self, name: &str, reg: Register) {
        self.file.bind(name, reg);
    }

    fn release_name(&mut self, name: &str) {
        self.file.release_name(name);
    }

    fn clear_residency(&mut self) {
        self.file.clear();
        self.victim = 0;
    }

    fn register_file(&self) -> &RegisterFile {
        &self.file
    }

    fn victim_position(&self) -> usize {
        self.victim
    }
}
