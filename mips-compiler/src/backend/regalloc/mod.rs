//! Register allocation interfaces.
//!
//! This module defines:
//! - [`RegisterFile`]: the bijective register descriptor.
//! - [`RegAllocator`]: the trait the code emitter talks to.
//! - [`RoundRobinAllocator`]: hit / first-free / round-robin eviction.

mod register_file;
mod round_robin;

pub use register_file::RegisterFile;
pub use round_robin::RoundRobinAllocator;

use super::abi::Register;

/// Abstract register allocation interface.
///
/// Allocation never emits code: values live in their stack slots
/// (write-through), so dropping a residency is always safe.
pub trait RegAllocator {
    /// Register for `name`, never failing.
    fn register_of(&mut self, name: &str) -> Register {
        self.register_avoiding(name, &[])
    }

    /// Like [`RegAllocator::register_of`], but eviction never picks a register
    /// in `pinned`.
    fn register_avoiding(&mut self, name: &str, pinned: &[Register]) -> Register;

    /// Make `name` resident in `reg` (dropping `reg`'s previous occupant).
    fn alias(&mut self, name: &str, reg: Register);

    /// Forget where `name` lives.
    fn release_name(&mut self, name: &str);

    /// Drop all residency and restart the victim pointer.
    fn clear_residency(&mut self);

    fn register_file(&self) -> &RegisterFile;

    /// Pool index of the next eviction victim.
    fn victim_position(&self) -> usize;
}
