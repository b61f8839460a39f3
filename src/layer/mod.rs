//! Per-layer state: the animator state machine, its advisory complexity and the slot arena.

/// Layer state machine.
pub mod animator;
/// Advisory cost estimate.
pub mod complexity;
/// Fixed 20-slot arena.
pub mod slots;
