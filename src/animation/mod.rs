//! Time-driven values for revealing the generated vine

mod grow_cycle;

pub use grow_cycle::GrowCycle;
