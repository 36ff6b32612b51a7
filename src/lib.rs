#![forbid(unsafe_code)]

//! Condition-code helpers and the external bus bridge for the SRP translating emulator.
//!
//! The host dispatch loop owns the guest CPU. It calls into [`cpu`] once per translated
//! arithmetic instruction and once per memory-mapped access that targets the external bus, and
//! acts on the [`cpu::CpuExit`] values those calls return.

pub use srp_bus_bridge as bridge;
pub use srp_bus_protocol as protocol;
pub use srp_cpu_core as cpu;
