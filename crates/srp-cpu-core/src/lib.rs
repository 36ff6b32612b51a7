#![forbid(unsafe_code)]

pub mod fault;
pub mod flags;
pub mod helpers;
pub mod interp;
pub mod state;

pub use fault::{raise, CpuExit};
pub use flags::CondFlags;
pub use helpers::{HelperConfig, Helpers};
pub use interp::alu::{AluResult, RotateCarry};
pub use state::CpuState;
