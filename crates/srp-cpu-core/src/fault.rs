use srp_bus_bridge::BridgeError;
use thiserror::Error;

use crate::state::CpuState;

/// Why a helper stopped the current translated block.
///
/// Helpers return this through `Result` instead of jumping back into the dispatch loop; the loop
/// matches on it and decides what happens next.
#[derive(Debug, Error)]
pub enum CpuExit {
    #[error("cpu exception {0:#x}")]
    Exception(u32),

    /// The bus bridge lost sync with its peer. Emulation cannot continue.
    #[error("bus bridge failure: {0}")]
    Bus(#[from] BridgeError),
}

impl CpuExit {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Bus(_))
    }

    /// Process exit status for a host that terminates on this exit.
    ///
    /// Guest exceptions are handled by the dispatch loop and never end the process, so they have
    /// no status.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Exception(_) => None,
            Self::Bus(_) => Some(1),
        }
    }
}

/// Records `fault_code` as the pending exception and produces the exit the caller must return.
///
/// ```
/// use srp_cpu_core::{raise, CpuExit, CpuState};
///
/// fn check_alignment(cpu: &mut CpuState, addr: u32) -> Result<(), CpuExit> {
///     if addr & 3 != 0 {
///         return Err(raise(cpu, 0x07));
///     }
///     Ok(())
/// }
///
/// let mut cpu = CpuState::new();
/// assert!(matches!(check_alignment(&mut cpu, 2), Err(CpuExit::Exception(0x07))));
/// assert_eq!(cpu.exception_index, Some(0x07));
/// ```
#[must_use]
pub fn raise(cpu: &mut CpuState, fault_code: u32) -> CpuExit {
    cpu.exception_index = Some(fault_code);
    CpuExit::Exception(fault_code)
}
