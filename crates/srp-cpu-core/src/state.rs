use crate::flags::CondFlags;

/// The slice of guest CPU state the helpers read and write.
///
/// Registers, the program counter and everything else belong to the host.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CpuState {
    pub flags: CondFlags,
    /// Fault code recorded by the last [`crate::raise`], until the host clears it.
    pub exception_index: Option<u32>,
}

impl CpuState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the pending fault code, if any.
    pub fn take_exception(&mut self) -> Option<u32> {
        self.exception_index.take()
    }
}
