use bitflags::bitflags;

bitflags! {
    /// Arithmetic condition codes.
    ///
    /// Bit positions follow the x86 EFLAGS layout so a host can splice them into a wider flags
    /// register without remapping.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct CondFlags: u32 {
        const CF = 1 << 0;
        const ZF = 1 << 6;
        const SF = 1 << 7;
        const OF = 1 << 11;
    }
}

impl Default for CondFlags {
    fn default() -> Self {
        Self::empty()
    }
}

impl CondFlags {
    #[inline]
    pub fn sf(self) -> bool {
        self.contains(Self::SF)
    }

    #[inline]
    pub fn zf(self) -> bool {
        self.contains(Self::ZF)
    }

    #[inline]
    pub fn cf(self) -> bool {
        self.contains(Self::CF)
    }

    #[inline]
    pub fn of(self) -> bool {
        self.contains(Self::OF)
    }
}
