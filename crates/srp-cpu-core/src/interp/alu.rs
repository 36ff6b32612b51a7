//! 32-bit ALU helpers and their condition-code side effects.
//!
//! Each `*_with_flags` function writes exactly the flags it documents and leaves every other bit
//! of the caller's [`CondFlags`] alone. Hosts rely on that: `logic_flags` deliberately does not
//! clear CF/OF, and the plain rotates never touch CF.

use crate::flags::CondFlags;

const SIGN_BIT: u32 = 1 << 31;

#[inline]
fn sign(x: u32) -> bool {
    (x & SIGN_BIT) != 0
}

/// Result word plus the four arithmetic flags computed for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AluResult {
    pub value: u32,
    pub flags: CondFlags,
}

impl AluResult {
    fn arith(value: u32, cf: bool, of: bool) -> Self {
        let mut flags = CondFlags::empty();
        flags.set(CondFlags::SF, sign(value));
        flags.set(CondFlags::ZF, value == 0);
        flags.set(CondFlags::CF, cf);
        flags.set(CondFlags::OF, of);
        Self { value, flags }
    }

    fn store_into(self, flags: &mut CondFlags) -> u32 {
        for f in [CondFlags::SF, CondFlags::ZF, CondFlags::CF, CondFlags::OF] {
            flags.set(f, self.flags.contains(f));
        }
        self.value
    }
}

pub fn add(a: u32, b: u32) -> AluResult {
    let result = a.wrapping_add(b);
    // Carry out of bit 31 shows up as unsigned wraparound.
    let cf = result < a;
    // Operands agree in sign, result does not.
    let of = sign(!(a ^ b) & (a ^ result));
    AluResult::arith(result, cf, of)
}

pub fn sub(a: u32, b: u32) -> AluResult {
    let result = a.wrapping_sub(b);
    let cf = a < b;
    // Operands differ in sign, result differs from the minuend.
    let of = sign((a ^ b) & (a ^ result));
    AluResult::arith(result, cf, of)
}

/// `a + b`, setting SF, ZF, CF and OF.
pub fn add_with_flags(flags: &mut CondFlags, a: u32, b: u32) -> u32 {
    add(a, b).store_into(flags)
}

/// `a - b`, setting SF, ZF, CF (borrow) and OF.
pub fn sub_with_flags(flags: &mut CondFlags, a: u32, b: u32) -> u32 {
    sub(a, b).store_into(flags)
}

#[inline]
pub fn rotate_left_one(x: u32) -> u32 {
    (x << 1) | (x >> 31)
}

#[inline]
pub fn rotate_right_one(x: u32) -> u32 {
    (x >> 1) | (x << 31)
}

/// Rotate left through carry: returns the result and the bit shifted out (old bit 31).
#[inline]
pub fn rcl(x: u32, cf_in: bool) -> (u32, bool) {
    ((x << 1) | cf_in as u32, (x >> 31) & 1 != 0)
}

/// Rotate right through carry: returns the result and the bit shifted out (old bit 0).
#[inline]
pub fn rcr(x: u32, cf_in: bool) -> (u32, bool) {
    ((x >> 1) | ((cf_in as u32) << 31), x & 1 != 0)
}

pub fn rotate_left_through_carry(flags: &mut CondFlags, x: u32) -> u32 {
    let (result, cf) = rcl(x, flags.cf());
    flags.set(CondFlags::CF, cf);
    result
}

pub fn rotate_right_through_carry(flags: &mut CondFlags, x: u32) -> u32 {
    let (result, cf) = rcr(x, flags.cf());
    flags.set(CondFlags::CF, cf);
    result
}

/// Sets SF and ZF from a logical result. CF and OF keep whatever value they had.
pub fn logic_flags(flags: &mut CondFlags, x: u32) {
    flags.set(CondFlags::SF, sign(x));
    flags.set(CondFlags::ZF, x == 0);
}

pub fn zero_flag_only(flags: &mut CondFlags, x: u32) {
    flags.set(CondFlags::ZF, x == 0);
}

/// What the single-bit rotate helpers do with CF.
///
/// The helpers the translator emits for ROL/ROR are named as flag-setting, but the reference
/// behaviour leaves CF alone. `Update` is the architectural alternative (CF = bit rotated out).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RotateCarry {
    #[default]
    Preserve,
    Update,
}

impl RotateCarry {
    pub fn rotate_left(self, flags: &mut CondFlags, x: u32) -> u32 {
        let result = rotate_left_one(x);
        if self == Self::Update {
            flags.set(CondFlags::CF, result & 1 != 0);
        }
        result
    }

    pub fn rotate_right(self, flags: &mut CondFlags, x: u32) -> u32 {
        let result = rotate_right_one(x);
        if self == Self::Update {
            flags.set(CondFlags::CF, sign(result));
        }
        result
    }
}
