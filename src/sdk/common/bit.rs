pub const ONES_32: u32 = 0xffffffff;

#[macro_export]
macro_rules! BIT {
    ( $x:expr ) => {
        1u32 << $x
    };
}

#[macro_export]
macro_rules! BIT_MASK_LEN {
    ( $x:expr ) => {
        $crate::BIT!($x) - 1
    };
}

// bits range: BITS_RNG(4, 5)  0b000111110000,  start from 4, length = 5
#[macro_export]
macro_rules! BIT_RNG {
    ( $s:expr, $e:expr ) => {
        $crate::BIT_MASK_LEN!($e - $s + 1) << $s
    };
}

#[macro_export]
macro_rules! BM_SET {
    ( $x:expr, $mask:expr ) => {
        $x |= $mask
    };
}

#[macro_export]
macro_rules! BM_CLR {
    ( $x:expr, $mask:expr ) => {
        $x &= !($mask)
    };
}

#[macro_export]
macro_rules! BM_IS_SET {
    ( $x:expr, $mask:expr ) => {
        ($x & $mask) != 0
    };
}

/// Mask covering the `width`-bit field of slot `slot`, e.g. slot 3 of a
/// 2-bit-per-pin register is bits 6..=7.
#[inline(always)]
pub const fn field_mask(width: u32, slot: u32) -> u32 {
    BIT_MASK_LEN!(width) << (width * slot)
}

/// Extract the `width`-bit field of slot `slot` from `reg`, shifted down to bit 0.
#[inline(always)]
pub const fn get_field(reg: u32, width: u32, slot: u32) -> u32 {
    (reg >> (width * slot)) & BIT_MASK_LEN!(width)
}

/// Place `value` into the `width`-bit field of slot `slot` of `reg`, clearing
/// the slot's previous contents first. Unaffected by the `or-writes` feature.
#[inline(always)]
pub const fn replace_field(reg: u32, width: u32, slot: u32, value: u32) -> u32 {
    (reg & !field_mask(width, slot)) | ((value & BIT_MASK_LEN!(width)) << (width * slot))
}

/// Place `value` into the `width`-bit field of slot `slot` of `reg`.
///
/// `value` is truncated to `width` bits before shifting so it can never spill
/// into a neighbouring slot. Every other slot of `reg` is returned untouched.
///
/// The slot's previous contents are cleared first unless the `or-writes`
/// feature is enabled, in which case `value` is OR'd over whatever the slot
/// already holds.
#[inline(always)]
pub const fn set_field(reg: u32, width: u32, slot: u32, value: u32) -> u32 {
    if cfg!(feature = "or-writes") {
        reg | ((value & BIT_MASK_LEN!(width)) << (width * slot))
    } else {
        replace_field(reg, width, slot, value)
    }
}
