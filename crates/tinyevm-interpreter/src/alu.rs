//! Word arithmetic, comparison and bitwise semantics.
//!
//! Every function takes its operands in pop order: the first argument is the
//! value that was on top of the stack. Results wrap modulo 2^256, division by
//! zero yields zero, and every boolean producer returns exactly 0 or 1.
//! Signed variants read the same bits as two's complement.

use tinyevm_primitives::word::{low_word, DoubleWord};
use tinyevm_primitives::Word;

fn bool_word(value: bool) -> Word {
    if value {
        Word::one()
    } else {
        Word::zero()
    }
}

#[inline]
fn is_negative(value: Word) -> bool {
    value.bit(255)
}

/// Two's-complement negation
#[inline]
fn negate(value: Word) -> Word {
    (!value).overflowing_add(Word::one()).0
}

#[inline]
fn magnitude(value: Word) -> Word {
    if is_negative(value) {
        negate(value)
    } else {
        value
    }
}

/// ADD
#[inline]
pub fn add(a: Word, b: Word) -> Word {
    a.overflowing_add(b).0
}

/// SUB: `a - b`
#[inline]
pub fn sub(a: Word, b: Word) -> Word {
    a.overflowing_sub(b).0
}

/// MUL
#[inline]
pub fn mul(a: Word, b: Word) -> Word {
    a.overflowing_mul(b).0
}

/// DIV: `a / b`, zero when `b` is zero
#[inline]
pub fn div(a: Word, b: Word) -> Word {
    if b.is_zero() {
        Word::zero()
    } else {
        a / b
    }
}

/// SDIV: signed `a / b` truncated toward zero
///
/// `MIN / -1` wraps back to `MIN`.
pub fn sdiv(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let quotient = magnitude(a) / magnitude(b);
    if is_negative(a) != is_negative(b) {
        negate(quotient)
    } else {
        quotient
    }
}

/// MOD: `a % b`, zero when `b` is zero
#[inline]
pub fn rem(a: Word, b: Word) -> Word {
    if b.is_zero() {
        Word::zero()
    } else {
        a % b
    }
}

/// SMOD: signed remainder carrying the sign of the dividend
pub fn smod(a: Word, b: Word) -> Word {
    if b.is_zero() {
        return Word::zero();
    }
    let remainder = magnitude(a) % magnitude(b);
    if is_negative(a) {
        negate(remainder)
    } else {
        remainder
    }
}

/// ADDMOD: `(a + b) % n` without intermediate wraparound
pub fn addmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    let sum = DoubleWord::from(a) + DoubleWord::from(b);
    low_word(sum % DoubleWord::from(n))
}

/// MULMOD: `(a * b) % n` without intermediate wraparound
pub fn mulmod(a: Word, b: Word, n: Word) -> Word {
    if n.is_zero() {
        return Word::zero();
    }
    let product = DoubleWord::from(a) * DoubleWord::from(b);
    low_word(product % DoubleWord::from(n))
}

/// EXP: `base ^ exponent` modulo 2^256
#[inline]
pub fn exp(base: Word, exponent: Word) -> Word {
    base.overflowing_pow(exponent).0
}

/// SIGNEXTEND: extend the sign bit of byte `b` (counted from the least
/// significant end) through the upper bytes of `x`
pub fn signextend(b: Word, x: Word) -> Word {
    if b >= Word::from(31u64) {
        return x;
    }
    let bit = (b.low_u64() as usize) * 8 + 7;
    let mask = (Word::one() << (bit + 1)) - Word::one();
    if x.bit(bit) {
        x | !mask
    } else {
        x & mask
    }
}

/// LT: unsigned `a < b`
#[inline]
pub fn lt(a: Word, b: Word) -> Word {
    bool_word(a < b)
}

/// GT: unsigned `a > b`
#[inline]
pub fn gt(a: Word, b: Word) -> Word {
    bool_word(a > b)
}

/// SLT: signed `a < b`
pub fn slt(a: Word, b: Word) -> Word {
    let less = match (is_negative(a), is_negative(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a < b,
    };
    bool_word(less)
}

/// SGT: signed `a > b`
pub fn sgt(a: Word, b: Word) -> Word {
    slt(b, a)
}

/// EQ
#[inline]
pub fn eq(a: Word, b: Word) -> Word {
    bool_word(a == b)
}

/// ISZERO
#[inline]
pub fn iszero(a: Word) -> Word {
    bool_word(a.is_zero())
}

/// AND
#[inline]
pub fn and(a: Word, b: Word) -> Word {
    a & b
}

/// OR
#[inline]
pub fn or(a: Word, b: Word) -> Word {
    a | b
}

/// XOR
#[inline]
pub fn xor(a: Word, b: Word) -> Word {
    a ^ b
}

/// NOT: complement over all 256 bits
#[inline]
pub fn not(a: Word) -> Word {
    !a
}

/// BYTE: the `i`-th byte of `x`, index 0 being the most significant
pub fn byte(i: Word, x: Word) -> Word {
    if i >= Word::from(32u64) {
        return Word::zero();
    }
    let shift = (31 - i.low_u64() as usize) * 8;
    (x >> shift) & Word::from(0xFFu64)
}

/// SHL: `value << shift`, zero once the shift reaches 256
pub fn shl(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256u64) {
        Word::zero()
    } else {
        value << (shift.low_u64() as usize)
    }
}

/// SHR: logical `value >> shift`, zero once the shift reaches 256
pub fn shr(shift: Word, value: Word) -> Word {
    if shift >= Word::from(256u64) {
        Word::zero()
    } else {
        value >> (shift.low_u64() as usize)
    }
}

/// SAR: arithmetic `value >> shift`
///
/// Saturates to all ones for a negative value and to zero otherwise once the
/// shift reaches 256.
pub fn sar(shift: Word, value: Word) -> Word {
    let negative = is_negative(value);
    if shift >= Word::from(256u64) {
        return if negative { Word::MAX } else { Word::zero() };
    }
    let shift = shift.low_u64() as usize;
    if negative {
        !((!value) >> shift)
    } else {
        value >> shift
    }
}
