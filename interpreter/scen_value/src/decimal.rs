//! Arbitrary-precision decimal arithmetic.
//!
//! Scenario scripts compare balances and rates that routinely exceed both
//! `u128` and the exactly-representable range of `f64` (2^256 − 1 is an
//! ordinary constant here), so numbers are kept as sign + digit vector +
//! base-10 exponent and never touch native floating point.
//!
//! Division is the one inexact operation: quotients are truncated toward
//! zero after [`MAX_DIV_EXTRA_DIGITS`] digits beyond the dividend's, which
//! keeps results bit-for-bit reproducible.

use crate::errors::{division_by_zero, not_a_number, ScenResult};
use std::cmp::Ordering;
use std::fmt;

/// Digits of quotient produced past the dividend's own digits before a
/// non-terminating division is truncated toward zero.
pub const MAX_DIV_EXTRA_DIGITS: usize = 36;

/// An arbitrary-precision decimal: `sign * digits * 10^exp`.
///
/// Canonical form: `digits` is most-significant-first with no leading or
/// trailing zeros (trailing zeros are folded into `exp`); zero is the empty
/// digit vector with `exp == 0` and a positive sign. Derived equality is
/// therefore value equality.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decimal {
    neg: bool,
    digits: Vec<u8>,
    exp: i64,
}

impl Decimal {
    pub fn zero() -> Self {
        Decimal { neg: false, digits: Vec::new(), exp: 0 }
    }

    /// `10^exp` as a decimal.
    pub fn pow10(exp: i64) -> Self {
        Decimal { neg: false, digits: vec![1], exp }
    }

    /// Parse a decimal literal: optional sign, optional fraction, optional
    /// `e`/`E` exponent. Fails `NotANumber` on anything else.
    pub fn parse(text: &str) -> ScenResult<Self> {
        let trimmed = text.trim();
        let (neg, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let (mantissa, exp_part) = match rest.split_once(['e', 'E']) {
            Some((m, e)) => (m, Some(e)),
            None => (rest, None),
        };
        let mut exp: i64 = match exp_part {
            Some(e) => e.parse().map_err(|_| not_a_number(text))?,
            None => 0,
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(not_a_number(text));
        }
        let mut digits = Vec::with_capacity(int_part.len() + frac_part.len());
        for ch in int_part.chars().chain(frac_part.chars()) {
            match ch.to_digit(10) {
                Some(d) => digits.push(d as u8),
                None => return Err(not_a_number(text)),
            }
        }
        exp -= frac_part.len() as i64;

        Ok(Decimal::make(neg, digits, exp))
    }

    pub fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return self.clone();
        }
        Decimal { neg: !self.neg, digits: self.digits.clone(), exp: self.exp }
    }

    pub fn add(&self, other: &Decimal) -> Decimal {
        if self.is_zero() {
            return other.clone();
        }
        if other.is_zero() {
            return self.clone();
        }
        let exp = self.exp.min(other.exp);
        let a = self.scaled_digits(exp);
        let b = other.scaled_digits(exp);
        if self.neg == other.neg {
            return Decimal::make(self.neg, add_digits(&a, &b), exp);
        }
        match cmp_digits(&a, &b) {
            Ordering::Equal => Decimal::zero(),
            Ordering::Greater => Decimal::make(self.neg, sub_digits(&a, &b), exp),
            Ordering::Less => Decimal::make(other.neg, sub_digits(&b, &a), exp),
        }
    }

    pub fn sub(&self, other: &Decimal) -> Decimal {
        self.add(&other.neg())
    }

    pub fn mul(&self, other: &Decimal) -> Decimal {
        if self.is_zero() || other.is_zero() {
            return Decimal::zero();
        }
        Decimal::make(
            self.neg != other.neg,
            mul_digits(&self.digits, &other.digits),
            self.exp + other.exp,
        )
    }

    /// Divide, truncating toward zero once the quotient has run
    /// [`MAX_DIV_EXTRA_DIGITS`] digits past the dividend's.
    pub fn div(&self, other: &Decimal) -> ScenResult<Decimal> {
        if other.is_zero() {
            return Err(division_by_zero());
        }
        if self.is_zero() {
            return Ok(Decimal::zero());
        }
        let mut rem: Vec<u8> = Vec::new();
        let mut quotient: Vec<u8> = Vec::new();
        let mut appended: usize = 0;
        let mut i = 0;
        loop {
            let next = if i < self.digits.len() {
                self.digits[i]
            } else {
                appended += 1;
                0
            };
            i += 1;
            rem.push(next);
            rem = strip_leading(rem);
            let mut digit = 0u8;
            while cmp_digits(&rem, &other.digits) != Ordering::Less {
                rem = sub_digits(&rem, &other.digits);
                digit += 1;
            }
            quotient.push(digit);
            if i >= self.digits.len() && rem.is_empty() {
                break;
            }
            if appended >= MAX_DIV_EXTRA_DIGITS {
                break;
            }
        }
        let exp = self.exp - other.exp - appended as i64;
        Ok(Decimal::make(self.neg != other.neg, quotient, exp))
    }

    /// Round half-up to `figs` significant figures. Numbers already at or
    /// below the requested precision are returned unchanged.
    pub fn round_sig_figs(&self, figs: u32) -> Decimal {
        let figs = figs as usize;
        if figs == 0 || self.digits.len() <= figs {
            return self.clone();
        }
        let dropped = self.digits.len() - figs;
        let mut kept = self.digits[..figs].to_vec();
        if self.digits[figs] >= 5 {
            kept = add_digits(&kept, &[1]);
        }
        Decimal::make(self.neg, kept, self.exp + dropped as i64)
    }

    fn make(neg: bool, digits: Vec<u8>, mut exp: i64) -> Decimal {
        let mut digits = strip_leading(digits);
        while digits.last() == Some(&0) {
            digits.pop();
            exp += 1;
        }
        if digits.is_empty() {
            return Decimal::zero();
        }
        Decimal { neg, digits, exp }
    }

    /// Digits rescaled so the number reads `digits * 10^target_exp`.
    /// `target_exp` must not exceed `self.exp`.
    fn scaled_digits(&self, target_exp: i64) -> Vec<u8> {
        let pad = (self.exp - target_exp) as usize;
        let mut out = self.digits.clone();
        out.extend(std::iter::repeat(0).take(pad));
        out
    }

    /// Position of the most significant digit: the value's magnitude lies
    /// in `[10^(pos-1), 10^pos)`.
    fn msd_pos(&self) -> i64 {
        self.digits.len() as i64 + self.exp
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => Ordering::Equal,
            (true, false) => {
                if other.neg {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (false, true) => {
                if self.neg {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (false, false) => match (self.neg, other.neg) {
                (false, false) => cmp_magnitude(self, other),
                (true, true) => cmp_magnitude(other, self),
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
            },
        }
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        if self.neg {
            write!(f, "-")?;
        }
        let rendered: String = self.digits.iter().map(|d| char::from(b'0' + d)).collect();
        if self.exp >= 0 {
            write!(f, "{rendered}")?;
            for _ in 0..self.exp {
                write!(f, "0")?;
            }
            return Ok(());
        }
        let frac_len = (-self.exp) as usize;
        if rendered.len() > frac_len {
            let (int_part, frac_part) = rendered.split_at(rendered.len() - frac_len);
            write!(f, "{int_part}.{frac_part}")
        } else {
            write!(f, "0.")?;
            for _ in 0..(frac_len - rendered.len()) {
                write!(f, "0")?;
            }
            write!(f, "{rendered}")
        }
    }
}

// Digit-vector helpers. Vectors are most-significant-first; the empty
// vector is zero. Inputs and outputs carry no leading zeros.

fn strip_leading(mut digits: Vec<u8>) -> Vec<u8> {
    let nonzero = digits.iter().position(|&d| d != 0);
    match nonzero {
        Some(0) => digits,
        Some(n) => digits.split_off(n),
        None => Vec::new(),
    }
}

fn cmp_digits(a: &[u8], b: &[u8]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn add_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(a.len().max(b.len()) + 1);
    let mut carry = 0u8;
    let mut ia = a.iter().rev();
    let mut ib = b.iter().rev();
    loop {
        match (ia.next(), ib.next(), carry) {
            (None, None, 0) => break,
            (da, db, _) => {
                let sum = da.copied().unwrap_or(0) + db.copied().unwrap_or(0) + carry;
                out.push(sum % 10);
                carry = sum / 10;
            }
        }
    }
    out.reverse();
    strip_leading(out)
}

/// `a - b`, requiring `a >= b`.
fn sub_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    debug_assert!(cmp_digits(a, b) != Ordering::Less);
    let mut out = Vec::with_capacity(a.len());
    let mut borrow = 0u8;
    let mut ib = b.iter().rev();
    for &da in a.iter().rev() {
        let db = ib.next().copied().unwrap_or(0) + borrow;
        if da >= db {
            out.push(da - db);
            borrow = 0;
        } else {
            out.push(da + 10 - db);
            borrow = 1;
        }
    }
    out.reverse();
    strip_leading(out)
}

fn mul_digits(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut acc = vec![0u32; a.len() + b.len()];
    for (i, &da) in a.iter().rev().enumerate() {
        for (j, &db) in b.iter().rev().enumerate() {
            acc[i + j] += u32::from(da) * u32::from(db);
        }
    }
    let mut out = Vec::with_capacity(acc.len());
    let mut carry = 0u32;
    for cell in acc {
        let total = cell + carry;
        out.push((total % 10) as u8);
        carry = total / 10;
    }
    while carry > 0 {
        out.push((carry % 10) as u8);
        carry /= 10;
    }
    out.reverse();
    strip_leading(out)
}

// Both inputs non-zero and positive.
fn cmp_magnitude(a: &Decimal, b: &Decimal) -> Ordering {
    let by_pos = a.msd_pos().cmp(&b.msd_pos());
    if by_pos != Ordering::Equal {
        return by_pos;
    }
    let n = a.digits.len().max(b.digits.len());
    for i in 0..n {
        let da = a.digits.get(i).copied().unwrap_or(0);
        let db = b.digits.get(i).copied().unwrap_or(0);
        if da != db {
            return da.cmp(&db);
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn d(text: &str) -> Decimal {
        match Decimal::parse(text) {
            Ok(value) => value,
            Err(err) => panic!("parse {text}: {err}"),
        }
    }

    #[test]
    fn parse_and_display_round_trip() {
        for text in [
            "0",
            "1",
            "-1",
            "42",
            "5.1",
            "-0.001",
            "100000000000000000000",
            "115792089237316195423570985008687907853269984665640564039457584007913129639935",
        ] {
            assert_eq!(d(text).to_string(), text);
        }
    }

    #[test]
    fn parse_normalizes() {
        assert_eq!(d("5.1000"), d("5.1"));
        assert_eq!(d("007"), d("7"));
        assert_eq!(d("-0"), d("0"));
        assert_eq!(d("+3"), d("3"));
        assert_eq!(d("100e18").to_string(), "100000000000000000000");
        assert_eq!(d("2.5e2"), d("250"));
        assert_eq!(d("25e-1"), d("2.5"));
        assert_eq!(Decimal::pow10(-3), d("0.001"));
        assert_eq!(Decimal::pow10(18), d("1e18"));
    }

    #[test]
    fn parse_rejects_garbage() {
        for text in ["", "abc", "1.2.3", "0x10", "5e", "--1", "."] {
            assert!(Decimal::parse(text).is_err(), "accepted {text:?}");
        }
    }

    #[test]
    fn addition_and_subtraction() {
        assert_eq!(d("1.5").add(&d("2.5")), d("4"));
        assert_eq!(d("1").sub(&d("2.5")), d("-1.5"));
        assert_eq!(d("-3").add(&d("3")), d("0"));
        assert_eq!(d("1e18").add(&d("1")), d("1000000000000000001"));
    }

    #[test]
    fn multiplication() {
        assert_eq!(d("12").mul(&d("12")), d("144"));
        assert_eq!(d("-0.5").mul(&d("0.5")), d("-0.25"));
        assert_eq!(d("1e10").mul(&d("1e10")), d("1e20"));
        assert_eq!(d("0").mul(&d("123")), d("0"));
    }

    #[test]
    fn division_exact_and_truncated() {
        let exact = d("1").div(&d("8"));
        assert_eq!(exact, Ok(d("0.125")));
        let thirds = match d("1").div(&d("3")) {
            Ok(value) => value,
            Err(err) => panic!("div: {err}"),
        };
        // Truncated toward zero after 36 extra digits.
        assert_eq!(thirds.to_string(), format!("0.{}", "3".repeat(36)));
        assert!(d("1").div(&d("0")).is_err());
    }

    #[test]
    fn ordering() {
        assert!(d("2") > d("1.9999"));
        assert!(d("-2") < d("-1"));
        assert!(d("-1") < d("0.001"));
        assert_eq!(d("10").cmp(&d("1e1")), Ordering::Equal);
        assert!(d("1e18") > d("999999999999999999"));
    }

    #[test]
    fn sig_fig_rounding() {
        assert_eq!(d("5.1004").round_sig_figs(3), d("5.10"));
        assert_eq!(d("5.1005").round_sig_figs(4), d("5.101"));
        assert_eq!(d("9.99").round_sig_figs(2), d("10"));
        assert_eq!(d("5.1").round_sig_figs(5), d("5.1"));
        assert_eq!(d("-1235").round_sig_figs(3), d("-1240"));
    }

    #[test]
    fn uint256_max_survives_arithmetic() {
        let max = d("115792089237316195423570985008687907853269984665640564039457584007913129639935");
        let plus_one = max.add(&d("1"));
        assert_eq!(
            plus_one.to_string(),
            "115792089237316195423570985008687907853269984665640564039457584007913129639936"
        );
        assert_eq!(plus_one.sub(&d("1")), max);
    }
}
