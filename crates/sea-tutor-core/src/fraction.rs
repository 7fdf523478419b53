//! Exact rational arithmetic for the fraction generators and the checker.
//!
//! A [`Fraction`] is always stored in lowest terms with a positive
//! denominator, so derived equality is value equality.

use std::cmp::Ordering;
use std::fmt;

/// Greatest common divisor (always non-negative).
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Least common multiple of two non-zero integers.
pub fn lcm(a: i64, b: i64) -> i64 {
    if a == 0 || b == 0 {
        return 0;
    }
    (a / gcd(a, b) * b).abs()
}

/// A reduced rational number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    /// Build a fraction in lowest terms. Returns `None` for a zero
    /// denominator, or when either part is `i64::MIN` (no positive twin).
    pub fn new(numerator: i64, denominator: i64) -> Option<Self> {
        if denominator == 0 || numerator == i64::MIN || denominator == i64::MIN {
            return None;
        }
        let sign = if denominator < 0 { -1 } else { 1 };
        let g = gcd(numerator, denominator).max(1);
        Some(Self {
            numerator: sign * numerator / g,
            denominator: sign * denominator / g,
        })
    }

    /// A fraction the caller already knows is in lowest terms with a
    /// positive denominator. Used for hard-coded fallback instances.
    pub(crate) const fn from_reduced(numerator: i64, denominator: i64) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// A whole number as a fraction over 1.
    pub fn whole(value: i64) -> Self {
        Self {
            numerator: value,
            denominator: 1,
        }
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_whole(&self) -> bool {
        self.denominator == 1
    }

    pub fn is_positive(&self) -> bool {
        self.numerator > 0
    }

    /// Sum over the least common denominator.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        let common = lcm(self.denominator, other.denominator);
        let lhs = self.numerator.checked_mul(common / self.denominator)?;
        let rhs = other.numerator.checked_mul(common / other.denominator)?;
        Self::new(lhs.checked_add(rhs)?, common)
    }

    /// Difference over the least common denominator.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.checked_add(Self {
            numerator: -other.numerator,
            denominator: other.denominator,
        })
    }

    /// Multiply by a whole number.
    pub fn checked_mul_int(self, factor: i64) -> Option<Self> {
        Self::new(self.numerator.checked_mul(factor)?, self.denominator)
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.numerator as i128 * other.denominator as i128;
        let rhs = other.numerator as i128 * self.denominator as i128;
        lhs.cmp(&rhs)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}
