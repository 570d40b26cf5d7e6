//! Linear constraint types for the lineup model.
//!
//! A constraint row is dense: one coefficient per model variable, in the
//! model's variable order.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single linear constraint: `sum(coefficients[i] * x[i]) {>=, <=, =} rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub coefficients: Vec<Decimal>,
    pub sense: ConstraintSense,
    pub rhs: Decimal,
}

impl Constraint {
    /// Create a >= constraint.
    #[must_use]
    pub const fn geq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::GreaterEqual,
            rhs,
        }
    }

    /// Create a <= constraint.
    #[must_use]
    pub const fn leq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::LessEqual,
            rhs,
        }
    }

    /// Create an = constraint.
    #[must_use]
    pub const fn eq(coefficients: Vec<Decimal>, rhs: Decimal) -> Self {
        Self {
            coefficients,
            sense: ConstraintSense::Equal,
            rhs,
        }
    }

    /// Left-hand side evaluated at a point.
    #[must_use]
    pub fn lhs(&self, values: &[Decimal]) -> Decimal {
        self.coefficients
            .iter()
            .zip(values)
            .map(|(c, v)| c * v)
            .sum()
    }

    /// Whether a point satisfies the constraint within `tolerance`.
    #[must_use]
    pub fn is_satisfied_by(&self, values: &[Decimal], tolerance: Decimal) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            ConstraintSense::GreaterEqual => lhs >= self.rhs - tolerance,
            ConstraintSense::LessEqual => lhs <= self.rhs + tolerance,
            ConstraintSense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

/// Constraint sense (comparison operator).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    GreaterEqual,
    LessEqual,
    Equal,
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreaterEqual => write!(f, ">="),
            Self::LessEqual => write!(f, "<="),
            Self::Equal => write!(f, "="),
        }
    }
}

/// Bounds on a variable. `None` means unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariableBounds {
    pub lower: Option<Decimal>,
    pub upper: Option<Decimal>,
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: None,
        }
    }
}

impl VariableBounds {
    /// Binary variable bounds [0, 1].
    #[must_use]
    pub const fn binary() -> Self {
        Self {
            lower: Some(Decimal::ZERO),
            upper: Some(Decimal::ONE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn satisfaction_respects_sense_and_tolerance() {
        let row = Constraint::leq(vec![dec!(1), dec!(2)], dec!(3));
        assert!(row.is_satisfied_by(&[dec!(1), dec!(1)], Decimal::ZERO));
        assert!(!row.is_satisfied_by(&[dec!(1), dec!(1.1)], Decimal::ZERO));
        assert!(row.is_satisfied_by(&[dec!(1), dec!(1.1)], dec!(0.25)));

        let row = Constraint::geq(vec![dec!(6), dec!(-1)], dec!(0));
        assert!(row.is_satisfied_by(&[dec!(1), dec!(6)], Decimal::ZERO));
        assert!(!row.is_satisfied_by(&[dec!(0), dec!(1)], Decimal::ZERO));

        let row = Constraint::eq(vec![dec!(1); 3], dec!(2));
        assert_eq!(row.lhs(&[dec!(1), dec!(0), dec!(1)]), dec!(2));
        assert!(row.is_satisfied_by(&[dec!(1), dec!(0), dec!(1)], Decimal::ZERO));
    }

    #[test]
    fn sense_displays_as_operator() {
        assert_eq!(ConstraintSense::GreaterEqual.to_string(), ">=");
        assert_eq!(ConstraintSense::LessEqual.to_string(), "<=");
        assert_eq!(ConstraintSense::Equal.to_string(), "=");
    }
}
