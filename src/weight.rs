//! Route cost weights.

use std::fmt;
use std::ops::{Add, AddAssign};

/// Path cost in seconds of travel time.
///
/// Wraps `f64` so edge weights, heuristic estimates and comparison tolerances
/// all share one unit. Weights are finite and non-negative in normal use.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RouteWeight(f64);

impl RouteWeight {
    pub const ZERO: RouteWeight = RouteWeight(0.0);

    pub fn new(seconds: f64) -> Self {
        RouteWeight(seconds)
    }

    pub fn seconds(self) -> f64 {
        self.0
    }

    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }
}

impl Add for RouteWeight {
    type Output = RouteWeight;

    fn add(self, rhs: RouteWeight) -> RouteWeight {
        RouteWeight(self.0 + rhs.0)
    }
}

impl AddAssign for RouteWeight {
    fn add_assign(&mut self, rhs: RouteWeight) {
        self.0 += rhs.0;
    }
}

impl fmt::Display for RouteWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_arithmetic() {
        let mut w = RouteWeight::new(1.5) + RouteWeight::new(2.5);
        assert_eq!(w, RouteWeight::new(4.0));
        w += RouteWeight::new(1.0);
        assert_eq!(w.seconds(), 5.0);
    }

    #[test]
    fn test_weight_ordering() {
        assert!(RouteWeight::ZERO < RouteWeight::new(0.1));
        assert!(RouteWeight::new(2.0) > RouteWeight::new(1.0));
    }
}
