use std::cmp::Ordering;

/// Sign of a predicate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    /// Classifies a predicate value. NaN is reported as `Zero`.
    #[inline(always)]
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    pub fn as_i32(self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }
}

impl From<Ordering> for Sign {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Sign::Positive,
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_signed_zero_as_zero() {
        assert_eq!(Sign::of(-0.0), Sign::Zero);
        assert_eq!(Sign::of(0.0), Sign::Zero);
        assert_eq!(Sign::of(f64::MIN_POSITIVE), Sign::Positive);
        assert_eq!(Sign::of(-1.0e-300), Sign::Negative);
    }

    #[test]
    fn reversal_and_ordering_agree() {
        assert_eq!(Sign::from(1.cmp(&2)), Sign::Negative);
        assert_eq!(Sign::from(2.cmp(&1)).reversed(), Sign::Negative);
        assert_eq!(Sign::Positive.as_i32(), 1);
    }
}
