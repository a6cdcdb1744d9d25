use std::fmt::Write;

use crate::scheduler::task::{Computation, ComputationError};

/// Limb base for the decimal big-number accumulator (9 digits per limb).
const LIMB_BASE: u128 = 1_000_000_000;

/// Default largest input accepted by [`Factorial`].
pub const DEFAULT_MAX_INPUT: i64 = 20_000;

/// Arbitrary-precision factorial, the CPU-bound work run by each worker.
#[derive(Debug, Clone)]
pub struct Factorial {
    /// Largest accepted input. 0 disables the cap.
    max_input: i64,
}

impl Factorial {
    pub fn new(max_input: i64) -> Self {
        Self { max_input }
    }

    /// A factorial with no input cap.
    pub fn unbounded() -> Self {
        Self { max_input: 0 }
    }

    pub fn max_input(&self) -> i64 {
        self.max_input
    }
}

impl Default for Factorial {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT)
    }
}

impl Computation for Factorial {
    fn name(&self) -> &str {
        "factorial"
    }

    fn compute(&self, input: i64) -> Result<String, ComputationError> {
        if input < 0 {
            return Err(ComputationError::InvalidInput(
                "Factorial not defined for negative numbers".into(),
            ));
        }
        if self.max_input > 0 && input > self.max_input {
            return Err(ComputationError::TooLarge {
                input,
                max: self.max_input,
            });
        }
        Ok(factorial_decimal(input as u64))
    }
}

/// Compute `n!` and render it in base 10.
///
/// Limbs are little-endian base 10^9; products are carried in `u128` so any
/// `u64` multiplier is safe.
pub fn factorial_decimal(n: u64) -> String {
    let mut limbs: Vec<u32> = vec![1];

    for factor in 2..=n {
        let mut carry: u128 = 0;
        for limb in limbs.iter_mut() {
            let product = *limb as u128 * factor as u128 + carry;
            *limb = (product % LIMB_BASE) as u32;
            carry = product / LIMB_BASE;
        }
        while carry > 0 {
            limbs.push((carry % LIMB_BASE) as u32);
            carry /= LIMB_BASE;
        }
    }

    let mut out = String::with_capacity(limbs.len() * 9);
    let mut iter = limbs.iter().rev();
    if let Some(head) = iter.next() {
        let _ = write!(out, "{}", head);
    }
    for limb in iter {
        let _ = write!(out, "{:09}", limb);
    }
    out
}
