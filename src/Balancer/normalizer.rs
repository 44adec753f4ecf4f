use super::balancer_api::BalanceError;
use super::rational_solver::NullSpaceVector;
use log::{debug, error};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Zero};

/// least common multiple of the denominators
pub fn denominators_lcm(values: &[BigRational]) -> BigInt {
    values
        .iter()
        .fold(BigInt::one(), |lcm, value| lcm.lcm(value.denom()))
}

/// Turns a rational null-space vector into integer stoichiometric coefficients.
/// Every value is multiplied by the LCM of the denominators and its absolute value is taken;
/// the LCM itself becomes the coefficient of the free unknown. With `reduce_by_gcd` the
/// result is divided by the GCD of all coefficients.
/// A zero coefficient means the compound takes no part in the reaction and is reported as
/// an unsolvable system.
pub fn normalize(solution: &NullSpaceVector, reduce_by_gcd: bool) -> Result<Vec<BigUint>, BalanceError> {
    let lcm = denominators_lcm(&solution.values);
    let scale = BigRational::from_integer(lcm.clone());
    let mut coefficients: Vec<BigUint> = solution
        .values
        .iter()
        .map(|value| (value * &scale).to_integer().magnitude().clone())
        .collect();
    let free_column = solution.free_column.min(coefficients.len());
    coefficients.insert(free_column, lcm.magnitude().clone());

    if let Some(position) = coefficients.iter().position(|c| c.is_zero()) {
        let reason = format!("compound #{} gets a zero coefficient", position + 1);
        error!("{}", reason);
        return Err(BalanceError::UnsolvableSystem(reason));
    }

    if reduce_by_gcd {
        let gcd = coefficients
            .iter()
            .fold(BigUint::zero(), |gcd, c| gcd.gcd(c));
        if gcd > BigUint::one() {
            debug!("coefficients reduced by common factor {}", gcd);
            for c in coefficients.iter_mut() {
                *c = &*c / &gcd;
            }
        }
    }
    Ok(coefficients)
}
