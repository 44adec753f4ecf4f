//! Module to calculate the atomic composition of a chemical formula
//!
//! The formula is scanned from the last character to the first. Reading in this direction
//! a digit run always belongs to the symbol or group that precedes it, an uppercase letter
//! always closes a symbol and a closing bracket always opens a group, so no lookahead is needed.
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use std::collections::HashMap;

/// element symbol -> number of atoms, unbounded
pub type ElementCounts = HashMap<String, BigUint>;

// digits collected right-to-left, "" means an implicit 1
fn read_count(digits: &str) -> BigUint {
    if digits.is_empty() {
        return BigUint::one();
    }
    digits.parse().unwrap_or_else(|_| BigUint::one())
}

/// Parse a chemical formula and return a HashMap of elements and their counts.
/// Groups in brackets may be nested, their multipliers are multiplied into every element inside.
/// The same element may occur several times in a formula (CH3COOH), counts add up.
/// Counts have no upper limit.
/// Characters other than ASCII letters, digits and round brackets are skipped, so a malformed
/// formula gives an incomplete composition rather than an error.
/// # Example
/// ```
/// use chem_balancer::Balancer::formula_parser::parse_formula;
/// use num_bigint::BigUint;
/// let composition = parse_formula("Ca3(PO4)2");
/// assert_eq!(composition["Ca"], BigUint::from(3u32));
/// assert_eq!(composition["P"], BigUint::from(2u32));
/// assert_eq!(composition["O"], BigUint::from(8u32));
/// ```
pub fn parse_formula(formula: &str) -> ElementCounts {
    let mut counts: ElementCounts = HashMap::new();
    // one entry per open group, already multiplied by all enclosing groups
    let mut multipliers: Vec<BigUint> = Vec::new();
    let mut digits = String::new();
    let mut symbol = String::new();

    for c in formula.chars().rev() {
        match c {
            '0'..='9' => digits.insert(0, c),
            ')' => {
                let multiplier = match multipliers.last() {
                    Some(outer) => read_count(&digits) * outer,
                    None => read_count(&digits),
                };
                multipliers.push(multiplier);
                digits.clear();
            }
            '(' => {
                multipliers.pop();
            }
            'a'..='z' => symbol.insert(0, c),
            'A'..='Z' => {
                symbol.insert(0, c);
                let count = match multipliers.last() {
                    Some(group) => read_count(&digits) * group,
                    None => read_count(&digits),
                };
                let element = std::mem::take(&mut symbol);
                if !count.is_zero() {
                    *counts.entry(element).or_default() += count;
                }
                digits.clear();
            }
            _ => {}
        }
    }
    debug!("formula {} parsed into {:?}", formula, counts);
    counts
}

/// Atomic compositions of a vector of formulas, in the same order
pub fn parse_vector_of_formulas(vec_of_formulae: &[String]) -> Vec<ElementCounts> {
    vec_of_formulae
        .iter()
        .map(|formula| parse_formula(formula))
        .collect()
}
