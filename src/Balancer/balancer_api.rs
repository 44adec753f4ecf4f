//! Entry point of the balancer: string in, annotated balanced equation out.
//!
//! ```
//! use chem_balancer::Balancer::balancer_api::balance;
//! assert_eq!(balance("Fe + O2 = Fe2O3").unwrap(), "4 Fe + 3 O2 = 2 Fe2O3");
//! ```
use super::equation_decomposer::{decompose, is_balanced};
use super::equation_formatter::{PhaseTables, format_equation};
use super::formula_parser::parse_vector_of_formulas;
use super::normalizer::normalize;
use super::rational_solver::solve_homogeneous;
use super::stoich_matrix::StoichiometricMatrix;
use crate::settings::BalancerConfig;
use log::{error, info, warn};
use num_bigint::BigUint;
use std::sync::Arc;
use thiserror::Error;

/// error types of the balancer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    /// the equation cannot be split into two non-empty '+'-separated sides
    #[error("unreadable equation `{equation}`: {reason}")]
    MalformedEquation { equation: String, reason: String },
    /// elimination found no usable solution; not expected for a coherent equation
    #[error("no solution for the system of element balances: {0}")]
    UnsolvableSystem(String),
}

impl BalanceError {
    /// true for errors that point at a defect rather than at bad input
    pub fn is_fatal(&self) -> bool {
        matches!(self, BalanceError::UnsolvableSystem(_))
    }
}

/// Everything produced while balancing one equation
#[derive(Debug, Clone)]
pub struct BalancedEquation {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
    /// None when the equation was rendered as written (unbalanced brackets)
    pub coefficients: Option<Vec<BigUint>>,
    pub matrix: Option<StoichiometricMatrix>,
    pub text: String,
}

impl BalancedEquation {
    /// true when the text is just the input with phase tags, no balancing was done
    pub fn is_passthrough(&self) -> bool {
        self.coefficients.is_none()
    }

    /// all formulas, reactants first
    pub fn compounds(&self) -> Vec<String> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct EquationBalancer {
    reduce_by_gcd: bool,
    phases: Arc<PhaseTables>,
}

impl Default for EquationBalancer {
    fn default() -> Self {
        Self::new()
    }
}

impl EquationBalancer {
    /// balancer with the built-in phase lists and the GCD reduction on
    pub fn new() -> Self {
        Self {
            reduce_by_gcd: true,
            phases: PhaseTables::builtin(),
        }
    }

    pub fn with_config(config: &BalancerConfig) -> Self {
        let phases = if config.extra_gases.is_empty() && config.extra_sediments.is_empty() {
            PhaseTables::builtin()
        } else {
            Arc::new(PhaseTables::with_extras(
                &config.extra_gases,
                &config.extra_sediments,
            ))
        };
        Self {
            reduce_by_gcd: config.reduce_by_gcd,
            phases,
        }
    }

    pub fn phases(&self) -> &PhaseTables {
        &self.phases
    }

    pub fn balance(&self, equation: &str) -> Result<String, BalanceError> {
        self.balance_detailed(equation).map(|balanced| balanced.text)
    }

    /// Runs the whole pipeline and keeps the intermediate results.
    /// If the round brackets of the equation are not balanced the formulas cannot be trusted,
    /// so the equation is rendered as written (with phase tags) instead of being solved.
    pub fn balance_detailed(&self, equation: &str) -> Result<BalancedEquation, BalanceError> {
        let sides = decompose(equation)?;
        if !is_balanced(equation) {
            warn!(
                "brackets in '{}' are not balanced, equation is left as written",
                equation
            );
            let text = format_equation(&sides.reactants, &sides.products, None, &self.phases);
            return Ok(BalancedEquation {
                reactants: sides.reactants,
                products: sides.products,
                coefficients: None,
                matrix: None,
                text,
            });
        }

        let reactant_counts = parse_vector_of_formulas(&sides.reactants);
        let product_counts = parse_vector_of_formulas(&sides.products);
        let matrix = StoichiometricMatrix::from_compositions(&reactant_counts, &product_counts);
        if !matrix.dropped_elements.is_empty() {
            warn!(
                "elements {:?} occur only among products of '{}' and are not balanced",
                matrix.dropped_elements, equation
            );
        }

        let solution = solve_homogeneous(matrix.augmented_system())?;
        let coefficients = normalize(&solution, self.reduce_by_gcd)?;
        if !matrix.is_conserved(&coefficients) {
            let reason = format!("coefficients {:?} do not conserve atoms", coefficients);
            error!("{}", reason);
            return Err(BalanceError::UnsolvableSystem(reason));
        }

        let text = format_equation(
            &sides.reactants,
            &sides.products,
            Some(coefficients.as_slice()),
            &self.phases,
        );
        info!("balanced '{}' -> '{}'", equation, text);
        Ok(BalancedEquation {
            reactants: sides.reactants,
            products: sides.products,
            coefficients: Some(coefficients),
            matrix: Some(matrix),
            text,
        })
    }
}

/// Balances an equation with the default settings.
pub fn balance(equation: &str) -> Result<String, BalanceError> {
    EquationBalancer::new().balance(equation)
}
