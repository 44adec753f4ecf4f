/// Entry point of the balancer. Takes an equation like "Fe + O2 = Fe2O3", runs the pipeline
/// decomposer -> formula parser -> stoichiometric matrix -> rational elimination -> normalizer ->
/// formatter and returns "4 Fe + 3 O2 = 2 Fe2O3". Holds the error type of the whole engine.
///
///  # Examples
/// ```
/// use chem_balancer::Balancer::balancer_api::{EquationBalancer, balance};
/// assert_eq!(balance("H2 + O2 = H2O").unwrap(), "2 H2 + O2 = 2 H2O");
///
/// let balancer = EquationBalancer::new();
/// let balanced = balancer.balance_detailed("NaOH + H2SO4 = Na2SO4 + H2O").unwrap();
/// println!("{:?}", balanced.coefficients);
/// ```
pub mod balancer_api;
/// Splits the equation string into reactants and products, checks round brackets.
pub mod equation_decomposer;
/// Annotated output: coefficients, formulas and [G]/[S] phase tags of the products.
/// Also reads a rendered equation back into coefficients and formulas.
pub mod equation_formatter;
/// Module to calculate the atomic composition of a chemical formula
///
///  # Examples
/// ```
/// use chem_balancer::Balancer::formula_parser::parse_formula;
/// let atomic_composition = parse_formula("Mg(OH)2");
/// println!("{:?}", atomic_composition);
/// ```
pub mod formula_parser;
/// Least common multiple scaling of the rational solution into integer coefficients.
pub mod normalizer;
/// Gauss-Jordan elimination in exact rational arithmetic (num-rational BigRational),
/// finds one vector of the null space of the stoichiometric matrix.
pub mod rational_solver;
/// eng
/// The module takes the atomic compositions of reactants and products and produces
/// 1) the stoichiometric matrix, elements x compounds, reactants positive and products negative
/// 2) the vector of elements (rows of the matrix)
/// 3) the augmented homogeneous system for the solver
pub mod stoich_matrix;
