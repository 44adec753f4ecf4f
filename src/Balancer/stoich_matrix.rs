//! Stoichiometric matrix of a single equation.
//!
//! Rows are elements (sorted by symbol), columns are compounds: reactants first, then products,
//! in the order they were written. A reactant contributes +count, a product -count, so a vector
//! of coefficients x balances the equation exactly when `matrix * x = 0`.
//!
//! Only the elements found among the reactants get a row. An element that occurs in products
//! only has no equation in the system; such elements are collected in `dropped_elements` so
//! the caller can report them.
use super::formula_parser::ElementCounts;
use log::debug;
use nalgebra::DMatrix;
use num_bigint::{BigInt, BigUint};
use num_rational::BigRational;
use num_traits::Zero;
use prettytable::{Cell, Row, Table};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct StoichiometricMatrix {
    /// row labels, sorted
    pub elements: Vec<String>,
    /// number of leading columns that belong to reactants
    pub n_reactants: usize,
    /// elements x compounds, exact
    pub matrix: DMatrix<BigInt>,
    /// elements that appear in products but not in any reactant, sorted
    pub dropped_elements: Vec<String>,
}

impl StoichiometricMatrix {
    pub fn from_compositions(reactants: &[ElementCounts], products: &[ElementCounts]) -> Self {
        let elements: Vec<String> = reactants
            .iter()
            .flat_map(|counts| counts.keys().cloned())
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();
        let dropped_elements: Vec<String> = products
            .iter()
            .flat_map(|counts| counts.keys())
            .filter(|el| !elements.contains(el))
            .cloned()
            .collect::<BTreeSet<String>>()
            .into_iter()
            .collect();

        let num_rows = elements.len();
        let num_cols = reactants.len() + products.len();
        let mut matrix = DMatrix::<BigInt>::zeros(num_rows, num_cols);
        let columns = reactants
            .iter()
            .map(|c| (c, false))
            .chain(products.iter().map(|c| (c, true)));
        for (col, (composition, is_product)) in columns.enumerate() {
            for (row, element) in elements.iter().enumerate() {
                if let Some(count) = composition.get(element) {
                    let entry = BigInt::from(count.clone());
                    matrix[(row, col)] = if is_product { -entry } else { entry };
                }
            }
        }
        debug!(
            "stoichiometric matrix {}x{} for elements {:?}",
            num_rows, num_cols, elements
        );
        Self {
            elements,
            n_reactants: reactants.len(),
            matrix,
            dropped_elements,
        }
    }

    pub fn nrows(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.matrix.ncols()
    }

    /// Rows of the homogeneous system `matrix * x = 0` in exact arithmetic, every row ends
    /// with the zero right-hand side.
    pub fn augmented_system(&self) -> Vec<Vec<BigRational>> {
        (0..self.nrows())
            .map(|row| {
                let mut equation: Vec<BigRational> = (0..self.ncols())
                    .map(|col| BigRational::from_integer(self.matrix[(row, col)].clone()))
                    .collect();
                equation.push(BigRational::zero());
                equation
            })
            .collect()
    }

    /// true if every element row sums to zero with the given coefficients
    pub fn is_conserved(&self, coefficients: &[BigUint]) -> bool {
        if coefficients.len() != self.ncols() {
            return false;
        }
        (0..self.nrows()).all(|row| {
            let balance: BigInt = coefficients
                .iter()
                .enumerate()
                .map(|(col, coeff)| &self.matrix[(row, col)] * BigInt::from(coeff.clone()))
                .sum();
            balance.is_zero()
        })
    }

    /// table with elements as rows and the given compound names as columns
    pub fn to_table(&self, compounds: &[String]) -> Table {
        let mut table = Table::new();
        let mut header = vec![Cell::new("Element")];
        header.extend(compounds.iter().map(|name| Cell::new(name)));
        table.add_row(Row::new(header));
        for (row, element) in self.elements.iter().enumerate() {
            let mut cells = vec![Cell::new(element)];
            cells.extend((0..self.ncols()).map(|col| Cell::new(&self.matrix[(row, col)].to_string())));
            table.add_row(Row::new(cells));
        }
        table
    }
}
