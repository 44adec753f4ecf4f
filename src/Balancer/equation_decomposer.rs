use super::balancer_api::BalanceError;

/// reactants and products of an equation as they were written, whitespace removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EquationSides {
    pub reactants: Vec<String>,
    pub products: Vec<String>,
}

impl EquationSides {
    /// all formulas, reactants first
    pub fn compounds(&self) -> Vec<String> {
        self.reactants
            .iter()
            .chain(self.products.iter())
            .cloned()
            .collect()
    }
}

/// Checks that round brackets in the string are balanced: no closing bracket without an
/// opening one before it and nothing left open at the end.
pub fn is_balanced(equation: &str) -> bool {
    let mut depth: usize = 0;
    for c in equation.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

fn split_side(side: &str, equation: &str, name: &str) -> Result<Vec<String>, BalanceError> {
    let formulas: Vec<String> = side.split('+').map(|s| s.to_string()).collect();
    if formulas.iter().any(|f| f.is_empty()) {
        return Err(BalanceError::MalformedEquation {
            equation: equation.to_string(),
            reason: format!("{} side contains an empty formula", name),
        });
    }
    Ok(formulas)
}

/// Splits "A + B = C + D" into reactants [A, B] and products [C, D].
/// All whitespace is removed first. The equation must contain exactly one '=' and every
/// '+'-separated formula on both sides must be non-empty.
pub fn decompose(equation: &str) -> Result<EquationSides, BalanceError> {
    let stripped: String = equation.chars().filter(|c| !c.is_whitespace()).collect();
    let sides: Vec<&str> = stripped.split('=').collect();
    if sides.len() != 2 {
        return Err(BalanceError::MalformedEquation {
            equation: equation.to_string(),
            reason: format!(
                "expected exactly one '=' separator, found {}",
                sides.len() - 1
            ),
        });
    }
    let reactants = split_side(sides[0], equation, "left")?;
    let products = split_side(sides[1], equation, "right")?;
    Ok(EquationSides {
        reactants,
        products,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced("Mg(OH)2 + H3PO4 = H2O + Mg3(PO4)2"));
        assert!(is_balanced("H2 + O2 = H2O"));
        assert!(is_balanced("A((BC2)3)2 = X"));
        assert!(!is_balanced("Mg(OH2 = MgO + H2O"));
        assert!(!is_balanced("MgOH)2 = MgO + H2O"));
        // closing bracket before any opening one fails even if the totals match
        assert!(!is_balanced(")Mg(OH2 = MgO + H2O"));
    }

    #[test]
    fn test_decompose() {
        let sides = decompose("NaOH + H2SO4 = Na2SO4 + H2O").unwrap();
        assert_eq!(sides.reactants, vec!["NaOH", "H2SO4"]);
        assert_eq!(sides.products, vec!["Na2SO4", "H2O"]);
        assert_eq!(
            sides.compounds(),
            vec!["NaOH", "H2SO4", "Na2SO4", "H2O"]
        );
    }

    #[test]
    fn test_decompose_strips_whitespace() {
        let sides = decompose("  Fe+O2 =\tFe2 O3 ").unwrap();
        assert_eq!(sides.reactants, vec!["Fe", "O2"]);
        assert_eq!(sides.products, vec!["Fe2O3"]);
    }

    #[test]
    fn test_decompose_malformed() {
        for equation in [
            "H2 + O2",
            "H2 + O2 = H2O = H2O2",
            "= H2O",
            "H2 + O2 =",
            "H2 + = H2O",
            "H2 + O2 = H2O +",
            "",
        ] {
            let result = decompose(equation);
            assert!(
                matches!(result, Err(BalanceError::MalformedEquation { .. })),
                "{} should be rejected",
                equation
            );
        }
    }
}
