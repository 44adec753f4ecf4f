//! Rendering of a balanced equation.
//!
//! Products that are known gases get a `[G]` tag, known precipitates (sediments) get `[S]`.
//! The lists are only cosmetic, they take no part in balancing. Coefficient 1 is not printed.
//!
//! `parse_balanced` goes the other way and reads coefficients and formulas back from a
//! rendered equation.
use super::balancer_api::BalanceError;
use num_bigint::BigUint;
use num_traits::One;
use regex::Regex;
use std::collections::HashSet;
use std::sync::{Arc, LazyLock, OnceLock};

pub const GASES: &[&str] = &[
    "NH3", "AsH3", "CH4", "C6H6", "N2", "CO", "CCl4", "F2", "ClO2", "C2H4", "Cl2", "H2", "H2S",
    "NO", "NO2", "O3", "SO2", "O2", "CO2", "C2H2", "N2O5", "SO3",
];

pub const SEDIMENTS: &[&str] = &[
    "Mg(OH)2", "Al(OH)3", "Sn(OH)2", "Pb(OH)2", "Cr(OH)3", "Mn(OH)2", "Fe(OH)2", "Fe(OH)3",
    "Co(OH)2", "Ni(OH)2", "Cu(OH)2", "Zn(OH)2", "Cd(OH)2", "CaF2", "SrF2", "HgF2", "AgCl",
    "AgBr", "AgI", "HgI2", "SrSO4", "BaSO4", "PbSO4", "HgSO4", "CaSO3", "SrSO3", "SnSO3",
    "PbSO3", "MnSO3", "FeSO3", "CoSO3", "NiSO3", "Ag2SO3", "SrS", "SnS", "PbS", "MnS", "FeS",
    "Fe2S3", "CoS", "NiS", "CuS", "Ag2S", "ZnS", "CdS", "HgS", "Sn(NO3)2", "Li3PO4",
    "Ca3(PO4)2", "Sr3(PO4)2", "Ba3(PO4)2", "AlPO4", "Sn3(PO4)2", "Pb3(PO4)2", "CrPO4",
    "Mn3(PO4)2", "Fe3(PO4)2", "FePO4", "Co3(PO4)2", "Cu3(PO4)2", "Ni3(PO4)2", "Ag3PO4",
    "Zn3(PO4)2", "Cd3(PO4)2", "Hg3(PO4)2", "CaCO3", "SrCO3", "BaCO3", "SnCO3", "PbCO3",
    "MnCO3", "FeCO3", "CoCO3", "NiCO3", "Ag2CO3", "ZnCO3", "CdCO3", "HgCO3", "H2SiO3",
    "MgSiO3", "CaSiO3", "SrSiO3", "BaSiO3", "Al2(SiO3)3", "SnSiO3", "PbSiO3", "FeSiO3",
    "CoSiO3", "CdSiO3",
];

/// Phase enum: gas or precipitate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Gas,
    Sediment,
}

impl Phase {
    pub fn tag(&self) -> &'static str {
        match self {
            Phase::Gas => "[G]",
            Phase::Sediment => "[S]",
        }
    }
}

/// Lookup sets of formulas that get a phase tag when they appear among products
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTables {
    gases: HashSet<String>,
    sediments: HashSet<String>,
}

static BUILTIN_PHASES: OnceLock<Arc<PhaseTables>> = OnceLock::new();

impl PhaseTables {
    /// the built-in lists, created once per process
    pub fn builtin() -> Arc<PhaseTables> {
        BUILTIN_PHASES
            .get_or_init(|| Arc::new(Self::with_extras(&[], &[])))
            .clone()
    }

    /// built-in lists plus user-supplied formulas
    pub fn with_extras(extra_gases: &[String], extra_sediments: &[String]) -> Self {
        let gases = GASES
            .iter()
            .map(|s| s.to_string())
            .chain(extra_gases.iter().cloned())
            .collect();
        let sediments = SEDIMENTS
            .iter()
            .map(|s| s.to_string())
            .chain(extra_sediments.iter().cloned())
            .collect();
        Self { gases, sediments }
    }

    pub fn phases_of(&self, formula: &str) -> Vec<Phase> {
        let mut phases = Vec::new();
        if self.gases.contains(formula) {
            phases.push(Phase::Gas);
        }
        if self.sediments.contains(formula) {
            phases.push(Phase::Sediment);
        }
        phases
    }

    /// formula with its phase tags appended, e.g. "CO2[G]"
    pub fn annotate(&self, formula: &str) -> String {
        let mut annotated = formula.to_string();
        for phase in self.phases_of(formula) {
            annotated.push_str(phase.tag());
        }
        annotated
    }
}

fn render_term(formula: &str, coefficient: Option<&BigUint>) -> String {
    match coefficient {
        Some(c) if !c.is_one() => format!("{} {}", c, formula),
        _ => formula.to_string(),
    }
}

/// Renders "a A + b B = c C + d D". `coefficients` is aligned with reactants followed by
/// products; `None` renders every compound with an implicit coefficient 1.
pub fn format_equation(
    reactants: &[String],
    products: &[String],
    coefficients: Option<&[BigUint]>,
    phases: &PhaseTables,
) -> String {
    let coefficient = |i: usize| coefficients.and_then(|c| c.get(i));
    let left: Vec<String> = reactants
        .iter()
        .enumerate()
        .map(|(i, formula)| render_term(formula, coefficient(i)))
        .collect();
    let right: Vec<String> = products
        .iter()
        .enumerate()
        .map(|(i, formula)| render_term(&phases.annotate(formula), coefficient(reactants.len() + i)))
        .collect();
    format!("{} = {}", left.join(" + "), right.join(" + "))
}

/// one side of a rendered equation: (coefficient, formula without phase tags)
pub type RenderedSide = Vec<(BigUint, String)>;

static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\d+)\s+)?([A-Za-z0-9()]+?)((?:\[[GS]\])*)$").expect("term pattern is valid")
});

fn parse_side(side: &str, equation: &str) -> Result<RenderedSide, BalanceError> {
    side.split('+')
        .map(|term| -> Result<(BigUint, String), BalanceError> {
            let term = term.trim();
            let caps = TERM_RE
                .captures(term)
                .ok_or_else(|| BalanceError::MalformedEquation {
                    equation: equation.to_string(),
                    reason: format!("cannot read term '{}'", term),
                })?;
            let coefficient = match caps.get(1) {
                Some(digits) => digits.as_str().parse::<BigUint>().map_err(|e| {
                    BalanceError::MalformedEquation {
                        equation: equation.to_string(),
                        reason: format!("bad coefficient '{}': {}", digits.as_str(), e),
                    }
                })?,
                None => BigUint::one(),
            };
            Ok((coefficient, caps[2].to_string()))
        })
        .collect()
}

/// Reads a rendered equation such as "2 H2 + O2 = 2 H2O" back into its two sides.
pub fn parse_balanced(equation: &str) -> Result<(RenderedSide, RenderedSide), BalanceError> {
    let sides: Vec<&str> = equation.split('=').collect();
    if sides.len() != 2 {
        return Err(BalanceError::MalformedEquation {
            equation: equation.to_string(),
            reason: "expected exactly one '=' separator".to_string(),
        });
    }
    Ok((parse_side(sides[0], equation)?, parse_side(sides[1], equation)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn big(values: &[u32]) -> Vec<BigUint> {
        values.iter().map(|&v| BigUint::from(v)).collect()
    }

    #[test]
    fn test_phase_tags() {
        let phases = PhaseTables::builtin();
        assert_eq!(phases.annotate("CO2"), "CO2[G]");
        assert_eq!(phases.annotate("AgCl"), "AgCl[S]");
        assert_eq!(phases.annotate("Ca3(PO4)2"), "Ca3(PO4)2[S]");
        assert_eq!(phases.annotate("H2O"), "H2O");
        assert_eq!(phases.phases_of("H2"), vec![Phase::Gas]);
        assert!(phases.phases_of("NaCl").is_empty());
    }

    #[test]
    fn test_extra_phases() {
        let phases = PhaseTables::with_extras(&strings(&["He"]), &strings(&["PbI2"]));
        assert_eq!(phases.annotate("He"), "He[G]");
        assert_eq!(phases.annotate("PbI2"), "PbI2[S]");
        assert_eq!(phases.annotate("CO2"), "CO2[G]");
        assert_eq!(PhaseTables::builtin().annotate("He"), "He");
    }

    #[test]
    fn test_format_equation() {
        let phases = PhaseTables::builtin();
        let text = format_equation(
            &strings(&["H2", "O2"]),
            &strings(&["H2O"]),
            Some(big(&[2, 1, 2]).as_slice()),
            &phases,
        );
        assert_eq!(text, "2 H2 + O2 = 2 H2O");
    }

    #[test]
    fn test_only_products_are_tagged() {
        let phases = PhaseTables::builtin();
        let text = format_equation(
            &strings(&["CH4", "O2"]),
            &strings(&["CO2", "H2O"]),
            Some(big(&[1, 2, 1, 2]).as_slice()),
            &phases,
        );
        assert_eq!(text, "CH4 + 2 O2 = CO2[G] + 2 H2O");
    }

    #[test]
    fn test_format_without_coefficients() {
        let phases = PhaseTables::builtin();
        let text = format_equation(
            &strings(&["Ca(OH2"]),
            &strings(&["CaCO3", "H2O"]),
            None,
            &phases,
        );
        assert_eq!(text, "Ca(OH2 = CaCO3[S] + H2O");
    }

    #[test]
    fn test_parse_balanced() {
        let (left, right) = parse_balanced("2 H2 + O2 = 2 H2O").unwrap();
        assert_eq!(
            left,
            vec![
                (BigUint::from(2u32), "H2".to_string()),
                (BigUint::from(1u32), "O2".to_string())
            ]
        );
        assert_eq!(right, vec![(BigUint::from(2u32), "H2O".to_string())]);

        let (_, right) = parse_balanced("Zn + 2 HCl = ZnCl2 + H2[G]").unwrap();
        assert_eq!(right[1], (BigUint::from(1u32), "H2".to_string()));

        let (_, right) = parse_balanced("3 Mg(OH)2 + 2 H3PO4 = 6 H2O + Mg3(PO4)2").unwrap();
        assert_eq!(right[1], (BigUint::from(1u32), "Mg3(PO4)2".to_string()));
    }

    #[test]
    fn test_parse_balanced_rejects_garbage() {
        assert!(parse_balanced("2 H2 + O2").is_err());
        assert!(parse_balanced("2 H2 + O2 = 2 H2O!").is_err());
        assert!(parse_balanced("two H2 = H2").is_err());
    }
}
