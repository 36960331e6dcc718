//! Pauli-sum operators.
//!
//! An operator is a weighted sum of Pauli strings:
//!
//!   H = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators
//! (I, X, Y, Z) and c_k ∈ ℝ, so H is Hermitian by construction.
//!
//! Labels are written most-significant qubit first: in `"ZZII"` the two
//! rightmost characters act on qubits 0 and 1.
//!
//! # Example
//!
//! ```rust
//! use quvar_ir::PauliOperator;
//!
//! // H = 0.5·Z + 0.5·I on one qubit
//! let h = PauliOperator::from_list([("Z", 0.5), ("I", 0.5)], 1).unwrap();
//! assert_eq!(h.num_terms(), 2);
//! assert_eq!(h.identity_coefficient(), 0.5);
//! ```

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult, MalformedTerm};

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Parse a label character (case-insensitive).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    /// The label character.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Act on a single-qubit basis state `|bit⟩`.
    ///
    /// Returns `(flips, phase)` such that `P|bit⟩ = phase · |bit ⊕ flips⟩`.
    #[inline]
    pub fn act(self, bit: bool) -> (bool, Complex64) {
        match (self, bit) {
            (Pauli::I, _) => (false, Complex64::new(1.0, 0.0)),
            (Pauli::X, _) => (true, Complex64::new(1.0, 0.0)),
            (Pauli::Y, false) => (true, Complex64::new(0.0, 1.0)),
            (Pauli::Y, true) => (true, Complex64::new(0.0, -1.0)),
            (Pauli::Z, false) => (false, Complex64::new(1.0, 0.0)),
            (Pauli::Z, true) => (false, Complex64::new(-1.0, 0.0)),
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A tensor product of one Pauli per qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliString {
    /// `paulis[k]` acts on qubit `k`.
    paulis: Vec<Pauli>,
}

impl PauliString {
    /// Parse a label of exactly `num_qubits` characters.
    pub fn from_label(label: &str, num_qubits: usize) -> Result<Self, MalformedTerm> {
        let len = label.chars().count();
        if len != num_qubits {
            return Err(MalformedTerm::LengthMismatch {
                expected: num_qubits,
                got: len,
            });
        }

        let mut paulis = label
            .chars()
            .map(|c| Pauli::from_char(c).ok_or(MalformedTerm::InvalidPauli(c)))
            .collect::<Result<Vec<_>, _>>()?;
        paulis.reverse();
        Ok(Self { paulis })
    }

    /// The identity string on `num_qubits` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            paulis: vec![Pauli::I; num_qubits],
        }
    }

    /// Number of qubits spanned.
    pub fn num_qubits(&self) -> usize {
        self.paulis.len()
    }

    /// The Pauli acting on `qubit`.
    pub fn get(&self, qubit: usize) -> Option<Pauli> {
        self.paulis.get(qubit).copied()
    }

    /// Non-identity `(qubit, pauli)` pairs in ascending qubit order.
    pub fn ops(&self) -> impl Iterator<Item = (usize, Pauli)> + '_ {
        self.paulis
            .iter()
            .enumerate()
            .filter(|(_, p)| **p != Pauli::I)
            .map(|(q, p)| (q, *p))
    }

    /// True if every factor is the identity.
    pub fn is_identity(&self) -> bool {
        self.paulis.iter().all(|p| *p == Pauli::I)
    }

    /// Act on the basis state `|index⟩`.
    ///
    /// Returns `(image, phase)` such that `P|index⟩ = phase · |image⟩`.
    pub fn apply_to_basis(&self, index: usize) -> (usize, Complex64) {
        let mut image = index;
        let mut phase = Complex64::new(1.0, 0.0);
        for (qubit, pauli) in self.ops() {
            let (flip, factor) = pauli.act((index >> qubit) & 1 == 1);
            if flip {
                image ^= 1 << qubit;
            }
            phase *= factor;
        }
        (image, phase)
    }

    /// The label, most-significant qubit first.
    pub fn label(&self) -> String {
        self.paulis.iter().rev().map(|p| p.as_char()).collect()
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// A single weighted Pauli term: `coeff · pauli`.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliTerm {
    /// Real coefficient.
    pub coeff: f64,
    /// The Pauli string.
    pub pauli: PauliString,
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coeff >= 0.0 {
            write!(f, "+{:.4} * {}", self.coeff, self.pauli)
        } else {
            write!(f, "{:.4} * {}", self.coeff, self.pauli)
        }
    }
}

/// A Hermitian operator written as a sum of weighted Pauli strings.
#[derive(Debug, Clone, PartialEq)]
pub struct PauliOperator {
    num_qubits: usize,
    terms: Vec<PauliTerm>,
}

impl PauliOperator {
    /// Build an operator from `(label, coefficient)` pairs.
    ///
    /// # Errors
    ///
    /// [`IrError::MalformedOperator`] if a label is not exactly `num_qubits`
    /// long, contains a character outside `IXYZ`, or carries a non-finite
    /// coefficient.
    pub fn from_list<I, S>(pairs: I, num_qubits: usize) -> IrResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let terms = pairs
            .into_iter()
            .map(|(label, coeff)| {
                let label = label.as_ref();
                let malformed = |reason| IrError::MalformedOperator {
                    label: label.to_string(),
                    reason,
                };
                let pauli = PauliString::from_label(label, num_qubits).map_err(malformed)?;
                if !coeff.is_finite() {
                    return Err(malformed(MalformedTerm::NonFiniteCoefficient(coeff)));
                }
                Ok(PauliTerm { coeff, pauli })
            })
            .collect::<IrResult<Vec<_>>>()?;

        Ok(Self { num_qubits, terms })
    }

    /// Number of qubits the operator acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of terms.
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// All terms, in construction order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Sum of the coefficients of identity terms.
    pub fn identity_coefficient(&self) -> f64 {
        self.terms
            .iter()
            .filter(|t| t.pauli.is_identity())
            .map(|t| t.coeff)
            .sum()
    }

    /// Σ |c_k|, an upper bound on the spectral norm.
    pub fn lambda(&self) -> f64 {
        self.terms.iter().map(|t| t.coeff.abs()).sum()
    }

    /// `alpha · self`.
    #[must_use]
    pub fn scaled(&self, alpha: f64) -> Self {
        Self {
            num_qubits: self.num_qubits,
            terms: self
                .terms
                .iter()
                .map(|t| PauliTerm {
                    coeff: alpha * t.coeff,
                    pauli: t.pauli.clone(),
                })
                .collect(),
        }
    }

    /// `self + other`, keeping the terms of both operands.
    ///
    /// # Errors
    ///
    /// [`IrError::OperatorSizeMismatch`] if the qubit counts differ.
    pub fn try_add(&self, other: &PauliOperator) -> IrResult<Self> {
        if self.num_qubits != other.num_qubits {
            return Err(IrError::OperatorSizeMismatch {
                left: self.num_qubits,
                right: other.num_qubits,
            });
        }
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Ok(Self {
            num_qubits: self.num_qubits,
            terms,
        })
    }

    /// Merge terms with equal labels and drop those with `|coeff| <= tol`.
    ///
    /// Terms keep the order of their first occurrence.
    #[must_use]
    pub fn simplify(&self, tol: f64) -> Self {
        let mut merged: Vec<PauliTerm> = Vec::with_capacity(self.terms.len());
        for term in &self.terms {
            match merged.iter_mut().find(|m| m.pauli == term.pauli) {
                Some(existing) => existing.coeff += term.coeff,
                None => merged.push(term.clone()),
            }
        }
        merged.retain(|t| t.coeff.abs() > tol);
        Self {
            num_qubits: self.num_qubits,
            terms: merged,
        }
    }

    /// Dense `2^n × 2^n` matrix of the operator.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let dim = 1usize << self.num_qubits;
        let mut matrix = Array2::<Complex64>::zeros((dim, dim));
        for term in &self.terms {
            for col in 0..dim {
                let (row, phase) = term.pauli.apply_to_basis(col);
                matrix[[row, col]] += phase * term.coeff;
            }
        }
        matrix
    }
}

impl fmt::Display for PauliOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Operator ({} terms, {} qubits):",
            self.terms.len(),
            self.num_qubits
        )?;
        for term in &self.terms {
            writeln!(f, "  {term}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_is_little_endian() {
        let ps = PauliString::from_label("XIZ", 3).unwrap();
        assert_eq!(ps.get(0), Some(Pauli::Z));
        assert_eq!(ps.get(1), Some(Pauli::I));
        assert_eq!(ps.get(2), Some(Pauli::X));
        assert_eq!(ps.label(), "XIZ");
        let ops: Vec<_> = ps.ops().collect();
        assert_eq!(ops, vec![(0, Pauli::Z), (2, Pauli::X)]);
    }

    #[test]
    fn test_lowercase_accepted() {
        let ps = PauliString::from_label("zy", 2).unwrap();
        assert_eq!(ps.label(), "ZY");
    }

    #[test]
    fn test_length_mismatch() {
        let err = PauliOperator::from_list([("ZZ", 1.0)], 3).unwrap_err();
        match err {
            IrError::MalformedOperator { label, reason } => {
                assert_eq!(label, "ZZ");
                assert_eq!(
                    reason,
                    MalformedTerm::LengthMismatch {
                        expected: 3,
                        got: 2
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_character() {
        let err = PauliOperator::from_list([("ZA", 1.0)], 2).unwrap_err();
        assert!(matches!(
            err,
            IrError::MalformedOperator {
                reason: MalformedTerm::InvalidPauli('A'),
                ..
            }
        ));
    }

    #[test]
    fn test_non_finite_coefficient() {
        let err = PauliOperator::from_list([("Z", f64::NAN)], 1).unwrap_err();
        assert!(matches!(
            err,
            IrError::MalformedOperator {
                reason: MalformedTerm::NonFiniteCoefficient(_),
                ..
            }
        ));
    }

    #[test]
    fn test_y_action() {
        // Y|0⟩ = i|1⟩, Y|1⟩ = -i|0⟩
        let y = PauliString::from_label("Y", 1).unwrap();
        assert_eq!(y.apply_to_basis(0), (1, Complex64::new(0.0, 1.0)));
        assert_eq!(y.apply_to_basis(1), (0, Complex64::new(0.0, -1.0)));
    }

    #[test]
    fn test_matrix_z_plus_identity() {
        let h = PauliOperator::from_list([("Z", 0.5), ("I", 0.5)], 1).unwrap();
        let m = h.to_matrix();
        assert_eq!(m[[0, 0]], Complex64::new(1.0, 0.0));
        assert_eq!(m[[1, 1]], Complex64::new(0.0, 0.0));
        assert_eq!(m[[0, 1]], Complex64::new(0.0, 0.0));
    }

    #[test]
    fn test_matrix_is_hermitian() {
        let h = PauliOperator::from_list([("XY", 0.7), ("YZ", -1.1), ("ZX", 0.3)], 2).unwrap();
        let m = h.to_matrix();
        for r in 0..4 {
            for c in 0..4 {
                assert!((m[[r, c]] - m[[c, r]].conj()).norm() < 1e-12);
            }
        }
    }

    #[test]
    fn test_scaled_and_added() {
        let a = PauliOperator::from_list([("ZI", 1.0)], 2).unwrap();
        let b = PauliOperator::from_list([("IZ", 2.0)], 2).unwrap();
        let sum = a.scaled(3.0).try_add(&b).unwrap();
        assert_eq!(sum.num_terms(), 2);
        assert_eq!(sum.terms()[0].coeff, 3.0);

        let c = PauliOperator::from_list([("Z", 1.0)], 1).unwrap();
        assert!(matches!(
            a.try_add(&c),
            Err(IrError::OperatorSizeMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_simplify() {
        let h = PauliOperator::from_list(
            [("ZZ", 1.0), ("XI", 0.5), ("ZZ", -1.0), ("XI", 0.25), ("II", 1e-15)],
            2,
        )
        .unwrap();
        let s = h.simplify(1e-12);
        assert_eq!(s.num_terms(), 1);
        assert_eq!(s.terms()[0].pauli.label(), "XI");
        assert!((s.terms()[0].coeff - 0.75).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        let h = PauliOperator::from_list([("ZZ", -1.0), ("XI", 0.5)], 2).unwrap();
        let text = h.to_string();
        assert!(text.contains("-1.0000 * ZZ"));
        assert!(text.contains("+0.5000 * XI"));
    }
}
