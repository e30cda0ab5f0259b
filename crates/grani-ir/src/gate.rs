//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Standard gates with known semantics.
///
/// The set is the native family this stack emits: identity, the u2/u3
/// single-qubit gates with concrete angles, and controlled-X.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity gate.
    I,
    /// u2(φ, λ) gate: single X90 pulse with frame changes.
    U2(f64, f64),
    /// Universal single-qubit gate u3(θ, φ, λ).
    U3(f64, f64, f64),
    /// Controlled-X (CNOT) gate.
    CX,
}

impl StandardGate {
    /// The canonical Hadamard-equivalent basis change, u2(0, π).
    #[inline]
    pub fn basis_change() -> Self {
        StandardGate::U2(0.0, PI)
    }

    /// The canonical X-equivalent state flip, u3(π, 0, π).
    #[inline]
    pub fn state_flip() -> Self {
        StandardGate::U3(PI, 0.0, PI)
    }

    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::U2(_, _) => "u2",
            StandardGate::U3(_, _, _) => "u3",
            StandardGate::CX => "cx",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I | StandardGate::U2(_, _) | StandardGate::U3(_, _, _) => 1,
            StandardGate::CX => 2,
        }
    }

    /// Check whether this is exactly the canonical basis-change form.
    ///
    /// Only u2(0, π) qualifies; u2 with other angles is not self-inverse
    /// and never cancels pairwise.
    #[inline]
    pub fn is_basis_change(&self) -> bool {
        matches!(self, StandardGate::U2(phi, lambda) if *phi == 0.0 && *lambda == PI)
    }

    /// Get the angle parameters of this gate.
    pub fn params(&self) -> Vec<f64> {
        match self {
            StandardGate::I | StandardGate::CX => vec![],
            StandardGate::U2(phi, lambda) => vec![*phi, *lambda],
            StandardGate::U3(theta, phi, lambda) => vec![*theta, *phi, *lambda],
        }
    }
}
