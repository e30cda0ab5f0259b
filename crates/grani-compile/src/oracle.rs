//! Oracle alias expansion.
//!
//! The parity algorithm is steered by a bitstring with one position per
//! routed edge. Callers normally pass a two-character alias which is
//! expanded to the explicit bitstring here; custom mode bypasses the
//! expansion entirely.

use crate::error::{CompileError, CompileResult};

/// The recognized two-character oracle aliases.
pub const ALIASES: [&str; 3] = ["11", "10", "00"];

/// Expand a two-character alias into an explicit oracle bitstring.
///
/// The seed aliases (`"11"`, `"00"`) grow by repeatedly appending the
/// character at position `i - 1` of the string built so far, for `i`
/// from 2 to `n_qubits - 2`, which propagates the seed's second
/// character to length `n_qubits - 1`. The alternating alias (`"10"`)
/// produces a strict `1010...` pattern of length `n_qubits - 1`.
pub fn expand_alias(alias: &str, n_qubits: usize) -> CompileResult<String> {
    if !ALIASES.contains(&alias) {
        return Err(CompileError::InvalidOracle(format!(
            "unrecognized alias '{alias}', expected one of {ALIASES:?}"
        )));
    }

    if alias == "10" {
        let mut oracle = String::with_capacity(n_qubits.saturating_sub(1));
        let mut one = true;
        for _ in 0..n_qubits.saturating_sub(1) {
            oracle.push(if one { '1' } else { '0' });
            one = !one;
        }
        return Ok(oracle);
    }

    let mut oracle = alias.as_bytes().to_vec();
    for i in 2..n_qubits.saturating_sub(1) {
        let repeat = oracle[i - 1];
        oracle.push(repeat);
    }
    // The seed is ASCII, so the expansion stays valid UTF-8.
    Ok(String::from_utf8(oracle).expect("oracle expansion is ASCII"))
}

/// Validate an explicit oracle string supplied in custom mode.
///
/// Must be non-empty and consist only of `0` and `1`. Returns the number
/// of `1` characters, which becomes the entangling budget.
pub fn validate_custom(oracle: &str) -> CompileResult<usize> {
    if oracle.is_empty() {
        return Err(CompileError::InvalidOracle(
            "custom oracle must not be empty".into(),
        ));
    }
    let mut ones = 0;
    for c in oracle.chars() {
        match c {
            '1' => ones += 1,
            '0' => {}
            other => {
                return Err(CompileError::InvalidOracle(format!(
                    "custom oracle may only contain 0 and 1, found '{other}'"
                )));
            }
        }
    }
    Ok(ones)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_alias_expansion() {
        assert_eq!(expand_alias("11", 4).unwrap(), "111");
        assert_eq!(expand_alias("11", 6).unwrap(), "11111");
        assert_eq!(expand_alias("00", 5).unwrap(), "0000");
    }

    #[test]
    fn test_full_alias_small_counts() {
        // Below four qubits the seed is returned unchanged.
        assert_eq!(expand_alias("11", 3).unwrap(), "11");
        assert_eq!(expand_alias("11", 2).unwrap(), "11");
    }

    #[test]
    fn test_alternating_alias() {
        assert_eq!(expand_alias("10", 5).unwrap(), "1010");
        assert_eq!(expand_alias("10", 6).unwrap(), "10101");
        assert_eq!(expand_alias("10", 2).unwrap(), "1");
    }

    #[test]
    fn test_unknown_alias_rejected() {
        assert!(matches!(
            expand_alias("01", 4),
            Err(CompileError::InvalidOracle(_))
        ));
        assert!(matches!(
            expand_alias("111", 4),
            Err(CompileError::InvalidOracle(_))
        ));
    }

    #[test]
    fn test_validate_custom() {
        assert_eq!(validate_custom("1010").unwrap(), 2);
        assert_eq!(validate_custom("0000").unwrap(), 0);
        assert_eq!(validate_custom("1111").unwrap(), 4);
        assert!(matches!(
            validate_custom(""),
            Err(CompileError::InvalidOracle(_))
        ));
        assert!(matches!(
            validate_custom("10a1"),
            Err(CompileError::InvalidOracle(_))
        ));
    }
}
