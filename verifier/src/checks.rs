//! Structured results of the individual verification checks

use std::fmt::{self, Display, Formatter};

use alloy::primitives::{Address, B256};

/// The way in which a live value differs from the expected one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MismatchKind {
    /// Two bytecodes differ
    Bytecode {
        /// The length of the expected bytecode
        expected_len: usize,
        /// The length of the live bytecode
        actual_len: usize,
        /// The offset of the first byte at which the two differ. When one
        /// bytecode is a prefix of the other this is the shorter length.
        first_difference: usize,
    },
    /// Two addresses differ
    Address {
        /// The expected address
        expected: Address,
        /// The live address
        actual: Address,
    },
    /// Two 32-byte roots differ
    Root {
        /// The expected root
        expected: B256,
        /// The live root
        actual: B256,
    },
}

/// A failed comparison between a live value and its expected value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    /// The name of the check that failed
    pub check: &'static str,
    /// What was compared, e.g. the contract and address read from
    pub subject: String,
    /// How the values differ
    pub kind: MismatchKind,
}

impl Display for Mismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: ", self.check, self.subject)?;
        match &self.kind {
            MismatchKind::Bytecode {
                expected_len,
                actual_len,
                first_difference,
            } => write!(
                f,
                "bytecode differs at byte {} (expected {} bytes, found {} bytes)",
                first_difference, expected_len, actual_len
            ),
            MismatchKind::Address { expected, actual } => {
                write!(f, "expected address {}, found {}", expected, actual)
            }
            MismatchKind::Root { expected, actual } => {
                write!(f, "expected root {}, found {}", expected, actual)
            }
        }
    }
}

/// Whether a check passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// The live state matched
    Passed,
    /// The live state did not match
    Failed(Mismatch),
}

/// The result of running a single named check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// The name of the check
    pub name: &'static str,
    /// The result of the check
    pub status: CheckStatus,
}

impl CheckOutcome {
    /// Build an outcome from the result of a comparison
    pub fn new(name: &'static str, comparison: Result<(), Mismatch>) -> Self {
        let status = match comparison {
            Ok(()) => CheckStatus::Passed,
            Err(mismatch) => CheckStatus::Failed(mismatch),
        };
        Self { name, status }
    }

    /// Whether the check failed
    pub fn is_failed(&self) -> bool {
        matches!(self.status, CheckStatus::Failed(_))
    }
}

impl Display for CheckOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.status {
            CheckStatus::Passed => write!(f, "[{}] passed", self.name),
            CheckStatus::Failed(mismatch) => write!(f, "{}", mismatch),
        }
    }
}

// ---------------
// | COMPARISONS |
// ---------------

/// Assert that the live bytecode is byte-for-byte equal to the expected bytecode
pub fn compare_bytecode(
    check: &'static str,
    subject: impl Into<String>,
    expected: &[u8],
    actual: &[u8],
) -> Result<(), Mismatch> {
    if expected == actual {
        return Ok(());
    }

    let first_difference = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));

    Err(Mismatch {
        check,
        subject: subject.into(),
        kind: MismatchKind::Bytecode {
            expected_len: expected.len(),
            actual_len: actual.len(),
            first_difference,
        },
    })
}

/// Assert that two addresses are equal
pub fn compare_address(
    check: &'static str,
    subject: impl Into<String>,
    expected: Address,
    actual: Address,
) -> Result<(), Mismatch> {
    if expected == actual {
        return Ok(());
    }

    Err(Mismatch {
        check,
        subject: subject.into(),
        kind: MismatchKind::Address { expected, actual },
    })
}

/// Assert that two 32-byte roots are equal
pub fn compare_root(
    check: &'static str,
    subject: impl Into<String>,
    expected: B256,
    actual: B256,
) -> Result<(), Mismatch> {
    if expected == actual {
        return Ok(());
    }

    Err(Mismatch {
        check,
        subject: subject.into(),
        kind: MismatchKind::Root { expected, actual },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_bytecode_passes() {
        let code = [0x60, 0x80, 0x60, 0x40, 0x52];
        assert!(compare_bytecode("test", "contract", &code, &code).is_ok());
    }

    #[test]
    fn test_single_byte_mutation_fails() {
        let expected = [0x60, 0x80, 0x60, 0x40, 0x52];
        let mut actual = expected;
        actual[3] ^= 0x01;

        let mismatch = compare_bytecode("test", "contract", &expected, &actual).unwrap_err();
        assert_eq!(
            mismatch.kind,
            MismatchKind::Bytecode {
                expected_len: 5,
                actual_len: 5,
                first_difference: 3,
            }
        );
    }

    #[test]
    fn test_truncated_bytecode_reports_shorter_length() {
        let expected = [0x60, 0x80, 0x60, 0x40, 0x52];
        let actual = &expected[..2];

        let mismatch = compare_bytecode("test", "contract", &expected, actual).unwrap_err();
        assert_eq!(
            mismatch.kind,
            MismatchKind::Bytecode {
                expected_len: 5,
                actual_len: 2,
                first_difference: 2,
            }
        );
    }

    #[test]
    fn test_empty_live_code_fails() {
        let expected = [0x60, 0x80];
        assert!(compare_bytecode("test", "contract", &expected, &[]).is_err());
    }

    #[test]
    fn test_mismatch_display() {
        let mismatch = compare_address(
            "proxy-admin",
            "zkEVM proxy admin",
            Address::repeat_byte(0x11),
            Address::repeat_byte(0x22),
        )
        .unwrap_err();

        let rendered = mismatch.to_string();
        assert!(rendered.starts_with("[proxy-admin] zkEVM proxy admin: expected address"));
        assert!(rendered.contains(&Address::repeat_byte(0x22).to_string()));
    }

    #[test]
    fn test_outcome_from_comparison() {
        let passed = CheckOutcome::new(
            "genesis-root",
            compare_root("genesis-root", "root", B256::ZERO, B256::ZERO),
        );
        assert!(!passed.is_failed());

        let failed = CheckOutcome::new(
            "genesis-root",
            compare_root("genesis-root", "root", B256::ZERO, B256::repeat_byte(1)),
        );
        assert!(failed.is_failed());
    }
}
