//! Definitions of errors that can occur while verifying a deployment

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::checks::{CheckOutcome, Mismatch};

/// Errors that can occur while verifying a deployment
#[derive(Debug)]
pub enum VerifierError {
    /// Error reading the deployment manifest
    ReadManifest(String),
    /// Error reading the deployment parameters file
    ReadParameters(String),
    /// Error parsing a Hardhat compilation artifact
    ArtifactParsing(String),
    /// Error building the verifier configuration
    Config(String),
    /// Error initializing an RPC client
    ClientInitialization(String),
    /// Error reading code or storage from the verified chain
    ChainRead(String),
    /// Error deploying a contract to the local chain
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// A check failed, the run was aborted at this check
    Mismatch(Mismatch),
    /// One or more checks failed with every check run to completion
    Mismatches(Vec<CheckOutcome>),
}

impl VerifierError {
    /// Whether the error reports live state not matching the expected state,
    /// as opposed to a failure to read that state
    pub fn is_mismatch(&self) -> bool {
        matches!(self, VerifierError::Mismatch(_) | VerifierError::Mismatches(_))
    }
}

impl Display for VerifierError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VerifierError::ReadManifest(s) => write!(f, "error reading deployment manifest: {}", s),
            VerifierError::ReadParameters(s) => {
                write!(f, "error reading deployment parameters: {}", s)
            }
            VerifierError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            VerifierError::Config(s) => write!(f, "invalid configuration: {}", s),
            VerifierError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            VerifierError::ChainRead(s) => write!(f, "error reading chain state: {}", s),
            VerifierError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            VerifierError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            VerifierError::Mismatch(m) => write!(f, "verification failed: {}", m),
            VerifierError::Mismatches(outcomes) => {
                let failed: Vec<_> = outcomes.iter().filter(|o| o.is_failed()).collect();
                write!(f, "verification failed, {} check(s) did not pass:", failed.len())?;
                for outcome in failed {
                    write!(f, "\n  {}", outcome)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for VerifierError {}
