//! The ordered checklist comparing a live deployment against its build
//! artifacts and recorded manifest

use alloy::{
    primitives::{Address, Bytes},
    sol_types::SolConstructor,
};
use itertools::Itertools;
use tracing::{debug, error, info};

use crate::{
    chain::{ChainReader, LocalDeployer},
    checks::{compare_address, compare_bytecode, compare_root, CheckOutcome, CheckStatus},
    config::FailureMode,
    constants::{
        BRIDGE_IMPLEMENTATION_CHECK, BRIDGE_PROXY_CHECK, FFLONK_VERIFIER_CHECK,
        GENESIS_BATCH_NUM, GENESIS_ROOT_CHECK, GLOBAL_EXIT_ROOT_IMPLEMENTATION_CHECK,
        GLOBAL_EXIT_ROOT_PROXY_CHECK, PROXY_ADMIN_CHECK, TIMELOCK_CHECK, ZKEVM_DEPLOYER_CHECK,
        ZKEVM_IMPLEMENTATION_CHECK, ZKEVM_PROXY_CHECK,
    },
    errors::VerifierError,
    proxy::{admin_address, implementation_address},
    solidity::{
        global_exit_root_constructor, init_code, timelock_constructor, zkevm_constructor,
    },
    types::{ArtifactSet, ContractArtifact, DeployParameters, DeploymentManifest},
};

/// The loaded inputs a run compares the live chain against
#[derive(Debug, Clone)]
pub struct VerificationInputs {
    /// The recorded deployment addresses
    pub manifest: DeploymentManifest,
    /// The recorded deployment parameters
    pub parameters: DeployParameters,
    /// The compiled build artifacts
    pub artifacts: ArtifactSet,
}

/// Collects check outcomes, aborting on the first failure in fail-fast mode
struct Report {
    /// How to react to a failed check
    mode: FailureMode,
    /// The outcomes recorded so far, in execution order
    outcomes: Vec<CheckOutcome>,
}

impl Report {
    /// Create an empty report
    fn new(mode: FailureMode) -> Self {
        Self { mode, outcomes: Vec::new() }
    }

    /// Record the outcome of a check
    fn record(&mut self, outcome: CheckOutcome) -> Result<(), VerifierError> {
        match &outcome.status {
            CheckStatus::Passed => info!("{} passed", outcome.name),
            CheckStatus::Failed(mismatch) => {
                error!("{mismatch}");
                if self.mode == FailureMode::FailFast {
                    return Err(VerifierError::Mismatch(mismatch.clone()));
                }
            }
        }

        self.outcomes.push(outcome);
        Ok(())
    }

    /// Conclude the run, failing if any recorded check failed
    fn finish(self) -> Result<Vec<CheckOutcome>, VerifierError> {
        if self.outcomes.iter().any(CheckOutcome::is_failed) {
            return Err(VerifierError::Mismatches(self.outcomes));
        }

        Ok(self.outcomes)
    }
}

/// Runs the checklist against a live chain, deploying throwaway instances of
/// the constructor-parameterized contracts to a local chain
pub struct DeploymentVerifier<C, D> {
    /// The chain being verified
    chain: C,
    /// The local chain used for throwaway deployments
    local: D,
    /// The inputs compared against
    inputs: VerificationInputs,
}

impl<C: ChainReader, D: LocalDeployer> DeploymentVerifier<C, D> {
    /// Create a verifier over the given chains and inputs
    pub fn new(chain: C, local: D, inputs: VerificationInputs) -> Self {
        Self { chain, local, inputs }
    }

    /// Run every check in order.
    ///
    /// Returns the outcomes of all checks if every one passed. In fail-fast
    /// mode the first failed check aborts the run with
    /// [`VerifierError::Mismatch`]; otherwise every check runs and the failures
    /// are reported together in [`VerifierError::Mismatches`]. A failure to
    /// read chain state or deploy a local instance aborts the run in both
    /// modes.
    pub async fn run(&self, mode: FailureMode) -> Result<Vec<CheckOutcome>, VerifierError> {
        let mut report = Report::new(mode);

        // Contracts with no constructor-dependent code
        report.record(self.check_fflonk_verifier().await?)?;
        report.record(self.check_zkevm_deployer().await?)?;

        // The bridge implementation has no constructor-dependent code either
        report.record(self.check_bridge_implementation().await?)?;
        report.record(self.check_bridge_proxy().await?)?;

        // Contracts embedding immutable constructor values, compared against a
        // local deployment with the recorded arguments
        report.record(self.check_timelock().await?)?;
        report.record(self.check_global_exit_root_implementation().await?)?;
        report.record(self.check_global_exit_root_proxy().await?)?;
        report.record(self.check_zkevm_implementation().await?)?;
        report.record(self.check_zkevm_proxy().await?)?;

        report.record(self.check_proxy_admin().await?)?;
        report.record(self.check_genesis_root().await?)?;

        report.finish()
    }

    // ----------
    // | CHECKS |
    // ----------

    /// The `FflonkVerifier` matches its artifact
    pub async fn check_fflonk_verifier(&self) -> Result<CheckOutcome, VerifierError> {
        let address = self.inputs.manifest.fflonk_verifier_address;
        let artifact = &self.inputs.artifacts.fflonk_verifier;
        self.check_code_against_artifact(FFLONK_VERIFIER_CHECK, address, artifact).await
    }

    /// The `PolygonZkEVMDeployer` matches its artifact
    pub async fn check_zkevm_deployer(&self) -> Result<CheckOutcome, VerifierError> {
        let address = self.inputs.manifest.zkevm_deployer_address;
        let artifact = &self.inputs.artifacts.zkevm_deployer;
        self.check_code_against_artifact(ZKEVM_DEPLOYER_CHECK, address, artifact).await
    }

    /// The implementation behind the bridge proxy matches the bridge artifact
    pub async fn check_bridge_implementation(&self) -> Result<CheckOutcome, VerifierError> {
        let proxy = self.inputs.manifest.bridge_address;
        let implementation = implementation_address(&self.chain, proxy).await?;
        debug!("bridge implementation resolved to {implementation:#x}");

        let artifact = &self.inputs.artifacts.bridge;
        self.check_code_against_artifact(BRIDGE_IMPLEMENTATION_CHECK, implementation, artifact)
            .await
    }

    /// The bridge proxy matches the project-compiled transparent proxy
    pub async fn check_bridge_proxy(&self) -> Result<CheckOutcome, VerifierError> {
        let proxy = self.inputs.manifest.bridge_address;
        let artifact = &self.inputs.artifacts.transparent_proxy;
        self.check_code_against_artifact(BRIDGE_PROXY_CHECK, proxy, artifact).await
    }

    /// The timelock matches a local deployment with the recorded arguments
    pub async fn check_timelock(&self) -> Result<CheckOutcome, VerifierError> {
        let VerificationInputs { manifest, parameters, artifacts } = &self.inputs;

        let constructor = timelock_constructor(manifest, parameters);
        let expected = self.deploy_local(&artifacts.timelock, &constructor).await?;

        let address = manifest.timelock_address;
        self.check_code(TIMELOCK_CHECK, &artifacts.timelock.contract_name, address, &expected)
            .await
    }

    /// The implementation behind the global exit root proxy matches a local
    /// deployment with the recorded arguments
    pub async fn check_global_exit_root_implementation(
        &self,
    ) -> Result<CheckOutcome, VerifierError> {
        let VerificationInputs { manifest, artifacts, .. } = &self.inputs;

        let constructor = global_exit_root_constructor(manifest);
        let expected = self.deploy_local(&artifacts.global_exit_root, &constructor).await?;

        let implementation =
            implementation_address(&self.chain, manifest.global_exit_root_address).await?;
        debug!("global exit root implementation resolved to {implementation:#x}");

        let name = &artifacts.global_exit_root.contract_name;
        self.check_code(GLOBAL_EXIT_ROOT_IMPLEMENTATION_CHECK, name, implementation, &expected)
            .await
    }

    /// The global exit root proxy matches the upgrades plugin's proxy
    pub async fn check_global_exit_root_proxy(&self) -> Result<CheckOutcome, VerifierError> {
        let proxy = self.inputs.manifest.global_exit_root_address;
        let artifact = &self.inputs.artifacts.upgrades_proxy;
        self.check_code_against_artifact(GLOBAL_EXIT_ROOT_PROXY_CHECK, proxy, artifact).await
    }

    /// The implementation behind the rollup proxy matches a local deployment
    /// with the recorded arguments
    pub async fn check_zkevm_implementation(&self) -> Result<CheckOutcome, VerifierError> {
        let VerificationInputs { manifest, parameters, artifacts } = &self.inputs;

        let constructor = zkevm_constructor(manifest, parameters);
        let expected = self.deploy_local(&artifacts.zkevm, &constructor).await?;

        let implementation = implementation_address(&self.chain, manifest.zkevm_address).await?;
        debug!("zkEVM implementation resolved to {implementation:#x}");

        let name = &artifacts.zkevm.contract_name;
        self.check_code(ZKEVM_IMPLEMENTATION_CHECK, name, implementation, &expected).await
    }

    /// The rollup proxy matches the upgrades plugin's proxy
    pub async fn check_zkevm_proxy(&self) -> Result<CheckOutcome, VerifierError> {
        let proxy = self.inputs.manifest.zkevm_address;
        let artifact = &self.inputs.artifacts.upgrades_proxy;
        self.check_code_against_artifact(ZKEVM_PROXY_CHECK, proxy, artifact).await
    }

    /// All three proxies share one admin, and that admin matches the
    /// `ProxyAdmin` artifact
    pub async fn check_proxy_admin(&self) -> Result<CheckOutcome, VerifierError> {
        let manifest = &self.inputs.manifest;
        let proxies = [
            ("bridge", manifest.bridge_address),
            ("zkEVM", manifest.zkevm_address),
            ("global exit root", manifest.global_exit_root_address),
        ];

        let mut admins = Vec::with_capacity(proxies.len());
        for (name, proxy) in proxies {
            let admin = admin_address(&self.chain, proxy).await?;
            debug!("{name} proxy admin resolved to {admin:#x}");
            admins.push((name, admin));
        }

        for ((expected_name, expected), (name, actual)) in admins.iter().tuple_windows() {
            let comparison = compare_address(
                PROXY_ADMIN_CHECK,
                format!("{name} proxy admin, compared to the {expected_name} proxy admin"),
                *expected,
                *actual,
            );
            if comparison.is_err() {
                return Ok(CheckOutcome::new(PROXY_ADMIN_CHECK, comparison));
            }
        }

        let (_, admin) = admins[0];
        info!("proxies share admin {admin:#x}");
        if let Some(rollup_admin) = self.inputs.parameters.admin {
            info!("rollup admin recorded in the parameters is {rollup_admin:#x}");
        }

        let artifact = &self.inputs.artifacts.proxy_admin;
        self.check_code_against_artifact(PROXY_ADMIN_CHECK, admin, artifact).await
    }

    /// The rollup's state root for batch zero is the recorded genesis root
    pub async fn check_genesis_root(&self) -> Result<CheckOutcome, VerifierError> {
        let manifest = &self.inputs.manifest;
        let root = self.chain.batch_state_root(manifest.zkevm_address, GENESIS_BATCH_NUM).await?;

        let comparison = compare_root(
            GENESIS_ROOT_CHECK,
            format!("state root of batch {GENESIS_BATCH_NUM} at {:#x}", manifest.zkevm_address),
            manifest.genesis_root,
            root,
        );
        Ok(CheckOutcome::new(GENESIS_ROOT_CHECK, comparison))
    }

    // -----------
    // | HELPERS |
    // -----------

    /// Compare the code at the given address against an artifact's runtime code
    async fn check_code_against_artifact(
        &self,
        check: &'static str,
        address: Address,
        artifact: &ContractArtifact,
    ) -> Result<CheckOutcome, VerifierError> {
        self.check_code(check, &artifact.contract_name, address, &artifact.deployed_bytecode).await
    }

    /// Compare the code at the given address against the expected code
    async fn check_code(
        &self,
        check: &'static str,
        contract_name: &str,
        address: Address,
        expected: &Bytes,
    ) -> Result<CheckOutcome, VerifierError> {
        let live = self.chain.code_at(address).await?;
        let subject = format!("{contract_name} at {address:#x}");
        let comparison = compare_bytecode(check, subject, expected, &live);

        Ok(CheckOutcome::new(check, comparison))
    }

    /// Deploy a throwaway instance of the artifact with the given constructor
    /// arguments, returning its runtime code
    async fn deploy_local<A: SolConstructor>(
        &self,
        artifact: &ContractArtifact,
        constructor: &A,
    ) -> Result<Bytes, VerifierError> {
        debug!("deploying local {} instance", artifact.contract_name);
        self.local.deploy(init_code(&artifact.bytecode, constructor)).await
    }
}
