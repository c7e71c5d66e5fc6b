use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Once,
};

use alloy_primitives::Address;
use async_trait::async_trait;
use contracts_common::types::ContractKind;
use devnet::errors::DevnetError;
use eyre::{eyre, Report, Result};
use scripts::{deployments::HardhatDeployments, errors::ScriptError, verify::ContractVerifier};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

// ---------------------
// | META TEST HELPERS |
// ---------------------

static TRACING_INIT: Once = Once::new();

/// Set up logging, and launch a devnet to deploy to
pub fn global_setup() -> HardhatDeployments {
    TRACING_INIT.call_once(|| {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    });

    debug!("Launching devnet...");
    HardhatDeployments::launch()
}

/// Launch a devnet with every deploy script run against it
pub async fn setup_fixture() -> Result<HardhatDeployments> {
    let mut deployments = global_setup();
    deployments.fixture(&["all"]).await?;
    Ok(deployments)
}

// --------------
// | ASSERTIONS |
// --------------

/// Assert that `result` is a revert with the given reason
pub fn assert_reverted_with<T, E: Into<Report>>(result: Result<T, E>, reason: &str) -> Result<()> {
    let e: Report = match result {
        Ok(_) => return Err(eyre!("expected revert with \"{}\", but call succeeded", reason)),
        Err(e) => e.into(),
    };

    match e.downcast_ref::<DevnetError>().and_then(DevnetError::revert_reason) {
        Some(actual) if actual == reason => Ok(()),
        actual => Err(eyre!("expected revert with \"{}\", got {:?} ({})", reason, actual, e)),
    }
}

// -------------
// | VERIFIERS |
// -------------

/// A verifier recording its calls, optionally failing every one of them
#[derive(Default)]
pub struct MockVerifier {
    /// Whether every verification should fail
    pub fail: bool,
    /// The number of verifications requested
    pub calls: AtomicUsize,
}

impl MockVerifier {
    /// A verifier failing every verification
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    /// The number of verifications requested so far
    pub fn num_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractVerifier for MockVerifier {
    async fn verify(
        &self,
        contract: ContractKind,
        address: Address,
        _constructor_args: &[u8],
    ) -> Result<(), ScriptError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ScriptError::Verification(format!(
                "cannot verify {} at {}",
                contract, address
            )));
        }

        Ok(())
    }
}
