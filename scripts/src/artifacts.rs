//! Reading Hardhat compilation artifacts, for deployment over RPC and for
//! source verification

use std::path::PathBuf;

use alloy_primitives::Bytes;
use contracts_common::types::ContractKind;
use serde::Deserialize;

use crate::{
    constants::{
        DEBUG_FILE_EXTENSION, FUND_ME_SOURCE_NAME, JSON_EXTENSION, MOCK_V3_AGGREGATOR_SOURCE_NAME,
    },
    errors::ScriptError,
    utils::read_json,
};

/// The subset of a Hardhat artifact the scripts need
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HardhatArtifact {
    /// The name of the contract
    pub contract_name: String,
    /// The source file the contract is defined in
    pub source_name: String,
    /// The creation bytecode of the contract
    pub bytecode: Bytes,
}

impl HardhatArtifact {
    /// The fully qualified contract name, as expected by block explorers
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.source_name, self.contract_name)
    }
}

/// The `.dbg.json` file Hardhat writes next to each artifact
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DebugFile {
    /// Path to the build info file, relative to the debug file
    build_info: String,
}

/// The subset of a Hardhat build info file needed for verification
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    /// The full compiler version, e.g. "0.8.8+commit.dddeac2f"
    pub solc_long_version: String,
    /// The standard JSON input the contract was compiled from
    pub input: serde_json::Value,
}

/// A Hardhat `artifacts/` directory
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// The root of the artifacts directory
    root: PathBuf,
}

impl ArtifactStore {
    /// Open the artifacts directory at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The source file `contract` is defined in
    pub fn source_name(contract: ContractKind) -> &'static str {
        match contract {
            ContractKind::FundMe => FUND_ME_SOURCE_NAME,
            ContractKind::MockV3Aggregator => MOCK_V3_AGGREGATOR_SOURCE_NAME,
        }
    }

    /// The directory holding the artifacts of `contract`
    fn contract_dir(&self, contract: ContractKind) -> PathBuf {
        self.root.join(Self::source_name(contract))
    }

    /// Read the artifact of `contract`
    pub fn artifact(&self, contract: ContractKind) -> Result<HardhatArtifact, ScriptError> {
        let path = self
            .contract_dir(contract)
            .join(format!("{}.{}", contract.name(), JSON_EXTENSION));
        let artifact: HardhatArtifact = read_json(&path)
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        if artifact.bytecode.is_empty() {
            return Err(ScriptError::ArtifactParsing(format!(
                "{} has no creation bytecode",
                path.display()
            )));
        }

        Ok(artifact)
    }

    /// Read the build info `contract` was compiled in
    pub fn build_info(&self, contract: ContractKind) -> Result<BuildInfo, ScriptError> {
        let dir = self.contract_dir(contract);
        let debug_path = dir.join(format!("{}.{}", contract.name(), DEBUG_FILE_EXTENSION));
        let debug: DebugFile =
            read_json(&debug_path).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

        read_json(&dir.join(&debug.build_info))
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))
    }
}
