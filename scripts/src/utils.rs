//! Utilities for the deploy scripts

use std::{fs, path::Path, str::FromStr};

use alloy::{
    network::Ethereum,
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    transports::http::reqwest::Url,
};
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::ScriptError;

/// The provider used to transact with RPC networks
pub type RpcClient = DynProvider<Ethereum>;

/// Sets up a provider signing with `priv_key` against the node at `rpc_url`,
/// returning it along with the signer's address
pub fn setup_client(
    priv_key: &str,
    rpc_url: &str,
) -> Result<(RpcClient, alloy_primitives::Address), ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let address = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = ProviderBuilder::new().wallet(signer).connect_http(url);

    Ok((DynProvider::new(provider), address))
}

/// Read & deserialize the JSON file at `path`
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ScriptError> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;

    serde_json::from_str(&contents)
        .map_err(|e| ScriptError::Serde(format!("{}: {}", path.display(), e)))
}

/// Serialize `value` as pretty JSON to `path`, creating parent directories as needed
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ScriptError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ScriptError::WriteFile(e.to_string()))?;
    }

    let contents =
        serde_json::to_string_pretty(value).map_err(|e| ScriptError::Serde(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ScriptError::WriteFile(e.to_string()))
}
