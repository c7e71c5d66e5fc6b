//! Source verification on Etherscan-compatible block explorers

use std::{
    fmt::{self, Display, Formatter},
    time::Duration,
};

use alloy_primitives::{hex, Address};
use async_trait::async_trait;
use contracts_common::types::ContractKind;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    artifacts::{ArtifactStore, BuildInfo, HardhatArtifact},
    constants::{
        ETHERSCAN_API_URL, EXPLORER_REQUEST_TIMEOUT_SECS, MAX_VERIFICATION_POLLS,
        STANDARD_JSON_CODE_FORMAT, VERIFICATION_POLL_INTERVAL_SECS,
    },
    errors::ScriptError,
};

/// Publishes the source of deployed contracts
#[async_trait]
pub trait ContractVerifier: Send + Sync {
    /// Verify the source of `contract`, deployed at `address` with the given
    /// ABI-encoded constructor arguments
    async fn verify(
        &self,
        contract: ContractKind,
        address: Address,
        constructor_args: &[u8],
    ) -> Result<(), ScriptError>;
}

// ---------------
// | API CLIENT |
// ---------------

/// Errors returned by the Etherscan API
#[derive(Debug)]
enum ApiError {
    /// The contract is already verified
    AlreadyVerified,
    /// The verification request is still queued
    Pending,
    /// The API responded with an error
    ErrorResponse {
        /// The response message
        message: String,
        /// The response result, describing the error
        result: String,
    },
    /// The API responded with an unknown status
    UnexpectedResponse {
        /// The response message
        message: String,
        /// The response result
        result: String,
    },
    /// The response body could not be parsed
    Serde {
        /// The parsing error
        error: String,
        /// The raw response body
        content: String,
    },
    /// The request failed
    Reqwest(String),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::AlreadyVerified => write!(f, "contract already verified"),
            ApiError::Pending => write!(f, "verification pending"),
            ApiError::ErrorResponse { message, result } => write!(f, "{}: {}", message, result),
            ApiError::UnexpectedResponse { message, result } => {
                write!(f, "unexpected response: {}: {}", message, result)
            }
            ApiError::Serde { error, content } => {
                write!(f, "invalid response ({}): {}", error, content)
            }
            ApiError::Reqwest(e) => write!(f, "request failed: {}", e),
        }
    }
}

/// The envelope of every Etherscan API response
#[derive(Deserialize)]
struct ApiResponseRaw {
    /// "1" on success, "0" on failure
    status: String,
    /// A short description of the status
    message: String,
    /// The payload, or a description of the error
    result: String,
}

/// Interpret the body of an Etherscan API response
fn process_api_call_result(
    result: Result<impl AsRef<str>, reqwest::Error>,
) -> Result<String, ApiError> {
    let body = result.map_err(|e| ApiError::Reqwest(e.to_string()))?;
    let body = body.as_ref();
    let raw_response: ApiResponseRaw = serde_json::from_str(body).map_err(|e| ApiError::Serde {
        error: e.to_string(),
        content: body.to_string(),
    })?;

    match raw_response.status.as_str() {
        "0" => match raw_response.result.as_str() {
            "Contract source code already verified" | "Already Verified" => {
                Err(ApiError::AlreadyVerified)
            }
            "Pending in queue" => Err(ApiError::Pending),
            _ => Err(ApiError::ErrorResponse {
                message: raw_response.message,
                result: raw_response.result,
            }),
        },
        "1" => Ok(raw_response.result),
        _ => Err(ApiError::UnexpectedResponse {
            message: raw_response.message,
            result: raw_response.result,
        }),
    }
}

/// A client of the Etherscan contract API
#[derive(Debug, Clone)]
struct EtherscanClient {
    /// The API endpoint
    api_url: String,
    /// The API key
    api_key: String,
    /// The chain the contracts live on
    chain_id: u64,
    /// The HTTP client
    http_client: Client,
}

impl EtherscanClient {
    /// Query parameters common to every request
    fn base_params(&self, action: &str) -> Vec<(&'static str, String)> {
        vec![
            ("chainid", self.chain_id.to_string()),
            ("module", "contract".to_string()),
            ("action", action.to_string()),
            ("apikey", self.api_key.clone()),
        ]
    }

    /// Submit a source verification request, returning its GUID
    async fn verify_source_code(
        &self,
        form: Vec<(&'static str, String)>,
    ) -> Result<String, ApiError> {
        let response = self
            .http_client
            .post(&self.api_url)
            .query(&self.base_params("verifysourcecode"))
            .form(&form)
            .send()
            .await
            .map_err(|e| ApiError::Reqwest(e.to_string()))?
            .text()
            .await;
        process_api_call_result(response)
    }

    /// Check the status of the verification request with the given GUID
    async fn check_verify_status(&self, guid: &str) -> Result<String, ApiError> {
        let mut query = self.base_params("checkverifystatus");
        query.push(("guid", guid.to_string()));

        let response = self
            .http_client
            .get(&self.api_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| ApiError::Reqwest(e.to_string()))?
            .text()
            .await;
        process_api_call_result(response)
    }
}

// ------------
// | VERIFIER |
// ------------

/// Verifies contracts on Etherscan, submitting the standard JSON input from
/// the Hardhat build info
#[derive(Debug, Clone)]
pub struct EtherscanVerifier {
    /// The API client
    client: EtherscanClient,
    /// The compiled contracts
    artifacts: ArtifactStore,
    /// The delay between status polls
    poll_interval: Duration,
}

impl EtherscanVerifier {
    /// Create a verifier for contracts on `chain_id`
    pub fn new(
        api_key: String,
        chain_id: u64,
        artifacts: ArtifactStore,
    ) -> Result<Self, ScriptError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(EXPLORER_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| ScriptError::Verification(e.to_string()))?;

        Ok(Self {
            client: EtherscanClient {
                api_url: ETHERSCAN_API_URL.to_string(),
                api_key,
                chain_id,
                http_client,
            },
            artifacts,
            poll_interval: Duration::from_secs(VERIFICATION_POLL_INTERVAL_SECS),
        })
    }
}

/// The form fields of a `verifysourcecode` request
fn verification_form(
    artifact: &HardhatArtifact,
    build_info: &BuildInfo,
    address: Address,
    constructor_args: &[u8],
) -> Vec<(&'static str, String)> {
    vec![
        ("codeformat", STANDARD_JSON_CODE_FORMAT.to_string()),
        ("sourceCode", build_info.input.to_string()),
        ("contractaddress", address.to_string()),
        ("contractname", artifact.qualified_name()),
        ("compilerversion", format!("v{}", build_info.solc_long_version)),
        // sic, the API expects this misspelling
        ("constructorArguements", hex::encode(constructor_args)),
    ]
}

#[async_trait]
impl ContractVerifier for EtherscanVerifier {
    async fn verify(
        &self,
        contract: ContractKind,
        address: Address,
        constructor_args: &[u8],
    ) -> Result<(), ScriptError> {
        info!("Verifying contract...");
        let artifact = self.artifacts.artifact(contract)?;
        let build_info = self.artifacts.build_info(contract)?;
        let form = verification_form(&artifact, &build_info, address, constructor_args);

        let guid = match self.client.verify_source_code(form).await {
            Ok(guid) => guid,
            Err(ApiError::AlreadyVerified) => {
                info!("Already Verified!");
                return Ok(());
            }
            Err(e) => return Err(ScriptError::Verification(e.to_string())),
        };
        debug!("submitted verification request {}", guid);

        for _ in 0..MAX_VERIFICATION_POLLS {
            tokio::time::sleep(self.poll_interval).await;
            match self.client.check_verify_status(&guid).await {
                Ok(result) => {
                    info!("{}: {} at {}", result, contract, address);
                    return Ok(());
                }
                Err(ApiError::Pending) => continue,
                Err(ApiError::AlreadyVerified) => {
                    info!("Already Verified!");
                    return Ok(());
                }
                Err(e) => return Err(ScriptError::Verification(e.to_string())),
            }
        }

        Err(ScriptError::Verification(format!("timed out waiting on request {}", guid)))
    }
}
