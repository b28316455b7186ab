use cosmwasm_schema::cw_serde;

use crate::error::ClientError;

/// Address of the deployed crowdfunding contract.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0xad8112a1703a6e269ed4e3100ee62e48c4972aaf";

/// Shown for campaigns created without a cover image.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://images.unsplash.com/photo-1521791055366-0d553872125f?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=800&q=80";

/// Native ether: 1 ETH = 10^18 wei
pub const DEFAULT_DECIMALS: u32 = 18;

/// Wei is the finest unit the client handles.
pub const MAX_DECIMALS: u32 = 18;

/// Unknown keys are rejected so a misspelt setting cannot silently fall back to its
/// default.
#[cw_serde]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    pub contract_address: String,
    #[serde(default = "default_placeholder_image")]
    pub placeholder_image: String,
    /// Fractional digits between the display unit and the ledger's smallest unit
    #[serde(default = "default_decimals")]
    pub decimals: u32,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    /// Fractional digits shown for raised/target amounts
    #[serde(default = "default_display_precision")]
    pub display_precision: usize,
}

fn default_placeholder_image() -> String {
    DEFAULT_PLACEHOLDER_IMAGE.to_string()
}

fn default_decimals() -> u32 {
    DEFAULT_DECIMALS
}

fn default_currency_symbol() -> String {
    "Ξ".to_string()
}

fn default_display_precision() -> usize {
    4
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            placeholder_image: default_placeholder_image(),
            decimals: default_decimals(),
            currency_symbol: default_currency_symbol(),
            display_precision: default_display_precision(),
        }
    }
}

impl ClientConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        let config: ClientConfig =
            serde_json::from_str(json).map_err(|e| ClientError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ClientError> {
        if self.contract_address.trim().is_empty() {
            return Err(ClientError::InvalidConfig {
                reason: "contract_address must not be empty".to_string(),
            });
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ClientError::InvalidConfig {
                reason: format!(
                    "decimals = {} (must be <= {})",
                    self.decimals, MAX_DECIMALS
                ),
            });
        }
        Ok(())
    }
}
