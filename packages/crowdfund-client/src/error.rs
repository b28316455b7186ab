use cosmwasm_std::StdError;
use thiserror::Error;

use crate::donation::DonationPhase;

/// Failures reported by a `LedgerGateway`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("no wallet or ledger session available")]
    Unavailable,

    #[error("write rejected: {reason}")]
    WriteRejected { reason: String },

    #[error("write failed: {reason}")]
    WriteFailed { reason: String },

    #[error("confirmation timed out for transaction {tx_hash}")]
    ConfirmationTimeout { tx_hash: String },

    #[error("ledger query failed: {reason}")]
    QueryFailed { reason: String },
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Gateway(#[from] GatewayError),

    #[error("invalid input: {reason}")]
    Validation { reason: String },

    #[error("campaign {id} not found")]
    CampaignNotFound { id: u64 },

    #[error("campaign {id} has ended")]
    CampaignInactive { id: u64 },

    #[error("campaign {id} is owned by the connected wallet")]
    OwnCampaign { id: u64 },

    #[error("donation to campaign {id} is already being submitted")]
    SubmissionInFlight { id: u64 },

    #[error("cannot {action} while the donation flow is {phase}")]
    InvalidTransition {
        action: String,
        phase: DonationPhase,
    },

    #[error("donation failed: {reason}")]
    DonationFailed { reason: String },

    #[error("campaign creation failed: {reason}")]
    CreateFailed { reason: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl ClientError {
    pub fn validation(reason: impl Into<String>) -> Self {
        ClientError::Validation {
            reason: reason.into(),
        }
    }
}
