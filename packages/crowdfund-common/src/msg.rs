use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

use crate::types::CampaignRecord;

/// Writes accepted by the crowdfunding contract.
#[cw_serde]
pub enum LedgerExecuteMsg {
    /// Open a new campaign. The deadline is `now + duration_seconds` on the ledger.
    CreateCampaign {
        owner: String,
        title: String,
        description: String,
        target: Uint128,
        duration_seconds: u64,
        image: String,
    },
    /// Donate to a campaign. The donated amount travels as attached funds.
    DonateCampaign { id: u64 },
}

impl LedgerExecuteMsg {
    pub fn action(&self) -> &'static str {
        match self {
            LedgerExecuteMsg::CreateCampaign { .. } => "create_campaign",
            LedgerExecuteMsg::DonateCampaign { .. } => "donate_campaign",
        }
    }
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum LedgerQueryMsg {
    #[returns(Vec<CampaignRecord>)]
    GetCampaigns {},
    #[returns(Addr)]
    GetOwner {},
}
