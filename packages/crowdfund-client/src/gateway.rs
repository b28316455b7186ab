use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use crowdfund_common::{CampaignRecord, LedgerExecuteMsg};

use crate::error::GatewayError;

/// A write that the wallet has signed and broadcast but the ledger has not yet
/// confirmed.
#[cw_serde]
pub struct PendingWrite {
    pub tx_hash: String,
    pub msg: LedgerExecuteMsg,
    /// Funds attached to the write, smallest unit
    pub funds: Uint128,
}

/// Proof that a write landed on the ledger.
#[cw_serde]
pub struct WriteReceipt {
    pub tx_hash: String,
    pub block_height: u64,
}

/// Read/write access to the crowdfunding contract through the user's wallet.
///
/// Writes are two-step: `create_campaign` / `donate` return once the wallet has
/// accepted the transaction, `wait_for_confirmation` returns once the ledger has
/// included it.
pub trait LedgerGateway {
    /// Full snapshot of every campaign, in ledger order.
    fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, GatewayError>;

    /// Administrative owner of the contract. Display only.
    fn owner_address(&self) -> Result<Addr, GatewayError>;

    /// Currently authorized wallet account, if any.
    fn connected_address(&self) -> Option<Addr>;

    /// Submit a `LedgerExecuteMsg::CreateCampaign` write.
    fn create_campaign(&mut self, msg: &LedgerExecuteMsg) -> Result<PendingWrite, GatewayError>;

    /// Submit a funded `DonateCampaign` write.
    fn donate(&mut self, campaign_id: u64, amount: Uint128)
        -> Result<PendingWrite, GatewayError>;

    fn wait_for_confirmation(&mut self, pending: PendingWrite)
        -> Result<WriteReceipt, GatewayError>;
}
