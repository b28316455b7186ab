//! In-memory `LedgerGateway` for tests, in the spirit of `cosmwasm_std::testing`.
//!
//! `MockLedger` keeps a campaign list, applies writes only when they are confirmed,
//! and can be scripted to fail the next write or confirmation.

use std::cell::Cell;

use cosmwasm_std::{to_json_vec, Addr, Timestamp, Uint128};
use crowdfund_common::{CampaignRecord, LedgerExecuteMsg};
use sha2::{Digest, Sha256};

use crate::config::ClientConfig;
use crate::context::AppContext;
use crate::error::GatewayError;
use crate::gateway::{LedgerGateway, PendingWrite, WriteReceipt};

/// Administrative owner of the mock contract.
pub const MOCK_LEDGER_OWNER: &str = "0x00000000000000000000000000000000000a11ce";
/// Account that creates campaigns in most tests.
pub const MOCK_CREATOR: &str = "0x5b38da6a701c568545dcfcb03fcb875f56beddc4";
/// Default connected wallet.
pub const MOCK_DONOR: &str = "0xab8483f64d9c6d1ecf9b849ae677dd3315835cb2";

/// A scripted failure, consumed by the first write step it applies to.
#[derive(Clone, Debug, PartialEq)]
pub enum MockFailure {
    /// The user declines in the wallet.
    RejectWrite(String),
    /// The wallet or node refuses to broadcast.
    FailWrite(String),
    /// Broadcast succeeds but the ledger reverts.
    FailConfirmation(String),
    /// Broadcast succeeds but no confirmation arrives.
    TimeoutConfirmation,
}

#[derive(Debug)]
pub struct MockLedger {
    owner: Addr,
    wallet: Option<Addr>,
    available: bool,
    campaigns: Vec<CampaignRecord>,
    pending: Vec<PendingWrite>,
    submitted: Vec<PendingWrite>,
    block_time: Timestamp,
    block_height: u64,
    nonce: u64,
    list_calls: Cell<u32>,
    fail_next: Option<MockFailure>,
}

impl MockLedger {
    /// An empty ledger at `block_time` with `MOCK_DONOR` as the authorized wallet.
    pub fn new(block_time: Timestamp) -> Self {
        MockLedger {
            owner: Addr::unchecked(MOCK_LEDGER_OWNER),
            wallet: Some(Addr::unchecked(MOCK_DONOR)),
            available: true,
            campaigns: vec![],
            pending: vec![],
            submitted: vec![],
            block_time,
            block_height: 1,
            nonce: 0,
            list_calls: Cell::new(0),
            fail_next: None,
        }
    }

    /// Seed a campaign directly, bypassing the write path. Returns its id.
    pub fn add_campaign(&mut self, mut record: CampaignRecord) -> u64 {
        let id = self.campaigns.len() as u64;
        record.id = id;
        self.campaigns.push(record);
        id
    }

    pub fn campaigns(&self) -> &[CampaignRecord] {
        &self.campaigns
    }

    pub fn campaign(&self, id: u64) -> Option<&CampaignRecord> {
        self.campaigns.get(id as usize)
    }

    pub fn set_owner(&mut self, owner: Addr) {
        self.owner = owner;
    }

    pub fn set_wallet(&mut self, wallet: Option<Addr>) {
        self.wallet = wallet;
    }

    /// Simulate the provider going away (or coming back).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    pub fn set_block_time(&mut self, block_time: Timestamp) {
        self.block_time = block_time;
    }

    pub fn block_time(&self) -> Timestamp {
        self.block_time
    }

    pub fn fail_next(&mut self, failure: MockFailure) {
        self.fail_next = Some(failure);
    }

    /// Number of `list_campaigns` calls served so far.
    pub fn list_calls(&self) -> u32 {
        self.list_calls.get()
    }

    /// Every write the wallet accepted, confirmed or not.
    pub fn submitted_writes(&self) -> &[PendingWrite] {
        &self.submitted
    }

    fn require_session(&self) -> Result<&Addr, GatewayError> {
        match (&self.wallet, self.available) {
            (Some(wallet), true) => Ok(wallet),
            _ => Err(GatewayError::Unavailable),
        }
    }

    fn take_submit_failure(&mut self) -> Option<GatewayError> {
        match self.fail_next.take() {
            Some(MockFailure::RejectWrite(reason)) => Some(GatewayError::WriteRejected { reason }),
            Some(MockFailure::FailWrite(reason)) => Some(GatewayError::WriteFailed { reason }),
            other => {
                self.fail_next = other;
                None
            }
        }
    }

    fn take_confirmation_failure(&mut self, tx_hash: &str) -> Option<GatewayError> {
        match self.fail_next.take() {
            Some(MockFailure::FailConfirmation(reason)) => {
                Some(GatewayError::WriteFailed { reason })
            }
            Some(MockFailure::TimeoutConfirmation) => Some(GatewayError::ConfirmationTimeout {
                tx_hash: tx_hash.to_string(),
            }),
            other => {
                self.fail_next = other;
                None
            }
        }
    }

    fn broadcast(
        &mut self,
        msg: LedgerExecuteMsg,
        funds: Uint128,
    ) -> Result<PendingWrite, GatewayError> {
        self.require_session()?;
        if let Some(err) = self.take_submit_failure() {
            return Err(err);
        }

        let payload = to_json_vec(&msg).map_err(|e| GatewayError::WriteFailed {
            reason: e.to_string(),
        })?;
        let mut hasher = Sha256::new();
        hasher.update(self.nonce.to_be_bytes());
        hasher.update(&payload);
        hasher.update(funds.u128().to_be_bytes());
        self.nonce += 1;

        let pending = PendingWrite {
            tx_hash: format!("0x{}", hex::encode(hasher.finalize())),
            msg,
            funds,
        };
        self.pending.push(pending.clone());
        self.submitted.push(pending.clone());
        Ok(pending)
    }

    /// Apply a confirmed write the way the contract would.
    fn apply(&mut self, pending: &PendingWrite) -> Result<(), GatewayError> {
        match &pending.msg {
            LedgerExecuteMsg::CreateCampaign {
                owner,
                title,
                description,
                target,
                duration_seconds,
                image,
            } => {
                let id = self.campaigns.len() as u64;
                self.campaigns.push(CampaignRecord {
                    id,
                    owner: Addr::unchecked(owner),
                    title: title.clone(),
                    description: description.clone(),
                    image: Some(image.clone()),
                    target: *target,
                    amount_collected: Uint128::zero(),
                    deadline: self.block_time.plus_seconds(*duration_seconds),
                });
                Ok(())
            }
            LedgerExecuteMsg::DonateCampaign { id } => {
                let block_time = self.block_time;
                let campaign = self
                    .campaigns
                    .get_mut(*id as usize)
                    .ok_or_else(|| GatewayError::WriteFailed {
                        reason: format!("campaign {} does not exist", id),
                    })?;
                if campaign.deadline <= block_time {
                    return Err(GatewayError::WriteFailed {
                        reason: format!("campaign {} has ended", id),
                    });
                }
                if pending.funds.is_zero() {
                    return Err(GatewayError::WriteFailed {
                        reason: "no funds sent".to_string(),
                    });
                }
                campaign.amount_collected += pending.funds;
                Ok(())
            }
        }
    }
}

impl LedgerGateway for MockLedger {
    fn list_campaigns(&self) -> Result<Vec<CampaignRecord>, GatewayError> {
        if !self.available {
            return Err(GatewayError::Unavailable);
        }
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(self.campaigns.clone())
    }

    fn owner_address(&self) -> Result<Addr, GatewayError> {
        if !self.available {
            return Err(GatewayError::Unavailable);
        }
        Ok(self.owner.clone())
    }

    fn connected_address(&self) -> Option<Addr> {
        if self.available {
            self.wallet.clone()
        } else {
            None
        }
    }

    fn create_campaign(&mut self, msg: &LedgerExecuteMsg) -> Result<PendingWrite, GatewayError> {
        if !matches!(msg, LedgerExecuteMsg::CreateCampaign { .. }) {
            return Err(GatewayError::WriteFailed {
                reason: format!("expected create_campaign, got {}", msg.action()),
            });
        }
        self.broadcast(msg.clone(), Uint128::zero())
    }

    fn donate(
        &mut self,
        campaign_id: u64,
        amount: Uint128,
    ) -> Result<PendingWrite, GatewayError> {
        self.broadcast(LedgerExecuteMsg::DonateCampaign { id: campaign_id }, amount)
    }

    fn wait_for_confirmation(
        &mut self,
        pending: PendingWrite,
    ) -> Result<WriteReceipt, GatewayError> {
        let index = self
            .pending
            .iter()
            .position(|p| p.tx_hash == pending.tx_hash)
            .ok_or_else(|| GatewayError::WriteFailed {
                reason: format!("unknown transaction {}", pending.tx_hash),
            })?;
        let pending = self.pending.remove(index);

        if let Some(err) = self.take_confirmation_failure(&pending.tx_hash) {
            return Err(err);
        }
        self.apply(&pending)?;
        self.block_height += 1;

        Ok(WriteReceipt {
            tx_hash: pending.tx_hash,
            block_height: self.block_height,
        })
    }
}

/// A campaign record for seeding a `MockLedger`. The id is assigned on insert.
pub fn mock_campaign(
    owner: &str,
    title: &str,
    target: u128,
    collected: u128,
    deadline: Timestamp,
) -> CampaignRecord {
    CampaignRecord {
        id: 0,
        owner: Addr::unchecked(owner),
        title: title.to_string(),
        description: format!("{} description", title),
        image: None,
        target: Uint128::new(target),
        amount_collected: Uint128::new(collected),
        deadline,
    }
}

/// A context over `ledger` with the default config and no wallet session yet.
pub fn mock_context(ledger: MockLedger) -> AppContext<MockLedger> {
    AppContext::new(ledger, ClientConfig::default())
        .expect("default client config is valid")
}
