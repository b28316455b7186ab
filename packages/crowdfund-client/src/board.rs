use cosmwasm_std::{Addr, Event, Timestamp};
use crowdfund_common::CampaignRecord;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::gateway::LedgerGateway;
use crate::search::{filter_by_search, filter_owned_by};
use crate::session::WalletSession;
use crate::view_model::{derive_view_model, CampaignView};

/// The most recent campaign snapshot read from the ledger.
///
/// Only `refresh` writes the list, and it replaces the snapshot wholesale.
#[derive(Clone, Debug, Default)]
pub struct CampaignBoard {
    campaigns: Vec<CampaignRecord>,
    ledger_owner: Option<Addr>,
    loaded: bool,
}

impl CampaignBoard {
    pub fn new() -> Self {
        CampaignBoard::default()
    }

    /// Replace the snapshot with the ledger's current campaign list. On failure the
    /// previous snapshot is left untouched.
    pub fn refresh<G: LedgerGateway>(&mut self, gateway: &G) -> Result<Event, ClientError> {
        let campaigns = gateway.list_campaigns()?;
        self.campaigns = campaigns;
        self.loaded = true;

        Ok(Event::new("crowdfund_refresh")
            .add_attribute("campaigns", self.campaigns.len().to_string()))
    }

    /// Read the contract's administrative owner for display.
    pub fn refresh_owner<G: LedgerGateway>(&mut self, gateway: &G) -> Result<&Addr, ClientError> {
        let owner = gateway.owner_address()?;
        Ok(&*self.ledger_owner.insert(owner))
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn ledger_owner(&self) -> Option<&Addr> {
        self.ledger_owner.as_ref()
    }

    pub fn campaigns(&self) -> &[CampaignRecord] {
        &self.campaigns
    }

    pub fn campaign(&self, id: u64) -> Option<&CampaignRecord> {
        self.campaigns.iter().find(|c| c.id == id)
    }

    pub fn search(&self, term: &str) -> Vec<CampaignRecord> {
        filter_by_search(&self.campaigns, term)
    }

    /// The viewer's own campaigns.
    pub fn owned_by(&self, viewer: &WalletSession) -> Vec<CampaignRecord> {
        filter_owned_by(&self.campaigns, viewer)
    }

    pub fn views(
        &self,
        now: Timestamp,
        viewer: &WalletSession,
        config: &ClientConfig,
    ) -> Vec<CampaignView> {
        self.campaigns
            .iter()
            .map(|c| derive_view_model(c, now, viewer, config))
            .collect()
    }
}
