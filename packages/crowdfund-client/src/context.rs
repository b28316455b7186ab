use cosmwasm_std::{Addr, Event, Timestamp};

use crate::board::CampaignBoard;
use crate::config::ClientConfig;
use crate::error::{ClientError, GatewayError};
use crate::gateway::LedgerGateway;
use crate::session::WalletSession;
use crate::view_model::{derive_view_model, CampaignView};

/// Everything the client flows share: the ledger capability, the wallet session, the
/// campaign snapshot and the config. Built once at startup and passed by reference.
#[derive(Debug)]
pub struct AppContext<G: LedgerGateway> {
    gateway: G,
    session: WalletSession,
    board: CampaignBoard,
    config: ClientConfig,
    events: Vec<Event>,
}

impl<G: LedgerGateway> AppContext<G> {
    pub fn new(gateway: G, config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        Ok(AppContext {
            gateway,
            session: WalletSession::disconnected(),
            board: CampaignBoard::new(),
            config,
            events: vec![],
        })
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn board(&self) -> &CampaignBoard {
        &self.board
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn connect(&mut self) -> Result<Addr, ClientError> {
        let event = self.session.connect(&self.gateway)?;
        self.events.push(event);
        self.session
            .address()
            .cloned()
            .ok_or(ClientError::Gateway(GatewayError::Unavailable))
    }

    pub fn disconnect(&mut self) {
        let event = self.session.disconnect();
        self.events.push(event);
    }

    /// Initial load: campaigns, then the contract owner. A failed owner lookup is
    /// journalled and otherwise ignored since the owner is display only.
    pub fn load(&mut self) -> Result<(), ClientError> {
        self.refresh()?;
        if let Err(err) = self.board.refresh_owner(&self.gateway) {
            self.events.push(
                Event::new("crowdfund_owner_lookup_failed").add_attribute("reason", err.to_string()),
            );
        }
        Ok(())
    }

    /// Re-fetch the full campaign list from the ledger.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let event = self.board.refresh(&self.gateway)?;
        self.events.push(event);
        Ok(())
    }

    /// Every campaign, derived for display.
    pub fn views(&self, now: Timestamp) -> Vec<CampaignView> {
        self.board.views(now, &self.session, &self.config)
    }

    /// Campaigns whose title or description contains `term`.
    pub fn search_views(&self, term: &str, now: Timestamp) -> Vec<CampaignView> {
        self.board
            .search(term)
            .iter()
            .map(|c| derive_view_model(c, now, &self.session, &self.config))
            .collect()
    }

    /// The connected wallet's own campaigns.
    pub fn my_campaign_views(&self, now: Timestamp) -> Vec<CampaignView> {
        self.board
            .owned_by(&self.session)
            .iter()
            .map(|c| derive_view_model(c, now, &self.session, &self.config))
            .collect()
    }

    pub fn record_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Drain the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
