use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};

pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// A campaign as returned by the ledger's `getCampaigns` call.
/// Snapshot semantics: `id` is the campaign's index in that snapshot.
#[cw_serde]
pub struct CampaignRecord {
    pub id: u64,
    pub owner: Addr,
    pub title: String,
    pub description: String,
    /// Cover image URL. Empty or missing falls back to the client placeholder.
    pub image: Option<String>,
    /// Funding goal in the ledger's smallest unit (wei)
    pub target: Uint128,
    /// Total donated so far, smallest unit
    pub amount_collected: Uint128,
    pub deadline: Timestamp,
}

impl CampaignRecord {
    /// The image URL if one was set on creation.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|url| !url.is_empty())
    }
}
