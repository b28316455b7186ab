use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use crowdfund_common::{CampaignRecord, SECONDS_PER_DAY};

use crate::config::ClientConfig;
use crate::session::WalletSession;
use crate::units::{format_display, to_display_units};

/// Progress is computed in basis points of the target, so 2 decimal places of a percent.
const BPS_SCALE: u128 = 10_000;

#[cw_serde]
pub enum CampaignStatus {
    Active,
    Inactive,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Active => write!(f, "Active"),
            CampaignStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Render-ready view of a campaign at a given instant.
#[cw_serde]
pub struct CampaignView {
    pub id: u64,
    pub owner: Addr,
    pub title: String,
    pub description: String,
    /// Cover image, placeholder already substituted
    pub image: String,
    pub collected_decimal: f64,
    pub target_decimal: f64,
    pub days_left: u64,
    pub status: CampaignStatus,
    /// In [0, 100], 2 decimal places
    pub progress_percent: f64,
    pub is_owned_by_viewer: bool,
    /// Active and not the viewer's own campaign
    pub can_donate: bool,
}

impl CampaignView {
    pub fn collected_label(&self, config: &ClientConfig) -> String {
        format!(
            "{} {}",
            config.currency_symbol,
            format_display(self.collected_decimal, config.display_precision)
        )
    }

    pub fn target_label(&self, config: &ClientConfig) -> String {
        format!(
            "{} {}",
            config.currency_symbol,
            format_display(self.target_decimal, config.display_precision)
        )
    }
}

/// Whole days until `deadline`, truncated. Zero once the deadline has passed.
pub fn days_left(deadline: Timestamp, now: Timestamp) -> u64 {
    deadline.seconds().saturating_sub(now.seconds()) / SECONDS_PER_DAY
}

/// A campaign accepts donations strictly before its deadline.
pub fn is_active(deadline: Timestamp, now: Timestamp) -> bool {
    deadline > now
}

pub fn status(deadline: Timestamp, now: Timestamp) -> CampaignStatus {
    if is_active(deadline, now) {
        CampaignStatus::Active
    } else {
        CampaignStatus::Inactive
    }
}

/// Funding progress as a percentage of `target`, clamped to 100 and rounded half-up
/// to 2 decimal places. A zero target reports 0.
///
/// Both amounts share a unit, so the ratio is taken on the raw integers and matches
/// the decimal-unit ratio exactly.
pub fn progress(collected: Uint128, target: Uint128) -> f64 {
    if target.is_zero() {
        return 0.0;
    }
    if collected >= target {
        return 100.0;
    }
    // floor(2x) then halve with carry rounds x half-up
    let doubled = collected.multiply_ratio(2 * BPS_SCALE, target);
    let bps = (doubled.u128() + 1) / 2;
    bps.min(BPS_SCALE) as f64 / 100.0
}

/// Derive everything a campaign card needs from a record and the current time.
pub fn derive_view_model(
    record: &CampaignRecord,
    now: Timestamp,
    viewer: &WalletSession,
    config: &ClientConfig,
) -> CampaignView {
    let status = status(record.deadline, now);
    let is_owned_by_viewer = viewer.owns(&record.owner);

    CampaignView {
        id: record.id,
        owner: record.owner.clone(),
        title: record.title.clone(),
        description: record.description.clone(),
        image: record
            .image_url()
            .unwrap_or(config.placeholder_image.as_str())
            .to_string(),
        collected_decimal: to_display_units(record.amount_collected, config.decimals),
        target_decimal: to_display_units(record.target, config.decimals),
        days_left: days_left(record.deadline, now),
        can_donate: status == CampaignStatus::Active && !is_owned_by_viewer,
        status,
        progress_percent: progress(record.amount_collected, record.target),
        is_owned_by_viewer,
    }
}
