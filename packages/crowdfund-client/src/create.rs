use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Event, Uint128};
use crowdfund_common::{LedgerExecuteMsg, SECONDS_PER_DAY};

use crate::context::AppContext;
use crate::error::{ClientError, GatewayError};
use crate::gateway::{LedgerGateway, WriteReceipt};
use crate::units::parse_positive_units;

/// Raw contents of the campaign creation form.
#[cw_serde]
#[derive(Default)]
pub struct CampaignDraft {
    pub title: String,
    pub description: String,
    /// Decimal-unit goal as typed, e.g. "10" or "2.5"
    pub target: String,
    /// Whole days the campaign stays open
    pub duration_days: String,
    pub image: String,
}

/// A draft that passed validation, with amounts in ledger units.
#[cw_serde]
pub struct ValidatedCampaign {
    pub title: String,
    pub description: String,
    pub target: Uint128,
    pub duration_seconds: u64,
    pub image: String,
}

#[cw_serde]
pub struct CreateReceipt {
    pub tx_hash: String,
    pub block_height: u64,
    pub refreshed: bool,
}

impl CampaignDraft {
    pub fn validate(&self, decimals: u32) -> Result<ValidatedCampaign, ClientError> {
        let fields = [
            &self.title,
            &self.description,
            &self.target,
            &self.duration_days,
            &self.image,
        ];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ClientError::validation("All fields are required."));
        }

        let target = parse_positive_units(&self.target, decimals)?;

        let days: u64 = self.duration_days.trim().parse().map_err(|_| {
            ClientError::validation(format!(
                "duration '{}' is not a whole number of days",
                self.duration_days.trim()
            ))
        })?;
        if days == 0 {
            return Err(ClientError::validation("duration must be at least one day"));
        }
        let duration_seconds = days
            .checked_mul(SECONDS_PER_DAY)
            .ok_or_else(|| ClientError::validation(format!("duration of {} days is too long", days)))?;

        Ok(ValidatedCampaign {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            target,
            duration_seconds,
            image: self.image.trim().to_string(),
        })
    }
}

/// Validate `draft`, submit it as the connected wallet, wait for confirmation, then
/// re-fetch the campaign list. Connects the wallet first when no session exists.
pub fn create_campaign<G: LedgerGateway>(
    ctx: &mut AppContext<G>,
    draft: &CampaignDraft,
) -> Result<CreateReceipt, ClientError> {
    let campaign = draft.validate(ctx.config().decimals)?;

    let owner = match ctx.session().address().cloned() {
        Some(addr) => addr,
        None => ctx.connect()?,
    };

    let msg = LedgerExecuteMsg::CreateCampaign {
        owner: owner.to_string(),
        title: campaign.title.clone(),
        description: campaign.description.clone(),
        target: campaign.target,
        duration_seconds: campaign.duration_seconds,
        image: campaign.image.clone(),
    };

    let receipt = submit_create(ctx.gateway_mut(), &msg).map_err(|err| {
        ClientError::CreateFailed {
            reason: err.to_string(),
        }
    });
    let receipt = match receipt {
        Ok(receipt) => receipt,
        Err(err) => {
            ctx.record_event(
                Event::new("crowdfund_campaign_create_failed")
                    .add_attribute("owner", owner.to_string())
                    .add_attribute("reason", err.to_string()),
            );
            return Err(err);
        }
    };

    ctx.record_event(
        Event::new("crowdfund_campaign_created")
            .add_attribute("owner", owner.to_string())
            .add_attribute("title", campaign.title)
            .add_attribute("target", campaign.target.to_string())
            .add_attribute("duration_seconds", campaign.duration_seconds.to_string())
            .add_attribute("tx_hash", receipt.tx_hash.clone()),
    );

    let refreshed = match ctx.refresh() {
        Ok(()) => true,
        Err(err) => {
            ctx.record_event(
                Event::new("crowdfund_refresh_failed").add_attribute("reason", err.to_string()),
            );
            false
        }
    };

    Ok(CreateReceipt {
        tx_hash: receipt.tx_hash,
        block_height: receipt.block_height,
        refreshed,
    })
}

fn submit_create<G: LedgerGateway>(
    gateway: &mut G,
    msg: &LedgerExecuteMsg,
) -> Result<WriteReceipt, GatewayError> {
    let pending = gateway.create_campaign(msg)?;
    gateway.wait_for_confirmation(pending)
}
