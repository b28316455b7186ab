use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Event, Timestamp, Uint128};

use crate::context::AppContext;
use crate::error::{ClientError, GatewayError};
use crate::gateway::{LedgerGateway, WriteReceipt};
use crate::units::{is_amount_edit, parse_positive_units};
use crate::view_model::is_active;

/// Lifecycle of the donation modal. `Submitting` is the only in-flight marker.
#[cw_serde]
#[derive(Copy, Eq, Default)]
pub enum DonationPhase {
    #[default]
    Closed,
    Open,
    Submitting,
    /// Transient: reported, then immediately `Closed`.
    Failed,
}

impl std::fmt::Display for DonationPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DonationPhase::Closed => write!(f, "closed"),
            DonationPhase::Open => write!(f, "open"),
            DonationPhase::Submitting => write!(f, "submitting"),
            DonationPhase::Failed => write!(f, "failed"),
        }
    }
}

/// A validated donation that has entered `Submitting`.
#[cw_serde]
pub struct DonationTicket {
    pub campaign_id: u64,
    /// Smallest unit, parsed straight from the user's input
    pub amount: Uint128,
    pub amount_input: String,
}

#[cw_serde]
pub struct DonationReceipt {
    pub campaign_id: u64,
    pub amount: Uint128,
    pub tx_hash: String,
    pub block_height: u64,
    /// False when the post-donation re-fetch failed; the donation itself landed.
    pub refreshed: bool,
}

/// Donation modal controller.
#[derive(Debug, Default)]
pub struct DonationFlow {
    phase: DonationPhase,
    target_campaign_id: Option<u64>,
    amount_input: String,
    /// The ticket issued on entering `Submitting`
    in_flight: Option<DonationTicket>,
    last_error: Option<String>,
    last_notice: Option<String>,
    events: Vec<Event>,
}

impl DonationFlow {
    pub fn new() -> Self {
        DonationFlow::default()
    }

    pub fn phase(&self) -> DonationPhase {
        self.phase
    }

    pub fn target_campaign_id(&self) -> Option<u64> {
        self.target_campaign_id
    }

    pub fn amount_input(&self) -> &str {
        &self.amount_input
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// Whether the confirm action should be enabled.
    pub fn can_confirm(&self) -> bool {
        self.phase == DonationPhase::Open
    }

    /// Drain the event journal.
    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Open the modal for `campaign_id`. The campaign must be in the current snapshot,
    /// still active at `now`, and not owned by the connected wallet.
    pub fn open<G: LedgerGateway>(
        &mut self,
        ctx: &AppContext<G>,
        campaign_id: u64,
        now: Timestamp,
    ) -> Result<(), ClientError> {
        if self.phase != DonationPhase::Closed {
            return Err(self.invalid("open"));
        }

        let campaign = ctx
            .board()
            .campaign(campaign_id)
            .ok_or(ClientError::CampaignNotFound { id: campaign_id })?;
        if !is_active(campaign.deadline, now) {
            return Err(ClientError::CampaignInactive { id: campaign_id });
        }
        if ctx.session().owns(&campaign.owner) {
            return Err(ClientError::OwnCampaign { id: campaign_id });
        }

        self.target_campaign_id = Some(campaign_id);
        self.amount_input.clear();
        self.last_error = None;
        self.last_notice = None;
        self.transition(DonationPhase::Open);
        Ok(())
    }

    /// Apply a user edit to the amount field. Edits that are not a non-negative
    /// decimal are rejected and the previous value is kept.
    pub fn set_amount(&mut self, raw: &str) -> Result<(), ClientError> {
        if self.phase != DonationPhase::Open {
            return Err(self.invalid("edit the amount"));
        }
        if !is_amount_edit(raw) {
            return Err(ClientError::validation(format!(
                "'{}' is not a non-negative decimal number",
                raw
            )));
        }
        self.amount_input = raw.to_string();
        Ok(())
    }

    /// Close the modal. Not possible once a submission is in flight.
    pub fn cancel(&mut self) -> Result<(), ClientError> {
        match self.phase {
            DonationPhase::Closed => Ok(()),
            DonationPhase::Submitting => Err(self.invalid("cancel")),
            DonationPhase::Open | DonationPhase::Failed => {
                self.reset();
                self.transition(DonationPhase::Closed);
                Ok(())
            }
        }
    }

    /// Validate the amount and move `Open -> Submitting`.
    ///
    /// A bad amount leaves the flow `Open` with the validation message as `last_error`.
    pub fn begin_submit(&mut self, decimals: u32) -> Result<DonationTicket, ClientError> {
        if self.phase == DonationPhase::Submitting {
            return Err(ClientError::SubmissionInFlight {
                id: self.target_campaign_id.unwrap_or_default(),
            });
        }
        if self.phase != DonationPhase::Open {
            return Err(self.invalid("confirm"));
        }
        let campaign_id = self
            .target_campaign_id
            .ok_or_else(|| self.invalid("confirm"))?;

        let amount = match parse_positive_units(&self.amount_input, decimals) {
            Ok(amount) => amount,
            Err(err) => {
                self.last_error = Some(err.to_string());
                return Err(err);
            }
        };

        self.last_error = None;
        self.transition(DonationPhase::Submitting);
        self.events.push(
            Event::new("crowdfund_donation_submitted")
                .add_attribute("campaign_id", campaign_id.to_string())
                .add_attribute("amount", amount.to_string()),
        );

        let ticket = DonationTicket {
            campaign_id,
            amount,
            amount_input: self.amount_input.trim().to_string(),
        };
        self.in_flight = Some(ticket.clone());
        Ok(ticket)
    }

    /// Settle a submission. On success the campaign list is re-fetched once; on any
    /// failure nothing is re-fetched and a single `DonationFailed` is returned. Both
    /// paths end `Closed`.
    ///
    /// `ticket` must be the one `begin_submit` issued; any other ticket is rejected
    /// and the submission stays in flight.
    pub fn finish<G: LedgerGateway>(
        &mut self,
        ctx: &mut AppContext<G>,
        ticket: &DonationTicket,
        outcome: Result<WriteReceipt, GatewayError>,
    ) -> Result<DonationReceipt, ClientError> {
        if self.phase != DonationPhase::Submitting || self.in_flight.as_ref() != Some(ticket) {
            return Err(self.invalid("finish a donation"));
        }

        let receipt = match outcome {
            Ok(receipt) => receipt,
            Err(err) => {
                let failure = ClientError::DonationFailed {
                    reason: err.to_string(),
                };
                self.transition(DonationPhase::Failed);
                self.events.push(
                    Event::new("crowdfund_donation_failed")
                        .add_attribute("campaign_id", ticket.campaign_id.to_string())
                        .add_attribute("reason", err.to_string()),
                );
                self.last_error = Some(failure.to_string());
                self.reset();
                self.transition(DonationPhase::Closed);
                return Err(failure);
            }
        };

        self.events.push(
            Event::new("crowdfund_donation_confirmed")
                .add_attribute("campaign_id", ticket.campaign_id.to_string())
                .add_attribute("amount", ticket.amount.to_string())
                .add_attribute("tx_hash", receipt.tx_hash.clone())
                .add_attribute("block_height", receipt.block_height.to_string()),
        );
        self.last_notice = Some(format!(
            "You donated {}{} successfully!",
            ctx.config().currency_symbol,
            ticket.amount_input
        ));

        let refreshed = match ctx.refresh() {
            Ok(()) => true,
            Err(err) => {
                self.last_error = Some(format!("donation confirmed but refresh failed: {}", err));
                false
            }
        };

        self.reset();
        self.transition(DonationPhase::Closed);

        Ok(DonationReceipt {
            campaign_id: ticket.campaign_id,
            amount: ticket.amount,
            tx_hash: receipt.tx_hash,
            block_height: receipt.block_height,
            refreshed,
        })
    }

    /// Validate, submit, await confirmation and settle in one call.
    pub fn confirm<G: LedgerGateway>(
        &mut self,
        ctx: &mut AppContext<G>,
    ) -> Result<DonationReceipt, ClientError> {
        let ticket = self.begin_submit(ctx.config().decimals)?;
        let outcome = submit_donation(ctx.gateway_mut(), &ticket);
        self.finish(ctx, &ticket, outcome)
    }

    fn transition(&mut self, to: DonationPhase) {
        let from = self.phase;
        self.phase = to;
        self.events.push(
            Event::new("crowdfund_donation_phase")
                .add_attribute("from", from.to_string())
                .add_attribute("to", to.to_string()),
        );
    }

    fn reset(&mut self) {
        self.target_campaign_id = None;
        self.in_flight = None;
        self.amount_input.clear();
    }

    fn invalid(&self, action: &str) -> ClientError {
        ClientError::InvalidTransition {
            action: action.to_string(),
            phase: self.phase,
        }
    }
}

/// Issue the funded write for `ticket` and wait for the ledger to include it.
pub fn submit_donation<G: LedgerGateway>(
    gateway: &mut G,
    ticket: &DonationTicket,
) -> Result<WriteReceipt, GatewayError> {
    let pending = gateway.donate(ticket.campaign_id, ticket.amount)?;
    gateway.wait_for_confirmation(pending)
}
