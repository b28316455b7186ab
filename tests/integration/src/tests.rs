//! Integration tests for the crowdfund client core.
//!
//! These tests drive whole user journeys (explore, donate, create, my campaigns)
//! through `AppContext` against the in-memory `MockLedger` from
//! `crowdfund_client::testing`.
//!
//! Run:
//! ```bash
//! cargo test -p crowdfund-integration-tests
//! ```

use cosmwasm_std::{from_json, to_json_string, Addr, Timestamp, Uint128};
use crowdfund_client::testing::{
    mock_campaign, mock_context, MockFailure, MockLedger, MOCK_CREATOR, MOCK_DONOR,
};
use crowdfund_client::{
    create_campaign, filter_by_search, AppContext, CampaignDraft, CampaignStatus, ClientConfig,
    ClientError, DonationFlow, DonationPhase,
};
use crowdfund_common::{CampaignRecord, LedgerExecuteMsg};

// ─── Constants ───

const ETH: u128 = 1_000_000_000_000_000_000;
const GENESIS: u64 = 1_700_000_000;

// ─── Helpers ───

fn now() -> Timestamp {
    Timestamp::from_seconds(GENESIS)
}

/// Ledger with four active campaigns by the creator and one expired one.
fn seeded_ledger() -> MockLedger {
    let mut ledger = MockLedger::new(now());
    ledger.add_campaign(mock_campaign(
        MOCK_CREATOR,
        "Clean water",
        10 * ETH,
        5 * ETH / 2,
        now().plus_days(5),
    ));
    ledger.add_campaign(mock_campaign(
        MOCK_CREATOR,
        "Library books",
        ETH,
        0,
        now().plus_days(12),
    ));
    ledger.add_campaign(mock_campaign(
        MOCK_CREATOR,
        "Solar school",
        4 * ETH,
        5 * ETH,
        now().plus_days(1),
    ));
    ledger.add_campaign(mock_campaign(
        MOCK_CREATOR,
        "Robotics club",
        3 * ETH,
        0,
        now().plus_days(30),
    ));
    ledger.add_campaign(mock_campaign(
        MOCK_CREATOR,
        "Winter coats",
        2 * ETH,
        ETH,
        now().minus_days(2),
    ));
    ledger
}

fn connected_context() -> AppContext<MockLedger> {
    let mut ctx = mock_context(seeded_ledger());
    ctx.connect().unwrap();
    ctx.load().unwrap();
    ctx
}

fn event_types(ctx: &mut AppContext<MockLedger>) -> Vec<String> {
    ctx.take_events().into_iter().map(|e| e.ty).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[test]
fn test_explore_view_models() {
    let ctx = connected_context();
    let views = ctx.views(now());
    assert_eq!(views.len(), 5);

    // 2.5 of 10 ETH, five days out
    let water = &views[0];
    assert_eq!(water.status, CampaignStatus::Active);
    assert_eq!(water.days_left, 5);
    assert_eq!(water.progress_percent, 25.0);
    assert_eq!(water.collected_label(ctx.config()), "Ξ 2.5000");
    assert_eq!(water.target_label(ctx.config()), "Ξ 10.0000");
    assert_eq!(water.image, ctx.config().placeholder_image);
    assert!(water.can_donate);

    // over-funded campaigns cap at 100%
    assert_eq!(views[2].progress_percent, 100.0);

    let coats = &views[4];
    assert_eq!(coats.status, CampaignStatus::Inactive);
    assert_eq!(coats.days_left, 0);
    assert_eq!(coats.progress_percent, 50.0);
    assert!(!coats.can_donate);

    for view in &views {
        assert!((0.0..=100.0).contains(&view.progress_percent));
        assert!(!view.is_owned_by_viewer);
    }
}

#[test]
fn test_days_left_counts_down_with_the_clock() {
    let ctx = connected_context();
    let later = now().plus_days(4).plus_seconds(60);
    let views = ctx.views(later);
    assert_eq!(views[0].days_left, 0);
    assert_eq!(views[0].status, CampaignStatus::Active);

    let at_deadline = ctx.views(now().plus_days(5));
    assert_eq!(at_deadline[0].status, CampaignStatus::Inactive);
}

#[test]
fn test_search() {
    let ctx = connected_context();
    let records = ctx.board().campaigns();

    assert_eq!(filter_by_search(records, ""), records.to_vec());
    assert!(filter_by_search(records, "XYZ").is_empty());

    let hits: Vec<u64> = ctx.search_views("SCHOOL", now()).iter().map(|v| v.id).collect();
    assert_eq!(hits, vec![2]);

    // description matches count too
    let hits: Vec<u64> = ctx
        .search_views("books description", now())
        .iter()
        .map(|v| v.id)
        .collect();
    assert_eq!(hits, vec![1]);
}

#[test]
fn test_donation_happy_path() {
    let mut ctx = connected_context();
    let mut flow = DonationFlow::new();
    let list_calls = ctx.gateway().list_calls();

    flow.open(&ctx, 3, now()).unwrap();
    flow.set_amount("0.05").unwrap();
    let receipt = flow.confirm(&mut ctx).unwrap();

    assert_eq!(flow.phase(), DonationPhase::Closed);
    assert_eq!(receipt.campaign_id, 3);
    assert_eq!(receipt.amount, Uint128::new(ETH / 20));
    assert!(receipt.refreshed);

    // exactly one re-fetch, issued after confirmation
    assert_eq!(ctx.gateway().list_calls(), list_calls + 1);

    // the funded write addressed campaign 3
    let writes = ctx.gateway().submitted_writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].msg, LedgerExecuteMsg::DonateCampaign { id: 3 });
    assert_eq!(writes[0].funds, Uint128::new(ETH / 20));

    // the refreshed snapshot reflects the donation
    let views = ctx.views(now());
    assert_eq!(views[3].collected_decimal, 0.05);
    assert_eq!(views[3].progress_percent, 1.67);

    let phases: Vec<String> = flow
        .take_events()
        .into_iter()
        .filter(|e| e.ty == "crowdfund_donation_phase")
        .map(|e| e.attributes[1].value.clone())
        .collect();
    assert_eq!(phases, vec!["open", "submitting", "closed"]);
}

#[test]
fn test_donation_validation_never_leaves_open() {
    let mut ctx = connected_context();
    let mut flow = DonationFlow::new();
    flow.open(&ctx, 0, now()).unwrap();

    for raw in ["0", ""] {
        flow.set_amount(raw).unwrap();
        let err = flow.confirm(&mut ctx).unwrap_err();
        assert!(matches!(err, ClientError::Validation { .. }));
        assert_eq!(flow.phase(), DonationPhase::Open);
    }

    let err = flow.set_amount("-1").unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    let err = flow.confirm(&mut ctx).unwrap_err();
    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(flow.phase(), DonationPhase::Open);

    assert!(ctx.gateway().submitted_writes().is_empty());
}

#[test]
fn test_donation_rejected_in_wallet() {
    let mut ctx = connected_context();
    let mut flow = DonationFlow::new();
    let before: Vec<CampaignRecord> = ctx.board().campaigns().to_vec();
    let list_calls = ctx.gateway().list_calls();

    ctx.gateway_mut()
        .fail_next(MockFailure::RejectWrite("user rejected the request".to_string()));
    flow.open(&ctx, 1, now()).unwrap();
    flow.set_amount("0.3").unwrap();

    let err = flow.confirm(&mut ctx).unwrap_err();
    assert!(matches!(err, ClientError::DonationFailed { .. }));
    assert_eq!(flow.phase(), DonationPhase::Closed);

    let failures = flow
        .take_events()
        .into_iter()
        .filter(|e| e.ty == "crowdfund_donation_failed")
        .count();
    assert_eq!(failures, 1);

    // nothing moved: no re-fetch, same snapshot, same ledger state
    assert_eq!(ctx.gateway().list_calls(), list_calls);
    assert_eq!(ctx.board().campaigns(), before.as_slice());
    assert_eq!(ctx.gateway().campaigns(), before.as_slice());

    // no automatic retry, but the user can try again
    flow.open(&ctx, 1, now()).unwrap();
    flow.set_amount("0.3").unwrap();
    flow.confirm(&mut ctx).unwrap();
    assert_eq!(
        ctx.board().campaign(1).unwrap().amount_collected,
        Uint128::new(3 * ETH / 10)
    );
}

#[test]
fn test_donation_reverted_after_deadline_passes() {
    let mut ctx = connected_context();
    let mut flow = DonationFlow::new();

    // opened while active, confirmed on a ledger whose clock has moved past the deadline
    flow.open(&ctx, 2, now()).unwrap();
    flow.set_amount("1").unwrap();
    ctx.gateway_mut().set_block_time(now().plus_days(2));

    let err = flow.confirm(&mut ctx).unwrap_err();
    assert!(err.to_string().contains("has ended"));
    assert_eq!(flow.phase(), DonationPhase::Closed);
}

#[test]
fn test_owner_cannot_donate_to_own_campaign() {
    let mut ledger = seeded_ledger();
    ledger.set_wallet(Some(Addr::unchecked(MOCK_CREATOR.to_uppercase())));
    let mut ctx = mock_context(ledger);
    ctx.connect().unwrap();
    ctx.load().unwrap();

    let views = ctx.views(now());
    assert!(views.iter().all(|v| v.is_owned_by_viewer && !v.can_donate));
    assert_eq!(ctx.my_campaign_views(now()).len(), 5);

    let mut flow = DonationFlow::new();
    let err = flow.open(&ctx, 0, now()).unwrap_err();
    assert!(matches!(err, ClientError::OwnCampaign { id: 0 }));
}

#[test]
fn test_create_then_donate_then_my_campaigns() {
    let mut ctx = connected_context();
    assert_eq!(ctx.session().short_address().unwrap(), "0xab84...5cb2");
    assert!(ctx.my_campaign_views(now()).is_empty());

    let draft = CampaignDraft {
        title: "Night shelter".to_string(),
        description: "Beds for winter".to_string(),
        target: "1.5".to_string(),
        duration_days: "7".to_string(),
        image: "https://example.org/shelter.png".to_string(),
    };
    let receipt = create_campaign(&mut ctx, &draft).unwrap();
    assert!(receipt.refreshed);
    assert!(event_types(&mut ctx).contains(&"crowdfund_campaign_created".to_string()));

    let mine = ctx.my_campaign_views(now());
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, 5);
    assert_eq!(mine[0].owner.as_str(), MOCK_DONOR);
    assert_eq!(mine[0].days_left, 7);
    assert_eq!(mine[0].image, "https://example.org/shelter.png");
    assert!(!mine[0].can_donate);

    // someone else donates to it
    ctx.gateway_mut()
        .set_wallet(Some(Addr::unchecked(MOCK_CREATOR)));
    ctx.connect().unwrap();
    let mut flow = DonationFlow::new();
    flow.open(&ctx, 5, now()).unwrap();
    flow.set_amount("0.75").unwrap();
    flow.confirm(&mut ctx).unwrap();

    let views = ctx.views(now());
    assert_eq!(views[5].progress_percent, 50.0);
}

#[test]
fn test_provider_missing() {
    let mut ledger = seeded_ledger();
    ledger.set_available(false);
    let mut ctx = mock_context(ledger);

    let err = ctx.load().unwrap_err();
    assert!(matches!(err, ClientError::Gateway(_)));
    assert!(ctx.views(now()).is_empty());

    // the provider comes back and a manual reload works
    ctx.gateway_mut().set_available(true);
    ctx.load().unwrap();
    assert_eq!(ctx.views(now()).len(), 5);
}

#[test]
fn test_config_from_json() {
    let config = ClientConfig::from_json(
        r#"{"contract_address":"0xad8112a1703a6e269ed4e3100ee62e48c4972aaf","display_precision":2}"#,
    )
    .unwrap();
    let mut ctx = AppContext::new(seeded_ledger(), config).unwrap();
    ctx.load().unwrap();

    let views = ctx.views(now());
    assert_eq!(views[0].collected_label(ctx.config()), "Ξ 2.50");
}

#[test]
fn test_record_wire_format() {
    let ctx = connected_context();
    let record = ctx.board().campaign(0).unwrap();
    let json = to_json_string(record).unwrap();
    let parsed: CampaignRecord = from_json(json.as_bytes()).unwrap();
    assert_eq!(&parsed, record);

    let msg: LedgerExecuteMsg = serde_json::from_str(r#"{"donate_campaign":{"id":3}}"#).unwrap();
    assert_eq!(msg, LedgerExecuteMsg::DonateCampaign { id: 3 });
    assert_eq!(msg.action(), "donate_campaign");
}
