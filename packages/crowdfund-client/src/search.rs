use crowdfund_common::CampaignRecord;

use crate::session::WalletSession;

/// Case-insensitive substring match on title or description. An empty term matches
/// every record.
pub fn matches_search(record: &CampaignRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    record.title.to_lowercase().contains(&needle)
        || record.description.to_lowercase().contains(&needle)
}

/// Records matching `term`, in their original order.
pub fn filter_by_search(records: &[CampaignRecord], term: &str) -> Vec<CampaignRecord> {
    records
        .iter()
        .filter(|r| matches_search(r, term))
        .cloned()
        .collect()
}

/// Records created by the connected wallet. Empty when no wallet is connected.
pub fn filter_owned_by(records: &[CampaignRecord], viewer: &WalletSession) -> Vec<CampaignRecord> {
    records
        .iter()
        .filter(|r| viewer.owns(&r.owner))
        .cloned()
        .collect()
}
