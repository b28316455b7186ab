pub mod msg;
pub mod types;

pub use msg::{LedgerExecuteMsg, LedgerQueryMsg};
pub use types::{CampaignRecord, SECONDS_PER_DAY};
