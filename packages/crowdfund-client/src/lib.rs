pub mod board;
pub mod config;
pub mod context;
pub mod create;
pub mod donation;
pub mod error;
pub mod gateway;
pub mod search;
pub mod session;
pub mod units;
pub mod view_model;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use board::CampaignBoard;
pub use config::ClientConfig;
pub use context::AppContext;
pub use create::{create_campaign, CampaignDraft, CreateReceipt};
pub use donation::{submit_donation, DonationFlow, DonationPhase, DonationReceipt, DonationTicket};
pub use error::{ClientError, GatewayError};
pub use gateway::{LedgerGateway, PendingWrite, WriteReceipt};
pub use search::{filter_by_search, filter_owned_by, matches_search};
pub use session::WalletSession;
pub use view_model::{days_left, derive_view_model, is_active, progress, CampaignStatus, CampaignView};
