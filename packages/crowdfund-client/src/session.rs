use cosmwasm_std::{Addr, Event};

use crate::error::{ClientError, GatewayError};
use crate::gateway::LedgerGateway;

/// The user's wallet connection as seen by the client.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletSession {
    address: Option<Addr>,
}

impl WalletSession {
    pub fn disconnected() -> Self {
        WalletSession { address: None }
    }

    pub fn connected(address: Addr) -> Self {
        WalletSession {
            address: Some(address),
        }
    }

    /// Adopt the wallet account the gateway currently has authorized.
    pub fn connect<G: LedgerGateway>(&mut self, gateway: &G) -> Result<Event, ClientError> {
        let address = gateway
            .connected_address()
            .filter(|a| !a.as_str().is_empty())
            .ok_or(ClientError::Gateway(GatewayError::Unavailable))?;
        self.address = Some(address.clone());

        Ok(Event::new("crowdfund_wallet")
            .add_attribute("action", "connect")
            .add_attribute("address", address.to_string()))
    }

    /// Forget the connected account. Local only, the wallet itself stays authorized.
    pub fn disconnect(&mut self) -> Event {
        let previous = self.address.take();
        Event::new("crowdfund_wallet")
            .add_attribute("action", "disconnect")
            .add_attribute(
                "address",
                previous.map(|a| a.to_string()).unwrap_or_default(),
            )
    }

    pub fn address(&self) -> Option<&Addr> {
        self.address.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    /// Case-insensitive address comparison; no checksum validation is performed.
    /// A disconnected or empty address owns nothing.
    pub fn owns(&self, owner: &Addr) -> bool {
        match &self.address {
            Some(addr) if !addr.as_str().is_empty() => {
                addr.as_str().eq_ignore_ascii_case(owner.as_str())
            }
            _ => false,
        }
    }

    /// `0x1234...abcd` form for compact display.
    pub fn short_address(&self) -> Option<String> {
        self.address.as_ref().map(|a| shorten_address(a.as_str()))
    }
}

pub fn shorten_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
