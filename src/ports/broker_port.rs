//! Order placement port trait.

use crate::domain::error::AlphalabError;

pub trait BrokerPort {
    /// Place a market buy order; returns the broker's order id.
    fn buy(&self, symbol: &str, exchange: &str, quantity: u32) -> Result<String, AlphalabError>;

    /// Place a market sell order; returns the broker's order id.
    fn sell(&self, symbol: &str, exchange: &str, quantity: u32) -> Result<String, AlphalabError>;
}
