//! Paper broker adapter: records orders locally, never touches a market.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::error::AlphalabError;
use crate::ports::broker_port::BrokerPort;

#[derive(Default)]
pub struct PaperBrokerAdapter {
    sequence: AtomicU64,
}

impl PaperBrokerAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn order_id(&self, side: &str, symbol: &str, quantity: u32) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("ORDER-{side}-{symbol}-{quantity}-{seq}")
    }
}

impl BrokerPort for PaperBrokerAdapter {
    fn buy(&self, symbol: &str, _exchange: &str, quantity: u32) -> Result<String, AlphalabError> {
        if quantity == 0 {
            return Err(AlphalabError::Data {
                reason: "order quantity must be positive".to_string(),
            });
        }
        Ok(self.order_id("BUY", symbol, quantity))
    }

    fn sell(&self, symbol: &str, _exchange: &str, quantity: u32) -> Result<String, AlphalabError> {
        if quantity == 0 {
            return Err(AlphalabError::Data {
                reason: "order quantity must be positive".to_string(),
            });
        }
        Ok(self.order_id("SELL", symbol, quantity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_and_sell_return_sequenced_ids() {
        let broker = PaperBrokerAdapter::new();
        let buy = broker.buy("RELIANCE", "NSE", 10).unwrap();
        let sell = broker.sell("RELIANCE", "NSE", 10).unwrap();
        assert_eq!(buy, "ORDER-BUY-RELIANCE-10-1");
        assert_eq!(sell, "ORDER-SELL-RELIANCE-10-2");
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let broker = PaperBrokerAdapter::new();
        assert!(broker.buy("RELIANCE", "NSE", 0).is_err());
        assert!(broker.sell("RELIANCE", "NSE", 0).is_err());
    }
}
