//! Order intake
//!
//! Validates raw `new_order` requests and admits them as open orders.
//! Rejected requests never touch the book and never broadcast.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use types::ids::{Asset, UserId};
use types::numeric::{Amount, Price};
use types::order::{Order, Side};

/// Raw order request as received from a client
///
/// Field names follow the wire protocol; decimals accept JSON numbers or
/// strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,
    pub asset: String,
    #[serde(rename = "order_type")]
    pub side: Side,
    pub price: Decimal,
    pub amount: Decimal,
}

/// Intake rejection reasons
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("invalid order: {reason}")]
    InvalidOrder { reason: String },

    #[error("unknown asset: {symbol}")]
    UnknownAsset { symbol: String },
}

/// Order intake: validation against the configured asset registry
#[derive(Debug, Clone)]
pub struct Intake {
    assets: HashSet<Asset>,
}

impl Intake {
    /// Create an intake admitting orders for the given assets
    pub fn new(assets: impl IntoIterator<Item = Asset>) -> Self {
        Self {
            assets: assets.into_iter().collect(),
        }
    }

    /// Whether the asset symbol is tradable
    pub fn knows(&self, asset: &Asset) -> bool {
        self.assets.contains(asset)
    }

    /// The registered assets
    pub fn assets(&self) -> impl Iterator<Item = &Asset> {
        self.assets.iter()
    }

    /// Validate a request and construct an open order
    pub fn admit(&self, request: OrderRequest, timestamp: i64) -> Result<Order, IntakeError> {
        if request.user_id.trim().is_empty() {
            return Err(IntakeError::InvalidOrder {
                reason: "user_id must not be empty".to_string(),
            });
        }

        let price = Price::try_new(request.price).map_err(|e| IntakeError::InvalidOrder {
            reason: e.to_string(),
        })?;

        if request.amount <= Decimal::ZERO {
            return Err(IntakeError::InvalidOrder {
                reason: format!("amount must be positive, got {}", request.amount),
            });
        }
        let amount = Amount::try_new(request.amount).map_err(|e| IntakeError::InvalidOrder {
            reason: e.to_string(),
        })?;

        let asset = Asset::new(request.asset);
        if !self.knows(&asset) {
            return Err(IntakeError::UnknownAsset {
                symbol: asset.as_str().to_string(),
            });
        }

        Ok(Order::new(
            UserId::new(request.user_id),
            asset,
            request.side,
            price,
            amount,
            timestamp,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::order::OrderStatus;

    const TS: i64 = 1708123456789000000;

    fn intake() -> Intake {
        Intake::new([Asset::new("Asset1"), Asset::new("Asset2")])
    }

    fn request() -> OrderRequest {
        OrderRequest {
            user_id: "user1".to_string(),
            asset: "Asset1".to_string(),
            side: Side::Buy,
            price: Decimal::new(1050, 2),
            amount: Decimal::from(60),
        }
    }

    #[test]
    fn test_admit_valid_request() {
        let order = intake().admit(request(), TS).unwrap();

        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.user_id.as_str(), "user1");
        assert_eq!(order.asset.as_str(), "Asset1");
        assert_eq!(order.price, Price::from_str("10.50").unwrap());
        assert_eq!(order.remaining_amount, Amount::from_str("60").unwrap());
        assert_eq!(order.created_at, TS);
    }

    #[test]
    fn test_reject_non_positive_price() {
        let mut req = request();
        req.price = Decimal::ZERO;
        assert!(matches!(
            intake().admit(req, TS),
            Err(IntakeError::InvalidOrder { .. })
        ));

        let mut req = request();
        req.price = Decimal::from(-1);
        assert!(matches!(
            intake().admit(req, TS),
            Err(IntakeError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_reject_non_positive_amount() {
        let mut req = request();
        req.amount = Decimal::ZERO;
        assert!(matches!(
            intake().admit(req, TS),
            Err(IntakeError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_reject_empty_user() {
        let mut req = request();
        req.user_id = "  ".to_string();
        assert!(matches!(
            intake().admit(req, TS),
            Err(IntakeError::InvalidOrder { .. })
        ));
    }

    #[test]
    fn test_reject_unknown_asset() {
        let mut req = request();
        req.asset = "Asset99".to_string();
        assert_eq!(
            intake().admit(req, TS),
            Err(IntakeError::UnknownAsset {
                symbol: "Asset99".to_string()
            })
        );
    }

    #[test]
    fn test_request_wire_format() {
        let json = r#"{
            "user_id": "user1",
            "asset": "Asset1",
            "order_type": "buy",
            "price": 10.50,
            "amount": 60
        }"#;
        let req: OrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.side, Side::Buy);
        assert_eq!(req.price, Decimal::new(1050, 2));

        let order = intake().admit(req, TS).unwrap();
        assert_eq!(order.amount, Amount::from_str("60").unwrap());
    }

    #[test]
    fn test_bad_order_type_fails_to_parse() {
        let json = r#"{
            "user_id": "user1",
            "asset": "Asset1",
            "order_type": "hold",
            "price": 10.50,
            "amount": 60
        }"#;
        assert!(serde_json::from_str::<OrderRequest>(json).is_err());
    }
}
