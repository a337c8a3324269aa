//! Credit packs and the payment seam.
//!
//! Payment providers are external collaborators. The engine trusts an
//! approved capture unconditionally and credits the ledger with the pack's
//! amount; there is no server-side verification.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::ledger::Ledger;
use crate::core::{ArcadeError, PaymentError, Result};

/// A purchasable bundle of credits.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditPack {
    pub sku: String,
    pub credits: i64,
    /// Display price, passed through to the provider as-is.
    pub price: String,
}

impl CreditPack {
    pub fn new(sku: impl Into<String>, credits: i64, price: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            credits,
            price: price.into(),
        }
    }
}

/// Ordered pack list with lookup by SKU.
#[derive(Clone, Debug, Default)]
pub struct PackCatalog {
    packs: Vec<CreditPack>,
    by_sku: FxHashMap<String, usize>,
}

impl PackCatalog {
    /// Build a catalog. A later pack with a repeated SKU replaces the earlier lookup.
    #[must_use]
    pub fn new(packs: Vec<CreditPack>) -> Self {
        let by_sku = packs
            .iter()
            .enumerate()
            .map(|(i, p)| (p.sku.clone(), i))
            .collect();
        Self { packs, by_sku }
    }

    #[must_use]
    pub fn get(&self, sku: &str) -> Option<&CreditPack> {
        self.by_sku.get(sku).map(|&i| &self.packs[i])
    }

    /// The pack preselected in the purchase dialog.
    #[must_use]
    pub fn default_pack(&self) -> Option<&CreditPack> {
        self.packs.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CreditPack> {
        self.packs.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.packs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}

/// An order created by a provider for a pack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDescriptor {
    pub order_id: String,
    pub sku: String,
    pub description: String,
    pub amount: String,
}

/// A captured (approved) order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedOrder {
    pub order_id: String,
    pub sku: String,
    pub payer: Option<String>,
}

/// External payment capability.
pub trait PaymentProvider {
    /// Create an order for a pack.
    fn create_order(&mut self, pack: &CreditPack) -> std::result::Result<OrderDescriptor, PaymentError>;

    /// Capture an approved order.
    fn capture(&mut self, order: &OrderDescriptor) -> std::result::Result<CapturedOrder, PaymentError>;
}

/// Client-side simulation: every order is approved.
#[derive(Clone, Debug, Default)]
pub struct SimulatedPayments {
    next_order: u64,
    payer: Option<String>,
}

impl SimulatedPayments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_payer(mut self, name: impl Into<String>) -> Self {
        self.payer = Some(name.into());
        self
    }

    /// Orders created so far.
    #[must_use]
    pub fn orders_created(&self) -> u64 {
        self.next_order
    }
}

impl PaymentProvider for SimulatedPayments {
    fn create_order(&mut self, pack: &CreditPack) -> std::result::Result<OrderDescriptor, PaymentError> {
        self.next_order += 1;
        Ok(OrderDescriptor {
            order_id: format!("SIM-{:06}", self.next_order),
            sku: pack.sku.clone(),
            description: format!("Purchase of {} virtual credits", pack.credits),
            amount: pack.price.clone(),
        })
    }

    fn capture(&mut self, order: &OrderDescriptor) -> std::result::Result<CapturedOrder, PaymentError> {
        Ok(CapturedOrder {
            order_id: order.order_id.clone(),
            sku: order.sku.clone(),
            payer: self.payer.clone(),
        })
    }
}

/// A completed purchase, as captured by the provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    pub order_id: String,
    /// The SKU the provider captured, which is what got credited.
    pub sku: String,
    pub credits: i64,
}

/// Run the order/capture flow for `sku` and credit the ledger.
///
/// Provider failures are logged and returned; the ledger is only touched
/// after a successful capture.
pub fn purchase(
    ledger: &mut Ledger,
    catalog: &PackCatalog,
    provider: &mut dyn PaymentProvider,
    sku: &str,
) -> Result<PurchaseReceipt> {
    let pack = catalog
        .get(sku)
        .ok_or_else(|| ArcadeError::UnknownPack(sku.to_string()))?;

    let captured = provider
        .create_order(pack)
        .and_then(|order| provider.capture(&order))
        .map_err(|err| {
            warn!(sku, error = %err, "payment failed");
            err
        })?;

    // Credit whatever the capture reports, as long as we sell it
    let granted = catalog
        .get(&captured.sku)
        .ok_or_else(|| ArcadeError::UnknownPack(captured.sku.clone()))?
        .credits;

    ledger.apply_delta(granted, 0);
    info!(
        order_id = %captured.order_id,
        sku = %captured.sku,
        credits = granted,
        "credits purchased"
    );
    Ok(PurchaseReceipt {
        order_id: captured.order_id,
        sku: captured.sku,
        credits: granted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EconomyConfig;

    struct DecliningProvider;

    impl PaymentProvider for DecliningProvider {
        fn create_order(&mut self, pack: &CreditPack) -> std::result::Result<OrderDescriptor, PaymentError> {
            Ok(OrderDescriptor {
                order_id: "X-1".to_string(),
                sku: pack.sku.clone(),
                description: String::new(),
                amount: pack.price.clone(),
            })
        }

        fn capture(&mut self, order: &OrderDescriptor) -> std::result::Result<CapturedOrder, PaymentError> {
            Err(PaymentError::CaptureFailed {
                order_id: order.order_id.clone(),
                reason: "declined".to_string(),
            })
        }
    }

    /// Captures the largest pack whatever was ordered.
    struct UpgradingProvider;

    impl PaymentProvider for UpgradingProvider {
        fn create_order(&mut self, pack: &CreditPack) -> std::result::Result<OrderDescriptor, PaymentError> {
            Ok(OrderDescriptor {
                order_id: "UP-1".to_string(),
                sku: pack.sku.clone(),
                description: String::new(),
                amount: pack.price.clone(),
            })
        }

        fn capture(&mut self, order: &OrderDescriptor) -> std::result::Result<CapturedOrder, PaymentError> {
            Ok(CapturedOrder {
                order_id: order.order_id.clone(),
                sku: "CREDIT_PACK_300".to_string(),
                payer: None,
            })
        }
    }

    fn race_catalog() -> PackCatalog {
        PackCatalog::new(vec![
            CreditPack::new("CREDIT_PACK_50", 50, "0.99"),
            CreditPack::new("CREDIT_PACK_120", 120, "1.99"),
            CreditPack::new("CREDIT_PACK_300", 300, "4.99"),
        ])
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = race_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("CREDIT_PACK_120").map(|p| p.credits), Some(120));
        assert!(catalog.get("CREDIT_PACK_9000").is_none());
        assert_eq!(catalog.default_pack().map(|p| p.sku.as_str()), Some("CREDIT_PACK_50"));
    }

    #[test]
    fn test_simulated_orders() {
        let mut provider = SimulatedPayments::new().with_payer("Ada");
        let pack = CreditPack::new("CREDIT_PACK_300", 300, "4.99");

        let order = provider.create_order(&pack).unwrap();
        assert_eq!(order.order_id, "SIM-000001");
        assert_eq!(order.amount, "4.99");
        assert_eq!(order.description, "Purchase of 300 virtual credits");

        let captured = provider.capture(&order).unwrap();
        assert_eq!(captured.sku, "CREDIT_PACK_300");
        assert_eq!(captured.payer.as_deref(), Some("Ada"));
        assert_eq!(provider.orders_created(), 1);
    }

    #[test]
    fn test_purchase_credits_ledger() {
        let mut ledger = Ledger::new(&EconomyConfig::default());
        let mut provider = SimulatedPayments::new();

        let receipt = purchase(&mut ledger, &race_catalog(), &mut provider, "CREDIT_PACK_120").unwrap();
        assert_eq!(
            receipt,
            PurchaseReceipt {
                order_id: "SIM-000001".to_string(),
                sku: "CREDIT_PACK_120".to_string(),
                credits: 120,
            }
        );
        assert_eq!(ledger.credits(), 220);
    }

    #[test]
    fn test_purchase_credits_captured_sku() {
        let mut ledger = Ledger::new(&EconomyConfig::default());

        let receipt = purchase(&mut ledger, &race_catalog(), &mut UpgradingProvider, "CREDIT_PACK_50").unwrap();
        assert_eq!(receipt.sku, "CREDIT_PACK_300");
        assert_eq!(receipt.credits, 300);
        assert_eq!(ledger.credits(), 400);
    }

    #[test]
    fn test_purchase_unknown_pack() {
        let mut ledger = Ledger::new(&EconomyConfig::default());
        let mut provider = SimulatedPayments::new();

        let err = purchase(&mut ledger, &race_catalog(), &mut provider, "NOPE").unwrap_err();
        assert_eq!(err, ArcadeError::UnknownPack("NOPE".to_string()));
        assert_eq!(ledger.credits(), 100);
        assert_eq!(provider.orders_created(), 0);
    }

    #[test]
    fn test_purchase_failure_leaves_ledger() {
        let mut ledger = Ledger::new(&EconomyConfig::default());

        let err = purchase(&mut ledger, &race_catalog(), &mut DecliningProvider, "CREDIT_PACK_50")
            .unwrap_err();
        assert!(matches!(err, ArcadeError::Payment(PaymentError::CaptureFailed { .. })));
        assert_eq!(ledger.credits(), 100);
    }
}
