//! Session economy: the ledger and the credit purchase flow.
//!
//! The ledger is only mutated by the round engine's outcome step and by
//! completed purchases. Display refresh is the caller's job.

mod ledger;
mod payment;

pub use ledger::{Ledger, LedgerSnapshot, LevelProgress};
pub use payment::{
    purchase, CapturedOrder, CreditPack, OrderDescriptor, PackCatalog, PaymentProvider,
    PurchaseReceipt, SimulatedPayments,
};
