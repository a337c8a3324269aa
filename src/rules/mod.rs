//! Rules trait for game variants.
//!
//! Variants implement `RoundRules` to define:
//! - Legal commands for each phase
//! - How commands move the round and the ledger
//! - When credit purchases are allowed
//!
//! Callers (UI glue, Python bindings, tests) drive either variant through
//! this trait without knowing which one they hold.

pub mod engine;

pub use engine::RoundRules;
