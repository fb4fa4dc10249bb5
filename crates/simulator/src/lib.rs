//! Savings simulator: bottled-water jugs versus a purifier with refills.
//!
//! The calculation itself is pure ([`simulate`]); [`SimulatorSession`] keeps
//! the visitor's inputs and catalog selection between recomputations.

pub mod calculator;
pub mod contact;
pub mod money;
pub mod session;

pub use calculator::{Balance, ConsumptionProfile, Projection, simulate};
pub use contact::ContactLink;
pub use money::{format_brl, format_price_label};
pub use session::SimulatorSession;
