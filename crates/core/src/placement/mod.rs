//! Automatic placement
//!
//! Selection is pure; the gateway is the only code that writes.

pub mod gateway;
pub mod locks;
pub mod selector;
pub mod service;

pub use gateway::CalendarGateway;
pub use locks::{OwnerGuard, OwnerLocks};
pub use selector::{select_slot, target_date, Selection, SlotChoice};
pub use service::PlacementService;
