pub mod consumption;
pub mod entities;
pub mod expiry;
pub mod merge;
pub mod ports;
pub mod ranking;
pub mod services;
pub mod validation;
pub mod value_objects;

pub use consumption::{ConsumptionOutcome, ConsumptionRequest, SkippedRequest, consume};
pub use entities::*;
pub use expiry::ExpiryDate;
pub use merge::merge;
pub use ports::*;
pub use ranking::{RankedInventory, RankedItem, Urgency, UrgencyLevel, rank, ranked_inventory};
pub use validation::{RejectedItem, ValidatedItems, validate_scanned};
pub use value_objects::*;
