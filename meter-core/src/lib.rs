pub mod calculations;
pub mod clock;
pub mod error;
pub mod ledger;
pub mod models;
pub mod ports;
pub mod search;
pub mod session;
pub mod tariffs;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use clock::{ClockSettings, RideClock};
pub use error::{MeterError, RideAction};
pub use ledger::{LedgerSummary, RideLedger};
pub use models::*;
pub use search::{DestinationSearch, SearchRequest, SearchSettings};
pub use session::MeterSession;
pub use tariffs::TariffRegistry;
