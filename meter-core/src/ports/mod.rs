//! Capabilities the meter depends on but does not implement.
//!
//! Front ends provide real implementations (timers, device location, a
//! geocoding service); tests provide scripted ones.

pub mod address;
pub mod geolocation;
pub mod schedule;

pub use address::{AddressSearch, SearchError};
pub use geolocation::{GeolocationError, Geolocator, locate_or_fallback};
pub use schedule::{PositionFeed, TickSchedule, WatchOptions};
