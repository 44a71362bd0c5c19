mod geo;
mod map_frame;
mod ride;
mod ride_record;
mod settlement;
mod tariff;
mod tip_options;

pub use geo::{AddressCandidate, Destination, GeoPoint};
pub use map_frame::{DEFAULT_ZOOM, MapFrame};
pub use ride::{RideState, RideStatus};
pub use ride_record::{RecordId, RideRecord};
pub use settlement::Settlement;
pub use tariff::{PresetId, TariffConfig, TariffField, TariffPreset, TariffPresetDraft};
pub use tip_options::TipOptionSet;
