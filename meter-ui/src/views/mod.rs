//! Plain-text renderings of the meter screens.

pub mod history;
pub mod meter;
pub mod payment;
pub mod status_bar;
pub mod tariffs;

pub use history::render_history;
pub use meter::{render_map_caption, render_meter};
pub use payment::render_payment;
pub use tariffs::render_tariffs;
