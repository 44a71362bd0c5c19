//! Wiring between configuration, the tokio runtime and the meter session.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use meter_core::ports::{AddressSearch, Geolocator, locate_or_fallback};
use meter_core::{
    Destination, DestinationSearch, MapFrame, MeterSession, RideClock, RideRecord, Settlement, TariffRegistry,
};
use tracing::{info, warn};

use crate::config::MeterConfig;
use crate::runtime::{DriftingPositionFeed, Epoch, MeterDriver, SearchDriver, TokioTickSchedule, event_channel};
use crate::state::{Screen, ViewState};
use crate::views;

/// Extra time allowed for a lookup on top of the debounce.
const SEARCH_GRACE: Duration = Duration::from_secs(10);

/// A meter running on the current tokio runtime.
pub struct MeterApp {
    config: MeterConfig,
    driver: MeterDriver,
    view: ViewState,
    search: DestinationSearch,
    search_driver: SearchDriver,
    geolocator: Box<dyn Geolocator>,
}

impl MeterApp {
    /// Builds the session and its tokio-backed inputs. Must be called from
    /// within a tokio runtime.
    pub fn new(
        config: MeterConfig,
        tariffs: TariffRegistry,
        address_search: Arc<dyn AddressSearch>,
        geolocator: Box<dyn Geolocator>,
        time_scale: f64,
    ) -> Self {
        let (tx, rx) = event_channel();
        let (tick_epoch, feed_epoch) = (Epoch::default(), Epoch::default());
        let settings = config.clock_settings(time_scale);

        let ticks = TokioTickSchedule::new(tx.clone(), tick_epoch.clone());
        let feed_start = config.device_location.unwrap_or(config.fallback_location);
        let positions = DriftingPositionFeed::drift_from(feed_start, tx, feed_epoch.clone())
            .with_interval(settings.tick_period);

        let clock = RideClock::with_settings(Box::new(ticks), Box::new(positions), settings);
        let session = MeterSession::new(clock, tariffs);
        let search_driver = SearchDriver::new(address_search, Duration::from_millis(config.search.debounce_ms));

        Self {
            search: DestinationSearch::new(config.search.clone()),
            driver: MeterDriver::new(session, rx, tick_epoch, feed_epoch),
            view: ViewState::default(),
            search_driver,
            geolocator,
            config,
        }
    }

    pub fn session(&self) -> &MeterSession {
        self.driver.session()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewState {
        &mut self.view
    }

    /// Types `text` into the destination box one character at a time and
    /// picks the first result.
    pub async fn choose_destination(
        &mut self,
        text: &str,
    ) -> Result<Option<Destination>> {
        let mut typed = String::new();
        let mut scheduled = false;
        for ch in text.chars() {
            typed.push(ch);
            scheduled = self.search_driver.type_query(&mut self.search, &typed);
        }
        if !scheduled {
            warn!(text, "destination query too short to search");
            return Ok(None);
        }

        let within = Duration::from_millis(self.config.search.debounce_ms) + SEARCH_GRACE;
        if !self.search_driver.settle(&mut self.search, within).await {
            warn!(text, "destination search timed out");
            return Ok(None);
        }

        let Some(destination) = self.search.select(0) else {
            warn!(text, "no destination found");
            return Ok(None);
        };
        info!(address = %destination.address, "destination chosen");
        self.driver
            .session_mut()
            .set_destination(Some(destination.clone()));
        Ok(Some(destination))
    }

    /// Starts the meter and applies the one-shot origin fix.
    pub async fn start_ride(&mut self) -> Result<()> {
        self.driver.session_mut().start()?;
        self.view.on_ride_started();

        let origin = locate_or_fallback(self.geolocator.as_ref(), self.config.fallback_location).await;
        self.driver.session_mut().set_origin(origin);
        Ok(())
    }

    /// Lets the meter run until it shows `seconds` of ride time.
    pub async fn drive_for(
        &mut self,
        seconds: u64,
    ) -> Result<()> {
        self.driver
            .run_until_elapsed(seconds)
            .await
            .context("meter did not reach the requested time")
    }

    pub fn toggle_pause(&mut self) -> Result<()> {
        self.driver.session_mut().toggle_pause()?;
        self.driver.drain();
        Ok(())
    }

    pub fn stop_ride(&mut self) -> Result<Settlement> {
        let settlement = self.driver.session_mut().stop()?.clone();
        self.view.on_ride_stopped();
        Ok(settlement)
    }

    /// Picks a tip from the menu while the payment dialog is open.
    pub fn select_tip(
        &mut self,
        tip: u8,
    ) -> Result<Settlement> {
        Ok(self.driver.session_mut().select_tip(tip)?.clone())
    }

    /// Confirms the open payment and closes the dialog.
    pub fn confirm_payment(&mut self) -> Result<Option<RideRecord>> {
        let record = self.driver.session_mut().confirm_payment()?;
        self.view.close_modal();
        Ok(record)
    }

    pub fn map_frame(&self) -> MapFrame {
        let mut frame = self.session().map_frame(self.view.waze_style);
        frame.zoom = self.config.map_zoom;
        frame
    }

    /// Text for whatever the user would currently be looking at.
    pub fn render(&self) -> String {
        let session = self.session();
        let body = if self.view.is_paying() {
            match session.settlement() {
                Some(settlement) => views::render_payment(settlement, session.tariffs().tip_options()),
                None => views::render_meter(session.ride(), session.tariffs().active()),
            }
        } else {
            match self.view.screen {
                Screen::Meter if self.view.show_map => format!(
                    "{}\n{}",
                    views::render_map_caption(&self.map_frame()),
                    views::render_meter(session.ride(), session.tariffs().active())
                ),
                Screen::Meter => views::render_meter(session.ride(), session.tariffs().active()),
                Screen::History => views::render_history(session.ledger()),
                Screen::Settings | Screen::Tariffs | Screen::EditTariffs => {
                    views::render_tariffs(session.tariffs())
                }
            }
        };
        format!("{}\n{body}", views::status_bar::tab_bar(self.view.screen))
    }
}
