//! The meter as one state container.
//!
//! [`MeterSession`] owns the ride clock, the tariff registry, the ledger and
//! the pending settlement, and is the only thing a front end needs to hold.
//! It contains no presentation state.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::clock::RideClock;
use crate::error::MeterError;
use crate::ledger::RideLedger;
use crate::models::{DEFAULT_ZOOM, Destination, GeoPoint, MapFrame, RecordId, RideRecord, RideState, RideStatus, Settlement};
use crate::tariffs::TariffRegistry;

type WallClock = Box<dyn Fn() -> DateTime<Local> + Send>;

pub struct MeterSession {
    clock: RideClock,
    tariffs: TariffRegistry,
    ledger: RideLedger,
    settlement: Option<Settlement>,
    origin: Option<GeoPoint>,
    wall_clock: WallClock,
}

impl MeterSession {
    pub fn new(
        clock: RideClock,
        tariffs: TariffRegistry,
    ) -> Self {
        Self {
            clock,
            tariffs,
            ledger: RideLedger::new(),
            settlement: None,
            origin: None,
            wall_clock: Box::new(Local::now),
        }
    }

    /// Replaces the source of "now" used to stamp ride records.
    pub fn with_wall_clock(
        mut self,
        wall_clock: impl Fn() -> DateTime<Local> + Send + 'static,
    ) -> Self {
        self.wall_clock = Box::new(wall_clock);
        self
    }

    pub fn ride(&self) -> &RideState {
        self.clock.ride()
    }

    pub fn status(&self) -> RideStatus {
        self.clock.status()
    }

    pub fn clock(&self) -> &RideClock {
        &self.clock
    }

    pub fn tariffs(&self) -> &TariffRegistry {
        &self.tariffs
    }

    pub fn tariffs_mut(&mut self) -> &mut TariffRegistry {
        &mut self.tariffs
    }

    pub fn ledger(&self) -> &RideLedger {
        &self.ledger
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    /// Last known device position, if any fix has been applied.
    pub fn origin(&self) -> Option<GeoPoint> {
        self.origin
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    /// Starts a fresh ride. Refused while a payment is still open.
    pub fn start(&mut self) -> Result<(), MeterError> {
        if self.settlement.is_some() {
            return Err(MeterError::SettlementPending);
        }
        self.clock.start()
    }

    pub fn pause(&mut self) -> Result<(), MeterError> {
        self.clock.pause()
    }

    pub fn resume(&mut self) -> Result<(), MeterError> {
        self.clock.resume()
    }

    pub fn toggle_pause(&mut self) -> Result<(), MeterError> {
        self.clock.toggle_pause()
    }

    /// Stops the ride and opens the payment step.
    pub fn stop(&mut self) -> Result<&Settlement, MeterError> {
        let settlement = self.clock.stop()?;
        Ok(self.settlement.insert(settlement))
    }

    /// One accrual step against the active tariff.
    pub fn tick(&mut self) -> bool {
        self.clock.tick(self.tariffs.active())
    }

    pub fn record_position(
        &mut self,
        point: GeoPoint,
    ) -> bool {
        self.clock.record_position(point)
    }

    /// Applies the one-shot start-of-ride fix: it becomes the map center
    /// and, if a ride is running, the first route point.
    pub fn set_origin(
        &mut self,
        point: GeoPoint,
    ) {
        self.origin = Some(point);
        self.clock.set_origin(point);
    }

    /// Chooses (or clears) where the ride is heading.
    pub fn set_destination(
        &mut self,
        destination: Option<Destination>,
    ) {
        self.clock.set_destination(destination);
    }

    // ── payment ──────────────────────────────────────────────────────────

    /// Picks one of the offered tip percentages for the open payment.
    pub fn select_tip(
        &mut self,
        percentage: u8,
    ) -> Result<&Settlement, MeterError> {
        if !self.tariffs.tip_options().contains(percentage) {
            warn!(percentage, "tip not offered");
            return Err(MeterError::TipNotOffered(percentage));
        }
        let settlement = self
            .settlement
            .as_mut()
            .ok_or(MeterError::NoOpenSettlement)?;
        settlement.select_tip(percentage);
        Ok(settlement)
    }

    /// Confirms the open payment.
    ///
    /// Records the ride (unless it never moved) and resets the meter to a
    /// fresh idle ride. Returns the record that was added, if any.
    pub fn confirm_payment(&mut self) -> Result<Option<RideRecord>, MeterError> {
        let settlement = self.settlement.take().ok_or(MeterError::NoOpenSettlement)?;
        let now = (self.wall_clock)();

        let record = self.ledger.settle(&settlement, self.clock.ride(), &now);
        self.clock.reset();

        info!(recorded = record.is_some(), "payment confirmed");
        Ok(record)
    }

    /// Drops the open payment. The stopped ride's time, distance and fare
    /// stay as they were.
    pub fn cancel_payment(&mut self) -> Result<(), MeterError> {
        self.settlement
            .take()
            .map(|_| info!("payment canceled"))
            .ok_or(MeterError::NoOpenSettlement)
    }

    /// Reopens the payment for a stopped ride whose payment was canceled.
    pub fn reopen_payment(&mut self) -> Result<&Settlement, MeterError> {
        if self.settlement.is_some() {
            return Err(MeterError::SettlementPending);
        }
        if self.clock.status() != RideStatus::Idle || !self.has_unsettled_ride() {
            return Err(MeterError::NothingToSettle);
        }
        Ok(self
            .settlement
            .insert(Settlement::open(self.clock.ride().current_fare)))
    }

    // ── history ──────────────────────────────────────────────────────────

    pub fn delete_record(
        &mut self,
        id: RecordId,
    ) -> bool {
        self.ledger.delete_record(id)
    }

    pub fn clear_history(&mut self) {
        self.ledger.clear_all();
    }

    // ── map ──────────────────────────────────────────────────────────────

    /// What the map widget should draw right now.
    pub fn map_frame(
        &self,
        waze_style: bool,
    ) -> MapFrame {
        let ride = self.clock.ride();
        MapFrame {
            center: self
                .origin
                .or_else(|| ride.route_points.first().copied())
                .unwrap_or(GeoPoint::FALLBACK),
            route: ride.route_points.clone(),
            destination: ride.destination.clone(),
            zoom: DEFAULT_ZOOM,
            waze_style,
        }
    }

    /// An idle meter still showing a stopped ride's values.
    fn has_unsettled_ride(&self) -> bool {
        let ride = self.clock.ride();
        ride.has_moved() || ride.current_fare > rust_decimal::Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::testing::PortRecorder;
    use crate::{TariffConfig, TipOptionSet};

    fn session(recorder: &PortRecorder) -> MeterSession {
        MeterSession::new(recorder.clock(), TariffRegistry::default()).with_wall_clock(|| {
            Local
                .with_ymd_and_hms(2025, 6, 1, 14, 30, 0)
                .single()
                .unwrap_or_else(Local::now)
        })
    }

    fn drive(
        session: &mut MeterSession,
        ticks: usize,
    ) {
        for _ in 0..ticks {
            session.tick();
        }
    }

    #[test]
    fn full_ride_is_recorded_and_meter_reset() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 120);

        let settlement = s.stop().unwrap();
        assert_eq!(settlement.final_fare(), dec!(8.26));
        s.select_tip(15).unwrap();
        let record = s.confirm_payment().unwrap().unwrap();

        assert_eq!(record.tip, dec!(1.24));
        assert_eq!(record.total, dec!(9.50));
        assert_eq!(record.time, "14:30");
        assert_eq!(s.ledger().records(), &[record]);
        assert_eq!(s.ride(), &RideState::default());
        assert!(s.settlement().is_none());
    }

    #[test]
    fn select_tip_recomputes_until_confirm() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 120);
        s.stop().unwrap();

        assert_eq!(s.select_tip(20).unwrap().total_amount(), dec!(9.912));
        assert_eq!(s.select_tip(10).unwrap().total_amount(), dec!(9.086));

        let record = s.confirm_payment().unwrap().unwrap();
        assert_eq!(record.tip, dec!(0.83));
        assert_eq!(record.total, dec!(9.09));
    }

    #[test]
    fn select_tip_outside_menu_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        s.stop().unwrap();

        assert_eq!(s.select_tip(12).err(), Some(MeterError::TipNotOffered(12)));
        assert_eq!(s.settlement().unwrap().tip_percentage(), 0);
    }

    #[test]
    fn select_tip_without_payment_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);

        assert_eq!(s.select_tip(10).err(), Some(MeterError::NoOpenSettlement));
    }

    #[test]
    fn custom_tip_options_are_offered() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.tariffs_mut().set_tip_options([0, 5, 12, 25]);
        s.start().unwrap();
        drive(&mut s, 60);
        s.stop().unwrap();

        assert!(s.select_tip(12).is_ok());
    }

    #[test]
    fn confirm_zero_ride_records_nothing_but_resets() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        s.stop().unwrap();

        assert_eq!(s.confirm_payment().unwrap(), None);
        assert!(s.ledger().is_empty());
        assert_eq!(s.status(), RideStatus::Idle);
    }

    #[test]
    fn confirm_without_payment_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);

        assert_eq!(s.confirm_payment(), Err(MeterError::NoOpenSettlement));
    }

    #[test]
    fn cancel_keeps_raw_ride_values() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 30);
        s.stop().unwrap();
        let stopped = s.ride().clone();

        s.cancel_payment().unwrap();

        assert!(s.settlement().is_none());
        assert_eq!(s.ride(), &stopped);
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn cancel_then_reopen_restores_payment() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 30);
        s.stop().unwrap();
        s.select_tip(20).unwrap();
        s.cancel_payment().unwrap();

        let reopened = s.reopen_payment().unwrap().clone();

        assert_eq!(reopened.final_fare(), s.ride().current_fare);
        assert_eq!(reopened.tip_percentage(), 0);
    }

    #[test]
    fn reopen_on_fresh_meter_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);

        let err = s.reopen_payment().unwrap_err();

        assert_eq!(err, MeterError::NothingToSettle);
        assert_eq!(err.to_string(), "there is no stopped ride to settle");
    }

    #[test]
    fn reopen_during_ride_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 5);

        assert_eq!(s.reopen_payment().unwrap_err(), MeterError::NothingToSettle);
        assert!(s.settlement().is_none());
    }

    #[test]
    fn start_while_payment_open_is_rejected() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        s.stop().unwrap();

        assert_eq!(s.start(), Err(MeterError::SettlementPending));
    }

    #[test]
    fn start_after_cancel_begins_from_zero() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 30);
        s.stop().unwrap();
        s.cancel_payment().unwrap();

        s.start().unwrap();

        assert_eq!(s.ride().elapsed_seconds, 0);
        assert_eq!(s.ride().current_fare, Decimal::ZERO);
    }

    #[test]
    fn tariff_change_mid_ride_applies_from_next_tick() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        drive(&mut s, 60);
        let before = s.ride().current_fare;

        s.tariffs_mut().set_active_tariff(TariffConfig {
            initial_fare: dec!(10.00),
            ..TariffConfig::default()
        });
        assert_eq!(s.ride().current_fare, before);

        s.tick();
        assert!(s.ride().current_fare > dec!(10.00));
    }

    #[test]
    fn settlement_clears_destination_for_next_ride() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.set_destination(Some(Destination {
            point: GeoPoint::new(38.7139, -9.1334),
            address: "Rossio".to_string(),
        }));
        s.start().unwrap();
        drive(&mut s, 5);
        s.stop().unwrap();

        let record = s.confirm_payment().unwrap().unwrap();

        assert_eq!(record.destination_address.as_deref(), Some("Rossio"));
        assert_eq!(s.ride().destination, None);
    }

    #[test]
    fn delete_and_clear_history() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        for _ in 0..3 {
            s.start().unwrap();
            drive(&mut s, 10);
            s.stop().unwrap();
            s.confirm_payment().unwrap();
        }
        let middle = s.ledger().records()[1].id;

        assert!(s.delete_record(middle));
        assert_eq!(s.ledger().len(), 2);
        assert!(s.ledger().get(middle).is_none());

        s.clear_history();
        assert!(s.ledger().is_empty());
    }

    #[test]
    fn origin_seeds_route_and_centers_map() {
        let recorder = PortRecorder::default();
        let mut s = session(&recorder);
        s.start().unwrap();
        let origin = GeoPoint::new(38.7369, -9.1427);

        s.set_origin(origin);
        s.record_position(GeoPoint::new(38.7370, -9.1420));

        let frame = s.map_frame(true);
        assert_eq!(frame.center, origin);
        assert_eq!(frame.route.first(), Some(&origin));
        assert!(frame.has_route_line());
        assert_eq!(frame.zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn map_frame_without_fix_uses_fallback() {
        let recorder = PortRecorder::default();
        let s = session(&recorder);

        let frame = s.map_frame(false);

        assert_eq!(frame.center, GeoPoint::FALLBACK);
        assert!(frame.route.is_empty());
        assert_eq!(frame.current_position(), None);
    }

    #[test]
    fn tip_menu_default_is_used() {
        let recorder = PortRecorder::default();
        let s = session(&recorder);

        assert_eq!(s.tariffs().tip_options(), &TipOptionSet::default());
    }
}
