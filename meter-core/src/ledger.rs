//! Ride history.
//!
//! Records are kept most-recent-first and are never edited; they are only
//! added by a confirmed settlement and removed by id or all at once.

use chrono::{DateTime, TimeZone};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::calculations::common::{format_duration, round_half_up};
use crate::{RecordId, RideRecord, RideState, Settlement};

/// Totals shown above the history list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerSummary {
    pub rides: usize,
    pub fares: Decimal,
    pub tips: Decimal,
    pub total: Decimal,
    pub distance_km: Decimal,
}

#[derive(Debug, Clone, Default)]
pub struct RideLedger {
    records: Vec<RideRecord>,
    last_id: i64,
}

impl RideLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Newest first.
    pub fn records(&self) -> &[RideRecord] {
        &self.records
    }

    pub fn get(
        &self,
        id: RecordId,
    ) -> Option<&RideRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Commits a settlement for `ride`, stamped with `at`.
    ///
    /// A ride that never moved (no time, no distance, no fare) is not
    /// recorded and `None` is returned. Otherwise the new record is placed
    /// at the front of the history and a copy is returned.
    pub fn settle<Tz>(
        &mut self,
        settlement: &Settlement,
        ride: &RideState,
        at: &DateTime<Tz>,
    ) -> Option<RideRecord>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        if !ride.has_moved() && settlement.final_fare() <= Decimal::ZERO {
            debug!("settlement for a ride that never moved; nothing recorded");
            return None;
        }

        let record = RideRecord {
            id: self.next_id(at.timestamp_millis()),
            date: at.format("%d/%m/%Y").to_string(),
            time: at.format("%H:%M").to_string(),
            duration: format_duration(ride.elapsed_seconds),
            distance_km: round_half_up(ride.distance_km),
            fare: round_half_up(settlement.final_fare()),
            tip: round_half_up(settlement.tip_amount()),
            total: round_half_up(settlement.total_amount()),
            destination_address: ride.destination.as_ref().map(|d| d.address.clone()),
        };

        info!(id = %record.id, total = %record.total, tip = %record.tip, "ride recorded");
        self.records.insert(0, record.clone());
        Some(record)
    }

    /// Removes one record. Returns whether it existed.
    pub fn delete_record(
        &mut self,
        id: RecordId,
    ) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        before != self.records.len()
    }

    pub fn clear_all(&mut self) {
        info!(removed = self.records.len(), "history cleared");
        self.records.clear();
    }

    pub fn summary(&self) -> LedgerSummary {
        self.records
            .iter()
            .fold(LedgerSummary::default(), |mut acc, r| {
                acc.rides += 1;
                acc.fares += r.fare;
                acc.tips += r.tip;
                acc.total += r.total;
                acc.distance_km += r.distance_km;
                acc
            })
    }

    /// Millisecond timestamps, bumped so two rides settled in the same
    /// millisecond still get distinct ids.
    fn next_id(
        &mut self,
        millis: i64,
    ) -> RecordId {
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        RecordId(id)
    }
}
