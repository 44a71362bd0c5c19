use std::fmt::Write;

use meter_core::calculations::common::{format_duration, format_km, format_money};
use meter_core::{MapFrame, RideState, RideStatus, TariffConfig};

use super::status_bar::{build_status_bar, hints};

/// The main meter display: fare, time, distance and the rates in force.
pub fn render_meter(
    ride: &RideState,
    tariff: &TariffConfig,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:^32}", ride.status.label().to_uppercase());
    let _ = writeln!(out, "{:^32}", format_money(ride.current_fare));
    let _ = writeln!(out, "  Time      {:>20}", format_duration(ride.elapsed_seconds));
    let _ = writeln!(out, "  Distance  {:>20}", format_km(ride.distance_km));
    if let Some(destination) = &ride.destination {
        let _ = writeln!(out, "  To        {:>20}", destination.address);
    }
    let _ = writeln!(
        out,
        "  Start {} | Km {} | Min {}",
        format_money(tariff.initial_fare),
        format_money(tariff.per_km_rate),
        format_money(tariff.per_minute_rate),
    );

    let bar = match ride.status {
        RideStatus::Idle => build_status_bar(&[hints::START]),
        RideStatus::Running | RideStatus::Paused => build_status_bar(&[hints::PAUSE, hints::STOP]),
    };
    let _ = write!(out, "{bar}");
    out
}

/// One-line summary of what the map would draw.
pub fn render_map_caption(frame: &MapFrame) -> String {
    let style = if frame.waze_style { "waze" } else { "standard" };
    let mut caption = format!(
        "map {:.4},{:.4} zoom {} ({style}), {} route point(s)",
        frame.center.lat,
        frame.center.lng,
        frame.zoom,
        frame.route.len()
    );
    if let Some(destination) = &frame.destination {
        let _ = write!(caption, ", heading to {}", destination.address);
    }
    caption
}

#[cfg(test)]
mod tests {
    use super::*;
    use meter_core::{Destination, GeoPoint};
    use rust_decimal_macros::dec;

    #[test]
    fn idle_meter_shows_zeroes_and_start_hint() {
        let text = render_meter(&RideState::default(), &TariffConfig::default());

        assert!(text.contains("STOPPED"));
        assert!(text.contains("€ 0.00"));
        assert!(text.contains("00:00:00"));
        assert!(text.contains("0.00 km"));
        assert!(text.contains("s: Start"));
    }

    #[test]
    fn running_meter_shows_values_and_destination() {
        let ride = RideState {
            status: RideStatus::Running,
            elapsed_seconds: 120,
            distance_km: dec!(1.2),
            current_fare: dec!(8.26),
            destination: Some(Destination {
                point: GeoPoint::new(38.7139, -9.1334),
                address: "Rossio".to_string(),
            }),
            ..RideState::default()
        };

        let text = render_meter(&ride, &TariffConfig::default());

        assert!(text.contains("RUNNING"));
        assert!(text.contains("€ 8.26"));
        assert!(text.contains("00:02:00"));
        assert!(text.contains("1.20 km"));
        assert!(text.contains("Rossio"));
        assert!(text.contains("x: Stop"));
    }

    #[test]
    fn map_caption_names_destination() {
        let frame = MapFrame {
            center: GeoPoint::FALLBACK,
            route: vec![GeoPoint::FALLBACK],
            destination: Some(Destination {
                point: GeoPoint::new(38.7742, -9.1342),
                address: "Aeroporto".to_string(),
            }),
            zoom: 15,
            waze_style: true,
        };

        let caption = render_map_caption(&frame);

        assert!(caption.starts_with("map 38.7223,-9.1393 zoom 15 (waze)"));
        assert!(caption.ends_with("heading to Aeroporto"));
    }
}
