use std::sync::Arc;

use ai_client::AiError;
use tracing::info;

use backpacker_common::{Location, TransportMode, TravelOption};

use crate::rules::{COST_PER_KM, DESTINATION_COUNT, PLANE_MIN_KM, TRAIN_MIN_KM};
use crate::traits::ContentGenerator;

/// Whole-unit ticket price for a trip of `distance_km`.
pub fn trip_cost(distance_km: f64) -> i64 {
    (distance_km * COST_PER_KM).round() as i64
}

pub fn transport_mode(distance_km: f64) -> TransportMode {
    if distance_km > PLANE_MIN_KM {
        TransportMode::Plane
    } else if distance_km > TRAIN_MIN_KM {
        TransportMode::Train
    } else {
        TransportMode::Bus
    }
}

pub fn price_trip(from: &Location, to: Location) -> TravelOption {
    let distance_km = from.distance_km(&to);
    TravelOption {
        cost: trip_cost(distance_km),
        mode: transport_mode(distance_km),
        distance_km,
        destination: to,
    }
}

/// Turns generated destinations into priced travel options.
pub struct TravelPlanner {
    generator: Arc<dyn ContentGenerator>,
}

impl TravelPlanner {
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self { generator }
    }

    /// One option per generated destination, in the order generated.
    pub async fn travel_options(&self, current: &Location) -> Result<Vec<TravelOption>, AiError> {
        let destinations = self
            .generator
            .destinations(current, DESTINATION_COUNT)
            .await?;

        let options: Vec<TravelOption> = destinations
            .into_iter()
            .map(|to| price_trip(current, to))
            .collect();

        info!(from = %current, options = options.len(), "Travel options ready");
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quarter_circle_costs_2502() {
        let from = Location::new("Null Island", "Ocean", 0.0, 0.0);
        let to = Location::new("East", "Ocean", 0.0, 90.0);
        let option = price_trip(&from, to.clone());
        assert!((option.distance_km - 10007.5).abs() < 0.1);
        assert_eq!(option.cost, 2502);
        assert_eq!(option.mode, TransportMode::Plane);
        assert_eq!(option.destination, to);
    }

    #[test]
    fn mode_thresholds_are_exclusive() {
        assert_eq!(transport_mode(0.0), TransportMode::Bus);
        assert_eq!(transport_mode(500.0), TransportMode::Bus);
        assert_eq!(transport_mode(500.1), TransportMode::Train);
        assert_eq!(transport_mode(2000.0), TransportMode::Train);
        assert_eq!(transport_mode(2000.1), TransportMode::Plane);
    }

    #[test]
    fn cost_rounds_to_nearest() {
        assert_eq!(trip_cost(0.0), 0);
        assert_eq!(trip_cost(10.0), 3); // 2.5 rounds up
        assert_eq!(trip_cost(9.9), 2);
        assert_eq!(trip_cost(1000.0), 250);
    }
}
