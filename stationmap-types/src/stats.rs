use serde::{Deserialize, Serialize};

/// Aggregate over one direction of trips (departures or returns) at a station.
///
/// Averages are `None` when the source had no value for them, which is
/// different from an average of zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripSummary {
    pub trips_count: u64,
    pub duration_seconds_avg: Option<f64>,
    pub distance_meters_avg: Option<f64>,
}

impl TripSummary {
    pub fn new(
        trips_count: u64,
        duration_seconds_avg: Option<f64>,
        distance_meters_avg: Option<f64>,
    ) -> Self {
        Self {
            trips_count,
            duration_seconds_avg,
            distance_meters_avg,
        }
    }
}

/// Trip statistics attached to a station.
///
/// Stations without any trips carry no statistics at all (`Option::None`
/// at the use site), never a zero-filled value of this type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationTripStatistics {
    pub departures: TripSummary,
    pub returns: TripSummary,
}

impl StationTripStatistics {
    pub fn new(departures: TripSummary, returns: TripSummary) -> Self {
        Self {
            departures,
            returns,
        }
    }

    pub fn total_trips(&self) -> u64 {
        self.departures.trips_count + self.returns.trips_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_camel_case_with_null_averages() {
        let stats = StationTripStatistics::new(
            TripSummary::new(3, Some(600.0), Some(2100.5)),
            TripSummary::new(0, None, None),
        );
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["departures"]["tripsCount"], 3);
        assert_eq!(json["departures"]["durationSecondsAvg"], 600.0);
        assert!(json["returns"]["distanceMetersAvg"].is_null());
        assert_eq!(stats.total_trips(), 3);
    }
}
