use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::json;
use stationmap::bounds::bounds_from_coordinates;
use stationmap::prelude::*;
use stationmap::{StationTripStatistics, TripSummary};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn point_feature(lon: f64, lat: f64, id: &str) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Point(vec![lon, lat]))),
        id: None,
        properties: json!({"id": id}).as_object().cloned(),
        foreign_members: None,
    }
}

fn rings(cells: &FeatureCollection) -> Vec<Vec<Vec<f64>>> {
    cells
        .features
        .iter()
        .map(|f| match &f.geometry.as_ref().expect("cell geometry").value {
            Value::Polygon(rings) => rings[0].clone(),
            _ => panic!("cell is not a polygon"),
        })
        .collect()
}

#[test]
fn test_three_station_scenario() {
    init_logging();

    let stations = FeatureCollection {
        bbox: None,
        features: vec![
            point_feature(24.8, 60.1, "001"),
            point_feature(25.0, 60.2, "002"),
            point_feature(24.9, 60.3, "003"),
        ],
        foreign_members: None,
    };
    let options = VoronoiOptions::new(BoundingBox::new(24.6, 60.0, 25.3, 60.4));

    let cells = generate(&stations, &options).unwrap();

    let ids: Vec<_> = cells
        .features
        .iter()
        .map(|f| f.properties.as_ref().unwrap()["id"].clone())
        .collect();
    assert_eq!(ids, vec![json!("001"), json!("002"), json!("003")]);

    for ring in rings(&cells) {
        assert!(ring.len() >= 4);
        assert_eq!(ring.first(), ring.last());
        for c in &ring {
            assert!((24.6..=25.3).contains(&c[0]));
            assert!((60.0..=60.4).contains(&c[1]));
        }
    }

    for (cell, station) in cells.features.iter().zip(stations.features.iter()) {
        assert_eq!(cell.properties, station.properties);
    }
}

#[test]
fn test_generation_is_deterministic() {
    let stations = FeatureCollection {
        bbox: None,
        features: (0..25)
            .map(|i| {
                let i = i as f64;
                point_feature(24.7 + (i * 0.37) % 0.5, 60.05 + (i * 0.23) % 0.3, "s")
            })
            .collect(),
        foreign_members: None,
    };
    let options = VoronoiOptions::new(BoundingBox::new(24.6, 60.0, 25.3, 60.4));

    let first = generate(&stations, &options).unwrap();
    let second = generate(&stations, &options).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.features.len(), 25);
}

#[test]
fn test_inverted_bounds_raise_bounds_error() {
    let stations = FeatureCollection {
        bbox: None,
        features: vec![point_feature(24.8, 60.1, "001")],
        foreign_members: None,
    };
    let options = VoronoiOptions::new(BoundingBox::new(25.3, 60.0, 24.6, 60.4));

    match generate(&stations, &options) {
        Err(StationError::InvalidBounds { min_lon, max_lon, .. }) => {
            assert_eq!(min_lon, 25.3);
            assert_eq!(max_lon, 24.6);
        }
        other => panic!("expected a bounds error, got {:?}", other),
    }
}

#[test]
fn test_rows_to_response_body() {
    init_logging();

    let rows: Vec<StationRow> = vec![
        json!({
            "stationId": "001",
            "name": "Kaivopuisto",
            "location": r#"{"type":"Point","coordinates":[24.950211,60.155369]}"#,
            "departureTripsCount": 120,
            "departureDurationSecondsAvg": 812.4,
            "departureDistanceMetersAvg": 2410.0,
            "returnTripsCount": 98,
            "returnDurationSecondsAvg": 790.1,
            "returnDistanceMetersAvg": 2380.5
        }),
        json!({
            "stationId": "002",
            "name": "Laivasillankatu",
            "location": {"type": "Point", "coordinates": [24.956067, 60.160989]}
        }),
    ]
    .into_iter()
    .map(|v| StationRow::from_json(v).unwrap())
    .collect();

    let collection = collection_from_rows(rows).unwrap();
    let body = serde_json::to_value(&collection).unwrap();

    assert_eq!(body["type"], "FeatureCollection");
    assert_eq!(body["features"][0]["id"], "001");
    assert_eq!(
        body["features"][0]["properties"]["tripStatistics"]["returns"]["tripsCount"],
        98
    );
    assert!(
        body["features"][1]["properties"]
            .as_object()
            .unwrap()
            .get("tripStatistics")
            .is_none()
    );

    let expected = StationTripStatistics::new(
        TripSummary::new(120, Some(812.4), Some(2410.0)),
        TripSummary::new(98, Some(790.1), Some(2380.5)),
    );
    assert_eq!(
        collection.features()[0].properties().trip_statistics(),
        Some(&expected)
    );

    let coords: Vec<[f64; 2]> = collection
        .locations()
        .iter()
        .map(|p| p.coordinates())
        .collect();
    let bounds = bounds_from_coordinates(&coords).unwrap();
    let cells = generate(&collection.to_geojson().unwrap(), &VoronoiOptions::new(bounds)).unwrap();

    assert_eq!(cells.features.len(), 2);
    assert_eq!(
        cells.features[1].properties.as_ref().unwrap()["stationId"],
        "002"
    );
}

#[test]
fn test_station_overlay_from_config() {
    let stations = build_collection(vec![
        build_feature("001", "A", PointGeometry::new(24.8, 60.1), None),
        build_feature("002", "B", PointGeometry::new(25.0, 60.2), None),
    ]);

    let config = Config::default().with_padding_ratio(0.5);
    let cells = generate_for_stations(&stations, &config).unwrap();

    let xs: Vec<f64> = rings(&cells)
        .iter()
        .flatten()
        .map(|c| c[0])
        .collect();
    let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    assert!((min_x - 24.7).abs() < 1e-9);
    assert!((max_x - 25.1).abs() < 1e-9);
}
