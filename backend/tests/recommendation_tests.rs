//! Recommendation engine integration tests
//!
//! Runs the recommendation and weather services against in-memory stores and
//! a counting weather provider:
//! - Scoring and selection against the default catalog
//! - Cache-first rainfall resolution and graceful degradation
//! - Append-only recommendation history

mod common;

use chrono::{Duration, Utc};
use common::{soil, wheat_soil, FakeOutcome, FakeWeatherProvider, Harness};
use crop_server::error::AppError;
use crop_server::repositories::CropCatalog;
use proptest::prelude::*;
use shared::{
    default_crop_catalog, IdealRange, Limit, NewCrop, RecommendationRequest, RecommendationResult,
    WeatherReading,
};
use uuid::Uuid;

fn request(location: Option<&str>) -> RecommendationRequest {
    RecommendationRequest {
        soil_data: wheat_soil(),
        location: location.map(str::to_string),
    }
}

fn stored_reading(location: &str, rainfall: f64, age: Duration) -> WeatherReading {
    WeatherReading {
        id: Uuid::new_v4(),
        location: location.to_string(),
        temperature: 22.0,
        humidity: 55.0,
        rainfall,
        recorded_at: Utc::now() - age,
    }
}

fn flat_crop(name: &str) -> NewCrop {
    NewCrop {
        name: name.to_string(),
        nitrogen: IdealRange::new(0.0, 200.0),
        phosphorus: IdealRange::new(0.0, 200.0),
        potassium: IdealRange::new(0.0, 200.0),
        ph: IdealRange::new(0.0, 14.0),
        rainfall: IdealRange::new(100.0, 200.0),
    }
}

// ============================================================================
// Scoring and Selection
// ============================================================================

#[tokio::test]
async fn test_wheat_example_without_location() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let user_id = Uuid::new_v4();

    let result = harness
        .recommendation_service()
        .recommend(user_id, request(None))
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Wheat");
    assert_eq!(result.confidence_score, 80.0);
    assert_eq!(result.message, "Best match: Wheat (80.0% confidence)");
    assert_eq!(harness.provider.calls(), 0);

    let records = harness.recommendations.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(Some(records[0].id), result.recommendation_id);
    assert_eq!(records[0].user_id, user_id);
    assert_eq!(records[0].confidence_score, 80.0);
}

#[tokio::test]
async fn test_empty_catalog_returns_sentinel_without_record() {
    let harness = Harness::new(Vec::new(), FakeWeatherProvider::raining(75.0));

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(None))
        .await
        .unwrap();

    assert_eq!(result, RecommendationResult::empty_catalog());
    assert_eq!(result.crop_name, "N/A");
    assert_eq!(result.confidence_score, 0.0);
    assert_eq!(
        result.message,
        "No crops in database. Please add crop data first."
    );
    assert!(harness.recommendations.records().await.is_empty());
}

#[tokio::test]
async fn test_ties_go_to_first_crop_in_catalog_order() {
    let harness = Harness::new(
        vec![flat_crop("Alpha"), flat_crop("Beta")],
        FakeWeatherProvider::raining(0.0),
    );

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(None))
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Alpha");
    assert_eq!(result.confidence_score, 80.0);
}

#[tokio::test]
async fn test_all_zero_scores_still_recommend_first_crop() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(0.0));

    let result = harness
        .recommendation_service()
        .recommend(
            Uuid::new_v4(),
            RecommendationRequest {
                soil_data: soil(500.0, 500.0, 500.0, 13.5),
                location: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Rice");
    assert_eq!(result.confidence_score, 0.0);
    assert!(result.recommendation_id.is_some());
}

#[tokio::test]
async fn test_repeated_requests_append_records() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let service = harness.recommendation_service();
    let user_id = Uuid::new_v4();

    let first = service.recommend(user_id, request(None)).await.unwrap();
    let second = service.recommend(user_id, request(None)).await.unwrap();

    assert_eq!(first.crop_name, second.crop_name);
    assert_eq!(first.confidence_score, second.confidence_score);
    assert_ne!(first.recommendation_id, second.recommendation_id);
    assert_eq!(harness.recommendations.records().await.len(), 2);
}

#[tokio::test]
async fn test_invalid_soil_is_rejected_before_scoring() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));

    let err = harness
        .recommendation_service()
        .recommend(
            Uuid::new_v4(),
            RecommendationRequest {
                soil_data: soil(70.0, 40.0, 40.0, 15.0),
                location: Some("Pune".to_string()),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(harness.provider.calls(), 0);
    assert!(harness.recommendations.records().await.is_empty());
}

// ============================================================================
// Rainfall Resolution
// ============================================================================

#[tokio::test]
async fn test_cached_reading_is_used_without_fetch() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(0.0));
    harness
        .weather
        .push(stored_reading("Pune", 75.0, Duration::days(30)))
        .await;

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some("Pune")))
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Wheat");
    assert_eq!(result.confidence_score, 100.0);
    assert_eq!(harness.provider.calls(), 0);
    assert_eq!(harness.weather.stored_count().await, 1);
}

#[tokio::test]
async fn test_cache_miss_fetches_once_then_reuses() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let service = harness.recommendation_service();
    let user_id = Uuid::new_v4();

    let first = service.recommend(user_id, request(Some("Pune"))).await.unwrap();
    let second = service.recommend(user_id, request(Some("Pune"))).await.unwrap();

    assert_eq!(first.confidence_score, 100.0);
    assert_eq!(second.confidence_score, 100.0);
    assert_eq!(harness.provider.calls(), 1);
    assert_eq!(harness.weather.stored_count().await, 1);
}

#[tokio::test]
async fn test_location_is_trimmed_before_lookup() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(0.0));
    harness
        .weather
        .push(stored_reading("Pune", 75.0, Duration::minutes(5)))
        .await;

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some("  Pune  ")))
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 100.0);
    assert_eq!(harness.provider.calls(), 0);
}

#[tokio::test]
async fn test_blank_location_skips_weather() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some("   ")))
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 80.0);
    assert_eq!(harness.provider.calls(), 0);
}

#[tokio::test]
async fn test_weather_timeout_degrades_to_zero_rainfall() {
    let harness = Harness::new(
        default_crop_catalog(),
        FakeWeatherProvider::new(FakeOutcome::Timeout),
    );

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some("Pune")))
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Wheat");
    assert_eq!(result.confidence_score, 80.0);
    assert_eq!(harness.provider.calls(), 1);
    assert_eq!(harness.weather.stored_count().await, 0);
    assert_eq!(harness.recommendations.records().await.len(), 1);
}

#[tokio::test]
async fn test_weather_misconfiguration_degrades_to_zero_rainfall() {
    let harness = Harness::new(
        default_crop_catalog(),
        FakeWeatherProvider::new(FakeOutcome::InvalidKey),
    );

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some("Pune")))
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 80.0);
}

#[tokio::test]
async fn test_overlong_location_degrades_to_zero_rainfall() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let user_id = Uuid::new_v4();
    let location = "x".repeat(300);

    let result = harness
        .recommendation_service()
        .recommend(user_id, request(Some(&location)))
        .await
        .unwrap();

    assert_eq!(result.crop_name, "Wheat");
    assert_eq!(result.confidence_score, 80.0);
    assert_eq!(harness.provider.calls(), 0);
    assert_eq!(harness.weather.stored_count().await, 0);
    assert_eq!(harness.recommendations.records().await.len(), 1);
}

#[tokio::test]
async fn test_location_length_checked_after_trimming() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let location = format!("{}Pune", " ".repeat(260));

    let result = harness
        .recommendation_service()
        .recommend(Uuid::new_v4(), request(Some(&location)))
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 100.0);
    assert_eq!(harness.provider.calls(), 1);
}

#[tokio::test]
async fn test_stale_reading_refetched_when_horizon_set() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    harness
        .weather
        .push(stored_reading("Pune", 0.0, Duration::hours(3)))
        .await;

    let weather = harness.weather_service().with_cache_max_age(Some(60));
    let result = harness
        .recommendation_service_with(weather)
        .recommend(Uuid::new_v4(), request(Some("Pune")))
        .await
        .unwrap();

    assert_eq!(result.confidence_score, 100.0);
    assert_eq!(harness.provider.calls(), 1);
    assert_eq!(harness.weather.stored_count().await, 2);
}

// ============================================================================
// Standalone Weather Reads
// ============================================================================

#[tokio::test]
async fn test_current_weather_always_fetches_and_appends() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(3.5));
    harness
        .weather
        .push(stored_reading("Pune", 1.0, Duration::minutes(1)))
        .await;
    let service = harness.weather_service();

    let first = service.current_weather("Pune").await.unwrap();
    let second = service.current_weather("Pune").await.unwrap();

    assert_eq!(first.rainfall, 3.5);
    assert_eq!(first.location, "Pune");
    assert!(second.recorded_at >= first.recorded_at);
    assert_eq!(harness.provider.calls(), 2);
    assert_eq!(harness.weather.stored_count().await, 3);
}

#[tokio::test]
async fn test_current_weather_surfaces_provider_errors() {
    let harness = Harness::new(
        default_crop_catalog(),
        FakeWeatherProvider::new(FakeOutcome::UnknownLocation),
    );
    let service = harness.weather_service();

    let err = service.current_weather("Atlantis").await.unwrap_err();
    assert!(matches!(err, AppError::LocationNotFound(ref l) if l == "Atlantis"));

    harness.provider.set_outcome(FakeOutcome::InvalidKey);
    let err = service.current_weather("Pune").await.unwrap_err();
    assert!(matches!(err, AppError::WeatherConfiguration(_)));

    harness.provider.set_outcome(FakeOutcome::Timeout);
    let err = service.current_weather("Pune").await.unwrap_err();
    assert!(matches!(err, AppError::WeatherTimeout(_)));

    assert_eq!(harness.weather.stored_count().await, 0);
}

#[tokio::test]
async fn test_current_weather_requires_location() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(3.5));

    let err = harness.weather_service().current_weather("  ").await.unwrap_err();

    assert!(matches!(err, AppError::Validation { ref field, .. } if field == "location"));
    assert_eq!(harness.provider.calls(), 0);
}

// ============================================================================
// History and Aggregates
// ============================================================================

#[tokio::test]
async fn test_history_is_per_user_and_newest_first() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let service = harness.recommendation_service();
    let user_id = Uuid::new_v4();

    let older = service.recommend(user_id, request(None)).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let newer = service.recommend(user_id, request(Some("Pune"))).await.unwrap();
    service.recommend(Uuid::new_v4(), request(None)).await.unwrap();

    let history = service.history(user_id, Limit::resolve(None, 10)).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(Some(history[0].id), newer.recommendation_id);
    assert_eq!(Some(history[1].id), older.recommendation_id);
    assert_eq!(history[0].crop_name, "Wheat");

    let limited = service.history(user_id, Limit::resolve(Some(1), 10)).await.unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn test_top_crops_counts_across_users() {
    let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(75.0));
    let service = harness.recommendation_service();

    for _ in 0..3 {
        service.recommend(Uuid::new_v4(), request(None)).await.unwrap();
    }
    // N 100, P 60, K 60, pH 6.5: Maize is the first crop on four factors.
    service
        .recommend(
            Uuid::new_v4(),
            RecommendationRequest {
                soil_data: soil(100.0, 60.0, 60.0, 6.5),
                location: None,
            },
        )
        .await
        .unwrap();

    let top = service.top_crops(Limit::resolve(None, 10)).await.unwrap();
    assert_eq!(top.len(), 2);
    assert_eq!((top[0].crop_name.as_str(), top[0].count), ("Wheat", 3));
    assert_eq!((top[1].crop_name.as_str(), top[1].count), ("Maize", 1));
}

// ============================================================================
// Property Tests
// ============================================================================

mod property_tests {
    use super::*;
    use shared::confidence_score;

    fn soil_strategy() -> impl Strategy<Value = shared::SoilSample> {
        (0.0f64..200.0, 0.0f64..100.0, 0.0f64..100.0, 0.0f64..14.0)
            .prop_map(|(n, p, k, ph)| soil(n, p, k, ph))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// The recommended crop carries the highest score in the catalog
        /// and exactly one record is written per request
        #[test]
        fn prop_recommendation_is_catalog_maximum(
            sample in soil_strategy(),
            rainfall in 0.0f64..320.0
        ) {
            let harness = Harness::new(default_crop_catalog(), FakeWeatherProvider::raining(rainfall));
            let catalog = harness.catalog.clone();
            let service = harness.recommendation_service();

            let (result, crops, records) = tokio_test::block_on(async {
                let result = service
                    .recommend(
                        Uuid::new_v4(),
                        RecommendationRequest {
                            soil_data: sample,
                            location: Some("Pune".to_string()),
                        },
                    )
                    .await
                    .unwrap();
                let crops = catalog.list_all().await.unwrap();
                (result, crops, harness.recommendations.records().await)
            });

            let max = crops
                .iter()
                .map(|c| confidence_score(c, &sample, rainfall))
                .fold(0.0, f64::max);
            let first_max = crops
                .iter()
                .find(|c| confidence_score(c, &sample, rainfall) == max)
                .map(|c| c.name.clone());

            prop_assert_eq!(result.confidence_score, max);
            prop_assert_eq!(Some(result.crop_name), first_max);
            prop_assert!([0.0, 20.0, 40.0, 60.0, 80.0, 100.0].contains(&result.confidence_score));
            prop_assert_eq!(records.len(), 1);
        }
    }
}

