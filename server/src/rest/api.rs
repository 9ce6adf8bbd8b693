//! REST handlers and request/response types

use crate::nearest::{NearestError, NearestQueryCache};
use crate::storage::AirportStore;
use crate::types::coordinate::{MAX_LATITUDE, MAX_LONGITUDE, MIN_LATITUDE, MIN_LONGITUDE};
use crate::types::{AirportRecord, Coordinate, CoordinateError};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Airport dataset
    pub store: Arc<dyn AirportStore>,

    /// Nearest airport search with its result cache
    pub nearest: Arc<NearestQueryCache>,
}

/// Ready status of the service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    /// True when requests can be served
    pub ready: bool,
}

/// All airports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirportsResponse {
    /// Always true on success
    pub success: bool,

    /// Airports in storage order
    pub airports: Vec<AirportRecord>,

    /// Number of airports
    pub airport_count: usize,
}

/// A single airport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AirportResponse {
    /// Always true on success
    pub success: bool,

    /// The requested airport
    pub airport: AirportRecord,
}

/// Body of a nearest airport request, in degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CoordinatesRequest {
    /// Latitude in `[-90, 90]`
    pub latitude_degrees: f64,

    /// Longitude in `[-180, 180]`
    pub longitude_degrees: f64,
}

/// The airport closest to the requested point
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearestAirportResponse {
    /// Always true on success
    pub success: bool,

    /// The nearest airport
    pub nearest_airport: AirportRecord,

    /// Great-circle distance to the airport in kilometers
    pub distance_km: f64,

    /// The request body, echoed back
    pub input_coordinates: CoordinatesRequest,
}

/// Bound that a rejected field value crossed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationContext {
    /// The violated limit
    pub limit_value: i64,
}

/// One rejected field of a request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationDetail {
    /// Location of the field, e.g. `["body", "latitude_degrees"]`
    pub loc: Vec<String>,

    /// Human readable reason
    pub msg: String,

    /// Machine readable reason
    #[serde(rename = "type")]
    pub kind: String,

    /// The violated limit
    pub ctx: ValidationContext,
}

impl ValidationDetail {
    /// Checks that body field `field` holds a value in `[min, max]`
    fn check_range(field: &str, value: f64, min: f64, max: f64) -> Option<ValidationDetail> {
        let (msg, kind, limit) = if value > max {
            ("less than or equal to", "value_error.number.not_le", max)
        } else if value < min {
            ("greater than or equal to", "value_error.number.not_ge", min)
        } else {
            return None;
        };

        Some(ValidationDetail {
            loc: vec![String::from("body"), field.to_string()],
            msg: format!("ensure this value is {} {}", msg, limit),
            kind: kind.to_string(),
            ctx: ValidationContext {
                limit_value: limit as i64,
            },
        })
    }
}

impl CoordinatesRequest {
    /// Field level range checks, one detail per rejected field
    pub fn validate(&self) -> Result<Coordinate, Vec<ValidationDetail>> {
        let details: Vec<ValidationDetail> = [
            ValidationDetail::check_range(
                "latitude_degrees",
                self.latitude_degrees,
                MIN_LATITUDE,
                MAX_LATITUDE,
            ),
            ValidationDetail::check_range(
                "longitude_degrees",
                self.longitude_degrees,
                MIN_LONGITUDE,
                MAX_LONGITUDE,
            ),
        ]
        .into_iter()
        .flatten()
        .collect();

        if details.is_empty() {
            Ok(Coordinate::new(self.latitude_degrees, self.longitude_degrees))
        } else {
            Err(details)
        }
    }
}

/// Errors returned by the REST handlers, rendered as `{"detail": ...}`
#[derive(Debug, Clone, PartialEq)]
pub enum RestError {
    /// 404 with a message
    NotFound(String),

    /// 422 with the rejected fields
    Validation(Vec<ValidationDetail>),

    /// 500 with a message
    Internal(String),
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        match self {
            RestError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            RestError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "detail": details })),
            )
                .into_response(),
            RestError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": detail })),
            )
                .into_response(),
        }
    }
}

impl From<NearestError> for RestError {
    fn from(e: NearestError) -> Self {
        match e {
            NearestError::InvalidCoordinate(e) => {
                let detail = match e {
                    CoordinateError::LatitudeOutOfRange(value) => ValidationDetail::check_range(
                        "latitude_degrees",
                        value,
                        MIN_LATITUDE,
                        MAX_LATITUDE,
                    ),
                    CoordinateError::LongitudeOutOfRange(value) => ValidationDetail::check_range(
                        "longitude_degrees",
                        value,
                        MIN_LONGITUDE,
                        MAX_LONGITUDE,
                    ),
                };
                RestError::Validation(detail.into_iter().collect())
            }
            NearestError::EmptyDataset => {
                RestError::Internal(String::from("Airport data is not available"))
            }
            NearestError::Storage(e) => RestError::Internal(e.to_string()),
        }
    }
}

/// Provides a way to tell a caller if the service is healthy.
pub async fn health() -> Json<HealthResponse> {
    rest_debug!("(health) entry.");
    Json(HealthResponse { ready: true })
}

/// Returns all airports
pub async fn get_airports(
    State(state): State<AppState>,
) -> Result<Json<AirportsResponse>, RestError> {
    rest_debug!("(get_airports) entry.");
    let airports = state.store.list_all().await.map_err(|e| {
        rest_error!("(get_airports) {}", e);
        RestError::Internal(e.to_string())
    })?;

    if airports.is_empty() {
        rest_warn!("(get_airports) no airports loaded.");
        return Err(RestError::NotFound(String::from(
            "Airport data has not loaded into database correctly",
        )));
    }

    Ok(Json(AirportsResponse {
        success: true,
        airport_count: airports.len(),
        airports: airports.to_vec(),
    }))
}

/// Returns the airport with the given id
pub async fn get_airport_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AirportResponse>, RestError> {
    rest_debug!("(get_airport_by_id) entry [{}].", id);
    match state.store.get_by_id(id).await {
        Ok(Some(airport)) => Ok(Json(AirportResponse {
            success: true,
            airport,
        })),
        Ok(None) => Err(RestError::NotFound(format!(
            "Airport with id {} cannot be found",
            id
        ))),
        Err(e) => {
            rest_error!("(get_airport_by_id) {}", e);
            Err(RestError::Internal(e.to_string()))
        }
    }
}

/// Returns the airport with the given ICAO code, ignoring case
pub async fn get_airport_by_icao(
    State(state): State<AppState>,
    Path(icao): Path<String>,
) -> Result<Json<AirportResponse>, RestError> {
    rest_debug!("(get_airport_by_icao) entry [{}].", icao);
    match state.store.get_by_icao(&icao).await {
        Ok(Some(airport)) => Ok(Json(AirportResponse {
            success: true,
            airport,
        })),
        Ok(None) => Err(RestError::NotFound(format!(
            "Airport with ICAO code {} cannot be found",
            icao.to_uppercase()
        ))),
        Err(e) => {
            rest_error!("(get_airport_by_icao) {}", e);
            Err(RestError::Internal(e.to_string()))
        }
    }
}

/// Returns the airport nearest to the posted coordinates
pub async fn nearest_airport(
    State(state): State<AppState>,
    Json(request): Json<CoordinatesRequest>,
) -> Result<Json<NearestAirportResponse>, RestError> {
    rest_debug!("(nearest_airport) entry [{:?}].", request);
    let point = request.validate().map_err(|details| {
        rest_warn!("(nearest_airport) rejected request: {:?}", request);
        RestError::Validation(details)
    })?;

    let lookup = state
        .nearest
        .nearest_in_store(point, state.store.as_ref())
        .await
        .map_err(|e| {
            rest_error!("(nearest_airport) {}", e);
            RestError::from(e)
        })?;

    Ok(Json(NearestAirportResponse {
        success: true,
        nearest_airport: lookup.result.airport,
        distance_km: lookup.result.distance_km,
        input_coordinates: request,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::MemoryCache;
    use crate::rest::server::router;
    use crate::storage::StaticAirportStore;
    use crate::test_util::{heathrow, honington};
    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use serde_json::Value;
    use tower::ServiceExt;

    fn state_with(store: StaticAirportStore, cache: Arc<MemoryCache>) -> AppState {
        AppState {
            store: Arc::new(store),
            nearest: Arc::new(NearestQueryCache::new(cache, 300)),
        }
    }

    fn bundled_state() -> AppState {
        state_with(
            StaticAirportStore::bundled().unwrap(),
            Arc::new(MemoryCache::new()),
        )
    }

    fn empty_state() -> AppState {
        state_with(
            StaticAirportStore::new(vec![]).unwrap(),
            Arc::new(MemoryCache::new()),
        )
    }

    async fn get(state: AppState, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(state, request).await
    }

    async fn post_nearest(state: AppState, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/airports/nearest")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        send(state, request).await
    }

    async fn send(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
        let response = router(state).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        crate::get_log_handle().await;
        ut_info!("(test_health) Start.");

        let (status, body) = get(bundled_state(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "ready": true }));

        ut_info!("(test_health) Success.");
    }

    #[tokio::test]
    async fn test_get_airports() {
        crate::get_log_handle().await;
        ut_info!("(test_get_airports) Start.");

        let (status, body) = get(bundled_state(), "/api/v1/airports").await;
        assert_eq!(status, StatusCode::OK);

        let response: AirportsResponse = serde_json::from_value(body).unwrap();
        assert!(response.success);
        assert_eq!(response.airport_count, 59);
        assert_eq!(response.airports.len(), 59);
        assert_eq!(response.airports[0], honington());

        ut_info!("(test_get_airports) Success.");
    }

    #[tokio::test]
    async fn test_get_airports_empty() {
        crate::get_log_handle().await;
        ut_info!("(test_get_airports_empty) Start.");

        let (status, body) = get(empty_state(), "/api/v1/airports").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "detail": "Airport data has not loaded into database correctly" })
        );

        ut_info!("(test_get_airports_empty) Success.");
    }

    #[tokio::test]
    async fn test_get_airport_by_id() {
        crate::get_log_handle().await;
        ut_info!("(test_get_airport_by_id) Start.");

        let (status, body) = get(bundled_state(), "/api/v1/airports/1").await;
        assert_eq!(status, StatusCode::OK);
        let response: AirportResponse = serde_json::from_value(body).unwrap();
        assert!(response.success);
        assert_eq!(response.airport, honington());

        let (status, body) = get(bundled_state(), "/api/v1/airports/999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "detail": "Airport with id 999 cannot be found" })
        );

        ut_info!("(test_get_airport_by_id) Success.");
    }

    #[tokio::test]
    async fn test_get_airport_by_icao() {
        crate::get_log_handle().await;
        ut_info!("(test_get_airport_by_icao) Start.");

        let (status, body) = get(bundled_state(), "/api/v1/airports/icao/egll").await;
        assert_eq!(status, StatusCode::OK);
        let response: AirportResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.airport, heathrow());

        let (status, body) = get(bundled_state(), "/api/v1/airports/icao/zzzz").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({ "detail": "Airport with ICAO code ZZZZ cannot be found" })
        );

        ut_info!("(test_get_airport_by_icao) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport) Start.");

        let input = json!({ "latitude_degrees": 52.32764, "longitude_degrees": 0.851955 });
        let (status, body) = post_nearest(bundled_state(), input.clone()).await;
        assert_eq!(status, StatusCode::OK);

        let response: NearestAirportResponse = serde_json::from_value(body).unwrap();
        assert!(response.success);
        assert_eq!(response.nearest_airport, honington());
        assert!((response.distance_km - 5.621).abs() < 0.01);
        assert_eq!(
            serde_json::to_value(response.input_coordinates).unwrap(),
            input
        );

        let input = json!({ "latitude_degrees": 51.408314, "longitude_degrees": -0.301567 });
        let (status, body) = post_nearest(bundled_state(), input).await;
        assert_eq!(status, StatusCode::OK);
        let response: NearestAirportResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.nearest_airport, heathrow());
        assert!((response.distance_km - 13.486).abs() < 0.01);

        ut_info!("(test_nearest_airport) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport_is_cached() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_is_cached) Start.");

        let cache = Arc::new(MemoryCache::new());
        let state = state_with(StaticAirportStore::bundled().unwrap(), cache.clone());
        let input = json!({ "latitude_degrees": 52.32764, "longitude_degrees": 0.851955 });

        let (_, first) = post_nearest(state.clone(), input.clone()).await;
        assert_eq!(cache.len().await, 1);

        let (status, second) = post_nearest(state, input).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first, second);
        assert_eq!(cache.len().await, 1);

        ut_info!("(test_nearest_airport_is_cached) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport_out_of_range() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_out_of_range) Start.");

        let cache = Arc::new(MemoryCache::new());
        let state = state_with(StaticAirportStore::bundled().unwrap(), cache.clone());
        let input = json!({ "latitude_degrees": 100.0, "longitude_degrees": 0.0 });
        let (status, body) = post_nearest(state, input).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body,
            json!({
                "detail": [{
                    "loc": ["body", "latitude_degrees"],
                    "msg": "ensure this value is less than or equal to 90",
                    "type": "value_error.number.not_le",
                    "ctx": { "limit_value": 90 }
                }]
            })
        );
        assert!(cache.is_empty().await);

        ut_info!("(test_nearest_airport_out_of_range) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport_both_fields_out_of_range() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_both_fields_out_of_range) Start.");

        let input = json!({ "latitude_degrees": -91.0, "longitude_degrees": 181.0 });
        let (status, body) = post_nearest(bundled_state(), input).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"][0]["type"], "value_error.number.not_ge");
        assert_eq!(body["detail"][0]["ctx"]["limit_value"], -90);
        assert_eq!(body["detail"][1]["loc"][1], "longitude_degrees");
        assert_eq!(body["detail"][1]["ctx"]["limit_value"], 180);

        ut_info!("(test_nearest_airport_both_fields_out_of_range) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport_boundaries_accepted() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_boundaries_accepted) Start.");

        let input = json!({ "latitude_degrees": 90.0, "longitude_degrees": -180.0 });
        let (status, _) = post_nearest(bundled_state(), input).await;
        assert_eq!(status, StatusCode::OK);

        ut_info!("(test_nearest_airport_boundaries_accepted) Success.");
    }

    #[test]
    fn test_invalid_coordinate_error_matches_request_validation() {
        let request = CoordinatesRequest {
            latitude_degrees: 0.0,
            longitude_degrees: -200.0,
        };
        let expected = request.validate().unwrap_err();

        let error = RestError::from(NearestError::InvalidCoordinate(
            CoordinateError::LongitudeOutOfRange(-200.0),
        ));
        assert_eq!(error, RestError::Validation(expected));

        let error = RestError::from(NearestError::InvalidCoordinate(
            CoordinateError::LatitudeOutOfRange(100.0),
        ));
        let RestError::Validation(details) = error else {
            panic!("expected a validation error");
        };
        assert_eq!(details.len(), 1);
        assert_eq!(details[0].loc, vec!["body", "latitude_degrees"]);
        assert_eq!(details[0].kind, "value_error.number.not_le");
        assert_eq!(details[0].ctx.limit_value, 90);
    }

    #[tokio::test]
    async fn test_nearest_airport_empty_dataset() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_empty_dataset) Start.");

        let input = json!({ "latitude_degrees": 52.0, "longitude_degrees": 0.0 });
        let (status, body) = post_nearest(empty_state(), input).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].is_string());

        ut_info!("(test_nearest_airport_empty_dataset) Success.");
    }

    #[tokio::test]
    async fn test_nearest_airport_malformed_body() {
        crate::get_log_handle().await;
        ut_info!("(test_nearest_airport_malformed_body) Start.");

        let input = json!({ "latitude_degrees": "north" });
        let (status, _) = post_nearest(bundled_state(), input).await;
        assert!(status.is_client_error());

        ut_info!("(test_nearest_airport_malformed_body) Success.");
    }
}
