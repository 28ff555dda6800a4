use crate::infra::AppState;
use crate::report::MatchReport;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use listing_match::error::AppError;
use listing_match::matching::{
    AgentId, DismissedMatches, Listing, MatchFinder, MatchingConfig, PropertyRequest,
    TeamDirectory,
};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

/// Knobs shared by every match endpoint.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct MatchOptions {
    #[serde(default)]
    pub(crate) team_directory: HashMap<AgentId, String>,
    #[serde(default)]
    pub(crate) min_score: Option<u8>,
    #[serde(default)]
    pub(crate) dismissed: Vec<String>,
}

impl MatchOptions {
    fn finder(&self, defaults: &MatchingConfig) -> Result<MatchFinder, AppError> {
        let mut config = defaults.clone();
        if let Some(min_score) = self.min_score {
            if min_score > 100 {
                return Err(AppError::InvalidRequest(format!(
                    "min_score must be between 0 and 100, got {min_score}"
                )));
            }
            config.min_score = min_score;
        }
        Ok(MatchFinder::new(config))
    }

    fn directory(&self) -> Option<&dyn TeamDirectory> {
        if self.team_directory.is_empty() {
            None
        } else {
            Some(&self.team_directory)
        }
    }

    fn dismissed(&self) -> DismissedMatches {
        self.dismissed.iter().cloned().collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) listings: Vec<Listing>,
    pub(crate) requests: Vec<PropertyRequest>,
    #[serde(flatten)]
    pub(crate) options: MatchOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListingMatchRequest {
    pub(crate) listing: Listing,
    pub(crate) requests: Vec<PropertyRequest>,
    #[serde(flatten)]
    pub(crate) options: MatchOptions,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RequestMatchRequest {
    pub(crate) request: PropertyRequest,
    pub(crate) listings: Vec<Listing>,
    #[serde(flatten)]
    pub(crate) options: MatchOptions,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/matches", post(matches_endpoint))
        .route("/api/v1/matches/listing", post(listing_matches_endpoint))
        .route("/api/v1/matches/request", post(request_matches_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn matches_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let MatchRequest {
        listings,
        requests,
        options,
    } = payload;

    let finder = options.finder(&state.matching)?;
    let results = finder.find(&listings, &requests, options.directory());
    let report = MatchReport::new(
        options.dismissed().retain_visible(results),
        finder.config().min_score,
    );

    info!(
        listings = listings.len(),
        requests = requests.len(),
        matches = report.summary.total,
        "match run served"
    );
    Ok(Json(report))
}

pub(crate) async fn listing_matches_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ListingMatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let ListingMatchRequest {
        listing,
        requests,
        options,
    } = payload;

    let finder = options.finder(&state.matching)?;
    let results = finder.for_listing(&listing, &requests, options.directory());
    Ok(Json(MatchReport::new(
        options.dismissed().retain_visible(results),
        finder.config().min_score,
    )))
}

pub(crate) async fn request_matches_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RequestMatchRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let RequestMatchRequest {
        request,
        listings,
        options,
    } = payload;

    let finder = options.finder(&state.matching)?;
    let results = finder.for_request(&request, &listings, options.directory());
    Ok(Json(MatchReport::new(
        options.dismissed().retain_visible(results),
        finder.config().min_score,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state(ready: bool) -> AppState {
        let recorder = PrometheusBuilder::new().build_recorder();
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(recorder.handle()),
            matching: Arc::new(MatchingConfig::default()),
        }
    }

    fn listing(id: &str, price: f64, owner: &str) -> Value {
        json!({
            "id": id,
            "transaction_type": "Satılık",
            "property_type": "Apartment",
            "price": price,
            "rooms": "3+1",
            "net_area": 120.0,
            "city": "İstanbul",
            "district": "Kadıköy",
            "status": "Aktif",
            "owner_id": owner
        })
    }

    fn request(id: &str) -> Value {
        json!({
            "id": id,
            "status": "active",
            "transaction_type": "Satılık",
            "property_type": "apartment",
            "min_price": 2_000_000.0,
            "max_price": 3_000_000.0,
            "rooms": "3+1",
            "min_area": 100.0,
            "max_area": 140.0,
            "city": "İstanbul",
            "district": "Kadıköy",
            "owner_id": "u1"
        })
    }

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let response = router(test_state(true))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        let status = response.status();
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        (status, serde_json::from_slice(&body).expect("json"))
    }

    #[tokio::test]
    async fn readiness_reflects_startup_state() {
        let response = router(test_state(false))
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router(test_state(true))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn matches_endpoint_ranks_and_annotates_results() {
        let body = json!({
            "listings": [
                listing("lst-over", 3_200_000.0, "u2"),
                listing("lst-exact", 2_500_000.0, "u2"),
                listing("lst-far", 9_000_000.0, "u1")
            ],
            "requests": [request("req-1")],
            "team_directory": { "u1": "Ayşe Yılmaz", "u2": "Mehmet Demir" }
        });

        let (status, payload) = post_json("/api/v1/matches", body).await;

        assert_eq!(status, StatusCode::OK);
        let matches = payload["matches"].as_array().expect("matches array");
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0]["listing"]["id"], "lst-exact");
        assert_eq!(matches[0]["total_score"], 100);
        assert_eq!(matches[0]["badge"], "perfect");
        assert_eq!(matches[0]["level"], "high");
        assert_eq!(matches[0]["is_cross_consultant"], true);
        assert_eq!(matches[0]["property_owner_name"], "Mehmet Demir");
        assert_eq!(matches[1]["listing"]["id"], "lst-over");
        assert_eq!(matches[1]["total_score"], 90);
        assert_eq!(payload["summary"]["total"], 3);
        assert_eq!(payload["min_score"], 30);
    }

    #[tokio::test]
    async fn matches_endpoint_applies_min_score_and_dismissals() {
        let body = json!({
            "listings": [
                listing("lst-over", 3_200_000.0, "u2"),
                listing("lst-exact", 2_500_000.0, "u2"),
                listing("lst-far", 9_000_000.0, "u1")
            ],
            "requests": [request("req-1")],
            "min_score": 90,
            "dismissed": ["req-1:lst-exact"]
        });

        let (status, payload) = post_json("/api/v1/matches", body).await;

        assert_eq!(status, StatusCode::OK);
        let matches = payload["matches"].as_array().expect("matches array");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["listing"]["id"], "lst-over");
        assert!(matches[0].get("property_owner_name").is_none());
    }

    #[tokio::test]
    async fn out_of_range_min_score_is_rejected() {
        let body = json!({
            "listings": [],
            "requests": [],
            "min_score": 150
        });

        let (status, payload) = post_json("/api/v1/matches", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(payload["error"]
            .as_str()
            .expect("error message")
            .contains("min_score"));
    }

    #[tokio::test]
    async fn focused_endpoints_narrow_the_search() {
        let body = json!({
            "listing": listing("lst-exact", 2_500_000.0, "u2"),
            "requests": [request("req-1"), request("req-2")]
        });
        let (status, payload) = post_json("/api/v1/matches/listing", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["summary"]["total"], 2);

        let body = json!({
            "request": request("req-2"),
            "listings": [
                listing("lst-exact", 2_500_000.0, "u2"),
                listing("lst-sold", 2_500_000.0, "u2")
            ]
        });
        let mut sold = body.clone();
        sold["listings"][1]["status"] = json!("Satıldı");
        let (status, payload) = post_json("/api/v1/matches/request", sold).await;
        assert_eq!(status, StatusCode::OK);
        let matches = payload["matches"].as_array().expect("matches array");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0]["request"]["id"], "req-2");
    }
}
