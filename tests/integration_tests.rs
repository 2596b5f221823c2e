/// End-to-end tests for the prediction pipeline against a mock inference
/// service.
///
/// Run with: cargo test --test integration_tests -- --nocapture
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use motor_temp_dashboard::client::{ClientError, PredictionClient};
use motor_temp_dashboard::config::ClientConfig;
use motor_temp_dashboard::controller::{DashboardController, RequestState, SubmitGuard};
use motor_temp_dashboard::gauge::{encode, RING_CIRCUMFERENCE};
use motor_temp_dashboard::recommend::recommend;
use motor_temp_dashboard::risk::{classify, RiskTier, RISK_NEUTRAL, RISK_NORMAL};
use motor_temp_dashboard::sample::Field;

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr) -> PredictionClient {
    let cfg = ClientConfig::new(format!("http://{}", addr), Duration::from_secs(2));
    PredictionClient::new(&cfg).unwrap()
}

#[tokio::test]
async fn successful_prediction_fans_out_to_every_surface() {
    let app = Router::new().route(
        "/predict",
        post(|Json(body): Json<Value>| async move {
            // The request body must carry exactly the seven numeric fields.
            for key in ["ambient", "coolant", "u_d", "u_q", "motor_speed", "i_d", "i_q"] {
                assert!(body.get(key).and_then(Value::as_f64).is_some(), "missing {}", key);
            }
            Json(json!({
                "success": true,
                "prediction": 0.452,
                "risk_level": "normal",
                "timestamp": "2026-08-25T10:30:00.000000",
                "input_features": body,
            }))
        }),
    );
    let client = client_for(serve(app).await);

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().expect("sample data should validate");
    assert!(ctl.state().is_submitting());

    let outcome = client.submit(&sample).await;
    ctl.finish_submit(outcome);

    let result = match ctl.state() {
        RequestState::Succeeded(r) => r.clone(),
        other => panic!("expected Succeeded, got {:?}", other),
    };
    assert_eq!(result.risk_tier, RiskTier::Normal);
    assert_eq!(result.input_features, sample);

    // Displayed temperature, badge, gauge color and checklist all agree.
    let enc = encode(result.prediction, result.risk_tier);
    assert_eq!(enc.display_value, "45.2");
    assert_eq!(enc.color, RISK_NORMAL);
    assert_eq!(result.risk_tier.badge(), "NORMAL");
    assert_eq!(recommend(result.risk_tier).title, "Normal Operation");
    println!("✓ success scenario: 45.2°C, NORMAL, {} arc units", enc.arc_len);
}

#[tokio::test]
async fn server_rejection_surfaces_verbatim_and_reenables_the_form() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": "out of range" })),
            )
        }),
    );
    let client = client_for(serve(app).await);

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().unwrap();
    ctl.finish_submit(client.submit(&sample).await);

    match ctl.state() {
        RequestState::Failed(reason) => assert!(reason.contains("out of range"), "{}", reason),
        other => panic!("expected Failed, got {:?}", other),
    }
    assert!(ctl.last_result().is_none(), "no PredictionResult was created");

    // Editing returns to Idle and another attempt is allowed.
    ctl.edit_field(Field::Ambient, "26.0".to_string());
    assert_eq!(*ctl.state(), RequestState::Idle);
    assert!(ctl.begin_submit().is_ok());
    println!("✓ rejection surfaced verbatim, form re-enabled");
}

#[tokio::test]
async fn unreachable_backend_maps_to_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(addr);
    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().unwrap();
    let outcome = client.submit(&sample).await;

    match &outcome {
        Err(ClientError::Transport { .. }) => {}
        other => panic!("expected Transport, got {:?}", other),
    }
    let message = outcome.unwrap_err().to_string();
    assert!(
        message.contains("is the backend running"),
        "message must point at the backend: {}",
        message
    );

    ctl.finish_submit(Err(ClientError::Transport {
        url: format!("http://{}/predict", addr),
        detail: "connection refused".to_string(),
    }));
    assert!(matches!(ctl.state(), RequestState::Failed(_)));
    assert!(!ctl.is_busy());
    println!("✓ connection refused → TransportError");
}

#[tokio::test]
async fn stuck_backend_times_out_as_transport_error() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({ "success": true, "prediction": 0.1, "risk_level": "low" }))
        }),
    );
    let addr = serve(app).await;
    let cfg = ClientConfig::new(format!("http://{}", addr), Duration::from_millis(300));
    let client = PredictionClient::new(&cfg).unwrap();

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().unwrap();
    match client.submit(&sample).await {
        Err(ClientError::Transport { detail, .. }) => {
            assert!(detail.contains("timed out"), "{}", detail)
        }
        other => panic!("expected timeout Transport, got {:?}", other),
    }
    println!("✓ bounded timeout → TransportError");
}

#[tokio::test]
async fn non_json_response_is_a_transport_error() {
    let app = Router::new().route("/predict", post(|| async { "<html>proxy error</html>" }));
    let client = client_for(serve(app).await);

    let sample = {
        let mut ctl = DashboardController::new();
        ctl.load_sample();
        ctl.begin_submit().unwrap()
    };
    match client.submit(&sample).await {
        Err(ClientError::Transport { detail, .. }) => {
            assert!(detail.contains("unexpected response"), "{}", detail)
        }
        other => panic!("expected Transport, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_risk_tier_renders_with_the_neutral_style() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            Json(json!({ "success": true, "prediction": 0.5, "risk_level": "incandescent" }))
        }),
    );
    let client = client_for(serve(app).await);

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().unwrap();
    ctl.finish_submit(client.submit(&sample).await);

    let result = match ctl.state() {
        RequestState::Succeeded(r) => r.clone(),
        other => panic!("expected Succeeded, got {:?}", other),
    };
    assert_eq!(result.risk_tier, RiskTier::Unknown);
    assert_eq!(classify(result.risk_tier).color, RISK_NEUTRAL);
    assert_eq!(encode(result.prediction, result.risk_tier).color, RISK_NEUTRAL);
    println!("✓ unrecognized tier fell back to neutral style");
}

#[tokio::test]
async fn validation_failure_never_contacts_the_server() {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route(
            "/predict",
            post(|State(hits): State<Arc<AtomicUsize>>| async move {
                hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({ "success": true, "prediction": 0.1, "risk_level": "low" }))
            }),
        )
        .with_state(hits.clone());
    let _client = client_for(serve(app).await);

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    ctl.edit_field(Field::Coolant, String::new());

    match ctl.begin_submit() {
        Err(SubmitGuard::Invalid(_)) => {}
        other => panic!("expected validation failure, got {:?}", other),
    }
    assert_eq!(*ctl.state(), RequestState::Idle);

    // No normalized sample exists, so nothing could have been sent.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    println!("✓ empty field blocked submission before the network layer");
}

#[tokio::test]
async fn in_flight_guard_rejects_a_second_submit() {
    let app = Router::new().route(
        "/predict",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Json(json!({ "success": true, "prediction": 0.3, "risk_level": "normal" }))
        }),
    );
    let client = client_for(serve(app).await);

    let mut ctl = DashboardController::new();
    ctl.load_sample();
    let sample = ctl.begin_submit().unwrap();
    let pending = tokio::spawn({
        let client = client.clone();
        async move { client.submit(&sample).await }
    });

    // While the first request is outstanding, a second submit must bounce.
    assert_eq!(ctl.begin_submit(), Err(SubmitGuard::InFlight));

    ctl.finish_submit(pending.await.unwrap());
    assert!(matches!(ctl.state(), RequestState::Succeeded(_)));
    println!("✓ single in-flight request enforced by the state machine");
}

#[tokio::test]
async fn health_and_model_info_probes_parse() {
    let app = Router::new()
        .route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "model_loaded": true,
                    "scaler_loaded": true,
                    "timestamp": "2026-08-25T10:00:00"
                }))
            }),
        )
        .route(
            "/model-info",
            get(|| async {
                Json(json!({
                    "success": true,
                    "model_type": "DecisionTreeRegressor",
                    "features": ["ambient", "coolant", "u_d", "u_q", "motor_speed", "i_d", "i_q"],
                    "target": "permanent_magnet_temperature",
                    "performance": { "r2_score": 0.96, "rmse": 0.03 }
                }))
            }),
        );
    let client = client_for(serve(app).await);

    let health = client.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert!(health.model_loaded && health.scaler_loaded);

    let info = client.model_info().await.unwrap();
    assert_eq!(info.model_type, "DecisionTreeRegressor");
    assert_eq!(info.features.len(), 7);
    assert!((info.performance.r2_score - 0.96).abs() < 1e-9);
    println!("✓ health + model-info probes parse");
}

#[test]
fn gauge_contract_against_the_reference_ring() {
    // The reference visual: radius-85 ring, circumference 534 units.
    assert_eq!(RING_CIRCUMFERENCE, 534.0);
    let full = encode(1.0, RiskTier::Critical);
    assert!((full.arc_len - 534.0).abs() < 1e-9);
    let over = encode(1.5, RiskTier::Critical);
    assert!((over.arc_len - 534.0).abs() < 1e-9, "arc never overflows the ring");
}
