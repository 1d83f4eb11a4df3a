//! Inference client tests against a mock HTTP server

use mockito::{Matcher, Server};
use predictor_lib::config::normalize_base_url;
use predictor_lib::predictor::{project_conservation, project_lifespan, SeverityColor};
use predictor_lib::{
    FailureClass, InferenceClient, PredictionError, PredictionKind, PredictionOutcome,
    PredictionService, RawProfile, ResolvedConfig, Resolution, SubmissionController,
    SubmissionState,
};
use serde_json::json;
use std::sync::Arc;

const API_KEY: &str = "test-api-key";

fn client_for(server: &Server) -> InferenceClient {
    InferenceClient::new(&ResolvedConfig {
        base_url: normalize_base_url(&server.url()).unwrap(),
        api_key: API_KEY.to_string(),
        request_timeout: None,
    })
    .unwrap()
}

fn profile(species: &str, diet: &str, habitat: &str, social: &str) -> RawProfile {
    RawProfile {
        species: Some(species.to_string()),
        height: Some("90".to_string()),
        weight: Some("200".to_string()),
        gestation_period: Some("110".to_string()),
        top_speed: Some("65".to_string()),
        offspring_per_birth: Some("3".to_string()),
        diet: Some(diet.to_string()),
        habitat: Some(habitat.to_string()),
        social_structure: Some(social.to_string()),
    }
}

fn tiger() -> RawProfile {
    profile("Tiger", "Carnivore", "Not Oceans", "Solitary")
}

#[tokio::test]
async fn test_lifespan_request_shape_and_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/predict/lifespan")
        .match_header("x-api-key", API_KEY)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "Height_high": 90.0,
            "Weight_high": 200.0,
            "GP_high": 110.0,
            "Top Spe_high": 65.0,
            "OPB_high": 3.0,
            "Diet_Carnivore": 1,
            "Habitat_Oceans": 0,
            "Conservation Status_Endangered": 1,
            "Social Structure_Group-based": 0
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"predicted_lifespan": 18.4}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let prediction = client
        .predict_lifespan(&project_lifespan(&validated))
        .await
        .unwrap();

    assert_eq!(prediction.years, 18.4);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_conservation_request_shape_and_response() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/predict/conservation")
        .match_header("x-api-key", API_KEY)
        .match_body(Matcher::PartialJson(json!({
            "Height (cm)": 90.0,
            "Offspring per Birth": 3.0,
            "Diet_Carnivore": 1,
            "Habitat_Oceans": 0,
            "Social Structure_Group-based": 0
        })))
        .with_status(200)
        .with_body(r#"{"predicted_conservation_status": 1, "probability_endangered": 0.82}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let prediction = client
        .predict_conservation(&project_conservation(&validated))
        .await
        .unwrap();

    assert_eq!(prediction.status_code, 1);
    assert_eq!(prediction.probability_endangered, 0.82);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_base_path_is_preserved() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v2/predict/lifespan")
        .with_status(200)
        .with_body(r#"{"predicted_lifespan": 3.0}"#)
        .create_async()
        .await;

    // No trailing slash on the configured base
    let client = InferenceClient::new(&ResolvedConfig {
        base_url: normalize_base_url(&format!("{}/api/v2", server.url())).unwrap(),
        api_key: API_KEY.to_string(),
        request_timeout: None,
    })
    .unwrap();

    let validated = predictor_lib::validate(&tiger()).unwrap();
    client
        .predict_lifespan(&project_lifespan(&validated))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_http_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/conservation")
        .with_status(503)
        .with_body("model warming up")
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let err = client
        .predict_conservation(&project_conservation(&validated))
        .await
        .unwrap_err();

    assert_eq!(err.class(), FailureClass::Http);
    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "Server responded with 503: Service Unavailable");
}

#[tokio::test]
async fn test_unauthorized_is_http_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/lifespan")
        .match_header("x-api-key", "wrong-key")
        .with_status(401)
        .create_async()
        .await;

    let client = InferenceClient::new(&ResolvedConfig {
        base_url: normalize_base_url(&server.url()).unwrap(),
        api_key: "wrong-key".to_string(),
        request_timeout: None,
    })
    .unwrap();
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let err = client
        .predict_lifespan(&project_lifespan(&validated))
        .await
        .unwrap_err();

    assert!(matches!(err, PredictionError::Http { status: 401, .. }));
}

#[tokio::test]
async fn test_missing_field_is_decode_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/lifespan")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let err = client
        .predict_lifespan(&project_lifespan(&validated))
        .await
        .unwrap_err();

    assert_eq!(err.class(), FailureClass::Decode);
    assert!(err.to_string().contains("predicted_lifespan"));
}

#[tokio::test]
async fn test_non_json_body_is_decode_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/conservation")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();
    let err = client
        .predict_conservation(&project_conservation(&validated))
        .await
        .unwrap_err();

    assert_eq!(err.class(), FailureClass::Decode);
}

#[tokio::test]
async fn test_out_of_range_values_are_decode_failures() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/lifespan")
        .with_status(200)
        .with_body(r#"{"predicted_lifespan": -2.0}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/predict/conservation")
        .with_status(200)
        .with_body(r#"{"predicted_conservation_status": 0, "probability_endangered": 1.7}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let validated = predictor_lib::validate(&tiger()).unwrap();

    let err = client
        .predict_lifespan(&project_lifespan(&validated))
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Decode);

    let err = client
        .predict_conservation(&project_conservation(&validated))
        .await
        .unwrap_err();
    assert_eq!(err.class(), FailureClass::Decode);
}

#[tokio::test]
async fn test_controller_malformed_lifespan_response() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/predict/lifespan")
        .with_status(200)
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let controller =
        SubmissionController::new(PredictionKind::Lifespan, Arc::new(client_for(&server)));
    let resolution = controller.submit(&tiger()).await.unwrap();

    let Resolution::Applied(SubmissionState::Failed { notice, .. }) = resolution else {
        panic!("expected failed state, got {:?}", resolution);
    };
    assert_eq!(notice.class, FailureClass::Decode);
    assert!(controller.state().await.outcome().is_none());
}

#[tokio::test]
async fn test_controller_conservation_codes() {
    let cases = [
        (1, "Endangered", SeverityColor::Orange, true),
        (0, "Not Endangered", SeverityColor::Blue, true),
        (99, "Status Level: 99", SeverityColor::Gray, false),
    ];

    for (code, label, color, curated) in cases {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/predict/conservation")
            .with_status(200)
            .with_body(
                json!({
                    "predicted_conservation_status": code,
                    "probability_endangered": 0.5
                })
                .to_string(),
            )
            .create_async()
            .await;

        let controller = SubmissionController::new(
            PredictionKind::Conservation,
            Arc::new(client_for(&server)),
        );
        let raw = profile("Blue Whale", "Other", "Oceans", "Group-based");
        controller.submit(&raw).await.unwrap();

        match controller.state().await.outcome() {
            Some(PredictionOutcome::Conservation { prediction, entry }) => {
                assert_eq!(prediction.status_code, code);
                assert_eq!(entry.status, label);
                assert_eq!(entry.color, color);
                assert_eq!(entry.curated, curated);
            }
            other => panic!("unexpected outcome for code {}: {:?}", code, other),
        }
    }
}

#[tokio::test]
async fn test_controller_validation_failure_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let controller =
        SubmissionController::new(PredictionKind::Conservation, Arc::new(client_for(&server)));
    let mut raw = tiger();
    raw.species = Some("T".to_string());
    raw.diet = None;

    let errors = controller.submit(&raw).await.unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(controller.state().await, SubmissionState::Idle);
    mock.assert_async().await;
}
