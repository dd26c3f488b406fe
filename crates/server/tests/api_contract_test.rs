use profit_api_core::{LinearRegressor, ModelHandle, ModelKind, PredictError, ProfitModel};
use profit_api_config::ServerSettings;
use profit_api_server::{app, state::AppState};
use rocket::{
    Config,
    http::{ContentType, Status},
    local::asynchronous::{Client, LocalResponse},
};
use serde_json::{Value, json};

const MISSING_FIELDS: &str = "Invalid input data. Please provide worker_salary, raw_material_cost, and targeted_materials_produced.";
const INVALID_TYPE: &str = "Invalid data type. Please ensure all inputs are numbers.";
const MODEL_NOT_LOADED: &str = "Model not loaded. Please check the server logs.";

#[derive(Debug)]
struct RejectingModel;

impl ProfitModel for RejectingModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Linear
    }

    fn n_features(&self) -> usize {
        4
    }

    fn predict(&self, batch: &[&[f64]]) -> Result<Vec<f64>, PredictError> {
        Err(PredictError::FeatureCountMismatch {
            model: "LinearRegression",
            expected: 4,
            found: batch[0].len(),
        })
    }
}

#[derive(Debug)]
struct PanickingModel;

impl ProfitModel for PanickingModel {
    fn kind(&self) -> ModelKind {
        ModelKind::TreeEnsemble
    }

    fn n_features(&self) -> usize {
        3
    }

    fn predict(&self, _batch: &[&[f64]]) -> Result<Vec<f64>, PredictError> {
        panic!("corrupted model state")
    }
}

fn linear_model() -> ModelHandle {
    ModelHandle::loaded(LinearRegressor::new(vec![0.5, 0.25, 1.0], 10.0))
}

async fn client_with(handle: ModelHandle) -> Client {
    let rocket = app::build_rocket(AppState::new(handle), Config::figment());
    Client::tracked(rocket).await.expect("client should build")
}

async fn post_predict(client: &Client, body: String) -> LocalResponse<'_> {
    client
        .post("/predict")
        .header(ContentType::JSON)
        .body(body)
        .dispatch()
        .await
}

async fn read_json(response: LocalResponse<'_>) -> Value {
    response
        .into_string()
        .await
        .map(|s| serde_json::from_str::<Value>(&s).expect("response must be valid JSON"))
        .expect("response body should exist")
}

fn scenario_a() -> Value {
    json!({
        "worker_salary": 1000,
        "raw_material_cost": 500,
        "targeted_materials_produced": 200
    })
}

#[rocket::async_test]
async fn welcome_returns_fixed_message() {
    let client = client_with(linear_model()).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::JSON));
    assert_eq!(
        read_json(response).await,
        json!({"message": "Welcome to the Profit Prediction API!"})
    );
}

#[rocket::async_test]
async fn welcome_does_not_need_a_model() {
    let client = client_with(ModelHandle::unloaded("no artifact")).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn well_formed_input_returns_only_predicted_profit() {
    let client = client_with(linear_model()).await;

    let response = post_predict(&client, scenario_a().to_string()).await;
    assert_eq!(response.status(), Status::Ok);

    let body = read_json(response).await;
    let object = body.as_object().expect("body is an object");
    assert_eq!(object.len(), 1);
    assert_eq!(body["predicted_profit"].as_f64(), Some(835.0));
}

#[rocket::async_test]
async fn fractional_and_numeric_string_inputs_are_accepted() {
    let client = client_with(linear_model()).await;

    let payload = json!({
        "worker_salary": "1000.5",
        "raw_material_cost": " 500 ",
        "targeted_materials_produced": 2e2
    });
    let response = post_predict(&client, payload.to_string()).await;
    assert_eq!(response.status(), Status::Ok);

    let body = read_json(response).await;
    assert_eq!(body["predicted_profit"].as_f64(), Some(835.25));
}

#[rocket::async_test]
async fn booleans_coerce_to_one_and_zero() {
    let client = client_with(linear_model()).await;

    let payload = json!({
        "worker_salary": true,
        "raw_material_cost": false,
        "targeted_materials_produced": 200
    });
    let response = post_predict(&client, payload.to_string()).await;
    assert_eq!(response.status(), Status::Ok);

    let body = read_json(response).await;
    assert_eq!(body["predicted_profit"].as_f64(), Some(210.5));
}

#[rocket::async_test]
async fn content_type_is_not_required() {
    let client = client_with(linear_model()).await;

    let response = client
        .post("/predict")
        .body(scenario_a().to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn repeated_requests_yield_identical_predictions() {
    let client = client_with(ModelHandle::loaded(LinearRegressor::new(
        vec![0.1, 0.2, 0.3],
        -7.77,
    )))
    .await;

    let mut seen = Vec::new();
    for _ in 0..5 {
        let response = post_predict(&client, scenario_a().to_string()).await;
        assert_eq!(response.status(), Status::Ok);
        seen.push(read_json(response).await["predicted_profit"].clone());
    }
    assert!(seen.windows(2).all(|pair| pair[0] == pair[1]));
}

#[rocket::async_test]
async fn missing_third_field_is_rejected() {
    let client = client_with(linear_model()).await;

    let payload = json!({"worker_salary": 1000, "raw_material_cost": 500});
    let response = post_predict(&client, payload.to_string()).await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(read_json(response).await, json!({"error": MISSING_FIELDS}));
}

#[rocket::async_test]
async fn missing_fields_win_over_bad_values() {
    let client = client_with(linear_model()).await;

    let payloads = [
        json!({}),
        json!({"worker_salary": "abc"}),
        json!({"raw_material_cost": null, "targeted_materials_produced": [1, 2]}),
        json!({"worker_salary": 1, "raw_material_cost": 2, "targeted": 3}),
        json!([1000, 500, 200]),
        json!("worker_salary raw_material_cost targeted_materials_produced"),
    ];
    for payload in payloads {
        let response = post_predict(&client, payload.to_string()).await;
        assert_eq!(response.status(), Status::BadRequest, "payload {payload}");
        assert_eq!(read_json(response).await["error"], MISSING_FIELDS);
    }
}

#[rocket::async_test]
async fn non_numeric_word_is_rejected() {
    let client = client_with(linear_model()).await;

    let payload = json!({
        "worker_salary": "high",
        "raw_material_cost": 500,
        "targeted_materials_produced": 200
    });
    let response = post_predict(&client, payload.to_string()).await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(read_json(response).await, json!({"error": INVALID_TYPE}));
}

#[rocket::async_test]
async fn non_coercible_values_are_rejected() {
    let client = client_with(linear_model()).await;

    let bad_values = [
        json!("abc"),
        json!(null),
        json!([1, 2]),
        json!({"amount": 1}),
        json!(""),
        json!("inf"),
    ];
    for bad in bad_values {
        let payload = json!({
            "worker_salary": 1000,
            "raw_material_cost": bad,
            "targeted_materials_produced": 200
        });
        let response = post_predict(&client, payload.to_string()).await;
        assert_eq!(response.status(), Status::BadRequest, "value {bad}");
        assert_eq!(read_json(response).await["error"], INVALID_TYPE);
    }
}

#[rocket::async_test]
async fn malformed_json_is_a_client_error() {
    let client = client_with(linear_model()).await;

    for body in ["", "{\"worker_salary\": 1000,", "not json"] {
        let response = post_predict(&client, body.to_string()).await;
        assert_eq!(response.status(), Status::BadRequest, "body {body:?}");
        let error = read_json(response).await["error"]
            .as_str()
            .map(str::to_owned)
            .expect("error string");
        assert!(error.starts_with("Malformed JSON body: "), "got {error}");
    }
}

#[rocket::async_test]
async fn unloaded_model_short_circuits_every_request() {
    let client = client_with(ModelHandle::unloaded("artifact missing")).await;

    let bodies = [
        scenario_a().to_string(),
        json!({"worker_salary": 1000}).to_string(),
        json!({"worker_salary": "high", "raw_material_cost": 1, "targeted_materials_produced": 2})
            .to_string(),
        "{broken".to_string(),
    ];
    for body in bodies {
        let response = post_predict(&client, body).await;
        assert_eq!(response.status(), Status::InternalServerError);
        assert_eq!(read_json(response).await, json!({"error": MODEL_NOT_LOADED}));
    }
}

#[rocket::async_test]
async fn model_rejection_surfaces_as_server_error() {
    let client = client_with(ModelHandle::loaded(RejectingModel)).await;

    let response = post_predict(&client, scenario_a().to_string()).await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(
        read_json(response).await,
        json!({"error": "X has 3 features, but LinearRegression is expecting 4 features as input."})
    );
}

#[rocket::async_test]
async fn non_finite_prediction_surfaces_as_server_error() {
    let client = client_with(ModelHandle::loaded(LinearRegressor::new(
        vec![f64::MAX, 0.0, 0.0],
        0.0,
    )))
    .await;

    let response = post_predict(&client, scenario_a().to_string()).await;
    assert_eq!(response.status(), Status::InternalServerError);
    assert_eq!(
        read_json(response).await,
        json!({"error": "LinearRegression produced a non-finite prediction (inf)"})
    );
}

#[rocket::async_test]
async fn oversized_body_is_rejected_as_too_large() {
    let rocket = app::build_rocket(
        AppState::new(linear_model()),
        app::figment(&ServerSettings::default()),
    );
    let client = Client::tracked(rocket).await.expect("client should build");

    let payload = json!({
        "worker_salary": 1000,
        "raw_material_cost": 500,
        "targeted_materials_produced": 200,
        "padding": "x".repeat(70 * 1024)
    });
    let response = post_predict(&client, payload.to_string()).await;
    assert_eq!(response.status(), Status::PayloadTooLarge);
    let error = read_json(response).await["error"]
        .as_str()
        .map(str::to_owned)
        .expect("error string");
    assert!(error.starts_with("Request body exceeds the 64"), "got {error}");

    let response = post_predict(&client, scenario_a().to_string()).await;
    assert_eq!(response.status(), Status::Ok);
}

#[rocket::async_test]
async fn model_panic_surfaces_as_server_error() {
    let client = client_with(ModelHandle::loaded(PanickingModel)).await;

    let response = post_predict(&client, scenario_a().to_string()).await;
    assert_eq!(response.status(), Status::InternalServerError);
    let body = read_json(response).await;
    assert!(body["error"]
        .as_str()
        .is_some_and(|text| text.starts_with("prediction task failed")));
}

#[rocket::async_test]
async fn unknown_routes_return_json_errors() {
    let client = client_with(linear_model()).await;

    let response = client.get("/predict").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(
        read_json(response).await,
        json!({"error": "Resource not found: /predict"})
    );

    let response = client.delete("/").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert!(read_json(response).await["error"].is_string());
}
