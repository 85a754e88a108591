//! HTTP adapter: Implementation of PredictionService over reqwest.
//!
//! Sends `POST {base}/predict` with a JSON body and maps the response into the
//! assessment error taxonomy:
//! - non-2xx status: `Service`, using the body's `error` field when present
//! - send failure or unparsable success body: `Transport`
//!
//! Clinical values never reach the logs; only status codes and outcomes do.

use async_trait::async_trait;

use crate::config::{ClientConfig, ConfigError};
use crate::domain::{AssessmentError, HealthStatus, PredictionRequest, PredictionResponse};
use crate::ports::PredictionService;

/// reqwest-backed client for the prediction service.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: reqwest::Client,
    predict_url: String,
    health_url: String,
}

impl HttpPredictionClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    /// Returns `ConfigError::HttpClientBuild` if the TLS backend cannot be initialized.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            predict_url: config.predict_url(),
            health_url: config.health_url(),
        })
    }

    #[must_use]
    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }

    /// Read a failure body and turn it into a service error.
    async fn service_error(response: reqwest::Response) -> AssessmentError {
        let status = response.status().as_u16();
        // An unreadable body is treated like one without an `error` field.
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body);
        tracing::warn!(
            status,
            has_message = message.is_some(),
            "Prediction service returned failure status"
        );
        AssessmentError::service(message)
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResponse, AssessmentError> {
        tracing::debug!(url = %self.predict_url, "Sending prediction request");

        let response = self
            .http
            .post(&self.predict_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Prediction request failed: {e}");
                AssessmentError::transport(e.to_string())
            })?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| AssessmentError::transport(e.to_string()))?;
        let prediction = parse_prediction_body(&body)?;

        tracing::info!(
            prediction = prediction.prediction,
            "Prediction received"
        );
        Ok(prediction)
    }

    async fn health(&self) -> Result<HealthStatus, AssessmentError> {
        let response = self
            .http
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| AssessmentError::transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::service_error(response).await);
        }

        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| AssessmentError::transport(e.to_string()))
    }
}

/// Extract a non-empty string `error` field from a JSON failure body.
fn error_message_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

fn parse_prediction_body(body: &str) -> Result<PredictionResponse, AssessmentError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::warn!("Prediction response could not be parsed: {e}");
        AssessmentError::transport(format!("Invalid prediction response: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormField, FormInput, GENERIC_SERVICE_MESSAGE};

    use axum::http::{header, HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    async fn spawn_service(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: &str) -> HttpPredictionClient {
        HttpPredictionClient::new(&ClientConfig::with_base_url(base_url).unwrap()).unwrap()
    }

    fn sample_request() -> PredictionRequest {
        let mut form = FormInput::new();
        for (field, value) in [
            (FormField::Age, "45"),
            (FormField::Sex, "M"),
            (FormField::ChestPainType, "ATA"),
            (FormField::RestingBp, "120"),
            (FormField::Cholesterol, "200"),
            (FormField::FastingBs, "0"),
            (FormField::RestingEcg, "Normal"),
            (FormField::MaxHr, "150"),
            (FormField::ExerciseAngina, "N"),
            (FormField::Oldpeak, "1.5"),
            (FormField::StSlope, "Up"),
        ] {
            form.set(field, value);
        }
        PredictionRequest::from_form(&form)
    }

    fn positive_body() -> Value {
        json!({
            "prediction": 1,
            "prediction_text": "Heart Disease Detected",
            "probability": { "no_disease": 0.125, "heart_disease": 0.875 },
            "confidence": 0.875
        })
    }

    #[tokio::test]
    async fn test_predict_success_posts_json() {
        let seen: Arc<Mutex<Option<(Value, String)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/predict",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    let content_type = headers
                        .get(header::CONTENT_TYPE)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *captured.lock().unwrap() = Some((body, content_type));
                    Json(positive_body())
                }
            }),
        );
        let base = spawn_service(router).await;

        let response = client_for(&base).predict(&sample_request()).await.unwrap();
        assert_eq!(response.prediction, 1);
        assert_eq!(response.prediction_text, "Heart Disease Detected");
        assert_eq!(response.probability.heart_disease, 0.875);
        assert_eq!(response.confidence, 0.875);

        let (body, content_type) = seen.lock().unwrap().take().unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(body["Age"], json!(45));
        assert_eq!(body["Oldpeak"], json!(1.5));
        assert_eq!(body["ST_Slope"], json!("Up"));
        assert_eq!(body.as_object().unwrap().len(), 11);
    }

    #[tokio::test]
    async fn test_predict_service_error_message() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::BAD_REQUEST, Json(json!({ "error": "bad input" }))) }),
        );
        let base = spawn_service(router).await;

        let err = client_for(&base).predict(&sample_request()).await.unwrap_err();
        assert_eq!(err, AssessmentError::Service("bad input".to_string()));
        assert_eq!(err.to_string(), "bad input");
    }

    #[tokio::test]
    async fn test_predict_service_error_without_json_body() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response() }),
        );
        let base = spawn_service(router).await;

        let err = client_for(&base).predict(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_SERVICE_MESSAGE);
    }

    #[tokio::test]
    async fn test_predict_unparsable_success_body_is_transport_error() {
        let router = Router::new().route("/predict", post(|| async { "not json" }));
        let base = spawn_service(router).await;

        let err = client_for(&base).predict(&sample_request()).await.unwrap_err();
        assert!(matches!(err, AssessmentError::Transport(ref m) if m.starts_with("Invalid prediction response")));
    }

    #[tokio::test]
    async fn test_predict_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .predict(&sample_request())
            .await
            .unwrap_err();
        assert!(matches!(err, AssessmentError::Transport(ref m) if !m.is_empty()));
    }

    #[tokio::test]
    async fn test_health() {
        let router = Router::new().route(
            "/health",
            get(|| async {
                Json(json!({
                    "status": "healthy",
                    "message": "Heart Disease Prediction API is running"
                }))
            }),
        );
        let base = spawn_service(router).await;

        let status = client_for(&base).health().await.unwrap();
        assert!(status.is_healthy());
    }

    #[test]
    fn test_error_message_from_body() {
        assert_eq!(
            error_message_from_body(r#"{"error":"Missing required fields: ['Age']"}"#),
            Some("Missing required fields: ['Age']".to_string())
        );
        assert_eq!(error_message_from_body(r#"{"error":""}"#), None);
        assert_eq!(error_message_from_body(r#"{"error":42}"#), None);
        assert_eq!(error_message_from_body(r#"{"detail":"x"}"#), None);
        assert_eq!(error_message_from_body("<html>"), None);
    }

    #[test]
    fn test_predict_url() {
        assert_eq!(
            client_for("http://svc:5000/").predict_url(),
            "http://svc:5000/predict"
        );
    }
}
