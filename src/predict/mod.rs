//! Remote prediction client.
//!
//! Wraps the service's `outputs` endpoint for two independent tasks:
//! concept tagging against a selectable model and face detection
//! against a fixed public model. Each call is a single request/response
//! round trip — no retry, no caching, no rate limiting. Failures are
//! returned to the caller immediately.

pub mod models;
pub mod wire;

pub use models::ModelKind;

use std::time::Duration;

use crate::error::PredictError;
use crate::geometry::NormalizedCrop;

/// An ordered concept as returned by the service.
#[derive(Clone, Debug, PartialEq)]
pub struct Concept {
    pub name: String,
    /// Confidence in 0..1.
    pub value: f64,
}

/// Seam between the pipeline and the remote service.
///
/// `PredictionClient` is the real implementation; tests drive the
/// pipeline with a scripted fake. Both prediction calls may be issued
/// concurrently against the same encoded frame, hence `Sync`.
pub trait Predictor: Sync {
    /// Predict concepts on an encoded image using a named model.
    /// Unknown names fail before any network call is made.
    fn predict_concepts(
        &self,
        image_jpeg: &[u8],
        model_name: &str,
    ) -> Result<Vec<Concept>, PredictError>;

    /// Detect faces on an encoded image, returning one normalized crop
    /// per face in service order.
    fn predict_faces(&self, image_jpeg: &[u8]) -> Result<Vec<NormalizedCrop>, PredictError>;
}

const DEFAULT_BASE_URL: &str = "https://api.clarifai.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the prediction service.
pub struct PredictionClient {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
}

impl PredictionClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the client at a different service host (self-hosted
    /// gateway, test server).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn post_outputs(
        &self,
        model_id: &str,
        image_jpeg: &[u8],
    ) -> Result<wire::OutputsResponse, PredictError> {
        let url = format!("{}/v2/models/{}/outputs", self.base_url, model_id);
        let request = wire::OutputsRequest::from_image(image_jpeg);

        let response = match self
            .agent
            .post(&url)
            .set("Authorization", &format!("Key {}", self.api_key))
            .send_json(&request)
        {
            Ok(response) => response,
            // The service reports failures with a non-2xx code and the
            // usual status body; recover the description when present.
            Err(ureq::Error::Status(code, response)) => return Err(status_error(code, response)),
            Err(err) => return Err(err.into()),
        };

        let parsed: wire::OutputsResponse = response.into_json()?;
        wire::check_status(parsed)
    }
}

fn status_error(code: u16, response: ureq::Response) -> PredictError {
    match response.into_json::<wire::OutputsResponse>() {
        Ok(body) if !body.status.description.is_empty() => PredictError::Service {
            description: body.status.description,
        },
        _ => PredictError::Transport(format!("service returned HTTP {code}")),
    }
}

impl Predictor for PredictionClient {
    fn predict_concepts(
        &self,
        image_jpeg: &[u8],
        model_name: &str,
    ) -> Result<Vec<Concept>, PredictError> {
        let model = ModelKind::from_name(model_name)
            .ok_or_else(|| PredictError::UnknownModel(model_name.to_string()))?;
        let response = self.post_outputs(model.id(), image_jpeg)?;
        Ok(wire::concepts(&response))
    }

    fn predict_faces(&self, image_jpeg: &[u8]) -> Result<Vec<NormalizedCrop>, PredictError> {
        let response = self.post_outputs(models::FACE_DETECTION_MODEL_ID, image_jpeg)?;
        Ok(wire::face_crops(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_model_fails_before_any_network_call() {
        // The base URL is unroutable; reaching the network would fail
        // with a transport error instead.
        let client = PredictionClient::with_base_url("key", "http://192.0.2.1:1");
        match client.predict_concepts(b"jpeg", "TreeModel") {
            Err(PredictError::UnknownModel(name)) => assert_eq!(name, "TreeModel"),
            other => panic!("expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = PredictionClient::with_base_url("key", "https://api.example.com/");
        assert_eq!(client.base_url, "https://api.example.com");
    }
}
