//! Wire format for the prediction service's `outputs` endpoint.
//!
//! Request: `POST /v2/models/{model_id}/outputs` with the image bytes
//! base64-encoded in the body. Response: a top-level status plus one
//! output per input, carrying either a concept list or face-detection
//! regions. Success is `status.code == 10000`; anything else is a
//! service error with a service-supplied description.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::PredictError;
use crate::geometry::NormalizedCrop;
use crate::predict::Concept;

/// Status code the service uses for success.
pub const STATUS_SUCCESS: i64 = 10_000;

#[derive(Debug, Serialize)]
pub struct OutputsRequest {
    pub inputs: Vec<Input>,
}

#[derive(Debug, Serialize)]
pub struct Input {
    pub data: InputData,
}

#[derive(Debug, Serialize)]
pub struct InputData {
    pub image: ImagePayload,
}

#[derive(Debug, Serialize)]
pub struct ImagePayload {
    pub base64: String,
}

impl OutputsRequest {
    /// Build a single-input request from encoded image bytes.
    pub fn from_image(image_bytes: &[u8]) -> Self {
        OutputsRequest {
            inputs: vec![Input {
                data: InputData {
                    image: ImagePayload {
                        base64: BASE64.encode(image_bytes),
                    },
                },
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OutputsResponse {
    pub status: Status,
    #[serde(default)]
    pub outputs: Vec<Output>,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    pub code: i64,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Output {
    #[serde(default)]
    pub data: OutputData,
}

#[derive(Debug, Default, Deserialize)]
pub struct OutputData {
    #[serde(default)]
    pub concepts: Vec<ConceptEntry>,
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Deserialize)]
pub struct ConceptEntry {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Deserialize)]
pub struct Region {
    pub region_info: RegionInfo,
}

#[derive(Debug, Deserialize)]
pub struct RegionInfo {
    pub bounding_box: BoundingBox,
}

#[derive(Debug, Deserialize)]
pub struct BoundingBox {
    pub top_row: f64,
    pub left_col: f64,
    pub bottom_row: f64,
    pub right_col: f64,
}

/// Reject responses whose top-level status is not a success.
pub fn check_status(response: OutputsResponse) -> Result<OutputsResponse, PredictError> {
    if response.status.code != STATUS_SUCCESS {
        return Err(PredictError::Service {
            description: response.status.description,
        });
    }
    Ok(response)
}

/// Concepts of the first output, in service order. Never re-sorted or
/// filtered.
pub fn concepts(response: &OutputsResponse) -> Vec<Concept> {
    response
        .outputs
        .first()
        .map(|output| {
            output
                .data
                .concepts
                .iter()
                .map(|entry| Concept {
                    name: entry.name.clone(),
                    value: entry.value,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// One normalized crop per detected face, in service order.
pub fn face_crops(response: &OutputsResponse) -> Vec<NormalizedCrop> {
    response
        .outputs
        .first()
        .map(|output| {
            output
                .data
                .regions
                .iter()
                .map(|region| {
                    let bbox = &region.region_info.bounding_box;
                    NormalizedCrop {
                        top: bbox.top_row,
                        left: bbox.left_col,
                        bottom: bbox.bottom_row,
                        right: bbox.right_col,
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONCEPTS_OK: &str = r#"{
        "status": {"code": 10000, "description": "Ok"},
        "outputs": [{
            "id": "c3a9f2",
            "status": {"code": 10000, "description": "Ok"},
            "data": {
                "concepts": [
                    {"id": "ai_l8TKp2h5", "name": "people", "value": 0.9865},
                    {"id": "ai_VPmHr5bm", "name": "adult", "value": 0.9612},
                    {"id": "ai_SzsXMok1", "name": "indoors", "value": 0.9371}
                ]
            }
        }]
    }"#;

    const FACES_OK: &str = r#"{
        "status": {"code": 10000, "description": "Ok"},
        "outputs": [{
            "data": {
                "regions": [
                    {"region_info": {"bounding_box":
                        {"top_row": 0.1, "left_col": 0.2, "bottom_row": 0.5, "right_col": 0.6}}},
                    {"region_info": {"bounding_box":
                        {"top_row": 0.3, "left_col": 0.55, "bottom_row": 0.7, "right_col": 0.9}}}
                ]
            }
        }]
    }"#;

    const KEY_REJECTED: &str = r#"{
        "status": {"code": 11102, "description": "Invalid API key or Invalid API key/application pair"},
        "outputs": []
    }"#;

    #[test]
    fn concepts_keep_service_order() {
        let response: OutputsResponse = serde_json::from_str(CONCEPTS_OK).unwrap();
        let response = check_status(response).unwrap();
        let concepts = concepts(&response);
        assert_eq!(concepts.len(), 3);
        assert_eq!(concepts[0].name, "people");
        assert_eq!(concepts[1].name, "adult");
        assert_eq!(concepts[2].name, "indoors");
        assert!((concepts[0].value - 0.9865).abs() < 1e-9);
    }

    #[test]
    fn regions_parse_into_crops() {
        let response: OutputsResponse = serde_json::from_str(FACES_OK).unwrap();
        let crops = face_crops(&check_status(response).unwrap());
        assert_eq!(crops.len(), 2);
        assert_eq!(
            crops[0],
            NormalizedCrop {
                top: 0.1,
                left: 0.2,
                bottom: 0.5,
                right: 0.6
            }
        );
        assert_eq!(
            crops[1],
            NormalizedCrop {
                top: 0.3,
                left: 0.55,
                bottom: 0.7,
                right: 0.9
            }
        );
    }

    #[test]
    fn failure_status_carries_exact_description() {
        let response: OutputsResponse = serde_json::from_str(KEY_REJECTED).unwrap();
        match check_status(response) {
            Err(PredictError::Service { description }) => {
                assert_eq!(
                    description,
                    "Invalid API key or Invalid API key/application pair"
                );
            }
            other => panic!("expected service error, got {:?}", other),
        }
    }

    #[test]
    fn empty_outputs_yield_empty_results() {
        let response: OutputsResponse =
            serde_json::from_str(r#"{"status": {"code": 10000, "description": "Ok"}}"#).unwrap();
        let response = check_status(response).unwrap();
        assert!(concepts(&response).is_empty());
        assert!(face_crops(&response).is_empty());
    }

    #[test]
    fn request_body_carries_base64_image() {
        let request = OutputsRequest::from_image(b"abc");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"][0]["data"]["image"]["base64"], "YWJj");
    }
}
