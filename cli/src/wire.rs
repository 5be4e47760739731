//! Request/response JSON shapes. Field names match the original system's
//! `constants::json` namespace so the wire contract is unchanged.
#![allow(non_snake_case)]

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Request {
    pub bin: BinRequest,
    pub items: Vec<ItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct BinRequest {
    #[serde(rename = "type")]
    pub type_tag: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub maxWeight: f64,
    #[serde(default)]
    pub sortMethod: Option<String>,
    #[serde(default)]
    pub gravityStrength: Option<f64>,
    #[serde(default)]
    pub packingDirection: Option<String>,
    #[serde(default)]
    pub nrOfAvailableBins: Option<u32>,
    #[serde(default)]
    pub itemLimit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    #[serde(default)]
    pub id: Option<String>,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub weight: f64,
    #[serde(default)]
    pub itemConsKey: Option<String>,
    #[serde(default)]
    pub allowedRotations: Option<String>,
    #[serde(default)]
    pub gravityStrength: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requiredNrOfBins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalVolumeUtil: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub totalWeightUtil: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unfittedItems: Vec<ItemResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub packedBins: Vec<BinResponse>,
}

#[derive(Debug, Serialize)]
pub struct BinResponse {
    pub id: u32,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub nrOfItems: usize,
    pub maxWidth: f64,
    pub maxDepth: f64,
    pub maxHeight: f64,
    pub maxWeight: f64,
    pub maxVolume: f64,
    pub actualVolume: f64,
    pub actualVolumeUtil: f64,
    pub actualWeight: f64,
    pub actualWeightUtil: f64,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub fittedItems: Vec<ItemResponse>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub weight: f64,
    pub volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itemConsKey: Option<String>,
    pub allowedRotations: String,
    pub xCoordinate: f64,
    pub yCoordinate: f64,
    pub zCoordinate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotationType: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotationTypeDescription: Option<String>,
}
