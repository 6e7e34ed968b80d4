//! BOMB backend request/response types.
//!
//! Field names follow the wire format exactly; the backend mixes
//! camelCase, snake_case, and `_id` keys, so renames are per-field.

use serde::{Deserialize, Serialize};

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<LoginData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub phone_number: Option<String>,
    pub name: Option<String>,
    pub business_name: Option<String>,
    pub is_deleted: Option<bool>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<CatalogData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogData {
    pub total: Option<Total>,
    pub items: Option<Vec<CatalogItem>>,
    pub buckets: Option<Vec<Bucket>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Total {
    pub value: Option<i64>,
    pub relation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    #[serde(rename = "sellerId")]
    pub seller_id: Option<String>,
    pub visible: Option<bool>,
    pub available: Option<bool>,
    pub seller: Option<Seller>,
    pub product: Option<Vec<Product>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Seller {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub deprioritisation_status: Option<bool>,
    #[serde(rename = "isCatalogAvailable")]
    pub is_catalog_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub name: Option<String>,
    pub doc_count: Option<i64>,
}

// ─── Catalog Editing ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEditRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<CatalogImage>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_qc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_set: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogImage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_height: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_height: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogTaggingRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_qc: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_set: Option<bool>,
}

// ─── Video & AI Titles ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoTitleRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotCatalogTitleGenerateRequest {
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideosResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<WatchedVideosData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WatchedVideosData {
    pub result: Option<Vec<WatchedVideoItem>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideoItem {
    pub video_id: Option<String>,
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub phone_number: Option<String>,
    pub product: Option<Vec<serde_json::Value>>,
    pub collection: Option<serde_json::Value>,
    pub market: Option<serde_json::Value>,
    pub price_text: Option<i64>,
    pub drive_link: Option<String>,
    pub is_deleted: Option<bool>,
    pub seller: Option<VideoSeller>,
    // Misspelled on the wire; kept as-is.
    #[serde(rename = "thubmbnailDriveLink")]
    pub thumbnail_drive_link: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoSeller {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub name: Option<String>,
}
