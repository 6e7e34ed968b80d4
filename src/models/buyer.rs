//! Buyer App (Navo) backend request/response types.

use serde::{Deserialize, Serialize};

// ─── Auth ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerLoginRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

// ─── Feed Filters ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilterResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<FilterData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterData {
    #[serde(rename = "productTags")]
    pub product_tags: Option<Vec<ProductTag>>,
    pub suitable_for: Option<Vec<serde_json::Value>>,
    pub city: Option<Vec<serde_json::Value>>,
    #[serde(rename = "priceFilters")]
    pub price_filters: Option<Vec<PriceFilter>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductTag {
    pub name: Option<String>,
    pub image: Option<String>,
    pub translation: Option<serde_json::Value>,
    pub visible: Option<bool>,
    pub selected: Option<bool>,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceFilter {
    #[serde(rename = "type")]
    pub filter_type: Option<String>,
    pub ranges: Option<Vec<PriceRange>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceRange {
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedFilterSaveRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suitable_for: Option<Vec<String>>,
    #[serde(rename = "testData", skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilterSaveResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<FilterSaveData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterSaveData {
    pub suitable_for: Option<Vec<serde_json::Value>>,
    #[serde(rename = "productTags")]
    pub product_tags: Option<Vec<serde_json::Value>>,
    pub city: Option<Vec<serde_json::Value>>,
    pub price_min: Option<i64>,
    pub price_max: Option<i64>,
    #[serde(rename = "lastSelectedFilter")]
    pub last_selected_filter: Option<String>,
}

// ─── Home Feed ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeCatalogFeedResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<HomeCatalogFeedData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeCatalogFeedData {
    pub result: Option<Vec<CatalogFeedItem>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogFeedItem {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<i64>,
    pub url: Option<String>,
}

// ─── Search ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status_code: Option<String>,
    pub message: Option<String>,
    pub data: Option<SearchData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchData {
    pub items: Option<Vec<SearchUserItem>>,
    pub total_count: Option<i64>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub buckets: Option<Vec<SearchBucket>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchUserItem {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub tags: Option<Vec<String>>,
    pub business_info: Option<BusinessInfo>,
    pub seller: Option<SearchSeller>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessInfo {
    pub business_name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchSeller {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "businessName")]
    pub business_name: Option<String>,
    pub name: Option<String>,
    pub deprioritisation_status: Option<bool>,
    #[serde(rename = "isCatalogAvailable")]
    pub is_catalog_available: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchBucket {
    #[serde(rename = "_id")]
    pub raw_id: Option<String>,
    pub name: Option<String>,
    pub count: Option<i64>,
}
