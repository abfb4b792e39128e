//! Data types exchanged with the product API.
//!
//! Field names follow the backend's JSON exactly, so every type round-trips
//! through serde without renaming.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};

/// Full product record, as served by `GET /products/{id}`.
///
/// Every column but `id` is nullable in the backend; imported products
/// routinely lack a category, image, description or minifigure count.
/// Nulls (and absent keys) come back out as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Manufacturer key (lowercase slug), e.g. `"cada"`
    #[serde(default)]
    pub manufacturer_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub piece_count: Option<u32>,
    #[serde(default)]
    pub minifigures: Option<u32>,
    #[serde(default)]
    pub release_year: Option<i32>,
    /// Creation timestamp, kept verbatim as served
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Reduced projection of [`Product`] used for search suggestions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAutocomplete {
    pub id: u64,
    pub manufacturer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<String>,
    pub name: String,
}

/// Manufacturer entry from `GET /manufacturers`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerSummary {
    pub id: u64,
    pub name: String,
}

/// Retailer price for a product, from `GET /products/{id}/prices`.
///
/// The backend treats every field as optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Price {
    pub id: Option<u64>,
    pub product_id: Option<u64>,
    pub retailer_id: Option<u64>,
    pub price: Option<f64>,
    pub shipping_cost: Option<f64>,
    pub in_stock: Option<bool>,
    pub url: Option<String>,
    pub last_updated: Option<String>,
    pub price_history: Option<PriceHistory>,
}

/// Timestamped price points, oldest first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    #[serde(default)]
    pub history: Vec<(String, f64)>,
}

// ============================================================================
// ApiResponse
// ============================================================================

/// Outcome of a backend call.
///
/// On the wire this is `{"data": T, "error": false}` or
/// `{"data": null, "error": true}`. The enum makes any other combination
/// unrepresentable, and deserialization rejects inconsistent pairs. A
/// `Success` payload that serializes to `null` (`None`, `()`) would look like
/// a failure on the wire, so serializing one is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T> {
    Success(T),
    Failure,
}

impl<T> ApiResponse<T> {
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Payload of a successful response.
    pub const fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure => None,
        }
    }

}

impl<T, E> From<Result<T, E>> for ApiResponse<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::Success(data),
            Err(_) => Self::Failure,
        }
    }
}

#[derive(Serialize)]
struct WireRef {
    data: serde_json::Value,
    error: bool,
}

#[derive(Deserialize)]
struct WireOwned<T> {
    data: Option<T>,
    error: bool,
}

impl<T: Serialize> Serialize for ApiResponse<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let data = match self {
            Self::Success(data) => {
                let value = serde_json::to_value(data).map_err(ser::Error::custom)?;
                if value.is_null() {
                    return Err(ser::Error::custom("successful response data serializes to null"));
                }
                value
            }
            Self::Failure => serde_json::Value::Null,
        };
        WireRef {
            data,
            error: self.is_error(),
        }
        .serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ApiResponse<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireOwned::<T>::deserialize(deserializer)?;
        match (wire.error, wire.data) {
            (false, Some(data)) => Ok(Self::Success(data)),
            (true, None) => Ok(Self::Failure),
            (false, None) => Err(de::Error::custom("`data` is null but `error` is false")),
            (true, Some(_)) => Err(de::Error::custom("`error` is true but `data` is not null")),
        }
    }
}
