//! Data Transfer Objects (DTOs) for requests and responses.

use std::collections::BTreeMap;

use currency_meta::CurrencyMeta;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::normalize_code;

// ─────────────────────────────────────────────────────────────────────────────
// Listing DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A supported currency with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyListingItem {
    #[schema(example = "United States")]
    pub country_name: Option<String>,
    #[schema(example = "US")]
    pub country_code: Option<String>,
    #[schema(example = "$")]
    pub symbol: Option<String>,
    #[schema(example = "🇺🇸")]
    pub flag: Option<String>,
    /// ISO currency code
    #[schema(example = "USD")]
    pub currency: String,
}

impl From<CurrencyMeta> for CurrencyListingItem {
    fn from(meta: CurrencyMeta) -> Self {
        Self {
            country_name: meta.country_name,
            country_code: meta.country_code,
            symbol: meta.symbol,
            flag: meta.flag,
            currency: meta.code,
        }
    }
}

/// Response of `GET /api/currencies`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CurrencyListing {
    #[schema(example = 1717200001)]
    pub time_last_update_unix: Option<i64>,
    #[schema(example = 1717286401)]
    pub time_next_update_unix: Option<i64>,
    pub data: Vec<CurrencyListingItem>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A currency with its rate relative to the requested base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionItem {
    pub country_name: Option<String>,
    pub country_code: Option<String>,
    pub symbol: Option<String>,
    pub flag: Option<String>,
    #[schema(example = "EUR")]
    pub currency: String,
    /// Units of `currency` per one unit of the base, rounded to 3 places
    #[schema(example = 0.921)]
    pub value: f64,
}

impl ConversionItem {
    pub fn new(meta: CurrencyMeta, value: f64) -> Self {
        Self {
            country_name: meta.country_name,
            country_code: meta.country_code,
            symbol: meta.symbol,
            flag: meta.flag,
            currency: meta.code,
            value,
        }
    }
}

/// Base-relative rate table produced by the view layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub base: String,
    pub time_last_update_unix: Option<i64>,
    pub time_next_update_unix: Option<i64>,
    pub data: Vec<ConversionItem>,
}

/// Query parameters of `GET /api/currency/{base}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Comma-separated allow-list of currency codes (case-insensitive)
    #[param(example = "eur,jpy")]
    pub currencies: Option<String>,
    /// `true` or `1` returns full items instead of a `{CODE: value}` map
    #[serde(rename = "additionalFields")]
    #[param(example = "true")]
    pub additional_fields: Option<String>,
}

impl ConvertQuery {
    /// Normalized allow-list, or `None` when absent or empty.
    pub fn wanted_codes(&self) -> Option<Vec<String>> {
        let codes: Vec<String> = self
            .currencies
            .as_deref()?
            .split(',')
            .map(normalize_code)
            .filter(|code| !code.is_empty())
            .collect();

        if codes.is_empty() { None } else { Some(codes) }
    }

    pub fn include_fields(&self) -> bool {
        matches!(self.additional_fields.as_deref(), Some("true") | Some("1"))
    }
}

/// `data` of a conversion response: full items or a plain code-to-value map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ConversionData {
    Detailed(Vec<ConversionItem>),
    Simple(BTreeMap<String, f64>),
}

/// Response of `GET /api/currency/{base}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResponse {
    #[schema(example = "USD")]
    pub base: String,
    pub time_last_update_unix: Option<i64>,
    pub time_next_update_unix: Option<i64>,
    pub data: ConversionData,
}

impl ConversionResponse {
    pub fn from_table(table: RateTable, include_fields: bool) -> Self {
        let data = if include_fields {
            ConversionData::Detailed(table.data)
        } else {
            ConversionData::Simple(
                table
                    .data
                    .into_iter()
                    .map(|item| (item.currency, item.value))
                    .collect(),
            )
        };

        Self {
            base: table.base,
            time_last_update_unix: table.time_last_update_unix,
            time_next_update_unix: table.time_next_update_unix,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable {
            base: "USD".into(),
            time_last_update_unix: Some(1),
            time_next_update_unix: None,
            data: vec![
                ConversionItem::new(CurrencyMeta::empty("EUR"), 0.9),
                ConversionItem::new(CurrencyMeta::empty("JPY"), 150.0),
            ],
        }
    }

    #[test]
    fn test_wanted_codes_normalized() {
        let query = ConvertQuery {
            currencies: Some(" eur, Jpy ,,".into()),
            additional_fields: None,
        };
        assert_eq!(
            query.wanted_codes(),
            Some(vec!["EUR".to_string(), "JPY".to_string()])
        );
    }

    #[test]
    fn test_wanted_codes_empty_is_none() {
        let query = ConvertQuery {
            currencies: Some(" , ".into()),
            additional_fields: None,
        };
        assert_eq!(query.wanted_codes(), None);
        assert_eq!(ConvertQuery::default().wanted_codes(), None);
    }

    #[test]
    fn test_include_fields_flag() {
        let flag = |v: &str| ConvertQuery {
            currencies: None,
            additional_fields: Some(v.into()),
        };
        assert!(flag("true").include_fields());
        assert!(flag("1").include_fields());
        assert!(!flag("yes").include_fields());
        assert!(!flag("TRUE").include_fields());
        assert!(!ConvertQuery::default().include_fields());
    }

    #[test]
    fn test_simple_response_shape() {
        let response = ConversionResponse::from_table(table(), false);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["base"], "USD");
        assert_eq!(json["time_last_update_unix"], 1);
        assert!(json["time_next_update_unix"].is_null());
        assert_eq!(json["data"]["EUR"], 0.9);
        assert_eq!(json["data"]["JPY"], 150.0);
    }

    #[test]
    fn test_detailed_response_shape() {
        let response = ConversionResponse::from_table(table(), true);
        let json = serde_json::to_value(&response).unwrap();

        let first = &json["data"][0];
        assert_eq!(first["currency"], "EUR");
        assert_eq!(first["value"], 0.9);
        assert!(first["countryName"].is_null());
        assert!(first["flag"].is_null());
    }

    #[test]
    fn test_untagged_data_deserializes_both_shapes() {
        let simple: ConversionData = serde_json::from_str(r#"{"EUR":0.9}"#).unwrap();
        assert!(matches!(simple, ConversionData::Simple(map) if map["EUR"] == 0.9));

        let detailed: ConversionData = serde_json::from_str(
            r#"[{"countryName":null,"countryCode":null,"symbol":null,"flag":null,"currency":"EUR","value":0.9}]"#,
        )
        .unwrap();
        assert!(matches!(detailed, ConversionData::Detailed(items) if items.len() == 1));
    }
}
