//! Category extraction: turns a fetched feed body into a [`PriceMap`].

use serde_json::Value;

use crate::category::Category;
use crate::error::ExtractError;
use crate::price::{is_truthy, PriceMap, PriceValue};

/// Outcome of extracting one category for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// The feed could not be fetched or returned an empty body.
    Unavailable,
    /// The feed was fetched but holds nothing usable for the category.
    CategoryEmpty,
    /// At least one priced entry, in upstream order.
    Prices(PriceMap),
}

impl Extraction {
    pub fn prices(&self) -> Option<&PriceMap> {
        match self {
            Self::Prices(map) => Some(map),
            Self::Unavailable | Self::CategoryEmpty => None,
        }
    }

    pub fn into_prices(self) -> Option<PriceMap> {
        match self {
            Self::Prices(map) => Some(map),
            Self::Unavailable | Self::CategoryEmpty => None,
        }
    }
}

/// Reads one category section out of a fetched body.
///
/// Records are kept when `name` is a non-empty string and `price` is present
/// and not `null`; a zero or empty-string price is kept. A later record with
/// the same name replaces the earlier price.
///
/// # Errors
///
/// - [`ExtractError::MalformedResponse`] when the body is not an object, the
///   section is not a list, or a record is not an object.
/// - [`ExtractError::CategoryMissing`] when the section is absent or falsy.
pub fn extract_prices(body: &Value, category: Category) -> Result<PriceMap, ExtractError> {
    let fields = body.as_object().ok_or_else(|| {
        ExtractError::MalformedResponse(format!("top-level body is {}", kind_of(body)))
    })?;

    let section = match fields.get(category.key()) {
        Some(section) if is_truthy(section) => section,
        _ => return Err(ExtractError::CategoryMissing(category)),
    };

    let records = section.as_array().ok_or_else(|| {
        ExtractError::MalformedResponse(format!(
            "'{}' section is {}, expected a list",
            category.key(),
            kind_of(section)
        ))
    })?;

    let mut prices = PriceMap::new();
    for (position, record) in records.iter().enumerate() {
        let record = record.as_object().ok_or_else(|| {
            ExtractError::MalformedResponse(format!(
                "'{}' record {position} is {}, expected an object",
                category.key(),
                kind_of(record)
            ))
        })?;

        let name = match record.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        if let Some(price) = record.get("price").cloned().and_then(PriceValue::from_json) {
            prices.insert(name, price);
        }
    }
    Ok(prices)
}

/// Maps a fetched body to the tri-state outcome, returning the extraction
/// error alongside an empty result so the caller can report it.
pub fn classify(body: &Value, category: Category) -> (Extraction, Option<ExtractError>) {
    if !is_truthy(body) {
        return (Extraction::Unavailable, None);
    }
    match extract_prices(body, category) {
        Ok(prices) if prices.is_empty() => (Extraction::CategoryEmpty, None),
        Ok(prices) => (Extraction::Prices(prices), None),
        Err(error) => (Extraction::CategoryEmpty, Some(error)),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
