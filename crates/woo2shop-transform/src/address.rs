//! Address normalization: decodes the WooCommerce billing address blob into
//! canonical Shopify fields and normalizes phone numbers.

use serde::Deserialize;

use woo2shop_model::NormalizedAddress;

use crate::error::ValidationError;

/// Shape of the embedded address payload. `address_1`, `city`, and `country`
/// are mandatory; everything else defaults to empty.
#[derive(Debug, Deserialize)]
struct AddressPayload {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    company: String,
    address_1: String,
    #[serde(default)]
    address_2: String,
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    postcode: String,
    country: String,
}

/// Decode an address payload into canonical fields. Pure; the caller decides
/// whether a failure fails the record or downgrades to a warning.
///
/// # Errors
///
/// Returns [`ValidationError`] when the payload is empty, is not a JSON
/// object of the expected shape, or lacks a mandatory field.
pub fn normalize_address(payload: &str, phone: &str) -> Result<NormalizedAddress, ValidationError> {
    let payload = payload.trim();
    if payload.is_empty() {
        return Err(ValidationError::MissingField {
            field: "billing_address",
        });
    }
    let decoded: AddressPayload = serde_json::from_str(payload)
        .map_err(|error| ValidationError::payload("address", error.to_string()))?;

    let name = format!("{} {}", decoded.first_name.trim(), decoded.last_name.trim())
        .trim()
        .to_string();
    Ok(NormalizedAddress {
        name,
        company: decoded.company.trim().to_string(),
        street: decoded.address_1.trim().to_string(),
        address2: decoded.address_2.trim().to_string(),
        city: decoded.city.trim().to_string(),
        province: decoded.state.trim().to_string(),
        postal_code: decoded.postcode.trim().to_string(),
        country: decoded.country.trim().to_string(),
        phone: normalize_phone(phone),
    })
}

/// Normalize a phone number to international format: strip everything but
/// digits and `+`, and assume US/Canada for bare 10-digit numbers.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    let cleaned: String = phone.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();
    if cleaned.is_empty() || cleaned.starts_with('+') {
        return cleaned;
    }
    if cleaned.len() == 10 {
        format!("+1{cleaned}")
    } else {
        cleaned
    }
}
