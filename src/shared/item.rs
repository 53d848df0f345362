/**
 * Item Data Structures
 *
 * This module defines the Item and SubItem records served by the API and
 * carried on the update stream, plus the `ItemPayload` request body used
 * for both creation and partial updates.
 *
 * All types serialize with camelCase field names (`subItems`) so the wire
 * format matches existing clients of the `/api/v1/items` resource.
 */
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A named, priced line entry nested under an [`Item`]
///
/// Prices use fixed-point `Decimal` so monetary values never drift through
/// floating point rounding. On the wire a price is written as a JSON string
/// and accepted as either a string or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubItem {
    /// Display name of the line entry
    pub name: String,
    /// Exact price
    pub price: Decimal,
}

impl SubItem {
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A stored item record
///
/// # Fields
/// * `id` - Store-assigned identifier, never supplied by clients
/// * `name` - Optional display name
/// * `count` - Optional quantity
/// * `sub_items` - Ordered sub-records, possibly empty
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: Option<String>,
    pub count: Option<i32>,
    #[serde(default)]
    pub sub_items: Vec<SubItem>,
}

impl Item {
    /// Build a stored record from a request payload and a freshly assigned id
    ///
    /// Any `id` carried by the payload is discarded. A missing sub-item list
    /// becomes an empty one.
    pub fn from_payload(id: String, payload: ItemPayload) -> Self {
        Self {
            id,
            name: payload.name,
            count: payload.count,
            sub_items: payload.sub_items.unwrap_or_default(),
        }
    }

    /// Apply a partial update in place
    ///
    /// Only fields that carry a value overwrite the stored ones:
    /// - `name` must contain at least one non-whitespace character
    /// - `count` overwrites whenever present
    /// - `sub_items` replaces the whole list whenever present, even if empty
    ///
    /// The identifier is never touched.
    pub fn merge(&mut self, payload: ItemPayload) {
        if let Some(name) = payload.name.filter(|n| !n.trim().is_empty()) {
            self.name = Some(name);
        }

        if let Some(count) = payload.count {
            self.count = Some(count);
        }

        if let Some(sub_items) = payload.sub_items {
            self.sub_items = sub_items;
        }
    }
}

/// Request body for `POST` and `PUT` on `/api/v1/items`
///
/// Every field is optional so the same shape serves both full creation and
/// partial updates. `id` is accepted for compatibility but always ignored.
/// Serializing omits absent fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_items: Option<Vec<SubItem>>,
}

impl ItemPayload {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_count(mut self, count: i32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_sub_items(mut self, sub_items: Vec<SubItem>) -> Self {
        self.sub_items = Some(sub_items);
        self
    }
}
