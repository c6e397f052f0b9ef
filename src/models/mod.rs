use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod coerce;

/// Source of a listing record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Source {
    Airtable,
}

/// Search criteria assembled from a property-search form submission.
///
/// Every field is defaulted: an empty object deserializes to the
/// unconstrained search. Numeric fields treat `0` as "no bound". Values are
/// coerced leniently (see [`coerce`]) so a malformed field degrades to its
/// default instead of rejecting the whole submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Selected city names, in selection order
    #[serde(default, deserialize_with = "coerce::string_list")]
    pub cities: Vec<String>,
    /// Selected property categories
    #[serde(default, deserialize_with = "coerce::string_list")]
    pub categories: Vec<String>,
    /// Selected house types (extended form only)
    #[serde(default, deserialize_with = "coerce::string_list")]
    pub house_types: Vec<String>,
    #[serde(default, deserialize_with = "coerce::count")]
    pub min_bedrooms: u32,
    #[serde(default, deserialize_with = "coerce::count")]
    pub min_bathrooms: u32,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub min_price: u64,
    #[serde(default, deserialize_with = "coerce::amount")]
    pub max_price: u64,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub has_indoor_parking: bool,
    /// Only shown by the form once parking is checked, but evaluated on its own
    #[serde(default, deserialize_with = "coerce::count")]
    pub min_indoor_cars: u32,
    #[serde(default, deserialize_with = "coerce::flag")]
    pub has_swimming_pool: bool,
}

impl SearchCriteria {
    /// True when no field constrains the search
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }
}

/// A record returned by the listing store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub source: Source,
    pub fields: serde_json::Map<String, serde_json::Value>,
    pub created_time: Option<DateTime<Utc>>,
}
