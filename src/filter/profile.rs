//! Field-name and predicate-style bindings for each form variant.
//!
//! The English and French search forms were built against differently named
//! tables. The emission algorithm is shared; only the bindings below differ.

use serde::{Deserialize, Serialize};

use crate::catalog::Language;

/// Field names of the English listings table
pub mod en {
    pub const CITY: &str = "City";
    pub const CATEGORY: &str = "Category";
    pub const HOUSE_TYPE: &str = "HouseType";
    pub const BEDROOMS: &str = "Bedrooms";
    pub const BATHROOMS: &str = "Bathrooms";
    pub const PRICE: &str = "Price";
    pub const INDOOR_PARKING: &str = "IndoorParking";
    pub const INDOOR_CARS: &str = "CarIndoor";
    pub const SWIMMING_POOL: &str = "SwimmingPool";
    pub const AFFIRMATIVE: &str = "Yes";
}

/// Field names of the French listings table
pub mod fr {
    pub const CITY: &str = "Ville";
    pub const CATEGORY: &str = "type";
    pub const HOUSE_TYPE: &str = "TypeMaison";
    pub const BEDROOMS: &str = "Chambres";
    pub const BATHROOMS: &str = "SallesDeBain";
    pub const PRICE: &str = "Prix";
    pub const INDOOR_PARKING: &str = "StationnementInterieur";
    pub const INDOOR_CARS: &str = "Car";
    pub const SWIMMING_POOL: &str = "Piscine";
    pub const AFFIRMATIVE: &str = "Oui";
}

/// How a membership value is matched against its field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateStyle {
    /// `{Field}='value'`
    Equality,
    /// `FIND('value', {Field})`
    Contains,
}

/// Downstream field bound to each criterion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldNames {
    pub city: String,
    pub category: String,
    pub house_type: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub price: String,
    pub indoor_parking: String,
    pub indoor_cars: String,
    pub swimming_pool: String,
}

impl FieldNames {
    pub fn english() -> Self {
        Self {
            city: en::CITY.to_string(),
            category: en::CATEGORY.to_string(),
            house_type: en::HOUSE_TYPE.to_string(),
            bedrooms: en::BEDROOMS.to_string(),
            bathrooms: en::BATHROOMS.to_string(),
            price: en::PRICE.to_string(),
            indoor_parking: en::INDOOR_PARKING.to_string(),
            indoor_cars: en::INDOOR_CARS.to_string(),
            swimming_pool: en::SWIMMING_POOL.to_string(),
        }
    }

    pub fn french() -> Self {
        Self {
            city: fr::CITY.to_string(),
            category: fr::CATEGORY.to_string(),
            house_type: fr::HOUSE_TYPE.to_string(),
            bedrooms: fr::BEDROOMS.to_string(),
            bathrooms: fr::BATHROOMS.to_string(),
            price: fr::PRICE.to_string(),
            indoor_parking: fr::INDOOR_PARKING.to_string(),
            indoor_cars: fr::INDOOR_CARS.to_string(),
            swimming_pool: fr::SWIMMING_POOL.to_string(),
        }
    }
}

/// Partial replacement of a profile's field names, read from configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOverrides {
    pub city: Option<String>,
    pub category: Option<String>,
    pub house_type: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub price: Option<String>,
    pub indoor_parking: Option<String>,
    pub indoor_cars: Option<String>,
    pub swimming_pool: Option<String>,
    pub affirmative: Option<String>,
}

impl FieldOverrides {
    /// Names that are set but blank
    pub fn blank_entries(&self) -> Vec<&'static str> {
        [
            ("city", &self.city),
            ("category", &self.category),
            ("house_type", &self.house_type),
            ("bedrooms", &self.bedrooms),
            ("bathrooms", &self.bathrooms),
            ("price", &self.price),
            ("indoor_parking", &self.indoor_parking),
            ("indoor_cars", &self.indoor_cars),
            ("swimming_pool", &self.swimming_pool),
            ("affirmative", &self.affirmative),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }
}

/// Known profile names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProfileName {
    #[default]
    #[serde(alias = "english")]
    #[value(alias = "english")]
    En,
    #[serde(alias = "french")]
    #[value(alias = "french")]
    Fr,
}

/// Complete binding used by the filter builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: ProfileName,
    pub fields: FieldNames,
    pub style: PredicateStyle,
    /// Literal stored in yes/no fields
    pub affirmative: String,
    pub language: Language,
}

impl Profile {
    pub fn english() -> Self {
        Self {
            name: ProfileName::En,
            fields: FieldNames::english(),
            style: PredicateStyle::Equality,
            affirmative: en::AFFIRMATIVE.to_string(),
            language: Language::English,
        }
    }

    pub fn french() -> Self {
        Self {
            name: ProfileName::Fr,
            fields: FieldNames::french(),
            style: PredicateStyle::Contains,
            affirmative: fr::AFFIRMATIVE.to_string(),
            language: Language::French,
        }
    }

    pub fn named(name: ProfileName) -> Self {
        match name {
            ProfileName::En => Self::english(),
            ProfileName::Fr => Self::french(),
        }
    }

    /// Replace the field names present in `overrides`
    pub fn with_overrides(mut self, overrides: &FieldOverrides) -> Self {
        let slots = [
            (&mut self.fields.city, &overrides.city),
            (&mut self.fields.category, &overrides.category),
            (&mut self.fields.house_type, &overrides.house_type),
            (&mut self.fields.bedrooms, &overrides.bedrooms),
            (&mut self.fields.bathrooms, &overrides.bathrooms),
            (&mut self.fields.price, &overrides.price),
            (&mut self.fields.indoor_parking, &overrides.indoor_parking),
            (&mut self.fields.indoor_cars, &overrides.indoor_cars),
            (&mut self.fields.swimming_pool, &overrides.swimming_pool),
            (&mut self.affirmative, &overrides.affirmative),
        ];
        for (slot, value) in slots {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }
        self
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::english()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_differ_only_in_bindings() {
        let en = Profile::english();
        let fr = Profile::french();
        assert_eq!(en.fields.category, "Category");
        assert_eq!(fr.fields.category, "type");
        assert_eq!(en.fields.indoor_cars, "CarIndoor");
        assert_eq!(fr.fields.indoor_cars, "Car");
        assert_eq!(en.style, PredicateStyle::Equality);
        assert_eq!(fr.style, PredicateStyle::Contains);
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let overrides = FieldOverrides {
            price: Some("Asking Price".to_string()),
            affirmative: Some("true".to_string()),
            ..Default::default()
        };
        let profile = Profile::english().with_overrides(&overrides);
        assert_eq!(profile.fields.price, "Asking Price");
        assert_eq!(profile.affirmative, "true");
        assert_eq!(profile.fields.city, en::CITY);
    }

    #[test]
    fn blank_overrides_are_reported() {
        let overrides = FieldOverrides {
            city: Some("  ".to_string()),
            price: Some("Price".to_string()),
            ..Default::default()
        };
        assert_eq!(overrides.blank_entries(), vec!["city"]);
    }

    #[test]
    fn profile_names_accept_aliases() {
        let name: ProfileName = serde_json::from_str("\"french\"").unwrap();
        assert_eq!(name, ProfileName::Fr);
        assert_eq!(Profile::named(name), Profile::french());
    }
}
