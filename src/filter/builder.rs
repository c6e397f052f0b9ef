use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::formula;
use super::profile::{PredicateStyle, Profile};
use crate::models::SearchCriteria;

/// What an unconstrained search renders to.
///
/// `AND()` is what the search form has always sent and is passed through
/// untouched. Stores that reject an empty combinator can ask for `TRUE()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EmptyFilter {
    /// `AND()`
    #[default]
    Verbatim,
    /// `TRUE()`
    MatchAll,
}

/// Formula string ready for the record-query API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterExpression(String);

impl FilterExpression {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Turns search criteria into an AND of field conditions
#[derive(Debug, Clone, Default)]
pub struct FilterExpressionBuilder {
    profile: Profile,
    empty: EmptyFilter,
}

impl FilterExpressionBuilder {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            empty: EmptyFilter::default(),
        }
    }

    pub fn with_empty_filter(mut self, empty: EmptyFilter) -> Self {
        self.empty = empty;
        self
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn build(&self, criteria: &SearchCriteria) -> FilterExpression {
        let conditions = self.conditions(criteria);
        debug!(
            profile = ?self.profile.name,
            conditions = conditions.len(),
            "built search filter"
        );

        if conditions.is_empty() && self.empty == EmptyFilter::MatchAll {
            return FilterExpression(formula::match_all());
        }
        FilterExpression(formula::and(&conditions))
    }

    /// The individual AND terms, in emission order
    pub fn conditions(&self, criteria: &SearchCriteria) -> Vec<String> {
        let fields = &self.profile.fields;
        let mut conditions = Vec::new();

        if let Some(c) = self.membership(&fields.city, &criteria.cities) {
            conditions.push(c);
        }
        if let Some(c) = self.membership(&fields.category, &criteria.categories) {
            conditions.push(c);
        }
        if let Some(c) = self.membership(&fields.house_type, &criteria.house_types) {
            conditions.push(c);
        }
        if criteria.min_bedrooms > 0 {
            conditions.push(formula::at_least(&fields.bedrooms, criteria.min_bedrooms.into()));
        }
        if criteria.min_bathrooms > 0 {
            conditions.push(formula::at_least(&fields.bathrooms, criteria.min_bathrooms.into()));
        }
        if criteria.min_price > 0 {
            conditions.push(formula::at_least(&fields.price, criteria.min_price));
        }
        if criteria.max_price > 0 {
            conditions.push(formula::at_most(&fields.price, criteria.max_price));
        }
        if criteria.has_indoor_parking {
            conditions.push(formula::equals(&fields.indoor_parking, &self.profile.affirmative));
        }
        // Not gated on has_indoor_parking
        if criteria.min_indoor_cars > 0 {
            conditions.push(formula::at_least(&fields.indoor_cars, criteria.min_indoor_cars.into()));
        }
        if criteria.has_swimming_pool {
            conditions.push(formula::equals(&fields.swimming_pool, &self.profile.affirmative));
        }

        conditions
    }

    fn membership(&self, field: &str, values: &[String]) -> Option<String> {
        let predicates: Vec<String> = values
            .iter()
            .map(|value| match self.profile.style {
                PredicateStyle::Equality => formula::equals(field, value),
                PredicateStyle::Contains => formula::contains(field, value),
            })
            .collect();

        match predicates.len() {
            0 => None,
            1 => predicates.into_iter().next(),
            _ => Some(formula::or(&predicates)),
        }
    }
}

/// Build a filter with the English profile and the verbatim empty form
pub fn build_filter(criteria: &SearchCriteria) -> FilterExpression {
    FilterExpressionBuilder::default().build(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> SearchCriteria {
        SearchCriteria::default()
    }

    #[test]
    fn empty_criteria_render_empty_and() {
        assert_eq!(build_filter(&criteria()).as_str(), "AND()");
    }

    #[test]
    fn empty_criteria_can_match_all() {
        let builder = FilterExpressionBuilder::default().with_empty_filter(EmptyFilter::MatchAll);
        assert_eq!(builder.build(&criteria()).as_str(), "TRUE()");

        let constrained = SearchCriteria {
            min_bedrooms: 1,
            ..criteria()
        };
        assert_eq!(builder.build(&constrained).as_str(), "AND({Bedrooms}>=1)");
    }

    #[test]
    fn single_city_is_not_wrapped() {
        let c = SearchCriteria {
            cities: vec!["Laval".to_string()],
            ..criteria()
        };
        assert_eq!(build_filter(&c).as_str(), "AND({City}='Laval')");
    }

    #[test]
    fn two_cities_are_wrapped_in_or() {
        let c = SearchCriteria {
            cities: vec!["Laval".to_string(), "Montreal".to_string()],
            ..criteria()
        };
        assert_eq!(
            build_filter(&c).as_str(),
            "AND(OR({City}='Laval', {City}='Montreal'))"
        );
    }

    #[test]
    fn conditions_follow_fixed_order() {
        let c = SearchCriteria {
            cities: vec!["Laval".to_string()],
            categories: vec!["Condo".to_string(), "House".to_string()],
            house_types: vec!["Bungalow".to_string()],
            min_bedrooms: 3,
            min_bathrooms: 2,
            min_price: 200_000,
            max_price: 500_000,
            has_indoor_parking: true,
            min_indoor_cars: 2,
            has_swimming_pool: true,
        };
        let conditions = FilterExpressionBuilder::default().conditions(&c);
        assert_eq!(
            conditions,
            vec![
                "{City}='Laval'",
                "OR({Category}='Condo', {Category}='House')",
                "{HouseType}='Bungalow'",
                "{Bedrooms}>=3",
                "{Bathrooms}>=2",
                "{Price}>=200000",
                "{Price}<=500000",
                "{IndoorParking}='Yes'",
                "{CarIndoor}>=2",
                "{SwimmingPool}='Yes'",
            ]
        );
    }

    #[test]
    fn car_count_does_not_require_parking() {
        let c = SearchCriteria {
            min_indoor_cars: 1,
            ..criteria()
        };
        assert_eq!(build_filter(&c).as_str(), "AND({CarIndoor}>=1)");
    }

    #[test]
    fn french_profile_uses_containment() {
        let builder = FilterExpressionBuilder::new(Profile::french());
        let c = SearchCriteria {
            cities: vec!["Laval".to_string(), "Montréal".to_string()],
            categories: vec!["Condo".to_string()],
            has_indoor_parking: true,
            min_indoor_cars: 2,
            ..criteria()
        };
        assert_eq!(
            builder.build(&c).as_str(),
            "AND(OR(FIND('Laval', {Ville}), FIND('Montréal', {Ville})), \
             FIND('Condo', {type}), {StationnementInterieur}='Oui', {Car}>=2)"
        );
    }

    #[test]
    fn expression_serializes_as_plain_string() {
        let expr = build_filter(&criteria());
        assert_eq!(serde_json::to_string(&expr).unwrap(), "\"AND()\"");
        assert_eq!(expr.to_string(), "AND()");
    }
}
