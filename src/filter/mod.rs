pub mod builder;
pub mod formula;
pub mod profile;

pub use builder::{build_filter, EmptyFilter, FilterExpression, FilterExpressionBuilder};
pub use profile::{FieldNames, FieldOverrides, PredicateStyle, Profile, ProfileName};
