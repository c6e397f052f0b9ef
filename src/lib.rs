//! Search-form filter formulas and property calculators for a real-estate
//! chat assistant.
//!
//! The search form hands over a [`SearchCriteria`]; [`FilterExpressionBuilder`]
//! turns it into an Airtable formula, and [`CompletionPayload`] wraps that
//! formula for the chat runtime.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod models;
pub mod payload;
pub mod sources;

pub use catalog::{Catalog, Language};
pub use config::Settings;
pub use filter::{build_filter, EmptyFilter, FilterExpression, FilterExpressionBuilder, Profile, ProfileName};
pub use models::SearchCriteria;
pub use payload::CompletionPayload;
