pub mod airtable;
pub mod traits;
pub mod types;

pub use airtable::AirtableSource;
pub use traits::ListingSource;
pub use types::ListingQuery;
