//! Endpoint analysis: parameters, request body, responses and security of
//! one operation, with every reference expanded.

mod analyzer;
mod schema;
mod types;

pub use analyzer::EndpointAnalyzer;
pub use schema::{constraints_for, flatten_schema, kind_of_value, object_fields};
pub use types::*;
