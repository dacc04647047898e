//! Core types for device search requests and results.

mod device;
mod filter;
mod scope;
mod search_params;

pub use device::{AttributeValue, Device, DeviceAttribute, DevicePage};
pub use filter::{FilterPredicate, Operator, TypedValue};
pub use scope::Scope;
pub use search_params::{SearchParams, SelectAttribute, Selection, SortCriterion, SortOrder};
