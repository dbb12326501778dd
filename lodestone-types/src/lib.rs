//! Core type definitions for Lodestone.
//!
//! This crate defines the fundamental, store-agnostic types used throughout
//! the reconciliation engine:
//! - Record identifiers (UUID v7)
//! - The tagged attribute value type (`Scalar | List<Scalar>`) with its
//!   loose-equality comparison
//! - The well-known attribute keys the engine reserves for bookkeeping
//!
//! Everything store-shaped (records, filters, the store trait) lives in
//! `lodestone-store`; everything declaration-shaped (definitions, sets,
//! reconcile modes) lives in `lodestone-model`.

mod ids;
mod keys;
mod value;

pub use ids::RecordId;
pub use keys::{is_reserved_key, EDITED_ATTR, RESERVED_ATTR_PREFIX, SLUG_ATTR};
pub use value::{AttrMap, AttrValue, AttrValueError, ScalarValue};
