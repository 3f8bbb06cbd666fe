//! Infinite Craft protocol - wire types for the room transport
//!
//! This crate contains the JSON shapes exchanged between the engine and its
//! clients:
//! - Request bodies and query strings (`requests`)
//! - Response bodies and error envelopes (`responses`)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain types** - plain strings, so clients never need the domain crate

pub mod requests;
pub mod responses;

pub use requests::{CraftNounRequest, ListNounsQuery};
pub use responses::{CraftNounResponse, ErrorCode, ErrorResponse, NounData};
