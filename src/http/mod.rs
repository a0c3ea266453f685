//! HTTP representation layer module
//!
//! Content negotiation, output serialization, and response building,
//! decoupled from dispatch logic.

pub mod negotiate;
pub mod response;
pub mod xml;

// Re-export commonly used types
pub use negotiate::{select_representation, serialize, Representation};
pub use negotiate::{MEDIA_JSON, MEDIA_TEXT, MEDIA_WILDCARD, MEDIA_XML};
