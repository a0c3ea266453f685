//! Content negotiation module
//!
//! Selects exactly one output representation for a completed dispatch
//! and serializes the produced value accordingly.
//!
//! Selection order: the operation's first declared media type wins and
//! the Accept header is ignored; the `*/*` sentinel selects the default
//! representation (JSON); with nothing declared the literal Accept
//! header value decides. An unrecognized media type yields no body.

use serde_json::Value;

use super::xml;

pub const MEDIA_JSON: &str = "application/json";
pub const MEDIA_XML: &str = "application/xml";
pub const MEDIA_TEXT: &str = "text/plain";
pub const MEDIA_WILDCARD: &str = "*/*";

/// Closed set of supported output representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Representation {
    Json,
    Xml,
    /// Serialized identically to JSON (documented simplification).
    PlainText,
}

impl Representation {
    /// Map a literal media-type string onto a supported representation.
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            MEDIA_JSON => Some(Self::Json),
            MEDIA_XML => Some(Self::Xml),
            MEDIA_TEXT => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Pick the representation and the Content-Type header value for a
/// completed outcome.
///
/// Returns `None` for the representation when the selected media type is
/// not one this engine can serialize; the Content-Type header is still
/// reported so the response can carry it over an empty body.
pub fn select_representation(
    produced: &[String],
    accept: Option<&str>,
) -> (Option<Representation>, String) {
    match produced.first().map(String::as_str) {
        // Declared wildcard: negotiate to the default representation.
        Some(MEDIA_WILDCARD) => (Some(Representation::Json), MEDIA_JSON.to_string()),
        // Declared explicit type: use it, ignore Accept.
        Some(declared) => (Representation::from_media_type(declared), declared.to_string()),
        // Nothing declared: the request's Accept header decides; an
        // absent header falls back to the default representation.
        None => match accept {
            Some(accepted) => (Representation::from_media_type(accepted), accepted.to_string()),
            None => (Some(Representation::Json), MEDIA_JSON.to_string()),
        },
    }
}

/// Serialize a produced value for the selected representation.
pub fn serialize(representation: Representation, value: &Value) -> Result<String, serde_json::Error> {
    match representation {
        Representation::Json | Representation::PlainText => serde_json::to_string(value),
        Representation::Xml => Ok(xml::to_xml_document(value)),
    }
}
