//! Parameter binding module
//!
//! Converts raw inbound data into the typed argument list an operation
//! expects: a name→value map parsed from a query string for query-bound
//! parameters, or a single JSON payload for body-bound parameters.
//!
//! Binding performs shape coercion only; it never validates cross-field
//! constraints and never substitutes defaults for missing values.

use chrono::NaiveDateTime;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::ParameterError;
use crate::routing::{ParamType, ParameterDescriptor, ScalarType};

/// Date/time pattern accepted for date parameters (`yyyy-MM-dd HH:mm:ss`).
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A coerced argument value handed to an operation handler.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    List(Vec<ArgValue>),
    /// Deserialized request body, already validated against the declared
    /// shape. Handlers re-materialize their concrete type from this.
    Json(Value),
}

impl ArgValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ArgValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }
}

/// Parse a query string into a name→value map.
///
/// Pairs are separated by `&` and split on the first `=`; a name with no
/// `=value` binds the empty string. Values are taken verbatim (no
/// percent-decoding).
///
/// # Examples
/// ```
/// use webctx::binding::parse_query;
/// let map = parse_query("key=a&value=b&flag");
/// assert_eq!(map.get("key").map(String::as_str), Some("a"));
/// assert_eq!(map.get("flag").map(String::as_str), Some(""));
/// ```
pub fn parse_query(raw: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for pair in raw.split('&') {
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((name, value)) => values.insert(name.to_string(), value.to_string()),
            None => values.insert(pair.to_string(), String::new()),
        };
    }
    values
}

/// Bind query-sourced parameters in declaration order.
///
/// A declared name absent from `values` is a required-parameter-missing
/// condition and fails the whole binding.
pub fn bind_query(
    params: &[ParameterDescriptor],
    values: &HashMap<String, String>,
) -> Result<Vec<ArgValue>, ParameterError> {
    let mut args = Vec::with_capacity(params.len());
    for param in params {
        let raw = values
            .get(&param.name)
            .ok_or_else(|| ParameterError::Missing(param.name.clone()))?;
        args.push(coerce(param, raw)?);
    }
    Ok(args)
}

/// Bind body-sourced parameters from a single raw JSON payload.
///
/// Each body-bound parameter deserializes the full payload into its
/// declared shape; in practice operations declare exactly one.
pub fn bind_body(
    params: &[ParameterDescriptor],
    body: &[u8],
) -> Result<Vec<ArgValue>, ParameterError> {
    let mut args = Vec::with_capacity(params.len());
    for param in params {
        match &param.ty {
            ParamType::Object(decode) => {
                let value = decode(body).map_err(ParameterError::Body)?;
                args.push(ArgValue::Json(value));
            }
            // Non-object body parameters coerce from the payload as text.
            _ => {
                let raw = std::str::from_utf8(body)
                    .map_err(|e| ParameterError::Body(e.to_string()))?;
                args.push(coerce(param, raw)?);
            }
        }
    }
    Ok(args)
}

/// Coerce one raw string into the parameter's declared type.
fn coerce(param: &ParameterDescriptor, raw: &str) -> Result<ArgValue, ParameterError> {
    match &param.ty {
        ParamType::Scalar(scalar) => coerce_scalar(*scalar, &param.name, raw),
        ParamType::DateTime => {
            let parsed = NaiveDateTime::parse_from_str(raw, DATE_FORMAT)
                .map_err(|e| invalid(&param.name, raw, &e.to_string()))?;
            Ok(ArgValue::DateTime(parsed))
        }
        ParamType::List(scalar) => {
            // "3" is the one-element list [3]; "3,4,5" splits on ','.
            // Empty elements are not filtered, so "3,,5" fails for
            // numeric element types and yields "" for strings.
            let elements: Vec<&str> = if raw.contains(',') {
                raw.split(',').collect()
            } else {
                vec![raw]
            };
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(coerce_scalar(*scalar, &param.name, element)?);
            }
            Ok(ArgValue::List(items))
        }
        ParamType::Object(_) => Err(invalid(
            &param.name,
            raw,
            "object parameters bind from the request body",
        )),
    }
}

fn coerce_scalar(scalar: ScalarType, name: &str, raw: &str) -> Result<ArgValue, ParameterError> {
    match scalar {
        ScalarType::String => Ok(ArgValue::Str(raw.to_string())),
        ScalarType::Integer => raw
            .parse::<i64>()
            .map(ArgValue::Int)
            .map_err(|e| invalid(name, raw, &e.to_string())),
        ScalarType::Float => raw
            .parse::<f64>()
            .map(ArgValue::Float)
            .map_err(|e| invalid(name, raw, &e.to_string())),
        ScalarType::Boolean => raw
            .parse::<bool>()
            .map(ArgValue::Bool)
            .map_err(|e| invalid(name, raw, &e.to_string())),
    }
}

fn invalid(name: &str, value: &str, reason: &str) -> ParameterError {
    ParameterError::Invalid {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::ParameterDescriptor;
    use serde::{Deserialize, Serialize};

    fn query_param(name: &str, ty: ParamType) -> ParameterDescriptor {
        ParameterDescriptor {
            name: name.to_string(),
            ty,
        }
    }

    #[test]
    fn test_parse_query_pairs() {
        let map = parse_query("key=a&value=b");
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("key").map(String::as_str), Some("a"));
        assert_eq!(map.get("value").map(String::as_str), Some("b"));
    }

    #[test]
    fn test_parse_query_name_without_value_binds_empty() {
        let map = parse_query("flag&key=a");
        assert_eq!(map.get("flag").map(String::as_str), Some(""));
        assert_eq!(map.get("key").map(String::as_str), Some("a"));
    }

    #[test]
    fn test_parse_query_empty_string() {
        assert!(parse_query("").is_empty());
    }

    #[test]
    fn test_bind_query_preserves_declaration_order() {
        let params = vec![
            query_param("key", ParamType::Scalar(ScalarType::String)),
            query_param("value", ParamType::Scalar(ScalarType::String)),
        ];
        let values = parse_query("value=b&key=a");
        let args = bind_query(&params, &values).unwrap();
        assert_eq!(
            args,
            vec![
                ArgValue::Str("a".to_string()),
                ArgValue::Str("b".to_string())
            ]
        );
    }

    #[test]
    fn test_bind_query_missing_name_fails() {
        let params = vec![query_param("key", ParamType::Scalar(ScalarType::String))];
        let values = parse_query("other=1");
        let err = bind_query(&params, &values).unwrap_err();
        assert_eq!(err, ParameterError::Missing("key".to_string()));
    }

    #[test]
    fn test_coerce_integer() {
        let param = query_param("n", ParamType::Scalar(ScalarType::Integer));
        assert_eq!(coerce(&param, "42").unwrap(), ArgValue::Int(42));
        assert!(matches!(
            coerce(&param, "nope").unwrap_err(),
            ParameterError::Invalid { .. }
        ));
    }

    #[test]
    fn test_coerce_boolean() {
        let param = query_param("b", ParamType::Scalar(ScalarType::Boolean));
        assert_eq!(coerce(&param, "true").unwrap(), ArgValue::Bool(true));
        assert!(coerce(&param, "yes").is_err());
    }

    #[test]
    fn test_coerce_date() {
        let param = query_param("at", ParamType::DateTime);
        let arg = coerce(&param, "2024-01-15 10:30:00").unwrap();
        let dt = arg.as_datetime().unwrap();
        assert_eq!(dt.format(DATE_FORMAT).to_string(), "2024-01-15 10:30:00");
        assert!(coerce(&param, "not-a-date").is_err());
    }

    #[test]
    fn test_list_single_element() {
        let param = query_param("ids", ParamType::List(ScalarType::Integer));
        let arg = coerce(&param, "3").unwrap();
        assert_eq!(arg, ArgValue::List(vec![ArgValue::Int(3)]));
    }

    #[test]
    fn test_list_preserves_order() {
        let param = query_param("ids", ParamType::List(ScalarType::Integer));
        let arg = coerce(&param, "3,4,5").unwrap();
        assert_eq!(
            arg,
            ArgValue::List(vec![ArgValue::Int(3), ArgValue::Int(4), ArgValue::Int(5)])
        );
    }

    #[test]
    fn test_list_empty_elements_not_filtered() {
        let strings = query_param("names", ParamType::List(ScalarType::String));
        let arg = coerce(&strings, "a,,b").unwrap();
        assert_eq!(arg.as_list().unwrap().len(), 3);

        let ints = query_param("ids", ParamType::List(ScalarType::Integer));
        assert!(coerce(&ints, "3,,5").is_err());
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Note {
        title: String,
        pinned: bool,
    }

    #[test]
    fn test_bind_body_round_trip() {
        let params = vec![ParameterDescriptor {
            name: String::new(),
            ty: ParamType::object::<Note>(),
        }];
        let original = Note {
            title: "first".to_string(),
            pinned: true,
        };
        let body = serde_json::to_vec(&original).unwrap();
        let args = bind_body(&params, &body).unwrap();
        let rebuilt: Note = serde_json::from_value(args[0].as_json().unwrap().clone()).unwrap();
        assert_eq!(rebuilt, original);
    }

    #[test]
    fn test_bind_body_ignores_unknown_fields() {
        let params = vec![ParameterDescriptor {
            name: String::new(),
            ty: ParamType::object::<Note>(),
        }];
        let body = br#"{"title":"first","pinned":false,"extra":123}"#;
        let args = bind_body(&params, body).unwrap();
        let rebuilt: Note = serde_json::from_value(args[0].as_json().unwrap().clone()).unwrap();
        assert_eq!(rebuilt.title, "first");
    }

    #[test]
    fn test_bind_body_missing_field_fails() {
        let params = vec![ParameterDescriptor {
            name: String::new(),
            ty: ParamType::object::<Note>(),
        }];
        let err = bind_body(&params, br#"{"title":"first"}"#).unwrap_err();
        assert!(matches!(err, ParameterError::Body(_)));
    }
}
