//! `/context` handler unit
//!
//! The canonical example context: GET concatenates its two string query
//! parameters; DELETE accepts the same parameters (including the legacy
//! `&`-in-path form) and reports what was removed.

use serde_json::Value;
use std::sync::Arc;

use crate::binding::ArgValue;
use crate::http::MEDIA_JSON;
use crate::routing::{ContextSpec, OperationSpec, ParamSpec, ParamType, ScalarType, Verb};

/// Declare the `/context` operations.
pub fn declare() -> ContextSpec {
    ContextSpec {
        base_path: "/context".to_string(),
        operations: vec![
            OperationSpec {
                verb: Verb::Get,
                sub_path: None,
                params: key_value_params(),
                produced: vec![MEDIA_JSON.to_string()],
                handler: Arc::new(|args| {
                    let key = args.first().and_then(ArgValue::as_str).unwrap_or_default();
                    let value = args.get(1).and_then(ArgValue::as_str).unwrap_or_default();
                    Ok(Value::String(format!("{key}{value}")))
                }),
            },
            OperationSpec {
                verb: Verb::Delete,
                sub_path: None,
                params: key_value_params(),
                produced: vec![MEDIA_JSON.to_string()],
                handler: Arc::new(|args| {
                    let key = args.first().and_then(ArgValue::as_str).unwrap_or_default();
                    let value = args.get(1).and_then(ArgValue::as_str).unwrap_or_default();
                    Ok(Value::String(format!("removed {key}{value}")))
                }),
            },
        ],
    }
}

fn key_value_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::query("key", ParamType::Scalar(ScalarType::String)),
        ParamSpec::query("value", ParamType::Scalar(ScalarType::String)),
    ]
}
