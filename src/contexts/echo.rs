//! `/echo` handler unit
//!
//! Exercises the rest of the engine surface: structured JSON bodies on
//! POST/PUT, a list parameter, and a date parameter.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::binding::{ArgValue, DATE_FORMAT};
use crate::error::HandlerError;
use crate::http::MEDIA_WILDCARD;
use crate::routing::{ContextSpec, OperationSpec, ParamSpec, ParamType, ScalarType, Verb};

/// Body shape accepted by the POST and PUT operations.
#[derive(Debug, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub body: String,
    pub pinned: bool,
}

/// Declare the `/echo` operations.
pub fn declare() -> ContextSpec {
    ContextSpec {
        base_path: "/echo".to_string(),
        operations: vec![
            OperationSpec {
                verb: Verb::Post,
                sub_path: None,
                params: vec![ParamSpec::body(ParamType::object::<Note>())],
                produced: vec![MEDIA_WILDCARD.to_string()],
                handler: Arc::new(|args| body_json(args).cloned()),
            },
            OperationSpec {
                verb: Verb::Put,
                sub_path: None,
                params: vec![ParamSpec::body(ParamType::object::<Note>())],
                produced: vec![MEDIA_WILDCARD.to_string()],
                handler: Arc::new(|args| {
                    let note = body_json(args)?;
                    Ok(json!({ "updated": note }))
                }),
            },
            OperationSpec {
                verb: Verb::Get,
                sub_path: Some("/sum".to_string()),
                params: vec![ParamSpec::query(
                    "values",
                    ParamType::List(ScalarType::Integer),
                )],
                produced: Vec::new(),
                handler: Arc::new(|args| {
                    let total: i64 = args
                        .first()
                        .and_then(ArgValue::as_list)
                        .map(|items| items.iter().filter_map(ArgValue::as_int).sum())
                        .unwrap_or(0);
                    Ok(json!(total))
                }),
            },
            OperationSpec {
                verb: Verb::Get,
                sub_path: Some("/when".to_string()),
                params: vec![ParamSpec::query("at", ParamType::DateTime)],
                produced: Vec::new(),
                handler: Arc::new(|args| {
                    let at = args
                        .first()
                        .and_then(ArgValue::as_datetime)
                        .ok_or_else(|| HandlerError::new("missing date argument"))?;
                    Ok(json!(at.format(DATE_FORMAT).to_string()))
                }),
            },
        ],
    }
}

fn body_json(args: &[ArgValue]) -> Result<&Value, HandlerError> {
    args.first()
        .and_then(ArgValue::as_json)
        .ok_or_else(|| HandlerError::new("missing request body"))
}
