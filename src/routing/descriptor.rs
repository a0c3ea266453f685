//! Operation descriptor module
//!
//! A context declares its operations as plain data (`ContextSpec`); the
//! extractor validates each declaration against the verb-specific rules
//! and compiles it into an immutable `OperationDescriptor` consumed by
//! the route registry. All failures here are configuration-time; nothing
//! in this module runs per request.

use hyper::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::binding::ArgValue;
use crate::error::{ConfigurationError, HandlerError};

/// HTTP verb an operation responds to.
///
/// Determines which route table the operation registers in and which
/// binding strategy applies at request time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Put,
    Post,
    Delete,
}

impl Verb {
    /// Map a hyper method onto a supported verb.
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Self::Get),
            Method::PUT => Some(Self::Put),
            Method::POST => Some(Self::Post),
            Method::DELETE => Some(Self::Delete),
            _ => None,
        }
    }

    /// Whether parameters bind from query values (GET/DELETE) rather
    /// than from the request body (PUT/POST).
    pub const fn binds_from_query(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive scalar element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Integer,
    Float,
    Boolean,
}

/// Decodes a raw request body into a JSON value validated against the
/// declared shape.
pub type BodyDecoder = Arc<dyn Fn(&[u8]) -> Result<Value, String> + Send + Sync>;

/// Semantic type tag for one declared parameter.
#[derive(Clone)]
pub enum ParamType {
    Scalar(ScalarType),
    DateTime,
    List(ScalarType),
    /// Structured object deserialized from the full request body.
    Object(BodyDecoder),
}

impl ParamType {
    /// Declare a body-bound structured-object shape.
    ///
    /// The decoder deserializes the payload into `T` (unknown fields
    /// ignored, missing required fields fail) and hands the validated
    /// value back as generic JSON.
    pub fn object<T>() -> Self
    where
        T: DeserializeOwned + Serialize + 'static,
    {
        Self::Object(Arc::new(|raw: &[u8]| {
            let shaped: T = serde_json::from_slice(raw).map_err(|e| e.to_string())?;
            serde_json::to_value(shaped).map_err(|e| e.to_string())
        }))
    }
}

impl fmt::Debug for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(s) => write!(f, "Scalar({s:?})"),
            Self::DateTime => write!(f, "DateTime"),
            Self::List(s) => write!(f, "List({s:?})"),
            Self::Object(_) => write!(f, "Object"),
        }
    }
}

/// Compiled parameter metadata. The name is empty for body-bound
/// parameters.
#[derive(Debug, Clone)]
pub struct ParameterDescriptor {
    pub name: String,
    pub ty: ParamType,
}

/// Operation handler: bound arguments in, JSON value out.
pub type HandlerFn = Arc<dyn Fn(&[ArgValue]) -> Result<Value, HandlerError> + Send + Sync>;

/// Compiled, immutable metadata for one dispatchable operation.
#[derive(Clone)]
pub struct OperationDescriptor {
    pub verb: Verb,
    pub path_key: String,
    pub params: Vec<ParameterDescriptor>,
    /// Declared output media types in preference order. Empty means
    /// "negotiate from the Accept header"; `"*/*"` is the wildcard
    /// sentinel selecting the default representation.
    pub produced: Vec<String>,
    pub handler: HandlerFn,
}

impl fmt::Debug for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationDescriptor")
            .field("verb", &self.verb)
            .field("path_key", &self.path_key)
            .field("params", &self.params)
            .field("produced", &self.produced)
            .finish_non_exhaustive()
    }
}

/// One declared parameter, before extraction.
#[derive(Clone)]
pub struct ParamSpec {
    /// Query name; `None` declares a body-bound parameter.
    pub name: Option<String>,
    pub ty: ParamType,
}

impl ParamSpec {
    pub fn query(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: Some(name.into()),
            ty,
        }
    }

    pub const fn body(ty: ParamType) -> Self {
        Self { name: None, ty }
    }
}

/// One declared operation, before extraction.
#[derive(Clone)]
pub struct OperationSpec {
    pub verb: Verb,
    /// Sub-path appended to the context base path, if any.
    pub sub_path: Option<String>,
    pub params: Vec<ParamSpec>,
    pub produced: Vec<String>,
    pub handler: HandlerFn,
}

/// A handler unit: a base path plus its declared operations.
///
/// Contexts expose a function returning this instead of being discovered
/// by runtime scanning; startup feeds the set to the registry.
#[derive(Clone)]
pub struct ContextSpec {
    pub base_path: String,
    pub operations: Vec<OperationSpec>,
}

/// Compile a context declaration into operation descriptors.
///
/// - PUT/POST parameters become body-bound (empty name).
/// - GET/DELETE parameters must carry a query name and a type that can
///   coerce from a query value; anything else is a `ConfigurationError`.
pub fn extract_operations(
    spec: ContextSpec,
) -> Result<Vec<OperationDescriptor>, ConfigurationError> {
    let mut descriptors = Vec::with_capacity(spec.operations.len());
    for op in spec.operations {
        let path_key = match &op.sub_path {
            Some(sub) => format!("{}{}", spec.base_path, sub),
            None => spec.base_path.clone(),
        };
        let params = if op.verb.binds_from_query() {
            extract_query_params(op.verb, &path_key, op.params)?
        } else {
            op.params
                .into_iter()
                .map(|p| ParameterDescriptor {
                    name: String::new(),
                    ty: p.ty,
                })
                .collect()
        };
        descriptors.push(OperationDescriptor {
            verb: op.verb,
            path_key,
            params,
            produced: op.produced,
            handler: op.handler,
        });
    }
    Ok(descriptors)
}

fn extract_query_params(
    verb: Verb,
    path_key: &str,
    params: Vec<ParamSpec>,
) -> Result<Vec<ParameterDescriptor>, ConfigurationError> {
    let mut extracted = Vec::with_capacity(params.len());
    for (index, param) in params.into_iter().enumerate() {
        let Some(name) = param.name else {
            return Err(ConfigurationError::UnnamedQueryParameter {
                verb,
                path: path_key.to_string(),
                index,
            });
        };
        if matches!(param.ty, ParamType::Object(_)) {
            return Err(ConfigurationError::ObjectQueryParameter {
                verb,
                path: path_key.to_string(),
                name,
            });
        }
        extracted.push(ParameterDescriptor { name, ty: param.ty });
    }
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler() -> HandlerFn {
        Arc::new(|_args| Ok(Value::Null))
    }

    fn get_op(sub_path: Option<&str>, params: Vec<ParamSpec>) -> OperationSpec {
        OperationSpec {
            verb: Verb::Get,
            sub_path: sub_path.map(String::from),
            params,
            produced: Vec::new(),
            handler: noop_handler(),
        }
    }

    #[test]
    fn test_path_key_concatenates_sub_path() {
        let spec = ContextSpec {
            base_path: "/context".to_string(),
            operations: vec![get_op(Some("/list"), Vec::new()), get_op(None, Vec::new())],
        };
        let ops = extract_operations(spec).unwrap();
        assert_eq!(ops[0].path_key, "/context/list");
        assert_eq!(ops[1].path_key, "/context");
    }

    #[test]
    fn test_get_requires_named_parameters() {
        let spec = ContextSpec {
            base_path: "/context".to_string(),
            operations: vec![get_op(
                None,
                vec![ParamSpec::body(ParamType::Scalar(ScalarType::String))],
            )],
        };
        let err = extract_operations(spec).unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UnnamedQueryParameter { index: 0, .. }
        ));
    }

    #[test]
    fn test_get_rejects_object_parameters() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Shape {
            field: String,
        }
        let spec = ContextSpec {
            base_path: "/context".to_string(),
            operations: vec![get_op(
                None,
                vec![ParamSpec::query("shape", ParamType::object::<Shape>())],
            )],
        };
        assert!(matches!(
            extract_operations(spec),
            Err(ConfigurationError::ObjectQueryParameter { .. })
        ));
    }

    #[test]
    fn test_post_parameters_are_body_bound() {
        let spec = ContextSpec {
            base_path: "/context".to_string(),
            operations: vec![OperationSpec {
                verb: Verb::Post,
                sub_path: None,
                params: vec![ParamSpec::body(ParamType::Scalar(ScalarType::String))],
                produced: Vec::new(),
                handler: noop_handler(),
            }],
        };
        let ops = extract_operations(spec).unwrap();
        assert_eq!(ops[0].params.len(), 1);
        assert!(ops[0].params[0].name.is_empty());
    }

    #[test]
    fn test_verb_from_method() {
        assert_eq!(Verb::from_method(&Method::GET), Some(Verb::Get));
        assert_eq!(Verb::from_method(&Method::DELETE), Some(Verb::Delete));
        assert_eq!(Verb::from_method(&Method::HEAD), None);
    }
}
