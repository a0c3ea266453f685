//! Route registry module
//!
//! Four independent path→descriptor maps, one per verb. Built during
//! startup registration, read-only for the serving lifetime; lookups are
//! exact-match on the full path string (no templated segments).

use std::collections::HashMap;

use super::descriptor::{extract_operations, ContextSpec, OperationDescriptor, Verb};
use crate::error::ConfigurationError;
use crate::logger;

/// Per-verb mapping from path key to exactly one operation descriptor.
#[derive(Debug, Default)]
pub struct RouteRegistry {
    get: HashMap<String, OperationDescriptor>,
    put: HashMap<String, OperationDescriptor>,
    post: HashMap<String, OperationDescriptor>,
    delete: HashMap<String, OperationDescriptor>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a descriptor under its (verb, path key).
    ///
    /// A duplicate registration overwrites the prior entry silently
    /// (last-write-wins); a warning is logged so the overwrite is at
    /// least observable.
    pub fn register(&mut self, descriptor: OperationDescriptor) {
        let verb = descriptor.verb;
        let path_key = descriptor.path_key.clone();
        if self.table_mut(verb).insert(path_key.clone(), descriptor).is_some() {
            logger::log_duplicate_route(verb.as_str(), &path_key);
        } else {
            logger::log_route_registered(verb.as_str(), &path_key);
        }
    }

    /// Extract a context declaration and register every operation it
    /// yields.
    pub fn register_context(&mut self, spec: ContextSpec) -> Result<(), ConfigurationError> {
        for descriptor in extract_operations(spec)? {
            self.register(descriptor);
        }
        Ok(())
    }

    /// Exact-match lookup for the verb's table.
    pub fn resolve(&self, verb: Verb, path: &str) -> Option<&OperationDescriptor> {
        self.table(verb).get(path)
    }

    /// Total number of registered operations across all verbs.
    pub fn route_count(&self) -> usize {
        self.get.len() + self.put.len() + self.post.len() + self.delete.len()
    }

    const fn table(&self, verb: Verb) -> &HashMap<String, OperationDescriptor> {
        match verb {
            Verb::Get => &self.get,
            Verb::Put => &self.put,
            Verb::Post => &self.post,
            Verb::Delete => &self.delete,
        }
    }

    fn table_mut(&mut self, verb: Verb) -> &mut HashMap<String, OperationDescriptor> {
        match verb {
            Verb::Get => &mut self.get,
            Verb::Put => &mut self.put,
            Verb::Post => &mut self.post,
            Verb::Delete => &mut self.delete,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::HandlerFn;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn descriptor(verb: Verb, path: &str, marker: i64) -> OperationDescriptor {
        let handler: HandlerFn = Arc::new(move |_args| Ok(json!(marker)));
        OperationDescriptor {
            verb,
            path_key: path.to_string(),
            params: Vec::new(),
            produced: Vec::new(),
            handler,
        }
    }

    fn invoke(op: &OperationDescriptor) -> Value {
        (op.handler)(&[]).unwrap()
    }

    #[test]
    fn test_resolve_registered_route() {
        let mut registry = RouteRegistry::new();
        registry.register(descriptor(Verb::Get, "/context", 1));
        assert!(registry.resolve(Verb::Get, "/context").is_some());
        assert!(registry.resolve(Verb::Get, "/unknown").is_none());
    }

    #[test]
    fn test_tables_are_independent_per_verb() {
        let mut registry = RouteRegistry::new();
        registry.register(descriptor(Verb::Get, "/context", 1));
        assert!(registry.resolve(Verb::Post, "/context").is_none());
        assert!(registry.resolve(Verb::Delete, "/context").is_none());
    }

    #[test]
    fn test_duplicate_registration_last_write_wins() {
        let mut registry = RouteRegistry::new();
        registry.register(descriptor(Verb::Get, "/context", 1));
        registry.register(descriptor(Verb::Get, "/context", 2));
        let op = registry.resolve(Verb::Get, "/context").unwrap();
        assert_eq!(invoke(op), json!(2));
        assert_eq!(registry.route_count(), 1);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        let mut registry = RouteRegistry::new();
        registry.register(descriptor(Verb::Get, "/context", 1));
        assert!(registry.resolve(Verb::Get, "/context/").is_none());
        assert!(registry.resolve(Verb::Get, "/context/sub").is_none());
    }
}
