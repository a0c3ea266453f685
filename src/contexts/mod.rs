//! Context modules
//!
//! Handler units wired in by explicit registration: each context exposes
//! a function returning its declaration set, and `register_all` feeds
//! every known context to the registry at startup. A context whose
//! extraction fails is logged and skipped; the rest still register.

pub mod context;
pub mod echo;

use crate::logger;
use crate::routing::RouteRegistry;

/// Register every known context, skip-and-log on extraction failure.
pub fn register_all(registry: &mut RouteRegistry) {
    for spec in [context::declare(), echo::declare()] {
        let base_path = spec.base_path.clone();
        if let Err(e) = registry.register_context(spec) {
            logger::log_context_error(&base_path, &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{DispatchOutcome, Dispatcher, RequestContext};
    use crate::routing::Verb;
    use serde_json::json;

    fn dispatcher() -> Dispatcher {
        let mut registry = RouteRegistry::new();
        register_all(&mut registry);
        Dispatcher::new(registry)
    }

    fn dispatch(verb: Verb, path: &str, query: Option<&str>, body: &[u8]) -> DispatchOutcome {
        dispatcher().dispatch(&RequestContext {
            verb,
            path: path.to_string(),
            query: query.map(String::from),
            body: body.to_vec(),
            accept: None,
        })
    }

    #[test]
    fn test_context_get_concatenates_key_and_value() {
        match dispatch(Verb::Get, "/context", Some("key=a&value=b"), &[]) {
            DispatchOutcome::Completed { value, produced } => {
                assert_eq!(value, json!("ab"));
                assert_eq!(produced, vec!["application/json".to_string()]);
            }
            DispatchOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn test_echo_post_round_trips_body() {
        let body = br#"{"title":"first","body":"hello","pinned":true}"#;
        match dispatch(Verb::Post, "/echo", None, body) {
            DispatchOutcome::Completed { value, .. } => {
                assert_eq!(value["title"], json!("first"));
                assert_eq!(value["pinned"], json!(true));
            }
            DispatchOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn test_echo_sum_adds_list_elements() {
        match dispatch(Verb::Get, "/echo/sum", Some("values=3,4,5"), &[]) {
            DispatchOutcome::Completed { value, .. } => assert_eq!(value, json!(12)),
            DispatchOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }

    #[test]
    fn test_echo_when_formats_date() {
        match dispatch(Verb::Get, "/echo/when", Some("at=2024-01-15 10:30:00"), &[]) {
            DispatchOutcome::Completed { value, .. } => {
                assert_eq!(value, json!("2024-01-15 10:30:00"));
            }
            DispatchOutcome::Failed(e) => panic!("unexpected failure: {e}"),
        }
    }
}
