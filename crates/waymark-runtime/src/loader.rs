// SPDX-License-Identifier: MIT
#![forbid(unsafe_code)]

//! Loading the tour definition.
//!
//! The definition is fetched once through the [`DefinitionSource`] seam (a
//! GET-equivalent the host environment implements), parsed, and its steps
//! stable-sorted by `order`. A missing or malformed document means the tour
//! simply does not start; the failure is logged and returned, never panicked.

use tracing::warn;
use waymark_core::error::FetchError;
use waymark_core::model::TourDefinition;

use crate::session::SessionError;

/// GET-equivalent source for the tour definition document.
pub trait DefinitionSource {
    /// Fetch the raw JSON document.
    fn fetch(&self) -> Result<String, FetchError>;
}

/// A source backed by an in-memory document, for tests and embedding.
pub struct StaticSource(pub String);

impl DefinitionSource for StaticSource {
    fn fetch(&self) -> Result<String, FetchError> {
        Ok(self.0.clone())
    }
}

/// Fetch, parse, and order a tour definition.
pub fn load_definition(source: &dyn DefinitionSource) -> Result<TourDefinition, SessionError> {
    let raw = source.fetch().inspect_err(|err| {
        warn!(%err, "tour definition fetch failed; tour will not start");
    })?;
    let mut definition = TourDefinition::parse(&raw).inspect_err(|err| {
        warn!(%err, "tour definition rejected; tour will not start");
    })?;
    definition.sort_steps();
    Ok(definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl DefinitionSource for FailingSource {
        fn fetch(&self) -> Result<String, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    fn document() -> String {
        r##"{
            "displayStatus": true,
            "theme": { "theme": "#1f6feb" },
            "welcomeModalContent": { "title": "Hi", "body": "Welcome" },
            "elements": [
                { "id": "late", "order": 9, "maskColor": "#000",
                  "content": { "title": "t", "description": "d" } },
                { "id": "early", "order": 1, "maskColor": "#000",
                  "content": { "title": "t", "description": "d" } }
            ]
        }"##
        .to_string()
    }

    #[test]
    fn loads_and_sorts_steps() {
        let definition = load_definition(&StaticSource(document())).unwrap();
        let ids: Vec<&str> = definition.steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["early", "late"]);
    }

    #[test]
    fn fetch_failure_surfaces_as_session_error() {
        assert!(matches!(
            load_definition(&FailingSource),
            Err(SessionError::Fetch(_))
        ));
    }

    #[test]
    fn malformed_document_surfaces_as_session_error() {
        let result = load_definition(&StaticSource("not json".to_string()));
        assert!(matches!(result, Err(SessionError::Definition(_))));
    }
}
