#![forbid(unsafe_code)]

//! The externally loaded tour definition.
//!
//! The document arrives as JSON with camelCase keys:
//!
//! ```json
//! {
//!   "displayStatus": true,
//!   "theme": { "theme": "#1f6feb", "maskColor": "rgba(0,0,0,0.6)" },
//!   "welcomeModalContent": { "title": "...", "body": "..." },
//!   "elements": [
//!     { "id": "nav", "order": 1, "maskColor": "...",
//!       "content": { "title": "...", "description": "..." } }
//!   ]
//! }
//! ```
//!
//! Steps arrive unordered and are stable-sorted by `order` before the tour
//! starts; the definition is immutable after loading.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::DefinitionError;

/// Explanatory content shown in the panel for one step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StepContent {
    pub title: String,
    pub description: String,
}

/// One tour stop, bound to one page element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Stable reference to a page element.
    pub id: String,
    /// Traversal position; ties keep their input order.
    pub order: i64,
    /// Theme color for this step's backdrop mask.
    pub mask_color: String,
    pub content: StepContent,
}

/// Content of the welcome modal shown before the tour starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WelcomeContent {
    pub title: String,
    pub body: String,
}

/// The full tour document. Fetched once at session start, immutable after.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TourDefinition {
    /// Kill switch: when false the session must never start.
    #[serde(rename = "displayStatus")]
    pub display_enabled: bool,
    /// Theme-variable name to color value.
    pub theme: BTreeMap<String, String>,
    #[serde(rename = "welcomeModalContent")]
    pub welcome: WelcomeContent,
    #[serde(rename = "elements")]
    pub steps: Vec<Step>,
}

impl TourDefinition {
    /// Parse a definition document, rejecting empty tours.
    pub fn parse(json: &str) -> Result<Self, DefinitionError> {
        let definition: Self = serde_json::from_str(json)?;
        if definition.steps.is_empty() {
            return Err(DefinitionError::Empty);
        }
        Ok(definition)
    }

    /// Sort steps by `order`, preserving input order on ties.
    pub fn sort_steps(&mut self) {
        self.steps.sort_by_key(|step| step.order);
    }
}
