use std::collections::HashMap;

use super::types::Scenario;
use crate::catalog;

/// Maps free text to a scripted scenario.
///
/// This is a literal table lookup: the input must equal a canned query byte
/// for byte (case-sensitive, untrimmed). Anything else gets the fallback.
#[derive(Debug, Clone)]
pub struct ScenarioResolver {
    routes: HashMap<String, Scenario>,
    order: Vec<String>,
    fallback: Scenario,
}

impl ScenarioResolver {
    pub fn new(routes: Vec<(String, Scenario)>, fallback: Scenario) -> Self {
        let order = routes.iter().map(|(query, _)| query.clone()).collect();
        Self {
            routes: routes.into_iter().collect(),
            order,
            fallback,
        }
    }

    /// The four canned banking queries
    pub fn builtin() -> Self {
        Self::new(catalog::canned_routes(), catalog::fallback_scenario())
    }

    pub fn resolve(&self, input: &str) -> Scenario {
        match self.routes.get(input) {
            Some(scenario) => scenario.clone(),
            None => {
                tracing::debug!(input_len = input.len(), "No canned match, using fallback");
                self.fallback.clone()
            }
        }
    }

    pub fn is_canned(&self, input: &str) -> bool {
        self.routes.contains_key(input)
    }

    /// Canned queries in display order
    pub fn canned_queries(&self) -> &[String] {
        &self.order
    }

    pub fn fallback(&self) -> &Scenario {
        &self.fallback
    }
}
