//! Request and response records for the tool-dispatch boundary.
//!
//! The core is driven by an external dispatch layer that hands over plain,
//! serializable records and renders the results. Requests are validated
//! here before anything is mutated; validation failures enumerate every
//! violation at once so the caller can fix them in one pass.

use crate::engine::{AnalogyEngine, Synthesis, MAX_RESULTS, MIN_RESULTS};
use crate::error::{Error, Result};
use crate::graph::{
    ConceptGraph, ConceptRelationship, DependentEntry, ImpactEntry, NeighborEntry, PathHop,
};
use crate::scoring::AbstractionLevel;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

fn default_max_results() -> u32 {
    3
}

/// Request for an analogy retrieval.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalogyRequest {
    /// Free-text statement of the problem to find analogies for
    pub problem_description: String,
    /// Restrict candidates to source domains containing one of these
    /// substrings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_domains: Option<Vec<String>>,
    /// Matching aggressiveness; defaults to deep
    #[serde(default)]
    pub abstraction_level: AbstractionLevel,
    /// Result cap, 1 to 10; defaults to 3
    #[serde(default = "default_max_results")]
    pub max_results: u32,
}

impl AnalogyRequest {
    /// Create a request with defaults for everything but the problem text.
    pub fn new(problem_description: impl Into<String>) -> Self {
        Self {
            problem_description: problem_description.into(),
            source_domains: None,
            abstraction_level: AbstractionLevel::default(),
            max_results: default_max_results(),
        }
    }

    /// Validate the request, collecting every violation.
    pub fn validate(&self) -> Result<()> {
        let mut details = Vec::new();

        if self.problem_description.trim().is_empty() {
            details.push("problem_description must not be empty".to_string());
        }
        if !(MIN_RESULTS as u32..=MAX_RESULTS as u32).contains(&self.max_results) {
            details.push(format!(
                "max_results must be between {} and {}, got {}",
                MIN_RESULTS, MAX_RESULTS, self.max_results
            ));
        }
        if let Some(domains) = &self.source_domains {
            if domains.iter().any(|d| d.trim().is_empty()) {
                details.push("source_domains entries must not be empty".to_string());
            }
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(details))
        }
    }
}

/// Validate and dispatch an analogy request.
///
/// Nothing is extracted, scored, or reinforced when validation fails.
pub fn handle_analogy(engine: &mut AnalogyEngine, request: &AnalogyRequest) -> Result<Synthesis> {
    request.validate()?;

    Ok(engine.synthesize(
        &request.problem_description,
        request.source_domains.as_deref(),
        request.abstraction_level,
        request.max_results as usize,
    ))
}

/// Kinds of read queries against the concept graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphQueryType {
    Neighbors,
    Dependents,
    Path,
    Impact,
}

/// Request against the concept graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GraphRequest {
    /// Register a concept, optionally with relationships and metadata.
    Register {
        concept: String,
        #[serde(default)]
        relationships: Vec<ConceptRelationship>,
        #[serde(default)]
        metadata: Option<HashMap<String, Value>>,
    },
    /// Query the graph without registering anything.
    Query {
        query_type: GraphQueryType,
        concept: String,
        #[serde(default)]
        target: Option<String>,
    },
    /// Explicitly strengthen a concept, optionally one relationship type.
    Strengthen {
        concept: String,
        #[serde(default)]
        relationship_type: Option<String>,
    },
}

impl GraphRequest {
    /// Validate the request, collecting every violation.
    pub fn validate(&self) -> Result<()> {
        let mut details = Vec::new();

        match self {
            Self::Register {
                concept,
                relationships,
                ..
            } => {
                if concept.trim().is_empty() {
                    details.push("concept must not be empty".to_string());
                }
                for rel in relationships {
                    if rel.relationship.trim().is_empty() {
                        details.push("relationship labels must not be empty".to_string());
                    }
                    if rel.target.trim().is_empty() {
                        details.push("relationship targets must not be empty".to_string());
                    }
                }
            }
            Self::Query {
                query_type,
                concept,
                target,
            } => {
                if concept.trim().is_empty() {
                    details.push("concept must not be empty".to_string());
                }
                if *query_type == GraphQueryType::Path
                    && target.as_deref().map_or(true, |t| t.trim().is_empty())
                {
                    details.push("target is required for path queries".to_string());
                }
            }
            Self::Strengthen { concept, .. } => {
                if concept.trim().is_empty() {
                    details.push("concept must not be empty".to_string());
                }
            }
        }

        if details.is_empty() {
            Ok(())
        } else {
            Err(Error::validation(details))
        }
    }
}

/// Response to a graph request, mirroring the operation contracts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum GraphResponse {
    /// The slug the concept was registered under
    Registered { id: String },
    /// Outgoing edges; the read reinforced them
    Neighbors { entries: Vec<NeighborEntry> },
    /// Incoming edges; read-only
    Dependents { entries: Vec<DependentEntry> },
    /// `hops` is `None` when no path exists and empty when the endpoints
    /// are the same concept
    Path { hops: Option<Vec<PathHop>> },
    /// Nodes affected by a change to the queried concept
    Impact { entries: Vec<ImpactEntry> },
    /// The strengthen call was applied (or was a no-op on an unknown
    /// concept)
    Strengthened,
}

/// Validate and dispatch a graph request.
///
/// Nothing is registered or reinforced when validation fails. Lookup misses
/// come back as empty or absent payloads, never as errors.
pub fn handle_graph(graph: &mut ConceptGraph, request: &GraphRequest) -> Result<GraphResponse> {
    request.validate()?;

    let response = match request {
        GraphRequest::Register {
            concept,
            relationships,
            metadata,
        } => GraphResponse::Registered {
            id: graph.register(concept, relationships, metadata.clone()),
        },
        GraphRequest::Query {
            query_type,
            concept,
            target,
        } => match query_type {
            GraphQueryType::Neighbors => GraphResponse::Neighbors {
                entries: graph.neighbors(concept),
            },
            GraphQueryType::Dependents => GraphResponse::Dependents {
                entries: graph.dependents(concept),
            },
            GraphQueryType::Path => GraphResponse::Path {
                // Validation guarantees a target for path queries.
                hops: graph.find_path(concept, target.as_deref().unwrap_or_default()),
            },
            GraphQueryType::Impact => GraphResponse::Impact {
                entries: graph.impact_analysis(concept),
            },
        },
        GraphRequest::Strengthen {
            concept,
            relationship_type,
        } => {
            graph.strengthen(concept, relationship_type.as_deref());
            GraphResponse::Strengthened
        }
    };

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::PatternLibrary;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn engine() -> (TempDir, AnalogyEngine) {
        let dir = TempDir::new().unwrap();
        let library = PatternLibrary::open(dir.path().join("patterns.json"));
        (dir, AnalogyEngine::new(library))
    }

    #[test]
    fn test_analogy_request_defaults_from_json() {
        let request: AnalogyRequest =
            serde_json::from_str(r#"{"problem_description": "route messages"}"#).unwrap();

        assert_eq!(request.abstraction_level, AbstractionLevel::Deep);
        assert_eq!(request.max_results, 3);
        assert!(request.source_domains.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_analogy_request_collects_all_violations() {
        let request = AnalogyRequest {
            problem_description: "   ".to_string(),
            source_domains: Some(vec!["postal".to_string(), "".to_string()]),
            abstraction_level: AbstractionLevel::Deep,
            max_results: 0,
        };

        let err = request.validate().unwrap_err();
        let Error::Validation { details } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(details.len(), 3);
    }

    #[test]
    fn test_handle_analogy_rejects_invalid_without_mutation() {
        let (_dir, mut engine) = engine();
        let request = AnalogyRequest {
            problem_description: String::new(),
            source_domains: None,
            abstraction_level: AbstractionLevel::Shallow,
            max_results: 3,
        };

        assert!(handle_analogy(&mut engine, &request).is_err());
        assert!(engine.library().all().iter().all(|p| p.usage_count == 0));
    }

    #[test]
    fn test_handle_analogy_dispatches() {
        let (_dir, mut engine) = engine();
        let request = AnalogyRequest::new(
            "multiple agents need to claim tasks without duplicating work",
        );

        let synthesis = handle_analogy(&mut engine, &request).unwrap();
        assert_eq!(synthesis.analogies.len(), 3);
        assert_eq!(synthesis.best_analogy.domain, "restaurant_kitchen");
    }

    #[test]
    fn test_graph_request_from_tagged_json() {
        let request: GraphRequest = serde_json::from_str(
            r#"{
                "action": "register",
                "concept": "message broker",
                "relationships": [
                    {"relationship": "coordinates_with", "target": "consumer group"}
                ]
            }"#,
        )
        .unwrap();

        let mut graph = ConceptGraph::new();
        let response = handle_graph(&mut graph, &request).unwrap();
        assert_eq!(
            response,
            GraphResponse::Registered {
                id: "message_broker".to_string()
            }
        );
        assert!(graph.get("consumer group").is_some());
    }

    #[test]
    fn test_graph_path_query_requires_target() {
        let request = GraphRequest::Query {
            query_type: GraphQueryType::Path,
            concept: "a".to_string(),
            target: None,
        };

        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("target is required"));
    }

    #[test]
    fn test_graph_path_response_distinguishes_absent() {
        let mut graph = ConceptGraph::new();
        graph.register("island", &[], None);
        graph.register("mainland", &[], None);

        let no_path = handle_graph(
            &mut graph,
            &GraphRequest::Query {
                query_type: GraphQueryType::Path,
                concept: "island".to_string(),
                target: Some("mainland".to_string()),
            },
        )
        .unwrap();
        assert_eq!(no_path, GraphResponse::Path { hops: None });

        let self_path = handle_graph(
            &mut graph,
            &GraphRequest::Query {
                query_type: GraphQueryType::Path,
                concept: "island".to_string(),
                target: Some("island".to_string()),
            },
        )
        .unwrap();
        assert_eq!(
            self_path,
            GraphResponse::Path {
                hops: Some(Vec::new())
            }
        );
    }

    #[test]
    fn test_graph_strengthen_dispatch() {
        let mut graph = ConceptGraph::new();
        graph.register(
            "worker",
            &[ConceptRelationship::new("depends_on", "queue")],
            None,
        );

        let response = handle_graph(
            &mut graph,
            &GraphRequest::Strengthen {
                concept: "worker".to_string(),
                relationship_type: Some("depends_on".to_string()),
            },
        )
        .unwrap();

        assert_eq!(response, GraphResponse::Strengthened);
        assert_eq!(graph.get("worker").unwrap().access_count, 1);
    }

    #[test]
    fn test_graph_register_invalid_mutates_nothing() {
        let mut graph = ConceptGraph::new();
        let request = GraphRequest::Register {
            concept: "  ".to_string(),
            relationships: vec![ConceptRelationship::new("", "")],
            metadata: None,
        };

        let err = handle_graph(&mut graph, &request).unwrap_err();
        let Error::Validation { details } = err else {
            panic!("expected a validation error");
        };
        assert_eq!(details.len(), 3);
        assert_eq!(graph.stats().node_count, 0);
    }

    #[test]
    fn test_responses_serialize_with_snake_case_tags() {
        let response = GraphResponse::Registered {
            id: "queue".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"], "registered");
        assert_eq!(json["id"], "queue");
    }
}
