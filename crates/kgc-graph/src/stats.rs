//! Graph and triple-store statistics.
//!
//! Density and degree centrality follow the usual directed-graph
//! definitions: density is m / (n * (n - 1)) and a node's centrality is
//! its combined in- and out-degree over n - 1. Graphs with at most one
//! node report zero for both.

use std::cmp::Ordering;

use petgraph::Direction;
use serde::Serialize;

use crate::multigraph::KnowledgeGraph;
use crate::rdf::RdfStore;

/// How many nodes the centrality ranking keeps.
const TOP_CENTRALITY: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct GraphSummary {
    pub nodes_count: usize,
    pub edges_count: usize,
    pub density: f64,
    pub is_directed: bool,
    pub top_degree_centrality: Vec<(String, f64)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RdfSummary {
    pub triples_count: usize,
    pub subjects_count: usize,
    pub predicates_count: usize,
    pub objects_count: usize,
}

/// Combined report over both graph views.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStatistics {
    pub graph: GraphSummary,
    pub rdf: RdfSummary,
}

impl GraphStatistics {
    pub fn of(graph: &KnowledgeGraph, rdf: &RdfStore) -> Self {
        Self {
            graph: GraphSummary {
                nodes_count: graph.node_count(),
                edges_count: graph.edge_count(),
                density: graph.density(),
                is_directed: true,
                top_degree_centrality: graph.top_degree_centrality(TOP_CENTRALITY),
            },
            rdf: RdfSummary {
                triples_count: rdf.len(),
                subjects_count: rdf.distinct_subjects(),
                predicates_count: rdf.distinct_predicates(),
                objects_count: rdf.distinct_objects(),
            },
        }
    }
}

impl KnowledgeGraph {
    /// Edge count over the number of possible directed edges. Parallel
    /// edges all count, so a heavily multi-edged graph can exceed 1.
    pub fn density(&self) -> f64 {
        let n = self.node_count();
        if n <= 1 {
            return 0.0;
        }
        self.edge_count() as f64 / (n as f64 * (n as f64 - 1.0))
    }

    /// Degree centrality per node, in node insertion order.
    pub fn degree_centrality(&self) -> Vec<(String, f64)> {
        let n = self.node_count();
        if n <= 1 {
            return self.nodes().map(|node| (node.text.clone(), 0.0)).collect();
        }
        let scale = 1.0 / (n as f64 - 1.0);
        self.inner()
            .node_indices()
            .map(|idx| {
                let degree = self.inner().edges_directed(idx, Direction::Outgoing).count()
                    + self.inner().edges_directed(idx, Direction::Incoming).count();
                (self.inner()[idx].text.clone(), degree as f64 * scale)
            })
            .collect()
    }

    /// The `limit` most central nodes, descending; ties keep insertion
    /// order.
    pub fn top_degree_centrality(&self, limit: usize) -> Vec<(String, f64)> {
        let mut ranking = self.degree_centrality();
        ranking.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranking.truncate(limit);
        ranking
    }
}

// ============================================================================
// Tests
// ============================================================================
