//! Graph assembly from corpus extraction output.
//!
//! Builds both views in one pass: entities first (so their labels win
//! over bare endpoint creation), then relations.

use kgc_core::{Entity, Relation};
use tracing::info;

use crate::multigraph::KnowledgeGraph;
use crate::rdf::RdfStore;
use crate::stats::GraphStatistics;

/// Both graph views over one extraction.
pub struct AssembledGraph {
    pub graph: KnowledgeGraph,
    pub rdf: RdfStore,
}

impl AssembledGraph {
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics::of(&self.graph, &self.rdf)
    }
}

pub struct GraphAssembler;

impl GraphAssembler {
    pub fn assemble(entities: &[Entity], relations: &[Relation]) -> AssembledGraph {
        let mut graph = KnowledgeGraph::new();
        let mut rdf = RdfStore::new();

        for entity in entities {
            graph.add_entity(entity);
            rdf.add_entity(entity);
        }
        for relation in relations {
            graph.add_relation(relation);
            rdf.add_relation(relation);
        }

        info!(
            "assembled graph: {} nodes, {} edges, {} RDF triples",
            graph.node_count(),
            graph.edge_count(),
            rdf.len()
        );
        AssembledGraph { graph, rdf }
    }
}

// ============================================================================
// Tests
// ============================================================================
