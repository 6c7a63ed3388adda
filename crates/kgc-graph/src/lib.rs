//! KGC Graph - knowledge graph assembly and serialization
//!
//! Turns corpus extraction output into two synchronized views:
//! - a directed multigraph (entity nodes, one edge per relation)
//! - an RDF triple store under a small OWL schema
//!
//! plus deterministic exports (GraphML, node-link JSON, Turtle,
//! N-Triples) and summary statistics over both views.

pub mod assembler;
pub mod export;
pub mod multigraph;
pub mod rdf;
pub mod stats;

pub use assembler::{AssembledGraph, GraphAssembler};
pub use export::{EdgeEntry, NodeEntry, NodeLinkGraph};
pub use multigraph::{EdgeData, KnowledgeGraph, NodeData};
pub use rdf::{normalize_uri, RdfStore, Statement, Term, KG_NS};
pub use stats::{GraphStatistics, GraphSummary, RdfSummary};
