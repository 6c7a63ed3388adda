//! In-memory RDF triple store mirroring the multigraph.
//!
//! The store keeps an insertion-ordered set of statements under a small
//! schema: every entity is a `kg:Entity`, dictionary terms are also
//! `kg:KGTerm`, and each predicate is declared an `owl:ObjectProperty`
//! with `kg:Entity` as domain and range the first time it appears.
//! Adding the same statement twice is a no-op.

use indexmap::IndexSet;
use kgc_core::{vocab::labels, Entity, Relation};
use std::collections::HashSet;

/// Schema namespace for all graph-local terms.
pub const KG_NS: &str = "http://knowledge-graph.org/kg-schema#";

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";
const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

const KG_ENTITY: &str = "http://knowledge-graph.org/kg-schema#Entity";
const KG_TERM_CLASS: &str = "http://knowledge-graph.org/kg-schema#KGTerm";

/// Language tag attached to entity labels.
const LABEL_LANG: &str = "zh";

/// An RDF object position: either a resource or a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    Iri(String),
    Literal { value: String, lang: Option<String> },
}

/// One triple. Subjects and predicates are always IRIs here.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: String,
    pub predicate: String,
    pub object: Term,
}

impl Statement {
    fn resource(subject: impl Into<String>, predicate: &str, object: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.to_string(),
            object: Term::Iri(object.into()),
        }
    }
}

/// Map free text onto an IRI-safe local name: spaces become
/// underscores, everything outside alphanumerics and underscore is
/// dropped. Distinct texts can collapse onto one local name; such
/// collisions merge in the RDF view only.
pub fn normalize_uri(text: &str) -> String {
    text.replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

pub struct RdfStore {
    statements: IndexSet<Statement>,
    declared_predicates: IndexSet<String>,
}

impl RdfStore {
    /// Create a store with the class schema in place.
    pub fn new() -> Self {
        let mut store = Self {
            statements: IndexSet::new(),
            declared_predicates: IndexSet::new(),
        };
        store.insert(Statement::resource(KG_ENTITY, RDF_TYPE, OWL_CLASS));
        store.insert(Statement::resource(KG_TERM_CLASS, RDF_TYPE, OWL_CLASS));
        store.insert(Statement::resource(KG_TERM_CLASS, RDFS_SUBCLASS_OF, KG_ENTITY));
        store
    }

    fn insert(&mut self, statement: Statement) {
        self.statements.insert(statement);
    }

    fn entity_iri(text: &str) -> String {
        format!("{KG_NS}{}", normalize_uri(text))
    }

    /// Type and label statements for one entity.
    pub fn add_entity(&mut self, entity: &Entity) {
        let iri = Self::entity_iri(&entity.text);
        self.insert(Statement::resource(iri.clone(), RDF_TYPE, KG_ENTITY));
        if entity.label == labels::KG_TERM {
            self.insert(Statement::resource(iri.clone(), RDF_TYPE, KG_TERM_CLASS));
        }
        self.insert(Statement {
            subject: iri,
            predicate: RDFS_LABEL.to_string(),
            object: Term::Literal {
                value: entity.text.clone(),
                lang: Some(LABEL_LANG.to_string()),
            },
        });
    }

    /// One statement per relation, declaring the predicate on first
    /// use. Relations with an unnamed subject, predicate or object are
    /// skipped.
    pub fn add_relation(&mut self, relation: &Relation) {
        if relation.subject.is_empty()
            || relation.predicate.is_empty()
            || relation.object.is_empty()
        {
            return;
        }

        let predicate_iri = format!("{KG_NS}{}", normalize_uri(&relation.predicate));
        if self.declared_predicates.insert(predicate_iri.clone()) {
            self.insert(Statement::resource(
                predicate_iri.clone(),
                RDF_TYPE,
                OWL_OBJECT_PROPERTY,
            ));
            self.insert(Statement::resource(
                predicate_iri.clone(),
                RDFS_DOMAIN,
                KG_ENTITY,
            ));
            self.insert(Statement::resource(
                predicate_iri.clone(),
                RDFS_RANGE,
                KG_ENTITY,
            ));
        }

        self.insert(Statement {
            subject: Self::entity_iri(&relation.subject),
            predicate: predicate_iri,
            object: Term::Iri(Self::entity_iri(&relation.object)),
        });
    }

    /// Statements in insertion order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn distinct_subjects(&self) -> usize {
        self.statements
            .iter()
            .map(|s| s.subject.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn distinct_predicates(&self) -> usize {
        self.statements
            .iter()
            .map(|s| s.predicate.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn distinct_objects(&self) -> usize {
        self.statements
            .iter()
            .map(|s| &s.object)
            .collect::<HashSet<_>>()
            .len()
    }
}

impl Default for RdfStore {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use kgc_core::{Method, Strategy};

    use super::*;

    fn entity(text: &str, label: &str) -> Entity {
        Entity::new(text, label, Strategy::Term)
    }

    fn relation(subject: &str, predicate: &str, object: &str) -> Relation {
        Relation::new(subject, predicate, object, "句子", 0.8, Method::Pattern)
    }

    fn has(store: &RdfStore, subject: &str, predicate: &str, object: &Term) -> bool {
        store
            .statements()
            .any(|s| s.subject == subject && s.predicate == predicate && &s.object == object)
    }

    #[test]
    fn test_schema_bootstrap() {
        let store = RdfStore::new();
        assert_eq!(store.len(), 3);
        assert!(has(
            &store,
            KG_TERM_CLASS,
            RDFS_SUBCLASS_OF,
            &Term::Iri(KG_ENTITY.to_string())
        ));
    }

    #[test]
    fn test_entity_statements() {
        let mut store = RdfStore::new();
        store.add_entity(&entity("知识图谱", "KG_TERM"));

        let iri = format!("{KG_NS}知识图谱");
        assert!(has(&store, &iri, RDF_TYPE, &Term::Iri(KG_ENTITY.to_string())));
        assert!(has(&store, &iri, RDF_TYPE, &Term::Iri(KG_TERM_CLASS.to_string())));
        assert!(has(
            &store,
            &iri,
            RDFS_LABEL,
            &Term::Literal {
                value: "知识图谱".to_string(),
                lang: Some("zh".to_string()),
            }
        ));
    }

    #[test]
    fn test_non_term_entity_gets_no_term_class() {
        let mut store = RdfStore::new();
        store.add_entity(&entity("语义网", "n"));

        let iri = format!("{KG_NS}语义网");
        assert!(has(&store, &iri, RDF_TYPE, &Term::Iri(KG_ENTITY.to_string())));
        assert!(!has(&store, &iri, RDF_TYPE, &Term::Iri(KG_TERM_CLASS.to_string())));
    }

    #[test]
    fn test_predicate_declared_once() {
        let mut store = RdfStore::new();
        let before = store.len();
        store.add_relation(&relation("A", "uses", "B"));
        store.add_relation(&relation("C", "uses", "D"));

        // First relation: three declaration statements plus the triple;
        // second relation: the triple only.
        assert_eq!(store.len(), before + 5);
        let uses = format!("{KG_NS}uses");
        assert!(has(
            &store,
            &uses,
            RDF_TYPE,
            &Term::Iri(OWL_OBJECT_PROPERTY.to_string())
        ));
    }

    #[test]
    fn test_incomplete_relation_is_skipped() {
        let mut store = RdfStore::new();
        let before = store.len();
        store.add_relation(&relation("", "uses", "B"));
        store.add_relation(&relation("A", "", "B"));
        store.add_relation(&relation("A", "uses", ""));
        assert_eq!(store.len(), before);
    }

    #[test]
    fn test_duplicate_statements_collapse() {
        let mut store = RdfStore::new();
        store.add_entity(&entity("RDF", "KG_TERM"));
        store.add_entity(&entity("RDF", "KG_TERM"));
        let len = store.len();
        store.add_relation(&relation("A", "uses", "B"));
        store.add_relation(&relation("A", "uses", "B"));
        assert_eq!(store.len(), len + 4);
    }

    #[test]
    fn test_uri_normalization() {
        assert_eq!(normalize_uri("知识图谱"), "知识图谱");
        assert_eq!(normalize_uri("Knowledge Graph"), "Knowledge_Graph");
        assert_eq!(normalize_uri("C++编程"), "C编程");
        assert_eq!(normalize_uri("a.b/c"), "abc");
    }

    #[test]
    fn test_colliding_texts_share_an_iri() {
        let mut store = RdfStore::new();
        store.add_entity(&entity("A.B", "n"));
        store.add_entity(&entity("AB", "n"));

        // Two bootstrap class subjects plus a single shared kg:AB.
        assert_eq!(store.distinct_subjects(), 3);
    }

    #[test]
    fn test_distinct_counts() {
        let mut store = RdfStore::new();
        store.add_relation(&relation("A", "uses", "B"));

        // Subjects: kg:Entity, kg:KGTerm, kg:uses, kg:A.
        assert_eq!(store.distinct_subjects(), 4);
        // Predicates: rdf:type, rdfs:subClassOf, rdfs:domain, rdfs:range, kg:uses.
        assert_eq!(store.distinct_predicates(), 5);
    }
}
