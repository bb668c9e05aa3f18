use rdf_text::{graph, iri, to_string, BlankNode, Format, Literal, Resource, Statement, StatementSet, Term};

#[test]
fn test_iri_macro() {
    let iri = iri!("http://ex.org/a");
    assert_eq!(iri.as_str(), "http://ex.org/a");

    let owned = String::from("http://ex.org/b");
    assert_eq!(iri!(owned).to_string(), "<http://ex.org/b>");
}

#[test]
fn test_graph_macro_empty() {
    let set = graph!();
    assert!(set.is_empty());
    assert_eq!(set, StatementSet::new());
}

#[test]
fn test_graph_macro_literals() {
    let set = graph! {
        (iri!("http://ex.org/s"), iri!("http://ex.org/name"), "Alice"),
        (iri!("http://ex.org/s"), iri!("http://ex.org/age"), Literal::from(30)),
        (iri!("http://ex.org/s"), iri!("http://ex.org/motto"), Literal::lang("carpe diem", "la")),
    };
    assert_eq!(set.len(), 3);

    let objects: Vec<&Term> = set.iter().map(|st| &st.object).collect();
    assert_eq!(objects[0].as_literal().map(Literal::label), Some("Alice"));
    assert_eq!(objects[2].as_literal().and_then(Literal::language), Some("la"));
}

#[test]
fn test_graph_macro_blank_nodes_and_quads() {
    let set = graph! {
        (BlankNode::new("x"), iri!("http://ex.org/p"), BlankNode::new("y")),
        (BlankNode::new("y"), iri!("http://ex.org/p"), iri!("http://ex.org/o"), iri!("http://ex.org/g")),
    };

    let first = set.iter().next().unwrap();
    assert_eq!(first.subject, Resource::from(BlankNode::new("x")));
    assert!(first.object.is_blank_node());
    assert!(first.context.is_none());

    let contexts = set.contexts();
    assert_eq!(contexts.len(), 2);
    assert!(set.has_contexts());
}

#[test]
fn test_graph_macro_matches_manual_construction() {
    let from_macro = graph! {
        (iri!("http://ex.org/s"), iri!("http://ex.org/p"), iri!("http://ex.org/o")),
    };

    let mut manual = StatementSet::new();
    manual.insert(Statement::new(
        iri!("http://ex.org/s"),
        iri!("http://ex.org/p"),
        iri!("http://ex.org/o"),
    ));
    assert_eq!(from_macro, manual);
}

#[test]
fn test_graph_macro_output() {
    let set = graph! {
        (iri!("http://ex.org/s"), iri!("http://ex.org/p"), "v", iri!("http://ex.org/g")),
    };
    let nq = to_string(&set, Format::NQuads).unwrap();
    assert_eq!(nq, "<http://ex.org/s> <http://ex.org/p> \"v\" <http://ex.org/g> .\n");
}
