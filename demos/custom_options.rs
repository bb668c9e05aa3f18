//! Customizing output with SerializationOptions.
//!
//! Run with: cargo run --example custom_options

use rdf_text::vocab::{RDF_FIRST, RDF_NIL, RDF_REST};
use rdf_text::{
    to_string_with_options, BlankNode, BlankNodeStyle, DatatypePolicy, Format, Iri, Literal,
    PrefixOrdering, SerializationOptions, Statement, StatementSet,
};
use std::error::Error;

fn ex(local: &str) -> Iri {
    Iri::new(format!("http://example.org/{local}"))
}

fn sample() -> StatementSet {
    let mut set = StatementSet::new();
    set.insert(Statement::new(ex("report"), ex("title"), "Quarterly\nresults"));
    set.insert(Statement::new(ex("report"), ex("pages"), Literal::from(12)));
    set.insert(Statement::new(ex("report"), ex("authors"), BlankNode::new("a0")));
    set.insert(Statement::new(BlankNode::new("a0"), Iri::new(RDF_FIRST), ex("alice")));
    set.insert(Statement::new(BlankNode::new("a0"), Iri::new(RDF_REST), BlankNode::new("a1")));
    set.insert(Statement::new(BlankNode::new("a1"), Iri::new(RDF_FIRST), ex("bob")));
    set.insert(Statement::new(BlankNode::new("a1"), Iri::new(RDF_REST), Iri::new(RDF_NIL)));
    for i in 0..6 {
        set.insert(Statement::new(ex("report"), ex("keyword"), format!("keyword-{i}")));
    }
    set
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();
    let set = sample();

    // Default Turtle
    println!("Default Turtle:");
    let default = to_string_with_options(&set, Format::Turtle, SerializationOptions::turtle())?;
    println!("{}\n", default);

    // Own prefix, declared in usage order, narrow lines
    println!("Custom prefix, 40 columns:");
    let narrow = SerializationOptions::turtle()
        .with_prefix("doc", "http://example.org/")
        .with_prefix_ordering(PrefixOrdering::UsageOrder)
        .with_max_line_length(40);
    println!("{}\n", to_string_with_options(&set, Format::Turtle, narrow)?);

    // Everything spelled out
    println!("No abbreviations:");
    let plain = SerializationOptions::turtle()
        .with_prefixes(false)
        .with_collections(false)
        .with_blank_node_style(BlankNodeStyle::Named)
        .with_multiline_literals(false)
        .with_literal_datatype_policy(DatatypePolicy::AlwaysTyped)
        .with_compact_triples(false);
    println!("{}\n", to_string_with_options(&set, Format::Turtle, plain)?);

    // Line output with stable labels and CRLF
    println!("N-Triples with stable blank node ids:");
    let stable = SerializationOptions::ntriples()
        .with_stable_blank_node_ids(true)
        .with_line_ending("\r\n");
    println!("{}", to_string_with_options(&set, Format::NTriples, stable)?);

    Ok(())
}
