//! Serializing a small graph in every supported format.
//!
//! Run with: cargo run --example simple

use chrono::{TimeZone, Utc};
use rdf_text::vocab::{FOAF_NS, RDF_TYPE};
use rdf_text::{to_string, BlankNode, Format, Iri, Literal, Statement, StatementSet};
use std::error::Error;

fn foaf(local: &str) -> Iri {
    Iri::new(format!("{FOAF_NS}{local}"))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let alice = Iri::new("http://example.org/people/alice");
    let bob = Iri::new("http://example.org/people/bob");
    let address = BlankNode::new("address");
    let joined = Utc.with_ymd_and_hms(2021, 3, 14, 9, 30, 0).single().ok_or("invalid date")?;

    let mut set = StatementSet::new();
    set.insert(Statement::new(alice.clone(), Iri::new(RDF_TYPE), foaf("Person")));
    set.insert(Statement::new(alice.clone(), foaf("name"), "Alice"));
    set.insert(Statement::new(alice.clone(), foaf("age"), Literal::from(30)));
    set.insert(Statement::new(alice.clone(), foaf("knows"), bob.clone()));
    set.insert(Statement::new(alice.clone(), Iri::new("http://example.org/joined"), Literal::from(joined)));
    set.insert(Statement::new(alice, Iri::new("http://example.org/address"), address.clone()));
    set.insert(Statement::new(address.clone(), Iri::new("http://example.org/city"), Literal::lang("Paris", "fr")));
    set.insert(Statement::new(address, Iri::new("http://example.org/zip"), "75001"));
    set.insert(Statement::quad(
        bob,
        foaf("name"),
        "Bob",
        Iri::new("http://example.org/graphs/contacts"),
    ));

    for format in Format::ALL {
        println!("# {} ({})", format, format.media_type());
        println!("{}", to_string(&set, format)?);
    }

    Ok(())
}
