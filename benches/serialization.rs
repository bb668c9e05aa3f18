use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rdf_text::vocab::{FOAF_NS, RDF_FIRST, RDF_NIL, RDF_REST, RDF_TYPE};
use rdf_text::{to_string, BlankNode, Format, Iri, Literal, Statement, StatementSet};

fn people(count: usize) -> StatementSet {
    let mut set = StatementSet::with_capacity(count * 5);
    let foaf = |local: &str| Iri::new(format!("{FOAF_NS}{local}"));
    for i in 0..count {
        let person = Iri::new(format!("http://example.org/people/p{i}"));
        let address = BlankNode::new(format!("addr{i}"));
        set.insert(Statement::new(person.clone(), Iri::new(RDF_TYPE), foaf("Person")));
        set.insert(Statement::new(person.clone(), foaf("name"), format!("Person {i}")));
        set.insert(Statement::new(person.clone(), foaf("age"), Literal::from(i as i64)));
        set.insert(Statement::new(person, Iri::new("http://example.org/address"), address.clone()));
        set.insert(Statement::new(address, Iri::new("http://example.org/city"), Literal::lang("Paris", "fr")));
    }
    set
}

fn long_list(len: usize) -> StatementSet {
    let mut set = StatementSet::with_capacity(len * 2 + 1);
    set.insert(Statement::new(
        Iri::new("http://example.org/s"),
        Iri::new("http://example.org/items"),
        BlankNode::new("c0"),
    ));
    for i in 0..len {
        let cell = BlankNode::new(format!("c{i}"));
        set.insert(Statement::new(cell.clone(), Iri::new(RDF_FIRST), Literal::from(i as i64)));
        let rest = if i + 1 == len {
            Statement::new(cell, Iri::new(RDF_REST), Iri::new(RDF_NIL))
        } else {
            Statement::new(cell, Iri::new(RDF_REST), BlankNode::new(format!("c{}", i + 1)))
        };
        set.insert(rest);
    }
    set
}

fn benchmark_formats(c: &mut Criterion) {
    let set = people(100);
    let mut group = c.benchmark_group("formats");
    for format in Format::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(format), &set, |b, set| {
            b.iter(|| to_string(black_box(set), format).unwrap());
        });
    }
    group.finish();
}

fn benchmark_turtle_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("turtle_scaling");
    for size in [10, 100, 1000] {
        let set = people(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &set, |b, set| {
            b.iter(|| to_string(black_box(set), Format::Turtle).unwrap());
        });
    }
    group.finish();
}

fn benchmark_collections(c: &mut Criterion) {
    let set = long_list(500);
    c.bench_function("turtle_collection_500", |b| {
        b.iter(|| to_string(black_box(&set), Format::Turtle).unwrap());
    });
}

fn benchmark_canonical_labels(c: &mut Criterion) {
    let set = people(500);
    c.bench_function("canonical_500_people", |b| {
        b.iter(|| to_string(black_box(&set), Format::Canonical).unwrap());
    });
}

criterion_group!(
    benches,
    benchmark_formats,
    benchmark_turtle_scaling,
    benchmark_collections,
    benchmark_canonical_labels
);
criterion_main!(benches);
