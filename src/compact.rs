//! Turtle and TriG writer.
//!
//! Output is produced in four steps:
//!
//! 1. bind prefixes (pre-declared ones, then one per namespace in the data)
//! 2. write the `@base` and `@prefix` header
//! 3. analyze blank nodes (see [`crate::analyzer`])
//! 4. write subject blocks, partitioned into `graph { … }` wrappers for TriG
//!
//! Each subject block is rendered into a string and then written to the
//! sink, so a failing term never leaves half a block behind.

use crate::analyzer::{analyze, Structure};
use crate::encoder::{Guard, TermEncoder};
use crate::error::{EncodeResult, ErrorKind};
use crate::graph::StatementSet;
use crate::labels::BlankNodeLabels;
use crate::namespace::{is_valid_local_name, is_valid_prefix_label, NamespaceBinding};
use crate::options::{DatatypePolicy, Format, SerializationOptions};
use crate::term::{Iri, Resource, Statement, Term};
use crate::vocab;
use indexmap::{IndexMap, IndexSet};
use std::io::Write;

pub(crate) fn write<W: Write>(
    out: &mut W,
    statements: &StatementSet,
    format: Format,
    options: &SerializationOptions,
) -> EncodeResult<()> {
    let graphs = format == Format::TriG && options.include_context;
    if !graphs && statements.has_contexts() {
        tracing::warn!(%format, "named graphs are not written, statement contexts ignored");
    }
    let options = SerializationOptions {
        include_context: graphs,
        ..options.clone()
    };

    let labels = if options.stable_blank_node_ids {
        BlankNodeLabels::stable(statements)
    } else {
        BlankNodeLabels::own()
    };
    let structure = analyze(statements, &options);
    let namespaces = bind_namespaces(statements, &structure, &options)?;

    let plain = TermEncoder::line(&options, &labels);
    write_header(out, &plain, &namespaces, &options)?;

    let writer = CompactWriter {
        encoder: TermEncoder::compact(&options, &labels, &namespaces, &structure),
        structure: &structure,
        options: &options,
    };

    let mut parts: IndexMap<Option<&Resource>, Vec<&Statement>> = IndexMap::new();
    for st in statements {
        let key = if graphs { st.context.as_ref() } else { None };
        parts.entry(key).or_default().push(st);
    }
    for (i, (context, stmts)) in parts.into_iter().enumerate() {
        if i > 0 && options.pretty_print {
            out.write_all(options.line_ending.as_bytes())?;
        }
        writer.write_partition(out, context, &stmts)?;
    }

    tracing::debug!(
        %format,
        statements = statements.len(),
        prefixes = namespaces.len(),
        "compact serialization complete"
    );
    Ok(())
}

fn bind_namespaces(
    statements: &StatementSet,
    structure: &Structure<'_>,
    options: &SerializationOptions,
) -> EncodeResult<NamespaceBinding> {
    let mut namespaces = NamespaceBinding::new();
    if !options.use_prefixes {
        return Ok(namespaces);
    }

    for (prefix, namespace) in &options.custom_prefixes {
        if !is_valid_prefix_label(prefix) {
            return Err(ErrorKind::invalid_data(format!(
                "'{prefix}' is not a valid prefix label"
            )));
        }
        namespaces.add_mapping(namespace, prefix);
    }

    if options.auto_declare_prefixes {
        for iri in written_iris(statements, structure, options) {
            declare(&mut namespaces, iri);
        }
    }
    Ok(namespaces)
}

/// IRIs that appear in the output, in statement order.
fn written_iris<'s>(
    statements: &'s StatementSet,
    structure: &Structure<'_>,
    options: &SerializationOptions,
) -> IndexSet<&'s str> {
    let mut iris = IndexSet::new();
    for st in statements {
        let list_cell = st
            .subject
            .as_blank_node()
            .is_some_and(|node| structure.is_consumed(node) && !structure.is_inline(node));

        if let Resource::Iri(iri) = &st.subject {
            iris.insert(iri.as_str());
        }
        let type_shortcut = options.use_rdf_type_shortcut && st.predicate.as_str() == vocab::RDF_TYPE;
        if !list_cell && !type_shortcut {
            iris.insert(st.predicate.as_str());
        }
        match &st.object {
            Term::Iri(iri) if options.use_collections && iri.as_str() == vocab::RDF_NIL => {}
            Term::Iri(iri) => {
                iris.insert(iri.as_str());
            }
            Term::Literal(literal) if literal.language().is_none() => {
                if let Some(datatype) = literal.datatype() {
                    let written = match options.literal_datatype_policy {
                        DatatypePolicy::AlwaysTyped => true,
                        DatatypePolicy::Minimal => datatype.as_str() != vocab::XSD_STRING,
                    };
                    if written {
                        iris.insert(datatype.as_str());
                    }
                }
            }
            _ => {}
        }
        if let Some(Resource::Iri(iri)) = &st.context {
            if options.include_context {
                iris.insert(iri.as_str());
            }
        }
    }
    iris
}

fn declare(namespaces: &mut NamespaceBinding, iri: &str) {
    let Some(namespace) = NamespaceBinding::namespace_of(iri) else {
        return;
    };
    if namespaces.prefix_for(namespace).is_some() {
        return;
    }
    let local = &iri[namespace.len()..];
    if !local.is_empty() && !is_valid_local_name(local) {
        return;
    }
    let prefix = namespaces.suggest(namespace);
    namespaces.add_mapping(namespace, &prefix);
}

fn write_header<W: Write>(
    out: &mut W,
    plain: &TermEncoder<'_>,
    namespaces: &NamespaceBinding,
    options: &SerializationOptions,
) -> EncodeResult<()> {
    let mut header = String::new();
    if let Some(base) = &options.base_iri {
        header.push_str("@base ");
        plain.encode_iri(&mut header, &Iri::new(base.as_str()))?;
        header.push_str(" .");
        header.push_str(&options.line_ending);
    }
    for (prefix, namespace) in namespaces.declarations(options.prefix_ordering) {
        header.push_str("@prefix ");
        header.push_str(prefix);
        header.push_str(": ");
        plain.encode_iri(&mut header, &Iri::new(namespace))?;
        header.push_str(" .");
        header.push_str(&options.line_ending);
    }
    if !header.is_empty() {
        header.push_str(&options.line_ending);
        out.write_all(header.as_bytes())?;
    }
    Ok(())
}

struct CompactWriter<'e> {
    encoder: TermEncoder<'e>,
    structure: &'e Structure<'e>,
    options: &'e SerializationOptions,
}

impl<'e> CompactWriter<'e> {
    fn write_partition<W: Write>(
        &self,
        out: &mut W,
        context: Option<&'e Resource>,
        statements: &[&'e Statement],
    ) -> EncodeResult<()> {
        let line_ending = self.options.line_ending.as_str();
        let level = usize::from(context.is_some());

        if let Some(context) = context {
            let mut line = String::new();
            self.encoder.encode_resource(&mut line, context)?;
            line.push_str(" {");
            line.push_str(line_ending);
            out.write_all(line.as_bytes())?;
        }

        let blocks = if self.options.group_by_subject && self.options.use_compact_triples {
            self.grouped_blocks(statements)
        } else {
            self.flat_blocks(statements)
        };
        for (i, block) in blocks.into_iter().enumerate() {
            let mut text = String::new();
            if i > 0 && self.options.pretty_print {
                text.push_str(line_ending);
            }
            self.indent(&mut text, level);
            match block {
                Block::Subject(subject, stmts) => {
                    self.encoder.encode_resource(&mut text, subject)?;
                    text.push(' ');
                    self.encoder
                        .encode_property_list(&mut text, &stmts, level, &mut Guard::new())?;
                }
                Block::Root(subject) => {
                    let Resource::BlankNode(node) = subject else {
                        continue;
                    };
                    self.encoder
                        .encode_inline(&mut text, node, level, &mut Guard::new())?;
                }
                Block::Triple(st) => {
                    self.encoder.encode_resource(&mut text, &st.subject)?;
                    text.push(' ');
                    self.encoder.encode_predicate(&mut text, &st.predicate)?;
                    text.push(' ');
                    self.encoder
                        .encode_object(&mut text, &st.object, level, &mut Guard::new())?;
                }
            }
            text.push_str(" .");
            text.push_str(line_ending);
            out.write_all(text.as_bytes())?;
        }

        if context.is_some() {
            out.write_all(b"}")?;
            out.write_all(line_ending.as_bytes())?;
        }
        Ok(())
    }

    /// One block per written subject; consumed nodes other than roots are
    /// skipped because they appear inside another block.
    fn grouped_blocks(&self, statements: &[&'e Statement]) -> Vec<Block<'e>> {
        let mut subjects: IndexMap<&'e Resource, Vec<&'e Statement>> = IndexMap::new();
        for &st in statements {
            if self.skipped(&st.subject) {
                continue;
            }
            subjects.entry(&st.subject).or_default().push(st);
        }

        let mut blocks: Vec<_> = subjects
            .into_iter()
            .map(|(subject, stmts)| {
                if self.is_root(subject) {
                    Block::Root(subject)
                } else {
                    Block::Subject(subject, stmts)
                }
            })
            .collect();
        if self.options.sort_subjects {
            blocks.sort_by(|a, b| a.subject().string_value().cmp(b.subject().string_value()));
        }
        blocks
    }

    fn flat_blocks(&self, statements: &[&'e Statement]) -> Vec<Block<'e>> {
        let mut roots_written = IndexSet::new();
        let mut blocks = Vec::new();
        for &st in statements {
            if self.is_root(&st.subject) {
                if roots_written.insert(&st.subject) {
                    blocks.push(Block::Root(&st.subject));
                }
            } else if !self.skipped(&st.subject) {
                blocks.push(Block::Triple(st));
            }
        }
        blocks
    }

    fn skipped(&self, subject: &Resource) -> bool {
        subject
            .as_blank_node()
            .is_some_and(|node| self.structure.is_consumed(node) && !self.structure.is_root(node))
    }

    fn is_root(&self, subject: &Resource) -> bool {
        subject
            .as_blank_node()
            .is_some_and(|node| self.structure.is_root(node))
    }

    fn indent(&self, text: &mut String, level: usize) {
        if self.options.pretty_print {
            for _ in 0..level {
                text.push_str(&self.options.indent);
            }
        }
    }
}

enum Block<'e> {
    Subject(&'e Resource, Vec<&'e Statement>),
    Root(&'e Resource),
    Triple(&'e Statement),
}

impl<'e> Block<'e> {
    fn subject(&self) -> &'e Resource {
        match *self {
            Block::Subject(subject, _) | Block::Root(subject) => subject,
            Block::Triple(st) => &st.subject,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::{BlankNode, Literal};

    fn ex(local: &str) -> Iri {
        Iri::new(format!("http://ex.org/{local}"))
    }

    fn render(set: &StatementSet, format: Format, options: &SerializationOptions) -> String {
        let mut out = Vec::new();
        write(&mut out, set, format, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn minimal() -> SerializationOptions {
        SerializationOptions::turtle()
            .without_custom_prefixes()
            .with_prefix("ex", "http://ex.org/")
            .with_auto_declare_prefixes(false)
    }

    #[test]
    fn test_header_and_grouping() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), ex("p"), ex("o1")));
        set.insert(Statement::new(ex("s"), ex("p"), ex("o2")));
        set.insert(Statement::new(ex("s"), ex("q"), "v"));

        let text = render(&set, Format::Turtle, &minimal());
        assert_eq!(
            text,
            "@prefix ex: <http://ex.org/> .\n\nex:s ex:p ex:o1, ex:o2 ;\n  ex:q \"v\" .\n"
        );
    }

    #[test]
    fn test_flat_when_not_compact() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), ex("p"), ex("o1")));
        set.insert(Statement::new(ex("s"), ex("p"), ex("o2")));

        let options = minimal().with_compact_triples(false);
        let text = render(&set, Format::Turtle, &options);
        assert!(text.ends_with("ex:s ex:p ex:o1 .\n\nex:s ex:p ex:o2 .\n"));
    }

    #[test]
    fn test_long_object_lists_wrap() {
        let mut set = StatementSet::new();
        for i in 0..4 {
            set.insert(Statement::new(ex("s"), ex("p"), ex(&format!("object-number-{i}"))));
        }
        let options = minimal().with_max_line_length(40);
        let text = render(&set, Format::Turtle, &options);
        assert!(text.contains("ex:s ex:p ex:object-number-0,\n    ex:object-number-1,"));
    }

    #[test]
    fn test_root_blank_node_block() {
        let node = BlankNode::new("r");
        let mut set = StatementSet::new();
        set.insert(Statement::new(node.clone(), ex("p"), "a"));
        set.insert(Statement::new(node, ex("q"), "b"));

        let options = minimal().with_pretty_print(false);
        let text = render(&set, Format::Turtle, &options);
        assert!(text.ends_with("[ ex:p \"a\" ; ex:q \"b\" ] .\n"));
    }

    #[test]
    fn test_nested_inline_pretty() {
        let node = BlankNode::new("n");
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), ex("p"), node.clone()));
        set.insert(Statement::new(node.clone(), ex("q"), "a"));
        set.insert(Statement::new(node, ex("r"), "b"));

        let text = render(&set, Format::Turtle, &minimal());
        assert!(text.ends_with("ex:s ex:p [\n    ex:q \"a\" ;\n    ex:r \"b\"\n  ] .\n"));
    }

    #[test]
    fn test_auto_declared_prefixes() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(
            Iri::new("http://people.org/people/alice"),
            Iri::new("http://xmlns.com/foaf/0.1/age"),
            Literal::from(30),
        ));
        set.insert(Statement::new(
            Iri::new("http://people.org/people/alice"),
            Iri::new(vocab::RDF_TYPE),
            Iri::new("http://xmlns.com/foaf/0.1/Person"),
        ));
        let options = SerializationOptions::turtle().without_custom_prefixes();
        let text = render(&set, Format::Turtle, &options);
        assert!(text.starts_with(
            "@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n\
             @prefix people: <http://people.org/people/> .\n\
             @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .\n\n"
        ));
        assert!(text.contains("people:alice foaf:age \"30\"^^xsd:integer ;\n  a foaf:Person .\n"));
    }

    #[test]
    fn test_trig_partitions() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), ex("p"), ex("o")));
        set.insert(Statement::quad(ex("s"), ex("p"), ex("o2"), ex("g")));

        let options = SerializationOptions::trig()
            .without_custom_prefixes()
            .with_prefix("ex", "http://ex.org/")
            .with_auto_declare_prefixes(false);
        let text = render(&set, Format::TriG, &options);
        assert!(text.ends_with("ex:s ex:p ex:o .\n\nex:g {\n  ex:s ex:p ex:o2 .\n}\n"));
    }

    #[test]
    fn test_turtle_ignores_contexts() {
        let mut set = StatementSet::new();
        set.insert(Statement::quad(ex("s"), ex("p"), ex("o"), ex("g")));
        let text = render(&set, Format::Turtle, &minimal());
        assert!(!text.contains('{'));
        assert!(text.ends_with("ex:s ex:p ex:o .\n"));
    }

    #[test]
    fn test_invalid_custom_prefix() {
        let set = StatementSet::new();
        let options = SerializationOptions::turtle().with_prefix("1bad", "http://ex.org/");
        let mut out = Vec::new();
        let err = write(&mut out, &set, Format::Turtle, &options).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));
    }
}
