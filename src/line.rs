//! N-Triples, N-Quads and canonical line output.
//!
//! One statement per line, `subject predicate object [context] .`, in
//! collection order. Nothing is grouped or abbreviated. The canonical format
//! additionally renames blank nodes by fingerprint and sorts the lines, so
//! two isomorphic inputs without blank node ambiguity produce identical text.

use crate::encoder::TermEncoder;
use crate::error::EncodeResult;
use crate::graph::StatementSet;
use crate::labels::BlankNodeLabels;
use crate::options::{Format, SerializationOptions};
use crate::term::Statement;
use std::cmp::Ordering;
use std::io::Write;

pub(crate) fn write<W: Write>(
    out: &mut W,
    statements: &StatementSet,
    format: Format,
    options: &SerializationOptions,
) -> EncodeResult<()> {
    let contexts = options.include_context && format != Format::NTriples;
    if !contexts && statements.has_contexts() {
        tracing::warn!(%format, "statement contexts dropped from line output");
    }

    if format == Format::Canonical {
        return write_canonical(out, statements, contexts, options);
    }

    let labels = if options.stable_blank_node_ids {
        BlankNodeLabels::stable(statements)
    } else {
        BlankNodeLabels::own()
    };
    let encoder = TermEncoder::line(options, &labels);
    let mut line = String::new();
    for st in statements {
        line.clear();
        encode_line(&encoder, &mut line, st, contexts, options)?;
        out.write_all(line.as_bytes())?;
    }

    tracing::debug!(%format, statements = statements.len(), "line serialization complete");
    Ok(())
}

fn write_canonical<W: Write>(
    out: &mut W,
    statements: &StatementSet,
    contexts: bool,
    options: &SerializationOptions,
) -> EncodeResult<()> {
    let labels = BlankNodeLabels::canonical(statements);
    let mut relabelled = StatementSet::with_capacity(statements.len());
    for st in statements {
        let context = match (&st.context, contexts) {
            (Some(context), true) => Some(labels.relabel_resource(context)?),
            _ => None,
        };
        relabelled.insert(Statement {
            subject: labels.relabel_resource(&st.subject)?,
            predicate: st.predicate.clone(),
            object: labels.relabel_term(&st.object)?,
            context,
        });
    }

    let mut sorted: Vec<&Statement> = relabelled.iter().collect();
    sorted.sort_by(|a, b| canonical_order(a, b));

    let own = BlankNodeLabels::own();
    let encoder = TermEncoder::line(options, &own);
    let mut line = String::new();
    for st in sorted {
        line.clear();
        encode_line(&encoder, &mut line, st, contexts, options)?;
        out.write_all(line.as_bytes())?;
    }

    tracing::debug!(statements = relabelled.len(), "canonical serialization complete");
    Ok(())
}

/// Orders by the string values of subject, predicate, object and context,
/// then by the full term forms.
fn canonical_order(a: &Statement, b: &Statement) -> Ordering {
    a.subject
        .string_value()
        .cmp(b.subject.string_value())
        .then_with(|| a.predicate.as_str().cmp(b.predicate.as_str()))
        .then_with(|| a.object.string_value().cmp(b.object.string_value()))
        .then_with(|| {
            let ctx_a = a.context.as_ref().map(|c| c.string_value());
            let ctx_b = b.context.as_ref().map(|c| c.string_value());
            ctx_a.cmp(&ctx_b)
        })
        .then_with(|| a.to_string().cmp(&b.to_string()))
}

fn encode_line(
    encoder: &TermEncoder<'_>,
    line: &mut String,
    st: &Statement,
    contexts: bool,
    options: &SerializationOptions,
) -> EncodeResult<()> {
    encoder.encode_resource(line, &st.subject)?;
    line.push(' ');
    encoder.encode_predicate(line, &st.predicate)?;
    line.push(' ');
    encoder.encode_term(line, &st.object)?;
    if let (Some(context), true) = (&st.context, contexts) {
        line.push(' ');
        encoder.encode_resource(line, context)?;
    }
    if options.trailing_dot {
        line.push_str(" .");
    }
    line.push_str(&options.line_ending);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::term::{BlankNode, Iri, Literal};
    use crate::vocab;

    fn ex(local: &str) -> Iri {
        Iri::new(format!("http://ex.org/{local}"))
    }

    fn render(set: &StatementSet, format: Format, options: &SerializationOptions) -> String {
        let mut out = Vec::new();
        write(&mut out, set, format, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_ntriples_lines() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), Iri::new(vocab::RDF_TYPE), ex("T")));
        set.insert(Statement::new(BlankNode::new("b1"), ex("p"), Literal::lang("hi", "en")));

        let text = render(&set, Format::NTriples, &SerializationOptions::ntriples());
        assert_eq!(
            text,
            "<http://ex.org/s> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://ex.org/T> .\n\
             _:b1 <http://ex.org/p> \"hi\"@en .\n"
        );
    }

    #[test]
    fn test_contexts_only_in_nquads() {
        let mut set = StatementSet::new();
        set.insert(Statement::quad(ex("s"), ex("p"), ex("o"), ex("g")));

        let nt = render(&set, Format::NTriples, &SerializationOptions::nquads());
        assert_eq!(nt, "<http://ex.org/s> <http://ex.org/p> <http://ex.org/o> .\n");

        let nq = render(&set, Format::NQuads, &SerializationOptions::nquads());
        assert_eq!(
            nq,
            "<http://ex.org/s> <http://ex.org/p> <http://ex.org/o> <http://ex.org/g> .\n"
        );
    }

    #[test]
    fn test_line_ending_and_trailing_dot() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("s"), ex("p"), "v"));
        let options = SerializationOptions::ntriples()
            .with_trailing_dot(false)
            .with_line_ending("\r\n");
        let text = render(&set, Format::NTriples, &options);
        assert_eq!(text, "<http://ex.org/s> <http://ex.org/p> \"v\"\r\n");
    }

    #[test]
    fn test_canonical_sorted_and_relabelled() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(ex("z"), ex("p"), BlankNode::new("x")));
        set.insert(Statement::new(BlankNode::new("x"), ex("p"), "é"));
        set.insert(Statement::new(ex("a"), ex("p"), "v"));

        let text = render(&set, Format::Canonical, &SerializationOptions::canonical());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "_:b0 <http://ex.org/p> \"\\u00E9\" .",
                "<http://ex.org/a> <http://ex.org/p> \"v\" .",
                "<http://ex.org/z> <http://ex.org/p> _:b0 .",
            ]
        );
    }

    #[test]
    fn test_invalid_blank_label_in_line_output() {
        let mut set = StatementSet::new();
        set.insert(Statement::new(BlankNode::new("bad label"), ex("p"), "v"));
        let mut out = Vec::new();
        let err = write(&mut out, &set, Format::NTriples, &SerializationOptions::ntriples()).unwrap_err();
        assert!(matches!(err, ErrorKind::InvalidData(_)));

        let options = SerializationOptions::ntriples().with_stable_blank_node_ids(true);
        let text = render(&set, Format::NTriples, &options);
        assert!(text.starts_with("_:b0 "));
    }
}
