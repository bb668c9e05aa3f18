//! Blank node label assignment.
//!
//! Labels are chosen once per call, before anything is written:
//!
//! - by default a node keeps its own id
//! - with `stable_blank_node_ids` nodes are renamed `b0, b1, …` in order of
//!   first appearance (subject, object, then context of each statement)
//! - the canonical format renames nodes `b0, b1, …` in order of a
//!   label-independent fingerprint, so the output only depends on the graph

use crate::error::{EncodeResult, ErrorKind};
use crate::graph::StatementSet;
use crate::namespace::{is_pn_chars, is_pn_chars_u};
use crate::term::{BlankNode, Resource, Statement, Term};
use indexmap::IndexSet;
use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Default)]
pub struct BlankNodeLabels<'a> {
    assigned: HashMap<&'a BlankNode, String>,
}

impl<'a> BlankNodeLabels<'a> {
    /// Every node keeps its own id.
    pub fn own() -> Self {
        Self::default()
    }

    /// Renames nodes `b0, b1, …` in order of first appearance.
    pub fn stable(statements: &'a StatementSet) -> Self {
        Self::numbered(blank_nodes(statements))
    }

    /// Renames nodes by sorted fingerprint.
    ///
    /// A node's fingerprint is the sorted list of the statements mentioning
    /// it, with the node itself and any other blank node masked. Ties fall
    /// back to the node's own id.
    pub fn canonical(statements: &'a StatementSet) -> Self {
        let mut mentions: HashMap<&'a BlankNode, Vec<&'a Statement>> = HashMap::new();
        for st in statements {
            let mut seen = IndexSet::new();
            seen.extend(blank_nodes_of(st));
            for node in seen {
                mentions.entry(node).or_default().push(st);
            }
        }

        let mut keyed: Vec<(String, &'a BlankNode)> = mentions
            .into_iter()
            .map(|(node, stmts)| (fingerprint(node, &stmts), node))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.id().cmp(b.1.id())));

        Self::numbered(keyed.into_iter().map(|(_, node)| node))
    }

    fn numbered(nodes: impl IntoIterator<Item = &'a BlankNode>) -> Self {
        let assigned = nodes
            .into_iter()
            .enumerate()
            .map(|(idx, node)| (node, format!("b{idx}")))
            .collect();
        BlankNodeLabels { assigned }
    }

    /// Label written for `node`, without the `_:` prefix.
    pub fn label<'s>(&'s self, node: &'s BlankNode) -> EncodeResult<&'s str> {
        if let Some(label) = self.assigned.get(node) {
            return Ok(label);
        }
        if is_valid_blank_node_label(node.id()) {
            Ok(node.id())
        } else {
            Err(ErrorKind::invalid_data(format!(
                "'{}' is not a valid blank node label",
                node.id()
            )))
        }
    }

    /// Returns the node as written, with assigned labels substituted.
    pub(crate) fn relabel_term(&self, term: &Term) -> EncodeResult<Term> {
        match term {
            Term::BlankNode(node) => Ok(BlankNode::new(self.label(node)?).into()),
            other => Ok(other.clone()),
        }
    }

    pub(crate) fn relabel_resource(&self, resource: &Resource) -> EncodeResult<Resource> {
        match resource {
            Resource::BlankNode(node) => Ok(BlankNode::new(self.label(node)?).into()),
            other => Ok(other.clone()),
        }
    }
}

fn blank_nodes_of(st: &Statement) -> impl Iterator<Item = &BlankNode> {
    let subject = st.subject.as_blank_node();
    let object = st.object.as_blank_node();
    let context = st.context.as_ref().and_then(Resource::as_blank_node);
    subject.into_iter().chain(object).chain(context)
}

fn blank_nodes(statements: &StatementSet) -> IndexSet<&BlankNode> {
    statements.iter().flat_map(blank_nodes_of).collect()
}

fn fingerprint(node: &BlankNode, statements: &[&Statement]) -> String {
    let mut forms: Vec<String> = statements
        .iter()
        .map(|st| {
            let mut form = String::new();
            let _ = write!(
                form,
                "{} <{}> {}",
                masked(&Term::from(st.subject.clone()), node),
                st.predicate.as_str(),
                masked(&st.object, node)
            );
            if let Some(context) = &st.context {
                let _ = write!(form, " {}", masked(&Term::from(context.clone()), node));
            }
            form
        })
        .collect();
    forms.sort();
    forms.join("|")
}

fn masked(term: &Term, node: &BlankNode) -> String {
    match term {
        Term::BlankNode(b) if b == node => "_:self".to_string(),
        Term::BlankNode(_) => "_:other".to_string(),
        other => other.to_string(),
    }
}

/// Checks a `BLANK_NODE_LABEL` (without the `_:` prefix).
pub(crate) fn is_valid_blank_node_label(label: &str) -> bool {
    let mut chars = label.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(is_pn_chars_u(first) || first.is_ascii_digit()) || label.ends_with('.') {
        return false;
    }
    chars.all(|c| is_pn_chars(c) || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Iri;

    fn p() -> Iri {
        Iri::new("http://ex/p")
    }

    #[test]
    fn test_own_labels_are_validated() {
        let labels = BlankNodeLabels::own();
        let good = BlankNode::new("node_1");
        let bad = BlankNode::new("has space");
        assert_eq!(labels.label(&good).unwrap(), "node_1");
        assert!(matches!(labels.label(&bad), Err(ErrorKind::InvalidData(_))));
    }

    #[test]
    fn test_stable_labels_follow_first_appearance() {
        let (x, y) = (BlankNode::new("x"), BlankNode::new("y"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(y.clone(), p(), x.clone()));
        set.insert(Statement::new(x.clone(), p(), "v"));

        let labels = BlankNodeLabels::stable(&set);
        assert_eq!(labels.label(&y).unwrap(), "b0");
        assert_eq!(labels.label(&x).unwrap(), "b1");
    }

    #[test]
    fn test_canonical_labels_ignore_input_ids() {
        let build = |a: &str, b: &str| {
            let (na, nb) = (BlankNode::new(a), BlankNode::new(b));
            let mut set = StatementSet::new();
            set.insert(Statement::new(na.clone(), p(), "first"));
            set.insert(Statement::new(nb.clone(), p(), "second"));
            (set, na, nb)
        };

        let (set1, a1, _) = build("zzz", "aaa");
        let (set2, a2, _) = build("aaa", "zzz");
        let labels1 = BlankNodeLabels::canonical(&set1);
        let labels2 = BlankNodeLabels::canonical(&set2);
        assert_eq!(labels1.label(&a1).unwrap(), labels2.label(&a2).unwrap());
    }

    #[test]
    fn test_label_syntax() {
        assert!(is_valid_blank_node_label("0abc"));
        assert!(is_valid_blank_node_label("a.b-c"));
        assert!(!is_valid_blank_node_label(""));
        assert!(!is_valid_blank_node_label("-a"));
        assert!(!is_valid_blank_node_label("a."));
        assert!(!is_valid_blank_node_label("a\u{B2}"));
        assert!(is_valid_blank_node_label("n\u{B7}1"));
    }
}
