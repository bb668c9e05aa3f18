//! Structural analysis of blank nodes for the compact syntaxes.
//!
//! Turtle and TriG can write some blank nodes without a label: an RDF
//! collection as `( a b c )` and a node used exactly once as `[ p o ]`.
//! [`analyze`] decides, once per serialization call, which blank nodes are
//! *consumed* by such a rewrite.
//!
//! The decisions are conservative. A blank node is only consumed when the
//! rewritten document denotes the same graph:
//!
//! - a list head is referenced exactly once, and every other cell only by
//!   its predecessor's `rdf:rest`
//! - an inline node is referenced at most once and never names a graph
//! - with named graphs, a rewrite never crosses a graph boundary
//! - consumed nodes that only reach each other through references (a cycle
//!   with no named entry point) get their first node released
//!
//! A consumed node that nothing references is a *root*: the compact writer
//! emits it as a standalone `[ … ] .` block.

use crate::graph::StatementSet;
use crate::options::{BlankNodeStyle, SerializationOptions};
use crate::term::{BlankNode, Resource, Statement, Term};
use crate::vocab;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default)]
struct List<'a> {
    cells: Vec<&'a BlankNode>,
    items: Vec<&'a Term>,
}

/// Result of [`analyze`]: consumed blank nodes plus the indexes the writers
/// need to expand them.
#[derive(Debug, Default)]
pub struct Structure<'a> {
    by_subject: IndexMap<&'a Resource, Vec<&'a Statement>>,
    blank_index: HashMap<&'a BlankNode, usize>,
    references: HashMap<&'a BlankNode, Vec<&'a Statement>>,
    context_nodes: HashSet<&'a BlankNode>,
    lists: IndexMap<&'a BlankNode, List<'a>>,
    cell_heads: HashMap<&'a BlankNode, &'a BlankNode>,
    inline: IndexSet<&'a BlankNode>,
    roots: IndexSet<&'a BlankNode>,
}

/// Finds the blank nodes that can be written as collections or inline
/// `[ … ]` blocks.
///
/// Collections are only detected when `use_collections` is on, inline nodes
/// only with [`BlankNodeStyle::Anonymous`]. Contexts are significant when
/// `include_context` is on.
///
/// # Examples
///
/// ```rust
/// use rdf_text::analyzer::analyze;
/// use rdf_text::{BlankNode, Iri, SerializationOptions, Statement, StatementSet};
///
/// let node = BlankNode::new("n");
/// let mut set = StatementSet::new();
/// set.insert(Statement::new(Iri::new("http://ex/s"), Iri::new("http://ex/p"), node.clone()));
/// set.insert(Statement::new(node.clone(), Iri::new("http://ex/q"), "v"));
///
/// let structure = analyze(&set, &SerializationOptions::turtle());
/// assert!(structure.is_inline(&node));
/// assert!(!structure.is_root(&node));
/// ```
pub fn analyze<'a>(statements: &'a StatementSet, options: &SerializationOptions) -> Structure<'a> {
    let mut structure = Structure::index(statements);
    let contexts = options.include_context;

    if options.use_collections {
        structure.detect_lists(contexts);
    }
    if options.blank_node_style == BlankNodeStyle::Anonymous {
        structure.detect_inline(contexts);
    }
    structure.break_cycles();

    tracing::debug!(
        statements = statements.len(),
        lists = structure.lists.len(),
        inline = structure.inline.len(),
        roots = structure.roots.len(),
        "structural analysis complete"
    );
    structure
}

impl<'a> Structure<'a> {
    fn index(statements: &'a StatementSet) -> Self {
        let mut structure = Structure::default();
        for st in statements {
            structure.by_subject.entry(&st.subject).or_default().push(st);
            if let Term::BlankNode(node) = &st.object {
                structure.references.entry(node).or_default().push(st);
            }
            if let Some(Resource::BlankNode(node)) = &st.context {
                structure.context_nodes.insert(node);
            }
        }
        for (idx, subject) in structure.by_subject.keys().copied().enumerate() {
            if let Resource::BlankNode(node) = subject {
                structure.blank_index.insert(node, idx);
            }
        }
        structure
    }

    fn blank_subjects(&self) -> Vec<&'a BlankNode> {
        self.by_subject
            .keys()
            .copied()
            .filter_map(Resource::as_blank_node)
            .collect()
    }

    fn detect_lists(&mut self, contexts: bool) {
        for head in self.blank_subjects() {
            if self.cell_heads.contains_key(head) {
                continue;
            }
            if let Some(list) = self.trace_list(head, contexts) {
                for &cell in &list.cells {
                    self.cell_heads.insert(cell, head);
                }
                self.lists.insert(head, list);
            }
        }
    }

    fn trace_list(&self, head: &'a BlankNode, contexts: bool) -> Option<List<'a>> {
        let head_refs = self.references_to(head);
        if head_refs.len() != 1 || is_rest(head_refs[0]) {
            return None;
        }
        let context = head_refs[0].context.as_ref();

        let mut list = List::default();
        let mut visited = HashSet::new();
        let mut node = head;
        loop {
            if !visited.insert(node) || self.context_nodes.contains(node) {
                return None;
            }
            if node != head && self.references_to(node).len() != 1 {
                return None;
            }

            let stmts = self.statements_about(node);
            if stmts.len() != 2 {
                return None;
            }
            if contexts && stmts.iter().any(|st| st.context.as_ref() != context) {
                return None;
            }
            let first: &'a Statement = stmts.iter().copied().find(|st| is_first(st))?;
            let rest: &'a Statement = stmts.iter().copied().find(|st| is_rest(st))?;

            list.cells.push(node);
            list.items.push(&first.object);

            match &rest.object {
                Term::Iri(iri) if iri.as_str() == vocab::RDF_NIL => return Some(list),
                Term::BlankNode(next) => node = next,
                _ => return None,
            }
        }
    }

    fn detect_inline(&mut self, contexts: bool) {
        for node in self.blank_subjects() {
            if self.cell_heads.contains_key(node) || self.context_nodes.contains(node) {
                continue;
            }
            let stmts = self.statements_about(node);
            if stmts.iter().any(|st| is_first(st) || is_rest(st)) {
                continue;
            }
            let refs = self.references_to(node);
            // inlining at every reference would split one node into several
            if refs.len() > 1 {
                continue;
            }
            if contexts {
                let context = stmts.first().and_then(|st| st.context.as_ref());
                let mixed = stmts
                    .iter()
                    .chain(refs.iter())
                    .any(|st| st.context.as_ref() != context);
                if mixed {
                    continue;
                }
            }

            let is_root = refs.is_empty();
            if is_root {
                self.roots.insert(node);
            }
            self.inline.insert(node);
        }
    }

    fn break_cycles(&mut self) {
        while let Some(node) = self.find_orphan_cycle() {
            tracing::debug!(node = node.id(), "releasing blank node from reference cycle");
            if let Some(list) = self.lists.shift_remove(node) {
                for cell in list.cells {
                    self.cell_heads.remove(cell);
                }
            }
            self.inline.shift_remove(node);
        }
    }

    /// A consumed unit (list head or inline node) whose chain of parents
    /// loops back without reaching a written subject.
    fn find_orphan_cycle(&self) -> Option<&'a BlankNode> {
        let units = self.lists.keys().chain(self.inline.iter()).copied();
        for start in units {
            let mut path: Vec<&'a BlankNode> = Vec::new();
            let mut current = Some(start);
            while let Some(unit) = current {
                if let Some(pos) = path.iter().position(|seen| *seen == unit) {
                    return path[pos..]
                        .iter()
                        .copied()
                        .min_by_key(|node| self.subject_order(node));
                }
                path.push(unit);
                current = self.parent_unit(unit);
            }
        }
        None
    }

    fn parent_unit(&self, unit: &BlankNode) -> Option<&'a BlankNode> {
        let reference: &'a Statement = self.references_to(unit).first().copied()?;
        let parent = reference.subject.as_blank_node()?;
        if let Some(head) = self.cell_heads.get(parent) {
            return Some(*head);
        }
        self.inline.get(parent).copied()
    }

    fn subject_order(&self, node: &BlankNode) -> usize {
        self.blank_index.get(node).copied().unwrap_or(usize::MAX)
    }

    fn references_to(&self, node: &BlankNode) -> &[&'a Statement] {
        self.references.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Statements whose subject is `node`, in collection order.
    pub fn statements_about(&self, node: &BlankNode) -> &[&'a Statement] {
        self.blank_index
            .get(node)
            .and_then(|&idx| self.by_subject.get_index(idx))
            .map(|(_, stmts)| stmts.as_slice())
            .unwrap_or(&[])
    }

    /// Returns true if `node` is written as part of a collection or an
    /// inline block instead of under its label.
    pub fn is_consumed(&self, node: &BlankNode) -> bool {
        self.cell_heads.contains_key(node) || self.inline.contains(node)
    }

    /// Items of the collection headed by `node`.
    pub fn list_items(&self, node: &BlankNode) -> Option<&[&'a Term]> {
        self.lists.get(node).map(|list| list.items.as_slice())
    }

    pub fn is_inline(&self, node: &BlankNode) -> bool {
        self.inline.contains(node)
    }

    /// Returns true for inline nodes nothing refers to.
    pub fn is_root(&self, node: &BlankNode) -> bool {
        self.roots.contains(node) && self.inline.contains(node)
    }

    /// Every consumed blank node, list cells first.
    pub fn consumed(&self) -> impl Iterator<Item = &'a BlankNode> + '_ {
        self.cell_heads.keys().chain(self.inline.iter()).copied()
    }
}

fn is_first(st: &Statement) -> bool {
    st.predicate.as_str() == vocab::RDF_FIRST
}

fn is_rest(st: &Statement) -> bool {
    st.predicate.as_str() == vocab::RDF_REST
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::SerializationOptions;
    use crate::term::{Iri, Literal};

    fn iri(local: &str) -> Iri {
        Iri::new(format!("http://ex.org/{local}"))
    }

    fn first() -> Iri {
        Iri::new(vocab::RDF_FIRST)
    }

    fn rest() -> Iri {
        Iri::new(vocab::RDF_REST)
    }

    fn nil() -> Iri {
        Iri::new(vocab::RDF_NIL)
    }

    fn two_item_list(head: &BlankNode, tail: &BlankNode) -> Vec<Statement> {
        vec![
            Statement::new(head.clone(), first(), "x"),
            Statement::new(head.clone(), rest(), tail.clone()),
            Statement::new(tail.clone(), first(), "y"),
            Statement::new(tail.clone(), rest(), nil()),
        ]
    }

    #[test]
    fn test_detects_list() {
        let (l1, l2) = (BlankNode::new("l1"), BlankNode::new("l2"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), l1.clone()));
        set.extend(two_item_list(&l1, &l2));

        let structure = analyze(&set, &SerializationOptions::turtle());
        let items: Vec<_> = structure
            .list_items(&l1)
            .unwrap()
            .iter()
            .map(|t| t.string_value())
            .collect();
        assert_eq!(items, vec!["x", "y"]);
        assert!(structure.is_consumed(&l1));
        assert!(structure.is_consumed(&l2));
        assert_eq!(structure.consumed().count(), 2);
    }

    #[test]
    fn test_list_referenced_twice_is_kept_flat() {
        let (l1, l2) = (BlankNode::new("l1"), BlankNode::new("l2"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), l1.clone()));
        set.insert(Statement::new(iri("t"), iri("p"), l1.clone()));
        set.extend(two_item_list(&l1, &l2));

        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(structure.list_items(&l1).is_none());
        assert_eq!(structure.consumed().count(), 0);
    }

    #[test]
    fn test_list_with_extra_statement_or_bad_tail() {
        let (l1, l2) = (BlankNode::new("l1"), BlankNode::new("l2"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), l1.clone()));
        set.extend(two_item_list(&l1, &l2));
        set.insert(Statement::new(l2.clone(), iri("note"), "extra"));
        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(structure.list_items(&l1).is_none());

        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), l1.clone()));
        set.insert(Statement::new(l1.clone(), first(), "x"));
        set.insert(Statement::new(l1.clone(), rest(), iri("not-nil")));
        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(structure.list_items(&l1).is_none());
    }

    #[test]
    fn test_list_cells_are_never_inlined() {
        let (l1, l2) = (BlankNode::new("l1"), BlankNode::new("l2"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), l1.clone()));
        set.extend(two_item_list(&l1, &l2));

        let options = SerializationOptions::turtle().with_collections(false);
        let structure = analyze(&set, &options);
        assert_eq!(structure.consumed().count(), 0);
    }

    #[test]
    fn test_inline_reference_counts() {
        let (once, twice, root) = (BlankNode::new("a"), BlankNode::new("b"), BlankNode::new("c"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), once.clone()));
        set.insert(Statement::new(once.clone(), iri("q"), "1"));
        set.insert(Statement::new(iri("s"), iri("p"), twice.clone()));
        set.insert(Statement::new(iri("t"), iri("p"), twice.clone()));
        set.insert(Statement::new(twice.clone(), iri("q"), "2"));
        set.insert(Statement::new(root.clone(), iri("q"), "3"));

        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(structure.is_inline(&once));
        assert!(!structure.is_root(&once));
        assert!(!structure.is_consumed(&twice));
        assert!(structure.is_root(&root));
    }

    #[test]
    fn test_named_style_disables_inline() {
        let node = BlankNode::new("a");
        let mut set = StatementSet::new();
        set.insert(Statement::new(iri("s"), iri("p"), node.clone()));
        set.insert(Statement::new(node.clone(), iri("q"), Literal::from(1)));

        let structure = analyze(&set, &SerializationOptions::trig());
        assert!(!structure.is_consumed(&node));
    }

    #[test]
    fn test_mutual_cycle_releases_first_node() {
        let (a, b) = (BlankNode::new("a"), BlankNode::new("b"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(a.clone(), iri("p"), b.clone()));
        set.insert(Statement::new(b.clone(), iri("p"), a.clone()));

        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(!structure.is_consumed(&a));
        assert!(structure.is_inline(&b));
    }

    #[test]
    fn test_self_reference_is_released() {
        let a = BlankNode::new("a");
        let mut set = StatementSet::new();
        set.insert(Statement::new(a.clone(), iri("p"), a.clone()));

        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(!structure.is_consumed(&a));
    }

    #[test]
    fn test_list_reached_only_through_its_item_is_released() {
        let (h, x) = (BlankNode::new("h"), BlankNode::new("x"));
        let mut set = StatementSet::new();
        set.insert(Statement::new(h.clone(), first(), x.clone()));
        set.insert(Statement::new(h.clone(), rest(), nil()));
        set.insert(Statement::new(x.clone(), iri("p"), h.clone()));

        let structure = analyze(&set, &SerializationOptions::turtle());
        assert!(structure.list_items(&h).is_none());
        assert!(!structure.is_consumed(&h));
        assert!(structure.is_inline(&x));
    }

    #[test]
    fn test_contexts_block_cross_graph_inlining() {
        let node = BlankNode::new("n");
        let g = iri("g");
        let mut set = StatementSet::new();
        set.insert(Statement::quad(iri("s"), iri("p"), node.clone(), g.clone()));
        set.insert(Statement::new(node.clone(), iri("q"), "v"));

        let options = SerializationOptions::trig().with_blank_node_style(BlankNodeStyle::Anonymous);
        let structure = analyze(&set, &options);
        assert!(!structure.is_consumed(&node));

        let mut set = StatementSet::new();
        set.insert(Statement::quad(iri("s"), iri("p"), node.clone(), g.clone()));
        set.insert(Statement::quad(node.clone(), iri("q"), "v", g));
        let structure = analyze(&set, &options);
        assert!(structure.is_inline(&node));
    }

    #[test]
    fn test_context_node_is_not_inlined() {
        let g = BlankNode::new("g");
        let mut set = StatementSet::new();
        set.insert(Statement::new(g.clone(), iri("label"), "graph"));
        set.insert(Statement::quad(iri("s"), iri("p"), iri("o"), g.clone()));

        let options = SerializationOptions::trig().with_blank_node_style(BlankNodeStyle::Anonymous);
        let structure = analyze(&set, &options);
        assert!(!structure.is_consumed(&g));
    }
}
