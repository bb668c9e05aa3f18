/// Builds an [`Iri`](crate::Iri) from a string expression.
///
/// ```rust
/// use rdf_text::iri;
///
/// assert_eq!(iri!("http://example.org/a").as_str(), "http://example.org/a");
/// ```
#[macro_export]
macro_rules! iri {
    ($value:expr) => {
        $crate::Iri::new($value)
    };
}

/// Builds a [`StatementSet`](crate::StatementSet) from triples and quads.
///
/// Each entry is `(subject, predicate, object)` or
/// `(subject, predicate, object, context)`; the parts accept anything the
/// [`Statement`](crate::Statement) constructors accept.
///
/// ```rust
/// use rdf_text::{graph, iri, BlankNode, Literal};
///
/// let set = graph! {
///     (iri!("http://ex.org/s"), iri!("http://ex.org/p"), "plain"),
///     (iri!("http://ex.org/s"), iri!("http://ex.org/p"), Literal::from(42)),
///     (BlankNode::new("b"), iri!("http://ex.org/p"), iri!("http://ex.org/o"), iri!("http://ex.org/g")),
/// };
/// assert_eq!(set.len(), 3);
/// ```
#[macro_export]
macro_rules! graph {
    (@statement $s:expr, $p:expr, $o:expr) => {
        $crate::Statement::new($s, $p, $o)
    };

    (@statement $s:expr, $p:expr, $o:expr, $g:expr) => {
        $crate::Statement::quad($s, $p, $o, $g)
    };

    () => {
        $crate::StatementSet::new()
    };

    ($( ( $s:expr, $p:expr, $o:expr $(, $g:expr)? ) ),+ $(,)?) => {{
        let mut set = $crate::StatementSet::new();
        $(
            set.insert($crate::graph!(@statement $s, $p, $o $(, $g)?));
        )+
        set
    }};
}
