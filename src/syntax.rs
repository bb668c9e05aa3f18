//! Output syntax reference
//!
//! This module documents the text this library writes for each format.
//!
//! # Overview
//!
//! Two families of syntax are supported:
//!
//! - **Compact** (Turtle, TriG): prefixed names, grouping, collections and
//!   anonymous blank nodes make the output short and readable
//! - **Line-based** (N-Triples, N-Quads, canonical): one complete statement
//!   per line, trivially splittable and diffable
//!
//! # Compact Syntax
//!
//! ## Header
//!
//! An optional base and the prefix declarations come first, followed by a
//! blank line:
//!
//! ```text
//! @base <http://example.org/> .
//! @prefix ex: <http://example.org/> .
//! @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
//!
//! ```
//!
//! Declarations are sorted by prefix, or kept in binding order with
//! `PrefixOrdering::UsageOrder`. A suggested prefix is the last path segment
//! of the namespace (`http://example.org/people/` gives `people`), falling
//! back to the host name without its top-level domain (`http://example.org/`
//! gives `example`) and finally to `p`. Clashes get a numeric suffix.
//!
//! ## Subject Blocks
//!
//! | Construct | Syntax | Example |
//! |-----------|--------|---------|
//! | Further predicates | `;` | `ex:s ex:p 1 ; ex:q 2 .` |
//! | Further objects | `,` | `ex:s ex:p 1, 2 .` |
//! | `rdf:type` | `a` | `ex:s a ex:Person .` |
//! | Collection | `( … )` | `ex:s ex:p ( 1 2 3 ) .` |
//! | Empty collection | `()` | `ex:s ex:p () .` |
//! | Anonymous node | `[ … ]` | `ex:s ex:p [ ex:q 1 ] .` |
//! | Unreferenced anonymous node | `[ … ] .` | `[ ex:q 1 ] .` |
//!
//! With pretty printing, further predicates start a new line one indent
//! deeper and further objects wrap two indents deeper once the line would
//! exceed `max_line_length`:
//!
//! ```text
//! ex:alice a foaf:Person ;
//!   foaf:knows ex:bob, ex:carol,
//!     ex:dave ;
//!   foaf:address [
//!       ex:city "Paris" ;
//!       ex:zip "75001"
//!     ] .
//! ```
//!
//! ## When Blank Nodes Are Rewritten
//!
//! A list is written as `( … )` only if every cell has exactly an
//! `rdf:first` and an `rdf:rest`, the chain ends in `rdf:nil`, the head is
//! the object of exactly one statement and no other cell is referenced from
//! elsewhere.
//!
//! A blank node is written as `[ … ]` only if it is the object of at most one
//! statement and does not name a graph. Nodes used more than once keep their
//! `_:label`. Cycles of anonymous nodes are cut by writing their first node
//! under its label.
//!
//! ## Named Graphs (TriG)
//!
//! Statements are partitioned by context. The default graph is written
//! bare, every named graph is wrapped:
//!
//! ```text
//! ex:g {
//!   ex:s ex:p ex:o .
//! }
//! ```
//!
//! Turtle output ignores contexts.
//!
//! # Line Syntax
//!
//! ```text
//! <http://example.org/s> <http://example.org/p> "v"@en <http://example.org/g> .
//! ```
//!
//! The context is present only for N-Quads and canonical output. The
//! trailing ` .` and the line ending are configurable.
//!
//! The canonical format renames blank nodes `_:b0`, `_:b1`, … by a
//! fingerprint of the statements that mention them, sorts the lines, and
//! escapes all non-ASCII characters.
//!
//! # Terms
//!
//! ## IRIs
//!
//! Written as `<…>`, or as `prefix:local` in compact output when a bound
//! namespace matches and the local part is a legal local name. The
//! characters `<>"{}|^` `` ` `` `\` and control characters are written as
//! `\uXXXX`. In strict mode with URI validation an IRI containing a space,
//! `"`, `<` or `>` is an error.
//!
//! ## Literals
//!
//! | Literal | Written as |
//! |---------|------------|
//! | `xsd:string` | `"text"` (or `"text"^^xsd:string` with `AlwaysTyped`) |
//! | language-tagged | `"chat"@fr` |
//! | other datatypes | `"42"^^xsd:integer` |
//! | multi-line (compact) | `"""first⏎second"""` |
//!
//! Short strings escape `\n \r \t \b \f \" \\`. In strict mode a language
//! tag requires the datatype `rdf:langString` and vice versa.
//!
//! ## Blank Nodes
//!
//! `_:label`, using the node's own id unless stable or canonical labels
//! are requested.

// This module contains only documentation; no implementation code
