//! Prefix and namespace bindings for compact IRI notation.
//!
//! A [`NamespaceBinding`] is a bijective table between prefix labels and
//! namespace IRIs. Each serializer call builds a fresh one from the custom
//! prefixes in the options and, when auto-declaration is on, from the
//! namespaces of the IRIs in the data.
//!
//! The first binding for a prefix or a namespace wins. A later attempt to
//! bind either side to a different counterpart is rejected and logged.
//!
//! ## Examples
//!
//! ```rust
//! use rdf_text::NamespaceBinding;
//!
//! let mut ns = NamespaceBinding::new();
//! assert!(ns.add_mapping("http://example.org/", "ex"));
//! // "ex" is taken by another namespace
//! assert!(!ns.add_mapping("http://other.org/", "ex"));
//!
//! assert_eq!(ns.prefixed_form("http://example.org/alice").as_deref(), Some("ex:alice"));
//! assert_eq!(ns.suggest("http://other.org/vocab#"), "vocab");
//! ```

use crate::options::PrefixOrdering;
use crate::vocab;
use indexmap::IndexMap;
use oxiri::Iri;
use std::collections::HashMap;

/// Bidirectional prefix to namespace table, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct NamespaceBinding {
    prefixes: IndexMap<String, String>,
    namespaces: HashMap<String, String>,
}

impl NamespaceBinding {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `prefix` to `namespace`.
    ///
    /// Returns `false`, leaving the table untouched, when either side is
    /// already bound to something else. Re-adding an identical pair succeeds.
    pub fn add_mapping(&mut self, namespace: &str, prefix: &str) -> bool {
        if let Some(existing) = self.namespaces.get(namespace) {
            if existing == prefix {
                return true;
            }
            tracing::warn!(
                namespace,
                prefix,
                existing = existing.as_str(),
                "namespace already bound to another prefix"
            );
            return false;
        }
        if let Some(existing) = self.prefixes.get(prefix) {
            tracing::warn!(
                namespace,
                prefix,
                existing = existing.as_str(),
                "prefix already bound to another namespace"
            );
            return false;
        }
        self.prefixes.insert(prefix.to_string(), namespace.to_string());
        self.namespaces.insert(namespace.to_string(), prefix.to_string());
        true
    }

    pub fn namespace_for(&self, prefix: &str) -> Option<&str> {
        self.prefixes.get(prefix).map(String::as_str)
    }

    pub fn prefix_for(&self, namespace: &str) -> Option<&str> {
        self.namespaces.get(namespace).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Iterates `(prefix, namespace)` pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.prefixes.iter().map(|(p, ns)| (p.as_str(), ns.as_str()))
    }

    /// Namespace part of an IRI: up to the last `#`, else up to the last `/`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rdf_text::NamespaceBinding;
    ///
    /// assert_eq!(NamespaceBinding::namespace_of("http://a.org/x/y#z"), Some("http://a.org/x/y#"));
    /// assert_eq!(NamespaceBinding::namespace_of("http://a.org/x/y"), Some("http://a.org/x/"));
    /// assert_eq!(NamespaceBinding::namespace_of("urn:isbn:123"), None);
    /// ```
    pub fn namespace_of(iri: &str) -> Option<&str> {
        let end = iri.rfind('#').or_else(|| iri.rfind('/'))?;
        Some(&iri[..=end])
    }

    /// Proposes a prefix for `namespace` that is not bound to anything else.
    ///
    /// Returns the existing prefix when the namespace is already bound.
    pub fn suggest(&self, namespace: &str) -> String {
        if let Some(prefix) = self.prefix_for(namespace) {
            return prefix.to_string();
        }

        let base = well_known_prefix(namespace)
            .map(str::to_string)
            .unwrap_or_else(|| candidate_prefix(namespace));

        let mut candidate = base.clone();
        let mut counter = 1;
        while self.prefixes.contains_key(&candidate) {
            candidate = format!("{base}{counter}");
            counter += 1;
        }
        candidate
    }

    /// Compact `prefix:local` form of `iri`, if one exists.
    ///
    /// The longest bound namespace that starts the IRI is used. The local
    /// part must be a legal Turtle local name.
    pub fn prefixed_form(&self, iri: &str) -> Option<String> {
        let (prefix, namespace) = self
            .prefixes
            .iter()
            .filter(|(prefix, ns)| {
                iri.starts_with(ns.as_str()) && !(prefix.is_empty() && iri.len() == ns.len())
            })
            .max_by_key(|(_, ns)| ns.len())?;

        let local = &iri[namespace.len()..];
        if !local.is_empty() && !is_valid_local_name(local) {
            return None;
        }
        Some(format!("{prefix}:{local}"))
    }

    /// Bindings in declaration order.
    pub fn declarations(&self, ordering: PrefixOrdering) -> Vec<(&str, &str)> {
        let mut decls: Vec<_> = self.iter().collect();
        if ordering == PrefixOrdering::Alphabetical {
            decls.sort_by(|a, b| a.0.cmp(b.0));
        }
        decls
    }
}

fn well_known_prefix(namespace: &str) -> Option<&'static str> {
    vocab::WELL_KNOWN_PREFIXES
        .iter()
        .find(|(_, ns)| *ns == namespace)
        .map(|(prefix, _)| *prefix)
}

fn candidate_prefix(namespace: &str) -> String {
    let trimmed = namespace.trim_end_matches(['#', '/']);
    let segment = match trimmed.rfind(['/', '#']) {
        // "scheme://host" has no path segment
        Some(pos) if trimmed[..pos].ends_with('/') => "",
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    };

    let mut candidate = clean_label(segment);
    if candidate.is_empty() {
        candidate = host_of(namespace).map(|host| host_label(&host)).unwrap_or_default();
    }
    if candidate.is_empty() {
        return "p".to_string();
    }
    if !candidate.starts_with(|c: char| c.is_ascii_alphabetic()) {
        candidate.insert(0, 'p');
    }
    candidate
}

fn clean_label(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Host name without `www.` and without the top-level domain.
fn host_label(host: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let labels: Vec<&str> = host.split('.').collect();
    let kept = if labels.len() > 1 {
        &labels[..labels.len() - 1]
    } else {
        &labels[..]
    };
    clean_label(&kept.concat())
}

fn host_of(namespace: &str) -> Option<String> {
    let iri = Iri::parse(namespace).ok()?;
    let authority = iri.authority()?;
    let host = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = match host.strip_prefix('[') {
        Some(literal) => literal.split_once(']').map_or(literal, |(h, _)| h),
        None => host.split_once(':').map_or(host, |(h, _)| h),
    };
    Some(host.to_string())
}

/// Checks a Turtle `PN_PREFIX` label. The empty label is allowed.
///
/// # Examples
///
/// ```rust
/// use rdf_text::namespace::is_valid_prefix_label;
///
/// assert!(is_valid_prefix_label(""));
/// assert!(is_valid_prefix_label("ex2"));
/// assert!(!is_valid_prefix_label("2ex"));
/// assert!(!is_valid_prefix_label("ex."));
/// assert!(!is_valid_prefix_label("ex\u{B2}"));
/// ```
pub fn is_valid_prefix_label(label: &str) -> bool {
    let mut chars = label.chars();
    match chars.next() {
        None => return true,
        Some(c) if !is_pn_chars_base(c) => return false,
        Some(_) => {}
    }
    !label.ends_with('.') && chars.all(|c| is_pn_chars(c) || c == '.')
}

/// Checks a Turtle `PN_LOCAL` name without escapes.
pub(crate) fn is_valid_local_name(local: &str) -> bool {
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(is_pn_chars_u(first) || first == ':' || first.is_ascii_digit()) || local.ends_with('.') {
        return false;
    }
    chars.all(|c| is_pn_chars(c) || matches!(c, '.' | ':'))
}

/// `PN_CHARS_BASE` of the Turtle grammar.
pub(crate) fn is_pn_chars_base(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{02FF}'
        | '\u{0370}'..='\u{037D}'
        | '\u{037F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}'
    )
}

pub(crate) fn is_pn_chars_u(c: char) -> bool {
    is_pn_chars_base(c) || c == '_'
}

pub(crate) fn is_pn_chars(c: char) -> bool {
    is_pn_chars_u(c)
        || c == '-'
        || c.is_ascii_digit()
        || matches!(c, '\u{00B7}' | '\u{0300}'..='\u{036F}' | '\u{203F}'..='\u{2040}')
}
