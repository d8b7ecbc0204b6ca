//! Namespace Scopes
//!
//! Prefix -> URI bindings as a flat stack plus one mark per open element.
//! Leaving an element truncates the stack back to its mark; lookups scan
//! from the innermost binding outwards.
//!
//! The base layer below every element holds `xml`, `xmlns` and any session
//! bindings (the configured `cim`/`rdf` prefixes). Documents shadow them with
//! their own declarations; fragments without declarations fall back to them.
//! All ids are string-pool ids; the default namespace uses prefix id 0.

use super::strings::StringPool;

/// URIs bound to the reserved prefixes
pub mod ns {
    pub const XML: &[u8] = b"http://www.w3.org/XML/1998/namespace";
    pub const XMLNS: &[u8] = b"http://www.w3.org/2000/xmlns/";
}

/// Namespace bindings visible at the current point of a parse
#[derive(Debug)]
pub struct NamespaceResolver {
    /// (prefix id, URI id), innermost last
    bindings: Vec<(u32, u32)>,
    /// `bindings.len()` when each open element was entered
    marks: Vec<usize>,
    /// `xml` and `xmlns` prefix ids
    reserved: [u32; 2],
}

impl NamespaceResolver {
    pub fn new(strings: &mut StringPool) -> Self {
        let reserved = [strings.intern(b"xml"), strings.intern(b"xmlns")];
        let bindings = vec![
            (reserved[0], strings.intern(ns::XML)),
            (reserved[1], strings.intern(ns::XMLNS)),
        ];
        NamespaceResolver {
            bindings,
            marks: Vec::new(),
            reserved,
        }
    }

    /// Add a session binding to the base layer
    pub fn predeclare(&mut self, prefix_id: u32, uri_id: u32) {
        debug_assert!(self.marks.is_empty(), "predeclare before entering any element");
        self.declare(prefix_id, uri_id);
    }

    #[inline]
    pub fn push_scope(&mut self) {
        self.marks.push(self.bindings.len());
    }

    /// Drop the bindings of the innermost scope; the base layer stays
    #[inline]
    pub fn pop_scope(&mut self) {
        if let Some(mark) = self.marks.pop() {
            self.bindings.truncate(mark);
        }
    }

    /// Bind a prefix in the innermost scope; `xml` and `xmlns` are fixed
    pub fn declare(&mut self, prefix_id: u32, uri_id: u32) {
        if !self.reserved.contains(&prefix_id) {
            self.bindings.push((prefix_id, uri_id));
        }
    }

    #[inline]
    pub fn declare_default(&mut self, uri_id: u32) {
        self.declare(0, uri_id);
    }

    pub fn resolve(&self, prefix_id: u32) -> Option<u32> {
        self.bindings
            .iter()
            .rev()
            .find_map(|&(prefix, uri)| (prefix == prefix_id).then_some(uri))
    }

    #[inline]
    pub fn resolve_default(&self) -> Option<u32> {
        self.resolve(0)
    }

    /// Number of open element scopes
    pub fn depth(&self) -> usize {
        self.marks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIM100: &[u8] = b"http://iec.ch/TC57/CIM100#";
    const CIM16: &[u8] = b"http://iec.ch/TC57/2013/CIM-schema-cim16#";

    #[test]
    fn test_reserved_prefixes_resolve() {
        let mut strings = StringPool::new();
        let resolver = NamespaceResolver::new(&mut strings);
        let xml = strings.intern(b"xml");
        let uri = resolver.resolve(xml).unwrap();
        assert_eq!(strings.get_str(uri), Some("http://www.w3.org/XML/1998/namespace"));
        assert_eq!(resolver.resolve_default(), None);
    }

    #[test]
    fn test_declarations_end_with_their_element() {
        let mut strings = StringPool::new();
        let mut resolver = NamespaceResolver::new(&mut strings);
        let cim = strings.intern(b"cim");
        let uri = strings.intern(CIM100);

        resolver.push_scope();
        resolver.declare(cim, uri);
        resolver.push_scope();
        assert_eq!(resolver.resolve(cim), Some(uri));
        assert_eq!(resolver.depth(), 2);

        resolver.pop_scope();
        assert_eq!(resolver.resolve(cim), Some(uri));
        resolver.pop_scope();
        assert_eq!(resolver.resolve(cim), None);
    }

    #[test]
    fn test_document_shadows_session_binding() {
        let mut strings = StringPool::new();
        let mut resolver = NamespaceResolver::new(&mut strings);
        let cim = strings.intern(b"cim");
        let seeded = strings.intern(CIM100);
        let declared = strings.intern(CIM16);

        resolver.predeclare(cim, seeded);
        resolver.push_scope();
        resolver.declare(cim, declared);
        assert_eq!(resolver.resolve(cim), Some(declared));

        resolver.pop_scope();
        assert_eq!(resolver.resolve(cim), Some(seeded));
        // Stray end tags cannot remove the base layer
        resolver.pop_scope();
        assert_eq!(resolver.resolve(cim), Some(seeded));
        assert_eq!(resolver.depth(), 0);
    }

    #[test]
    fn test_default_namespace() {
        let mut strings = StringPool::new();
        let mut resolver = NamespaceResolver::new(&mut strings);
        let uri = strings.intern(CIM100);

        resolver.push_scope();
        resolver.declare_default(uri);
        assert_eq!(resolver.resolve_default(), Some(uri));
        resolver.pop_scope();
        assert_eq!(resolver.resolve_default(), None);
    }

    #[test]
    fn test_xmlns_cannot_be_rebound() {
        let mut strings = StringPool::new();
        let mut resolver = NamespaceResolver::new(&mut strings);
        let xmlns = strings.intern(b"xmlns");
        let before = resolver.resolve(xmlns);

        resolver.push_scope();
        let other = strings.intern(b"urn:other");
        resolver.declare(xmlns, other);
        assert_eq!(resolver.resolve(xmlns), before);
    }
}
