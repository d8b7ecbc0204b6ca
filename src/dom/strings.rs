//! String Interning Pool
//!
//! Efficient string storage with deduplication for element names,
//! attribute names and values, namespace URIs and text content.
//!
//! All strings live in one UTF-8 buffer; an id is an index into the entry
//! table. CIM documents repeat the same property names and reference targets
//! thousands of times, so interning keeps the arena small and turns name
//! comparisons into integer comparisons.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

/// String interning pool
///
/// Memory layout:
/// - `entries`: (offset, length) into `data` for each interned string ID
/// - `data`: one buffer holding every distinct string
/// - `hash_index`: hash -> list of IDs (handles rare collisions)
#[derive(Debug)]
pub struct StringPool {
    entries: Vec<(u32, u32)>,
    data: String,
    hash_index: HashMap<u64, Vec<u32>>,
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl StringPool {
    /// Create a new empty string pool
    pub fn new() -> Self {
        let mut pool = StringPool {
            entries: Vec::with_capacity(256),
            data: String::with_capacity(4096),
            hash_index: HashMap::new(),
        };
        // Entry 0 is reserved for the empty string
        pool.entries.push((0, 0));
        pool
    }

    #[inline]
    fn compute_hash(s: &str) -> u64 {
        let mut hasher = DefaultHasher::new();
        s.hash(&mut hasher);
        hasher.finish()
    }

    /// Intern a byte string, returning its ID
    ///
    /// Invalid UTF-8 is replaced with U+FFFD so every stored string is valid.
    pub fn intern(&mut self, s: &[u8]) -> u32 {
        if s.is_empty() {
            return 0;
        }
        let s = String::from_utf8_lossy(s);
        self.intern_str(&s)
    }

    /// Intern a string slice, returning its ID
    pub fn intern_str(&mut self, s: &str) -> u32 {
        if s.is_empty() {
            return 0;
        }

        let hash = Self::compute_hash(s);
        if let Some(id) = self.lookup_hashed(hash, s) {
            return id;
        }

        let offset = self.data.len() as u32;
        self.data.push_str(s);
        let id = self.entries.len() as u32;
        self.entries.push((offset, s.len() as u32));
        self.hash_index.entry(hash).or_default().push(id);
        id
    }

    /// Find the ID of an already-interned string without inserting it
    ///
    /// Returns `Some(0)` for the empty string.
    pub fn find(&self, s: &str) -> Option<u32> {
        if s.is_empty() {
            return Some(0);
        }
        self.lookup_hashed(Self::compute_hash(s), s)
    }

    fn lookup_hashed(&self, hash: u64, s: &str) -> Option<u32> {
        self.hash_index
            .get(&hash)?
            .iter()
            .copied()
            .find(|&id| self.get_str(id) == Some(s))
    }

    /// Get a string by ID
    #[inline]
    pub fn get_str(&self, id: u32) -> Option<&str> {
        let &(offset, len) = self.entries.get(id as usize)?;
        self.data.get(offset as usize..(offset + len) as usize)
    }

    /// Number of distinct strings (including the reserved empty entry)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing but the reserved empty entry is stored
    pub fn is_empty(&self) -> bool {
        self.entries.len() == 1
    }
}
