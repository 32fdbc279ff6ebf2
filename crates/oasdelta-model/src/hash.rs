//! Deterministic content hashing for domain objects.
//!
//! Each object kind computes a 256-bit BLAKE3 digest of its semantically
//! significant fields under a per-kind domain tag, so two kinds with
//! identical field text can never collide. The digest is independent of
//! source positions and build order; only the presence and value of fields
//! matter. Diff code uses the digest as a cheap equality oracle before
//! running any structural comparison.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::extensions::Extensions;
use crate::reference::NodeRef;

/// A 256-bit content digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectHash([u8; 32]);

impl ObjectHash {
    /// Create from a pre-computed digest.
    pub const fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// The raw 32-byte digest.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex-encoded string representation.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Debug for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHash({})", self.short_hex())
    }
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Token type tags. Combined with length prefixes they make the framing
// unambiguous: no sequence of inputs can reproduce another token stream.
const TAG_SCALAR: u8 = 0x01;
const TAG_NESTED: u8 = 0x02;
const TAG_ENTRY: u8 = 0x03;

/// Incremental builder for an object's content digest.
///
/// Every token is tagged and length-prefixed before being fed to the
/// hasher, so field boundaries cannot be forged by field contents.
pub struct HashBuilder {
    hasher: blake3::Hasher,
}

impl HashBuilder {
    /// Start a digest under the given domain tag.
    pub fn new(domain: &'static str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(domain.as_bytes());
        hasher.update(b":");
        Self { hasher }
    }

    fn token(&mut self, tag: u8, name: &str, payload: &[u8]) {
        self.hasher.update(&[tag]);
        self.hasher.update(&(name.len() as u64).to_le_bytes());
        self.hasher.update(name.as_bytes());
        self.hasher.update(&(payload.len() as u64).to_le_bytes());
        self.hasher.update(payload);
    }

    /// Include a scalar field. Empty fields contribute nothing.
    pub fn scalar<T: fmt::Display>(&mut self, name: &str, field: &NodeRef<T>) {
        if let Some(value) = field.value() {
            self.token(TAG_SCALAR, name, value.to_string().as_bytes());
        }
    }

    /// Include a list-valued field, one token per item in list order.
    pub fn list<T: fmt::Display>(&mut self, name: &str, field: &NodeRef<Vec<T>>) {
        if let Some(items) = field.value() {
            for item in items {
                self.token(TAG_SCALAR, name, item.to_string().as_bytes());
            }
        }
    }

    /// Include a nested object field as an opaque digest token.
    ///
    /// A field reached through a pointer reference contributes its
    /// reference string instead of its target's digest: the target is
    /// owned (and hashed) by its defining site, and hashing it here would
    /// recurse forever on self-referential structures.
    pub fn nested<T: ContentHash>(&mut self, name: &str, field: &NodeRef<Arc<T>>) {
        if let Some(reference) = field.reference() {
            self.token(TAG_SCALAR, name, reference.as_bytes());
        } else if let Some(value) = field.value() {
            self.token(TAG_NESTED, name, value.content_hash().as_bytes());
        }
    }

    /// Include a keyed collection of nested objects, in lexicographic key
    /// order. Entries follow the same reference rule as [`Self::nested`].
    pub fn nested_map<T: ContentHash>(
        &mut self,
        name: &str,
        map: &BTreeMap<String, NodeRef<Arc<T>>>,
    ) {
        for (key, entry) in map {
            let entry_name = format!("{name}.{key}");
            if let Some(reference) = entry.reference() {
                self.token(TAG_SCALAR, &entry_name, reference.as_bytes());
            } else if let Some(value) = entry.value() {
                self.token(TAG_NESTED, &entry_name, value.content_hash().as_bytes());
            }
        }
    }

    /// Include a keyed collection of scalar values, in lexicographic key
    /// order.
    pub fn scalar_map<T: fmt::Display>(
        &mut self,
        name: &str,
        map: &BTreeMap<String, NodeRef<T>>,
    ) {
        for (key, entry) in map {
            if let Some(value) = entry.value() {
                self.token(
                    TAG_ENTRY,
                    &format!("{name}.{key}"),
                    value.to_string().as_bytes(),
                );
            }
        }
    }

    /// Include every extension entry as a key/canonical-JSON pair, in
    /// lexicographic key order.
    pub fn extensions(&mut self, extensions: &Extensions) {
        for (key, entry) in extensions.iter() {
            if let Some(value) = entry.value() {
                self.token(TAG_ENTRY, key, value.to_string().as_bytes());
            }
        }
    }

    /// Finalize the digest.
    pub fn finish(self) -> ObjectHash {
        ObjectHash(*self.hasher.finalize().as_bytes())
    }
}

/// Deterministic content digest over an object's significant fields.
pub trait ContentHash {
    /// The domain tag separating this kind's digests from every other's.
    const DOMAIN: &'static str;

    /// Feed the object's significant fields to the builder, in the
    /// object's fixed field declaration order.
    fn collect(&self, builder: &mut HashBuilder);

    /// The object's content digest.
    fn content_hash(&self) -> ObjectHash {
        let mut builder = HashBuilder::new(Self::DOMAIN);
        self.collect(&mut builder);
        builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::Span;

    struct Token {
        text: NodeRef<String>,
    }

    impl ContentHash for Token {
        const DOMAIN: &'static str = "test-token-v1";

        fn collect(&self, builder: &mut HashBuilder) {
            builder.scalar("text", &self.text);
        }
    }

    struct OtherToken {
        text: NodeRef<String>,
    }

    impl ContentHash for OtherToken {
        const DOMAIN: &'static str = "test-other-token-v1";

        fn collect(&self, builder: &mut HashBuilder) {
            builder.scalar("text", &self.text);
        }
    }

    #[test]
    fn digest_is_deterministic() {
        let a = Token {
            text: NodeRef::new("hello".into(), Span::new(1, 1)),
        };
        assert_eq!(a.content_hash(), a.content_hash());
    }

    #[test]
    fn digest_ignores_source_position() {
        let a = Token {
            text: NodeRef::new("hello".into(), Span::new(1, 1)),
        };
        let b = Token {
            text: NodeRef::new("hello".into(), Span::new(400, 12)),
        };
        assert_eq!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn digest_distinguishes_absent_from_present() {
        let absent = Token {
            text: NodeRef::empty(),
        };
        let empty_string = Token {
            text: NodeRef::new(String::new(), Span::default()),
        };
        assert_ne!(absent.content_hash(), empty_string.content_hash());
    }

    #[test]
    fn domains_separate_kinds() {
        let a = Token {
            text: NodeRef::new("same".into(), Span::default()),
        };
        let b = OtherToken {
            text: NodeRef::new("same".into(), Span::default()),
        };
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn value_change_changes_digest() {
        let a = Token {
            text: NodeRef::new("header".into(), Span::default()),
        };
        let b = Token {
            text: NodeRef::new("query".into(), Span::default()),
        };
        assert_ne!(a.content_hash(), b.content_hash());
    }

    struct Pair {
        first: NodeRef<String>,
        second: NodeRef<String>,
    }

    impl ContentHash for Pair {
        const DOMAIN: &'static str = "test-pair-v1";

        fn collect(&self, builder: &mut HashBuilder) {
            builder.scalar("first", &self.first);
            builder.scalar("second", &self.second);
        }
    }

    proptest::proptest! {
        #[test]
        fn digest_deterministic_for_any_text(text in ".*", line in 0usize..10_000, column in 0usize..500) {
            let a = Token { text: NodeRef::new(text.clone(), Span::new(line, column)) };
            let b = Token { text: NodeRef::new(text, Span::default()) };
            proptest::prop_assert_eq!(a.content_hash(), b.content_hash());
        }

        #[test]
        fn different_texts_never_collide(a in ".*", b in ".*") {
            proptest::prop_assume!(a != b);
            let l = Token { text: NodeRef::new(a, Span::default()) };
            let r = Token { text: NodeRef::new(b, Span::default()) };
            proptest::prop_assert_ne!(l.content_hash(), r.content_hash());
        }

        // Token framing: moving bytes between adjacent fields must change
        // the digest even when the concatenated text is identical.
        #[test]
        fn field_boundaries_are_not_forgeable(text in "[a-z]{2,16}", split_a in 0usize..16, split_b in 0usize..16) {
            let a = split_a.min(text.len());
            let b = split_b.min(text.len());
            proptest::prop_assume!(a != b);
            let make = |at: usize| Pair {
                first: NodeRef::new(text[..at].to_string(), Span::default()),
                second: NodeRef::new(text[at..].to_string(), Span::default()),
            };
            proptest::prop_assert_ne!(make(a).content_hash(), make(b).content_hash());
        }
    }

    #[test]
    fn hex_display_is_64_chars() {
        let h = Token {
            text: NodeRef::new("x".into(), Span::default()),
        }
        .content_hash();
        assert_eq!(h.to_hex().len(), 64);
        assert_eq!(format!("{h}"), h.to_hex());
        assert_eq!(h.short_hex().len(), 8);
    }
}
