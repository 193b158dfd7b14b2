//! Form schema type definitions
//!
//! A form imposes a dynamic shape on submissions: an insertion-ordered
//! mapping from field id to field definition. Field order is significant
//! (required-field checks walk it), so the mapping is an explicit ordered
//! association rather than a hash map.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifier of a form
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormId(String);

impl FormId {
    /// Generate a fresh random form id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FormId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FormId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Key of a field within a form. Opaque, unique within one form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FieldId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Insertion-ordered map.
///
/// Serializes as a JSON object whose keys appear in insertion order, and
/// deserializes keeping the document order of the incoming object.
/// Re-inserting an existing key replaces the value but keeps its position.
/// Lookups and inserts are hashed, so parsing a body is linear in its size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "K: Serialize, V: Serialize",
    deserialize = "K: Deserialize<'de> + Hash + Eq, V: Deserialize<'de>"
))]
pub struct OrderedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Insert a key, returning the previous value if the key existed.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Equality is order-sensitive: two forms with the same fields in a
// different order are different forms.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: Hash + Eq, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K, V> IntoIterator for OrderedMap<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// One question slot of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Opaque type label; not interpreted by validation
    #[serde(rename = "type")]
    pub field_type: String,
    /// Human-readable question text
    pub prompt: String,
    /// Whether an answer must be supplied
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    pub fn new(field_type: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            field_type: field_type.into(),
            prompt: prompt.into(),
            required: false,
        }
    }

    /// Create a required field
    pub fn required(field_type: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(field_type, prompt)
        }
    }

    /// Create an optional field
    pub fn optional(field_type: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self::new(field_type, prompt)
    }
}

/// Field definitions of a form, in declaration order
pub type FieldMap = OrderedMap<FieldId, FieldDefinition>;

/// Raw answers of one submission, in payload order
pub type AnswerMap = OrderedMap<FieldId, String>;

/// A named, dynamically-shaped form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: FormId,
    pub name: String,
    pub fields: FieldMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormSchema {
    /// Create a new schema with a fresh id
    pub fn new(name: impl Into<String>, fields: FieldMap) -> Self {
        let now = Utc::now();
        Self {
            id: FormId::generate(),
            name: name.into(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace name and fields wholesale.
    pub fn replace(&mut self, name: impl Into<String>, fields: FieldMap) {
        self.name = name.into();
        self.fields = fields;
        self.updated_at = Utc::now();
    }

    /// Checks the structure of the field definitions.
    ///
    /// The only structural rule is that every field carries a prompt.
    pub fn validate_structure(fields: &FieldMap) -> Result<(), (FieldId, String)> {
        for (field_id, def) in fields.iter() {
            if def.prompt.is_empty() {
                return Err((field_id.clone(), "prompt is required".into()));
            }
        }
        Ok(())
    }
}
