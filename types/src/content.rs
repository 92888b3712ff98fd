//! The typed content model: labelled values inside ordered, labelled groups.
//!
//! A document's payload is a sequence of [`ContentGroup`]s. Each group is an ordered
//! list of [`Content`] items, and by convention its first item is
//! `content_group_label → <group name>`. Labels are not enforced to be unique;
//! every lookup returns the first match in scan order together with its position,
//! so callers can test presence and replace in place without scanning twice.

use crate::error::ContentError;
use crate::{AccountName, Asset, DocHash, Timestamp};
use serde::{Deserialize, Serialize};

/// Label of the item naming its enclosing group.
pub const CONTENT_GROUP_LABEL: &str = "content_group_label";

/// A typed value stored in a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentValue {
    Text(String),
    Int(i64),
    Asset(Asset),
    Name(AccountName),
    Time(Timestamp),
    Hash(DocHash),
    Bool(bool),
}

impl ContentValue {
    /// Name of the value's kind, used in type-mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Asset(_) => "asset",
            Self::Name(_) => "name",
            Self::Time(_) => "time",
            Self::Hash(_) => "hash",
            Self::Bool(_) => "bool",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_asset(&self) -> Option<&Asset> {
        match self {
            Self::Asset(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&AccountName> {
        match self {
            Self::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Timestamp> {
        match self {
            Self::Time(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<DocHash> {
        match self {
            Self::Hash(h) => Some(*h),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for ContentValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ContentValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for ContentValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<Asset> for ContentValue {
    fn from(v: Asset) -> Self {
        Self::Asset(v)
    }
}

impl From<AccountName> for ContentValue {
    fn from(v: AccountName) -> Self {
        Self::Name(v)
    }
}

impl From<Timestamp> for ContentValue {
    fn from(v: Timestamp) -> Self {
        Self::Time(v)
    }
}

impl From<DocHash> for ContentValue {
    fn from(v: DocHash) -> Self {
        Self::Hash(v)
    }
}

impl From<bool> for ContentValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Typed extraction of a [`ContentValue`].
pub trait FromContent: Sized {
    /// The kind name reported when extraction fails.
    const KIND: &'static str;

    fn from_content(value: &ContentValue) -> Option<Self>;
}

macro_rules! impl_from_content {
    ($ty:ty, $kind:literal, $accessor:expr) => {
        impl FromContent for $ty {
            const KIND: &'static str = $kind;

            fn from_content(value: &ContentValue) -> Option<Self> {
                $accessor(value)
            }
        }
    };
}

impl_from_content!(String, "text", |v: &ContentValue| v.as_text().map(str::to_string));
impl_from_content!(i64, "int", |v: &ContentValue| v.as_int());
impl_from_content!(Asset, "asset", |v: &ContentValue| v.as_asset().cloned());
impl_from_content!(AccountName, "name", |v: &ContentValue| v.as_name().cloned());
impl_from_content!(Timestamp, "time", |v: &ContentValue| v.as_time());
impl_from_content!(DocHash, "hash", |v: &ContentValue| v.as_hash());
impl_from_content!(bool, "bool", |v: &ContentValue| v.as_bool());

/// A single labelled value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Content {
    pub label: String,
    pub value: ContentValue,
}

impl Content {
    pub fn new(label: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An ordered sequence of labelled values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentGroup(Vec<Content>);

/// The full payload of a document.
pub type ContentGroups = Vec<ContentGroup>;

impl ContentGroup {
    /// Start a group whose first item names it.
    pub fn new(label: &str) -> Self {
        Self(vec![Content::new(CONTENT_GROUP_LABEL, label)])
    }

    /// Wrap raw items; the caller is responsible for the label convention.
    pub fn from_items(items: Vec<Content>) -> Self {
        Self(items)
    }

    /// Builder-style append.
    pub fn with(mut self, label: impl Into<String>, value: impl Into<ContentValue>) -> Self {
        self.0.push(Content::new(label, value));
        self
    }

    /// The group's name, read from its `content_group_label` item.
    pub fn label(&self) -> Option<&str> {
        self.get(CONTENT_GROUP_LABEL)
            .and_then(|(_, c)| c.value.as_text())
    }

    pub fn items(&self) -> &[Content] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, content: Content) {
        self.0.push(content);
    }

    /// First item with `label`, with its position.
    pub fn get(&self, label: &str) -> Option<(usize, &Content)> {
        self.0.iter().enumerate().find(|(_, c)| c.label == label)
    }

    /// Replace the first item with the same label, or append it.
    pub fn insert_or_replace(&mut self, content: Content) {
        match self.0.iter().position(|c| c.label == content.label) {
            Some(idx) => self.0[idx] = content,
            None => self.0.push(content),
        }
    }

    /// Remove the first item with `label`, returning it.
    pub fn remove(&mut self, label: &str) -> Option<Content> {
        let idx = self.0.iter().position(|c| c.label == label)?;
        Some(self.0.remove(idx))
    }
}

/// Lookups over a document's groups.
pub trait ContentGroupsExt {
    /// First group named `label`, with its position.
    fn group(&self, label: &str) -> Option<(usize, &ContentGroup)>;

    fn group_mut(&mut self, label: &str) -> Option<&mut ContentGroup>;

    /// Item `item` of group `group`, with the item's position inside the group.
    fn lookup(&self, group: &str, item: &str) -> Option<(usize, &Content)>;

    fn group_or_fail(&self, label: &str) -> Result<&ContentGroup, ContentError> {
        self.group(label)
            .map(|(_, g)| g)
            .ok_or_else(|| ContentError::GroupNotFound(label.to_string()))
    }

    fn get_or_fail(&self, group: &str, item: &str) -> Result<&Content, ContentError> {
        self.group_or_fail(group)?;
        self.lookup(group, item)
            .map(|(_, c)| c)
            .ok_or_else(|| ContentError::ItemNotFound {
                group: group.to_string(),
                label: item.to_string(),
            })
    }

    /// Typed lookup that fails on absence or on a value of another kind.
    fn get_as<T: FromContent>(&self, group: &str, item: &str) -> Result<T, ContentError> {
        let content = self.get_or_fail(group, item)?;
        T::from_content(&content.value).ok_or_else(|| ContentError::WrongType {
            group: group.to_string(),
            label: item.to_string(),
            expected: T::KIND,
            found: content.value.kind(),
        })
    }
}

impl ContentGroupsExt for [ContentGroup] {
    fn group(&self, label: &str) -> Option<(usize, &ContentGroup)> {
        self.iter()
            .enumerate()
            .find(|(_, g)| g.label() == Some(label))
    }

    fn group_mut(&mut self, label: &str) -> Option<&mut ContentGroup> {
        self.iter_mut().find(|g| g.label() == Some(label))
    }

    fn lookup(&self, group: &str, item: &str) -> Option<(usize, &Content)> {
        self.group(group).and_then(|(_, g)| g.get(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> ContentGroup {
        ContentGroup::new("details")
            .with("title", "Raise the budget")
            .with("period_count", 4i64)
            .with("title", "shadowed")
    }

    #[test]
    fn group_label_is_first_item() {
        let group = details();
        assert_eq!(group.label(), Some("details"));
        assert_eq!(group.items()[0].label, CONTENT_GROUP_LABEL);
    }

    #[test]
    fn lookup_returns_first_match_and_index() {
        let group = details();
        let (idx, content) = group.get("title").unwrap();
        assert_eq!(idx, 1);
        assert_eq!(content.value.as_text(), Some("Raise the budget"));
    }

    #[test]
    fn insert_or_replace_keeps_position() {
        let mut group = details();
        group.insert_or_replace(Content::new("period_count", 6i64));
        assert_eq!(group.get("period_count").unwrap().0, 2);
        assert_eq!(group.get("period_count").unwrap().1.value.as_int(), Some(6));

        group.insert_or_replace(Content::new("new_item", true));
        assert_eq!(group.get("new_item").unwrap().0, 4);
    }

    #[test]
    fn remove_drops_first_match_only() {
        let mut group = details();
        let removed = group.remove("title").unwrap();
        assert_eq!(removed.value.as_text(), Some("Raise the budget"));
        assert_eq!(group.get("title").unwrap().1.value.as_text(), Some("shadowed"));
    }

    #[test]
    fn typed_lookup_reports_kind_mismatch() {
        let groups: ContentGroups = vec![details()];
        assert_eq!(groups.get_as::<i64>("details", "period_count").unwrap(), 4);
        let err = groups.get_as::<DocHash>("details", "title").unwrap_err();
        assert!(matches!(
            err,
            ContentError::WrongType { expected: "hash", found: "text", .. }
        ));
        assert!(matches!(
            groups.get_or_fail("system", "type"),
            Err(ContentError::GroupNotFound(_))
        ));
        assert!(matches!(
            groups.get_or_fail("details", "missing"),
            Err(ContentError::ItemNotFound { .. })
        ));
    }

    #[test]
    fn group_mut_edits_in_place() {
        let mut groups: ContentGroups = vec![ContentGroup::new("system"), details()];
        groups
            .group_mut("system")
            .unwrap()
            .insert_or_replace(Content::new("type", "edit"));
        assert_eq!(groups.lookup("system", "type").unwrap().1.value.as_text(), Some("edit"));
    }
}
