//! Fundamental types for docgov.
//!
//! This crate defines the vocabulary shared across every other crate in the workspace:
//! the typed content model, content-hashed documents, labelled edges, and the
//! primitive values (hashes, timestamps, quantities, account names) stored inside them.

pub mod asset;
pub mod content;
pub mod document;
pub mod edge;
pub mod error;
pub mod hash;
pub mod name;
pub mod time;

pub use asset::{Asset, Symbol};
pub use content::{
    Content, ContentGroup, ContentGroups, ContentGroupsExt, ContentValue, FromContent,
    CONTENT_GROUP_LABEL,
};
pub use document::Document;
pub use edge::{Edge, EdgeKey};
pub use error::ContentError;
pub use hash::DocHash;
pub use name::AccountName;
pub use time::Timestamp;
