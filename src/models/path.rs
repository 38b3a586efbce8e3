//! Canonical paths into the virtual file tree.
//!
//! A `VfsPath` is a list of name segments with no `.`, `..` or empty
//! segments. The root is the empty list and displays as `/`.

use compact_str::CompactString;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

pub const SEPARATOR: char = '/';

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VfsPath {
    segments: Vec<CompactString>,
}

impl VfsPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Canonicalizes `input` against the root.
    pub fn parse(input: &str) -> Self {
        Self::root().resolve(input)
    }

    /// Resolves `input` against `self`.
    ///
    /// A leading separator makes `input` absolute. `..` never climbs past the
    /// root.
    pub fn resolve(&self, input: &str) -> Self {
        let mut segments = if input.starts_with(SEPARATOR) {
            Vec::new()
        } else {
            self.segments.clone()
        };

        for part in input.split(SEPARATOR) {
            match part {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                name => segments.push(CompactString::from(name)),
            }
        }

        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn segments(&self) -> &[CompactString] {
        &self.segments
    }

    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(CompactString::as_str)
    }

    pub fn parent(&self) -> Option<VfsPath> {
        self.split_last().map(|(parent, _)| parent)
    }

    pub fn split_last(&self) -> Option<(VfsPath, &str)> {
        let (last, rest) = self.segments.split_last()?;
        Some((
            Self {
                segments: rest.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Appends one already-validated name segment.
    pub fn join(&self, name: &str) -> VfsPath {
        let mut segments = self.segments.clone();
        segments.push(CompactString::from(name));
        Self { segments }
    }

    pub fn with_name(&self, name: &str) -> Option<VfsPath> {
        let (parent, _) = self.split_last()?;
        Some(parent.join(name))
    }

    /// Segment-wise prefix test; `/a` is a prefix of `/a/b` but not of `/ab`.
    pub fn starts_with(&self, prefix: &VfsPath) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Rewrites `old` to `new` when `self` is `old` or nested under it.
    pub fn replace_prefix(&self, old: &VfsPath, new: &VfsPath) -> Option<VfsPath> {
        if !self.starts_with(old) {
            return None;
        }
        let mut segments = new.segments.clone();
        segments.extend_from_slice(&self.segments[old.segments.len()..]);
        Some(Self { segments })
    }

    /// Storage form without the leading separator, as the browser store kept it.
    pub fn to_storage_string(&self) -> String {
        self.segments.join("/")
    }
}

pub fn resolve(base: &VfsPath, input: &str) -> VfsPath {
    base.resolve(input)
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl Serialize for VfsPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_storage_string())
    }
}

impl<'de> Deserialize<'de> for VfsPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(VfsPath::parse(&raw))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/path.rs"]
mod tests;
