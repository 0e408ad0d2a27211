//! Ordered, duplicate-free collection of repository paths.

use std::collections::HashSet;

/// Paths in first-seen order, each appearing at most once
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    paths: Vec<String>,
    seen: HashSet<String>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a path, returning `false` if it was already present
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    pub fn extend<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for path in paths {
            self.insert(path);
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.paths.iter()
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.paths.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for FileSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = FileSet::new();
        set.extend(iter);
        set
    }
}
