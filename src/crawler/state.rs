//! Crawl state: frontier, visited set and email set
//!
//! The frontier is a plain LIFO stack: the most recently discovered URI is
//! visited next, which makes the crawl depth-first. Pushes are never
//! deduplicated. The visited set gates the fetch when a URI is popped.
//! All three collections only grow for the life of a crawl.

use std::collections::HashSet;

/// Stack of scheme-less URIs waiting to be visited
#[derive(Debug, Default)]
pub struct Frontier {
    stack: Vec<String>,
}

impl Frontier {
    /// Creates a frontier holding a single seed URI
    pub fn seeded(seed: impl Into<String>) -> Self {
        Self {
            stack: vec![seed.into()],
        }
    }

    /// Pushes a URI, even if it is already queued or visited
    pub fn push(&mut self, uri: String) {
        self.stack.push(uri);
    }

    /// Removes the most recently pushed URI
    pub fn pop(&mut self) -> Option<String> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// URIs already taken off the frontier for a fetch attempt
#[derive(Debug, Default)]
pub struct VisitedSet {
    uris: HashSet<String>,
}

impl VisitedSet {
    /// Marks `uri` as visited
    ///
    /// Returns true only the first time a URI is marked. Checking and
    /// marking happen in one step, so a `true` result is the permission
    /// to fetch.
    pub fn mark(&mut self, uri: &str) -> bool {
        self.uris.insert(uri.to_string())
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.uris.contains(uri)
    }

    pub fn len(&self) -> usize {
        self.uris.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uris.is_empty()
    }
}

/// Distinct email addresses in first-discovery order
#[derive(Debug, Default)]
pub struct EmailSet {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

impl EmailSet {
    /// Adds an email, returning true if it had not been seen before
    pub fn insert(&mut self, email: &str) -> bool {
        let added = self.seen.insert(email.to_string());
        if added {
            self.ordered.push(email.to_string());
        }
        added
    }

    pub fn contains(&self, email: &str) -> bool {
        self.seen.contains(email)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Emails in the order they were first inserted
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    pub fn into_vec(self) -> Vec<String> {
        self.ordered
    }
}
