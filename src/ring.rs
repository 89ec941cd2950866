//! Ring of links and its circular neighbor algebra
//!
//! A ring is an ordered list of links where the successor of the last link
//! is the first one. Rings are small (tens of entries), so lookups are plain
//! linear scans.

use crate::schema::Anomalies;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// A member site of the webring
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Address of the site; may be a bare host without a scheme
    #[serde(default)]
    pub link: String,
}

impl Link {
    pub fn new(name: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            link: link.into(),
        }
    }

    /// True for the zero-valued link returned by out-of-range lookups
    pub fn is_zero(&self) -> bool {
        self.name.is_empty() && self.link.is_empty()
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.link)
    }
}

/// Ordered, circular sequence of links
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Link>);

impl Ring {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Links for which `f` returns true, in ring order
    pub fn filter<F>(&self, mut f: F) -> Ring
    where
        F: FnMut(&Link) -> bool,
    {
        let mut filtered = Vec::with_capacity(self.0.len());
        for link in &self.0 {
            if f(link) {
                filtered.push(link.clone());
            }
        }
        Ring(filtered)
    }

    /// Drops every link whose address is a key of `anomalies`.
    ///
    /// Matching is by `Link::link` only; the name plays no part.
    pub fn exclude_anomalies(&self, anomalies: &Anomalies) -> Ring {
        self.filter(|link| !anomalies.contains_key(&link.link))
    }

    /// Index of the first link equal to `link`
    pub fn position(&self, link: &Link) -> Option<usize> {
        self.0.iter().position(|l| l == link)
    }

    /// Borrowed (previous, next) links around index `i`, wrapping at both
    /// ends. `None` if the ring is empty or `i` is out of range.
    pub fn neighbors(&self, i: usize) -> Option<(&Link, &Link)> {
        let n = self.0.len();
        if i >= n {
            return None;
        }

        let prev = if i > 0 { &self.0[i - 1] } else { &self.0[n - 1] };
        let next = if i < n - 1 { &self.0[i + 1] } else { &self.0[0] };

        Some((prev, next))
    }

    /// Links surrounding index `i`.
    /// Returns a pair of zero links if the index is out of bounds.
    pub fn surrounding_index(&self, i: usize) -> (Link, Link) {
        match self.neighbors(i) {
            Some((prev, next)) => (prev.clone(), next.clone()),
            None => (Link::default(), Link::default()),
        }
    }

    /// Links surrounding the first occurrence of `link`.
    /// Returns a pair of zero links if `link` is not in the ring.
    pub fn surrounding_links(&self, link: &Link) -> (Link, Link) {
        match self.position(link) {
            Some(i) => self.surrounding_index(i),
            None => (Link::default(), Link::default()),
        }
    }

    pub fn into_inner(self) -> Vec<Link> {
        self.0
    }
}

impl Deref for Ring {
    type Target = [Link];

    fn deref(&self) -> &[Link] {
        &self.0
    }
}

impl From<Vec<Link>> for Ring {
    fn from(links: Vec<Link>) -> Self {
        Ring(links)
    }
}

impl FromIterator<Link> for Ring {
    fn from_iter<I: IntoIterator<Item = Link>>(iter: I) -> Self {
        Ring(iter.into_iter().collect())
    }
}

impl IntoIterator for Ring {
    type Item = Link;
    type IntoIter = std::vec::IntoIter<Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Ring {
    type Item = &'a Link;
    type IntoIter = std::slice::Iter<'a, Link>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
