use crate::errors::ReferenceError;
use regex::Regex;
use std::{fmt, str::FromStr};

/// Longest repository name, including any registry prefix, that registries
/// accept
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

/// Path of a Docker-style image repository, without its registry
///
/// Repository names are path-like groupings of lowercase alphanumeric segments
/// separated by slashes. Each segment may also contain internal separator
/// characters: single periods, single underscores, double underscores, or any
/// number of dashes.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Repository {
    serialized: String,
}

/// Iterator over components of a Repository path
pub struct RepositoryIter<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Iterator for RepositoryIter<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        let remaining = self.remaining?;
        match remaining.split_once('/') {
            Some((first, rest)) => {
                self.remaining = Some(rest);
                Some(first)
            }
            None => {
                self.remaining = None;
                Some(remaining)
            }
        }
    }
}

impl Repository {
    /// Returns a reference to the existing string representation of a
    /// [Repository]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Repository]
    ///
    /// ```
    /// # use image_identity::reference::Repository;
    /// let repo = Repository::parse("library/ubuntu").unwrap();
    /// let parts: Vec<&str> = repo.iter().collect();
    /// assert_eq!(parts, vec!["library", "ubuntu"])
    /// ```
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!("^{}$", Repository::regex_str())).unwrap();
        }
        if RE.is_match(s) {
            Ok(Repository {
                serialized: s.to_owned(),
            })
        } else {
            Err(ReferenceError::InvalidReferenceFormat(s.to_owned()))
        }
    }

    /// Produce an iterator over the slash-separated parts of a repository path
    pub fn iter(&self) -> RepositoryIter<'_> {
        RepositoryIter {
            remaining: Some(&self.serialized),
        }
    }

    /// Does this path consist of a single segment?
    pub fn is_single_segment(&self) -> bool {
        !self.serialized.contains('/')
    }

    /// Join this path to another with a slash, forming a new repository path
    pub fn join(&self, other: &Self) -> Self {
        Repository {
            serialized: format!("{}/{}", self.serialized, other.serialized),
        }
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<repo>", // Repository match group
            /*  */ "[a-z0-9]+(?:(?:[._]|__|[-]*)[a-z0-9]+)*", // first component
            /*  */ "(?:", // Optional additional components
            /* -- */ "/",
            /* -- */ "[a-z0-9]+(?:(?:[._]|__|[-]*)[a-z0-9]+)*",
            /*  */ ")*",
            ")"
        )
    }
}

impl FromStr for Repository {
    type Err = ReferenceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Repository::parse(s)
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
