use crate::{
    errors::ReferenceError,
    reference::{
        ContentDigest, DefaultRegistry, Registry, Repository, Tag, NAME_TOTAL_LENGTH_MAX,
    },
};
use regex::Regex;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    ops::Range,
    str::FromStr,
};

/// Parsed Docker-style image reference
///
/// This is an owned struct representing a docker "reference" (like a URI) which
/// refers to an image, optionally at a specific version. It tries to be
/// format-compatible with Docker including its quirks.
///
/// A complete reference contains a [Registry], [Repository], [Tag], and
/// [ContentDigest] in that order. Only the [Repository] component is mandatory.
///
/// The [Tag] always begins with a `:` and the [ContentDigest] with an `@`, but
/// delineating the optional [Registry] and the first section of the
/// [Repository] requires a heuristic: if this first section includes any dot
/// (.) or colon (:) characters, or is exactly `localhost`, it is a registry.
///
/// [Reference::parse] keeps whatever form it was given. Use
/// [Reference::parse_normalized] to get the canonical form with the default
/// registry and library prefix filled in.
#[derive(Clone)]
pub struct Reference {
    serialized: String,
    registry_pos: Option<Range<usize>>,
    repository_pos: Range<usize>,
    tag_pos: Option<Range<usize>>,
    digest_pos: Option<Range<usize>>,
}

impl Reference {
    /// Returns a reference to the existing string representation of a
    /// [Reference]
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Reference], without any normalization
    ///
    /// ```
    /// # use image_identity::reference::Reference;
    /// let r = Reference::parse("ubuntu:18.10").unwrap();
    /// assert_eq!(r.as_parts(), (None, "ubuntu", Some("18.10"), None));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref WITH_REGISTRY: Regex = Regex::new(&format!(
                "^{}/{}(?::{})?(?:@{})?$",
                Registry::regex_str(),
                Repository::regex_str(),
                Tag::regex_str(),
                ContentDigest::regex_str()
            ))
            .unwrap();
            static ref NO_REGISTRY: Regex = Regex::new(&format!(
                "^{}(?::{})?(?:@{})?$",
                Repository::regex_str(),
                Tag::regex_str(),
                ContentDigest::regex_str()
            ))
            .unwrap();
        }
        let has_registry = match s.split_once('/') {
            Some((first, _)) => Registry::looks_like_registry(first),
            None => false,
        };
        let re: &Regex = if has_registry {
            &WITH_REGISTRY
        } else {
            &NO_REGISTRY
        };
        let captures = re
            .captures(s)
            .ok_or_else(|| ReferenceError::InvalidReferenceFormat(s.to_owned()))?;
        let parsed = Reference {
            serialized: s.to_owned(),
            registry_pos: captures.name("reg").map(|m| m.range()),
            repository_pos: captures.name("repo").unwrap().range(),
            tag_pos: captures.name("tag").map(|m| m.range()),
            digest_pos: captures.name("dig").map(|m| m.range()),
        };
        let name_len = parsed.name_range().len();
        if name_len > NAME_TOTAL_LENGTH_MAX {
            return Err(ReferenceError::NameTooLong {
                name: parsed.name().to_owned(),
                max: NAME_TOTAL_LENGTH_MAX,
            });
        }
        Ok(parsed)
    }

    /// Parse a [prim@str] as a [Reference] in canonical form, using the
    /// Docker Hub defaults
    ///
    /// ```
    /// # use image_identity::reference::Reference;
    /// let r = Reference::parse_normalized("ubuntu:18.10").unwrap();
    /// assert_eq!(r.as_str(), "docker.io/library/ubuntu:18.10");
    /// ```
    pub fn parse_normalized(s: &str) -> Result<Self, ReferenceError> {
        Reference::parse_normalized_with(s, DefaultRegistry::global())
    }

    /// Parse a [prim@str] as a [Reference] in canonical form
    ///
    /// The result always has a registry. Names without one, or with one of
    /// the default registry's alternate names, get the default registry's
    /// canonical host. Single-component paths on the default registry get
    /// its library prefix.
    pub fn parse_normalized_with(
        s: &str,
        defaults: &DefaultRegistry,
    ) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref IDENTIFIER: Regex = Regex::new("^[a-f0-9]{64}$").unwrap();
        }
        if IDENTIFIER.is_match(s) {
            return Err(ReferenceError::NameIsIdentifier(s.to_owned()));
        }
        let raw = match Reference::parse(s) {
            Ok(raw) => raw,
            Err(err) => {
                return Err(match Reference::parse(&s.to_lowercase()) {
                    Ok(_) => ReferenceError::NameNotLowercase(s.to_owned()),
                    Err(_) => err,
                })
            }
        };
        let (registry, repository) =
            defaults.canonicalize(raw.registry().as_ref(), &raw.repository());
        let normalized = Reference::from_parts(
            Some(registry.as_str()),
            repository.as_str(),
            raw.tag_str(),
            raw.content_digest_str(),
        )?;
        if normalized.as_str() != s {
            log::trace!("normalized {:?} to {:?}", s, normalized.as_str());
        }
        Ok(normalized)
    }

    /// Parse a [Reference] from its component pieces
    ///
    /// This may fail either because of a problem with one of the components,
    /// or because the resulting string would be parsed in a manner other than
    /// intended. For example, the first section of a repository path can be
    /// mistaken for a registry name.
    pub fn from_parts(
        registry: Option<&str>,
        repository: &str,
        tag: Option<&str>,
        digest: Option<&str>,
    ) -> Result<Self, ReferenceError> {
        let mut combined = String::new();
        if let Some(registry) = registry {
            combined.push_str(registry);
            combined.push('/');
        }
        combined.push_str(repository);
        if let Some(tag) = tag {
            combined.push(':');
            combined.push_str(tag);
        }
        if let Some(digest) = digest {
            combined.push('@');
            combined.push_str(digest);
        }
        let parsed = Reference::parse(&combined)?;
        if parsed.as_parts() == (registry, repository, tag, digest) {
            Ok(parsed)
        } else {
            // Parsing ambiguity
            Err(ReferenceError::InvalidReferenceFormat(combined))
        }
    }

    /// Return references to the parsed components within this [Reference]
    pub fn as_parts(&self) -> (Option<&str>, &str, Option<&str>, Option<&str>) {
        (
            self.registry_str(),
            self.repository_str(),
            self.tag_str(),
            self.content_digest_str(),
        )
    }

    fn name_range(&self) -> Range<usize> {
        let start = match &self.registry_pos {
            Some(pos) => pos.start,
            None => self.repository_pos.start,
        };
        start..self.repository_pos.end
    }

    /// The name of the image, without any tag or digest
    ///
    /// This is the registry and repository joined with a slash, or the
    /// repository alone when there is no registry.
    pub fn name(&self) -> &str {
        &self.serialized[self.name_range()]
    }

    /// Returns a reference to the optional registry portion of the string.
    pub fn registry_str(&self) -> Option<&str> {
        self.registry_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    /// Returns a reference to the repository portion of the string
    pub fn repository_str(&self) -> &str {
        &self.serialized[self.repository_pos.clone()]
    }

    /// Returns a reference to the optional tag portion of the string.
    pub fn tag_str(&self) -> Option<&str> {
        self.tag_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    /// Returns a reference to the optional digest portion of the string.
    pub fn content_digest_str(&self) -> Option<&str> {
        self.digest_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    /// Returns the registry portion as a new object
    pub fn registry(&self) -> Option<Registry> {
        self.registry_str()
            .map(|s| Registry::parse(s).expect("already parsed"))
    }

    /// Returns the repository portion as a new object
    pub fn repository(&self) -> Repository {
        Repository::parse(self.repository_str()).expect("already parsed")
    }

    /// Returns the tag portion as a new object
    pub fn tag(&self) -> Option<Tag> {
        self.tag_str().map(|s| Tag::parse(s).expect("already parsed"))
    }

    /// Returns the digest portion as a new object
    pub fn content_digest(&self) -> Option<ContentDigest> {
        self.content_digest_str()
            .map(|s| ContentDigest::parse(s).expect("already parsed"))
    }

    /// Create a new [Reference] with the given tag, replacing any existing
    /// tag and keeping any digest
    pub fn with_tag(&self, tag: &str) -> Result<Reference, ReferenceError> {
        let tag = Tag::parse(tag)?;
        Reference::from_parts(
            self.registry_str(),
            self.repository_str(),
            Some(tag.as_str()),
            self.content_digest_str(),
        )
    }

    /// Create a new [Reference] with the given digest, replacing any
    /// existing digest and keeping any tag
    pub fn with_digest(&self, digest: &str) -> Result<Reference, ReferenceError> {
        let digest = ContentDigest::parse(digest)?;
        Reference::from_parts(
            self.registry_str(),
            self.repository_str(),
            self.tag_str(),
            Some(digest.as_str()),
        )
    }

    /// Create a new [Reference] without a tag, keeping any digest
    pub fn without_tag(&self) -> Reference {
        Reference::from_parts(
            self.registry_str(),
            self.repository_str(),
            None,
            self.content_digest_str(),
        )
        .expect("already parsed")
    }
}

impl Eq for Reference {}

impl PartialEq for Reference {
    fn eq(&self, other: &Self) -> bool {
        self.serialized.eq(&other.serialized)
    }
}

impl Hash for Reference {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.serialized.hash(state);
    }
}

impl Ord for Reference {
    fn cmp(&self, other: &Self) -> Ordering {
        self.serialized.cmp(&other.serialized)
    }
}

impl PartialOrd for Reference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for Reference {
    type Err = ReferenceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reference::parse(s)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
