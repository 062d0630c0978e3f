use crate::{
    errors::{NameError, ReferenceError},
    image::Digest,
    reference::{DefaultRegistry, Reference},
};
use std::{
    cmp::Ordering,
    collections::BTreeSet,
    fmt,
    hash::{Hash, Hasher},
    iter,
    str::FromStr,
};

/// Normalized name of a container image
///
/// An [ImageName] wraps a parsed [Reference] which always has the canonical
/// form after [ImageName::parse]: the registry host is present, Docker Hub is
/// spelled `docker.io`, and single-component Docker Hub repositories are under
/// `library/`. Any tag and digest given at construction are kept.
///
/// Names compare, hash, and sort by their string form. Names that are written
/// differently but refer to the same image, such as `ubuntu` and
/// `docker.io/library/ubuntu`, are related by [ImageName::synonyms].
///
/// The empty name, [ImageName::EMPTY], has no reference at all. It renders as
/// an empty string and has no host or path.
#[derive(Clone, Default)]
pub struct ImageName {
    reference: Option<Reference>,
}

impl ImageName {
    /// The empty image name
    pub const EMPTY: ImageName = ImageName { reference: None };

    /// Parse and normalize an image name
    ///
    /// ```
    /// # use image_identity::image::ImageName;
    /// let name = ImageName::parse("ubuntu:18.10").unwrap();
    /// assert_eq!(name.as_str(), "docker.io/library/ubuntu:18.10");
    /// assert_eq!(name.path().unwrap(), "library/ubuntu");
    /// assert_eq!(name.tag(), Some("18.10"));
    /// ```
    pub fn parse(s: &str) -> Result<Self, NameError> {
        Ok(ImageName {
            reference: Some(Reference::parse_normalized(s)?),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_none()
    }

    /// The underlying parsed reference, absent for the empty name
    pub fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    /// Returns the complete string form, or an empty string for
    /// [ImageName::EMPTY]
    pub fn as_str(&self) -> &str {
        match &self.reference {
            Some(reference) => reference.as_str(),
            None => "",
        }
    }

    /// Return the canonical form of this name
    ///
    /// Names from [ImageName::parse] are already canonical. Synonyms may not
    /// be, and this brings them back to the form they were derived from.
    pub fn normalize(&self) -> ImageName {
        match &self.reference {
            None => ImageName::EMPTY,
            Some(reference) => ImageName {
                reference: Some(normalized(reference)),
            },
        }
    }

    /// The name without any tag or digest, for example
    /// `docker.io/library/ubuntu`
    pub fn name(&self) -> Result<&str, NameError> {
        self.reference
            .as_ref()
            .map(Reference::name)
            .ok_or(NameError::Empty)
    }

    /// The registry host, for example `docker.io`
    pub fn host(&self) -> Result<String, NameError> {
        self.host_path().map(|(host, _)| host)
    }

    /// The repository path without the registry host, for example
    /// `library/ubuntu`
    pub fn path(&self) -> Result<String, NameError> {
        self.host_path().map(|(_, path)| path)
    }

    fn host_path(&self) -> Result<(String, String), NameError> {
        self.reference
            .as_ref()
            .map(host_path)
            .ok_or(NameError::Empty)
    }

    pub fn tag(&self) -> Option<&str> {
        self.reference.as_ref().and_then(Reference::tag_str)
    }

    /// The digest, or [Digest::EMPTY] if the name has none
    pub fn digest(&self) -> Digest {
        match self.reference.as_ref().and_then(Reference::content_digest_str) {
            Some(digest) => Digest::new(digest),
            None => Digest::EMPTY,
        }
    }

    /// Create a new name with the given tag, replacing any existing tag
    ///
    /// Any digest is kept as-is. Making sure it still describes the tagged
    /// image is up to the caller.
    pub fn with_tag(&self, tag: &str) -> Result<ImageName, NameError> {
        let reference = self.reference.as_ref().ok_or(NameError::Empty)?;
        match reference.with_tag(tag) {
            Ok(tagged) => Ok(ImageName {
                reference: Some(tagged),
            }),
            Err(source) => Err(NameError::ApplyTag {
                tag: tag.to_owned(),
                name: self.as_str().to_owned(),
                source,
            }),
        }
    }

    /// Create a new name with any tag removed
    pub fn without_tag(&self) -> ImageName {
        ImageName {
            reference: self.reference.as_ref().map(Reference::without_tag),
        }
    }

    /// Create a new name with the given digest, replacing any existing digest
    pub fn with_digest(&self, digest: &Digest) -> Result<ImageName, NameError> {
        let reference = self.reference.as_ref().ok_or(NameError::Empty)?;
        match reference.with_digest(digest.as_str()) {
            Ok(digested) => Ok(ImageName {
                reference: Some(digested),
            }),
            Err(source) => Err(NameError::ApplyDigest {
                digest: digest.to_string(),
                name: self.as_str().to_owned(),
                source,
            }),
        }
    }

    /// The name as a string with no digest suffix
    ///
    /// This is plain text processing and does not reparse anything.
    pub fn without_digest(&self) -> String {
        match &self.reference {
            None => String::new(),
            Some(reference) => reference
                .name()
                .split('@')
                .next()
                .unwrap_or_default()
                .to_owned(),
        }
    }

    /// All the ways this image name can be written
    ///
    /// On Docker Hub the registry host may be left out, or spelled
    /// `index.docker.io`, and the `library/` prefix of official images may be
    /// left out too. The result includes this name itself and keeps its tag
    /// and digest on every synonym. Names on other registries have no
    /// synonyms besides themselves.
    ///
    /// The synonyms are not necessarily normalized. In particular they may not
    /// have a host.
    ///
    /// ```
    /// # use image_identity::image::ImageName;
    /// let name = ImageName::parse("ubuntu").unwrap();
    /// let synonyms: Vec<String> = name.synonyms().iter().map(|s| s.to_string()).collect();
    /// assert_eq!(
    ///     synonyms,
    ///     vec![
    ///         "docker.io/library/ubuntu",
    ///         "index.docker.io/library/ubuntu",
    ///         "library/ubuntu",
    ///         "ubuntu",
    ///     ]
    /// );
    /// ```
    pub fn synonyms(&self) -> BTreeSet<ImageName> {
        let reference = match &self.reference {
            Some(reference) => reference,
            None => return iter::once(ImageName::EMPTY).collect(),
        };
        let (host, path) = host_path(reference);
        let mut names: BTreeSet<ImageName> = iter::once(self.clone()).collect();

        let defaults = DefaultRegistry::global();
        if !defaults.is_host(&host) {
            return names;
        }

        let mut candidates: Vec<(Option<&str>, &str)> = vec![(None, path.as_str())];
        if let Some((first, rest)) = path.split_once('/') {
            if defaults.library_prefix_str() == Some(first) && !rest.contains('/') {
                candidates.push((None, rest));
            }
        }
        for alias in &defaults.also_known_as {
            candidates.push((Some(alias.as_str()), path.as_str()));
        }
        candidates.push((Some(defaults.host.as_str()), path.as_str()));

        let canonical = normalized(reference);
        for (host, path) in candidates {
            match synonym(reference, &canonical, host, path) {
                Ok(name) => {
                    names.insert(name);
                }
                Err(err) => log::debug!(
                    "skipping synonym {:?} {:?} of {}: {}",
                    host,
                    path,
                    self,
                    err
                ),
            }
        }
        names
    }
}

/// Reparse a reference in canonical form
///
/// The reference was parsed once already, so failing here means the grammar
/// and the normalizer disagree.
fn normalized(reference: &Reference) -> Reference {
    Reference::parse_normalized(reference.as_str()).unwrap_or_else(|err| {
        log::error!("image name {:?} does not normalize: {}", reference.as_str(), err);
        panic!("image name {:?} does not normalize: {}", reference.as_str(), err)
    })
}

/// Split a name on its first slash into host and path
pub(crate) fn split_host_path(name: &str) -> Option<(&str, &str)> {
    name.split_once('/')
}

/// Find the host and path for a reference
///
/// A name with no slash at all has no host, so it is normalized first and
/// split again. Any other first path component is taken as the host, even
/// when the reference didn't parse it as a registry.
fn host_path(reference: &Reference) -> (String, String) {
    if let Some((host, path)) = split_host_path(reference.name()) {
        return (host.to_owned(), path.to_owned());
    }
    log::trace!("no host in {:?}, normalizing", reference.as_str());
    let normalized = normalized(reference);
    let (host, path) =
        split_host_path(normalized.name()).expect("normalized names always have a host");
    (host.to_owned(), path.to_owned())
}

/// Build one synonym from a new host and path, keeping the tag and digest of
/// the original
///
/// The synonym must normalize back to `canonical`, the original's normalized
/// form. Some spellings parse fine on their own but not as a normalized name,
/// like a bare 64-digit hex repository which reads as an image id.
fn synonym(
    original: &Reference,
    canonical: &Reference,
    host: Option<&str>,
    path: &str,
) -> Result<ImageName, ReferenceError> {
    let mut reference = Reference::from_parts(host, path, None, None)?;
    if let Some(tag) = original.tag_str() {
        reference = reference.with_tag(tag)?;
    }
    if let Some(digest) = original.content_digest_str() {
        reference = reference.with_digest(digest)?;
    }
    let renormalized = Reference::parse_normalized(reference.as_str())?;
    if &renormalized != canonical {
        return Err(ReferenceError::InvalidReferenceFormat(
            reference.as_str().to_owned(),
        ));
    }
    Ok(ImageName {
        reference: Some(reference),
    })
}

impl Eq for ImageName {}

impl PartialEq for ImageName {
    fn eq(&self, other: &Self) -> bool {
        self.as_str().eq(other.as_str())
    }
}

impl Hash for ImageName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for ImageName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for ImageName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl FromStr for ImageName {
    type Err = NameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageName::parse(s)
    }
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageName({:?})", self.as_str())
    }
}

impl serde::Serialize for ImageName {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ImageName {
    fn deserialize<D>(deserializer: D) -> Result<ImageName, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        if s.is_empty() {
            Ok(ImageName::EMPTY)
        } else {
            ImageName::parse(&s).map_err(serde::de::Error::custom)
        }
    }
}
