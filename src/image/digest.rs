use crate::{errors::ReferenceError, reference::ContentDigest};
use std::fmt;

/// Digest of an image's content, as carried by an image name
///
/// This is the raw digest string, such as `sha256:2fb7bf...`. No validation
/// happens here; use [Digest::content_digest] when the grammar matters. The
/// empty digest, [Digest::EMPTY], stands for "no digest" and is distinct from
/// every real digest.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// The empty digest
    pub const EMPTY: Digest = Digest(String::new());

    /// Wrap a digest string, without checking its format
    pub fn new<S: Into<String>>(digest: S) -> Self {
        Digest(digest.into())
    }

    /// Calculate the `sha256` digest of some content
    pub fn from_content(content_bytes: &[u8]) -> Self {
        ContentDigest::from_content(content_bytes).into()
    }

    /// Returns the digest string, which is empty for [Digest::EMPTY]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check the digest string against the digest grammar
    pub fn content_digest(&self) -> Result<ContentDigest, ReferenceError> {
        ContentDigest::parse(&self.0)
    }
}

impl From<ContentDigest> for Digest {
    fn from(digest: ContentDigest) -> Self {
        Digest(digest.as_str().to_owned())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({:?})", self.0)
    }
}
