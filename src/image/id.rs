use crate::image::Digest;
use std::fmt;

/// Identity of an image's content, independent of any name it is known by
///
/// An image id happens to be represented as a digest string. It is based on
/// the binary contents of an image, unlike the digest in an
/// [crate::image::ImageName] which identifies what a name refers to.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    /// The empty image id
    pub const EMPTY: Id = Id(String::new());

    /// Wrap an image id string, without checking its format
    pub fn new<S: Into<String>>(id: S) -> Self {
        Id(id.into())
    }

    /// Recover an image id from a name produced by [Id::filename]
    ///
    /// Only the first dash is turned back into a colon. This is exact for
    /// algorithm names without dashes, which includes `sha256` and `sha512`.
    ///
    /// ```
    /// # use image_identity::image::Id;
    /// let id = Id::from_filename("sha256-0123abcd");
    /// assert_eq!(id.as_str(), "sha256:0123abcd");
    /// ```
    pub fn from_filename(filename: &str) -> Self {
        Id(filename.replacen('-', ":", 1))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A filesystem-friendly name for this image id
    ///
    /// Filenames on Windows cannot contain `:`, so every colon becomes a dash.
    ///
    /// ```
    /// # use image_identity::image::Id;
    /// let id = Id::new("sha256:0123abcd");
    /// assert_eq!(id.filename(), "sha256-0123abcd");
    /// ```
    pub fn filename(&self) -> String {
        self.0.replace(':', "-")
    }
}

impl From<Digest> for Id {
    fn from(digest: Digest) -> Self {
        Id(digest.as_str().to_owned())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({:?})", self.0)
    }
}
