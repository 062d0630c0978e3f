//! Error types you might see while parsing or transforming image names

use thiserror::Error;

/// Errors from the image reference grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    /// invalid reference format
    #[error("invalid reference format{}", quoted_input(.0))]
    InvalidReferenceFormat(String),

    /// invalid tag format
    #[error("invalid tag format: {0:?}")]
    InvalidTagFormat(String),

    /// invalid digest format
    #[error("invalid digest format: {0:?}")]
    InvalidDigestFormat(String),

    /// repository name is longer than the registry protocol allows
    #[error("repository name must not be more than {max} characters: {name:?}")]
    NameTooLong { name: String, max: usize },

    /// repository name contains uppercase characters
    #[error("invalid reference format, repository name must be lowercase: {0:?}")]
    NameNotLowercase(String),

    /// a bare image id was given where a repository name was expected
    #[error("invalid repository name, cannot specify 64-byte hexadecimal strings: {0:?}")]
    NameIsIdentifier(String),
}

/// Formats the offending input after a colon, or nothing for empty input
fn quoted_input(input: &str) -> String {
    if input.is_empty() {
        String::new()
    } else {
        format!(": {:?}", input)
    }
}

/// Errors from operations on an [crate::image::ImageName]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// the image name could not be parsed
    #[error(transparent)]
    Parse(#[from] ReferenceError),

    /// the tag could not be applied to the image name
    #[error("cannot apply tag {tag} to image name {name}: {source}")]
    ApplyTag {
        tag: String,
        name: String,
        source: ReferenceError,
    },

    /// the digest could not be applied to the image name
    #[error("cannot apply digest {digest} to image name {name}: {source}")]
    ApplyDigest {
        digest: String,
        name: String,
        source: ReferenceError,
    },

    /// the operation has no meaning for the empty image name
    #[error("the empty image name has no host or path")]
    Empty,
}
