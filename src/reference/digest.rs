use crate::errors::ReferenceError;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::{fmt, ops::Range, str::FromStr};

/// A validated digest which identifies the contents of a binary object
///
/// Digests are an algorithm name and a hex-encoded hash separated by a colon,
/// for example `sha256:2fb7bfc6...`. The only algorithm we compute ourselves is
/// `sha256`, but any well-formed algorithm name is accepted.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    serialized: String,
    algorithm_pos: Range<usize>,
    hex_pos: Range<usize>,
}

impl ContentDigest {
    /// Returns a reference to the existing string representation of a
    /// [ContentDigest]
    ///
    /// This string always has a single colon. After the colon are 32 or more
    /// hexadecimal digits. The algorithm before the colon is alphanumeric,
    /// with plus, dash, underscore, or dot characters allowed as separators
    /// between groups that each begin with a letter.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Create a new ContentDigest from parts
    pub fn from_parts<T: fmt::LowerHex>(
        algorithm: &str,
        hex_part: &T,
    ) -> Result<Self, ReferenceError> {
        ContentDigest::parse(&format!("{}:{:x}", algorithm, hex_part))
    }

    /// Create a new ContentDigest by hashing content with `sha256`
    ///
    /// ```
    /// # use image_identity::reference::ContentDigest;
    /// let digest = ContentDigest::from_content(b"cat");
    /// assert_eq!(digest.as_str(), "sha256:77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e");
    /// ```
    pub fn from_content(content_bytes: &[u8]) -> Self {
        ContentDigest::from_parts("sha256", &Sha256::digest(content_bytes))
            .expect("sha256 digests are well formed")
    }

    /// Parse a [prim@str] as a [ContentDigest]
    ///
    /// ```
    /// # use image_identity::reference::ContentDigest;
    /// let digest = ContentDigest::parse("sha256:00112233445566778899aabbccddeeff").unwrap();
    /// assert_eq!(digest.algorithm_str(), "sha256");
    /// assert_eq!(digest.hex_str(), "00112233445566778899aabbccddeeff")
    /// ```
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref RE: Regex =
                Regex::new(&format!("^{}$", ContentDigest::regex_str())).unwrap();
        }
        match RE.captures(s) {
            None => Err(ReferenceError::InvalidDigestFormat(s.to_owned())),
            Some(captures) => Ok(ContentDigest {
                serialized: s.to_owned(),
                algorithm_pos: captures.name("dig_f").unwrap().range(),
                hex_pos: captures.name("dig_h").unwrap().range(),
            }),
        }
    }

    /// Return a reference to the algorithm portion of this digest
    pub fn algorithm_str(&self) -> &str {
        &self.serialized[self.algorithm_pos.clone()]
    }

    /// Return a reference to the hexadecimal portion of this digest
    pub fn hex_str(&self) -> &str {
        &self.serialized[self.hex_pos.clone()]
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<dig>", // digest group
            /*  */ "(?P<dig_f>", // algorithm group
            /* -- */ "[a-zA-Z][a-zA-Z0-9]*",
            /* -- */ "(?:[-_+.][a-zA-Z][a-zA-Z0-9]*)*",
            /*  */ ")",
            /*  */ "[:]",
            /*  */ "(?P<dig_h>[0-9a-fA-F]{32,})",
            ")",
        )
    }
}

impl FromStr for ContentDigest {
    type Err = ReferenceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentDigest::parse(s)
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
