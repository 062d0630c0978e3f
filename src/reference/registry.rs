use crate::errors::ReferenceError;
use regex::Regex;
use std::{fmt, ops::Range, str::FromStr};

/// Host name of a Docker-style image registry server
///
/// This is a domain name with an optional port. Registry names only appear as
/// the first slash-separated section of an image reference, and they are told
/// apart from repository paths by the presence of a dot, a port, or the
/// special name `localhost`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Registry {
    serialized: String,
    domain_pos: Range<usize>,
    port: Option<u16>,
}

impl Registry {
    /// Returns a reference to the existing string representation of a
    /// [Registry]
    ///
    /// Always consists of a domain name with optional port, which have been
    /// validated by the parser.
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Registry]
    ///
    /// ```
    /// # use image_identity::reference::Registry;
    /// let registry = Registry::parse("localhost:5000").unwrap();
    /// assert_eq!(registry.domain_str(), "localhost");
    /// assert_eq!(registry.port(), Some(5000));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref RE: Regex = Regex::new(&format!("^{}$", Registry::regex_str())).unwrap();
        }
        let captures = RE
            .captures(s)
            .ok_or_else(|| ReferenceError::InvalidReferenceFormat(s.to_owned()))?;
        let port = match captures.name("reg_p") {
            None => None,
            Some(m) => Some(
                m.as_str()
                    .parse()
                    .map_err(|_| ReferenceError::InvalidReferenceFormat(s.to_owned()))?,
            ),
        };
        Ok(Registry {
            serialized: s.to_owned(),
            domain_pos: captures.name("reg_d").unwrap().range(),
            port,
        })
    }

    /// Returns a reference to the domain portion of the string
    pub fn domain_str(&self) -> &str {
        &self.serialized[self.domain_pos.clone()]
    }

    /// Returns the port, if present
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    /// Would this string be read as a registry if it began an image reference?
    ///
    /// True when the string contains a dot or a colon, or is exactly
    /// `localhost`. The string does not need to be a valid [Registry].
    pub fn looks_like_registry(s: &str) -> bool {
        s.contains(|c| c == '.' || c == ':') || s == "localhost"
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<reg>", // Main registry match group
            /*  */ "(?P<reg_d>", // registry domain match group
            /* -- */ "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])",
            /* -- */ "(?:", // Optional additional domain components
            /* -- -- */ "\\.",
            /* -- -- */ "(?:[a-zA-Z0-9]|[a-zA-Z0-9][a-zA-Z0-9-]*[a-zA-Z0-9])",
            /* -- */ ")*",
            /*  */ ")", // end registry domain match group
            /*  */ "(?::(?P<reg_p>[0-9]+))?", // Optional port number
            ")",
        )
    }
}

impl FromStr for Registry {
    type Err = ReferenceError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Registry::parse(s)
    }
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
