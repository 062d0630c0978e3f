//! Canonical identity for container images
//!
//! Image references arrive in many equivalent spellings: `ubuntu`,
//! `library/ubuntu` and `docker.io/library/ubuntu` all name the same image.
//! [ImageName] parses any of them into one normalized form and can list the
//! others with [ImageName::synonyms], so tools can compare, deduplicate, and
//! look up images regardless of how a user wrote the name.
//!
//! ```
//! use image_identity::ImageName;
//!
//! let name: ImageName = "library/ubuntu:18.10".parse().unwrap();
//! assert_eq!(name.as_str(), "docker.io/library/ubuntu:18.10");
//! assert!(name
//!     .synonyms()
//!     .iter()
//!     .any(|synonym| synonym.as_str() == "ubuntu:18.10"));
//! ```

#[macro_use] extern crate lazy_static;
#[macro_use] extern crate serde;

pub mod errors;
pub mod image;
pub mod reference;

pub use crate::{
    errors::{NameError, ReferenceError},
    image::{Digest, Id, ImageName},
};
