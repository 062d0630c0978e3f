//! Docker-compatible image reference grammar
//!
//! These types parse and validate the individual pieces of an image reference
//! and know how the default registry fills in missing ones. They do not know
//! about synonyms; see [crate::image::ImageName] for that.


mod default;
mod digest;
#[allow(clippy::module_inception)]
mod reference;
mod registry;
mod repository;
mod tag;

pub use default::DefaultRegistry;
pub use digest::ContentDigest;
pub use reference::Reference;
pub use registry::Registry;
pub use repository::{Repository, RepositoryIter, NAME_TOTAL_LENGTH_MAX};
pub use tag::Tag;
