//! Container image names and content identities

#[cfg(test)] mod tests;

mod digest;
mod id;
mod name;

pub use digest::Digest;
pub use id::Id;
pub use name::ImageName;
