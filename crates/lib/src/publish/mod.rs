//! Publishing and signing coordination.
//!
//! Publishing derives the module's coordinates from configuration plus the
//! explicit [`BuildEnv`], declares the `release` publication and its upload
//! target. Signing then covers every declared publication.

mod identity;
mod publication;
mod signing;

pub use identity::{BuildEnv, PublishIdentity, derive_publish_identity};
pub use publication::{
  Developer, License, PomMetadata, Publication, PublishedArtifact, RepositoryTarget, Scm, configure_publishing,
};
pub use signing::{SigningSettings, configure_signing};
