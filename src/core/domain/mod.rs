//! Domain types.

mod publish;
mod secret;

pub use publish::{PublishReport, Stage};
pub use secret::{Provenance, Secret};
