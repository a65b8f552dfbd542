//! Media inspection adapters

mod inspect;

pub use inspect::{SymphoniaDecoder, SymphoniaMetadataReader};
