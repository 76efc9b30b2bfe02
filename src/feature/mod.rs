//! Feature assembly and rendering.

mod assembler;
mod model;
mod serializer;

pub use assembler::{BackgroundPolicy, FeatureAssembler, StepMatching};
pub use model::{Background, FeatureFile, FeatureMetadata};
pub use serializer::{FeatureSerializer, OutputFormat};
