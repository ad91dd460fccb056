//! Ontology renderers
//!
//! [`FunctionalRenderer`] writes OWL 2 functional syntax. RDF output lives
//! in [`crate::owl::RdfWriter`].

mod functional;

pub use functional::{FunctionalRenderer, RendererConfig};

use thiserror::Error;

/// Renderer errors
#[derive(Error, Debug)]
pub enum RenderError {
    /// Axiom type the syntax cannot express
    #[error("Unsupported construct: {0}")]
    Unsupported(String),

    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
