//! Pending-annotation buffer

use crate::owl::Annotation;

/// Annotations collected for the axiom currently under construction.
/// Drained exactly once, when that axiom is added.
#[derive(Debug, Clone, Default)]
pub struct PendingAnnotations {
    buffer: Vec<Annotation>,
}

impl PendingAnnotations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, annotation: Annotation) {
        self.buffer.push(annotation);
    }

    /// Take every buffered annotation, leaving the buffer empty
    pub fn drain(&mut self) -> Vec<Annotation> {
        std::mem::take(&mut self.buffer)
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }
}
