//! Navigation model types.
//!
//! These are the values that flow through the pipeline: headings as
//! supplied by a structure source, the references extracted from the
//! document text, and the outline handed to a renderer. Every value is
//! rebuilt from scratch on each render pass.

mod heading;
mod outline;

pub use heading::{AnnotatedHeading, Heading, NoteReference};
pub use outline::{Outline, OutlineNode};
