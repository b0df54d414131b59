//! Rich document model.
//!
//! The paragraph/run/table/image tree rebuilt from markup by the tag-stream parser
//! and handed to a [`DocumentWriter`](crate::writer::DocumentWriter) afterwards.

pub mod nodes;
