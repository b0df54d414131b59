//! Writer registry for writer discovery and selection
//!
//! Writers keep per-document state, so the registry stores factories and hands out a fresh
//! writer for every request.

use crate::error::ConvertError;
use crate::ir::nodes::Document;
use crate::writer::{write_document, DocumentWriter, SerializedDocument};
use std::collections::HashMap;

/// Builds a fresh writer instance.
pub type WriterFactory = fn() -> Box<dyn DocumentWriter>;

struct WriterEntry {
    factory: WriterFactory,
    extensions: Vec<String>,
}

/// Registry of document writers
///
/// # Examples
///
/// ```ignore
/// let registry = WriterRegistry::default();
/// let output = registry.write(&doc, "treeviz")?;
/// ```
pub struct WriterRegistry {
    writers: HashMap<String, WriterEntry>,
}

impl WriterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        WriterRegistry {
            writers: HashMap::new(),
        }
    }

    /// Register a writer factory
    ///
    /// The factory is probed once for the writer's name and extensions.
    /// If a writer with the same name already exists, it will be replaced.
    pub fn register(&mut self, factory: WriterFactory) {
        let probe = factory();
        let entry = WriterEntry {
            factory,
            extensions: probe
                .file_extensions()
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        };
        self.writers.insert(probe.name().to_string(), entry);
    }

    /// Create a fresh writer by name
    pub fn create(&self, name: &str) -> Result<Box<dyn DocumentWriter>, ConvertError> {
        self.writers
            .get(name)
            .map(|entry| (entry.factory)())
            .ok_or_else(|| ConvertError::WriterNotFound(name.to_string()))
    }

    /// Check if a writer exists
    pub fn has(&self, name: &str) -> bool {
        self.writers.contains_key(name)
    }

    /// List all available writer names (sorted)
    pub fn list_writers(&self) -> Vec<String> {
        let mut names: Vec<_> = self.writers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Detect writer from filename based on file extension
    pub fn detect_writer_from_filename(&self, filename: &str) -> Option<String> {
        let extension = std::path::Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?;

        self.writers
            .iter()
            .find(|(_, entry)| entry.extensions.iter().any(|ext| ext == extension))
            .map(|(name, _)| name.clone())
    }

    /// Drive a fresh writer of the given name over `doc` and return its output
    pub fn write(&self, doc: &Document, name: &str) -> Result<SerializedDocument, ConvertError> {
        let mut writer = self.create(name)?;
        write_document(doc, writer.as_mut())?;
        writer.finish()
    }

    /// Create a registry with default writers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(|| Box::new(crate::formats::tag::TagWriter::default()));
        registry.register(|| Box::new(crate::formats::treeviz::TreevizWriter::default()));

        registry
    }
}

impl Default for WriterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::nodes::{Alignment, Block, Inches, Paragraph, RunFormat};

    // Test writer
    #[derive(Default)]
    struct CountingWriter {
        paragraphs: usize,
    }

    impl DocumentWriter for CountingWriter {
        fn name(&self) -> &str {
            "test"
        }
        fn description(&self) -> &str {
            "Test writer"
        }
        fn file_extensions(&self) -> &[&str] {
            &["tst"]
        }
        fn create_document(&mut self) -> Result<(), ConvertError> {
            self.paragraphs = 0;
            Ok(())
        }
        fn add_paragraph(&mut self, _style: Option<&str>) -> Result<(), ConvertError> {
            self.paragraphs += 1;
            Ok(())
        }
        fn add_heading(&mut self, _level: u8) -> Result<(), ConvertError> {
            Ok(())
        }
        fn set_paragraph_alignment(&mut self, _alignment: Alignment) -> Result<(), ConvertError> {
            Ok(())
        }
        fn set_paragraph_indent(&mut self, _indent: Inches) -> Result<(), ConvertError> {
            Ok(())
        }
        fn add_run(&mut self, _text: &str) -> Result<(), ConvertError> {
            Ok(())
        }
        fn set_run_formatting(&mut self, _format: &RunFormat) -> Result<(), ConvertError> {
            Ok(())
        }
        fn add_break(&mut self) -> Result<(), ConvertError> {
            Ok(())
        }
        fn add_hyperlink(
            &mut self,
            _target: &str,
            _text: &str,
            _format: &RunFormat,
        ) -> Result<(), ConvertError> {
            Ok(())
        }
        fn add_table(
            &mut self,
            _rows: usize,
            _cols: usize,
            _style: Option<&str>,
        ) -> Result<(), ConvertError> {
            Ok(())
        }
        fn begin_cell(&mut self, _row: usize, _col: usize) -> Result<(), ConvertError> {
            Ok(())
        }
        fn add_image(&mut self, _source: &str) -> Result<(), ConvertError> {
            Ok(())
        }
        fn finish(&mut self) -> Result<SerializedDocument, ConvertError> {
            Ok(SerializedDocument::Text(format!(
                "{} paragraphs",
                self.paragraphs
            )))
        }
    }

    fn counting() -> Box<dyn DocumentWriter> {
        Box::new(CountingWriter::default())
    }

    #[test]
    fn test_registry_creation() {
        let registry = WriterRegistry::new();
        assert_eq!(registry.writers.len(), 0);
    }

    #[test]
    fn test_registry_register() {
        let mut registry = WriterRegistry::new();
        registry.register(counting);

        assert!(registry.has("test"));
        assert_eq!(registry.list_writers(), vec!["test"]);
    }

    #[test]
    fn test_registry_create_nonexistent() {
        let registry = WriterRegistry::new();
        match registry.create("nonexistent") {
            Err(ConvertError::WriterNotFound(name)) => assert_eq!(name, "nonexistent"),
            _ => panic!("Expected WriterNotFound error"),
        }
    }

    #[test]
    fn test_registry_write() {
        let mut registry = WriterRegistry::new();
        registry.register(counting);

        let doc = Document {
            blocks: vec![
                Block::Paragraph(Paragraph::default()),
                Block::Paragraph(Paragraph::default()),
            ],
        };
        let output = registry.write(&doc, "test").unwrap();
        assert_eq!(output, SerializedDocument::Text("2 paragraphs".into()));

        // Every write starts from a fresh writer.
        let output = registry.write(&doc, "test").unwrap();
        assert_eq!(output, SerializedDocument::Text("2 paragraphs".into()));
    }

    #[test]
    fn test_registry_replace_writer() {
        let mut registry = WriterRegistry::new();
        registry.register(counting);
        registry.register(counting);

        assert_eq!(registry.list_writers().len(), 1);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = WriterRegistry::default();
        assert!(registry.has("tag"));
        assert!(registry.has("treeviz"));
    }

    #[test]
    fn test_detect_writer_from_filename() {
        let registry = WriterRegistry::with_defaults();

        assert_eq!(
            registry.detect_writer_from_filename("doc.tag"),
            Some("tag".to_string())
        );
        assert_eq!(
            registry.detect_writer_from_filename("/path/to/doc.xml"),
            Some("tag".to_string())
        );
        assert_eq!(
            registry.detect_writer_from_filename("doc.tree"),
            Some("treeviz".to_string())
        );
        assert_eq!(
            registry.detect_writer_from_filename("doc.treeviz"),
            Some("treeviz".to_string())
        );
        assert_eq!(registry.detect_writer_from_filename("doc.docx"), None);
        assert_eq!(registry.detect_writer_from_filename("doc"), None);
    }
}
