//! Shared configuration loader for the boxnote converter.
//!
//! `defaults/boxnote.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`BoxnoteConfig`].

use boxnote_babel::formats::html::Layout;
use boxnote_babel::{ConvertOptions, FsImageResolver};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/boxnote.default.toml");

/// Top-level configuration consumed by boxnote applications.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxnoteConfig {
    pub layout: LayoutConfig,
    pub convert: ConvertConfig,
    pub output: OutputConfig,
}

/// Mirrors the layout constants of the markup parser. Lengths are in inches.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    pub list_indent: f32,
    pub blockquote_indent: f32,
    pub indent_step: f32,
    pub max_indent: f32,
    pub table_style: Option<String>,
    pub paragraph_style: Option<String>,
}

impl From<&LayoutConfig> for Layout {
    fn from(config: &LayoutConfig) -> Self {
        Layout {
            list_indent: config.list_indent,
            blockquote_indent: config.blockquote_indent,
            indent_step: config.indent_step,
            max_indent: config.max_indent,
            table_style: config.table_style.clone(),
            paragraph_style: config.paragraph_style.clone(),
        }
    }
}

impl From<LayoutConfig> for Layout {
    fn from(config: LayoutConfig) -> Self {
        Layout::from(&config)
    }
}

/// Per-document conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub title: Option<String>,
    pub image_dir: String,
}

impl ConvertConfig {
    /// Conversion options for a document, using `fallback_title` unless a title is configured.
    pub fn options(&self, fallback_title: &str) -> ConvertOptions {
        ConvertOptions::new(self.title.as_deref().unwrap_or(fallback_title))
    }

    /// Filesystem image resolver rooted at `workdir`.
    pub fn resolver(&self, workdir: impl AsRef<Path>) -> FsImageResolver {
        FsImageResolver::new(workdir.as_ref()).with_image_dir(self.image_dir.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<BoxnoteConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<BoxnoteConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.layout.list_indent, 0.5);
        assert_eq!(config.layout.max_indent, 5.5);
        assert_eq!(config.layout.table_style.as_deref(), Some("TableGrid"));
        assert_eq!(config.layout.paragraph_style, None);
        assert_eq!(config.convert.title, None);
        assert_eq!(config.convert.image_dir, "Box Notes Images/{title} Images");
        assert_eq!(config.output.format, "treeviz");
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "tag")
            .expect("override to apply")
            .set_override("convert.title", "Standup")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "tag");
        assert_eq!(config.convert.options("fallback").title, "Standup");
    }

    #[test]
    fn layers_user_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boxnote.toml");
        fs::write(&path, "[layout]\nlist_indent = 0.75\nparagraph_style = \"Body\"\n").unwrap();

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.layout.list_indent, 0.75);
        // Untouched keys keep their defaults.
        assert_eq!(config.layout.indent_step, 0.25);
        assert_eq!(config.layout.paragraph_style.as_deref(), Some("Body"));
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let result = Loader::new().with_file("/nonexistent/boxnote.toml").build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/boxnote.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, "treeviz");
    }

    #[test]
    fn layout_config_converts_to_layout() {
        let config = load_defaults().expect("defaults to deserialize");
        let layout: Layout = (&config.layout).into();
        assert_eq!(
            layout,
            Layout {
                table_style: Some("TableGrid".into()),
                ..Layout::default()
            }
        );
    }

    #[test]
    fn title_falls_back_to_the_input_name() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.convert.options("notes").title, "notes");
    }
}
