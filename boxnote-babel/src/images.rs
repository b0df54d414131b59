//! Image resolution
//!
//! Both directions of the conversion meet images: the walker turns a BoxNote `image` node into
//! an `<img src>` reference, and the tag-stream parser turns `<img src>` back into an image
//! block. Neither knows where images live, so both ask an [`ImageResolver`].
//!
//! Resolution never fails loudly. An image that cannot be found is reported as `None` and the
//! caller omits it.

use log::debug;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use url::Url;

/// Credentials for remote image lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

/// Per-document context handed to [`ImageResolver::resolve`].
#[derive(Debug, Clone, Copy)]
pub struct ImageRequest<'a> {
    pub title: &'a str,
    pub workdir: &'a Path,
    pub credentials: &'a Credentials,
}

pub trait ImageResolver {
    /// Map the attrs of a BoxNote `image` node to a markup `src`.
    fn resolve(&self, attrs: &Map<String, Value>, request: &ImageRequest<'_>) -> Option<String>;

    /// Map a markup `src` to the location handed to the document writer.
    fn locate(&self, src: &str) -> Option<String> {
        Some(src.to_string())
    }
}

/// Resolver that knows no images at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
    fn resolve(&self, _attrs: &Map<String, Value>, _request: &ImageRequest<'_>) -> Option<String> {
        None
    }

    fn locate(&self, _src: &str) -> Option<String> {
        None
    }
}

pub const DEFAULT_IMAGE_DIR: &str = "Box Notes Images/{title} Images";

/// Resolves images exported next to the note on the local filesystem.
///
/// `resolve` points at `{image_dir}/{fileName}` (with `{title}` substituted in `image_dir`);
/// `locate` accepts only sources that exist as files below the working directory.
#[derive(Debug, Clone)]
pub struct FsImageResolver {
    workdir: PathBuf,
    image_dir: String,
}

impl FsImageResolver {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        FsImageResolver {
            workdir: workdir.into(),
            image_dir: DEFAULT_IMAGE_DIR.to_string(),
        }
    }

    pub fn with_image_dir(mut self, image_dir: impl Into<String>) -> Self {
        self.image_dir = image_dir.into();
        self
    }
}

fn is_remote(src: &str) -> bool {
    Url::parse(src)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl ImageResolver for FsImageResolver {
    fn resolve(&self, attrs: &Map<String, Value>, request: &ImageRequest<'_>) -> Option<String> {
        let file_name = attrs
            .get("fileName")
            .and_then(Value::as_str)
            .filter(|name| !name.is_empty())?;
        let dir = self.image_dir.replace("{title}", request.title);
        Some(format!("{dir}/{file_name}"))
    }

    fn locate(&self, src: &str) -> Option<String> {
        if src.is_empty() {
            return None;
        }
        if is_remote(src) {
            debug!("remote image {src} not fetched");
            return None;
        }
        let path = self.workdir.join(src);
        if path.is_file() {
            Some(path.to_string_lossy().into_owned())
        } else {
            debug!("image {} not found", path.display());
            None
        }
    }
}
