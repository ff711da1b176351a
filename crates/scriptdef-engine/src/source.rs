//! Script handles supplied by the compiler host

use std::path::{Path, PathBuf};
use url::Url;

/// One unit of script source, owned by the host
///
/// The engine only reads from it.
pub trait SourceCode: Send + Sync {
    /// Display name (usually the file name)
    fn name(&self) -> Option<&str>;

    /// Script text
    fn text(&self) -> &str;

    /// Location URL of the script, for scripts that live outside memory
    fn external_location(&self) -> Option<&str> {
        None
    }
}

/// Script held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringScript {
    name: Option<String>,
    text: String,
    location: Option<String>,
}

impl StringScript {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            name: None,
            text: text.into(),
            location: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Pretend the script came from `location`
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl SourceCode for StringScript {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn external_location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

/// Script read from a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileScript {
    path: PathBuf,
    name: String,
    text: String,
    location: Option<String>,
}

impl FileScript {
    /// Read the script at `path`
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(path, text))
    }

    /// Script at `path` with already loaded `text`
    pub fn from_text(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let absolute = if path.is_absolute() {
            path.clone()
        } else {
            std::env::current_dir().unwrap_or_default().join(&path)
        };
        let location = Url::from_file_path(&absolute).ok().map(String::from);

        Self {
            path,
            name,
            text: text.into(),
            location,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SourceCode for FileScript {
    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn text(&self) -> &str {
        &self.text
    }

    fn external_location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}
