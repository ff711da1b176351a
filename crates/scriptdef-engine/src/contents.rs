//! Resolver view of a host script handle

use crate::source::SourceCode;
use scriptdef_resolver::ScriptContents;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use url::Url;

/// Exposes a [`SourceCode`] as [`ScriptContents`]
///
/// The backing file is derived from the location on first use and cached.
/// The text is read through on every call.
pub struct ScriptContentsAdapter<'a> {
    script: &'a dyn SourceCode,
    file: OnceLock<Option<PathBuf>>,
}

impl<'a> ScriptContentsAdapter<'a> {
    pub fn new(script: &'a dyn SourceCode) -> Self {
        Self {
            script,
            file: OnceLock::new(),
        }
    }
}

impl ScriptContents for ScriptContentsAdapter<'_> {
    fn file(&self) -> Option<&Path> {
        self.file
            .get_or_init(|| self.script.external_location().and_then(to_file_or_none))
            .as_deref()
    }

    fn text(&self) -> &str {
        self.script.text()
    }
}

/// Canonical file path of a `file:` URL
///
/// Malformed URLs and other schemes give `None`. Paths that cannot be
/// canonicalized (e.g. not on disk yet) are returned as converted.
pub fn to_file_or_none(location: &str) -> Option<PathBuf> {
    let url = Url::parse(location).ok()?;
    if url.scheme() != "file" {
        return None;
    }

    let path = url.to_file_path().ok()?;
    // Blocking, but runs at most once per adapter
    Some(std::fs::canonicalize(&path).unwrap_or(path))
}
