//! The seam between the importer and the surrounding build system.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// What kind of file an external reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// External tileset document (.tsx)
    Tileset,
    /// Atlas image of an inline tileset
    TilesetImage,
    /// Image shown by an image layer
    LayerImage,
    /// Object template (.tx)
    Template,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReferenceKind::Tileset => "tileset",
            ReferenceKind::TilesetImage => "tileset image",
            ReferenceKind::LayerImage => "layer image",
            ReferenceKind::Template => "template",
        })
    }
}

/// A request to build one external reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildRequest<'a> {
    pub kind: ReferenceKind,
    /// Canonical source path of the referenced file
    pub source: &'a Path,
}

/// Identifier of a built artifact, as handed out by the build system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactId(pub String);

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to an external reference built during an import.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExternalReferenceHandle {
    source: PathBuf,
    kind: ReferenceKind,
    artifact: ArtifactId,
}

impl ExternalReferenceHandle {
    pub fn new(source: impl Into<PathBuf>, kind: ReferenceKind, artifact: ArtifactId) -> Self {
        Self {
            source: source.into(),
            kind,
            artifact,
        }
    }

    /// Canonical path the artifact was built from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn artifact(&self) -> &ArtifactId {
        &self.artifact
    }
}

/// Failure reported by the build system while building an external reference.
///
/// Passed through to the caller as-is; the importer never retries.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BuildError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl BuildError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Services the build system provides to an import.
///
/// One context is borrowed mutably for the duration of a single import.
/// Implementations decide what "building" an asset means; the importer only
/// relies on the returned [`ArtifactId`].
pub trait BuildContext {
    /// Record that the import result must be rebuilt when `path` changes.
    fn add_dependency(&mut self, path: &Path);

    /// Build the referenced file and return an identifier for the artifact.
    fn build_asset(&mut self, request: &BuildRequest<'_>) -> Result<ArtifactId, BuildError>;

    /// Progress message sink.
    fn log(&mut self, message: &str) {
        info!(target: "tiledmap_pipeline", "{message}");
    }
}

impl<T: BuildContext + ?Sized> BuildContext for &mut T {
    fn add_dependency(&mut self, path: &Path) {
        (**self).add_dependency(path);
    }

    fn build_asset(&mut self, request: &BuildRequest<'_>) -> Result<ArtifactId, BuildError> {
        (**self).build_asset(request)
    }

    fn log(&mut self, message: &str) {
        (**self).log(message);
    }
}

/// A [`BuildContext`] that records everything it is asked to do.
///
/// Builds always succeed; the artifact ID is `"<kind>:<path>"`. Useful for
/// dry runs and for inspecting what an import depends on.
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    pub dependencies: Vec<PathBuf>,
    pub builds: Vec<(ReferenceKind, PathBuf)>,
    pub messages: Vec<String>,
}

impl BuildContext for RecordingContext {
    fn add_dependency(&mut self, path: &Path) {
        self.dependencies.push(path.to_path_buf());
    }

    fn build_asset(&mut self, request: &BuildRequest<'_>) -> Result<ArtifactId, BuildError> {
        self.builds
            .push((request.kind, request.source.to_path_buf()));
        Ok(ArtifactId(format!(
            "{}:{}",
            request.kind,
            request.source.display()
        )))
    }

    fn log(&mut self, message: &str) {
        info!(target: "tiledmap_pipeline", "{message}");
        self.messages.push(message.to_string());
    }
}
