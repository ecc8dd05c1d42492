use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tiledmap_pipeline_format::{MapDocument, ParseError, parse_map};
use tracing::{debug, warn};

use crate::context::{BuildContext, BuildError, ExternalReferenceHandle, ReferenceKind};
use crate::registry::ExternalReferenceRegistry;
use crate::resolve::InvalidPathError;
use crate::settings::ImportSettings;
use crate::validate::{OversizedMapError, validate};
use crate::walk::{resolve_tilesets, walk_layers};

// ============================================================================
// Errors
// ============================================================================

/// How far an import got before it stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportStage {
    Start,
    Parsed,
    TilesetsResolved,
    LayersWalked,
    Validated,
    Done,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImportStage::Start => "start",
            ImportStage::Parsed => "parsed",
            ImportStage::TilesetsResolved => "tilesets resolved",
            ImportStage::LayersWalked => "layers walked",
            ImportStage::Validated => "validated",
            ImportStage::Done => "done",
        })
    }
}

#[derive(Debug, Error)]
pub enum ImportErrorKind {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse map: {0}")]
    Parse(#[from] ParseError),

    #[error(transparent)]
    InvalidPath(#[from] InvalidPathError),

    #[error(transparent)]
    OversizedMap(#[from] OversizedMapError),

    #[error("Failed to build '{}': {source}", .path.display())]
    Build {
        path: PathBuf,
        #[source]
        source: BuildError,
    },
}

/// An aborted import: the map it was importing, the last stage it reached
/// and what went wrong.
#[derive(Debug, Error)]
#[error("Failed to import '{}' (stage: {stage}): {kind}", .path.display())]
pub struct ImportError {
    path: PathBuf,
    stage: ImportStage,
    #[source]
    kind: ImportErrorKind,
}

impl ImportError {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn stage(&self) -> ImportStage {
        self.stage
    }

    pub fn kind(&self) -> &ImportErrorKind {
        &self.kind
    }

    pub fn into_kind(self) -> ImportErrorKind {
        self.kind
    }
}

// ============================================================================
// Result
// ============================================================================

/// A successfully imported map.
///
/// Every reference in the document has been rewritten to its canonical path.
#[derive(Debug, Clone)]
pub struct ImportedMap {
    document: MapDocument,
    dependencies: Vec<PathBuf>,
    registry: ExternalReferenceRegistry,
}

impl ImportedMap {
    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    pub fn into_document(self) -> MapDocument {
        self.document
    }

    pub fn file_path(&self) -> &Path {
        &self.document.file_path
    }

    /// Every dependency reported to the build context, in report order.
    pub fn dependencies(&self) -> &[PathBuf] {
        &self.dependencies
    }

    /// External references built during the import, in first-build order.
    pub fn external_references(&self) -> impl Iterator<Item = &ExternalReferenceHandle> {
        self.registry.iter()
    }

    pub fn external_reference(&self, canonical_path: &Path) -> Option<&ExternalReferenceHandle> {
        self.registry.lookup(canonical_path)
    }
}

// ============================================================================
// Importer
// ============================================================================

/// Importer for Tiled maps (.tmx files)
///
/// An import runs in a single synchronous pass:
/// - parse the document
/// - resolve tileset references
/// - walk the layer tree for image and template references
/// - validate map limits
///
/// Every reference is rewritten to its canonical path, registered as a
/// dependency and, depending on [`ImportSettings`], built through the
/// [`BuildContext`]. The first failure aborts the import.
#[derive(Debug, Clone, Default)]
pub struct TiledMapImporter {
    settings: ImportSettings,
}

impl TiledMapImporter {
    pub fn new(settings: ImportSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    pub fn extensions(&self) -> &[&str] {
        &["tmx"]
    }

    /// Read the map at `file_path` from disk and import it.
    pub fn import<C: BuildContext + ?Sized>(
        &self,
        file_path: impl AsRef<Path>,
        context: &mut C,
    ) -> Result<ImportedMap, ImportError> {
        let file_path = file_path.as_ref();
        match fs::read(file_path) {
            Ok(bytes) => self.import_bytes(file_path, &bytes, context),
            Err(source) => Err(report_failure(
                context,
                ImportError {
                    path: file_path.to_path_buf(),
                    stage: ImportStage::Start,
                    kind: source.into(),
                },
            )),
        }
    }

    /// Import an in-memory document as if it were stored at `file_path`.
    ///
    /// References are resolved against the directory of `file_path`.
    pub fn import_bytes<C: BuildContext + ?Sized>(
        &self,
        file_path: impl AsRef<Path>,
        bytes: &[u8],
        context: &mut C,
    ) -> Result<ImportedMap, ImportError> {
        let file_path = file_path.as_ref();
        context.log(&format!("Importing '{}'", file_path.display()));

        let mut session = ImportSession {
            settings: self.settings,
            context,
            registry: ExternalReferenceRegistry::new(),
            dependencies: Vec::new(),
            stage: ImportStage::Start,
        };

        match session.run(file_path, bytes) {
            Ok(document) => {
                session
                    .context
                    .log(&format!("Imported '{}'", file_path.display()));
                Ok(ImportedMap {
                    document,
                    dependencies: session.dependencies,
                    registry: session.registry,
                })
            }
            Err(kind) => Err(report_failure(
                session.context,
                ImportError {
                    path: file_path.to_path_buf(),
                    stage: session.stage,
                    kind,
                },
            )),
        }
    }
}

fn report_failure<C: BuildContext + ?Sized>(context: &mut C, error: ImportError) -> ImportError {
    warn!(
        path = %error.path.display(),
        stage = %error.stage,
        "Import aborted: {}",
        error.kind
    );
    context.log(&error.to_string());
    error
}

/// State owned by a single import.
struct ImportSession<'a, C: ?Sized> {
    settings: ImportSettings,
    context: &'a mut C,
    registry: ExternalReferenceRegistry,
    dependencies: Vec<PathBuf>,
    stage: ImportStage,
}

impl<C: BuildContext + ?Sized> ImportSession<'_, C> {
    fn run(&mut self, file_path: &Path, bytes: &[u8]) -> Result<MapDocument, ImportErrorKind> {
        let mut document = parse_map(bytes)?;
        document.file_path = file_path.to_path_buf();
        self.advance(ImportStage::Parsed);

        let base_directory = file_path.parent().unwrap_or_else(|| Path::new(""));

        resolve_tilesets(&mut document.tilesets, base_directory, |kind, path| {
            self.register(kind, path)
        })?;
        self.advance(ImportStage::TilesetsResolved);

        walk_layers(&mut document.layers, base_directory, |kind, path| {
            self.register(kind, path)
        })?;
        self.advance(ImportStage::LayersWalked);

        validate(&document)?;
        self.advance(ImportStage::Validated);

        self.advance(ImportStage::Done);
        Ok(document)
    }

    fn advance(&mut self, stage: ImportStage) {
        debug!(from = %self.stage, to = %stage, "Import stage");
        self.stage = stage;
    }

    /// Register one reference with the build context, then build it if the
    /// settings ask for it.
    fn register(&mut self, kind: ReferenceKind, path: &Path) -> Result<(), ImportErrorKind> {
        self.context
            .log(&format!("Adding dependency for '{}'", path.display()));
        self.context.add_dependency(path);
        self.dependencies.push(path.to_path_buf());

        if !self.settings.should_build(kind) {
            debug!(path = %path.display(), %kind, "Dependency registered without build");
            return Ok(());
        }

        self.registry
            .get_or_build(&mut *self.context, kind, path)
            .map_err(|source| ImportErrorKind::Build {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }
}
