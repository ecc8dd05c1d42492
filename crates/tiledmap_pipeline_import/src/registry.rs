use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::context::{BuildContext, BuildError, BuildRequest, ExternalReferenceHandle, ReferenceKind};

/// Per-import cache of built external references, keyed by canonical path.
///
/// The first request for a path builds it through the [`BuildContext`]; every
/// later request returns the cached handle. A registry lives for exactly one
/// import, so concurrent imports must each own their own registry.
///
/// Handles are kept in the order they were first built.
#[derive(Debug, Clone, Default)]
pub struct ExternalReferenceRegistry {
    handles: IndexMap<PathBuf, ExternalReferenceHandle>,
}

impl ExternalReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the handle for `canonical_path`, building it on first request.
    ///
    /// A failed build is not cached; the error goes straight back to the
    /// caller.
    pub fn get_or_build<C: BuildContext + ?Sized>(
        &mut self,
        context: &mut C,
        kind: ReferenceKind,
        canonical_path: &Path,
    ) -> Result<ExternalReferenceHandle, BuildError> {
        if let Some(handle) = self.handles.get(canonical_path) {
            trace!(path = %canonical_path.display(), "External reference already built");
            return Ok(handle.clone());
        }

        let artifact = context.build_asset(&BuildRequest {
            kind,
            source: canonical_path,
        })?;
        debug!(
            path = %canonical_path.display(),
            %kind,
            %artifact,
            "Built external reference"
        );

        let handle = ExternalReferenceHandle::new(canonical_path, kind, artifact);
        self.handles
            .insert(canonical_path.to_path_buf(), handle.clone());
        Ok(handle)
    }

    /// Look up a previously built handle without building anything.
    pub fn lookup(&self, canonical_path: &Path) -> Option<&ExternalReferenceHandle> {
        self.handles.get(canonical_path)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExternalReferenceHandle> {
        self.handles.values()
    }
}
