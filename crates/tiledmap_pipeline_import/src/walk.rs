//! Discovery of external references in tilesets and the layer tree.
//!
//! Every reference found is rewritten in place to its canonical path and then
//! reported through a callback, in document order.

use std::path::Path;
use std::slice::IterMut;

use tiledmap_pipeline_format::{Layer, LayerKind, TilesetRef};
use tracing::trace;

use crate::context::ReferenceKind;
use crate::resolve::{InvalidPathError, rewrite_in_place};

/// Resolve the reference of every tileset, in order.
///
/// External tilesets report their .tsx source, inline tilesets their atlas
/// image. An inline image without a source (embedded image data) has nothing
/// to resolve.
pub fn resolve_tilesets<E, F>(
    tilesets: &mut [TilesetRef],
    base_directory: &Path,
    mut on_dependency: F,
) -> Result<(), E>
where
    E: From<InvalidPathError>,
    F: FnMut(ReferenceKind, &Path) -> Result<(), E>,
{
    for tileset in tilesets {
        let (field, kind) = match tileset {
            TilesetRef::External { source, .. } => (source, ReferenceKind::Tileset),
            TilesetRef::Inline(inline) => {
                if inline.image.source.trim().is_empty() {
                    trace!(tileset = %inline.name, "Inline tileset image has no source");
                    continue;
                }
                (&mut inline.image.source, ReferenceKind::TilesetImage)
            }
        };

        let resolved = rewrite_in_place(field, base_directory)?;
        on_dependency(kind, &resolved)?;
    }
    Ok(())
}

/// Walk a layer tree depth-first and resolve every reference it contains.
///
/// Parents are visited before their children and siblings in document order.
/// Group layers keep the same `base_directory`. Nesting is tracked on an
/// explicit stack of sibling iterators, so arbitrarily deep groups do not
/// grow the call stack.
///
/// Stops at the first error, either from path rewriting or from
/// `on_dependency`.
pub fn walk_layers<E, F>(
    layers: &mut [Layer],
    base_directory: &Path,
    mut on_dependency: F,
) -> Result<(), E>
where
    E: From<InvalidPathError>,
    F: FnMut(ReferenceKind, &Path) -> Result<(), E>,
{
    let mut stack: Vec<IterMut<'_, Layer>> = vec![layers.iter_mut()];

    while let Some(siblings) = stack.last_mut() {
        let Some(layer) = siblings.next() else {
            stack.pop();
            continue;
        };

        match &mut layer.kind {
            LayerKind::Tiles(_) => {}
            LayerKind::Image(image_layer) => {
                let Some(image) = image_layer.image.as_mut() else {
                    trace!(layer = %layer.name, "Image layer has no image");
                    continue;
                };
                if image.source.trim().is_empty() {
                    continue;
                }
                let resolved = rewrite_in_place(&mut image.source, base_directory)?;
                on_dependency(ReferenceKind::LayerImage, &resolved)?;
            }
            LayerKind::Objects(object_layer) => {
                for object in &mut object_layer.objects {
                    let Some(template) = object.template_source_mut() else {
                        continue;
                    };
                    let resolved = rewrite_in_place(template, base_directory)?;
                    on_dependency(ReferenceKind::Template, &resolved)?;
                }
            }
            LayerKind::Group(group) => stack.push(group.layers.iter_mut()),
        }
    }

    Ok(())
}
