//! Sheet rendering for imposition

use crate::layout::{SheetSpec, place_page};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::{EmbedCache, create_page_xobject, page_box};

/// Render one output sheet into the output document.
///
/// The left page is drawn at the sheet origin, the right page at half the
/// sheet width. Returns the object ID of the new page, which is not yet
/// linked into the page tree's `Kids`.
pub fn render_sheet(
    output: &mut Document,
    source: &Document,
    source_page_ids: &[ObjectId],
    spec: &SheetSpec,
    scaling: ScalingMode,
    parent_pages_id: ObjectId,
    cache: &mut EmbedCache,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(spec.sheet_width_pt),
            Object::Real(spec.sheet_height_pt),
        ]),
    );

    let mut content_ops = String::new();
    let mut xobjects = Dictionary::new();

    let halves = [
        (spec.left_page_index, spec.left_rect()),
        (spec.right_page_index, spec.right_rect()),
    ];
    for (source_idx, target) in halves {
        let source_page_id = *source_page_ids
            .get(source_idx)
            .ok_or(SheetError::MissingPage(source_idx))?;

        let xobject_name = format!("P{}", source_idx);
        let xobject_id = create_page_xobject(output, source, source_page_id, cache)?;
        xobjects.set(xobject_name.clone(), Object::Reference(xobject_id));

        let placement = place_page(target, page_box(source, source_page_id), scaling);
        content_ops.push_str(&placement.draw_command(&xobject_name));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content_id = output.add_object(Stream::new(Dictionary::new(), content_ops.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}
