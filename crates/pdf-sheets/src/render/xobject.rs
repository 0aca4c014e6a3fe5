//! XObject creation for sheet imposition
//!
//! Each source page becomes one Form XObject in the output document, which
//! the sheet content stream then draws with a transformation matrix.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::PageBox;
use crate::types::{Result, SheetError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Guards against cyclic `Parent` chains in malformed page trees
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Objects already copied into the output document.
///
/// Shared by every sheet of one conversion, so a font or image used by
/// several source pages is copied once, and each source page is embedded once.
#[derive(Debug, Default)]
pub struct EmbedCache {
    /// Source object id -> output object id
    objects: HashMap<ObjectId, ObjectId>,
    /// Source page id -> output XObject id
    pages: HashMap<ObjectId, ObjectId>,
}

impl EmbedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of source pages embedded so far
    pub fn embedded_pages(&self) -> usize {
        self.pages.len()
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create (or reuse) the Form XObject for a source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Objects already copied into `output`
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut EmbedCache,
) -> Result<ObjectId> {
    if let Some(&id) = cache.pages.get(&page_id) {
        return Ok(id);
    }

    let page_dict = source.get_dictionary(page_id)?;
    let bbox = page_box(source, page_id);
    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("FormType", Object::Integer(1));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(bbox.llx),
            Object::Real(bbox.lly),
            Object::Real(bbox.urx),
            Object::Real(bbox.ury),
        ]),
    );

    // Resources may live on the page or on any ancestor in the page tree
    if let Some(resources) = inherited_attribute(source, page_id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, &mut cache.objects)?,
        );
    }

    let id = output.add_object(Stream::new(xobject_dict, content_data));
    cache.pages.insert(page_id, id);
    log::debug!("Embedded source page {:?} as XObject {:?}", page_id, id);
    Ok(id)
}

// =============================================================================
// Page Geometry
// =============================================================================

/// The MediaBox of a source page, following page-tree inheritance.
///
/// Falls back to US Letter when the box is missing or unreadable.
pub fn page_box(doc: &Document, page_id: ObjectId) -> PageBox {
    let numbers: Option<Vec<f32>> = inherited_attribute(doc, page_id, b"MediaBox")
        .and_then(|obj| resolve(doc, obj).as_array().ok())
        .map(|arr| arr.iter().filter_map(|n| extract_number(resolve(doc, n))).collect());

    match numbers.as_deref() {
        Some(&[x0, y0, x1, y1]) => {
            let page_box = PageBox::new(x0, y0, x1, y1);
            if page_box.is_degenerate() {
                PageBox::default()
            } else {
                page_box
            }
        }
        _ => PageBox::sized(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1),
    }
}

/// Look up an inheritable page attribute on the page or its ancestors
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..MAX_INHERITANCE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}

/// Follow one level of indirection
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => resolve(doc, c),
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Stream(stream) => stream_data(stream),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

/// Concatenate multiple content streams
fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        if let Object::Stream(stream) = resolve(doc, obj) {
            result.extend_from_slice(&stream_data(stream)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Plain content bytes of a stream; fails on filters lopdf cannot decode
fn stream_data(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Ok(stream.content.clone());
    }
    stream
        .decompressed_content()
        .map_err(|e| SheetError::UndecodableContent(e.to_string()))
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// `Parent` links are dropped so copying a resource never drags in the
/// source page tree.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            // Reserve the id first so self-referencing objects terminate
            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}
