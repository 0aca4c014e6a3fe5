//! Two-up sheet imposition
//!
//! This module orchestrates a conversion:
//! 1. Count the source pages and plan the sheets (fails fast on a bad count)
//! 2. Embed each planned page as a Form XObject
//! 3. Draw the left and right halves of every sheet, in plan order

mod io;

pub use io::{load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};

use crate::constants::OUTPUT_PDF_VERSION;
use crate::layout::plan_sheets;
use crate::options::ImposeOptions;
use crate::render::{EmbedCache, render_sheet};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Main imposition function
pub async fn impose(source: &Document, options: &ImposeOptions) -> Result<Document> {
    options.validate()?;

    let source = source.clone();
    let options = options.clone();

    tokio::task::spawn_blocking(move || impose_sync(&source, &options)).await?
}

/// Load PDF bytes, impose them and serialize the result.
///
/// Either the complete output document is returned or an error; nothing is
/// produced for a rejected input.
pub async fn convert_bytes(bytes: Vec<u8>, options: &ImposeOptions) -> Result<Vec<u8>> {
    options.validate()?;

    let options = options.clone();
    tokio::task::spawn_blocking(move || {
        let source = Document::load_mem(&bytes)?;
        let output = impose_sync(&source, &options)?;
        io::write_document(output)
    })
    .await?
}

fn impose_sync(source: &Document, options: &ImposeOptions) -> Result<Document> {
    // Page tree order
    let page_ids: Vec<ObjectId> = source.get_pages().values().copied().collect();
    log::info!("Source document has {} pages", page_ids.len());

    let plan = plan_sheets(page_ids.len(), options)?;

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut cache = EmbedCache::new();
    let mut page_refs = Vec::with_capacity(plan.len());

    for (sheet_idx, spec) in plan.iter().enumerate() {
        log::debug!(
            "Sheet {}: left = page {}, right = page {}",
            sheet_idx + 1,
            spec.left_page_index + 1,
            spec.right_page_index + 1
        );
        let page_id = render_sheet(
            &mut output,
            source,
            &page_ids,
            spec,
            options.scaling,
            pages_tree_id,
            &mut cache,
        )?;
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    output.trailer.set("Root", catalog_id);

    output.compress();

    log::info!(
        "Imposed {} pages ({} embedded) onto {} sheets of {} x {} pt",
        plan.source_pages,
        cache.embedded_pages(),
        plan.len(),
        options.sheet.width_pt,
        options.sheet.height_pt
    );

    Ok(output)
}
