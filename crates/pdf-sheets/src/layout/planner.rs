//! Sheet planning
//!
//! Turns a page count into the ordered list of output sheets. Planning is a
//! pure function of its inputs and runs before any PDF work, so a bad page
//! count is rejected without touching the document.

use crate::constants::PAGES_PER_SHEET;
use crate::options::ImposeOptions;
use crate::types::{Result, SheetError};

use super::{PairingRule, SheetGeometry, SheetPlan, SheetSpec};

/// Plan the output sheets for a document with `page_count` pages.
///
/// Enforces `options.required_pages` when set, then pairs pages with
/// `options.pairing` onto sheets of `options.sheet` size.
pub fn plan_sheets(page_count: usize, options: &ImposeOptions) -> Result<SheetPlan> {
    if let Some(expected) = options.required_pages {
        if page_count != expected {
            return Err(SheetError::InvalidPageCount {
                expected,
                found: page_count,
            });
        }
    }

    plan_sheets_with(page_count, &options.pairing, options.sheet)
}

/// Plan the output sheets using an arbitrary pairing rule.
///
/// Any non-zero even page count is accepted.
pub fn plan_sheets_with(
    page_count: usize,
    rule: &dyn PairingRule,
    sheet: SheetGeometry,
) -> Result<SheetPlan> {
    if page_count == 0 {
        return Err(SheetError::NoPages);
    }
    if page_count % PAGES_PER_SHEET != 0 {
        return Err(SheetError::UnpairablePageCount(page_count));
    }

    let sheets = (0..page_count / PAGES_PER_SHEET)
        .map(|index| {
            let (left, right) = rule.pair(index, page_count);
            if left == right || left >= page_count || right >= page_count {
                return Err(SheetError::Config(format!(
                    "Pairing rule placed pages ({}, {}) on sheet {} of a {}-page document",
                    left, right, index, page_count
                )));
            }
            Ok(SheetSpec {
                left_page_index: left,
                right_page_index: right,
                sheet_width_pt: sheet.width_pt,
                sheet_height_pt: sheet.height_pt,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!(
        "Planned {} sheets for {} pages: {:?}",
        sheets.len(),
        page_count,
        sheets
            .iter()
            .map(|s| (s.left_page_index, s.right_page_index))
            .collect::<Vec<_>>()
    );

    Ok(SheetPlan {
        source_pages: page_count,
        sheets,
    })
}
