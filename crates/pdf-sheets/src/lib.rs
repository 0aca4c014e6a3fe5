//! Two-up sheet imposition for PDF documents.
//!
//! Source pages are paired onto landscape sheets (17×11 in by default) and
//! embedded as Form XObjects, so the output keeps the original vector content.

pub mod constants;
pub mod impose;
pub mod layout;
mod options;
pub mod render;
mod types;

pub use impose::{convert_bytes, impose, load_pdf, load_pdf_bytes, save_pdf, save_pdf_bytes};
pub use layout::{
    PageBox, Pairing, PairingRule, Placement, Rect, SheetGeometry, SheetPlan, SheetSpec,
    place_page, plan_sheets, plan_sheets_with,
};
pub use options::*;
pub use types::*;
