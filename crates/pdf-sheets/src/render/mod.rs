//! PDF rendering for sheet imposition
//!
//! - Reading source page geometry (with inherited attributes)
//! - Creating Form XObjects from source pages
//! - Deep copying resources into the output document
//! - Building the output sheets

mod sheet;
mod xobject;

pub use sheet::render_sheet;
pub use xobject::{EmbedCache, copy_object_deep, create_page_xobject, page_box};
