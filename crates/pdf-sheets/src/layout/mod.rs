//! Layout calculation for two-up sheets
//!
//! - Pairing rules (which source pages share a sheet, and on which side)
//! - Sheet planning (one spec per output sheet)
//! - Content placement (scaling a page into its half of the sheet)

mod pairing;
mod placement;
mod planner;
mod types;

pub use pairing::*;
pub use placement::*;
pub use planner::*;
pub use types::*;
