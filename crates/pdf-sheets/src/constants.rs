//! Shared constants for sheet imposition

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch
pub const POINTS_PER_INCH: f32 = 72.0;

/// Convert inches to points
#[inline]
pub fn in_to_pt(inches: f32) -> f32 {
    inches * POINTS_PER_INCH
}

// =============================================================================
// Sheet Geometry
// =============================================================================

/// Output sheet width in points (17")
pub const SHEET_WIDTH_PT: f32 = 17.0 * POINTS_PER_INCH;

/// Output sheet height in points (11")
pub const SHEET_HEIGHT_PT: f32 = 11.0 * POINTS_PER_INCH;

// =============================================================================
// Source Pages
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

/// Page count accepted unless the options say otherwise
pub const REQUIRED_PAGE_COUNT: usize = 4;

/// Source pages per output sheet
pub const PAGES_PER_SHEET: usize = 2;

// =============================================================================
// Output
// =============================================================================

/// File name offered for the converted document
pub const OUTPUT_FILE_NAME: &str = "converted_17x11.pdf";

/// PDF version written to the output document
pub const OUTPUT_PDF_VERSION: &str = "1.7";
