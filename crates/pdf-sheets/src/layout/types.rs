//! Layout data types for sheet imposition
//!
//! These types sit between the pairing rule and PDF rendering: a plan says
//! which pages go on which sheet, a placement says where the content lands.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, SHEET_HEIGHT_PT, SHEET_WIDTH_PT, in_to_pt};

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// The visible box of a source page (its MediaBox), in the page's own user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub llx: f32,
    pub lly: f32,
    pub urx: f32,
    pub ury: f32,
}

impl PageBox {
    /// Build a box from two corners in any order
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            llx: x0.min(x1),
            lly: y0.min(y1),
            urx: x0.max(x1),
            ury: y0.max(y1),
        }
    }

    /// A box with its origin at (0, 0)
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.urx - self.llx
    }

    pub fn height(&self) -> f32 {
        self.ury - self.lly
    }

    /// Zero-area boxes can't be scaled into a sheet
    pub fn is_degenerate(&self) -> bool {
        self.width() <= f32::EPSILON || self.height() <= f32::EPSILON
    }
}

impl Default for PageBox {
    fn default() -> Self {
        Self::sized(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }
}

/// Size of one output sheet in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SheetGeometry {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl Default for SheetGeometry {
    /// 17" × 11" landscape
    fn default() -> Self {
        Self {
            width_pt: SHEET_WIDTH_PT,
            height_pt: SHEET_HEIGHT_PT,
        }
    }
}

impl SheetGeometry {
    pub fn from_inches(width_in: f32, height_in: f32) -> Self {
        Self {
            width_pt: in_to_pt(width_in),
            height_pt: in_to_pt(height_in),
        }
    }

    /// Width of each of the two halves
    pub fn half_width_pt(&self) -> f32 {
        self.width_pt / 2.0
    }
}

/// One output sheet: which two source pages it carries, and its size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSpec {
    /// Source page index drawn on the left half
    pub left_page_index: usize,
    /// Source page index drawn on the right half
    pub right_page_index: usize,
    pub sheet_width_pt: f32,
    pub sheet_height_pt: f32,
}

impl SheetSpec {
    pub fn half_width_pt(&self) -> f32 {
        self.sheet_width_pt / 2.0
    }

    /// Area of the left half, at the sheet origin
    pub fn left_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.half_width_pt(), self.sheet_height_pt)
    }

    /// Area of the right half, starting at the middle of the sheet
    pub fn right_rect(&self) -> Rect {
        Rect::new(
            self.half_width_pt(),
            0.0,
            self.half_width_pt(),
            self.sheet_height_pt,
        )
    }
}

/// Ordered list of output sheets for one conversion
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan {
    /// Number of pages in the source document
    pub source_pages: usize,
    /// Sheets in output order
    pub sheets: Vec<SheetSpec>,
}

impl SheetPlan {
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SheetSpec> {
        self.sheets.iter()
    }
}

impl<'a> IntoIterator for &'a SheetPlan {
    type Item = &'a SheetSpec;
    type IntoIter = std::slice::Iter<'a, SheetSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.sheets.iter()
    }
}

/// Final placement of a source page on an output sheet
///
/// Holds the transformation matrix that maps the page's own coordinates
/// into the target half of the sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Area of the sheet reserved for this page; content is clipped to it
    pub target: Rect,
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}
