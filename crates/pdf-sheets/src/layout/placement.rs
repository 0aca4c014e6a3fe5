//! Content placement within a half sheet
//!
//! Computes the `cm` matrix that draws a source page's MediaBox into its
//! target rectangle, according to the scaling mode.

use crate::types::ScalingMode;

use super::{PageBox, Placement, Rect};

/// Calculate where and how large a source page is drawn inside `target`.
///
/// The MediaBox origin of the source is compensated, so pages whose box
/// doesn't start at (0, 0) still land inside the target.
pub fn place_page(target: Rect, source: PageBox, mode: ScalingMode) -> Placement {
    let source = if source.is_degenerate() {
        PageBox::default()
    } else {
        source
    };
    let (src_width, src_height) = (source.width(), source.height());

    let (scale_x, scale_y) = match mode {
        ScalingMode::Stretch => (target.width / src_width, target.height / src_height),
        ScalingMode::Fit => {
            let scale = (target.width / src_width).min(target.height / src_height);
            (scale, scale)
        }
        ScalingMode::None => (1.0, 1.0),
    };

    // Center whatever doesn't fill the target exactly
    let offset_x = (target.width - src_width * scale_x) / 2.0;
    let offset_y = (target.height - src_height * scale_y) / 2.0;

    Placement {
        target,
        scale_x,
        scale_y,
        translate_x: target.x + offset_x - source.llx * scale_x,
        translate_y: target.y + offset_y - source.lly * scale_y,
    }
}

impl Placement {
    /// Content stream operators that draw `xobject_name` clipped to the target
    pub fn draw_command(&self, xobject_name: &str) -> String {
        let t = &self.target;
        format!(
            "q {} {} {} {} re W n {} 0 0 {} {} {} cm /{} Do Q\n",
            t.x,
            t.y,
            t.width,
            t.height,
            self.scale_x,
            self.scale_y,
            self.translate_x,
            self.translate_y,
            xobject_name
        )
    }
}
