//! Pairing rules: which two source pages share a sheet

/// Decides the (left, right) source pages of one sheet.
///
/// `sheet` is the zero-based sheet index, `page_count` the number of source
/// pages (always even and non-zero when called by the planner). Both returned
/// indices must be below `page_count` and distinct.
pub trait PairingRule {
    fn pair(&self, sheet: usize, page_count: usize) -> (usize, usize);
}

/// Built-in pairing rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pairing {
    /// Saddle-stitch order: the sequence is folded in half and every other
    /// sheet puts the later page on the left. Four pages give (4, 1), (2, 3).
    #[default]
    Booklet,
    /// The sequence is folded in half with the earlier page always on the
    /// left. Four pages give (1, 4), (2, 3).
    Fold,
    /// Consecutive pages side by side: (1, 2), (3, 4), ...
    Sequential,
}

impl PairingRule for Pairing {
    fn pair(&self, sheet: usize, page_count: usize) -> (usize, usize) {
        let mirror = page_count - 1 - sheet;
        match self {
            Pairing::Booklet if sheet % 2 == 0 => (mirror, sheet),
            Pairing::Booklet | Pairing::Fold => (sheet, mirror),
            Pairing::Sequential => (2 * sheet, 2 * sheet + 1),
        }
    }
}

impl std::fmt::Display for Pairing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pairing::Booklet => "booklet",
            Pairing::Fold => "fold",
            Pairing::Sequential => "sequential",
        };
        f.write_str(name)
    }
}
