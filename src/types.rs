//! Size labels and the per-run request built from CLI flags.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One of the four predefined output widths.
///
/// Variants are declared in processing order; [`SizeLabel::ALL`] is the
/// canonical iteration order for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeLabel {
    S,
    M,
    L,
    Xl,
}

impl SizeLabel {
    pub const ALL: [SizeLabel; 4] = [SizeLabel::S, SizeLabel::M, SizeLabel::L, SizeLabel::Xl];

    /// Short form used for directory names and env keys.
    pub fn as_str(self) -> &'static str {
        match self {
            SizeLabel::S => "s",
            SizeLabel::M => "m",
            SizeLabel::L => "l",
            SizeLabel::Xl => "xl",
        }
    }

    /// Environment key holding this label's pixel width.
    pub fn dimension_key(self) -> &'static str {
        match self {
            SizeLabel::S => "DIMENSION_S",
            SizeLabel::M => "DIMENSION_M",
            SizeLabel::L => "DIMENSION_L",
            SizeLabel::Xl => "DIMENSION_XL",
        }
    }

    /// Small variants are never watermarked.
    pub fn takes_watermark(self) -> bool {
        matches!(self, SizeLabel::M | SizeLabel::L | SizeLabel::Xl)
    }

    /// Watermark width as a percentage of the resized output width.
    pub fn watermark_scale_percent(self) -> u32 {
        match self {
            SizeLabel::L => 66,
            SizeLabel::M => 33,
            _ => 100,
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which size labels are enabled for this run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeSelection {
    enabled: [bool; 4],
}

impl SizeSelection {
    /// Build from the individual size flags; `all` enables every label.
    pub fn from_flags(all: bool, small: bool, medium: bool, large: bool, extra_large: bool) -> Self {
        Self {
            enabled: [all || small, all || medium, all || large, all || extra_large],
        }
    }

    #[cfg(test)]
    pub(crate) fn all() -> Self {
        Self { enabled: [true; 4] }
    }

    #[cfg(test)]
    pub(crate) fn only(labels: &[SizeLabel]) -> Self {
        let mut selection = Self::default();
        for label in labels {
            selection.enabled[*label as usize] = true;
        }
        selection
    }

    pub fn contains(&self, label: SizeLabel) -> bool {
        self.enabled[label as usize]
    }

    pub fn is_empty(&self) -> bool {
        !self.enabled.iter().any(|&on| on)
    }

    /// Enabled labels in processing order.
    pub fn iter(&self) -> impl Iterator<Item = SizeLabel> + '_ {
        SizeLabel::ALL
            .into_iter()
            .filter(move |label| self.contains(*label))
    }
}

/// A single invocation: one input file, the enabled sizes, and whether to watermark.
#[derive(Debug, Clone)]
pub struct Request {
    pub input: PathBuf,
    pub sizes: SizeSelection,
    pub watermark: bool,
}
