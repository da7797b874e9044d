//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Height that keeps the source aspect ratio at the given width.
///
/// Rounds to the nearest pixel and never returns zero.
///
/// # Examples
/// ```
/// # use thumbwright::imaging::height_for_width;
/// assert_eq!(height_for_width((4000, 3000), 500), 375);
/// assert_eq!(height_for_width((1000, 1), 10), 1);
/// ```
pub fn height_for_width(source: (u32, u32), width: u32) -> u32 {
    let (src_w, src_h) = source;
    if src_w == 0 {
        return 1;
    }
    let h = (width as f64 * src_h as f64 / src_w as f64).round() as u32;
    h.max(1)
}

/// Watermark width for an output of `output_width` pixels at `percent` scale.
///
/// Integer percentage like the scale table itself, never zero.
pub fn watermark_width(output_width: u32, percent: u32) -> u32 {
    let w = (output_width as u64 * percent as u64 / 100) as u32;
    w.max(1)
}

/// Top-left offset that centers `overlay` on `base`.
///
/// Halves are taken independently, so odd sizes bias toward the top-left.
/// Offsets are negative when the overlay is larger than the base.
pub fn centered_offset(base: (u32, u32), overlay: (u32, u32)) -> (i64, i64) {
    let x = (base.0 / 2) as i64 - (overlay.0 / 2) as i64;
    let y = (base.1 / 2) as i64 - (overlay.1 / 2) as i64;
    (x, y)
}
