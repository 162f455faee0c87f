//! Scroll state for the preview pane.
//!
//! The preview is a flat list of rendered lines; [`Viewport`] tracks which
//! slice of that list is on screen. Wrapping happens upstream when the
//! lines are rendered, so the viewport only deals in whole lines and a
//! vertical offset.

use std::ops::Range;

/// Vertical scroll position over the rendered preview lines.
///
/// The offset is always kept within `0..=max_offset`, where the maximum
/// leaves the last page of lines filling the pane. Every mutation clamps,
/// so callers never see an out-of-range offset.
///
/// # Example
///
/// ```
/// use mdraft::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(24, 100);
/// assert_eq!(vp.visible_range(), 0..24);
///
/// vp.scroll_down(10);
/// assert_eq!(vp.visible_range(), 10..34);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    height: u16,
    offset: usize,
    total_lines: usize,
}

impl Viewport {
    /// Create a viewport over `total_lines` rendered lines, showing
    /// `height` of them at a time.
    pub const fn new(height: u16, total_lines: usize) -> Self {
        Self {
            height,
            offset: 0,
            total_lines,
        }
    }

    /// First visible line index.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Pane height in lines.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Number of rendered lines being scrolled over.
    pub const fn total_lines(&self) -> usize {
        self.total_lines
    }

    /// The line indices currently on screen, clamped to the rendered
    /// line count.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.offset;
        let end = (self.offset + self.height as usize).min(self.total_lines);
        start..end
    }

    /// Scroll position as a percentage (0-100). A preview that fits on
    /// one screen reads as 100.
    pub fn scroll_percent(&self) -> u8 {
        if self.total_lines == 0 {
            return 100;
        }

        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }

        // Percentage value always 0-100
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    /// Scroll up by `n` lines.
    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    /// Scroll down by `n` lines.
    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn half_page_up(&mut self) {
        self.scroll_up(self.height as usize / 2);
    }

    pub fn half_page_down(&mut self) {
        self.scroll_down(self.height as usize / 2);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Change the pane height, clamping the offset if the preview no
    /// longer extends past it.
    pub fn resize(&mut self, height: u16) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the rendered line count after an edit re-renders the
    /// preview, clamping the offset to the new extent.
    pub fn set_total_lines(&mut self, total: usize) {
        self.total_lines = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_lines.saturating_sub(self.height as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(24, 100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_visible_range_at_top() {
        let vp = Viewport::new(24, 100);
        assert_eq!(vp.visible_range(), 0..24);
    }

    #[test]
    fn test_visible_range_at_bottom() {
        let mut vp = Viewport::new(24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.visible_range(), 76..100);
    }

    #[test]
    fn test_visible_range_with_short_preview() {
        let vp = Viewport::new(24, 10);
        assert_eq!(vp.visible_range(), 0..10);
    }

    #[test]
    fn test_scroll_down() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(10);
        assert_eq!(vp.offset(), 10);
    }

    #[test]
    fn test_scroll_down_clamps_to_max() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(1000);
        assert_eq!(vp.offset(), 76); // 100 - 24 = 76
    }

    #[test]
    fn test_scroll_up() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(50);
        vp.scroll_up(20);
        assert_eq!(vp.offset(), 30);
    }

    #[test]
    fn test_scroll_up_clamps_to_zero() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(10);
        vp.scroll_up(100);
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_page_down() {
        let mut vp = Viewport::new(24, 100);
        vp.page_down();
        assert_eq!(vp.offset(), 24);
    }

    #[test]
    fn test_page_up() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(50);
        vp.page_up();
        assert_eq!(vp.offset(), 26);
    }

    #[test]
    fn test_half_page_down() {
        let mut vp = Viewport::new(24, 100);
        vp.half_page_down();
        assert_eq!(vp.offset(), 12);
    }

    #[test]
    fn test_half_page_up() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(30);
        vp.half_page_up();
        assert_eq!(vp.offset(), 18);
    }

    #[test]
    fn test_go_to_top() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(50);
        vp.go_to_top();
        assert_eq!(vp.offset(), 0);
    }

    #[test]
    fn test_go_to_bottom() {
        let mut vp = Viewport::new(24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.offset(), 76);
    }

    #[test]
    fn test_scroll_percent_at_top() {
        let vp = Viewport::new(24, 100);
        assert_eq!(vp.scroll_percent(), 0);
    }

    #[test]
    fn test_scroll_percent_at_bottom() {
        let mut vp = Viewport::new(24, 100);
        vp.go_to_bottom();
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_scroll_percent_empty_preview() {
        let vp = Viewport::new(24, 0);
        assert_eq!(vp.scroll_percent(), 100);
    }

    #[test]
    fn test_can_scroll_down_at_bottom() {
        let mut vp = Viewport::new(24, 100);
        vp.go_to_bottom();
        assert!(!vp.can_scroll_down());
    }

    #[test]
    fn test_resize_keeps_valid_offset() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(50);
        vp.resize(60);
        assert_eq!(vp.offset(), 40); // max_offset is now 40
    }

    #[test]
    fn test_set_total_lines_adjusts_offset() {
        let mut vp = Viewport::new(24, 100);
        vp.scroll_down(80);
        vp.set_total_lines(50);
        assert_eq!(vp.offset(), 26); // max_offset is now 26
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn scroll_never_exceeds_bounds(
                total_lines in 1..10000usize,
                height in 1..100u16,
                scroll_amount in 0..10000usize,
            ) {
                let mut vp = Viewport::new(height, total_lines);
                vp.scroll_down(scroll_amount);

                let max = total_lines.saturating_sub(height as usize);
                prop_assert!(vp.offset() <= max);
            }

            #[test]
            fn visible_range_within_bounds(
                total_lines in 0..10000usize,
                height in 1..100u16,
                offset in 0..10000usize,
            ) {
                let mut vp = Viewport::new(height, total_lines);
                vp.scroll_down(offset);

                let range = vp.visible_range();
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total_lines);
            }

            #[test]
            fn percent_always_valid(
                total_lines in 0..10000usize,
                height in 1..100u16,
                offset in 0..10000usize,
            ) {
                let mut vp = Viewport::new(height, total_lines);
                vp.scroll_down(offset);

                let percent = vp.scroll_percent();
                prop_assert!(percent <= 100);
            }
        }
    }
}
