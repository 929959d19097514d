// quicktools-core/src/layout.rs
use ratatui::layout::Rect;

/// Vertical gap between widgets in the tool list
pub const SPACING: u16 = 1;

/// Total rows the visible list occupies, spacing included
pub fn total_height(heights: &[u16]) -> u16 {
    if heights.is_empty() {
        return 0;
    }
    let rows: u32 = heights.iter().map(|h| u32::from(*h)).sum();
    let gaps = u32::from(SPACING) * (heights.len() as u32 - 1);
    (rows + gaps).min(u32::from(u16::MAX)) as u16
}

/// Stack widgets vertically inside `area`, scrolled up by `scroll` rows.
///
/// Each entry is the widget's full-height rect in screen coordinates, or
/// `None` when the widget lies entirely outside the viewport. A partially
/// visible widget keeps its full rect (which may overhang the viewport);
/// the caller clips via an offscreen buffer.
pub fn arrange(area: Rect, heights: &[u16], scroll: u16) -> Vec<Option<Rect>> {
    let mut out = Vec::with_capacity(heights.len());
    let top = i32::from(area.y) - i32::from(scroll);
    let mut y = top;
    let view_top = i32::from(area.y);
    let view_bottom = i32::from(area.y) + i32::from(area.height);

    for &h in heights {
        let bottom = y + i32::from(h);
        if bottom <= view_top || y >= view_bottom || h == 0 {
            out.push(None);
        } else {
            out.push(Some(Rect {
                x: area.x,
                // y may overhang the top; report it via the clip offset below
                y: y.max(view_top) as u16,
                width: area.width,
                height: h,
            }));
        }
        y = bottom + i32::from(SPACING);
    }
    out
}

/// Rows of the widget at `index` hidden above the viewport top, for clipping
pub fn clip_offset(heights: &[u16], index: usize, scroll: u16) -> u16 {
    let mut y: u32 = 0;
    for &h in heights.iter().take(index) {
        y += u32::from(h) + u32::from(SPACING);
    }
    u32::from(scroll).saturating_sub(y).min(u32::from(u16::MAX)) as u16
}

/// Scroll offset that centers widget `index` in a viewport of `viewport` rows,
/// clamped to the scrollable range.
pub fn center_offset(heights: &[u16], index: usize, viewport: u16) -> u16 {
    if index >= heights.len() {
        return 0;
    }
    let mut top: u32 = 0;
    for &h in heights.iter().take(index) {
        top += u32::from(h) + u32::from(SPACING);
    }
    let h = u32::from(heights[index]);
    let center = top + h / 2;
    let half_view = u32::from(viewport) / 2;
    let max_scroll = u32::from(total_height(heights)).saturating_sub(u32::from(viewport));
    center
        .saturating_sub(half_view)
        .min(max_scroll)
        .min(u32::from(u16::MAX)) as u16
}

/// Eased scroll position: `tick` moves `current` toward `target` by a
/// quarter of the remaining distance, at least one row, so a scroll-to-match
/// glides instead of jumping.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollState {
    current: u16,
    target: u16,
}

impl ScrollState {
    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn target(&self) -> u16 {
        self.target
    }

    /// Snap immediately, no animation
    pub fn jump(&mut self, offset: u16) {
        self.current = offset;
        self.target = offset;
    }

    pub fn animate_to(&mut self, offset: u16) {
        self.target = offset;
    }

    /// Keep both ends inside the scrollable range after a resize or filter change
    pub fn clamp_to(&mut self, max_scroll: u16) {
        self.current = self.current.min(max_scroll);
        self.target = self.target.min(max_scroll);
    }

    pub fn tick(&mut self) {
        if self.current == self.target {
            return;
        }
        let distance = self.current.abs_diff(self.target);
        let step = (distance / 4).max(1);
        if self.current < self.target {
            self.current += step;
        } else {
            self.current -= step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_height() {
        assert_eq!(total_height(&[]), 0);
        assert_eq!(total_height(&[5]), 5);
        assert_eq!(total_height(&[5, 7, 3]), 5 + 1 + 7 + 1 + 3);
    }

    #[test]
    fn test_arrange_unscrolled() {
        let area = Rect::new(0, 2, 40, 10);
        let rects = arrange(area, &[4, 4, 4], 0);
        assert_eq!(rects[0], Some(Rect::new(0, 2, 40, 4)));
        assert_eq!(rects[1], Some(Rect::new(0, 7, 40, 4)));
        // Third widget starts at row 12, viewport ends at row 12
        assert_eq!(rects[2], None);
    }

    #[test]
    fn test_arrange_scrolled_clips_top() {
        let area = Rect::new(0, 0, 40, 10);
        let rects = arrange(area, &[6, 6, 6], 8);
        // First widget (rows 0..6) is fully above the viewport
        assert_eq!(rects[0], None);
        // Second widget (rows 7..13) overhangs the top by 1 row
        assert_eq!(rects[1], Some(Rect::new(0, 0, 40, 6)));
        assert_eq!(clip_offset(&[6, 6, 6], 1, 8), 1);
        assert_eq!(clip_offset(&[6, 6, 6], 2, 8), 0);
    }

    #[test]
    fn test_center_offset_clamps() {
        let heights = [5, 5, 5, 5];
        // First widget: centering would need negative scroll
        assert_eq!(center_offset(&heights, 0, 10), 0);
        // Last widget: clamped to max scroll (total 23 - viewport 10)
        assert_eq!(center_offset(&heights, 3, 10), 13);
        // Out of range index is a no-op
        assert_eq!(center_offset(&heights, 9, 10), 0);
    }

    #[test]
    fn test_scroll_easing_reaches_target() {
        let mut s = ScrollState::default();
        s.animate_to(20);
        let mut ticks = 0;
        while s.current() != s.target() {
            s.tick();
            ticks += 1;
            assert!(ticks < 100, "easing must converge");
        }
        assert_eq!(s.current(), 20);

        // And back down
        s.animate_to(3);
        while s.current() != s.target() {
            s.tick();
        }
        assert_eq!(s.current(), 3);
    }
}
