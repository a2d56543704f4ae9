//! Nav bar auto-hide on scroll
//!
//! Scrolling down past the threshold hides the nav bar, scrolling up shows
//! it again, and reaching the end of the content always shows it.

/// Rows from the end of the content at which the nav is forced visible
pub const BOTTOM_PROXIMITY: u32 = 1;

/// Positions needed to evaluate one scroll event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    pub offset: u32,
    pub viewport_height: u32,
    pub document_height: u32,
}

/// Tracks the last scroll offset and the nav bar visibility derived from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollTracker {
    threshold: u32,
    last_offset: u32,
    nav_hidden: bool,
}

impl ScrollTracker {
    pub fn new(threshold: u32, initial_offset: u32) -> Self {
        Self {
            threshold,
            last_offset: initial_offset,
            nav_hidden: false,
        }
    }

    /// Feed one scroll event. Returns whether the nav is now hidden.
    pub fn on_scroll(&mut self, event: ScrollEvent) -> bool {
        let current = event.offset;
        let going_down = current > self.last_offset;
        let near_bottom = event.viewport_height.saturating_add(current)
            >= event.document_height.saturating_sub(BOTTOM_PROXIMITY);

        self.nav_hidden = if near_bottom {
            false
        } else {
            going_down && current > self.threshold
        };

        self.last_offset = current;
        self.nav_hidden
    }

    pub fn nav_hidden(&self) -> bool {
        self.nav_hidden
    }

    /// Forget direction history, e.g. after the content was rebuilt
    pub fn reset(&mut self, offset: u32) {
        self.last_offset = offset;
        self.nav_hidden = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(offset: u32) -> ScrollEvent {
        ScrollEvent {
            offset,
            viewport_height: 40,
            document_height: 1000,
        }
    }

    #[test]
    fn test_scroll_down_past_threshold_hides() {
        let mut tracker = ScrollTracker::new(80, 0);
        assert!(tracker.on_scroll(event(200)));
        assert!(tracker.nav_hidden());
        assert_eq!(tracker.last_offset, 200);
    }

    #[test]
    fn test_near_bottom_shows_regardless_of_direction() {
        let mut tracker = ScrollTracker::new(80, 0);
        assert!(tracker.on_scroll(event(200)));

        // 40 + 958 < 1000 - 1, 40 + 959 >= 1000 - 1
        assert!(tracker.on_scroll(event(958)));
        assert!(!tracker.on_scroll(event(959)));
        assert!(!tracker.on_scroll(event(960)));
    }

    #[test]
    fn test_below_threshold_stays_visible() {
        let mut tracker = ScrollTracker::new(80, 0);
        assert!(!tracker.on_scroll(event(50)));
        assert!(!tracker.on_scroll(event(80)));
        assert!(tracker.on_scroll(event(81)));
    }

    #[test]
    fn test_scroll_up_shows() {
        let mut tracker = ScrollTracker::new(80, 0);
        assert!(tracker.on_scroll(event(300)));
        assert!(!tracker.on_scroll(event(290)));

        // Same offset is not "down"
        assert!(!tracker.on_scroll(event(290)));
    }

    #[test]
    fn test_short_document_is_always_near_bottom() {
        let mut tracker = ScrollTracker::new(0, 0);
        let short = ScrollEvent {
            offset: 10,
            viewport_height: 20,
            document_height: 30,
        };
        assert!(!tracker.on_scroll(short));
        assert_eq!(tracker.last_offset, 10);
    }

    #[test]
    fn test_reset() {
        let mut tracker = ScrollTracker::new(10, 0);
        tracker.on_scroll(event(100));
        tracker.reset(0);
        assert!(!tracker.nav_hidden());
        assert_eq!(tracker.last_offset, 0);
    }
}
