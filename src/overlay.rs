//! Overlay panels
//!
//! Modal panels are keyed by [`OverlayKind`] and share one backdrop.
//! At most one panel is visible at a time.

use crate::types::OverlayKind;

/// Which overlay (if any) is showing, plus the backdrop behind it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverlayManager {
    backdrop: bool,
    panel: Option<OverlayKind>,
}

impl OverlayManager {
    /// Show `kind` above the view, replacing any open panel
    pub fn open(&mut self, kind: OverlayKind) {
        // Backdrop stays up between panels
        self.close_panels(false);
        self.backdrop = true;
        self.panel = Some(kind);
        tracing::debug!(overlay = kind.as_str(), "overlay opened");
    }

    /// String-keyed open. Unknown kinds are rejected and leave the state untouched.
    pub fn open_named(&mut self, name: &str) -> bool {
        match name.parse::<OverlayKind>() {
            Ok(kind) => {
                self.open(kind);
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "ignoring overlay request");
                false
            }
        }
    }

    /// Hide every panel and the backdrop
    pub fn close_all(&mut self) {
        self.close_panels(true);
    }

    fn close_panels(&mut self, hide_backdrop: bool) {
        self.panel = None;
        if hide_backdrop {
            self.backdrop = false;
        }
    }

    /// The visible panel
    pub fn visible(&self) -> Option<OverlayKind> {
        self.panel
    }

    pub fn backdrop_visible(&self) -> bool {
        self.backdrop
    }

    pub fn is_open(&self) -> bool {
        self.panel.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::warnings;

    fn visible_count(overlays: &OverlayManager) -> usize {
        OverlayKind::all()
            .iter()
            .filter(|kind| overlays.visible() == Some(**kind))
            .count()
    }

    #[test]
    fn test_starts_closed() {
        let overlays = OverlayManager::default();
        assert!(!overlays.is_open());
        assert!(!overlays.backdrop_visible());
        assert_eq!(visible_count(&overlays), 0);
    }

    #[test]
    fn test_open_each_kind() {
        for kind in OverlayKind::all() {
            let mut overlays = OverlayManager::default();
            overlays.open(*kind);
            assert_eq!(overlays.visible(), Some(*kind));
            assert_eq!(visible_count(&overlays), 1);
            assert!(overlays.backdrop_visible());
        }
    }

    #[test]
    fn test_open_replaces_previous_panel() {
        let mut overlays = OverlayManager::default();
        overlays.open(OverlayKind::Modes);
        overlays.open(OverlayKind::Support);

        assert_ne!(overlays.visible(), Some(OverlayKind::Modes));
        assert_eq!(overlays.visible(), Some(OverlayKind::Support));
        assert_eq!(visible_count(&overlays), 1);
        assert!(overlays.backdrop_visible());
    }

    #[test]
    fn test_close_all() {
        let mut overlays = OverlayManager::default();
        overlays.open(OverlayKind::Settings);
        overlays.close_all();

        assert_eq!(visible_count(&overlays), 0);
        assert!(!overlays.backdrop_visible());

        // Closing when already closed is fine
        overlays.close_all();
        assert_eq!(overlays, OverlayManager::default());
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let mut overlays = OverlayManager::default();
        let logs = warnings(|| assert!(!overlays.open_named("about")));
        assert!(logs.contains("WARN"));
        assert!(logs.contains("unknown overlay: \"about\""));
        assert_eq!(overlays, OverlayManager::default());

        overlays.open(OverlayKind::Modes);
        let before = overlays.clone();
        assert!(!overlays.open_named(""));
        assert_eq!(overlays, before);

        assert!(overlays.open_named("support"));
        assert_eq!(overlays.visible(), Some(OverlayKind::Support));
    }
}
