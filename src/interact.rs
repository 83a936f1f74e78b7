//! Pointer interaction: hit-testing, the hover state machine, and click
//! navigation.
//!
//! The geometry-facing parts work on projected sprites so they stay
//! independent of the painter; side effects (URL opening, clipboard, alert)
//! are decided here and executed by the caller.

use crate::config::NavigationKind;
use eframe::egui;

/// A planet (or the star) after projection: screen center, drawn radius, and
/// view depth (larger = closer to the viewer).
#[derive(Clone, Copy, Debug)]
pub struct Sprite {
    pub index: usize,
    pub center: egui::Pos2,
    pub radius: f32,
    pub depth: f64,
}

/// Returns the sprite under the pointer, nearest-first: among all sprites
/// whose drawn disc contains the pointer, the one closest to the viewer wins.
pub fn pick(pointer: egui::Pos2, sprites: &[Sprite]) -> Option<usize> {
    sprites
        .iter()
        .filter(|s| {
            let dx = pointer.x - s.center.x;
            let dy = pointer.y - s.center.y;
            dx * dx + dy * dy <= s.radius * s.radius
        })
        .max_by(|a, b| a.depth.total_cmp(&b.depth))
        .map(|s| s.index)
}

/// What a click resolves to before side effects run.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ClickAction {
    OpenAbout,
    Navigate { planet: usize },
}

/// Click resolution. While the about overlay is visible every scene click is
/// swallowed; otherwise the star takes priority over the hovered planet.
pub fn click_action(
    about_visible: bool,
    star_hit: bool,
    hovered: Option<usize>,
) -> Option<ClickAction> {
    if about_visible {
        return None;
    }
    if star_hit {
        return Some(ClickAction::OpenAbout);
    }
    hovered.map(|planet| ClickAction::Navigate { planet })
}

/// Clipboard seam so the fallback path is testable; the egui implementation
/// cannot fail, but the dispatcher must not know that.
pub trait Clipboard {
    fn write(&mut self, text: &str) -> Result<(), String>;
}

pub struct EguiClipboard<'a> {
    pub ctx: &'a egui::Context,
}

impl Clipboard for EguiClipboard<'_> {
    fn write(&mut self, text: &str) -> Result<(), String> {
        self.ctx.copy_text(text.to_owned());
        Ok(())
    }
}

/// The side effect a navigation click requires of the caller.
#[derive(Clone, PartialEq, Debug)]
pub enum NavCommand {
    OpenUrl { url: String, new_tab: bool },
    Copied { joined: String },
    Alert { joined: String },
    None,
}

/// Maps a planet's navigation kind to its side effect. The qq kind attempts
/// the clipboard write first and degrades to a blocking alert carrying the
/// same text.
pub fn navigate(kind: &NavigationKind, clipboard: &mut dyn Clipboard) -> NavCommand {
    match kind {
        NavigationKind::Email { address } => NavCommand::OpenUrl {
            url: format!("mailto:{}", address),
            new_tab: false,
        },
        NavigationKind::GitHub { url } | NavigationKind::Link { url } => NavCommand::OpenUrl {
            url: url.clone(),
            new_tab: true,
        },
        NavigationKind::Qq { numbers } => {
            let joined = NavigationKind::joined_contacts(numbers);
            match clipboard.write(&joined) {
                Ok(()) => NavCommand::Copied { joined },
                Err(_) => NavCommand::Alert { joined },
            }
        }
        NavigationKind::Generic => NavCommand::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    struct RecordingClipboard {
        written: Vec<String>,
        fail: bool,
    }

    impl Clipboard for RecordingClipboard {
        fn write(&mut self, text: &str) -> Result<(), String> {
            self.written.push(text.to_owned());
            if self.fail {
                Err("denied".to_string())
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_pick_prefers_nearest() {
        let sprites = [
            Sprite { index: 0, center: pos2(100.0, 100.0), radius: 30.0, depth: -2.0 },
            Sprite { index: 1, center: pos2(105.0, 100.0), radius: 30.0, depth: 3.0 },
        ];
        assert_eq!(pick(pos2(100.0, 100.0), &sprites), Some(1));
    }

    #[test]
    fn test_pick_misses_outside_radius() {
        let sprites = [Sprite { index: 0, center: pos2(0.0, 0.0), radius: 10.0, depth: 0.0 }];
        assert_eq!(pick(pos2(20.0, 0.0), &sprites), None);
        assert_eq!(pick(pos2(9.0, 0.0), &sprites), Some(0));
    }

    #[test]
    fn test_click_ignored_while_about_visible() {
        assert_eq!(click_action(true, true, Some(0)), None);
        assert_eq!(click_action(true, false, Some(0)), None);
    }

    #[test]
    fn test_click_star_takes_priority() {
        assert_eq!(click_action(false, true, Some(3)), Some(ClickAction::OpenAbout));
    }

    #[test]
    fn test_click_hovered_planet() {
        assert_eq!(
            click_action(false, false, Some(3)),
            Some(ClickAction::Navigate { planet: 3 })
        );
        assert_eq!(click_action(false, false, None), None);
    }

    #[test]
    fn test_navigate_email_opens_mail_composer() {
        let mut cb = RecordingClipboard { written: Vec::new(), fail: false };
        let cmd = navigate(
            &NavigationKind::Email { address: "someone@example.com".to_string() },
            &mut cb,
        );
        assert_eq!(
            cmd,
            NavCommand::OpenUrl { url: "mailto:someone@example.com".to_string(), new_tab: false }
        );
        assert!(cb.written.is_empty());
    }

    #[test]
    fn test_navigate_link_opens_new_tab() {
        let mut cb = RecordingClipboard { written: Vec::new(), fail: false };
        let cmd = navigate(
            &NavigationKind::Link { url: "http://example.com".to_string() },
            &mut cb,
        );
        assert_eq!(
            cmd,
            NavCommand::OpenUrl { url: "http://example.com".to_string(), new_tab: true }
        );
    }

    #[test]
    fn test_navigate_qq_copies_joined() {
        let mut cb = RecordingClipboard { written: Vec::new(), fail: false };
        let numbers = vec!["1523640161".to_string(), "3874540285".to_string()];
        let cmd = navigate(&NavigationKind::Qq { numbers }, &mut cb);
        assert_eq!(cmd, NavCommand::Copied { joined: "1523640161 / 3874540285".to_string() });
        assert_eq!(cb.written, vec!["1523640161 / 3874540285".to_string()]);
    }

    #[test]
    fn test_navigate_qq_alert_after_failed_copy() {
        let mut cb = RecordingClipboard { written: Vec::new(), fail: true };
        let numbers = vec!["1523640161".to_string(), "3874540285".to_string()];
        let cmd = navigate(&NavigationKind::Qq { numbers }, &mut cb);
        // The write is attempted before the fallback fires.
        assert_eq!(cb.written.len(), 1);
        assert_eq!(cmd, NavCommand::Alert { joined: "1523640161 / 3874540285".to_string() });
    }

    #[test]
    fn test_navigate_generic_is_log_only() {
        let mut cb = RecordingClipboard { written: Vec::new(), fail: false };
        assert_eq!(navigate(&NavigationKind::Generic, &mut cb), NavCommand::None);
    }
}
