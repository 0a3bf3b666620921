//! Pointer events
//!
//! Plain event data plus left-click detection across legacy and quirky
//! input devices.

use crate::document::UserAgent;

/// A single touch contact point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub page_x: f64,
    pub page_y: f64,
}

/// Pointer event data
///
/// `button`/`buttons` are optional because simulated and legacy devices
/// genuinely omit them, and the distinction matters for click detection.
#[derive(Debug, Clone, Default)]
pub struct PointerEvent {
    /// Page-relative pointer coordinates
    pub page_x: f64,
    pub page_y: f64,
    /// Touch points that changed in this event; the first one wins over
    /// `page_x`/`page_y` when present
    pub changed_touches: Vec<TouchPoint>,
    /// Which button triggered the event
    pub button: Option<u16>,
    /// Bitmask of buttons held during the event
    pub buttons: Option<u16>,
}

/// Check whether an event is a plain single left click.
///
/// `button` alone is not enough: middle mouse can report `button == 0`
/// with `buttons == 4`, and a chorded middle-plus-left click reports
/// `button == 0` with `buttons == 5`. Devices that omit the fields get
/// let through first, then anything other than exactly
/// `button == 0 && buttons == 1` is rejected.
pub fn is_single_left_click(ua: UserAgent, event: &PointerEvent) -> bool {
    if event.button.is_none() && event.buttons.is_none() {
        // Simulated mobile devices report neither field.
        return true;
    }

    if event.button == Some(0) && event.buttons.is_none() {
        // Some touch and legacy stacks fill in `button` only.
        return true;
    }

    if ua.legacy_version == Some(9) {
        return true;
    }

    event.button == Some(0) && event.buttons == Some(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(button: Option<u16>, buttons: Option<u16>) -> PointerEvent {
        PointerEvent {
            button,
            buttons,
            ..Default::default()
        }
    }

    #[test]
    fn test_plain_left_click() {
        assert!(is_single_left_click(UserAgent::default(), &event(Some(0), Some(1))));
    }

    #[test]
    fn test_chorded_and_other_buttons_rejected() {
        let ua = UserAgent::default();
        // Middle held plus left click.
        assert!(!is_single_left_click(ua, &event(Some(0), Some(5))));
        // Middle mouse reporting button 0.
        assert!(!is_single_left_click(ua, &event(Some(0), Some(4))));
        assert!(!is_single_left_click(ua, &event(Some(1), Some(4))));
        assert!(!is_single_left_click(ua, &event(Some(2), Some(2))));
    }

    #[test]
    fn test_devices_without_button_fields() {
        let ua = UserAgent::default();
        assert!(is_single_left_click(ua, &event(None, None)));
        assert!(is_single_left_click(ua, &event(Some(0), None)));
        // `buttons` present but `button` absent falls through to the
        // exact-match check.
        assert!(!is_single_left_click(ua, &event(None, Some(1))));
    }

    #[test]
    fn test_legacy_engine_exemption() {
        let legacy = UserAgent {
            legacy_version: Some(9),
        };
        assert!(is_single_left_click(legacy, &event(Some(2), Some(2))));

        let newer = UserAgent {
            legacy_version: Some(11),
        };
        assert!(!is_single_left_click(newer, &event(Some(2), Some(2))));
    }
}
