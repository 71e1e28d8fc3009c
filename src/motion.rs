//! Scroll-driven effects and the performance gate for decorative motion.

/// Viewports at or below this width count as mobile
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Gap left between the sticky header and a scrolled-to section
pub const ANCHOR_GAP: f64 = 20.0;

/// Elements carrying this attribute fade in when scrolled into view
pub const REVEAL_ATTRIBUTE: &str = "data-animate";
/// Class the stylesheet keys the entrance animation on
pub const REVEAL_CLASS: &str = "animate";
pub const REVEAL_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// What the browser tells us about the device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceProfile {
    /// `navigator.connection.effectiveType`, when exposed
    pub effective_connection: Option<String>,
    pub viewport_width: u32,
    /// `prefers-reduced-motion: reduce`
    pub reduced_motion: bool,
}

impl DeviceProfile {
    /// Skip parallax, entrance animations and hover effects on slow or
    /// motion-sensitive devices
    pub fn is_low_end(&self) -> bool {
        let slow_connection = matches!(
            self.effective_connection.as_deref(),
            Some("slow-2g") | Some("2g")
        );
        let mobile = self.viewport_width <= MOBILE_MAX_WIDTH;
        slow_connection || (mobile && self.reduced_motion)
    }

    pub fn reveal_mode(&self) -> RevealMode {
        if self.is_low_end() {
            RevealMode::Immediate
        } else {
            RevealMode::OnScroll
        }
    }
}

/// How `[data-animate]` elements are revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealMode {
    /// Show everything up front, no observer
    Immediate,
    /// Add the class as each element enters the viewport
    OnScroll,
}

/// Window scroll position that puts a section just below the sticky header
pub fn scroll_target(offset_top: f64, header_height: f64) -> f64 {
    (offset_top - header_height - ANCHOR_GAP).max(0.0)
}

/// Hero background translation `(x, y)` in px for a scroll offset
pub fn parallax_offset(scroll_y: f64) -> (f64, f64) {
    (scroll_y * -0.3, scroll_y * -0.5)
}

/// CSS transform for the hero background
pub fn parallax_transform(scroll_y: f64) -> String {
    let (x, y) = parallax_offset(scroll_y);
    format!("translate3d({}px, {}px, 0)", x, y)
}

/// Reading progress in percent, 0 when the page does not scroll
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    if scrollable <= 0.0 {
        return 0.0;
    }
    clamp(scroll_y / scrollable * 100.0, 0.0, 100.0)
}

/// Outside the browser there is nothing to measure
#[cfg(not(target_arch = "wasm32"))]
pub fn current_device_profile() -> DeviceProfile {
    DeviceProfile::default()
}

#[cfg(target_arch = "wasm32")]
pub fn current_device_profile() -> DeviceProfile {
    use wasm_bindgen::JsValue;

    let Some(window) = web_sys::window() else {
        return DeviceProfile::default();
    };

    let effective_connection = js_sys::Reflect::get(&window.navigator(), &JsValue::from_str("connection"))
        .ok()
        .filter(|c| !c.is_undefined() && !c.is_null())
        .and_then(|c| js_sys::Reflect::get(&c, &JsValue::from_str("effectiveType")).ok())
        .and_then(|t| t.as_string());

    let viewport_width = window
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(0.0) as u32;

    let reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map_or(false, |mql| mql.matches());

    DeviceProfile {
        effective_connection,
        viewport_width,
        reduced_motion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_connection_is_low_end() {
        let profile = DeviceProfile {
            effective_connection: Some("2g".into()),
            viewport_width: 1920,
            reduced_motion: false,
        };
        assert!(profile.is_low_end());
    }

    #[test]
    fn reduced_motion_only_matters_on_mobile() {
        let mut profile = DeviceProfile {
            effective_connection: Some("4g".into()),
            viewport_width: 1280,
            reduced_motion: true,
        };
        assert!(!profile.is_low_end());
        profile.viewport_width = 768;
        assert!(profile.is_low_end());
    }

    #[test]
    fn low_end_devices_reveal_immediately() {
        let mut profile = DeviceProfile {
            effective_connection: Some("slow-2g".into()),
            viewport_width: 1280,
            reduced_motion: false,
        };
        assert_eq!(profile.reveal_mode(), RevealMode::Immediate);
        profile.effective_connection = Some("4g".into());
        assert_eq!(profile.reveal_mode(), RevealMode::OnScroll);
    }

    #[test]
    fn anchor_target_clears_header() {
        assert_eq!(scroll_target(900.0, 72.0), 808.0);
        // Sections near the top never scroll past the page start
        assert_eq!(scroll_target(60.0, 72.0), 0.0);
    }

    #[test]
    fn parallax_moves_background_against_scroll() {
        assert_eq!(parallax_offset(100.0), (-30.0, -50.0));
        assert_eq!(parallax_transform(10.0), "translate3d(-3px, -5px, 0)");
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(scroll_progress(500.0, 2000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(5000.0, 2000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
    }
}
