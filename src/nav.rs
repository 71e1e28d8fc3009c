//! Mobile navigation drawer state.

/// Above this viewport width the drawer is never shown
pub const DESKTOP_MIN_WIDTH: u32 = 860;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NavDrawer {
    open: bool,
}

impl NavDrawer {
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Hamburger button. Returns the new open state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Link clicked inside the drawer, or a click anywhere outside it
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Close the drawer once the layout switches to the desktop menu
    pub fn viewport_resized(&mut self, width: u32) {
        if width > DESKTOP_MIN_WIDTH {
            self.open = false;
        }
    }

    /// `aria-expanded` value for the toggle button
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    /// `overflow` style for `<body>`; scrolling is locked while open
    pub fn body_overflow(&self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }

    /// Class list of the menu element
    pub fn menu_class(&self) -> &'static str {
        if self.open {
            "nav__list is-open"
        } else {
            "nav__list"
        }
    }
}
