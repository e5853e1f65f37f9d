use serde::Deserialize;

use crate::constants::*;

/// Breakpoints compared with an inclusive `max-width` test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Breakpoints {
    pub very_small: i32,
    pub mobile: i32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self { very_small: VERY_SMALL_BREAKPOINT, mobile: MOBILE_BREAKPOINT }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportFlags {
    pub is_mobile: bool,
    pub is_very_small: bool,
}

impl ViewportFlags {
    pub fn from_width(width: i32, breakpoints: &Breakpoints) -> Self {
        Self {
            is_mobile: width <= breakpoints.mobile,
            is_very_small: width <= breakpoints.very_small,
        }
    }
}

/// Alternative arrangements of the same view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutVariant {
    /// Navigation controls centered below the cards at every width.
    #[default]
    Stacked,
    /// Controls on either side of the card on desktop, below it on mobile.
    Flanking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// "DPMUN GSL" over "Tournament" with a trophy glyph.
    Compact,
    /// Logo followed by "GSL Tournament" on one line.
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPlacement {
    Below,
    Flanking,
}

/// Everything the renderer needs to pick sizes and positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub header: HeaderStyle,
    pub controls: ControlPlacement,
    pub header_top: f32,      // fraction of the window height
    pub controls_bottom: f32, // fraction of the window height
    pub control_size: f32,
    pub card_title_size: i32,
    pub card_padding: f32,
    pub card_inset: f32, // horizontal room kept around a card in its slot
}

impl Layout {
    pub fn select(flags: ViewportFlags, width: i32, variant: LayoutVariant) -> Self {
        let header = if flags.is_very_small { HeaderStyle::Compact } else { HeaderStyle::Full };
        let controls = match variant {
            LayoutVariant::Flanking if !flags.is_mobile => ControlPlacement::Flanking,
            _ => ControlPlacement::Below,
        };

        Self {
            header,
            controls,
            header_top: if flags.is_mobile { 0.12 } else { 0.08 },
            controls_bottom: if flags.is_mobile { 0.15 } else { 0.12 },
            control_size: if width >= WIDE_BREAKPOINT { 48.0 } else { 40.0 },
            card_title_size: if flags.is_mobile { 20 } else { 24 },
            card_padding: if flags.is_mobile { 20.0 } else { 24.0 },
            card_inset: if flags.is_mobile { 32.0 } else { 0.0 },
        }
    }
}

/// Remembers the last flags and reports when a breakpoint is crossed.
#[derive(Debug, Clone)]
pub struct ViewportTracker {
    breakpoints: Breakpoints,
    flags: ViewportFlags,
}

impl ViewportTracker {
    pub fn new(width: i32, breakpoints: Breakpoints) -> Self {
        Self { breakpoints, flags: ViewportFlags::from_width(width, &breakpoints) }
    }

    pub fn flags(&self) -> ViewportFlags {
        self.flags
    }

    /// Returns the new flags only when they differ from the previous ones.
    pub fn observe(&mut self, width: i32) -> Option<ViewportFlags> {
        let flags = ViewportFlags::from_width(width, &self.breakpoints);
        if flags == self.flags {
            return None;
        }
        log::debug!("viewport {width}px: {:?} -> {:?}", self.flags, flags);
        self.flags = flags;
        Some(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(width: i32) -> ViewportFlags {
        ViewportFlags::from_width(width, &Breakpoints::default())
    }

    #[test]
    fn reference_widths() {
        assert_eq!(flags(400), ViewportFlags { is_mobile: true, is_very_small: true });
        assert_eq!(flags(500), ViewportFlags { is_mobile: true, is_very_small: false });
        assert_eq!(flags(800), ViewportFlags { is_mobile: false, is_very_small: false });
    }

    #[test]
    fn breakpoints_are_inclusive() {
        assert!(flags(423).is_very_small);
        assert!(!flags(424).is_very_small);
        assert!(flags(600).is_mobile);
        assert!(!flags(601).is_mobile);
    }

    #[test]
    fn header_follows_the_very_small_flag() {
        assert_eq!(Layout::select(flags(400), 400, LayoutVariant::Stacked).header, HeaderStyle::Compact);
        assert_eq!(Layout::select(flags(500), 500, LayoutVariant::Stacked).header, HeaderStyle::Full);
    }

    #[test]
    fn flanking_controls_only_on_desktop() {
        let desktop = Layout::select(flags(1024), 1024, LayoutVariant::Flanking);
        assert_eq!(desktop.controls, ControlPlacement::Flanking);
        let mobile = Layout::select(flags(500), 500, LayoutVariant::Flanking);
        assert_eq!(mobile.controls, ControlPlacement::Below);
        let stacked = Layout::select(flags(1024), 1024, LayoutVariant::Stacked);
        assert_eq!(stacked.controls, ControlPlacement::Below);
    }

    #[test]
    fn tracker_reports_only_threshold_crossings() {
        let mut tracker = ViewportTracker::new(800, Breakpoints::default());
        assert_eq!(tracker.observe(700), None);
        assert_eq!(tracker.observe(500), Some(flags(500)));
        assert_eq!(tracker.observe(450), None);
        assert_eq!(tracker.observe(400), Some(flags(400)));
        assert_eq!(tracker.flags(), flags(400));
    }
}
