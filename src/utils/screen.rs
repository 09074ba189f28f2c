use dioxus::desktop::tao::dpi::{LogicalPosition, LogicalSize};
use display_info::DisplayInfo;

/// Position and size of a display in logical desktop coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl DisplayBounds {
    /// Convert physical pixels to logical ones. A non-positive scale is taken as 1.
    pub fn from_physical(x: i32, y: i32, width: u32, height: u32, scale: f32) -> Self {
        let scale = if scale > 0.0 { scale as f64 } else { 1.0 };
        Self {
            x: (x as f64 / scale).round() as i32,
            y: (y as f64 / scale).round() as i32,
            width: (width as f64 / scale).round() as u32,
            height: (height as f64 / scale).round() as u32,
        }
    }
}

impl From<&DisplayInfo> for DisplayBounds {
    fn from(info: &DisplayInfo) -> Self {
        Self::from_physical(info.x, info.y, info.width, info.height, info.scale_factor)
    }
}

/// Get the primary display, or the first one reported
pub fn get_primary_display() -> Option<DisplayBounds> {
    let displays = match DisplayInfo::all() {
        Ok(displays) => displays,
        Err(e) => {
            tracing::warn!(%e, "Failed to query displays");
            return None;
        }
    };
    displays
        .iter()
        .find(|d| d.is_primary)
        .or_else(|| displays.first())
        .map(DisplayBounds::from)
}

/// Top-left position that centers a window of `size` on `display`.
///
/// A window larger than the display is pinned to the display's top-left.
pub fn centered_position(display: DisplayBounds, size: LogicalSize<u32>) -> LogicalPosition<i32> {
    let offset = |available: u32, wanted: u32| -> i32 {
        i32::try_from(available.saturating_sub(wanted) / 2).unwrap_or(0)
    };
    LogicalPosition::new(
        display.x + offset(display.width, size.width),
        display.y + offset(display.height, size.height),
    )
}
