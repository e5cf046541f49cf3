//! Construction-time configuration for [`WheelView`](crate::WheelView).

use wheel_foundation::{RecyclePolicy, ScrollerConfig, WheelError};
use wheel_graphics::{Brush, Color};

pub const DEFAULT_VISIBLE_ITEMS: i32 = 5;

/// Horizontal inset of the item column, in pixels.
pub const DEFAULT_PADDING: i32 = 10;

/// Share of one item trimmed from the desired height, in units of 1/50.
pub const ITEM_OFFSET_PERCENT: i32 = 10;

/// Translucent grey band behind the selected item.
pub const DEFAULT_CENTER_FILTER: Color = Color::from_argb(0x4080_8080);

/// Top-to-bottom stops of the classic dark-edged wheel shadow.
pub const SHADOW_COLORS: [Color; 3] = [
    Color::from_argb(0xFF11_1111),
    Color::from_argb(0x00AA_AAAA),
    Color::from_argb(0x00AA_AAAA),
];

/// Brushes painted over the items.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelDecorations {
    pub top_shadow: Option<Brush>,
    pub bottom_shadow: Option<Brush>,
    pub center_filter: Option<Brush>,
}

impl Default for WheelDecorations {
    fn default() -> Self {
        Self {
            top_shadow: None,
            bottom_shadow: None,
            center_filter: Some(Brush::solid(DEFAULT_CENTER_FILTER)),
        }
    }
}

impl WheelDecorations {
    /// No shadows and no center band.
    pub fn none() -> Self {
        Self {
            top_shadow: None,
            bottom_shadow: None,
            center_filter: None,
        }
    }

    /// Default center band plus dark shadows fading toward the middle.
    pub fn with_default_shadows() -> Self {
        let top = Brush::vertical_gradient(SHADOW_COLORS.to_vec());
        Self {
            bottom_shadow: Some(top.reversed()),
            top_shadow: Some(top),
            ..Self::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WheelSpec {
    pub visible_items: i32,
    pub cyclic: bool,
    pub padding: i32,
    pub item_offset_percent: i32,
    pub min_width: i32,
    pub min_height: i32,
    pub decorations: WheelDecorations,
    pub scroller: ScrollerConfig,
    pub recycle: RecyclePolicy,
}

impl Default for WheelSpec {
    fn default() -> Self {
        Self {
            visible_items: DEFAULT_VISIBLE_ITEMS,
            cyclic: false,
            padding: DEFAULT_PADDING,
            item_offset_percent: ITEM_OFFSET_PERCENT,
            min_width: 0,
            min_height: 0,
            decorations: WheelDecorations::default(),
            scroller: ScrollerConfig::default(),
            recycle: RecyclePolicy::default(),
        }
    }
}

impl WheelSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_visible_items(mut self, count: i32) -> Result<Self, WheelError> {
        if count <= 0 {
            return Err(WheelError::InvalidVisibleItems { count });
        }
        self.visible_items = count;
        Ok(self)
    }

    pub fn cyclic(mut self, cyclic: bool) -> Self {
        self.cyclic = cyclic;
        self
    }

    pub fn padding(mut self, padding: i32) -> Self {
        self.padding = padding;
        self
    }

    pub fn min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    pub fn decorations(mut self, decorations: WheelDecorations) -> Self {
        self.decorations = decorations;
        self
    }

    pub fn scroller(mut self, scroller: ScrollerConfig) -> Self {
        self.scroller = scroller;
        self
    }

    pub fn recycle_policy(mut self, policy: RecyclePolicy) -> Self {
        self.recycle = policy;
        self
    }
}
