//! Design model and the pure logic built on it: random selection, style
//! synthesis and time formatting.

pub mod selector;
pub mod style_map;
pub mod styles;
pub mod time_format;
pub mod types;

pub use selector::{generate_random_design, select};
pub use style_map::StyleMap;
pub use styles::Viewport;
pub use time_format::{format_now, format_time};
pub use types::{
    CatalogCounts, DesignConfiguration, DesignData, DesignTheme, Fragment, FragmentKind,
    LayoutVariation, TimeDisplay, TimeFormat, VisualEffect,
};
