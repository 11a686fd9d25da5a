pub mod avatar;
pub mod badge;
pub mod banner;
pub mod button;
pub mod control;
pub mod date_picker;
pub mod date_picker_state;
pub mod drawer;
pub mod interaction_adapter;
pub mod modal;
pub mod overlay;
pub mod overlay_state;
pub mod placement;
pub mod popover;
pub mod popup;
pub mod primitives;
pub mod ripple;
pub mod scroll_lock;
pub mod select;
pub mod select_state;
pub mod spinner;
pub mod stat_card;
pub mod tag;
pub mod toggle_group;
pub mod tooltip;
pub mod tooltip_state;
pub mod transition;
pub mod utils;

#[cfg(test)]
mod test_component_smoke;
#[cfg(test)]
mod test_state_logic;
#[cfg(test)]
mod test_style_resolver;
#[cfg(test)]
mod test_token_references;

pub use avatar::Avatar;
pub use badge::{Badge, BadgeRecipe};
pub use banner::{Banner, BannerKind};
pub use button::{Button, ButtonAnimation, ButtonGroup, ButtonRecipe, IconButton};
pub use date_picker::DatePicker;
pub use date_picker_state::{CalendarCell, CalendarPage, DateBounds, DatePickerModel};
pub use drawer::{Drawer, DrawerPlacement, DrawerSize};
pub use modal::Modal;
pub use overlay_state::{CloseReason, OverlayConfig, OverlayHandle, OverlayPhase, OverlayStack};
pub use placement::Placement;
pub use popover::Popover;
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use select::Select;
pub use select_state::{SelectChangeEvent, SelectOption};
pub use spinner::{Spinner, SpinnerVariant};
pub use stat_card::{StatCard, StatGrid, Trend, TrendDirection};
pub use tag::Tag;
pub use toggle_group::{ToggleButtonGroup, ToggleOption};
pub use tooltip::Tooltip;
pub use tooltip_state::TooltipDelay;
