pub mod data {
    pub use crate::components::{StatCard, StatGrid, Trend, TrendDirection};
    pub use crate::views::{
        ComplaintBoardView, Remote, RemoteView, RoomChangeList, RoomChangeRequest,
    };
}

pub mod display {
    pub use crate::components::{
        Avatar, Badge, Banner, BannerKind, Spinner, SpinnerVariant, Tag,
    };
}

pub mod form {
    pub use crate::components::{
        Button, ButtonAnimation, ButtonGroup, DatePicker, IconButton, Select, SelectChangeEvent,
        SelectOption, ToggleButtonGroup, ToggleOption,
    };
    pub use crate::form::{
        FieldErrors, FieldKey, SubmitError, SubmitGuard, SubmitTicket, ValidationError,
        date_range, required,
    };
}

pub mod overlay {
    pub use crate::components::{
        CloseReason, Drawer, DrawerPlacement, DrawerSize, Modal, OverlayConfig, Placement,
        Popover, Tooltip,
    };
}

pub use data::*;
pub use display::*;
pub use form::*;
pub use overlay::*;
