pub use crate::HostelProvider;
pub use crate::contracts::{
    Disableable, MotionAware, Openable, Placeable, Shapeable, Sizeable, ThemeOverridable,
    Variantable,
};
pub use crate::style::{Orientation, Shape, Size, Variant};
pub use crate::views::{
    Complaint, ComplaintBoard, ComplaintFilter, ComplaintStatus, FeedMessage, FeedSubscription,
};
pub use crate::widgets::{
    Avatar, Badge, Banner, BannerKind, Button, ButtonAnimation, ButtonGroup, CloseReason,
    ComplaintBoardView, DatePicker, Drawer, DrawerPlacement, DrawerSize, FieldErrors, FieldKey,
    IconButton, Modal, Placement, Popover, Remote, RemoteView, Select, SelectOption, Spinner,
    StatCard, StatGrid, SubmitGuard, Tag, ToggleButtonGroup, ToggleOption, Tooltip, Trend,
};
