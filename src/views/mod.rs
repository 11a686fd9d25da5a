//! Composite dashboard views built from the component layer, and the list
//! state behind them.

pub mod complaint_board;
pub mod complaints;
pub mod feed;
pub mod remote;
pub mod room_changes;

pub use complaint_board::ComplaintBoardView;
pub use complaints::{
    Complaint, ComplaintBoard, ComplaintFilter, ComplaintPriority, ComplaintSort, ComplaintStats,
    ComplaintStatus, MergeOutcome,
};
pub use feed::{
    ChannelFeed, DrainReport, FeedConnection, FeedError, FeedMessage, FeedSender,
    FeedSubscription, ReadyState,
};
pub use remote::{Remote, RemoteView};
pub use room_changes::{
    RoomChangeCounts, RoomChangeFilter, RoomChangeList, RoomChangeRequest, RoomChangeSort,
    RoomChangeStatus,
};
