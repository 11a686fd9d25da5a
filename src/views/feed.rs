//! Live complaint feed.
//!
//! The server pushes JSON text frames shaped
//! `{"type": "new_complaint" | "complaint_updated", "complaint": {...}}`.
//! The transport itself lives outside this crate behind [`FeedConnection`];
//! [`FeedSubscription`] decodes frames into a [`ComplaintBoard`] and closes
//! the connection when it is dropped.

use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::complaints::{Complaint, ComplaintBoard, MergeOutcome};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    NewComplaint { complaint: Complaint },
    ComplaintUpdated { complaint: Complaint },
}

impl FeedMessage {
    pub fn decode(text: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<String, FeedError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn complaint(&self) -> &Complaint {
        match self {
            Self::NewComplaint { complaint } | Self::ComplaintUpdated { complaint } => complaint,
        }
    }

    pub fn into_complaint(self) -> Complaint {
        match self {
            Self::NewComplaint { complaint } | Self::ComplaintUpdated { complaint } => complaint,
        }
    }
}

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("undecodable feed message: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("feed connection is {0:?}")]
    NotOpen(ReadyState),
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ReadyState {
    #[default]
    Connecting,
    Open,
    Closing,
    Closed,
}

/// A socket-like source of text frames.
pub trait FeedConnection {
    fn ready_state(&self) -> ReadyState;

    /// Next buffered frame, if any. Never blocks.
    fn next_frame(&mut self) -> Option<String>;

    fn close(&mut self);
}

/// Counts from one [`FeedSubscription::drain_into`] pass.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DrainReport {
    pub inserted: usize,
    pub updated: usize,
    pub rejected: usize,
}

impl DrainReport {
    pub fn changed(&self) -> bool {
        self.inserted + self.updated > 0
    }
}

pub struct FeedSubscription<C: FeedConnection> {
    connection: C,
}

impl<C: FeedConnection> FeedSubscription<C> {
    pub fn new(connection: C) -> Self {
        Self { connection }
    }

    pub fn ready_state(&self) -> ReadyState {
        self.connection.ready_state()
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    /// Merges every buffered frame into `board`. Undecodable frames are
    /// logged and skipped; they never abort the pass.
    pub fn drain_into(&mut self, board: &mut ComplaintBoard) -> Result<DrainReport, FeedError> {
        let state = self.connection.ready_state();
        if state != ReadyState::Open {
            return Err(FeedError::NotOpen(state));
        }
        let mut report = DrainReport::default();
        while let Some(frame) = self.connection.next_frame() {
            match FeedMessage::decode(&frame) {
                Ok(message) => match board.apply(message) {
                    MergeOutcome::Inserted => report.inserted += 1,
                    MergeOutcome::Updated => report.updated += 1,
                },
                Err(error) => {
                    tracing::warn!(%error, "dropping feed frame");
                    report.rejected += 1;
                }
            }
        }
        Ok(report)
    }
}

impl<C: FeedConnection> Drop for FeedSubscription<C> {
    fn drop(&mut self) {
        if self.connection.ready_state() == ReadyState::Open {
            tracing::debug!("closing complaint feed");
            self.connection.close();
        }
    }
}

/// In-process [`FeedConnection`] fed from another thread, e.g. the task
/// that owns the real socket.
pub struct ChannelFeed {
    frames: Receiver<String>,
    state: Arc<Mutex<ReadyState>>,
}

/// Producer half of a [`ChannelFeed`].
#[derive(Clone)]
pub struct FeedSender {
    frames: Sender<String>,
    state: Arc<Mutex<ReadyState>>,
}

impl ChannelFeed {
    pub fn pair() -> (FeedSender, ChannelFeed) {
        let (frames_tx, frames_rx) = mpsc::channel();
        let state = Arc::new(Mutex::new(ReadyState::Connecting));
        (
            FeedSender {
                frames: frames_tx,
                state: state.clone(),
            },
            ChannelFeed {
                frames: frames_rx,
                state,
            },
        )
    }
}

fn read_state(state: &Mutex<ReadyState>) -> ReadyState {
    state.lock().map(|state| *state).unwrap_or(ReadyState::Closed)
}

fn write_state(state: &Mutex<ReadyState>, next: ReadyState) {
    if let Ok(mut state) = state.lock() {
        *state = next;
    }
}

impl FeedSender {
    pub fn open(&self) {
        write_state(&self.state, ReadyState::Open);
    }

    /// Queues a frame. Fails once the consumer has closed the feed.
    pub fn send(&self, frame: impl Into<String>) -> Result<(), FeedError> {
        let state = read_state(&self.state);
        if matches!(state, ReadyState::Closing | ReadyState::Closed) {
            return Err(FeedError::NotOpen(state));
        }
        self.frames
            .send(frame.into())
            .map_err(|_| FeedError::NotOpen(ReadyState::Closed))
    }

    pub fn send_message(&self, message: &FeedMessage) -> Result<(), FeedError> {
        self.send(message.encode()?)
    }

    pub fn ready_state(&self) -> ReadyState {
        read_state(&self.state)
    }
}

impl FeedConnection for ChannelFeed {
    fn ready_state(&self) -> ReadyState {
        read_state(&self.state)
    }

    fn next_frame(&mut self) -> Option<String> {
        match self.frames.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                write_state(&self.state, ReadyState::Closed);
                None
            }
        }
    }

    fn close(&mut self) {
        write_state(&self.state, ReadyState::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEW: &str = r#"{
        "type": "new_complaint",
        "complaint": {
            "_id": "c-7",
            "title": "Leaking tap",
            "status": "Pending",
            "priority": "high",
            "room": "A-101",
            "createdAt": "2024-03-02T08:30:00Z"
        }
    }"#;

    #[test]
    fn decodes_tagged_messages() {
        let message = FeedMessage::decode(NEW).unwrap();
        assert!(matches!(message, FeedMessage::NewComplaint { .. }));
        assert_eq!(message.complaint().id, "c-7");
        assert_eq!(message.complaint().room.as_deref(), Some("A-101"));

        let encoded = message.encode().unwrap();
        assert!(encoded.contains(r#""type":"new_complaint""#));
    }

    #[test]
    fn unknown_message_types_are_errors() {
        let error = FeedMessage::decode(r#"{"type":"ping"}"#).unwrap_err();
        assert!(matches!(error, FeedError::Decode(_)));
        let message = error.to_string();
        assert!(message.starts_with("undecodable feed message: "), "{message}");
        assert!(message.contains("unknown variant `ping`"), "{message}");
    }

    #[test]
    fn draining_requires_an_open_connection() {
        let (_sender, feed) = ChannelFeed::pair();
        let mut subscription = FeedSubscription::new(feed);
        let mut board = ComplaintBoard::default();
        assert!(matches!(
            subscription.drain_into(&mut board),
            Err(FeedError::NotOpen(ReadyState::Connecting))
        ));
    }

    #[test]
    fn bad_frames_are_skipped() {
        let (sender, feed) = ChannelFeed::pair();
        sender.open();
        sender.send("not json").unwrap();
        sender.send(NEW).unwrap();
        let mut subscription = FeedSubscription::new(feed);
        let mut board = ComplaintBoard::default();

        let report = subscription.drain_into(&mut board).unwrap();
        assert_eq!(report.rejected, 1);
        assert_eq!(report.inserted, 1);
        assert!(report.changed());
    }

    #[test]
    fn dropping_an_open_subscription_closes_the_feed() {
        let (sender, feed) = ChannelFeed::pair();
        sender.open();
        drop(FeedSubscription::new(feed));
        assert_eq!(sender.ready_state(), ReadyState::Closed);
        assert!(sender.send(NEW).is_err());
    }

    struct CountingConnection {
        state: ReadyState,
        closes: Arc<Mutex<usize>>,
    }

    impl FeedConnection for CountingConnection {
        fn ready_state(&self) -> ReadyState {
            self.state
        }

        fn next_frame(&mut self) -> Option<String> {
            None
        }

        fn close(&mut self) {
            *self.closes.lock().unwrap() += 1;
        }
    }

    #[test]
    fn connections_that_are_not_open_are_left_alone() {
        for (state, expected) in [
            (ReadyState::Connecting, 0),
            (ReadyState::Open, 1),
            (ReadyState::Closing, 0),
            (ReadyState::Closed, 0),
        ] {
            let closes = Arc::new(Mutex::new(0));
            drop(FeedSubscription::new(CountingConnection {
                state,
                closes: closes.clone(),
            }));
            assert_eq!(*closes.lock().unwrap(), expected, "{state:?}");
        }
    }
}
