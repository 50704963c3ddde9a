use crate::scrapers::traits::ProgressNotifier;
use serde::Serialize;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::info;

/// Progress event as pushed to the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub progress: usize,
    pub total: usize,
}

/// Discards every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl ProgressNotifier for NullNotifier {
    fn notify(&self, _current: usize, _total: usize) {}
}

/// Writes progress to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl ProgressNotifier for LogNotifier {
    fn notify(&self, current: usize, total: usize) {
        info!("Progress: page {} of {}", current + 1, total);
    }
}

/// Forwards progress over an unbounded channel; a dropped receiver is ignored
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Progress>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, UnboundedReceiver<Progress>) {
        let (sender, receiver) = unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressNotifier for ChannelNotifier {
    fn notify(&self, current: usize, total: usize) {
        let _ = self.sender.send(Progress {
            progress: current,
            total,
        });
    }
}
