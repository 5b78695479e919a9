//! Tokio-backed delivery of [`AlarmMessage`]s
//!
//! [`AlarmScheduler`] is the [`AlarmSink`] a running client hands to its
//! [`PlayView`](crate::play::PlayView). Each scheduled alarm becomes a
//! sleeping task that sends the alarm back through a channel once its delay
//! has elapsed; the owner of the receiver passes every alarm to
//! [`PlayView::receive_alarm`](crate::play::PlayView::receive_alarm).

use enum_map::EnumMap;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
    task::JoinSet,
};
use tracing::trace;
use web_time::Duration;

use crate::play::{AlarmKind, AlarmMessage, AlarmSink};

/// Spawns one timer task per scheduled alarm
///
/// Must be used from within a tokio runtime. Dropping the scheduler aborts
/// every alarm that has not fired yet.
#[derive(Debug)]
pub struct AlarmScheduler {
    sender: UnboundedSender<AlarmMessage>,
    pending: EnumMap<AlarmKind, JoinSet<()>>,
}

impl AlarmScheduler {
    /// A scheduler and the receiving end of its alarms
    pub fn new() -> (Self, UnboundedReceiver<AlarmMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                sender,
                pending: EnumMap::default(),
            },
            receiver,
        )
    }
}

impl AlarmSink for AlarmScheduler {
    fn schedule(&mut self, alarm: AlarmMessage, delay: Duration) {
        let pending = &mut self.pending[alarm.kind()];
        while pending.try_join_next().is_some() {}

        trace!(?alarm, ?delay, "scheduling alarm");
        let sender = self.sender.clone();
        pending.spawn(async move {
            tokio::time::sleep(delay).await;
            // The receiver is gone once the client shut down.
            let _ = sender.send(alarm);
        });
    }

    fn cancel(&mut self, kind: AlarmKind) {
        self.pending[kind].abort_all();
    }

    fn cancel_all(&mut self) {
        for pending in self.pending.values_mut() {
            pending.abort_all();
        }
    }
}
