//! Keyboard-wedge token source.
//!
//! Handheld barcode scanners type the decoded token followed by Enter. The
//! console collects those keystrokes and forwards each completed line here,
//! where the engine's decoder loop picks it up.

use async_trait::async_trait;
use checkin_engine::{DecoderError, TokenSource};
use tokio::sync::mpsc;

/// Sending half handed to the input loop.
#[derive(Clone, Debug)]
pub struct WedgeSender {
    tx: mpsc::Sender<Result<String, DecoderError>>,
}

/// What became of a line handed to [`WedgeSender::try_send`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Queued for the decoder loop.
    Queued,
    /// The queue is full; the line was dropped.
    Busy,
    /// The decoder loop is gone.
    Closed,
}

impl WedgeSender {
    /// Queue a completed line without waiting for room.
    ///
    /// The input loop also redraws the console, so it never parks on a full
    /// queue behind a slow validation.
    pub fn try_send(&self, token: String) -> Delivery {
        self.deliver(Ok(token))
    }

    /// Report that the input device stopped delivering.
    pub fn fault(&self, reason: impl Into<String>) -> Delivery {
        self.deliver(Err(DecoderError::Device(reason.into())))
    }

    fn deliver(&self, item: Result<String, DecoderError>) -> Delivery {
        match self.tx.try_send(item) {
            Ok(()) => Delivery::Queued,
            Err(mpsc::error::TrySendError::Full(_)) => Delivery::Busy,
            Err(mpsc::error::TrySendError::Closed(_)) => Delivery::Closed,
        }
    }
}

/// Receiving half, consumed by `ScannerSession::run_decoder`.
#[derive(Debug)]
pub struct WedgeTokenSource {
    rx: mpsc::Receiver<Result<String, DecoderError>>,
}

#[async_trait]
impl TokenSource for WedgeTokenSource {
    async fn next_token(&mut self) -> Option<Result<String, DecoderError>> {
        self.rx.recv().await
    }
}

/// Create a connected sender/source pair with room for `capacity` lines.
pub fn wedge_channel(capacity: usize) -> (WedgeSender, WedgeTokenSource) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (WedgeSender { tx }, WedgeTokenSource { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_arrive_in_order() {
        let (sender, mut source) = wedge_channel(4);
        assert_eq!(sender.try_send("TKT-1".into()), Delivery::Queued);
        assert_eq!(sender.fault("unplugged"), Delivery::Queued);
        drop(sender);

        assert_eq!(source.next_token().await, Some(Ok("TKT-1".into())));
        assert_eq!(
            source.next_token().await,
            Some(Err(DecoderError::Device("unplugged".into())))
        );
        assert_eq!(source.next_token().await, None);
    }

    #[test]
    fn test_full_queue_reports_busy_without_waiting() {
        let (sender, _source) = wedge_channel(2);
        assert_eq!(sender.try_send("TKT-1".into()), Delivery::Queued);
        assert_eq!(sender.try_send("TKT-2".into()), Delivery::Queued);
        assert_eq!(sender.try_send("TKT-3".into()), Delivery::Busy);
        assert_eq!(sender.fault("unplugged"), Delivery::Busy);
    }

    #[tokio::test]
    async fn test_busy_queue_accepts_again_once_drained() {
        let (sender, mut source) = wedge_channel(1);
        assert_eq!(sender.try_send("TKT-1".into()), Delivery::Queued);
        assert_eq!(sender.try_send("TKT-2".into()), Delivery::Busy);

        assert_eq!(source.next_token().await, Some(Ok("TKT-1".into())));
        assert_eq!(sender.try_send("TKT-3".into()), Delivery::Queued);
        assert_eq!(source.next_token().await, Some(Ok("TKT-3".into())));
    }

    #[test]
    fn test_send_fails_after_source_dropped() {
        let (sender, source) = wedge_channel(1);
        drop(source);
        assert_eq!(sender.try_send("TKT-1".into()), Delivery::Closed);
    }
}
