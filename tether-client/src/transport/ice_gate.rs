use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

use tether_core::SessionDescription;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("ice gathering did not complete within {waited:?}")]
    Timeout { waited: Duration },
    #[error("gathering observer was dropped before completing")]
    Abandoned,
}

/// One-shot gate between candidate gathering and signaling.
///
/// The remote side of this exchange does not support trickle ICE, so the
/// local description must only go out once gathering has finished. The engine
/// fires the gate with the finalized description; the first signal wins and
/// every later one (including concurrent duplicates) is dropped.
#[derive(Clone)]
pub struct IceGate {
    fired: Arc<AtomicBool>,
    tx: mpsc::Sender<SessionDescription>,
}

/// Receiving half of an [`IceGate`], consumed by a single wait.
pub struct IceGateReceiver {
    rx: mpsc::Receiver<SessionDescription>,
}

impl IceGate {
    pub fn channel() -> (IceGate, IceGateReceiver) {
        let (tx, rx) = mpsc::channel(1);
        (
            IceGate {
                fired: Arc::new(AtomicBool::new(false)),
                tx,
            },
            IceGateReceiver { rx },
        )
    }

    /// Deliver the finalized local description. Only the first call per gate
    /// has any effect.
    pub fn complete(&self, desc: SessionDescription) {
        if self.fired.swap(true, Ordering::SeqCst) {
            debug!("Duplicate gathering-complete signal ignored");
            return;
        }
        let _ = self.tx.try_send(desc);
    }
}

impl IceGateReceiver {
    /// Suspend until the gate fires, bounded by `timeout` when given.
    pub async fn wait(
        mut self,
        timeout: Option<Duration>,
    ) -> Result<SessionDescription, GateError> {
        match timeout {
            Some(waited) => match tokio::time::timeout(waited, self.rx.recv()).await {
                Ok(Some(desc)) => Ok(desc),
                Ok(None) => Err(GateError::Abandoned),
                Err(_) => Err(GateError::Timeout { waited }),
            },
            None => self.rx.recv().await.ok_or(GateError::Abandoned),
        }
    }
}
