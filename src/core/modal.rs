// src/core/modal.rs

//! Typed command channel between views and the modal owner.
//!
//! Views hold a [`ModalDispatch`] and send what the modal should display;
//! the app owns the receiving end and decides how to show it.

use crate::core::models::ScanConfig;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// What the modal shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalPayload {
    /// Scan configuration wizard with an empty form.
    NewScanConfig,
    /// Scan configuration wizard prefilled with an existing configuration.
    EditScanConfig(ScanConfig),
    /// Confirmation before deleting a configuration.
    ConfirmDelete(ScanConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalCommand {
    SetModalDisplayData(ModalPayload),
    Close,
}

/// Sending half, cheap to clone into every view that opens modals.
#[derive(Debug, Clone)]
pub struct ModalDispatch {
    tx: mpsc::UnboundedSender<ModalCommand>,
}

impl ModalDispatch {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<ModalCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn open(&self, payload: ModalPayload) {
        self.send(ModalCommand::SetModalDisplayData(payload));
    }

    pub fn close(&self) {
        self.send(ModalCommand::Close);
    }

    fn send(&self, command: ModalCommand) {
        debug!(?command, "Dispatching modal command.");
        if self.tx.send(command).is_err() {
            warn!("Modal owner is gone, command dropped.");
        }
    }
}
