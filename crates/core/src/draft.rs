//! Workflow drafts handed from the upload step to report generation

use crate::storage::KeyValueStore;
use crate::types::UploadInfo;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which order workflow an upload belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowKind {
    NewOrder,
    AdditionalOrder,
}

impl WorkflowKind {
    pub const ALL: [Self; 2] = [Self::NewOrder, Self::AdditionalOrder];

    /// Storage slot for drafts of this kind
    pub const fn storage_key(self) -> &'static str {
        match self {
            Self::NewOrder => "draft.new_order",
            Self::AdditionalOrder => "draft.additional_order",
        }
    }

    pub const fn is_additional(self) -> bool {
        matches!(self, Self::AdditionalOrder)
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NewOrder => f.write_str("new order"),
            Self::AdditionalOrder => f.write_str("additional order"),
        }
    }
}

/// An upload waiting for its report to be generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDraft {
    pub kind: WorkflowKind,
    pub upload: UploadInfo,
}

impl WorkflowDraft {
    pub const fn new(kind: WorkflowKind, upload: UploadInfo) -> Self {
        Self { kind, upload }
    }
}

/// Drafts kept in the ephemeral store, one slot per [`WorkflowKind`]
#[derive(Clone)]
pub struct DraftStore {
    store: Arc<dyn KeyValueStore>,
}

impl DraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Save `draft`, replacing any pending draft of the same kind
    pub fn save(&self, draft: &WorkflowDraft) -> Result<()> {
        let raw = serde_json::to_string(draft)?;
        self.store.set(draft.kind.storage_key(), &raw)?;
        debug!(kind = %draft.kind, upload_id = %draft.upload.upload_id, "Draft saved");
        Ok(())
    }

    /// The pending draft of `kind`, if any
    ///
    /// A slot holding something that does not decode is treated as empty.
    pub fn load(&self, kind: WorkflowKind) -> Result<Option<WorkflowDraft>> {
        let Some(raw) = self.store.get(kind.storage_key())? else {
            return Ok(None);
        };
        match serde_json::from_str::<WorkflowDraft>(&raw) {
            Ok(draft) if draft.kind == kind => Ok(Some(draft)),
            Ok(draft) => {
                warn!(expected = %kind, found = %draft.kind, "Draft stored in the wrong slot, ignoring");
                Ok(None)
            }
            Err(e) => {
                warn!(kind = %kind, "Discarding unreadable draft: {e}");
                Ok(None)
            }
        }
    }

    pub fn clear(&self, kind: WorkflowKind) -> Result<()> {
        self.store.remove(kind.storage_key())
    }

    pub fn clear_all(&self) -> Result<()> {
        for kind in WorkflowKind::ALL {
            self.clear(kind)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DraftStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DraftStore").finish_non_exhaustive()
    }
}
