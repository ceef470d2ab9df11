//! Entity tables over the REST API: loading rows and per-row actions.
//!
//! Search and sort of a loaded [`Table`] live in `storeboard_core::table`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{info, instrument, warn};

use storeboard_core::table::TableRow;
use storeboard_core::{EntityKind, ListRecord, StoreId, Table};

use crate::copy::CopyIndicator;
use crate::error::{ClipboardError, TransportError};
use crate::gate::DeleteGate;
use crate::transport::{ApiRequest, Transport, fetch};
use crate::ui::Ui;

/// Loads tables for one store and hands out row actions.
pub struct TableClient<T> {
    transport: Arc<T>,
    ui: Ui,
    store_id: StoreId,
}

impl<T> std::fmt::Debug for TableClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableClient")
            .field("store_id", &self.store_id)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> TableClient<T> {
    #[must_use]
    pub const fn new(transport: Arc<T>, ui: Ui, store_id: StoreId) -> Self {
        Self {
            transport,
            ui,
            store_id,
        }
    }

    /// Fetch every record of `R`'s kind and format them.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the list cannot be loaded.
    #[instrument(skip(self), fields(kind = %R::KIND, store_id = %self.store_id))]
    pub async fn load<R: ListRecord + DeserializeOwned>(&self) -> Result<Table, TransportError> {
        let records: Vec<R> =
            fetch(&*self.transport, ApiRequest::get(R::KIND.api_collection_path(self.store_id))).await?;
        Ok(Table::from_records(&records))
    }

    /// Actions for one row of a `kind` table.
    #[must_use]
    pub fn actions(&self, kind: EntityKind, row: &TableRow) -> RowActions<T> {
        RowActions {
            transport: Arc::clone(&self.transport),
            ui: self.ui.clone(),
            store_id: self.store_id,
            kind,
            id: row.id.clone(),
            gate: DeleteGate::new(),
            copy: CopyIndicator::new(),
        }
    }
}

/// Copy id, edit and delete for one row.
pub struct RowActions<T> {
    transport: Arc<T>,
    ui: Ui,
    store_id: StoreId,
    kind: EntityKind,
    id: String,
    gate: DeleteGate,
    copy: CopyIndicator,
}

impl<T> std::fmt::Debug for RowActions<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowActions")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> RowActions<T> {
    #[must_use]
    pub const fn gate(&self) -> &DeleteGate {
        &self.gate
    }

    #[must_use]
    pub const fn copy_indicator(&self) -> &CopyIndicator {
        &self.copy
    }

    /// Put the row id on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the clipboard is unavailable.
    pub fn copy_id(&self) -> Result<(), ClipboardError> {
        self.copy.copy(&self.ui, &self.id, &self.kind.copied_message())
    }

    /// Open the edit form.
    pub fn edit(&self) {
        self.ui.navigator.push(&self.kind.edit_route(self.store_id, &self.id));
    }

    /// Open the confirmation gate.
    pub fn request_delete(&self) {
        self.gate.open();
    }

    /// Close the confirmation gate; refused while the delete runs.
    pub fn cancel_delete(&self) -> bool {
        self.gate.close()
    }

    /// Run the delete behind the gate: refresh and toast either way.
    ///
    /// Returns `None` if the gate refused, otherwise whether the delete
    /// went through.
    #[instrument(skip(self), fields(kind = %self.kind, id = %self.id))]
    pub async fn confirm_delete(&self) -> Option<Result<(), TransportError>> {
        self.gate
            .confirm(|| async {
                let path = self.kind.api_item_path(self.store_id, &self.id);
                match self.transport.send(ApiRequest::delete(path)).await {
                    Ok(_) => {
                        info!("Deleted");
                        self.ui.navigator.refresh();
                        self.ui.notifier.success(&self.kind.deleted_message());
                        Ok(())
                    }
                    Err(e) => {
                        warn!(status = ?e.status(), error = %e, "Delete failed");
                        self.ui.notifier.error(self.kind.delete_failed_message());
                        Err(e)
                    }
                }
            })
            .await
    }
}
