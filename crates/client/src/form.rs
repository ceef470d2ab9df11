//! Mutate-and-redirect helpers.
//!
//! Every dashboard form does the same thing: validate, send one request,
//! then navigate to the list, refresh and toast. Failures are turned into a
//! toast here; the returned error is for callers that want to log or branch.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, instrument, warn};

use storeboard_core::entity::{GENERIC_FAILURE, store_messages};
use storeboard_core::forms::{EntityInput, StoreInput};
use storeboard_core::records::Store;
use storeboard_core::{Editable, EntityKind, StoreId, Validate};

use crate::error::{FormError, TransportError};
use crate::loading::LoadingFlag;
use crate::transport::{ApiRequest, Transport, fetch};
use crate::ui::Ui;

/// Create or edit form for one entity kind, chosen by the input type.
pub struct EntityForm<T, I> {
    transport: Arc<T>,
    ui: Ui,
    store_id: StoreId,
    record_id: Option<String>,
    loading: LoadingFlag,
    _input: PhantomData<fn() -> I>,
}

impl<T, I> std::fmt::Debug for EntityForm<T, I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityForm")
            .field("store_id", &self.store_id)
            .field("record_id", &self.record_id)
            .field("loading", &self.loading.is_loading())
            .finish_non_exhaustive()
    }
}

impl<T: Transport, I: EntityInput> EntityForm<T, I> {
    /// Form for a new record.
    #[must_use]
    pub fn create(transport: Arc<T>, ui: Ui, store_id: StoreId) -> Self {
        Self {
            transport,
            ui,
            store_id,
            record_id: None,
            loading: LoadingFlag::new(),
            _input: PhantomData,
        }
    }

    /// Form for an existing record.
    #[must_use]
    pub fn edit(transport: Arc<T>, ui: Ui, store_id: StoreId, record_id: impl Into<String>) -> Self {
        Self {
            record_id: Some(record_id.into()),
            ..Self::create(transport, ui, store_id)
        }
    }

    /// Fetch a record and open an edit form pre-filled from it.
    ///
    /// # Errors
    ///
    /// Returns the transport error if the record cannot be loaded.
    pub async fn open<R>(
        transport: Arc<T>,
        ui: Ui,
        store_id: StoreId,
        record_id: &str,
    ) -> Result<(Self, I), TransportError>
    where
        R: Editable<Input = I> + DeserializeOwned,
    {
        let record: R = fetch(&*transport, ApiRequest::get(I::KIND.api_item_path(store_id, record_id))).await?;
        Ok((Self::edit(transport, ui, store_id, record_id), record.to_input()))
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.record_id.is_some()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    #[must_use]
    pub fn title(&self) -> String {
        I::KIND.form_title(self.is_editing())
    }

    #[must_use]
    pub fn description(&self) -> String {
        I::KIND.form_description(self.is_editing())
    }

    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        EntityKind::form_action(self.is_editing())
    }

    /// Toast shown after a successful submit.
    #[must_use]
    pub fn success_message(&self) -> String {
        if self.is_editing() {
            I::KIND.updated_message()
        } else {
            I::KIND.created_message()
        }
    }

    /// Validate `input`, then PATCH the record or POST a new one.
    ///
    /// On success navigates to the list, refreshes and toasts; returns the
    /// saved record as the server sent it.
    ///
    /// # Errors
    ///
    /// `Invalid` without any request when validation fails, `Busy` while a
    /// previous call is in flight, `Transport` after the failure toast.
    #[instrument(skip(self, input), fields(kind = %I::KIND, editing = self.is_editing()))]
    pub async fn submit(&self, input: &I) -> Result<Value, FormError> {
        input.validate().map_err(FormError::Invalid)?;
        let _guard = self.loading.try_begin().ok_or(FormError::Busy)?;

        let request = match &self.record_id {
            Some(id) => ApiRequest::patch(I::KIND.api_item_path(self.store_id, id)),
            None => ApiRequest::post(I::KIND.api_collection_path(self.store_id)),
        };
        let result = match request.json(input) {
            Ok(request) => self.transport.send(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(record) => {
                info!("Saved");
                self.ui.navigator.push(&I::KIND.list_route(self.store_id));
                self.ui.navigator.refresh();
                self.ui.notifier.success(&self.success_message());
                Ok(record)
            }
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "Save failed");
                self.ui.notifier.error(GENERIC_FAILURE);
                Err(e.into())
            }
        }
    }

    /// DELETE the record, then navigate to the list, refresh and toast.
    ///
    /// # Errors
    ///
    /// `NotSaved` on a create form, `Busy` while a call is in flight,
    /// `Transport` after the kind's delete-failure toast.
    #[instrument(skip(self), fields(kind = %I::KIND))]
    pub async fn delete(&self) -> Result<(), FormError> {
        let id = self.record_id.as_deref().ok_or(FormError::NotSaved)?;
        let _guard = self.loading.try_begin().ok_or(FormError::Busy)?;

        match self
            .transport
            .send(ApiRequest::delete(I::KIND.api_item_path(self.store_id, id)))
            .await
        {
            Ok(_) => {
                info!(id, "Deleted");
                self.ui.navigator.push(&I::KIND.list_route(self.store_id));
                self.ui.navigator.refresh();
                self.ui.notifier.success(&I::KIND.deleted_message());
                Ok(())
            }
            Err(e) => {
                warn!(id, status = ?e.status(), error = %e, "Delete failed");
                self.ui.notifier.error(I::KIND.delete_failed_message());
                Err(e.into())
            }
        }
    }
}

/// The settings page of one store: rename and delete.
pub struct StoreSettings<T> {
    transport: Arc<T>,
    ui: Ui,
    store_id: StoreId,
    loading: LoadingFlag,
}

impl<T> std::fmt::Debug for StoreSettings<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreSettings")
            .field("store_id", &self.store_id)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> StoreSettings<T> {
    #[must_use]
    pub fn new(transport: Arc<T>, ui: Ui, store_id: StoreId) -> Self {
        Self {
            transport,
            ui,
            store_id,
            loading: LoadingFlag::new(),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    fn path(&self) -> String {
        format!("/api/stores/{}", self.store_id)
    }

    /// Rename the store, refresh and toast.
    ///
    /// # Errors
    ///
    /// Same contract as [`EntityForm::submit`].
    #[instrument(skip(self, input), fields(store_id = %self.store_id))]
    pub async fn update(&self, input: &StoreInput) -> Result<Store, FormError> {
        input.validate().map_err(FormError::Invalid)?;
        let _guard = self.loading.try_begin().ok_or(FormError::Busy)?;

        let result: Result<Store, TransportError> = match ApiRequest::patch(self.path()).json(input) {
            Ok(request) => fetch(&*self.transport, request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(store) => {
                self.ui.navigator.refresh();
                self.ui.notifier.success(store_messages::UPDATED);
                Ok(store)
            }
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "Store update failed");
                self.ui.notifier.error(GENERIC_FAILURE);
                Err(e.into())
            }
        }
    }

    /// Delete the store and go back to `/`.
    ///
    /// # Errors
    ///
    /// `Busy` while a call is in flight, `Transport` after the toast asking
    /// the user to remove products and categories first.
    #[instrument(skip(self), fields(store_id = %self.store_id))]
    pub async fn delete(&self) -> Result<(), FormError> {
        let _guard = self.loading.try_begin().ok_or(FormError::Busy)?;

        match self.transport.send(ApiRequest::delete(self.path())).await {
            Ok(_) => {
                self.ui.navigator.refresh();
                self.ui.navigator.push("/");
                self.ui.notifier.success(store_messages::DELETED);
                Ok(())
            }
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "Store delete failed");
                self.ui.notifier.error(store_messages::DELETE_FAILED);
                Err(e.into())
            }
        }
    }
}

/// The "Create store" modal.
pub struct StoreModal<T> {
    transport: Arc<T>,
    ui: Ui,
    loading: LoadingFlag,
}

impl<T> std::fmt::Debug for StoreModal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreModal")
            .field("loading", &self.loading.is_loading())
            .finish_non_exhaustive()
    }
}

impl<T: Transport> StoreModal<T> {
    #[must_use]
    pub fn new(transport: Arc<T>, ui: Ui) -> Self {
        Self {
            transport,
            ui,
            loading: LoadingFlag::new(),
        }
    }

    /// Create a store and open its dashboard.
    ///
    /// # Errors
    ///
    /// Same contract as [`EntityForm::submit`].
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: &StoreInput) -> Result<Store, FormError> {
        input.validate().map_err(FormError::Invalid)?;
        let _guard = self.loading.try_begin().ok_or(FormError::Busy)?;

        let result: Result<Store, TransportError> = match ApiRequest::post("/api/stores").json(input) {
            Ok(request) => fetch(&*self.transport, request).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(store) => {
                info!(store_id = %store.id, "Store created");
                self.ui.navigator.push(&format!("/{}", store.id));
                Ok(store)
            }
            Err(e) => {
                warn!(status = ?e.status(), error = %e, "Store create failed");
                self.ui.notifier.error(GENERIC_FAILURE);
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use storeboard_core::forms::{BillboardInput, ColorInput, SizeInput};

    use super::*;
    use storeboard_core::records::Size;
    use crate::testing::{Harness, MockTransport, NavEvent, Toast};
    use crate::transport::Method;

    fn store() -> StoreId {
        "7b0c2f4e-3c1a-4d8e-9f6b-2a5d8e1c4b7a".parse().unwrap()
    }

    fn summer() -> BillboardInput {
        BillboardInput {
            label: "Summer".to_string(),
            image_url: "https://x/img.png".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_posts_once_and_redirects() {
        let transport = Arc::new(MockTransport::new());
        let harness = Harness::new();
        let form = EntityForm::<_, BillboardInput>::create(Arc::clone(&transport), harness.ui(), store());

        form.submit(&summer()).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = requests.first().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, format!("/api/{}/billboards", store()));
        assert_eq!(
            request.body,
            Some(json!({"label": "Summer", "imageUrl": "https://x/img.png"}))
        );
        assert_eq!(
            harness.navigator.events(),
            vec![
                NavEvent::Push(format!("/{}/billboards", store())),
                NavEvent::Refresh
            ]
        );
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Success("Billboard created".to_string())]
        );
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_edit_patches_item_path() {
        let transport = Arc::new(MockTransport::new());
        let harness = Harness::new();
        let form = EntityForm::<_, SizeInput>::edit(Arc::clone(&transport), harness.ui(), store(), "size-1");
        let input = SizeInput {
            name: "Large".to_string(),
            value: "L".to_string(),
        };

        form.submit(&input).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let request = requests.first().unwrap();
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, format!("/api/{}/sizes/size-1", store()));
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Success("Size updated".to_string())]
        );
        assert_eq!(form.title(), "Edit size");
        assert_eq!(form.action_label(), "Save changes");
    }

    #[tokio::test]
    async fn test_invalid_input_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let harness = Harness::new();
        let form = EntityForm::<_, ColorInput>::create(Arc::clone(&transport), harness.ui(), store());
        let input = ColorInput {
            name: "Green".to_string(),
            value: "00ff00".to_string(),
        };

        let err = form.submit(&input).await.unwrap_err();
        let FormError::Invalid(errors) = err else {
            panic!("expected validation errors, got {err:?}");
        };
        assert_eq!(errors.get("value"), Some("String must be a valid hex code"));
        assert!(transport.requests().is_empty());
        assert!(harness.notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_failed_submit_toasts_generic_and_stays() {
        let transport = Arc::new(MockTransport::new());
        transport.fail(500);
        let harness = Harness::new();
        let form = EntityForm::<_, BillboardInput>::create(Arc::clone(&transport), harness.ui(), store());

        let err = form.submit(&summer()).await.unwrap_err();
        assert!(matches!(err, FormError::Transport(ref e) if e.status() == Some(500)));
        assert!(harness.navigator.events().is_empty());
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Error(GENERIC_FAILURE.to_string())]
        );
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn test_second_submit_while_loading_is_refused() {
        let transport = Arc::new(MockTransport::new());
        let release = transport.hold();
        let harness = Harness::new();
        let form = EntityForm::<_, BillboardInput>::create(Arc::clone(&transport), harness.ui(), store());
        let input = summer();

        let (first, second) = tokio::join!(form.submit(&input), async {
            let second = form.submit(&input).await;
            release.notify_one();
            second
        });

        assert!(first.is_ok());
        assert!(matches!(second, Err(FormError::Busy)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_shows_dependency_message() {
        let transport = Arc::new(MockTransport::new());
        transport.fail(409);
        let harness = Harness::new();
        let form = EntityForm::<_, BillboardInput>::edit(Arc::clone(&transport), harness.ui(), store(), "b1");

        assert!(form.delete().await.is_err());
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Error(
                "Make sure you removed all categories using this billboard first.".to_string()
            )]
        );
        assert!(harness.navigator.events().is_empty());
    }

    #[tokio::test]
    async fn test_delete_on_create_form_is_refused() {
        let transport = Arc::new(MockTransport::new());
        let form = EntityForm::<_, SizeInput>::create(Arc::clone(&transport), Harness::new().ui(), store());
        assert!(matches!(form.delete().await, Err(FormError::NotSaved)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_open_prefills_from_record() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(json!({
            "id": "0f8e8a57-6d0c-4d4b-9f66-3c1f0f1b2a3c",
            "storeId": store().to_string(),
            "name": "Large",
            "value": "L",
            "createdAt": "2026-10-19T10:00:00Z",
            "updatedAt": "2026-10-19T10:00:00Z"
        }));
        let (form, input) = EntityForm::<_, SizeInput>::open::<Size>(
            Arc::clone(&transport),
            Harness::new().ui(),
            store(),
            "0f8e8a57-6d0c-4d4b-9f66-3c1f0f1b2a3c",
        )
        .await
        .unwrap();

        assert!(form.is_editing());
        assert_eq!(input.name, "Large");
        assert_eq!(input.value, "L");
        assert_eq!(
            transport.requests().first().map(|r| r.path.clone()),
            Some(format!("/api/{}/sizes/0f8e8a57-6d0c-4d4b-9f66-3c1f0f1b2a3c", store()))
        );
    }

    #[tokio::test]
    async fn test_settings_delete_goes_home() {
        let transport = Arc::new(MockTransport::new());
        let harness = Harness::new();
        let settings = StoreSettings::new(Arc::clone(&transport), harness.ui(), store());

        settings.delete().await.unwrap();

        assert_eq!(
            transport.requests().first().map(|r| (r.method, r.path.clone())),
            Some((Method::Delete, format!("/api/stores/{}", store())))
        );
        assert_eq!(
            harness.navigator.events(),
            vec![NavEvent::Refresh, NavEvent::Push("/".to_string())]
        );
        assert_eq!(
            harness.notifier.toasts(),
            vec![Toast::Success("Store deleted.".to_string())]
        );
    }

    #[tokio::test]
    async fn test_store_modal_opens_new_store() {
        let transport = Arc::new(MockTransport::new());
        transport.respond(json!({
            "id": store().to_string(),
            "name": "Shop",
            "userId": "user_abc",
            "createdAt": "2026-10-19T10:00:00Z",
            "updatedAt": "2026-10-19T10:00:00Z"
        }));
        let harness = Harness::new();
        let modal = StoreModal::new(Arc::clone(&transport), harness.ui());

        let created = modal
            .create(&StoreInput {
                name: "Shop".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(created.id, store());
        assert_eq!(
            harness.navigator.events(),
            vec![NavEvent::Push(format!("/{}", store()))]
        );
    }
}
