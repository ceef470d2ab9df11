//! Dashboard flows over the in-memory transport.
//!
//! Each test drives the client the way a page would and checks the exact
//! requests, navigation and toasts that result.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use rust_decimal::Decimal;
use serde_json::json;
use storeboard_client::error::FormError;
use storeboard_client::testing::{NavEvent, Toast};
use storeboard_client::{EntityForm, Method, StoreModal, StoreSettings, TableClient};
use storeboard_core::Validate;
use storeboard_core::entity::GENERIC_FAILURE;
use storeboard_core::forms::{
    BillboardInput, CategoryInput, ColorInput, ImageInput, ProductInput, SizeInput, StoreInput,
};
use storeboard_core::records::{Billboard, Size};
use storeboard_integration_tests::Scenario;

fn billboard_json(id: &str, label: &str) -> serde_json::Value {
    json!({
        "id": id,
        "storeId": storeboard_integration_tests::fixed_store_id().to_string(),
        "label": label,
        "imageUrl": "https://x/img.png",
        "createdAt": "2026-10-19T10:00:00Z",
        "updatedAt": "2026-10-19T10:00:00Z"
    })
}

const BILLBOARD_ID: &str = "0f8e8a57-6d0c-4d4b-9f66-3c1f0f1b2a3c";

#[tokio::test]
async fn test_create_billboard_posts_exact_body_and_returns_to_list() {
    let s = Scenario::new();
    s.transport.respond(billboard_json(BILLBOARD_ID, "Summer"));
    let form = EntityForm::<_, BillboardInput>::create(s.transport.clone(), s.ui(), s.store_id);

    let saved = form
        .submit(&BillboardInput {
            label: "Summer".to_string(),
            image_url: "https://x/img.png".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(saved["id"], BILLBOARD_ID);
    let requests = s.transport.requests();
    assert_eq!(requests.len(), 1);
    let post = requests.first().unwrap();
    assert_eq!(post.method, Method::Post);
    assert_eq!(post.path, format!("/api/{}/billboards", s.store_id));
    assert_eq!(
        post.body,
        Some(json!({"label": "Summer", "imageUrl": "https://x/img.png"}))
    );
    assert_eq!(
        s.harness.navigator.events(),
        vec![
            NavEvent::Push(format!("/{}/billboards", s.store_id)),
            NavEvent::Refresh
        ]
    );
    assert_eq!(
        s.harness.notifier.toasts(),
        vec![Toast::Success("Billboard created".to_string())]
    );
    assert!(!form.is_loading());
}

#[tokio::test]
async fn test_every_form_with_an_empty_required_field_sends_nothing() {
    let s = Scenario::new();

    let billboard = EntityForm::<_, BillboardInput>::create(s.transport.clone(), s.ui(), s.store_id);
    let category = EntityForm::<_, CategoryInput>::create(s.transport.clone(), s.ui(), s.store_id);
    let color = EntityForm::<_, ColorInput>::create(s.transport.clone(), s.ui(), s.store_id);
    let size = EntityForm::<_, SizeInput>::create(s.transport.clone(), s.ui(), s.store_id);
    let product = EntityForm::<_, ProductInput>::create(s.transport.clone(), s.ui(), s.store_id);
    let modal = StoreModal::new(s.transport.clone(), s.ui());

    let results = [
        (
            "imageUrl",
            billboard
                .submit(&BillboardInput {
                    label: "Summer".to_string(),
                    ..BillboardInput::default()
                })
                .await,
        ),
        (
            "billboardId",
            category
                .submit(&CategoryInput {
                    name: "Tops".to_string(),
                    ..CategoryInput::default()
                })
                .await,
        ),
        (
            "name",
            color
                .submit(&ColorInput {
                    value: "#00ff00".to_string(),
                    ..ColorInput::default()
                })
                .await,
        ),
        (
            "value",
            size.submit(&SizeInput {
                name: "Large".to_string(),
                ..SizeInput::default()
            })
            .await,
        ),
        (
            "images",
            product
                .submit(&ProductInput {
                    name: "Shirt".to_string(),
                    price: Decimal::from(12),
                    category_id: "c".to_string(),
                    color_id: "c".to_string(),
                    size_id: "s".to_string(),
                    ..ProductInput::default()
                })
                .await,
        ),
    ];

    for (field, result) in results {
        let Err(FormError::Invalid(errors)) = result else {
            panic!("{field}: expected a validation error");
        };
        assert!(errors.get(field).is_some(), "{field}: {errors}");
    }
    let store = modal.create(&StoreInput::default()).await;
    assert!(matches!(store, Err(FormError::Invalid(ref e)) if e.get("name").is_some()));

    assert!(s.transport.requests().is_empty());
    assert!(s.harness.notifier.toasts().is_empty());
    assert!(s.harness.navigator.events().is_empty());
}

#[test]
fn test_color_value_must_be_hex() {
    let color = |value: &str| ColorInput {
        name: "Green".to_string(),
        value: value.to_string(),
    };
    assert!(color("00ff00").validate().is_err());
    assert!(color("#00ff00").validate().is_ok());
}

#[test]
fn test_product_price_must_be_at_least_one() {
    let product = ProductInput {
        name: "Shirt".to_string(),
        images: vec![ImageInput {
            url: "https://x/1.png".to_string(),
        }],
        price: Decimal::new(99, 2),
        category_id: "c".to_string(),
        color_id: "c".to_string(),
        size_id: "s".to_string(),
        ..ProductInput::default()
    };
    let errors = product.validate().unwrap_err();
    assert!(errors.get("price").is_some());
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn test_edit_patches_the_record_path_once() {
    let s = Scenario::new();
    let form = EntityForm::<_, SizeInput>::edit(s.transport.clone(), s.ui(), s.store_id, "size-42");

    form.submit(&SizeInput {
        name: "Large".to_string(),
        value: "L".to_string(),
    })
    .await
    .unwrap();

    let requests = s.transport.requests();
    assert_eq!(requests.len(), 1);
    let patch = requests.first().unwrap();
    assert_eq!(patch.method, Method::Patch);
    assert!(patch.path.ends_with("/sizes/size-42"));
    assert_eq!(
        s.harness.notifier.toasts(),
        vec![Toast::Success("Size updated".to_string())]
    );
}

#[tokio::test]
async fn test_failed_delete_leaves_record_and_shows_dependency_message() {
    let s = Scenario::new();
    let client = TableClient::new(s.transport.clone(), s.ui(), s.store_id);

    s.transport.respond(json!([billboard_json(BILLBOARD_ID, "Summer")]));
    let before = client.load::<Billboard>().await.unwrap();
    let actions = client.actions(before.kind, before.rows.first().unwrap());

    s.transport.fail(409);
    actions.request_delete();
    assert!(matches!(actions.confirm_delete().await, Some(Err(_))));

    s.transport.respond(json!([billboard_json(BILLBOARD_ID, "Summer")]));
    let after = client.load::<Billboard>().await.unwrap();
    assert_eq!(after.heading(), "Billboards (1)");
    assert_eq!(after.rows.first().map(|r| r.id.as_str()), Some(BILLBOARD_ID));

    let toasts = s.harness.notifier.toasts();
    assert_eq!(
        toasts,
        vec![Toast::Error(
            "Make sure you removed all categories using this billboard first.".to_string()
        )]
    );
    assert!(!toasts.contains(&Toast::Error(GENERIC_FAILURE.to_string())));
}

#[tokio::test]
async fn test_successful_row_delete_refreshes() {
    let s = Scenario::new();
    let client = TableClient::new(s.transport.clone(), s.ui(), s.store_id);
    s.transport.respond(json!([{
        "id": "5a1d3e9c-8b7f-4c2a-9e6d-1f0b2c3d4e5f",
        "storeId": s.store_id.to_string(),
        "name": "Large",
        "value": "L",
        "createdAt": "2026-10-19T10:00:00Z",
        "updatedAt": "2026-10-19T10:00:00Z"
    }]));
    let table = client.load::<Size>().await.unwrap();
    let actions = client.actions(table.kind, table.rows.first().unwrap());

    actions.request_delete();
    assert!(matches!(actions.confirm_delete().await, Some(Ok(()))));

    let delete = s.transport.requests().into_iter().last().unwrap();
    assert_eq!(delete.method, Method::Delete);
    assert_eq!(
        delete.path,
        format!("/api/{}/sizes/5a1d3e9c-8b7f-4c2a-9e6d-1f0b2c3d4e5f", s.store_id)
    );
    assert_eq!(s.harness.navigator.events(), vec![NavEvent::Refresh]);
    assert_eq!(
        s.harness.notifier.toasts(),
        vec![Toast::Success("Size deleted.".to_string())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_copy_id_puts_exact_id_on_clipboard_and_reverts() {
    let s = Scenario::new();
    let client = TableClient::new(s.transport.clone(), s.ui(), s.store_id);
    s.transport.respond(json!([billboard_json(BILLBOARD_ID, "Summer")]));
    let table = client.load::<Billboard>().await.unwrap();
    let actions = client.actions(table.kind, table.rows.first().unwrap());

    actions.copy_id().unwrap();

    assert_eq!(s.harness.clipboard.text().as_deref(), Some(BILLBOARD_ID));
    assert_eq!(
        s.harness.notifier.toasts(),
        vec![Toast::Success("Billboard ID copied to clipboard.".to_string())]
    );
    assert!(actions.copy_indicator().is_copied());

    tokio::time::sleep(Duration::from_millis(1001)).await;
    tokio::task::yield_now().await;
    assert!(!actions.copy_indicator().is_copied());
}

#[tokio::test]
async fn test_store_settings_failure_messages() {
    let s = Scenario::new();
    let settings = StoreSettings::new(s.transport.clone(), s.ui(), s.store_id);

    s.transport.fail(500);
    assert!(
        settings
            .update(&StoreInput {
                name: "Renamed".to_string(),
            })
            .await
            .is_err()
    );
    s.transport.fail(409);
    assert!(settings.delete().await.is_err());

    assert_eq!(
        s.harness.notifier.toasts(),
        vec![
            Toast::Error(GENERIC_FAILURE.to_string()),
            Toast::Error("Make sure you removed all products and categories first.".to_string()),
        ]
    );
    assert!(s.harness.navigator.events().is_empty());
    assert!(!settings.is_loading());
}
