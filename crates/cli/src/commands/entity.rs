//! Entity commands: list, create, update and delete through the REST API.
//!
//! # Usage
//!
//! ```bash
//! sb-cli list billboards -s <store-id>
//! sb-cli create colors -s <store-id> -d '{"name":"Green","value":"#00ff00"}'
//! sb-cli update colors -s <store-id> -i <color-id> -d '{"value":"#00aa00"}'
//! sb-cli delete colors -s <store-id> -i <color-id>
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use storeboard_client::{EntityForm, TableClient};
use storeboard_core::forms::{BillboardInput, CategoryInput, ColorInput, EntityInput, ProductInput, SizeInput};
use storeboard_core::records::{Billboard, Category, Color, Order, Product, Size};
use storeboard_core::table::SortDir;
use storeboard_core::{Editable, EntityKind, ListRecord, StoreId};

use super::{CommandError, Context};

/// Search and sort flags of `list`.
#[derive(Debug, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    pub sort: Option<String>,
    pub desc: bool,
}

/// Print a table of `kind` for `store_id`.
///
/// # Errors
///
/// Returns `CommandError::Transport` if the list cannot be loaded.
pub async fn list(
    ctx: &Context,
    kind: EntityKind,
    store_id: StoreId,
    options: &ListOptions,
) -> Result<(), CommandError> {
    match kind {
        EntityKind::Billboard => print_table::<Billboard>(ctx, store_id, options).await,
        EntityKind::Category => print_table::<Category>(ctx, store_id, options).await,
        EntityKind::Color => print_table::<Color>(ctx, store_id, options).await,
        EntityKind::Size => print_table::<Size>(ctx, store_id, options).await,
        EntityKind::Product => print_table::<Product>(ctx, store_id, options).await,
        EntityKind::Order => print_table::<Order>(ctx, store_id, options).await,
    }
}

async fn print_table<R: ListRecord + DeserializeOwned>(
    ctx: &Context,
    store_id: StoreId,
    options: &ListOptions,
) -> Result<(), CommandError> {
    let client = TableClient::new(ctx.transport.clone(), ctx.ui.clone(), store_id);
    let table = client.load::<R>().await?;
    let dir = if options.desc { SortDir::Desc } else { SortDir::Asc };
    let rows = table.view(
        options.search.as_deref().unwrap_or_default(),
        options.sort.as_deref().map(|key| (key, dir)),
    );

    let header: Vec<&str> = table.columns.iter().map(|c| c.label).collect();
    #[allow(clippy::print_stdout)]
    {
        println!("{}", table.heading());
        println!("id\t{}", header.join("\t"));
        for row in rows {
            let cells: Vec<&str> = row.cells.iter().map(|c| c.text.as_str()).collect();
            println!("{}\t{}", row.id, cells.join("\t"));
        }
    }
    Ok(())
}

/// Create a `kind` from a JSON body and print the new id.
///
/// # Errors
///
/// Returns `CommandError` on a malformed body, failed validation or a
/// refused request.
pub async fn create(ctx: &Context, kind: EntityKind, store_id: StoreId, data: &str) -> Result<(), CommandError> {
    let record = match kind {
        EntityKind::Billboard => submit_new::<BillboardInput>(ctx, store_id, data).await?,
        EntityKind::Category => submit_new::<CategoryInput>(ctx, store_id, data).await?,
        EntityKind::Color => submit_new::<ColorInput>(ctx, store_id, data).await?,
        EntityKind::Size => submit_new::<SizeInput>(ctx, store_id, data).await?,
        EntityKind::Product => submit_new::<ProductInput>(ctx, store_id, data).await?,
        EntityKind::Order => return Err(CommandError::ReadOnly(kind)),
    };

    #[allow(clippy::print_stdout)]
    {
        println!("{}", record.get("id").and_then(Value::as_str).unwrap_or_default());
    }
    Ok(())
}

async fn submit_new<I: EntityInput>(ctx: &Context, store_id: StoreId, data: &str) -> Result<Value, CommandError> {
    let input: I = serde_json::from_str(data)?;
    let form = EntityForm::<_, I>::create(ctx.transport.clone(), ctx.ui.clone(), store_id);
    Ok(form.submit(&input).await?)
}

/// Update a `kind`, keeping the current value of every field `data` leaves out.
///
/// # Errors
///
/// Returns `CommandError` on a malformed body, failed validation or a
/// refused request.
pub async fn update(
    ctx: &Context,
    kind: EntityKind,
    store_id: StoreId,
    id: &str,
    data: &str,
) -> Result<(), CommandError> {
    match kind {
        EntityKind::Billboard => submit_edit::<Billboard>(ctx, store_id, id, data).await,
        EntityKind::Category => submit_edit::<Category>(ctx, store_id, id, data).await,
        EntityKind::Color => submit_edit::<Color>(ctx, store_id, id, data).await,
        EntityKind::Size => submit_edit::<Size>(ctx, store_id, id, data).await,
        EntityKind::Product => submit_edit::<Product>(ctx, store_id, id, data).await,
        EntityKind::Order => Err(CommandError::ReadOnly(kind)),
    }
}

async fn submit_edit<R>(ctx: &Context, store_id: StoreId, id: &str, data: &str) -> Result<(), CommandError>
where
    R: Editable + DeserializeOwned,
{
    let (form, current) =
        EntityForm::<_, R::Input>::open::<R>(ctx.transport.clone(), ctx.ui.clone(), store_id, id).await?;
    let input = merge(&current, data)?;
    form.submit(&input).await?;
    Ok(())
}

/// Overlay the top-level fields of the JSON object `patch` onto `current`.
fn merge<I: Serialize + DeserializeOwned>(current: &I, patch: &str) -> Result<I, CommandError> {
    let mut value = serde_json::to_value(current)?;
    let Value::Object(fields) = serde_json::from_str::<Value>(patch)? else {
        return Err(CommandError::NotAnObject);
    };
    let target = value.as_object_mut().ok_or(CommandError::NotAnObject)?;
    target.extend(fields);
    Ok(serde_json::from_value(value)?)
}

/// Delete one `kind`.
///
/// # Errors
///
/// Returns `CommandError` if the server refuses, e.g. while dependents exist.
pub async fn delete(ctx: &Context, kind: EntityKind, store_id: StoreId, id: &str) -> Result<(), CommandError> {
    match kind {
        EntityKind::Billboard => delete_one::<BillboardInput>(ctx, store_id, id).await,
        EntityKind::Category => delete_one::<CategoryInput>(ctx, store_id, id).await,
        EntityKind::Color => delete_one::<ColorInput>(ctx, store_id, id).await,
        EntityKind::Size => delete_one::<SizeInput>(ctx, store_id, id).await,
        EntityKind::Product => delete_one::<ProductInput>(ctx, store_id, id).await,
        EntityKind::Order => Err(CommandError::ReadOnly(kind)),
    }
}

async fn delete_one<I: EntityInput>(ctx: &Context, store_id: StoreId, id: &str) -> Result<(), CommandError> {
    EntityForm::<_, I>::edit(ctx.transport.clone(), ctx.ui.clone(), store_id, id)
        .delete()
        .await?;
    Ok(())
}
