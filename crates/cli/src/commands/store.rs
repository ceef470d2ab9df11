//! Store commands.
//!
//! # Usage
//!
//! ```bash
//! sb-cli store create -n "My Store"
//! sb-cli store rename -s <store-id> -n "New Name"
//! sb-cli store delete -s <store-id>
//! ```

use storeboard_client::{StoreModal, StoreSettings};
use storeboard_core::StoreId;
use storeboard_core::forms::StoreInput;

use super::{CommandError, Context};

/// Create a store and print its id.
///
/// # Errors
///
/// Returns `CommandError` if the name is blank or the server refuses.
pub async fn create(ctx: &Context, name: String) -> Result<(), CommandError> {
    let modal = StoreModal::new(ctx.transport.clone(), ctx.ui.clone());
    let store = modal.create(&StoreInput { name }).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{}", store.id);
    }
    Ok(())
}

/// Rename a store.
///
/// # Errors
///
/// Returns `CommandError` if the name is blank or the server refuses.
pub async fn rename(ctx: &Context, store_id: StoreId, name: String) -> Result<(), CommandError> {
    StoreSettings::new(ctx.transport.clone(), ctx.ui.clone(), store_id)
        .update(&StoreInput { name })
        .await?;
    Ok(())
}

/// Delete a store.
///
/// # Errors
///
/// Returns `CommandError` if the store still has entities or is not owned.
pub async fn delete(ctx: &Context, store_id: StoreId) -> Result<(), CommandError> {
    StoreSettings::new(ctx.transport.clone(), ctx.ui.clone(), store_id)
        .delete()
        .await?;
    Ok(())
}
