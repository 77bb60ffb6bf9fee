//! Command implementations.

pub mod cart;
pub mod catalog;

use std::path::Path;

use example_store_storefront::app::{Loadable, StateContainer};
use example_store_storefront::catalog::{CatalogError, HttpCatalogClient};
use example_store_storefront::storage::{FileStorage, StorageError};
use thiserror::Error;

/// The container every command drives.
pub type Store = StateContainer<HttpCatalogClient, FileStorage>;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("cart storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("{0}")]
    Failed(String),
}

/// Build the container from the API root and data directory.
///
/// # Errors
///
/// Returns an error if the API URL is invalid or the data directory cannot be
/// created.
pub fn open(api_url: &str, data_dir: &Path) -> Result<Store, CommandError> {
    let client = HttpCatalogClient::new(api_url)?;
    let storage = FileStorage::open(data_dir)?;
    tracing::debug!(api_url, data_dir = %data_dir.display(), "Opened store");
    Ok(StateContainer::new(client, storage))
}

/// Turn a settled load into its value.
fn settled<T>(loadable: Loadable<T>) -> Result<T, CommandError> {
    match loadable {
        Loadable::Loaded(value) => Ok(value),
        Loadable::Failed(error) => Err(CommandError::Failed(error.to_string())),
        Loadable::Idle | Loadable::Loading => {
            Err(CommandError::Failed("request did not complete".to_string()))
        }
    }
}
