use std::sync::Arc;

use crate::services::{Accounts, Browser, CatalogProvider, Encyclopedia, Library, Reviews};
use crate::store::AppStore;

/// Shared application state.
///
/// Every handler reaches local storage through the one `AppStore`; the services
/// below hold clones of the same `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<AppStore>,
    pub browser: Browser,
    pub accounts: Accounts,
    pub library: Library,
    pub reviews: Reviews,
    pub encyclopedia: Arc<dyn Encyclopedia>,
}

impl AppState {
    pub fn new(
        store: Arc<AppStore>,
        catalog: Arc<dyn CatalogProvider>,
        encyclopedia: Arc<dyn Encyclopedia>,
        image_base_url: String,
    ) -> Self {
        let accounts = Accounts::new(store.clone());
        Self {
            browser: Browser::new(catalog, store.clone(), image_base_url),
            library: Library::new(store.clone(), accounts.clone()),
            reviews: Reviews::new(store.clone(), accounts.clone()),
            accounts,
            encyclopedia,
            store,
        }
    }
}
