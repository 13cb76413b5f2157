pub mod accounts;
pub mod browse;
pub mod catalog;
pub mod encyclopedia;
pub mod library;
pub mod reviews;

pub use accounts::{Accounts, RegisterRequest};
pub use browse::Browser;
pub use catalog::{CatalogProvider, DiscoverSort, TmdbProvider};
pub use encyclopedia::{Encyclopedia, WikiClient};
pub use library::Library;
pub use reviews::Reviews;
