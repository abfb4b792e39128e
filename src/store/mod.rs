//! Client-side state.
//!
//! | Item | Kind |
//! |------|------|
//! | [`AUTOCOMPLETE_PRODUCTS`] | observable, empty until set from an API response |
//! | [`MANUFACTURERS`] | static key → display name map |
//! | [`NEW_PRODUCTS`] | static ordered labels |
//!
//! The autocomplete list is replaced wholesale on every response; there is
//! no merging or eviction.

mod catalog;
mod observable;
mod search;

pub use catalog::{MANUFACTURERS, NEW_PRODUCTS, manufacturer_name};
pub use observable::{Observable, Subscription};
pub use search::search;

use crate::api::{ApiResponse, ProductAutocomplete};
use std::sync::LazyLock;

/// Current autocomplete suggestions.
pub static AUTOCOMPLETE_PRODUCTS: LazyLock<Observable<Vec<ProductAutocomplete>>> =
    LazyLock::new(Observable::default);

/// Publish an autocomplete response into `store`.
///
/// A failed response leaves the previous suggestions in place and returns
/// `false`.
pub fn publish_autocomplete(
    store: &Observable<Vec<ProductAutocomplete>>,
    response: ApiResponse<Vec<ProductAutocomplete>>,
) -> bool {
    match response {
        ApiResponse::Success(entries) => {
            store.set(entries);
            true
        }
        ApiResponse::Failure => false,
    }
}
