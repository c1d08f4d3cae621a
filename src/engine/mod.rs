//! Collection view engine
//!
//! A pure, synchronous pipeline over an in-memory record set:
//!
//! ```text
//! records ──filter──> matching (input order) ──sort──> ordered (stable) ──paginate──> ResultView
//! ```
//!
//! Nothing here performs I/O, keeps state between calls or returns an error.
//! Calling [`view`] twice with the same records and query yields equal views.
//!
//! # Example
//!
//! ```rust
//! use deskview::core::{FieldKind, QueryDescriptor, Record, SortKey};
//! use deskview::engine;
//!
//! let records = vec![
//!     Record::new().with("name", "Ann").with("price", 10.0),
//!     Record::new().with("name", "Bo").with("price", 5.0),
//!     Record::new().with("name", "Cy").with("price", 5.0),
//! ];
//!
//! let query = QueryDescriptor::new(SortKey::asc("price", FieldKind::Numeric)).with_page_size(2);
//! let view = engine::view(&records, &query);
//!
//! assert_eq!(view.total_matched, 3);
//! assert_eq!(view.total_pages, 2);
//! assert_eq!(view.items[0].text("name").as_deref(), Some("Bo"));
//! ```

pub mod facets;
pub mod filter;
pub mod paginate;
pub mod sort;

pub use facets::{Facet, facets};
pub use filter::filter;
pub use paginate::{ResultView, paginate};
pub use sort::sort;

use crate::core::query::QueryDescriptor;
use crate::core::record::Record;

/// Filter, sort and paginate `records` according to `query`
pub fn view<'a>(records: &'a [Record], query: &QueryDescriptor) -> ResultView<'a> {
    let matching = filter(records, query);
    let ordered = sort(&matching, query);
    let view = paginate(&ordered, query.page, query.page_size);

    tracing::debug!(
        total = records.len(),
        matched = view.total_matched,
        page = view.page,
        total_pages = view.total_pages,
        sort = %query.sort.field,
        "collection view computed"
    );

    view
}
