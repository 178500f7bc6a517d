//! Client-side view of a fetched collection: filtering and paging.

pub mod filter;
pub mod pager;

pub use filter::FilterState;
pub use pager::{Pager, Total, PAGE_SIZES};
