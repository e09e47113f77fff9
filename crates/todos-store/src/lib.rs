//! Todos store - ordered key-value buckets
//!
//! A thin layer over redb (pure Rust, no FFI) that groups keys into named
//! buckets and exposes the ordered reads the todos service is built on:
//! prefix scans and half-open range scans.
//!
//! # Usage
//!
//! ```no_run
//! use todos_store::Store;
//!
//! let store = Store::open("./todos.redb")?;   // file-based
//! let bucket = store.bucket("todos")?;
//!
//! bucket.put("1/2026-10-12T08:00:00.000000000Z", b"{}")?;
//! bucket.prefix_items("1/")?;                 // everything for day 1
//! bucket.range_items("6", "8")?;              // days 6 and 7
//! # Ok::<(), todos_store::StoreError>(())
//! ```

mod bucket;
mod error;
mod store;

pub use bucket::{Bucket, Item};
pub use error::{StoreError, StoreResult};
pub use store::{MEMORY_PATH, Store};
