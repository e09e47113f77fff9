//! Todos server - day-of-week task lists over HTTP
//!
//! Todos are posted to `/day/:day` and stored in an ordered redb bucket
//! under keys that sort by day of week, then by creation time. Listing a
//! day, the weekdays, or the weekend is one prefix or range scan.
//!
//! ```no_run
//! use todos_server::{ServerConfig, TodoServer};
//!
//! # async fn run() -> todos_server::ServerResult<()> {
//! let server = TodoServer::start(ServerConfig::default()).await?;
//! println!("listening on {}", server.url());
//! server.close()?;
//! # Ok(())
//! # }
//! ```

pub use todos_model as model;

pub mod controller;
pub mod error;
pub mod server;
pub mod service;

pub use controller::Controller;
pub use error::{ApiError, ApiResult, ServerError, ServerResult};
pub use model::{Day, NewTodo, Span, TaskList, Todo, UnknownDay};
pub use server::{ServerConfig, TODOS_BUCKET, TodoServer};
pub use service::TodosService;
