//! Request handlers for todo items.
//!
//! Todos live in a single bucket keyed by day number and creation time (see
//! [`crate::model`]). Posting stores the normalized JSON todo; listing is one
//! prefix or range scan followed by a decode of each stored record.

use crate::error::{ApiError, ApiResult};
use crate::model::{Day, NewTodo, Scan, Span, TaskList, Todo};
use chrono::Utc;
use todos_store::{Bucket, Item};

#[derive(Clone)]
pub struct Controller {
    todos: Bucket,
}

impl Controller {
    pub fn new(todos: Bucket) -> Self {
        Self { todos }
    }

    /// Store a todo for `day` and return the confirmation line.
    ///
    /// The route decides the day; a `Day` in the payload is ignored.
    /// A payload without `Created` is stamped with the current time.
    pub async fn post(&self, day: Day, body: &[u8]) -> ApiResult<String> {
        let new = NewTodo::decode(body).map_err(ApiError::Payload)?;
        let created = new.created.unwrap_or_else(Utc::now);
        let todo = new.into_todo(day, created);

        let key = Todo::key(day, created);
        let value = todo.encode().map_err(ApiError::Encode)?;

        let bucket = self.todos.clone();
        let put_key = key.clone();
        tokio::task::spawn_blocking(move || bucket.put(&put_key, &value)).await??;

        tracing::debug!(key = %key, task = %todo.task, "todo stored");

        Ok(format!("put todo for {}: {}\n", key, todo.task))
    }

    /// Tasks for a single day.
    pub async fn day_tasks(&self, day: Day) -> ApiResult<TaskList> {
        self.tasks(Span::Day(day)).await
    }

    /// Combined tasks for Monday through Friday.
    pub async fn weekday_tasks(&self) -> ApiResult<TaskList> {
        self.tasks(Span::Weekdays).await
    }

    /// Combined tasks for Saturday and Sunday.
    pub async fn weekend_tasks(&self) -> ApiResult<TaskList> {
        self.tasks(Span::Weekend).await
    }

    async fn tasks(&self, span: Span) -> ApiResult<TaskList> {
        let bucket = self.todos.clone();
        let items = tokio::task::spawn_blocking(move || match span.scan() {
            Scan::Prefix(prefix) => bucket.prefix_items(&prefix),
            Scan::Range { min, max } => bucket.range_items(&min, &max),
        })
        .await??;

        collect(span, items)
    }
}

fn collect(span: Span, items: Vec<Item>) -> ApiResult<TaskList> {
    let mut list = TaskList::new(span.when());
    list.tasks.reserve(items.len());

    for item in items {
        let todo = Todo::decode(&item.value).map_err(|source| ApiError::Record {
            key: item.key,
            source,
        })?;
        list.tasks.push(todo.task);
    }

    Ok(list)
}
