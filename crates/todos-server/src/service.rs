//! Hyper Service implementation for the todos server.
//!
//! Routes:
//!
//! | method | path        | reply                         |
//! |--------|-------------|-------------------------------|
//! | POST   | `/day/:day` | `text/plain` confirmation     |
//! | GET    | `/day/:day` | `application/json` task list  |
//! | GET    | `/weekdays` | `application/json` task list  |
//! | GET    | `/weekend`  | `application/json` task list  |

use crate::controller::Controller;
use crate::error::{ApiError, ApiResult};
use crate::model::{Day, TaskList};
use bytes::Bytes;
use http::header::{ALLOW, CONTENT_TYPE, HeaderValue};
use http_body_util::{BodyExt, Full, combinators::BoxBody};
use hyper::body::Incoming;
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;

/// HTTP response body type used by the todos server.
pub type TodosBody = BoxBody<Bytes, Infallible>;

/// Create a response body from bytes.
pub fn full_body(data: impl Into<Bytes>) -> TodosBody {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

fn reply(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<TodosBody> {
    let mut response = Response::new(full_body(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn text(status: StatusCode, body: impl Into<Bytes>) -> Response<TodosBody> {
    reply(status, "text/plain; charset=utf-8", body)
}

fn json(list: &TaskList) -> ApiResult<Response<TodosBody>> {
    let mut body = serde_json::to_vec(list).map_err(ApiError::Encode)?;
    body.push(b'\n');
    Ok(reply(StatusCode::OK, "application/json", body))
}

fn method_not_allowed(allow: &'static str) -> Response<TodosBody> {
    let mut response = text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed\n");
    response
        .headers_mut()
        .insert(ALLOW, HeaderValue::from_static(allow));
    response
}

/// A request target the router recognizes.
#[derive(Debug, PartialEq, Eq)]
enum Route<'a> {
    Day(&'a str),
    Weekdays,
    Weekend,
}

impl<'a> Route<'a> {
    fn parse(path: &'a str) -> Option<Self> {
        let path = path.strip_suffix('/').filter(|p| !p.is_empty()).unwrap_or(path);
        match path {
            "/weekdays" => Some(Route::Weekdays),
            "/weekend" => Some(Route::Weekend),
            _ => {
                let day = path.strip_prefix("/day/")?;
                (!day.is_empty() && !day.contains('/')).then_some(Route::Day(day))
            }
        }
    }
}

/// Hyper service dispatching todo requests to the [`Controller`].
#[derive(Clone)]
pub struct TodosService {
    controller: Controller,
}

impl TodosService {
    /// Create a new service instance.
    pub fn new(controller: Controller) -> Self {
        Self { controller }
    }

    async fn dispatch(&self, req: Request<Incoming>) -> ApiResult<Response<TodosBody>> {
        let (parts, body) = req.into_parts();

        let Some(route) = Route::parse(parts.uri.path()) else {
            return Ok(text(StatusCode::NOT_FOUND, "Not Found\n"));
        };

        match (route, &parts.method) {
            (Route::Day(day), &Method::POST) => {
                let day: Day = day.parse()?;
                let body = body.collect().await?.to_bytes();
                let confirmation = self.controller.post(day, &body).await?;
                Ok(text(StatusCode::OK, confirmation))
            }
            (Route::Day(day), &Method::GET) => {
                let day: Day = day.parse()?;
                json(&self.controller.day_tasks(day).await?)
            }
            (Route::Weekdays, &Method::GET) => json(&self.controller.weekday_tasks().await?),
            (Route::Weekend, &Method::GET) => json(&self.controller.weekend_tasks().await?),
            (Route::Day(_), _) => Ok(method_not_allowed("GET, POST")),
            (_, _) => Ok(method_not_allowed("GET")),
        }
    }
}

impl Service<Request<Incoming>> for TodosService {
    type Response = Response<TodosBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let service = self.clone();

        Box::pin(async move {
            let method = req.method().clone();
            let path = req.uri().path().to_string();

            match service.dispatch(req).await {
                Ok(response) => {
                    tracing::trace!(%method, %path, status = %response.status(), "request");
                    Ok(response)
                }
                Err(e) => {
                    let status = e.status();
                    if status.is_server_error() {
                        tracing::error!(%method, %path, error = %e, "request failed");
                    } else {
                        tracing::debug!(%method, %path, error = %e, "request rejected");
                    }
                    Ok(text(status, format!("{}\n", e)))
                }
            }
        })
    }
}
