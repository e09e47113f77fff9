//! HTTP server wiring: store, bucket, listener, and accept loop.

use crate::controller::Controller;
use crate::error::{ServerError, ServerResult};
use crate::service::TodosService;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpBuilder;
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::path::PathBuf;
use todos_store::Store;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{oneshot, watch};
use tokio::task::{JoinHandle, JoinSet};

/// Bucket holding every todo.
pub const TODOS_BUCKET: &str = "todos";

/// Where to listen and what to open.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    /// `0` picks a free port
    pub port: u16,
    /// Database file, or `:memory:`
    pub db_path: PathBuf,
    pub bucket: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            db_path: PathBuf::from(todos_store::MEMORY_PATH),
            bucket: TODOS_BUCKET.to_string(),
        }
    }
}

/// A running todos server.
pub struct TodoServer {
    addr: SocketAddr,
    store: Store,
    shutdown_tx: Mutex<Option<oneshot::Sender<()>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl TodoServer {
    /// Open the store, bind the listener, and start serving in the background.
    pub async fn start(config: ServerConfig) -> ServerResult<Self> {
        let store = Store::open(&config.db_path)?;
        let todos = store.bucket(&config.bucket)?;
        let service = TodosService::new(Controller::new(todos));

        let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(accept_loop(listener, addr, service, shutdown_rx));

        tracing::info!(
            %addr,
            db = %config.db_path.display(),
            bucket = %config.bucket,
            "todos server started"
        );

        Ok(Self {
            addr,
            store,
            shutdown_tx: Mutex::new(Some(shutdown_tx)),
            task: Mutex::new(Some(task)),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL, e.g. `http://127.0.0.1:8080`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Stop accepting connections.
    pub fn close(&self) -> ServerResult<()> {
        let tx = self
            .shutdown_tx
            .lock()
            .take()
            .ok_or(ServerError::AlreadyStopped)?;
        let _ = tx.send(());
        tracing::info!(addr = %self.addr, "todos server shutdown requested");
        Ok(())
    }

    /// Wait for the accept loop and every open connection to finish after
    /// [`close`](Self::close).
    pub async fn closed(&self) {
        let task = self.task.lock().take();
        if let Some(task) = task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "accept loop ended abnormally");
            }
        }
    }
}

impl Drop for TodoServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.get_mut().take() {
            let _ = tx.send(());
        }
    }
}

async fn accept_loop(
    listener: TcpListener,
    addr: SocketAddr,
    service: TodosService,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    let (drain_tx, drain_rx) = watch::channel(false);
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            _ = &mut shutdown_rx => {
                tracing::debug!("shutdown signal received");
                break;
            }
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            result = listener.accept() => {
                match result {
                    Ok((stream, peer_addr)) => {
                        let service = service.clone();
                        let drain_rx = drain_rx.clone();
                        connections.spawn(async move {
                            if let Err(e) = serve_connection(stream, service, drain_rx).await {
                                tracing::warn!(peer = %peer_addr, error = %e, "connection error");
                            }
                        });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "accept error");
                    }
                }
            }
        }
    }

    // Let in-flight requests finish; idle keep-alive connections close at once.
    let _ = drain_tx.send(true);
    let open = connections.len();
    while connections.join_next().await.is_some() {}
    tracing::info!(%addr, drained = open, "todos server stopped");
}

/// Serve a single connection (HTTP/1.1, or HTTP/2 via prior knowledge).
async fn serve_connection(
    stream: TcpStream,
    service: TodosService,
    mut drain_rx: watch::Receiver<bool>,
) -> ServerResult<()> {
    let builder = HttpBuilder::new(TokioExecutor::new());
    let conn = builder.serve_connection(TokioIo::new(stream), service);
    tokio::pin!(conn);

    tokio::select! {
        result = conn.as_mut() => {
            return result.map_err(|e| ServerError::Io(std::io::Error::other(e)));
        }
        _ = drain_rx.changed() => {}
    }

    conn.as_mut().graceful_shutdown();
    conn.await.map_err(|e| ServerError::Io(std::io::Error::other(e)))
}
