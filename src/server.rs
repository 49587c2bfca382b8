//! HTTP/1 server: accept loop, routing and response encoding.

use std::convert::Infallible;
use std::fmt::Display;
use std::future::Future;
use std::io;
use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response};
use hyper_util::rt::{TokioIo, TokioTimer};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;
use crate::delay::SimulatedCost;
use crate::error::AppError;
use crate::handler::handle_batch;
use crate::runner::ExecutionMode;

pub const SEQUENTIAL_PATH: &str = "/process-single";
pub const CONCURRENT_PATH: &str = "/process-concurrent";

/// Entry point for every request. Errors are turned into plain-text
/// responses here, so the connection itself never fails because of one.
pub async fn route<B>(req: Request<B>, cost: SimulatedCost) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    match dispatch(req, cost).await {
        Ok(resp) => Ok(resp),
        Err(err) => {
            warn!(%method, %path, status = err.status().as_u16(), "{}", err);
            Ok(err.into_response())
        }
    }
}

async fn dispatch<B>(req: Request<B>, cost: SimulatedCost) -> Result<Response<Full<Bytes>>, AppError>
where
    B: Body,
    B::Error: Display,
{
    let mode = match req.uri().path() {
        SEQUENTIAL_PATH => ExecutionMode::Sequential,
        CONCURRENT_PATH => ExecutionMode::Concurrent,
        other => return Err(AppError::NotFound(other.to_string())),
    };

    if req.method() != Method::POST {
        return Err(AppError::MethodNotAllowed(req.method().clone()));
    }

    let body = req
        .into_body()
        .collect()
        .await
        .map_err(|e| AppError::BodyRead(e.to_string()))?
        .to_bytes();

    let response = handle_batch(&body, mode, cost).await?;
    let json = serde_json::to_vec(&response).map_err(AppError::Encode)?;

    let mut resp = Response::new(Full::new(Bytes::from(json)));
    resp.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(resp)
}

pub struct Server {
    listener: TcpListener,
    cost: SimulatedCost,
}

impl Server {
    pub async fn bind(config: &ServerConfig) -> io::Result<Self> {
        let listener = TcpListener::bind(config.addr).await?;
        Ok(Server {
            listener,
            cost: config.cost(),
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serves until the process is terminated.
    pub async fn serve(self) -> io::Result<()> {
        self.serve_until(std::future::pending()).await
    }

    /// Accepts connections until `shutdown` resolves. Each connection gets its
    /// own task; requests already in flight are left to finish on their own.
    pub async fn serve_until<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()>,
    {
        let addr = self.local_addr()?;
        info!(%addr, delay_ms = self.cost.delay().as_millis() as u64, "listening");

        let cost = self.cost;
        tokio::pin!(shutdown);

        loop {
            let (tcp, peer) = tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown signal received");
                    return Ok(());
                }
                accepted = self.listener.accept() => match accepted {
                    Ok(conn) => conn,
                    Err(err) => {
                        error!("failed to accept connection: {}", err);
                        continue;
                    }
                },
            };
            debug!(%peer, "accepted connection");

            // Adapter so hyper can drive a tokio TcpStream
            let io = TokioIo::new(tcp);

            tokio::task::spawn(async move {
                if let Err(err) = http1::Builder::new()
                    .timer(TokioTimer::new())
                    .serve_connection(io, service_fn(move |req| route(req, cost)))
                    .await
                {
                    warn!(%peer, "error serving connection: {:?}", err);
                }
            });
        }
    }
}
