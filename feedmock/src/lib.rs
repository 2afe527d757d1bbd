//! Tiny asynchronous HTTP mock used by the feed tests.
//!
//! A [`Server`] binds to a random local port. Tests anticipate a path and
//! decide when, and with what, the request gets answered, which makes
//! "still loading" states scriptable.

pub use hyper::StatusCode;
pub use hyper::body::Bytes;

use http_body_util::Full;
use hyper::service::Service;
use hyper::{Request, Response, server::conn::http1};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Default)]
struct State {
    /// Responses armed via [`Server::anticipate`], keyed by request path.
    anticipated: HashMap<String, tokio::sync::oneshot::Receiver<Response<Full<Bytes>>>>,

    unexpected: Vec<String>,
}

pub struct Server {
    port: u16,
    state: Arc<Mutex<State>>,
}

impl Server {
    /// Bind to a random port and start serving.
    pub async fn bind() -> Server {
        let state = Arc::new(Mutex::new(State::default()));

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = TcpListener::bind(addr).await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let state_clone = state.clone();
        tokio::spawn(async move {
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                let io = TokioIo::new(stream);

                let state = state_clone.clone();
                tokio::task::spawn(async move {
                    http1::Builder::new()
                        .serve_connection(io, MockService { state })
                        .await
                        .unwrap();
                });
            }
        });

        Server { port, state }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Arm a response for `path`. A request for it will hang until the
    /// returned [`Anticipated`] is told how to answer.
    pub async fn anticipate(&self, path: impl Into<String>) -> Anticipated {
        let path = path.into();
        log::info!("Anticipating '{path}'.");
        let (tx, rx) = tokio::sync::oneshot::channel();
        self.state.lock().unwrap().anticipated.insert(path, rx);
        Anticipated { tx }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        if !self.state.lock().unwrap().unexpected.is_empty() {
            panic!("there were unexpected requests");
        }
    }
}

pub struct Anticipated {
    tx: tokio::sync::oneshot::Sender<Response<Full<Bytes>>>,
}

impl Anticipated {
    /// Answer with `200 OK` and the given body.
    pub async fn respond(self, payload: impl Into<Bytes>) {
        log::info!("Responding.");
        let _ = self.tx.send(Response::new(Full::new(payload.into())));
    }

    /// Answer with an empty body and the given status.
    pub async fn respond_with_status(self, status: StatusCode) {
        log::info!("Responding with {status}.");
        let response = Response::builder()
            .status(status)
            .body(Full::default())
            .unwrap();
        let _ = self.tx.send(response);
    }
}

struct MockService {
    state: Arc<Mutex<State>>,
}

impl Service<Request<hyper::body::Incoming>> for MockService {
    type Response = Response<Full<Bytes>>;
    type Error = hyper::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: Request<hyper::body::Incoming>) -> Self::Future {
        log::info!("Incoming request '{}'.", request.uri());
        let state = self.state.clone();
        Box::pin(async move {
            let anticipated = state
                .lock()
                .unwrap()
                .anticipated
                .remove(request.uri().path());

            if let Some(rx) = anticipated {
                log::debug!("Answering '{}'.", request.uri());
                Ok(rx.await.unwrap())
            } else {
                log::warn!("Unexpected '{}'.", request.uri());
                state
                    .lock()
                    .unwrap()
                    .unexpected
                    .push(request.uri().to_string());
                Ok(Response::builder()
                    .status(StatusCode::IM_A_TEAPOT)
                    .body(Full::new(Bytes::from_static(b"unexpected")))
                    .unwrap())
            }
        })
    }
}
