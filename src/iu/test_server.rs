// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! A loopback image service the tests upload to.

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard};

use futures::*;

use hyper;
use hyper::header;
use hyper::service::service_fn;
use hyper::{Body, Method, Request, Response, Server, StatusCode};

use serde_json;

use tokio::runtime::Runtime;

use iu;
use iu::config::Config;
use iu::model::ImageInfo;

type ResponseFuture = Box<dyn Future<Item = Response<Body>, Error = hyper::Error> + Send>;

/// Given a future, block on the runtime until it completes.
pub fn run<F, T>(rt: &mut Runtime, f: F) -> iu::Result<T>
where
    F: 'static + Send + Future<Item = T, Error = iu::Error>,
    T: 'static + Send,
{
    rt.block_on(f)
}

/// An upload as the test service received it.
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub file_name: String,
    pub content_type: String,
    pub content_length: Option<u64>,
    pub body_len: usize,
}

#[derive(Debug, Default)]
pub struct ServerState {
    pub images: Vec<ImageInfo>,
    pub list_requests: usize,
    pub uploads: Vec<ReceivedUpload>,
    failing_uploads: HashSet<String>,
    failing_listing: bool,
}

pub struct TestServer {
    addr: SocketAddr,
    state: Arc<Mutex<ServerState>>,
}

impl TestServer {
    /// Binds an ephemeral loopback port and serves from `rt`.
    pub fn start(rt: &mut Runtime) -> Self {
        let state = Arc::new(Mutex::new(ServerState::default()));
        let service_state = Arc::clone(&state);

        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(move || {
            let state = Arc::clone(&service_state);
            service_fn(move |req: Request<Body>| handle(Arc::clone(&state), req))
        });
        let addr = server.local_addr();
        rt.spawn(server.map_err(|e| eprintln!("test server error: {}", e)));

        Self { addr, state }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> Config {
        Config::parse(self.url()).unwrap()
    }

    pub fn state(&self) -> MutexGuard<ServerState> {
        self.state.lock().unwrap()
    }

    pub fn seed(&self, image: ImageInfo) {
        self.state().images.push(image);
    }

    /// Makes uploads of `file_name` answer with a 500 and a JSON message.
    pub fn fail_upload_of(&self, file_name: &str) {
        self.state().failing_uploads.insert(file_name.to_string());
    }

    pub fn fail_listing(&self) {
        self.state().failing_listing = true;
    }
}

fn json(status: StatusCode, payload: &serde_json::Value) -> Response<Body> {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

fn handle(state: Arc<Mutex<ServerState>>, req: Request<Body>) -> ResponseFuture {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/files") => {
            let mut state = state.lock().unwrap();
            state.list_requests += 1;
            let response = if state.failing_listing {
                json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    &json!({ "message": "Could not list the files!" }),
                )
            } else {
                json(StatusCode::OK, &json!(state.images))
            };
            Box::new(future::ok(response))
        }
        (&Method::POST, "/upload") => {
            let content_type = req
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let content_length = req
                .headers()
                .get(header::CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok());
            let host = req
                .headers()
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("localhost")
                .to_string();

            Box::new(req.into_body().concat2().map(move |body| {
                let text = String::from_utf8_lossy(&body).to_string();
                let file_name = form_file_name(&text).unwrap_or_default();
                let mut state = state.lock().unwrap();

                if state.failing_uploads.contains(&file_name) {
                    return json(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        &json!({ "message": format!("Could not upload the file: {}", file_name) }),
                    );
                }

                state.uploads.push(ReceivedUpload {
                    file_name: file_name.clone(),
                    content_type,
                    content_length,
                    body_len: body.len(),
                });
                state.images.push(ImageInfo::new(
                    file_name.as_str(),
                    format!("http://{}/files/{}", host, file_name),
                ));
                json(
                    StatusCode::OK,
                    &json!({ "message": format!("Uploaded the file successfully: {}", file_name) }),
                )
            }))
        }
        _ => Box::new(future::ok(
            Response::builder()
                .status(StatusCode::NOT_FOUND)
                .body(Body::empty())
                .unwrap(),
        )),
    }
}

fn form_file_name(body: &str) -> Option<String> {
    let marker = "filename=\"";
    let start = body.find(marker)? + marker.len();
    let len = body[start..].find('"')?;
    Some(body[start..start + len].to_string())
}
