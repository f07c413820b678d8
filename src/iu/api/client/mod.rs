// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Functions to interact with the image service.

pub mod progress;

use std::io;
use std::sync::Arc;

use bytes::Bytes;

use futures::*;

use hyper;
use hyper::client::{Client, HttpConnector};
use hyper::header::{self, HeaderName};
use hyper::{Body, Method, Request};
use hyper_tls::HttpsConnector;

use serde;
use serde_json;

use url::Url;

use iu;
use iu::api::request::FileForm;
use iu::api::response::UploadResponse;
use iu::api::Transport;
use iu::config::Config;
use iu::model::{ImageInfo, SelectedFile};
use iu::util::futures::into_future_trait;

pub use self::progress::{ProgressCallback, ProgressUpdate};

// Threads used by the connector for blocking DNS lookups:
const DNS_WORKER_THREADS: usize = 4;

const APPLICATION_JSON: &str = "application/json";

struct ImageStoreImpl {
    config: Config,
    http_client: Client<HttpsConnector<HttpConnector>>,
}

/// The image service client.
#[derive(Clone)]
pub struct ImageStore {
    inner: Arc<ImageStoreImpl>,
}

impl ImageStore {
    /// Create a new image service client.
    pub fn new(config: Config) -> iu::Result<Self> {
        let connector = HttpsConnector::new(DNS_WORKER_THREADS)
            .map_err(|e| iu::Error::with_chain(e, "iu:new:https connector"))?;
        let http_client = Client::builder().build(connector);
        Ok(Self {
            inner: Arc::new(ImageStoreImpl {
                config,
                http_client,
            }),
        })
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    // Appends `route` to the path of the configured service location:
    fn url_for(&self, route: &str) -> Url {
        let mut url = self.inner.config.api_url().clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        url.set_path(&path);
        url
    }

    fn request<Q>(&self, route: &str, method: Method) -> iu::Future<Q>
    where
        Q: 'static + Send + serde::de::DeserializeOwned,
    {
        let context = format!("iu:request<{}:{}>:deserialize", method, route);
        let f = self
            .request_with_body(
                route,
                method,
                Body::empty(),
                vec![(header::ACCEPT, APPLICATION_JSON.to_string())],
            )
            .and_then(move |body: hyper::Chunk| {
                serde_json::from_slice::<Q>(&body).map_err(|e| {
                    iu::Error::with_chain(
                        e,
                        format!(
                            "{context} :: payload = {payload}",
                            context = context,
                            payload = String::from_utf8_lossy(&body)
                        ),
                    )
                })
            });
        into_future_trait(f)
    }

    fn request_with_body(
        &self,
        route: &str,
        method: Method,
        body: Body,
        headers: Vec<(HeaderName, String)>,
    ) -> iu::Future<hyper::Chunk> {
        let url = self.url_for(route);
        let method_string = method.to_string();
        let url_string = url.to_string();

        let mut builder = Request::builder();
        builder.method(method).uri(url.as_str());
        for (name, value) in headers {
            builder.header(name, value.as_str());
        }
        let req = match builder.body(body) {
            Ok(req) => req,
            Err(e) => {
                return into_future_trait(future::err(iu::Error::with_chain(
                    e,
                    format!("iu:request<{}:{}>:build", method_string, url_string),
                )))
            }
        };

        debug!("iu:request<{}:{}>:execute", method_string, url_string);

        let execute_context = format!("iu:request<{}:{}>:execute", method_string, url_string);
        let f = self
            .inner
            .http_client
            .request(req)
            .map_err(move |e| iu::Error::with_chain(e, execute_context))
            .and_then(move |resp| {
                // Any 4XX or 5XX status terminates the future with an error
                // carrying the body emitted by the service:
                let status = resp.status();
                let response_context =
                    format!("iu:request<{}:{}>:response", method_string, url_string);
                resp.into_body()
                    .concat2()
                    .map_err(move |e| iu::Error::with_chain(e, response_context))
                    .and_then(move |body: hyper::Chunk| {
                        debug!(
                            "iu:request<{}:{}>:status = {}",
                            method_string, url_string, status
                        );
                        if status.is_client_error() || status.is_server_error() {
                            return Err(iu::ErrorKind::ApiError(
                                status,
                                String::from_utf8_lossy(&body).to_string(),
                            )
                            .into());
                        }
                        Ok(body)
                    })
            });

        into_future_trait(f)
    }

    /// Get a listing of the images stored by the service.
    pub fn get_files(&self) -> iu::Future<Vec<ImageInfo>> {
        let route = self.inner.config.list_route().to_string();
        self.request(&route, Method::GET)
    }

    /// Upload a single file as `multipart/form-data`.
    ///
    /// The body is streamed in chunks of the configured size, and
    /// `progress_callback` is invoked with the cumulative byte count every
    /// time a chunk is handed to the transport.
    pub fn upload<C>(&self, file: SelectedFile, progress_callback: C) -> iu::Future<UploadResponse>
    where
        C: 'static + ProgressCallback,
    {
        let config = &self.inner.config;
        let form = FileForm::new(config.form_field(), &file);
        let size = form.len();
        let headers = vec![
            (header::CONTENT_TYPE, form.content_type()),
            (header::CONTENT_LENGTH, size.to_string()),
            (header::ACCEPT, APPLICATION_JSON.to_string()),
        ];

        let file_name = file.name().to_string();
        let mut bytes_sent = 0u64;
        let chunks = stream::iter_ok::<_, io::Error>(form.into_chunks(config.chunk_size())).map(
            move |chunk: Bytes| {
                bytes_sent += chunk.len() as u64;
                progress_callback.on_update(&ProgressUpdate::new(
                    file_name.as_str(),
                    bytes_sent,
                    size,
                ));
                chunk
            },
        );

        let route = config.upload_route().to_string();
        let f = self
            .request_with_body(&route, Method::POST, Body::wrap_stream(chunks), headers)
            .map(|body| UploadResponse::from_body(&body));
        into_future_trait(f)
    }
}

impl Transport for ImageStore {
    fn get_files(&self) -> iu::Future<Vec<ImageInfo>> {
        ImageStore::get_files(self)
    }

    fn upload(
        &self,
        file: SelectedFile,
        progress: Arc<dyn ProgressCallback>,
    ) -> iu::Future<UploadResponse> {
        ImageStore::upload(self, file, progress)
    }
}
