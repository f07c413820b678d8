// Copyright (c) 2026 The images-upload Authors. All Rights Reserved.

//! Upload session state: the files a user selected, their previews, the
//! progress of each upload in the current batch, one status message per
//! settled upload, and the images the service reports as stored.
//!
//! A batch fans out one upload per selected file without waiting for any of
//! them, joins on all of them settling, and then queries the service for its
//! image list exactly once.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use futures::*;

use iu;
use iu::api::response::UploadResponse;
use iu::api::{ProgressCallback, ProgressUpdate, Transport};
use iu::error::ErrorKind;
use iu::model::{ImageInfo, Preview, ProgressInfo, SelectedFile};
use iu::util::futures::into_future_trait;

/// The settled result of uploading one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded {
        file_name: String,
        response: UploadResponse,
    },
    Failed {
        file_name: String,
        server_message: Option<String>,
        error: String,
    },
}

impl UploadOutcome {
    pub fn file_name(&self) -> &str {
        match *self {
            UploadOutcome::Succeeded { ref file_name, .. } => file_name,
            UploadOutcome::Failed { ref file_name, .. } => file_name,
        }
    }

    pub fn is_success(&self) -> bool {
        match *self {
            UploadOutcome::Succeeded { .. } => true,
            UploadOutcome::Failed { .. } => false,
        }
    }

    /// The status line shown for this upload.
    pub fn message(&self) -> String {
        match *self {
            UploadOutcome::Succeeded { ref file_name, .. } => format!("{}: Successful!", file_name),
            UploadOutcome::Failed {
                ref file_name,
                server_message: Some(ref message),
                ..
            } => format!("{}: Failed! {}", file_name, message),
            UploadOutcome::Failed { ref file_name, .. } => format!("{}: Failed!", file_name),
        }
    }
}

impl fmt::Display for UploadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Everything a finished batch produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// One outcome per file, in selection order.
    pub outcomes: Vec<UploadOutcome>,
    /// One status line per file, in completion order.
    pub messages: Vec<String>,
    /// The image list fetched after every upload settled.
    pub images: Vec<ImageInfo>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    // Bumped by every selection and every batch. Completions and progress
    // reports from an older generation are dropped.
    generation: u64,
    // Bumped every time a batch refresh stores the image list.
    listing_revision: u64,
    selected: Option<Vec<SelectedFile>>,
    previews: Vec<Preview>,
    progress_infos: Vec<ProgressInfo>,
    messages: Vec<String>,
    image_infos: Vec<ImageInfo>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// Routes transport progress for one file into its progress record.
struct ProgressSink {
    state: Arc<Mutex<SessionState>>,
    generation: u64,
    index: usize,
}

impl ProgressCallback for ProgressSink {
    fn on_update(&self, update: &ProgressUpdate) {
        let mut state = lock(&self.state);
        if state.generation != self.generation {
            return;
        }
        if let Some(info) = state.progress_infos.get_mut(self.index) {
            info.advance(update.percent_done());
        }
    }
}

/// The state of an image upload widget, driven through a `Transport`.
pub struct UploadSession<T: Transport> {
    transport: Arc<T>,
    state: Arc<Mutex<SessionState>>,
}

impl<T: Transport> Clone for UploadSession<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Transport> UploadSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches the stored image list and keeps it as the session's view of
    /// the service, unless a batch refreshed the list while this request was
    /// outstanding.
    pub fn load(&self) -> iu::Future<Vec<ImageInfo>> {
        let state = Arc::clone(&self.state);
        let revision = lock(&self.state).listing_revision;
        into_future_trait(self.transport.get_files().map(move |images| {
            let mut state = lock(&state);
            if state.listing_revision == revision {
                state.image_infos = images.clone();
            } else {
                debug!("iu:load :: a batch refreshed the image list first, keeping it");
            }
            images
        }))
    }

    /// Replaces the selection. Previews are rebuilt, and the progress records
    /// and status messages of any earlier batch are discarded. Every file is
    /// kept; files of unknown type are sent as `application/octet-stream`.
    ///
    /// Returns the number of files selected.
    pub fn select_images(&self, images: Vec<SelectedFile>) -> usize {
        for file in images.iter().filter(|f| !f.is_image()) {
            debug!(
                "iu:select_images<file = {}> :: unknown image type, sending as {}",
                file.name(),
                file.content_type()
            );
        }

        let mut state = lock(&self.state);
        state.generation += 1;
        state.previews = images
            .iter()
            .enumerate()
            .map(|(index, file)| file.preview(index))
            .collect();
        state.progress_infos.clear();
        state.messages.clear();
        let kept = images.len();
        state.selected = if images.is_empty() { None } else { Some(images) };
        kept
    }

    /// Tests if there is a selection to upload.
    pub fn can_upload(&self) -> bool {
        lock(&self.state).selected.is_some()
    }

    pub fn selected_files(&self) -> Vec<SelectedFile> {
        lock(&self.state).selected.clone().unwrap_or_default()
    }

    pub fn previews(&self) -> Vec<Preview> {
        lock(&self.state).previews.clone()
    }

    /// Progress of the current batch, index-aligned with the selection.
    pub fn progress_infos(&self) -> Vec<ProgressInfo> {
        lock(&self.state).progress_infos.clone()
    }

    /// Status lines of the current batch, in completion order.
    pub fn messages(&self) -> Vec<String> {
        lock(&self.state).messages.clone()
    }

    pub fn image_infos(&self) -> Vec<ImageInfo> {
        lock(&self.state).image_infos.clone()
    }

    /// Uploads every selected file concurrently.
    ///
    /// A failed upload resets its progress to 0 and records a failure line;
    /// it never aborts the other uploads. Once every upload has settled the
    /// image list is fetched once. If that fetch fails the returned future
    /// fails and the previously known image list is kept.
    pub fn upload_images(&self) -> iu::Future<BatchReport> {
        let (generation, files) = {
            let mut state = lock(&self.state);
            let files = match state.selected {
                Some(ref files) if !files.is_empty() => files.clone(),
                _ => return into_future_trait(future::err(ErrorKind::EmptySelection.into())),
            };
            state.generation += 1;
            state.progress_infos = files.iter().map(|f| ProgressInfo::new(f.name())).collect();
            state.messages.clear();
            (state.generation, files)
        };

        let started = Utc::now();
        debug!(
            "iu:upload_images<generation = {}> :: uploading {} file(s)",
            generation,
            files.len()
        );

        let batch_messages = Arc::new(Mutex::new(Vec::with_capacity(files.len())));
        let uploads: Vec<iu::Future<UploadOutcome>> = files
            .into_iter()
            .enumerate()
            .map(|(index, file)| self.upload_one(generation, index, file, &batch_messages))
            .collect();

        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let f = future::join_all(uploads)
            .and_then(move |outcomes| {
                transport
                    .get_files()
                    .map_err(move |e| {
                        warn!(
                            "iu:upload_images<generation = {}> :: refreshing the image list failed: {}",
                            generation, e
                        );
                        e
                    })
                    .map(move |images| (outcomes, images))
            })
            .map(move |(outcomes, images)| {
                {
                    let mut state = lock(&state);
                    state.listing_revision += 1;
                    state.image_infos = images.clone();
                }
                let messages = lock(&batch_messages).clone();
                let report = BatchReport {
                    outcomes,
                    messages,
                    images,
                };
                debug!(
                    "iu:upload_images<generation = {}> :: {} succeeded, {} failed in {} ms",
                    generation,
                    report.succeeded(),
                    report.failed(),
                    (Utc::now() - started).num_milliseconds()
                );
                report
            });

        into_future_trait(f)
    }

    // Each per-file future resolves to an outcome, never an error, so the
    // join barrier in `upload_images` waits for every sibling.
    fn upload_one(
        &self,
        generation: u64,
        index: usize,
        file: SelectedFile,
        batch_messages: &Arc<Mutex<Vec<String>>>,
    ) -> iu::Future<UploadOutcome> {
        let sink: Arc<dyn ProgressCallback> = Arc::new(ProgressSink {
            state: Arc::clone(&self.state),
            generation,
            index,
        });
        let state = Arc::clone(&self.state);
        let batch_messages = Arc::clone(batch_messages);
        let file_name = file.name().to_string();

        let f = self.transport.upload(file, sink).then(move |result| {
            let outcome = match result {
                Ok(response) => UploadOutcome::Succeeded {
                    file_name,
                    response,
                },
                Err(e) => {
                    warn!("iu:upload<file = {}> :: upload failed: {}", file_name, e);
                    UploadOutcome::Failed {
                        server_message: e.server_message(),
                        error: e.to_string(),
                        file_name,
                    }
                }
            };
            let message = outcome.message();

            {
                let mut state = lock(&state);
                if state.generation == generation {
                    if let Some(info) = state.progress_infos.get_mut(index) {
                        if outcome.is_success() {
                            info.complete();
                        } else {
                            info.reset();
                        }
                    }
                    state.messages.push(message.clone());
                }
            }
            lock(&batch_messages).push(message);

            Ok::<UploadOutcome, iu::Error>(outcome)
        });

        into_future_trait(f)
    }
}
