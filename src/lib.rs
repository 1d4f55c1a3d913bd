//! # livepush
//!
//! This crate provides a client for a live-restream backend: it uploads
//! local video files in fixed 5 MiB chunks and starts YouTube streams from
//! videos already stored on the backend. It is the library behind the
//! `livepush` binary, but the pieces are usable on their own.
//!
//! Uploads are strictly sequential: chunk `i` is never sent before chunk
//! `i - 1` has completed, and the first failed chunk aborts the whole job.
//! There is no retry and no resume; a failed upload restarts from chunk 0.
//!
//! ## Usage
//!
//! The coordinator drives everything through a [`state::Session`], reporting
//! outcomes to a [`notify::NotificationSink`] and chunk-by-chunk progress to
//! a [`progress::ProgressSink`]:
//!
//! ```no_run
//! use livepush::{
//!     api::{ApiClient, DEFAULT_API_URL},
//!     notify::ConsoleSink,
//!     progress::ConsoleProgress,
//!     state::Session,
//!     upload,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     // Plain reqwest client pointed at the backend base URL
//!     let api = ApiClient::new(DEFAULT_API_URL).unwrap();
//!
//!     // The session holds the picked file, the stream form and the
//!     // last-fetched video list
//!     let mut session = Session::new();
//!     session.picked_file = Some("talk.mp4".into());
//!
//!     // Chunk the file, upload sequentially, refresh the video list
//!     upload::run(&api, &ConsoleSink, &ConsoleProgress, &mut session).await;
//! }
//! ```
//!
//! Starting a stream is a single validated request; see [`stream::launch`].

#[forbid(unsafe_code)]
#[macro_use]
extern crate log;

pub mod api;
pub mod job;
pub mod notify;
pub mod progress;
pub mod state;
pub mod stream;
pub mod upload;
