use std::path::Path;

use crate::api::{ApiError, LiveApi};
use crate::job::{JobError, UploadJob};
use crate::notify::{NotificationKind, NotificationSink};
use crate::progress::{percent, ProgressSink, ProgressUpdate};
use crate::state::Session;

#[derive(thiserror::Error, Debug)]
pub enum UploadError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Job(#[from] JobError),
}

/// Uploads the session's picked file in 5 MiB chunks, one awaited request
/// at a time. The first failed chunk halts the job; chunks already sent are
/// not rolled back and nothing is retried. Afterwards, on success and
/// failure alike, the video list is refreshed and the busy flag cleared.
/// Does nothing when no file is picked.
pub async fn run(
    api: &impl LiveApi,
    sink: &impl NotificationSink,
    progress: &impl ProgressSink,
    session: &mut Session,
) {
    let path = match session.picked_file.clone() {
        Some(path) => path,
        None => return,
    };

    session.begin_upload();
    match run_chunked(api, progress, session, &path).await {
        Ok(()) => {
            sink.notify(NotificationKind::Success, "File uploaded successfully!");
            session.succeed();
        }
        Err(err) => report_failure(sink, session, &err),
    }
    finish(api, session).await;
}

/// Uploads the picked file as one multipart request instead of chunks.
/// Same notifications and teardown as [`run`], without per-chunk progress.
pub async fn run_whole(api: &impl LiveApi, sink: &impl NotificationSink, session: &mut Session) {
    let path = match session.picked_file.clone() {
        Some(path) => path,
        None => return,
    };

    session.begin_upload();
    match send_whole(api, &path).await {
        Ok(()) => {
            sink.notify(NotificationKind::Success, "File uploaded successfully!");
            session.succeed();
        }
        Err(err) => report_failure(sink, session, &err),
    }
    finish(api, session).await;
}

async fn run_chunked(
    api: &impl LiveApi,
    progress: &impl ProgressSink,
    session: &mut Session,
    path: &Path,
) -> Result<(), UploadError> {
    let mut job = UploadJob::open(path).await?;
    let total = job.total_chunks();
    let total_bytes = job.size();
    let filename = job.filename().to_string();
    let mut bytes_sent = 0u64;

    while let Some(chunk) = job.next_chunk().await? {
        let index = chunk.index;
        let len = chunk.data.len() as u64;
        api.upload_chunk(chunk.data, index, total, &filename).await?;

        bytes_sent += len;
        let done = index + 1;
        let step = percent(done, total);
        session.tick(step);
        progress.on_progress(ProgressUpdate {
            chunks_done: done,
            total_chunks: total,
            bytes_sent,
            total_bytes,
            percent: step,
        });
    }

    Ok(())
}

async fn send_whole(api: &impl LiveApi, path: &Path) -> Result<(), UploadError> {
    let filename = path
        .file_name()
        .ok_or(JobError::NoFileName)?
        .to_string_lossy()
        .into_owned();

    let size = tokio::fs::metadata(path).await.map_err(JobError::Io)?.len();
    if size == 0 {
        return Err(JobError::Empty.into());
    }

    api.upload_whole(path, &filename).await?;
    Ok(())
}

/// Server rejections carry a plain-text body meant for the user and get the
/// "uploading file" wording; everything else is a local or transport fault.
fn report_failure(sink: &impl NotificationSink, session: &mut Session, err: &UploadError) {
    let message = match err {
        UploadError::Api(ApiError::Server { body, .. }) => {
            format!("Error uploading file: {}", body)
        }
        other => format!("Error in upload: {}", other),
    };
    sink.notify(NotificationKind::Error, &message);
    session.fail(err.to_string());
}

/// Teardown shared by every outcome: refresh the picker from the server,
/// then clear the busy flag. A failed refresh is logged, not surfaced, so
/// it cannot stomp the upload notification.
async fn finish(api: &impl LiveApi, session: &mut Session) {
    match api.list_videos().await {
        Ok(videos) => session.videos = videos,
        Err(err) => warn!("Could not refresh video list: {}", err),
    }
    session.finish_upload();
}
