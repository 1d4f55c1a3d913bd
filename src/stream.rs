use crate::api::{ApiError, LiveApi, StreamRequest};
use crate::notify::{NotificationKind, NotificationSink};
use crate::state::Session;

/// Asks the backend to restream the selected video to YouTube. A validation
/// failure keeps the form intact and sends nothing; once a request has gone
/// out, the form is cleared whether the backend accepted it or not.
pub async fn launch(api: &impl LiveApi, sink: &impl NotificationSink, session: &mut Session) {
    session.stream_busy = true;

    let video = session.selected_video.clone().unwrap_or_default();
    if video.is_empty() || session.stream_key.is_empty() {
        sink.notify(
            NotificationKind::Error,
            "Please select a video and provide a stream key.",
        );
        session.stream_busy = false;
        return;
    }

    let request = StreamRequest {
        object_name: video,
        stream_key: session.stream_key.clone(),
    };

    match api.start_stream(&request).await {
        Ok(()) => sink.notify(NotificationKind::Success, "Streaming started"),
        Err(ApiError::Server { body, .. }) => sink.notify(
            NotificationKind::Error,
            &format!("Error starting stream: {}", body),
        ),
        Err(err) => sink.notify(
            NotificationKind::Error,
            &format!("Error in starting stream: {}", err),
        ),
    }

    session.reset_stream_form();
    session.stream_busy = false;
}
