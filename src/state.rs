use std::path::PathBuf;

/// First entry of the stream picker, shown before any real video name.
pub const VIDEO_PLACEHOLDER: &str = "Select a video";

/// Where the current upload stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Uploading { percent: u8 },
    Succeeded,
    Failed { reason: String },
}

/// Everything the client remembers between operations.
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: UploadPhase,
    pub picked_file: Option<PathBuf>,
    pub videos: Vec<String>,
    pub selected_video: Option<String>,
    pub stream_key: String,
    pub uploading: bool,
    pub stream_busy: bool,
}

impl Session {
    pub fn new() -> Self {
        Session {
            phase: UploadPhase::Idle,
            picked_file: None,
            videos: Vec::new(),
            selected_video: None,
            stream_key: String::new(),
            uploading: false,
            stream_busy: false,
        }
    }

    pub fn begin_upload(&mut self) {
        self.phase = UploadPhase::Uploading { percent: 0 };
        self.uploading = true;
    }

    /// Raises the displayed percentage, never lowers it. Ignored outside an
    /// active upload.
    pub fn tick(&mut self, percent: u8) {
        if let UploadPhase::Uploading { percent: current } = &mut self.phase {
            *current = (*current).max(percent);
        }
    }

    pub fn succeed(&mut self) {
        self.phase = UploadPhase::Succeeded;
        self.picked_file = None;
    }

    pub fn fail(&mut self, reason: String) {
        self.phase = UploadPhase::Failed { reason };
    }

    pub fn finish_upload(&mut self) {
        self.uploading = false;
    }

    pub fn reset_stream_form(&mut self) {
        self.selected_video = None;
        self.stream_key.clear();
    }

    /// Percentage a progress bar should show for the current phase. Failed
    /// and idle sessions show an empty bar, not the last value reached.
    pub fn percent(&self) -> u8 {
        match &self.phase {
            UploadPhase::Uploading { percent } => *percent,
            UploadPhase::Succeeded => 100,
            UploadPhase::Idle | UploadPhase::Failed { .. } => 0,
        }
    }

    /// Picker entries, placeholder first, then the server's list in order.
    pub fn video_options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.videos.len() + 1);
        options.push(VIDEO_PLACEHOLDER.to_string());
        options.extend(self.videos.iter().cloned());
        options
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_idle_with_empty_bar() {
        let session = Session::new();
        assert_eq!(session.phase, UploadPhase::Idle);
        assert_eq!(session.percent(), 0);
        assert!(!session.uploading);
        assert!(!session.stream_busy);
    }

    #[test]
    fn upload_lifecycle_moves_percent_forward_only() {
        let mut session = Session::new();
        session.begin_upload();
        assert!(session.uploading);
        assert_eq!(session.percent(), 0);

        session.tick(34);
        session.tick(67);
        session.tick(34);
        assert_eq!(session.percent(), 67);

        session.succeed();
        session.finish_upload();
        assert_eq!(session.phase, UploadPhase::Succeeded);
        assert_eq!(session.percent(), 100);
        assert!(!session.uploading);
    }

    #[test]
    fn success_clears_the_picked_file() {
        let mut session = Session::new();
        session.picked_file = Some(PathBuf::from("talk.mp4"));
        session.begin_upload();
        session.succeed();
        assert_eq!(session.picked_file, None);
    }

    #[test]
    fn failure_resets_the_bar_and_keeps_the_reason() {
        let mut session = Session::new();
        session.begin_upload();
        session.tick(67);
        session.fail("disk full".to_string());
        session.finish_upload();

        assert_eq!(session.percent(), 0);
        assert_eq!(
            session.phase,
            UploadPhase::Failed {
                reason: "disk full".to_string()
            }
        );
    }

    #[test]
    fn ticks_outside_an_upload_are_ignored() {
        let mut session = Session::new();
        session.tick(50);
        assert_eq!(session.phase, UploadPhase::Idle);
        assert_eq!(session.percent(), 0);
    }

    #[test]
    fn picker_lists_placeholder_then_every_video() {
        let mut session = Session::new();
        session.videos = vec!["a.mp4".to_string(), "b.mp4".to_string()];
        assert_eq!(
            session.video_options(),
            vec![
                VIDEO_PLACEHOLDER.to_string(),
                "a.mp4".to_string(),
                "b.mp4".to_string(),
            ]
        );
    }

    #[test]
    fn stream_form_reset_clears_selection_and_key() {
        let mut session = Session::new();
        session.selected_video = Some("a.mp4".to_string());
        session.stream_key = "key123".to_string();
        session.reset_stream_form();
        assert_eq!(session.selected_video, None);
        assert!(session.stream_key.is_empty());
    }
}
