use std::cell::Cell;
use std::path::PathBuf;

use livepush::api::{ApiClient, LiveApi, DEFAULT_API_URL};
use livepush::notify::{ConsoleSink, NotificationKind, NotificationSink};
use livepush::progress::ConsoleProgress;
use livepush::state::Session;
use livepush::{stream, upload};

/// Console sink that also remembers whether an error was emitted, so the
/// process can exit non-zero.
struct StatusSink {
    inner: ConsoleSink,
    errored: Cell<bool>,
}

impl StatusSink {
    fn new() -> StatusSink {
        StatusSink {
            inner: ConsoleSink,
            errored: Cell::new(false),
        }
    }
}

impl NotificationSink for StatusSink {
    fn notify(&self, kind: NotificationKind, message: &str) {
        if kind == NotificationKind::Error {
            self.errored.set(true);
        }
        self.inner.notify(kind, message);
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    // Read the subcommand from args
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("");

    // Create the API client
    let api = ApiClient::new(DEFAULT_API_URL).expect("Could not create API client");
    let sink = StatusSink::new();
    let mut session = Session::new();

    match command {
        "list" => {
            match api.list_videos().await {
                Ok(videos) => session.videos = videos,
                Err(err) => {
                    sink.notify(
                        NotificationKind::Error,
                        &format!("Error fetching videos: {}", err),
                    );
                    std::process::exit(1);
                }
            }

            for option in session.video_options() {
                println!("{}", option);
            }
        }
        "upload" => {
            let mut whole = false;
            let mut file = None;
            for arg in &args[1..] {
                if arg == "--whole" {
                    whole = true;
                } else {
                    file = Some(PathBuf::from(arg));
                }
            }
            let file = file.unwrap_or_else(|| usage());

            println!("Uploading {}", file.display());
            session.picked_file = Some(file);
            if whole {
                upload::run_whole(&api, &sink, &mut session).await;
            } else {
                upload::run(&api, &sink, &ConsoleProgress, &mut session).await;
            }

            if !sink.errored.get() {
                println!("{} videos on the backend", session.videos.len());
            }
        }
        "stream" => {
            if args.len() < 3 {
                usage();
            }
            session.selected_video = Some(args[1].clone());
            session.stream_key = args[2].clone();

            stream::launch(&api, &sink, &mut session).await;
        }
        _ => usage(),
    }

    if sink.errored.get() {
        std::process::exit(1);
    }
}

fn usage() -> ! {
    eprintln!("Usage: livepush <command>");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  list                     List the videos stored on the backend");
    eprintln!("  upload [--whole] <file>  Upload a video, in 5 MiB chunks by default");
    eprintln!("  stream <video> <key>     Restream a stored video to YouTube");
    std::process::exit(2);
}
