use std::io::Write;

/// Snapshot of one upload after a chunk completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUpdate {
    pub chunks_done: u64,
    pub total_chunks: u64,
    pub bytes_sent: u64,
    pub total_bytes: u64,
    pub percent: u8,
}

/// Receives one update per uploaded chunk, in chunk order.
pub trait ProgressSink {
    fn on_progress(&self, update: ProgressUpdate);
}

/// Redraws a single progress line in place on stdout.
pub struct ConsoleProgress;

impl ProgressSink for ConsoleProgress {
    fn on_progress(&self, update: ProgressUpdate) {
        print!(
            "\x1b[2K\rUploaded {} of {} chunks ({}%, {} of {})",
            update.chunks_done,
            update.total_chunks,
            update.percent,
            format_bytes(update.bytes_sent),
            format_bytes(update.total_bytes),
        );
        let _ = std::io::stdout().lock().flush();
        if update.chunks_done == update.total_chunks {
            println!();
        }
    }
}

/// Percentage complete after `done` of `total` chunks, rounded up. `total`
/// must be non-zero. Monotone in `done` and exactly 100 at `done == total`,
/// but for jobs of more than 100 chunks the rounding can show 100 one chunk
/// early, so completion is decided by chunk counts, never by this value.
pub fn percent(done: u64, total: u64) -> u8 {
    debug_assert!(total > 0, "a job always has at least one chunk");
    ((done * 100 + total - 1) / total).min(100) as u8
}

pub fn format_bytes(bytes: u64) -> String {
    let mut bytes = bytes as f64;
    let mut suffix = "B";

    if bytes > 1024.0 {
        bytes /= 1024.0;
        suffix = "KiB";
    }
    if bytes > 1024.0 {
        bytes /= 1024.0;
        suffix = "MiB";
    }
    if bytes > 1024.0 {
        bytes /= 1024.0;
        suffix = "GiB";
    }
    if bytes > 1024.0 {
        bytes /= 1024.0;
        suffix = "TiB";
    }

    format!("{:.2} {}", bytes, suffix)
}
