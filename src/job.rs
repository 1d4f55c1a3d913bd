use std::path::Path;

use tokio::{fs::File, io::AsyncReadExt};

/// Fixed size of one upload chunk: 5 MiB.
pub const CHUNK_SIZE: u64 = 5 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum JobError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("file is empty")]
    Empty,
    #[error("file has no name")]
    NoFileName,
}

/// One slice of the file, ready to submit.
pub struct Chunk {
    pub index: u64,
    pub data: Vec<u8>,
}

/// A single upload in flight: the open file, its dimensions and the next
/// chunk to read. Chunks come out strictly in order, 0 through
/// `total_chunks() - 1`, chunk `i` covering bytes
/// `[i * CHUNK_SIZE, min((i + 1) * CHUNK_SIZE, size))`.
pub struct UploadJob {
    file: File,
    size: u64,
    filename: String,
    total: u64,
    next_index: u64,
}

impl UploadJob {
    /// Opens `path` and sizes the job. Empty files are rejected here, so a
    /// job always has at least one chunk.
    pub async fn open(path: &Path) -> Result<UploadJob, JobError> {
        let filename = path
            .file_name()
            .ok_or(JobError::NoFileName)?
            .to_string_lossy()
            .into_owned();

        let file = File::open(path).await?;
        let size = file.metadata().await?.len();
        if size == 0 {
            return Err(JobError::Empty);
        }

        Ok(UploadJob {
            file,
            size,
            filename,
            total: total_chunks(size),
            next_index: 0,
        })
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn total_chunks(&self) -> u64 {
        self.total
    }

    /// Number of chunks handed out so far.
    pub fn chunks_read(&self) -> u64 {
        self.next_index
    }

    /// Reads the next chunk, or `None` once the file is exhausted. The file
    /// cursor only ever moves forward; there is no way to re-read a chunk.
    pub async fn next_chunk(&mut self) -> Result<Option<Chunk>, JobError> {
        if self.next_index >= self.total {
            return Ok(None);
        }

        let offset = self.next_index * CHUNK_SIZE;
        let len = (self.size - offset).min(CHUNK_SIZE) as usize;
        let mut data = vec![0u8; len];
        self.file.read_exact(&mut data).await?;

        let chunk = Chunk {
            index: self.next_index,
            data,
        };
        self.next_index += 1;
        Ok(Some(chunk))
    }
}

/// Chunk count for a file of `size` bytes: `ceil(size / CHUNK_SIZE)`.
pub fn total_chunks(size: u64) -> u64 {
    (size + CHUNK_SIZE - 1) / CHUNK_SIZE
}
