//! Per-stream upload session state
//!
//! Owned exclusively by one `Upload` handler; accumulates chunks in arrival
//! order and is discarded when placement completes.

/// Accumulated state of one client-streamed upload.
#[derive(Debug, Default)]
pub struct UploadSession {
    file_name: String,
    chunks: Vec<Vec<u8>>,
}

impl UploadSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one chunk in arrival order.
    ///
    /// The session file name is taken from every message; when messages
    /// disagree, the most recent one wins.
    pub fn push(&mut self, file_name: String, chunk_data: Vec<u8>) {
        self.file_name = file_name;
        self.chunks.push(chunk_data);
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn chunks(&self) -> &[Vec<u8>] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_keep_arrival_order() {
        let mut session = UploadSession::new();
        session.push("book_0".into(), vec![0]);
        session.push("book_1".into(), vec![1]);
        session.push("book_2".into(), vec![2]);

        assert_eq!(session.len(), 3);
        assert_eq!(session.chunks()[1], vec![1]);
    }

    #[test]
    fn test_last_file_name_wins() {
        // Messages within one stream may carry differing names; the session
        // keeps whichever arrived last.
        let mut session = UploadSession::new();
        session.push("book_0".into(), vec![0]);
        session.push("book_1".into(), vec![1]);

        assert_eq!(session.file_name(), "book_1");
    }
}
