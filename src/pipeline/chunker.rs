use serde::Serialize;

/// Maximum records per exported part.
pub const CHUNK_CAPACITY: usize = 9000;

/// A contiguous slice of the corpus prepared for export.
#[derive(Debug, Clone, Serialize)]
pub struct Chunk {
    /// 1-based position, used in the exported file name.
    pub index: usize,
    pub records: Vec<String>,
    /// Byte length of the records joined with `\n`.
    pub size_bytes: usize,
}

impl Chunk {
    fn new(index: usize, records: Vec<String>) -> Self {
        let size_bytes = serialized_len(&records);
        Self {
            index,
            records,
            size_bytes,
        }
    }

    /// Records joined with newline separators, no trailing newline.
    pub fn to_text(&self) -> String {
        self.records.join("\n")
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

pub struct Chunker;

impl Chunker {
    /// Splits `records` into parts of `CHUNK_CAPACITY`; only the last may be shorter.
    pub fn chunk(records: &[String]) -> Vec<Chunk> {
        Self::chunk_with_capacity(records, CHUNK_CAPACITY)
    }

    fn chunk_with_capacity(records: &[String], capacity: usize) -> Vec<Chunk> {
        records
            .chunks(capacity)
            .enumerate()
            .map(|(i, part)| Chunk::new(i + 1, part.to_vec()))
            .collect()
    }
}

fn serialized_len(records: &[String]) -> usize {
    let content: usize = records.iter().map(String::len).sum();
    content + records.len().saturating_sub(1)
}
