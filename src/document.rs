//! Trace documents: the decoded content of a seismic file as the viewer sees it.
use std::collections::{BTreeMap, VecDeque};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::view::{IndexWindow, SampleMatrix, ViewError};
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed trace document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trace header row {row} has {actual} fields, expected {expected}")]
    HeaderWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{headers} trace headers for {traces} traces")]
    HeaderCount { headers: usize, traces: usize },
    #[error("rows {min}..={max} are outside a document of {traces} traces")]
    RowsOutOfRange {
        min: usize,
        max: usize,
        traces: usize,
    },
    #[error(transparent)]
    View(#[from] ViewError),
    #[error("source is exhausted")]
    Exhausted,
}
/// Header metadata plus trace samples of one file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// File-wide binary header, tag -> value.
    #[serde(default)]
    pub binary_header: BTreeMap<String, i64>,
    /// Column names of the trace header table.
    #[serde(default)]
    pub trace_header_keys: Vec<String>,
    /// One row per trace; empty when the source carries no trace headers.
    #[serde(default)]
    pub trace_headers: Vec<Vec<i64>>,
    pub traces: Vec<Vec<f32>>, // traces x samples
}
impl TraceDocument {
    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }
    pub fn sample_count(&self) -> usize {
        self.traces.first().map(|t| t.len()).unwrap_or(0)
    }
    pub fn validate(&self) -> Result<(), DocumentError> {
        if !self.trace_headers.is_empty() && self.trace_headers.len() != self.traces.len() {
            return Err(DocumentError::HeaderCount {
                headers: self.trace_headers.len(),
                traces: self.traces.len(),
            });
        }
        for (row, header) in self.trace_headers.iter().enumerate() {
            if header.len() != self.trace_header_keys.len() {
                return Err(DocumentError::HeaderWidth {
                    row,
                    expected: self.trace_header_keys.len(),
                    actual: header.len(),
                });
            }
        }
        Ok(())
    }
    /// Sample matrix for the view controller.
    pub fn to_matrix(&self) -> Result<SampleMatrix, DocumentError> {
        self.validate()?;
        Ok(SampleMatrix::from_traces(&self.traces)?)
    }
    /// Copy restricted to the traces in `rows`, headers included.
    pub fn window(&self, rows: IndexWindow) -> Result<TraceDocument, DocumentError> {
        if rows.max >= self.traces.len() {
            return Err(DocumentError::RowsOutOfRange {
                min: rows.min,
                max: rows.max,
                traces: self.traces.len(),
            });
        }
        let range = rows.min..rows.max + 1;
        let trace_headers = if self.trace_headers.is_empty() {
            Vec::new()
        } else {
            self.trace_headers[range.clone()].to_vec()
        };
        Ok(TraceDocument {
            binary_header: self.binary_header.clone(),
            trace_header_keys: self.trace_header_keys.clone(),
            trace_headers,
            traces: self.traces[range].to_vec(),
        })
    }
}
/// Something that can decode a trace document on demand.
pub trait TraceSource {
    fn read_document(&mut self) -> Result<TraceDocument, DocumentError>;
}
/// In-memory source useful for tests and programmatic use.
pub struct MemorySource {
    queue: VecDeque<TraceDocument>,
}
impl MemorySource {
    pub fn new(documents: impl IntoIterator<Item = TraceDocument>) -> Self {
        Self {
            queue: documents.into_iter().collect(),
        }
    }
}
impl TraceSource for MemorySource {
    fn read_document(&mut self) -> Result<TraceDocument, DocumentError> {
        self.queue.pop_front().ok_or(DocumentError::Exhausted)
    }
}
/// Reads the viewer's JSON trace document format.
pub struct JsonFileSource {
    path: PathBuf,
}
impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl TraceSource for JsonFileSource {
    fn read_document(&mut self) -> Result<TraceDocument, DocumentError> {
        let reader = BufReader::new(File::open(&self.path)?);
        let document: TraceDocument = serde_json::from_reader(reader)?;
        document.validate()?;
        info!(
            "read {} traces x {} samples from {}",
            document.trace_count(),
            document.sample_count(),
            self.path.display()
        );
        Ok(document)
    }
}
pub fn write_document(document: &TraceDocument, path: &Path) -> Result<(), DocumentError> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, document)?;
    Ok(())
}
/// Saves the traces inside `rows` to `path`.
pub fn export_window(
    document: &TraceDocument,
    rows: IndexWindow,
    path: &Path,
) -> Result<(), DocumentError> {
    let windowed = document.window(rows)?;
    write_document(&windowed, path)?;
    info!(
        "exported traces {}..={} to {}",
        rows.min,
        rows.max,
        path.display()
    );
    Ok(())
}
#[cfg(test)]
mod tests {
    use super::*;
    fn sample_document() -> TraceDocument {
        let mut binary_header = BTreeMap::new();
        binary_header.insert("Samples".to_owned(), 3);
        binary_header.insert("Interval".to_owned(), 4000);
        TraceDocument {
            binary_header,
            trace_header_keys: vec!["TRACE_SEQUENCE_LINE".into(), "offset".into()],
            trace_headers: (0..4).map(|i| vec![i + 1, i * 25]).collect(),
            traces: (0..4)
                .map(|i| vec![i as f32, -(i as f32), 0.5])
                .collect(),
        }
    }
    #[test]
    fn validate_checks_header_table() {
        let mut doc = sample_document();
        assert!(doc.validate().is_ok());
        doc.trace_headers[2].pop();
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::HeaderWidth { row: 2, .. })
        ));
        let mut doc = sample_document();
        doc.trace_headers.pop();
        assert!(matches!(
            doc.validate(),
            Err(DocumentError::HeaderCount {
                headers: 3,
                traces: 4
            })
        ));
    }
    #[test]
    fn window_keeps_headers_aligned() {
        let doc = sample_document();
        let part = doc.window(IndexWindow { min: 1, max: 2 }).unwrap();
        assert_eq!(part.trace_count(), 2);
        assert_eq!(part.trace_headers, vec![vec![2, 25], vec![3, 50]]);
        assert_eq!(part.traces[0], vec![1.0, -1.0, 0.5]);
        assert_eq!(part.binary_header, doc.binary_header);
        assert!(doc.window(IndexWindow { min: 3, max: 4 }).is_err());
    }
    #[test]
    fn matrix_matches_traces() {
        let m = sample_document().to_matrix().unwrap();
        assert_eq!((m.trace_count(), m.sample_count()), (4, 3));
        let ragged = TraceDocument {
            traces: vec![vec![1.0], vec![]],
            ..TraceDocument::default()
        };
        assert!(matches!(
            ragged.to_matrix(),
            Err(DocumentError::View(ViewError::RaggedTrace { .. }))
        ));
    }
    #[test]
    fn memory_source_drains() {
        let mut source = MemorySource::new(vec![sample_document()]);
        assert!(source.read_document().is_ok());
        assert!(matches!(
            source.read_document(),
            Err(DocumentError::Exhausted)
        ));
    }
    #[test]
    fn exported_window_reads_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("export.json");
        let doc = sample_document();
        export_window(&doc, IndexWindow { min: 2, max: 3 }, &path).unwrap();
        let read = JsonFileSource::new(&path).read_document().unwrap();
        assert_eq!(read, doc.window(IndexWindow { min: 2, max: 3 }).unwrap());
    }
    #[test]
    fn missing_file_is_io_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut source = JsonFileSource::new(temp_dir.path().join("does_not_exist.json"));
        assert!(matches!(source.read_document(), Err(DocumentError::Io(_))));
    }
    #[test]
    fn headers_are_optional_in_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bare.json");
        std::fs::write(&path, r#"{"traces": [[1.0, 2.0], [3.0, 4.0]]}"#).unwrap();
        let doc = JsonFileSource::new(&path).read_document().unwrap();
        assert!(doc.binary_header.is_empty());
        assert_eq!(doc.sample_count(), 2);
    }
}
