// sequences.rs - FASTA ingestion into an ordered sequence set

use crate::error::{MsaError, Result};
use bio::io::fasta;
use log::{debug, info};
use regex::Regex;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// One FASTA record with its `|`-separated header fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRecord {
    pub id: String,
    /// Header split on `|`, each field trimmed. `fields[0] == id`.
    pub fields: Vec<String>,
    pub sequence: Vec<u8>,
}

impl SequenceRecord {
    /// Build from a full header line (without `>`) and raw sequence bytes
    pub fn from_header(header: &str, sequence: &[u8]) -> Result<Self> {
        let fields: Vec<String> = header.split('|').map(|f| f.trim().to_string()).collect();
        let id = fields.first().cloned().unwrap_or_default();
        if id.is_empty() {
            return Err(MsaError::InvalidSequence(format!(
                "record with empty identifier (header '{}')",
                header
            )));
        }
        Ok(Self {
            id,
            fields,
            sequence: sequence
                .iter()
                .copied()
                .filter(|b| !b.is_ascii_whitespace())
                .collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sequence as text, lossy for non-UTF-8 bytes
    pub fn sequence_str(&self) -> String {
        String::from_utf8_lossy(&self.sequence).into_owned()
    }
}

/// Ordered collection of records with id lookup
#[derive(Debug, Clone, Default)]
pub struct SequenceSet {
    records: Vec<SequenceRecord>,
    index: HashMap<String, usize>,
}

impl SequenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from records; a later duplicate id shadows the earlier one in lookups
    pub fn from_records(records: Vec<SequenceRecord>) -> Self {
        let mut set = Self::new();
        for record in records {
            set.push(record);
        }
        set
    }

    pub fn push(&mut self, record: SequenceRecord) {
        if self.index.contains_key(&record.id) {
            debug!("duplicate sequence id '{}'", record.id);
        }
        self.index.insert(record.id.clone(), self.records.len());
        self.records.push(record);
    }

    /// Load every record of a FASTA file
    pub fn from_fasta(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| MsaError::io(path, e))?;
        let set = Self::from_reader(BufReader::new(file))
            .map_err(|e| match e {
                MsaError::Parse(msg) => MsaError::Parse(format!("{}: {}", path.display(), msg)),
                other => other,
            })?;
        info!("Loaded {} sequences from {}", set.len(), path.display());
        Ok(set)
    }

    /// Load FASTA records from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let reader = fasta::Reader::new(reader);
        let mut set = Self::new();

        for record_result in reader.records() {
            let record = record_result
                .map_err(|e| MsaError::Parse(format!("invalid FASTA record: {}", e)))?;
            let header = match record.desc() {
                Some(desc) => format!("{} {}", record.id(), desc),
                None => record.id().to_string(),
            };
            set.push(SequenceRecord::from_header(&header, record.seq())?);
        }
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[SequenceRecord] {
        &self.records
    }

    pub fn ids(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.id.as_str()).collect()
    }

    pub fn sequences(&self) -> Vec<&[u8]> {
        self.records.iter().map(|r| r.sequence.as_slice()).collect()
    }

    /// Look up a record by id
    pub fn get(&self, id: &str) -> Result<&SequenceRecord> {
        self.index
            .get(id)
            .map(|&i| &self.records[i])
            .ok_or_else(|| MsaError::InvalidSequence(format!("no sequence with id '{}'", id)))
    }

    /// Keep records whose id matches `include` (if any) and not `exclude` (if any)
    pub fn filter(&self, include: Option<&Regex>, exclude: Option<&Regex>) -> Self {
        let kept: Vec<SequenceRecord> = self
            .records
            .iter()
            .filter(|r| include.map_or(true, |re| re.is_match(&r.id)))
            .filter(|r| exclude.map_or(true, |re| !re.is_match(&r.id)))
            .cloned()
            .collect();
        if kept.len() != self.records.len() {
            info!(
                "Id filters kept {} of {} sequences",
                kept.len(),
                self.records.len()
            );
        }
        Self::from_records(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FASTA: &str = ">EPI_1 | A/Singapore/1/2017 | H3N2 |2017-05-24\nACGT\nAC\n>EPI_2|B/Victoria|B\nAC-GNN\n>EPI_3\n";

    #[test]
    fn test_from_reader_splits_headers() {
        let set = SequenceSet::from_reader(FASTA.as_bytes()).unwrap();
        assert_eq!(set.len(), 3);
        let first = &set.records()[0];
        assert_eq!(first.id, "EPI_1");
        assert_eq!(
            first.fields,
            vec!["EPI_1", "A/Singapore/1/2017", "H3N2", "2017-05-24"]
        );
        assert_eq!(first.sequence, b"ACGTAC");
        assert_eq!(set.ids(), vec!["EPI_1", "EPI_2", "EPI_3"]);
        assert!(set.get("EPI_3").unwrap().is_empty());
    }

    #[test]
    fn test_missing_id_is_invalid_sequence() {
        let set = SequenceSet::from_reader(FASTA.as_bytes()).unwrap();
        let err = set.get("EPI_9").unwrap_err();
        assert!(matches!(err, MsaError::InvalidSequence(_)));
    }

    #[test]
    fn test_empty_header_id_rejected() {
        let err = SequenceRecord::from_header(" |x", b"ACGT").unwrap_err();
        assert!(matches!(err, MsaError::InvalidSequence(_)));
    }

    #[test]
    fn test_filter_by_regex() {
        let set = SequenceSet::from_reader(FASTA.as_bytes()).unwrap();
        let include = Regex::new("^EPI_[12]$").unwrap();
        let exclude = Regex::new("2").unwrap();
        let kept = set.filter(Some(&include), Some(&exclude));
        assert_eq!(kept.ids(), vec!["EPI_1"]);
        assert!(kept.get("EPI_2").is_err());
    }

    #[test]
    fn test_from_fasta_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FASTA.as_bytes()).unwrap();
        let set = SequenceSet::from_fasta(file.path()).unwrap();
        assert_eq!(set.sequences()[1], b"AC-GNN");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = SequenceSet::from_fasta(Path::new("/nonexistent/input.fasta")).unwrap_err();
        assert!(matches!(err, MsaError::Io { .. }));
    }
}
