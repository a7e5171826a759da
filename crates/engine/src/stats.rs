use std::path::{Path, PathBuf};

use crate::{
    classifier::{self, ClassifiedLine},
    table::CountTable,
};

/// Line counts recorded for one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTally {
    pub path: PathBuf,
    /// Raw lines read, classified or not.
    pub lines: usize,
    pub db_queries: usize,
}

/// Classification results of a single file, not yet merged into a batch.
///
/// Partials are independent of each other, so files can be tallied on
/// separate threads and merged afterwards by one owner.
#[derive(Debug, Clone)]
pub struct FilePartial {
    pub path: PathBuf,
    pub table: CountTable,
    pub lines: usize,
    pub db_queries: usize,
}

impl FilePartial {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: CountTable::new(),
            lines: 0,
            db_queries: 0,
        }
    }

    /// Tally every line of `lines` in order.
    pub fn from_lines<I, S>(path: impl Into<PathBuf>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut partial = Self::new(path);
        for line in lines {
            partial.push_line(line.as_ref());
        }
        partial
    }

    /// Count one raw line and fold its classification, if any.
    pub fn push_line(&mut self, line: &str) {
        self.lines += 1;
        if let Some(classified) = classifier::classify(line) {
            self.push_classified(&classified);
        }
    }

    fn push_classified(&mut self, classified: &ClassifiedLine) {
        self.table.increment(&classified.route, classified.severity);
        if classified.is_db_query {
            self.db_queries += 1;
        }
    }
}

/// Accumulated results of a batch run.
///
/// A fresh state is empty; every ingested file adds its classified lines to
/// the shared table and appends one entry to the per-file list.
#[derive(Debug, Clone, Default)]
pub struct AggregateState {
    table: CountTable,
    files: Vec<FileTally>,
    db_queries: usize,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` until the first file has been ingested.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Classify and count one file's lines.
    ///
    /// Returns `(lines, db_queries)` for this file.
    pub fn ingest_file<I, S>(&mut self, path: impl Into<PathBuf>, lines: I) -> (usize, usize)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.merge_partial(FilePartial::from_lines(path, lines))
    }

    /// Merge a file tallied elsewhere.
    ///
    /// Returns `(lines, db_queries)` for this file.
    pub fn merge_partial(&mut self, partial: FilePartial) -> (usize, usize) {
        let FilePartial {
            path,
            table,
            lines,
            db_queries,
        } = partial;

        self.table.merge(&table);
        self.db_queries += db_queries;
        self.files.push(FileTally {
            path,
            lines,
            db_queries,
        });
        (lines, db_queries)
    }

    #[inline]
    pub fn table(&self) -> &CountTable {
        &self.table
    }

    /// Per-file tallies in processing order.
    #[inline]
    pub fn files(&self) -> &[FileTally] {
        &self.files
    }

    pub fn file_line_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.files.iter().map(|f| f.lines)
    }

    /// Raw lines read across all files.
    pub fn total_lines(&self) -> usize {
        self.file_line_counts().sum()
    }

    /// Lines that produced a classification.
    pub fn classified_lines(&self) -> usize {
        self.table.total()
    }

    #[inline]
    pub fn db_queries(&self) -> usize {
        self.db_queries
    }

    pub fn file(&self, path: &Path) -> Option<&FileTally> {
        self.files.iter().find(|f| f.path == path)
    }
}
