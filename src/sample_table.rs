//! Semicolon-separated sample tables.
//!
//! ```text
//! temperature;pressure;flow
//! 21.5;1.013;0.4
//! 21.7;1.011;0.5;
//! ```
//!
//! The first physical line names the features, even when it is blank, and
//! every following non-blank line is one observation. Fields are trimmed,
//! empty fields are skipped (so trailing separators are harmless). A header
//! whose width differs from the data is replaced by the names `"1".."N"`.

use crate::errors::{AnomalyDetectionError, AnomalyResult};
use crate::model::{synthetic_feature_names, transpose_samples};
use std::fs::File;
use std::io::Read;
use std::path::Path;

const SEPARATOR: char = ';';

/// Feature names plus observation rows of equal width.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleTable {
    /// Feature name per column
    pub features: Vec<String>,
    /// One vector per observation, in file order
    pub samples: Vec<Vec<f64>>,
}

impl SampleTable {
    /// Parses a table whose first line is a header.
    ///
    /// # Example
    /// ```rust
    /// use wavelet_anomaly::SampleTable;
    ///
    /// let table = SampleTable::parse("a;b\n1;2\n3;4;\n").unwrap();
    /// assert_eq!(table.features, vec!["a", "b"]);
    /// assert_eq!(table.samples, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    /// ```
    pub fn parse(text: &str) -> AnomalyResult<Self> {
        let mut lines = text.lines();
        let header: Vec<String> = match lines.next() {
            Some(line) => fields(line).map(str::to_string).collect(),
            None => {
                return Err(AnomalyDetectionError::EmptyInput {
                    context: "sample table".to_string(),
                })
            }
        };

        let samples = parse_rows(numbered_lines(lines, 2))?;
        let width = samples[0].len();
        let features = if header.len() == width {
            header
        } else {
            log::warn!(
                "header has {} names for {} columns, using ordinal feature names",
                header.len(),
                width
            );
            synthetic_feature_names(width)
        };

        Ok(Self { features, samples })
    }

    /// Parses a table without a header; every line is an observation.
    pub fn parse_unlabeled(text: &str) -> AnomalyResult<Self> {
        let samples = parse_rows(numbered_lines(text.lines(), 1))?;
        let features = synthetic_feature_names(samples[0].len());
        Ok(Self { features, samples })
    }

    /// Reads a labeled table from `reader`.
    pub fn from_reader<R: Read>(mut reader: R) -> AnomalyResult<Self> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|e| AnomalyDetectionError::io("read sample table", e))?;
        Self::parse(&text)
    }

    /// Reads a labeled table from the file at `path`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> AnomalyResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AnomalyDetectionError::io(format!("open sample table {}", path.display()), e)
        })?;
        Self::from_reader(file)
    }

    /// Number of feature columns.
    pub fn width(&self) -> usize {
        self.features.len()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the table holds no observations. Parsed tables never are.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// One sequence per feature, in column order.
    pub fn columns(&self) -> AnomalyResult<Vec<Vec<f64>>> {
        transpose_samples(&self.samples)
    }
}

/// Non-blank lines numbered from `first_line`.
fn numbered_lines<'a, I>(lines: I, first_line: usize) -> impl Iterator<Item = (usize, &'a str)>
where
    I: Iterator<Item = &'a str>,
{
    lines
        .enumerate()
        .map(move |(index, line)| (index + first_line, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(SEPARATOR)
        .map(str::trim)
        .filter(|field| !field.is_empty())
}

fn parse_rows<'a, I>(lines: I) -> AnomalyResult<Vec<Vec<f64>>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut samples: Vec<Vec<f64>> = Vec::new();

    for (line_number, line) in lines {
        let row = fields(line)
            .map(|field| {
                field.parse::<f64>().map_err(|e| AnomalyDetectionError::ParseError {
                    line: line_number,
                    reason: format!("'{}' is not a number: {}", field, e),
                })
            })
            .collect::<AnomalyResult<Vec<f64>>>()?;

        if let Some(first) = samples.first() {
            if row.len() != first.len() {
                return Err(AnomalyDetectionError::DimensionMismatch {
                    context: format!("width of line {}", line_number),
                    expected: first.len(),
                    actual: row.len(),
                });
            }
        } else if row.is_empty() {
            return Err(AnomalyDetectionError::ParseError {
                line: line_number,
                reason: "row has no values".to_string(),
            });
        }

        samples.push(row);
    }

    if samples.is_empty() {
        return Err(AnomalyDetectionError::EmptyInput {
            context: "sample table rows".to_string(),
        });
    }

    Ok(samples)
}
