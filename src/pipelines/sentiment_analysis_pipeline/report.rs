use std::io::Write;

use serde::Serialize;

use super::sentiment::{Prediction, Sentiment};
use super::table::ReviewTable;
use crate::models::Label;

/// Header of the sentiment column in the CSV export.
pub const SENTIMENT_COLUMN: &str = "Sentimiento";
/// Header of the cleaned text column in the annotated export.
pub const CLEANED_COLUMN: &str = "reseña_limpia";
/// Header of the raw label column in the annotated export.
pub const LABEL_COLUMN: &str = "Predicción";
/// Suggested file name for the CSV export.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "resultados_reseñas.csv";

/// Aggregate counts over one analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total: usize,
    /// Rows labelled `1`.
    pub positives: usize,
    /// Rows labelled `0`.
    pub negatives: usize,
    /// Rows whose label is neither `0` nor `1`. They are shown as negative
    /// but not counted in `negatives`.
    pub unrecognized: usize,
}

impl ReportSummary {
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        labels
            .into_iter()
            .fold(ReportSummary::default(), |mut summary, label| {
                summary.total += 1;
                if label.is_positive() {
                    summary.positives += 1;
                } else if label.is_negative() {
                    summary.negatives += 1;
                } else {
                    summary.unrecognized += 1;
                }
                summary
            })
    }
}

/// One scored review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewRow<'a> {
    pub index: usize,
    /// The cell value as uploaded.
    pub text: &'a str,
    pub cleaned: &'a str,
    pub label: Label,
    pub sentiment: Sentiment,
}

/// The uploaded table augmented with one prediction per row.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    table: ReviewTable,
    column: String,
    column_index: usize,
    cleaned: Vec<String>,
    predictions: Vec<Prediction>,
    summary: ReportSummary,
}

impl AnalysisReport {
    pub(crate) fn new(
        table: ReviewTable,
        column: String,
        column_index: usize,
        cleaned: Vec<String>,
        predictions: Vec<Prediction>,
    ) -> Self {
        debug_assert_eq!(table.len(), predictions.len());
        debug_assert_eq!(table.len(), cleaned.len());
        let summary = ReportSummary::from_labels(predictions.iter().map(|p| p.label));
        Self {
            table,
            column,
            column_index,
            cleaned,
            predictions,
            summary,
        }
    }

    /// Name of the analysed text column.
    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn table(&self) -> &ReviewTable {
        &self.table
    }

    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn summary(&self) -> ReportSummary {
        self.summary
    }

    pub fn total(&self) -> usize {
        self.summary.total
    }

    pub fn positives(&self) -> usize {
        self.summary.positives
    }

    pub fn negatives(&self) -> usize {
        self.summary.negatives
    }

    pub fn unrecognized(&self) -> usize {
        self.summary.unrecognized
    }

    /// Scored rows in upload order.
    pub fn rows(&self) -> impl Iterator<Item = ReviewRow<'_>> + '_ {
        self.table
            .rows()
            .iter()
            .zip(&self.cleaned)
            .zip(&self.predictions)
            .enumerate()
            .map(|(index, ((row, cleaned), prediction))| ReviewRow {
                index,
                text: &row[self.column_index],
                cleaned,
                label: prediction.label,
                sentiment: prediction.sentiment,
            })
    }

    /// Write the two-column export: the analysed column and `Sentimiento`.
    pub fn write_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv_writer(writer);
        wtr.write_record([self.column.as_str(), SENTIMENT_COLUMN])?;
        for row in self.rows() {
            wtr.write_record([row.text, row.sentiment.tag()])?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// The two-column export as UTF-8 bytes.
    pub fn to_csv_bytes(&self) -> anyhow::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Write every uploaded column plus the cleaned text, raw label and
    /// sentiment tag.
    pub fn write_annotated_csv<W: Write>(&self, writer: W) -> anyhow::Result<()> {
        let mut wtr = csv_writer(writer);
        let header = self
            .table
            .columns()
            .iter()
            .map(String::as_str)
            .chain([CLEANED_COLUMN, LABEL_COLUMN, SENTIMENT_COLUMN]);
        wtr.write_record(header)?;

        for (row, scored) in self.table.rows().iter().zip(self.rows()) {
            let label = scored.label.to_string();
            let record = row
                .iter()
                .map(String::as_str)
                .chain([scored.cleaned, label.as_str(), scored.sentiment.tag()]);
            wtr.write_record(record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

fn csv_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer)
}
