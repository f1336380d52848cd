use crate::apollo_client::ApolloClient;
use crate::credits::CreditUsage;
use crate::errors::{AppError, ResultExt};
use crate::lookup::lookup_person;
use crate::models::{OutputFormat, OutputRecord, OUTPUT_FIELDNAMES};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_LINKEDIN_COLUMN: &str = "linkedin_url";
const PROGRESS_EVERY: usize = 10;
const JSON_INDENT: &[u8] = b"    ";

/// Summary of a completed batch run.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub rows_processed: usize,
    pub output_path: PathBuf,
    pub format: OutputFormat,
}

/// Enriches every row of `input_path` and writes the results to `output_path`.
///
/// The input must exist and carry `linkedin_column` in its header; otherwise
/// nothing is looked up and nothing is written. Rows are processed one at a
/// time in file order and each yields exactly one output record.
///
/// The output format is resolved only once all rows are done. An unknown
/// format discards the collected results without creating the output file.
///
/// Credits are accumulated into the caller's `credits`, so spending stays
/// visible when the write step fails.
pub async fn process_csv(
    client: &ApolloClient,
    input_path: &Path,
    output_path: &Path,
    output_format: &str,
    linkedin_column: &str,
    credits: &mut CreditUsage,
) -> Result<BatchReport, AppError> {
    if !input_path.exists() {
        return Err(AppError::InputNotFound(input_path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(input_path)
        .with_context(|| format!("Failed to open {}", input_path.display()))?;

    let column_idx = reader
        .headers()?
        .iter()
        .position(|h| h == linkedin_column)
        .ok_or_else(|| AppError::MissingColumn(linkedin_column.to_string()))?;

    tracing::info!(
        "Processing {} (column '{}')",
        input_path.display(),
        linkedin_column
    );

    let mut results: Vec<OutputRecord> = Vec::new();

    for (i, row) in reader.records().enumerate() {
        let record = match row {
            Ok(row) => lookup_person(client, row.get(column_idx), credits).await,
            Err(e) => {
                tracing::warn!("Skipping unreadable row {}: {}", i + 1, e);
                OutputRecord::failed(None, format!("Unreadable input row: {}", e))
            }
        };
        results.push(record);

        if (i + 1) % PROGRESS_EVERY == 0 {
            tracing::info!("Processed {} rows...", i + 1);
        }
    }

    tracing::info!(
        "Looked up {} rows ({} match / {} enrich calls)",
        results.len(),
        credits.match_credits,
        credits.enrich_credits
    );

    let format: OutputFormat = output_format.parse()?;
    write_output(&results, output_path, format)?;
    tracing::info!("{} saved: {}", format, output_path.display());

    Ok(BatchReport {
        rows_processed: results.len(),
        output_path: output_path.to_path_buf(),
        format,
    })
}

/// Serializes records to `path` in the given format.
pub fn write_output(
    records: &[OutputRecord],
    path: &Path,
    format: OutputFormat,
) -> Result<(), AppError> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    match format {
        OutputFormat::Csv => write_csv(records, file),
        OutputFormat::Json => write_json(records, file),
    }
}

/// Header row from [`OUTPUT_FIELDNAMES`], nulls written as empty cells.
pub fn write_csv<W: Write>(records: &[OutputRecord], writer: W) -> Result<(), AppError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_FIELDNAMES)?;
    for record in records {
        csv_writer.write_record(record.fields().iter().map(|f| f.unwrap_or("")))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Array of flat objects indented by four spaces, nulls kept as JSON `null`.
pub fn write_json<W: Write>(records: &[OutputRecord], writer: W) -> Result<(), AppError> {
    let mut writer = BufWriter::new(writer);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    records.serialize(&mut serializer)?;
    writer.flush()?;
    Ok(())
}
