use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use thiserror::Error;

use super::model::{SalaryDataset, SalaryRecord};

/// Column names expected in the source file. The upstream cleaning stage
/// exports Portuguese headers.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "tamanho_empresa",
    "cargo",
    "usd",
    "remoto",
    "residencia_iso3",
];

/// Precondition violations in the source dataset. All of these are fatal at
/// load time; the pipeline itself never sees a malformed dataset.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),
    #[error("row {row}: salary must be a finite non-negative number, got {value}")]
    InvalidSalary { row: usize, value: f64 },
    #[error("dataset contains no rows")]
    Empty,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a salary dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the [`REQUIRED_COLUMNS`] names (primary)
/// * `.json`    – records orientation, `[{ "ano": 2023, ... }, ...]`
/// * `.parquet` – flat columns matching [`REQUIRED_COLUMNS`]
pub fn load_file(path: &Path) -> Result<SalaryDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Validate the loaded rows and build the dataset index.
fn build_dataset(records: Vec<SalaryRecord>) -> Result<SalaryDataset> {
    if records.is_empty() {
        return Err(SchemaError::Empty.into());
    }
    for (row, r) in records.iter().enumerate() {
        if !r.salary_usd.is_finite() || r.salary_usd < 0.0 {
            return Err(SchemaError::InvalidSalary {
                row,
                value: r.salary_usd,
            }
            .into());
        }
    }
    Ok(SalaryDataset::from_records(records))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

fn read_csv<R: std::io::Read>(input: R) -> Result<SalaryDataset> {
    let mut reader = csv::Reader::from_reader(input);

    let headers = reader.headers().context("reading CSV headers")?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(SchemaError::MissingColumn(col.to_string()).into());
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<SalaryRecord>().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }
    build_dataset(records)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   {
///     "ano": 2023,
///     "senioridade": "senior",
///     "contrato": "integral",
///     "tamanho_empresa": "media",
///     "cargo": "Data Scientist",
///     "usd": 120000.0,
///     "remoto": "remoto",
///     "residencia_iso3": "USA"
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SalaryDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<SalaryDataset> {
    let records: Vec<SalaryRecord> =
        serde_json::from_str(text).context("parsing JSON records")?;
    build_dataset(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per [`REQUIRED_COLUMNS`] entry.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`): integers may arrive as Int32 or Int64
/// and salaries as any numeric type.
fn load_parquet(path: &Path) -> Result<SalaryDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let col_index = |name: &str| -> Result<usize, SchemaError> {
            schema
                .index_of(name)
                .map_err(|_| SchemaError::MissingColumn(name.to_string()))
        };

        let ano = batch.column(col_index("ano")?);
        let senioridade = batch.column(col_index("senioridade")?);
        let contrato = batch.column(col_index("contrato")?);
        let tamanho = batch.column(col_index("tamanho_empresa")?);
        let cargo = batch.column(col_index("cargo")?);
        let usd = batch.column(col_index("usd")?);
        let remoto = batch.column(col_index("remoto")?);
        let residencia = batch.column(col_index("residencia_iso3")?);

        for row in 0..batch.num_rows() {
            records.push(SalaryRecord {
                year: int_value(ano, row).with_context(|| format!("row {row}: reading 'ano'"))?,
                seniority: string_value(senioridade, row)
                    .with_context(|| format!("row {row}: reading 'senioridade'"))?,
                contract: string_value(contrato, row)
                    .with_context(|| format!("row {row}: reading 'contrato'"))?,
                company_size: string_value(tamanho, row)
                    .with_context(|| format!("row {row}: reading 'tamanho_empresa'"))?,
                role: string_value(cargo, row)
                    .with_context(|| format!("row {row}: reading 'cargo'"))?,
                salary_usd: float_value(usd, row)
                    .with_context(|| format!("row {row}: reading 'usd'"))?,
                remote: string_value(remoto, row)
                    .with_context(|| format!("row {row}: reading 'remoto'"))?,
                country: string_value(residencia, row)
                    .with_context(|| format!("row {row}: reading 'residencia_iso3'"))?,
            });
        }
    }

    build_dataset(records)
}

// -- Arrow helpers --

fn int_value(col: &ArrayRef, row: usize) -> Result<i32> {
    if col.is_null(row) {
        bail!("null value in integer column");
    }
    match col.data_type() {
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row))
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as i32)
        }
        other => bail!("expected an integer column, got {other:?}"),
    }
}

fn float_value(col: &ArrayRef, row: usize) -> Result<f64> {
    if col.is_null(row) {
        bail!("null value in numeric column");
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.value(row))
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.value(row) as f64)
        }
        other => bail!("expected a numeric column, got {other:?}"),
    }
}

fn string_value(col: &ArrayRef, row: usize) -> Result<String> {
    if col.is_null(row) {
        bail!("null value in string column");
    }
    match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            Ok(arr.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let arr = col.as_string::<i64>();
            Ok(arr.value(row).to_string())
        }
        other => bail!("expected a string column, got {other:?}"),
    }
}
