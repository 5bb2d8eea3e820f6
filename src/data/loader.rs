use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, UInt32Array, UInt64Array,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    COL_BUSINESS_COUNT, COL_GDP_TOTAL, COL_POPULATION, COL_REGION_CODE, COL_REGION_NAME,
    CellValue, Dataset, REQUIRED_COLUMNS, Record,
};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the municipal dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by one municipality per line
/// * `.parquet` – columnar file as written by `df.to_parquet()`
/// * `.json`    – `[{ "nome_municipio": ..., "uf_sigla": ..., ... }, ...]`
///
/// Every required column is checked before any record is built; rows with an
/// empty required cell are dropped and counted in [`Dataset::dropped_rows`].
pub fn load_dataset(path: &Path) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::DataLoad {
            path: path.to_path_buf(),
            reason: "file not found".to_string(),
        });
    }

    let table = read_table(path).map_err(|e| LoadError::data_load(path, e))?;
    let columns = check_schema(&table.columns)?;
    let (records, dropped) =
        build_records(&table, &columns).map_err(|e| LoadError::data_load(path, e))?;

    if dropped > 0 {
        log::warn!(
            "Dropped {dropped} row(s) with empty required values from {}",
            path.display()
        );
    }
    log::info!("Loaded {} records from {}", records.len(), path.display());

    Ok(Dataset::from_records(records, dropped))
}

// ---------------------------------------------------------------------------
// Schema check
// ---------------------------------------------------------------------------

/// Positions of the required columns inside a table header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    pub region_name: usize,
    pub region_code: usize,
    pub business_count: usize,
    pub gdp_total: usize,
    pub population: usize,
}

/// Locate every required column, reporting all missing ones at once.
pub fn check_schema(columns: &[String]) -> Result<ColumnIndex, LoadError> {
    let position = |name: &str| columns.iter().position(|c| c == name);

    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|&name| position(name).is_none())
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let find = |name: &str| position(name).ok_or_else(|| LoadError::Schema {
        missing: vec![name.to_string()],
    });
    Ok(ColumnIndex {
        region_name: find(COL_REGION_NAME)?,
        region_code: find(COL_REGION_CODE)?,
        business_count: find(COL_BUSINESS_COUNT)?,
        gdp_total: find(COL_GDP_TOTAL)?,
        population: find(COL_POPULATION)?,
    })
}

// ---------------------------------------------------------------------------
// Raw table → records
// ---------------------------------------------------------------------------

/// Header plus untyped cells, as read from any of the supported formats.
#[derive(Debug, Default)]
struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

const NULL_CELL: CellValue = CellValue::Null;

fn build_records(table: &RawTable, index: &ColumnIndex) -> Result<(Vec<Record>, usize)> {
    let mut records = Vec::with_capacity(table.rows.len());
    let mut dropped = 0;

    for (i, row) in table.rows.iter().enumerate() {
        let row_no = i + 1;
        let cell = |idx: usize| row.get(idx).unwrap_or(&NULL_CELL);

        let name = text_field(cell(index.region_name));
        let code = text_field(cell(index.region_code));
        let count = count_field(cell(index.business_count), row_no, COL_BUSINESS_COUNT)?;
        let gdp = measure_field(cell(index.gdp_total), row_no, COL_GDP_TOTAL)?;
        let pop = measure_field(cell(index.population), row_no, COL_POPULATION)?;

        match (name, code, count, gdp, pop) {
            (Some(region_name), Some(region_code), Some(business_count), Some(gdp_total), Some(population)) => {
                records.push(Record {
                    region_name,
                    region_code,
                    business_count,
                    gdp_total,
                    population,
                });
            }
            _ => {
                log::debug!("Row {row_no}: empty required value, skipping");
                dropped += 1;
            }
        }
    }

    Ok((records, dropped))
}

/// Any non-null scalar is accepted as text (numeric or boolean names/codes included).
fn text_field(cell: &CellValue) -> Option<String> {
    if cell.is_null() {
        return None;
    }
    let text = match cell {
        CellValue::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

fn count_field(cell: &CellValue, row: usize, col: &str) -> Result<Option<u64>> {
    if cell.is_null() {
        return Ok(None);
    }
    let count = match cell {
        CellValue::Integer(i) => u64::try_from(*i).ok(),
        CellValue::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
            Some(*f as u64)
        }
        CellValue::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    count
        .map(Some)
        .with_context(|| format!("Row {row}, column '{col}': '{cell}' is not a non-negative integer"))
}

fn measure_field(cell: &CellValue, row: usize, col: &str) -> Result<Option<f64>> {
    if cell.is_null() {
        return Ok(None);
    }
    match cell.as_f64() {
        Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => bail!("Row {row}, column '{col}': '{cell}' is not a finite non-negative number"),
    }
}

// ---------------------------------------------------------------------------
// Format dispatch
// ---------------------------------------------------------------------------

fn read_table(path: &Path) -> Result<RawTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => read_csv(path),
        "parquet" | "pq" => read_parquet(path),
        "json" => read_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, one municipality per record.
/// Cell types are inferred; extra columns are carried but never read.
fn read_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;
    let columns: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        rows.push(record.iter().map(guess_cell_type).collect());
    }

    Ok(RawTable { columns, rows })
}

fn guess_cell_type(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() { CellValue::Null } else { CellValue::Float(f) };
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON reader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "nome_municipio": "Santos", "uf_sigla": "SP",
///     "Numero_Empresas_Atuantes": 21000, "pib_total": 2.1e10, "pop_total": 433000 },
///   ...
/// ]
/// ```
fn read_json(path: &Path) -> Result<RawTable> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {} is not a JSON object", i + 1))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Ok(RawTable { columns, rows })
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one municipality per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn read_parquet(path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    // Only required columns are decoded; extra columns may hold any type.
    let required: Vec<bool> = columns
        .iter()
        .map(|c| REQUIRED_COLUMNS.contains(&c.as_str()))
        .collect();

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let decoded = batch
            .columns()
            .iter()
            .zip(&columns)
            .zip(&required)
            .map(|((col, name), &needed)| {
                needed
                    .then(|| normalize_column(col, name))
                    .transpose()
            })
            .collect::<Result<Vec<Option<ArrayRef>>>>()?;

        for row in 0..batch.num_rows() {
            let cells = decoded
                .iter()
                .zip(&columns)
                .map(|(col, name)| match col {
                    Some(col) => extract_cell_value(col, row)
                        .with_context(|| format!("Row {}, column '{name}'", rows.len() + 1)),
                    None => Ok(CellValue::Null),
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(cells);
        }
    }

    Ok(RawTable { columns, rows })
}

/// Cast a column to one of the types [`extract_cell_value`] decodes.
///
/// Dictionary-encoded (pandas categoricals) and view strings become `Utf8`,
/// narrow integers `Int64`, half floats and decimals `Float64`.
fn normalize_column(col: &ArrayRef, name: &str) -> Result<ArrayRef> {
    let target = match col.data_type() {
        DataType::Utf8
        | DataType::LargeUtf8
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt32
        | DataType::UInt64
        | DataType::Float32
        | DataType::Float64
        | DataType::Boolean => return Ok(col.clone()),
        DataType::Dictionary(_, values) => {
            let decoded = cast(col, values)
                .with_context(|| format!("decoding dictionary column '{name}'"))?;
            return normalize_column(&decoded, name);
        }
        DataType::Utf8View => DataType::Utf8,
        DataType::Int8 | DataType::Int16 | DataType::UInt8 | DataType::UInt16 => DataType::Int64,
        DataType::Float16 | DataType::Decimal128(_, _) | DataType::Decimal256(_, _) => {
            DataType::Float64
        }
        other => bail!("column '{name}' has unsupported type {other:?}"),
    };
    cast(col, &target).with_context(|| format!("casting column '{name}' to {target:?}"))
}

fn downcast<A: Array + 'static>(col: &ArrayRef) -> Result<&A> {
    col.as_any()
        .downcast_ref::<A>()
        .with_context(|| format!("unexpected array layout for {:?}", col.data_type()))
}

/// Extract a single cell from a normalised Arrow column at a given row.
fn extract_cell_value(col: &ArrayRef, row: usize) -> Result<CellValue> {
    if col.is_null(row) {
        return Ok(CellValue::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => CellValue::String(downcast::<StringArray>(col)?.value(row).to_string()),
        DataType::LargeUtf8 => {
            CellValue::String(downcast::<LargeStringArray>(col)?.value(row).to_string())
        }
        DataType::Int32 => CellValue::Integer(downcast::<Int32Array>(col)?.value(row) as i64),
        DataType::Int64 => CellValue::Integer(downcast::<Int64Array>(col)?.value(row)),
        DataType::UInt32 => CellValue::Integer(downcast::<UInt32Array>(col)?.value(row) as i64),
        DataType::UInt64 => {
            let v = downcast::<UInt64Array>(col)?.value(row);
            i64::try_from(v).map_or(CellValue::Float(v as f64), CellValue::Integer)
        }
        DataType::Float32 => CellValue::Float(downcast::<Float32Array>(col)?.value(row) as f64),
        DataType::Float64 => CellValue::Float(downcast::<Float64Array>(col)?.value(row)),
        DataType::Boolean => CellValue::Bool(downcast::<BooleanArray>(col)?.value(row)),
        other => bail!("unsupported type {other:?}"),
    };
    Ok(value)
}
