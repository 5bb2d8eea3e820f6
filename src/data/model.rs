use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Required columns
// ---------------------------------------------------------------------------

pub const COL_REGION_NAME: &str = "nome_municipio";
pub const COL_REGION_CODE: &str = "uf_sigla";
pub const COL_BUSINESS_COUNT: &str = "Numero_Empresas_Atuantes";
pub const COL_GDP_TOTAL: &str = "pib_total";
pub const COL_POPULATION: &str = "pop_total";

/// Columns every dataset must provide, in the order they are reported.
pub const REQUIRED_COLUMNS: [&str; 5] = [
    COL_REGION_NAME,
    COL_REGION_CODE,
    COL_BUSINESS_COUNT,
    COL_GDP_TOTAL,
    COL_POPULATION,
];

// ---------------------------------------------------------------------------
// CellValue – a single raw cell before it is coerced into a Record field
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// NaN counts as missing, the way Pandas writes it.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(v) => v.is_nan(),
            _ => false,
        }
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one municipality
// ---------------------------------------------------------------------------

/// One row of the dataset: a municipality and its indicators.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub region_name: String,
    /// State (UF) the municipality belongs to.
    pub region_code: String,
    pub business_count: u64,
    pub gdp_total: f64,
    pub population: f64,
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with the pre-computed filter options.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Sorted set of distinct region codes.
    pub region_codes: BTreeSet<String>,
    /// Rows skipped at load time because a required cell was empty.
    pub dropped_rows: usize,
}

impl Dataset {
    /// Build the region index from the loaded records.
    pub fn from_records(records: Vec<Record>, dropped_rows: usize) -> Self {
        let region_codes = records.iter().map(|r| r.region_code.clone()).collect();
        Dataset {
            records,
            region_codes,
            dropped_rows,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
