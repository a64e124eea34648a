use super::error::CsvSourceError;
use super::layout;

/// Splits one CSV record, honoring double quotes and `""` escapes.
///
/// # Examples
/// ```
/// use dxlshark_core::source::csv::reader::split_record;
///
/// let fields = split_record(r#""Async Serial","data",0.5,"0xFF",""#);
/// assert_eq!(fields, vec!["Async Serial", "data", "0.5", "0xFF", ""]);
/// ```
pub fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            layout::QUOTE if quoted && chars.peek() == Some(&layout::QUOTE) => {
                field.push(layout::QUOTE);
                chars.next();
            }
            layout::QUOTE => quoted = !quoted,
            layout::FIELD_SEPARATOR if !quoted => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Parses a byte written as `0xFF`, `255`, or a quoted character `'X'`.
pub fn parse_byte(field: &str) -> Option<u8> {
    let field = field.trim();
    if let Some(hex) = field.strip_prefix("0x").or_else(|| field.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).ok();
    }
    if let Some(inner) = field.strip_prefix('\'').and_then(|rest| rest.strip_suffix('\'')) {
        let mut chars = inner.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        return u8::try_from(u32::from(c)).ok();
    }
    field.parse::<u8>().ok()
}

pub fn parse_seconds(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

/// How each time/data column is found in a header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub start: usize,
    pub timing: Timing,
    pub data: usize,
    pub kind: Option<usize>,
    pub error: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timing {
    Duration(usize),
    End(usize),
}

impl Columns {
    pub fn from_header(fields: &[String]) -> Result<Self, CsvSourceError> {
        let start = require(fields, layout::START_TIME_COLUMNS, "start_time")?;
        let data = require(fields, layout::DATA_COLUMNS, "data")?;
        let timing = match find(fields, layout::DURATION_COLUMNS) {
            Some(index) => Timing::Duration(index),
            None => Timing::End(require(fields, layout::END_TIME_COLUMNS, "duration or end_time")?),
        };
        Ok(Self {
            start,
            timing,
            data,
            kind: find(fields, layout::TYPE_COLUMNS),
            error: find(fields, layout::ERROR_COLUMNS),
        })
    }
}

fn find(fields: &[String], names: &[&str]) -> Option<usize> {
    fields.iter().position(|field| {
        let field = field.trim();
        names.iter().any(|name| field.eq_ignore_ascii_case(name))
    })
}

fn require(fields: &[String], names: &[&str], label: &str) -> Result<usize, CsvSourceError> {
    find(fields, names).ok_or_else(|| CsvSourceError::Header {
        message: format!("missing {label} column"),
    })
}
