// CSV import/export - "name,label,value" header followed by quoted rows

use ::csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use super::TransferError;
use crate::tokens::{ImportRequest, Token, TokenMap};

/// Header line written before the rows
pub const CSV_HEADER: &str = "name,label,value";

/// Serialize the mapping as CSV, in store order.
///
/// Every field is double-quoted with embedded quotes doubled; rows end in `\n`.
pub fn export_csv(tokens: &TokenMap) -> Result<String, TransferError> {
    let mut out = format!("{}\n", CSV_HEADER).into_bytes();
    {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Always)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut out);

        for (name, data) in tokens {
            writer
                .write_record([name.as_str(), data.label.as_str(), data.value.as_str()])
                .map_err(|e| TransferError::Encode(e.to_string()))?;
        }
        writer.flush().map_err(|e| TransferError::Encode(e.to_string()))?;
    }

    String::from_utf8(out).map_err(|e| TransferError::Encode(e.to_string()))
}

/// Parse CSV rows into tokens.
///
/// A first row whose first column contains "name" (any case) is taken as a
/// header and skipped. Rows with fewer than two columns or an empty name are
/// dropped; a missing third column means an empty value.
pub fn parse_csv(text: &str) -> Result<Vec<Token>, TransferError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut tokens = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| TransferError::Csv(e.to_string()))?;
        if index == 0 && is_header(&record) {
            continue;
        }
        match token_from_record(&record) {
            Some(token) => tokens.push(token),
            None => crate::trace!("Dropping CSV row {}", index + 1),
        }
    }
    Ok(tokens)
}

/// Parse a CSV upload into an import request
pub fn parse_import_csv(text: &str, replace_existing: bool) -> Result<ImportRequest, TransferError> {
    Ok(ImportRequest {
        tokens: parse_csv(text)?,
        replace_existing,
    })
}

fn is_header(record: &StringRecord) -> bool {
    record
        .get(0)
        .is_some_and(|first| first.to_lowercase().contains("name"))
}

fn token_from_record(record: &StringRecord) -> Option<Token> {
    if record.len() < 2 {
        return None;
    }
    let name = record.get(0)?.trim();
    if name.is_empty() {
        return None;
    }
    Some(Token::new(
        name,
        record.get(1).unwrap_or_default(),
        record.get(2).unwrap_or_default(),
    ))
}

#[cfg(test)]
#[path = "csv_test.rs"]
mod tests;
