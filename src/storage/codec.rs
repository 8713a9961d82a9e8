//! Line format for the transaction file
//!
//! One record per line:
//!
//! ```text
//! <yyyy-MM-dd>,<Income|Expense>,<category>,<amount, 2 decimals>,<description>
//! ```
//!
//! Fields are only quoted when they contain a comma or a double quote, so
//! ordinary records stay byte-identical to the plain comma format. A record
//! never spans more than one physical line: fields with line breaks are
//! refused on write, and each line is parsed on its own on read.

use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{parse_date, Money, Transaction, TransactionKind, DATE_FORMAT};

/// Number of fields in every record
pub const FIELD_COUNT: usize = 5;

const FIELD_NAMES: [&str; FIELD_COUNT] = ["date", "type", "category", "amount", "description"];

#[cfg(windows)]
const LINE_TERMINATOR: Terminator = Terminator::CRLF;

#[cfg(not(windows))]
const LINE_TERMINATOR: Terminator = Terminator::Any(b'\n');

/// Serialize transactions, one line each, in the given order
///
/// # Errors
///
/// Returns `Validation` if any field contains a line break.
pub fn encode<'a, I>(transactions: I) -> LedgerResult<Vec<u8>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .quote_style(QuoteStyle::Necessary)
        .terminator(LINE_TERMINATOR)
        .from_writer(Vec::new());

    for txn in transactions {
        let fields = record_fields(txn);
        if let Some(name) = fields
            .iter()
            .zip(FIELD_NAMES)
            .find_map(|(field, name)| field.contains(['\r', '\n']).then_some(name))
        {
            return Err(LedgerError::Validation(format!(
                "{} cannot contain a line break",
                name
            )));
        }

        writer
            .write_record(fields)
            .map_err(|e| LedgerError::Persistence(format!("Failed to encode record: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| LedgerError::Persistence(format!("Failed to encode records: {}", e)))
}

fn record_fields(txn: &Transaction) -> [String; FIELD_COUNT] {
    [
        txn.date().format(DATE_FORMAT).to_string(),
        txn.kind().to_string(),
        txn.category().to_string(),
        txn.amount().to_plain(),
        txn.description().to_string(),
    ]
}

/// Parse every line in `input`
///
/// Each element is either a transaction or the error for that line, so the
/// caller decides whether one bad line sinks the whole load. Empty lines are
/// skipped but still counted, so reported line numbers match the file.
pub fn decode(input: &[u8]) -> Vec<LedgerResult<Transaction>> {
    input
        .split(|&b| b == b'\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
            if raw.is_empty() {
                return None;
            }

            let line = idx + 1;
            Some(match std::str::from_utf8(raw) {
                Ok(text) => parse_line(text, line),
                Err(err) => Err(LedgerError::corrupt(
                    line,
                    String::from_utf8_lossy(raw),
                    format!("invalid UTF-8: {}", err),
                )),
            })
        })
        .collect()
}

/// Parse the record on one physical line (1-based `line`)
pub fn parse_line(text: &str, line: usize) -> LedgerResult<Transaction> {
    let corrupt = |reason: String| LedgerError::corrupt(line, text, reason);

    check_quoting(text).map_err(corrupt)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut record = StringRecord::new();
    match reader.read_record(&mut record) {
        Ok(true) => {}
        Ok(false) => return Err(corrupt("empty record".to_string())),
        Err(err) => return Err(corrupt(err.to_string())),
    }

    if record.len() != FIELD_COUNT {
        return Err(corrupt(format!(
            "expected {} fields, found {}",
            FIELD_COUNT,
            record.len()
        )));
    }

    let date = parse_date(&record[0]).map_err(|e| corrupt(e.to_string()))?;
    let kind: TransactionKind = record[1].parse().map_err(|e| corrupt(format!("{}", e)))?;
    let amount = Money::parse_amount(&record[3]).map_err(|e| corrupt(e.to_string()))?;

    Ok(Transaction::new(date, kind, &record[2], amount, &record[4]))
}

/// Reject quoting the csv reader would otherwise repair silently
///
/// A field that opens with `"` must close it right before the next comma or
/// the end of the line. Quotes inside an unquoted field are plain text.
fn check_quoting(text: &str) -> Result<(), String> {
    if text.contains('\r') {
        return Err("stray carriage return".to_string());
    }

    let mut chars = text.chars().peekable();
    let mut field = 1;
    loop {
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    None => return Err(format!("unterminated quote in field {}", field)),
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                    }
                    Some('"') => break,
                    Some(_) => {}
                }
            }
            match chars.next() {
                None => return Ok(()),
                Some(',') => {}
                Some(_) => {
                    return Err(format!("text after closing quote in field {}", field));
                }
            }
        } else {
            loop {
                match chars.next() {
                    None => return Ok(()),
                    Some(',') => break,
                    Some(_) => {}
                }
            }
        }
        field += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(desc: &str) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            TransactionKind::Expense,
            "Food",
            Money::from_cents(4250),
            desc,
        )
    }

    fn decode_str(input: &str) -> Vec<LedgerResult<Transaction>> {
        decode(input.as_bytes())
    }

    fn line_ending() -> &'static str {
        if cfg!(windows) {
            "\r\n"
        } else {
            "\n"
        }
    }

    #[test]
    fn test_encode_plain_record() {
        let bytes = encode(&[txn("Grocery run")]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            format!("2024-03-15,Expense,Food,42.50,Grocery run{}", line_ending())
        );
    }

    #[test]
    fn test_encode_quotes_description_with_comma() {
        let bytes = encode(&[txn("milk, eggs")]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            format!("2024-03-15,Expense,Food,42.50,\"milk, eggs\"{}", line_ending())
        );
    }

    #[test]
    fn test_round_trip_with_awkward_descriptions() {
        let originals = vec![
            txn("Grocery run"),
            txn(""),
            txn("milk, eggs, bread"),
            txn("the \"good\" coffee"),
            txn("\"quoted\" start"),
        ];
        let bytes = encode(&originals).unwrap();
        assert_eq!(String::from_utf8_lossy(&bytes).lines().count(), originals.len());
        let decoded: Vec<Transaction> = decode(bytes.as_slice())
            .into_iter()
            .collect::<LedgerResult<_>>()
            .unwrap();
        assert_eq!(decoded, originals);
    }

    #[test]
    fn test_decode_legacy_line() {
        let results = decode_str("2024-01-10,Income,Salary,1000.00,January pay\n");
        assert_eq!(results.len(), 1);
        let t = results[0].as_ref().unwrap();
        assert_eq!(t.kind(), TransactionKind::Income);
        assert_eq!(t.category(), "Salary");
        assert_eq!(t.amount(), Money::from_cents(100000));
        assert_eq!(t.description(), "January pay");
    }

    #[test]
    fn test_decode_accepts_crlf() {
        let results = decode_str("2024-01-10,Income,Salary,1.00,a\r\n2024-01-11,Expense,Food,2.00,b\r\n");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));
        assert_eq!(results[1].as_ref().unwrap().description(), "b");
    }

    #[test]
    fn test_decode_too_few_fields() {
        let results = decode_str("2024-01-10,Income,Salary,1.00,ok\n2024-01-10,Income,Salary\n");
        assert!(results[0].is_ok());
        match results[1].as_ref().unwrap_err() {
            LedgerError::CorruptData {
                line,
                content,
                reason,
            } => {
                assert_eq!(*line, 2);
                assert_eq!(content, "2024-01-10,Income,Salary");
                assert_eq!(reason, "expected 5 fields, found 3");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_decode_unescaped_comma_is_corrupt() {
        let results = decode_str("2024-01-10,Expense,Food,5.00,milk, eggs\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(err.is_corrupt_data());
        assert!(err.to_string().contains("expected 5 fields, found 6"));
    }

    #[test]
    fn test_decode_bad_amount() {
        let results = decode_str("2024-01-10,Expense,Food,lots,Dinner\n");
        let err = results[0].as_ref().unwrap_err();
        assert!(err.is_corrupt_data());
        assert!(err.to_string().contains("2024-01-10,Expense,Food,lots,Dinner"));
    }

    #[test]
    fn test_decode_bad_date_and_kind() {
        let results = decode_str("2024/01/10,Expense,Food,1.00,x\n2024-01-10,Refund,Food,1.00,x\n");
        assert!(results[0].as_ref().unwrap_err().is_corrupt_data());
        let err = results[1].as_ref().unwrap_err();
        assert!(err.to_string().contains("unknown transaction type 'Refund'"));
    }

    #[test]
    fn test_decode_negative_amount_is_corrupt() {
        let results = decode_str("2024-01-10,Expense,Food,-1.00,x\n");
        assert!(results[0].as_ref().unwrap_err().is_corrupt_data());
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(decode_str("").is_empty());
    }

    #[test]
    fn test_encode_rejects_line_breaks() {
        let err = encode(&[txn("Grocery run"), txn("two\nlines")]).unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert!(err.to_string().contains("description cannot contain a line break"));

        assert!(encode(&[txn("carriage\rreturn")]).is_err());
    }

    #[test]
    fn test_unterminated_quote_does_not_swallow_later_lines() {
        let results = decode_str(concat!(
            "2024-03-01,Expense,Food,10.00,\"12 inch sub\n",
            "2024-03-02,Expense,Rent,500.00,March rent\n",
            "2024-03-03,Income,Salary,900.00,Pay\n",
        ));
        assert_eq!(results.len(), 3);

        match results[0].as_ref().unwrap_err() {
            LedgerError::CorruptData {
                line,
                content,
                reason,
            } => {
                assert_eq!(*line, 1);
                assert_eq!(content, "2024-03-01,Expense,Food,10.00,\"12 inch sub");
                assert_eq!(reason, "unterminated quote in field 5");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(results[1].as_ref().unwrap().description(), "March rent");
        assert_eq!(results[2].as_ref().unwrap().category(), "Salary");
    }

    #[test]
    fn test_partly_quoted_field_is_corrupt() {
        let results = decode_str("2024-03-01,Expense,Food,10.00,\"Best\" pizza\n");
        match results[0].as_ref().unwrap_err() {
            LedgerError::CorruptData {
                content, reason, ..
            } => {
                assert_eq!(content, "2024-03-01,Expense,Food,10.00,\"Best\" pizza");
                assert_eq!(reason, "text after closing quote in field 5");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_inner_quotes_in_plain_field_are_text() {
        let results = decode_str("2024-03-01,Expense,Food,10.00,a 12\" sub\n");
        assert_eq!(results[0].as_ref().unwrap().description(), "a 12\" sub");
    }

    #[test]
    fn test_line_numbers_count_blank_lines() {
        let results = decode_str("2024-03-01,Expense,Food,10.00,ok\n\n\r\n2024-03-02,Expense\n");
        assert_eq!(results.len(), 2);
        let err = results[1].as_ref().unwrap_err();
        assert!(err.to_string().starts_with("Corrupt data at line 4: expected 5 fields, found 2"));
    }

    #[test]
    fn test_corrupt_content_is_the_raw_line() {
        let results = decode_str("2024-03-01,Expense,\"Food, etc\",ten,x\n");
        match results[0].as_ref().unwrap_err() {
            LedgerError::CorruptData { content, .. } => {
                assert_eq!(content, "2024-03-01,Expense,\"Food, etc\",ten,x");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_corrupt() {
        let results = decode(b"2024-03-01,Expense,Food,1.00,\xff\n2024-03-02,Expense,Food,2.00,ok\n");
        assert!(results[0].as_ref().unwrap_err().is_corrupt_data());
        assert!(results[1].is_ok());
    }
}
