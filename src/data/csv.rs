//! Minimal RFC 4180 CSV reader.
//!
//! Supports quoted fields, doubled-quote escapes, commas and newlines inside
//! quotes, and CRLF line endings. Input is expected to be cleaned upstream;
//! anything structurally malformed is an error, not a best-effort parse.

use crate::error::{RecomendarError, Result};

/// Parses CSV text into a header row plus data records.
///
/// # Errors
///
/// Returns `FormatError` on an unterminated quote, a stray quote inside an
/// unquoted field, or a record whose field count differs from the header.
pub fn parse(input: &str) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut records = parse_records(input)?;
    if records.is_empty() {
        return Err(RecomendarError::FormatError {
            message: "empty input, expected a header row".to_string(),
        });
    }
    let header = records.remove(0);

    for (i, record) in records.iter().enumerate() {
        if record.len() != header.len() {
            return Err(RecomendarError::FormatError {
                message: format!(
                    "row {} has {} fields, header has {}",
                    i,
                    record.len(),
                    header.len()
                ),
            });
        }
    }

    Ok((header, records))
}

fn parse_records(input: &str) -> Result<Vec<Vec<String>>> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_was_quoted = false;
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                if field.is_empty() && !field_was_quoted {
                    in_quotes = true;
                    field_was_quoted = true;
                } else {
                    return Err(RecomendarError::FormatError {
                        message: format!("unexpected quote in record {}", records.len()),
                    });
                }
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_was_quoted = false;
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                field_was_quoted = false;
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
                field_was_quoted = false;
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(RecomendarError::FormatError {
            message: format!("unterminated quote in record {}", records.len()),
        });
    }

    // Final record without a trailing newline.
    if !field.is_empty() || !record.is_empty() || field_was_quoted {
        record.push(field);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields() {
        let (header, rows) = parse("a,b,c\n1,2,3\n4,5,6\n").expect("well-formed csv");
        assert_eq!(header, vec!["a", "b", "c"]);
        assert_eq!(rows, vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let (_, rows) = parse("a,b\n1,2").expect("well-formed csv");
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_quoted_comma_and_newline() {
        let (_, rows) = parse("a,b\n\"rock, classic rock\",\"line\nbreak\"\n")
            .expect("well-formed csv");
        assert_eq!(rows[0][0], "rock, classic rock");
        assert_eq!(rows[0][1], "line\nbreak");
    }

    #[test]
    fn test_escaped_quote() {
        let (_, rows) = parse("a\n\"say \"\"hi\"\"\"\n").expect("well-formed csv");
        assert_eq!(rows[0][0], "say \"hi\"");
    }

    #[test]
    fn test_crlf_endings() {
        let (header, rows) = parse("a,b\r\n1,2\r\n").expect("well-formed csv");
        assert_eq!(header, vec!["a", "b"]);
        assert_eq!(rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn test_empty_fields() {
        let (_, rows) = parse("a,b,c\n,,\n").expect("well-formed csv");
        assert_eq!(rows, vec![vec!["", "", ""]]);
    }

    #[test]
    fn test_quoted_empty_final_field() {
        let (_, rows) = parse("a\n\"\"").expect("well-formed csv");
        assert_eq!(rows, vec![vec![""]]);
    }

    #[test]
    fn test_unterminated_quote_is_error() {
        assert!(parse("a\n\"oops\n").is_err());
    }

    #[test]
    fn test_stray_quote_is_error() {
        assert!(parse("a\nab\"c\n").is_err());
    }

    #[test]
    fn test_ragged_row_is_error() {
        assert!(parse("a,b\n1\n").is_err());
    }

    #[test]
    fn test_empty_input_is_error() {
        assert!(parse("").is_err());
    }
}
