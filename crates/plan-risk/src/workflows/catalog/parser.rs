use super::attributes::{QosVector, ATTRIBUTE_COUNT};
use super::CatalogError;
use std::io::Read;

/// Catalog rows carry the nine attributes followed by the service name.
const NAME_FIELD: usize = ATTRIBUTE_COUNT;

#[derive(Debug)]
pub(crate) struct CatalogRow {
    pub(crate) attributes: QosVector,
    pub(crate) name: String,
}

/// Reader shared by every comma-separated QoS dataset: no header, `#` comments,
/// ragged rows allowed so the caller decides how many fields it needs.
pub(crate) fn qos_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader)
}

pub(crate) fn is_blank(record: &csv::StringRecord) -> bool {
    record.iter().all(str::is_empty)
}

pub(crate) fn record_line(record: &csv::StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or(0)
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CatalogRow>, CatalogError> {
    let mut csv_reader = qos_reader(reader);
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        if is_blank(&record) {
            continue;
        }

        let line = record_line(&record);
        let name = match record.get(NAME_FIELD) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => {
                return Err(CatalogError::MalformedRecord {
                    line,
                    reason: format!(
                        "expected at least {} fields, found {}",
                        NAME_FIELD + 1,
                        record.len()
                    ),
                })
            }
        };

        let attributes =
            QosVector::parse_fields(record.iter()).map_err(|err| CatalogError::MalformedRecord {
                line,
                reason: err.to_string(),
            })?;

        rows.push(CatalogRow { attributes, name });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn skips_comments_and_blank_lines() {
        let source = "# QWS sample\n\n302.75,89,7.1,90,73,78,80,187.75,32,MAPPMatching,http://example.org/wsdl\n   \n";
        let rows = parse_rows(Cursor::new(source)).expect("catalog parses");

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "MAPPMatching");
        assert_eq!(rows[0].attributes[0], 302.75);
    }

    #[test]
    fn rejects_rows_without_a_name() {
        let error = parse_rows(Cursor::new("1,2,3,4,5,6,7,8,9\n")).expect_err("name required");

        match error {
            CatalogError::MalformedRecord { line, reason } => {
                assert_eq!(line, 1);
                assert!(reason.contains("at least 10 fields"));
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }

    #[test]
    fn reports_line_of_non_numeric_attribute() {
        let source = "1,2,3,4,5,6,7,8,9,Alpha\n1,2,three,4,5,6,7,8,9,Beta\n";
        let error = parse_rows(Cursor::new(source)).expect_err("bad number");

        match error {
            CatalogError::MalformedRecord { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("'three'"));
            }
            other => panic!("expected malformed record, got {other:?}"),
        }
    }
}
