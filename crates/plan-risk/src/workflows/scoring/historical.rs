use super::ScoringError;
use crate::workflows::catalog::parser::{is_blank, qos_reader, record_line};
use crate::workflows::catalog::{QosAttribute, QosVector, ATTRIBUTE_COUNT};
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Per-attribute min/max observed over a reference dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRange {
    min: QosVector,
    max: QosVector,
}

impl HistoricalRange {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScoringError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let range = Self::scan(file)?;
        info!(path = %path.display(), "historical reference range computed");
        Ok(range)
    }

    /// Single pass over `#`-commented, comma-separated rows; only the first nine
    /// fields of each row are read.
    pub fn scan<R: Read>(reader: R) -> Result<Self, ScoringError> {
        let mut min = [f64::INFINITY; ATTRIBUTE_COUNT];
        let mut max = [f64::NEG_INFINITY; ATTRIBUTE_COUNT];
        let mut rows = 0usize;

        let mut csv_reader = qos_reader(reader);
        for record in csv_reader.records() {
            let record = record?;
            if is_blank(&record) {
                continue;
            }

            let values = QosVector::parse_fields(record.iter()).map_err(|err| {
                ScoringError::MalformedReference {
                    line: record_line(&record),
                    reason: err.to_string(),
                }
            })?;

            for (position, value) in values.values().iter().enumerate() {
                min[position] = min[position].min(*value);
                max[position] = max[position].max(*value);
            }
            rows += 1;
        }

        if rows == 0 {
            return Err(ScoringError::EmptyReference);
        }

        Ok(Self::from_bounds(QosVector::new(min), QosVector::new(max)))
    }

    pub fn from_bounds(min: QosVector, max: QosVector) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> &QosVector {
        &self.min
    }

    pub fn max(&self) -> &QosVector {
        &self.max
    }

    /// `(value - min) / (max - min)`; unclamped, so values outside the reference
    /// range map outside `[0, 1]`.
    pub fn normalize(&self, attribute: QosAttribute, value: f64) -> Result<f64, ScoringError> {
        let low = self.min[attribute];
        let width = self.max[attribute] - low;
        if width == 0.0 {
            return Err(ScoringError::DegenerateRange {
                attribute,
                value: low,
            });
        }

        Ok((value - low) / width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn scan_tracks_min_and_max_per_attribute() {
        let source = "\
# reference
10,1,5,0,0,0,0,0,0,ServiceA,http://a
30,3,5,9,9,9,9,9,9,ServiceB

20,2,5,4,4,4,4,4,4,ServiceC
";
        let range = HistoricalRange::scan(Cursor::new(source)).expect("scan succeeds");

        assert_eq!(range.min()[QosAttribute::ResponseTime], 10.0);
        assert_eq!(range.max()[QosAttribute::ResponseTime], 30.0);
        assert_eq!(
            range
                .normalize(QosAttribute::ResponseTime, 25.0)
                .expect("non-degenerate"),
            0.75
        );
    }

    #[test]
    fn constant_attribute_is_reported_when_used() {
        let source = "10,1,5,0,0,0,0,0,0\n30,3,5,9,9,9,9,9,9\n";
        let range = HistoricalRange::scan(Cursor::new(source)).expect("scan succeeds");

        assert!(range.normalize(QosAttribute::Availability, 2.0).is_ok());
        match range.normalize(QosAttribute::Throughput, 5.0) {
            Err(ScoringError::DegenerateRange { attribute, value }) => {
                assert_eq!(attribute, QosAttribute::Throughput);
                assert_eq!(value, 5.0);
            }
            other => panic!("expected degenerate range, got {other:?}"),
        }
    }

    #[test]
    fn single_row_reference_is_degenerate_everywhere() {
        let range =
            HistoricalRange::scan(Cursor::new("1,2,3,4,5,6,7,8,9\n")).expect("scan succeeds");

        for attribute in QosAttribute::ordered() {
            assert!(matches!(
                range.normalize(attribute, 1.0),
                Err(ScoringError::DegenerateRange { .. })
            ));
        }
    }

    #[test]
    fn empty_reference_is_an_error() {
        let error = HistoricalRange::scan(Cursor::new("# nothing here\n\n"))
            .expect_err("no rows");
        assert!(matches!(error, ScoringError::EmptyReference));
    }

    #[test]
    fn short_rows_are_malformed() {
        let error =
            HistoricalRange::scan(Cursor::new("1,2,3,4,5,6,7,8,9\n1,2,3\n")).expect_err("short");

        match error {
            ScoringError::MalformedReference { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("found 3"), "{reason}");
            }
            other => panic!("expected malformed reference, got {other:?}"),
        }
    }
}
