use crate::domain::dining::Dining;
use crate::error::{RewardError, Result};
use std::io::Read;

/// Streams dinings out of CSV with an `amount, credit_card, merchant, timestamp`
/// header. Fields are trimmed, and amounts are parsed from their text so no
/// digits are lost.
pub struct DiningReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DiningReader<R> {
    /// Wraps a file, stdin or an in-memory buffer.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes dinings.
    ///
    /// A malformed row yields an error without ending the iteration.
    pub fn dinings(self) -> impl Iterator<Item = Result<Dining>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(RewardError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, credit_card, merchant, timestamp\n\
                    100.00, 1234567890123456, 1234567890, 2026-10-19T12:30:00Z\n\
                    10.01, 1234567890123456, 1234567890, 2026-10-19T19:00:00Z";
        let reader = DiningReader::new(data.as_bytes());
        let results: Vec<Result<Dining>> = reader.dinings().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.credit_card, "1234567890123456");
        assert_eq!(first.amount.value(), dec!(100.00));
        assert_eq!(results[1].as_ref().unwrap().amount.value(), dec!(10.01));
    }

    #[test]
    fn test_reader_keeps_every_digit_of_large_amounts() {
        let data = "amount, credit_card, merchant, timestamp\n\
                    1234567890123456.78, 1234567890123456, 1234567890, 2026-10-19T12:30:00Z";
        let reader = DiningReader::new(data.as_bytes());
        let dining = reader.dinings().next().unwrap().unwrap();

        assert_eq!(dining.amount.value(), dec!(1234567890123456.78));
        assert_eq!(dining.amount.to_string(), "1234567890123456.78");
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "amount, credit_card, merchant, timestamp\n\
                    lots, 1234567890123456, 1234567890, 2026-10-19T12:30:00Z\n\
                    5.00, 1234567890123456, 1234567890, yesterday\n\
                    5.00, 1234567890123456, 1234567890, 2026-10-19T12:30:00Z";
        let reader = DiningReader::new(data.as_bytes());
        let results: Vec<Result<Dining>> = reader.dinings().collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert!(results[2].is_ok());
    }
}
