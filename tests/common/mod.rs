use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::{Path, PathBuf};

pub const CATALOG: &str = "tests/fixtures/catalog.json";

pub fn catalog() -> PathBuf {
    PathBuf::from(CATALOG)
}

/// Writes a dinings CSV with the given `(amount, credit_card, merchant)` rows.
pub fn write_dinings(path: &Path, rows: &[(&str, &str, &str)]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["amount", "credit_card", "merchant", "timestamp"])?;
    for (amount, credit_card, merchant) in rows {
        wtr.write_record([*amount, *credit_card, *merchant, "2026-10-19T12:30:00Z"])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `rows` random dinings against the fixture catalog's first account
/// and restaurant.
pub fn generate_dinings(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    wtr.write_record(["amount", "credit_card", "merchant", "timestamp"])?;

    let mut rng = rand::thread_rng();
    for _ in 0..rows {
        let cents: u32 = rng.gen_range(1..100_000);
        let amount = format!("{}.{:02}", cents / 100, cents % 100);
        wtr.write_record([
            amount.as_str(),
            "1234567890123456",
            "1234567890",
            "2026-10-19T12:30:00Z",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
