use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{anyhow, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::Contribution;
use shared::utils::pkr_format;

use super::goal_input::parse_iso_date;

pub struct ContributionCsvLoader;

impl ContributionCsvLoader {
    // CSV Header: amount,contribution_date
    // Example Row: "25,000",2026-09-01
    pub fn load_from_path(path: &Path) -> Result<Vec<Contribution>> {
        let file = File::open(path)
            .map_err(|e| anyhow!("Failed to open contributions file '{}': {}", path.display(), e))?;
        Self::load_from_reader(BufReader::new(file))
    }

    pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<Contribution>> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut contributions = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let line = idx + 2;
            let record = result.map_err(|e| anyhow!("Error reading CSV record at line {}: {}", line, e))?;

            let amount_str = Self::get_field(&record, &headers, "amount")
                .ok_or_else(|| anyhow!("Missing 'amount' field in CSV record at line {}", line))?;
            let date_str = Self::get_field(&record, &headers, "contribution_date")
                .ok_or_else(|| anyhow!("Missing 'contribution_date' field in CSV record at line {}", line))?;

            let amount = pkr_format::parse_decimal(amount_str)
                .ok_or_else(|| anyhow!("Error parsing 'amount' at line {}: '{}' is not a number", line, amount_str))?;
            let contribution_date = parse_iso_date("contribution_date", date_str)
                .map_err(|e| anyhow!("Error parsing 'contribution_date' at line {}: {}", line, e))?;

            contributions.push(Contribution { amount, contribution_date });
        }
        Ok(contributions)
    }

    // Columns are looked up by header name so their order does not matter.
    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
    }
}
