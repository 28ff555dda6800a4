//! CSV boundary adapter.
//!
//! Exports from the CRM come with drifting header names and Turkish or
//! English tokens. Everything is normalised here, once, into the canonical
//! [`Listing`] and [`PropertyRequest`] records.

mod rows;
mod values;

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::matching::domain::{AgentId, Listing, PropertyRequest};
use rows::{ListingRow, RequestRow, TeamMemberRow};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("{kind} row {row} has no id")]
    MissingId { kind: &'static str, row: usize },
}

pub struct CsvImporter;

impl CsvImporter {
    pub fn listings_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Listing>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::listings_from_reader(file)
    }

    pub fn listings_from_reader<R: Read>(reader: R) -> Result<Vec<Listing>, ImportError> {
        let listings = read_rows::<ListingRow, _>(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                row.into_listing().ok_or(ImportError::MissingId {
                    kind: "listing",
                    row: index + 1,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = listings.len(), "imported listings");
        Ok(listings)
    }

    pub fn requests_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<PropertyRequest>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::requests_from_reader(file)
    }

    pub fn requests_from_reader<R: Read>(reader: R) -> Result<Vec<PropertyRequest>, ImportError> {
        let requests = read_rows::<RequestRow, _>(reader)?
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                row.into_request().ok_or(ImportError::MissingId {
                    kind: "request",
                    row: index + 1,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(count = requests.len(), "imported requests");
        Ok(requests)
    }

    pub fn team_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<HashMap<AgentId, String>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::team_from_reader(file)
    }

    /// Members without a name are skipped; the directory only resolves names.
    pub fn team_from_reader<R: Read>(reader: R) -> Result<HashMap<AgentId, String>, ImportError> {
        let mut team = HashMap::new();
        for (index, row) in read_rows::<TeamMemberRow, _>(reader)?.into_iter().enumerate() {
            let id = row.id.ok_or(ImportError::MissingId {
                kind: "team member",
                row: index + 1,
            })?;
            if let Some(name) = row.name {
                team.insert(AgentId(id), name);
            }
        }

        info!(count = team.len(), "imported team directory");
        Ok(team)
    }
}

fn read_rows<T, R>(reader: R) -> Result<Vec<T>, ImportError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for row in csv_reader.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}
