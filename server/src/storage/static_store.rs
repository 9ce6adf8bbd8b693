//! Airport store backed by an in-memory snapshot loaded from CSV.

use super::{AirportStore, StorageError};
use crate::types::AirportRecord;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// UK airports, loaded when no `AIRPORT_DATA` file is configured
pub const BUNDLED_AIRPORTS_CSV: &str = include_str!("../../data/uk_airport_coords.csv");

/// A row of the airport bootstrap file
#[derive(Debug, Deserialize)]
struct CsvAirport {
    #[serde(rename = "NAME")]
    name: String,

    #[serde(rename = "ICAO")]
    icao: String,

    #[serde(rename = "Longitude")]
    longitude: f64,

    #[serde(rename = "Latitude")]
    latitude: f64,
}

/// Immutable airport snapshot with id and ICAO indexes.
#[derive(Debug, Clone)]
pub struct StaticAirportStore {
    airports: Arc<[AirportRecord]>,
    by_id: HashMap<i64, usize>,
    by_icao: HashMap<String, usize>,
}

impl StaticAirportStore {
    /// Build a store from records.
    ///
    /// ICAO codes are upper-cased. Identifiers and ICAO codes must be unique
    /// and every record must have an in-range location.
    pub fn new(airports: Vec<AirportRecord>) -> Result<Self, StorageError> {
        let mut by_id = HashMap::with_capacity(airports.len());
        let mut by_icao = HashMap::with_capacity(airports.len());
        let mut records = Vec::with_capacity(airports.len());

        for (index, mut airport) in airports.into_iter().enumerate() {
            airport.icao = airport.icao.trim().to_uppercase();

            if let Err(e) = airport.coordinate().validate() {
                storage_error!("(new) airport {} has an invalid location: {}", airport.icao, e);
                return Err(StorageError::InvalidRecord {
                    record: index + 1,
                    reason: e.to_string(),
                });
            }

            if by_id.insert(airport.id, index).is_some() {
                storage_error!("(new) duplicate airport id {}.", airport.id);
                return Err(StorageError::DuplicateId(airport.id));
            }

            if by_icao.insert(airport.icao.clone(), index).is_some() {
                storage_error!("(new) duplicate ICAO code {}.", airport.icao);
                return Err(StorageError::DuplicateIcao(airport.icao));
            }

            records.push(airport);
        }

        storage_info!("(new) loaded {} airports.", records.len());
        Ok(StaticAirportStore {
            airports: records.into(),
            by_id,
            by_icao,
        })
    }

    /// Load airports from CSV with the header `NAME,ICAO,Longitude,Latitude`.
    ///
    /// Identifiers are assigned from 1 in file order.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, StorageError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let mut airports = Vec::new();

        for (index, row) in rdr.deserialize::<CsvAirport>().enumerate() {
            let row = row.map_err(|e| {
                storage_error!("(from_reader) could not parse record #{}: {}", index + 1, e);
                StorageError::InvalidRecord {
                    record: index + 1,
                    reason: e.to_string(),
                }
            })?;

            let Ok(id) = i64::try_from(index + 1) else {
                return Err(StorageError::InvalidRecord {
                    record: index + 1,
                    reason: String::from("too many records"),
                });
            };

            airports.push(AirportRecord {
                id,
                name: row.name.trim().to_string(),
                icao: row.icao,
                latitude: row.latitude,
                longitude: row.longitude,
            });
        }

        Self::new(airports)
    }

    /// Load airports from a CSV file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref();
        storage_info!("(from_path) loading airports from {}.", path.display());

        let file = std::fs::File::open(path).map_err(|e| {
            storage_error!("(from_path) could not open {}: {}", path.display(), e);
            StorageError::CouldNotRead(format!("{}: {}", path.display(), e))
        })?;

        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Load the bundled UK airport dataset
    pub fn bundled() -> Result<Self, StorageError> {
        Self::from_reader(BUNDLED_AIRPORTS_CSV.as_bytes())
    }

    /// Load the configured airport file, or the bundled dataset if none
    pub fn from_config(config: &crate::Config) -> Result<Self, StorageError> {
        match &config.airport_data {
            Some(path) => Self::from_path(path),
            None => Self::bundled(),
        }
    }

    /// All airports, in file order
    pub fn airports(&self) -> &[AirportRecord] {
        &self.airports
    }
}

#[async_trait]
impl AirportStore for StaticAirportStore {
    async fn list_all(&self) -> Result<Arc<[AirportRecord]>, StorageError> {
        Ok(self.airports.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<AirportRecord>, StorageError> {
        Ok(self
            .by_id
            .get(&id)
            .map(|&index| self.airports[index].clone()))
    }

    async fn get_by_icao(&self, icao: &str) -> Result<Option<AirportRecord>, StorageError> {
        Ok(self
            .by_icao
            .get(&icao.trim().to_uppercase())
            .map(|&index| self.airports[index].clone()))
    }
}
