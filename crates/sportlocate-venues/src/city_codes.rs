//! Municipality name to catalog city code lookup.
//!
//! The table comes from the Statistics Finland municipality classification
//! export (https://www.stat.fi/en/luokitukset/kunta/): `;`-separated,
//! ISO-8859-1 encoded, with codes quoted like `'837'`.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::error::VenueError;

const CODE_COLUMN: &str = "code";
const NAME_COLUMN: &str = "classificationItemName";

/// A city entry for a city picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityEntry {
    pub name: String,
    pub code: i64,
}

/// Lower-cased city name to numeric city code.
#[derive(Debug, Clone, Default)]
pub struct CityCodes {
    codes: HashMap<String, i64>,
}

impl CityCodes {
    /// Read the table from a CSV export on disk.
    ///
    /// # Errors
    /// [`VenueError::CityTable`] when the file cannot be read or parsed.
    pub fn from_csv_path(path: &Path) -> Result<Self, VenueError> {
        let file = std::fs::File::open(path)
            .map_err(|e| VenueError::CityTable(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_reader(file)?;
        tracing::info!("Loaded {} city codes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Read an ISO-8859-1 encoded export from any reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, VenueError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| VenueError::CityTable(e.to_string()))?;
        Self::from_csv_str(&decode_latin1(&bytes))
    }

    /// Parse the CSV text (already decoded).
    pub fn from_csv_str(contents: &str) -> Result<Self, VenueError> {
        let mut lines = contents.lines().filter(|l| !l.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| VenueError::CityTable("empty city code table".into()))?;
        let columns: Vec<String> = header.split(';').map(unquote).collect();
        let code_idx = column_index(&columns, CODE_COLUMN)?;
        let name_idx = column_index(&columns, NAME_COLUMN)?;

        let mut codes = HashMap::new();
        for (line_no, line) in lines.enumerate() {
            let fields: Vec<String> = line.split(';').map(unquote).collect();
            let (Some(code), Some(name)) = (fields.get(code_idx), fields.get(name_idx)) else {
                return Err(VenueError::CityTable(format!(
                    "row {} has too few columns",
                    line_no + 2
                )));
            };
            let code = code.parse::<i64>().map_err(|e| {
                VenueError::CityTable(format!("row {}: bad code {:?}: {}", line_no + 2, code, e))
            })?;
            codes.insert(name.to_lowercase(), code);
        }

        Ok(Self { codes })
    }

    /// Build a table from `(name, code)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, i64)>,
        S: AsRef<str>,
    {
        Self {
            codes: pairs
                .into_iter()
                .map(|(name, code)| (name.as_ref().trim().to_lowercase(), code))
                .collect(),
        }
    }

    /// Code for `city`, matched case-insensitively.
    ///
    /// # Errors
    /// [`VenueError::UnknownCity`] when the city is not in the table.
    pub fn code_for(&self, city: &str) -> Result<i64, VenueError> {
        let key = city.trim().to_lowercase();
        self.codes
            .get(&key)
            .copied()
            .ok_or(VenueError::UnknownCity(key))
    }

    /// All cities, capitalised and sorted by name.
    pub fn cities(&self) -> Vec<CityEntry> {
        let mut cities: Vec<CityEntry> = self
            .codes
            .iter()
            .map(|(name, code)| CityEntry {
                name: capitalize(name),
                code: *code,
            })
            .collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name));
        cities
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn column_index(columns: &[String], wanted: &str) -> Result<usize, VenueError> {
    columns
        .iter()
        .position(|c| c == wanted)
        .ok_or_else(|| VenueError::CityTable(format!("missing column {:?}", wanted)))
}

fn unquote(field: &str) -> String {
    field
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_string()
}

// ISO-8859-1 maps each byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\"code\";\"classificationItemName\";\"classificationItemName_sv\"\n\
                          '005';Alajärvi;Alajärvi\n\
                          '020';Akaa;Akaa\n\
                          '837';Tampere;Tammerfors\n";

    #[test]
    fn test_parse_sample() {
        let table = CityCodes::from_csv_str(SAMPLE).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.code_for("tampere").unwrap(), 837);
        assert_eq!(table.code_for("Akaa").unwrap(), 20);
        assert_eq!(table.code_for("ALAJÄRVI").unwrap(), 5);
    }

    #[test]
    fn test_unknown_city_is_error() {
        let table = CityCodes::from_csv_str(SAMPLE).unwrap();
        assert!(matches!(
            table.code_for("Atlantis"),
            Err(VenueError::UnknownCity(city)) if city == "atlantis"
        ));
    }

    #[test]
    fn test_missing_column_is_error() {
        let err = CityCodes::from_csv_str("code;name\n'1';A\n").unwrap_err();
        assert!(matches!(err, VenueError::CityTable(_)));
    }

    #[test]
    fn test_bad_code_is_error() {
        let err =
            CityCodes::from_csv_str("code;classificationItemName\nabc;Akaa\n").unwrap_err();
        assert!(matches!(err, VenueError::CityTable(_)));
    }

    #[test]
    fn test_cities_are_capitalised_and_sorted() {
        let table = CityCodes::from_csv_str(SAMPLE).unwrap();
        let names: Vec<String> = table.cities().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Akaa", "Alajärvi", "Tampere"]);
    }

    #[test]
    fn test_latin1_file_is_decoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("city_codes.csv");
        // "Hämeenlinna" with ä as the single ISO-8859-1 byte 0xE4
        let mut bytes = b"code;classificationItemName\n'109';H".to_vec();
        bytes.push(0xE4);
        bytes.extend_from_slice(b"meenlinna\n");
        std::fs::write(&path, bytes).unwrap();

        let table = CityCodes::from_csv_path(&path).unwrap();
        assert_eq!(table.code_for("hämeenlinna").unwrap(), 109);
    }

    #[test]
    fn test_from_reader() {
        let table = CityCodes::from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.code_for("Tampere").unwrap(), 837);
    }

    #[test]
    fn test_from_pairs_lowercases() {
        let table = CityCodes::from_pairs([("Tampere", 837)]);
        assert_eq!(table.code_for("TAMPERE").unwrap(), 837);
    }
}
