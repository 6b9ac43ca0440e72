use super::domain::{Balance, Characteristics, Racket, RacketId, Shape};
use super::CatalogError;
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Parse a flattened CSV export (one row per racket) into catalog records.
pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Racket>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut rackets = Vec::new();

    for (index, record) in csv_reader.deserialize::<RacketRow>().enumerate() {
        let row = record?;
        // header occupies line 1
        rackets.push(row.into_racket(index + 2)?);
    }

    Ok(rackets)
}

#[derive(Debug, Deserialize)]
struct RacketRow {
    id: String,
    brand: String,
    model: String,
    year: u16,
    shape: String,
    balance: String,
    weight_min: u16,
    weight_max: u16,
    #[serde(default)]
    core_type: String,
    #[serde(default)]
    surface_type: String,
    #[serde(default, deserialize_with = "flag")]
    roughness: bool,
    #[serde(default, deserialize_with = "optional_rating")]
    power: Option<u8>,
    #[serde(default, deserialize_with = "optional_rating")]
    control: Option<u8>,
    #[serde(default, deserialize_with = "optional_rating")]
    comfort: Option<u8>,
    #[serde(default, deserialize_with = "optional_rating")]
    maneuverability: Option<u8>,
    #[serde(default, deserialize_with = "optional_rating")]
    sweetspot: Option<u8>,
    #[serde(default, deserialize_with = "optional_rating")]
    rigidity: Option<u8>,
    #[serde(default)]
    price_range: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    review_summary: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    is_trending: bool,
}

impl RacketRow {
    fn into_racket(self, line: usize) -> Result<Racket, CatalogError> {
        let shape = Shape::parse(&self.shape).ok_or_else(|| CatalogError::InvalidRow {
            line,
            reason: format!("unknown shape '{}'", self.shape),
        })?;
        let balance = Balance::parse(&self.balance).ok_or_else(|| CatalogError::InvalidRow {
            line,
            reason: format!("unknown balance '{}'", self.balance),
        })?;

        Ok(Racket {
            id: RacketId(self.id),
            brand: self.brand,
            model: self.model,
            year: self.year,
            shape,
            balance,
            weight_min: self.weight_min,
            weight_max: self.weight_max,
            core_type: self.core_type,
            surface_type: self.surface_type,
            roughness: self.roughness,
            characteristics: Characteristics {
                power: self.power,
                control: self.control,
                comfort: self.comfort,
                maneuverability: self.maneuverability,
                sweetspot: self.sweetspot,
                rigidity: self.rigidity,
            },
            price_range: self.price_range,
            prices: Vec::new(),
            review_summary: self.review_summary,
            technologies: Vec::new(),
            target_player: None,
            game_style: None,
            is_trending: self.is_trending,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn optional_rating<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    empty_string_as_none(deserializer)?
        .map(|value| value.trim().parse::<u8>().map_err(serde::de::Error::custom))
        .transpose()
}

fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = empty_string_as_none(deserializer)?;
    Ok(matches!(
        value.as_deref().map(|v| v.trim().to_ascii_lowercase()),
        Some(ref v) if v == "true" || v == "yes" || v == "1" || v == "si" || v == "sí"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Characteristic;
    use std::io::Cursor;

    const HEADER: &str = "id,brand,model,year,shape,balance,weight_min,weight_max,core_type,surface_type,roughness,power,control,comfort,maneuverability,sweetspot,rigidity,price_range,review_summary,is_trending";

    #[test]
    fn parses_rows_with_spanish_labels_and_gaps() {
        let csv = format!(
            "{HEADER}\nbullpadel-vertex-04-2024,Bullpadel,Vertex 04,2024,diamante,alto,360,375,MultiEva,Carbono 18K,true,10,7,6,7,6,,260-290€,,si\n"
        );

        let rackets = parse_csv(Cursor::new(csv)).expect("csv parses");

        assert_eq!(rackets.len(), 1);
        let racket = &rackets[0];
        assert_eq!(racket.shape, Shape::Diamond);
        assert_eq!(racket.balance, Balance::High);
        assert!(racket.roughness);
        assert!(racket.is_trending);
        assert_eq!(racket.characteristics.get(Characteristic::Rigidity), None);
        assert_eq!(racket.characteristics.get(Characteristic::Power), Some(10));
        assert!(racket.review_summary.is_none());
    }

    #[test]
    fn rejects_unknown_shape_with_line_number() {
        let csv = format!(
            "{HEADER}\nx-1,Brand,Model,2024,square,low,350,360,,,,5,5,5,5,5,5,100€,,\n"
        );

        match parse_csv(Cursor::new(csv)) {
            Err(CatalogError::InvalidRow { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("square"));
            }
            other => panic!("expected invalid row error, got {other:?}"),
        }
    }
}
