//! KML coordinate text parsing
//!
//! A `<coordinates>` element holds `lon,lat[,elevation]` records separated by
//! whitespace. A single malformed record invalidates the whole feature.

use nom::{
    character::complete::char,
    combinator::{all_consuming, opt},
    number::complete::double,
    sequence::{preceded, separated_pair},
    IResult,
};

use crate::error::FeatureError;

/// One parsed coordinate record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
    pub elevation: Option<f64>,
}

impl Coordinate {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Coordinate {
            longitude,
            latitude,
            elevation: None,
        }
    }
}

fn record(input: &str) -> IResult<&str, Coordinate> {
    let (input, (longitude, latitude)) = separated_pair(double, char(','), double)(input)?;
    let (input, elevation) = opt(preceded(char(','), double))(input)?;
    Ok((
        input,
        Coordinate {
            longitude,
            latitude,
            elevation,
        },
    ))
}

fn parse_record(text: &str) -> Result<Coordinate, FeatureError> {
    let invalid = || FeatureError::InvalidCoordinates {
        record: text.to_string(),
    };
    let (_, coordinate) = all_consuming(record)(text).map_err(|_| invalid())?;
    if !coordinate.longitude.is_finite() || !coordinate.latitude.is_finite() {
        return Err(invalid());
    }
    Ok(coordinate)
}

/// Parse coordinate text into records, in order
///
/// Blank text is [`FeatureError::EmptyCoordinates`]; any record that is not
/// two or three comma-separated finite numbers is
/// [`FeatureError::InvalidCoordinates`].
pub fn parse_coordinates(text: &str) -> Result<Vec<Coordinate>, FeatureError> {
    let coordinates = text
        .split_whitespace()
        .map(parse_record)
        .collect::<Result<Vec<_>, _>>()?;
    if coordinates.is_empty() {
        return Err(FeatureError::EmptyCoordinates);
    }
    Ok(coordinates)
}
