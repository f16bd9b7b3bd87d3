use serde::Deserialize;

/// One raw observation row as returned by `/fred/series/observations`.
///
/// `value` is a string on the wire; FRED encodes a missing observation as
/// `"."`, which callers must filter out before numeric parsing.
#[derive(Deserialize, Debug)]
pub struct FredObservation {
    pub date: String,
    pub value: String,
}

#[derive(Deserialize, Debug)]
pub struct ObservationsResponse {
    pub observations: Vec<FredObservation>,
}

/// One series record as returned by `/fred/series`.
#[derive(Deserialize, Debug)]
pub struct FredSeriesInfo {
    pub id: String,
    pub title: String,
    pub frequency_short: String,
    pub units_short: String,
    pub seasonal_adjustment_short: String,
}

/// FRED wraps the (single) series record in a `seriess` array.
#[derive(Deserialize, Debug)]
pub struct SeriesResponse {
    pub seriess: Vec<FredSeriesInfo>,
}
