//! City classification for the nyc/la catalog views.
//!
//! Store rows are inconsistent about location fields, so classification walks
//! three rules in priority order: exact city+state, restaurant code prefix,
//! then a regex sweep over neighborhood and address. First match wins; a
//! restaurant matching none of them is excluded from both city views.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Restaurant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum City {
    Nyc,
    La,
}

const NYC_PATTERN: &str = r"(?i)\b(new york|nyc|manhattan|brooklyn|queens|bronx|staten island|harlem|williamsburg|soho|tribeca|east village|west village|lower east side)\b";
const LA_PATTERN: &str = r"(?i)\b(los angeles|silver ?lake|echo park|venice|santa monica|west hollywood|culver city|koreatown|highland park|dtla)\b";

pub fn classify_city(restaurant: &Restaurant) -> Option<City> {
    if let Some(city) = match_city_state(restaurant) {
        return Some(city);
    }

    if let Some(city) = match_code_prefix(restaurant) {
        return Some(city);
    }

    match_location_text(restaurant)
}

fn match_city_state(restaurant: &Restaurant) -> Option<City> {
    let city = restaurant.city.as_deref()?.trim();
    let state = restaurant.state.as_deref()?.trim();

    let is_nyc = (city.eq_ignore_ascii_case("new york") || city.eq_ignore_ascii_case("new york city"))
        && state.eq_ignore_ascii_case("ny");
    if is_nyc {
        return Some(City::Nyc);
    }

    if city.eq_ignore_ascii_case("los angeles") && state.eq_ignore_ascii_case("ca") {
        return Some(City::La);
    }

    None
}

fn match_code_prefix(restaurant: &Restaurant) -> Option<City> {
    let code = restaurant.restaurant_code.as_deref()?;

    if code.starts_with("nyc-") {
        Some(City::Nyc)
    } else if code.starts_with("la-") {
        Some(City::La)
    } else {
        None
    }
}

fn match_location_text(restaurant: &Restaurant) -> Option<City> {
    let nyc = Regex::new(NYC_PATTERN).unwrap();
    let la = Regex::new(LA_PATTERN).unwrap();

    for text in [&restaurant.neighborhood, &restaurant.address]
        .into_iter()
        .flatten()
    {
        if nyc.is_match(text) {
            return Some(City::Nyc);
        }

        if la.is_match(text) {
            return Some(City::La);
        }
    }

    None
}
