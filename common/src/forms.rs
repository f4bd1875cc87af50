// Submitted form bodies and their validation into insert payloads

use crate::errors::ValidationError;
use crate::models::{Artist, NewArtist, NewShow, NewVenue, Venue};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Two-letter state codes offered by the venue and artist forms
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genres offered by the venue and artist forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Swing",
    "Other",
];

/// Accepted `start_time` layouts for naive (zone-less) input, interpreted as UTC
const START_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Column widths of the `VARCHAR(120)` and `VARCHAR(500)` text columns
const SHORT_TEXT_MAX: usize = 120;
const LONG_TEXT_MAX: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: String,
    pub image_link: String,
    pub website: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

/// Search box submission; an absent term searches for everything
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

impl VenueForm {
    pub fn validate(self) -> Result<NewVenue, ValidationError> {
        Ok(NewVenue {
            name: required("name", &self.name)?,
            city: within("city", required("city", &self.city)?, SHORT_TEXT_MAX)?,
            state: state_code(&self.state)?,
            address: within("address", required("address", &self.address)?, SHORT_TEXT_MAX)?,
            phone: within_opt("phone", optional(&self.phone), SHORT_TEXT_MAX)?,
            genres: genres(self.genres)?,
            facebook_link: link("facebook_link", &self.facebook_link, SHORT_TEXT_MAX)?,
            image_link: link("image_link", &self.image_link, LONG_TEXT_MAX)?,
            website: link("website", &self.website, SHORT_TEXT_MAX)?,
            seeking_talent: checkbox(self.seeking_talent.as_deref()),
            seeking_description: within_opt(
                "seeking_description",
                optional(&self.seeking_description),
                LONG_TEXT_MAX,
            )?,
        })
    }
}

impl From<&Venue> for VenueForm {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            website: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ArtistForm {
    pub fn validate(self) -> Result<NewArtist, ValidationError> {
        Ok(NewArtist {
            name: required("name", &self.name)?,
            city: within("city", required("city", &self.city)?, SHORT_TEXT_MAX)?,
            state: state_code(&self.state)?,
            phone: within_opt("phone", optional(&self.phone), SHORT_TEXT_MAX)?,
            genres: genres(self.genres)?,
            facebook_link: link("facebook_link", &self.facebook_link, SHORT_TEXT_MAX)?,
            image_link: link("image_link", &self.image_link, LONG_TEXT_MAX)?,
            website: link("website", &self.website, SHORT_TEXT_MAX)?,
            seeking_venue: checkbox(self.seeking_venue.as_deref()),
            seeking_description: within_opt(
                "seeking_description",
                optional(&self.seeking_description),
                LONG_TEXT_MAX,
            )?,
        })
    }
}

impl From<&Artist> for ArtistForm {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            website: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }
}

impl ShowForm {
    pub fn validate(self) -> Result<NewShow, ValidationError> {
        Ok(NewShow {
            artist_id: entity_id("artist_id", &self.artist_id)?,
            venue_id: entity_id("venue_id", &self.venue_id)?,
            start_time: parse_start_time(&self.start_time)?,
        })
    }
}

/// Parse a submitted show start time
///
/// RFC 3339 input keeps its offset; naive input is taken as UTC.
pub fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("start_time".to_string()));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    START_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            ValidationError::invalid("start_time", format!("unrecognized date/time '{}'", raw))
        })
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn state_code(value: &str) -> Result<String, ValidationError> {
    let code = required("state", value)?.to_uppercase();
    if !STATES.contains(&code.as_str()) {
        return Err(ValidationError::invalid(
            "state",
            format!("unknown state code '{}'", code),
        ));
    }
    Ok(code)
}

fn genres(values: Vec<String>) -> Result<Vec<String>, ValidationError> {
    let mut selected: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        let genre = GENRES
            .iter()
            .find(|g| g.eq_ignore_ascii_case(value))
            .ok_or_else(|| ValidationError::invalid("genres", format!("unknown genre '{}'", value)))?;
        if !selected.iter().any(|s| s == genre) {
            selected.push(genre.to_string());
        }
    }
    Ok(selected)
}

/// Reject values longer than their column allows, counted in characters
fn within(field: &str, value: String, max: usize) -> Result<String, ValidationError> {
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::invalid(
            field,
            format!("{} characters, at most {} allowed", len, max),
        ));
    }
    Ok(value)
}

fn within_opt(
    field: &str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    value.map(|v| within(field, v, max)).transpose()
}

fn link(field: &str, value: &str, max: usize) -> Result<Option<String>, ValidationError> {
    match optional(value) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            within(field, url, max).map(Some)
        }
        Some(url) => Err(ValidationError::invalid(
            field,
            format!("'{}' is not an http(s) URL", url),
        )),
        None => Ok(None),
    }
}

fn checkbox(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("y" | "yes" | "on" | "true" | "1")
    )
}

fn entity_id(field: &str, value: &str) -> Result<i32, ValidationError> {
    let raw = required(field, value)?;
    match raw.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ValidationError::invalid(
            field,
            format!("'{}' is not a valid id", raw),
        )),
    }
}
