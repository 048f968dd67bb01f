use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::SeisError;

lazy_static! {
    static ref PARSE_FDSN_REGEX: Regex = Regex::new(
        r"(?x)^
            FDSN:                      # prefix
            (?P<net>[A-Z0-9]{1,8})_    # network, 1-8 chars
            (?P<sta>[-A-Z0-9]{1,8})_   # station, 1-8 chars with dash
            (?P<loc>[-A-Z0-9]{0,8})_   # location, 0-8 chars with dash
            (?P<band>[A-Z0-9]*)_       # band, optional, usually single char
            (?P<source>[A-Z0-9]+)_     # source, one or more, usually single char
            (?P<subsource>[A-Z0-9]*)$  # subsource, optional, usually single char
"
    )
    .unwrap();
}

pub const PREFIX: &str = "FDSN:";

/// Longest network, station, channel or location code kept by [`Sncl`].
pub const MAX_CODE_LENGTH: usize = 10;

/// An FDSN Source Identifier string parsed into its component parts
/// See the specification at <http://docs.fdsn.org/projects/source-identifiers/en/v1.0/index.html>
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FdsnSourceIdentifier {
    pub network: String,
    pub station: String,
    pub location: String,
    pub band: String,
    pub source: String,
    pub subsource: String,
}

impl FdsnSourceIdentifier {
    pub fn parse(id: &str) -> Result<FdsnSourceIdentifier, SeisError> {
        let sid = match PARSE_FDSN_REGEX.captures(id) {
            Some(captures) => FdsnSourceIdentifier {
                network: capture_named(&captures, "net", id)?,
                station: capture_named(&captures, "sta", id)?,
                location: capture_named(&captures, "loc", id)?,
                band: capture_named(&captures, "band", id)?,
                source: capture_named(&captures, "source", id)?,
                subsource: capture_named(&captures, "subsource", id)?,
            },
            None => {
                return Err(SeisError::IdentifierParse(
                    id.to_string(),
                    String::from("all"),
                ))
            }
        };
        Ok(sid)
    }

    /// The channel code: band, source and subsource run together when each
    /// is a single character, otherwise joined by underscores.
    pub fn channel(&self) -> String {
        if self.band.len() == 1 && self.source.len() == 1 && self.subsource.len() == 1 {
            format!("{}{}{}", self.band, self.source, self.subsource)
        } else {
            format!("{}_{}_{}", self.band, self.source, self.subsource)
        }
    }
}

impl fmt::Display for FdsnSourceIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}_{}_{}_{}_{}_{}",
            PREFIX,
            self.network,
            self.station,
            self.location,
            self.band,
            self.source,
            self.subsource
        )
    }
}

fn capture_named(captures: &Captures, name: &str, id: &str) -> Result<String, SeisError> {
    match captures.name(name) {
        Some(s) => Ok(s.as_str().to_string()),
        None => Err(SeisError::IdentifierParse(
            id.to_string(),
            name.to_string(),
        )),
    }
}

/// Network, station, channel and location codes selecting one channel.
///
/// Each code is optional (empty) and cut to 10 characters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sncl {
    network: String,
    station: String,
    channel: String,
    location: String,
}

impl Sncl {
    pub fn new(network: &str, station: &str, channel: &str, location: &str) -> Sncl {
        Sncl {
            network: truncate(network),
            station: truncate(station),
            channel: truncate(channel),
            location: truncate(location),
        }
    }

    /// Splits an FDSN source identifier back into its codes.
    pub fn from_source_identifier(sid: &str) -> Result<Sncl, SeisError> {
        let fdsn = FdsnSourceIdentifier::parse(sid)?;
        Ok(Sncl::new(
            &fdsn.network,
            &fdsn.station,
            &fdsn.channel(),
            &fdsn.location,
        ))
    }

    /// Builds `FDSN:NET_STA_LOC_B_S_SS`. A three character channel is split
    /// into band, source and subsource; other channels are used as given.
    pub fn to_source_identifier(&self) -> String {
        let channel: Vec<char> = self.channel.chars().collect();
        let channel = if channel.len() == 3 {
            format!("{}_{}_{}", channel[0], channel[1], channel[2])
        } else {
            self.channel.clone()
        };
        format!(
            "{}{}_{}_{}_{}",
            PREFIX, self.network, self.station, self.location, channel
        )
    }

    /// True when all four codes are empty.
    pub fn is_empty(&self) -> bool {
        self.network.is_empty()
            && self.station.is_empty()
            && self.channel.is_empty()
            && self.location.is_empty()
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn set_network(&mut self, network: &str) {
        self.network = truncate(network);
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn set_station(&mut self, station: &str) {
        self.station = truncate(station);
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn set_channel(&mut self, channel: &str) {
        self.channel = truncate(channel);
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_location(&mut self, location: &str) {
        self.location = truncate(location);
    }
}

impl fmt::Display for Sncl {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

fn truncate(code: &str) -> String {
    code.chars().take(MAX_CODE_LENGTH).collect()
}
