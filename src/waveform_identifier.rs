use crc::{Crc, CRC_64_XZ};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::miniseed::Sncl;

pub const IDENTIFIER_HASH: Crc<u64> = Crc::<u64>::new(&CRC_64_XZ);

/// Location code used when none is given.
pub const DEFAULT_LOCATION: &str = "--";

/// Addresses a decoded waveform by network, station, channel, location and a
/// free form comment.
///
/// Network, station, channel and location are uppercased when set. Equality
/// and hashing use a 64 bit CRC of the pipe joined fields, which is
/// recomputed by every setter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "IdentifierFields", into = "IdentifierFields")]
pub struct WaveformIdentifier {
    network: String,
    station: String,
    channel: String,
    location: String,
    comment: String,
    identifier: u64,
}

#[derive(Serialize, Deserialize)]
struct IdentifierFields {
    network: String,
    station: String,
    channel: String,
    location: String,
    comment: String,
}

impl WaveformIdentifier {
    /// All fields empty.
    pub fn new() -> WaveformIdentifier {
        WaveformIdentifier::with_comment("", "", "", "", "")
    }

    pub fn with_channel(network: &str, station: &str, channel: &str) -> WaveformIdentifier {
        WaveformIdentifier::with_comment(network, station, channel, DEFAULT_LOCATION, "")
    }

    pub fn with_location(
        network: &str,
        station: &str,
        channel: &str,
        location: &str,
    ) -> WaveformIdentifier {
        WaveformIdentifier::with_comment(network, station, channel, location, "")
    }

    pub fn with_comment(
        network: &str,
        station: &str,
        channel: &str,
        location: &str,
        comment: &str,
    ) -> WaveformIdentifier {
        let mut wid = WaveformIdentifier {
            network: network.to_uppercase(),
            station: station.to_uppercase(),
            channel: channel.to_uppercase(),
            location: location.to_uppercase(),
            comment: comment.to_string(),
            identifier: 0,
        };
        wid.rehash();
        wid
    }

    pub fn set_network(&mut self, network: &str) {
        self.network = network.to_uppercase();
        self.rehash();
    }

    pub fn network(&self) -> &str {
        &self.network
    }

    pub fn set_station(&mut self, station: &str) {
        self.station = station.to_uppercase();
        self.rehash();
    }

    pub fn station(&self) -> &str {
        &self.station
    }

    pub fn set_channel(&mut self, channel: &str) {
        self.channel = channel.to_uppercase();
        self.rehash();
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn set_location_code(&mut self, location: &str) {
        self.location = location.to_uppercase();
        self.rehash();
    }

    pub fn location_code(&self) -> &str {
        &self.location
    }

    pub fn set_comment(&mut self, comment: &str) {
        self.comment = comment.to_string();
        self.rehash();
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Empties every field.
    pub fn clear(&mut self) {
        *self = WaveformIdentifier::new();
    }

    /// The string the identifier hash is computed from,
    /// `NET|STA|CHA|LOC|comment`.
    pub fn hash_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.network, self.station, self.channel, self.location, self.comment
        )
    }

    pub fn identifier(&self) -> u64 {
        self.identifier
    }

    fn rehash(&mut self) {
        self.identifier = IDENTIFIER_HASH.checksum(self.hash_key().as_bytes());
    }
}

impl Default for WaveformIdentifier {
    fn default() -> Self {
        WaveformIdentifier::new()
    }
}

impl PartialEq for WaveformIdentifier {
    fn eq(&self, other: &WaveformIdentifier) -> bool {
        self.identifier == other.identifier
    }
}

impl Eq for WaveformIdentifier {}

impl Hash for WaveformIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier.hash(state);
    }
}

impl fmt::Display for WaveformIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

impl From<&Sncl> for WaveformIdentifier {
    fn from(sncl: &Sncl) -> Self {
        let location = if sncl.location().is_empty() {
            DEFAULT_LOCATION
        } else {
            sncl.location()
        };
        WaveformIdentifier::with_location(sncl.network(), sncl.station(), sncl.channel(), location)
    }
}

impl From<IdentifierFields> for WaveformIdentifier {
    fn from(f: IdentifierFields) -> Self {
        WaveformIdentifier::with_comment(&f.network, &f.station, &f.channel, &f.location, &f.comment)
    }
}

impl From<WaveformIdentifier> for IdentifierFields {
    fn from(wid: WaveformIdentifier) -> Self {
        IdentifierFields {
            network: wid.network,
            station: wid.station,
            channel: wid.channel,
            location: wid.location,
            comment: wid.comment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn uppercase_and_equality() {
        let wid = WaveformIdentifier::with_comment("uU", "LHUT", "BHZ", "00", "raw data");
        assert_eq!(wid.network(), "UU");
        assert_eq!(wid.station(), "LHUT");
        assert_eq!(wid.channel(), "BHZ");
        assert_eq!(wid.location_code(), "00");
        assert_eq!(wid.comment(), "raw data");

        let mut copy = wid.clone();
        assert_eq!(copy, wid);
        copy.set_comment("");
        assert_ne!(copy, wid);

        let other = WaveformIdentifier::with_comment("UU", "LHUT", "BHZ", "00", "filtered");
        assert_ne!(other, wid);
    }

    #[test]
    fn comment_keeps_case() {
        let mut wid = WaveformIdentifier::with_channel("uu", "ctu", "hhz");
        assert_eq!(wid.location_code(), DEFAULT_LOCATION);
        wid.set_comment("Raw");
        assert_eq!(wid.comment(), "Raw");
        assert_eq!(wid.hash_key(), "UU|CTU|HHZ|--|Raw");
        wid.set_location_code("01");
        assert_eq!(wid.hash_key(), "UU|CTU|HHZ|01|Raw");
    }

    #[test]
    fn clear_and_hash_set() {
        let mut wid = WaveformIdentifier::with_location("WY", "YWB", "HHZ", "01");
        let mut set = HashSet::new();
        set.insert(wid.clone());
        assert!(set.contains(&WaveformIdentifier::with_location("wy", "ywb", "hhz", "01")));
        wid.clear();
        assert_eq!(wid, WaveformIdentifier::new());
        assert_eq!(wid.hash_key(), "||||");
    }

    #[test]
    fn from_sncl() {
        let sncl = Sncl::new("WY", "YWB", "HHZ", "01");
        let wid = WaveformIdentifier::from(&sncl);
        assert_eq!(wid, WaveformIdentifier::with_location("WY", "YWB", "HHZ", "01"));
        let no_loc = WaveformIdentifier::from(&Sncl::new("UU", "CTU", "EHZ", ""));
        assert_eq!(no_loc.location_code(), DEFAULT_LOCATION);
    }

    #[test]
    fn serde_rehashes() -> Result<(), serde_json::Error> {
        let wid = WaveformIdentifier::with_comment("uu", "ctu", "ehz", "01", "x");
        let json = serde_json::to_string(&wid)?;
        assert!(!json.contains("identifier"));
        let back: WaveformIdentifier = serde_json::from_str(&json)?;
        assert_eq!(back, wid);
        assert_eq!(back.identifier(), wid.identifier());
        Ok(())
    }
}
