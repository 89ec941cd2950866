//! Webring and status document schema v1
//!
//! The wire `version` is owned by this module: it is never stored on the
//! records, always written as 1, and checked on every decode.

use crate::error::Error;
use crate::ring::{Link, Ring};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// The only document version this library reads or writes
pub const VERSION: i64 = 1;

/// Root webring document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Data {
    /// Display name of the webring
    pub name: Option<String>,
    /// Canonical URL of the webring
    pub root: Option<String>,
    pub ring: Ring,
}

impl Data {
    pub const VERSION: i64 = VERSION;

    /// The ring without the links listed as anomalies in `status`
    pub fn working_ring(&self, status: &StatusData) -> Ring {
        self.ring.exclude_anomalies(&status.anomalies)
    }
}

/// Health flags for one link. Any entry in [`Anomalies`] marks the link
/// as broken, whichever flags are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStatus {
    /// Site did not respond
    #[serde(default, skip_serializing_if = "is_false")]
    pub dead: bool,
    /// Site is up but no longer links back to the webring
    #[serde(default, skip_serializing_if = "is_false")]
    pub missing_webring: bool,
}

/// Broken links keyed by `Link::link` (the address, not the name)
pub type Anomalies = HashMap<String, LinkStatus>;

/// Root status document. Only lists links that are not working.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusData {
    pub anomalies: Anomalies,
}

impl StatusData {
    pub const VERSION: i64 = VERSION;

    pub fn status_of(&self, link: &Link) -> Option<&LinkStatus> {
        self.anomalies.get(&link.link)
    }

    pub fn is_anomalous(&self, link: &Link) -> bool {
        self.anomalies.contains_key(&link.link)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Outgoing webring document; `version` comes first on the wire
#[derive(Serialize)]
struct WireData<'a> {
    version: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    root: Option<&'a str>,
    ring: &'a Ring,
}

#[derive(Serialize)]
struct WireStatus<'a> {
    version: i64,
    anomalies: &'a Anomalies,
}

/// Incoming webring document before the version gate
#[derive(Deserialize)]
pub(crate) struct RawData {
    #[serde(default)]
    version: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    root: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    ring: Ring,
}

#[derive(Deserialize)]
pub(crate) struct RawStatus {
    #[serde(default)]
    version: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    anomalies: Anomalies,
}

impl RawData {
    pub(crate) fn into_data(self) -> Result<Data, Error> {
        check_version(self.version)?;
        Ok(Data {
            name: self.name,
            root: self.root,
            ring: self.ring,
        })
    }
}

impl RawStatus {
    pub(crate) fn into_status(self) -> Result<StatusData, Error> {
        check_version(self.version)?;
        Ok(StatusData {
            anomalies: self.anomalies,
        })
    }
}

/// Reads an explicit `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn check_version(version: i64) -> Result<(), Error> {
    if version != VERSION {
        return Err(Error::UnsupportedVersion(version));
    }
    Ok(())
}

impl Serialize for Data {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireData {
            version: VERSION,
            name: self.name.as_deref(),
            root: self.root.as_deref(),
            ring: &self.ring,
        }
        .serialize(serializer)
    }
}

impl Serialize for StatusData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireStatus {
            version: VERSION,
            anomalies: &self.anomalies,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Data {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawData::deserialize(deserializer)?;
        raw.into_data().map_err(serde::de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for StatusData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStatus::deserialize(deserializer)?;
        raw.into_status().map_err(serde::de::Error::custom)
    }
}
