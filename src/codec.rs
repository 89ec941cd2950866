//! Version-gated JSON encode/decode for webring documents
//!
//! Decoding runs in two steps so the caller can tell a malformed document
//! ([`Error::Decode`]) from a well-formed one of the wrong version
//! ([`Error::UnsupportedVersion`]).

use crate::error::{Error, Result};
use crate::schema::{Data, RawData, RawStatus, StatusData};
use std::io::Read;

pub fn encode_data(data: &Data) -> Result<Vec<u8>> {
    serde_json::to_vec(data).map_err(Error::Encode)
}

pub fn encode_status(status: &StatusData) -> Result<Vec<u8>> {
    serde_json::to_vec(status).map_err(Error::Encode)
}

pub fn decode_data(bytes: &[u8]) -> Result<Data> {
    let raw: RawData = serde_json::from_slice(bytes).map_err(Error::Decode)?;
    raw.into_data()
}

pub fn decode_status(bytes: &[u8]) -> Result<StatusData> {
    let raw: RawStatus = serde_json::from_slice(bytes).map_err(Error::Decode)?;
    raw.into_status()
}

pub fn data_from_reader<R: Read>(reader: R) -> Result<Data> {
    let raw: RawData = serde_json::from_reader(reader).map_err(Error::Decode)?;
    raw.into_data()
}

pub fn status_from_reader<R: Read>(reader: R) -> Result<StatusData> {
    let raw: RawStatus = serde_json::from_reader(reader).map_err(Error::Decode)?;
    raw.into_status()
}

/// A document type the fetch client can decode from a response body
pub trait Document: Sized {
    /// Human-readable name used in log output
    const NAME: &'static str;

    fn from_reader<R: Read>(reader: R) -> Result<Self>;
}

impl Document for Data {
    const NAME: &'static str = "webring";

    fn from_reader<R: Read>(reader: R) -> Result<Self> {
        data_from_reader(reader)
    }
}

impl Document for StatusData {
    const NAME: &'static str = "status";

    fn from_reader<R: Read>(reader: R) -> Result<Self> {
        status_from_reader(reader)
    }
}
