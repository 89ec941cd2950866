//! webring: client library for JSON webrings
//!
//! A webring is a circular list of links published as JSON. A sibling
//! status document lists the links currently considered broken.
//!
//! - `ring`: links, circular neighbor lookups, anomaly filtering
//! - `schema` / `codec`: version 1 documents and their JSON encoding
//! - `fetch`: cancellable HTTP retrieval
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> webring::Result<()> {
//! let url = "https://raw.githubusercontent.com/diamondburned/libwebring/main/example/webring.json";
//! let token = CancellationToken::new();
//!
//! let webring = webring::fetch_data(&token, url).await?;
//! let status = webring::fetch_status_for_webring(&token, url).await?;
//!
//! for link in &webring.working_ring(&status) {
//!     println!("  - {}", link);
//! }
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod error;
pub mod fetch;
pub mod ring;
pub mod schema;

pub use codec::{decode_data, decode_status, encode_data, encode_status};
pub use error::{Error, ErrorKind, Result, Stage};
pub use fetch::{
    fetch_data, fetch_status, fetch_status_for_webring, guess_status_url, Client, ClientConfig,
};
pub use ring::{Link, Ring};
pub use schema::{Anomalies, Data, LinkStatus, StatusData};
