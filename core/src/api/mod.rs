//! HKP key service client

mod address;
mod api_client;
#[cfg(feature = "async")]
mod cancel;
mod config;
mod error;
mod http_sender;
mod pks;
mod responses;
mod version;

#[cfg(test)]
mod mock_sender;
#[cfg(test)]
mod test_utils;

pub use address::{Endpoint, HKP_DEFAULT_PORT, is_localhost, map_scheme, normalize_url};
pub use api_client::Client;
#[cfg(feature = "async")]
pub use cancel::{CancellationToken, cancellable};
pub use config::{Config, DEFAULT_BASE_URL};
pub use error::{Error, HttpError};
pub use http_sender::{DefaultSender, HttpSender};
pub use pks::{
    OPTION_MACHINE_READABLE, Operation, PATH_PKS_ADD, PATH_PKS_LOOKUP, PageDetails, PksApi,
    fingerprint_search,
};
pub use version::{VersionApi, VersionInfo};
