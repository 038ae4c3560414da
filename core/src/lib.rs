//! # HKP Client
//!
//! Client for key services speaking the OpenPGP HTTP Keyserver Protocol
//! (HKP): submit ASCII armored keys, look keys up by search term or
//! fingerprint, and query the service version.
//!
//! ```no_run
//! use hkp_client::{Client, Config, Operation, PksApi};
//!
//! # async fn run() -> Result<(), hkp_client::Error> {
//! let client = Client::new(Config::default().with_base_url("hkps://keys.example.org"))?;
//! let index = client
//!     .pks_lookup(None, "alice@example.org", Operation::Index, false, false, &[])
//!     .await?;
//! println!("{index}");
//! # Ok(())
//! # }
//! ```

mod api;

pub use api::*;
