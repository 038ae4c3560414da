//! Scheme normalization for key service addresses.
//!
//! Keyservers are commonly advertised with the legacy `hkp` and `hkps`
//! schemes. Both are plain HTTP(S) underneath, so they are rewritten to
//! their HTTP equivalents before any request is made.

use url::Url;

use crate::api::error::Error;

/// Port a plain `hkp` keyserver listens on when none is given.
pub const HKP_DEFAULT_PORT: u16 = 11371;

/// Scheme, host and port of a normalized address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub scheme: &'static str,
    pub host: String,
    pub port: Option<u16>,
}

/// Maps a (scheme, host, port) triple onto its HTTP equivalent.
///
/// | scheme | result                               |
/// |--------|--------------------------------------|
/// | http   | http, port unchanged                 |
/// | https  | https, port unchanged                |
/// | hkp    | http, port defaults to 11371         |
/// | hkps   | https, port unchanged                |
///
/// Any other scheme fails with [`Error::UnsupportedScheme`].
pub fn map_scheme(scheme: &str, host: &str, port: Option<u16>) -> Result<Endpoint, Error> {
    let (scheme, port) = match scheme {
        "http" => ("http", port),
        "https" => ("https", port),
        "hkp" => ("http", port.or(Some(HKP_DEFAULT_PORT))),
        "hkps" => ("https", port),
        other => return Err(Error::UnsupportedScheme(other.to_string())),
    };

    Ok(Endpoint {
        scheme,
        host: host.to_string(),
        port,
    })
}

/// Rewrites `url` so that its scheme is `http` or `https`. Only the scheme
/// and, for `hkp`, the port change; everything else is carried over.
pub fn normalize_url(url: &Url) -> Result<Url, Error> {
    let endpoint = map_scheme(url.scheme(), url.host_str().unwrap_or_default(), url.port())?;
    if endpoint.scheme == url.scheme() && endpoint.port == url.port() {
        return Ok(url.clone());
    }
    if endpoint.host.is_empty() {
        return Err(Error::InvalidAddress(url::ParseError::EmptyHost));
    }

    // The url crate refuses to switch a non-special scheme (hkp) to a special
    // one (http), so the address is reassembled and parsed again.
    let mut rebuilt = format!("{}://", endpoint.scheme);
    if !url.username().is_empty() {
        rebuilt.push_str(url.username());
        if let Some(password) = url.password() {
            rebuilt.push(':');
            rebuilt.push_str(password);
        }
        rebuilt.push('@');
    }
    rebuilt.push_str(&endpoint.host);
    if let Some(port) = endpoint.port {
        rebuilt.push_str(&format!(":{port}"));
    }
    rebuilt.push_str(url.path());
    if let Some(query) = url.query() {
        rebuilt.push('?');
        rebuilt.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        rebuilt.push('#');
        rebuilt.push_str(fragment);
    }

    Ok(Url::parse(&rebuilt)?)
}

/// Only the literal host name `localhost` counts; loopback IP literals do not.
pub fn is_localhost(url: &Url) -> bool {
    url.host_str() == Some("localhost")
}
