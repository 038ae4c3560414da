use serde::{Deserialize, Serialize};

use crate::api::api_client::Client;
use crate::api::error::Error;
use crate::api::http_sender::HttpSender;
use crate::api::responses::VersionResponse;

const PATH_VERSION: &str = "version";

/// Version information reported by the key service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub version: String,
}

#[async_trait::async_trait]
pub trait VersionApi {
    /// Fetches version information from the key service.
    async fn get_version(&self) -> Result<VersionInfo, Error>;
}

#[async_trait::async_trait]
impl<S: HttpSender> VersionApi for Client<S> {
    async fn get_version(&self) -> Result<VersionInfo, Error> {
        let request = self.new_request("GET", PATH_VERSION, None, None)?;
        let response = self.send(request).await?;

        let body = response.text().await?;
        let version = serde_json::from_str::<VersionResponse>(&body)
            .map_err(Error::Deserialization)?
            .into_inner();

        Ok(version)
    }
}
