use serde::Deserialize;

use crate::api::version::VersionInfo;

/// `{"error": {"code": 400, "message": "..."}}`
#[derive(Deserialize)]
pub(super) struct ErrorEnvelope {
    pub error: Option<ErrorBody>,
}

#[derive(Deserialize)]
pub(super) struct ErrorBody {
    pub code: Option<i64>,
    pub message: Option<String>,
}

/// The service may wrap payloads as `{"data": ...}`.
#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum VersionResponse {
    Wrapped { data: VersionInfo },
    Bare(VersionInfo),
}

impl VersionResponse {
    pub fn into_inner(self) -> VersionInfo {
        match self {
            VersionResponse::Wrapped { data } => data,
            VersionResponse::Bare(info) => info,
        }
    }
}
