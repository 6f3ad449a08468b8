use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// URL layout of the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ApiStyle {
    /// Spreadsheet web-app script: one URL, routed by `fn=`/`action=` query.
    #[default]
    Script,
    /// Small REST API: `/range`, `/update`, `/delete`.
    Rest,
}

/// How POST payloads are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BodyEncoding {
    #[default]
    Json,
    /// `application/x-www-form-urlencoded` with the JSON payload in `data`.
    Form,
}

/// What deleting a day does on the backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteMode {
    /// Call the delete route.
    #[default]
    Endpoint,
    /// Overwrite the date with an empty record.
    EmptyRecord,
    /// Never touch the backend.
    LocalOnly,
}
