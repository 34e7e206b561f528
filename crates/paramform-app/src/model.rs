// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ids::RowKey;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRow {
    pub key: RowKey,
    pub parameter_name: String,
    pub standard_name: String,
    pub parameter_depth: f64,
}

impl ParameterRow {
    pub fn blank(key: RowKey) -> Self {
        Self {
            key,
            parameter_name: String::new(),
            standard_name: String::new(),
            parameter_depth: 0.0,
        }
    }

    pub fn apply(&mut self, patch: RowPatch) {
        self.parameter_name = patch.parameter_name;
        self.standard_name = patch.standard_name;
        self.parameter_depth = patch.parameter_depth;
    }
}

/// Validated field values committed onto an existing row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowPatch {
    pub parameter_name: String,
    pub standard_name: String,
    pub parameter_depth: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditableField {
    ParameterName,
    StandardName,
    ParameterDepth,
}

impl EditableField {
    pub const ALL: [Self; 3] = [Self::ParameterName, Self::StandardName, Self::ParameterDepth];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ParameterName => "parameter_name",
            Self::StandardName => "standard_name",
            Self::ParameterDepth => "parameter_depth",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::ParameterName => "Incoming Name",
            Self::StandardName => "Standard Name",
            Self::ParameterDepth => "Depth",
        }
    }

    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::ParameterDepth)
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "parameter_name" | "name" => Some(Self::ParameterName),
            "standard_name" | "standard" => Some(Self::StandardName),
            "parameter_depth" | "depth" => Some(Self::ParameterDepth),
            _ => None,
        }
    }
}

/// One result from a recommendation lookup, before display mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardNameEntry {
    pub standard_name: String,
    /// Human-readable descriptions keyed by locale (`en`, `fr`, ...).
    #[serde(rename = "display_description", default)]
    pub description: BTreeMap<String, String>,
}

impl StandardNameEntry {
    pub fn new(standard_name: impl Into<String>, english: impl Into<String>) -> Self {
        Self {
            standard_name: standard_name.into(),
            description: BTreeMap::from([("en".to_owned(), english.into())]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecommendationCandidate {
    /// 1-based position in the result list.
    pub key: usize,
    pub standard_name: String,
    pub description: String,
}

/// Static organization and platform fields that accompany the parameter rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlatformMetadata {
    pub org_name: String,
    pub org_desc: String,
    pub org_url: String,
    pub creator_country: String,
    pub creator_email: String,
    pub creator_inst: String,
    pub creator_type: String,
    pub creator_sector: String,
    pub org_platform_id: String,
    pub platform_name: String,
    pub platform_type: String,
    pub data_set_type: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "dataSetInfoURL")]
    pub data_set_info_url: String,
    pub data_set_summary: String,
    pub data_set_title: String,
    pub data_set_wmo_platform_code: String,
    pub data_set_ncdb_id: String,
    pub data_set_ncdb_sharing: bool,
}

const SUMMARY_DEFAULT: &str = "Hodor. Hodor hodor, hodor. Hodor hodor hodor hodor hodor. Hodor. \
Hodor! Hodor hodor, hodor; hodor hodor hodor. Hodor. Hodor hodor; hodor hodor - hodor, hodor, \
hodor hodor. Hodor, hodor. Hodor. Hodor, hodor hodor hodor; hodor hodor; hodor hodor hodor! \
Hodor hodor HODOR! Hodor hodor... Hodor hodor hodor...";

impl Default for PlatformMetadata {
    fn default() -> Self {
        Self {
            org_name: "GLOS".to_owned(),
            org_desc: "Great Lakes Observing System".to_owned(),
            org_url: "glos.org".to_owned(),
            creator_country: "USA".to_owned(),
            creator_email: "joe@glos.org".to_owned(),
            creator_inst: "University of Michigan".to_owned(),
            creator_type: "institution".to_owned(),
            creator_sector: "gov_federal".to_owned(),
            org_platform_id: "99999".to_owned(),
            platform_name: "Code Sprint Finish Demo Platform".to_owned(),
            platform_type: "tower".to_owned(),
            data_set_type: "deployment_site".to_owned(),
            latitude: 42.3601,
            longitude: -83.0964,
            data_set_info_url: "https://glos.org/dataset/99999".to_owned(),
            data_set_summary: SUMMARY_DEFAULT.to_owned(),
            data_set_title: "Code Sprint Finish Demo Platform".to_owned(),
            data_set_wmo_platform_code: "99999".to_owned(),
            data_set_ncdb_id: "99999".to_owned(),
            data_set_ncdb_sharing: false,
        }
    }
}

/// The merged record handed to whatever submits the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    #[serde(flatten)]
    pub metadata: PlatformMetadata,
    pub platform_parameters: Vec<ParameterRow>,
}
