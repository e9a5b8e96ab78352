//! Reusable preparation blocks.

use serde::{Deserialize, Serialize};

use super::{ItemId, lenient};

/// A saved preparation group that can be imported into any template.
///
/// Accepts the legacy Portuguese keys so that blocks exported from the web
/// version decode without a migration step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomBlock {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,
    #[serde(default, alias = "titulo", deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, alias = "passos", deserialize_with = "lenient::items")]
    pub steps: Vec<BlockStep>,
}

impl CustomBlock {
    pub fn new(title: impl Into<String>, steps: impl IntoIterator<Item = String>) -> Self {
        Self {
            id: ItemId::generate(),
            title: title.into(),
            steps: steps.into_iter().map(|text| BlockStep { text }).collect(),
        }
    }
}

/// One line of a [`CustomBlock`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockStep {
    #[serde(default, alias = "texto", deserialize_with = "lenient::string")]
    pub text: String,
}

/// Every saved [`CustomBlock`], in menu order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockLibrary {
    #[serde(default, deserialize_with = "lenient::items")]
    pub blocks: Vec<CustomBlock>,
}
