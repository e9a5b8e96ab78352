//! Auxiliary sections of a template: preparations, code blocks and links.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{ItemId, lenient};

/// A titled, independently ordered list of setup steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PreparationGroup {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::items")]
    pub steps: Vec<PreparationStep>,
}

impl PreparationGroup {
    /// Create an empty group with a fresh identifier.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            title: title.into(),
            steps: Vec::new(),
        }
    }
}

/// One entry of a [`PreparationGroup`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PreparationStep {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub text: String,
}

impl PreparationStep {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            text: text.into(),
        }
    }
}

/// Fence tags accepted for code blocks.
///
/// Unknown tags found in imported documents decode as [`CodeLanguage::Text`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CodeLanguage {
    Sql,
    Javascript,
    Typescript,
    Json,
    Xml,
    Html,
    Css,
    Bash,
    Python,
    Java,
    Csharp,
    #[default]
    #[serde(other)]
    Text,
}

impl CodeLanguage {
    /// Every supported language, in menu order.
    pub const ALL: [CodeLanguage; 12] = [
        CodeLanguage::Sql,
        CodeLanguage::Javascript,
        CodeLanguage::Typescript,
        CodeLanguage::Json,
        CodeLanguage::Xml,
        CodeLanguage::Html,
        CodeLanguage::Css,
        CodeLanguage::Bash,
        CodeLanguage::Python,
        CodeLanguage::Java,
        CodeLanguage::Csharp,
        CodeLanguage::Text,
    ];

    /// Tag written after the opening code fence.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeLanguage::Sql => "sql",
            CodeLanguage::Javascript => "javascript",
            CodeLanguage::Typescript => "typescript",
            CodeLanguage::Json => "json",
            CodeLanguage::Xml => "xml",
            CodeLanguage::Html => "html",
            CodeLanguage::Css => "css",
            CodeLanguage::Bash => "bash",
            CodeLanguage::Python => "python",
            CodeLanguage::Java => "java",
            CodeLanguage::Csharp => "csharp",
            CodeLanguage::Text => "text",
        }
    }
}

impl FromStr for CodeLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" => Ok(CodeLanguage::Sql),
            "javascript" | "js" => Ok(CodeLanguage::Javascript),
            "typescript" | "ts" => Ok(CodeLanguage::Typescript),
            "json" => Ok(CodeLanguage::Json),
            "xml" => Ok(CodeLanguage::Xml),
            "html" => Ok(CodeLanguage::Html),
            "css" => Ok(CodeLanguage::Css),
            "bash" | "sh" | "shell" => Ok(CodeLanguage::Bash),
            "python" | "py" => Ok(CodeLanguage::Python),
            "java" => Ok(CodeLanguage::Java),
            "csharp" | "cs" | "c#" => Ok(CodeLanguage::Csharp),
            "text" | "plaintext" | "txt" => Ok(CodeLanguage::Text),
            _ => Err(format!("Invalid code language: {s}")),
        }
    }
}

/// A titled snippet rendered as a fenced code block.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeBlock {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub language: CodeLanguage,
    #[serde(default, deserialize_with = "lenient::string")]
    pub code: String,
}

impl CodeBlock {
    pub fn new(title: impl Into<String>, language: CodeLanguage, code: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            title: title.into(),
            language,
            code: code.into(),
        }
    }
}

/// Auxiliary reference link attached to the template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLink {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
}
