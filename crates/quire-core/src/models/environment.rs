//! Tested-environment checklists: browsers and database targets.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient;

/// Browsers that can be ticked as tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Edge,
}

impl Browser {
    pub const ALL: [Browser; 2] = [Browser::Chrome, Browser::Edge];

    /// Label used in the rendered checklist.
    pub fn label(&self) -> &'static str {
        match self {
            Browser::Chrome => "Google Chrome",
            Browser::Edge => "Microsoft Edge",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Edge => "edge",
        }
    }
}

impl FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chrome" => Ok(Browser::Chrome),
            "edge" => Ok(Browser::Edge),
            _ => Err(format!("Invalid browser: {s}")),
        }
    }
}

/// Encoding family used to group database targets in the checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Iso88591,
    Utf8,
}

impl Encoding {
    pub fn heading(&self) -> &'static str {
        match self {
            Encoding::Iso88591 => "ISO 8859-1",
            Encoding::Utf8 => "UTF8",
        }
    }
}

/// Database targets that can be ticked as tested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseTarget {
    SqlServer,
    OracleIso,
    Postgres,
    OracleUtf,
}

impl DatabaseTarget {
    pub const ALL: [DatabaseTarget; 4] = [
        DatabaseTarget::SqlServer,
        DatabaseTarget::OracleIso,
        DatabaseTarget::Postgres,
        DatabaseTarget::OracleUtf,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DatabaseTarget::SqlServer => "SQL Server",
            DatabaseTarget::OracleIso | DatabaseTarget::OracleUtf => "Oracle",
            DatabaseTarget::Postgres => "PostgreSQL",
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            DatabaseTarget::SqlServer | DatabaseTarget::OracleIso => Encoding::Iso88591,
            DatabaseTarget::Postgres | DatabaseTarget::OracleUtf => Encoding::Utf8,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseTarget::SqlServer => "sqlserver",
            DatabaseTarget::OracleIso => "oracle-iso",
            DatabaseTarget::Postgres => "postgres",
            DatabaseTarget::OracleUtf => "oracle-utf",
        }
    }
}

impl FromStr for DatabaseTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "sqlserver" | "sql-server" => Ok(DatabaseTarget::SqlServer),
            "oracle-iso" | "oracleiso" => Ok(DatabaseTarget::OracleIso),
            "postgres" | "postgresql" => Ok(DatabaseTarget::Postgres),
            "oracle-utf" | "oracleutf" => Ok(DatabaseTarget::OracleUtf),
            _ => Err(format!("Invalid database target: {s}")),
        }
    }
}

/// Browser checklist flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BrowsersTested {
    #[serde(deserialize_with = "lenient::flag")]
    pub chrome: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub edge: bool,
}

impl BrowsersTested {
    pub fn get(&self, browser: Browser) -> bool {
        match browser {
            Browser::Chrome => self.chrome,
            Browser::Edge => self.edge,
        }
    }

    pub fn set(&mut self, browser: Browser, value: bool) {
        match browser {
            Browser::Chrome => self.chrome = value,
            Browser::Edge => self.edge = value,
        }
    }

    pub fn any(&self) -> bool {
        self.chrome || self.edge
    }
}

/// Database checklist flags.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabasesTested {
    #[serde(deserialize_with = "lenient::flag")]
    pub sqlserver: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub oracle_iso: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub postgres: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub oracle_utf: bool,
}

impl DatabasesTested {
    pub fn get(&self, target: DatabaseTarget) -> bool {
        match target {
            DatabaseTarget::SqlServer => self.sqlserver,
            DatabaseTarget::OracleIso => self.oracle_iso,
            DatabaseTarget::Postgres => self.postgres,
            DatabaseTarget::OracleUtf => self.oracle_utf,
        }
    }

    pub fn set(&mut self, target: DatabaseTarget, value: bool) {
        match target {
            DatabaseTarget::SqlServer => self.sqlserver = value,
            DatabaseTarget::OracleIso => self.oracle_iso = value,
            DatabaseTarget::Postgres => self.postgres = value,
            DatabaseTarget::OracleUtf => self.oracle_utf = value,
        }
    }

    pub fn any(&self) -> bool {
        DatabaseTarget::ALL.iter().any(|target| self.get(*target))
    }
}
