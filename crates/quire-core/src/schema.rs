//! Versioned JSON envelope and legacy payload migration.
//!
//! Every persisted or exported model is written as its own JSON object plus a
//! `schemaVersion` field. Payloads without a version come from the earlier
//! web release (Portuguese keys) and are migrated on load. Payloads of every
//! version are decoded leniently:
//!
//! - missing or `null` collections become empty
//! - non-string text values become empty strings
//! - missing identifiers are generated
//! - nested archives are flattened to one level
//!
//! Payloads written by a newer schema are rejected with
//! [`QuireError::UnsupportedSchema`].

use log::debug;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
    error::{QuireError, Result},
    models::{
        BlockLibrary, BlockStep, BrowsersTested, CodeBlock, CustomBlock, DatabasesTested,
        Document, ExternalLink, ItemId, KanbanDocument, KanbanStep, PreparationGroup,
        PreparationStep, Step, lenient,
    },
};

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

const VERSION_KEY: &str = "schemaVersion";

/// A model that can be written inside the versioned envelope.
pub trait Versioned: Serialize + DeserializeOwned + Sized {
    /// Name used in log lines and error messages.
    const KIND: &'static str;

    /// Converts an unversioned payload into the current model.
    fn from_legacy(value: Value) -> Result<Self>;

    /// Restores invariants that serde alone cannot express.
    fn normalize(self) -> Self {
        self
    }
}

#[derive(Serialize)]
struct Envelope<'a, T> {
    #[serde(rename = "schemaVersion")]
    schema_version: u32,
    #[serde(flatten)]
    body: &'a T,
}

impl<'a, T: Versioned> Envelope<'a, T> {
    fn new(body: &'a T) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            body,
        }
    }
}

/// Serializes `body` as a versioned JSON value.
pub fn encode_value<T: Versioned>(body: &T) -> Result<Value> {
    Ok(serde_json::to_value(Envelope::new(body))?)
}

/// Serializes `body` as compact versioned JSON.
pub fn encode<T: Versioned>(body: &T) -> Result<String> {
    Ok(serde_json::to_string(&Envelope::new(body))?)
}

/// Serializes `body` as pretty-printed (2-space) versioned JSON.
pub fn encode_pretty<T: Versioned>(body: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Envelope::new(body))?)
}

/// Parses JSON text into a model, migrating legacy payloads.
pub fn decode<T: Versioned>(text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)?;
    decode_value(value)
}

/// Converts an already parsed JSON value into a model.
pub fn decode_value<T: Versioned>(mut value: Value) -> Result<T> {
    match schema_version(&value)? {
        None | Some(1) => {
            debug!("Migrating legacy {} payload", T::KIND);
            Ok(T::from_legacy(value)?.normalize())
        }
        Some(found) if found > u64::from(CURRENT_SCHEMA_VERSION) => {
            Err(QuireError::UnsupportedSchema {
                found,
                supported: CURRENT_SCHEMA_VERSION,
            })
        }
        Some(_) => {
            if let Value::Object(map) = &mut value {
                map.remove(VERSION_KEY);
            }
            let decoded: T = serde_json::from_value(value)?;
            Ok(decoded.normalize())
        }
    }
}

fn schema_version(value: &Value) -> Result<Option<u64>> {
    match value {
        Value::Object(map) => match map.get(VERSION_KEY) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(number)) => number.as_u64().map(Some).ok_or_else(|| {
                QuireError::invalid_input(VERSION_KEY).with_reason("must be a positive integer")
            }),
            Some(_) => {
                Err(QuireError::invalid_input(VERSION_KEY).with_reason("must be a number"))
            }
        },
        Value::Array(_) => Ok(None),
        _ => Err(QuireError::invalid_input("payload").with_reason("expected a JSON object")),
    }
}

fn expect_object(value: &Value, kind: &str) -> Result<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(QuireError::invalid_input(kind).with_reason("expected a JSON object"))
    }
}

impl Versioned for Document {
    const KIND: &'static str = "template";

    fn from_legacy(value: Value) -> Result<Self> {
        expect_object(&value, Self::KIND)?;
        let legacy: LegacyTemplate = serde_json::from_value(value)?;
        Ok(legacy.into())
    }

    fn normalize(mut self) -> Self {
        self.archived = flatten_archive(std::mem::take(&mut self.archived));
        self
    }
}

impl Versioned for KanbanDocument {
    const KIND: &'static str = "kanban";

    fn from_legacy(value: Value) -> Result<Self> {
        expect_object(&value, Self::KIND)?;
        let legacy: LegacyKanban = serde_json::from_value(value)?;
        Ok(legacy.into())
    }
}

impl Versioned for BlockLibrary {
    const KIND: &'static str = "blocks";

    fn from_legacy(value: Value) -> Result<Self> {
        let blocks = match value {
            Value::Array(items) => items,
            Value::Object(mut map) => match map.remove("blocks") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        let blocks = blocks
            .into_iter()
            .filter_map(|item| serde_json::from_value::<LegacyBlock>(item).ok())
            .map(Into::into)
            .collect();
        Ok(BlockLibrary { blocks })
    }
}

/// Hoists nested archive entries so that snapshots never carry their own.
fn flatten_archive(archived: Vec<Document>) -> Vec<Document> {
    let mut flat = Vec::with_capacity(archived.len());
    for mut snapshot in archived {
        let nested = std::mem::take(&mut snapshot.archived);
        flat.push(snapshot);
        flat.extend(flatten_archive(nested));
    }
    flat
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LegacyTemplate {
    #[serde(deserialize_with = "lenient::string")]
    nome_tarefa: String,
    #[serde(deserialize_with = "lenient::string")]
    escopo: String,
    #[serde(deserialize_with = "lenient::string")]
    impacto: String,
    #[serde(deserialize_with = "lenient::strings")]
    criterios: Vec<String>,
    #[serde(deserialize_with = "lenient::items")]
    passos: Vec<LegacyStep>,
    #[serde(deserialize_with = "lenient::items")]
    preparativos: Vec<LegacyPreparation>,
    #[serde(deserialize_with = "lenient::items")]
    blocos_de_codigo: Vec<LegacyCodeBlock>,
    #[serde(deserialize_with = "lenient::strings")]
    comentarios_atencao: Vec<String>,
    #[serde(deserialize_with = "lenient::items")]
    links_externos: Vec<LegacyLink>,
    #[serde(deserialize_with = "lenient::or_default")]
    navegadores: BrowsersTested,
    #[serde(deserialize_with = "lenient::or_default")]
    bancos: DatabasesTested,
    #[serde(deserialize_with = "lenient::flag")]
    incluir_fluxograma: bool,
    #[serde(deserialize_with = "lenient::flag")]
    disponibilizar_fluxograma: bool,
    #[serde(deserialize_with = "lenient::items")]
    arquivados: Vec<LegacyTemplate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyStep {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    texto: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    critico: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_divisoria: bool,
    #[serde(default, deserialize_with = "lenient::items")]
    criterios_vinculados: Vec<usize>,
}

#[derive(Deserialize)]
struct LegacyPreparation {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    titulo: String,
    #[serde(default, deserialize_with = "lenient::items")]
    passos: Vec<LegacyPreparationStep>,
}

#[derive(Deserialize)]
struct LegacyPreparationStep {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    texto: String,
}

#[derive(Deserialize)]
struct LegacyCodeBlock {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    titulo: String,
    #[serde(default, deserialize_with = "lenient::string")]
    linguagem: String,
    #[serde(default, deserialize_with = "lenient::string")]
    codigo: String,
}

#[derive(Deserialize)]
struct LegacyLink {
    #[serde(default, deserialize_with = "lenient::string")]
    titulo: String,
    #[serde(default, deserialize_with = "lenient::string")]
    url: String,
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct LegacyKanban {
    #[serde(deserialize_with = "lenient::string")]
    descricao_problema: String,
    #[serde(deserialize_with = "lenient::items")]
    passos: Vec<LegacyKanbanStep>,
    #[serde(deserialize_with = "lenient::string")]
    resultado_esperado: String,
    #[serde(deserialize_with = "lenient::string")]
    resultado_obtido: String,
    #[serde(deserialize_with = "lenient::string")]
    analise_extra: String,
    #[serde(deserialize_with = "lenient::string")]
    implementacao: String,
    #[serde(deserialize_with = "lenient::string")]
    detalhamento: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyKanbanStep {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    texto: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    is_divisoria: bool,
}

#[derive(Deserialize)]
struct LegacyBlock {
    #[serde(default = "ItemId::generate", deserialize_with = "lenient::id")]
    id: ItemId,
    #[serde(default, deserialize_with = "lenient::string")]
    titulo: String,
    #[serde(default, deserialize_with = "lenient::items")]
    passos: Vec<LegacyBlockStep>,
}

#[derive(Deserialize)]
struct LegacyBlockStep {
    #[serde(default, deserialize_with = "lenient::string")]
    texto: String,
}

impl From<LegacyTemplate> for Document {
    fn from(legacy: LegacyTemplate) -> Self {
        Document {
            task_name: legacy.nome_tarefa,
            scope: legacy.escopo,
            impact: legacy.impacto,
            criteria: legacy.criterios,
            steps: legacy.passos.into_iter().map(Into::into).collect(),
            preparations: legacy.preparativos.into_iter().map(Into::into).collect(),
            code_blocks: legacy.blocos_de_codigo.into_iter().map(Into::into).collect(),
            attention_comments: legacy.comentarios_atencao,
            external_links: legacy
                .links_externos
                .into_iter()
                .map(|link| ExternalLink {
                    title: link.titulo,
                    url: link.url,
                })
                .collect(),
            browsers_tested: legacy.navegadores,
            databases_tested: legacy.bancos,
            make_diagram_available: legacy.incluir_fluxograma || legacy.disponibilizar_fluxograma,
            archived: legacy.arquivados.into_iter().map(Into::into).collect(),
            archived_at: None,
        }
    }
}

impl From<LegacyStep> for Step {
    fn from(legacy: LegacyStep) -> Self {
        Step {
            id: legacy.id,
            text: legacy.texto,
            is_critical: legacy.critico,
            is_divider: legacy.is_divisoria,
            linked_criteria: legacy.criterios_vinculados.into_iter().collect(),
        }
    }
}

impl From<LegacyPreparation> for PreparationGroup {
    fn from(legacy: LegacyPreparation) -> Self {
        PreparationGroup {
            id: legacy.id,
            title: legacy.titulo,
            steps: legacy
                .passos
                .into_iter()
                .map(|step| PreparationStep {
                    id: step.id,
                    text: step.texto,
                })
                .collect(),
        }
    }
}

impl From<LegacyCodeBlock> for CodeBlock {
    fn from(legacy: LegacyCodeBlock) -> Self {
        CodeBlock {
            id: legacy.id,
            title: legacy.titulo,
            language: legacy.linguagem.parse().unwrap_or_default(),
            code: legacy.codigo,
        }
    }
}

impl From<LegacyKanban> for KanbanDocument {
    fn from(legacy: LegacyKanban) -> Self {
        KanbanDocument {
            problem_description: legacy.descricao_problema,
            steps: legacy
                .passos
                .into_iter()
                .map(|step| KanbanStep {
                    id: step.id,
                    text: step.texto,
                    is_divider: step.is_divisoria,
                })
                .collect(),
            expected_result: legacy.resultado_esperado,
            actual_result: legacy.resultado_obtido,
            extra_analysis: legacy.analise_extra,
            implementation: legacy.implementacao,
            details: legacy.detalhamento,
        }
    }
}

impl From<LegacyBlock> for CustomBlock {
    fn from(legacy: LegacyBlock) -> Self {
        CustomBlock {
            id: legacy.id,
            title: legacy.titulo,
            steps: legacy
                .passos
                .into_iter()
                .map(|step| BlockStep { text: step.texto })
                .collect(),
        }
    }
}
