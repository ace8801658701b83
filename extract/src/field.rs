//! Output fields and their wire names.

use serde::{Deserialize, Serialize};

/// A metadata field the pipeline resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    /// Subject.
    #[serde(rename = "disciplina")]
    Subject,

    /// Canonical grade label such as "6º".
    #[serde(rename = "ano")]
    Grade,

    /// Cognitive level.
    #[serde(rename = "nivelBloom")]
    CognitiveLevel,

    /// Question type.
    #[serde(rename = "tipoQuestao")]
    QuestionType,

    /// Source-text type.
    #[serde(rename = "tipoTextoBase")]
    TextType,

    /// Student profile.
    #[serde(rename = "perfilAluno")]
    StudentProfile,

    /// Thematic unit.
    #[serde(rename = "unidadeTematica")]
    Unit,

    /// Knowledge object.
    #[serde(rename = "objetoConhecimento")]
    Object,

    /// Skill statement.
    #[serde(rename = "habilidade")]
    Skill,
}

impl Field {
    /// Order in which the pipeline resolves fields.
    pub const RESOLUTION_ORDER: [Field; 9] = [
        Field::Subject,
        Field::Grade,
        Field::CognitiveLevel,
        Field::QuestionType,
        Field::TextType,
        Field::StudentProfile,
        Field::Unit,
        Field::Object,
        Field::Skill,
    ];

    /// Order in which missing fields are reported.
    pub const CHECKLIST: [Field; 9] = [
        Field::Subject,
        Field::Grade,
        Field::StudentProfile,
        Field::Unit,
        Field::Object,
        Field::Skill,
        Field::CognitiveLevel,
        Field::QuestionType,
        Field::TextType,
    ];

    /// Wire name of the field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Subject => "disciplina",
            Self::Grade => "ano",
            Self::CognitiveLevel => "nivelBloom",
            Self::QuestionType => "tipoQuestao",
            Self::TextType => "tipoTextoBase",
            Self::StudentProfile => "perfilAluno",
            Self::Unit => "unidadeTematica",
            Self::Object => "objetoConhecimento",
            Self::Skill => "habilidade",
        }
    }

    /// Field for a wire name.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::RESOLUTION_ORDER
            .into_iter()
            .find(|field| field.key() == key)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
