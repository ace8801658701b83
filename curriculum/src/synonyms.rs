//! Synonym table and query expansion.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CurriculumError, Result};

/// Curated synonym entries shipped with the crate.
const BUILTIN: &[(&str, &[&str])] = &[
    // História: Era Vargas
    (
        "era vargas",
        &[
            "período varguista",
            "vargas",
            "getúlio vargas",
            "governo vargas",
            "varguista",
            "getúlio",
            "era getúlio",
            "era de vargas",
        ],
    ),
    (
        "vargas",
        &[
            "período varguista",
            "era vargas",
            "getúlio vargas",
            "varguista",
            "getúlio",
            "governo vargas",
            "era de vargas",
        ],
    ),
    (
        "período varguista",
        &[
            "era vargas",
            "vargas",
            "getúlio vargas",
            "varguista",
            "governo vargas",
            "era de vargas",
        ],
    ),
    (
        "getúlio",
        &[
            "vargas",
            "getúlio vargas",
            "período varguista",
            "era vargas",
            "governo vargas",
            "era de vargas",
        ],
    ),
    (
        "getúlio vargas",
        &[
            "vargas",
            "período varguista",
            "era vargas",
            "varguista",
            "governo vargas",
            "era de vargas",
        ],
    ),
    (
        "governo vargas",
        &[
            "era vargas",
            "período varguista",
            "vargas",
            "getúlio vargas",
            "varguista",
            "era de vargas",
        ],
    ),
    (
        "varguista",
        &[
            "vargas",
            "era vargas",
            "período varguista",
            "getúlio vargas",
            "governo vargas",
            "era de vargas",
        ],
    ),
    (
        "era de vargas",
        &[
            "era vargas",
            "período varguista",
            "vargas",
            "getúlio vargas",
            "varguista",
            "governo vargas",
        ],
    ),
    // História: República
    (
        "república",
        &["republicano", "republicana", "regime republicano", "proclamação república"],
    ),
    ("primeira república", &["república velha", "oligarquias", "café com leite"]),
    ("república velha", &["primeira república", "oligarquias"]),
    ("proclamação", &["proclamação república", "início república"]),
    // História: trabalhismo
    (
        "trabalhismo",
        &["trabalhista", "movimento trabalhista", "trabalhadores", "direitos trabalhistas"],
    ),
    ("trabalhista", &["trabalhismo", "movimento trabalhista", "trabalhadores"]),
    (
        "trabalhadores",
        &["trabalhismo", "trabalhista", "classe trabalhadora", "operários"],
    ),
    ("operários", &["trabalhadores", "classe operária", "proletariado"]),
    // História: urbanização
    (
        "urbanização",
        &["crescimento urbano", "cidades", "metropolização", "urbano", "vida urbana"],
    ),
    ("urbano", &["urbanização", "cidade", "vida urbana", "crescimento urbano"]),
    ("urbana", &["urbanização", "cidade", "vida urbana", "crescimento urbano"]),
    ("vida urbana", &["urbanização", "urbano", "cidade", "crescimento urbano"]),
    (
        "segregação espacial",
        &["segregação urbana", "divisão espacial", "desigualdade espacial"],
    ),
    // História: guerras
    (
        "segunda guerra",
        &["segunda guerra mundial", "guerra mundial", "wwii", "2ª guerra", "ii guerra"],
    ),
    (
        "segunda guerra mundial",
        &["segunda guerra", "guerra mundial", "wwii", "2ª guerra"],
    ),
    (
        "primeira guerra",
        &["primeira guerra mundial", "grande guerra", "wwi", "1ª guerra"],
    ),
    (
        "guerra fria",
        &[
            "confronto eua urss",
            "bipolarização",
            "capitalismo vs socialismo",
            "guerra ideológica",
        ],
    ),
    // História: ditadura
    (
        "ditadura militar",
        &[
            "ditadura civil-militar",
            "regime militar",
            "golpe de 64",
            "golpe 1964",
            "regime autoritário",
        ],
    ),
    (
        "ditadura civil-militar",
        &["ditadura militar", "regime militar", "golpe 64"],
    ),
    (
        "regime militar",
        &["ditadura militar", "ditadura civil-militar", "autoritarismo"],
    ),
    ("golpe", &["golpe militar", "golpe estado", "tomada poder"]),
    // História: outros
    ("revolução", &["revolucionário", "movimento revolucionário", "revolta"]),
    ("independência", &["independente", "emancipação", "libertação"]),
    ("abolição", &["abolicionismo", "fim escravidão", "libertação escravos"]),
    ("escravidão", &["escravos", "trabalho escravo", "regime escravista"]),
    ("colonização", &["colonial", "colonialismo", "período colonial"]),
    ("império", &["imperial", "período imperial", "monarquia"]),
    ("constituição", &["carta magna", "lei fundamental", "constituinte"]),
    (
        "redemocratização",
        &["retorno democracia", "abertura política", "transição democrática"],
    ),
    // Matemática: criptografia
    (
        "criptografia",
        &[
            "codificação",
            "codificação da informação",
            "sistemas de criptografia",
            "codificar",
            "criptografar",
        ],
    ),
    (
        "sistemas de criptografia",
        &["codificação", "codificação da informação", "criptografia", "criptografar"],
    ),
    (
        "codificação",
        &["criptografia", "sistemas de criptografia", "codificar", "código"],
    ),
    (
        "codificação da informação",
        &["criptografia", "sistemas de criptografia", "codificação"],
    ),
    // Matemática: outros
    ("frações", &["números fracionários", "divisão", "razão", "fração"]),
    ("equações", &["equação", "expressões algébricas", "álgebra", "igualdade"]),
    ("geometria", &["geométrico", "figuras geométricas", "formas"]),
    ("álgebra", &["algébrico", "expressões algébricas", "equações"]),
    ("probabilidade", &["chance", "possibilidade", "estatística"]),
    ("porcentagem", &["percentual", "taxa", "razão centesimal"]),
    // Ciências: corpo e saúde
    (
        "corpo humano",
        &["anatomia", "fisiologia", "sistemas do corpo", "organismo"],
    ),
    ("anatomia", &["corpo humano", "estrutura corporal", "órgãos"]),
    ("sistema", &["sistemas", "aparelho", "conjunto"]),
    // Ciências: meio ambiente
    (
        "meio ambiente",
        &["ecologia", "natureza", "sustentabilidade", "ambiente"],
    ),
    ("ecologia", &["meio ambiente", "ecossistema", "natureza"]),
    ("sustentabilidade", &["sustentável", "preservação", "conservação"]),
    (
        "energia",
        &["formas de energia", "transformação de energia", "energético"],
    ),
    // Ciências: outros
    ("célula", &["celular", "células", "estrutura celular"]),
    ("evolução", &["evolutivo", "seleção natural", "darwin"]),
    ("matéria", &["substância", "material", "composição"]),
    // Geografia: clima e relevo
    (
        "clima",
        &["climatologia", "tempo atmosférico", "fenômenos climáticos", "climático"],
    ),
    ("relevo", &["formas de relevo", "geomorfologia", "topografia"]),
    ("vegetação", &["flora", "bioma", "cobertura vegetal"]),
    // Geografia: população e espaço
    (
        "população",
        &["demográfico", "demografia", "habitantes", "populoso"],
    ),
    (
        "migração",
        &["migratório", "imigração", "emigração", "deslocamento"],
    ),
    ("território", &["territorial", "espaço geográfico", "área"]),
    ("fronteira", &["limite", "divisa", "fronteiras"]),
    // Geografia: economia
    ("agricultura", &["agrícola", "agropecuária", "cultivo"]),
    ("indústria", &["industrial", "industrialização", "fábrica"]),
    ("comércio", &["comercial", "mercado", "trocas"]),
    ("globalização", &["global", "mundialização", "integração mundial"]),
    // Língua Portuguesa: interpretação
    (
        "interpretação",
        &["compreensão textual", "leitura", "análise de texto", "interpretar"],
    ),
    ("compreensão", &["entendimento", "interpretação", "compreender"]),
    ("leitura", &["ler", "texto", "interpretação"]),
    // Língua Portuguesa: gramática
    (
        "gramática",
        &["sintaxe", "morfologia", "análise linguística", "gramatical"],
    ),
    ("sintaxe", &["estrutura sintática", "análise sintática", "frase"]),
    ("morfologia", &["estrutura morfológica", "formação palavras"]),
    ("ortografia", &["escrita", "grafia", "ortográfico"]),
    // Língua Portuguesa: gêneros textuais
    ("narrativa", &["narração", "conto", "história", "narrativo"]),
    (
        "dissertação",
        &["dissertativo", "argumentação", "texto argumentativo"],
    ),
    ("descrição", &["descritivo", "caracterização"]),
    ("poesia", &["poema", "poético", "verso"]),
    ("crônica", &["cronista", "texto jornalístico"]),
];

/// Mapping from a lower-case phrase to equivalent phrases.
///
/// Not required to be symmetric. Keys are matched as substrings of the
/// lower-cased query, longest key first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    entries: IndexMap<String, Vec<String>>,
}

impl Default for SynonymTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SynonymTable {
    /// Build a table from arbitrary entries. Keys are lower-cased.
    pub fn new(entries: IndexMap<String, Vec<String>>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, synonyms)| (key.to_lowercase(), synonyms))
            .collect();
        Self { entries }
    }

    /// The curated table shipped with the crate.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .map(|(key, synonyms)| {
                (
                    (*key).to_string(),
                    synonyms.iter().map(|s| (*s).to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Parse a JSON object of `"key": ["synonym", ...]`.
    pub fn from_json(json: &str) -> Result<Self> {
        let entries: IndexMap<String, Vec<String>> = serde_json::from_str(json)?;
        if entries.is_empty() {
            return Err(CurriculumError::InvalidFormat(
                "synonym table has no entries".to_string(),
            ));
        }
        Ok(Self::new(entries))
    }

    /// Load a JSON synonym table from disk.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CurriculumError::NotFound(path.display().to_string()));
        }
        let json = std::fs::read_to_string(path)?;
        let table = Self::from_json(&json)?;
        info!(path = %path.display(), entries = table.len(), "Loaded synonym table");
        Ok(table)
    }

    /// Synonyms listed for a key.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys by descending character length, table order among equals.
    pub fn keys_longest_first(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
        keys
    }

    /// Expand a query into text variants.
    ///
    /// The first variant is always the lower-cased query. For every key found
    /// in it, longest first, the key's synonyms are appended followed by a
    /// copy of the query with the key replaced by each synonym. Duplicates
    /// are dropped keeping the first occurrence.
    pub fn expand(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        let mut variants = vec![lowered.clone()];

        for key in self.keys_longest_first() {
            if !lowered.contains(key) {
                continue;
            }
            let Some(synonyms) = self.entries.get(key) else {
                continue;
            };
            debug!(key, synonyms = synonyms.len(), "Synonym key matched");

            variants.extend(synonyms.iter().cloned());
            for synonym in synonyms {
                let replaced = lowered.replace(key, synonym);
                if replaced != lowered {
                    variants.push(replaced);
                }
            }
        }

        let mut unique = Vec::with_capacity(variants.len());
        for variant in variants {
            if !unique.contains(&variant) {
                unique.push(variant);
            }
        }
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_first_variant_is_lowercased_input() {
        let table = SynonymTable::builtin();
        for text in ["Era Vargas", "FRAÇÕES", "texto sem chave", ""] {
            assert_eq!(table.expand(text)[0], text.to_lowercase());
        }
    }

    #[test]
    fn test_longest_key_first() {
        let table = SynonymTable::builtin();
        let variants = table.expand("Era Vargas");

        // "era vargas" synonyms come before anything produced by "vargas".
        assert_eq!(variants[1], "período varguista");
        assert!(variants.contains(&"era getúlio".to_string()));

        let first_vargas_only = variants
            .iter()
            .position(|v| v == "era período varguista")
            .unwrap();
        let last_long_key = variants
            .iter()
            .position(|v| v == "era de vargas")
            .unwrap();
        assert!(last_long_key < first_vargas_only);
    }

    #[test]
    fn test_no_duplicates() {
        let table = SynonymTable::builtin();
        let variants = table.expand("era vargas");
        let mut seen = std::collections::HashSet::new();
        for v in &variants {
            assert!(seen.insert(v), "duplicate variant {v}");
        }
    }

    #[test]
    fn test_no_key_yields_single_variant() {
        let table = SynonymTable::builtin();
        assert_eq!(table.expand("Napoleão Bonaparte"), vec!["napoleão bonaparte"]);
    }

    #[test]
    fn test_keys_longest_first_is_stable() {
        let mut entries = IndexMap::new();
        entries.insert("abc".to_string(), vec![]);
        entries.insert("xy".to_string(), vec![]);
        entries.insert("def".to_string(), vec![]);
        let table = SynonymTable::new(entries);
        assert_eq!(table.keys_longest_first(), vec!["abc", "def", "xy"]);
    }

    #[test]
    fn test_from_json_override() {
        let table = SynonymTable::from_json(r#"{"Clima": ["tempo"]}"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("clima"), Some(&["tempo".to_string()][..]));
        assert_eq!(table.expand("o clima"), vec!["o clima", "tempo", "o tempo"]);
    }

    #[test]
    fn test_from_json_rejects_empty() {
        assert!(SynonymTable::from_json("{}").is_err());
        assert!(SynonymTable::from_json("[]").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = SynonymTable::load(Path::new("/nonexistent/synonyms.json")).unwrap_err();
        assert!(matches!(err, CurriculumError::NotFound(_)));
    }
}
