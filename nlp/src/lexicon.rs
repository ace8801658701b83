//! Portuguese function-word tables used by the heuristic annotator.
//!
//! All entries are folded (lowercase, no diacritics).

pub const DETERMINERS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "este", "esta", "estes", "estas", "esse",
    "essa", "esses", "essas", "aquele", "aquela", "aqueles", "aquelas", "seu", "sua", "seus",
    "suas", "meu", "minha", "meus", "minhas", "nosso", "nossa", "nossos", "nossas", "todo",
    "toda", "todos", "todas", "cada", "outro", "outra", "outros", "outras",
];

pub const PREPOSITIONS: &[&str] = &[
    "de", "da", "do", "das", "dos", "em", "na", "no", "nas", "nos", "ao", "aos", "a", "as",
    "por", "pelo", "pela", "pelos", "pelas", "para", "pra", "com", "sem", "sob", "sobre",
    "entre", "ate", "desde", "apos", "contra", "perante", "num", "numa", "dum", "duma",
];

pub const CONJUNCTIONS: &[&str] = &[
    "e", "ou", "mas", "porem", "contudo", "todavia", "que", "se", "porque", "pois", "como",
    "quando", "nem", "embora",
];

pub const PRONOUNS: &[&str] = &[
    "eu", "tu", "ele", "ela", "nos", "vos", "eles", "elas", "me", "te", "lhe", "lhes", "voce",
    "voces", "isso", "isto", "aquilo", "qual", "quais", "quem", "onde", "cujo", "cuja",
];

pub const OTHER_STOP_WORDS: &[&str] = &[
    "nao", "sim", "mais", "menos", "muito", "muita", "muitos", "muitas", "pouco", "ja", "ainda",
    "tambem", "so", "bem", "mal", "la", "aqui", "ali", "entao", "assim", "ser", "e", "era",
    "foi", "sera", "esta", "estao", "ter", "tem", "tinha", "ha", "sobre",
];

/// Connectors allowed inside a named entity or noun chunk.
pub const CONNECTORS: &[&str] = &["de", "da", "do", "das", "dos"];

/// Prepositions that introduce a location when followed by a proper noun.
pub const LOCATIVE_PREPOSITIONS: &[&str] = &["em", "no", "na", "nos", "nas"];

/// Adjective suffixes recognised by the heuristic tagger.
pub const ADJECTIVE_SUFFIXES: &[&str] = &[
    "ico", "ica", "icos", "icas", "oso", "osa", "osos", "osas", "ivo", "iva", "ivos", "ivas",
    "ario", "aria", "arios", "arias", "avel", "aveis", "ivel", "iveis",
];

/// Gerund and infinitive suffixes recognised as verbs.
pub const VERB_SUFFIXES: &[&str] = &["ar", "er", "ir", "ando", "endo", "indo"];

/// Whether a folded word is a stop word.
pub fn is_stop_word(norm: &str) -> bool {
    DETERMINERS.contains(&norm)
        || PREPOSITIONS.contains(&norm)
        || CONJUNCTIONS.contains(&norm)
        || PRONOUNS.contains(&norm)
        || OTHER_STOP_WORDS.contains(&norm)
}
