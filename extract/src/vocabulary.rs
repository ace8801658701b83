//! Static keyword tables for the non-curriculum fields.
//!
//! Tables are `(label, phrases)` slices so iteration order is fixed; it decides
//! ties between categories.

/// A category label with the phrases that signal it.
pub type Category = (&'static str, &'static [&'static str]);

/// Subject phrases, matched on tokens with accents folded.
pub const SUBJECTS: &[Category] = &[
    (
        "Matemática",
        &[
            "matemática", "matematica", "math", "cálculo", "calculo", "álgebra", "algebra",
            "geometria", "aritmética", "aritmetica", "números", "numeros", "equações",
            "equacoes", "frações", "fracoes", "fração", "fracao", "trigonometria",
            "estatística", "estatistica", "probabilidade",
        ],
    ),
    (
        "Língua Portuguesa",
        &[
            "português", "portugues", "lingua portuguesa", "língua portuguesa", "gramática",
            "gramatica", "redação", "redacao", "literatura", "interpretação", "interpretacao",
            "texto", "leitura", "escrita", "ortografia", "sintaxe", "morfologia", "semântica",
            "semantica",
        ],
    ),
    (
        "Ciências",
        &[
            "ciências", "ciencias", "biologia", "física", "fisica", "química", "quimica",
            "natureza", "meio ambiente", "ecologia", "corpo humano", "animais", "plantas",
            "células", "celulas", "energia", "matéria", "materia",
        ],
    ),
    (
        "História",
        &[
            "história", "historia", "histórico", "historico", "brasil", "mundo", "guerra",
            "revolução", "revolucao", "período", "periodo", "era", "século", "seculo",
            "civilização", "civilizacao", "império", "imperio", "república", "republica",
            "ditadura", "democracia", "vargas", "getúlio", "getulio", "dom pedro",
            "tiradentes", "colonial", "independência", "independencia", "abolição",
            "abolicao", "escravidão", "escravidao", "revolução industrial",
            "revolucao industrial", "feudalismo", "capitalismo", "socialismo", "comunismo",
            "fascismo", "nazismo",
        ],
    ),
    (
        "Geografia",
        &[
            "geografia", "geográfico", "geografico", "mapa", "mapas", "região", "regiao",
            "clima", "relevo", "população", "populacao", "território", "territorio", "país",
            "pais", "continente", "urbanização", "urbanizacao", "globalização",
            "globalizacao",
        ],
    ),
    (
        "Inglês",
        &[
            "inglês", "ingles", "english", "língua inglesa", "lingua inglesa", "vocabulary",
            "grammar", "reading", "writing",
        ],
    ),
    (
        "Arte",
        &[
            "arte", "artes", "música", "musica", "pintura", "escultura", "teatro", "dança",
            "danca", "artístico", "artistico", "desenho", "cultura", "estética", "estetica",
        ],
    ),
    (
        "Educação Física",
        &[
            "educação física", "educacao fisica", "esporte", "esportes", "atividade física",
            "atividade fisica", "ginástica", "ginastica", "jogos", "atletismo", "saúde", "saude",
        ],
    ),
];

/// Cognitive-level phrases (Bloom's taxonomy).
pub const COGNITIVE_LEVELS: &[Category] = &[
    (
        "conhecimento",
        &[
            "lembrar", "recordar", "memorizar", "listar", "definir", "identificar", "nomear",
            "reconhecer", "conhecimento", "memorização", "memorizacao", "saber", "conhecer",
            "relembrar", "citar", "enumerar", "rotular",
        ],
    ),
    (
        "compreensao",
        &[
            "compreender", "entender", "explicar", "interpretar", "resumir", "descrever",
            "classificar", "comparar", "compreensão", "compreensao", "entendimento",
            "interpretação", "interpretacao", "parafrasear", "ilustrar", "exemplificar",
        ],
    ),
    (
        "aplicacao",
        &[
            "aplicar", "usar", "executar", "implementar", "resolver", "demonstrar", "praticar",
            "calcular", "aplicação", "aplicacao", "utilizar", "empregar", "operar",
            "solucionar",
        ],
    ),
    (
        "analise",
        &[
            "analisar", "examinar", "investigar", "comparar", "diferenciar", "organizar",
            "desconstruir", "relacionar", "análise", "analise", "distinguir", "categorizar",
            "contrastar", "separar", "dividir",
        ],
    ),
    (
        "sintese",
        &[
            "criar", "desenvolver", "construir", "planejar", "produzir", "inventar", "elaborar",
            "sintetizar", "síntese", "sintese", "design", "projetar", "formular", "compor",
            "gerar", "combinar",
        ],
    ),
    (
        "avaliacao",
        &[
            "avaliar", "julgar", "criticar", "justificar", "argumentar", "defender",
            "recomendar", "decidir", "avaliação", "avaliacao", "opinar", "validar", "verificar",
            "testar", "medir", "estimar",
        ],
    ),
];

/// Grade regex patterns, matched case-insensitively on the original text.
pub const GRADES: &[(&str, &[&str])] = &[
    ("1º", &[r"1[oº°]?\s*ano", r"primeiro\s+ano", r"\b1\s*ano\b"]),
    ("2º", &[r"2[oº°]?\s*ano", r"segundo\s+ano", r"\b2\s*ano\b"]),
    ("3º", &[r"3[oº°]?\s*ano", r"terceiro\s+ano", r"\b3\s*ano\b"]),
    ("4º", &[r"4[oº°]?\s*ano", r"quarto\s+ano", r"\b4\s*ano\b"]),
    ("5º", &[r"5[oº°]?\s*ano", r"quinto\s+ano", r"\b5\s*ano\b"]),
    ("6º", &[r"6[oº°]?\s*ano", r"sexto\s+ano", r"\b6\s*ano\b"]),
    ("7º", &[r"7[oº°]?\s*ano", r"s[eé]timo\s+ano", r"\b7\s*ano\b"]),
    ("8º", &[r"8[oº°]?\s*ano", r"oitavo\s+ano", r"\b8\s*ano\b"]),
    ("9º", &[r"9[oº°]?\s*ano", r"nono\s+ano", r"\b9\s*ano\b"]),
];

/// Question-type keywords, matched as substrings of the lower-cased text.
pub const QUESTION_TYPES: &[Category] = &[
    (
        "multipla_escolha",
        &[
            "múltipla escolha", "multipla escolha", "alternativas", "opções", "opcoes",
            "a, b, c", "marcar", "assinalar", "escolha múltipla", "escolha multipla", "teste",
            "quiz", "marque", "assinale", "selecione", "escolha a alternativa",
        ],
    ),
    (
        "dissertativa_curta",
        &[
            "dissertativa curta", "resposta curta", "breve", "resumida", "pequeno texto",
            "curta", "objetiva curta", "responda brevemente", "responda em poucas palavras",
        ],
    ),
    (
        "dissertativa_longa",
        &[
            "dissertativa longa", "dissertativa", "redação", "redacao", "texto longo",
            "desenvolver", "argumentar", "longa", "escreva um texto", "desenvolva",
            "argumente", "discorra", "elabore um texto", "produza um texto",
        ],
    ),
    (
        "verdadeiro_falso",
        &[
            "verdadeiro ou falso", "verdadeiro falso", "v ou f", "certo ou errado",
            "true false", "v/f", "c/e", "verdadeiro e falso", "certo e errado",
        ],
    ),
    (
        "associacao",
        &[
            "associação", "associacao", "correspondência", "correspondencia", "relacionar",
            "ligar", "conectar", "combinar", "relacione", "ligue", "conecte", "combine",
            "associe", "correlação", "correlacao", "matching",
        ],
    ),
];

/// Source-text type keywords.
pub const TEXT_TYPES: &[Category] = &[
    (
        "documento_historico",
        &[
            "documento histórico", "documento historico", "documento", "fonte histórica",
            "fonte historica", "trecho histórico", "fonte primária", "fonte primaria",
            "documento original", "registro histórico", "registro historico",
        ],
    ),
    (
        "texto_literario",
        &[
            "texto literário", "texto literario", "literatura", "fragmento literário", "poesia",
            "prosa", "literário", "literario", "trecho literário", "trecho literario",
            "obra literária", "obra literaria", "conto", "romance", "crônica", "cronica",
        ],
    ),
    (
        "artigo_jornal",
        &[
            "artigo", "jornal", "notícia", "noticia", "reportagem", "matéria", "materia",
            "jornalístico", "jornalistico", "artigo de jornal", "texto jornalístico",
            "texto jornalistico", "manchete", "editorial",
        ],
    ),
    (
        "charge",
        &[
            "charge", "cartum", "cartoon", "tirinha", "quadrinho", "história em quadrinhos",
            "historia em quadrinhos", "hq", "caricatura", "desenho satírico",
            "desenho satirico",
        ],
    ),
    (
        "grafico_barras",
        &[
            "gráfico de barras", "grafico de barras", "gráfico em barras", "barras",
            "gráfico vertical", "grafico vertical", "gráfico de colunas", "grafico de colunas",
        ],
    ),
    (
        "grafico_linhas",
        &[
            "gráfico de linhas", "grafico de linhas", "gráfico linear", "linhas", "evolução",
            "evolucao", "grafico linear", "gráfico temporal", "grafico temporal",
            "série temporal", "serie temporal",
        ],
    ),
    (
        "tabela",
        &[
            "tabela", "dados tabulados", "planilha", "dados em tabela", "quadro",
            "matriz de dados",
        ],
    ),
    (
        "imagem",
        &[
            "imagem", "foto", "fotografia", "figura", "ilustração", "ilustracao", "picture",
            "visual", "representação visual", "representacao visual",
        ],
    ),
    (
        "mapa",
        &[
            "mapa", "cartográfico", "cartografico", "geográfico", "geografico",
            "mapa geográfico", "mapa geografico", "carta geográfica", "carta geografica",
            "planisfério", "planisferio", "globo",
        ],
    ),
    (
        "infografico",
        &[
            "infográfico", "infografico", "infografia", "gráfico informativo",
            "grafico informativo", "visualização de dados", "visualizacao de dados",
        ],
    ),
    (
        "poema",
        &[
            "poema", "poesia", "verso", "letra de música", "letra de musica", "poético",
            "poetico", "estrofe", "rima", "soneto",
        ],
    ),
];

/// Student-profile keywords.
pub const STUDENT_PROFILES: &[Category] = &[
    (
        "bom_dominio",
        &[
            "bom domínio", "bom dominio", "boa leitura", "avançado em leitura", "lê bem",
            "le bem", "domina bem", "boa compreensão", "boa compreensao", "leitura fluente",
            "bom leitor", "boa interpretação", "boa interpretacao",
        ],
    ),
    (
        "dificuldade_conexao",
        &[
            "dificuldade em conectar", "dificuldade de conexão", "dificuldade de conexao",
            "básico mas com dificuldade", "dificuldade para relacionar",
            "dificuldade de interpretação", "dificuldade de interpretacao",
            "dificuldade em relacionar",
        ],
    ),
    (
        "conhecimento_basico",
        &[
            "conhecimento básico", "conhecimento basico", "básico", "basico", "iniciante",
            "fundamental", "nível básico", "nivel basico", "introdutório", "introdutorio",
            "elementar", "inicial",
        ],
    ),
    (
        "conhecimento_avancado",
        &[
            "conhecimento avançado", "conhecimento avancado", "avançado", "avancado",
            "profundo", "expert", "nível avançado", "nivel avancado", "aprofundado",
            "especializado", "superior", "alto nível", "alto nivel",
        ],
    ),
];

/// Type and format vocabulary that never counts as a free topic.
pub const TOPIC_BLACKLIST: &[&str] = &[
    "documento histórico", "documento historico", "texto literário", "texto literario",
    "artigo jornal", "charge", "gráfico", "grafico", "tabela", "imagem", "mapa",
    "múltipla escolha", "multipla escolha", "dissertativa", "verdadeiro falso", "análise",
    "analise", "síntese", "sintese", "aplicação", "aplicacao", "conhecimento", "compreensão",
    "compreensao", "avaliação", "avaliacao",
];

/// Tokens suggesting a multiple-choice question.
pub const OPTION_MARKERS: &[&str] = &["alternativa", "opção", "opcao", "a)", "b)"];

/// Verbs asking for a developed answer.
pub const EXPLANATORY_VERBS: &[&str] = &["explique", "desenvolva", "argumente"];

/// Imperatives of analysis.
pub const ANALYSIS_VERBS: &[&str] = &["compare", "relacione", "diferencie", "analise"];

/// Imperatives of calculation.
pub const CALCULATION_VERBS: &[&str] = &["calcule", "resolva", "aplique"];

/// Grades defaulting to the basic-knowledge profile.
pub const EARLY_GRADES: &[&str] = &["1º", "2º", "3º", "4º", "5º"];

/// Grades defaulting to the good-command profile.
pub const LATER_GRADES: &[&str] = &["6º", "7º", "8º", "9º"];

/// Default source-text type by (folded) subject fragment.
pub const TEXT_TYPE_BY_SUBJECT: &[(&str, &str)] = &[
    ("matematica", "grafico_barras"),
    ("historia", "documento_historico"),
    ("geografia", "mapa"),
    ("portugues", "texto_literario"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_are_unique() {
        for table in [
            SUBJECTS,
            COGNITIVE_LEVELS,
            QUESTION_TYPES,
            TEXT_TYPES,
            STUDENT_PROFILES,
        ] {
            let mut labels: Vec<_> = table.iter().map(|(label, _)| *label).collect();
            let total = labels.len();
            labels.dedup();
            assert_eq!(labels.len(), total);
        }
    }

    #[test]
    fn test_every_grade_has_patterns() {
        assert_eq!(GRADES.len(), 9);
        assert!(GRADES.iter().all(|(_, patterns)| patterns.len() == 3));
    }
}
