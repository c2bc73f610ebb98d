//! # Dicionário Estático de Verbos
//!
//! Tabela fixa de verbos com suas formas conjugadas → infinitivo. Construída
//! uma única vez (via [`OnceLock`]) e somente-leitura depois disso.
//!
//! ## Geração de Formas
//!
//! Em vez de listar centenas de formas à mão, cada verbo regular declara só
//! o infinitivo e a conjugação é gerada por terminação:
//!
//! | Terminação | Formas geradas (exemplo `enviar`) |
//! |------------|-----------------------------------|
//! | presente | `envia`, `enviam` |
//! | imperativo/subjuntivo | `envie`, `enviem` |
//! | gerúndio/particípio | `enviando`, `enviado`, `enviada`, `enviados`, `enviadas` |
//! | pretérito | `enviei`, `enviou`, `enviamos`, `enviaram` |
//! | futuro/condicional | `enviarei`, `enviara`, `enviaremos`, `enviarao`, `enviaria`, `enviariam` |
//!
//! Ajustes ortográficos da 1ª conjugação (`c → qu`, `g → gu` antes de `e`)
//! são aplicados automaticamente: `marcar` → `marque`, `pagar` → `paguei`.
//! Verbos irregulares (`fazer`, `ver`) listam suas formas explicitamente.
//!
//! ## Vocabulário de Integração
//!
//! Entradas marcadas como integração formam o vocabulário gerenciado de
//! [`Lemmatizer::extract_action_verbs`](super::Lemmatizer::extract_action_verbs).
//! Verbos de controle (`limpar`, `reiniciar`, ...) estão no dicionário mas
//! fora desse vocabulário.
//!
//! ## Homógrafos Nominais
//!
//! Algumas formas geradas também são substantivos comuns (`agenda`,
//! `marca`, `copia`). [`in_verb_position`] só as aceita como verbo no
//! início da mensagem, depois de clítico/modal ou antes de artigo:
//!
//! | Texto | `agenda` é verbo? |
//! |-------|-------------------|
//! | `agenda uma reuniao` | sim (início) |
//! | `me agenda a call` | sim (clítico) |
//! | `minha agenda de amanha` | não (possessivo antes) |
//! | `olhei a agenda` | não |

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

#[derive(Clone, Copy)]
enum Forms {
    /// Conjugação regular gerada a partir do infinitivo.
    Regular,
    /// Apenas as formas listadas.
    Only(&'static [&'static str]),
}

/// Uma linha da tabela de verbos.
pub struct VerbEntry {
    infinitive: &'static str,
    lemma: &'static str,
    integration: bool,
    forms: Forms,
    extra: &'static [&'static str],
}

const fn integ(infinitive: &'static str) -> VerbEntry {
    VerbEntry { infinitive, lemma: infinitive, integration: true, forms: Forms::Regular, extra: &[] }
}

const fn integ_plus(infinitive: &'static str, extra: &'static [&'static str]) -> VerbEntry {
    VerbEntry { infinitive, lemma: infinitive, integration: true, forms: Forms::Regular, extra }
}

/// Verbo regular cujas formas apontam para o infinitivo de outro verbo.
const fn synonym(infinitive: &'static str, lemma: &'static str, extra: &'static [&'static str]) -> VerbEntry {
    VerbEntry { infinitive, lemma, integration: true, forms: Forms::Regular, extra }
}

const fn irregular(
    infinitive: &'static str,
    lemma: &'static str,
    forms: &'static [&'static str],
) -> VerbEntry {
    VerbEntry { infinitive, lemma, integration: true, forms: Forms::Only(forms), extra: &[] }
}

const fn control(infinitive: &'static str) -> VerbEntry {
    VerbEntry { infinitive, lemma: infinitive, integration: false, forms: Forms::Regular, extra: &[] }
}

/// Tabela de verbos conhecidos.
pub const VERBS: &[VerbEntry] = &[
    // ── Comunicação ──────────────────────────────────────────
    integ("enviar"),
    integ("mandar"),
    integ("disparar"),
    integ("encaminhar"),
    integ("responder"),
    integ_plus("escrever", &["escrito", "escrita", "escritos", "escritas"]),
    integ("convidar"),
    // ── Criação / edição ─────────────────────────────────────
    integ("criar"),
    integ("gerar"),
    integ_plus("produzir", &["produz"]),
    integ("editar"),
    integ("atualizar"),
    integ("modificar"),
    integ("alterar"),
    integ("preencher"),
    integ("adicionar"),
    integ_plus("inserir", &["insira", "insiram", "insiro"]),
    integ("anexar"),
    integ("copiar"),
    integ("salvar"),
    integ("organizar"),
    // ── Remoção ──────────────────────────────────────────────
    integ("deletar"),
    integ_plus("excluir", &["excluem"]),
    integ("remover"),
    integ("apagar"),
    integ("arquivar"),
    // ── Agenda ───────────────────────────────────────────────
    integ("agendar"),
    integ("reagendar"),
    integ("marcar"),
    integ("reservar"),
    integ("cancelar"),
    // ── Arquivos / compartilhamento ──────────────────────────
    integ("compartilhar"),
    integ("sincronizar"),
    integ("baixar"),
    irregular("download", "baixar", &["download", "fazer download"]),
    irregular("fazer upload", "fazer upload", &["upload", "uploads"]),
    synonym("subir", "fazer upload", &["sobe", "sobem"]),
    integ("exportar"),
    integ("importar"),
    integ_plus("imprimir", &["impresso", "impressa"]),
    integ("mover"),
    integ_plus("abrir", &["aberto", "aberta", "abertos", "abertas"]),
    integ("fechar"),
    // ── Consulta ─────────────────────────────────────────────
    integ("buscar"),
    synonym("procurar", "buscar", &[]),
    synonym("pesquisar", "buscar", &[]),
    integ("listar"),
    integ("consultar"),
    irregular(
        "ver",
        "ver",
        &[
            "ve", "veem", "veja", "vejam", "vendo", "visto", "vista", "vi", "viu", "viram", "vimos",
            "verei", "veremos", "veria",
        ],
    ),
    synonym("visualizar", "ver", &[]),
    // ── Financeiro ───────────────────────────────────────────
    integ("pagar"),
    integ_plus("transferir", &["transfira", "transfiram", "transfiro"]),
    integ("emitir"),
    // ── Genérico ─────────────────────────────────────────────
    irregular(
        "fazer",
        "fazer",
        &[
            "faca", "facam", "faz", "fazem", "fazendo", "feito", "feita", "feitos", "feitas", "fiz",
            "fez", "fizeram", "fizemos", "farei", "fara", "faremos", "faria", "fariam",
        ],
    ),
    // ── Controle interno (fora do vocabulário de integração) ─
    control("limpar"),
    control("reiniciar"),
    control("resetar"),
    control("ativar"),
    control("desativar"),
    control("habilitar"),
    control("desabilitar"),
    control("zerar"),
    control("configurar"),
];

/// Troca `c`/`g` final do radical antes de desinência iniciada por `e`.
fn soften(stem: &str) -> String {
    if let Some(s) = stem.strip_suffix('c') {
        format!("{s}qu")
    } else if let Some(s) = stem.strip_suffix('g') {
        format!("{s}gu")
    } else {
        stem.to_string()
    }
}

/// Gera as formas regulares de um infinitivo terminado em `ar`, `er` ou `ir`.
pub fn regular_forms(infinitive: &str) -> Vec<String> {
    if infinitive.len() < 4 || !infinitive.is_ascii() {
        return Vec::new();
    }
    let (stem, ending) = infinitive.split_at(infinitive.len() - 2);
    let soft = soften(stem);

    let mut forms: Vec<String> = match ending {
        "ar" => vec![
            format!("{stem}a"),
            format!("{stem}am"),
            format!("{soft}e"),
            format!("{soft}em"),
            format!("{stem}ando"),
            format!("{stem}ado"),
            format!("{stem}ada"),
            format!("{stem}ados"),
            format!("{stem}adas"),
            format!("{soft}ei"),
            format!("{stem}ou"),
            format!("{stem}amos"),
            format!("{stem}aram"),
        ],
        "er" | "ir" => {
            let v = &ending[..1];
            let mut f = vec![
                format!("{stem}e"),
                format!("{stem}em"),
                format!("{stem}a"),
                format!("{stem}am"),
                format!("{stem}{v}ndo"),
                format!("{stem}ido"),
                format!("{stem}ida"),
                format!("{stem}idos"),
                format!("{stem}idas"),
                format!("{stem}i"),
                format!("{stem}{v}mos"),
                format!("{stem}{v}ram"),
            ];
            f.push(if v == "e" { format!("{stem}eu") } else { format!("{stem}iu") });
            f
        }
        _ => return Vec::new(),
    };

    for suffix in ["ei", "a", "emos", "ao", "ia", "iam"] {
        forms.push(format!("{infinitive}{suffix}"));
    }
    forms
}

/// Dicionário estático pronto para consulta.
pub struct StaticDictionary {
    forms: HashMap<String, &'static str>,
    integration: HashSet<&'static str>,
    infinitives: BTreeSet<&'static str>,
}

impl StaticDictionary {
    /// Constrói o dicionário a partir de uma tabela.
    ///
    /// Os auto-mapeamentos `lema → lema` entram primeiro e nunca são
    /// sobrescritos, o que garante idempotência. Entre formas geradas que
    /// colidem, vence a primeira da tabela.
    pub fn build(table: &[VerbEntry]) -> Self {
        let mut forms: HashMap<String, &'static str> = HashMap::new();
        let mut integration = HashSet::new();
        let mut infinitives = BTreeSet::new();

        for entry in table {
            forms.insert(entry.lemma.to_string(), entry.lemma);
            infinitives.insert(entry.lemma);
            if entry.integration {
                integration.insert(entry.lemma);
            }
        }

        for entry in table {
            let generated = match entry.forms {
                Forms::Regular => regular_forms(entry.infinitive),
                Forms::Only(list) => list.iter().map(|s| s.to_string()).collect(),
            };
            let all = std::iter::once(entry.infinitive.to_string())
                .chain(generated)
                .chain(entry.extra.iter().map(|s| s.to_string()));
            for form in all {
                forms.entry(form).or_insert(entry.lemma);
            }
        }

        Self { forms, integration, infinitives }
    }

    /// Infinitivo de uma forma conhecida.
    pub fn get(&self, form: &str) -> Option<&'static str> {
        self.forms.get(form).copied()
    }

    pub fn contains(&self, form: &str) -> bool {
        self.forms.contains_key(form)
    }

    /// `true` se o infinitivo pertence ao vocabulário de integração.
    pub fn is_integration_verb(&self, lemma: &str) -> bool {
        self.integration.contains(lemma)
    }

    /// Total de formas de superfície.
    pub fn len(&self) -> usize {
        self.forms.len()
    }

    /// Total de infinitivos distintos.
    pub fn infinitive_count(&self) -> usize {
        self.infinitives.len()
    }

    pub fn integration_verbs(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.infinitives.iter().copied().filter(|v| self.integration.contains(v))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.forms.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

/// Formas verbais que também são substantivos de uso frequente.
pub const NOUN_HOMOGRAPHS: &[&str] = &[
    "agenda", "marca", "copia", "nota", "conta", "lista", "reserva", "busca", "pesquisa",
    "baixa", "troca", "programa", "compra", "venda", "entrega",
];

/// Clíticos e modais que põem a palavra seguinte em posição de verbo.
const VERB_POSITION_MARKERS: &[&str] = &[
    "me", "te", "se", "lhe", "nos", "pode", "poderia", "consegue", "quero", "queria", "preciso",
    "precisa", "vou", "vai", "favor", "voce", "vc",
];

/// Determinantes que põem a palavra seguinte em posição de substantivo.
const NOUN_DETERMINERS: &[&str] = &[
    "a", "o", "as", "os", "um", "uma", "da", "do", "na", "no", "pela", "pelo", "minha", "meu",
    "minhas", "meus", "sua", "seu", "nossa", "nosso", "essa", "esse", "esta", "este", "nessa",
    "nesta", "dessa", "desta",
];

const ARTICLES: &[&str] = &["o", "a", "os", "as", "um", "uma", "uns", "umas"];

/// `false` quando `words[i]` é um homógrafo nominal fora de posição de verbo.
pub fn in_verb_position(words: &[&str], i: usize) -> bool {
    if !NOUN_HOMOGRAPHS.contains(&words[i]) || i == 0 {
        return true;
    }
    let prev = words[i - 1];
    if NOUN_DETERMINERS.contains(&prev) {
        return false;
    }
    VERB_POSITION_MARKERS.contains(&prev) || words.get(i + 1).is_some_and(|next| ARTICLES.contains(next))
}

static DICTIONARY: OnceLock<StaticDictionary> = OnceLock::new();

/// Singleton do dicionário estático.
pub fn static_dictionary() -> &'static StaticDictionary {
    DICTIONARY.get_or_init(|| StaticDictionary::build(VERBS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_ar_with_softening() {
        let forms = regular_forms("marcar");
        assert!(forms.contains(&"marque".to_string()));
        assert!(forms.contains(&"marquei".to_string()));
        assert!(forms.contains(&"marcou".to_string()));
        assert!(forms.contains(&"marcando".to_string()));
        assert!(!forms.contains(&"marce".to_string()));
    }

    #[test]
    fn regular_er_and_ir() {
        let er = regular_forms("responder");
        assert!(er.contains(&"responda".to_string()));
        assert!(er.contains(&"respondeu".to_string()));
        assert!(er.contains(&"respondendo".to_string()));
        let ir = regular_forms("excluir");
        assert!(ir.contains(&"exclua".to_string()));
        assert!(ir.contains(&"excluiu".to_string()));
        assert!(ir.contains(&"excluindo".to_string()));
        assert!(ir.contains(&"excluido".to_string()));
    }

    #[test]
    fn future_and_conditional() {
        let forms = regular_forms("enviar");
        for f in ["enviarei", "enviaremos", "enviaria", "enviariam"] {
            assert!(forms.contains(&f.to_string()), "{f}");
        }
    }

    #[test]
    fn dictionary_lookups() {
        let d = static_dictionary();
        assert_eq!(d.get("agende"), Some("agendar"));
        assert_eq!(d.get("crie"), Some("criar"));
        assert_eq!(d.get("procurei"), Some("buscar"));
        assert_eq!(d.get("upload"), Some("fazer upload"));
        assert_eq!(d.get("sobe"), Some("fazer upload"));
        assert_eq!(d.get("fez"), Some("fazer"));
        assert_eq!(d.get("reuniao"), None);
    }

    #[test]
    fn vocabulary_size_and_scope() {
        let d = static_dictionary();
        let integration: Vec<_> = d.integration_verbs().collect();
        assert!((30..=60).contains(&integration.len()), "{}", integration.len());
        assert!(d.len() > 500);
        assert!(d.is_integration_verb("enviar"));
        assert!(!d.is_integration_verb("limpar"));
        assert!(d.contains("limpe"));
    }

    #[test]
    fn noun_homographs_need_verb_position() {
        let words = |s: &'static str| s.split(' ').collect::<Vec<_>>();
        assert!(in_verb_position(&words("agenda uma reuniao"), 0));
        assert!(in_verb_position(&words("me agenda a call"), 1));
        assert!(in_verb_position(&words("por favor marca um horario"), 2));
        assert!(in_verb_position(&words("ela marca o horario"), 1));
        assert!(!in_verb_position(&words("minha agenda de amanha"), 1));
        assert!(!in_verb_position(&words("minha marca precisa de logo"), 1));
        assert!(!in_verb_position(&words("olhei a agenda ontem"), 2));
        assert!(!in_verb_position(&words("tenho nota baixa"), 1));
        // formas que não são homógrafos passam sempre
        assert!(in_verb_position(&words("minha envie"), 1));
    }

    /// lemma(lemma(w)) == lemma(w) para toda forma conhecida
    #[test]
    fn lemmas_are_fixed_points() {
        let d = static_dictionary();
        for (form, lemma) in d.iter() {
            assert_eq!(d.get(lemma), Some(lemma), "forma {form} → {lemma}");
        }
    }
}
