//! # Regras de Classificação — Os 12 Grupos em Ordem de Prioridade
//!
//! Cada [`Rule`] é um predicado puro sobre [`Features`] que devolve
//! `Some(razão)` quando casa. A lista de [`default_rules`] é avaliada pelo
//! [`Classifier`](super::classifier::Classifier) de cima para baixo e a
//! **primeira** regra que casa decide categoria e razão.
//!
//! Grupos que podem terminar em mais de uma categoria viram regras
//! consecutivas (ex.: grupo 3 testa `unclear` antes de `messages`).
//!
//! | Grupo | Regra(s) | Categoria |
//! |-------|----------|-----------|
//! | 1 | saudação / fragmentos curtos | user / unclear |
//! | 2 | reconhecimento / ambiguidades | messages / unclear |
//! | 3 | pergunta de capacidade | unclear / messages |
//! | 4 | controle interno / produto externo | system / user |
//! | 5 | intenção de integração | system |
//! | 6 | narrativa em terceira pessoa | user |
//! | 7 | tarefa abstrata/pessoal | user |
//! | 8 | pedido de ajuda/tutorial | messages |
//! | 9 | pergunta factual direta | messages |
//! | 10 | pergunta detectada linguisticamente | messages |
//! | 11 | mensagem complexa/pessoal | user |
//! | 12 | eliminação | unclear / messages |
//!
//! A ordem é um invariante de correção: a narrativa (6) vem depois da
//! integração (5) mas a integração a exclui explicitamente.

use std::sync::OnceLock;

use regex::Regex;

use super::features::{is_stopword, looks_like_verb, Features};
use super::lexicon::*;
use super::question;
use crate::core::Category;

/// Predicado de uma regra: `Some(razão)` quando casa.
pub type Predicate = fn(&Features) -> Option<String>;

/// Uma regra do pipeline.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Grupo de prioridade (1–12), usado em logs.
    pub group: u8,
    pub name: &'static str,
    pub category: Category,
    pub predicate: Predicate,
}

impl Rule {
    const fn new(group: u8, name: &'static str, category: Category, predicate: Predicate) -> Self {
        Self { group, name, category, predicate }
    }

    pub fn evaluate(&self, features: &Features) -> Option<String> {
        (self.predicate)(features)
    }
}

/// Pipeline padrão, em ordem de prioridade.
pub fn default_rules() -> Vec<Rule> {
    use Category::*;
    vec![
        // ─── Grupo 1 ───
        Rule::new(1, "greeting", User, greeting),
        Rule::new(1, "lone_pronoun", Unclear, lone_pronoun),
        Rule::new(1, "lone_interrogative", Unclear, lone_interrogative),
        Rule::new(1, "lone_generic_noun", Unclear, lone_generic_noun),
        Rule::new(1, "short_uncertainty", Unclear, short_uncertainty),
        Rule::new(1, "bare_command", Unclear, bare_command),
        Rule::new(1, "short_fragment", Unclear, short_fragment),
        // ─── Grupo 2 ───
        Rule::new(2, "acknowledgement", Messages, acknowledgement),
        Rule::new(2, "dangling_pronoun", Unclear, dangling_pronoun),
        Rule::new(2, "vague_phrasing", Unclear, vague_phrasing),
        Rule::new(2, "generic_object", Unclear, generic_object),
        Rule::new(2, "multi_intent", Unclear, multi_intent),
        Rule::new(2, "polysemous_verb", Unclear, polysemous_verb),
        // ─── Grupo 3 ───
        Rule::new(3, "capability_with_choice", Unclear, capability_with_choice),
        Rule::new(3, "capability_question", Messages, capability_question),
        // ─── Grupo 4 ───
        Rule::new(4, "internal_control", System, internal_control),
        Rule::new(4, "external_product", User, external_product),
        // ─── Grupos 5-12 ───
        Rule::new(5, "integration_intent", System, integration_intent),
        Rule::new(6, "third_person_narrative", User, third_person_narrative),
        Rule::new(7, "abstract_task", User, abstract_task),
        Rule::new(8, "help_request", Messages, help_request),
        Rule::new(9, "factual_question", Messages, factual_question),
        Rule::new(10, "detected_question", Messages, detected_question),
        Rule::new(11, "complex_or_personal", User, complex_or_personal),
        Rule::new(12, "residual_unclear", Unclear, residual_unclear),
        Rule::new(12, "residual_messages", Messages, |_| Some("short and objective".to_string())),
    ]
}

fn reason(s: &str) -> Option<String> {
    Some(s.to_string())
}

// ─── Grupo 1: pré-filtros de mensagens muito curtas ──────────────

/// ≤ 15 caracteres e ≤ 2 palavras.
fn is_very_short(f: &Features) -> bool {
    f.char_count <= 15 && f.word_count() <= 2 && f.word_count() > 0
}

fn joined(f: &Features) -> String {
    f.words.join(" ")
}

fn greeting(f: &Features) -> Option<String> {
    (is_very_short(f) && GREETINGS.contains(&joined(f).as_str())).then(|| "greeting".to_string())
}

fn lone_pronoun(f: &Features) -> Option<String> {
    (is_very_short(f) && LONE_PRONOUNS.contains(&joined(f).as_str()))
        .then(|| "lone pronoun without referent".to_string())
}

fn lone_interrogative(f: &Features) -> Option<String> {
    (is_very_short(f) && LONE_INTERROGATIVES.contains(&joined(f).as_str()))
        .then(|| "lone interrogative word".to_string())
}

fn lone_generic_noun(f: &Features) -> Option<String> {
    if !is_very_short(f) {
        return None;
    }
    match f.content_words(ARTICLES).as_slice() {
        [noun] if GENERIC_NOUNS.iter().any(|g| *g == *noun || format!("{g}s") == *noun) => {
            Some(format!("generic noun '{noun}' without action"))
        }
        _ => None,
    }
}

fn short_uncertainty(f: &Features) -> Option<String> {
    (is_very_short(f) && f.has_any_phrase(UNCERTAINTY)).then(|| "uncertainty expressed".to_string())
}

fn bare_command(f: &Features) -> Option<String> {
    (is_very_short(f) && !f.verbs.is_empty()).then(|| "command without details".to_string())
}

/// Fragmento curto que nenhum léxico dos grupos seguintes reconhece,
/// mesmo terminado em `?` (`"Capital França?"`).
fn short_fragment(f: &Features) -> Option<String> {
    if !is_very_short(f) {
        return None;
    }
    let recognized = acknowledgement(f).is_some()
        || f.has_any_phrase(CAPABILITY_PHRASES)
        || internal_control(f).is_some()
        || external_product(f).is_some()
        || narrative_subject(f).is_some()
        || help_request(f).is_some();
    (!recognized).then(|| "short fragment without recognizable intent".to_string())
}

// ─── Grupo 2: ambiguidade contextual/semântica ───────────────────

fn acknowledgement(f: &Features) -> Option<String> {
    ACKNOWLEDGEMENTS
        .contains(&joined(f).as_str())
        .then(|| "conversational acknowledgement".to_string())
}

/// Pretérito de 3ª pessoa reconhecido pelo lematizador.
fn is_preterite_3p(word: &str, lemma: &str) -> bool {
    !NON_NARRATIVE_FORMS.contains(&word)
        && word != lemma
        && PRETERITE_3P_SUFFIXES.iter().any(|s| word.ends_with(s))
}

/// Pretérito perfeito em qualquer pessoa. `enviarei` (futuro) e `exclui`
/// (presente) ficam de fora.
fn is_preterite(word: &str, lemma: &str) -> bool {
    if IRREGULAR_PRETERITES.contains(&word) {
        return true;
    }
    if is_preterite_3p(word, lemma) {
        return true;
    }
    let first_person = PRETERITE_1P_SUFFIXES.iter().any(|s| word.ends_with(s))
        || (word.ends_with('i') && !word.ends_with("ui") && (lemma.ends_with("er") || lemma.ends_with("ir")));
    word != lemma && first_person && word != format!("{lemma}ei")
}

/// Palavra que pode servir de antecedente/sujeito nominal.
fn is_noun_like(f: &Features, i: usize) -> bool {
    let word = f.words[i].as_str();
    word.chars().count() >= 4
        && !is_stopword(word)
        && !looks_like_verb(word)
        && f.lemmas[i] == word
        && !f.verbs.contains(word)
        && !THIRD_PERSON_PRONOUNS.contains(&word)
        && !word.chars().all(|c| c.is_ascii_digit())
}

fn dangling_pronoun(f: &Features) -> Option<String> {
    for (i, word) in f.words.iter().enumerate() {
        if !THIRD_PERSON_PRONOUNS.contains(&word.as_str()) {
            continue;
        }
        // "ele enviou ..." é narrativa, tratada no grupo 6.
        let followed_by_past = f
            .words
            .get(i + 1)
            .is_some_and(|next| is_preterite_3p(next, &f.lemmas[i + 1]));
        if followed_by_past {
            continue;
        }
        // A maiúscula da primeira palavra é só início de frase.
        let has_antecedent =
            (0..i).any(|j| (j > 0 && f.is_proper_noun(j)) || f.has_keyword_at(j, PERSON_NOUNS));
        if !has_antecedent {
            return Some(format!("pronoun '{word}' without antecedent"));
        }
    }
    None
}

fn vague_phrasing(f: &Features) -> Option<String> {
    f.find_phrase(VAGUE_PHRASES)
        .map(|p| format!("vague temporal or conditional phrasing ('{p}')"))
}

fn has_digit(f: &Features) -> bool {
    f.normalized.chars().any(|c| c.is_ascii_digit())
}

fn generic_object(f: &Features) -> Option<String> {
    if f.verbs.is_empty() || f.has_any_word(QUALIFIERS) || f.normalized.contains('@') || has_digit(f) {
        return None;
    }
    f.find_phrase(GENERIC_OBJECTS)
        .map(|o| format!("action on unspecified object ('{o}')"))
}

fn multi_intent(f: &Features) -> Option<String> {
    if f.verbs.len() < 2 || f.has_any_phrase(PRIORITY_MARKERS) {
        return None;
    }
    let positions: Vec<usize> = f
        .lemmas
        .iter()
        .enumerate()
        .filter(|(_, l)| f.verbs.contains(l.as_str()))
        .map(|(i, _)| i)
        .collect();
    let (first, last) = (*positions.first()?, *positions.last()?);
    let connector = f.words[first..last]
        .iter()
        .find(|w| MULTI_INTENT_CONNECTORS.contains(&w.as_str()))?;
    let verbs: Vec<&str> = f.verbs.iter().map(String::as_str).collect();
    Some(format!(
        "multiple actions joined by '{connector}' without priority ({})",
        verbs.join(", ")
    ))
}

fn polysemous_verb(f: &Features) -> Option<String> {
    if f.has_any_word(TIME_MARKERS) || has_digit(f) {
        return None;
    }
    POLYSEMOUS
        .iter()
        .find(|p| f.has_lemma(&[p.verb]) && f.has_any_keyword(p.objects))
        .map(|p| format!("ambiguous verb '{}': {}", p.verb, p.senses))
}

// ─── Grupo 3: perguntas de capacidade ────────────────────────────

fn has_unresolved_choice(f: &Features) -> bool {
    f.has_any_phrase(UNCERTAINTY) || ((f.has_word("ou") || f.has_word("or")) && f.original.contains('?'))
}

fn capability_with_choice(f: &Features) -> Option<String> {
    (f.has_any_phrase(CAPABILITY_PHRASES) && has_unresolved_choice(f))
        .then(|| "capability question with unresolved choice".to_string())
}

fn capability_question(f: &Features) -> Option<String> {
    f.find_phrase(CAPABILITY_PHRASES)
        .map(|_| "capability question".to_string())
}

// ─── Grupo 4: controle interno vs produto externo ────────────────

fn has_control_verb(f: &Features) -> bool {
    f.has_lemma(CONTROL_VERBS) || f.has_any_word(CONTROL_VERBS)
}

fn internal_control(f: &Features) -> Option<String> {
    if !has_control_verb(f) {
        return None;
    }
    f.find_keyword(INTERNAL_KEYWORDS)
        .map(|k| format!("internal system control ('{k}')"))
}

fn external_product(f: &Features) -> Option<String> {
    if has_control_verb(f) || !f.verbs.is_empty() || question::is_interrogative(&f.normalized) {
        return None;
    }
    f.find_keyword(EXTERNAL_PRODUCTS)
        .map(|p| format!("external product '{p}' mentioned without action"))
}

// ─── Grupo 5: intenção genérica de integração ────────────────────

fn email_with_recipient(f: &Features) -> bool {
    f.has_any_phrase(EMAIL_WORDS)
        && (f.normalized.contains('@') || f.normalized.contains(".com") || f.has_any_word(RECIPIENT_MARKERS))
}

fn has_context_qualifier(f: &Features) -> bool {
    f.has_any_keyword(DOCUMENT_QUALIFIERS)
        || (f.has_any_keyword(CALENDAR_QUALIFIERS) && !f.has_word("tempo"))
        || (f.has_lemma(SHARE_VERBS) && f.has_any_word(SHARE_TARGETS))
        || (f.has_lemma(SCHEDULE_VERBS) && (f.has_any_word(TIME_MARKERS) || has_digit(f)))
        || (f.has_lemma(CANCEL_VERBS) && f.has_any_keyword(CANCEL_OBJECTS))
}

fn has_integration_exclusion(f: &Features) -> bool {
    let padded = format!(" {} ", f.words.join(" "));
    INTEGRATION_EXCLUSIONS.iter().any(|e| padded.contains(e))
}

/// Algum verbo de integração fora do pretérito: um relato
/// (`eu enviei o documento`, `fiz upload`) não é pedido.
fn has_command_verb(f: &Features) -> bool {
    f.verb_hits.iter().any(|h| {
        let p = h.position;
        let auxiliary_past = p > 0 && IRREGULAR_PRETERITES.contains(&f.words[p - 1].as_str());
        !auxiliary_past && !is_preterite(&f.words[p], &f.lemmas[p])
    })
}

fn integration_intent(f: &Features) -> Option<String> {
    if !has_command_verb(f) || !(f.has_any_keyword(SYSTEM_KEYWORDS) || f.has_lemma(SYSTEM_KEYWORDS)) {
        return None;
    }
    let has_object =
        f.has_any_keyword(INTEGRATION_OBJECTS) || email_with_recipient(f) || has_context_qualifier(f);
    if !has_object || has_integration_exclusion(f) || narrative_subject(f).is_some() {
        return None;
    }
    let verbs: Vec<&str> = f.verbs.iter().map(String::as_str).collect();
    Some(format!("integration intent ({})", verbs.join(", ")))
}

// ─── Grupo 6: narrativa em terceira pessoa ───────────────────────

/// Sujeito de uma ação no pretérito, se houver. Pretéritos de oração
/// subordinada (`envie o documento que ele pediu`) não contam.
fn narrative_subject(f: &Features) -> Option<&str> {
    (1..f.words.len()).find_map(|j| {
        if !is_preterite_3p(&f.words[j], &f.lemmas[j]) {
            return None;
        }
        if j >= 2 && COMPLEMENTIZERS.contains(&f.words[j - 2].as_str()) {
            return None;
        }
        let prev = f.words[j - 1].as_str();
        let is_subject = NARRATIVE_SUBJECTS.contains(&prev)
            || (prev != "voce"
                && !is_stopword(prev)
                && (f.is_proper_noun(j - 1) || is_noun_like(f, j - 1)));
        is_subject.then_some(prev)
    })
}

fn third_person_narrative(f: &Features) -> Option<String> {
    narrative_subject(f).map(|s| format!("third-person narrative (subject '{s}')"))
}

// ─── Grupos 7-8: tarefas abstratas e ajuda ───────────────────────

fn abstract_task(f: &Features) -> Option<String> {
    f.find_phrase(ABSTRACT_TASKS)
        .map(|p| format!("abstract personal task ('{p}')"))
}

fn help_request(f: &Features) -> Option<String> {
    if f.has_any_phrase(PERSONALIZATION) {
        return None;
    }
    f.find_phrase(HELP_PHRASES).map(|_| "help or tutorial request".to_string())
}

// ─── Grupos 9-10: perguntas ──────────────────────────────────────

fn factual_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(que dia e hoje|data de hoje|quem descobriu|capital de|definicao de|quanto e|resultado de)\b")
            .unwrap()
    })
}

fn factual_question(f: &Features) -> Option<String> {
    let short_question = f.char_count <= 80 && f.ends_with_question();
    (short_question || factual_re().is_match(&f.normalized)).then(|| "direct factual question".to_string())
}

fn detected_question(f: &Features) -> Option<String> {
    let interrogative = if f.has_model {
        question::is_interrogative_with_lemmas(&f.normalized, &f.lemmas)
    } else {
        question::is_interrogative(&f.normalized)
    };
    if !interrogative {
        return None;
    }
    if f.has_any_phrase(TECHNICAL_TERMS) {
        reason("technical or conceptual question")
    } else {
        reason("general question")
    }
}

// ─── Grupo 11: mensagem complexa/pessoal ─────────────────────────

fn personal_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(meu|minha|minhas|meus|eu|para mim|no meu caso)\b").unwrap())
}

fn planning_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b(plano|passo a passo|organizar|estrategia|roteiro|curriculo|proposta|estudo)\b").unwrap()
    })
}

fn complex_or_personal(f: &Features) -> Option<String> {
    if f.has_any_phrase(SHORT_TASK_EXCEPTIONS) && f.char_count < 80 {
        return None;
    }
    if f.char_count > 100 {
        reason("long message")
    } else if f.word_count() > 2 && personal_re().is_match(&f.normalized) {
        reason("personal reference")
    } else if planning_re().is_match(&f.normalized) {
        reason("planning or strategy request")
    } else if f.sentence_terminators() > 1 {
        reason("multiple sentences")
    } else if f.has_any_phrase(PERSONALIZATION) {
        reason("personalization requested")
    } else {
        None
    }
}

// ─── Grupo 12: eliminação ────────────────────────────────────────

fn residual_unclear(f: &Features) -> Option<String> {
    if f.word_count() <= 2 {
        reason("too short to infer intent")
    } else if f.has_any_word(PERSONAL_PRONOUNS) && f.char_count < 30 {
        reason("short personal message without context")
    } else if f.sentence_terminators() == 0 && f.word_count() <= 3 && f.char_count < 20 {
        reason("fragment without punctuation")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlu::lemmatizer::{Lemmatizer, LemmatizerMode, LemmatizerSettings};
    use crate::nlu::normalizer::fold;

    fn lemmatizer() -> (tempfile::TempDir, Lemmatizer) {
        let dir = tempfile::tempdir().unwrap();
        let settings = LemmatizerSettings {
            mode: LemmatizerMode::Hybrid,
            learned_path: dir.path().join("learned.json"),
            ..Default::default()
        };
        let l = Lemmatizer::init(&settings);
        (dir, l)
    }

    fn check(rule: Predicate, text: &str) -> Option<String> {
        let (_dir, l) = lemmatizer();
        rule(&Features::extract(text, &fold(text), &l))
    }

    #[test]
    fn rule_names_are_unique() {
        let rules = default_rules();
        let mut names: Vec<_> = rules.iter().map(|r| r.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), rules.len());
        assert!(rules.windows(2).all(|w| w[0].group <= w[1].group));
    }

    // ─── grupo 1 ───────────────────────────────────────────────

    #[test]
    fn short_prefilters() {
        assert_eq!(check(greeting, "Bom dia!").as_deref(), Some("greeting"));
        assert!(check(greeting, "bom dia, envie o relatorio").is_none());
        assert!(check(lone_pronoun, "isso").is_some());
        assert!(check(lone_interrogative, "o que?").is_some());
        assert!(check(lone_generic_noun, "a planilha").is_some());
        assert!(check(lone_generic_noun, "planilha nova").is_none());
        assert!(check(short_uncertainty, "sei lá").is_some());
        assert!(check(bare_command, "envie email").is_some());
    }

    #[test]
    fn short_fragment_even_with_question_mark() {
        assert!(check(short_fragment, "Capital França?").is_some());
        assert!(check(short_fragment, "Capital Espanha?").is_none());
        assert!(check(short_fragment, "isso mesmo").is_none());
        assert!(check(short_fragment, "meu whatsapp").is_none());
    }

    // ─── grupo 2 ───────────────────────────────────────────────

    #[test]
    fn dangling_pronoun_needs_antecedent() {
        assert!(check(dangling_pronoun, "manda o arquivo pra ele").is_some());
        assert!(check(dangling_pronoun, "avise o João que ele precisa vir").is_none());
        assert!(check(dangling_pronoun, "fale com o gerente e pergunte a ele").is_none());
        assert!(check(dangling_pronoun, "ele enviou o relatorio ontem").is_none());
    }

    #[test]
    fn generic_object_without_qualifier() {
        assert!(check(generic_object, "envie isso agora").is_some());
        assert!(check(generic_object, "envie isso para a equipe").is_none());
        assert!(check(generic_object, "organize tudo").is_some());
    }

    #[test]
    fn multi_intent_without_priority() {
        let r = check(multi_intent, "envie isso por email ou agende uma reuniao").unwrap();
        assert!(r.contains("'ou'"));
        assert!(check(multi_intent, "envie o email e depois agende a reuniao").is_none());
        assert!(check(multi_intent, "crie a planilha com os dados").is_none());
    }

    #[test]
    fn polysemous_patterns() {
        let r = check(polysemous_verb, "marque o email").unwrap();
        assert!(r.contains("marcar"));
        assert!(check(polysemous_verb, "marque o email para sexta").is_none());
        assert!(check(polysemous_verb, "marque uma reuniao").is_none());
    }

    #[test]
    fn vague_phrasing_detected() {
        assert!(check(vague_phrasing, "envie o relatorio quando der").is_some());
        assert!(check(vague_phrasing, "envie o relatorio hoje").is_none());
    }

    // ─── grupos 3-6 ────────────────────────────────────────────

    #[test]
    fn capability_choice_takes_precedence() {
        assert!(check(capability_with_choice, "você pode enviar ou agendar?").is_some());
        assert!(check(capability_with_choice, "você pode enviar emails?").is_none());
        assert!(check(capability_question, "você pode enviar emails?").is_some());
    }

    #[test]
    fn internal_control_vs_external_product() {
        assert!(check(internal_control, "limpe o cache da sessão").is_some());
        assert!(check(internal_control, "o cache está lento").is_none());
        assert!(check(external_product, "uso muito o Notion no trabalho").is_some());
        assert!(check(external_product, "envie pelo gmail").is_none());
    }

    #[test]
    fn integration_requires_keyword_verb_and_object() {
        assert!(check(integration_intent, "agende uma reunião amanhã às 14h").is_some());
        assert!(check(integration_intent, "envie um email para ana@empresa.com").is_some());
        assert!(check(integration_intent, "compartilhe o documento com a equipe").is_some());
        assert!(check(integration_intent, "fale sobre reuniões produtivas").is_none());
        assert!(check(integration_intent, "como fazer uma planilha boa").is_none());
    }

    #[test]
    fn integration_gate_accepts_lemmas_and_folders() {
        let r = check(integration_intent, "compartilhe a pasta com o time").unwrap();
        assert!(r.contains("compartilhar"));
    }

    #[test]
    fn past_account_is_not_integration() {
        assert!(check(integration_intent, "Eu enviei o documento ontem").is_none());
        assert!(check(integration_intent, "eu fiz upload do arquivo ontem").is_none());
        assert!(check(integration_intent, "eu enviarei o documento amanhã").is_some());
    }

    #[test]
    fn preterite_forms() {
        assert!(is_preterite("enviei", "enviar"));
        assert!(is_preterite("respondi", "responder"));
        assert!(is_preterite("cancelou", "cancelar"));
        assert!(is_preterite("fez", "fazer"));
        assert!(!is_preterite("enviarei", "enviar"));
        assert!(!is_preterite("envie", "enviar"));
        assert!(!is_preterite("exclui", "excluir"));
    }

    #[test]
    fn subordinate_preterite_is_not_narrative() {
        let text = "envie o documento que ele pediu";
        assert!(check(third_person_narrative, text).is_none());
        assert!(check(integration_intent, text).is_some());
        assert!(check(third_person_narrative, "ele pediu o documento ontem").is_some());
    }

    #[test]
    fn narrative_excludes_integration() {
        let text = "o cliente cancelou a reunião de amanhã";
        assert!(check(third_person_narrative, text).is_some());
        assert!(check(integration_intent, text).is_none());
        assert!(check(third_person_narrative, "eu cancelei a reuniao").is_none());
    }

    // ─── grupos 9-12 ───────────────────────────────────────────

    #[test]
    fn questions() {
        assert!(check(factual_question, "Qual a capital do Brasil?").is_some());
        assert!(check(factual_question, "me diga a capital de portugal").is_some());
        assert_eq!(
            check(detected_question, "me explique como funciona o git").as_deref(),
            Some("technical or conceptual question")
        );
        assert_eq!(
            check(detected_question, "quando abre o mercado").as_deref(),
            Some("general question")
        );
    }

    #[test]
    fn complex_or_personal_with_short_task_exception() {
        assert_eq!(
            check(complex_or_personal, "estou pensando no meu trabalho hoje").as_deref(),
            Some("personal reference")
        );
        assert!(check(complex_or_personal, "monte um plano de estudos").is_none());
        let long = "preciso ".repeat(15);
        assert_eq!(check(complex_or_personal, &long).as_deref(), Some("long message"));
    }

    #[test]
    fn residual_elimination() {
        assert!(check(residual_unclear, "preciso daquilo").is_some());
        assert!(check(residual_unclear, "e a minha vez").is_some());
        assert!(check(residual_unclear, "o sistema funciona bem.").is_none());
    }
}
