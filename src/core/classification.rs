//! # Resultado de Classificação e Tipos de Requisição
//!
//! [`ClassificationResult`] é o valor produzido **uma única vez** por
//! entrada normalizada e guardado no [`ResultCache`](crate::cache::ResultCache).
//! [`Message`] agrega as formas textuais calculadas para a requisição e
//! [`RequestContext`] carrega as dicas do chamador (idioma, temperatura, modelo).

use serde::{Deserialize, Serialize};

use super::Category;

/// Marcador de erro devolvido para mensagens vazias.
pub const EMPTY_INPUT: &str = "EMPTY_INPUT";

/// Resultado do pipeline normalizar → classificar → detectar scopes.
///
/// ## Invariantes
///
/// - `reasons` vem da **primeira** regra que casou (nunca de várias)
/// - `scope` só é não-vazio quando `category == System`
/// - `scope` preserva ordem e não contém duplicatas
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Bucket terminal.
    pub category: Category,
    /// Razões legíveis da regra que decidiu.
    pub reasons: Vec<String>,
    /// Tokens de scope de autorização externa.
    pub scope: Vec<String>,
    /// Texto em minúsculas e sem diacríticos.
    pub normalized_text: String,
    /// Texto com verbos reduzidos ao infinitivo.
    pub lemmatized_text: String,
    /// Presente apenas no resultado-sentinela de entrada vazia.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ClassificationResult {
    /// Resultado-sentinela para mensagem vazia após `trim`.
    ///
    /// Nunca passa pelo classificador nem pelo cache.
    pub fn empty_input() -> Self {
        Self {
            category: Category::Unclear,
            reasons: vec!["empty input".to_string()],
            scope: Vec::new(),
            normalized_text: String::new(),
            lemmatized_text: String::new(),
            error: Some(EMPTY_INPUT.to_string()),
        }
    }

    pub fn is_empty_input(&self) -> bool {
        self.error.as_deref() == Some(EMPTY_INPUT)
    }
}

/// Flag binária de idioma. Nada além de `pt`/`en` é suportado.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    /// Interpreta a dica de idioma do chamador (`"pt"`, `"pt-BR"`, `"en"`, `"en-US"`...).
    pub fn from_hint(hint: &str) -> Option<Self> {
        let lower = hint.trim().to_ascii_lowercase();
        if lower.starts_with("pt") {
            Some(Language::Pt)
        } else if lower.starts_with("en") {
            Some(Language::En)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Pt => "pt",
            Language::En => "en",
        }
    }
}

/// Mensagem de uma requisição com todas as suas formas textuais.
///
/// Imutável depois de calculada.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Message {
    pub raw: String,
    pub normalized: String,
    pub lemmatized: String,
    pub language: Language,
}

/// Dicas enviadas pelo chamador junto com a mensagem.
///
/// Aceita `lang` como alias de `language`, formato usado pelos webhooks.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct RequestContext {
    #[serde(default, alias = "lang")]
    pub language: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub model: Option<String>,
}

impl RequestContext {
    /// Idioma solicitado explicitamente, se a dica for reconhecida.
    pub fn language_hint(&self) -> Option<Language> {
        self.language.as_deref().and_then(Language::from_hint)
    }
}
