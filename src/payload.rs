//! # Payload — Metadados para o Construtor de Prompts
//!
//! Transforma a classificação em um payload de chat pronto para o modelo
//! de linguagem. O texto das instruções é curto de propósito: o
//! construtor de prompts downstream é quem decide o prompt final.
//!
//! ```text
//! messages = [
//!   system    instrução de idioma
//!   system    instrução da categoria (scopes / pedir esclarecimento)
//!   ...       últimos N turnos válidos do histórico
//!   user      a mensagem
//! ]
//! ```
//!
//! ## Parâmetros por Categoria
//!
//! | Categoria | Temperatura | Max tokens |
//! |-----------|-------------|------------|
//! | `messages` | min(t, 1.0) | 800 |
//! | `system` | min(t, 0.7) | 1200 |
//! | `user` | min(t, 1.0) | 2000 |
//! | `unclear` | min(t, 0.5) | 400 |

use serde::{Deserialize, Serialize};

use crate::config::PayloadConfig;
use crate::core::{Category, ClassificationResult, Language, Message, RequestContext};

/// Resposta fixa para mensagem vazia.
pub const EMPTY_INPUT_REPLY: &str = "Não recebi sua mensagem. Pode reenviar, por favor?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Some(Role::System),
            "user" => Some(Role::User),
            "assistant" => Some(Role::Assistant),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}

/// Turno de histórico como chega do chamador. Entradas malformadas são
/// descartadas na truncagem, não rejeitadas.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct HistoryTurn {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl HistoryTurn {
    fn to_message(&self) -> Option<ChatMessage> {
        let role = Role::parse(self.role.as_deref()?)?;
        let content = self.content.as_deref()?.trim();
        (!content.is_empty()).then(|| ChatMessage::new(role, content))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatPayload {
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

pub struct PayloadBuilder {
    default_model: String,
    default_temperature: f64,
    history_turns: usize,
}

impl From<&PayloadConfig> for PayloadBuilder {
    fn from(c: &PayloadConfig) -> Self {
        Self {
            default_model: c.default_model.clone(),
            default_temperature: c.default_temperature,
            history_turns: c.history_turns,
        }
    }
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self::from(&PayloadConfig::default())
    }
}

impl PayloadBuilder {
    pub fn build(
        &self,
        result: &ClassificationResult,
        message: &Message,
        ctx: &RequestContext,
        history: &[HistoryTurn],
    ) -> ChatPayload {
        let model = ctx.model.clone().unwrap_or_else(|| self.default_model.clone());
        let requested = ctx.temperature.unwrap_or(self.default_temperature);
        let (ceiling, max_tokens) = parameters(result.category);
        let temperature = requested.min(ceiling).max(0.0);

        if result.is_empty_input() {
            return ChatPayload {
                model,
                temperature,
                max_tokens,
                messages: vec![ChatMessage::new(Role::Assistant, EMPTY_INPUT_REPLY)],
            };
        }

        let mut messages = vec![
            ChatMessage::new(Role::System, language_instruction(message.language)),
            ChatMessage::new(Role::System, category_instruction(result, message.language)),
        ];
        messages.extend(truncate_history(history, self.history_turns));
        messages.push(ChatMessage::new(Role::User, message.raw.trim()));

        ChatPayload {
            model,
            temperature,
            max_tokens,
            messages,
        }
    }
}

/// `(teto de temperatura, max_tokens)` por categoria.
pub fn parameters(category: Category) -> (f64, u32) {
    match category {
        Category::Messages => (1.0, 800),
        Category::System => (0.7, 1200),
        Category::User => (1.0, 2000),
        Category::Unclear => (0.5, 400),
    }
}

/// Últimos `turns` turnos válidos, em ordem cronológica.
pub fn truncate_history(history: &[HistoryTurn], turns: usize) -> Vec<ChatMessage> {
    let valid: Vec<ChatMessage> = history.iter().filter_map(HistoryTurn::to_message).collect();
    let skip = valid.len().saturating_sub(turns);
    valid.into_iter().skip(skip).collect()
}

fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::En => "Reply in English.",
        Language::Pt => "Responda em português do Brasil.",
    }
}

fn category_instruction(result: &ClassificationResult, language: Language) -> String {
    match (result.category, language) {
        (Category::System, Language::Pt) => {
            format!("Pedido de integração. Scopes necessários: {}.", scope_list(&result.scope))
        }
        (Category::System, Language::En) => {
            format!("Integration request. Required scopes: {}.", scope_list(&result.scope))
        }
        (Category::Messages, Language::Pt) => "Responda de forma direta e objetiva.".into(),
        (Category::Messages, Language::En) => "Answer directly and concisely.".into(),
        (Category::User, Language::Pt) => "Mensagem pessoal: responda com atenção ao contexto do usuário.".into(),
        (Category::User, Language::En) => "Personal message: answer with attention to the user's context.".into(),
        (Category::Unclear, Language::Pt) => "Mensagem ambígua: peça esclarecimento antes de agir.".into(),
        (Category::Unclear, Language::En) => "Ambiguous message: ask for clarification before acting.".into(),
    }
}

fn scope_list(scopes: &[String]) -> String {
    if scopes.is_empty() {
        "nenhum".to_string()
    } else {
        scopes.join(", ")
    }
}
