//! # Léxicos — Listas de Palavras e Frases do Classificador
//!
//! Todas as entradas estão **normalizadas** (minúsculas, sem acento), pois
//! são comparadas contra a saída do [`Normalizer`](super::normalizer::Normalizer).
//!
//! Convenções de casamento usadas por [`Features`](super::features::Features):
//!
//! | Tipo | Casamento | Exemplo |
//! |------|-----------|---------|
//! | palavra | token exato (com plural simples) | `"planilha"` casa `planilhas` |
//! | frase | sequência de tokens delimitada | `"se possivel"` |
//! | substring | `contains` no texto normalizado | `" oi "` |

// ─── Grupo 1: pré-filtros de mensagens curtas ────────────────────

/// Saudações e confirmações curtas que vão direto para `user`.
pub const GREETINGS: &[&str] = &[
    "oi", "oie", "oii", "ola", "opa", "eai", "e ai", "hey", "hi", "hello", "bom dia", "boa tarde",
    "boa noite", "tudo bem", "tudo bom", "td bem", "como vai", "sim", "nao", "ok", "okay", "blz",
    "beleza", "certo", "claro", "entendi", "obrigado", "obrigada", "valeu", "vlw", "show",
    "perfeito", "otimo", "legal", "tchau", "ate mais", "ate logo", "thanks", "thank you", "yes",
    "no", "good morning",
];

/// Pronomes que, sozinhos, não dizem nada.
pub const LONE_PRONOUNS: &[&str] = &[
    "ele", "ela", "eles", "elas", "isso", "isto", "aquilo", "esse", "essa", "este", "esta",
    "aquele", "aquela", "dele", "dela", "daquilo", "disso", "it", "this", "that",
];

/// Interrogativos soltos.
pub const LONE_INTERROGATIVES: &[&str] = &[
    "que", "o que", "oque", "qual", "quais", "quem", "como", "quando", "onde", "porque",
    "por que", "pq", "quanto", "quantos", "cade", "what", "how", "why", "when", "where", "which",
    "who",
];

/// Substantivos genéricos que, sozinhos, não indicam a operação desejada.
pub const GENERIC_NOUNS: &[&str] = &[
    "documento", "arquivo", "email", "planilha", "reuniao", "agenda", "evento", "calendario",
    "mensagem", "relatorio", "tarefa", "coisa", "negocio", "boleto", "pdf", "file", "document",
    "meeting", "drive", "contato", "nota", "apresentacao", "slide", "pasta",
];

/// Artigos ignorados ao decidir se um fragmento é "substantivo solto".
pub const ARTICLES: &[&str] = &["o", "a", "os", "as", "um", "uma", "uns", "umas", "the", "an"];

/// Expressões de incerteza.
pub const UNCERTAINTY: &[&str] = &[
    "nao sei", "sei la", "sla", "talvez", "hmm", "hum", "humm", "sei nao", "acho que",
    "quem sabe", "na duvida", "nao tenho certeza", "not sure", "maybe", "idk",
];

// ─── Grupo 2: ambiguidade contextual ─────────────────────────────

/// Reconhecimentos conversacionais que sempre vão para `messages`.
pub const ACKNOWLEDGEMENTS: &[&str] = &[
    "isso mesmo", "isso ai", "e isso", "e isso ai", "exatamente isso", "foi isso", "era isso",
    "era isso mesmo", "ok entendi isso", "obrigado por isso", "obrigada por isso",
    "valeu por isso", "gostei disso", "adorei isso", "entendi isso", "faz sentido",
    "faz sentido isso", "concordo com isso", "ele tem razao", "ela tem razao", "isso resolve",
];

/// Pronomes de terceira pessoa que exigem antecedente.
pub const THIRD_PERSON_PRONOUNS: &[&str] = &[
    "ele", "ela", "eles", "elas", "dele", "dela", "deles", "delas", "nele", "nela", "neles",
    "nelas", "lhe", "lhes",
];

/// Substantivos de pessoa que servem de antecedente para um pronome.
pub const PERSON_NOUNS: &[&str] = &[
    "cliente", "chefe", "gerente", "equipe", "time", "pessoal", "colega", "amigo", "amiga",
    "fornecedor", "professor", "professora", "diretor", "diretora", "usuario", "contato",
    "funcionario", "aluno", "aluna", "mae", "pai", "irmao", "irma", "esposa", "marido", "medico",
    "medica", "advogado", "advogada", "socio", "socia", "coordenador", "coordenadora",
];

/// Fraseado temporal ou condicional vago.
pub const VAGUE_PHRASES: &[&str] = &[
    "se eu puder", "se puder", "se possivel", "se der", "quando der", "quando puder",
    "quando possivel", "quando tiver tempo", "algum dia", "qualquer dia", "qualquer hora",
    "um dia desses", "mais tarde talvez", "se conseguir", "se pudesse", "se fosse possivel",
    "eventualmente", "if i can", "if possible", "when possible", "whenever", "someday",
    "at some point",
];

/// Objetos genéricos, sem especificação.
pub const GENERIC_OBJECTS: &[&str] = &[
    "algo", "alguma coisa", "uma coisa", "coisa", "coisas", "isso", "isto", "aquilo", "tudo",
    "negocio", "parada", "lance", "something", "stuff", "it", "this", "that",
];

/// Marcadores de destino/qualificação que tornam um objeto genérico aceitável.
pub const QUALIFIERS: &[&str] = &[
    "para", "pra", "pro", "pros", "pras", "com", "ao", "aos", "to", "with", "no", "na", "em",
    "por", "via", "ate",
];

/// Conectores que unem verbos de ação em multi-intenção.
pub const MULTI_INTENT_CONNECTORS: &[&str] = &["ou", "or", "e", "and", "nem"];

/// Indicadores de prioridade/sequência que desfazem a ambiguidade multi-verbo.
pub const PRIORITY_MARKERS: &[&str] = &[
    "primeiro", "depois", "em seguida", "entao", "antes", "logo apos", "apos", "por fim",
    "finalmente", "tambem", "alem disso", "and then", "first", "then", "also",
];

/// Verbo polissêmico cujo objeto admite duas operações distintas.
pub struct PolysemousPattern {
    pub verb: &'static str,
    pub objects: &'static [&'static str],
    pub senses: &'static str,
}

pub const POLYSEMOUS: &[PolysemousPattern] = &[
    PolysemousPattern {
        verb: "marcar",
        objects: &["email", "mensagem", "conversa"],
        senses: "flag or schedule",
    },
    PolysemousPattern {
        verb: "baixar",
        objects: &["boleto", "fatura", "cobranca", "pagamento"],
        senses: "download or settle",
    },
    PolysemousPattern {
        verb: "fechar",
        objects: &["agenda", "planilha", "documento", "arquivo"],
        senses: "close or finalize",
    },
    PolysemousPattern {
        verb: "mover",
        objects: &["reuniao", "evento", "compromisso", "call"],
        senses: "reschedule or relocate",
    },
    PolysemousPattern {
        verb: "atualizar",
        objects: &["agenda", "calendario"],
        senses: "refresh or change events",
    },
];

// ─── Grupo 3: perguntas de capacidade ────────────────────────────

pub const CAPABILITY_PHRASES: &[&str] = &[
    "voce pode", "vc pode", "voce consegue", "vc consegue", "consegue", "e possivel",
    "seria possivel", "da para", "da pra", "tem como", "voce sabe", "voce e capaz", "can you",
    "could you", "are you able", "is it possible",
];

// ─── Grupo 4: controle interno vs produto externo ────────────────

pub const INTERNAL_KEYWORDS: &[&str] = &[
    "sessao", "session", "cache", "log", "logs", "debug", "historico", "history", "contexto",
    "context", "memoria", "memory", "conversa",
];

/// Verbos de controle (infinitivos ou formas inglesas literais).
pub const CONTROL_VERBS: &[&str] = &[
    "limpar", "reiniciar", "resetar", "ativar", "desativar", "habilitar", "desabilitar", "zerar",
    "apagar", "reset", "restart", "clear", "enable", "disable",
];

pub const EXTERNAL_PRODUCTS: &[&str] = &[
    "google", "gmail", "outlook", "whatsapp", "telegram", "slack", "notion", "trello", "dropbox",
    "icloud", "onedrive", "teams", "zoom", "instagram", "facebook", "linkedin", "twitter",
    "spotify", "netflix", "uber", "ifood", "nubank", "itau", "bradesco", "amazon",
    "mercado livre", "shopify", "hubspot", "salesforce", "jira", "github", "n8n", "zapier",
    "apple",
];

// ─── Grupo 5: intenção genérica de integração ────────────────────

/// Palavras-chave de domínio de sistemas/APIs.
pub const SYSTEM_KEYWORDS: &[&str] = &[
    "documento", "document", "doc", "docs", "planilha", "spreadsheet", "sheet", "tabela",
    "arquivo", "file", "pdf", "drive", "icloud", "armazenamento", "storage", "calendario",
    "calendar", "agenda", "evento", "compromisso", "contatos", "contacts", "nota", "notes",
    "reuniao", "meeting", "encontro", "call", "compartilhar", "share", "sincronizar", "sync",
    "integracao", "api", "oauth", "google", "apple", "boleto", "fatura", "cobranca", "pagamento",
    "pix", "email", "gmail", "rascunho", "backup", "upload", "download", "slide", "apresentacao",
    "relatorio", "convite", "aula", "agendamento", "pasta",
];

/// Objetos de integração específicos.
pub const INTEGRATION_OBJECTS: &[&str] = &[
    "gmail", "destinatario", "assunto", "planilha", "sheet", "excel", "slide", "apresentacao",
    "google docs", "google drive", "reuniao", "meeting", "compromisso", "evento", "boleto",
    "pagamento", "cobranca", "fatura", "pix", "backup", "upload", "download", "rascunho",
    "relatorio", "call", "agendamento", "convite", "aula",
];

pub const EMAIL_WORDS: &[&str] = &["email", "e mail", "gmail", "mail"];

/// Marcadores de destinatário para e-mail.
pub const RECIPIENT_MARKERS: &[&str] = &["para", "pra", "pro", "ao", "to", "destinatario"];

pub const DOCUMENT_QUALIFIERS: &[&str] = &["documento", "doc", "docs", "arquivo", "file", "pdf", "pasta"];

pub const CALENDAR_QUALIFIERS: &[&str] = &["agenda", "calendario", "calendar"];

pub const SHARE_VERBS: &[&str] = &["compartilhar"];

pub const SHARE_TARGETS: &[&str] = &[
    "com", "para", "pra", "equipe", "time", "drive", "link", "pasta", "acesso", "todos",
];

pub const SCHEDULE_VERBS: &[&str] = &["agendar", "marcar", "reservar", "reagendar"];

pub const TIME_MARKERS: &[&str] = &[
    "hoje", "amanha", "semana", "segunda", "terca", "quarta", "quinta", "sexta", "sabado",
    "domingo", "manha", "tarde", "noite", "hora", "horas", "horario", "proxima", "proximo", "dia",
    "mes",
];

pub const CANCEL_VERBS: &[&str] = &["cancelar", "reagendar"];

pub const CANCEL_OBJECTS: &[&str] = &[
    "agendamento", "reuniao", "compromisso", "evento", "call", "aula", "consulta", "horario",
    "marcado", "meeting", "assinatura",
];

/// Frases que anulam a intenção de integração (substring no texto normalizado).
pub const INTEGRATION_EXCLUSIONS: &[&str] = &[
    "voce pode", "voce consegue", "vc pode", "e possivel", "o que voce pode", "o que voce faz",
    "o que voce consegue", "quais sao suas", "quais suas funcionalidades", "como voce funciona",
    "me ajude", "me ajuda", " oi ", " ola ", " bom dia ", "melhorar meu email",
    "organizar meus documentos", "que dia e hoje", "data de hoje", "agendar tempo",
    "como fazer", "como faco", "tutorial", "aprender", "estudar", "dicas de", "boas praticas",
    "configurar",
];

// ─── Grupo 6: narrativa em terceira pessoa ───────────────────────

/// Sujeitos pronominais de narrativa.
pub const NARRATIVE_SUBJECTS: &[&str] = &[
    "ele", "ela", "eles", "elas", "alguem", "ninguem", "equipe", "time", "chefe", "gerente",
    "cliente", "pessoal",
];

/// Terminações de pretérito perfeito de terceira pessoa.
pub const PRETERITE_3P_SUFFIXES: &[&str] = &["aram", "eram", "iram", "ou", "eu", "iu"];

/// Formas que terminam como pretérito mas não são narrativa de ação.
pub const NON_NARRATIVE_FORMS: &[&str] = &["sou", "vou", "estou", "dou", "ou", "eu", "meu", "seu", "teu", "eram"];

/// Terminações de pretérito perfeito de primeira e segunda pessoa.
pub const PRETERITE_1P_SUFFIXES: &[&str] = &["ei", "aste", "este", "iste"];

/// Pretéritos irregulares de verbos do vocabulário (`fazer upload`).
pub const IRREGULAR_PRETERITES: &[&str] = &["fiz", "fez", "fizemos", "fizeram", "fizeste"];

/// Conectivos que abrem oração subordinada (`o documento que ele pediu`).
pub const COMPLEMENTIZERS: &[&str] = &["que", "como", "quando", "onde", "porque", "se"];

// ─── Grupos 7-8: tarefas abstratas e ajuda ───────────────────────

pub const ABSTRACT_TASKS: &[&str] = &[
    "organizar meus pensamentos", "organizar pensamentos", "organizar minhas ideias",
    "organizar as ideias", "organizar minha vida", "organizar minha rotina",
    "organizar meu tempo", "gerenciar meu tempo", "gerenciar melhor meu tempo", "mentalmente",
    "autoconhecimento", "desenvolvimento pessoal", "crescimento pessoal", "minha carreira",
    "meu futuro", "longo prazo", "metas pessoais", "meus objetivos", "produtividade",
    "habilidades", "autoestima", "inteligencia emocional", "melhorar meu email",
];

pub const HELP_PHRASES: &[&str] = &[
    "me ajuda", "me ajude", "ajuda com", "help", "tutorial", "como usar", "como faco",
    "como fazer", "dicas de", "me ensina", "me ensine", "guia de", "boas praticas",
    "o que voce pode fazer", "o que voce faz", "quais suas funcionalidades",
    "quais sao suas funcionalidades", "manual",
];

// ─── Grupos 10-11: perguntas e mensagens pessoais ────────────────

pub const TECHNICAL_TERMS: &[&str] = &[
    "funciona", "conceito", "diferenca entre", "significa", "significado", "definicao", "api",
    "codigo", "programacao", "algoritmo", "git", "python", "rust", "javascript",
    "banco de dados", "servidor", "inteligencia artificial", "machine learning", "protocolo",
    "arquitetura", "framework", "biblioteca", "versionamento", "branch", "merge",
];

pub const PERSONALIZATION: &[&str] = &[
    "estou me sentindo", "me sinto", "preciso de conselhos", "preciso de ajuda para",
    "sobrecarregado", "sobrecarregada", "ansioso", "ansiosa", "estressado", "estressada",
    "desmotivado", "desmotivada", "minha situacao", "no meu caso", "me aconselhe",
    "o que voce acha que eu",
];

/// Tarefas curtas e templadas que nunca são tratadas como pessoais.
pub const SHORT_TASK_EXCEPTIONS: &[&str] = &[
    "plano de", "minhas ideias", "uma estrategia", "roteiro de", "lista de tarefas",
    "cronograma de", "resumo de", "checklist de",
];

/// Pronomes pessoais usados no fallback por eliminação.
pub const PERSONAL_PRONOUNS: &[&str] = &["eu", "meu", "minha", "meus", "minhas", "mim", "comigo"];

/// Stopwords PT-BR normalizadas (sem acento), usadas para antecedentes e sujeitos.
pub const STOPWORDS: &[&str] = &[
    "o", "a", "os", "as", "um", "uma", "uns", "umas", "de", "do", "da", "dos", "das", "em", "no",
    "na", "nos", "nas", "por", "pelo", "pela", "pelos", "pelas", "para", "pra", "pro", "com",
    "sem", "sob", "sobre", "entre", "que", "se", "nao", "sim", "mas", "ou", "e", "foi", "era",
    "ser", "ter", "ha", "esta", "eu", "ele", "ela", "nos", "eles", "elas", "me", "te", "lhe",
    "isso", "isto", "esse", "essa", "aquele", "aquela", "meu", "minha", "seu", "sua", "nosso",
    "nossa", "muito", "mais", "menos", "bem", "mal", "ja", "ainda", "tambem", "entao", "quando",
    "como", "onde", "porque", "depois", "antes", "agora", "sempre", "nunca", "todo", "toda",
    "cada", "outro", "outra", "mesmo", "mesma", "ao", "aos", "num", "numa", "qual", "quais",
    "quem", "ate", "pode", "vai", "vou", "tem", "tinha", "acho", "aqui", "ali", "la", "voce",
    "vc", "ontem", "hoje", "amanha",
];
