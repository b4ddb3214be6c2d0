//! AI chat deep links - prebuilt prompts for generating a new plan
//!
//! Each link opens an assistant with the plan-generation prompt and the
//! literal simplified-schema example already filled in; the user pastes the
//! JSON answer back through `import`. Nothing is read from the assistant.

use tracing::debug;

/// Literal simplified-schema example embedded in every prompt, so the
/// assistant's output round-trips through the importer unchanged.
const SCHEMA_EXAMPLE: &str = r#"[{"title":"PUSH DAY","subtitle":"Focus: Spinta","esercizi":[{"nome":"Panca Piana","serie":"3 x 8","tipo":"chest","note":"Fermo al petto, spinta esplosiva"}]}]"#;

const PLAN_PROMPT_INTRO: &str = "Sei un personal trainer esperto. Genera una scheda di \
allenamento in palestra completa come array JSON, usando esattamente questo formato \
(campo tipo tra: chest, back, shoulders, biceps, triceps, legs, calves). \
Rispondi solo con il JSON. Esempio del formato:\n";

/// One assistant target.
#[derive(Debug, Clone)]
pub struct ChatLink {
    pub name: &'static str,
    pub url: String,
}

fn plan_prompt() -> String {
    format!("{PLAN_PROMPT_INTRO}{SCHEMA_EXAMPLE}")
}

/// The three supported assistants with the prompt already URL-encoded.
pub fn chat_links() -> Vec<ChatLink> {
    let encoded = urlencoding::encode(&plan_prompt()).into_owned();
    vec![
        ChatLink {
            name: "ChatGPT",
            url: format!("https://chatgpt.com/?q={encoded}"),
        },
        ChatLink {
            name: "Claude",
            url: format!("https://claude.ai/new?q={encoded}"),
        },
        ChatLink {
            name: "Perplexity",
            url: format!("https://www.perplexity.ai/search?q={encoded}"),
        },
    ]
}

/// Launch a link in the default browser. Best-effort: a missing browser or
/// handler is logged and ignored.
pub fn open_link(link: &ChatLink) {
    if let Err(e) = open::that(&link.url) {
        debug!(name = link.name, error = %e, "could not open browser");
    }
}
