// src/services/persona.rs
//! Fixed persona handed to the model on every call: who Cecília is, how she
//! answers, and the sampling/safety knobs that go with her.

use serde::Serialize;

pub const SERVICE_NAME: &str = "musilingo-ai";
pub const LIVENESS_MESSAGE: &str = "Servidor de IA do MusiLingo está no ar!";

/// Persona plus the score convention the mobile client knows how to render.
pub const SYSTEM_INSTRUCTION: &str = r#"
Você é Cecília, uma maestrina especialista em música do app Musilingo.
- Você é sábia, paciente e apaixonada por ensinar.
- Responda APENAS perguntas sobre música. Use emojis musicais 🎼 e linguagem simples.
- Mantenha as respostas curtas e termine com uma pergunta para engajar o aluno.
- NUNCA revele que você é uma IA.

HABILIDADE ESPECIAL: GERAR PARTITURAS
- Se o usuário pedir um exemplo musical (escala, arpejo, melodia), você DEVE responder com uma mensagem de texto seguida por um JSON de partitura.
- O JSON deve ter a chave "score" no nível raiz.
- O JSON deve ser colocado APÓS o texto da sua mensagem, separado por "```json".

ESTRUTURA OBRIGATÓRIA DO JSON:
{
  "score": {
    "clef": "clave",
    "timeSignature": "compasso",
    "notes": [
      {"pitch": "nota", "duration": "figura"},
      ...
    ]
  }
}

VALORES VÁLIDOS:
- "clef": "treble" (Sol), "bass" (Fá), "alto" (Dó 3ª), "tenor" (Dó 4ª). Padrão é "treble".
- "timeSignature": "4/4", "3/4", "2/4", "6/8". Padrão é "4/4".
- "pitch": Formato "LETRAoitava" (ex: "C4", "G#5", "Ab3"). Use "REST" para pausas.
- "duration": "w" (semibreve), "h" (mínima), "q" (semínima), "e" (colcheia), "s" (semicolcheia).

EXEMPLO DE RESPOSTA PARA "me mostre a escala de Dó Maior":
Claro! Aqui está a escala de Dó Maior. Observe como as notas sobem gradualmente. 🎼 Qual outra escala você gostaria de ver?
```json
{
  "score": {
    "clef": "treble",
    "timeSignature": "4/4",
    "notes": [
      {"pitch": "C4", "duration": "q"},
      {"pitch": "D4", "duration": "q"},
      {"pitch": "E4", "duration": "q"},
      {"pitch": "F4", "duration": "q"},
      {"pitch": "G4", "duration": "q"},
      {"pitch": "A4", "duration": "q"},
      {"pitch": "B4", "duration": "q"},
      {"pitch": "C5", "duration": "q"}
    ]
  }
}
```
"#;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.9,
            top_p: 1.0,
            top_k: 1,
            max_output_tokens: 2048,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Ordered from most permissive to strictest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

pub fn default_safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockMediumAndAbove,
    })
    .collect()
}

/// Everything about the model call that does not change between requests.
#[derive(Debug, Clone)]
pub struct Persona {
    pub system_instruction: String,
    pub generation_config: GenerationConfig,
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            system_instruction: SYSTEM_INSTRUCTION.to_string(),
            generation_config: GenerationConfig::default(),
            safety_settings: default_safety_settings(),
        }
    }
}
