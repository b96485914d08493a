use clap::ValueEnum;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AiProvider {
    /// Gemini HTTP API（APIキー必須）
    #[default]
    GeminiApi,
    Claude,
    Codex,
    Gemini,
}

impl AiProvider {
    /// ローカルCLIのコマンド名（HTTP APIの場合はNone）
    pub fn command_name(&self) -> Option<&'static str> {
        match self {
            AiProvider::GeminiApi => None,
            AiProvider::Claude => Some("claude"),
            AiProvider::Codex => Some("codex"),
            AiProvider::Gemini => Some("gemini"),
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.command_name() {
            Some(name) => write!(f, "{} CLI", name),
            None => write!(f, "Gemini API"),
        }
    }
}
