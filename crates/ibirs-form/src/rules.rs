//! Prompt-name conventions.
//!
//! Three variable names carry UI conventions baked into the platform's
//! prompting screens and must render as specialized widgets; every other
//! `prompt_`-prefixed variable is suppressed outright (the platform settles
//! those itself). The precedence lives in one ordered table so it stays
//! visible and testable.

/// What a matched prompt-name convention asks the synthesizer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    /// Closed choice over the fixed country set, declared options ignored.
    CountryChoice,
    /// Date picker, `YYYY-MM-DD`.
    DatePicker,
    /// Month picker, `YYYY-MM`.
    MonthPicker,
    /// No control, no submission entry.
    Suppress,
}

/// The fixed country set. Keys double as labels.
pub const COUNTRY_OPTIONS: [&str; 3] = ["JAPAN", "ENGLAND", "ITALY"];

/// Label used for the country special, overriding the description.
pub const COUNTRY_LABEL: &str = "国を選択してください";
/// Label fallbacks for the date and month specials, used when the
/// description is empty.
pub const DATE_FALLBACK_LABEL: &str = "年月日を選択してください";
pub const MONTH_FALLBACK_LABEL: &str = "年月を選択してください";

#[derive(Debug, Clone, Copy)]
enum Pattern {
    Contains(&'static str),
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    fn matches(self, name: &str) -> bool {
        match self {
            Pattern::Contains(needle) => name.contains(needle),
            Pattern::Exact(exact) => name == exact,
            Pattern::Prefix(prefix) => name.starts_with(prefix),
        }
    }
}

/// Precedence order matters: the country substring beats the exact names,
/// and the bare prefix only catches what rules above it left.
const PROMPT_RULES: &[(Pattern, PromptAction)] = &[
    (Pattern::Contains("prompt_COUNTRY"), PromptAction::CountryChoice),
    (Pattern::Exact("prompt_YYMD"), PromptAction::DatePicker),
    (Pattern::Exact("prompt_YYM"), PromptAction::MonthPicker),
    (Pattern::Prefix("prompt_"), PromptAction::Suppress),
];

/// First matching rule, top down. `None` means the generic rule applies.
pub fn prompt_action(name: &str) -> Option<PromptAction> {
    PROMPT_RULES
        .iter()
        .find(|(pattern, _)| pattern.matches(name))
        .map(|&(_, action)| action)
}
