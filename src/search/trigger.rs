//! Decides whether a message needs live search results

/// Lexical cues for time-sensitive or volatile information
pub const DEFAULT_TRIGGER_TERMS: &[&str] = &[
    "güncel",
    "son",
    "yeni",
    "bugün",
    "dün",
    "bu hafta",
    "bu ay",
    "haber",
    "fiyat",
    "kur",
    "döviz",
    "borsa",
    "hava durumu",
    "trafik",
    "oranlar",
    "seçim",
    "maç",
    "skor",
    "sonuç",
    "zamanı",
    "ne zaman",
    "kaçta",
    "nerede",
    "hangi",
    "kim kazandı",
    "çıktı mı",
    "yayınlandı mı",
    "açıklandı mı",
];

/// Case-insensitive substring matcher over a fixed term list
#[derive(Debug, Clone)]
pub struct SearchTrigger {
    terms: Vec<String>,
}

impl SearchTrigger {
    /// Trigger over the default term list
    pub fn new() -> Self {
        Self::with_terms(DEFAULT_TRIGGER_TERMS.iter().copied())
    }

    /// Trigger over a custom term list; empty terms are dropped
    pub fn with_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| fold_case(t.as_ref()))
            .filter(|t| !t.trim().is_empty())
            .collect();
        Self { terms }
    }

    /// Whether any trigger term occurs in the text
    pub fn should_search(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let folded = fold_case(text);
        self.terms.iter().any(|term| folded.contains(term.as_str()))
    }

    /// The first trigger term found in the text
    pub fn matched_term(&self, text: &str) -> Option<&str> {
        let folded = fold_case(text);
        self.terms
            .iter()
            .find(|term| folded.contains(term.as_str()))
            .map(String::as_str)
    }
}

impl Default for SearchTrigger {
    fn default() -> Self {
        Self::new()
    }
}

/// Lower-case with Turkish dotted/dotless i folded to plain `i`
fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| match c {
            'İ' | 'I' | 'ı' => 'i'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weather_question_triggers() {
        let trigger = SearchTrigger::new();
        assert!(trigger.should_search("Bugün hava durumu nasıl?"));
    }

    #[test]
    fn test_greeting_does_not_trigger() {
        let trigger = SearchTrigger::new();
        assert!(!trigger.should_search("Merhaba, nasılsın?"));
        assert!(!trigger.should_search("Merhaba"));
    }

    #[test]
    fn test_exchange_rate_triggers() {
        let trigger = SearchTrigger::new();
        assert!(trigger.should_search("Dolar kuru ne kadar?"));
        assert_eq!(trigger.matched_term("Dolar kuru ne kadar?"), Some("kur"));
    }

    #[test]
    fn test_any_casing_triggers() {
        let trigger = SearchTrigger::new();
        assert!(trigger.should_search("BUGÜN HAVA DURUMU"));
        assert!(trigger.should_search("Maçı KİM KAZANDI?"));
        assert!(trigger.should_search("maçı kim KAZANDI"));
        assert!(trigger.should_search("HANGİ takım?"));
        assert!(trigger.should_search("HANGI takim?"));
    }

    #[test]
    fn test_empty_never_triggers() {
        let trigger = SearchTrigger::new();
        assert!(!trigger.should_search(""));

        let trigger = SearchTrigger::with_terms(["", "  "]);
        assert!(!trigger.should_search("anything"));
        assert!(!trigger.should_search("two  spaces"));
        assert_eq!(trigger.matched_term("two  spaces"), None);
    }

    #[test]
    fn test_custom_terms() {
        let trigger = SearchTrigger::with_terms(["Price", "who won"]);
        assert!(trigger.should_search("what is the PRICE of gold"));
        assert!(trigger.should_search("Who Won the match?"));
        assert!(!trigger.should_search("hello there"));
    }

    #[test]
    fn test_every_default_term_triggers_itself() {
        let trigger = SearchTrigger::new();
        for term in DEFAULT_TRIGGER_TERMS {
            assert!(trigger.should_search(term), "term {term} did not trigger");
            assert!(
                trigger.should_search(&term.to_uppercase()),
                "upper-cased {term} did not trigger"
            );
        }
    }
}
