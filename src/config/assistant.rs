//! Fixed assistant identity: name, version, wake-word aliases and trigger-words.
//!
//! All values are compile-time constants. Aliases and trigger-words are stored
//! lowercase so lookups only need to normalize the input side.

use serde::Serialize;

/// Assistant display name.
pub const ASSISTANT_NAME: &str = "Jarvis";

/// Assistant version.
pub const ASSISTANT_VERSION: &str = "3.0";

/// Phrases that put the assistant into listening mode.
pub const WAKE_WORD_ALIASES: &[&str] = &["джарвис"];

/// Command prefixes that invoke an action.
pub const TRIGGER_WORDS: &[&str] = &["скажи", "покажи", "ответь", "произнеси", "расскажи", "сколько", "слушай"];

/// The assistant's static identity.
pub const JARVIS: Assistant = Assistant {
    name: ASSISTANT_NAME,
    version: ASSISTANT_VERSION,
    aliases: WAKE_WORD_ALIASES,
    trigger_words: TRIGGER_WORDS,
};

/// Identity and vocabulary of the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assistant {
    pub name: &'static str,
    pub version: &'static str,
    pub aliases: &'static [&'static str],
    pub trigger_words: &'static [&'static str],
}

impl Assistant {
    /// Check whether a single word is one of the wake-word aliases.
    pub fn is_wake_word(&self, word: &str) -> bool {
        lookup(self.aliases, word).is_some()
    }

    /// Check whether a single word is one of the trigger-words.
    pub fn is_trigger_word(&self, word: &str) -> bool {
        lookup(self.trigger_words, word).is_some()
    }

    /// Strip a leading wake-word alias from a phrase.
    ///
    /// # Returns
    /// The rest of the phrase (trimmed) if it starts with an alias, `None` otherwise.
    pub fn strip_wake_word<'a>(&self, phrase: &'a str) -> Option<&'a str> {
        let phrase = phrase.trim_start();
        let (first, rest) = phrase.split_once(char::is_whitespace).unwrap_or((phrase, ""));
        self.is_wake_word(first).then(|| rest.trim())
    }

    /// Find the first trigger-word in a phrase.
    pub fn find_trigger_word(&self, phrase: &str) -> Option<&'static str> {
        phrase.split_whitespace().find_map(|word| lookup(self.trigger_words, word))
    }
}

/// Find `word` in `table`, ignoring case and surrounding punctuation.
fn lookup(table: &'static [&'static str], word: &str) -> Option<&'static str> {
    let word = word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
    if word.is_empty() {
        return None;
    }
    table.iter().copied().find(|entry| *entry == word)
}

/// Print the wake-word aliases and trigger-words.
pub fn print_vocabulary(assistant: &Assistant) {
    println!("{} v{}", assistant.name, assistant.version);
    println!("{}", "─".repeat(40));
    println!("Wake-word aliases ({}):", assistant.aliases.len());
    for alias in assistant.aliases {
        println!("  {}", alias);
    }
    println!();
    println!("Trigger-words ({}):", assistant.trigger_words.len());
    for word in assistant.trigger_words {
        println!("  {}", word);
    }
    println!();
}
