//! French word classification used by the list and reminder grammars.
//!
//! The lexicon is a closed-set-plus-heuristic classifier, not a morphological
//! analyzer. Callers depend on the [`Classification`] trait so the dictionary
//! backed [`FrenchLexicon`] can be swapped for a real tagger.

pub mod adjectives;
pub mod numbers;

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;

pub use numbers::{parse_number_words, NUMBER_WORD_PATTERN};

/// Characters stripped from both ends of a word by [`normalize`].
const TRIM_CHARS: &[char] = &[
    ' ', ',', ';', '.', '?', '!', ':', '"', '\'', '«', '»', '(', ')', '[', ']', '{', '}', '/', '\\',
    '-', '_',
];

/// Word classes the splitter and command parser need.
pub trait Classification: Send + Sync {
    fn is_determiner(&self, normalized: &str) -> bool;
    fn is_likely_adj(&self, normalized: &str) -> bool;
    fn is_likely_noun(&self, normalized: &str) -> bool;
}

/// Pure function: casefold, strip diacritics and trim surrounding punctuation.
///
/// `normalize(normalize(w)) == normalize(w)` for every input.
pub fn normalize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lowered = word.replace('’', "'").to_lowercase();
    let folded = fold_diacritics(&lowered);
    folded.trim_matches(TRIM_CHARS).to_string()
}

/// Pure function: replace accented Latin letters with their base letter and
/// drop combining marks. Characters outside the table pass through.
pub fn fold_diacritics(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => out.push('a'),
            'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' => out.push('A'),
            'ç' => out.push('c'),
            'Ç' => out.push('C'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'È' | 'É' | 'Ê' | 'Ë' => out.push('E'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'Ì' | 'Í' | 'Î' | 'Ï' => out.push('I'),
            'ñ' => out.push('n'),
            'Ñ' => out.push('N'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' => out.push('o'),
            'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' => out.push('O'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'Ù' | 'Ú' | 'Û' | 'Ü' => out.push('U'),
            'ý' | 'ÿ' => out.push('y'),
            'Ý' | 'Ÿ' => out.push('Y'),
            'æ' => out.push_str("ae"),
            'Æ' => out.push_str("AE"),
            'œ' => out.push_str("oe"),
            'Œ' => out.push_str("OE"),
            'ß' => out.push_str("ss"),
            '\u{0300}'..='\u{036F}' => {}
            other => out.push(other),
        }
    }
    out
}

/// Pure function: lowercase, fold and collapse a whole phrase into a
/// comparison key (letters, digits and apostrophes only).
pub fn normalize_for_key(text: &str) -> String {
    let folded = fold_diacritics(&text.replace('’', "'").to_lowercase());
    let spaced: String = folded
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalized_set(entries: &[&str]) -> HashSet<String> {
    entries
        .iter()
        .map(|e| normalize(e))
        .filter(|e| !e.is_empty())
        .collect()
}

static SHARED: Lazy<Arc<FrenchLexicon>> = Lazy::new(|| Arc::new(FrenchLexicon::new()));

/// Dictionary-backed French classifier.
#[derive(Debug, Clone)]
pub struct FrenchLexicon {
    determiners: HashSet<String>,
    prepositions: HashSet<String>,
    conjunctions: HashSet<String>,
    stopwords: HashSet<String>,
    adjectives: HashSet<String>,
    nouns: HashSet<String>,
}

impl FrenchLexicon {
    pub fn new() -> Self {
        Self {
            determiners: normalized_set(&[
                "le", "la", "les", "l", "un", "une", "des", "du", "de", "d", "quelques",
                "plusieurs", "ce", "cet", "cette", "ces", "mon", "ma", "mes", "ton", "ta", "tes",
                "son", "sa", "ses", "notre", "nos", "votre", "vos", "leur", "leurs", "aucun",
                "aucune", "chaque", "tout", "toute", "tous", "toutes", "quel", "quelle",
                "quelque",
            ]),
            prepositions: normalized_set(&[
                "avec", "chez", "sans", "sous", "sur", "pour", "par", "dans", "vers", "entre",
                "contre", "après", "avant", "pendant", "depuis", "selon", "malgré", "jusque",
                "près", "loin", "parmi",
            ]),
            conjunctions: normalized_set(&["et", "ou", "mais", "donc", "or", "ni", "car"]),
            stopwords: normalized_set(&[
                "plus", "moins", "très", "bien", "assez", "beaucoup", "encore", "aussi", "comme",
                "ainsi", "presque", "juste", "seulement",
            ]),
            adjectives: adjectives::build_adjective_set(),
            nouns: normalized_set(&[
                "pomme", "pommes", "tomate", "tomates", "carotte", "carottes", "oignon",
                "oignons", "poireau", "poireaux", "courgette", "courgettes", "banane", "bananes",
                "poivron", "poivrons", "concombre", "concombres", "patate", "patates", "pâtes",
                "pâte", "riz", "yaourt", "yaourts", "fromage", "lait", "beurre", "oeuf", "oeufs",
                "pain", "baguette", "biscuit", "biscuits", "gâteau", "gâteaux", "farine", "sel",
                "poivre", "huile", "vinaigre", "eau", "jus", "café", "thé", "soupe", "légume",
                "légumes", "fruit", "fruits", "viande", "steak", "poulet", "dinde", "jambon",
                "saucisse", "poisson", "crevette", "crevettes", "moule", "moules", "salade",
                "salades", "avocat", "avocats", "champignon", "champignons", "lardon", "lardons",
                "sauce", "sauces", "céréale", "céréales", "barre", "barres", "ail", "échalote",
                "échalotes", "compote", "compotes", "lessive", "savon", "dentifrice",
                "shampoing", "papier", "essuie", "torchon", "torchons", "éponge", "éponges",
            ]),
        }
    }

    /// Process-wide lexicon, built on first use.
    pub fn shared() -> Arc<FrenchLexicon> {
        Arc::clone(&SHARED)
    }

    pub fn is_preposition(&self, normalized: &str) -> bool {
        self.prepositions.contains(normalized)
    }

    pub fn is_conjunction(&self, normalized: &str) -> bool {
        self.conjunctions.contains(normalized)
    }

    pub fn is_stopword(&self, normalized: &str) -> bool {
        self.stopwords.contains(normalized)
    }
}

impl Default for FrenchLexicon {
    fn default() -> Self {
        Self::new()
    }
}

impl Classification for FrenchLexicon {
    fn is_determiner(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.determiners.contains(normalized)
    }

    fn is_likely_adj(&self, normalized: &str) -> bool {
        !normalized.is_empty() && self.adjectives.contains(normalized)
    }

    /// Closed sets first, then the noun whitelist, then the open-class
    /// fallback: three letters or more, or a plural/feminine ending.
    fn is_likely_noun(&self, normalized: &str) -> bool {
        if normalized.is_empty() {
            return false;
        }
        if self.determiners.contains(normalized)
            || self.prepositions.contains(normalized)
            || self.conjunctions.contains(normalized)
            || self.stopwords.contains(normalized)
            || self.adjectives.contains(normalized)
        {
            return false;
        }
        if self.nouns.contains(normalized) {
            return true;
        }
        if normalized.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        if normalized.chars().filter(|c| c.is_alphabetic()).count() >= 3 {
            return true;
        }
        matches!(normalized.chars().last(), Some('s' | 'x' | 'e'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_ligatures_and_marks() {
        assert_eq!(fold_diacritics("œuf"), "oeuf");
        assert_eq!(fold_diacritics("e\u{0301}te\u{0301}"), "ete");
    }

    #[test]
    fn key_collapses_punctuation() {
        assert_eq!(normalize_for_key("  Lait,  demi-écrémé! "), "lait demi ecreme");
    }
}
