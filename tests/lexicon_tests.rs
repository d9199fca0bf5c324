use voxnote::lexicon::{
    fold_diacritics, normalize, normalize_for_key, parse_number_words, Classification,
    FrenchLexicon,
};

#[test]
fn test_normalize_idempotent() {
    let samples = [
        "Élève",
        "  «Crème» ",
        "l’œuf",
        "PÂTES!",
        "déjà-vu",
        "",
        "---",
        "Ça",
        "naïve",
    ];
    for word in samples {
        let once = normalize(word);
        assert_eq!(normalize(&once), once, "normalize must be idempotent for {:?}", word);
    }
}

#[test]
fn test_normalize_folds_and_trims() {
    assert_eq!(normalize("Élève!"), "eleve");
    assert_eq!(normalize("«Crème»"), "creme");
    assert_eq!(normalize("l’œuf"), "l'oeuf");
    assert_eq!(fold_diacritics("Noël à Château"), "Noel a Chateau");
}

#[test]
fn test_key_normalization() {
    assert_eq!(normalize_for_key("La Gare-du-Nord !"), "la gare du nord");
    assert_eq!(normalize_for_key("  "), "");
}

#[test]
fn test_word_classes() {
    let lex = FrenchLexicon::new();

    // 1. Closed classes
    assert!(lex.is_determiner("les"));
    assert!(lex.is_determiner("du"));
    assert!(!lex.is_determiner("pomme"));
    assert!(lex.is_preposition("avec"));
    assert!(lex.is_conjunction("et"));
    assert!(lex.is_stopword("plus"));

    // 2. Adjectives, including generated and irregular forms
    for adj in ["petite", "petites", "jolies", "orange", "belle", "actives", "legere", "bonne"] {
        assert!(lex.is_likely_adj(adj), "{} should be an adjective", adj);
    }

    // 3. Nouns: whitelist, then open-class fallback
    assert!(lex.is_likely_noun("carottes"));
    assert!(lex.is_likely_noun("brocoli"), "unknown long words default to nouns");
    assert!(!lex.is_likely_noun("petites"), "adjectives are never nouns");
    assert!(!lex.is_likely_noun("des"));
    assert!(!lex.is_likely_noun("42"));
}

#[test]
fn test_shared_lexicon_is_reused() {
    let a = FrenchLexicon::shared();
    let b = FrenchLexicon::shared();
    assert!(std::sync::Arc::ptr_eq(&a, &b), "shared lexicon should be built once");
}

#[test]
fn test_number_words() {
    assert_eq!(parse_number_words("vingt-cinq"), Some(25));
    assert_eq!(parse_number_words("quinze"), Some(15));
    assert_eq!(parse_number_words("vingt et un"), Some(21));
    assert_eq!(parse_number_words("soixante-dix"), Some(70));
    assert_eq!(parse_number_words("quatre-vingts"), Some(80));
    assert_eq!(parse_number_words("quatre vingt dix neuf"), Some(99));
    assert_eq!(parse_number_words("cent"), None);
    assert_eq!(parse_number_words("pomme"), None);
    assert_eq!(parse_number_words(""), None);
}
