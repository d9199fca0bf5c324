use std::sync::Arc;

use voxnote::lexicon::Classification;
use voxnote::list::ListSplitter;

#[test]
fn test_commas_and_et() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("carottes, pommes et tomates");
    assert_eq!(items, vec!["carottes", "pommes", "tomates"]);
}

#[test]
fn test_adjectives_do_not_split() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("des jolies petites carottes orange");
    assert_eq!(items.len(), 1, "Adjective run must stay a single item: {:?}", items);
    assert_eq!(items[0], "des jolies petites carottes orange");
}

#[test]
fn test_et_splits_only_between_nouns() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("sel et poivre");
    assert_eq!(items, vec!["sel", "poivre"], "two nouns split");

    let items = splitter.split_normalized("petit et rond");
    assert_eq!(items, vec!["petit et rond"], "no noun, no split");
}

#[test]
fn test_determiner_led_parts_split() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("du lait et du pain");
    assert_eq!(items, vec!["du lait", "du pain"]);
}

#[test]
fn test_repeated_articles_split() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("du beurre de la farine des oeufs");
    assert_eq!(items, vec!["du beurre", "de la farine", "des oeufs"]);
}

#[test]
fn test_numeric_quantifiers_split() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("3 tomates 4 concombres 2 poireaux");
    assert_eq!(items, vec!["3 tomates", "4 concombres", "2 poireaux"]);
}

#[test]
fn test_destination_is_stripped() {
    let splitter = ListSplitter::default();
    let items = splitter.split_normalized("du lait dans la liste de courses");
    assert_eq!(items, vec!["du lait"]);

    let items = splitter.split_normalized("sur ma liste");
    assert!(items.is_empty(), "Destination alone yields nothing: {:?}", items);
}

#[test]
fn test_raw_flow_keeps_case() {
    let splitter = ListSplitter::default();
    let items = splitter.split_raw("Lait, Œufs");
    assert_eq!(items, vec!["Lait", "Œufs"]);
}

#[test]
fn test_all_candidates_normalizes() {
    let splitter = ListSplitter::default();
    let items = splitter.split_all_candidates("  Pâtes, Crème fraîche ");
    assert_eq!(items, vec!["pates", "creme fraiche"]);
    assert!(splitter.split_all_candidates("   ").is_empty());
}

/// Treats every word as a noun.
struct EverythingIsANoun;

impl Classification for EverythingIsANoun {
    fn is_determiner(&self, _normalized: &str) -> bool {
        false
    }
    fn is_likely_adj(&self, _normalized: &str) -> bool {
        false
    }
    fn is_likely_noun(&self, _normalized: &str) -> bool {
        true
    }
}

#[test]
fn test_custom_classification_is_used() {
    let splitter = ListSplitter::new(Arc::new(EverythingIsANoun));
    let items = splitter.split_normalized("petit et rond");
    assert_eq!(items, vec!["petit", "rond"], "Injected classifier should drive the et rule");
}
