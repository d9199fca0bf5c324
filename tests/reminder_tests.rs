use std::sync::Arc;

use chrono::TimeZone;
use chrono_tz::Europe::Paris;
use voxnote::reminder::{
    FavoriteCatalog, FavoriteResolver, PlaceParser, PlaceQuery, ReminderClassification,
    ReminderClassifier, ReminderIntent, ReminderIntentParser, TimeParser,
};

fn now() -> i64 {
    Paris
        .with_ymd_and_hms(2023, 10, 18, 10, 0, 0)
        .single()
        .unwrap()
        .timestamp_millis()
}

#[test]
fn test_time_wins_over_place() {
    let parser = ReminderIntentParser::default();
    let intent = parser
        .parse("rappelle-moi dans 10 minutes de sortir le chien quand j'arrive ici", now())
        .expect("should parse");
    match intent {
        ReminderIntent::Time(t) => assert_eq!(t.trigger_at_epoch_millis, now() + 10 * 60_000),
        other => panic!("Expected a time reminder, got {:?}", other),
    }
}

#[test]
fn test_place_when_no_time() {
    let parser = ReminderIntentParser::default();
    let intent = parser
        .parse("rappelle-moi d'acheter du pain quand j'arrive ici", now())
        .expect("should parse");
    assert_eq!(intent.label(), "acheter du pain");
    match intent {
        ReminderIntent::Place(p) => assert_eq!(p.query, PlaceQuery::CurrentLocation),
        other => panic!("Expected a place reminder, got {:?}", other),
    }
}

#[test]
fn test_neither_time_nor_place() {
    let parser = ReminderIntentParser::default();
    assert!(parser.parse("rappelle-moi d'appeler Paul", now()).is_none());
}

#[test]
fn test_favorites_loaded_from_json() {
    let json = r#"[
        {"id": 3, "key": "gym", "lat": 48.1, "lon": 2.1,
         "default_radius_meters": 80, "default_cooldown_minutes": 120,
         "default_every_time": false,
         "display_name": "Salle de sport", "aliases": ["la salle"]}
    ]"#;
    let catalog: FavoriteCatalog = serde_json::from_str(json).expect("valid catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.resolve("salle de sport").map(|f| f.id), Some(3));
    assert_eq!(catalog.resolve("La Salle").map(|f| f.id), Some(3), "aliases match after normalization");
    assert!(catalog.resolve("piscine").is_none());

    let parser = ReminderIntentParser::with_favorites(Arc::new(catalog));
    let intent = parser
        .parse("rappelle-moi de m'étirer quand je pars de la salle de sport", now())
        .expect("should parse");
    match intent {
        ReminderIntent::Place(p) => {
            assert!(matches!(p.query, PlaceQuery::Favorite { id: 3, .. }), "{:?}", p.query);
            assert_eq!(p.radius_meters, 80);
            assert_eq!(p.cooldown_minutes, 120);
        }
        other => panic!("Expected a place reminder, got {:?}", other),
    }
}

#[test]
fn test_classifier_outcomes() {
    let classifier = ReminderClassifier::new();
    let cases = [
        ("rappelle-moi d'appeler maman demain", ReminderClassification::Reminder),
        ("fais-moi penser à sortir la poubelle quand j'arrive à la maison", ReminderClassification::Reminder),
        ("rappelle-moi demain", ReminderClassification::Incomplete),
        ("n'oublie pas de fermer la porte", ReminderClassification::Incomplete),
        ("je me rappelle de ce jour", ReminderClassification::NotReminder),
        ("ajoute du lait", ReminderClassification::NotReminder),
    ];
    for (text, expected) in cases {
        assert_eq!(classifier.classify(text), expected, "classification of {:?}", text);
    }
}

#[test]
fn test_matched_triggers() {
    let classifier = ReminderClassifier::new();
    assert_eq!(classifier.matched_triggers("Alerte-moi dans 5 minutes"), vec!["alerte moi"]);
    assert!(classifier.matched_triggers("").is_empty());
}

#[test]
fn test_combinator_exposes_its_parsers() {
    let parser = ReminderIntentParser::new(TimeParser::new(chrono_tz::UTC), PlaceParser::default());
    assert_eq!(parser.time_parser().time_zone(), chrono_tz::UTC);

    let text = "rappelle-moi d'acheter du pain quand j'arrive ici";
    assert!(parser.time_parser().parse(text, now()).is_none());
    let place = parser.place_parser().parse(text).expect("place part should parse");
    assert_eq!(
        parser.parse(text, now()),
        Some(ReminderIntent::Place(place)),
        "the combinator falls back to its place parser"
    );
}
