use chrono::TimeZone;
use chrono_tz::Europe::Paris;
use voxnote::reminder::TimeParser;

const MINUTE: i64 = 60_000;

fn paris(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
    Paris
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("unambiguous local time")
        .timestamp_millis()
}

/// Wednesday 18 October 2023, 10:00 in Paris.
fn now() -> i64 {
    paris(2023, 10, 18, 10, 0)
}

#[test]
fn test_relative_minutes() {
    let parser = TimeParser::default();
    let r = parser
        .parse("Rappelle-moi dans 15 minutes d'envoyer le mail", now())
        .expect("relative time should parse");
    assert_eq!(r.trigger_at_epoch_millis, now() + 15 * MINUTE);
    assert_eq!(r.label, "envoyer le mail");
}

#[test]
fn test_number_words_match_digits() {
    let parser = TimeParser::default();
    let words = parser
        .parse("rappelle-moi dans vingt-cinq minutes d'envoyer le mail", now())
        .expect("number words should parse");
    let digits = parser
        .parse("rappelle-moi dans 25 minutes d'envoyer le mail", now())
        .expect("digits should parse");
    assert_eq!(words, digits, "vingt-cinq must behave like 25");
    assert_eq!(words.trigger_at_epoch_millis, now() + 25 * MINUTE);
}

#[test]
fn test_idioms() {
    let parser = TimeParser::default();
    let cases = [
        ("rappelle-moi dans un quart d'heure de sortir", 15),
        ("rappelle-moi dans une demi-heure de sortir", 30),
        ("rappelle-moi dans trois quarts d’heure de sortir", 45),
        ("rappelle-moi dans 2 heures et demie de sortir", 150),
    ];
    for (text, minutes) in cases {
        let r = parser.parse(text, now()).unwrap_or_else(|| panic!("{} should parse", text));
        assert_eq!(r.trigger_at_epoch_millis, now() + minutes * MINUTE, "offset for {:?}", text);
        assert_eq!(r.label, "sortir", "label for {:?}", text);
    }
}

#[test]
fn test_tomorrow_at_hour() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi demain à 9h d'appeler le dentiste", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 19, 9, 0));
    assert_eq!(r.label, "appeler le dentiste");
}

#[test]
fn test_past_clock_time_rolls_to_tomorrow() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi à 8h30 de prendre mes médicaments", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 19, 8, 30), "8h30 is already past at 10:00");
    assert_eq!(r.label, "prendre mes médicaments");

    let r = parser.parse("rappelle-moi à midi de manger", now()).unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 18, 12, 0), "noon is still ahead today");
    assert_eq!(r.label, "manger");
}

#[test]
fn test_weekday_is_next_occurrence() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi lundi à 7h d'appeler le garage", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 23, 7, 0));
    assert_eq!(r.label, "appeler le garage");

    // same weekday means next week
    let r = parser.parse("rappelle-moi mercredi à 18h de courir", now()).unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 25, 18, 0));
}

#[test]
fn test_day_of_month_defaults_to_nine() {
    let parser = TimeParser::default();
    let r = parser.parse("rappelle-moi le 21/10 de payer le loyer", now()).unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 21, 9, 0));
    assert_eq!(r.label, "payer le loyer");

    let r = parser
        .parse("rappelle-moi le 3 janvier à 14h30 de renouveler le passeport", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2024, 1, 3, 14, 30), "past month moves to next year");
}

#[test]
fn test_named_moment() {
    let parser = TimeParser::default();
    let r = parser.parse("rappelle-moi ce soir de fermer les volets", now()).unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 18, 19, 0));
    assert_eq!(r.label, "fermer les volets");
}

#[test]
fn test_relative_days_with_time() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi dans 3 jours à 18h de rendre les livres", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 21, 18, 0));
    assert_eq!(r.label, "rendre les livres");
}

#[test]
fn test_earliest_candidate_wins() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi demain à 9h ou dans 5 minutes de partir", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, now() + 5 * MINUTE);
}

#[test]
fn test_nonexistent_local_time_moves_forward() {
    let parser = TimeParser::default();
    // clocks jump from 02:00 to 03:00 on 31 March 2024
    let saturday = paris(2024, 3, 30, 12, 0);
    let r = parser
        .parse("rappelle-moi demain à 2h30 de vérifier la chaudière", saturday)
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2024, 3, 31, 3, 30));
}

#[test]
fn test_time_zone_is_injected() {
    let parser = TimeParser::new(chrono_tz::UTC);
    let r = parser.parse("rappelle-moi demain à 9h de courir", now()).unwrap();
    let expected = chrono::Utc
        .with_ymd_and_hms(2023, 10, 19, 9, 0, 0)
        .single()
        .unwrap()
        .timestamp_millis();
    assert_eq!(r.trigger_at_epoch_millis, expected);
}

#[test]
fn test_no_time_or_no_label() {
    let parser = TimeParser::default();
    assert!(parser.parse("rappelle-moi d'acheter du pain", now()).is_none());
    assert!(parser.parse("rappelle-moi dans 10 minutes", now()).is_none(), "label is required");
    assert!(parser.parse("", now()).is_none());
}

#[test]
fn test_relative_hours_with_minutes() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi dans 2h30 de sortir le gâteau", now())
        .expect("compact relative time should parse");
    assert_eq!(r.trigger_at_epoch_millis, now() + 150 * MINUTE, "2h30 is an offset, not a clock time");
    assert_eq!(r.label, "sortir le gâteau");

    let r = parser.parse("rappelle-moi dans 1h15 de rappeler Léa", now()).unwrap();
    assert_eq!(r.trigger_at_epoch_millis, now() + 75 * MINUTE);
    assert_eq!(r.label, "rappeler Léa");
}

#[test]
fn test_afternoon_is_not_noon() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi demain après-midi d'appeler Paul", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 19, 15, 0));
    assert_eq!(r.label, "appeler Paul");
}

#[test]
fn test_clock_time_overrides_moment() {
    let parser = TimeParser::default();
    let r = parser
        .parse("rappelle-moi ce soir de sortir les poubelles à 21h", now())
        .unwrap();
    assert_eq!(r.trigger_at_epoch_millis, paris(2023, 10, 18, 21, 0), "21h wins over the evening default");
    assert_eq!(r.label, "sortir les poubelles");
}

#[test]
fn test_parser_reports_its_time_zone() {
    assert_eq!(TimeParser::default().time_zone(), Paris);
    assert_eq!(TimeParser::new(chrono_tz::UTC).time_zone(), chrono_tz::UTC);
}
