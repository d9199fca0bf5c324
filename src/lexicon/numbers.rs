//! French number words from zero to ninety-nine.

/// Regex fragment matching a spoken French number between 0 and 99.
///
/// Longer alternatives come first so `vingt-cinq` is not cut at `vingt`.
pub const NUMBER_WORD_PATTERN: &str = concat!(
    r"(?:(?:quatre[- ]vingts?|soixante|cinquante|quarante|trente|vingt)",
    r"(?:(?:[- ]et[- ]|[- ])(?:dix[- ]sept|dix[- ]huit|dix[- ]neuf|onze|douze|treize|quatorze|quinze|seize|dix|une?|deux|trois|quatre|cinq|six|sept|huit|neuf))?",
    r"|dix[- ]sept|dix[- ]huit|dix[- ]neuf|onze|douze|treize|quatorze|quinze|seize|dix",
    r"|une?|deux|trois|quatre|cinq|six|sept|huit|neuf|z[ée]ro)"
);

fn word_value(word: &str) -> Option<u32> {
    let value = match word {
        "zero" | "zéro" => 0,
        "un" | "une" => 1,
        "deux" => 2,
        "trois" => 3,
        "quatre" => 4,
        "cinq" => 5,
        "six" => 6,
        "sept" => 7,
        "huit" => 8,
        "neuf" => 9,
        "dix" => 10,
        "onze" => 11,
        "douze" => 12,
        "treize" => 13,
        "quatorze" => 14,
        "quinze" => 15,
        "seize" => 16,
        "vingt" | "vingts" => 20,
        "trente" => 30,
        "quarante" => 40,
        "cinquante" => 50,
        "soixante" => 60,
        _ => return None,
    };
    Some(value)
}

/// Pure function: value of a spoken number such as `vingt-cinq`,
/// `soixante et onze` or `quatre-vingt-dix-sept`.
///
/// Returns `None` when any token is not a number word or the total is
/// above 99.
pub fn parse_number_words(text: &str) -> Option<u32> {
    let lowered = text.trim().to_lowercase();
    let tokens: Vec<&str> = lowered
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|t| !t.is_empty() && *t != "et")
        .collect();
    if tokens.is_empty() {
        return None;
    }

    let mut total = 0;
    let mut i = 0;
    while i < tokens.len() {
        // "quatre vingt(s)" is a single tens word
        if tokens[i] == "quatre" && matches!(tokens.get(i + 1), Some(&"vingt" | &"vingts")) {
            total += 80;
            i += 2;
            continue;
        }
        total += word_value(tokens[i])?;
        i += 1;
    }
    (total <= 99).then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compounds() {
        assert_eq!(parse_number_words("vingt-cinq"), Some(25));
        assert_eq!(parse_number_words("soixante et onze"), Some(71));
        assert_eq!(parse_number_words("quatre-vingt-dix-neuf"), Some(99));
        assert_eq!(parse_number_words("quatre"), Some(4));
        assert_eq!(parse_number_words("beaucoup"), None);
    }
}
