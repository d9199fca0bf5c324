use std::collections::HashSet;

use super::normalize;

/// Regular adjective stems, masculine singular, already normalized.
const SIMPLE_BASES: &[&str] = &[
    "petit", "grand", "mince", "rapide", "lent", "joli", "mignon", "amer", "sucre", "sale",
    "epice", "piquant", "croquant", "croustillant", "moelleux", "tendre", "mur", "humide",
    "ancien", "neuf", "plein", "vide", "court", "fin", "rond", "carre", "triangulaire",
    "brillant", "mat", "lourd", "leger", "solide", "fragile", "puissant", "faible", "chaud",
    "froid", "tiede", "sombre", "clair", "aigre", "maigre", "savoureux", "delicieux", "exquis",
    "fameux", "simple", "double", "triple", "extra", "ordinaire", "special", "intense", "calme",
    "bruyant", "propre", "poussiereux", "gluant", "collant", "odorant", "parfume", "aromatique",
    "acide", "lisse", "rugueux", "souple", "rigide", "spacieux", "etroit", "pointu", "tranchant",
    "lumineux", "chanceux", "nerveux", "orageux", "pluvieux", "venteux", "nuageux", "agreable",
    "adorable", "utile", "pratique", "classique", "moderne", "rustique", "savant", "creatif",
    "actif", "sportif", "massif", "neigeux", "petillant", "mousseux", "ferme", "juteux",
    "floral", "herbeux", "champetre", "montagneux", "citadin", "urbain", "rural", "boise",
    "anime", "raffine", "sophistique", "precis", "precieux", "rare", "commun", "principal",
    "secondaire", "important", "intelligent", "soigne", "colore", "suave",
    "onctueux", "cru", "cuit", "marine", "grille", "fume", "vaporeux", "rafraichi", "entier",
    "demi",
];

/// Forms that the regular rules get wrong.
const IRREGULAR: &[&[&str]] = &[
    &["beau", "bel", "belle", "beaux", "belles"],
    &["nouveau", "nouvel", "nouvelle", "nouveaux", "nouvelles"],
    &["vieux", "vieil", "vieille", "vieilles"],
    &["fou", "folle", "fous", "folles"],
    &["mou", "molle", "mous", "molles"],
    &["long", "longue", "longs", "longues"],
    &["public", "publique", "publics", "publiques"],
    &["sec", "sèche", "secs", "sèches"],
    &["frais", "fraîche", "fraîches"],
    &["doux", "douce", "douces"],
    &["roux", "rousse", "rousses"],
    &["flou", "floue", "flous", "floues"],
    &["malin", "maligne", "malins", "malignes"],
    &["gentil", "gentille", "gentils", "gentilles"],
    &["favori", "favorite", "favoris", "favorites"],
    &["gros", "grosse", "grosses"],
    &["gras", "grasse", "grasses"],
    &["épais", "épaisse", "épaisses"],
    &["raide", "raides"],
    &["bon", "bonne", "bons", "bonnes"],
    &["mauvais", "mauvaise", "mauvaises"],
    &["bio", "bios"],
    &["râpé", "râpée", "râpés", "râpées"],
    &["heureux", "heureuse", "heureuses"],
    &["complet", "complète", "complets", "complètes"],
    &["discret", "discrète", "discrets", "discrètes"],
];

const COLORS: &[&[&str]] = &[
    &["bleu", "bleue", "bleus", "bleues"],
    &["vert", "verte", "verts", "vertes"],
    &["rouge", "rouges"],
    &["jaune", "jaunes"],
    &["orange", "oranges"],
    &["noir", "noire", "noirs", "noires"],
    &["blanc", "blanche", "blancs", "blanches"],
    &["gris", "grise", "grises"],
    &["rose", "roses"],
    &["violet", "violette", "violets", "violettes"],
    &["marron"],
    &["beige", "beiges"],
    &["turquoise", "turquoises"],
    &["magenta", "magentas"],
    &["cyan", "cyans"],
    &["ocre", "ocres"],
    &["indigo", "indigos"],
    &["argenté", "argentée", "argentés", "argentées"],
    &["doré", "dorée", "dorés", "dorées"],
    &["brun", "brune", "bruns", "brunes"],
    &["auburn"],
    &["olive", "olives"],
];

/// Pure function: feminine singular of a regular stem.
pub fn feminine(base: &str) -> String {
    let stem = |n: usize| &base[..base.len() - n];
    if base.ends_with("ien") {
        format!("{base}ne")
    } else if base.ends_with("el") || base.ends_with("eil") {
        format!("{base}le")
    } else if base.ends_with("er") {
        format!("{}ere", stem(2))
    } else if base.ends_with("et") || base.ends_with("ot") {
        format!("{base}te")
    } else if base.ends_with('f') {
        format!("{}ve", stem(1))
    } else if base.ends_with('x') {
        format!("{}se", stem(1))
    } else if base.ends_with('g') {
        format!("{base}ue")
    } else if base.ends_with('c') {
        format!("{base}he")
    } else if base.ends_with('s') || base.ends_with('e') {
        base.to_string()
    } else {
        format!("{base}e")
    }
}

/// Pure function: masculine plural of a regular stem.
pub fn masculine_plural(base: &str) -> String {
    if base.ends_with("al") {
        format!("{}aux", &base[..base.len() - 2])
    } else if base.ends_with("au") || base.ends_with("eu") {
        format!("{base}x")
    } else if base.ends_with('s') || base.ends_with('x') {
        base.to_string()
    } else {
        format!("{base}s")
    }
}

/// Pure function: feminine plural from the feminine singular.
pub fn feminine_plural(feminine: &str) -> String {
    if feminine.ends_with('s') || feminine.ends_with('x') {
        feminine.to_string()
    } else {
        format!("{feminine}s")
    }
}

/// All four forms of a regular stem.
pub fn inflect(base: &str) -> [String; 4] {
    let fem = feminine(base);
    [
        base.to_string(),
        masculine_plural(base),
        feminine_plural(&fem),
        fem,
    ]
}

/// Builds the normalized adjective set: expanded regular stems plus the
/// irregular and color override lists.
pub fn build_adjective_set() -> HashSet<String> {
    let mut set = HashSet::new();
    for base in SIMPLE_BASES {
        set.extend(inflect(base));
    }
    for forms in IRREGULAR.iter().chain(COLORS) {
        set.extend(forms.iter().map(|f| normalize(f)));
    }
    set.retain(|f| !f.is_empty());
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_rules() {
        assert_eq!(feminine("actif"), "active");
        assert_eq!(feminine("savoureux"), "savoureuse");
        assert_eq!(feminine("leger"), "legere");
        assert_eq!(feminine("ancien"), "ancienne");
        assert_eq!(masculine_plural("principal"), "principaux");
        assert_eq!(masculine_plural("epais"), "epais");
        assert_eq!(feminine_plural("petite"), "petites");
    }
}
