use crate::enrich::discipline::discipline_display;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Cross-discipline medal vocabulary, worst to best.
pub const MERGED_ORDER: [&str; 6] = ["Rien", "Cabri/Fléchette", "Bronze", "Argent", "Vermeil", "Or"];

static MEDAL_SCORES: Lazy<HashMap<&'static str, u8>> = Lazy::new(|| {
    HashMap::from([
        ("rien", 0),
        ("cabri", 1),
        ("fléchette", 1),
        ("flechette", 1),
        ("bronze", 2),
        ("argent", 3),
        ("vermeil", 4),
        ("or", 5),
    ])
});

// French partitive-article elision is fixed domain vocabulary, keyed by
// tier rather than derived from spelling.
static TIER_ELISION: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("or", "d'or"),
        ("argent", "d'argent"),
        ("vermeil", "de vermeil"),
        ("bronze", "de bronze"),
    ])
});

/// Normalizes a raw medal token: absent/blank becomes "Rien", the
/// diacritic-less alternate spelling of "Fléchette" is canonicalized, and
/// anything else passes through trimmed.
pub fn medal_simple(medal: Option<&str>) -> String {
    let Some(raw) = medal else {
        return "Rien".to_string();
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "Rien".to_string();
    }
    if trimmed.to_lowercase() == "flechette" {
        return "Fléchette".to_string();
    }
    trimmed.to_string()
}

/// Tier score, monotonic over {Rien, Cabri/Fléchette, Bronze, Argent,
/// Vermeil, Or}. Unrecognized tokens score 0.
pub fn medal_score(medal: Option<&str>) -> u8 {
    let Some(raw) = medal else { return 0 };
    let key = raw.trim().to_lowercase();
    MEDAL_SCORES.get(key.as_str()).copied().unwrap_or(0)
}

/// Discipline-qualified display label. Low tiers keep their own name
/// regardless of discipline; mid and high tiers compound the discipline
/// root with the elided tier ("Chamois d'or", "Flèche de bronze").
pub fn medal_label_discipline(discipline: Option<&str>, medal: Option<&str>) -> String {
    if medal.is_none() {
        return "Rien".to_string();
    }

    let simple = medal_simple(medal);
    let key = simple.to_lowercase();

    match key.as_str() {
        "rien" => return "Rien".to_string(),
        "cabri" => return "Cabri".to_string(),
        "fléchette" => return "Fléchette".to_string(),
        _ => {}
    }

    let root = discipline_display(discipline);
    match TIER_ELISION.get(key.as_str()) {
        Some(elided) => format!("{root} {elided}"),
        None => format!("{root} de {key}"),
    }
}

/// Collapses the low tier to a single "Cabri/Fléchette" bucket so medals
/// compare across disciplines; always one of the six `MERGED_ORDER` values.
pub fn medal_label_merged(medal: Option<&str>) -> String {
    let key = medal_simple(medal).to_lowercase();
    match key.as_str() {
        "cabri" | "fléchette" => "Cabri/Fléchette",
        "bronze" => "Bronze",
        "argent" => "Argent",
        "vermeil" => "Vermeil",
        "or" => "Or",
        _ => "Rien",
    }
    .to_string()
}

/// Display order of the six per-discipline labels, worst to best, for a
/// medal axis of the given discipline.
pub fn ordered_medal_labels(discipline: Option<&str>) -> [String; 6] {
    let low = if crate::enrich::discipline::is_chamois(discipline) {
        "Cabri"
    } else {
        "Fléchette"
    };
    let root = discipline_display(discipline);
    [
        "Rien".to_string(),
        low.to_string(),
        format!("{root} de bronze"),
        format!("{root} d'argent"),
        format!("{root} de vermeil"),
        format!("{root} d'or"),
    ]
}
