/// Ordinal for disciplines outside the two known families.
pub const DISCIPLINE_UNKNOWN: u8 = 99;

/// Assigns a discipline string its ordinal category: 0 for the Flèche
/// family, 1 for the Chamois family, 99 for anything else. The Chamois
/// check wins when a label contains both tokens, keeping the ordinal
/// consistent with `is_fleche`/`is_chamois`.
pub fn discipline_order(discipline: Option<&str>) -> u8 {
    let Some(d) = discipline else {
        return DISCIPLINE_UNKNOWN;
    };
    let dl = d.trim().to_lowercase();
    if dl.is_empty() {
        return DISCIPLINE_UNKNOWN;
    }
    if dl.contains("chamois") {
        return 1;
    }
    if dl.contains("fl") {
        return 0;
    }
    DISCIPLINE_UNKNOWN
}

pub fn is_chamois(discipline: Option<&str>) -> bool {
    discipline
        .map(|d| d.trim().to_lowercase().contains("chamois"))
        .unwrap_or(false)
}

pub fn is_fleche(discipline: Option<&str>) -> bool {
    let Some(d) = discipline else { return false };
    let dl = d.trim().to_lowercase();
    dl.contains("fl") && !dl.contains("chamois")
}

/// Display root for medal labels and report headings.
pub fn discipline_display(discipline: Option<&str>) -> &'static str {
    if is_chamois(discipline) {
        "Chamois"
    } else {
        "Flèche"
    }
}
