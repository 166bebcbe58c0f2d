//! Static knowledge about the sites the listing reports: which names
//! belong to the tracked GG network, and the canonical spelling of
//! names the source renders inconsistently.

// Identifiers the listing has used for rooms on the GG network.
const GG_IDENTIFIERS: &[&str] = &["GGNetwork", "GGPoker ON", "GG Poker", "GGPoker", "GG"];

/// Case-insensitive substring match against the known GG identifiers.
pub fn is_gg_site(name: &str) -> bool {
    let name = name.to_lowercase();
    GG_IDENTIFIERS
        .iter()
        .any(|id| name.contains(&id.to_lowercase()))
}

/// Maps the raw scraped spelling to the canonical site name. Unknown
/// names pass through trimmed but otherwise untouched.
pub fn canonical_name(raw: &str) -> String {
    let canonical = match raw.trim().to_lowercase().as_str() {
        "ggnetwork" | "gg network" | "ggpoker" | "gg poker" => "GGNetwork",
        "ggpoker on" => "GGPoker ON",
        "pokerstars" => "PokerStars",
        "pokerstars ontario" => "PokerStars Ontario",
        "wpt global" => "WPT Global",
        "888poker" => "888poker",
        "partypoker" => "partypoker",
        "chico poker" => "Chico Poker",
        "ipoker" => "iPoker",
        "winamax" => "Winamax",
        _ => return raw.trim().to_string(),
    };
    canonical.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gg_match_is_case_insensitive_substring() {
        assert!(is_gg_site("GGNetwork"));
        assert!(is_gg_site("ggpoker on"));
        assert!(is_gg_site("Natural8 GG"));
        assert!(!is_gg_site("PokerStars"));
        assert!(!is_gg_site("Winamax"));
    }

    #[test]
    fn known_spellings_are_canonicalized() {
        assert_eq!(canonical_name("ggpoker"), "GGNetwork");
        assert_eq!(canonical_name("GG Network"), "GGNetwork");
        assert_eq!(canonical_name("  pokerstars "), "PokerStars");
        assert_eq!(canonical_name("WPT GLOBAL"), "WPT Global");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(canonical_name(" Unibet "), "Unibet");
    }
}
