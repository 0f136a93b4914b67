use super::StringTable;

pub(super) fn build_english_table() -> StringTable {
    let entries: &[(&str, &str)] = &[
        // General
        ("app.title", "Sea level rise over a lifetime"),
        ("app.subtitle", "Global mean sea level, relative to 1900"),
        ("ui.language", "Language"),
        ("ui.add_person", "Add a person"),
        ("ui.reset", "Reset"),
        ("ui.share", "Share"),
        // Scenarios
        ("scenario.SSP1-2.6", "Optimistic (+1.5°C)"),
        ("scenario.SSP2-4.5", "Intermediate (+2-3°C)"),
        ("scenario.SSP5-8.5", "High-end (+4-5°C)"),
        // Generations
        ("generation.arriere", "Great-grandparents"),
        ("generation.grands", "Grandparents"),
        ("generation.parents", "Parents / Uncles / Aunts"),
        ("generation.me", "Me"),
        ("generation.siblings", "Siblings / Cousins"),
        ("generation.partner", "Partner / Ex-partner"),
        ("generation.friends", "Friends / Acquaintances"),
        ("generation.children", "Children / Nephews / Nieces"),
        ("generation.grands2", "Grandchildren / Godchildren"),
        // Person report
        ("report.years", "years"),
        ("report.deceased", "deceased"),
        ("report.not_yet_born", "not yet born"),
        ("report.lived", "Already lived"),
        ("report.lived_deceased", "Rise lived"),
        ("report.to_come", "Still to come"),
        ("report.over_lifetime", "over lifetime"),
        ("report.since_death", "additional rise since"),
        // Scenario stakes
        ("stakes.title", "What these numbers mean in practice"),
        ("stakes.over_lifetime", "Over a lifetime"),
        ("stakes.difference", "difference over a whole lifetime"),
        (
            "stakes.none",
            "The gap between SSP2-4.5 and SSP5-8.5 is 20 to 30 cm of extra rise by 2100.",
        ),
        // Messages
        ("message.last_person", "The last person cannot be removed"),
        ("message.unknown_person", "No person with that id"),
        ("message.invalid_share", "Invalid share code"),
        ("message.saved", "Saved"),
        ("message.loaded", "Loaded"),
    ];

    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
