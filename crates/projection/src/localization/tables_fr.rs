use super::StringTable;

pub(super) fn build_french_table() -> StringTable {
    let entries: &[(&str, &str)] = &[
        ("app.title", "La mer monte"),
        ("app.subtitle", "Niveau moyen des océans, par rapport à 1900"),
        ("ui.language", "Langue"),
        ("ui.add_person", "Ajouter une personne"),
        ("ui.reset", "Réinitialiser"),
        ("ui.share", "Partager"),
        ("scenario.SSP1-2.6", "Optimiste (+1.5°C)"),
        ("scenario.SSP2-4.5", "Intermédiaire (+2-3°C)"),
        ("scenario.SSP5-8.5", "Pessimiste (+4-5°C)"),
        ("generation.arriere", "Arrière-grands-parents"),
        ("generation.grands", "Grands-parents"),
        ("generation.parents", "Parents / Oncles / Tantes"),
        ("generation.me", "Moi"),
        ("generation.siblings", "Frères / Sœurs / Cousins"),
        ("generation.partner", "Conjoint·e / Ex"),
        ("generation.friends", "Amis / Connaissances"),
        ("generation.children", "Enfants / Neveux / Nièces"),
        ("generation.grands2", "Petits-enfants / Filleuls"),
        ("report.years", "ans"),
        ("report.deceased", "décédé·e"),
        ("report.not_yet_born", "pas encore né·e"),
        ("report.lived", "Déjà vécu"),
        ("report.lived_deceased", "Hausse vécue"),
        ("report.to_come", "Encore à venir"),
        ("report.over_lifetime", "sur la vie"),
        ("report.since_death", "supplémentaires depuis"),
        ("stakes.title", "Ce que ces chiffres impliquent"),
        ("stakes.over_lifetime", "Sur toute la vie"),
        ("stakes.difference", "de différence sur la vie entière"),
        (
            "stakes.none",
            "La différence entre SSP2-4.5 et SSP5-8.5 représente 20 à 30 cm de hausse supplémentaire d'ici 2100.",
        ),
        ("message.last_person", "Impossible de supprimer la dernière personne"),
        ("message.unknown_person", "Aucune personne avec cet identifiant"),
        ("message.invalid_share", "Code de partage invalide"),
        ("message.saved", "Sauvegardé"),
        ("message.loaded", "Chargé"),
    ];

    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
