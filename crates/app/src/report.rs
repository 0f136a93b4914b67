//! Plain-text household report printed by the binary.

use projection::chart_data::chart_series;
use projection::scenario_gap::{scenario_stakes, ScenarioGap};
use projection::{
    Household, HouseholdStats, LocalizationState, Person, PersonStats, ScenarioId, SeaLevelConfig,
};

const INDENT: &str = "    ";

fn person_header(config: &SeaLevelConfig, locale: &LocalizationState, person: &Person) -> String {
    let name = locale.display_name(person);
    let generation = locale.generation_label(person.generation());
    let span = if person.deceased() {
        locale.t("report.deceased").to_string()
    } else if person.is_future_birth(config) {
        locale.t("report.not_yet_born").to_string()
    } else {
        format!(
            "{} {}",
            person.end_year().saturating_sub(person.birth_year()),
            locale.t("report.years")
        )
    };
    if name == generation {
        format!(
            "{} · {} – {} · {}",
            name,
            person.birth_year(),
            person.end_year(),
            span
        )
    } else {
        format!(
            "{} ({}) · {} – {} · {}",
            name,
            generation,
            person.birth_year(),
            person.end_year(),
            span
        )
    }
}

fn person_lines(
    config: &SeaLevelConfig,
    locale: &LocalizationState,
    person: &Person,
    stats: &PersonStats,
) -> Vec<String> {
    let mut lines = vec![person_header(config, locale, person)];

    if stats.is_deceased {
        lines.push(format!(
            "{INDENT}{}: {}",
            locale.t("report.lived_deceased"),
            locale.format_sub(stats.lived_mm)
        ));
        lines.push(format!(
            "{INDENT}{} {}: {}",
            locale.t("report.since_death"),
            person.end_year(),
            locale.format_sub(stats.rise_since_death_mm)
        ));
        return lines;
    }

    lines.push(format!(
        "{INDENT}{}: {}",
        locale.t("report.lived"),
        locale.format_sub(stats.lived_mm)
    ));
    for (id, exposure) in stats.per_scenario.iter() {
        lines.push(format!(
            "{INDENT}{}: {} {}, {} {}",
            locale.scenario_label(id),
            locale.t("report.to_come").to_lowercase(),
            locale.format_sub(exposure.to_come_mm),
            locale.t("report.over_lifetime"),
            locale.format_sub(exposure.total_mm)
        ));
    }
    lines
}

/// One block per person, in household order.
pub fn render_household(
    config: &SeaLevelConfig,
    household: &Household,
    stats: &HouseholdStats,
    locale: &LocalizationState,
) -> String {
    let mut lines = vec![
        locale.t("app.title").to_string(),
        locale.t("app.subtitle").to_string(),
        String::new(),
    ];
    for person in household.persons() {
        let person_stats = stats
            .get(person.id())
            .cloned()
            .unwrap_or_else(|| person.stats(config));
        lines.extend(person_lines(config, locale, person, &person_stats));
    }
    lines.join("\n")
}

fn stakes_line(household: &Household, locale: &LocalizationState, gap: &ScenarioGap) -> String {
    let name = household
        .get(gap.person)
        .map(|p| locale.display_name(p))
        .unwrap_or_default();
    format!(
        "{INDENT}{}: {} {} / {} {}, {} {}",
        name,
        ScenarioId::Ssp245.key(),
        locale.format_cm(gap.intermediate_total_mm),
        ScenarioId::Ssp585.key(),
        locale.format_cm(gap.high_end_total_mm),
        locale.t("stakes.difference"),
        locale.format_cm(gap.gap_mm)
    )
}

/// The intermediate vs high-end comparison for the focus and youngest person.
pub fn render_stakes(
    config: &SeaLevelConfig,
    household: &Household,
    locale: &LocalizationState,
) -> String {
    let stakes = scenario_stakes(config, household);
    let mut lines = vec![locale.t("stakes.title").to_string()];
    if stakes.is_empty() {
        lines.push(format!("{INDENT}{}", locale.t("stakes.none")));
    }
    for gap in [stakes.focus, stakes.youngest].iter().flatten() {
        lines.push(stakes_line(household, locale, gap));
    }
    lines.join("\n")
}

/// Chart samples as a table of whole millimeters; `-` where a series is not drawn.
pub fn render_chart(config: &SeaLevelConfig, household: &Household) -> String {
    let birth_years: Vec<i32> = household.persons().iter().map(|p| p.birth_year()).collect();
    let cell = |value: Option<i64>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    let mut header = format!("{:>6} {:>10}", "year", "historical");
    for id in ScenarioId::ALL {
        header.push_str(&format!(" {:>10}", id.key()));
    }
    let mut lines = vec![header];
    for point in chart_series(config, &birth_years) {
        let mut line = format!("{:>6} {:>10}", point.year, cell(point.historical));
        for id in ScenarioId::ALL {
            line.push_str(&format!(" {:>10}", cell(point.median[id])));
        }
        lines.push(line);
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use projection::{Generation, PersonId};

    fn seeded() -> (SeaLevelConfig, Household, HouseholdStats) {
        let config = SeaLevelConfig::default();
        let household = Household::seeded(&config);
        let stats = HouseholdStats::compute(&config, &household);
        (config, household, stats)
    }

    #[test]
    fn test_english_report_lists_every_person() {
        let (config, household, stats) = seeded();
        let report = render_household(&config, &household, &stats, &LocalizationState::default());
        assert!(report.starts_with("Sea level rise over a lifetime"));
        assert!(report.contains("Me · 1985 – 2069 · 84 years"), "{report}");
        assert!(report.contains("Parents / Uncles / Aunts · 1955 – 2031"), "{report}");
        assert!(report.contains("Already lived: 11.9 cm"), "{report}");
        assert_eq!(report.matches("High-end (+4-5°C)").count(), 4);
    }

    #[test]
    fn test_french_report_uses_comma_decimals() {
        let (config, household, stats) = seeded();
        let mut locale = LocalizationState::default();
        assert!(locale.set_locale("fr"));
        let report = render_household(&config, &household, &stats, &locale);
        assert!(report.contains("11,9 cm"), "{report}");
        assert!(!report.contains("11.9 cm"), "{report}");
    }

    #[test]
    fn test_deceased_person_block() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        let id = household.add("Jeanne", 1920, Generation::GreatGrandparents, true, &config);
        let stats = HouseholdStats::compute(&config, &household);
        let report = render_household(&config, &household, &stats, &LocalizationState::default());

        let person = household.get(id).unwrap();
        assert!(report.contains(&format!(
            "Jeanne (Great-grandparents) · 1920 – {} · deceased",
            person.end_year()
        )));
        assert!(report.contains("Rise lived:"));
        assert!(report.contains(&format!("additional rise since {}:", person.end_year())));
    }

    #[test]
    fn test_future_birth_is_marked() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        household.add("Baby", 2030, Generation::Children, false, &config);
        // Empty precomputed stats fall back to computing them per person.
        let report = render_household(
            &config,
            &household,
            &HouseholdStats::default(),
            &LocalizationState::default(),
        );
        assert!(report.contains("Baby (Children / Nephews / Nieces) · 2030 – "), "{report}");
        assert!(report.contains("· not yet born"), "{report}");
        assert_eq!(report.matches("Already lived").count(), 5);
    }

    #[test]
    fn test_stakes_for_seeded_household() {
        let (config, household, _) = seeded();
        let stakes = render_stakes(&config, &household, &LocalizationState::default());
        assert!(stakes.starts_with("What these numbers mean in practice"));
        assert!(stakes.contains("    Me: SSP2-4.5 "), "{stakes}");
        assert_eq!(stakes.matches("difference over a whole lifetime").count(), 2);
    }

    #[test]
    fn test_stakes_fallback_when_everyone_is_deceased() {
        let config = SeaLevelConfig::default();
        let mut household = Household::seeded(&config);
        household.add("Old", 1900, Generation::GreatGrandparents, true, &config);
        for id in [1, 2, 3, 4] {
            household.remove(PersonId(id)).unwrap();
        }
        let stakes = render_stakes(&config, &household, &LocalizationState::default());
        assert!(stakes.contains("20 to 30 cm"), "{stakes}");
    }

    #[test]
    fn test_chart_table_marks_reference_year() {
        let (config, household, _) = seeded();
        let chart = render_chart(&config, &household);
        let header = chart.lines().next().unwrap();
        assert!(header.contains("SSP5-8.5"));

        let row_1985 = chart.lines().find(|l| l.trim_start().starts_with("1985")).unwrap();
        assert!(row_1985.ends_with('-'), "{row_1985}");

        let row_2100 = chart.lines().find(|l| l.trim_start().starts_with("2100")).unwrap();
        assert!(row_2100.split_whitespace().nth(1) == Some("-"), "{row_2100}");
    }
}
