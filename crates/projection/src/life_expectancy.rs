//! Life expectancy at birth, used to seed a living person's horizon.

use crate::config::SeaLevelConfig;

/// Expected lifespan (years) for someone born in `birth_year`.
///
/// Constant outside the table, linear between anchors, rounded to the nearest
/// year. An empty table yields 0.
pub fn life_expectancy(config: &SeaLevelConfig, birth_year: i32) -> i32 {
    let anchors = &config.life_expectancy;
    let (Some(first), Some(last)) = (anchors.first(), anchors.last()) else {
        return 0;
    };
    if birth_year <= first.birth_year {
        return first.years;
    }
    if birth_year >= last.birth_year {
        return last.years;
    }

    for pair in anchors.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if birth_year >= a.birth_year && birth_year < b.birth_year {
            let t = f64::from(birth_year - a.birth_year) / f64::from(b.birth_year - a.birth_year);
            return (f64::from(a.years) + f64::from(b.years - a.years) * t).round() as i32;
        }
    }
    last.years
}
