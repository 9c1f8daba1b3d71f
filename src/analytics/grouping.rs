use serde::Serialize;

use super::normalize::RiskView;
use super::stats::{finite, round_to};

const UNKNOWN_DIET: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DietRisk {
    pub diet_type: String,
    pub avg_risk: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitRisk {
    pub group: String,
    pub diabetes: f64,
    pub bp: f64,
    pub heart: f64,
}

#[derive(Debug, Default)]
struct RiskSums {
    count: usize,
    diabetes: f64,
    bp: f64,
    heart: f64,
}

impl RiskSums {
    // Grouped averages coalesce missing (and non-finite) risk to zero.
    fn add(&mut self, view: &RiskView<'_>) {
        self.count += 1;
        self.diabetes += finite(view.diabetes).unwrap_or(0.0);
        self.bp += finite(view.bp).unwrap_or(0.0);
        self.heart += finite(view.heart).unwrap_or(0.0);
    }
}

/// Groups in order of first appearance.
fn group_by<'v, F>(views: &[RiskView<'v>], key: F) -> Vec<(String, RiskSums)>
where
    F: Fn(&RiskView<'v>) -> String,
{
    let mut groups: Vec<(String, RiskSums)> = Vec::new();
    for view in views {
        let k = key(view);
        let idx = match groups.iter().position(|(existing, _)| *existing == k) {
            Some(idx) => idx,
            None => {
                groups.push((k, RiskSums::default()));
                groups.len() - 1
            }
        };
        groups[idx].1.add(view);
    }
    groups
}

/// Mean of all three risk dimensions per diet type.
pub fn risk_by_diet(views: &[RiskView<'_>]) -> Vec<DietRisk> {
    group_by(views, |v| match v.diet_type {
        Some(diet) if !diet.is_empty() => diet.to_string(),
        _ => UNKNOWN_DIET.to_string(),
    })
    .into_iter()
    .map(|(diet_type, sums)| DietRisk {
        diet_type,
        avg_risk: (sums.diabetes + sums.bp + sums.heart) / (3.0 * sums.count as f64),
    })
    .collect()
}

fn is_yes(flag: Option<&str>) -> bool {
    flag.unwrap_or("no").to_lowercase() == "yes"
}

/// `Smoker|Non-Smoker` joined with `Drinker|Non-Drinker`.
pub fn habit_group(smoking: Option<&str>, alcohol: Option<&str>) -> String {
    let smoking = if is_yes(smoking) { "Smoker" } else { "Non-Smoker" };
    let alcohol = if is_yes(alcohol) { "Drinker" } else { "Non-Drinker" };
    format!("{smoking}-{alcohol}")
}

/// Per smoking×alcohol group, the mean of each risk dimension.
pub fn risk_by_smoking_alcohol(views: &[RiskView<'_>]) -> Vec<HabitRisk> {
    group_by(views, |v| habit_group(v.smoking, v.alcohol))
        .into_iter()
        .map(|(group, sums)| {
            let count = sums.count as f64;
            HabitRisk {
                group,
                diabetes: round_to(sums.diabetes / count, 2),
                bp: round_to(sums.bp / count, 2),
                heart: round_to(sums.heart / count, 2),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::RecordKind;

    fn view<'a>(
        diet: Option<&'a str>,
        habits: (Option<&'a str>, Option<&'a str>),
        risks: (Option<f64>, Option<f64>, Option<f64>),
    ) -> RiskView<'a> {
        RiskView {
            kind: RecordKind::Medical,
            created_at: None,
            bmi: None,
            age: None,
            gender: None,
            diet_type: diet,
            smoking: habits.0,
            alcohol: habits.1,
            diabetes: risks.0,
            bp: risks.1,
            heart: risks.2,
        }
    }

    #[test]
    fn keto_average_spans_all_dimensions() {
        let views = vec![
            view(Some("keto"), (None, None), (Some(0.2), Some(0.4), Some(0.6))),
            view(Some("keto"), (None, None), (Some(0.0), Some(0.0), Some(0.0))),
            view(Some("keto"), (None, None), (Some(0.9), Some(0.1), Some(0.1))),
        ];
        let result = risk_by_diet(&views);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].diet_type, "keto");
        // (1.2 + 0.0 + 1.1) / 9
        assert!((result[0].avg_risk - 2.3 / 9.0).abs() < 1e-9);
        assert!((result[0].avg_risk - 0.2556).abs() < 0.001);
    }

    #[test]
    fn missing_diet_lands_in_unknown_and_missing_risk_is_zero() {
        let views = vec![
            view(None, (None, None), (Some(0.9), None, None)),
            view(Some(""), (None, None), (None, None, Some(f64::NAN))),
        ];
        let result = risk_by_diet(&views);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].diet_type, "Unknown");
        assert!((result[0].avg_risk - 0.15).abs() < 1e-12);
    }

    #[test]
    fn diet_groups_keep_first_seen_order() {
        let views = vec![
            view(Some("vegan"), (None, None), (None, None, None)),
            view(Some("keto"), (None, None), (None, None, None)),
            view(Some("vegan"), (None, None), (None, None, None)),
            view(Some("balanced"), (None, None), (None, None, None)),
        ];
        let order: Vec<String> = risk_by_diet(&views).into_iter().map(|d| d.diet_type).collect();
        assert_eq!(order, vec!["vegan", "keto", "balanced"]);
    }

    #[test]
    fn habit_group_ignores_case() {
        assert_eq!(habit_group(Some("YES"), Some("no")), "Smoker-Non-Drinker");
        assert_eq!(habit_group(Some("no"), Some("Yes")), "Non-Smoker-Drinker");
        assert_eq!(habit_group(Some("occasionally"), None), "Non-Smoker-Non-Drinker");
        assert_eq!(habit_group(Some("yes"), Some("yEs")), "Smoker-Drinker");
    }

    #[test]
    fn habit_means_are_per_dimension() {
        let views = vec![
            view(None, (Some("Yes"), Some("no")), (Some(0.5), Some(0.2), None)),
            view(None, (Some("no"), Some("no")), (Some(0.1), Some(0.1), Some(0.1))),
            view(None, (Some("yes"), None), (Some(0.25), Some(0.6), Some(0.3))),
        ];
        let result = risk_by_smoking_alcohol(&views);
        assert_eq!(
            result,
            vec![
                HabitRisk {
                    group: "Smoker-Non-Drinker".into(),
                    diabetes: 0.38,
                    bp: 0.4,
                    heart: 0.15,
                },
                HabitRisk {
                    group: "Non-Smoker-Non-Drinker".into(),
                    diabetes: 0.1,
                    bp: 0.1,
                    heart: 0.1,
                },
            ]
        );
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(risk_by_diet(&[]).is_empty());
        assert!(risk_by_smoking_alcohol(&[]).is_empty());
    }
}
