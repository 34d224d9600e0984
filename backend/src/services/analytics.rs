//! Nutrition and workout analytics
//!
//! Repositories return grouped rows. The functions in this module pick the
//! winners, average and round them, so every tie-break is deterministic:
//!
//! - meal types tie in enum order (breakfast, lunch, dinner, snack)
//! - weekdays tie toward the earlier day, Monday first
//! - top foods and exercises tie by name, ascending
//!
//! Empty windows fall back to zeros, `"breakfast"` and `"Monday"`.

use crate::error::ApiError;
use crate::repositories::analytics::{DailyTotalsRow, NameCountRow, WeekdayCountRow};
use crate::repositories::AnalyticsRepository;
use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use fittrack_shared::models::WEEKDAY_NAMES;
use fittrack_shared::types::{
    DailyNutritionPoint, ExerciseCount, FoodCount, NutritionStatsResponse, OverviewNutritionStats,
    OverviewProgressStats, OverviewResponse, OverviewWorkoutStats, RecentActivity,
    WorkoutStatsResponse,
};
use fittrack_shared::{round_calories, round_to_tenth, weekday_name, MealType};
use sqlx::PgPool;
use uuid::Uuid;

/// Window used when the caller does not pass `days`
pub const DEFAULT_WINDOW_DAYS: i64 = 30;
/// Largest accepted window
pub const MAX_WINDOW_DAYS: i64 = 365;
/// Length of the weekly sub-window and the nutrition trend
pub const WEEK_DAYS: i64 = 7;
/// Length of the monthly sub-window and the weight change lookback
pub const MONTH_DAYS: i64 = 30;

const TOP_N: usize = 5;
const WEIGHT_MEASUREMENT: &str = "weight";

/// Averages over days that have at least one log
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DailyAverages {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub days_logged: i64,
}

/// Resolve the `days` query parameter
///
/// Absent or zero means the default window.
pub fn resolve_window(days: Option<i64>) -> Result<i64, ApiError> {
    match days {
        None | Some(0) => Ok(DEFAULT_WINDOW_DAYS),
        Some(d) if (1..=MAX_WINDOW_DAYS).contains(&d) => Ok(d),
        Some(d) => Err(ApiError::InvalidArgument(format!(
            "days must be between 1 and {}, got {}",
            MAX_WINDOW_DAYS, d
        ))),
    }
}

/// Average daily totals, rounded for display
pub fn average_daily(rows: &[DailyTotalsRow]) -> DailyAverages {
    if rows.is_empty() {
        return DailyAverages::default();
    }

    let (calories, protein, carbs, fat) = rows.iter().fold((0.0, 0.0, 0.0, 0.0), |acc, r| {
        (
            acc.0 + r.calories,
            acc.1 + r.protein,
            acc.2 + r.carbs,
            acc.3 + r.fat,
        )
    });
    let days = rows.len() as f64;

    DailyAverages {
        calories: round_calories(calories / days),
        protein: round_to_tenth(protein / days),
        carbs: round_to_tenth(carbs / days),
        fat: round_to_tenth(fat / days),
        days_logged: rows.len() as i64,
    }
}

/// Meal type with the most logs
pub fn most_logged_meal_type(rows: &[NameCountRow]) -> MealType {
    let count_of = |meal: MealType| {
        rows.iter()
            .filter(|r| r.name.parse::<MealType>().ok() == Some(meal))
            .map(|r| r.count)
            .sum::<i64>()
    };

    let mut best = (MealType::default(), 0);
    for meal in MealType::ALL {
        let count = count_of(meal);
        if count > best.1 {
            best = (meal, count);
        }
    }
    best.0
}

/// Weekday name with the most sessions
pub fn most_active_day(rows: &[WeekdayCountRow]) -> &'static str {
    let mut best = (1u32, 0i64);
    for iso_day in 1..=7u32 {
        let count: i64 = rows
            .iter()
            .filter(|r| r.iso_day == iso_day as i32)
            .map(|r| r.count)
            .sum();
        if count > best.1 {
            best = (iso_day, count);
        }
    }
    weekday_name(best.0).unwrap_or(WEEKDAY_NAMES[0])
}

/// Highest counts first, ties by name ascending
pub fn top_counts(mut rows: Vec<NameCountRow>, n: usize) -> Vec<NameCountRow> {
    rows.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    rows.truncate(n);
    rows
}

/// Per-day totals for the week ending `today`, newest first
pub fn weekly_trend(rows: &[DailyTotalsRow], today: NaiveDate) -> Vec<DailyNutritionPoint> {
    let first_day = today - Duration::days(WEEK_DAYS - 1);
    let mut points: Vec<DailyNutritionPoint> = rows
        .iter()
        .filter(|r| r.day >= first_day && r.day <= today)
        .map(|r| DailyNutritionPoint {
            date: r.day,
            calories: round_calories(r.calories),
            protein: round_to_tenth(r.protein),
            carbs: round_to_tenth(r.carbs),
            fat: round_to_tenth(r.fat),
        })
        .collect();
    points.sort_by(|a, b| b.date.cmp(&a.date));
    points
}

/// Change between the latest value and an earlier baseline
pub fn value_change(latest: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    match (latest, baseline) {
        (Some(latest), Some(baseline)) => Some(round_to_tenth(latest - baseline)),
        _ => None,
    }
}

/// Analytics service for the caller's aggregates
pub struct AnalyticsService;

impl AnalyticsService {
    /// Nutrition statistics over a trailing window
    pub async fn nutrition_stats(
        pool: &PgPool,
        user_id: Uuid,
        days: Option<i64>,
    ) -> Result<NutritionStatsResponse, ApiError> {
        let days = resolve_window(days)?;
        let now = Utc::now();
        let since = Some(now - Duration::days(days));
        let today = now.date_naive();
        let trend_start = (today - Duration::days(WEEK_DAYS - 1))
            .and_time(NaiveTime::MIN)
            .and_utc();

        let (daily, trend, meals, foods) = tokio::try_join!(
            AnalyticsRepository::daily_nutrition_totals(pool, user_id, since),
            AnalyticsRepository::daily_nutrition_totals(pool, user_id, Some(trend_start)),
            AnalyticsRepository::meal_type_counts(pool, user_id, since),
            AnalyticsRepository::food_counts(pool, user_id, since),
        )
        .map_err(ApiError::Internal)?;

        let averages = average_daily(&daily);

        Ok(NutritionStatsResponse {
            average_daily_calories: averages.calories,
            average_daily_protein: averages.protein,
            average_daily_carbs: averages.carbs,
            average_daily_fat: averages.fat,
            total_meals_logged: meals.iter().map(|m| m.count).sum(),
            most_logged_meal_type: most_logged_meal_type(&meals).to_string(),
            top_foods: top_counts(foods, TOP_N)
                .into_iter()
                .map(|r| FoodCount {
                    food_name: r.name,
                    count: r.count,
                })
                .collect(),
            weekly_trend: weekly_trend(&trend, today),
        })
    }

    /// Workout statistics over a trailing window
    pub async fn workout_stats(
        pool: &PgPool,
        user_id: Uuid,
        days: Option<i64>,
    ) -> Result<WorkoutStatsResponse, ApiError> {
        let days = resolve_window(days)?;
        let now = Utc::now();
        let since = Some(now - Duration::days(days));

        let (totals, weekdays, exercises) = tokio::try_join!(
            AnalyticsRepository::workout_totals(
                pool,
                user_id,
                since,
                now - Duration::days(WEEK_DAYS),
                now - Duration::days(MONTH_DAYS),
            ),
            AnalyticsRepository::weekday_counts(pool, user_id, since),
            AnalyticsRepository::exercise_counts(pool, user_id, since),
        )
        .map_err(ApiError::Internal)?;

        Ok(WorkoutStatsResponse {
            total_workouts: totals.total_workouts,
            total_duration: totals.total_duration,
            average_duration: totals.average_duration.map(round_calories).unwrap_or(0),
            workouts_this_week: totals.workouts_this_week,
            workouts_this_month: totals.workouts_this_month,
            most_active_day: most_active_day(&weekdays).to_string(),
            popular_exercises: top_counts(exercises, TOP_N)
                .into_iter()
                .map(|r| ExerciseCount {
                    exercise_name: r.name,
                    count: r.count,
                })
                .collect(),
        })
    }

    /// Lifetime overview of the caller's workouts, nutrition and progress
    pub async fn overview(pool: &PgPool, user_id: Uuid) -> Result<OverviewResponse, ApiError> {
        let now = Utc::now();
        let baseline_date = now.date_naive() - Duration::days(MONTH_DAYS);

        let (totals, daily, latest_weight, baseline_weight, measurement_types, recent) =
            tokio::try_join!(
                AnalyticsRepository::workout_totals(
                    pool,
                    user_id,
                    None,
                    now - Duration::days(WEEK_DAYS),
                    now - Duration::days(MONTH_DAYS),
                ),
                AnalyticsRepository::daily_nutrition_totals(pool, user_id, None),
                AnalyticsRepository::latest_measurement(pool, user_id, WEIGHT_MEASUREMENT, None),
                AnalyticsRepository::latest_measurement(
                    pool,
                    user_id,
                    WEIGHT_MEASUREMENT,
                    Some(baseline_date),
                ),
                AnalyticsRepository::measurement_types(pool, user_id),
                AnalyticsRepository::recent_activity(pool, user_id),
            )
            .map_err(ApiError::Internal)?;

        let averages = average_daily(&daily);

        Ok(OverviewResponse {
            workout_stats: OverviewWorkoutStats {
                total_workouts: totals.total_workouts,
                average_rating: totals.average_rating.map(round_to_tenth).unwrap_or(0.0),
                total_duration_minutes: totals.total_duration,
                workouts_this_week: totals.workouts_this_week,
                workouts_this_month: totals.workouts_this_month,
            },
            nutrition_stats: OverviewNutritionStats {
                average_daily_calories: averages.calories,
                average_daily_protein: averages.protein,
                average_daily_carbs: averages.carbs,
                average_daily_fat: averages.fat,
                days_logged: averages.days_logged,
            },
            progress_stats: OverviewProgressStats {
                latest_weight,
                weight_change_30_days: value_change(latest_weight, baseline_weight),
                measurement_types,
            },
            recent_activity: RecentActivity {
                last_workout: recent.last_workout,
                last_nutrition_log: recent.last_nutrition_log,
                last_progress_update: recent.last_progress_update,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn totals(date: NaiveDate, calories: f64, protein: f64) -> DailyTotalsRow {
        DailyTotalsRow {
            day: date,
            calories,
            protein,
            carbs: 0.0,
            fat: 0.0,
        }
    }

    fn named(name: &str, count: i64) -> NameCountRow {
        NameCountRow {
            name: name.to_string(),
            count,
        }
    }

    #[rstest]
    #[case(None, Some(30))]
    #[case(Some(0), Some(30))]
    #[case(Some(7), Some(7))]
    #[case(Some(365), Some(365))]
    #[case(Some(366), None)]
    #[case(Some(-1), None)]
    fn test_resolve_window(#[case] days: Option<i64>, #[case] expected: Option<i64>) {
        assert_eq!(resolve_window(days).ok(), expected);
    }

    #[test]
    fn test_average_over_logged_days_only() {
        // Two days, each one 100g serving of a 200 kcal/100g food
        let rows = vec![
            totals(day(2024, 3, 2), 200.0, 10.0),
            totals(day(2024, 3, 1), 200.0, 10.0),
        ];
        let averages = average_daily(&rows);
        assert_eq!(averages.calories, 200);
        assert_eq!(averages.days_logged, 2);
        assert!((averages.protein - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_average_rounds_macros_to_one_decimal() {
        let rows = vec![
            totals(day(2024, 3, 2), 100.0, 10.04),
            totals(day(2024, 3, 1), 101.0, 10.0),
        ];
        let averages = average_daily(&rows);
        assert_eq!(averages.calories, 101);
        assert!((averages.protein - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window_is_zero() {
        assert_eq!(average_daily(&[]), DailyAverages::default());
        assert_eq!(most_logged_meal_type(&[]), MealType::Breakfast);
        assert_eq!(most_active_day(&[]), "Monday");
        assert!(top_counts(vec![], 5).is_empty());
    }

    #[test]
    fn test_meal_type_tie_goes_to_enum_order() {
        let rows = vec![named("snack", 3), named("lunch", 3), named("breakfast", 1)];
        assert_eq!(most_logged_meal_type(&rows), MealType::Lunch);
    }

    #[test]
    fn test_meal_type_highest_count_wins() {
        let rows = vec![named("dinner", 4), named("breakfast", 2)];
        assert_eq!(most_logged_meal_type(&rows), MealType::Dinner);
    }

    #[test]
    fn test_weekday_tie_goes_to_earlier_day() {
        let rows = vec![
            WeekdayCountRow { iso_day: 5, count: 2 },
            WeekdayCountRow { iso_day: 3, count: 2 },
            WeekdayCountRow { iso_day: 7, count: 1 },
        ];
        assert_eq!(most_active_day(&rows), "Wednesday");
    }

    #[test]
    fn test_top_counts_breaks_ties_by_name() {
        let rows = vec![
            named("Oatmeal", 2),
            named("Banana", 2),
            named("Apple", 5),
            named("Egg", 1),
            named("Salmon", 1),
            named("Broccoli", 1),
        ];
        let names: Vec<String> = top_counts(rows, 5).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Apple", "Banana", "Oatmeal", "Broccoli", "Egg"]);
    }

    #[test]
    fn test_weekly_trend_keeps_last_seven_days_newest_first() {
        let today = day(2024, 3, 10);
        let rows = vec![
            totals(day(2024, 3, 3), 100.0, 1.0),
            totals(day(2024, 3, 4), 150.4, 1.26),
            totals(day(2024, 3, 10), 200.6, 2.0),
        ];
        let trend = weekly_trend(&rows, today);
        let dates: Vec<NaiveDate> = trend.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(2024, 3, 10), day(2024, 3, 4)]);
        assert_eq!(trend[0].calories, 201);
        assert!((trend[1].protein - 1.3).abs() < 1e-9);
    }

    #[test]
    fn test_value_change() {
        assert_eq!(value_change(Some(80.0), Some(82.5)), Some(-2.5));
        assert_eq!(value_change(Some(80.0), None), None);
        assert_eq!(value_change(None, Some(80.0)), None);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Top-N output is sorted and never longer than N
        #[test]
        fn prop_top_counts_sorted(counts in proptest::collection::vec((0i64..20, "[a-e]{1,3}"), 0..30)) {
            let rows: Vec<NameCountRow> = counts
                .into_iter()
                .map(|(count, name)| NameCountRow { name, count })
                .collect();
            let top = top_counts(rows, TOP_N);
            prop_assert!(top.len() <= TOP_N);
            for pair in top.windows(2) {
                prop_assert!(
                    pair[0].count > pair[1].count
                        || (pair[0].count == pair[1].count && pair[0].name <= pair[1].name)
                );
            }
        }

        /// Equal daily totals average to themselves
        #[test]
        fn prop_average_of_equal_days(calories in 0u32..5000, n in 1usize..30) {
            let calories = f64::from(calories);
            let rows: Vec<DailyTotalsRow> = (0..n)
                .map(|i| totals(day(2024, 1, 1) + Duration::days(i as i64), calories, 0.0))
                .collect();
            prop_assert_eq!(average_daily(&rows).calories, calories as i64);
        }

        /// The winning meal type always has the maximum count
        #[test]
        fn prop_most_logged_meal_has_max_count(counts in proptest::array::uniform4(0i64..10)) {
            let rows: Vec<NameCountRow> = MealType::ALL
                .iter()
                .zip(counts)
                .map(|(meal, count)| named(meal.as_str(), count))
                .collect();
            let winner = most_logged_meal_type(&rows);
            let max = counts.iter().copied().max().unwrap_or(0);
            let winner_count = rows
                .iter()
                .find(|r| r.name == winner.as_str())
                .map(|r| r.count)
                .unwrap_or(0);
            prop_assert!(max == 0 || winner_count == max);
        }
    }
}
