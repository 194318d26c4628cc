use std::collections::{BTreeMap, BTreeSet};

use chrono::{Duration, NaiveDate, Weekday};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    DayOfWeek, ExerciseID, ExerciseSnapshot, MuscleGroup, ReadError, UserID, WorkoutExercise,
    WorkoutLog,
};

#[allow(async_fn_in_trait)]
pub trait AnalyticsService: Send + Sync + 'static {
    async fn analytics_report(
        &self,
        user_id: UserID,
        filter: AnalyticsFilter,
    ) -> Result<AnalyticsReport, ReadError>;
    async fn workout_streak(&self, user_id: UserID) -> Result<Streak, ReadError>;
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct AnalyticsFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub exercise_id: Option<ExerciseID>,
    pub muscle_group: Option<MuscleGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsReport {
    pub weight_progress: Vec<ExerciseProgress>,
    pub volume_trend: Vec<VolumePoint>,
    pub muscle_group_distribution: Vec<MuscleGroupShare>,
    pub frequency_trend: Vec<FrequencyBucket>,
    pub personal_records: Vec<PersonalRecord>,
    pub summary: Summary,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseProgress {
    pub exercise: String,
    pub points: Vec<ProgressPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub date: NaiveDate,
    pub max_weight: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VolumePoint {
    pub week_start: NaiveDate,
    pub volume: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MuscleGroupShare {
    pub name: &'static str,
    pub value: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyBucket {
    pub day: &'static str,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub exercise: String,
    pub date: NaiveDate,
    pub weight: f32,
    pub reps: u32,
    pub estimated_one_rm: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub total_workouts: u32,
    pub total_sets: u32,
    pub total_volume: f32,
    pub distinct_exercises: u32,
    pub avg_workouts_per_week: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Streak {
    pub current: u32,
    pub longest: u32,
    pub heatmap: Vec<HeatmapDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeatmapDay {
    pub date: NaiveDate,
    pub count: u32,
}

/// Estimated one-rep max after Brzycki, as used for personal records.
///
/// The leaderboard intentionally uses the Epley formula instead; the two
/// views are not numerically comparable.
#[must_use]
pub fn brzycki_one_rm(weight: f32, reps: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    match reps {
        0 => 0.0,
        1 => weight,
        _ => weight / (1.0278 - 0.0278 * reps as f32),
    }
}

/// Prunes each log's exercise list according to the filter and drops logs
/// left without exercises. Runs before any aggregation.
#[must_use]
pub fn apply_filter(logs: Vec<WorkoutLog>, filter: &AnalyticsFilter) -> Vec<WorkoutLog> {
    logs.into_iter()
        .filter(|log| {
            filter.start.is_none_or(|start| log.date >= start)
                && filter.end.is_none_or(|end| log.date <= end)
        })
        .map(|mut log| {
            log.exercises.retain(|exercise| {
                let Some(snapshot) = exercise.snapshot.as_ref() else {
                    return false;
                };
                filter
                    .exercise_id
                    .is_none_or(|id| snapshot.exercise_id == id)
                    && filter
                        .muscle_group
                        .is_none_or(|m| snapshot.muscle_group == m)
            });
            log
        })
        .filter(|log| !log.exercises.is_empty())
        .collect()
}

fn snapshot_of(exercise: &WorkoutExercise) -> Option<&ExerciseSnapshot> {
    if exercise.snapshot.is_none() {
        warn!(
            "workout exercise {} has no snapshot, skipping in aggregation",
            *exercise.id
        );
    }
    exercise.snapshot.as_ref()
}

/// Per exercise name, the per-session maximum weight over time. Sessions in
/// which an exercise has no set with positive weight are skipped for that
/// exercise.
#[must_use]
pub fn weight_progress(logs: &[WorkoutLog]) -> Vec<ExerciseProgress> {
    let mut progress: BTreeMap<String, BTreeMap<NaiveDate, f32>> = BTreeMap::new();

    for log in logs {
        for exercise in &log.exercises {
            let Some(snapshot) = snapshot_of(exercise) else {
                continue;
            };
            let max_weight = exercise
                .sets
                .iter()
                .filter(|s| u32::from(s.reps) > 0 && f32::from(s.weight) > 0.0)
                .map(|s| f32::from(s.weight))
                .fold(f32::NEG_INFINITY, f32::max);
            if max_weight > 0.0 {
                let points = progress.entry(snapshot.name.as_ref().to_string()).or_default();
                let entry = points.entry(log.date).or_insert(max_weight);
                *entry = entry.max(max_weight);
            }
        }
    }

    progress
        .into_iter()
        .map(|(exercise, points)| ExerciseProgress {
            exercise,
            points: points
                .into_iter()
                .map(|(date, max_weight)| ProgressPoint { date, max_weight })
                .collect(),
        })
        .collect()
}

/// Total volume (reps × weight) per week, keyed by the Monday starting the
/// week. Weeks without logged volume are omitted; callers must not assume
/// contiguous weeks.
#[must_use]
pub fn volume_trend(logs: &[WorkoutLog]) -> Vec<VolumePoint> {
    let mut weeks: BTreeMap<NaiveDate, f32> = BTreeMap::new();

    for log in logs {
        let week_start = log.date.week(Weekday::Mon).first_day();
        for exercise in &log.exercises {
            for set in exercise.sets.iter().filter(|s| u32::from(s.reps) > 0) {
                #[allow(clippy::cast_precision_loss)]
                let volume = u32::from(set.reps) as f32 * f32::from(set.weight);
                *weeks.entry(week_start).or_insert(0.0) += volume;
            }
        }
    }

    weeks
        .into_iter()
        .filter(|(_, volume)| *volume > 0.0)
        .map(|(week_start, volume)| VolumePoint { week_start, volume })
        .collect()
}

/// Completed set counts per muscle group. Percentages are rounded
/// independently and may not sum to exactly 100.
#[must_use]
pub fn muscle_group_distribution(logs: &[WorkoutLog]) -> Vec<MuscleGroupShare> {
    let mut counts: BTreeMap<MuscleGroup, u32> = BTreeMap::new();

    for log in logs {
        for exercise in &log.exercises {
            let Some(snapshot) = snapshot_of(exercise) else {
                continue;
            };
            let sets = exercise
                .sets
                .iter()
                .filter(|s| u32::from(s.reps) > 0)
                .count();
            if sets > 0 {
                #[allow(clippy::cast_possible_truncation)]
                {
                    *counts.entry(snapshot.muscle_group).or_insert(0) += sets as u32;
                }
            }
        }
    }

    let total: u32 = counts.values().sum();
    let mut shares = counts
        .into_iter()
        .map(|(muscle_group, value)| MuscleGroupShare {
            name: muscle_group.name(),
            value,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            percentage: if total > 0 {
                (f64::from(value) / f64::from(total) * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect::<Vec<_>>();
    shares.sort_by(|a, b| b.value.cmp(&a.value).then(a.name.cmp(b.name)));
    shares
}

/// Number of distinct training days per weekday, zero-filled across all
/// seven buckets.
#[must_use]
pub fn frequency_trend(logs: &[WorkoutLog]) -> Vec<FrequencyBucket> {
    let mut days: BTreeMap<DayOfWeek, BTreeSet<NaiveDate>> = BTreeMap::new();

    for log in logs {
        days.entry(log.day).or_default().insert(log.date);
    }

    DayOfWeek::iter()
        .map(|day| FrequencyBucket {
            day: day.name(),
            #[allow(clippy::cast_possible_truncation)]
            count: days.get(day).map_or(0, |dates| dates.len() as u32),
        })
        .collect()
}

/// Per exercise name, the single set with the highest estimated one-rep max
/// (Brzycki). Ties are broken in favor of the first encountered set; logs
/// arrive date-descending, exercises and sets in stored order.
#[must_use]
pub fn personal_records(logs: &[WorkoutLog]) -> Vec<PersonalRecord> {
    struct Record {
        date: NaiveDate,
        weight: f32,
        reps: u32,
        estimate: f32,
    }

    let mut records: BTreeMap<String, Record> = BTreeMap::new();

    for log in logs {
        for exercise in &log.exercises {
            let Some(snapshot) = snapshot_of(exercise) else {
                continue;
            };
            for set in exercise.sets.iter().filter(|s| u32::from(s.reps) > 0) {
                let estimate = brzycki_one_rm(f32::from(set.weight), u32::from(set.reps));
                let record = records.entry(snapshot.name.as_ref().to_string());
                match record {
                    std::collections::btree_map::Entry::Vacant(vacant) => {
                        vacant.insert(Record {
                            date: log.date,
                            weight: f32::from(set.weight),
                            reps: u32::from(set.reps),
                            estimate,
                        });
                    }
                    std::collections::btree_map::Entry::Occupied(mut occupied) => {
                        if estimate > occupied.get().estimate {
                            occupied.insert(Record {
                                date: log.date,
                                weight: f32::from(set.weight),
                                reps: u32::from(set.reps),
                                estimate,
                            });
                        }
                    }
                }
            }
        }
    }

    records
        .into_iter()
        .map(|(exercise, record)| PersonalRecord {
            exercise,
            date: record.date,
            weight: record.weight,
            reps: record.reps,
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            estimated_one_rm: record.estimate.round() as u32,
        })
        .collect()
}

/// Headline totals over the given logs. The weekly average divides by the
/// number of weeks spanned from oldest to newest log, rounded up, and is 0
/// when fewer than two logs or no span exist.
#[must_use]
pub fn summary(logs: &[WorkoutLog]) -> Summary {
    let mut total_sets: u32 = 0;
    let mut total_volume: f32 = 0.0;
    let mut exercises: BTreeSet<String> = BTreeSet::new();

    for log in logs {
        for exercise in &log.exercises {
            if let Some(snapshot) = snapshot_of(exercise) {
                exercises.insert(snapshot.name.as_ref().to_string());
            }
            for set in exercise.sets.iter().filter(|s| u32::from(s.reps) > 0) {
                total_sets += 1;
                #[allow(clippy::cast_precision_loss)]
                {
                    total_volume += u32::from(set.reps) as f32 * f32::from(set.weight);
                }
            }
        }
    }

    let oldest = logs.iter().map(|log| log.date).min();
    let newest = logs.iter().map(|log| log.date).max();
    let avg_workouts_per_week = match (oldest, newest) {
        (Some(oldest), Some(newest)) if logs.len() >= 2 && newest > oldest => {
            let span_days = (newest - oldest).num_days();
            let weeks = (span_days + 6) / 7;
            #[allow(clippy::cast_precision_loss)]
            {
                logs.len() as f32 / weeks as f32
            }
        }
        _ => 0.0,
    };

    #[allow(clippy::cast_possible_truncation)]
    Summary {
        total_workouts: logs.len() as u32,
        total_sets,
        total_volume,
        distinct_exercises: exercises.len() as u32,
        avg_workouts_per_week,
    }
}

/// Current and longest run of consecutive training days, plus a per-day
/// count for the 365 days ending today. The current streak also counts when
/// the last training day was yesterday.
#[must_use]
pub fn streak(logs: &[WorkoutLog], today: NaiveDate) -> Streak {
    let mut counts: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    for log in logs {
        *counts.entry(log.date).or_insert(0) += 1;
    }

    let mut current = 0;
    let mut day = if counts.contains_key(&today) {
        today
    } else {
        today - Duration::days(1)
    };
    while counts.contains_key(&day) {
        current += 1;
        day -= Duration::days(1);
    }

    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;
    for date in counts.keys() {
        run = match previous {
            Some(previous) if *date - previous == Duration::days(1) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(*date);
    }

    let heatmap = (0..365)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            HeatmapDay {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            }
        })
        .collect();

    Streak {
        current,
        longest,
        heatmap,
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;
    use chrono::{Datelike, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{
        Equipment, ExerciseSet, Name, Reps, WeightKg, WorkoutExercise, WorkoutExerciseID,
        WorkoutLogID,
    };

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn set(number: u32, reps: u32, weight: f32) -> ExerciseSet {
        ExerciseSet {
            number,
            reps: Reps::new(reps).unwrap(),
            weight: WeightKg::new(weight).unwrap(),
        }
    }

    fn snapshot(id: u128, name: &str, muscle_group: MuscleGroup) -> ExerciseSnapshot {
        ExerciseSnapshot {
            schema_version: crate::SNAPSHOT_SCHEMA_VERSION,
            exercise_id: id.into(),
            name: Name::new(name).unwrap(),
            description: None,
            muscle_group,
            equipment: Equipment::Barbell,
            video_url: None,
            owner: None,
            captured_at: Utc::now(),
        }
    }

    fn workout_exercise(
        order: u32,
        id: u128,
        name: &str,
        muscle_group: MuscleGroup,
        sets: Vec<ExerciseSet>,
    ) -> WorkoutExercise {
        WorkoutExercise {
            id: WorkoutExerciseID::new(),
            order,
            is_custom: false,
            is_replaced: false,
            replaced_at: None,
            original_exercise_id: id.into(),
            replacement_exercise_id: None,
            snapshot: Some(snapshot(id, name, muscle_group)),
            sets,
        }
    }

    fn log(date: NaiveDate, exercises: Vec<WorkoutExercise>) -> WorkoutLog {
        WorkoutLog {
            id: WorkoutLogID::new(),
            user_id: 1.into(),
            date,
            day: date.weekday().into(),
            exercises,
        }
    }

    #[rstest]
    #[case(100.0, 1, 100.0)]
    #[case(100.0, 5, 112.511_24)]
    #[case(0.0, 10, 0.0)]
    #[case(100.0, 0, 0.0)]
    fn test_brzycki_one_rm(#[case] weight: f32, #[case] reps: u32, #[case] expected: f32) {
        assert_approx_eq!(brzycki_one_rm(weight, reps), expected, 1e-3);
    }

    #[test]
    fn test_weight_progress_skips_sessions_without_positive_weight() {
        let logs = vec![
            log(
                date(2024, 5, 6),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0), set(2, 8, 60.0)],
                )],
            ),
            log(
                date(2024, 5, 1),
                vec![workout_exercise(
                    1,
                    2,
                    "Push Up",
                    MuscleGroup::Chest,
                    vec![set(1, 20, 0.0)],
                )],
            ),
        ];
        assert_eq!(
            weight_progress(&logs),
            vec![ExerciseProgress {
                exercise: "Bench Press".to_string(),
                points: vec![ProgressPoint {
                    date: date(2024, 5, 6),
                    max_weight: 60.0
                }],
            }]
        );
    }

    #[test]
    fn test_volume_trend_single_week_bucket() {
        // 2024-05-06 and 2024-05-08 share the ISO week starting Monday
        // 2024-05-06.
        let logs = vec![
            log(
                date(2024, 5, 8),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 8, 60.0)],
                )],
            ),
            log(
                date(2024, 5, 6),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            ),
        ];
        assert_eq!(
            volume_trend(&logs),
            vec![VolumePoint {
                week_start: date(2024, 5, 6),
                volume: 980.0
            }]
        );
    }

    #[test]
    fn test_volume_trend_omits_zero_volume_weeks() {
        let logs = vec![log(
            date(2024, 5, 6),
            vec![workout_exercise(
                1,
                1,
                "Push Up",
                MuscleGroup::Chest,
                vec![set(1, 20, 0.0)],
            )],
        )];
        assert_eq!(volume_trend(&logs), vec![]);
    }

    #[test]
    fn test_muscle_group_distribution() {
        let logs = vec![log(
            date(2024, 5, 6),
            vec![
                workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0), set(2, 8, 55.0), set(3, 6, 60.0)],
                ),
                workout_exercise(2, 2, "Row", MuscleGroup::Back, vec![set(1, 10, 40.0)]),
            ],
        )];
        assert_eq!(
            muscle_group_distribution(&logs),
            vec![
                MuscleGroupShare {
                    name: "Chest",
                    value: 3,
                    percentage: 75
                },
                MuscleGroupShare {
                    name: "Back",
                    value: 1,
                    percentage: 25
                },
            ]
        );
    }

    #[test]
    fn test_muscle_group_distribution_excludes_zero_rep_sets() {
        let logs = vec![log(
            date(2024, 5, 6),
            vec![workout_exercise(
                1,
                1,
                "Bench Press",
                MuscleGroup::Chest,
                vec![set(1, 0, 50.0)],
            )],
        )];
        assert_eq!(muscle_group_distribution(&logs), vec![]);
    }

    #[test]
    fn test_frequency_trend_zero_fills_all_weekdays() {
        // Two logs on the same Monday count as one distinct day.
        let monday = date(2024, 5, 6);
        let logs = vec![
            log(
                monday,
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            ),
            log(
                monday,
                vec![workout_exercise(
                    1,
                    2,
                    "Row",
                    MuscleGroup::Back,
                    vec![set(1, 10, 40.0)],
                )],
            ),
            log(
                date(2024, 5, 8),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            ),
        ];
        assert_eq!(
            frequency_trend(&logs),
            vec![
                FrequencyBucket {
                    day: "Monday",
                    count: 1
                },
                FrequencyBucket {
                    day: "Tuesday",
                    count: 0
                },
                FrequencyBucket {
                    day: "Wednesday",
                    count: 1
                },
                FrequencyBucket {
                    day: "Thursday",
                    count: 0
                },
                FrequencyBucket {
                    day: "Friday",
                    count: 0
                },
                FrequencyBucket {
                    day: "Saturday",
                    count: 0
                },
                FrequencyBucket {
                    day: "Sunday",
                    count: 0
                },
            ]
        );
    }

    #[test]
    fn test_personal_records_prefers_first_encountered_on_tie() {
        // Logs arrive newest first; both sets estimate the same one-rep max.
        let logs = vec![
            log(
                date(2024, 5, 8),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 1, 100.0)],
                )],
            ),
            log(
                date(2024, 5, 6),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 1, 100.0)],
                )],
            ),
        ];
        assert_eq!(
            personal_records(&logs),
            vec![PersonalRecord {
                exercise: "Bench Press".to_string(),
                date: date(2024, 5, 8),
                weight: 100.0,
                reps: 1,
                estimated_one_rm: 100,
            }]
        );
    }

    #[test]
    fn test_personal_records_uses_brzycki_rounded_to_integer() {
        let logs = vec![log(
            date(2024, 5, 6),
            vec![workout_exercise(
                1,
                1,
                "Bench Press",
                MuscleGroup::Chest,
                vec![set(1, 5, 100.0), set(2, 1, 100.0)],
            )],
        )];
        let records = personal_records(&logs);
        assert_eq!(records.len(), 1);
        // Brzycki: 100 / (1.0278 - 0.139) = 112.51..., rounded to 113.
        assert_eq!(records[0].estimated_one_rm, 113);
        assert_eq!(records[0].reps, 5);
    }

    #[test]
    fn test_summary() {
        let logs = vec![
            log(
                date(2024, 5, 20),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0), set(2, 0, 60.0)],
                )],
            ),
            log(
                date(2024, 5, 6),
                vec![workout_exercise(
                    1,
                    2,
                    "Row",
                    MuscleGroup::Back,
                    vec![set(1, 10, 40.0)],
                )],
            ),
        ];
        let summary = summary(&logs);
        assert_eq!(summary.total_workouts, 2);
        assert_eq!(summary.total_sets, 2);
        assert_approx_eq!(summary.total_volume, 900.0);
        assert_eq!(summary.distinct_exercises, 2);
        // 14 days span -> 2 weeks -> 1 workout per week.
        assert_approx_eq!(summary.avg_workouts_per_week, 1.0);
    }

    #[rstest]
    #[case::no_logs(&[], 0.0)]
    #[case::single_log(&[(2024, 5, 6)], 0.0)]
    #[case::same_day(&[(2024, 5, 6), (2024, 5, 6)], 0.0)]
    fn test_summary_avg_guards(#[case] dates: &[(i32, u32, u32)], #[case] expected: f32) {
        let logs = dates
            .iter()
            .map(|(y, m, d)| {
                log(
                    date(*y, *m, *d),
                    vec![workout_exercise(
                        1,
                        1,
                        "Bench Press",
                        MuscleGroup::Chest,
                        vec![set(1, 10, 50.0)],
                    )],
                )
            })
            .collect::<Vec<_>>();
        assert_approx_eq!(summary(&logs).avg_workouts_per_week, expected);
    }

    #[test]
    fn test_streak() {
        let today = date(2024, 5, 10);
        let logs = [
            (2024, 5, 9),
            (2024, 5, 8),
            (2024, 5, 1),
            (2024, 4, 30),
            (2024, 4, 29),
        ]
        .iter()
        .map(|(y, m, d)| {
            log(
                date(*y, *m, *d),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            )
        })
        .collect::<Vec<_>>();
        let streak = streak(&logs, today);
        assert_eq!(streak.current, 2);
        assert_eq!(streak.longest, 3);
        assert_eq!(streak.heatmap.len(), 365);
        assert_eq!(
            streak.heatmap.last(),
            Some(&HeatmapDay {
                date: today,
                count: 0
            })
        );
        assert_eq!(
            streak.heatmap[363],
            HeatmapDay {
                date: date(2024, 5, 9),
                count: 1
            }
        );
    }

    #[test]
    fn test_apply_filter_drops_emptied_logs() {
        let logs = vec![
            log(
                date(2024, 5, 6),
                vec![
                    workout_exercise(
                        1,
                        1,
                        "Bench Press",
                        MuscleGroup::Chest,
                        vec![set(1, 10, 50.0)],
                    ),
                    workout_exercise(2, 2, "Row", MuscleGroup::Back, vec![set(1, 10, 40.0)]),
                ],
            ),
            log(
                date(2024, 5, 8),
                vec![workout_exercise(
                    1,
                    2,
                    "Row",
                    MuscleGroup::Back,
                    vec![set(1, 10, 40.0)],
                )],
            ),
        ];
        let filtered = apply_filter(
            logs,
            &AnalyticsFilter {
                muscle_group: Some(MuscleGroup::Chest),
                ..AnalyticsFilter::default()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].exercises.len(), 1);
        assert_eq!(
            filtered[0].exercises[0]
                .snapshot
                .as_ref()
                .unwrap()
                .name
                .as_ref(),
            "Bench Press"
        );
    }

    #[test]
    fn test_apply_filter_date_range() {
        let logs = vec![
            log(
                date(2024, 5, 6),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            ),
            log(
                date(2024, 6, 6),
                vec![workout_exercise(
                    1,
                    1,
                    "Bench Press",
                    MuscleGroup::Chest,
                    vec![set(1, 10, 50.0)],
                )],
            ),
        ];
        let filtered = apply_filter(
            logs,
            &AnalyticsFilter {
                start: Some(date(2024, 5, 1)),
                end: Some(date(2024, 5, 31)),
                ..AnalyticsFilter::default()
            },
        );
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].date, date(2024, 5, 6));
    }
}
