use std::collections::BTreeMap;

use serde::Serialize;

use crate::{ReadError, UserID, WorkoutExercise};

#[allow(async_fn_in_trait)]
pub trait LeaderboardService: Send + Sync + 'static {
    /// Ranking for one exercise when a name is given, otherwise the
    /// top-exercises overview.
    async fn exercise_leaderboard(
        &self,
        exercise: &str,
        limit: usize,
    ) -> Result<Vec<LeaderboardEntry>, ReadError>;
    async fn top_exercises(&self, limit: usize) -> Result<Vec<ExerciseOverview>, ReadError>;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: UserID,
    pub user_name: String,
    /// Epley estimate, rounded to one decimal place.
    pub best_one_rm: f32,
    pub best_one_rm_weight: f32,
    pub best_one_rm_reps: u32,
    /// Heaviest single weight ever lifted; may come from a different set
    /// than the best estimate.
    pub heaviest_weight: f32,
    pub heaviest_weight_reps: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseOverview {
    pub exercise: String,
    pub participants: u32,
    pub total_sets: u32,
    pub max_weight: f32,
}

/// Estimated one-rep max after Epley, as used for the leaderboard.
///
/// Deviates from the Brzycki formula used for personal records; the two
/// numbers are not comparable.
#[must_use]
pub fn epley_one_rm(weight: f32, reps: u32) -> f32 {
    #[allow(clippy::cast_precision_loss)]
    match reps {
        0 => 0.0,
        1 => weight,
        _ => weight * (1.0 + reps as f32 / 30.0),
    }
}

fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Ranks all users on one exercise by their best Epley estimate. The
/// exercise is matched case-sensitively against the embedded snapshot name,
/// never against the live catalog.
#[must_use]
pub fn exercise_leaderboard(
    rows: &[(UserID, WorkoutExercise)],
    names: &BTreeMap<UserID, String>,
    exercise: &str,
    limit: usize,
) -> Vec<LeaderboardEntry> {
    struct Best {
        one_rm: f32,
        one_rm_weight: f32,
        one_rm_reps: u32,
        heaviest: f32,
        heaviest_reps: u32,
    }

    let mut bests: BTreeMap<UserID, Best> = BTreeMap::new();

    for (user_id, workout_exercise) in rows {
        let Some(snapshot) = workout_exercise.snapshot.as_ref() else {
            continue;
        };
        if snapshot.name.as_ref() != exercise {
            continue;
        }
        for set in workout_exercise
            .sets
            .iter()
            .filter(|s| u32::from(s.reps) > 0)
        {
            let weight = f32::from(set.weight);
            let reps = u32::from(set.reps);
            let estimate = epley_one_rm(weight, reps);
            let best = bests.entry(*user_id).or_insert(Best {
                one_rm: estimate,
                one_rm_weight: weight,
                one_rm_reps: reps,
                heaviest: weight,
                heaviest_reps: reps,
            });
            if estimate > best.one_rm {
                best.one_rm = estimate;
                best.one_rm_weight = weight;
                best.one_rm_reps = reps;
            }
            if weight > best.heaviest {
                best.heaviest = weight;
                best.heaviest_reps = reps;
            }
        }
    }

    let mut entries = bests.into_iter().collect::<Vec<_>>();
    entries.sort_by(|(_, a), (_, b)| b.one_rm.total_cmp(&a.one_rm));
    entries
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (user_id, best))| LeaderboardEntry {
            #[allow(clippy::cast_possible_truncation)]
            rank: i as u32 + 1,
            user_id,
            user_name: names.get(&user_id).cloned().unwrap_or_default(),
            best_one_rm: round_to_tenth(best.one_rm),
            best_one_rm_weight: best.one_rm_weight,
            best_one_rm_reps: best.one_rm_reps,
            heaviest_weight: best.heaviest,
            heaviest_weight_reps: best.heaviest_reps,
        })
        .collect()
}

/// Groups all logged workout exercises by snapshot name: participating
/// users, total completed sets and the heaviest weight ever recorded, sorted
/// by total sets descending.
#[must_use]
pub fn top_exercises(rows: &[(UserID, WorkoutExercise)], limit: usize) -> Vec<ExerciseOverview> {
    struct Stats {
        users: std::collections::BTreeSet<UserID>,
        total_sets: u32,
        max_weight: f32,
    }

    let mut stats: BTreeMap<String, Stats> = BTreeMap::new();

    for (user_id, workout_exercise) in rows {
        let Some(snapshot) = workout_exercise.snapshot.as_ref() else {
            continue;
        };
        let entry = stats
            .entry(snapshot.name.as_ref().to_string())
            .or_insert(Stats {
                users: std::collections::BTreeSet::new(),
                total_sets: 0,
                max_weight: 0.0,
            });
        for set in workout_exercise
            .sets
            .iter()
            .filter(|s| u32::from(s.reps) > 0)
        {
            entry.users.insert(*user_id);
            entry.total_sets += 1;
            entry.max_weight = entry.max_weight.max(f32::from(set.weight));
        }
    }

    let mut overviews = stats
        .into_iter()
        .filter(|(_, stats)| !stats.users.is_empty())
        .map(|(exercise, stats)| ExerciseOverview {
            exercise,
            #[allow(clippy::cast_possible_truncation)]
            participants: stats.users.len() as u32,
            total_sets: stats.total_sets,
            max_weight: stats.max_weight,
        })
        .collect::<Vec<_>>();
    overviews.sort_by(|a, b| b.total_sets.cmp(&a.total_sets).then(a.exercise.cmp(&b.exercise)));
    overviews.truncate(limit);
    overviews
}
