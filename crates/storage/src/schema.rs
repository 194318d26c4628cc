//! Database schema, applied on startup. All statements are idempotent.

pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS exercises (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    description TEXT,
    muscle_group TEXT NOT NULL,
    equipment TEXT NOT NULL,
    video_url TEXT,
    owner_id TEXT,
    links TEXT NOT NULL DEFAULT '[]',
    is_deleted INTEGER NOT NULL DEFAULT 0,
    deleted_at TEXT,
    deleted_by TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_exercises_owner ON exercises(owner_id);
CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_global_name
    ON exercises(name) WHERE owner_id IS NULL AND is_deleted = 0;
CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_custom_name
    ON exercises(owner_id, name) WHERE owner_id IS NOT NULL AND is_deleted = 0;

CREATE TABLE IF NOT EXISTS weekly_schedules (
    id TEXT PRIMARY KEY,
    day_of_week INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS schedule_exercises (
    schedule_id TEXT NOT NULL REFERENCES weekly_schedules(id) ON DELETE CASCADE,
    exercise_id TEXT NOT NULL,
    exercise_order INTEGER NOT NULL,
    PRIMARY KEY (schedule_id, exercise_id)
);

CREATE TABLE IF NOT EXISTS workout_logs (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    date TEXT NOT NULL,
    day_of_week INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workout_logs_user ON workout_logs(user_id, date);

CREATE TABLE IF NOT EXISTS workout_exercises (
    id TEXT PRIMARY KEY,
    workout_log_id TEXT NOT NULL REFERENCES workout_logs(id) ON DELETE CASCADE,
    exercise_order INTEGER NOT NULL,
    is_custom INTEGER NOT NULL DEFAULT 0,
    is_replaced INTEGER NOT NULL DEFAULT 0,
    replaced_at TEXT,
    original_exercise_id TEXT NOT NULL,
    replacement_exercise_id TEXT,
    exercise_snapshot TEXT
);

CREATE INDEX IF NOT EXISTS idx_workout_exercises_log ON workout_exercises(workout_log_id);
CREATE INDEX IF NOT EXISTS idx_workout_exercises_original
    ON workout_exercises(original_exercise_id);
CREATE INDEX IF NOT EXISTS idx_workout_exercises_replacement
    ON workout_exercises(replacement_exercise_id);

CREATE TABLE IF NOT EXISTS exercise_sets (
    workout_exercise_id TEXT NOT NULL REFERENCES workout_exercises(id) ON DELETE CASCADE,
    set_number INTEGER NOT NULL,
    reps INTEGER NOT NULL,
    weight_kg REAL NOT NULL,
    PRIMARY KEY (workout_exercise_id, set_number)
);

CREATE TABLE IF NOT EXISTS exercise_change_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_id TEXT NOT NULL,
    actor_id TEXT NOT NULL,
    change_type TEXT NOT NULL,
    old_data TEXT,
    new_data TEXT,
    changed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_change_log_exercise ON exercise_change_log(exercise_id);

CREATE TABLE IF NOT EXISTS snapshot_backfill (
    workout_exercise_id TEXT PRIMARY KEY
);
";
