//! SQLite schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
-- =============================================================================
-- Infrastructure: Schema version tracking
-- =============================================================================
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at INTEGER NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at INTEGER NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms INTEGER,
    success INTEGER NOT NULL DEFAULT 1
);

-- =============================================================================
-- 1. Users (password holds an Argon2id PHC string)
-- =============================================================================
CREATE TABLE IF NOT EXISTS "user" (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE CHECK(length(username) >= 1),
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
);

-- =============================================================================
-- 2. WODs (creation_t is Unix seconds, wod is the exercise text)
-- =============================================================================
CREATE TABLE IF NOT EXISTS wod (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    source TEXT,
    creation_t INTEGER NOT NULL DEFAULT 0,
    wod TEXT,
    picture TEXT,
    type TEXT NOT NULL CHECK(length(type) >= 1),
    created_by INTEGER REFERENCES "user"(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_wod_created_by ON wod(created_by);
CREATE INDEX IF NOT EXISTS idx_wod_creation_t ON wod(creation_t);

-- =============================================================================
-- 3. Activities (date is Unix seconds, time_taken is seconds)
-- =============================================================================
CREATE TABLE IF NOT EXISTS activity (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
    wod_id INTEGER NOT NULL REFERENCES wod(id) ON DELETE CASCADE,
    date INTEGER NOT NULL,
    time_taken INTEGER NOT NULL CHECK(time_taken > 0),
    meps INTEGER,
    exertion INTEGER,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_activity_user_wod ON activity(user_id, wod_id);
CREATE INDEX IF NOT EXISTS idx_activity_user_date ON activity(user_id, date);
"#;
