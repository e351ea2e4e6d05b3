//! PostgreSQL schema definitions

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Complete schema SQL
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    applied_at BIGINT NOT NULL,
    description TEXT
);

CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at BIGINT NOT NULL,
    checksum TEXT NOT NULL,
    execution_time_ms BIGINT,
    success BOOLEAN NOT NULL DEFAULT TRUE
);

CREATE TABLE IF NOT EXISTS "user" (
    id BIGSERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE CHECK (length(username) >= 1),
    password TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT 'user'
);

CREATE TABLE IF NOT EXISTS wod (
    id BIGSERIAL PRIMARY KEY,
    source TEXT,
    creation_t BIGINT NOT NULL DEFAULT 0,
    wod TEXT,
    picture TEXT,
    type TEXT NOT NULL CHECK (length(type) >= 1),
    created_by BIGINT REFERENCES "user"(id) ON DELETE SET NULL
);

CREATE INDEX IF NOT EXISTS idx_wod_created_by ON wod(created_by);
CREATE INDEX IF NOT EXISTS idx_wod_creation_t ON wod(creation_t);

CREATE TABLE IF NOT EXISTS activity (
    id BIGSERIAL PRIMARY KEY,
    user_id BIGINT NOT NULL REFERENCES "user"(id) ON DELETE CASCADE,
    wod_id BIGINT NOT NULL REFERENCES wod(id) ON DELETE CASCADE,
    date BIGINT NOT NULL,
    time_taken BIGINT NOT NULL CHECK (time_taken > 0),
    meps BIGINT,
    exertion BIGINT,
    notes TEXT
);

CREATE INDEX IF NOT EXISTS idx_activity_user_wod ON activity(user_id, wod_id);
CREATE INDEX IF NOT EXISTS idx_activity_user_date ON activity(user_id, date);
"#;
