//! Shared row types for both transactional backends

// ============================================================================
// User types
// ============================================================================

/// User row from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    /// Argon2id PHC string
    pub password_hash: String,
    pub role: String,
}

// ============================================================================
// WOD types
// ============================================================================

/// WOD row from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WodRow {
    pub id: i64,
    pub source: Option<String>,
    /// Unix seconds
    pub creation_t: i64,
    /// Exercise description (column `wod`)
    pub exercise: Option<String>,
    pub picture: Option<String>,
    pub wod_type: String,
}

/// WOD with the caller's attempt statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WodStatsRow {
    pub wod: WodRow,
    pub attempts: i64,
    /// Fastest time across the caller's activities
    pub best_time: Option<i64>,
}

/// WOD detail: statistics plus the caller's activities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WodWithActivities {
    pub stats: WodStatsRow,
    pub activities: Vec<ActivityRow>,
}

/// Fields for inserting a WOD
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewWod {
    pub source: Option<String>,
    pub creation_t: i64,
    pub exercise: Option<String>,
    pub picture: Option<String>,
    pub wod_type: String,
}

// ============================================================================
// Activity types
// ============================================================================

/// Activity row from database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityRow {
    pub id: i64,
    pub wod_id: i64,
    /// Unix seconds
    pub date: i64,
    pub time_taken: i64,
    pub meps: Option<i64>,
    pub exertion: Option<i64>,
    pub notes: Option<String>,
}

/// Activity joined with its WOD
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityWithWod {
    pub activity: ActivityRow,
    pub wod: WodRow,
}

/// Fields for inserting an activity (the WOD is passed separately)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewActivity {
    pub date: i64,
    pub time_taken: i64,
    pub meps: Option<i64>,
    pub exertion: Option<i64>,
    pub notes: Option<String>,
}

// ============================================================================
// Row tuples
// ============================================================================

/// `ACTIVITY_COLUMNS` as fetched by sqlx
pub(crate) type ActivityTuple = (
    i64,
    i64,
    i64,
    i64,
    Option<i64>,
    Option<i64>,
    Option<String>,
);

/// `WOD_COLUMNS` plus attempt count and best time
pub(crate) type WodStatsTuple = (
    i64,
    Option<String>,
    i64,
    Option<String>,
    Option<String>,
    String,
    i64,
    Option<i64>,
);

/// `ACTIVITY_COLUMNS` followed by `WOD_COLUMNS`
pub(crate) type ActivityWithWodTuple = (
    i64,
    i64,
    i64,
    i64,
    Option<i64>,
    Option<i64>,
    Option<String>,
    i64,
    Option<String>,
    i64,
    Option<String>,
    Option<String>,
    String,
);

/// `id, username, password, role`
pub(crate) type UserTuple = (i64, String, String, String);

impl From<ActivityTuple> for ActivityRow {
    fn from(row: ActivityTuple) -> Self {
        let (id, wod_id, date, time_taken, meps, exertion, notes) = row;
        Self {
            id,
            wod_id,
            date,
            time_taken,
            meps,
            exertion,
            notes,
        }
    }
}

impl From<WodStatsTuple> for WodStatsRow {
    fn from(row: WodStatsTuple) -> Self {
        let (id, source, creation_t, exercise, picture, wod_type, attempts, best_time) = row;
        Self {
            wod: WodRow {
                id,
                source,
                creation_t,
                exercise,
                picture,
                wod_type,
            },
            attempts,
            best_time,
        }
    }
}

impl From<ActivityWithWodTuple> for ActivityWithWod {
    fn from(row: ActivityWithWodTuple) -> Self {
        let (
            id,
            wod_id,
            date,
            time_taken,
            meps,
            exertion,
            notes,
            wod_row_id,
            source,
            creation_t,
            exercise,
            picture,
            wod_type,
        ) = row;
        Self {
            activity: ActivityRow {
                id,
                wod_id,
                date,
                time_taken,
                meps,
                exertion,
                notes,
            },
            wod: WodRow {
                id: wod_row_id,
                source,
                creation_t,
                exercise,
                picture,
                wod_type,
            },
        }
    }
}

impl From<UserTuple> for UserRow {
    fn from(row: UserTuple) -> Self {
        let (id, username, password_hash, role) = row;
        Self {
            id,
            username,
            password_hash,
            role,
        }
    }
}
