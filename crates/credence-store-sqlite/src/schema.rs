//! SQL schema for the Credence SQLite store.
//!
//! [`SCHEMA`] creates the version 1 tables and is executed at every connection
//! startup. [`MIGRATIONS`] then bring the file up to the current version,
//! gated on `PRAGMA user_version`.

/// Version 1 DDL; idempotent thanks to `IF NOT EXISTS` / `OR IGNORE`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS Role (
    RoleID    INTEGER PRIMARY KEY AUTOINCREMENT,
    RoleName  TEXT NOT NULL UNIQUE
);

-- Static reference set; never mutated after this point.
INSERT OR IGNORE INTO Role (RoleID, RoleName) VALUES
    (1, 'Admin'),
    (2, 'Witness'),
    (3, 'Suspect'),
    (4, 'Law Enforcer');

CREATE TABLE IF NOT EXISTS User (
    UserID     INTEGER PRIMARY KEY AUTOINCREMENT,
    FirstName  TEXT NOT NULL,
    LastName   TEXT NOT NULL,
    Email      TEXT NOT NULL UNIQUE,
    Password   TEXT NOT NULL,     -- opaque credential (argon2 PHC string)
    RoleID     INTEGER REFERENCES Role(RoleID),
    CreatedAt  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Cases (
    CaseID           INTEGER PRIMARY KEY AUTOINCREMENT,
    CaseDescription  TEXT NOT NULL,
    CreatedAt        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS Witness (
    WitnessID  INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID     INTEGER NOT NULL REFERENCES User(UserID),
    CaseID     INTEGER NOT NULL REFERENCES Cases(CaseID),
    Gender     TEXT
);

CREATE TABLE IF NOT EXISTS Suspect (
    SuspectID  INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID     INTEGER NOT NULL REFERENCES User(UserID),
    CaseID     INTEGER NOT NULL REFERENCES Cases(CaseID),
    Gender     TEXT
);

CREATE TABLE IF NOT EXISTS LawEnforcer (
    EnforcerID  INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID      INTEGER NOT NULL REFERENCES User(UserID),
    CaseID      INTEGER NOT NULL REFERENCES Cases(CaseID),
    Gender      TEXT
);

CREATE TABLE IF NOT EXISTS Admin (
    AdminID  INTEGER PRIMARY KEY AUTOINCREMENT,
    UserID   INTEGER NOT NULL REFERENCES User(UserID)
);

-- Append-only status history; no fixed state machine.
CREATE TABLE IF NOT EXISTS CaseProgress (
    ProgressID  INTEGER PRIMARY KEY AUTOINCREMENT,
    CaseID      INTEGER NOT NULL REFERENCES Cases(CaseID),
    Progress    TEXT NOT NULL,
    RecordedAt  TEXT NOT NULL
);

-- Statements are append-only; positions are dense per (person, case).
CREATE TABLE IF NOT EXISTS Statement (
    StatementID  TEXT PRIMARY KEY,
    PersonID     INTEGER NOT NULL REFERENCES User(UserID),
    CaseID       INTEGER NOT NULL REFERENCES Cases(CaseID),
    Position     INTEGER NOT NULL,
    Text         TEXT NOT NULL,
    RecordedAt   TEXT NOT NULL,
    UNIQUE (PersonID, CaseID, Position)
);

-- Derived scores, overwritten on recomputation. Not foreign-keyed.
CREATE TABLE IF NOT EXISTS StatementScore (
    PersonID          INTEGER NOT NULL,
    CaseID            INTEGER NOT NULL,
    Position          INTEGER NOT NULL,
    EmotionScore      REAL NOT NULL,
    ConsistencyScore  REAL,
    ConfidenceScore   REAL,
    Cooperation       TEXT NOT NULL,   -- 'cooperative' | 'non_cooperative'
    RecordedAt        TEXT NOT NULL,
    PRIMARY KEY (PersonID, CaseID, Position)
);

CREATE INDEX IF NOT EXISTS witness_case_idx     ON Witness(CaseID);
CREATE INDEX IF NOT EXISTS suspect_case_idx     ON Suspect(CaseID);
CREATE INDEX IF NOT EXISTS enforcer_case_idx    ON LawEnforcer(CaseID);
CREATE INDEX IF NOT EXISTS progress_case_idx    ON CaseProgress(CaseID);
";

/// `(version, DDL)` steps applied in order to files below `version`.
pub const MIGRATIONS: &[(i64, &str)] = &[
  // Interview prompt answered by the statement, if any.
  (2, "ALTER TABLE Statement ADD COLUMN Question TEXT;"),
];
