//! [`SqliteStore`], the SQLite implementation of [`WorkflowStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use credence_core::{
  case::{Case, CaseProgress},
  role::{AdminRecord, CaseParticipant, Participation, Role, RoleKind},
  score::{NewScore, ScoreRecord},
  statement::{NewStatement, Statement},
  store::WorkflowStore,
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    RawCase, RawProgress, RawScore, RawStatement, RawUser, encode_cooperation,
    encode_dt, encode_uuid,
  },
  schema::{MIGRATIONS, SCHEMA},
};

const USER_SELECT: &str = "
  SELECT u.UserID, u.FirstName, u.LastName, u.Email, u.Password,
         r.RoleName, u.CreatedAt
  FROM User u
  LEFT JOIN Role r ON r.RoleID = u.RoleID";

const SCORE_SELECT: &str = "
  SELECT PersonID, CaseID, Position, EmotionScore, ConsistencyScore,
         ConfidenceScore, Cooperation, RecordedAt
  FROM StatementScore";

fn user_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawUser> {
  Ok(RawUser {
    user_id:    row.get(0)?,
    first_name: row.get(1)?,
    last_name:  row.get(2)?,
    email:      row.get(3)?,
    credential: row.get(4)?,
    role_name:  row.get(5)?,
    created_at: row.get(6)?,
  })
}

fn case_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawCase> {
  Ok(RawCase {
    case_id:     row.get(0)?,
    description: row.get(1)?,
    created_at:  row.get(2)?,
  })
}

fn statement_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawStatement> {
  Ok(RawStatement {
    statement_id: row.get(0)?,
    person_id:    row.get(1)?,
    case_id:      row.get(2)?,
    position:     row.get(3)?,
    text:         row.get(4)?,
    recorded_at:  row.get(5)?,
    question:     row.get(6)?,
  })
}

fn score_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawScore> {
  Ok(RawScore {
    person_id:   row.get(0)?,
    case_id:     row.get(1)?,
    position:    row.get(2)?,
    emotion:     row.get(3)?,
    consistency: row.get(4)?,
    confidence:  row.get(5)?,
    cooperation: row.get(6)?,
    recorded_at: row.get(7)?,
  })
}

/// Case-scoped participation rows for `role` matching `filter` (`CaseID` or
/// `UserID`).
fn participant_rows(
  conn: &rusqlite::Connection,
  role: RoleKind,
  filter: &'static str,
  id: i64,
) -> rusqlite::Result<Vec<(RoleKind, CaseParticipant)>> {
  let sql = format!(
    "SELECT {id_col}, UserID, CaseID, Gender FROM {table} WHERE {filter} = ?1 ORDER BY {id_col}",
    id_col = role.id_column(),
    table = role.table(),
  );
  let mut stmt = conn.prepare(&sql)?;
  stmt
    .query_map(rusqlite::params![id], |row| {
      Ok((role, CaseParticipant {
        participant_id: row.get(0)?,
        user_id:        row.get(1)?,
        case_id:        row.get(2)?,
        gender:         row.get(3)?,
      }))
    })?
    .collect()
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Credence workflow store backed by a single SQLite file.
///
/// Clones share the inner connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    let version = self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        let tx = conn.transaction()?;
        let mut version: i64 =
          tx.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        for (target, ddl) in MIGRATIONS {
          if version < *target {
            tx.execute_batch(ddl)?;
            tx.pragma_update(None, "user_version", target)?;
            version = *target;
          }
        }
        tx.commit()?;
        Ok(version)
      })
      .await?;
    tracing::debug!(version, "schema ready");
    Ok(())
  }

  async fn fetch_user(
    &self,
    filter: &'static str,
    param: Value,
  ) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        let sql = format!("{USER_SELECT} WHERE {filter} ORDER BY u.UserID LIMIT 1");
        Ok(
          conn
            .query_row(&sql, rusqlite::params![param], user_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn require_user(&self, user_id: i64) -> Result<()> {
    match self.get_user(user_id).await? {
      Some(_) => Ok(()),
      None => Err(Error::UserNotFound(user_id)),
    }
  }

  async fn require_case(&self, case_id: i64) -> Result<()> {
    match self.get_case(case_id).await? {
      Some(_) => Ok(()),
      None => Err(Error::CaseNotFound(case_id)),
    }
  }
}

// ─── WorkflowStore impl ──────────────────────────────────────────────────────

impl WorkflowStore for SqliteStore {
  type Error = Error;

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn list_roles(&self) -> Result<Vec<Role>> {
    let rows: Vec<(i64, String)> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT RoleID, RoleName FROM Role ORDER BY RoleID")?;
        let rows = stmt
          .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    rows
      .into_iter()
      .map(|(role_id, name)| -> Result<Role> {
        Ok(Role { role_id, kind: name.parse()? })
      })
      .collect()
  }

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let role_name  = input.role.map(RoleKind::name);
    let is_admin   = input.role == Some(RoleKind::Admin);

    let first = input.first_name.clone();
    let last  = input.last_name.clone();
    let email = input.email.clone();
    let cred  = input.credential.clone();

    // The duplicate check and both inserts run in one transaction on the
    // connection thread, so concurrent signups cannot interleave.
    let user_id: Option<i64> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let taken = tx
          .query_row(
            "SELECT 1 FROM User WHERE Email = ?1",
            rusqlite::params![email],
            |_| Ok(()),
          )
          .optional()?
          .is_some();
        if taken {
          return Ok(None);
        }

        tx.execute(
          "INSERT INTO User (FirstName, LastName, Email, Password, RoleID, CreatedAt)
           VALUES (?1, ?2, ?3, ?4, (SELECT RoleID FROM Role WHERE RoleName = ?5), ?6)",
          rusqlite::params![first, last, email, cred, role_name, at_str],
        )?;
        let user_id = tx.last_insert_rowid();

        if is_admin {
          tx.execute(
            "INSERT INTO Admin (UserID) VALUES (?1)",
            rusqlite::params![user_id],
          )?;
        }
        tx.commit()?;
        Ok(Some(user_id))
      })
      .await?;

    let Some(user_id) = user_id else {
      return Err(Error::EmailTaken(input.email));
    };
    tracing::info!(user_id, role = ?input.role, "user registered");

    Ok(User {
      user_id,
      first_name: input.first_name,
      last_name: input.last_name,
      email: input.email,
      credential: input.credential,
      role: input.role,
      created_at,
    })
  }

  async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
    self.fetch_user("u.UserID = ?1", Value::Integer(user_id)).await
  }

  async fn find_user_by_email(&self, email: String) -> Result<Option<User>> {
    self.fetch_user("u.Email = ?1", Value::Text(email)).await
  }

  async fn find_user_by_name(&self, full_name: String) -> Result<Option<User>> {
    self
      .fetch_user(
        "u.FirstName || ' ' || u.LastName = ?1",
        Value::Text(full_name),
      )
      .await
  }

  // ── Cases ─────────────────────────────────────────────────────────────────

  async fn add_case(&self, description: String) -> Result<Case> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let desc       = description.clone();

    let case_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO Cases (CaseDescription, CreatedAt) VALUES (?1, ?2)",
          rusqlite::params![desc, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(case_id, "case opened");
    Ok(Case { case_id, description, created_at })
  }

  async fn get_case(&self, case_id: i64) -> Result<Option<Case>> {
    let raw: Option<RawCase> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT CaseID, CaseDescription, CreatedAt FROM Cases WHERE CaseID = ?1",
              rusqlite::params![case_id],
              case_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCase::into_case).transpose()
  }

  async fn list_cases(&self) -> Result<Vec<Case>> {
    let raws: Vec<RawCase> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT CaseID, CaseDescription, CreatedAt FROM Cases ORDER BY CaseID",
        )?;
        let rows = stmt
          .query_map([], case_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCase::into_case).collect()
  }

  async fn add_progress(&self, case_id: i64, progress: String) -> Result<CaseProgress> {
    self.require_case(case_id).await?;

    let recorded_at = Utc::now();
    let at_str      = encode_dt(recorded_at);
    let text        = progress.clone();

    let progress_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO CaseProgress (CaseID, Progress, RecordedAt) VALUES (?1, ?2, ?3)",
          rusqlite::params![case_id, text, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(CaseProgress { progress_id, case_id, progress, recorded_at })
  }

  async fn list_progress(&self, case_id: i64) -> Result<Vec<CaseProgress>> {
    let raws: Vec<RawProgress> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT ProgressID, CaseID, Progress, RecordedAt
           FROM CaseProgress WHERE CaseID = ?1 ORDER BY ProgressID",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![case_id], |row| {
            Ok(RawProgress {
              progress_id: row.get(0)?,
              case_id:     row.get(1)?,
              progress:    row.get(2)?,
              recorded_at: row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProgress::into_progress).collect()
  }

  // ── Participation ─────────────────────────────────────────────────────────

  async fn add_participation(
    &self,
    role:        RoleKind,
    person_name: String,
    case_id:     i64,
    gender:      Option<String>,
  ) -> Result<Participation> {
    if !role.is_case_scoped() {
      return Err(credence_core::Error::NotCaseScoped(role).into());
    }

    let user = self
      .find_user_by_name(person_name.clone())
      .await?
      .ok_or(Error::PersonNotFound(person_name))?;
    self.require_case(case_id).await?;

    let user_id = user.user_id;
    let g       = gender.clone();
    let sql     = format!(
      "INSERT INTO {} (UserID, CaseID, Gender) VALUES (?1, ?2, ?3)",
      role.table()
    );

    let participant_id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(&sql, rusqlite::params![user_id, case_id, g])?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    tracing::info!(%role, user_id, case_id, "participant added");
    Ok(Participation::for_case(role, CaseParticipant {
      participant_id,
      user_id,
      case_id,
      gender,
    })?)
  }

  async fn list_participants(&self, case_id: i64) -> Result<Vec<Participation>> {
    let rows: Vec<(RoleKind, CaseParticipant)> = self
      .conn
      .call(move |conn| {
        let mut out = Vec::new();
        for role in RoleKind::ALL.into_iter().filter(|r| r.is_case_scoped()) {
          out.extend(participant_rows(conn, role, "CaseID", case_id)?);
        }
        Ok(out)
      })
      .await?;

    rows
      .into_iter()
      .map(|(role, record)| -> Result<Participation> {
        Ok(Participation::for_case(role, record)?)
      })
      .collect()
  }

  async fn participations_for_user(&self, user_id: i64) -> Result<Vec<Participation>> {
    let (admins, rows): (Vec<AdminRecord>, Vec<(RoleKind, CaseParticipant)>) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT AdminID, UserID FROM Admin WHERE UserID = ?1 ORDER BY AdminID",
        )?;
        let admins = stmt
          .query_map(rusqlite::params![user_id], |row| {
            Ok(AdminRecord { admin_id: row.get(0)?, user_id: row.get(1)? })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for role in RoleKind::ALL.into_iter().filter(|r| r.is_case_scoped()) {
          rows.extend(participant_rows(conn, role, "UserID", user_id)?);
        }
        Ok((admins, rows))
      })
      .await?;

    let mut out: Vec<Participation> =
      admins.into_iter().map(Participation::Admin).collect();
    for (role, record) in rows {
      out.push(Participation::for_case(role, record)?);
    }
    Ok(out)
  }

  // ── Statements ────────────────────────────────────────────────────────────

  async fn add_statement(&self, input: NewStatement) -> Result<Statement> {
    self.require_user(input.person_id).await?;
    self.require_case(input.case_id).await?;

    let statement_id = Uuid::new_v4();
    let recorded_at  = Utc::now();
    let id_str       = encode_uuid(statement_id);
    let at_str       = encode_dt(recorded_at);
    let person_id    = input.person_id;
    let case_id      = input.case_id;
    let text         = input.text.clone();
    let question     = input.question.clone();

    let position: u32 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let position: u32 = tx.query_row(
          "SELECT COALESCE(MAX(Position), 0) + 1 FROM Statement
           WHERE PersonID = ?1 AND CaseID = ?2",
          rusqlite::params![person_id, case_id],
          |r| r.get(0),
        )?;
        tx.execute(
          "INSERT INTO Statement (
             StatementID, PersonID, CaseID, Position, Text, RecordedAt, Question
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str, person_id, case_id, position, text, at_str, question
          ],
        )?;
        tx.commit()?;
        Ok(position)
      })
      .await?;

    Ok(Statement {
      statement_id,
      person_id,
      case_id,
      position,
      question: input.question,
      text: input.text,
      recorded_at,
    })
  }

  async fn get_statements_for(
    &self,
    person_id: i64,
    case_id:   i64,
  ) -> Result<Vec<Statement>> {
    let raws: Vec<RawStatement> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT StatementID, PersonID, CaseID, Position, Text, RecordedAt,
                  Question
           FROM Statement
           WHERE PersonID = ?1 AND CaseID = ?2
           ORDER BY Position",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_id, case_id], statement_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawStatement::into_statement).collect()
  }

  // ── Scores ────────────────────────────────────────────────────────────────

  async fn record_score(&self, input: NewScore) -> Result<ScoreRecord> {
    let recorded_at = Utc::now();
    let at_str      = encode_dt(recorded_at);
    let ev          = input.evaluation;
    let coop_str    = encode_cooperation(ev.cooperation);
    let NewScore { person_id, case_id, position, .. } = input;

    // Single upsert statement: atomic, last writer wins.
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO StatementScore (
             PersonID, CaseID, Position, EmotionScore, ConsistencyScore,
             ConfidenceScore, Cooperation, RecordedAt
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT (PersonID, CaseID, Position) DO UPDATE SET
             EmotionScore     = excluded.EmotionScore,
             ConsistencyScore = excluded.ConsistencyScore,
             ConfidenceScore  = excluded.ConfidenceScore,
             Cooperation      = excluded.Cooperation,
             RecordedAt       = excluded.RecordedAt",
          rusqlite::params![
            person_id,
            case_id,
            position,
            ev.emotion_score,
            ev.consistency_score,
            ev.confidence_score,
            coop_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(person_id, case_id, position, "score recorded");
    Ok(ScoreRecord { person_id, case_id, position, evaluation: ev, recorded_at })
  }

  async fn get_score(
    &self,
    person_id: i64,
    case_id:   i64,
    position:  u32,
  ) -> Result<Option<ScoreRecord>> {
    let raw: Option<RawScore> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{SCORE_SELECT} WHERE PersonID = ?1 AND CaseID = ?2 AND Position = ?3"
        );
        Ok(
          conn
            .query_row(&sql, rusqlite::params![person_id, case_id, position], score_row)
            .optional()?,
        )
      })
      .await?;

    raw.map(RawScore::into_record).transpose()
  }

  async fn list_scores(&self, person_id: i64, case_id: i64) -> Result<Vec<ScoreRecord>> {
    let raws: Vec<RawScore> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "{SCORE_SELECT} WHERE PersonID = ?1 AND CaseID = ?2 ORDER BY Position"
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params![person_id, case_id], score_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawScore::into_record).collect()
  }
}
