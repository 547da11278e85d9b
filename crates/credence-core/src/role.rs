//! Roles and the per-role participation records that join users to cases.
//!
//! The role set is closed. Each variant maps to exactly one storage target
//! through [`RoleKind::table`]; no table name is ever derived from user input.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::Error;

// ─── RoleKind ────────────────────────────────────────────────────────────────

/// The fixed set of roles a user can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleKind {
  Admin,
  Witness,
  Suspect,
  LawEnforcer,
}

impl RoleKind {
  pub const ALL: [RoleKind; 4] = [
    RoleKind::Admin,
    RoleKind::Witness,
    RoleKind::Suspect,
    RoleKind::LawEnforcer,
  ];

  /// Display name as stored in the `Role` reference table.
  pub fn name(self) -> &'static str {
    match self {
      Self::Admin => "Admin",
      Self::Witness => "Witness",
      Self::Suspect => "Suspect",
      Self::LawEnforcer => "Law Enforcer",
    }
  }

  /// The table holding participation records for this role.
  pub fn table(self) -> &'static str {
    match self {
      Self::Admin => "Admin",
      Self::Witness => "Witness",
      Self::Suspect => "Suspect",
      Self::LawEnforcer => "LawEnforcer",
    }
  }

  /// Primary-key column of [`Self::table`].
  pub fn id_column(self) -> &'static str {
    match self {
      Self::Admin => "AdminID",
      Self::Witness => "WitnessID",
      Self::Suspect => "SuspectID",
      Self::LawEnforcer => "EnforcerID",
    }
  }

  /// The serde tag, as used in JSON bodies.
  pub fn tag(self) -> &'static str {
    match self {
      Self::Admin => "admin",
      Self::Witness => "witness",
      Self::Suspect => "suspect",
      Self::LawEnforcer => "law_enforcer",
    }
  }

  /// Whether records for this role are attached to a case.
  pub fn is_case_scoped(self) -> bool { !matches!(self, Self::Admin) }
}

impl fmt::Display for RoleKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

impl FromStr for RoleKind {
  type Err = Error;

  /// Accepts the display name (`"Law Enforcer"`) or the serde tag
  /// (`"law_enforcer"`).
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RoleKind::ALL
      .into_iter()
      .find(|k| k.name() == s || k.tag() == s)
      .ok_or_else(|| Error::UnknownRole(s.to_owned()))
  }
}

/// A row of the static `Role` reference table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
  pub role_id: i64,
  pub kind:    RoleKind,
}

// ─── Participation ───────────────────────────────────────────────────────────

/// A user's involvement in a single case under a case-scoped role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseParticipant {
  pub participant_id: i64,
  pub user_id:        i64,
  pub case_id:        i64,
  pub gender:         Option<String>,
}

/// An administrator record. Administrators are not attached to cases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminRecord {
  pub admin_id: i64,
  pub user_id:  i64,
}

/// A participation record, tagged by role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", content = "record", rename_all = "snake_case")]
pub enum Participation {
  Admin(AdminRecord),
  Witness(CaseParticipant),
  Suspect(CaseParticipant),
  LawEnforcer(CaseParticipant),
}

impl Participation {
  /// Wrap a case participant in the variant for `role`.
  ///
  /// Fails for [`RoleKind::Admin`], which has no case-scoped records.
  pub fn for_case(role: RoleKind, record: CaseParticipant) -> crate::Result<Self> {
    match role {
      RoleKind::Witness => Ok(Self::Witness(record)),
      RoleKind::Suspect => Ok(Self::Suspect(record)),
      RoleKind::LawEnforcer => Ok(Self::LawEnforcer(record)),
      RoleKind::Admin => Err(Error::NotCaseScoped(role)),
    }
  }

  pub fn role(&self) -> RoleKind {
    match self {
      Self::Admin(_) => RoleKind::Admin,
      Self::Witness(_) => RoleKind::Witness,
      Self::Suspect(_) => RoleKind::Suspect,
      Self::LawEnforcer(_) => RoleKind::LawEnforcer,
    }
  }

  pub fn user_id(&self) -> i64 {
    match self {
      Self::Admin(a) => a.user_id,
      Self::Witness(p) | Self::Suspect(p) | Self::LawEnforcer(p) => p.user_id,
    }
  }

  /// The case this record belongs to, if the role is case-scoped.
  pub fn case_id(&self) -> Option<i64> {
    match self {
      Self::Admin(_) => None,
      Self::Witness(p) | Self::Suspect(p) | Self::LawEnforcer(p) => {
        Some(p.case_id)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn role_names_round_trip() {
    for kind in RoleKind::ALL {
      assert_eq!(kind.name().parse::<RoleKind>().unwrap(), kind);
    }
  }

  #[test]
  fn serde_tag_parses() {
    assert_eq!(
      "law_enforcer".parse::<RoleKind>().unwrap(),
      RoleKind::LawEnforcer
    );
    let json = serde_json::to_string(&RoleKind::LawEnforcer).unwrap();
    assert_eq!(json, "\"law_enforcer\"");
  }

  #[test]
  fn unknown_role_rejected() {
    let err = "Detective".parse::<RoleKind>().unwrap_err();
    assert!(matches!(err, Error::UnknownRole(ref s) if s == "Detective"));
  }

  #[test]
  fn table_mapping_is_fixed() {
    assert_eq!(RoleKind::LawEnforcer.table(), "LawEnforcer");
    assert_eq!(RoleKind::LawEnforcer.name(), "Law Enforcer");
    assert!(!RoleKind::Admin.is_case_scoped());
    assert!(RoleKind::Suspect.is_case_scoped());
  }

  #[test]
  fn admin_participation_is_not_case_scoped() {
    let record = CaseParticipant {
      participant_id: 1,
      user_id:        2,
      case_id:        3,
      gender:         None,
    };
    let err = Participation::for_case(RoleKind::Admin, record.clone()).unwrap_err();
    assert!(matches!(err, Error::NotCaseScoped(RoleKind::Admin)));

    let p = Participation::for_case(RoleKind::Witness, record).unwrap();
    assert_eq!(p.role(), RoleKind::Witness);
    assert_eq!(p.case_id(), Some(3));
    assert_eq!(p.user_id(), 2);
  }
}
