//! Record types describing one onboarding subject.
//!
//! Records arrive either from CLI flags or from a YAML batch file; both
//! paths validate before any rendering starts, so a bad email or a missing
//! name never aborts a half-written deck.

use crate::decks::language::Language;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// A member company joining the organization, with its assigned gatherer.
#[derive(Debug, Clone, Deserialize)]
pub struct MemberInfo {
    pub member_name: String,
    pub member_join_month: String,
    #[serde(default)]
    pub member_logo_path: Option<PathBuf>,
    pub member_gatherer_firstname: String,
    pub member_gatherer_lastname: String,
    #[serde(default)]
    pub member_gatherer_title_fr: String,
    #[serde(default)]
    pub member_gatherer_title_en: String,
    #[serde(default)]
    pub member_gatherer_desc_fr: String,
    #[serde(default)]
    pub member_gatherer_desc_en: String,
    pub member_gatherer_email: String,
    #[serde(default)]
    pub member_gatherer_photo_path: Option<PathBuf>,
}

impl MemberInfo {
    /// Check required fields and email shape; fails before any rendering.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("member_name", &self.member_name)?;
        require_non_empty("member_join_month", &self.member_join_month)?;
        require_non_empty(
            "member_gatherer_firstname",
            &self.member_gatherer_firstname,
        )?;
        require_non_empty("member_gatherer_lastname", &self.member_gatherer_lastname)?;
        require_email("member_gatherer_email", &self.member_gatherer_email)?;
        Ok(())
    }

    /// Filesystem-safe identifier derived from the display name.
    ///
    /// Lowercase with spaces turned into underscores; deriving again from
    /// the result is a no-op.
    pub fn member_id(&self) -> String {
        derive_id(&self.member_name)
    }

    /// The gatherer's display name.
    pub fn gatherer_fullname(&self) -> String {
        format!(
            "{} {}",
            self.member_gatherer_firstname, self.member_gatherer_lastname
        )
    }

    /// The gatherer's title in the given language.
    pub fn gatherer_title(&self, language: Language) -> &str {
        match language {
            Language::Fr => &self.member_gatherer_title_fr,
            Language::En => &self.member_gatherer_title_en,
        }
    }

    /// The gatherer's description in the given language.
    pub fn gatherer_desc(&self, language: Language) -> &str {
        match language {
            Language::Fr => &self.member_gatherer_desc_fr,
            Language::En => &self.member_gatherer_desc_en,
        }
    }
}

/// One member of the organization's core team or board.
#[derive(Debug, Clone, Deserialize)]
pub struct CoreTeamMemberInfo {
    pub ct_member_firstname: String,
    pub ct_member_lastname: String,
    #[serde(default)]
    pub ct_member_title_fr: String,
    #[serde(default)]
    pub ct_member_title_en: String,
    pub ct_member_email: String,
    #[serde(default)]
    pub ct_member_photo_path: Option<PathBuf>,
    pub ct_member_is_board: bool,
}

impl CoreTeamMemberInfo {
    /// Check required fields and email shape; fails before any rendering.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("ct_member_firstname", &self.ct_member_firstname)?;
        require_non_empty("ct_member_lastname", &self.ct_member_lastname)?;
        require_email("ct_member_email", &self.ct_member_email)?;
        Ok(())
    }

    /// The member's display name.
    pub fn fullname(&self) -> String {
        format!("{} {}", self.ct_member_firstname, self.ct_member_lastname)
    }

    /// The member's title in the given language.
    pub fn title(&self, language: Language) -> &str {
        match language {
            Language::Fr => &self.ct_member_title_fr,
            Language::En => &self.ct_member_title_en,
        }
    }
}

/// Batch-configuration root: all joining members, in display order.
#[derive(Debug, Clone, Deserialize)]
pub struct AllMembersInfo {
    pub all_members_info: Vec<MemberInfo>,
}

impl AllMembersInfo {
    pub fn validate(&self) -> Result<()> {
        for member in &self.all_members_info {
            member.validate()?;
        }
        Ok(())
    }
}

/// Batch-configuration root: the full core team, in display order.
#[derive(Debug, Clone, Deserialize)]
pub struct AllCoreTeamMembersInfo {
    pub all_members_info: Vec<CoreTeamMemberInfo>,
}

impl AllCoreTeamMembersInfo {
    pub fn validate(&self) -> Result<()> {
        for member in &self.all_members_info {
            member.validate()?;
        }
        Ok(())
    }
}

/// Lowercase the name and replace spaces with underscores.
fn derive_id(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> Result<()> {
    if !is_well_formed_email(value) {
        return Err(Error::Validation(format!(
            "{} is not a well-formed email address: '{}'",
            field, value
        )));
    }
    Ok(())
}

/// Structural email check: one `@`, non-empty local part, dotted domain
/// with non-empty labels, no whitespace.
fn is_well_formed_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn member(name: &str, email: &str) -> MemberInfo {
        MemberInfo {
            member_name: name.to_string(),
            member_join_month: "September 2025".to_string(),
            member_logo_path: None,
            member_gatherer_firstname: "Jane".to_string(),
            member_gatherer_lastname: "Doe".to_string(),
            member_gatherer_title_fr: "Responsable IA".to_string(),
            member_gatherer_title_en: "Head of AI".to_string(),
            member_gatherer_desc_fr: String::new(),
            member_gatherer_desc_en: String::new(),
            member_gatherer_email: email.to_string(),
            member_gatherer_photo_path: None,
        }
    }

    #[test]
    fn member_id_derivation() {
        assert_eq!(member("Acme Corp", "a@b.co").member_id(), "acme_corp");
        assert_eq!(
            member("Banque du Nord SA", "a@b.co").member_id(),
            "banque_du_nord_sa"
        );
    }

    #[test]
    fn well_formed_emails_pass() {
        assert!(member("Acme", "a@b.co").validate().is_ok());
        assert!(member("Acme", "jane.doe+tag@sub.example.org").validate().is_ok());
    }

    #[test]
    fn malformed_emails_fail() {
        for email in ["", "plainaddress", "a@b", "a@.co", "a@b..co", "a b@c.co", "@b.co"] {
            assert!(
                member("Acme", email).validate().is_err(),
                "accepted '{}'",
                email
            );
        }
    }

    #[test]
    fn empty_required_fields_fail() {
        assert!(member("", "a@b.co").validate().is_err());
        let mut m = member("Acme", "a@b.co");
        m.member_gatherer_firstname = "  ".to_string();
        assert!(m.validate().is_err());
    }

    #[test]
    fn localized_accessors_pick_language() {
        let m = member("Acme", "a@b.co");
        assert_eq!(m.gatherer_title(Language::Fr), "Responsable IA");
        assert_eq!(m.gatherer_title(Language::En), "Head of AI");
        assert_eq!(m.gatherer_fullname(), "Jane Doe");
    }

    proptest! {
        #[test]
        fn member_id_is_idempotent(name in "[A-Za-z0-9 ]{1,40}") {
            let id = derive_id(&name);
            prop_assert_eq!(derive_id(&id), id.clone());
            prop_assert!(!id.contains(' '));
        }
    }
}
