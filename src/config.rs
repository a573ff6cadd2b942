//! YAML batch-configuration loading.
//!
//! Batch files hold an ordered list of record mappings under
//! `all_members_info`; field names match the record structs 1:1. Parse
//! errors are fatal and carry the parser's message; record validation
//! runs immediately after parsing, before any rendering.

use crate::decks::model::{AllCoreTeamMembersInfo, AllMembersInfo};
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Load and validate the joining-members batch configuration.
pub fn load_members<P: AsRef<Path>>(path: P) -> Result<AllMembersInfo> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let infos: AllMembersInfo =
        serde_saphyr::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
    infos.validate()?;
    debug!(
        path = %path.as_ref().display(),
        records = infos.all_members_info.len(),
        "loaded member config"
    );
    Ok(infos)
}

/// Load and validate the core-team batch configuration.
pub fn load_core_team<P: AsRef<Path>>(path: P) -> Result<AllCoreTeamMembersInfo> {
    let text = std::fs::read_to_string(path.as_ref())?;
    let infos: AllCoreTeamMembersInfo =
        serde_saphyr::from_str(&text).map_err(|e| Error::Config(e.to_string()))?;
    infos.validate()?;
    debug!(
        path = %path.as_ref().display(),
        records = infos.all_members_info.len(),
        "loaded core-team config"
    );
    Ok(infos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MEMBERS_YAML: &str = r#"
all_members_info:
  - member_name: Acme Corp
    member_join_month: September 2025
    member_gatherer_firstname: Jane
    member_gatherer_lastname: Doe
    member_gatherer_email: jane@acme.example
  - member_name: Banque du Nord
    member_join_month: October 2025
    member_gatherer_firstname: Luc
    member_gatherer_lastname: Martin
    member_gatherer_title_fr: Responsable IA
    member_gatherer_email: luc@bdn.example
"#;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_member_records_in_order() {
        let file = write_temp(MEMBERS_YAML);
        let infos = load_members(file.path()).unwrap();
        assert_eq!(infos.all_members_info.len(), 2);
        assert_eq!(infos.all_members_info[0].member_name, "Acme Corp");
        assert_eq!(infos.all_members_info[1].member_id(), "banque_du_nord");
        assert_eq!(
            infos.all_members_info[1].member_gatherer_title_fr,
            "Responsable IA"
        );
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let file = write_temp("all_members_info: [unclosed");
        assert!(matches!(
            load_members(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_record_fails_validation() {
        let yaml = r#"
all_members_info:
  - member_name: Acme Corp
    member_join_month: September 2025
    member_gatherer_firstname: Jane
    member_gatherer_lastname: Doe
    member_gatherer_email: not-an-email
"#;
        let file = write_temp(yaml);
        assert!(matches!(
            load_members(file.path()),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn core_team_config_round_trip() {
        let yaml = r#"
all_members_info:
  - ct_member_firstname: Ada
    ct_member_lastname: Lovelace
    ct_member_email: ada@example.org
    ct_member_is_board: true
  - ct_member_firstname: Alan
    ct_member_lastname: Turing
    ct_member_email: alan@example.org
    ct_member_is_board: false
"#;
        let file = write_temp(yaml);
        let infos = load_core_team(file.path()).unwrap();
        assert_eq!(infos.all_members_info.len(), 2);
        assert!(infos.all_members_info[0].ct_member_is_board);
        assert_eq!(infos.all_members_info[1].fullname(), "Alan Turing");
    }
}
