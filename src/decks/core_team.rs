//! Core-team deck: a cover, then board pages, then core-team pages.
//!
//! Board members and the rest of the core team are split into separate
//! page runs; both use the dense "facebook" layout of eight slots.

use crate::decks::ORG_NAME;
use crate::decks::language::Language;
use crate::decks::model::{AllCoreTeamMembersInfo, CoreTeamMemberInfo};
use crate::decks::page::{PageRenderer, PageSpec};
use crate::error::Result;
use crate::pptx::SlideEditor;
use chrono::Local;

/// Members per dense roster slide.
const MEMBERS_PER_SLIDE: usize = 8;

/// Placeholders per member slot in the dense layout.
const SHAPES_PER_MEMBER: usize = 4;

/// Cover, board pages of eight, then non-board pages of eight.
pub fn core_team_pages(infos: &AllCoreTeamMembersInfo, language: Language) -> Vec<PageSpec> {
    let mut pages = vec![PageSpec::new(
        "Diapositive titre (lapis)",
        CoreTeamCoverPage { language },
    )];

    let board: Vec<&CoreTeamMemberInfo> = infos
        .all_members_info
        .iter()
        .filter(|member| member.ct_member_is_board)
        .collect();
    let core_team: Vec<&CoreTeamMemberInfo> = infos
        .all_members_info
        .iter()
        .filter(|member| !member.ct_member_is_board)
        .collect();

    let board_title = match language {
        Language::Fr => format!("Conseil d'administration {}", ORG_NAME),
        Language::En => format!("{} board", ORG_NAME),
    };
    let core_title = match language {
        Language::Fr => format!("Core Team {}", ORG_NAME),
        Language::En => format!("{} Core Team", ORG_NAME),
    };

    for group in board.chunks(MEMBERS_PER_SLIDE) {
        pages.push(PageSpec::new(
            "facebook-slide-dense",
            CoreTeamRosterPage {
                members: group.iter().map(|m| (*m).clone()).collect(),
                title: board_title.clone(),
                language,
            },
        ));
    }
    for group in core_team.chunks(MEMBERS_PER_SLIDE) {
        pages.push(PageSpec::new(
            "facebook-slide-dense",
            CoreTeamRosterPage {
                members: group.iter().map(|m| (*m).clone()).collect(),
                title: core_title.clone(),
                language,
            },
        ));
    }

    pages
}

/// Title slide with the generation date.
struct CoreTeamCoverPage {
    language: Language,
}

impl PageRenderer for CoreTeamCoverPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        let today = Local::now().format("%b %d, %Y").to_string();
        editor.replace_text("Subtitle 2", &today)?;

        let title = match self.language {
            Language::Fr => format!("Conseil d'administration et Core Team {}", ORG_NAME),
            Language::En => format!("{} Board and Core Team", ORG_NAME),
        };
        editor.replace_text("Title 1", &title)?;
        Ok(())
    }
}

/// One dense roster slide of up to eight core-team members.
struct CoreTeamRosterPage {
    members: Vec<CoreTeamMemberInfo>,
    title: String,
    language: Language,
}

impl PageRenderer for CoreTeamRosterPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        editor.replace_text("Title 1", &self.title)?;

        // Slot placeholders are numbered 2..5, 6..9, ...
        let start_num = 1usize;
        for (index, member) in self.members.iter().enumerate() {
            let shape_num = start_num + SHAPES_PER_MEMBER * index;

            if let Some(photo) = &member.ct_member_photo_path {
                editor.place_image(
                    &format!("Picture Placeholder {}", shape_num + 1),
                    photo,
                    false,
                    false,
                )?;
            }
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 2),
                &member.fullname(),
            )?;
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 3),
                member.title(self.language),
            )?;
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 4),
                &member.ct_member_email,
            )?;
        }

        editor.remove_empty_placeholders()?;
        Ok(())
    }
}
