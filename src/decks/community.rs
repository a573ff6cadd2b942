//! Community deck: a cover followed by gatherer roster pages.
//!
//! The roster layout carries a fixed grid of four member slots, each a
//! numbered group of six placeholders; members beyond four paginate onto
//! further roster slides.

use crate::decks::ORG_NAME;
use crate::decks::language::Language;
use crate::decks::model::{AllMembersInfo, MemberInfo};
use crate::decks::page::{PageRenderer, PageSpec};
use crate::error::Result;
use crate::pptx::SlideEditor;
use chrono::Local;

/// Members per roster slide.
const MEMBERS_PER_SLIDE: usize = 4;

/// Placeholders per member slot in the roster layout.
const SHAPES_PER_MEMBER: usize = 6;

/// Cover plus one roster page per group of four members.
pub fn community_pages(infos: &AllMembersInfo, language: Language) -> Vec<PageSpec> {
    let mut pages = vec![PageSpec::new(
        "Diapositive titre (lapis)",
        CommunityCoverPage { language },
    )];

    for group in infos.all_members_info.chunks(MEMBERS_PER_SLIDE) {
        pages.push(PageSpec::new(
            "trombi-slide",
            GathererRosterPage {
                members: group.to_vec(),
                language,
            },
        ));
    }

    pages
}

/// Title slide with the generation date.
struct CommunityCoverPage {
    language: Language,
}

impl PageRenderer for CommunityCoverPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        let today = Local::now().format("%b %d, %Y").to_string();
        editor.replace_text("Subtitle 2", &today)?;

        let title = match self.language {
            Language::Fr => format!("Communauté {}", ORG_NAME),
            Language::En => format!("{} Community", ORG_NAME),
        };
        editor.replace_text("Title 1", &title)?;
        Ok(())
    }
}

/// One roster slide of up to four members with their gatherers.
struct GathererRosterPage {
    members: Vec<MemberInfo>,
    language: Language,
}

impl PageRenderer for GathererRosterPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        let title = match self.language {
            Language::Fr => format!("Communauté {} - Référents Entreprise", ORG_NAME),
            Language::En => format!("{} Community - Gatherers", ORG_NAME),
        };
        editor.replace_text("Title 1", &title)?;

        // Slot placeholders are numbered 2..7, 8..13, ...
        let start_num = 2usize;
        for (index, member) in self.members.iter().enumerate() {
            let shape_num = start_num + SHAPES_PER_MEMBER * index;

            if let Some(logo) = &member.member_logo_path {
                editor.place_image(
                    &format!("Picture Placeholder {}", shape_num),
                    logo,
                    true,
                    true,
                )?;
            }
            if let Some(photo) = &member.member_gatherer_photo_path {
                editor.place_image(
                    &format!("Picture Placeholder {}", shape_num + 1),
                    photo,
                    false,
                    false,
                )?;
            }
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 2),
                &member.gatherer_fullname(),
            )?;
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 3),
                member.gatherer_title(self.language),
            )?;
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 4),
                &member.member_gatherer_email,
            )?;
            editor.replace_text(
                &format!("Text Placeholder {}", shape_num + 5),
                member.gatherer_desc(self.language),
            )?;
        }

        // A short final group leaves unfilled slots behind
        editor.remove_empty_placeholders()?;
        Ok(())
    }
}
