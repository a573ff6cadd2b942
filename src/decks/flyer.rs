//! Member-onboarding flyer: cover, disclaimer, and referent pages.

use crate::decks::ORG_NAME;
use crate::decks::language::Language;
use crate::decks::model::MemberInfo;
use crate::decks::page::{PageRenderer, PageSpec};
use crate::error::Result;
use crate::pptx::SlideEditor;

/// The flyer's three pages, bound to the template's layout names.
pub fn flyer_pages(info: &MemberInfo, language: Language) -> Vec<PageSpec> {
    vec![
        PageSpec::new("first-page", CoverPage { info: info.clone() }),
        PageSpec::new("second-page", DisclaimerPage),
        PageSpec::new(
            "third-page",
            ReferentPage {
                info: info.clone(),
                language,
            },
        ),
    ]
}

/// Cover page: join month, member name, and the member's logo.
struct CoverPage {
    info: MemberInfo,
}

impl PageRenderer for CoverPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        editor.replace_text("Text Placeholder 1", &self.info.member_join_month)?;
        editor.replace_text("Text Placeholder 2", &self.info.member_name)?;
        if let Some(logo) = &self.info.member_logo_path {
            editor.place_image("Picture Placeholder 3", logo, true, true)?;
        }
        Ok(())
    }
}

/// Static disclaimer page; the layout carries all of its content.
struct DisclaimerPage;

impl PageRenderer for DisclaimerPage {
    fn fill(&self, _editor: &mut SlideEditor<'_>) -> Result<()> {
        Ok(())
    }
}

/// Closing page introducing the member's referent.
struct ReferentPage {
    info: MemberInfo,
    language: Language,
}

impl PageRenderer for ReferentPage {
    fn fill(&self, editor: &mut SlideEditor<'_>) -> Result<()> {
        let contact = match self.language {
            Language::Fr => format!(
                "{}\nréférent {}\npour {}\n{}",
                self.info.gatherer_fullname(),
                ORG_NAME,
                self.info.member_name,
                self.info.member_gatherer_email
            ),
            Language::En => format!(
                "{}\n{} repr\nfor {}\n{}",
                self.info.gatherer_fullname(),
                ORG_NAME,
                self.info.member_name,
                self.info.member_gatherer_email
            ),
        };
        editor.replace_text("Text Placeholder 2", &contact)?;

        if let Some(photo) = &self.info.member_gatherer_photo_path {
            editor.place_image("Picture Placeholder 1", photo, false, false)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_member() -> MemberInfo {
        MemberInfo {
            member_name: "Acme Corp".to_string(),
            member_join_month: "September 2025".to_string(),
            member_logo_path: None,
            member_gatherer_firstname: "Jane".to_string(),
            member_gatherer_lastname: "Doe".to_string(),
            member_gatherer_title_fr: String::new(),
            member_gatherer_title_en: String::new(),
            member_gatherer_desc_fr: String::new(),
            member_gatherer_desc_en: String::new(),
            member_gatherer_email: "jane@acme.example".to_string(),
            member_gatherer_photo_path: None,
        }
    }

    #[test]
    fn flyer_has_three_pages_in_order() {
        let pages = flyer_pages(&sample_member(), Language::Fr);
        let layouts: Vec<&str> = pages.iter().map(|p| p.layout.as_str()).collect();
        assert_eq!(layouts, vec!["first-page", "second-page", "third-page"]);
    }
}
