//! Command-line entry point for deck generation.
//!
//! Every command renders one output file per language (French and
//! English) from per-language template files.

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use deckhand::config;
use deckhand::decks::output::{month_stamp, output_path};
use deckhand::decks::{
    Deck, Language, MemberInfo, community_pages, core_team_pages, flyer_pages,
};
use std::path::{Path, PathBuf};
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "deckhand", version, about = "Generates member-onboarding decks in English and French")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the onboarding flyer for one member.
    Flyer(FlyerArgs),
    /// Batch-generate flyers for every member in a config file.
    Flyers(BatchArgs),
    /// Generate the community deck from a member config file.
    Community(BatchArgs),
    /// Generate the board and core-team deck from a core-team config file.
    CoreTeam(BatchArgs),
}

#[derive(Parser, Debug)]
struct TemplateArgs {
    /// French template file.
    #[arg(long)]
    template_fr: PathBuf,

    /// English template file.
    #[arg(long)]
    template_en: PathBuf,

    /// Root of the generated-output tree.
    #[arg(long, default_value = "generated")]
    out_dir: PathBuf,
}

impl TemplateArgs {
    fn template(&self, language: Language) -> &Path {
        match language {
            Language::Fr => &self.template_fr,
            Language::En => &self.template_en,
        }
    }
}

#[derive(Parser, Debug)]
struct FlyerArgs {
    /// The name of the company joining the organization.
    #[arg(long)]
    member_name: String,

    /// The month the company joined.
    #[arg(long)]
    member_join_month: String,

    /// Path to the member's logo.
    #[arg(long)]
    member_logo: Option<PathBuf>,

    /// The firstname of the company gatherer.
    #[arg(long)]
    member_gatherer_firstname: String,

    /// The lastname of the company gatherer.
    #[arg(long)]
    member_gatherer_lastname: String,

    /// The email address of the company gatherer.
    #[arg(long)]
    member_gatherer_email: String,

    /// Path to the gatherer's photo.
    #[arg(long)]
    member_gatherer_photo: Option<PathBuf>,

    #[command(flatten)]
    templates: TemplateArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Configuration file holding all necessary member information.
    #[arg(long)]
    config: PathBuf,

    #[command(flatten)]
    templates: TemplateArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Flyer(args) => cmd_flyer(args),
        Command::Flyers(args) => cmd_flyers(args),
        Command::Community(args) => cmd_community(args),
        Command::CoreTeam(args) => cmd_core_team(args),
    }
}

fn cmd_flyer(args: FlyerArgs) -> anyhow::Result<()> {
    let info = MemberInfo {
        member_name: capitalize(&args.member_name),
        member_join_month: args.member_join_month,
        member_logo_path: args.member_logo,
        member_gatherer_firstname: capitalize(&args.member_gatherer_firstname),
        member_gatherer_lastname: capitalize(&args.member_gatherer_lastname),
        member_gatherer_title_fr: String::new(),
        member_gatherer_title_en: String::new(),
        member_gatherer_desc_fr: String::new(),
        member_gatherer_desc_en: String::new(),
        member_gatherer_email: args.member_gatherer_email.to_lowercase(),
        member_gatherer_photo_path: args.member_gatherer_photo,
    };
    info.validate()?;

    generate_flyer(&info, &args.templates, &month_stamp())
}

fn cmd_flyers(args: BatchArgs) -> anyhow::Result<()> {
    let infos = config::load_members(&args.config)?;
    let stamp = month_stamp();

    // One bad record must not abort the whole batch
    let mut failures = 0usize;
    for info in &infos.all_members_info {
        if let Err(err) = generate_flyer(info, &args.templates, &stamp) {
            error!(member = %info.member_name, %err, "flyer generation failed");
            failures += 1;
        }
    }

    if failures > 0 {
        anyhow::bail!(
            "{} of {} flyers failed",
            failures,
            infos.all_members_info.len()
        );
    }
    Ok(())
}

fn generate_flyer(
    info: &MemberInfo,
    templates: &TemplateArgs,
    stamp: &str,
) -> anyhow::Result<()> {
    for language in Language::ALL {
        let mut deck = Deck::from_template(
            templates.template(language),
            flyer_pages(info, language),
        )
        .with_context(|| format!("loading {} flyer template", language))?;

        let path = output_path(
            &templates.out_dir,
            &info.member_id(),
            "flyer",
            language,
            stamp,
        );
        deck.save(&path)
            .with_context(|| format!("rendering {} flyer for {}", language, info.member_name))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_community(args: BatchArgs) -> anyhow::Result<()> {
    let infos = config::load_members(&args.config)?;
    let stamp = month_stamp();

    for language in Language::ALL {
        let mut deck = Deck::from_template(
            args.templates.template(language),
            community_pages(&infos, language),
        )
        .with_context(|| format!("loading {} community template", language))?;

        let path = output_path(&args.templates.out_dir, "", "community-deck", language, &stamp);
        deck.save(&path)
            .with_context(|| format!("rendering {} community deck", language))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_core_team(args: BatchArgs) -> anyhow::Result<()> {
    let infos = config::load_core_team(&args.config)?;
    let stamp = month_stamp();

    for language in Language::ALL {
        let mut deck = Deck::from_template(
            args.templates.template(language),
            core_team_pages(&infos, language),
        )
        .with_context(|| format!("loading {} core-team template", language))?;

        let path = output_path(&args.templates.out_dir, "", "core-team-deck", language, &stamp);
        deck.save(&path)
            .with_context(|| format!("rendering {} core-team deck", language))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

/// Uppercase the first character, lowercase the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
