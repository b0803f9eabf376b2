//! CLI tool for converting markdown slide outlines to PowerPoint.

use anyhow::{Context, Result};
use clap::Parser;
use mdslides_core::{SlideParser, SlideSpec};
use mdslides_pptx::{Deck, Template};
use std::fs;
use std::path::{Path, PathBuf};

/// Convert a markdown slide outline into a .pptx presentation.
#[derive(Parser, Debug)]
#[command(name = "md2pptx")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown file
    input: PathBuf,

    /// Output .pptx file (default: input file with .pptx extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Existing .pptx whose slide size and theme are reused
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Print the parsed slides as JSON instead of writing a presentation
    #[arg(long)]
    dry_run: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let slides = SlideParser::new().parse(&source);
    log::debug!("Parsed {} slides from {}", slides.len(), args.input.display());

    if args.dry_run {
        let json = serde_json::to_string_pretty(&slides).context("Failed to serialize slides")?;
        println!("{}", json);
        return Ok(());
    }

    let deck = build_deck(&slides, args.template.as_deref())?;
    let output_path = get_output_path(&args.input, args.output.as_ref());
    deck.save(&output_path)
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    println!("Created: {}", output_path.display());
    println!("Slides: {}", deck.slide_count());

    Ok(())
}

/// Render all parsed slides, starting from a template when one is given.
fn build_deck(slides: &[SlideSpec], template: Option<&Path>) -> Result<Deck> {
    let mut deck = match template {
        Some(path) => {
            let template = Template::open(path)
                .with_context(|| format!("Failed to load template {}", path.display()))?;
            Deck::from_template(&template)
        }
        None => Deck::new(),
    };

    for slide in slides {
        deck.add_slide(slide);
    }

    Ok(deck)
}

/// Determine the output file path.
fn get_output_path(input_path: &Path, output: Option<&PathBuf>) -> PathBuf {
    match output {
        Some(path) => path.clone(),
        None => input_path.with_extension("pptx"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_output_path_default() {
        let path = get_output_path(Path::new("talks/intro.md"), None);
        assert_eq!(path, PathBuf::from("talks/intro.pptx"));
    }

    #[test]
    fn test_get_output_path_without_extension() {
        let path = get_output_path(Path::new("outline"), None);
        assert_eq!(path, PathBuf::from("outline.pptx"));
    }

    #[test]
    fn test_get_output_path_explicit() {
        let explicit = PathBuf::from("out/deck.pptx");
        assert_eq!(get_output_path(Path::new("intro.md"), Some(&explicit)), explicit);
    }

    #[test]
    fn test_build_deck() {
        let slides = vec![
            SlideSpec::Section {
                number: "1".to_string(),
                title: "Intro".to_string(),
            },
            SlideSpec::Content {
                title: "Agenda".to_string(),
                content: "- one\n- two".to_string(),
            },
        ];
        let deck = build_deck(&slides, None).unwrap();
        assert_eq!(deck.slide_count(), 2);
    }

    #[test]
    fn test_build_deck_missing_template() {
        let result = build_deck(&[], Some(Path::new("does-not-exist.pptx")));
        assert!(result.is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["md2pptx", "deck.md", "-o", "out.pptx", "--dry-run", "-v"]);
        assert_eq!(args.input, PathBuf::from("deck.md"));
        assert_eq!(args.output, Some(PathBuf::from("out.pptx")));
        assert!(args.dry_run);
        assert!(args.verbose);
        assert!(args.template.is_none());
    }
}
