use std::path::Path;

use anyhow::Result;
use deid_config::Config;
use deid_core::Markup;
use deid_engine::{RedactOptions, Redactor, html};
use deid_storage::AnnotationStore;

use crate::cli::RedactArgs;

pub fn handle(args: RedactArgs, results: &Path, config: &Config) -> Result<()> {
    let markup = markup(&args, config);
    let redactor = Redactor::new(RedactOptions {
        replacement: args
            .replacement
            .clone()
            .unwrap_or_else(|| config.replacement.clone()),
        markup,
    });

    let redaction = deid_engine::redact_from(&AnnotationStore::new(results), &redactor)?;

    let output = if markup == Markup::Html {
        html::wrap_document(&redaction.text, "Redacted")
    } else {
        redaction.text
    };

    match &args.output {
        Some(path) => {
            super::write_atomic(path, &output)?;
            eprintln!("✓ Wrote redacted text: {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

fn markup(args: &RedactArgs, config: &Config) -> Markup {
    if args.markdown {
        Markup::Markdown
    } else if args.html || config.html {
        Markup::Html
    } else if config.markdown {
        Markup::Markdown
    } else {
        Markup::Plain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(html: bool, markdown: bool) -> RedactArgs {
        RedactArgs {
            replacement: None,
            html,
            markdown,
            output: None,
        }
    }

    #[test]
    fn test_markup_flags_override_config() {
        let mut config = Config::default();
        assert_eq!(markup(&args(false, false), &config), Markup::Plain);
        assert_eq!(markup(&args(true, false), &config), Markup::Html);

        config.html = true;
        assert_eq!(markup(&args(false, false), &config), Markup::Html);
        assert_eq!(markup(&args(false, true), &config), Markup::Markdown);
    }

    #[test]
    fn test_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let results = dir.path().join("results.json");
        let mut set = deid_core::AnnotationSet::new("Ann said she would.");
        set.entities.push(deid_core::EntitySpan::new("Ann", 0, 3));
        set.pronouns.push(deid_core::PronounToken::new("she", 9));
        AnnotationStore::new(&results).save(&set).unwrap();

        let output = dir.path().join("out.txt");
        let mut redact_args = args(false, false);
        redact_args.output = Some(output.clone());
        handle(redact_args, &results, &Config::default()).unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "EMPLOYEE said HE/SHE would."
        );
    }
}
