use clap::Parser;
use std::io::Write;
use std::path::Path;
use yield_brochure::utils::sanitize_filename;
use yield_brochure::{Brochure, BrochureConfig, BrochureEvent};

mod args;
use args::{Args, convert_tone};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match BrochureConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!("Failed to load configuration from {}: {}", path.display(), e);
                return;
            }
        },
        None => BrochureConfig::default(),
    };

    let mut builder = Brochure::new().with_config(config.with_env_overrides());
    if let Some(model) = &args.model {
        builder = builder.with_model(model.clone());
    }
    if let Some(tone) = args.tone {
        builder = builder.with_tone(convert_tone(tone));
    }
    if let Some(max_chars) = args.max_chars {
        builder = builder.with_max_content_chars(max_chars);
    }

    let service = match builder.build() {
        Ok(service) => service,
        Err(e) => {
            ::log::error!("Failed to set up brochure generation: {}", e);
            return;
        }
    };

    ::log::info!(
        "Writing brochure for {} from {} with {}",
        args.company,
        args.url,
        service.config().model
    );
    let start_time = std::time::Instant::now();

    let mut run = service.run(&args.company, &args.url);
    let mut renderer = LiveRenderer::default();
    let mut final_markdown = None;

    while let Some(event) = run.next_event().await {
        match event {
            BrochureEvent::Draft(draft) => renderer.render(&draft, false),
            BrochureEvent::Completed(markdown) => {
                renderer.render(&markdown, true);
                renderer.finish();
                final_markdown = Some(markdown);
            }
            BrochureEvent::Failed { partial, reason } => {
                renderer.render(&partial, true);
                renderer.finish();
                ::log::error!("Brochure generation stopped: {}", reason);
                if !partial.is_empty() {
                    ::log::warn!("Kept {} characters of partial output", partial.len());
                }
            }
        }
    }

    ::log::info!(
        "Finished in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    let Some(markdown) = final_markdown else {
        return;
    };
    if let Some(path) = &args.output {
        save(path, &markdown);
    }
    if let Some(dir) = &args.save_dir {
        let path = dir.join(format!("{}.md", sanitize_filename(&args.company)));
        save(&path, &markdown);
    }
}

/// Prints growing drafts to stdout without repeating what is already shown
#[derive(Default)]
struct LiveRenderer {
    shown: String,
}

impl LiveRenderer {
    /// Print the part of `draft` that is not on screen yet
    ///
    /// Trailing backticks and a trailing partial `markdown` are held back until
    /// `last` since the next fragment may turn them into a stripped marker.
    fn render(&mut self, draft: &str, last: bool) {
        let visible = if last {
            draft
        } else {
            &draft[..stable_len(draft)]
        };

        let common = common_prefix_len(&self.shown, visible);
        if common < self.shown.len() {
            ::log::debug!("Draft diverged from printed output");
        }
        let suffix = &visible[common..];
        if suffix.is_empty() {
            return;
        }

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout
            .write_all(suffix.as_bytes())
            .and_then(|_| stdout.flush())
        {
            ::log::warn!("Failed to write to stdout: {}", e);
        }
        self.shown = visible.to_string();
    }

    fn finish(&mut self) {
        println!();
    }
}

fn stable_len(draft: &str) -> usize {
    const TAG: &str = "markdown";
    let trimmed = draft.trim_end_matches('`');
    for k in (1..TAG.len()).rev() {
        if trimmed.ends_with(&TAG[..k]) {
            return trimmed.len() - k;
        }
    }
    trimmed.len()
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()))
}

fn save(path: &Path, markdown: &str) {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                ::log::error!("Failed to create {}: {}", parent.display(), e);
                return;
            }
        }
    }
    match std::fs::write(path, markdown) {
        Ok(()) => ::log::info!("Saved brochure to {}", path.display()),
        Err(e) => ::log::error!("Failed to save brochure to {}: {}", path.display(), e),
    }
}
