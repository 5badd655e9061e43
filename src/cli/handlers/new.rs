use std::path::Path;

use crate::cli::commands::NewArgs;
use crate::model::settings::FontSize;
use crate::ops::session::Session;

use super::{Context, parse_font_size};

/// Create a blank list file with the configured default settings.
pub(super) fn cmd_new(ctx: &Context, args: NewArgs) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(&args.path);
    if path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )
        .into());
    }

    let mut settings = ctx.config.defaults.to_settings();
    if let Some(title) = args.title {
        settings.title = title;
    }
    if let Some(ref size) = args.font_size {
        let size: FontSize = parse_font_size(size)?;
        settings.font_size = size;
    }
    if args.no_strikethrough {
        settings.strikethrough = false;
    }

    let mut session = Session::new(settings).with_recovery_dir(ctx.config_dir.clone());
    session.save_as(path)?;
    ctx.record(path);

    println!("created {}", path.display());
    Ok(())
}
