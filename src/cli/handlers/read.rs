use crate::cli::{
    args::ReadArgs,
    config::{charset_or_default, enforce_max_size},
    global::GlobalArgs,
};
use fenc::FileAccess;
use std::fs;
use std::io::{self, Write};

pub fn handle(
    args: ReadArgs,
    global: &GlobalArgs,
    access: &FileAccess,
) -> Result<(), Box<dyn std::error::Error>> {
    // The encoding name is checked before any file is touched
    let charset = if args.detect {
        None
    } else {
        Some(charset_or_default(args.encoding.as_deref(), access.config())?)
    };

    enforce_max_size(access, &args.path, global)?;

    let text = match charset {
        Some(charset) => access.read_text(&args.path, charset)?,
        None => {
            let (detection, text) = access.read_text_detected(&args.path)?;
            if !global.quiet {
                eprintln!("{}: {} ({})", args.path, detection.name(), detection.confidence);
            }
            text
        }
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, text.as_bytes())?;
    } else {
        io::stdout().write_all(text.as_bytes())?;
    }

    Ok(())
}
