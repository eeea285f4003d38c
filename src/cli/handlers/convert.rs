use crate::cli::{args::ConvertArgs, config::enforce_max_size, global::GlobalArgs};
use fenc::{Charset, FileAccess};
use log::info;

pub fn handle(
    args: ConvertArgs,
    global: &GlobalArgs,
    access: &FileAccess,
) -> Result<(), Box<dyn std::error::Error>> {
    // Both names are checked before any file is opened
    let to = Charset::for_label(&args.to)?;
    let from = if args.from.eq_ignore_ascii_case("auto") {
        None
    } else {
        Some(Charset::for_label(&args.from)?)
    };

    let from = match from {
        Some(charset) => charset,
        None => {
            let detection = access.detect_encoding(&args.input)?;
            if !global.quiet {
                eprintln!(
                    "{}: detected {} ({})",
                    args.input,
                    detection.name(),
                    detection.confidence
                );
            }
            detection.charset
        }
    };

    if args.stream {
        let written = access.convert_streaming(&args.input, &args.output, from, to)?;
        info!("wrote {} bytes to {}", written, args.output.display());
    } else {
        enforce_max_size(access, &args.input, global)?;
        access.convert(&args.input, &args.output, from, to)?;
        info!("wrote {}", args.output.display());
    }

    Ok(())
}
