use crate::cli::{args::BytesArgs, config::enforce_max_size, global::GlobalArgs};
use fenc::FileAccess;
use std::io::{self, Write};

/// Bytes per line in the hex dump
const HEX_LINE_WIDTH: usize = 32;

pub fn handle(
    args: BytesArgs,
    global: &GlobalArgs,
    access: &FileAccess,
) -> Result<(), Box<dyn std::error::Error>> {
    enforce_max_size(access, &args.path, global)?;
    let data = access.read_bytes(&args.path)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.raw {
        out.write_all(&data)?;
    } else {
        for line in data.chunks(HEX_LINE_WIDTH) {
            writeln!(out, "{}", hex::encode(line))?;
        }
    }
    out.flush()?;

    Ok(())
}
