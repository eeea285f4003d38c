use crate::cli::args::DetectArgs;
use fenc::FileAccess;
use log::error;
use serde::Serialize;

#[derive(Serialize)]
struct DetectRecord<'a> {
    path: &'a str,
    encoding: &'static str,
    confidence: fenc::Confidence,
}

pub fn handle(args: DetectArgs, access: &FileAccess) -> Result<(), Box<dyn std::error::Error>> {
    let mut records = Vec::with_capacity(args.paths.len());
    let mut failures = 0;

    for path in &args.paths {
        match access.detect_encoding(path) {
            Ok(detection) => records.push(DetectRecord {
                path,
                encoding: detection.name(),
                confidence: detection.confidence,
            }),
            Err(e) => {
                error!("{}", e);
                failures += 1;
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for record in &records {
            println!("{}: {} ({})", record.path, record.encoding, record.confidence);
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files could not be inspected", failures, args.paths.len()).into());
    }
    Ok(())
}
