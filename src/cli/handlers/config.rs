use crate::cli::args::ConfigAction;
use fenc::FencConfig;

pub fn handle(action: ConfigAction, config: &FencConfig) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::List { json } => handle_list(json),
        ConfigAction::Show => handle_show(config),
    }
}

fn handle_list(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut labels: Vec<&str> = fenc::known_labels().collect();
    labels.sort_by_key(|l| l.to_ascii_lowercase());

    if json {
        let output = serde_json::json!({ "encodings": labels });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for label in labels {
        println!("{}", label);
    }
    Ok(())
}

fn handle_show(config: &FencConfig) -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", config.to_toml()?);
    Ok(())
}
