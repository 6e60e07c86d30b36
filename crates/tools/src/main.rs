use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use compute::{EnrichedCollection, Framing, TaxTable};
use formats::BoundaryCollection;
use scene::CameraMove;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), String> {
    let mut args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        return Err(usage());
    }

    let cmd = args[1].clone();
    args.drain(0..2);

    match cmd.as_str() {
        "enrich" => cmd_enrich(args),
        "unmatched" => cmd_unmatched(args),
        "frame" => cmd_frame(args),
        "legend" => cmd_legend(args),
        _ => Err(usage()),
    }
}

/// Positional arguments plus the optional `--tax CSV` override.
#[derive(Debug, Default, PartialEq)]
struct CommonArgs {
    positional: Vec<String>,
    tax: Option<PathBuf>,
}

fn parse_common(args: &[String]) -> Result<CommonArgs, String> {
    let mut out = CommonArgs::default();
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--tax" => {
                i += 1;
                if i >= args.len() {
                    return Err("--tax requires a path".to_string());
                }
                out.tax = Some(PathBuf::from(&args[i]));
            }
            s if s.starts_with("--") => {
                return Err(format!("unknown arg: {s}\n\n{}", usage()));
            }
            _ => out.positional.push(args[i].clone()),
        }
        i += 1;
    }
    Ok(out)
}

fn cmd_enrich(args: Vec<String>) -> Result<(), String> {
    // taxglobe enrich <world.geojson> <out.geojson> [--tax CSV]
    let args = parse_common(&args)?;
    let [input, output] = args.positional.as_slice() else {
        return Err(usage());
    };

    let countries = enrich_file(Path::new(input), args.tax.as_deref())?;
    let payload = serde_json::to_string_pretty(&countries.to_geojson_value())
        .map_err(|e| format!("json: {e}"))?;
    fs::write(output, payload).map_err(|e| format!("write {output:?}: {e}"))?;

    let unmatched = countries.unmatched().count();
    eprintln!(
        "wrote {output} ({} features, {} without rates)",
        countries.len(),
        unmatched
    );
    Ok(())
}

fn cmd_unmatched(args: Vec<String>) -> Result<(), String> {
    // taxglobe unmatched <world.geojson> [--tax CSV]
    let args = parse_common(&args)?;
    let [input] = args.positional.as_slice() else {
        return Err(usage());
    };

    let countries = enrich_file(Path::new(input), args.tax.as_deref())?;
    for feature in countries.unmatched() {
        println!("{}", feature.name());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameReport {
    name: String,
    matched: Option<String>,
    tax_rate: Option<f64>,
    framing: Framing,
    camera: CameraMove,
}

fn cmd_frame(args: Vec<String>) -> Result<(), String> {
    // taxglobe frame <world.geojson> <name> [--tax CSV]
    let args = parse_common(&args)?;
    let [input, name] = args.positional.as_slice() else {
        return Err(usage());
    };

    let countries = enrich_file(Path::new(input), args.tax.as_deref())?;
    let feature = countries
        .find_by_name(name)
        .ok_or_else(|| format!("no country named {name:?} in {input}"))?;
    let framing = feature.framing();
    let report = FrameReport {
        name: feature.name().to_string(),
        matched: feature.matched.as_ref().map(|(key, _)| key.clone()),
        tax_rate: feature.tax_rate(),
        framing,
        camera: CameraMove::focus(framing),
    };
    let payload = serde_json::to_string_pretty(&report).map_err(|e| format!("json: {e}"))?;
    println!("{payload}");
    Ok(())
}

fn cmd_legend(args: Vec<String>) -> Result<(), String> {
    // taxglobe legend
    if !args.is_empty() {
        return Err(usage());
    }
    for entry in layers::legend() {
        println!("{}\t{}", entry.color, entry.label);
    }
    println!("{}\tno data", layers::NO_DATA_COLOR);
    Ok(())
}

fn load_table(tax: Option<&Path>) -> Result<TaxTable, String> {
    match tax {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|e| format!("read {path:?}: {e}"))?;
            Ok(TaxTable::parse(&text))
        }
        None => Ok(TaxTable::bundled()),
    }
}

fn enrich_file(world: &Path, tax: Option<&Path>) -> Result<EnrichedCollection, String> {
    let table = load_table(tax)?;
    let text = fs::read_to_string(world).map_err(|e| format!("read {world:?}: {e}"))?;
    let boundaries =
        BoundaryCollection::from_geojson_str(&text).map_err(|e| format!("parse geojson: {e}"))?;
    Ok(EnrichedCollection::enrich(&boundaries, &table))
}

fn usage() -> String {
    let exe = env::args().next().unwrap_or_else(|| "taxglobe".to_string());
    format!(
        "Usage:\n  {exe} enrich <world.geojson> <out.geojson> [--tax CSV]\n  {exe} unmatched <world.geojson> [--tax CSV]\n  {exe} frame <world.geojson> <name> [--tax CSV]\n  {exe} legend\n\nNotes:\n- Without --tax the bundled rate table is used.\n- Set RUST_LOG=debug to see skipped rows and features.\n"
    )
}
