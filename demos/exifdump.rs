use std::{error::Error, path::PathBuf};

use clap::Parser;
use exif_fields::{DecodedField, ExifGroup, GPSInfo, ImageProperties, PropertyReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dump the Exif fields of image files", long_about = None)]
struct Cli {
    /// Image files (JPEG, TIFF or bare Exif blocks).
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print the decoded fields as JSON.
    #[arg(short, long)]
    json: bool,

    /// Only print fields of this group, e.g. `Photo` or `GPSInfo`.
    #[arg(short, long)]
    group: Option<ExifGroup>,

    /// Keep GPS coordinates unsigned instead of applying the hemisphere
    /// reference tags.
    #[arg(long)]
    raw_gps: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let reader = PropertyReader::new().resolve_hemispheres(!cli.raw_gps);

    let mut failed = false;
    for path in cli.files.iter() {
        let props = match ImageProperties::open(path) {
            Ok(props) => props,
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed = true;
                continue;
            }
        };

        let fields = reader
            .decode(&props)
            .into_iter()
            .filter(|f| cli.group.map_or(true, |g| f.group == g))
            .collect::<Vec<_>>();

        if cli.json {
            dump_json(&fields)?;
        } else {
            if cli.files.len() > 1 {
                println!("==> {} ({}) <==", path.display(), props.format());
            }
            dump_text(&fields);
        }
    }

    if failed {
        Err("some files could not be parsed".into())
    } else {
        Ok(())
    }
}

fn dump_text(fields: &[DecodedField]) {
    for f in fields {
        println!("{:<32}=> {}", f.key(), f.value);
    }

    if let Some(gps) = GPSInfo::from_fields(fields) {
        println!("{:<32}=> {}", "GPS (ISO 6709)", gps.to_iso6709());
    }
}

#[cfg(feature = "json_dump")]
fn dump_json(fields: &[DecodedField]) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(fields)?);
    Ok(())
}

#[cfg(not(feature = "json_dump"))]
fn dump_json(_: &[DecodedField]) -> Result<(), Box<dyn Error>> {
    Err("-j/--json requires the `json_dump` feature".into())
}
