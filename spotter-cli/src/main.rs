use std::path::PathBuf;
use std::process;

use clap::Parser;
use eyre::Result;
use spotter::{parse_delimiter, Catalog, Config, FilterQuery, Selection, Source};

#[derive(Parser, Debug)]
#[clap(name = "spotter", about, version)]
struct Args {
    /// Increase output logging verbosity.
    #[clap(short, long)]
    verbose: bool,

    /// Configuration file (JSON or YAML). Ignored if it does not exist.
    #[clap(short, long, default_value = "spotter.yml")]
    config: PathBuf,

    /// Only show spots whose name contains this text (case-insensitive).
    #[clap(short, long, default_value = "")]
    search: String,

    /// Only show spots with at least one of these tags. May be repeated.
    #[clap(short, long = "tag")]
    tags: Vec<String>,

    /// Field separator of the table (a single character or "tab"). Detected
    /// automatically if omitted.
    #[clap(short, long)]
    delimiter: Option<String>,

    /// Print the selection as JSON instead of a listing.
    #[clap(long)]
    json: bool,

    /// The table of spots to load. Overrides the configured source.
    source: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();
    simple_logger::init_with_level(if args.verbose {
        log::Level::Debug
    } else {
        log::Level::Info
    })
    .unwrap();

    match run(&args) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            log::error!("Failed: {}", describe_failure(&e));
            process::exit(1);
        }
    }
}

/// A single line naming the failure and every underlying cause.
fn describe_failure(e: &eyre::Report) -> String {
    format!("{:#}", e)
}

fn run(args: &Args) -> Result<String> {
    let mut config = Config::load_or_default(&args.config)?;
    if let Some(source) = &args.source {
        config = config.with_source(source);
    }
    let delimiter = match &args.delimiter {
        Some(d) => Some(parse_delimiter(d)?),
        None => config.delimiter_byte()?,
    };

    let mut catalog = Catalog::new(Source::File(config.source.clone()), delimiter, config.zoom);
    let _ = catalog.load()?;

    let query = args
        .tags
        .iter()
        .fold(FilterQuery::default().with_search(&args.search), |q, tag| {
            q.with_tag(tag)
        });
    let selection = catalog.query(&query)?;
    if args.json {
        Ok(serde_json::to_string_pretty(&selection)?)
    } else {
        Ok(render_listing(&selection))
    }
}

fn render_listing(selection: &Selection) -> String {
    let mut out = String::new();
    for spot in &selection.spots {
        out.push_str(&format!("{}\n", spot.name));
        if !spot.address.is_empty() {
            out.push_str(&format!("  {}\n", spot.address));
        }
        out.push_str(&format!(
            "  ({:.6}, {:.6})\n",
            spot.coordinate.lat, spot.coordinate.lon
        ));
        if !spot.tags.is_empty() {
            let tags = spot.tags.iter().cloned().collect::<Vec<String>>();
            out.push_str(&format!("  [{}]\n", tags.join("] [")));
        }
        if let Some(description) = &spot.description {
            out.push_str(&format!("  {}\n", description));
        }
        if let Some(link) = &spot.link {
            out.push_str(&format!("  {}\n", link));
        }
    }
    out.push_str(&format!("{} spot(s)", selection.spots.len()));
    if let Some(tags) = &selection.tags {
        let tags = tags.iter().cloned().collect::<Vec<String>>();
        out.push_str(&format!("\nTags: {}", tags.join(", ")));
    }
    if let Some(view) = &selection.view {
        out.push_str(&format!(
            "\nMap center: ({:.6}, {:.6}) at zoom {}",
            view.center.lat, view.center.lon, view.zoom
        ));
    }
    out
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    fn args_for(source: PathBuf) -> Args {
        Args {
            verbose: false,
            config: std::env::temp_dir().join("spotter-cli-no-such-config.yml"),
            search: String::new(),
            tags: Vec::new(),
            delimiter: None,
            json: false,
            source: Some(source),
        }
    }

    fn write_table(name: &str, content: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("spotter-cli-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn failure_message_includes_the_underlying_cause() {
        let path = write_table("one.csv", b"name\nA\n");
        let err = run(&args_for(path.clone())).unwrap_err();
        let message = describe_failure(&err);
        assert!(
            message.contains(&path.display().to_string()),
            "unexpected message: {}",
            message
        );
        assert!(
            message.contains("at least 2 are needed to resolve name and address"),
            "unexpected message: {}",
            message
        );
    }

    #[test]
    fn failure_message_includes_csv_errors() {
        let path = write_table("bad.csv", b"name,address\n\xff\xfe,x\n");
        let err = run(&args_for(path)).unwrap_err();
        let message = describe_failure(&err);
        assert!(message.contains("CSV error"), "unexpected message: {}", message);
    }

    #[test]
    fn renders_a_listing() {
        let path = write_table(
            "spots.csv",
            "name,address,lat,lon,tags\nLe Grand Café,Lyon,45.0,4.0,food\n".as_bytes(),
        );
        let output = run(&args_for(path)).unwrap();
        assert!(output.contains("Le Grand Café"));
        assert!(output.contains("[food]"));
        assert!(output.contains("1 spot(s)"));
        assert!(output.contains("Tags: food"));
    }
}
