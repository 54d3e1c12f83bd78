use anyhow::{Result as AnyResult, bail};
use deck::{DeckConfig, convert_deck};
use deck_compositor::{LocalImageLoader, RecordingSink, SinkCapabilities};
use deck_snapshot::JsonSnapshotProvider;
use log::info;
use serde_json::json;
use std::env;
use std::io::{self, Write as _};

/// Converts snapshot JSON files, one per slide, and prints the recorded
/// document together with the conversion report.
pub fn main() -> AnyResult<()> {
    env_logger::init();

    let sources: Vec<String> = env::args().skip(1).collect();
    if sources.is_empty() {
        bail!("usage: deck <snapshot.json>...");
    }
    let config = DeckConfig::from_env();
    info!("converting {} slides with {config:?}", sources.len());

    let mut provider = JsonSnapshotProvider::new(None);
    let loader = LocalImageLoader::new(env::current_dir().ok());
    let mut sink = RecordingSink::new(SinkCapabilities::default());
    let report = convert_deck(&mut provider, &sources, &mut sink, &loader, &config);

    let output = json!({
        "report": report,
        "document": sink,
    });
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    stdout.write_all(b"\n")?;
    Ok(())
}
