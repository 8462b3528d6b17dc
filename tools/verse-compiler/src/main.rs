use clap::Parser;
use drill_decoder::{CompoundMode, VerseBuilder};
use drill_protocol::{Language, VersePack, PACK_VERSION};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Decodes a JSON verse dataset into an rkyv verse pack")]
struct Cli {
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Compound words: `split` into segments or `fold` into one word.
    #[arg(short, long, default_value = "split")]
    mode: CompoundMode,
}

/// `{ "language": "hebrew", "verses": [ { "reference": "...", "words": [[surface, lemma, code], ...] } ] }`
#[derive(Debug, Deserialize)]
struct Dataset {
    language: Language,
    verses: Vec<VerseRows>,
}

#[derive(Debug, Deserialize)]
struct VerseRows {
    reference: String,
    words: Vec<(String, Option<String>, String)>,
}

fn compile(dataset: Dataset, mode: CompoundMode) -> VersePack {
    let verses = dataset
        .verses
        .into_iter()
        .map(|rows| {
            let mut builder = VerseBuilder::new(rows.reference, dataset.language).mode(mode);
            for (surface, lemma, code) in &rows.words {
                builder.push(surface, lemma.as_deref(), code);
            }
            builder.build()
        })
        .collect();

    VersePack {
        version: PACK_VERSION,
        language: dataset.language,
        verses,
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    println!("📖 Reading JSON from {:?}...", cli.input);
    let input_data = fs::read_to_string(&cli.input)?;
    let dataset: Dataset = serde_json::from_str(&input_data)?;

    println!(
        "⚙️  Decoding {} {} verses ({:?} compounds)...",
        dataset.verses.len(),
        dataset.language,
        cli.mode
    );
    let pack = compile(dataset, cli.mode);

    let undecoded = pack
        .verses
        .iter()
        .flat_map(|v| &v.words)
        .filter(|w| w.parse.is_none())
        .count();
    if undecoded > 0 {
        println!("⚠️  {} words have no decodable morphology", undecoded);
    }

    let bytes = rkyv::to_bytes::<_, 256>(&pack).map_err(|e| anyhow::anyhow!("rkyv serialization failed: {:?}", e))?;
    fs::write(&cli.output, &bytes)?;

    println!("✅ Success! {} bytes written to {:?}", bytes.len(), cli.output);
    Ok(())
}
