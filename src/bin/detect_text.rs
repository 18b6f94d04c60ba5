use ai_text_detector_lib::services::config_store::{ConfigStore, DetectorConfig};
use ai_text_detector_lib::services::text_processor::normalize_punctuation;
use ai_text_detector_lib::{init_logging, Detector, ScoreResult};
use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

const USAGE: &str = "Usage:\n  detect_text <path|-> [--json] [--out <json_path>] [--config <config.json>] [--skip-validation]\n\nNotes:\n  - `-` reads the text from stdin.\n  - Without --config the stored config (or built-in defaults) is used.\n  - AITD_DISABLE_FILE_LOG=1 keeps logs on stderr only.";

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

/// Flags that consume the following argument
const VALUE_FLAGS: [&str; 2] = ["--out", "--config"];

/// First argument that is neither a flag nor a flag's value; `-` is stdin
fn input_arg(args: &[String]) -> Option<String> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
            continue;
        }
        if arg == "-" || !arg.starts_with('-') {
            return Some(arg.clone());
        }
    }
    None
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read stdin failed")?;
        return Ok(buf);
    }
    std::fs::read_to_string(source).with_context(|| format!("read file failed: {}", source))
}

fn load_config(explicit: Option<&str>) -> Result<DetectorConfig> {
    if let Some(path) = explicit {
        return DetectorConfig::from_file(Path::new(path))
            .with_context(|| format!("load config failed: {}", path));
    }
    match ConfigStore::default_config_dir() {
        Some(dir) => ConfigStore::new(dir)
            .load()
            .context("load stored config failed"),
        None => Ok(DetectorConfig::default()),
    }
}

fn print_summary(source: &str, result: &ScoreResult) {
    let verdict = if result.is_ai_generated { "AI-generated" } else { "Human-written" };
    println!("Input: {}", source);
    println!("Verdict: {}", verdict);
    println!(
        "AI probability: {:.3}  Human probability: {:.3}  Confidence: {:.1}%",
        result.ai_probability,
        result.human_probability,
        result.confidence * 100.0
    );
    if result.confidence_damping < 1.0 {
        println!("Short-text damping: x{:.2}", result.confidence_damping);
    }
    println!("Explanation: {}", result.explanation);

    if !result.contributions.is_empty() {
        println!("\n=== Contributions ===");
        for c in &result.contributions {
            println!(
                "{:<20} sub={:.3} weight={:.2} contrib={:.3} push={:+.3}",
                c.feature.name(),
                c.sub_score,
                c.weight,
                c.contribution,
                c.push
            );
        }
    }

    let f = &result.features;
    println!("\n=== Features ===");
    println!("words={} sentences={} chars={}", f.word_count, f.sentence_count, f.char_count);
    println!(
        "avg_word_length={:.2} lexical_diversity={:.3} avg_sentence_length={:.2} sentence_std_dev={:.2}",
        f.avg_word_length, f.lexical_diversity, f.avg_sentence_length, f.sentence_length_std_dev
    );
    println!(
        "ai_phrases={} transitions={} contractions={} slang={} exclamations={} questions={}",
        f.ai_phrase_count,
        f.formal_transition_count,
        f.contraction_count,
        f.slang_count,
        f.exclamation_count,
        f.question_count
    );
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }
    let Some(source) = input_arg(&args) else {
        eprintln!("{}", USAGE);
        return Ok(());
    };

    init_logging();

    let as_json = has_flag(&args, "--json");
    let skip_validation = has_flag(&args, "--skip-validation");
    let out_path = parse_arg_value(&args, "--out");
    let config_path = parse_arg_value(&args, "--config");

    let raw = read_input(&source)?;
    let text = normalize_punctuation(&raw);
    let config = load_config(config_path.as_deref())?;

    if skip_validation {
        info!("input.validation_skipped");
    } else {
        let check = match config.input_policy.validate(&text) {
            Ok(check) => check,
            Err(e) => bail!("{}", e),
        };
        if check.below_recommended {
            warn!(
                words = check.word_count,
                recommended = config.input_policy.recommended_words,
                "input.below_recommended_length"
            );
        }
    }

    let detector = Detector::from_config(config.scoring).context("invalid scoring config")?;
    let result = detector.detect(&text);
    info!(
        source = %source,
        words = result.features.word_count,
        ai_probability = result.ai_probability,
        confidence = result.confidence,
        "detect.completed"
    );

    let json = serde_json::to_string_pretty(&result).context("serialize result failed")?;
    if as_json {
        println!("{}", json);
    } else {
        print_summary(&source, &result);
    }

    if let Some(out) = out_path {
        std::fs::write(&out, &json).with_context(|| format!("write json failed: {}", out))?;
        if !as_json {
            println!("\nWrote: {}", out);
        }
    }

    Ok(())
}
