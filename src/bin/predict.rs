//! Score one JSON record against frozen artifacts.
//!
//! Reads a field→value JSON object from stdin and prints the prediction
//! response on stdout:
//!
//! ```text
//! echo '{"age":55,"trestbps":120,"chol":200,"thalach":150,"oldpeak":1.0,"cp":2}' \
//!   | predict scaler.json model.json
//! {"prediction":1,"risk_probability":0.5533}
//! ```
//!
//! Exit codes: 0 on a prediction, 1 on a fatal/startup error, 2 on bad
//! usage or rejected input.

use std::io::Read;
use std::process::ExitCode;

use cardiorisk::{ArtifactStore, Pipeline, RawRecord, Schema};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("usage: {} <scaler.json> <model.json> < record.json", args[0]);
        return ExitCode::from(2);
    }

    let schema = Schema::reference();
    let artifacts = match ArtifactStore::load(&args[1], &args[2], &schema) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("fatal: {err}");
            return ExitCode::FAILURE;
        }
    };
    let pipeline = Pipeline::new(schema, artifacts);

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("fatal: cannot read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let record: RawRecord = match serde_json::from_str(&input) {
        Ok(record) => record,
        Err(err) => {
            println!("{}", serde_json::json!({ "error": format!("invalid JSON input: {err}") }));
            return ExitCode::from(2);
        }
    };
    if record.is_empty() {
        println!("{}", serde_json::json!({ "error": "empty input record" }));
        return ExitCode::from(2);
    }

    match pipeline.infer(&record) {
        Ok(prediction) => {
            println!("{}", serde_json::json!(prediction.response()));
            ExitCode::SUCCESS
        }
        Err(err) => {
            println!("{}", serde_json::json!({ "error": err.to_string() }));
            ExitCode::from(2)
        }
    }
}
