use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde_json::{json, Value};

use lineread::{LineRead, LineReader};

#[derive(Debug, Deserialize)]
struct Scenario {
    capacity: Option<usize>,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
enum Step {
    Line,
    Split { sep: String },
    IntSplit { sep: String },
    Int,
    Float64,
    Bool,
}

#[test]
fn e2e() -> Result<(), Box<dyn std::error::Error>> {
    let root_test_dir = Path::new(file!()).parent().unwrap().join("scenarios");

    for test_dir in fs::read_dir(&root_test_dir)? {
        let test_dir = test_dir?.path();

        if let Ok(filter) = std::env::var("E2E_CASE") {
            if !test_dir.as_os_str().to_string_lossy().ends_with(&filter) {
                continue;
            }
        }

        let scenario: Scenario =
            serde_json::from_str(&fs::read_to_string(test_dir.join("script.json"))?)?;

        let actual_output = run(fs::File::open(test_dir.join("input"))?, &scenario);

        let expected_output: Vec<Value> =
            serde_json::from_str(&fs::read_to_string(test_dir.join("output.json"))?)?;

        assert_eq!(
            expected_output,
            actual_output,
            "\nUnexpected scenario result in '{}'.\nExpected:\n{:?}\nActual:\n{:?}",
            test_dir.display(),
            expected_output,
            actual_output,
        );
    }

    Ok(())
}

fn run<R: io::Read>(input: R, scenario: &Scenario) -> Vec<Value> {
    let mut reader = match scenario.capacity {
        Some(capacity) => LineReader::with_capacity(input, capacity),
        None => LineReader::new(input),
    };

    scenario
        .steps
        .iter()
        .map(|step| {
            let result = match step {
                Step::Line => reader.read_line().map(Value::from),
                Step::Split { sep } => reader.read_line_split(sep).map(Value::from),
                Step::IntSplit { sep } => reader.read_line_int_split(sep).map(Value::from),
                Step::Int => reader.read_line_int().map(Value::from),
                Step::Float64 => reader.read_line_float64().map(Value::from),
                Step::Bool => reader.read_line_bool().map(Value::from),
            };

            match result {
                Ok(value) => json!({ "ok": value }),
                Err(e) => json!({ "err": e.kind().to_string() }),
            }
        })
        .collect()
}
