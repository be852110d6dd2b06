//! End-to-end tests for file conversion.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::SHIFT_JIS;
use prepaid_cli::pipeline::{ConvertOutcome, ConvertPlan, convert, inspect, load_layout};
use prepaid_engine::RunStatus;
use prepaid_ingest::SourceEncoding;
use prepaid_model::{ConversionOptions, CorrectionKey, Slot};
use tempfile::{TempDir, tempdir};

const WIDTH: usize = 42;

fn line(order_id: &str, code: &str, name: &str, quantity: &str) -> String {
    let mut fields = vec![String::new(); WIDTH];
    fields[0] = "0123".to_string();
    fields[11] = "東京都千代田区".to_string();
    fields[26] = code.to_string();
    fields[27] = name.to_string();
    fields[32] = order_id.to_string();
    fields[41] = quantity.to_string();
    fields.join(",")
}

fn write_export(dir: &TempDir, lines: &[String]) -> PathBuf {
    let path = dir.path().join("orders.csv");
    fs::write(&path, lines.join("\r\n") + "\r\n").expect("write export");
    path
}

fn utf8_plan(input: &Path) -> ConvertPlan {
    let mut plan = ConvertPlan::new(input, ConversionOptions::default());
    plan.encoding = SourceEncoding::Utf8;
    plan
}

fn no_prompt(
    _: &[prepaid_model::PendingCorrection],
) -> std::io::Result<Vec<(CorrectionKey, String)>> {
    Ok(Vec::new())
}

#[test]
fn complete_export_is_written_next_to_input() {
    let dir = tempdir().expect("temp dir");
    let input = write_export(
        &dir,
        &[
            line("1001", "A1", "Widget", "1"),
            line("1001", "A2", "Gadget", "3"),
            line("1002", "B1", "Gizmo", "1"),
        ],
    );

    let report = convert(&utf8_plan(&input), no_prompt).expect("convert");
    assert_eq!((report.rows, report.columns), (3, WIDTH));
    let output = dir.path().join("orders_prepaid.csv");
    assert_eq!(
        report.outcome,
        ConvertOutcome::Written {
            output: output.clone(),
            orders: 2,
        }
    );

    let text = fs::read_to_string(&output).expect("read output");
    let rows: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0], ",".repeat(WIDTH - 1));
    let first: Vec<&str> = rows[1].split(',').collect();
    assert_eq!(&first[26..30], ["A1", "Widget", "A2", "3★Gadget"]);
    assert_eq!(first[32], "1001");
}

#[test]
fn missing_names_round_trip_through_template() {
    let dir = tempdir().expect("temp dir");
    let input = write_export(
        &dir,
        &[line("1001", "A1", "Widget", "1"), line("1001", "A2", "", "1")],
    );
    let mut plan = utf8_plan(&input);

    let report = convert(&plan, no_prompt).expect("convert");
    let ConvertOutcome::NeedsNames { template, pending } = report.outcome else {
        panic!("expected missing names");
    };
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].key, CorrectionKey::new("1001", "A2", Slot::Second));
    assert!(!plan.output.exists());

    let filled = fs::read_to_string(&template)
        .expect("read template")
        .replacen(",2,\r\n", ",2,Gadget\r\n", 1);
    fs::write(&template, filled).expect("fill template");
    plan.names = Some(template);

    let report = convert(&plan, no_prompt).expect("convert with names");
    assert!(matches!(report.outcome, ConvertOutcome::Written { orders: 1, .. }));
    let text = fs::read_to_string(&plan.output).expect("read output");
    assert!(text.contains("A1,Widget,A2,Gadget"));
}

#[test]
fn prompt_supplies_missing_names() {
    let dir = tempdir().expect("temp dir");
    let input = write_export(
        &dir,
        &[line("1001", "A1", "", "2"), line("1002", "B1", "Gizmo", "1")],
    );

    let mut asked = 0;
    let report = convert(&utf8_plan(&input), |pending| {
        asked += 1;
        Ok(pending
            .iter()
            .map(|correction| (correction.key.clone(), "Widget".to_string()))
            .collect())
    })
    .expect("convert");

    assert_eq!(asked, 1);
    assert!(matches!(report.outcome, ConvertOutcome::Written { orders: 2, .. }));
    let text = fs::read_to_string(dir.path().join("orders_prepaid.csv")).expect("read output");
    assert!(text.contains("A1,2★Widget"));
}

#[test]
fn too_many_items_fails_without_output() {
    let dir = tempdir().expect("temp dir");
    let input = write_export(
        &dir,
        &[
            line("1001", "A1", "Widget", "1"),
            line("1001", "A2", "Gadget", "1"),
            line("1001", "A3", "Gizmo", "1"),
        ],
    );
    let plan = utf8_plan(&input);

    let err = convert(&plan, no_prompt).expect_err("three items");
    assert!(format!("{err:#}").contains("order 1001 contains 3 items"));
    assert!(!plan.output.exists());
}

#[test]
fn shift_jis_export_converts() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("orders.csv");
    let text = line("1001", "A1", "ウィジェット", "1") + "\r\n";
    let (bytes, _, _) = SHIFT_JIS.encode(&text);
    fs::write(&path, &bytes).expect("write export");

    let plan = ConvertPlan::new(&path, ConversionOptions::default());
    convert(&plan, no_prompt).expect("convert");

    let bytes = fs::read(&plan.output).expect("read output");
    let (output, _, had_errors) = SHIFT_JIS.decode(&bytes);
    assert!(!had_errors);
    assert!(output.contains("A1,ウィジェット"));
    assert!(output.contains("東京都千代田区"));
}

#[test]
fn inspect_lists_pending_without_writing() {
    let dir = tempdir().expect("temp dir");
    let input = write_export(
        &dir,
        &[line("1001", "A1", "Widget", "1"), line("1001", "A2", "", "1")],
    );

    let report = inspect(&input, SourceEncoding::Utf8, ConversionOptions::default())
        .expect("inspect");
    assert_eq!(report.status, RunStatus::Collecting { pending: 1 });
    assert_eq!(report.pending.len(), 1);
    assert_eq!(report.pending[0].address, "東京都千代田区");
    assert_eq!(fs::read_dir(dir.path()).expect("list dir").count(), 1);
}

#[test]
fn layout_file_overrides_some_columns() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("layout.json");
    fs::write(&path, r#"{"order_id": 0, "quantity": 50}"#).expect("write layout");

    let layout = load_layout(&path).expect("load layout");
    assert_eq!(layout.order_id, 0);
    assert_eq!(layout.quantity, 50);
    assert_eq!(layout.address, 11);
}

#[test]
fn unreadable_layout_names_the_file() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("layout.json");
    fs::write(&path, "{ not json").expect("write layout");

    let err = load_layout(&path).expect_err("bad json");
    assert!(err.to_string().contains("layout.json"));
}
