//! End-to-end tests for conversion runs.

use std::collections::HashMap;

use prepaid_engine::{
    ConversionEngine, ConversionError, EngineError, RunStatus, SubmitOutcome,
};
use prepaid_model::{
    ColumnLayout, ConversionOptions, CorrectionKey, EmptyGroupPolicy, ItemLimitPolicy, OrderId,
    Slot, ValidationWarning,
};

const WIDTH: usize = 42;

fn row(order_id: &str, code: &str, name: &str, quantity: &str) -> Vec<String> {
    let mut fields = vec![String::new(); WIDTH];
    fields[0] = "0123".to_string();
    fields[11] = format!("{order_id} Chiyoda, Tokyo");
    fields[26] = code.to_string();
    fields[27] = name.to_string();
    fields[32] = order_id.to_string();
    fields[41] = quantity.to_string();
    fields
}

fn engine() -> ConversionEngine {
    ConversionEngine::new(ConversionOptions::default())
}

#[test]
fn ready_orders_finalize_with_blank_leading_row() {
    let layout = ColumnLayout::default();
    let mut engine = engine();
    let run = engine
        .ingest(vec![
            row("1001", "A1", "Widget", "1"),
            row("1002", "B1", "Gizmo", "3"),
            row("1001", "A2", "Gadget", "2"),
        ])
        .unwrap();

    assert_eq!(engine.status(run).unwrap(), RunStatus::Ready { orders: 2 });
    assert!(engine.pending_corrections(run).unwrap().is_empty());

    let table = engine.finalize(run).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.width, WIDTH);
    assert!(table.records[0].fields().iter().all(String::is_empty));

    let first = &table.records[1];
    assert_eq!(first.field(0), "0123");
    assert_eq!(first.field(32), "1001");
    assert_eq!(first.slot(Slot::First, &layout), ("A1", "Widget"));
    assert_eq!(first.slot(Slot::Second, &layout), ("A2", "2★Gadget"));

    let second = &table.records[2];
    assert_eq!(second.slot(Slot::First, &layout), ("B1", "3★Gizmo"));
    assert_eq!(second.slot(Slot::Second, &layout), ("", ""));
}

#[test]
fn missing_name_is_collected_and_resumed() {
    let layout = ColumnLayout::default();
    let mut engine = engine();
    let run = engine
        .ingest(vec![row("1001", "A1", "Widget", "1"), row("1001", "A2", "", "1")])
        .unwrap();

    let key = CorrectionKey::new("1001", "A2", Slot::Second);
    let pending = engine.pending_corrections(run).unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].key, key);
    assert_eq!(engine.status(run).unwrap(), RunStatus::Collecting { pending: 1 });

    let err = engine.finalize(run).unwrap_err();
    assert_eq!(
        err,
        EngineError::StillCollecting {
            unresolved: vec![key.clone()]
        }
    );

    let names = HashMap::from([(key, "Gadget".to_string())]);
    assert_eq!(
        engine.submit_corrections(run, names).unwrap(),
        SubmitOutcome::Ready
    );

    let table = engine.finalize(run).unwrap();
    assert_eq!(table.len(), 2);
    assert!(table.records[0].is_blank());
    assert_eq!(table.records[1].slot(Slot::First, &layout), ("A1", "Widget"));
    assert_eq!(table.records[1].slot(Slot::Second, &layout), ("A2", "Gadget"));
}

#[test]
fn incomplete_submission_keeps_collecting() {
    let mut engine = engine();
    let run = engine
        .ingest(vec![row("1001", "A1", "", ""), row("1002", "B1", "", "")])
        .unwrap();

    let first = CorrectionKey::new("1001", "A1", Slot::First);
    let second = CorrectionKey::new("1002", "B1", Slot::First);
    let outcome = engine
        .submit_corrections(run, [(first.clone(), "Widget".to_string())])
        .unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Collecting {
            unresolved: vec![second.clone()]
        }
    );

    let outcome = engine
        .submit_corrections(run, [(second, "Gizmo".to_string())])
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Ready);
    assert_eq!(engine.finalize(run).unwrap().len(), 3);
}

#[test]
fn corrected_orders_follow_ready_orders() {
    let layout = ColumnLayout::default();
    let mut engine = engine();
    let run = engine
        .ingest(vec![
            row("1001", "A1", "", "1"),
            row("1002", "B1", "Gizmo", "1"),
        ])
        .unwrap();

    engine
        .submit_corrections(
            run,
            [(CorrectionKey::new("1001", "A1", Slot::First), "Widget".to_string())],
        )
        .unwrap();
    let table = engine.finalize(run).unwrap();

    let codes: Vec<&str> = table
        .orders()
        .iter()
        .map(|record| record.slot(Slot::First, &layout).0)
        .collect();
    assert_eq!(codes, vec!["B1", "A1"]);
}

#[test]
fn too_many_items_fails_the_run() {
    let mut engine = engine();
    let run = engine
        .ingest(vec![
            row("1001", "A1", "Widget", ""),
            row("1002", "B1", "Gizmo", ""),
            row("1002", "B2", "", ""),
            row("1002", "B3", "Doohickey", ""),
        ])
        .unwrap();

    let expected = ConversionError::TooManyItems {
        order_id: OrderId::new("1002"),
        count: 3,
    };
    assert_eq!(engine.status(run).unwrap(), RunStatus::Failed(expected.clone()));
    assert_eq!(
        engine.pending_corrections(run).unwrap_err(),
        EngineError::Conversion(expected.clone())
    );
    assert_eq!(
        engine.finalize(run).unwrap_err(),
        EngineError::Conversion(expected)
    );
}

#[test]
fn failed_run_keeps_distinct_product_warning() {
    let mut engine = engine();
    let run = engine
        .ingest(vec![
            row("1001", "A1", "Widget", ""),
            row("1001", "A2", "Gadget", ""),
            row("1001", "A3", "Gizmo", ""),
        ])
        .unwrap();

    assert!(matches!(
        engine.status(run).unwrap(),
        RunStatus::Failed(ConversionError::TooManyItems { count: 3, .. })
    ));
    assert_eq!(
        engine.warnings(run).unwrap(),
        [ValidationWarning::ManyDistinctProducts {
            order_id: OrderId::new("1001"),
            count: 3,
            codes: vec!["A1".to_string(), "A2".to_string(), "A3".to_string()],
        }]
    );
}

#[test]
fn truncate_policy_keeps_first_two_items() {
    let options = ConversionOptions::default().with_item_limit(ItemLimitPolicy::Truncate);
    let mut engine = ConversionEngine::new(options);
    assert_eq!(engine.options().item_limit, ItemLimitPolicy::Truncate);

    let run = engine
        .ingest(vec![
            row("1001", "A1", "Widget", ""),
            row("1001", "A2", "Gadget", ""),
            row("1001", "A3", "Gizmo", ""),
        ])
        .unwrap();

    let warnings = engine.warnings(run).unwrap();
    assert_eq!(warnings.len(), 2);
    assert!(matches!(
        &warnings[1],
        ValidationWarning::ExcessItemsDropped { dropped, .. } if dropped == &["A3".to_string()]
    ));
    assert_eq!(engine.finalize(run).unwrap().len(), 2);
}

#[test]
fn base_only_policy_emits_orders_without_items() {
    let options = ConversionOptions::default().with_empty_group(EmptyGroupPolicy::BaseOnly);
    let mut engine = ConversionEngine::new(options);
    let run = engine.ingest(vec![row("1001", "", "", "")]).unwrap();

    let table = engine.finalize(run).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.records[1].field(32), "1001");
}

#[test]
fn invalid_quantity_fails_the_run() {
    let mut engine = engine();
    let run = engine.ingest(vec![row("1001", "A1", "Widget", "a few")]).unwrap();
    assert!(matches!(
        engine.finalize(run),
        Err(EngineError::Conversion(ConversionError::InvalidQuantity { line: 1, .. }))
    ));
}

#[test]
fn rejects_ragged_and_narrow_input() {
    let mut engine = engine();
    let mut short = row("1002", "B1", "Gizmo", "");
    short.pop();
    assert_eq!(
        engine
            .ingest(vec![row("1001", "A1", "Widget", ""), short])
            .unwrap_err(),
        EngineError::RaggedInput {
            line: 2,
            expected: WIDTH,
            found: WIDTH - 1
        }
    );

    let narrow = vec![vec!["1001".to_string(); 20]];
    assert!(matches!(
        engine.ingest(narrow),
        Err(EngineError::Layout(_))
    ));

    let empty: Vec<Vec<String>> = Vec::new();
    assert_eq!(engine.ingest(empty).unwrap_err(), EngineError::NoRows);
}

#[test]
fn reset_discards_only_its_run() {
    let mut engine = engine();
    let first = engine.ingest(vec![row("1001", "A1", "", "")]).unwrap();
    let second = engine.ingest(vec![row("2001", "C1", "Widget", "")]).unwrap();
    assert_ne!(first, second);

    assert!(engine.reset(first));
    assert!(!engine.reset(first));
    assert_eq!(
        engine.pending_corrections(first).unwrap_err(),
        EngineError::UnknownRun(first.id())
    );
    assert_eq!(engine.finalize(second).unwrap().len(), 2);
}

#[test]
fn finalize_discards_the_run() {
    let mut engine = engine();
    let run = engine.ingest(vec![row("1001", "A1", "Widget", "")]).unwrap();
    engine.finalize(run).unwrap();
    assert_eq!(
        engine.finalize(run).unwrap_err(),
        EngineError::UnknownRun(run.id())
    );
}

#[test]
fn shape_reports_input_dimensions() {
    let mut engine = engine();
    let run = engine
        .ingest(vec![row("1001", "A1", "Widget", ""), row("1001", "A2", "Gadget", "")])
        .unwrap();
    assert_eq!(engine.shape(run).unwrap(), (2, WIDTH));
}
