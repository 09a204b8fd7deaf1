use opflow::cli::{run, USAGE};
use opflow::CliError;
use serde_json::{json, Value};

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn run_json(list: &[&str]) -> Value {
    let out = run(&args(list)).expect("cli run");
    serde_json::from_str(&out).expect("json output")
}

#[test]
fn ping_prints_the_response_descriptor() {
    let out = run_json(&["ping", "--params", r#"{"message":"hi"}"#]);
    assert_eq!(out["status"], "ok");
    assert_eq!(out["code"], 200);
    assert_eq!(out["success"], true);
    assert_eq!(out["payload"], json!({ "pong": "hi" }));
}

#[test]
fn show_respects_the_policy() {
    let guest = run_json(&["show", "--params", r#"{"id":2}"#]);
    assert_eq!(guest["code"], 403);
    assert_eq!(guest["success"], false);

    let admin = run_json(&["show", "--params", r#"{"id":2}"#, "--user", "9", "--admin"]);
    assert_eq!(admin["code"], 200);
    assert_eq!(admin["payload"]["title"], "Draft notes");
}

#[test]
fn create_reports_validation_errors() {
    let out = run_json(&["create", "--params", r#"{"title":""}"#, "--user", "1"]);
    assert_eq!(out["status"], "unprocessable_entity");
    assert_eq!(out["payload"]["error_type"], "contract_not_respected");
}

#[test]
fn errors_map_to_exit_codes() {
    let unknown = run(&args(&["destroy"])).unwrap_err();
    assert!(matches!(unknown, CliError::UnknownOperation(ref op) if op == "destroy"));
    assert_eq!(unknown.exit_code(), 4);

    let usage = run(&[]).unwrap_err();
    assert_eq!(usage.exit_code(), 2);
}

#[test]
fn help_prints_usage() {
    assert_eq!(run(&args(&["--help"])).expect("help"), USAGE);
}
