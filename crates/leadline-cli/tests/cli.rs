use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

fn run_cmd(db_path: &Path, args: &[&str]) -> String {
    let output = cargo_bin_cmd!("leadline")
        .args(["--db-path", db_path.to_str().expect("db path")])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    String::from_utf8(output.stdout).expect("utf8")
}

fn run_cmd_json(db_path: &Path, args: &[&str]) -> Value {
    let output = cargo_bin_cmd!("leadline")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args(args)
        .output()
        .expect("run command");
    assert!(output.status.success(), "command failed: {:?}", output);
    serde_json::from_slice(&output.stdout).expect("parse json")
}

#[test]
fn cli_intake_log_and_worklist_flow() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("leadline.sqlite3");

    let listing = run_cmd_json(
        &db_path,
        &[
            "listing",
            "add",
            "--title",
            "Sea View Residency",
            "--property-type",
            "residential",
            "--brochure-url",
            "https://cdn.example.com/sea-view.pdf",
        ],
    );
    let listing_id = listing["id"].as_str().expect("listing id").to_string();

    let receipt = run_cmd_json(
        &db_path,
        &[
            "brochure",
            "--name",
            "priya sharma",
            "--phone",
            "98765 43210",
            "--email",
            "priya@example.com",
            "--listing",
            &listing_id,
        ],
    );
    assert_eq!(receipt["success"], true);
    assert_eq!(
        receipt["brochure_url"],
        "https://cdn.example.com/sea-view.pdf"
    );

    let leads = run_cmd_json(&db_path, &["leads", "ls"]);
    let items = leads.as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["phone"], "9876543210");
    assert_eq!(items[0]["name"], "Priya Sharma");
    assert_eq!(items[0]["status"], "interested");
    assert_eq!(items[0]["temperature"], "hot");

    run_cmd(
        &db_path,
        &["staff", "add", "--username", "kiran", "--name", "Kiran Rao"],
    );

    run_cmd(
        &db_path,
        &[
            "log",
            "--staff",
            "kiran",
            "--phone",
            "9876543210",
            "--kind",
            "call",
            "--notes",
            "confirmed budget, wants a site visit",
            "--follow-up",
            "2099-01-01",
        ],
    );

    let detail = run_cmd_json(&db_path, &["leads", "show", "9876543210"]);
    assert_eq!(detail["status"], "interested");
    assert_eq!(detail["next_action_date"], "2099-01-01");
    assert!(detail["last_contact_date"].is_string());

    let history = run_cmd_json(&db_path, &["history", "9876543210"]);
    let events = history.as_array().expect("array");
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["kind"], "call");
    assert_eq!(events[1]["kind"], "brochure");

    let worklist = run_cmd_json(&db_path, &["worklist", "--soon-days", "365"]);
    assert!(worklist["overdue"].as_array().expect("overdue").is_empty());
}

#[test]
fn cli_rejects_activity_for_unknown_lead() {
    let temp = TempDir::new().expect("temp dir");
    let db_path = temp.path().join("leadline.sqlite3");

    run_cmd(
        &db_path,
        &["staff", "add", "--username", "kiran", "--name", "Kiran Rao"],
    );

    let output = cargo_bin_cmd!("leadline")
        .args(["--db-path", db_path.to_str().expect("db path"), "--json"])
        .args([
            "log",
            "--staff",
            "kiran",
            "--phone",
            "9000000000",
            "--notes",
            "cold call",
        ])
        .output()
        .expect("run command");
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));

    let report: Value = serde_json::from_slice(&output.stderr).expect("structured failure");
    assert_eq!(report["success"], false);
    assert!(report["message"].as_str().expect("message").contains("no lead"));
}
