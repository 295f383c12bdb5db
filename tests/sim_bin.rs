use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "4"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["stage"], 4);
    assert!(v["status"].is_string());
    assert!(v["ticks"].as_u64().unwrap() > 0);
}

#[test]
fn sim_binary_rejects_bad_stage() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["1", "9"])
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}

#[test]
fn sim_binary_stage_five_uses_worker_process() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .args(["3", "5"])
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let v: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).expect("invalid json");
    assert_eq!(v["stage"], 5);
}

#[test]
fn sim_binary_defaults_to_last_stage() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg("2")
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let v: serde_json::Value =
        serde_json::from_str(String::from_utf8_lossy(&output.stdout).trim()).expect("invalid json");
    assert_eq!(v["stage"], 5);
    assert_eq!(v["config"]["movers"].as_array().map(|m| m.len()), Some(3));
}
