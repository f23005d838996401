#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const SEED_JSON: &str = r#"{
  "budget_types": [
    {"id": 1, "budget_type": "Capex"},
    {"id": 2, "budget_type": "Opex"},
    {"id": 3, "budget_type": "Grant"},
    {"id": 4, "budget_type": "Reserve"},
    {"id": 5, "budget_type": "Travel"},
    {"id": 6, "budget_type": "Training"},
    {"id": 7, "budget_type": "Marketing"}
  ],
  "material_types": [
    {"id": 1, "name": "Raw material", "code": "RAW"}
  ],
  "materials": [
    {"id": 1, "code": "STL-01", "name": "Steel rod", "material_type": "Raw material",
     "uom": "kg", "unit_price": 120.5, "hsn_code": "7214"},
    {"id": 2, "code": "PKG-01", "name": "Carton box", "material_type": "Packaging",
     "uom": "box", "unit_price": 12}
  ],
  "facilities": [
    {"id": 1, "name": "Board room", "location": "Floor 3", "capacity": 12,
     "fee": {"amount": 40.0, "unit": "hour"},
     "payment": {"mode": "both", "advance_percent": 25},
     "slot": {"opens": "09:00:00", "closes": "17:00:00", "minutes": 60},
     "active": true}
  ],
  "courses": [
    {"id": 1, "title": "Rust basics", "category": "Programming", "level": "beginner",
     "duration_hours": 12, "summary": "Intro to Rust",
     "description": "A gentle introduction to the Rust language.",
     "highlights": ["Ownership"], "curriculum": [{"title": "Setup"}], "faqs": []}
  ]
}"#;

pub fn adm(home: &str) -> Command {
    let mut cmd = cargo_bin_cmd!("admindesk");
    cmd.env("HOME", home);
    cmd
}

/// Empty HOME directory for one test, so no real config file is read.
pub fn temp_home(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_admindesk_home", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp home");
    path.to_string_lossy().to_string()
}

/// Write `content` to a file inside the system temp dir and return its path.
pub fn write_temp(name: &str, ext: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_admindesk.{}", name, ext));
    fs::write(&path, content).expect("write temp file");
    path.to_string_lossy().to_string()
}

pub fn seed_file(name: &str) -> String {
    write_temp(&format!("{name}_seed"), "json", SEED_JSON)
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}
