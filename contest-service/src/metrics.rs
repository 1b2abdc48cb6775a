//! In-process counters exposed on GET /metrics.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::OnceCell;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VoteOutcome {
    Accepted,
    UnknownVideo,
    LimitReached,
    BadRequest,
    Internal,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RegistrationOutcome {
    Registered,
    Duplicate,
    BadRequest,
    Internal,
}

pub struct Metrics {
    votes_total: HashMap<VoteOutcome, u64>,
    registrations_total: HashMap<RegistrationOutcome, u64>,
    settlements_total: u64,
}

static METRICS: OnceCell<Mutex<Metrics>> = OnceCell::new();

fn get() -> &'static Mutex<Metrics> {
    METRICS.get_or_init(|| {
        Mutex::new(Metrics {
            votes_total: HashMap::new(),
            registrations_total: HashMap::new(),
            settlements_total: 0,
        })
    })
}

pub fn record_vote_outcome(outcome: VoteOutcome) {
    let mut m = get().lock().expect("metrics mutex poisoned");
    *m.votes_total.entry(outcome).or_insert(0) += 1;
}

pub fn record_registration_outcome(outcome: RegistrationOutcome) {
    let mut m = get().lock().expect("metrics mutex poisoned");
    *m.registrations_total.entry(outcome).or_insert(0) += 1;
}

pub fn record_settlement() {
    let mut m = get().lock().expect("metrics mutex poisoned");
    m.settlements_total += 1;
}

pub fn snapshot_as_json() -> serde_json::Value {
    use serde_json::json;
    let m = get().lock().expect("metrics mutex poisoned");

    let votes: Vec<serde_json::Value> = m
        .votes_total
        .iter()
        .map(|(outcome, count)| {
            json!({
                "outcome": match outcome {
                    VoteOutcome::Accepted => "accepted",
                    VoteOutcome::UnknownVideo => "unknown_video",
                    VoteOutcome::LimitReached => "limit_reached",
                    VoteOutcome::BadRequest => "bad_request",
                    VoteOutcome::Internal => "internal",
                },
                "count": count
            })
        })
        .collect();

    let registrations: Vec<serde_json::Value> = m
        .registrations_total
        .iter()
        .map(|(outcome, count)| {
            json!({
                "outcome": match outcome {
                    RegistrationOutcome::Registered => "registered",
                    RegistrationOutcome::Duplicate => "duplicate",
                    RegistrationOutcome::BadRequest => "bad_request",
                    RegistrationOutcome::Internal => "internal",
                },
                "count": count
            })
        })
        .collect();

    let (db_path_str, db_bytes) = storage_db_info();
    let db_mb = db_bytes.map(|b| round2(bytes_to_mb(b)));
    let fs_free_mb = db_path_str.as_deref().and_then(filesystem_free_mb_from_db_path);

    json!({
        "votes_total": votes,
        "registrations_total": registrations,
        "settlements_total": m.settlements_total,
        "storage": {
            "db_path": db_path_str,
            "db_size_mb": db_mb,
            "free_storage_mb": fs_free_mb,
        }
    })
}

/// When CONTEST_DB_PATH is unset the ledger is in-memory and there is
/// nothing to measure.
fn storage_db_info() -> (Option<String>, Option<u64>) {
    let Some(db_path) = std::env::var("CONTEST_DB_PATH").ok().filter(|p| !p.is_empty()) else {
        return (None, None);
    };
    let db_bytes = std::fs::metadata(&db_path)
        .ok()
        .and_then(|m| if m.is_file() { Some(m.len()) } else { None });

    (Some(db_path), db_bytes)
}

fn bytes_to_mb(bytes: u64) -> f64 {
    let mb = 1024.0 * 1024.0;
    (bytes as f64) / mb
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn filesystem_free_mb_from_db_path(db_path: &str) -> Option<f64> {
    use sysinfo::Disks;
    let disks = Disks::new_with_refreshed_list();
    let path = std::path::Path::new(db_path);
    let mount = path.canonicalize().ok().and_then(|p| {
        disks
            .iter()
            .filter(|d| p.starts_with(d.mount_point()))
            .max_by_key(|d| d.mount_point().as_os_str().len())
    });

    mount.map(|d| round2(bytes_to_mb(d.available_space())))
}
