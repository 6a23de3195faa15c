// ── Raw-payload normalization ──
//
// The backend has shipped several client payload shapes; each canonical
// field resolves through an explicit, ordered alias list evaluated
// first-present-wins. Each alias is annotated with the backend revision
// that produced it so nobody has to rediscover where a name came from.

use serde_json::Value;
use tracing::warn;

use portway_api::models::RawClient;

use crate::model::bandwidth::BandwidthLimit;
use crate::model::client::Client;

/// Ordered source aliases per canonical field.
///
/// - `_id` / `id`: Mongo-backed revisions send `_id`, the SQLite port
///   sends `id` (sometimes numeric).
/// - `roll_no` / `name`: student-id deployments vs. generic-device ones.
/// - `ip` / `ip_address`: the lease refresher renamed the field once.
/// - `data` / `data_usage`: cumulative GB; the newer name may arrive as
///   a numeric string.
const ID_ALIASES: &[&str] = &["_id", "id"];
const NAME_ALIASES: &[&str] = &["roll_no", "name"];
const DEVICE_ALIASES: &[&str] = &["device"];
const IP_ALIASES: &[&str] = &["ip", "ip_address"];
const DATA_ALIASES: &[&str] = &["data", "data_usage"];
const ACTIVITY_ALIASES: &[&str] = &["activity"];
const BLOCKED_ALIASES: &[&str] = &["blocked"];
const STATUS_ALIASES: &[&str] = &["status"];
const BANDWIDTH_ALIASES: &[&str] = &["bandwidth_limit"];
const ROLE_ALIASES: &[&str] = &["role"];

/// First present value among the aliases, in declaration order.
fn first_present<'a>(raw: &'a RawClient, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|key| raw.get(*key))
        .filter(|v| !v.is_null())
}

/// Resolve to a display string: strings pass through, numbers are
/// rendered (numeric ids exist in the wild).
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Usage arrives as a number or a numeric string; anything else is 0.
fn as_gigabytes(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.filter(|gb| gb.is_finite() && *gb >= 0.0).unwrap_or(0.0)
}

/// Canonicalize one raw client record.
///
/// Missing optional fields take documented defaults; only an
/// unresolvable display name is a data-integrity failure, and even that
/// skips the record with a warning rather than failing the pass.
pub fn normalize_client(raw: &RawClient) -> Option<Client> {
    let Some(display_name) = first_present(raw, NAME_ALIASES).and_then(as_text) else {
        warn!(
            keys = ?raw.keys().collect::<Vec<_>>(),
            "skipping client record with no resolvable identity"
        );
        return None;
    };

    let id = first_present(raw, ID_ALIASES)
        .and_then(as_text)
        .unwrap_or_else(|| display_name.clone());

    Some(Client {
        id,
        display_name,
        device: first_present(raw, DEVICE_ALIASES).and_then(as_text),
        ip: first_present(raw, IP_ALIASES).and_then(as_text),
        data_usage_gb: first_present(raw, DATA_ALIASES).map_or(0.0, as_gigabytes),
        activity: first_present(raw, ACTIVITY_ALIASES)
            .and_then(as_text)
            .unwrap_or_else(|| "Idle".into()),
        blocked: first_present(raw, BLOCKED_ALIASES)
            .and_then(Value::as_bool)
            .unwrap_or(false),
        status: first_present(raw, STATUS_ALIASES).and_then(as_text),
        bandwidth_limit: first_present(raw, BANDWIDTH_ALIASES).and_then(BandwidthLimit::from_wire),
        role: first_present(raw, ROLE_ALIASES).and_then(as_text),
    })
}

/// Canonicalize a whole listing; malformed records are dropped, never
/// fatal to the pass.
pub fn normalize_all(raw: Vec<RawClient>) -> Vec<Client> {
    raw.iter().filter_map(normalize_client).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::model::bandwidth::BandwidthTier;

    fn raw(value: serde_json::Value) -> RawClient {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    #[test]
    fn first_present_wins_across_aliases() {
        let record = raw(json!({
            "_id": "abc", "id": 7,
            "roll_no": "23203A0024", "name": "ignored",
            "ip": "192.168.1.10", "ip_address": "10.0.0.1"
        }));
        let client = normalize_client(&record).expect("valid record");
        assert_eq!(client.id, "abc");
        assert_eq!(client.display_name, "23203A0024");
        assert_eq!(client.ip.as_deref(), Some("192.168.1.10"));
    }

    #[test]
    fn alternate_shape_resolves_through_fallback_aliases() {
        let record = raw(json!({
            "id": 2, "name": "Smart TV", "ip_address": "192.168.1.12",
            "data_usage": "15.8", "blocked": true
        }));
        let client = normalize_client(&record).expect("valid record");
        assert_eq!(client.id, "2");
        assert_eq!(client.display_name, "Smart TV");
        assert_eq!(client.ip.as_deref(), Some("192.168.1.12"));
        assert!((client.data_usage_gb - 15.8).abs() < f64::EPSILON);
        assert!(client.blocked);
    }

    #[test]
    fn missing_optionals_take_documented_defaults() {
        let record = raw(json!({ "roll_no": "23203A0025" }));
        let client = normalize_client(&record).expect("valid record");
        assert!(client.data_usage_gb.abs() < f64::EPSILON);
        assert_eq!(client.activity, "Idle");
        assert!(!client.blocked);
        assert_eq!(client.status, None);
        assert_eq!(client.bandwidth_limit, None);
    }

    #[test]
    fn unresolvable_identity_skips_the_record_without_failing_the_pass() {
        let records = vec![
            raw(json!({ "ip": "192.168.1.99", "data": 3.0 })),
            raw(json!({ "roll_no": "23203A0026" })),
        ];
        let clients = normalize_all(records);
        assert_eq!(clients.len(), 1);
        assert_eq!(clients[0].display_name, "23203A0026");
    }

    #[test]
    fn bandwidth_limit_decodes_both_wire_shapes() {
        let tier = raw(json!({ "roll_no": "a", "bandwidth_limit": "low" }));
        assert_eq!(
            normalize_client(&tier).expect("valid").bandwidth_limit,
            Some(BandwidthLimit::Tier(BandwidthTier::Low))
        );

        let manual = raw(json!({ "roll_no": "a", "bandwidth_limit": 15 }));
        assert_eq!(
            normalize_client(&manual).expect("valid").bandwidth_limit,
            Some(BandwidthLimit::ManualMbps(15))
        );
    }

    #[test]
    fn garbage_usage_values_default_to_zero() {
        for bad in [json!([1, 2]), json!("lots"), json!(-4.0)] {
            let record = raw(json!({ "roll_no": "a", "data": bad }));
            let gb = normalize_client(&record).expect("valid").data_usage_gb;
            assert!(gb.abs() < f64::EPSILON, "expected 0, got {gb}");
        }
    }

    #[test]
    fn null_aliases_fall_through_to_the_next_source() {
        let record = raw(json!({ "roll_no": null, "name": "fallback" }));
        let client = normalize_client(&record).expect("valid record");
        assert_eq!(client.display_name, "fallback");
    }
}
