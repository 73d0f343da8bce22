use uuid::Uuid;

/// Fresh identifier for a condition or group.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
