use uuid::Uuid;

/// `<prefix>_<32 hex chars>`, e.g. `att_…` for attachments and `evt_…` for events.
pub fn create_object_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}
